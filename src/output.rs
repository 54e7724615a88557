use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use log::info;

use crate::picture::Picture;

/// Writes the framebuffer as an ASCII PPM (P3) file, one row per line.
///
/// Pixels are already clamped 8-bit values; no tone mapping happens here.
pub fn write_ppm(picture: &Picture, path: impl AsRef<Path>) -> io::Result<()> {
    let path = path.as_ref();
    let mut file = BufWriter::new(File::create(path)?);

    writeln!(file, "P3")?;
    writeln!(file, "{} {}", picture.width(), picture.height())?;
    writeln!(file, "255")?;

    for y in 0..picture.height() {
        for x in 0..picture.width() {
            let pixel = picture.pixel(x, y);
            write!(file, "{} {} {} ", pixel.r, pixel.g, pixel.b)?;
        }
        writeln!(file)?;
    }
    file.flush()?;

    info!(target: "app", "Wrote {}x{} image to {}", picture.width(), picture.height(), path.display());
    Ok(())
}
