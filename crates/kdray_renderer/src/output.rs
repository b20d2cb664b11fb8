//! Image output.
//!
//! The plain-text PPM writer is the native format; anything else is handed
//! to the `image` crate and encoded by file extension.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use thiserror::Error;

use crate::ImageBuffer;

/// Errors that can occur while saving a rendered image.
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Image encoding error: {0}")]
    Encode(#[from] image::ImageError),
}

/// Write `image` as plain-text PPM (`P3`), one `R G B` line per pixel.
pub fn write_ppm<W: Write>(mut writer: W, image: &ImageBuffer) -> io::Result<()> {
    writeln!(writer, "P3\n{} {}\n255", image.width, image.height)?;
    for rgb in image.to_rgb8().chunks_exact(3) {
        writeln!(writer, "{} {} {}", rgb[0], rgb[1], rgb[2])?;
    }
    writer.flush()
}

fn is_ppm(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("ppm"))
}

/// Save `image` to `path`, choosing the format from the extension.
pub fn save_image(path: impl AsRef<Path>, image: &ImageBuffer) -> Result<(), OutputError> {
    let path = path.as_ref();

    if is_ppm(path) {
        let file = File::create(path)?;
        write_ppm(BufWriter::new(file), image)?;
    } else {
        image::save_buffer(
            path,
            &image.to_rgb8(),
            image.width,
            image.height,
            image::ColorType::Rgb8,
        )?;
    }

    log::info!("Saved {}x{} image to {}", image.width, image.height, path.display());
    Ok(())
}
