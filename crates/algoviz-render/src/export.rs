#![forbid(unsafe_code)]

//! PNG export for pixmaps (feature `png`).

use std::fmt;
use std::io::Cursor;
use std::path::Path;

use image::{ImageFormat, RgbaImage};

use crate::pixmap::Pixmap;

/// Errors from encoding or writing an image.
#[derive(Debug)]
pub enum ExportError {
    /// The pixmap has a zero dimension.
    EmptyImage,
    /// Encoder failure.
    Image(image::ImageError),
    /// I/O error writing the file.
    Io(std::io::Error),
}

impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportError::EmptyImage => write!(f, "cannot export an empty image"),
            ExportError::Image(e) => write!(f, "image encoding failed: {e}"),
            ExportError::Io(e) => write!(f, "I/O error: {e}"),
        }
    }
}

impl std::error::Error for ExportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ExportError::EmptyImage => None,
            ExportError::Image(e) => Some(e),
            ExportError::Io(e) => Some(e),
        }
    }
}

impl From<image::ImageError> for ExportError {
    fn from(e: image::ImageError) -> Self {
        ExportError::Image(e)
    }
}

impl From<std::io::Error> for ExportError {
    fn from(e: std::io::Error) -> Self {
        ExportError::Io(e)
    }
}

fn to_image(pixmap: &Pixmap) -> Result<RgbaImage, ExportError> {
    if pixmap.width() == 0 || pixmap.height() == 0 {
        return Err(ExportError::EmptyImage);
    }
    RgbaImage::from_raw(pixmap.width(), pixmap.height(), pixmap.to_rgba_bytes())
        .ok_or(ExportError::EmptyImage)
}

/// Encode a pixmap as PNG bytes.
pub fn encode_png(pixmap: &Pixmap) -> Result<Vec<u8>, ExportError> {
    let image = to_image(pixmap)?;
    let mut out = Cursor::new(Vec::new());
    image.write_to(&mut out, ImageFormat::Png)?;
    Ok(out.into_inner())
}

/// Write a pixmap to a PNG file.
pub fn write_png(pixmap: &Pixmap, path: impl AsRef<Path>) -> Result<(), ExportError> {
    let bytes = encode_png(pixmap)?;
    std::fs::write(path, bytes)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::PackedRgba;
    use crate::surface::Surface;

    #[test]
    fn png_signature_and_dimensions() {
        let mut p = Pixmap::new(12, 7);
        p.fill(PackedRgba::rgb(15, 23, 42));
        let bytes = encode_png(&p).unwrap();
        assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");

        let decoded = image::load_from_memory_with_format(&bytes, ImageFormat::Png)
            .unwrap()
            .to_rgba8();
        assert_eq!(decoded.dimensions(), (12, 7));
        assert_eq!(decoded.get_pixel(3, 3).0, [15, 23, 42, 255]);
    }

    #[test]
    fn empty_pixmap_is_rejected() {
        let err = encode_png(&Pixmap::new(0, 5)).unwrap_err();
        assert!(matches!(err, ExportError::EmptyImage));
    }

    #[test]
    fn writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("frame.png");
        write_png(&Pixmap::new(2, 2), &path).unwrap();
        assert!(std::fs::metadata(&path).unwrap().len() > 8);
    }
}
