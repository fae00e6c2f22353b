use std::io::Cursor;
use std::path::Path;
use vq_core::SampleGrid;

use crate::error::ImageError;

/// Where sample grids come from and go to.
///
/// The compressor only sees [`SampleGrid`]s; implementations own the pixel
/// format.
pub trait SampleSource {
    /// Read an image as one 8-bit intensity per pixel
    fn load(&self, path: &Path) -> Result<SampleGrid, ImageError>;

    /// Write a grid as a grayscale image
    fn save(&self, grid: &SampleGrid, path: &Path) -> Result<(), ImageError>;
}

/// PNG files, any color type, reduced to 8-bit gray.
#[derive(Debug, Clone, Copy, Default)]
pub struct PngSampleSource;

impl PngSampleSource {
    pub fn new() -> Self {
        Self
    }
}

impl SampleSource for PngSampleSource {
    fn load(&self, path: &Path) -> Result<SampleGrid, ImageError> {
        let bytes = std::fs::read(path)?;
        let grid = decode_png(&bytes)?;
        tracing::debug!(
            path = %path.display(),
            width = grid.width(),
            height = grid.height(),
            "Loaded image"
        );
        Ok(grid)
    }

    fn save(&self, grid: &SampleGrid, path: &Path) -> Result<(), ImageError> {
        let bytes = encode_png(grid)?;
        std::fs::write(path, &bytes)?;
        tracing::debug!(path = %path.display(), bytes = bytes.len(), "Saved image");
        Ok(())
    }
}

/// Decode PNG bytes to a sample grid.
///
/// Palette, sub-byte and 16-bit images are normalized to 8 bits per channel
/// first. Color pixels become BT.601 luma; alpha is ignored.
pub fn decode_png(bytes: &[u8]) -> Result<SampleGrid, ImageError> {
    let mut decoder = png::Decoder::new(Cursor::new(bytes));
    decoder.set_transformations(png::Transformations::EXPAND | png::Transformations::STRIP_16);
    let mut reader = decoder.read_info()?;

    let mut buf = vec![0; reader.output_buffer_size()];
    let info = reader.next_frame(&mut buf)?;

    if info.bit_depth != png::BitDepth::Eight {
        return Err(ImageError::UnsupportedLayout(format!(
            "{:?} bits per channel",
            info.bit_depth
        )));
    }

    let channels = match info.color_type {
        png::ColorType::Grayscale => 1,
        png::ColorType::GrayscaleAlpha => 2,
        png::ColorType::Rgb => 3,
        png::ColorType::Rgba => 4,
        other => return Err(ImageError::UnsupportedLayout(format!("{other:?}"))),
    };

    let width = info.width as usize;
    let height = info.height as usize;
    let mut samples = Vec::with_capacity(width * height);
    for line in buf[..info.buffer_size()].chunks_exact(info.line_size) {
        for pixel in line[..width * channels].chunks_exact(channels) {
            samples.push(match channels {
                1 | 2 => pixel[0],
                _ => luma(pixel[0], pixel[1], pixel[2]),
            });
        }
    }

    SampleGrid::new(width, height, samples).map_err(|e| ImageError::PngDecode(e.to_string()))
}

/// Encode a sample grid as an 8-bit grayscale PNG.
pub fn encode_png(grid: &SampleGrid) -> Result<Vec<u8>, ImageError> {
    let too_large = || ImageError::TooLarge {
        width: grid.width(),
        height: grid.height(),
    };
    let width = u32::try_from(grid.width()).map_err(|_| too_large())?;
    let height = u32::try_from(grid.height()).map_err(|_| too_large())?;

    let mut buf = Cursor::new(Vec::new());
    {
        let mut encoder = png::Encoder::new(&mut buf, width, height);
        encoder.set_color(png::ColorType::Grayscale);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder.write_header()?;
        writer.write_image_data(grid.samples())?;
    }
    Ok(buf.into_inner())
}

/// Integer BT.601 luma, rounded.
fn luma(r: u8, g: u8, b: u8) -> u8 {
    let weighted = 299 * r as u32 + 587 * g as u32 + 114 * b as u32;
    ((weighted + 500) / 1000) as u8
}
