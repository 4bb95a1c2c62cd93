//! Serialization of composed rasters to print-ready PNG or JPEG bytes.

use std::path::Path;

use image::codecs::jpeg::{JpegEncoder, PixelDensity};
use image::RgbImage;

use crate::config::ExportSettings;
use crate::error::Result;

const METERS_PER_INCH: f64 = 0.0254;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Png,
    Jpeg,
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Png => "png",
            OutputFormat::Jpeg => "jpg",
        }
    }

    /// Guesses the format from a file extension, defaulting to PNG.
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .as_deref()
        {
            Some("jpg" | "jpeg") => OutputFormat::Jpeg,
            _ => OutputFormat::Png,
        }
    }
}

pub fn encode(img: &RgbImage, format: OutputFormat, settings: &ExportSettings) -> Result<Vec<u8>> {
    match format {
        OutputFormat::Png => encode_png(img, settings.dpi),
        OutputFormat::Jpeg => encode_jpeg(img, settings),
    }
}

/// PNG with a pHYs chunk so printing software picks up the DPI.
pub fn encode_png(img: &RgbImage, dpi: u16) -> Result<Vec<u8>> {
    let mut bytes = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut bytes, img.width(), img.height());
        encoder.set_color(png::ColorType::Rgb);
        encoder.set_depth(png::BitDepth::Eight);
        let ppm = dpi_to_ppm(dpi);
        encoder.set_pixel_dims(Some(png::PixelDimensions {
            xppu: ppm,
            yppu: ppm,
            unit: png::Unit::Meter,
        }));

        let mut writer = encoder.write_header()?;
        writer.write_image_data(img.as_raw())?;
        writer.finish()?;
    }
    Ok(bytes)
}

pub fn encode_jpeg(img: &RgbImage, settings: &ExportSettings) -> Result<Vec<u8>> {
    let mut bytes = Vec::new();
    {
        let mut encoder = JpegEncoder::new_with_quality(&mut bytes, settings.quality.clamp(1, 100));
        encoder.set_pixel_density(PixelDensity::dpi(settings.dpi));
        encoder.encode_image(img)?;
    }
    Ok(bytes)
}

fn dpi_to_ppm(dpi: u16) -> u32 {
    (f64::from(dpi) / METERS_PER_INCH).round() as u32
}
