//! Named constants for the logo, the QR raster and file export.
//!
//! Every `Default` impl reproduces the look of the printed reward cards; the
//! fields exist so the same pipeline can be exercised at other scales.

use image::Rgb;
use qrcode::EcLevel;

use crate::error::{Error, Result};

pub const WHITE: Rgb<u8> = Rgb([255, 255, 255]);

/// How the circular backdrop behind the star is filled.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DiscFill {
    /// One solid colour across the whole disc.
    Flat(Rgb<u8>),
    /// Linear interpolation from `inner` at the centre to `outer` at the rim.
    Radial { inner: Rgb<u8>, outer: Rgb<u8> },
}

#[derive(Clone, Debug, PartialEq)]
pub struct LogoStyle {
    pub size: u32,
    pub background: Rgb<u8>,
    pub disc: DiscFill,
    pub star_points: usize,
    pub star_outer_radius: f32,
    pub star_inner_radius: f32,
    pub star_fill: Rgb<u8>,
    pub star_outline: Rgb<u8>,
}

impl Default for LogoStyle {
    fn default() -> Self {
        Self {
            size: 200,
            background: WHITE,
            disc: DiscFill::Flat(Rgb([102, 126, 234])),
            star_points: 10,
            star_outer_radius: 60.0,
            star_inner_radius: 25.0,
            star_fill: Rgb([0xFF, 0xD7, 0x00]),
            star_outline: Rgb([0xFF, 0xA5, 0x00]),
        }
    }
}

impl LogoStyle {
    pub fn validate(&self) -> Result<()> {
        if self.size == 0 {
            return Err(Error::InvalidGeometry("logo canvas has zero size".into()));
        }
        // Vertices alternate outer/inner, so an odd count would leave two
        // adjacent vertices on the same radius.
        if self.star_points < 4 || self.star_points % 2 != 0 {
            return Err(Error::InvalidGeometry(format!(
                "star needs an even number of at least 4 vertices, got {}",
                self.star_points
            )));
        }
        if !(self.star_inner_radius > 0.0 && self.star_outer_radius > self.star_inner_radius) {
            return Err(Error::InvalidGeometry(format!(
                "star radii must satisfy 0 < inner < outer, got inner={} outer={}",
                self.star_inner_radius, self.star_outer_radius
            )));
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct QrStyle {
    /// Pixels per module.
    pub box_size: u32,
    /// Quiet zone width, in modules.
    pub border: u32,
    pub foreground: Rgb<u8>,
    pub background: Rgb<u8>,
    /// The logo is scaled to `qr_width / logo_ratio`.
    pub logo_ratio: u32,
    /// Extra pixels added to the logo size to get the backing plate size.
    pub plate_padding: u32,
    pub plate_color: Rgb<u8>,
    /// Version the encoder starts from before growing to fit the payload.
    pub min_version: i16,
}

impl Default for QrStyle {
    fn default() -> Self {
        Self {
            box_size: 10,
            border: 4,
            foreground: Rgb([0x66, 0x7e, 0xea]),
            background: WHITE,
            logo_ratio: 5,
            plate_padding: 20,
            plate_color: WHITE,
            min_version: 1,
        }
    }
}

/// What to do when a logo file cannot be read.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LogoPolicy {
    /// Log a warning and compose without an overlay.
    #[default]
    Degrade,
    Fail,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ExportSettings {
    pub dpi: u16,
    /// JPEG quality, 1-100. Ignored for PNG.
    pub quality: u8,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            dpi: 300,
            quality: 95,
        }
    }
}

/// Everything one batch item needs besides its label, URL and logo.
#[derive(Clone, Debug)]
pub struct Settings {
    pub ec_level: EcLevel,
    pub qr: QrStyle,
    pub export: ExportSettings,
    pub format: crate::export::OutputFormat,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            ec_level: EcLevel::H,
            qr: QrStyle::default(),
            export: ExportSettings::default(),
            format: crate::export::OutputFormat::Png,
        }
    }
}
