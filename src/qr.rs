use image::{ImageBuffer, RgbImage};
use ndarray::Array2;
use qrcode::types::QrError;
use qrcode::{EcLevel, QrCode, Version};
use tracing::debug;

use crate::config::QrStyle;
use crate::error::{Error, Result};

pub const MAX_VERSION: i16 = 40;

#[derive(Clone, Debug)]
pub struct QrSymbol {
    pub version: i16,
    pub ec_level: EcLevel,
    /// `true` marks a dark module, indexed `[[y, x]]`.
    pub modules: Array2<bool>,
}

impl QrSymbol {
    /// Encodes `data` at the smallest version >= `min_version` that holds it.
    pub fn encode(data: &str, ec_level: EcLevel, min_version: i16) -> Result<Self> {
        if data.is_empty() {
            return Err(Error::EmptyPayload);
        }

        let start = min_version.clamp(1, MAX_VERSION);
        for version in start..=MAX_VERSION {
            match QrCode::with_version(data, Version::Normal(version), ec_level) {
                Ok(code) => {
                    debug!(version, len = data.len(), "Encoded QR symbol");
                    return Ok(Self::from_code(&code, version, ec_level));
                }
                Err(QrError::DataTooLong) => continue,
                Err(e) => return Err(Error::Encoding(e)),
            }
        }

        Err(Error::EncodingCapacityExceeded {
            len: data.len(),
            ec: ec_level,
        })
    }

    fn from_code(code: &QrCode, version: i16, ec_level: EcLevel) -> Self {
        let width = code.width();
        let colors = code.to_colors();
        let modules = Array2::from_shape_fn((width, width), |(y, x)| {
            matches!(colors[y * width + x], qrcode::Color::Dark)
        });

        Self {
            version,
            ec_level,
            modules,
        }
    }

    /// Modules per side.
    pub fn width(&self) -> usize {
        self.modules.nrows()
    }

    /// Paints every module as a `box_size` square inside a `border`-module
    /// quiet zone.
    pub fn rasterize(&self, style: &QrStyle) -> Result<RgbImage> {
        if style.box_size == 0 || self.width() == 0 {
            return Err(Error::InvalidGeometry(format!(
                "cannot rasterize {} modules at {} px per module",
                self.width(),
                style.box_size
            )));
        }

        let modules = self.width() as u32;
        let side = style
            .border
            .checked_mul(2)
            .and_then(|b| b.checked_add(modules))
            .and_then(|m| m.checked_mul(style.box_size))
            .ok_or_else(|| {
                Error::InvalidGeometry(format!(
                    "{modules} modules with a {}-module border at {} px per module overflows",
                    style.border, style.box_size
                ))
            })?;

        Ok(ImageBuffer::from_fn(side, side, |x, y| {
            let mx = (x / style.box_size).checked_sub(style.border);
            let my = (y / style.box_size).checked_sub(style.border);
            let dark = match (mx, my) {
                (Some(mx), Some(my)) if mx < modules && my < modules => {
                    self.modules[[my as usize, mx as usize]]
                }
                _ => false,
            };

            if dark {
                style.foreground
            } else {
                style.background
            }
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grows_version_to_fit() {
        let short = QrSymbol::encode("12345", EcLevel::H, 1).unwrap();
        let long = QrSymbol::encode(&"x".repeat(150), EcLevel::H, 1).unwrap();
        assert_eq!(short.version, 1);
        assert!(long.version > short.version);
        assert_eq!(long.width(), 17 + 4 * long.version as usize);
    }

    #[test]
    fn respects_min_version() {
        let symbol = QrSymbol::encode("hi", EcLevel::L, 5).unwrap();
        assert_eq!(symbol.version, 5);
        assert_eq!(symbol.width(), 37);
    }

    #[test]
    fn capacity_exceeded_past_version_40() {
        let err = QrSymbol::encode(&"a".repeat(1300), EcLevel::H, 1).unwrap_err();
        assert!(matches!(
            err,
            Error::EncodingCapacityExceeded {
                len: 1300,
                ec: EcLevel::H
            }
        ));
    }

    #[test]
    fn empty_payload_is_rejected() {
        assert!(matches!(
            QrSymbol::encode("", EcLevel::H, 1),
            Err(Error::EmptyPayload)
        ));
    }

    #[test]
    fn raster_has_border_and_box_size() {
        let symbol = QrSymbol::encode("12345", EcLevel::H, 1).unwrap();
        let style = QrStyle::default();
        let img = symbol.rasterize(&style).unwrap();

        assert_eq!(img.width(), (21 + 8) * 10);
        assert_eq!(img.height(), img.width());
        assert_eq!(*img.get_pixel(0, 0), style.background);
        // Top-left finder pattern corner
        assert_eq!(*img.get_pixel(40, 40), style.foreground);
        assert_eq!(*img.get_pixel(49, 49), style.foreground);
    }

    #[test]
    fn oversized_raster_is_invalid() {
        let symbol = QrSymbol::encode("12345", EcLevel::H, 1).unwrap();
        for style in [
            QrStyle {
                box_size: u32::MAX / 2,
                ..QrStyle::default()
            },
            QrStyle {
                border: u32::MAX / 2,
                ..QrStyle::default()
            },
        ] {
            assert!(matches!(
                symbol.rasterize(&style),
                Err(Error::InvalidGeometry(_))
            ));
        }
    }

    #[test]
    fn zero_box_size_is_invalid() {
        let symbol = QrSymbol::encode("https://a.io", EcLevel::H, 1).unwrap();
        let style = QrStyle {
            box_size: 0,
            ..QrStyle::default()
        };
        assert!(matches!(
            symbol.rasterize(&style),
            Err(Error::InvalidGeometry(_))
        ));
    }
}
