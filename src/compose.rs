use image::imageops::{self, FilterType};
use image::{DynamicImage, Rgba, RgbaImage, RgbImage};
use qrcode::EcLevel;
use tracing::debug;

use crate::config::QrStyle;
use crate::error::{Error, Result};
use crate::qr::QrSymbol;

/// Where the logo and its backing plate land on a QR raster.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Placement {
    pub logo_size: u32,
    pub plate_size: u32,
    /// Top-left corner of the plate on the QR raster.
    pub plate_x: u32,
    pub plate_y: u32,
    /// Offset of the logo inside the plate.
    pub logo_offset: u32,
}

impl Placement {
    pub fn new(qr_width: u32, qr_height: u32, style: &QrStyle) -> Result<Self> {
        if qr_width == 0 || qr_height == 0 || style.logo_ratio == 0 {
            return Err(Error::InvalidGeometry(format!(
                "cannot place a logo on a {qr_width}x{qr_height} raster with ratio 1/{}",
                style.logo_ratio
            )));
        }

        let logo_size = qr_width / style.logo_ratio;
        let plate_size = logo_size + style.plate_padding;
        if logo_size == 0 || plate_size > qr_width || plate_size > qr_height {
            return Err(Error::InvalidGeometry(format!(
                "logo plate of {plate_size}px does not fit a {qr_width}x{qr_height} raster"
            )));
        }

        Ok(Self {
            logo_size,
            plate_size,
            plate_x: (qr_width - plate_size) / 2,
            plate_y: (qr_height - plate_size) / 2,
            logo_offset: (plate_size - logo_size) / 2,
        })
    }
}

/// Encodes `url` and renders it, with `logo` centred on a plate when given.
///
/// Empty logos (zero width or height) are treated as no logo.
pub fn compose(
    url: &str,
    logo: Option<&DynamicImage>,
    ec_level: EcLevel,
    style: &QrStyle,
) -> Result<RgbImage> {
    let symbol = QrSymbol::encode(url, ec_level, style.min_version)?;
    let mut qr_img = symbol.rasterize(style)?;

    if let Some(logo) = logo.filter(|l| l.width() > 0 && l.height() > 0) {
        let placement = Placement::new(qr_img.width(), qr_img.height(), style)?;
        let plate = backing_plate(logo, &placement, style);
        imageops::replace(
            &mut qr_img,
            &plate,
            placement.plate_x as i64,
            placement.plate_y as i64,
        );
        debug!(
            version = symbol.version,
            logo_size = placement.logo_size,
            x = placement.plate_x,
            y = placement.plate_y,
            "Placed logo"
        );
    }

    Ok(qr_img)
}

/// Opaque square with the resized logo alpha-blended onto its middle.
fn backing_plate(logo: &DynamicImage, placement: &Placement, style: &QrStyle) -> RgbImage {
    let resized = resize_premultiplied(logo, placement.logo_size);

    let [r, g, b] = style.plate_color.0;
    let mut plate = RgbaImage::from_pixel(
        placement.plate_size,
        placement.plate_size,
        Rgba([r, g, b, 255]),
    );
    // The logo's own alpha acts as the paste mask; opaque logos overwrite.
    imageops::overlay(
        &mut plate,
        &resized,
        placement.logo_offset as i64,
        placement.logo_offset as i64,
    );

    DynamicImage::ImageRgba8(plate).to_rgb8()
}

/// Lanczos3 resize in premultiplied alpha, so the colour of fully
/// transparent pixels does not bleed into the edges of the logo.
fn resize_premultiplied(logo: &DynamicImage, size: u32) -> RgbaImage {
    let mut src = logo.to_rgba32f();
    for p in src.pixels_mut() {
        let a = p[3];
        p[0] *= a;
        p[1] *= a;
        p[2] *= a;
    }

    let mut resized = imageops::resize(&src, size, size, FilterType::Lanczos3);
    for p in resized.pixels_mut() {
        // Lanczos overshoots around hard edges
        let a = p[3].clamp(0.0, 1.0);
        p[3] = a;
        for c in 0..3 {
            p[c] = if a > 0.0 {
                (p[c] / a).clamp(0.0, 1.0)
            } else {
                0.0
            };
        }
    }

    DynamicImage::ImageRgba32F(resized).to_rgba8()
}
