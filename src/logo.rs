//! The star badge placed in the middle of every reward QR code.

use std::f32::consts::PI;
use std::path::Path;

use image::{DynamicImage, Rgb, RgbImage};
use imageproc::drawing::{draw_filled_circle_mut, draw_line_segment_mut, draw_polygon_mut};
use imageproc::point::Point;
use tracing::{debug, warn};

use crate::config::{DiscFill, LogoPolicy, LogoStyle};
use crate::error::{Error, Result};

/// Draws the badge: a filled disc behind a gold star with an orange outline.
///
/// Pure function of `style`; two calls with the same style give identical
/// pixels.
pub fn render_logo(style: &LogoStyle) -> Result<RgbImage> {
    style.validate()?;

    let size = style.size;
    let mut img = RgbImage::from_pixel(size, size, style.background);
    let center = ((size / 2) as i32, (size / 2) as i32);

    // Larger circles first so each smaller one keeps its own colour.
    let max_radius = (size / 2) as i32;
    for radius in (0..max_radius).rev() {
        let color = disc_color(style.disc, radius, max_radius);
        draw_filled_circle_mut(&mut img, center, radius, color);
    }

    let vertices = star_vertices(style);
    let polygon: Vec<Point<i32>> = vertices
        .iter()
        .map(|&(x, y)| Point::new(x.round() as i32, y.round() as i32))
        .collect();
    draw_polygon_mut(&mut img, &polygon, style.star_fill);

    for (i, &start) in vertices.iter().enumerate() {
        let end = vertices[(i + 1) % vertices.len()];
        draw_line_segment_mut(&mut img, start, end, style.star_outline);
    }

    debug!(size, points = style.star_points, "Rendered logo");
    Ok(img)
}

/// Star vertices in image coordinates, starting at the top and going
/// counter-clockwise, alternating outer and inner radius.
pub fn star_vertices(style: &LogoStyle) -> Vec<(f32, f32)> {
    let cx = (style.size / 2) as f32;
    let cy = cx;
    let n = style.star_points;

    (0..n)
        .map(|i| {
            let angle = PI / 2.0 + 2.0 * PI * i as f32 / n as f32;
            let radius = if i % 2 == 0 {
                style.star_outer_radius
            } else {
                style.star_inner_radius
            };
            // Image Y grows downwards
            (cx + radius * angle.cos(), cy - radius * angle.sin())
        })
        .collect()
}

fn disc_color(fill: DiscFill, radius: i32, max_radius: i32) -> Rgb<u8> {
    match fill {
        DiscFill::Flat(color) => color,
        DiscFill::Radial { inner, outer } => {
            let t = radius as f32 / max_radius.max(1) as f32;
            let lerp = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * t).round() as u8;
            Rgb([
                lerp(inner[0], outer[0]),
                lerp(inner[1], outer[1]),
                lerp(inner[2], outer[2]),
            ])
        }
    }
}

/// Reads a logo from disk. A missing or unreadable file either disables the
/// overlay or fails, depending on `policy`.
pub fn load_logo(path: &Path, policy: LogoPolicy) -> Result<Option<DynamicImage>> {
    match image::open(path) {
        Ok(img) => Ok(Some(img)),
        Err(source) => match policy {
            LogoPolicy::Degrade => {
                warn!(path = %path.display(), error = %source, "Logo unavailable, composing without it");
                Ok(None)
            }
            LogoPolicy::Fail => Err(Error::LogoUnavailable {
                path: path.to_path_buf(),
                source,
            }),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GOLD: Rgb<u8> = Rgb([0xFF, 0xD7, 0x00]);
    const BLUE: Rgb<u8> = Rgb([102, 126, 234]);

    #[test]
    fn logo_is_deterministic() {
        let style = LogoStyle::default();
        let a = render_logo(&style).unwrap();
        let b = render_logo(&style).unwrap();
        assert_eq!(a.dimensions(), (200, 200));
        assert_eq!(a.as_raw(), b.as_raw());
    }

    #[test]
    fn logo_layers() {
        let img = render_logo(&LogoStyle::default()).unwrap();
        // Corners stay white, the disc shows between the star arms, the
        // star covers the centre.
        assert_eq!(*img.get_pixel(0, 0), Rgb([255, 255, 255]));
        assert_eq!(*img.get_pixel(199, 199), Rgb([255, 255, 255]));
        assert_eq!(*img.get_pixel(100, 185), BLUE);
        assert_eq!(*img.get_pixel(100, 100), GOLD);
    }

    #[test]
    fn star_starts_at_top_and_alternates() {
        let vertices = star_vertices(&LogoStyle::default());
        assert_eq!(vertices.len(), 10);

        let (x, y) = vertices[0];
        assert!((x - 100.0).abs() < 1e-3);
        assert!((y - 40.0).abs() < 1e-3);

        for (i, &(x, y)) in vertices.iter().enumerate() {
            let r = ((x - 100.0).powi(2) + (y - 100.0).powi(2)).sqrt();
            let expected = if i % 2 == 0 { 60.0 } else { 25.0 };
            assert!((r - expected).abs() < 1e-3, "vertex {i} at radius {r}");
        }
    }

    #[test]
    fn radial_disc_runs_from_inner_to_outer() {
        let inner = Rgb([255, 0, 0]);
        let outer = Rgb([0, 0, 255]);
        let style = LogoStyle {
            disc: DiscFill::Radial { inner, outer },
            ..LogoStyle::default()
        };
        let img = render_logo(&style).unwrap();

        let near_rim = img.get_pixel(100, 198);
        assert!(near_rim[2] > 240 && near_rim[0] < 15, "{near_rim:?}");
        assert_eq!(disc_color(style.disc, 0, 100), inner);
    }

    #[test]
    fn invalid_style_is_rejected() {
        let style = LogoStyle {
            size: 0,
            ..LogoStyle::default()
        };
        assert!(matches!(
            render_logo(&style),
            Err(Error::InvalidGeometry(_))
        ));
    }

    #[test]
    fn missing_logo_degrades_or_fails() {
        let path = Path::new("definitely/not/here/logo.png");
        assert!(load_logo(path, LogoPolicy::Degrade).unwrap().is_none());
        assert!(matches!(
            load_logo(path, LogoPolicy::Fail),
            Err(Error::LogoUnavailable { .. })
        ));
    }
}
