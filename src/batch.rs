//! Turns a list of `(label, url)` pairs into pages and QR images.
//!
//! Rendering is a pure function per item and runs in parallel; only
//! [`run`] touches the filesystem.

use std::fs;
use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};

use image::{DynamicImage, RgbImage};
use rayon::prelude::*;
use tracing::{error, info};

use crate::compose::compose;
use crate::config::{ExportSettings, Settings};
use crate::error::{Error, Result};
use crate::export::{self, OutputFormat};
use crate::page::render_page;

pub const POINTS_PLACEHOLDER: &str = "{points}";
pub const DEFAULT_URL_TEMPLATE: &str =
    "https://johnkarlmolina.github.io/qr-score/points_{points}.html";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Item {
    pub label: String,
    pub url: String,
}

impl Item {
    pub fn new(label: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            url: url.into(),
        }
    }
}

/// One item per point value, with `{points}` in `template` replaced by it.
pub fn items_for_range(points: RangeInclusive<u32>, template: &str) -> Vec<Item> {
    points
        .map(|p| {
            let label = p.to_string();
            let url = template.replace(POINTS_PLACEHOLDER, &label);
            Item { label, url }
        })
        .collect()
}

#[derive(Clone, Debug)]
pub struct RenderedItem {
    pub html: String,
    pub image: Vec<u8>,
}

pub fn render_item(
    item: &Item,
    logo: Option<&DynamicImage>,
    settings: &Settings,
) -> Result<RenderedItem> {
    let img = compose(&item.url, logo, settings.ec_level, &settings.qr)?;
    let image = export::encode(&img, settings.format, &settings.export)?;

    Ok(RenderedItem {
        html: render_page(&item.label),
        image,
    })
}

/// Renders every item in parallel. Output order follows `items`.
pub fn render_all<'a>(
    items: &'a [Item],
    logo: Option<&DynamicImage>,
    settings: &Settings,
) -> Vec<(&'a Item, Result<RenderedItem>)> {
    items
        .par_iter()
        .map(|item| (item, render_item(item, logo, settings)))
        .collect()
}

/// File names for everything a run writes.
#[derive(Clone, Debug)]
pub struct Layout {
    pub page_dir: PathBuf,
    pub qr_dir: PathBuf,
    pub logo_path: PathBuf,
}

impl Layout {
    pub fn new(out_dir: &Path, qr_dir: &Path) -> Self {
        Self {
            page_dir: out_dir.to_path_buf(),
            qr_dir: out_dir.join(qr_dir),
            logo_path: out_dir.join("logo.png"),
        }
    }

    pub fn page_path(&self, label: &str) -> PathBuf {
        self.page_dir.join(format!("points_{label}.html"))
    }

    pub fn qr_path(&self, label: &str, format: OutputFormat) -> PathBuf {
        self.qr_dir
            .join(format!("QR_{label:0>2}_points.{}", format.extension()))
    }
}

#[derive(Debug)]
pub struct Written {
    pub label: String,
    pub page: PathBuf,
    pub qr: PathBuf,
}

#[derive(Debug, Default)]
pub struct Report {
    pub written: Vec<Written>,
    pub failed: Vec<(String, Error)>,
}

impl Report {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Renders and writes every item. A failing item is logged and recorded in
/// the report; the remaining items still get written.
pub fn run(
    items: &[Item],
    logo: Option<&DynamicImage>,
    settings: &Settings,
    layout: &Layout,
) -> Result<Report> {
    create_dir(&layout.page_dir)?;
    create_dir(&layout.qr_dir)?;

    let mut report = Report::default();
    for (item, rendered) in render_all(items, logo, settings) {
        match rendered.and_then(|r| write_item(item, &r, settings.format, layout)) {
            Ok(written) => {
                info!(label = %item.label, qr = %written.qr.display(), "Wrote QR code");
                report.written.push(written);
            }
            Err(e) => {
                error!(label = %item.label, url = %item.url, error = %e, "Failed to generate item");
                report.failed.push((item.label.clone(), e));
            }
        }
    }

    Ok(report)
}

fn write_item(
    item: &Item,
    rendered: &RenderedItem,
    format: OutputFormat,
    layout: &Layout,
) -> Result<Written> {
    let page = layout.page_path(&item.label);
    let qr = layout.qr_path(&item.label, format);
    write_file(&page, rendered.html.as_bytes())?;
    write_file(&qr, &rendered.image)?;

    Ok(Written {
        label: item.label.clone(),
        page,
        qr,
    })
}

/// Saves the shared logo as PNG. Called once per run, before any item.
pub fn write_logo(logo: &RgbImage, path: &Path, export: &ExportSettings) -> Result<()> {
    let bytes = export::encode_png(logo, export.dpi)?;
    write_file(path, &bytes)?;
    info!(path = %path.display(), "Wrote logo");
    Ok(())
}

pub fn write_file(path: &Path, bytes: &[u8]) -> Result<()> {
    fs::write(path, bytes).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })
}

pub fn create_dir(path: &Path) -> Result<()> {
    fs::create_dir_all(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_fills_template() {
        let items = items_for_range(1..=3, "https://host/points_{points}.html");
        assert_eq!(
            items,
            vec![
                Item::new("1", "https://host/points_1.html"),
                Item::new("2", "https://host/points_2.html"),
                Item::new("3", "https://host/points_3.html"),
            ]
        );
    }

    #[test]
    fn layout_pads_labels() {
        let layout = Layout::new(Path::new("out"), Path::new("qr_codes"));
        assert_eq!(
            layout.qr_path("7", OutputFormat::Png),
            Path::new("out/qr_codes/QR_07_points.png")
        );
        assert_eq!(
            layout.qr_path("15", OutputFormat::Jpeg),
            Path::new("out/qr_codes/QR_15_points.jpg")
        );
        assert_eq!(layout.page_path("7"), Path::new("out/points_7.html"));
        assert_eq!(layout.logo_path, Path::new("out/logo.png"));
    }

    #[test]
    fn render_all_keeps_order_and_isolates_failures() {
        let items = vec![
            Item::new("1", "https://host/points_1.html"),
            Item::new("big", "a".repeat(1300)),
            Item::new("3", "https://host/points_3.html"),
        ];
        let results = render_all(&items, None, &Settings::default());

        let labels: Vec<_> = results.iter().map(|(i, _)| i.label.as_str()).collect();
        assert_eq!(labels, ["1", "big", "3"]);
        assert!(results[0].1.is_ok());
        assert!(matches!(
            results[1].1,
            Err(Error::EncodingCapacityExceeded { .. })
        ));
        assert!(results[2].1.is_ok());
    }

    #[test]
    fn rendered_item_has_page_and_png() {
        let item = Item::new("5", "https://host/points_5.html");
        let rendered = render_item(&item, None, &Settings::default()).unwrap();
        assert!(rendered.html.contains("You got 5 points!"));
        assert_eq!(&rendered.image[..8], b"\x89PNG\r\n\x1a\n");
    }
}
