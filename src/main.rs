mod args;

use anyhow::{anyhow, Context, Result};
use args::{Args, BatchArgs, Command, RenderArgs, SingleArgs};
use clap::Parser;
use image::{DynamicImage, Rgb};
use points_qr::batch::{self, Layout, POINTS_PLACEHOLDER};
use points_qr::export;
use points_qr::{
    compose, load_logo, render_logo, DiscFill, ExportSettings, LogoPolicy, LogoStyle, QrStyle,
    Settings,
};
use std::path::Path;
use tracing::warn;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    match args.command {
        Command::Batch(batch) => run_batch(batch),
        Command::Single(single) => run_single(single),
    }
}

fn run_batch(args: BatchArgs) -> Result<()> {
    if args.from > args.to {
        return Err(anyhow!(
            "--from ({}) must not exceed --to ({})",
            args.from,
            args.to
        ));
    }
    if !args.url_template.contains(POINTS_PLACEHOLDER) {
        warn!(template = %args.url_template, "URL template has no {{points}} placeholder, every QR code will encode the same URL");
    }

    let layout = Layout::new(&args.out_dir, &args.qr_dir);
    batch::create_dir(&layout.page_dir)?;

    println!("Preparing logo...");
    let logo = prepare_logo(&args.render, &layout.logo_path)?;

    let settings = settings(&args.render);
    let items = batch::items_for_range(args.from..=args.to, &args.url_template);
    println!("Generating {} pages and QR codes...", items.len());

    let report = batch::run(&items, logo.as_ref(), &settings, &layout)?;
    for written in &report.written {
        println!(
            "✓ Created: {} → {} ({} points)",
            written.page.display(),
            written.qr.display(),
            written.label
        );
    }

    println!(
        "Done: {} written, {} failed",
        report.written.len(),
        report.failed.len()
    );
    if !report.is_success() {
        return Err(anyhow!("{} item(s) failed", report.failed.len()));
    }
    Ok(())
}

fn run_single(args: SingleArgs) -> Result<()> {
    let url = match args.url {
        Some(url) => url,
        None => {
            let index = std::env::current_dir()
                .context("Failed to read current directory")?
                .join("index.html");
            let index = index.display().to_string().replace('\\', "/");
            format!("file:///{}", index.trim_start_matches('/'))
        }
    };
    println!("Generating QR code for: {url}");

    batch::create_dir(&args.out_dir)?;
    let logo = prepare_logo(&args.render, &args.out_dir.join("logo.png"))?;
    let settings = settings(&args.render);
    let ext = settings.format.extension();

    let with_logo = args.out_dir.join(format!("qr_code_with_logo.{ext}"));
    let simple = args.out_dir.join(format!("qr_code_simple.{ext}"));
    for (path, logo) in [(&with_logo, logo.as_ref()), (&simple, None)] {
        let img = compose(&url, logo, settings.ec_level, &settings.qr)
            .with_context(|| format!("Failed to compose {}", path.display()))?;
        let bytes = export::encode(&img, settings.format, &settings.export)?;
        batch::write_file(path, &bytes)?;
        println!(
            "✓ Saved {} ({}x{} pixels)",
            path.display(),
            img.width(),
            img.height()
        );
    }

    Ok(())
}

/// Loads the user's logo, or draws the star and saves it to `logo_path`.
fn prepare_logo(args: &RenderArgs, logo_path: &Path) -> Result<Option<DynamicImage>> {
    if args.no_logo {
        return Ok(None);
    }

    if let Some(path) = &args.logo {
        let policy = if args.strict_logo {
            LogoPolicy::Fail
        } else {
            LogoPolicy::Degrade
        };
        return Ok(load_logo(path, policy)?);
    }

    let style = LogoStyle {
        disc: if args.gradient {
            DiscFill::Radial {
                inner: Rgb([0x66, 0x7e, 0xea]),
                outer: Rgb([0x99, 0x7e, 0xea]),
            }
        } else {
            LogoStyle::default().disc
        },
        ..LogoStyle::default()
    };
    let img = render_logo(&style)?;
    batch::write_logo(&img, logo_path, &settings(args).export)?;
    println!("✓ Logo created: {}", logo_path.display());

    Ok(Some(DynamicImage::ImageRgb8(img)))
}

fn settings(args: &RenderArgs) -> Settings {
    Settings {
        ec_level: args.error_correction.into(),
        qr: QrStyle {
            box_size: args.box_size,
            border: args.border,
            ..QrStyle::default()
        },
        export: ExportSettings {
            dpi: args.dpi,
            quality: args.quality,
        },
        format: args.format.into(),
    }
}
