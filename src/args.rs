use clap::{Args as ClapArgs, Parser, Subcommand, ValueEnum};
use points_qr::batch::DEFAULT_URL_TEMPLATE;
use points_qr::export::OutputFormat;
use qrcode::EcLevel;
use std::path::PathBuf;

#[derive(ValueEnum, Clone, Copy, Debug)]
#[clap(rename_all = "UPPER")]
pub enum EcArg {
    L,
    M,
    Q,
    H,
}

impl From<EcArg> for EcLevel {
    fn from(v: EcArg) -> Self {
        match v {
            EcArg::L => EcLevel::L,
            EcArg::M => EcLevel::M,
            EcArg::Q => EcLevel::Q,
            EcArg::H => EcLevel::H,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum FormatArg {
    Png,
    Jpeg,
}

impl From<FormatArg> for OutputFormat {
    fn from(v: FormatArg) -> Self {
        match v {
            FormatArg::Png => OutputFormat::Png,
            FormatArg::Jpeg => OutputFormat::Jpeg,
        }
    }
}

#[derive(Parser)]
#[command(name = "points-qr")]
#[command(about = "Generate reward-point QR codes with a star logo and matching HTML pages")]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Generate one page and one QR code per point value
    Batch(BatchArgs),
    /// Generate a QR code for a single URL, with and without the logo
    Single(SingleArgs),
}

#[derive(ClapArgs)]
pub struct BatchArgs {
    /// First point value
    #[arg(long, default_value = "1")]
    pub from: u32,

    /// Last point value (inclusive)
    #[arg(long, default_value = "20")]
    pub to: u32,

    /// URL of each page; `{points}` is replaced by the point value
    #[arg(short, long, default_value = DEFAULT_URL_TEMPLATE)]
    pub url_template: String,

    /// Directory for pages and the logo
    #[arg(short, long, default_value = ".")]
    pub out_dir: PathBuf,

    /// Directory for QR images, relative to the output directory
    #[arg(long, default_value = "qr_codes")]
    pub qr_dir: PathBuf,

    #[command(flatten)]
    pub render: RenderArgs,
}

#[derive(ClapArgs)]
pub struct SingleArgs {
    /// URL to encode (default: index.html in the current directory)
    #[arg(short, long)]
    pub url: Option<String>,

    /// Output directory
    #[arg(short, long, default_value = ".")]
    pub out_dir: PathBuf,

    #[command(flatten)]
    pub render: RenderArgs,
}

#[derive(ClapArgs)]
pub struct RenderArgs {
    /// Use an existing logo image instead of drawing the star
    #[arg(short, long, conflicts_with = "no_logo")]
    pub logo: Option<PathBuf>,

    /// Do not overlay a logo
    #[arg(long)]
    pub no_logo: bool,

    /// Fail instead of skipping the overlay when the logo cannot be read
    #[arg(long, requires = "logo")]
    pub strict_logo: bool,

    /// Draw the disc behind the star as a radial gradient
    #[arg(long, conflicts_with = "logo")]
    pub gradient: bool,

    /// QR code error correction level (L, M, Q, H)
    #[arg(short = 'e', long, default_value = "H")]
    pub error_correction: EcArg,

    /// Output image format
    #[arg(short, long, default_value = "png")]
    pub format: FormatArg,

    /// Pixels per QR module
    #[arg(long, default_value = "10")]
    pub box_size: u32,

    /// Quiet zone width in modules
    #[arg(long, default_value = "4")]
    pub border: u32,

    /// Resolution stored in the image metadata
    #[arg(long, default_value = "300")]
    pub dpi: u16,

    /// JPEG quality (1-100)
    #[arg(short, long, default_value = "95")]
    pub quality: u8,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strict_logo_needs_a_logo_file() {
        assert!(Args::try_parse_from(["points-qr", "batch", "--strict-logo"]).is_err());
        assert!(
            Args::try_parse_from(["points-qr", "batch", "--strict-logo", "--logo", "l.png"])
                .is_ok()
        );
    }

    #[test]
    fn gradient_conflicts_with_logo_file() {
        assert!(
            Args::try_parse_from(["points-qr", "single", "--gradient", "--logo", "l.png"])
                .is_err()
        );
        assert!(Args::try_parse_from(["points-qr", "single", "--gradient"]).is_ok());
    }
}
