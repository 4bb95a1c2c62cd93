//! Reward-point QR codes: a star badge composited onto QR symbols that link
//! to per-point congratulation pages.

pub mod batch;
pub mod compose;
pub mod config;
pub mod error;
pub mod export;
pub mod logo;
pub mod page;
pub mod qr;

pub use compose::{compose, Placement};
pub use config::{DiscFill, ExportSettings, LogoPolicy, LogoStyle, QrStyle, Settings};
pub use error::{Error, Result};
pub use logo::{load_logo, render_logo};
pub use qr::QrSymbol;
