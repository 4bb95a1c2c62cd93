use std::path::PathBuf;

use qrcode::types::QrError;
use qrcode::EcLevel;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("payload of {len} bytes does not fit any QR version at error correction {ec:?}")]
    EncodingCapacityExceeded { len: usize, ec: EcLevel },

    #[error("cannot encode an empty payload")]
    EmptyPayload,

    #[error("QR encoding failed: {0}")]
    Encoding(QrError),

    #[error("logo unavailable at {}", path.display())]
    LogoUnavailable {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("invalid geometry: {0}")]
    InvalidGeometry(String),

    #[error("image encoding failed: {0}")]
    Image(#[from] image::ImageError),

    #[error("PNG encoding failed: {0}")]
    Png(#[from] png::EncodingError),

    #[error("failed to write {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
