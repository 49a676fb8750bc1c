//! Error type for the LED widget.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LedError {
    /// The backing memory for a cached raster could not be allocated.
    #[error("cannot allocate a {width}x{height} raster")]
    RasterAlloc { width: u32, height: u32 },

    #[error("texture of {len} bytes does not hold {width}x{height} RGBA8 pixels")]
    InvalidTexture { width: u32, height: u32, len: usize },

    #[error("invalid light color {0:?}, expected #RGB or #RRGGBB")]
    InvalidColor(String),

    #[error("invalid LED config: {0}")]
    Config(#[from] toml::de::Error),

    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, LedError>;
