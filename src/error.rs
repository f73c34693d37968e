//! Common error types.

use std::fmt;
use std::path::Path;

/// A shortcut type equivalent to `Result<T, photomata::Error>`.
pub type Result<T> = std::result::Result<T, Error>;

/// Represents an error that occurs within the crate.
#[derive(Debug)]
pub enum Error {
    VipsError(String),
    CairoError(String),
    PngError(String),
    ImageConversionError(&'static str, &'static str),
    NoCanvas,
    PixelBufferSize(usize, usize),
    ConfigOpen(String, String),
    ConfigDeser(String, String),
    PhotoOpen(String, String),
    OutputWrite(String, String),
    MissingVariable(&'static str),
    UnknownGlyph(String),
    UnknownColor(String),
}

impl Error {
    pub fn config_open(path: &Path, e: impl ToString) -> Self {
        Self::ConfigOpen(path.display().to_string(), e.to_string())
    }

    pub fn config_deser(path: &Path, e: impl ToString) -> Self {
        Self::ConfigDeser(path.display().to_string(), e.to_string())
    }

    pub fn photo_open(path: &Path, e: impl ToString) -> Self {
        Self::PhotoOpen(path.display().to_string(), e.to_string())
    }

    pub fn output_write(path: &Path, e: impl ToString) -> Self {
        Self::OutputWrite(path.display().to_string(), e.to_string())
    }

    pub fn no_env_variable(var: &'static str) -> Self {
        Self::MissingVariable(var)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::VipsError(e) => write!(f, "libvips error: {e}"),
            Error::CairoError(e) => write!(f, "cairo error: {e}"),
            Error::PngError(e) => write!(f, "PNG error: {e}"),
            Error::ImageConversionError(from, to) => {
                write!(f, "failed to convert image from {from} to {to}")
            }
            Error::NoCanvas => write!(f, "nothing has been rendered yet"),
            Error::PixelBufferSize(expected, found) => write!(
                f,
                "pixel buffer has {found} bytes, expected {expected}"
            ),
            Error::ConfigOpen(path, e) => write!(f, "failed to open config {path}: {e}"),
            Error::ConfigDeser(path, e) => write!(f, "failed to read config {path}: {e}"),
            Error::PhotoOpen(path, e) => write!(f, "failed to open photo {path}: {e}"),
            Error::OutputWrite(path, e) => write!(f, "failed to write {path}: {e}"),
            Error::MissingVariable(e) => write!(f, "Missing environment variable: {e}"),
            Error::UnknownGlyph(e) => write!(f, "not a sticker in the catalog: {e}"),
            Error::UnknownColor(e) => {
                write!(f, "not a frame name or #RRGGBB[AA] color: {e}")
            }
        }
    }
}

impl std::error::Error for Error {}
