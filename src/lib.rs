//! # Photomata
//!
//! A photo booth compositor: captured photos are laid out on a grid, decorated
//! with draggable and resizable emoji stickers over a colored frame, and
//! exported as a single PNG.

pub mod catalog;
#[cfg(feature = "cli")]
pub mod cli;
pub mod error;
pub mod export;
pub mod image;
pub mod interaction;
pub mod layout;
pub mod logs;
pub mod scene;
pub mod sticker;

pub use error::{Error, Result};
pub use scene::{Scene, SceneConfig};
