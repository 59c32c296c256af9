//! # imgblend-core
//!
//! Core types for the imgblend image-blending engine:
//!
//! - [`Rgba8`] - 8-bit straight-alpha pixel, with its ratio form
//! - [`pack_ratios`] / [`pack_scaled`] - the clamp-and-truncate packing step
//! - [`Image`] - owned RGBA8 buffer with copy-on-write cloning
//! - [`Rect`] - image bounds and overlap sizing
//! - [`Error`] - construction and access errors
//!
//! ## Crate Structure
//!
//! ```text
//! imgblend-core (this crate)
//!    ^
//!    |
//!    +-- imgblend-color (HSL conversion)
//!    +-- imgblend-ops (compositor and blend modes)
//! ```
//!
//! ## Feature Flags
//!
//! - `serde` - Serialization for [`Rgba8`] and [`Rect`]

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod error;
pub mod image;
pub mod pixel;
pub mod rect;

pub use error::{Error, Result};
pub use image::{Image, CHANNELS};
pub use pixel::{from_unit_rounded, pack_ratios, pack_scaled, truncate_channel, Rgba8, CHANNEL_MAX};
pub use rect::Rect;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::image::Image;
    pub use crate::pixel::{pack_ratios, pack_scaled, Rgba8};
    pub use crate::rect::Rect;
}
