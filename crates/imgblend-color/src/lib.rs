//! # imgblend-color
//!
//! Colour-model conversions used by the non-separable blend modes.
//!
//! Hue, Saturation, Color and Luminosity blending swap components between
//! two pixels in hue/saturation/luminosity space and convert back. This
//! crate provides that round trip:
//!
//! ```rust
//! use imgblend_color::{from_hsla, to_hsla};
//! use imgblend_core::Rgba8;
//!
//! let px = Rgba8::new(200, 40, 90, 180);
//! let hsla = to_hsla(px);
//! assert_eq!(from_hsla(hsla), px);
//! ```

#![warn(missing_docs)]

pub mod hsl;

pub use hsl::{from_hsla, to_hsla, Hsla};
