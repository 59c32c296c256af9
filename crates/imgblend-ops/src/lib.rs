//! # imgblend-ops
//!
//! Alpha-aware compositing and blend modes for RGBA8 images.
//!
//! # Modules
//!
//! - [`composite`] - The compositor and the [`BlendFn`] trait
//! - [`modes`] - The blend-mode library, one type and one function per mode
//! - [`mode`] - [`BlendMode`], for picking a mode by name
//! - [`random`] - Random sources for Dissolve
//! - [`fade`](mod@fade) - Layer opacity
//!
//! # Example
//!
//! ```rust
//! use imgblend_core::{Image, Rgba8};
//! use imgblend_ops::{blend, modes, BlendMode};
//!
//! let backdrop = Image::filled(10, 10, Rgba8::opaque(255, 0, 0));
//! let source = Image::filled(4, 6, Rgba8::new(0, 0, 255, 128));
//!
//! let out = modes::normal(&backdrop, &source);
//! assert_eq!(out.dimensions(), (4, 6));
//! assert_eq!(out.pixel(0, 0), Rgba8::new(127, 0, 128, 255));
//!
//! let by_name = blend(&backdrop, &source, "normal".parse::<BlendMode>()?);
//! assert_eq!(by_name, out);
//! # Ok::<(), imgblend_ops::OpsError>(())
//! ```
//!
//! # Feature Flags
//!
//! - `parallel` (default) - Split output rows across the rayon pool
//! - `serde` - Serialization for [`BlendMode`] and core types

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod error;
pub mod composite;
pub mod fade;
pub mod mode;
pub mod modes;
pub mod random;

pub use composite::{composite_pixel, BlendFn, CompositeOptions, Compositor};
pub use error::{OpsError, OpsResult};
pub use fade::{blend_with_opacity, fade};
pub use mode::{blend, BlendMode};
pub use random::RandomSource;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::composite::{BlendFn, CompositeOptions, Compositor};
    pub use crate::error::{OpsError, OpsResult};
    pub use crate::fade::{blend_with_opacity, fade};
    pub use crate::mode::{blend, BlendMode};
    pub use imgblend_core::{Image, Rgba8};
}
