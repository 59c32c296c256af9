//! 8-bit RGBA pixels and their ratio form.
//!
//! Blend math runs on channel *ratios* in `[0.0, 1.0]` (or, for a few modes,
//! on the 0..255 scale as floats). Results are brought back into storable
//! 8-bit form through [`pack_ratios`] / [`pack_scaled`], which clamp and
//! truncate. Every blend mode and the compositor go through these two
//! functions, so out-of-range values (including infinities and NaN from
//! divide-by-zero in Burn/Dodge) always land inside `[0, 255]`.
//!
//! # Example
//!
//! ```
//! use imgblend_core::pixel::{pack_ratios, Rgba8};
//!
//! let px = Rgba8::new(255, 0, 0, 255);
//! let [r, g, b, a] = px.to_ratios();
//! assert_eq!((r, g, b, a), (1.0, 0.0, 0.0, 1.0));
//!
//! // Overflow saturates instead of wrapping.
//! assert_eq!(pack_ratios([1.5, -0.2, f64::NAN, 0.5]), Rgba8::new(255, 0, 0, 127));
//! ```
//!
//! # Alpha
//!
//! Pixels are straight (non-premultiplied) alpha on input. Compositor output
//! that is not fully opaque carries alpha-weighted colour; see
//! `imgblend_ops::composite`.

use std::fmt;

/// Maximum 8-bit channel value as a float.
pub const CHANNEL_MAX: f64 = 255.0;

/// RGBA pixel with 8-bit straight-alpha channels.
///
/// Uses `#[repr(C)]` so a `&[Rgba8]` has the same layout as interleaved
/// `[R G B A R G B A ...]` bytes.
#[repr(C)]
#[derive(Copy, Clone, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rgba8 {
    /// Red channel value.
    pub r: u8,
    /// Green channel value.
    pub g: u8,
    /// Blue channel value.
    pub b: u8,
    /// Alpha channel value.
    pub a: u8,
}

impl Rgba8 {
    /// Create a new RGBA pixel.
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Create an opaque pixel (alpha = 255).
    #[inline]
    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    /// Create a grey pixel with equal RGB values.
    #[inline]
    pub const fn gray(v: u8, a: u8) -> Self {
        Self::new(v, v, v, a)
    }

    /// Create a transparent pixel (all zeros including alpha).
    #[inline]
    pub const fn transparent() -> Self {
        Self::new(0, 0, 0, 0)
    }

    /// Get RGBA values as an array.
    #[inline]
    pub const fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Create from an array.
    #[inline]
    pub const fn from_array(arr: [u8; 4]) -> Self {
        Self::new(arr[0], arr[1], arr[2], arr[3])
    }

    /// Channel ratios `[r, g, b, a]`, each `channel / 255`.
    #[inline]
    pub fn to_ratios(self) -> [f64; 4] {
        [
            self.r as f64 / CHANNEL_MAX,
            self.g as f64 / CHANNEL_MAX,
            self.b as f64 / CHANNEL_MAX,
            self.a as f64 / CHANNEL_MAX,
        ]
    }

    /// Channels on the 0..255 scale as floats.
    #[inline]
    pub fn to_normalised(self) -> [f64; 4] {
        [self.r as f64, self.g as f64, self.b as f64, self.a as f64]
    }

    /// Sum of the RGB ratios, used by the whole-pixel Darker/Lighter modes.
    #[inline]
    pub fn ratio_sum(self) -> f64 {
        let [r, g, b, _] = self.to_ratios();
        r + g + b
    }

    /// Check if pixel is fully opaque.
    #[inline]
    pub fn is_opaque(self) -> bool {
        self.a == 255
    }

    /// Check if pixel is fully transparent.
    #[inline]
    pub fn is_transparent(self) -> bool {
        self.a == 0
    }
}

impl From<[u8; 4]> for Rgba8 {
    #[inline]
    fn from(arr: [u8; 4]) -> Self {
        Self::from_array(arr)
    }
}

impl From<Rgba8> for [u8; 4] {
    #[inline]
    fn from(px: Rgba8) -> Self {
        px.to_array()
    }
}

impl fmt::Debug for Rgba8 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rgba8")
            .field("r", &self.r)
            .field("g", &self.g)
            .field("b", &self.b)
            .field("a", &self.a)
            .finish()
    }
}

impl fmt::Display for Rgba8 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RGBA({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }
}

// ============================================================================
// Packing
// ============================================================================

/// Clamps a 0..255-scale value into `[0, 255]` and truncates toward zero.
///
/// NaN maps to 0; infinities saturate.
#[inline]
pub fn truncate_channel(v: f64) -> u8 {
    if v.is_nan() {
        return 0;
    }
    v.clamp(0.0, CHANNEL_MAX) as u8
}

/// Packs ratios into a pixel: `trunc(clamp(v * 255, 0, 255))` per channel.
///
/// This is the one place ratio arithmetic becomes storable pixels.
#[inline]
pub fn pack_ratios(ratios: [f64; 4]) -> Rgba8 {
    Rgba8::new(
        truncate_channel(ratios[0] * CHANNEL_MAX),
        truncate_channel(ratios[1] * CHANNEL_MAX),
        truncate_channel(ratios[2] * CHANNEL_MAX),
        truncate_channel(ratios[3] * CHANNEL_MAX),
    )
}

/// Packs values already on the 0..255 scale, with the same clamp/truncate.
#[inline]
pub fn pack_scaled(values: [f64; 4]) -> Rgba8 {
    Rgba8::new(
        truncate_channel(values[0]),
        truncate_channel(values[1]),
        truncate_channel(values[2]),
        truncate_channel(values[3]),
    )
}

/// Converts a unit value to a channel, rounding to nearest.
///
/// Colour-model conversions use this on their way back to RGBA so that an
/// 8-bit pixel survives a round trip unchanged.
#[inline]
pub fn from_unit_rounded(v: f64) -> u8 {
    if v.is_nan() {
        return 0;
    }
    (v.clamp(0.0, 1.0) * CHANNEL_MAX).round() as u8
}
