//! The blend-mode library.
//!
//! Each mode is a small [`BlendFn`] producing the *result colour* for a
//! backdrop/source pair; the [`Compositor`](crate::composite::Compositor)
//! does the alpha compositing. Every mode also has a free function taking
//! two images, e.g. [`multiply`].
//!
//! Notation below: `i j k l` are the backdrop's red/green/blue/alpha ratios,
//! `m n o p` the source's.
//!
//! | Mode | Red channel (green/blue alike) | Alpha |
//! |---|---|---|
//! | [`Normal`] | `m` | `p` |
//! | [`Dissolve`] | source with probability `p`, else backdrop | chosen |
//! | [`Darken`] | `min(i, m)` | `min(l, p)` |
//! | [`Multiply`] | `i·m` | `l·p` |
//! | [`Burn`] | `1 - (1-i)/m` | union |
//! | [`Darker`] | whole darker pixel by `r+g+b` | chosen |
//! | [`Lighten`] | `max(i, m)` | `max(l, p)` |
//! | [`Screen`] | `1 - (1-i)(1-m)` | union |
//! | [`Dodge`] | `i/(1-m)` | union |
//! | [`Lighter`] | whole lighter pixel by `r+g+b` | chosen |
//! | [`Overlay`] | 0..255 scale, see type docs | union |
//! | [`SoftLight`] | `m > .5 ? 1-(1-i)(1-(m-.5)) : i(m+.5)` | union |
//! | [`HardLight`] | 0..255 scale, see type docs | union |
//! | [`Difference`] | `|m - i|` | union |
//! | [`Exclusion`] | `m + i - 2mi` | union |
//! | [`Addition`] | `min(i+m, 255)` on 0..255 | `min(l+p, 255)` |
//! | [`Subtraction`] | `max(i-m, 0)` on 0..255 | union |
//! | [`Hue`] / [`Saturation`] / [`Color`] / [`Luminosity`] | HSL swap | backdrop |
//!
//! "union" is `p + l(1-p)`. It is computed inside the blend function and is
//! independent of the compositor's own alpha union.
//!
//! # Division by zero
//!
//! Burn divides by `m` and Dodge by `1 - m`. At those boundaries the result
//! is infinite or NaN and is clamped when packed: `+inf` saturates to 255,
//! `-inf` and NaN to 0.

use crate::composite::{BlendFn, Compositor};
use crate::random::{entropy_source, RandomSource};
use imgblend_color::{from_hsla, to_hsla};
use imgblend_core::{pack_ratios, pack_scaled, truncate_channel, Image, Rgba8, CHANNEL_MAX};
use rand::rngs::StdRng;
use std::sync::{Mutex, PoisonError};

/// "Source over" alpha union used by most modes: `p + l(1 - p)`.
#[inline]
fn union_alpha(l: f64, p: f64) -> f64 {
    p + l * (1.0 - p)
}

/// Applies `f` to each of the four ratio channels.
#[inline]
fn per_channel(cb: Rgba8, cs: Rgba8, f: impl Fn(f64, f64) -> f64) -> Rgba8 {
    let b = cb.to_ratios();
    let s = cs.to_ratios();
    pack_ratios([f(b[0], s[0]), f(b[1], s[1]), f(b[2], s[2]), f(b[3], s[3])])
}

/// Applies `f` to the RGB ratio channels; alpha is the union.
#[inline]
fn per_color_channel(cb: Rgba8, cs: Rgba8, f: impl Fn(f64, f64) -> f64) -> Rgba8 {
    let b = cb.to_ratios();
    let s = cs.to_ratios();
    pack_ratios([
        f(b[0], s[0]),
        f(b[1], s[1]),
        f(b[2], s[2]),
        union_alpha(b[3], s[3]),
    ])
}

/// Applies `f` to the RGB channels on the 0..255 scale; alpha is the union.
#[inline]
fn per_scaled_channel(cb: Rgba8, cs: Rgba8, f: impl Fn(f64, f64) -> f64) -> Rgba8 {
    let b = cb.to_normalised();
    let s = cs.to_normalised();
    let alpha = union_alpha(b[3] / CHANNEL_MAX, s[3] / CHANNEL_MAX);
    pack_scaled([f(b[0], s[0]), f(b[1], s[1]), f(b[2], s[2]), alpha * CHANNEL_MAX])
}

// ============================================================================
// Modes
// ============================================================================

/// Selects the source colour.
#[derive(Debug, Clone, Copy, Default)]
pub struct Normal;

impl BlendFn for Normal {
    #[inline]
    fn blend(&self, _backdrop: Rgba8, source: Rgba8) -> Rgba8 {
        source
    }
}

/// Picks the source pixel with probability equal to its alpha, otherwise
/// the backdrop pixel.
///
/// Consumes one draw per pixel from its [`RandomSource`]. Output is only
/// reproducible with a seeded source and a sequential compositor.
///
/// # Example
///
/// ```rust
/// use imgblend_core::{Image, Rgba8};
/// use imgblend_ops::composite::Compositor;
/// use imgblend_ops::modes::Dissolve;
///
/// let a = Image::filled(8, 8, Rgba8::opaque(255, 0, 0));
/// let b = Image::filled(8, 8, Rgba8::new(0, 0, 255, 128));
///
/// let first = Compositor::sequential().composite(&a, &b, &Dissolve::seeded(1));
/// let again = Compositor::sequential().composite(&a, &b, &Dissolve::seeded(1));
/// assert_eq!(first, again);
/// ```
#[derive(Debug)]
pub struct Dissolve<R = StdRng> {
    source: Mutex<R>,
}

impl<R: RandomSource> Dissolve<R> {
    /// Creates a Dissolve drawing from `source`.
    pub fn new(source: R) -> Self {
        Self {
            source: Mutex::new(source),
        }
    }

    /// Returns the random source.
    pub fn into_inner(self) -> R {
        self.source.into_inner().unwrap_or_else(PoisonError::into_inner)
    }

    fn draw(&self) -> f64 {
        self.source
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .next_unit()
    }
}

impl Dissolve<StdRng> {
    /// Dissolve seeded from operating-system entropy.
    pub fn from_entropy() -> Self {
        Self::new(entropy_source())
    }

    /// Dissolve with a fixed seed.
    pub fn seeded(seed: u64) -> Self {
        Self::new(crate::random::seeded_source(seed))
    }
}

impl Default for Dissolve<StdRng> {
    fn default() -> Self {
        Self::from_entropy()
    }
}

impl<R: RandomSource> BlendFn for Dissolve<R> {
    fn blend(&self, backdrop: Rgba8, source: Rgba8) -> Rgba8 {
        let [_, _, _, alpha] = source.to_ratios();
        if self.draw() < alpha { source } else { backdrop }
    }
}

/// Per-channel minimum, alpha included.
#[derive(Debug, Clone, Copy, Default)]
pub struct Darken;

impl BlendFn for Darken {
    #[inline]
    fn blend(&self, backdrop: Rgba8, source: Rgba8) -> Rgba8 {
        per_channel(backdrop, source, f64::min)
    }
}

/// Per-channel product, alpha included.
#[derive(Debug, Clone, Copy, Default)]
pub struct Multiply;

impl BlendFn for Multiply {
    #[inline]
    fn blend(&self, backdrop: Rgba8, source: Rgba8) -> Rgba8 {
        per_channel(backdrop, source, |i, m| i * m)
    }
}

/// Colour burn: `1 - (1 - i) / m`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Burn;

impl BlendFn for Burn {
    #[inline]
    fn blend(&self, backdrop: Rgba8, source: Rgba8) -> Rgba8 {
        per_color_channel(backdrop, source, |i, m| 1.0 - (1.0 - i) / m)
    }
}

/// Keeps whichever whole pixel has the smaller `r + g + b`; ties go to the source.
#[derive(Debug, Clone, Copy, Default)]
pub struct Darker;

impl BlendFn for Darker {
    #[inline]
    fn blend(&self, backdrop: Rgba8, source: Rgba8) -> Rgba8 {
        if backdrop.ratio_sum() < source.ratio_sum() {
            backdrop
        } else {
            source
        }
    }
}

/// Per-channel maximum, alpha included.
#[derive(Debug, Clone, Copy, Default)]
pub struct Lighten;

impl BlendFn for Lighten {
    #[inline]
    fn blend(&self, backdrop: Rgba8, source: Rgba8) -> Rgba8 {
        per_channel(backdrop, source, f64::max)
    }
}

/// Complement of the product of complements.
#[derive(Debug, Clone, Copy, Default)]
pub struct Screen;

impl BlendFn for Screen {
    #[inline]
    fn blend(&self, backdrop: Rgba8, source: Rgba8) -> Rgba8 {
        per_color_channel(backdrop, source, |i, m| 1.0 - (1.0 - i) * (1.0 - m))
    }
}

/// Colour dodge: `i / (1 - m)`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Dodge;

impl BlendFn for Dodge {
    #[inline]
    fn blend(&self, backdrop: Rgba8, source: Rgba8) -> Rgba8 {
        per_color_channel(backdrop, source, |i, m| i / (1.0 - m))
    }
}

/// Keeps whichever whole pixel has the larger `r + g + b`; ties go to the source.
#[derive(Debug, Clone, Copy, Default)]
pub struct Lighter;

impl BlendFn for Lighter {
    #[inline]
    fn blend(&self, backdrop: Rgba8, source: Rgba8) -> Rgba8 {
        if backdrop.ratio_sum() > source.ratio_sum() {
            backdrop
        } else {
            source
        }
    }
}

/// Overlay on the 0..255 scale: `(b/255)·(b + (2s/255)(255 - b))`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Overlay;

impl BlendFn for Overlay {
    #[inline]
    fn blend(&self, backdrop: Rgba8, source: Rgba8) -> Rgba8 {
        per_scaled_channel(backdrop, source, |b, s| {
            (b / CHANNEL_MAX) * (b + ((2.0 * s) / CHANNEL_MAX) * (CHANNEL_MAX - b))
        })
    }
}

/// Soft light: a gentle darken below mid-grey source, lighten above.
#[derive(Debug, Clone, Copy, Default)]
pub struct SoftLight;

impl BlendFn for SoftLight {
    #[inline]
    fn blend(&self, backdrop: Rgba8, source: Rgba8) -> Rgba8 {
        per_color_channel(backdrop, source, |i, m| {
            if m > 0.5 {
                1.0 - (1.0 - i) * (1.0 - (m - 0.5))
            } else {
                i * (m + 0.5)
            }
        })
    }
}

/// Hard light on the 0..255 scale, switching on a source value above 128:
///
/// ```text
/// s > 128:  255 - (255 - 2(s - 128))(255 - b) / 256
/// else:     2·s·b / 256
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct HardLight;

impl BlendFn for HardLight {
    #[inline]
    fn blend(&self, backdrop: Rgba8, source: Rgba8) -> Rgba8 {
        per_scaled_channel(backdrop, source, |b, s| {
            if s > 128.0 {
                CHANNEL_MAX - ((CHANNEL_MAX - 2.0 * (s - 128.0)) * (CHANNEL_MAX - b)) / 256.0
            } else {
                (2.0 * s * b) / 256.0
            }
        })
    }
}

/// Absolute difference.
#[derive(Debug, Clone, Copy, Default)]
pub struct Difference;

impl BlendFn for Difference {
    #[inline]
    fn blend(&self, backdrop: Rgba8, source: Rgba8) -> Rgba8 {
        per_color_channel(backdrop, source, |i, m| (m - i).abs())
    }
}

/// Like Difference, with lower contrast.
#[derive(Debug, Clone, Copy, Default)]
pub struct Exclusion;

impl BlendFn for Exclusion {
    #[inline]
    fn blend(&self, backdrop: Rgba8, source: Rgba8) -> Rgba8 {
        per_color_channel(backdrop, source, |i, m| m + i - 2.0 * m * i)
    }
}

/// Saturating 8-bit sum on every channel, alpha included (linear dodge).
#[derive(Debug, Clone, Copy, Default)]
pub struct Addition;

impl BlendFn for Addition {
    #[inline]
    fn blend(&self, backdrop: Rgba8, source: Rgba8) -> Rgba8 {
        Rgba8::new(
            backdrop.r.saturating_add(source.r),
            backdrop.g.saturating_add(source.g),
            backdrop.b.saturating_add(source.b),
            backdrop.a.saturating_add(source.a),
        )
    }
}

/// Saturating 8-bit difference `backdrop - source` on RGB.
#[derive(Debug, Clone, Copy, Default)]
pub struct Subtraction;

impl BlendFn for Subtraction {
    #[inline]
    fn blend(&self, backdrop: Rgba8, source: Rgba8) -> Rgba8 {
        let [_, _, _, l] = backdrop.to_ratios();
        let [_, _, _, p] = source.to_ratios();
        Rgba8::new(
            backdrop.r.saturating_sub(source.r),
            backdrop.g.saturating_sub(source.g),
            backdrop.b.saturating_sub(source.b),
            truncate_channel(union_alpha(l, p) * CHANNEL_MAX),
        )
    }
}

/// Source hue with the backdrop's saturation and luminosity.
#[derive(Debug, Clone, Copy, Default)]
pub struct Hue;

impl BlendFn for Hue {
    fn blend(&self, backdrop: Rgba8, source: Rgba8) -> Rgba8 {
        let mut base = to_hsla(backdrop);
        base.h = to_hsla(source).h;
        from_hsla(base)
    }
}

/// Source saturation with the backdrop's hue and luminosity.
#[derive(Debug, Clone, Copy, Default)]
pub struct Saturation;

impl BlendFn for Saturation {
    fn blend(&self, backdrop: Rgba8, source: Rgba8) -> Rgba8 {
        let mut base = to_hsla(backdrop);
        base.s = to_hsla(source).s;
        from_hsla(base)
    }
}

/// Source hue and saturation with the backdrop's luminosity.
#[derive(Debug, Clone, Copy, Default)]
pub struct Color;

impl BlendFn for Color {
    fn blend(&self, backdrop: Rgba8, source: Rgba8) -> Rgba8 {
        let mut base = to_hsla(backdrop);
        let blend = to_hsla(source);
        base.h = blend.h;
        base.s = blend.s;
        from_hsla(base)
    }
}

/// Source luminosity with the backdrop's hue and saturation.
#[derive(Debug, Clone, Copy, Default)]
pub struct Luminosity;

impl BlendFn for Luminosity {
    fn blend(&self, backdrop: Rgba8, source: Rgba8) -> Rgba8 {
        let mut base = to_hsla(backdrop);
        base.l = to_hsla(source).l;
        from_hsla(base)
    }
}

// ============================================================================
// Image entry points
// ============================================================================

macro_rules! image_entry_points {
    ($($(#[$doc:meta])* $name:ident => $mode:expr;)*) => {
        $(
            $(#[$doc])*
            pub fn $name(backdrop: &Image, source: &Image) -> Image {
                Compositor::default().composite(backdrop, source, &$mode)
            }
        )*
    };
}

image_entry_points! {
    /// Blends with [`Normal`].
    normal => Normal;
    /// Blends with [`Darken`].
    darken => Darken;
    /// Blends with [`Multiply`].
    multiply => Multiply;
    /// Blends with [`Burn`].
    burn => Burn;
    /// Blends with [`Darker`].
    darker => Darker;
    /// Blends with [`Lighten`].
    lighten => Lighten;
    /// Blends with [`Screen`].
    screen => Screen;
    /// Blends with [`Dodge`].
    dodge => Dodge;
    /// Blends with [`Lighter`].
    lighter => Lighter;
    /// Blends with [`Overlay`].
    overlay => Overlay;
    /// Blends with [`SoftLight`].
    soft_light => SoftLight;
    /// Blends with [`HardLight`].
    hard_light => HardLight;
    /// Blends with [`Difference`].
    difference => Difference;
    /// Blends with [`Exclusion`].
    exclusion => Exclusion;
    /// Blends with [`Addition`].
    addition => Addition;
    /// Blends with [`Subtraction`].
    subtraction => Subtraction;
    /// Blends with [`Hue`].
    hue => Hue;
    /// Blends with [`Saturation`].
    saturation => Saturation;
    /// Blends with [`Color`].
    color => Color;
    /// Blends with [`Luminosity`].
    luminosity => Luminosity;
}

/// Blends with [`Dissolve`], drawing from operating-system entropy.
pub fn dissolve(backdrop: &Image, source: &Image) -> Image {
    Compositor::default().composite(backdrop, source, &Dissolve::from_entropy())
}

/// Blends with [`Dissolve`] using the given random source, sequentially so
/// draws are consumed in row-major order.
pub fn dissolve_with<R: RandomSource>(backdrop: &Image, source: &Image, random: R) -> Image {
    Compositor::sequential().composite(backdrop, source, &Dissolve::new(random))
}
