//! The compositor: one traversal shared by every blend mode.
//!
//! A blend mode only decides the *result colour* `cr` for a backdrop/source
//! pixel pair. The compositor then merges backdrop, source and result with
//! the separable "source over backdrop" formula (PDF Reference, 7.2.5):
//!
//! ```text
//! X_out = (1 - as)·ab·Xb + (1 - ab)·as·Xs + ab·as·Xr     for X in {r, g, b}
//! a_out = ab + as - ab·as                                 (union, 7.2.6)
//! ```
//!
//! The union is evaluated on the 8-bit values as `b + s - ceil(b·s / 255)`,
//! which is exactly `trunc(a_out · 255)` with no floating-point rounding. The
//! alpha of `cr` is ignored. Colour is packed through [`pack_ratios`], so the
//! output is always well-formed regardless of what the blend function
//! produced.
//!
//! # Output colour
//!
//! The colour terms are already weighted by alpha, and are not divided by
//! `a_out` afterwards. Where `a_out < 1` the RGB channels are therefore not
//! straight colour: white at alpha 128 over a transparent backdrop comes out
//! as `(128, 128, 128, 128)`. Where the output is opaque the two coincide.
//!
//! # Sizing
//!
//! Inputs need not match: the output covers
//! `min(backdrop.width, source.width) x min(backdrop.height, source.height)`.
//! An empty overlap yields an empty image.
//!
//! # Example
//!
//! ```rust
//! use imgblend_core::{Image, Rgba8};
//! use imgblend_ops::composite::composite;
//!
//! let backdrop = Image::filled(10, 10, Rgba8::opaque(255, 0, 0));
//! let source = Image::filled(4, 6, Rgba8::new(0, 0, 255, 128));
//!
//! // A closure is a blend function too.
//! let out = composite(&backdrop, &source, &|_cb: Rgba8, cs: Rgba8| cs);
//! assert_eq!(out.dimensions(), (4, 6));
//! ```

use imgblend_core::{pack_ratios, Image, Rgba8, CHANNELS};
use tracing::{debug, trace};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// A per-pixel combine function: backdrop and source in, result colour out.
///
/// Implemented by every blend mode, and by any `Fn(Rgba8, Rgba8) -> Rgba8`
/// closure that is `Sync`.
pub trait BlendFn: Sync {
    /// Computes the result colour for one backdrop/source pair.
    fn blend(&self, backdrop: Rgba8, source: Rgba8) -> Rgba8;
}

impl<F> BlendFn for F
where
    F: Fn(Rgba8, Rgba8) -> Rgba8 + Sync,
{
    #[inline]
    fn blend(&self, backdrop: Rgba8, source: Rgba8) -> Rgba8 {
        self(backdrop, source)
    }
}

/// Compositor settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompositeOptions {
    /// Split the output rows across the rayon pool.
    ///
    /// Ignored when the `parallel` feature is disabled.
    pub parallel: bool,
}

impl Default for CompositeOptions {
    fn default() -> Self {
        Self {
            parallel: cfg!(feature = "parallel"),
        }
    }
}

impl CompositeOptions {
    /// Sequential, row-major traversal.
    pub const SEQUENTIAL: Self = Self { parallel: false };

    /// Returns these options with parallelism switched on or off.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }
}

/// Applies blend functions to image pairs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Compositor {
    options: CompositeOptions,
}

impl Compositor {
    /// Creates a compositor with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a compositor with the given options.
    pub fn with_options(options: CompositeOptions) -> Self {
        Self { options }
    }

    /// A compositor that always walks pixels in row-major order on the
    /// calling thread.
    pub fn sequential() -> Self {
        Self::with_options(CompositeOptions::SEQUENTIAL)
    }

    /// Returns the active options.
    pub fn options(&self) -> CompositeOptions {
        self.options
    }

    /// Composites `source` over `backdrop` using `combine` for the result colour.
    ///
    /// Allocates and returns a new image sized to the overlap; the inputs are
    /// not modified.
    pub fn composite<B>(&self, backdrop: &Image, source: &Image, combine: &B) -> Image
    where
        B: BlendFn + ?Sized,
    {
        let bounds = backdrop.bounds().overlap_size(&source.bounds());
        trace!(
            backdrop_w = backdrop.width(),
            backdrop_h = backdrop.height(),
            source_w = source.width(),
            source_h = source.height(),
            parallel = self.options.parallel,
            "composite"
        );

        let mut out = Image::new(bounds.width, bounds.height);
        if bounds.is_empty() {
            debug!(width = bounds.width, height = bounds.height, "Empty overlap, nothing to composite");
            return out;
        }
        debug!(width = bounds.width, height = bounds.height, "Compositing");

        let row_len = out.row_len();
        let data = out.data_mut();

        #[cfg(feature = "parallel")]
        {
            if self.options.parallel {
                data.par_chunks_mut(row_len)
                    .enumerate()
                    .for_each(|(y, row)| fill_row(row, y as u32, backdrop, source, combine));
                return out;
            }
        }

        for (y, row) in data.chunks_exact_mut(row_len).enumerate() {
            fill_row(row, y as u32, backdrop, source, combine);
        }
        out
    }
}

fn fill_row<B>(row: &mut [u8], y: u32, backdrop: &Image, source: &Image, combine: &B)
where
    B: BlendFn + ?Sized,
{
    for (x, out) in row.chunks_exact_mut(CHANNELS).enumerate() {
        let x = x as u32;
        let cb = backdrop.pixel(x, y);
        let cs = source.pixel(x, y);
        let cr = combine.blend(cb, cs);
        out.copy_from_slice(&composite_pixel(cb, cs, cr).to_array());
    }
}

/// Merges backdrop `cb`, source `cs` and result colour `cr` into one pixel.
///
/// Only the RGB channels of `cr` are used.
///
/// # Example
///
/// ```rust
/// use imgblend_core::Rgba8;
/// use imgblend_ops::composite::composite_pixel;
///
/// // Opaque over opaque: the result colour wins outright.
/// let out = composite_pixel(
///     Rgba8::opaque(10, 20, 30),
///     Rgba8::opaque(40, 50, 60),
///     Rgba8::new(70, 80, 90, 0),
/// );
/// assert_eq!(out, Rgba8::opaque(70, 80, 90));
/// ```
#[inline]
pub fn composite_pixel(cb: Rgba8, cs: Rgba8, cr: Rgba8) -> Rgba8 {
    let [rb, gb, bb, ab] = cb.to_ratios();
    let [rs, gs, bs, a_s] = cs.to_ratios();
    let [rr, gr, br, _] = cr.to_ratios();

    let mix = |xb: f64, xs: f64, xr: f64| {
        (1.0 - a_s) * ab * xb + (1.0 - ab) * a_s * xs + ab * a_s * xr
    };

    Rgba8 {
        a: union_alpha(cb.a, cs.a),
        ..pack_ratios([mix(rb, rs, rr), mix(gb, gs, gr), mix(bb, bs, br), 0.0])
    }
}

/// `trunc((ab + as - ab·as) · 255)` computed on the 8-bit alphas.
#[inline]
fn union_alpha(backdrop: u8, source: u8) -> u8 {
    let (b, s) = (u16::from(backdrop), u16::from(source));
    // b + s - ceil(b·s/255) never exceeds 255.
    (b + s - (b * s).div_ceil(255)) as u8
}

/// Composites with a default [`Compositor`].
pub fn composite<B>(backdrop: &Image, source: &Image, combine: &B) -> Image
where
    B: BlendFn + ?Sized,
{
    Compositor::default().composite(backdrop, source, combine)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn take_source(_cb: Rgba8, cs: Rgba8) -> Rgba8 {
        cs
    }

    #[test]
    fn test_half_alpha_blue_over_red() {
        let out = composite_pixel(
            Rgba8::opaque(255, 0, 0),
            Rgba8::new(0, 0, 255, 128),
            Rgba8::new(0, 0, 255, 128),
        );
        assert_eq!(out, Rgba8::new(127, 0, 128, 255));
    }

    #[test]
    fn test_transparent_source_keeps_backdrop() {
        let cb = Rgba8::new(12, 34, 56, 255);
        let out = composite_pixel(cb, Rgba8::transparent(), Rgba8::opaque(255, 255, 255));
        assert_eq!(out, cb);
    }

    #[test]
    fn test_transparent_backdrop_shows_source() {
        let cs = Rgba8::opaque(12, 34, 56);
        let out = composite_pixel(Rgba8::transparent(), cs, Rgba8::opaque(255, 255, 255));
        assert_eq!(out, cs);
    }

    #[test]
    fn test_transparent_backdrop_keeps_source_alpha() {
        for a in 0..=255u8 {
            let out = composite_pixel(Rgba8::transparent(), Rgba8::new(0, 0, 0, a), Rgba8::transparent());
            assert_eq!(out.a, a, "source alpha {a}");
        }
    }

    #[test]
    fn test_union_alpha_matches_real_union() {
        for b in 0..=255u8 {
            for s in 0..=255u8 {
                // Exact rational form of trunc((b + s - b·s/255)), in integers.
                let (bw, sw) = (u32::from(b), u32::from(s));
                let expected = (bw * 255 + sw * 255 - bw * sw) / 255;
                assert_eq!(u32::from(union_alpha(b, s)), expected, "alphas {b}, {s}");
            }
        }
        assert_eq!(union_alpha(255, 0), 255);
        assert_eq!(union_alpha(0, 255), 255);
        assert_eq!(union_alpha(128, 128), 191);
    }

    #[test]
    fn test_translucent_output_is_alpha_weighted() {
        let out = composite_pixel(
            Rgba8::transparent(),
            Rgba8::new(255, 255, 255, 128),
            Rgba8::opaque(255, 255, 255),
        );
        assert_eq!(out, Rgba8::new(128, 128, 128, 128));
    }

    #[test]
    fn test_result_alpha_ignored() {
        let cb = Rgba8::opaque(0, 0, 0);
        let cs = Rgba8::opaque(0, 0, 0);
        let a = composite_pixel(cb, cs, Rgba8::new(100, 100, 100, 0));
        let b = composite_pixel(cb, cs, Rgba8::new(100, 100, 100, 255));
        assert_eq!(a, b);
    }

    #[test]
    fn test_output_is_overlap() {
        let a = Image::filled(10, 10, Rgba8::opaque(1, 1, 1));
        let b = Image::filled(4, 6, Rgba8::opaque(2, 2, 2));
        let out = Compositor::sequential().composite(&a, &b, &take_source);
        assert_eq!(out.dimensions(), (4, 6));
        assert_eq!(out.origin(), (0, 0));
    }

    #[test]
    fn test_empty_overlap() {
        let a = Image::filled(10, 10, Rgba8::opaque(1, 1, 1));
        let b = Image::new(0, 3);
        let out = composite(&a, &b, &take_source);
        assert!(out.is_empty());
        assert_eq!(out.dimensions(), (0, 3));
    }

    #[test]
    fn test_inputs_untouched() {
        let a = Image::filled(3, 3, Rgba8::opaque(1, 2, 3));
        let b = Image::filled(3, 3, Rgba8::new(9, 8, 7, 100));
        let (a0, b0) = (a.clone(), b.clone());
        let _ = composite(&a, &b, &take_source);
        assert_eq!(a, a0);
        assert_eq!(b, b0);
    }

    #[test]
    fn test_pixels_aligned_by_coordinate() {
        let a = Image::from_fn(5, 4, |x, y| Rgba8::opaque(x as u8, y as u8, 0));
        let b = Image::from_fn(3, 7, |x, y| Rgba8::opaque(0, 0, (x + 10 * y) as u8));
        let out = Compositor::sequential().composite(&a, &b, &|cb: Rgba8, cs: Rgba8| {
            Rgba8::new(cb.r, cb.g, cs.b, 255)
        });
        for (x, y, px) in out.pixels() {
            assert_eq!(px, Rgba8::opaque(x as u8, y as u8, (x + 10 * y) as u8));
        }
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn test_parallel_matches_sequential() {
        let a = Image::from_fn(37, 23, |x, y| Rgba8::new(x as u8 * 7, y as u8 * 11, 90, (x * y) as u8));
        let b = Image::from_fn(41, 19, |x, y| Rgba8::new(200, x as u8 * 3, y as u8 * 5, 180));
        let screen = |cb: Rgba8, cs: Rgba8| Rgba8::new(cb.r.max(cs.r), cb.g.max(cs.g), cb.b.max(cs.b), 255);
        let seq = Compositor::sequential().composite(&a, &b, &screen);
        let par = Compositor::with_options(CompositeOptions::default().with_parallel(true))
            .composite(&a, &b, &screen);
        assert_eq!(seq, par);
    }
}
