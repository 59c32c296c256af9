//! Layer opacity.
//!
//! Opacity is applied by scaling the source's alpha before blending, so the
//! compositor's weighting does the rest.

use crate::composite::Compositor;
use crate::mode::BlendMode;
use crate::{OpsError, OpsResult};
use imgblend_core::{truncate_channel, Image, Rgba8};
use tracing::trace;

/// Scales every pixel's alpha by `amount`, keeping RGB.
///
/// The new alpha is `trunc(a * amount)`, clamped to `0..=255`.
///
/// # Example
///
/// ```rust
/// use imgblend_core::{Image, Rgba8};
/// use imgblend_ops::fade;
///
/// let img = Image::filled(2, 2, Rgba8::opaque(10, 20, 30));
/// let half = fade(&img, 0.5);
/// assert_eq!(half.pixel(0, 0), Rgba8::new(10, 20, 30, 127));
/// ```
pub fn fade(image: &Image, amount: f64) -> Image {
    trace!(amount, width = image.width(), height = image.height(), "fade");
    let mut out = image.clone();
    out.map_pixels(|px| Rgba8 {
        a: truncate_channel(f64::from(px.a) * amount),
        ..px
    });
    out
}

impl Compositor {
    /// Blends `source` at the given opacity onto `backdrop`.
    ///
    /// # Errors
    ///
    /// [`OpsError::InvalidParameter`] if `opacity` is not a finite value in
    /// `[0, 1]`.
    pub fn blend_with_opacity(
        &self,
        backdrop: &Image,
        source: &Image,
        mode: BlendMode,
        opacity: f64,
    ) -> OpsResult<Image> {
        if !opacity.is_finite() || !(0.0..=1.0).contains(&opacity) {
            return Err(OpsError::InvalidParameter(format!(
                "opacity must be in [0, 1], got {opacity}"
            )));
        }
        if opacity >= 1.0 {
            return Ok(self.blend(backdrop, source, mode));
        }
        Ok(self.blend(backdrop, &fade(source, opacity), mode))
    }
}

/// Blends at the given opacity with a default [`Compositor`].
pub fn blend_with_opacity(
    backdrop: &Image,
    source: &Image,
    mode: BlendMode,
    opacity: f64,
) -> OpsResult<Image> {
    Compositor::default().blend_with_opacity(backdrop, source, mode, opacity)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fade_scales_alpha_only() {
        let img = Image::from_fn(3, 2, |x, y| Rgba8::new(x as u8, y as u8, 9, 200));
        let out = fade(&img, 0.25);
        for (x, y, px) in out.pixels() {
            assert_eq!(px, Rgba8::new(x as u8, y as u8, 9, 50));
        }
    }

    #[test]
    fn test_fade_clamps() {
        let img = Image::filled(1, 1, Rgba8::new(1, 2, 3, 200));
        assert_eq!(fade(&img, 4.0).pixel(0, 0).a, 255);
        assert_eq!(fade(&img, -1.0).pixel(0, 0).a, 0);
    }

    #[test]
    fn test_fade_leaves_input() {
        let img = Image::filled(2, 2, Rgba8::opaque(5, 5, 5));
        let _ = fade(&img, 0.0);
        assert_eq!(img.pixel(1, 1).a, 255);
    }

    #[test]
    fn test_opacity_rejects_out_of_range() {
        let a = Image::filled(2, 2, Rgba8::opaque(0, 0, 0));
        for bad in [-0.1, 1.5, f64::NAN, f64::INFINITY] {
            let err = blend_with_opacity(&a, &a, BlendMode::Normal, bad).unwrap_err();
            assert!(matches!(err, OpsError::InvalidParameter(_)));
        }
    }

    #[test]
    fn test_zero_opacity_keeps_backdrop() {
        let a = Image::filled(3, 3, Rgba8::opaque(10, 20, 30));
        let b = Image::filled(3, 3, Rgba8::opaque(200, 100, 50));
        let out = blend_with_opacity(&a, &b, BlendMode::Multiply, 0.0).unwrap();
        assert_eq!(out, a);
    }

    #[test]
    fn test_full_opacity_matches_blend() {
        let a = Image::filled(3, 3, Rgba8::opaque(10, 20, 30));
        let b = Image::filled(3, 3, Rgba8::new(200, 100, 50, 180));
        let out = blend_with_opacity(&a, &b, BlendMode::Screen, 1.0).unwrap();
        assert_eq!(out, crate::mode::blend(&a, &b, BlendMode::Screen));
    }
}
