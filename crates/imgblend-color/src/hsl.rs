//! RGBA <-> HSLA conversion.
//!
//! All four HSLA components are ratios in `[0, 1]`: hue is a fraction of a
//! full turn (0 = red, 1/3 = green, 2/3 = blue), saturation and luminosity
//! follow the usual bi-hexcone HSL model. Alpha passes through untouched.
//!
//! Converting back rounds to the nearest 8-bit value, so any [`Rgba8`]
//! survives `from_hsla(to_hsla(px))` unchanged.

use imgblend_core::{from_unit_rounded, Rgba8};

/// Below this chroma a colour is treated as achromatic (grey).
const ACHROMATIC_EPSILON: f64 = 1e-12;

/// A pixel in hue/saturation/luminosity form.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Hsla {
    /// Hue as a fraction of a turn, `[0, 1)`.
    pub h: f64,
    /// Saturation, `[0, 1]`.
    pub s: f64,
    /// Luminosity, `[0, 1]`.
    pub l: f64,
    /// Alpha ratio, `[0, 1]`.
    pub a: f64,
}

impl Hsla {
    /// Creates a new HSLA value.
    #[inline]
    pub const fn new(h: f64, s: f64, l: f64, a: f64) -> Self {
        Self { h, s, l, a }
    }

    /// Converts an RGBA pixel to HSLA.
    pub fn from_rgba(px: Rgba8) -> Self {
        let [r, g, b, a] = px.to_ratios();
        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let l = (max + min) * 0.5;
        let delta = max - min;

        if delta < ACHROMATIC_EPSILON {
            return Self::new(0.0, 0.0, l, a);
        }

        let s = delta / (1.0 - (2.0 * l - 1.0).abs());
        let h = if max == r {
            (g - b) / delta + if g < b { 6.0 } else { 0.0 }
        } else if max == g {
            (b - r) / delta + 2.0
        } else {
            (r - g) / delta + 4.0
        } / 6.0;

        Self::new(h, s.min(1.0), l, a)
    }

    /// Converts back to an RGBA pixel.
    pub fn to_rgba(self) -> Rgba8 {
        let alpha = from_unit_rounded(self.a);
        let l = self.l.clamp(0.0, 1.0);
        let s = self.s.clamp(0.0, 1.0);

        if s < ACHROMATIC_EPSILON {
            let v = from_unit_rounded(l);
            return Rgba8::new(v, v, v, alpha);
        }

        let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
        let p = 2.0 * l - q;
        let h = self.h - self.h.floor();

        Rgba8::new(
            from_unit_rounded(hue_to_channel(p, q, h + 1.0 / 3.0)),
            from_unit_rounded(hue_to_channel(p, q, h)),
            from_unit_rounded(hue_to_channel(p, q, h - 1.0 / 3.0)),
            alpha,
        )
    }
}

fn hue_to_channel(p: f64, q: f64, mut t: f64) -> f64 {
    if t < 0.0 {
        t += 1.0;
    }
    if t > 1.0 {
        t -= 1.0;
    }
    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 0.5 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * (2.0 / 3.0 - t) * 6.0
    } else {
        p
    }
}

impl From<Rgba8> for Hsla {
    #[inline]
    fn from(px: Rgba8) -> Self {
        Self::from_rgba(px)
    }
}

impl From<Hsla> for Rgba8 {
    #[inline]
    fn from(hsla: Hsla) -> Self {
        hsla.to_rgba()
    }
}

/// Converts an RGBA pixel to HSLA.
#[inline]
pub fn to_hsla(px: Rgba8) -> Hsla {
    Hsla::from_rgba(px)
}

/// Converts an HSLA value back to an RGBA pixel.
#[inline]
pub fn from_hsla(hsla: Hsla) -> Rgba8 {
    hsla.to_rgba()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_primaries() {
        let red = to_hsla(Rgba8::opaque(255, 0, 0));
        assert_abs_diff_eq!(red.h, 0.0);
        assert_abs_diff_eq!(red.s, 1.0);
        assert_abs_diff_eq!(red.l, 0.5);

        let green = to_hsla(Rgba8::opaque(0, 255, 0));
        assert_abs_diff_eq!(green.h, 1.0 / 3.0, epsilon = 1e-12);

        let blue = to_hsla(Rgba8::opaque(0, 0, 255));
        assert_abs_diff_eq!(blue.h, 2.0 / 3.0, epsilon = 1e-12);
    }

    #[test]
    fn test_grey_has_no_saturation() {
        let grey = to_hsla(Rgba8::gray(128, 255));
        assert_abs_diff_eq!(grey.s, 0.0);
        assert_abs_diff_eq!(grey.l, 128.0 / 255.0, epsilon = 1e-12);
    }

    #[test]
    fn test_alpha_preserved() {
        let hsla = to_hsla(Rgba8::new(10, 20, 30, 77));
        assert_abs_diff_eq!(hsla.a, 77.0 / 255.0);
        assert_eq!(from_hsla(hsla).a, 77);
    }

    #[test]
    fn test_round_trip() {
        for r in (0..=255u16).step_by(15) {
            for g in (0..=255u16).step_by(17) {
                for b in (0..=255u16).step_by(51) {
                    let px = Rgba8::new(r as u8, g as u8, b as u8, 200);
                    assert_eq!(from_hsla(to_hsla(px)), px, "round trip of {px}");
                }
            }
        }
    }

    #[test]
    fn test_hue_wraps() {
        let a = Hsla::new(1.25, 1.0, 0.5, 1.0).to_rgba();
        let b = Hsla::new(0.25, 1.0, 0.5, 1.0).to_rgba();
        assert_eq!(a, b);
    }

    #[test]
    fn test_zero_saturation_ignores_hue() {
        let a = Hsla::new(0.1, 0.0, 0.4, 1.0).to_rgba();
        let b = Hsla::new(0.7, 0.0, 0.4, 1.0).to_rgba();
        assert_eq!(a, b);
        assert_eq!(a.r, a.g);
        assert_eq!(a.g, a.b);
    }
}
