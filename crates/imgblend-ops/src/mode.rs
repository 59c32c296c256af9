//! Blend modes selectable by name.
//!
//! [`BlendMode`] names every mode in [`crate::modes`] so callers (a command
//! line, a settings file) can pick one at runtime and hand it to
//! [`Compositor::blend`] or [`blend`].
//!
//! ```rust
//! use imgblend_ops::BlendMode;
//!
//! let mode: BlendMode = "Soft-Light".parse().unwrap();
//! assert_eq!(mode, BlendMode::SoftLight);
//! assert_eq!(mode.to_string(), "soft-light");
//! assert!("vivid-light".parse::<BlendMode>().is_err());
//! ```

use crate::composite::Compositor;
use crate::modes;
use crate::{OpsError, OpsResult};
use imgblend_core::Image;
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// Blend mode for compositing operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum BlendMode {
    /// Source colour.
    #[default]
    Normal,
    /// Random per-pixel pick weighted by source alpha.
    Dissolve,
    /// Per-channel minimum.
    Darken,
    /// Product.
    Multiply,
    /// Colour burn.
    Burn,
    /// Whole darker pixel.
    Darker,
    /// Per-channel maximum.
    Lighten,
    /// Inverse multiply.
    Screen,
    /// Colour dodge.
    Dodge,
    /// Whole lighter pixel.
    Lighter,
    /// Multiply or screen depending on the backdrop.
    Overlay,
    /// Soft light.
    SoftLight,
    /// Hard light.
    HardLight,
    /// Absolute difference.
    Difference,
    /// Low-contrast difference.
    Exclusion,
    /// Saturating sum (linear dodge).
    Addition,
    /// Saturating difference.
    Subtraction,
    /// Source hue.
    Hue,
    /// Source saturation.
    Saturation,
    /// Source hue and saturation.
    Color,
    /// Source luminosity.
    Luminosity,
}

impl BlendMode {
    /// Every mode, in the order they are usually listed.
    pub const ALL: [BlendMode; 21] = [
        Self::Normal,
        Self::Dissolve,
        Self::Darken,
        Self::Multiply,
        Self::Burn,
        Self::Darker,
        Self::Lighten,
        Self::Screen,
        Self::Dodge,
        Self::Lighter,
        Self::Overlay,
        Self::SoftLight,
        Self::HardLight,
        Self::Difference,
        Self::Exclusion,
        Self::Addition,
        Self::Subtraction,
        Self::Hue,
        Self::Saturation,
        Self::Color,
        Self::Luminosity,
    ];

    /// Canonical lower-case name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Dissolve => "dissolve",
            Self::Darken => "darken",
            Self::Multiply => "multiply",
            Self::Burn => "burn",
            Self::Darker => "darker",
            Self::Lighten => "lighten",
            Self::Screen => "screen",
            Self::Dodge => "dodge",
            Self::Lighter => "lighter",
            Self::Overlay => "overlay",
            Self::SoftLight => "soft-light",
            Self::HardLight => "hard-light",
            Self::Difference => "difference",
            Self::Exclusion => "exclusion",
            Self::Addition => "addition",
            Self::Subtraction => "subtraction",
            Self::Hue => "hue",
            Self::Saturation => "saturation",
            Self::Color => "color",
            Self::Luminosity => "luminosity",
        }
    }

    /// `false` for the HSL modes, which cannot be computed channel by channel.
    pub const fn is_separable(self) -> bool {
        !matches!(
            self,
            Self::Hue | Self::Saturation | Self::Color | Self::Luminosity
        )
    }

    /// `true` for modes whose result is one of the two input pixels as a whole.
    pub const fn selects_whole_pixel(self) -> bool {
        matches!(self, Self::Dissolve | Self::Darker | Self::Lighter)
    }
}

impl fmt::Display for BlendMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for BlendMode {
    type Err = OpsError;

    fn from_str(s: &str) -> OpsResult<Self> {
        let key = s.trim().to_ascii_lowercase().replace('_', "-");
        match key.as_str() {
            "softlight" => return Ok(Self::SoftLight),
            "hardlight" => return Ok(Self::HardLight),
            _ => {}
        }
        Self::ALL
            .into_iter()
            .find(|mode| mode.name() == key)
            .ok_or_else(|| OpsError::UnknownMode(s.to_string()))
    }
}

impl Compositor {
    /// Blends `source` onto `backdrop` with the given mode.
    ///
    /// Dissolve draws from operating-system entropy; use
    /// [`modes::dissolve_with`] for a caller-supplied source.
    pub fn blend(&self, backdrop: &Image, source: &Image, mode: BlendMode) -> Image {
        debug!(mode = %mode, "Blending");
        match mode {
            BlendMode::Normal => self.composite(backdrop, source, &modes::Normal),
            BlendMode::Dissolve => self.composite(backdrop, source, &modes::Dissolve::from_entropy()),
            BlendMode::Darken => self.composite(backdrop, source, &modes::Darken),
            BlendMode::Multiply => self.composite(backdrop, source, &modes::Multiply),
            BlendMode::Burn => self.composite(backdrop, source, &modes::Burn),
            BlendMode::Darker => self.composite(backdrop, source, &modes::Darker),
            BlendMode::Lighten => self.composite(backdrop, source, &modes::Lighten),
            BlendMode::Screen => self.composite(backdrop, source, &modes::Screen),
            BlendMode::Dodge => self.composite(backdrop, source, &modes::Dodge),
            BlendMode::Lighter => self.composite(backdrop, source, &modes::Lighter),
            BlendMode::Overlay => self.composite(backdrop, source, &modes::Overlay),
            BlendMode::SoftLight => self.composite(backdrop, source, &modes::SoftLight),
            BlendMode::HardLight => self.composite(backdrop, source, &modes::HardLight),
            BlendMode::Difference => self.composite(backdrop, source, &modes::Difference),
            BlendMode::Exclusion => self.composite(backdrop, source, &modes::Exclusion),
            BlendMode::Addition => self.composite(backdrop, source, &modes::Addition),
            BlendMode::Subtraction => self.composite(backdrop, source, &modes::Subtraction),
            BlendMode::Hue => self.composite(backdrop, source, &modes::Hue),
            BlendMode::Saturation => self.composite(backdrop, source, &modes::Saturation),
            BlendMode::Color => self.composite(backdrop, source, &modes::Color),
            BlendMode::Luminosity => self.composite(backdrop, source, &modes::Luminosity),
        }
    }
}

/// Blends with a default [`Compositor`].
pub fn blend(backdrop: &Image, source: &Image, mode: BlendMode) -> Image {
    Compositor::default().blend(backdrop, source, mode)
}
