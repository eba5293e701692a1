#![forbid(unsafe_code)]

//! Fill colors for overlay layers.

/// A straight (non-premultiplied) RGBA color with unit-range channels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Rgba {
    pub const TRANSPARENT: Self = Self::new(0.0, 0.0, 0.0, 0.0);
    pub const BLACK: Self = Self::new(0.0, 0.0, 0.0, 1.0);
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0, 1.0);

    /// Create a color from channels. Values are not clamped here; use
    /// [`Rgba::clamped`] when the input is untrusted.
    #[inline]
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// A gray of the given brightness and opacity.
    #[inline]
    pub const fn gray(white: f32, alpha: f32) -> Self {
        Self::new(white, white, white, alpha)
    }

    /// Same color with a different alpha.
    #[inline]
    #[must_use]
    pub const fn with_alpha(self, a: f32) -> Self {
        Self::new(self.r, self.g, self.b, a)
    }

    /// All channels clamped to `[0, 1]`; NaN becomes 0.
    #[must_use]
    pub fn clamped(self) -> Self {
        fn unit(v: f32) -> f32 {
            if v.is_nan() { 0.0 } else { v.clamp(0.0, 1.0) }
        }
        Self::new(unit(self.r), unit(self.g), unit(self.b), unit(self.a))
    }

    /// Whether this color paints nothing.
    #[inline]
    pub fn is_transparent(&self) -> bool {
        self.a <= 0.0
    }
}
