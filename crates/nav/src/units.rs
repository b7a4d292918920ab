//! Relative-unit conversion.
//!
//! Geometry is authored in `rem` and projected in pixels. The root font size
//! is asked for on every conversion, never cached, so a change at runtime is
//! picked up by the next resolution.

use std::env;

use tracing::warn;

/// Pixel size used when the root font size cannot be read.
pub const DEFAULT_ROOT_FONT_SIZE_PX: f64 = 16.0;

/// Environment variable read by [`EnvRootFontSize`].
pub const ROOT_FONT_SIZE_ENV: &str = "KDOCS_ROOT_FONT_SIZE";

/// Source of the root font size in pixels.
pub trait RootFontSize {
    /// Current root font size, or `None` when it cannot be determined.
    fn root_font_size_px(&self) -> Option<f64>;
}

/// A fixed root font size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedRootFontSize(pub f64);

impl Default for FixedRootFontSize {
    fn default() -> Self {
        Self(DEFAULT_ROOT_FONT_SIZE_PX)
    }
}

impl RootFontSize for FixedRootFontSize {
    fn root_font_size_px(&self) -> Option<f64> {
        Some(self.0)
    }
}

impl RootFontSize for Option<f64> {
    fn root_font_size_px(&self) -> Option<f64> {
        *self
    }
}

/// Reads `KDOCS_ROOT_FONT_SIZE` each time it is queried.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvRootFontSize;

impl RootFontSize for EnvRootFontSize {
    fn root_font_size_px(&self) -> Option<f64> {
        env::var(ROOT_FONT_SIZE_ENV)
            .ok()
            .and_then(|value| value.trim().trim_end_matches("px").parse::<f64>().ok())
    }
}

/// Reads the root font size once, substituting the default for values that
/// are missing, non-finite or not positive.
pub fn root_font_size(source: &dyn RootFontSize) -> f64 {
    match source.root_font_size_px() {
        Some(size) if size.is_finite() && size > 0.0 => size,
        Some(size) => {
            warn!(size, fallback = DEFAULT_ROOT_FONT_SIZE_PX, "invalid root font size; using default");
            DEFAULT_ROOT_FONT_SIZE_PX
        }
        None => {
            warn!(fallback = DEFAULT_ROOT_FONT_SIZE_PX, "root font size unavailable; using default");
            DEFAULT_ROOT_FONT_SIZE_PX
        }
    }
}

/// Converts `rem` to pixels using the current root font size.
pub fn rem_to_px(rem: f64, source: &dyn RootFontSize) -> f64 {
    rem * root_font_size(source)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_with_fixed_size() {
        assert_eq!(rem_to_px(2.0, &FixedRootFontSize(16.0)), 32.0);
        assert_eq!(rem_to_px(0.25, &FixedRootFontSize(20.0)), 5.0);
    }

    #[test]
    fn unreadable_size_falls_back_to_default() {
        assert_eq!(rem_to_px(2.0, &None), 2.0 * DEFAULT_ROOT_FONT_SIZE_PX);
        assert_eq!(rem_to_px(1.0, &FixedRootFontSize(f64::NAN)), DEFAULT_ROOT_FONT_SIZE_PX);
        assert_eq!(rem_to_px(1.0, &FixedRootFontSize(0.0)), DEFAULT_ROOT_FONT_SIZE_PX);
        assert_eq!(rem_to_px(1.0, &FixedRootFontSize(-4.0)), DEFAULT_ROOT_FONT_SIZE_PX);
    }

    #[test]
    fn env_source_is_read_on_every_call() {
        temp_env::with_var(ROOT_FONT_SIZE_ENV, Some("18px"), || {
            assert_eq!(rem_to_px(2.0, &EnvRootFontSize), 36.0);
        });
        temp_env::with_var(ROOT_FONT_SIZE_ENV, Some("10"), || {
            assert_eq!(rem_to_px(2.0, &EnvRootFontSize), 20.0);
        });
        temp_env::with_var(ROOT_FONT_SIZE_ENV, Some("large"), || {
            assert_eq!(rem_to_px(1.0, &EnvRootFontSize), DEFAULT_ROOT_FONT_SIZE_PX);
        });
        temp_env::with_var_unset(ROOT_FONT_SIZE_ENV, || {
            assert_eq!(rem_to_px(1.0, &EnvRootFontSize), DEFAULT_ROOT_FONT_SIZE_PX);
        });
    }
}
