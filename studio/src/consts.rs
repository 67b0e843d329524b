//! Shared numeric constants for the studio crate.

// ── Opacity ─────────────────────────────────────────────────────

/// Lowest accepted opacity, in percent.
pub const OPACITY_MIN: f64 = 0.0;

/// Highest accepted opacity, in percent.
pub const OPACITY_MAX: f64 = 100.0;

/// Opacity of a freshly generated element.
pub const OPACITY_DEFAULT: f64 = 100.0;

// ── Scale ───────────────────────────────────────────────────────

/// Smallest accepted scale, in percent of the region width.
pub const SCALE_MIN: f64 = 50.0;

/// Largest accepted scale, in percent of the region width.
pub const SCALE_MAX: f64 = 150.0;

/// Scale of a freshly generated element.
pub const SCALE_DEFAULT: f64 = 100.0;

// ── Rotation ────────────────────────────────────────────────────

/// Most counter-clockwise accepted rotation, in degrees.
pub const ROTATION_MIN: f64 = -180.0;

/// Most clockwise accepted rotation, in degrees.
pub const ROTATION_MAX: f64 = 180.0;

/// Rotation of a freshly generated element.
pub const ROTATION_DEFAULT: f64 = 0.0;

// ── Color filter ────────────────────────────────────────────────

/// Lowest accepted brightness or contrast, in percent.
pub const FILTER_MIN: f64 = 0.0;

/// Highest accepted brightness or contrast, in percent.
pub const FILTER_MAX: f64 = 200.0;

/// Neutral brightness and contrast.
pub const FILTER_DEFAULT: f64 = 100.0;

// ── Units ───────────────────────────────────────────────────────

/// Divisor turning a percent property into a unit factor.
pub const PERCENT: f64 = 100.0;
