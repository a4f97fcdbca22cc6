//! Shared primitive types used across the portfolio core.

/// Stable client identifier, `C0001`-style.
pub type ClientId = String;

/// Two-letter country code drawn from a region's candidate set.
pub type CountryCode = String;

/// Master seed for one generated portfolio.
pub type Seed = u64;

/// Round `value` to `decimals` places, half away from zero.
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}
