//! Fixed-point conversions for on-chain rates
//!
//! Aave stores rates as RAY (10^27), Compound III as per-second WAD (10^18).
//! Conversions split the raw integer into whole and fractional parts before
//! going to f64 so large values keep their precision.

/// Decimals of a RAY value
pub const RAY_DECIMALS: u32 = 27;

/// Decimals of a WAD value
pub const WAD_DECIMALS: u32 = 18;

/// Seconds per (non-leap) year, as used by Compound III
pub const SECONDS_PER_YEAR: u128 = 31_536_000;

/// raw / 10^decimals * 100
pub fn scaled_to_percent(raw: u128, decimals: u32) -> f64 {
    let scale = 10u128.pow(decimals);
    let whole = raw / scale;
    let fraction = raw % scale;
    (whole as f64 + fraction as f64 / scale as f64) * 100.0
}

/// RAY rate (Aave liquidityRate) to percent
pub fn ray_to_percent(raw: u128) -> f64 {
    scaled_to_percent(raw, RAY_DECIMALS)
}

/// WAD value to percent
pub fn wad_to_percent(raw: u128) -> f64 {
    scaled_to_percent(raw, WAD_DECIMALS)
}

/// Per-second WAD rate to a simple annual rate in percent
pub fn per_second_wad_to_apr_percent(rate_per_second: u64) -> f64 {
    wad_to_percent(rate_per_second as u128 * SECONDS_PER_YEAR)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_ray_to_percent() {
        // 3.5% expressed in RAY
        let raw = 35_000_000_000_000_000_000_000_000u128;
        assert!(close(ray_to_percent(raw), 3.5));
        assert_eq!(ray_to_percent(0), 0.0);
        // exactly 1.0 RAY is 100%
        assert!(close(ray_to_percent(10u128.pow(27)), 100.0));
    }

    #[test]
    fn test_ray_keeps_small_fractions() {
        // 0.0123% = 1.23e-4 as a fraction = 1.23e23 in RAY
        let raw = 123_000_000_000_000_000_000_000u128;
        assert!(close(ray_to_percent(raw), 0.0123));
    }

    #[test]
    fn test_wad_to_percent() {
        assert!(close(wad_to_percent(50_000_000_000_000_000), 5.0));
        assert!(close(wad_to_percent(10u128.pow(18) * 2), 200.0));
    }

    #[test]
    fn test_per_second_rate_to_apr() {
        // 1_585_489_599 wei/s * 31_536_000 s ≈ 0.05 WAD → ~5%
        let apr = per_second_wad_to_apr_percent(1_585_489_599);
        assert!((apr - 5.0).abs() < 1e-6);
        assert_eq!(per_second_wad_to_apr_percent(0), 0.0);
    }
}
