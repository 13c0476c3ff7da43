pub const GIB: u64 = 1024 * 1024 * 1024;

/// Bytes to GiB, rounded to 2 decimals.
pub fn bytes_to_gib(bytes: u64) -> f64 {
    round2(bytes as f64 / GIB as f64)
}

pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gib_conversion_rounds_to_two_decimals() {
        assert_eq!(bytes_to_gib(GIB), 1.0);
        assert_eq!(bytes_to_gib(GIB + GIB / 2), 1.5);
        assert_eq!(bytes_to_gib(16_000_000_000), 14.9);
        assert_eq!(bytes_to_gib(0), 0.0);
    }

    #[test]
    fn round2_truncates_trailing_noise() {
        assert_eq!(round2(10.005), 10.01);
        assert_eq!(round2(10.004), 10.0);
        assert_eq!(round2(0.0), 0.0);
    }
}
