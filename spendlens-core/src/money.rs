//! Money rounding

/// Round to cents (half away from zero).
pub fn round2(value: f64) -> f64 {
    let rounded = (value * 100.0).round() / 100.0;
    // -0.0 prints as "-0.00"
    if rounded == 0.0 { 0.0 } else { rounded }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round2() {
        assert_eq!(round2(12.344), 12.34);
        assert_eq!(round2(12.346), 12.35);
        assert_eq!(round2(-49.999), -50.0);
        assert_eq!(round2(-0.001).to_string(), "0");
    }
}
