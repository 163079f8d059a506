/// Convert a float sample to signed 16-bit PCM
///
/// The sample is clamped to [-1.0, 1.0] first. Negative values scale by
/// 32768 and non-negative by 32767, so both -1.0 and 1.0 reach the ends of
/// the i16 range. The product is truncated toward zero.
pub fn quantize_i16(sample: f32) -> i16 {
    let s = sample.clamp(-1.0, 1.0) as f64;
    if s < 0.0 {
        (s * 32768.0) as i16
    } else {
        (s * 32767.0) as i16
    }
}

/// Quantize a whole channel
pub fn quantize_channel(samples: &[f32]) -> Vec<i16> {
    samples.iter().map(|&s| quantize_i16(s)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_asymmetric_scaling() {
        assert_eq!(quantize_i16(1.0), 32767);
        assert_eq!(quantize_i16(-1.0), -32768);
        assert_eq!(quantize_i16(0.0), 0);
        assert_eq!(quantize_i16(0.5), 16383);
        assert_eq!(quantize_i16(-0.5), -16384);
    }

    #[test]
    fn test_out_of_range_saturates() {
        assert_eq!(quantize_i16(1.5), 32767);
        assert_eq!(quantize_i16(-7.0), -32768);
    }

    #[test]
    fn test_truncates_toward_zero() {
        // 0.1 * 32767 = 3276.7, -0.1 * 32768 = -3276.8
        assert_eq!(quantize_i16(0.1), 3276);
        assert_eq!(quantize_i16(-0.1), -3276);
    }

    #[test]
    fn test_quantize_channel() {
        assert_eq!(quantize_channel(&[0.0, 1.0, -1.0]), vec![0, 32767, -32768]);
    }
}
