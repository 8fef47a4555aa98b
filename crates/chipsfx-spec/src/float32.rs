//! 32-bit IEEE-754 float codec for the share-string wire format.
//!
//! Parameter values are stored as `f64` in memory but serialized as 32-bit
//! IEEE-754 bit patterns, four bytes per field. The round trip is lossy by
//! design: `decode(encode(x))` yields the single-precision rounding of `x`,
//! and callers must not expect double precision to survive serialization.
//! The bit layout is assembled by hand so the format is identical on every
//! platform, including the NaN payload.

/// Number of mantissa bits in a single-precision float.
const MANTISSA_BITS: u32 = 23;

/// 2^23 as a float, the mantissa quantization step.
const MANTISSA_SCALE: f64 = 8_388_608.0;

/// Mask covering the 23 mantissa bits.
const MANTISSA_MASK: u32 = (1 << MANTISSA_BITS) - 1;

/// Sign bit mask.
const SIGN_MASK: u32 = 0x8000_0000;

/// Fixed mantissa payload used for every encoded NaN, so NaN inputs
/// produce one stable bit pattern instead of whatever the platform holds.
const NAN_MANTISSA: u32 = 0x1337;

fn pack(sign: u32, exponent_field: u32, mantissa: u32) -> u32 {
    (sign << 31) | (exponent_field << MANTISSA_BITS) | mantissa
}

fn exp2(exponent: i32) -> f64 {
    (exponent as f64).exp2()
}

/// Encodes a value as a single-precision IEEE-754 bit pattern.
///
/// Special cases: NaN maps to a fixed non-zero-mantissa pattern, signed
/// zeros and infinities are exact, magnitudes below the subnormal range
/// round to zero, and magnitudes beyond the single-precision range round
/// to infinity. The 23-bit mantissa is rounded ties-to-even, matching the
/// IEEE-754 rounding a hardware conversion would apply.
pub fn encode(value: f64) -> u32 {
    if value.is_nan() {
        return pack(0, 0xFF, NAN_MANTISSA);
    }
    let sign = u32::from(value.is_sign_negative());
    let mag = value.abs();
    if mag == 0.0 {
        return pack(sign, 0, 0);
    }
    if mag.is_infinite() {
        return pack(sign, 0xFF, 0);
    }

    let mut exponent = mag.log2().floor() as i32;
    // log2 can land one binade high for magnitudes just below a power of two
    if exponent > -126 && mag * exp2(-exponent) < 1.0 {
        exponent -= 1;
    }
    exponent = exponent.clamp(-126, 127);

    let significand = mag * exp2(-exponent);
    if significand < 1.0 {
        // below the smallest normal; round into the subnormal mantissa
        let mantissa = (significand * MANTISSA_SCALE).round_ties_even();
        if mantissa >= MANTISSA_SCALE {
            // rounded back up to the smallest normal
            return pack(sign, 1, 0);
        }
        return pack(sign, 0, mantissa as u32);
    }

    let mut exponent_field = (exponent + 127) as u32;
    let mut mantissa = ((significand - 1.0) * MANTISSA_SCALE).round_ties_even();
    if mantissa >= MANTISSA_SCALE {
        // mantissa rounded up into the next binade
        mantissa = 0.0;
        exponent_field += 1;
    }
    if exponent_field >= 0xFF {
        return pack(sign, 0xFF, 0);
    }
    pack(sign, exponent_field, mantissa as u32)
}

/// Decodes a single-precision bit pattern back into an `f64`.
///
/// Exponent field 0xFF yields NaN (non-zero mantissa) or a signed
/// infinity; exponent field 0 yields a signed zero or a subnormal.
pub fn decode(bits: u32) -> f64 {
    let sign = if bits & SIGN_MASK != 0 { -1.0 } else { 1.0 };
    let exponent = ((bits >> MANTISSA_BITS) & 0xFF) as i32 - 127;
    let mantissa = bits & MANTISSA_MASK;

    if exponent == 128 {
        if mantissa != 0 {
            return f64::NAN;
        }
        return sign * f64::INFINITY;
    }
    if exponent == -127 {
        if mantissa == 0 {
            return sign * 0.0;
        }
        return sign * (mantissa as f64 / MANTISSA_SCALE) * exp2(-126);
    }
    sign * (1.0 + mantissa as f64 / MANTISSA_SCALE) * exp2(exponent)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn single_rounded(x: f64) -> f64 {
        x as f32 as f64
    }

    #[test]
    fn test_zero_is_exact_and_signed() {
        assert_eq!(encode(0.0), 0x0000_0000);
        assert_eq!(encode(-0.0), 0x8000_0000);
        assert_eq!(decode(encode(0.0)), 0.0);
        assert!(decode(encode(-0.0)).is_sign_negative());
    }

    #[test]
    fn test_infinities_are_exact() {
        assert_eq!(encode(f64::INFINITY), 0x7F80_0000);
        assert_eq!(encode(f64::NEG_INFINITY), 0xFF80_0000);
        assert_eq!(decode(0x7F80_0000), f64::INFINITY);
        assert_eq!(decode(0xFF80_0000), f64::NEG_INFINITY);
    }

    #[test]
    fn test_nan_has_fixed_payload() {
        let bits = encode(f64::NAN);
        assert_eq!(bits, 0x7F80_1337);
        assert!(decode(bits).is_nan());
    }

    #[test]
    fn test_roundtrip_matches_single_precision_rounding() {
        let values = [
            0.3,
            -0.3,
            1.0 / 3.0,
            0.35173364,
            0.6641,
            1.0,
            -1.0,
            0.000123,
            123_456.789,
            -98_765.4321,
            1e-20,
            -1e-20,
            3.4e38,
            std::f64::consts::PI,
        ];
        for &x in &values {
            assert_eq!(decode(encode(x)), single_rounded(x), "value {x}");
        }
    }

    #[test]
    fn test_overflow_rounds_to_infinity() {
        assert_eq!(decode(encode(1e39)), f64::INFINITY);
        assert_eq!(decode(encode(-1e39)), f64::NEG_INFINITY);
    }

    #[test]
    fn test_subnormals_round_like_hardware() {
        for &x in &[1e-40, -1e-40, 1e-44, 1e-46, 2.5e-45] {
            assert_eq!(decode(encode(x)), single_rounded(x), "value {x}");
        }
    }

    #[test]
    fn test_powers_of_two_are_exact() {
        for exponent in -126..=127 {
            let x = (exponent as f64).exp2();
            assert_eq!(decode(encode(x)), x, "2^{exponent}");
        }
    }

    #[test]
    fn test_second_pass_is_idempotent() {
        for &x in &[0.3, -0.77, 440.0, 1e-40, 12345.6789] {
            let once = decode(encode(x));
            assert_eq!(decode(encode(once)), once);
        }
    }
}
