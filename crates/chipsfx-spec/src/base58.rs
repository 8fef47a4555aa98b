//! Base58 share-string codec.
//!
//! A parameter set packs into a fixed 89-byte payload: one wave shape byte
//! followed by 22 little-endian 32-bit float patterns in wire order. The
//! payload is rendered with the Bitcoin-style base58 alphabet (no `0`,
//! `O`, `I`, or `l`), each leading zero byte becoming a literal `1`.
//! Strings may carry a leading `#` in external form; it is stripped on
//! decode and never emitted here.

use crate::error::{SpecError, SpecResult};
use crate::float32;
use crate::params::{RawParameterSet, WaveShape, FLOAT_FIELD_COUNT};

/// The 58-symbol alphabet, in digit-value order.
pub const ALPHABET: &[u8; 58] =
    b"123456789ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnopqrstuvwxyz";

/// Payload length in bytes: wave shape byte plus four bytes per float.
pub const PAYLOAD_LEN: usize = 1 + FLOAT_FIELD_COUNT * 4;

fn digit_value(ch: char) -> Option<u32> {
    ALPHABET
        .iter()
        .position(|&symbol| symbol as char == ch)
        .map(|index| index as u32)
}

/// Encodes a byte array as a base58 string.
///
/// Big-integer encoding: the bytes are treated as one big-endian number
/// and repeatedly divided by 58. Each leading zero byte is preserved as a
/// literal alphabet-index-0 character.
pub fn encode_bytes(input: &[u8]) -> String {
    let zeros = input.iter().take_while(|&&byte| byte == 0).count();

    // base58 digits, least significant first
    let mut digits: Vec<u8> = Vec::with_capacity(input.len() * 138 / 100 + 1);
    for &byte in &input[zeros..] {
        let mut carry = byte as u32;
        for digit in digits.iter_mut() {
            carry += (*digit as u32) << 8;
            *digit = (carry % 58) as u8;
            carry /= 58;
        }
        while carry > 0 {
            digits.push((carry % 58) as u8);
            carry /= 58;
        }
    }

    let mut out = String::with_capacity(zeros + digits.len());
    for _ in 0..zeros {
        out.push(ALPHABET[0] as char);
    }
    for &digit in digits.iter().rev() {
        out.push(ALPHABET[digit as usize] as char);
    }
    out
}

/// Decodes a base58 string into its byte array.
///
/// Any character outside the alphabet fails with
/// [`SpecError::InvalidBase58Char`]; the input is never coerced.
pub fn decode_bytes(input: &str) -> SpecResult<Vec<u8>> {
    let mut zeros = 0usize;
    let mut in_leading_zeros = true;

    // payload bytes, least significant first
    let mut bytes: Vec<u8> = Vec::with_capacity(input.len() * 733 / 1000 + 1);
    for (position, ch) in input.chars().enumerate() {
        let value = digit_value(ch).ok_or(SpecError::InvalidBase58Char { ch, position })?;
        if in_leading_zeros {
            if value == 0 {
                zeros += 1;
                continue;
            }
            in_leading_zeros = false;
        }
        let mut carry = value;
        for byte in bytes.iter_mut() {
            carry += *byte as u32 * 58;
            *byte = (carry & 0xFF) as u8;
            carry >>= 8;
        }
        while carry > 0 {
            bytes.push((carry & 0xFF) as u8);
            carry >>= 8;
        }
    }

    let mut out = vec![0u8; zeros];
    out.extend(bytes.iter().rev());
    Ok(out)
}

/// Serializes a parameter set to its base58 share string.
pub fn to_b58(params: &RawParameterSet) -> String {
    let mut payload = Vec::with_capacity(PAYLOAD_LEN);
    payload.push(params.wave_type.code());
    for value in params.wire_floats() {
        payload.extend_from_slice(&float32::encode(value).to_le_bytes());
    }
    encode_bytes(&payload)
}

/// Reconstructs a parameter set from a share string.
///
/// Accepts an optional leading `#`. Fails on characters outside the
/// alphabet, on payloads that are not exactly [`PAYLOAD_LEN`] bytes, and
/// on wave shape codes outside 0-3. Fields not covered by the payload
/// (`sound_vol`, `sample_rate`, `sample_size`) keep their defaults.
pub fn from_b58(input: &str) -> SpecResult<RawParameterSet> {
    let stripped = input.strip_prefix('#').unwrap_or(input);
    let payload = decode_bytes(stripped)?;
    if payload.len() != PAYLOAD_LEN {
        return Err(SpecError::InvalidPayloadLength {
            expected: PAYLOAD_LEN,
            actual: payload.len(),
        });
    }

    let mut params = RawParameterSet {
        wave_type: WaveShape::from_code(payload[0])?,
        ..RawParameterSet::default()
    };
    let mut floats = [0.0f64; FLOAT_FIELD_COUNT];
    for (index, value) in floats.iter_mut().enumerate() {
        let offset = index * 4 + 1;
        let bits = u32::from_le_bytes(
            payload[offset..offset + 4]
                .try_into()
                .expect("payload slice is four bytes"),
        );
        *value = float32::decode(bits);
    }
    params.set_wire_floats(floats);
    Ok(params)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_encode_known_vectors() {
        assert_eq!(encode_bytes(b""), "");
        assert_eq!(encode_bytes(&[0]), "1");
        assert_eq!(encode_bytes(&[0, 0, 1]), "112");
        assert_eq!(encode_bytes(&[57]), "z");
        assert_eq!(encode_bytes(&[58]), "21");
        assert_eq!(encode_bytes(b"hello"), "Cn8eVZg");
    }

    #[test]
    fn test_decode_known_vectors() {
        assert_eq!(decode_bytes("").unwrap(), b"");
        assert_eq!(decode_bytes("1").unwrap(), [0]);
        assert_eq!(decode_bytes("112").unwrap(), [0, 0, 1]);
        assert_eq!(decode_bytes("Cn8eVZg").unwrap(), b"hello");
    }

    #[test]
    fn test_decode_rejects_characters_outside_alphabet() {
        for ch in ['0', 'O', 'I', 'l', ' ', '!', 'é'] {
            let input = format!("2{ch}2");
            let err = decode_bytes(&input).unwrap_err();
            match err {
                SpecError::InvalidBase58Char { ch: found, position } => {
                    assert_eq!(found, ch);
                    assert_eq!(position, 1);
                }
                other => panic!("unexpected error: {other}"),
            }
        }
    }

    #[test]
    fn test_bytes_roundtrip() {
        let cases: [&[u8]; 4] = [
            &[0, 0, 0, 7],
            &[255; 16],
            &[1],
            &[0x13, 0x37, 0x00, 0x42, 0x99],
        ];
        for bytes in cases {
            assert_eq!(decode_bytes(&encode_bytes(bytes)).unwrap(), bytes);
        }
    }

    #[test]
    fn test_share_string_uses_only_alphabet_characters() {
        let mut p = RawParameterSet::default();
        p.p_freq_ramp = -0.42;
        p.p_base_freq = 0.91;
        let encoded = to_b58(&p);
        assert!(!encoded.is_empty());
        assert!(encoded
            .chars()
            .all(|ch| ALPHABET.iter().any(|&symbol| symbol as char == ch)));
    }

    #[test]
    fn test_share_string_roundtrip_is_idempotent_after_first_pass() {
        let mut p = RawParameterSet::default();
        p.wave_type = WaveShape::Sawtooth;
        p.p_base_freq = 1.0 / 3.0;
        p.p_freq_ramp = -0.123456789;
        p.p_lpf_resonance = 0.999;

        let first = to_b58(&p);
        let decoded = from_b58(&first).unwrap();
        // every field equals the single-precision rounding of the original
        assert_eq!(decoded.p_base_freq, (1.0f32 / 3.0f32) as f64);
        assert_eq!(decoded.p_freq_ramp, (-0.123456789f32) as f64);
        assert_eq!(to_b58(&decoded), first);
    }

    #[test]
    fn test_from_b58_accepts_hash_prefix() {
        let p = RawParameterSet::default();
        let encoded = to_b58(&p);
        let with_prefix = format!("#{encoded}");
        assert_eq!(from_b58(&with_prefix).unwrap(), from_b58(&encoded).unwrap());
    }

    #[test]
    fn test_from_b58_rejects_wrong_payload_length() {
        let err = from_b58("2222").unwrap_err();
        assert!(matches!(err, SpecError::InvalidPayloadLength { .. }));
    }

    #[test]
    fn test_default_payload_leading_zero_byte_survives() {
        // default wave shape is Square (code 0), so the payload starts
        // with a zero byte that must come back intact
        let p = RawParameterSet::default();
        let decoded = from_b58(&to_b58(&p)).unwrap();
        assert_eq!(decoded.wave_type, WaveShape::Square);
    }

    #[test]
    fn test_wire_offsets_match_declared_layout() {
        let mut p = RawParameterSet::default();
        p.p_env_sustain = 0.5;
        let mut payload = Vec::new();
        payload.push(p.wave_type.code());
        for value in p.wire_floats() {
            payload.extend_from_slice(&crate::float32::encode(value).to_le_bytes());
        }
        assert_eq!(payload.len(), PAYLOAD_LEN);
        // p_env_sustain is float field 1, so its pattern sits at bytes 5..9
        let bits = u32::from_le_bytes(payload[5..9].try_into().unwrap());
        assert_eq!(crate::float32::decode(bits), 0.5);
    }
}
