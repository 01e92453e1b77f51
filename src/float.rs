//! IEEE-754 single-precision codec for the 4-byte real-time value field.
//!
//! Real-time data frames carry the measured value as 4 big-endian bytes.
//! Encoding is standard IEEE-754 single precision. Decoding exists in two
//! modes because already-deployed instrument firmware ships a hand-rolled
//! decoder whose exponent handling is off by one (bias 126 instead of 127,
//! computed with an integer shift that degrades at boundary exponents) and
//! that treats an all-zero fraction as a zero mantissa:
//!
//! ```text
//! Byte 0: SEEE EEEE
//! Byte 1: EMMM MMMM
//! Byte 2: MMMM MMMM
//! Byte 3: MMMM MMMM
//!
//! S = Sign bit (0 = positive, 1 = negative)
//! E = Biased exponent (8 bits)
//! M = Fraction (23 bits)
//! ```
//!
//! - [`FloatDecodeMode::Ieee754`] - corrected, standards-compliant decode
//!   (bias 127, denormals, infinities, NaN).
//! - [`FloatDecodeMode::Legacy`] - bit-exact reproduction of the deployed
//!   decoder, for interoperability with instruments calibrated against it.
//!
//! The mode is part of the session configuration; the engine never picks one
//! silently.

/// Decode mode for the 4-byte real-time value field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum FloatDecodeMode {
    /// Standards-compliant IEEE-754 single-precision decode.
    Ieee754,
    /// Reproduce the deployed firmware's off-by-one shift-based decode.
    Legacy,
}

const FRACTION_BITS: u32 = 23;
const FRACTION_MASK: u32 = (1 << FRACTION_BITS) - 1;
const EXPONENT_MASK: u32 = 0xFF;
const EXPONENT_BIAS: i32 = 127;
// The deployed decoder's bias, one off from the standard.
const LEGACY_BIAS: i32 = 126;

/// Exact power of two as f64, built from the exponent field directly.
///
/// Valid for the whole exponent range a single-precision value can produce
/// after widening to f64, so no rounding is involved.
fn pow2(exp: i32) -> f64 {
    debug_assert!((-1022..=1023).contains(&exp));
    f64::from_bits(((exp + 1023) as u64) << 52)
}

/// Encode a value as 4 big-endian IEEE-754 single-precision bytes.
///
/// This direction has a single, unambiguous definition.
pub fn encode_f32(value: f32) -> [u8; 4] {
    value.to_be_bytes()
}

/// Decode 4 big-endian bytes into a value using the given mode.
///
/// Total function: every bit pattern decodes to something (possibly
/// infinity or NaN in [`FloatDecodeMode::Ieee754`]).
pub fn decode_f32(bytes: [u8; 4], mode: FloatDecodeMode) -> f32 {
    let bits = u32::from_be_bytes(bytes);
    let sign = if bits >> 31 == 0 { 1.0 } else { -1.0 };
    let exponent = ((bits >> FRACTION_BITS) & EXPONENT_MASK) as i32;
    let fraction = bits & FRACTION_MASK;

    match mode {
        FloatDecodeMode::Ieee754 => decode_ieee754(sign, exponent, fraction),
        FloatDecodeMode::Legacy => decode_legacy(sign, exponent, fraction),
    }
}

fn decode_ieee754(sign: f64, exponent: i32, fraction: u32) -> f32 {
    let frac = f64::from(fraction) / pow2(FRACTION_BITS as i32);
    let value = match exponent {
        // Zero and denormals
        0 => sign * frac * pow2(1 - EXPONENT_BIAS),
        // Infinities and NaN
        255 => {
            if fraction == 0 {
                sign * f64::INFINITY
            } else {
                f64::NAN
            }
        }
        _ => sign * (1.0 + frac) * pow2(exponent - EXPONENT_BIAS),
    };
    value as f32
}

/// The deployed decoder: zero fraction is taken as a zero mantissa (so exact
/// powers of two decode to 0), and the exponent term uses bias 126 with an
/// integer shift clamped to 62 bits, which degrades at boundary exponents.
fn decode_legacy(sign: f64, exponent: i32, fraction: u32) -> f32 {
    let mantissa = if fraction == 0 {
        f64::from(fraction)
    } else {
        1.0 + f64::from(fraction) / pow2(FRACTION_BITS as i32)
    };

    let shift = exponent - LEGACY_BIAS;
    let scale = if shift >= 0 {
        (1u64 << shift.min(62)) as f64
    } else {
        1.0 / (1u64 << (-shift).min(62)) as f64
    };

    (sign * mantissa * scale) as f32
}
