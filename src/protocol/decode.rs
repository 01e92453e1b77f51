//! Table-driven frame decoding.
//!
//! Decoding is fail-soft below the frame level: a [`RawFrame`] has already
//! passed structural and checksum validation, so everything in it is worth
//! surfacing even when individual payload fields are damaged. Field-level
//! problems become [`FieldValue::Invalid`] entries instead of errors, and an
//! unrecognized function code produces a frame with the common header and an
//! empty field list.

use heapless::{String, Vec};

use crate::addressing::{DeviceId, NetworkAddress};
use crate::error::Result;
use crate::float::{decode_f32, FloatDecodeMode};
use crate::protocol::constants::{Family, FunctionCode, Variant, CONTENT_HEADER_SIZE, FIELD_TEXT_MAX};
use crate::protocol::frame::RawFrame;
use crate::protocol::layout::{
    payload_fields, FieldKind, FieldSpec, DEVICE_TYPE_OFFSET, FUNCTION_CODE_OFFSET, GROUP_OFFSET,
    NUMBER_OFFSET, VENDOR_ID_OFFSET,
};

/// Upper bound on decoded fields per frame (the widest payload table).
pub const MAX_DECODED_FIELDS: usize = 8;

/// Function code of a decoded frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum FunctionCodeInfo {
    /// A code with a registered payload table.
    Known(FunctionCode),
    /// A structurally valid frame carrying a code this engine does not know.
    Unrecognized(u16),
}

impl FunctionCodeInfo {
    /// The raw 16-bit code either way.
    pub const fn raw(&self) -> u16 {
        match self {
            Self::Known(code) => code.to_u16(),
            Self::Unrecognized(raw) => *raw,
        }
    }
}

/// Why a field could not be decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum FieldIssue {
    /// The payload ended before the field's declared extent.
    Truncated,
    /// An ASCII-hex numeric field held non-hex bytes.
    MalformedNumeric,
    /// A text field held bytes that are not valid UTF-8.
    MalformedText,
}

/// Decoded value of one payload field.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum FieldValue {
    /// Big-endian unsigned integer (raw or parsed from ASCII hex).
    Uint(u64),
    /// IEEE-754 single-precision value, possibly NaN or infinite.
    Float(f32),
    /// Fixed-width text with trailing padding stripped.
    Text(String<FIELD_TEXT_MAX>),
    /// The field's bytes could not be interpreted.
    Invalid(FieldIssue),
}

/// One named, decoded payload field.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct DecodedField {
    pub name: &'static str,
    pub value: FieldValue,
}

/// Fully decoded inbound frame.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct DecodedFrame {
    /// Protocol family the frame arrived on.
    pub family: Family,
    /// Variant the frame was validated as.
    pub variant: Variant,
    /// FE command word, absent for 7E frames.
    pub command: Option<u16>,
    /// Source network address, present only on Digi frames.
    pub address: Option<NetworkAddress>,
    /// Vendor id from the common content header.
    pub vendor_id: u16,
    /// Device type from the common content header.
    pub device_type: u16,
    /// Reporting device (group/number).
    pub device: DeviceId,
    /// Function code, known or not.
    pub function: FunctionCodeInfo,
    /// Decoded payload fields, empty for unrecognized codes.
    pub fields: Vec<DecodedField, MAX_DECODED_FIELDS>,
}

impl DecodedFrame {
    /// Look up a decoded field by name.
    pub fn field(&self, name: &str) -> Option<&FieldValue> {
        self.fields.iter().find(|f| f.name == name).map(|f| &f.value)
    }
}

/// Decode a validated frame into its typed representation.
///
/// # Errors
///
/// Only an address region of unexpected size produces an error; payload
/// damage is reported per field and unknown function codes decode to an
/// empty field list.
pub fn decode(frame: &RawFrame, float_mode: FloatDecodeMode) -> Result<DecodedFrame> {
    let content = frame.content();
    // min_total() guarantees the common header is present.
    let vendor_id = u16::from_be_bytes([content[VENDOR_ID_OFFSET], content[VENDOR_ID_OFFSET + 1]]);
    let device_type =
        u16::from_be_bytes([content[DEVICE_TYPE_OFFSET], content[DEVICE_TYPE_OFFSET + 1]]);
    let device = DeviceId::new(content[GROUP_OFFSET], content[NUMBER_OFFSET]);
    let raw_code = u16::from_be_bytes([
        content[FUNCTION_CODE_OFFSET],
        content[FUNCTION_CODE_OFFSET + 1],
    ]);

    let command = frame
        .command()
        .try_into()
        .ok()
        .map(u16::from_be_bytes);
    let address = match frame.address() {
        [] => None,
        bytes => Some(NetworkAddress::parse(bytes)?),
    };

    let function = match FunctionCode::from_u16(raw_code) {
        Some(code) => FunctionCodeInfo::Known(code),
        None => FunctionCodeInfo::Unrecognized(raw_code),
    };

    let payload = &content[CONTENT_HEADER_SIZE..];
    let mut fields = Vec::new();
    if let Some(table) = payload_fields(raw_code) {
        for spec in table {
            let value = decode_field(spec, payload, float_mode);
            // Table sizes are bounded by MAX_DECODED_FIELDS.
            let _ = fields.push(DecodedField {
                name: spec.name,
                value,
            });
        }
    }

    Ok(DecodedFrame {
        family: frame.family(),
        variant: frame.variant(),
        command,
        address,
        vendor_id,
        device_type,
        device,
        function,
        fields,
    })
}

fn decode_field(spec: &FieldSpec, payload: &[u8], float_mode: FloatDecodeMode) -> FieldValue {
    let end = spec.offset + spec.width;
    if end > payload.len() {
        return FieldValue::Invalid(FieldIssue::Truncated);
    }
    let bytes = &payload[spec.offset..end];
    match spec.kind {
        FieldKind::Uint => FieldValue::Uint(read_uint(bytes)),
        FieldKind::HexUint => decode_hex_uint(bytes),
        FieldKind::Text => decode_text(bytes),
        FieldKind::Float => {
            // Float fields are always 4 bytes wide in the tables.
            let raw = [bytes[0], bytes[1], bytes[2], bytes[3]];
            FieldValue::Float(decode_f32(raw, float_mode))
        }
    }
}

fn read_uint(bytes: &[u8]) -> u64 {
    bytes.iter().fold(0u64, |acc, b| (acc << 8) | u64::from(*b))
}

/// Parse an ASCII-hex numeric field, tolerating space and NUL padding.
fn decode_hex_uint(bytes: &[u8]) -> FieldValue {
    let trimmed = trim_padding(bytes);
    if trimmed.is_empty() {
        return FieldValue::Invalid(FieldIssue::MalformedNumeric);
    }
    let mut value = 0u64;
    for b in trimmed {
        let digit = match b {
            b'0'..=b'9' => b - b'0',
            b'a'..=b'f' => b - b'a' + 10,
            b'A'..=b'F' => b - b'A' + 10,
            _ => return FieldValue::Invalid(FieldIssue::MalformedNumeric),
        };
        value = (value << 4) | u64::from(digit);
    }
    FieldValue::Uint(value)
}

fn decode_text(bytes: &[u8]) -> FieldValue {
    let trimmed = trim_padding(bytes);
    match core::str::from_utf8(trimmed) {
        // Table widths never exceed FIELD_TEXT_MAX, push cannot fail.
        Ok(text) => {
            let mut out = String::new();
            let _ = out.push_str(text);
            FieldValue::Text(out)
        }
        Err(_) => FieldValue::Invalid(FieldIssue::MalformedText),
    }
}

fn trim_padding(bytes: &[u8]) -> &[u8] {
    let start = bytes
        .iter()
        .position(|b| *b != b' ' && *b != 0)
        .unwrap_or(bytes.len());
    let end = bytes
        .iter()
        .rposition(|b| *b != b' ' && *b != 0)
        .map_or(start, |i| i + 1);
    &bytes[start..end]
}
