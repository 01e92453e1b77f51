//! Protocol variant registry.
//!
//! Pure data shared by the decoder and the encoder so the two sides cannot
//! drift apart: one [`FrameLayout`] per (family, variant) describing the
//! frame's header regions and checksum boundary, plus one [`FieldSpec`]
//! table per function code describing the payload.
//!
//! ## Frame Structure
//!
//! ```text
//! FE (vendor ZigBee):
//! ┌──────┬────────┬─────────┬───────────────┬───────┐
//! │ 0xFE │ len(1) │ cmd(2)  │    content    │ cks(1)│   total = len + 5
//! └──────┴────────┴─────────┴───────────────┴───────┘
//!
//! 7E Digi:
//! ┌──────┬────────┬─────────┬────────┬──────────┬───────┐
//! │ 0x7E │ len(2) │ addr(8) │ rsv(2) │ content  │ cks(1)│   total = len + 4
//! └──────┴────────┴─────────┴────────┴──────────┴───────┘
//!
//! 7E LoRa:
//! ┌──────┬────────┬────────┬──────────┬───────┐
//! │ 0x7E │ len(2) │ rsv(4) │ content  │ cks(1)│   total = len + 4
//! └──────┴────────┴────────┴──────────┴───────┘
//! ```
//!
//! `content` always starts with the common header: vendor id (2), device
//! type (2), group (1), number (1), function code (2).

use crate::protocol::checksum::ChecksumKind;
use crate::protocol::constants::{
    Family, Variant, CONTENT_HEADER_SIZE, FE_FIXED_OFFSET, FUNCTION_ACK_BASIC_INFO,
    FUNCTION_ACK_REAL_TIME, FUNCTION_BASIC_INFO, FUNCTION_CONNECT, FUNCTION_DESCRIBE_CALIBRATION,
    FUNCTION_DISCONNECT, FUNCTION_PARAMETER_CALIBRATION, FUNCTION_READ_REQUEST,
    FUNCTION_REAL_TIME_DATA, SEVEN_E_FIXED_OFFSET,
};

// =============================================================================
// Frame Layouts
// =============================================================================

/// Byte offsets and widths of one (family, variant) frame form.
///
/// Immutable, defined once as `const` data, consumed read-only by the
/// reassembler, the decoder and the encoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FrameLayout {
    /// Protocol family this layout belongs to
    pub family: Family,
    /// Sub-protocol variant
    pub variant: Variant,
    /// Width of the length field in bytes (1 for FE, 2 big-endian for 7E)
    pub length_width: usize,
    /// Added to the length value to obtain the total frame size
    pub fixed_offset: usize,
    /// Width of the command region (FE only)
    pub command_width: usize,
    /// Width of the network address region (Digi only)
    pub address_width: usize,
    /// Width of the reserved (unparsed) region
    pub reserved_width: usize,
    /// Checksum engine for this layout
    pub checksum: ChecksumKind,
    /// Whether the checksum region includes the length field
    pub checksum_covers_length: bool,
}

/// FE family layout (vendor ZigBee).
pub const FE_LAYOUT: FrameLayout = FrameLayout {
    family: Family::Fe,
    variant: Variant::Generic,
    length_width: 1,
    fixed_offset: FE_FIXED_OFFSET,
    command_width: 2,
    address_width: 0,
    reserved_width: 0,
    checksum: ChecksumKind::Xor,
    checksum_covers_length: true,
};

/// 7E Digi ZigBee layout.
pub const DIGI_LAYOUT: FrameLayout = FrameLayout {
    family: Family::SevenE,
    variant: Variant::Digi,
    length_width: 2,
    fixed_offset: SEVEN_E_FIXED_OFFSET,
    command_width: 0,
    address_width: 8,
    reserved_width: 2,
    checksum: ChecksumKind::ComplementSum,
    checksum_covers_length: false,
};

/// 7E LoRa transparent-mode layout. No command, no address; the checksum
/// region includes the length field (the LoRa boundary difference).
pub const LORA_LAYOUT: FrameLayout = FrameLayout {
    family: Family::SevenE,
    variant: Variant::Lora,
    length_width: 2,
    fixed_offset: SEVEN_E_FIXED_OFFSET,
    command_width: 0,
    address_width: 0,
    reserved_width: 4,
    checksum: ChecksumKind::ComplementSum,
    checksum_covers_length: true,
};

/// Select the layout for a (family, sticky variant) pair.
///
/// The variant only discriminates within the 7E family; for FE the single
/// layout is returned regardless, and a 7E session that never completed a
/// handshake (`Variant::Generic`) is treated as Digi.
pub const fn layout_for(family: Family, variant: Variant) -> &'static FrameLayout {
    match (family, variant) {
        (Family::Fe, _) => &FE_LAYOUT,
        (Family::SevenE, Variant::Lora) => &LORA_LAYOUT,
        (Family::SevenE, _) => &DIGI_LAYOUT,
    }
}

impl FrameLayout {
    /// Offset of the command region.
    pub const fn command_offset(&self) -> usize {
        1 + self.length_width
    }

    /// Offset of the network address region.
    pub const fn address_offset(&self) -> usize {
        self.command_offset() + self.command_width
    }

    /// Offset of the reserved region.
    pub const fn reserved_offset(&self) -> usize {
        self.address_offset() + self.address_width
    }

    /// Offset of the first content byte.
    pub const fn content_start(&self) -> usize {
        self.reserved_offset() + self.reserved_width
    }

    /// Smallest structurally valid total frame size for this layout:
    /// header regions, the common content header, and the checksum byte.
    /// Doubles as the frame-length discriminator between variants.
    pub const fn min_total(&self) -> usize {
        self.content_start() + CONTENT_HEADER_SIZE + 1
    }

    /// Total frame size declared by a length-field value.
    pub const fn expected_total(&self, length_value: usize) -> usize {
        length_value + self.fixed_offset
    }

    /// Length-field value for a frame of `total` bytes.
    pub const fn length_value(&self, total: usize) -> usize {
        total - self.fixed_offset
    }

    /// Read the big-endian length field from a frame that starts at the
    /// marker. Returns `None` if fewer than `1 + length_width` bytes are
    /// available.
    pub fn read_length(&self, data: &[u8]) -> Option<usize> {
        if data.len() < 1 + self.length_width {
            return None;
        }
        let value = match self.length_width {
            1 => usize::from(data[1]),
            _ => usize::from(u16::from_be_bytes([data[1], data[2]])),
        };
        Some(value)
    }

    /// The checksum region of a complete frame: everything between the
    /// header byte and the trailing checksum byte, minus the length field
    /// when this layout excludes it.
    pub fn checksum_region<'a>(&self, frame: &'a [u8]) -> &'a [u8] {
        let start = if self.checksum_covers_length {
            1
        } else {
            1 + self.length_width
        };
        &frame[start..frame.len() - 1]
    }
}

// =============================================================================
// Content Header Offsets
// =============================================================================

/// Offset of the vendor id inside the content region.
pub const VENDOR_ID_OFFSET: usize = 0;
/// Offset of the device type inside the content region.
pub const DEVICE_TYPE_OFFSET: usize = 2;
/// Offset of the group byte inside the content region.
pub const GROUP_OFFSET: usize = 4;
/// Offset of the device number inside the content region.
pub const NUMBER_OFFSET: usize = 5;
/// Offset of the function code inside the content region.
pub const FUNCTION_CODE_OFFSET: usize = 6;

// =============================================================================
// Payload Field Tables
// =============================================================================

/// How a payload field's bytes are interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FieldKind {
    /// Raw big-endian unsigned integer
    Uint,
    /// ASCII hex digits parsed to an unsigned integer
    HexUint,
    /// Fixed-width text, space padded
    Text,
    /// 4-byte big-endian IEEE-754 single-precision value
    Float,
}

/// One named payload field: offset and width relative to the payload start
/// (the first byte after the common content header).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FieldSpec {
    /// Field name as surfaced in decoded frames
    pub name: &'static str,
    /// Byte offset within the payload
    pub offset: usize,
    /// Byte width
    pub width: usize,
    /// Interpretation of the bytes
    pub kind: FieldKind,
}

const fn field(name: &'static str, offset: usize, width: usize, kind: FieldKind) -> FieldSpec {
    FieldSpec {
        name,
        offset,
        width,
        kind,
    }
}

/// Real-time measurement report payload.
pub const REAL_TIME_DATA_FIELDS: &[FieldSpec] = &[
    field("success_rate", 0, 1, FieldKind::Uint),
    field("battery", 1, 1, FieldKind::Uint),
    field("sleep_seconds", 2, 2, FieldKind::Uint),
    field("status", 4, 2, FieldKind::Uint),
    field("uptime", 6, 4, FieldKind::Uint),
    field("value", 10, 4, FieldKind::Float),
];

/// Static device description payload.
pub const BASIC_INFO_FIELDS: &[FieldSpec] = &[
    field("model", 0, 16, FieldKind::Text),
    field("serial", 16, 8, FieldKind::HexUint),
    field("firmware", 24, 8, FieldKind::Text),
    field("range", 32, 8, FieldKind::Text),
    field("accuracy", 40, 8, FieldKind::Text),
    field("protection", 48, 8, FieldKind::Text),
    field("explosion_grade", 56, 8, FieldKind::Text),
    field("description", 64, 32, FieldKind::Text),
];

/// Single status byte, shared by acknowledgements and connect/disconnect.
pub const STATUS_FIELDS: &[FieldSpec] = &[field("status", 0, 1, FieldKind::Uint)];

/// Calibration description payload (five free-text sub-fields).
pub const DESCRIBE_FIELDS: &[FieldSpec] = &[
    field("model", 0, 16, FieldKind::Text),
    field("serial", 16, 16, FieldKind::Text),
    field("ip_rating", 32, 8, FieldKind::Text),
    field("explosion_grade", 40, 8, FieldKind::Text),
    field("description", 48, 32, FieldKind::Text),
];

/// Calibration parameter payload.
pub const CALIBRATION_FIELDS: &[FieldSpec] = &[
    field("param_index", 0, 1, FieldKind::Uint),
    field("unit", 1, 8, FieldKind::Text),
    field("value", 9, 4, FieldKind::Float),
];

/// Field table for a raw function code. Unknown codes have no table.
pub const fn payload_fields(code: u16) -> Option<&'static [FieldSpec]> {
    match code {
        FUNCTION_REAL_TIME_DATA => Some(REAL_TIME_DATA_FIELDS),
        FUNCTION_BASIC_INFO => Some(BASIC_INFO_FIELDS),
        FUNCTION_READ_REQUEST => Some(&[]),
        FUNCTION_ACK_REAL_TIME | FUNCTION_ACK_BASIC_INFO | FUNCTION_CONNECT
        | FUNCTION_DISCONNECT => Some(STATUS_FIELDS),
        FUNCTION_DESCRIBE_CALIBRATION => Some(DESCRIBE_FIELDS),
        FUNCTION_PARAMETER_CALIBRATION => Some(CALIBRATION_FIELDS),
        _ => None,
    }
}

/// Total payload width of a field table.
pub fn payload_size(fields: &[FieldSpec]) -> usize {
    fields.iter().map(|f| f.offset + f.width).max().unwrap_or(0)
}

/// Find a field by name within a table.
pub fn field_by_name(fields: &'static [FieldSpec], name: &str) -> Option<&'static FieldSpec> {
    fields.iter().find(|f| f.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_selection() {
        assert_eq!(layout_for(Family::Fe, Variant::Digi), &FE_LAYOUT);
        assert_eq!(layout_for(Family::SevenE, Variant::Digi), &DIGI_LAYOUT);
        assert_eq!(layout_for(Family::SevenE, Variant::Lora), &LORA_LAYOUT);
    }

    #[test]
    fn fe_offsets() {
        assert_eq!(FE_LAYOUT.command_offset(), 2);
        assert_eq!(FE_LAYOUT.content_start(), 4);
        assert_eq!(FE_LAYOUT.min_total(), 13);
        assert_eq!(FE_LAYOUT.expected_total(14), 19);
        assert_eq!(FE_LAYOUT.length_value(19), 14);
    }

    #[test]
    fn digi_offsets() {
        assert_eq!(DIGI_LAYOUT.address_offset(), 3);
        assert_eq!(DIGI_LAYOUT.reserved_offset(), 11);
        assert_eq!(DIGI_LAYOUT.content_start(), 13);
        assert_eq!(DIGI_LAYOUT.min_total(), 22);
    }

    #[test]
    fn lora_offsets() {
        assert_eq!(LORA_LAYOUT.content_start(), 7);
        assert_eq!(LORA_LAYOUT.min_total(), 16);
    }

    #[test]
    fn read_length_per_family() {
        assert_eq!(FE_LAYOUT.read_length(&[0xFE, 0x0E]), Some(14));
        assert_eq!(FE_LAYOUT.read_length(&[0xFE]), None);
        assert_eq!(DIGI_LAYOUT.read_length(&[0x7E, 0x01, 0x02]), Some(0x0102));
        assert_eq!(DIGI_LAYOUT.read_length(&[0x7E, 0x01]), None);
    }

    #[test]
    fn checksum_region_boundaries() {
        let frame = [0xFE, 0x01, 0x02, 0x03, 0x04, 0x05];
        // FE covers everything between header and checksum.
        assert_eq!(FE_LAYOUT.checksum_region(&frame), &frame[1..5]);
        // Digi excludes the two length bytes.
        assert_eq!(DIGI_LAYOUT.checksum_region(&frame), &frame[3..5]);
        // LoRa includes them again.
        assert_eq!(LORA_LAYOUT.checksum_region(&frame), &frame[1..5]);
    }

    #[test]
    fn payload_tables_are_contiguous() {
        for fields in [
            REAL_TIME_DATA_FIELDS,
            BASIC_INFO_FIELDS,
            DESCRIBE_FIELDS,
            CALIBRATION_FIELDS,
        ] {
            let mut expected = 0;
            for f in fields {
                assert_eq!(f.offset, expected, "gap before {}", f.name);
                expected += f.width;
            }
        }
        assert_eq!(payload_size(REAL_TIME_DATA_FIELDS), 14);
        assert_eq!(payload_size(BASIC_INFO_FIELDS), 96);
        assert_eq!(payload_size(DESCRIBE_FIELDS), 80);
        assert_eq!(payload_size(CALIBRATION_FIELDS), 13);
    }

    #[test]
    fn table_lookup_by_code() {
        assert_eq!(payload_fields(0x0101), Some(REAL_TIME_DATA_FIELDS));
        assert_eq!(payload_fields(0x0201), Some(&[] as &[FieldSpec]));
        assert_eq!(payload_fields(0x05FF), None);
    }
}
