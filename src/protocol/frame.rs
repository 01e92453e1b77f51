//! Validated wire frames.
//!
//! A [`RawFrame`] is one complete frame as it appeared on the wire, already
//! length- and checksum-validated, tagged with the layout it was validated
//! against. Region accessors slice the frame per that layout; no per-family
//! branching happens here or anywhere downstream.

use heapless::Vec;

use crate::error::{LinkError, Result};
use crate::protocol::constants::{Family, Variant, MAX_FRAME_SIZE};
use crate::protocol::layout::{FrameLayout, LORA_LAYOUT};

/// One validated wire frame plus the layout that validated it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawFrame {
    bytes: Vec<u8, MAX_FRAME_SIZE>,
    layout: &'static FrameLayout,
}

impl RawFrame {
    /// Validate `data` as one complete frame of the given layout.
    ///
    /// Checks, in order: the header marker, the minimum structural size for
    /// the layout (which doubles as the variant length discriminator), the
    /// declared length against the actual byte count, and the checksum.
    ///
    /// # Errors
    ///
    /// - `LinkError::Protocol` (invalid frame) for marker/size/length problems
    /// - `LinkError::Protocol` (checksum mismatch) when the trailing byte
    ///   does not match the layout's checksum over its region
    pub fn parse(data: &[u8], layout: &'static FrameLayout) -> Result<Self> {
        if data.len() > MAX_FRAME_SIZE {
            return Err(LinkError::invalid_frame());
        }
        if data.first() != Some(&layout.family.marker()) {
            return Err(LinkError::invalid_frame());
        }
        if data.len() < layout.min_total() {
            // A 7E frame long enough for the LoRa form but not this one
            // fits only the other variant of the family.
            return Err(match layout.family {
                Family::SevenE if data.len() >= LORA_LAYOUT.min_total() => {
                    LinkError::variant_mismatch()
                }
                _ => LinkError::invalid_frame(),
            });
        }
        let length_value = layout.read_length(data).ok_or_else(LinkError::invalid_frame)?;
        if layout.expected_total(length_value) != data.len() {
            return Err(LinkError::invalid_frame());
        }

        let expected = layout.checksum.compute(layout.checksum_region(data));
        let trailing = data[data.len() - 1];
        if expected != trailing {
            return Err(LinkError::checksum_mismatch());
        }

        let mut bytes = Vec::new();
        // Length bounded by MAX_FRAME_SIZE above.
        bytes.extend_from_slice(data).map_err(|_| LinkError::invalid_frame())?;
        Ok(Self { bytes, layout })
    }

    /// The protocol family this frame was validated as.
    #[inline(always)]
    pub const fn family(&self) -> Family {
        self.layout.family
    }

    /// The sub-protocol variant this frame was validated as.
    #[inline(always)]
    pub const fn variant(&self) -> Variant {
        self.layout.variant
    }

    /// The layout used for validation and slicing.
    #[inline(always)]
    pub const fn layout(&self) -> &'static FrameLayout {
        self.layout
    }

    /// The complete frame, header and checksum included.
    #[inline(always)]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// The declared length-field value.
    pub fn length_value(&self) -> usize {
        // Validated in parse(), cannot fail here.
        self.layout.read_length(&self.bytes).unwrap_or(0)
    }

    /// The command region (empty for layouts without one).
    pub fn command(&self) -> &[u8] {
        let start = self.layout.command_offset();
        &self.bytes[start..start + self.layout.command_width]
    }

    /// The network address region (empty for layouts without one).
    pub fn address(&self) -> &[u8] {
        let start = self.layout.address_offset();
        &self.bytes[start..start + self.layout.address_width]
    }

    /// The reserved (unparsed) region.
    pub fn reserved(&self) -> &[u8] {
        let start = self.layout.reserved_offset();
        &self.bytes[start..start + self.layout.reserved_width]
    }

    /// The content region between the header regions and the checksum byte.
    pub fn content(&self) -> &[u8] {
        &self.bytes[self.layout.content_start()..self.bytes.len() - 1]
    }

    /// The trailing checksum byte.
    pub fn checksum(&self) -> u8 {
        self.bytes[self.bytes.len() - 1]
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::protocol::checksum::{complement_sum, xor_checksum};
    use crate::protocol::layout::{DIGI_LAYOUT, FE_LAYOUT, LORA_LAYOUT};

    /// Assemble a valid FE frame around `content`.
    pub(crate) fn fe_frame(command: [u8; 2], content: &[u8]) -> std::vec::Vec<u8> {
        let mut frame = std::vec![0xFE, content.len() as u8];
        frame.extend_from_slice(&command);
        frame.extend_from_slice(content);
        let cks = xor_checksum(&frame[1..]);
        frame.push(cks);
        frame
    }

    /// Assemble a valid Digi frame around `content`.
    pub(crate) fn digi_frame(address: [u8; 8], content: &[u8]) -> std::vec::Vec<u8> {
        let len = 8 + 2 + content.len();
        let mut frame = std::vec![0x7E];
        frame.extend_from_slice(&(len as u16).to_be_bytes());
        frame.extend_from_slice(&address);
        frame.extend_from_slice(&[0x00, 0x00]); // reserved
        frame.extend_from_slice(content);
        let cks = complement_sum(&frame[3..]);
        frame.push(cks);
        frame
    }

    /// Assemble a valid LoRa frame around `content`.
    pub(crate) fn lora_frame(content: &[u8]) -> std::vec::Vec<u8> {
        let len = 4 + content.len();
        let mut frame = std::vec![0x7E];
        frame.extend_from_slice(&(len as u16).to_be_bytes());
        frame.extend_from_slice(&[0x00; 4]); // reserved
        frame.extend_from_slice(content);
        let cks = complement_sum(&frame[1..]);
        frame.push(cks);
        frame
    }

    /// Minimal content: common header with the given function code, plus payload.
    pub(crate) fn content_with(code: u16, payload: &[u8]) -> std::vec::Vec<u8> {
        let mut content = std::vec![
            0x00, 0x2A, // vendor id
            0x01, 0x10, // device type
            0x03, // group
            0x0C, // number
        ];
        content.extend_from_slice(&code.to_be_bytes());
        content.extend_from_slice(payload);
        content
    }

    #[test]
    fn parse_accepts_valid_fe_frame() {
        let content = content_with(0x0201, &[]);
        let bytes = fe_frame([0x00, 0x01], &content);
        let frame = RawFrame::parse(&bytes, &FE_LAYOUT).unwrap();

        assert_eq!(frame.family(), Family::Fe);
        assert_eq!(frame.length_value(), content.len());
        assert_eq!(frame.command(), &[0x00, 0x01]);
        assert!(frame.address().is_empty());
        assert_eq!(frame.content(), content.as_slice());
        assert_eq!(frame.checksum(), *bytes.last().unwrap());
    }

    #[test]
    fn parse_accepts_valid_digi_frame() {
        let content = content_with(0x0201, &[]);
        let addr = [0x00, 0x13, 0xA2, 0x00, 0x41, 0x52, 0x9A, 0xB3];
        let bytes = digi_frame(addr, &content);
        let frame = RawFrame::parse(&bytes, &DIGI_LAYOUT).unwrap();

        assert_eq!(frame.variant(), Variant::Digi);
        assert_eq!(frame.address(), &addr);
        assert_eq!(frame.reserved(), &[0x00, 0x00]);
        assert_eq!(frame.content(), content.as_slice());
    }

    #[test]
    fn parse_accepts_valid_lora_frame() {
        let content = content_with(0x0201, &[]);
        let bytes = lora_frame(&content);
        let frame = RawFrame::parse(&bytes, &LORA_LAYOUT).unwrap();

        assert_eq!(frame.variant(), Variant::Lora);
        assert!(frame.command().is_empty());
        assert!(frame.address().is_empty());
        assert_eq!(frame.reserved().len(), 4);
        assert_eq!(frame.content(), content.as_slice());
    }

    #[test]
    fn parse_rejects_corrupted_checksum() {
        let mut bytes = fe_frame([0x00, 0x01], &content_with(0x0201, &[]));
        let last = bytes.len() - 1;
        bytes[last] ^= 0x01;
        let err = RawFrame::parse(&bytes, &FE_LAYOUT).unwrap_err();
        match err {
            LinkError::Protocol(e) => assert!(e.is_checksum_mismatch()),
            _ => panic!("expected protocol error"),
        }
    }

    #[test]
    fn parse_rejects_any_single_byte_body_corruption() {
        let bytes = fe_frame([0x00, 0x01], &content_with(0x0101, &[0u8; 14]));
        for i in 1..bytes.len() - 1 {
            let mut mutated = bytes.clone();
            mutated[i] ^= 0x40;
            assert!(
                RawFrame::parse(&mutated, &FE_LAYOUT).is_err(),
                "corruption at {i} not detected"
            );
        }
    }

    #[test]
    fn parse_rejects_wrong_marker_and_length() {
        let bytes = fe_frame([0x00, 0x01], &content_with(0x0201, &[]));
        let mut wrong_marker = bytes.clone();
        wrong_marker[0] = 0x7E;
        assert!(RawFrame::parse(&wrong_marker, &FE_LAYOUT).is_err());

        // Truncated by one byte: declared length no longer matches.
        assert!(RawFrame::parse(&bytes[..bytes.len() - 1], &FE_LAYOUT).is_err());
    }

    #[test]
    fn parse_enforces_variant_minimum_as_discriminator() {
        // A frame as short as a LoRa frame fits only the LoRa variant.
        let content = content_with(0x0201, &[]);
        let bytes = lora_frame(&content);
        match RawFrame::parse(&bytes, &DIGI_LAYOUT).unwrap_err() {
            LinkError::Protocol(e) => assert!(e.is_variant_mismatch()),
            other => panic!("expected protocol error, got {other:?}"),
        }
    }
}
