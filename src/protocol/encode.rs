//! Outbound frame construction.
//!
//! Every builder goes through one [`build_frame`] path driven by the same
//! [`FrameLayout`](crate::protocol::layout::FrameLayout) and field tables the
//! decoder uses, so a frame we build always re-parses under the layout it was
//! built for. Replies are addressed with a [`PeerInfo`] snapshot taken from
//! the last decoded inbound frame.

use heapless::Vec;

use crate::addressing::{DeviceId, NetworkAddress};
use crate::error::{LinkError, Result};
use crate::float::encode_f32;
use crate::protocol::constants::{
    Family, Variant, CONTENT_HEADER_SIZE, FUNCTION_ACK_BASIC_INFO, FUNCTION_ACK_REAL_TIME,
    FUNCTION_CONNECT, FUNCTION_DESCRIBE_CALIBRATION, FUNCTION_DISCONNECT,
    FUNCTION_PARAMETER_CALIBRATION, MAX_FRAME_SIZE,
};
use crate::protocol::decode::DecodedFrame;
use crate::protocol::layout::{
    field_by_name, layout_for, CALIBRATION_FIELDS, DESCRIBE_FIELDS,
};

/// Addressing snapshot of the device on the far end of the link.
///
/// Captured from a decoded inbound frame; holds everything a reply frame
/// needs to be routed and attributed correctly.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PeerInfo {
    /// Family to reply on.
    pub family: Family,
    /// Variant to reply as.
    pub variant: Variant,
    /// Destination network address (Digi frames only).
    pub address: Option<NetworkAddress>,
    /// Vendor id echoed into the reply's content header.
    pub vendor_id: u16,
    /// Device type echoed into the reply's content header.
    pub device_type: u16,
    /// Device the reply is addressed to.
    pub device: DeviceId,
    /// FE command word echoed into the reply's command region.
    pub command: Option<u16>,
}

impl PeerInfo {
    /// Snapshot the addressing of a decoded inbound frame.
    pub fn from_decoded(frame: &DecodedFrame) -> Self {
        Self {
            family: frame.family,
            variant: frame.variant,
            address: frame.address,
            vendor_id: frame.vendor_id,
            device_type: frame.device_type,
            device: frame.device,
            command: frame.command,
        }
    }
}

/// Free-text calibration description sent with
/// [`build_describe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DescribeInfo<'a> {
    pub model: &'a str,
    pub serial: &'a str,
    pub ip_rating: &'a str,
    pub explosion_grade: &'a str,
    pub description: &'a str,
}

/// Acknowledge a real-time data report.
pub fn build_ack_real_time(peer: &PeerInfo, status: u8) -> Result<Vec<u8, MAX_FRAME_SIZE>> {
    build_frame(peer, FUNCTION_ACK_REAL_TIME, &[status])
}

/// Acknowledge a basic-info report.
pub fn build_ack_basic_info(peer: &PeerInfo, status: u8) -> Result<Vec<u8, MAX_FRAME_SIZE>> {
    build_frame(peer, FUNCTION_ACK_BASIC_INFO, &[status])
}

/// Accept or reject a connection request.
pub fn build_connect(peer: &PeerInfo, status: u8) -> Result<Vec<u8, MAX_FRAME_SIZE>> {
    build_frame(peer, FUNCTION_CONNECT, &[status])
}

/// Acknowledge a disconnection.
pub fn build_disconnect(peer: &PeerInfo, status: u8) -> Result<Vec<u8, MAX_FRAME_SIZE>> {
    build_frame(peer, FUNCTION_DISCONNECT, &[status])
}

/// Send a calibration description (five fixed-width text fields).
///
/// # Errors
///
/// `LinkError::Capacity` when any text exceeds its field width.
pub fn build_describe(peer: &PeerInfo, info: &DescribeInfo<'_>) -> Result<Vec<u8, MAX_FRAME_SIZE>> {
    let mut payload: Vec<u8, MAX_FRAME_SIZE> = Vec::new();
    for (name, text) in [
        ("model", info.model),
        ("serial", info.serial),
        ("ip_rating", info.ip_rating),
        ("explosion_grade", info.explosion_grade),
        ("description", info.description),
    ] {
        // Names mirror the field table; lookup cannot miss.
        let width = field_by_name(DESCRIBE_FIELDS, name)
            .ok_or_else(LinkError::invalid_frame)?
            .width;
        push_text(&mut payload, text, width)?;
    }
    build_frame(peer, FUNCTION_DESCRIBE_CALIBRATION, &payload)
}

/// Send one calibration parameter.
///
/// # Errors
///
/// `LinkError::Capacity` when `unit` exceeds its field width.
pub fn build_calibrate(
    peer: &PeerInfo,
    param_index: u8,
    unit: &str,
    value: f32,
) -> Result<Vec<u8, MAX_FRAME_SIZE>> {
    let unit_width = field_by_name(CALIBRATION_FIELDS, "unit")
        .ok_or_else(LinkError::invalid_frame)?
        .width;
    let mut payload: Vec<u8, MAX_FRAME_SIZE> = Vec::new();
    push_byte(&mut payload, param_index)?;
    push_text(&mut payload, unit, unit_width)?;
    push_slice(&mut payload, &encode_f32(value))?;
    build_frame(peer, FUNCTION_PARAMETER_CALIBRATION, &payload)
}

/// Assemble one complete frame for the peer's layout: header regions, the
/// common content header, `payload`, and the trailing checksum.
///
/// # Errors
///
/// - `LinkError::Protocol` (payload too large) when the frame would exceed
///   [`MAX_FRAME_SIZE`]
/// - `LinkError::Protocol` (invalid address) when the layout requires a
///   network address the peer does not have
/// - `LinkError::Session` when the layout requires a command word the peer
///   snapshot does not carry
pub fn build_frame(
    peer: &PeerInfo,
    function: u16,
    payload: &[u8],
) -> Result<Vec<u8, MAX_FRAME_SIZE>> {
    let layout = layout_for(peer.family, peer.variant);
    let total = layout.content_start() + CONTENT_HEADER_SIZE + payload.len() + 1;
    if total > MAX_FRAME_SIZE {
        return Err(LinkError::payload_too_large());
    }

    let mut frame: Vec<u8, MAX_FRAME_SIZE> = Vec::new();
    push_byte(&mut frame, layout.family.marker())?;

    let length_value = layout.length_value(total);
    match layout.length_width {
        1 => push_byte(&mut frame, length_value as u8)?,
        _ => push_slice(&mut frame, &(length_value as u16).to_be_bytes())?,
    }

    if layout.command_width == 2 {
        let command = peer.command.ok_or_else(LinkError::not_associated)?;
        push_slice(&mut frame, &command.to_be_bytes())?;
    }
    if layout.address_width == 8 {
        let address = peer.address.ok_or_else(LinkError::invalid_address)?;
        push_slice(&mut frame, address.as_bytes())?;
    }
    for _ in 0..layout.reserved_width {
        push_byte(&mut frame, 0)?;
    }

    push_slice(&mut frame, &peer.vendor_id.to_be_bytes())?;
    push_slice(&mut frame, &peer.device_type.to_be_bytes())?;
    push_byte(&mut frame, peer.device.group())?;
    push_byte(&mut frame, peer.device.number())?;
    push_slice(&mut frame, &function.to_be_bytes())?;
    push_slice(&mut frame, payload)?;

    // Placeholder participates only as the excluded trailing byte.
    push_byte(&mut frame, 0)?;
    let checksum = layout.checksum.compute(layout.checksum_region(&frame));
    let last = frame.len() - 1;
    frame[last] = checksum;
    Ok(frame)
}

/// Space-pad `text` to `width` bytes.
fn push_text(buf: &mut Vec<u8, MAX_FRAME_SIZE>, text: &str, width: usize) -> Result<()> {
    let bytes = text.as_bytes();
    if bytes.len() > width {
        return Err(LinkError::text_too_long());
    }
    push_slice(buf, bytes)?;
    for _ in bytes.len()..width {
        push_byte(buf, b' ')?;
    }
    Ok(())
}

fn push_byte(buf: &mut Vec<u8, MAX_FRAME_SIZE>, byte: u8) -> Result<()> {
    buf.push(byte).map_err(|_| LinkError::buffer_too_small())
}

fn push_slice(buf: &mut Vec<u8, MAX_FRAME_SIZE>, bytes: &[u8]) -> Result<()> {
    buf.extend_from_slice(bytes)
        .map_err(|_| LinkError::buffer_too_small())
}
