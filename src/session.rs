//! Per-connection session state.
//!
//! The engine is stateless apart from two things scoped to one open
//! connection: the reassembler's carry-over and the peer snapshot taken from
//! the last decoded inbound frame. [`LinkSession`] owns both, plus the
//! configuration the caller fixes at connection time (the sticky 7E variant
//! and the float decode mode). `feed` must be called from a single logical
//! receive sequence; decoding and encoding themselves are pure.

use heapless::Vec;

use crate::error::{LinkError, Result};
use crate::float::FloatDecodeMode;
use crate::link_log;
use crate::protocol::constants::{Variant, MAX_FRAMES_PER_FEED, MAX_FRAME_SIZE};
use crate::protocol::decode::{decode, DecodedFrame};
use crate::protocol::encode::{
    build_ack_basic_info, build_ack_real_time, build_calibrate, build_connect, build_describe,
    build_disconnect, DescribeInfo, PeerInfo,
};
use crate::protocol::reassembly::Reassembler;

/// Connection-time configuration.
///
/// The variant is sticky: chosen once during the connection handshake and
/// never re-derived per frame. The float mode selects how real-time values
/// are interpreted for this device generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SessionConfig {
    /// Sub-protocol used for 0x7E frames on this connection.
    pub variant: Variant,
    /// Float interpretation for this device generation.
    pub float_mode: FloatDecodeMode,
}

impl SessionConfig {
    pub const fn new(variant: Variant, float_mode: FloatDecodeMode) -> Self {
        Self {
            variant,
            float_mode,
        }
    }
}

/// Result of one [`LinkSession::feed`] call.
#[derive(Debug, Default)]
pub struct SessionOutcome {
    /// Frames decoded from the stream, in arrival order.
    pub frames: Vec<DecodedFrame, MAX_FRAMES_PER_FEED>,
    /// Stream bytes dropped during reassembly.
    pub discarded: usize,
}

/// One open connection: reassembly carry-over plus the current peer.
///
/// Outbound builders address the device whose frame was decoded most
/// recently; calling them before any frame has been decoded fails with a
/// session error.
#[derive(Debug)]
pub struct LinkSession {
    config: SessionConfig,
    reassembler: Reassembler,
    peer: Option<PeerInfo>,
}

impl LinkSession {
    /// Open a session with the given connection-time configuration.
    pub const fn new(config: SessionConfig) -> Self {
        Self {
            config,
            reassembler: Reassembler::new(config.variant),
            peer: None,
        }
    }

    pub const fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// The device whose frame was decoded most recently, if any.
    pub const fn peer(&self) -> Option<&PeerInfo> {
        self.peer.as_ref()
    }

    /// Absorb one received chunk and decode every frame it completes.
    ///
    /// Each decoded frame refreshes the peer snapshot, so replies always
    /// target the same family, variant and address the inbound traffic used.
    pub fn feed(&mut self, chunk: &[u8]) -> SessionOutcome {
        let raw = self.reassembler.feed(chunk);
        let mut outcome = SessionOutcome {
            frames: Vec::new(),
            discarded: raw.discarded,
        };
        for frame in &raw.frames {
            match decode(frame, self.config.float_mode) {
                Ok(decoded) => {
                    self.peer = Some(PeerInfo::from_decoded(&decoded));
                    // Bounded by MAX_FRAMES_PER_FEED upstream.
                    let _ = outcome.frames.push(decoded);
                }
                Err(_) => {
                    link_log!(warn, "dropping undecodable frame");
                    outcome.discarded += frame.as_bytes().len();
                }
            }
        }
        outcome
    }

    /// Drop the carry-over and forget the peer, e.g. on transport disconnect.
    pub fn reset(&mut self) {
        self.reassembler.reset();
        self.peer = None;
    }

    /// Acknowledge the last real-time data report.
    pub fn ack_real_time(&self, status: u8) -> Result<Vec<u8, MAX_FRAME_SIZE>> {
        build_ack_real_time(self.associated_peer()?, status)
    }

    /// Acknowledge the last basic-info report.
    pub fn ack_basic_info(&self, status: u8) -> Result<Vec<u8, MAX_FRAME_SIZE>> {
        build_ack_basic_info(self.associated_peer()?, status)
    }

    /// Accept or reject the peer's connection request.
    pub fn connect(&self, status: u8) -> Result<Vec<u8, MAX_FRAME_SIZE>> {
        build_connect(self.associated_peer()?, status)
    }

    /// Acknowledge the peer's disconnection.
    pub fn disconnect(&self, status: u8) -> Result<Vec<u8, MAX_FRAME_SIZE>> {
        build_disconnect(self.associated_peer()?, status)
    }

    /// Send a calibration description to the peer.
    pub fn describe(&self, info: &DescribeInfo<'_>) -> Result<Vec<u8, MAX_FRAME_SIZE>> {
        build_describe(self.associated_peer()?, info)
    }

    /// Send one calibration parameter to the peer.
    pub fn calibrate(
        &self,
        param_index: u8,
        unit: &str,
        value: f32,
    ) -> Result<Vec<u8, MAX_FRAME_SIZE>> {
        build_calibrate(self.associated_peer()?, param_index, unit, value)
    }

    fn associated_peer(&self) -> Result<&PeerInfo> {
        self.peer.as_ref().ok_or_else(LinkError::not_associated)
    }
}
