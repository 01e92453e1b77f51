#![cfg_attr(all(not(test), not(feature = "std")), no_std)]
#![doc = include_str!("../README.md")]

//! # fieldlink
//!
//! Serial protocol engine for wireless field-instrument transceivers.
//!
//! This crate implements the two binary frame families these instruments
//! speak, `0xFE` (vendor ZigBee) and `0x7E` (Digi ZigBee and LoRa
//! transparent mode), as a pure `no_std` engine: the caller owns the
//! serial port and hands received chunks to a [`LinkSession`], which
//! reassembles them into checksum-validated frames, decodes their fields,
//! and builds reply frames in the same wire format.
//!
//! ## Features
//!
//! - Stream reassembly with carry-over and single-byte resynchronization
//! - Table-driven decode/encode sharing one layout registry per variant
//! - XOR and complement-sum checksums, one per family
//! - Manual IEEE-754 float decoding with a legacy device-generation mode
//! - No I/O, no allocation, no ambient state
//!
//! ## Example
//!
//! ```rust
//! use fieldlink::{FloatDecodeMode, LinkSession, SessionConfig, Variant};
//!
//! let config = SessionConfig::new(Variant::Digi, FloatDecodeMode::Ieee754);
//! let mut session = LinkSession::new(config);
//!
//! // Bytes arrive from the serial port in arbitrary chunks.
//! let outcome = session.feed(&[0x7E, 0x00]);
//! assert!(outcome.frames.is_empty()); // carried until the frame completes
//! ```

pub mod addressing;
pub mod error;
pub mod float;
pub mod protocol;
pub mod session;

// Macro modules (must be declared before use)
#[macro_use]
pub mod macros;
#[macro_use]
pub mod logging;

// Re-export commonly used types
#[doc(inline)]
pub use addressing::{DeviceId, NetworkAddress};
#[doc(inline)]
pub use error::{LinkError, Result};
#[doc(inline)]
pub use float::FloatDecodeMode;
#[doc(inline)]
pub use protocol::{
    DecodedFrame, DescribeInfo, Family, FieldIssue, FieldValue, FunctionCode, FunctionCodeInfo,
    PeerInfo, RawFrame, Reassembler, Variant,
};
#[doc(inline)]
pub use session::{LinkSession, SessionConfig, SessionOutcome};
