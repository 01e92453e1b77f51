//! Wire protocol: frame layouts, checksums, reassembly, decoding, encoding.
//!
//! The two frame families (0xFE vendor ZigBee, 0x7E Digi/LoRa) share one
//! pipeline: [`Reassembler`](reassembly::Reassembler) extracts validated
//! [`RawFrame`](frame::RawFrame)s from a chunked byte stream,
//! [`decode`](decode::decode) turns them into typed
//! [`DecodedFrame`](decode::DecodedFrame)s, and the builders in [`encode`]
//! produce reply frames from the same layout registry.

pub mod checksum;
pub mod constants;
pub mod decode;
pub mod encode;
pub mod frame;
pub mod layout;
pub mod reassembly;

pub use constants::{Family, FunctionCode, Variant};
pub use decode::{decode, DecodedField, DecodedFrame, FieldIssue, FieldValue, FunctionCodeInfo};
pub use encode::{
    build_ack_basic_info, build_ack_real_time, build_calibrate, build_connect, build_describe,
    build_disconnect, DescribeInfo, PeerInfo,
};
pub use frame::RawFrame;
pub use reassembly::{FeedOutcome, Reassembler};
