//! Addressing for wireless field instruments.
//!
//! Two identifier kinds appear on the link: the 64-bit radio network address
//! carried by Digi frames, and the group/number pair every content header
//! carries regardless of family.

pub mod device;
pub mod network;

#[doc(inline)]
pub use device::DeviceId;
#[doc(inline)]
pub use network::NetworkAddress;
