//! 64-bit radio network address.
//!
//! Digi-variant frames address instruments by their 64-bit radio MAC,
//! transmitted big-endian in the 8-byte address region. FE and LoRa frames
//! carry no network address.

use crate::error::{LinkError, Result};
use core::fmt;

/// 64-bit radio network address (Digi variant only).
///
/// # Examples
///
/// ```
/// use fieldlink::NetworkAddress;
///
/// let addr = NetworkAddress::new([0x00, 0x13, 0xA2, 0x00, 0x41, 0x52, 0x9A, 0xB3]);
/// assert_eq!(u64::from(addr), 0x0013_A200_4152_9AB3);
/// assert_eq!(addr.to_string(), "0013A20041529AB3");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct NetworkAddress {
    raw: [u8; 8],
}

impl NetworkAddress {
    /// Wire width of the address region in bytes.
    pub const SIZE: usize = 8;

    /// Create an address from its big-endian byte representation.
    pub const fn new(raw: [u8; 8]) -> Self {
        Self { raw }
    }

    /// Parse an address from a byte slice.
    ///
    /// # Errors
    ///
    /// Returns `LinkError::Protocol` (invalid address) if the slice is not
    /// exactly 8 bytes.
    pub fn parse(data: &[u8]) -> Result<Self> {
        let raw: [u8; 8] = data.try_into().map_err(|_| LinkError::invalid_address())?;
        Ok(Self { raw })
    }

    /// Get the big-endian byte representation.
    #[inline(always)]
    pub const fn as_bytes(&self) -> &[u8; 8] {
        &self.raw
    }

    /// Encode the address into a byte buffer (big-endian).
    ///
    /// # Errors
    ///
    /// Returns `LinkError::Capacity` if the buffer is shorter than 8 bytes.
    pub fn encode(&self, buf: &mut [u8]) -> Result<usize> {
        if buf.len() < Self::SIZE {
            return Err(LinkError::buffer_too_small());
        }
        buf[..Self::SIZE].copy_from_slice(&self.raw);
        Ok(Self::SIZE)
    }
}

impl From<u64> for NetworkAddress {
    fn from(value: u64) -> Self {
        Self {
            raw: value.to_be_bytes(),
        }
    }
}

impl From<NetworkAddress> for u64 {
    fn from(addr: NetworkAddress) -> u64 {
        u64::from_be_bytes(addr.raw)
    }
}

impl fmt::Display for NetworkAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in &self.raw {
            write!(f, "{byte:02X}")?;
        }
        Ok(())
    }
}
