//! The two family-specific checksum engines.
//!
//! Both are total pure functions over a byte region; an empty region yields
//! the accumulator's identity value. The region itself (which frame bytes a
//! checksum covers) is defined by the frame layout, not here: see
//! [`FrameLayout::checksum_region`](crate::protocol::layout::FrameLayout::checksum_region),
//! so decoder and encoder cannot disagree about the boundary.

/// Which checksum engine a frame layout uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ChecksumKind {
    /// Byte-wise XOR accumulate (FE family).
    Xor,
    /// Sum modulo 256, complemented (7E family).
    ComplementSum,
}

impl ChecksumKind {
    /// Compute this kind's checksum over `region`.
    pub fn compute(self, region: &[u8]) -> u8 {
        match self {
            Self::Xor => xor_checksum(region),
            Self::ComplementSum => complement_sum(region),
        }
    }
}

/// XOR-accumulate checksum used by the FE family.
///
/// Empty input yields the XOR identity `0x00`.
pub fn xor_checksum(region: &[u8]) -> u8 {
    region.iter().fold(0x00, |acc, &b| acc ^ b)
}

/// Complement-sum checksum used by the 7E family:
/// `0xFF - (sum of all bytes mod 256)`.
///
/// Empty input yields `0xFF`.
pub fn complement_sum(region: &[u8]) -> u8 {
    let sum = region.iter().fold(0u8, |acc, &b| acc.wrapping_add(b));
    0xFF_u8.wrapping_sub(sum)
}
