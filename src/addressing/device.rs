//! Instrument group/number identifier.
//!
//! Every content header carries a one-byte group and a one-byte device
//! number; together they identify the instrument within the plant's radio
//! network, independent of the transport family.

use core::fmt;

/// Instrument identifier (group/number).
///
/// # Examples
///
/// ```
/// use fieldlink::DeviceId;
///
/// let id = DeviceId::new(3, 12);
/// assert_eq!(id.group(), 3);
/// assert_eq!(id.number(), 12);
/// assert_eq!(id.to_string(), "3/12");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct DeviceId {
    group: u8,
    number: u8,
}

impl DeviceId {
    /// Create an identifier from its components.
    pub const fn new(group: u8, number: u8) -> Self {
        Self { group, number }
    }

    /// Get the group component.
    #[inline(always)]
    pub const fn group(self) -> u8 {
        self.group
    }

    /// Get the device number within the group.
    #[inline(always)]
    pub const fn number(self) -> u8 {
        self.number
    }
}

impl fmt::Display for DeviceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.group, self.number)
    }
}
