//! Protocol constants, family/variant tags and function code identifiers.

/// Header marker byte for the FE (vendor ZigBee) family.
pub const FE_MARKER: u8 = 0xFE;

/// Header marker byte for the 7E (Digi ZigBee / LoRa) family.
pub const SEVEN_E_MARKER: u8 = 0x7E;

/// Fixed offset added to the FE length field to obtain the total frame size
/// (header 1 + length 1 + command 2 + checksum 1, minus the length value's
/// own coverage).
pub const FE_FIXED_OFFSET: usize = 5;

/// Fixed offset added to the 7E length field to obtain the total frame size
/// (header 1 + length 2 + checksum 1).
pub const SEVEN_E_FIXED_OFFSET: usize = 4;

/// Maximum size of one wire frame.
pub const MAX_FRAME_SIZE: usize = 256;

/// Carry-over capacity held between reassembly calls. Anything beyond this
/// is trimmed from the front and reported as discarded.
pub const CARRY_CAPACITY: usize = 512;

/// Upper bound on frames emitted by a single `feed` call. Sized so a carry
/// buffer packed with minimal frames (13 bytes each) drains in one pass.
pub const MAX_FRAMES_PER_FEED: usize = 40;

/// Byte length of the common content header
/// (vendor id 2 + device type 2 + group 1 + number 1 + function code 2).
pub const CONTENT_HEADER_SIZE: usize = 8;

/// Maximum width of a fixed-width text field in any payload table.
pub const FIELD_TEXT_MAX: usize = 32;

// =============================================================================
// Family and Variant Tags
// =============================================================================

/// Top-level protocol family, selected by the header marker byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Family {
    /// Vendor ZigBee protocol, marker `0xFE`.
    Fe,
    /// Digi ZigBee / LoRa protocols, marker `0x7E`.
    SevenE,
}

impl Family {
    /// Map a header marker byte to its family.
    pub const fn from_marker(marker: u8) -> Option<Self> {
        match marker {
            FE_MARKER => Some(Self::Fe),
            SEVEN_E_MARKER => Some(Self::SevenE),
            _ => None,
        }
    }

    /// Get the family's header marker byte.
    pub const fn marker(self) -> u8 {
        match self {
            Self::Fe => FE_MARKER,
            Self::SevenE => SEVEN_E_MARKER,
        }
    }
}

/// Sub-protocol within the 7E family.
///
/// The variant is sticky per connection: it is chosen during the handshake
/// and held as session state, never re-derived per frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Variant {
    /// The FE family's single wire form.
    Generic,
    /// Digi ZigBee API frames with the 8-byte network address.
    Digi,
    /// LoRa transparent mode, no addressed network layer.
    Lora,
}

// =============================================================================
// Function Code Identifiers
// =============================================================================

/// Function code constant for real-time data (0x0101)
pub const FUNCTION_REAL_TIME_DATA: u16 = 0x0101;
/// Function code constant for basic device info (0x0102)
pub const FUNCTION_BASIC_INFO: u16 = 0x0102;
/// Function code constant for a read request (0x0201)
pub const FUNCTION_READ_REQUEST: u16 = 0x0201;
/// Function code constant for acknowledging real-time data (0x0301)
pub const FUNCTION_ACK_REAL_TIME: u16 = 0x0301;
/// Function code constant for acknowledging basic info (0x0302)
pub const FUNCTION_ACK_BASIC_INFO: u16 = 0x0302;
/// Function code constant for connect (0x0401)
pub const FUNCTION_CONNECT: u16 = 0x0401;
/// Function code constant for disconnect (0x0402)
pub const FUNCTION_DISCONNECT: u16 = 0x0402;
/// Function code constant for describe-calibration (0x0501)
pub const FUNCTION_DESCRIBE_CALIBRATION: u16 = 0x0501;
/// Function code constant for parameter calibration (0x0502)
pub const FUNCTION_PARAMETER_CALIBRATION: u16 = 0x0502;

/// Function codes embedded at a fixed offset inside the content region.
///
/// The two-byte code selects the payload's semantic layout. Codes not
/// listed here decode as unrecognized, never as an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[repr(u16)]
pub enum FunctionCode {
    /// Periodic measurement report from the instrument
    RealTimeData = FUNCTION_REAL_TIME_DATA,
    /// Static device description (model, serial, range, ...)
    BasicInfo = FUNCTION_BASIC_INFO,
    /// Controller poll for the instrument's state
    ReadRequest = FUNCTION_READ_REQUEST,
    /// Controller acknowledgement of a real-time report
    AckRealTimeData = FUNCTION_ACK_REAL_TIME,
    /// Controller acknowledgement of a basic-info report
    AckBasicInfo = FUNCTION_ACK_BASIC_INFO,
    /// Connection handshake
    Connect = FUNCTION_CONNECT,
    /// Connection teardown
    Disconnect = FUNCTION_DISCONNECT,
    /// Free-text calibration description written to the instrument
    DescribeCalibration = FUNCTION_DESCRIBE_CALIBRATION,
    /// Numeric calibration parameter written to the instrument
    ParameterCalibration = FUNCTION_PARAMETER_CALIBRATION,
}

impl FunctionCode {
    /// Convert a u16 to `FunctionCode`
    pub const fn from_u16(value: u16) -> Option<Self> {
        match value {
            FUNCTION_REAL_TIME_DATA => Some(Self::RealTimeData),
            FUNCTION_BASIC_INFO => Some(Self::BasicInfo),
            FUNCTION_READ_REQUEST => Some(Self::ReadRequest),
            FUNCTION_ACK_REAL_TIME => Some(Self::AckRealTimeData),
            FUNCTION_ACK_BASIC_INFO => Some(Self::AckBasicInfo),
            FUNCTION_CONNECT => Some(Self::Connect),
            FUNCTION_DISCONNECT => Some(Self::Disconnect),
            FUNCTION_DESCRIBE_CALIBRATION => Some(Self::DescribeCalibration),
            FUNCTION_PARAMETER_CALIBRATION => Some(Self::ParameterCalibration),
            _ => None,
        }
    }

    /// Convert `FunctionCode` to u16
    pub const fn to_u16(self) -> u16 {
        self as u16
    }
}
