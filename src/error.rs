//! Error types for link-engine operations.
//!
//! This module provides structured error types with backtraces (when std is enabled)
//! and helper methods for error classification.
//!
//! Note that most decode-side anomalies are deliberately *not* errors: checksum
//! mismatches are swallowed by the reassembler's resynchronization policy,
//! truncated or malformed content fields are reported per-field inside
//! [`DecodedFrame`](crate::protocol::decode::DecodedFrame), and unknown function
//! codes decode to a marked frame. The error type below covers the conditions
//! that genuinely stop an operation.

use core::fmt;

#[cfg(feature = "std")]
use std::backtrace::Backtrace;

/// Result type alias for link-engine operations.
pub type Result<T> = core::result::Result<T, LinkError>;

// =============================================================================
// Error Kind Enums (Internal)
// =============================================================================

/// Protocol error variants (internal)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub(crate) enum ProtocolErrorKind {
    InvalidFrame,
    ChecksumMismatch,
    VariantMismatch,
    PayloadTooLarge,
    InvalidAddress,
}

/// Session error variants (internal)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub(crate) enum SessionErrorKind {
    /// An outbound frame needs peer addressing state the session does not
    /// hold yet: no inbound frame was decoded, or the snapshot lacks a
    /// region the target layout requires.
    NotAssociated,
}

/// Capacity error variants (internal)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub(crate) enum CapacityErrorKind {
    BufferTooSmall,
    TextTooLong,
}

// =============================================================================
// Main Error Type
// =============================================================================

/// Link-engine error type.
///
/// This is the main error type returned by all fallible engine operations.
/// It contains a backtrace (when the std feature is enabled) and detailed
/// error information through helper methods.
#[derive(Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LinkError {
    /// Protocol-level errors (frame structure, checksum, variant selection)
    Protocol(ProtocolError),
    /// Session-state errors (encoding preconditions)
    Session(SessionError),
    /// Capacity errors (fixed buffers and fixed-width text fields)
    Capacity(CapacityError),
}

// =============================================================================
// Structured Error Types
// =============================================================================

/// Protocol error with optional backtrace
#[derive(Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ProtocolError {
    kind: ProtocolErrorKind,
    #[cfg(feature = "std")]
    backtrace: Backtrace,
}

impl ProtocolError {
    pub(crate) fn new(kind: ProtocolErrorKind) -> Self {
        Self {
            kind,
            #[cfg(feature = "std")]
            backtrace: Backtrace::capture(),
        }
    }

    /// Check if this is an invalid frame error
    pub fn is_invalid_frame(&self) -> bool {
        matches!(self.kind, ProtocolErrorKind::InvalidFrame)
    }

    /// Check if this is a checksum mismatch
    pub fn is_checksum_mismatch(&self) -> bool {
        matches!(self.kind, ProtocolErrorKind::ChecksumMismatch)
    }

    /// Check if the frame length does not fit the session's sticky variant
    pub fn is_variant_mismatch(&self) -> bool {
        matches!(self.kind, ProtocolErrorKind::VariantMismatch)
    }
}

/// Session error with optional backtrace
#[derive(Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SessionError {
    kind: SessionErrorKind,
    #[cfg(feature = "std")]
    backtrace: Backtrace,
}

impl SessionError {
    pub(crate) fn new(kind: SessionErrorKind) -> Self {
        Self {
            kind,
            #[cfg(feature = "std")]
            backtrace: Backtrace::capture(),
        }
    }

    /// Check if no peer has been decoded yet
    pub fn is_not_associated(&self) -> bool {
        matches!(self.kind, SessionErrorKind::NotAssociated)
    }
}

/// Capacity error with optional backtrace
#[derive(Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CapacityError {
    kind: CapacityErrorKind,
    #[cfg(feature = "std")]
    backtrace: Backtrace,
}

impl CapacityError {
    pub(crate) fn new(kind: CapacityErrorKind) -> Self {
        Self {
            kind,
            #[cfg(feature = "std")]
            backtrace: Backtrace::capture(),
        }
    }

    /// Check if a fixed buffer was too small
    pub fn is_buffer_too_small(&self) -> bool {
        matches!(self.kind, CapacityErrorKind::BufferTooSmall)
    }

    /// Check if a text value exceeded its fixed field width
    pub fn is_text_too_long(&self) -> bool {
        matches!(self.kind, CapacityErrorKind::TextTooLong)
    }
}

// =============================================================================
// Convenience Constructors for LinkError
// =============================================================================

impl LinkError {
    // Protocol errors
    pub(crate) fn invalid_frame() -> Self {
        Self::Protocol(ProtocolError::new(ProtocolErrorKind::InvalidFrame))
    }

    pub(crate) fn checksum_mismatch() -> Self {
        Self::Protocol(ProtocolError::new(ProtocolErrorKind::ChecksumMismatch))
    }

    pub(crate) fn variant_mismatch() -> Self {
        Self::Protocol(ProtocolError::new(ProtocolErrorKind::VariantMismatch))
    }

    pub(crate) fn payload_too_large() -> Self {
        Self::Protocol(ProtocolError::new(ProtocolErrorKind::PayloadTooLarge))
    }

    pub(crate) fn invalid_address() -> Self {
        Self::Protocol(ProtocolError::new(ProtocolErrorKind::InvalidAddress))
    }

    // Session errors
    pub(crate) fn not_associated() -> Self {
        Self::Session(SessionError::new(SessionErrorKind::NotAssociated))
    }

    // Capacity errors
    pub(crate) fn buffer_too_small() -> Self {
        Self::Capacity(CapacityError::new(CapacityErrorKind::BufferTooSmall))
    }

    pub(crate) fn text_too_long() -> Self {
        Self::Capacity(CapacityError::new(CapacityErrorKind::TextTooLong))
    }
}

// =============================================================================
// Display Implementation
// =============================================================================

impl fmt::Display for LinkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LinkError::Protocol(e) => write!(f, "Protocol error: {:?}", e.kind),
            LinkError::Session(e) => write!(f, "Session error: {:?}", e.kind),
            LinkError::Capacity(e) => write!(f, "Capacity error: {:?}", e.kind),
        }
    }
}

// Implement std::error::Error for std-based applications
#[cfg(feature = "std")]
impl std::error::Error for LinkError {}
