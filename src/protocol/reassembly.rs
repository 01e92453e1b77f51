//! Stream reassembly.
//!
//! Serial links deliver frames in arbitrary chunks: a frame may arrive split
//! across reads, several frames may share one read, and line noise may appear
//! between frames. The [`Reassembler`] turns that byte stream back into
//! validated [`RawFrame`]s, carrying incomplete tails between calls and
//! resynchronizing one byte at a time after corruption.

use heapless::Vec;

use crate::link_log;
use crate::protocol::constants::{Family, Variant, CARRY_CAPACITY, MAX_FRAMES_PER_FEED, MAX_FRAME_SIZE};
use crate::protocol::frame::RawFrame;
use crate::protocol::layout::layout_for;

/// Result of one [`Reassembler::feed`] call.
#[derive(Debug, Default)]
pub struct FeedOutcome {
    /// Complete, checksum-valid frames extracted from the stream, in order.
    pub frames: Vec<RawFrame, MAX_FRAMES_PER_FEED>,
    /// Bytes dropped from the stream: junk preceding a validated frame,
    /// plus anything trimmed when the carry buffer overflowed.
    pub discarded: usize,
}

/// Chunk-to-frame reassembler for one serial link.
///
/// Holds at most [`CARRY_CAPACITY`] bytes of unconsumed stream between
/// calls. The 7E variant is fixed at construction; it selects the layout
/// used for 0x7E frames (FE frames always use the single FE layout).
#[derive(Debug)]
pub struct Reassembler {
    variant: Variant,
    carry: Vec<u8, CARRY_CAPACITY>,
}

impl Reassembler {
    /// Create a reassembler for the given 7E variant.
    pub const fn new(variant: Variant) -> Self {
        Self {
            variant,
            carry: Vec::new(),
        }
    }

    /// The variant used to interpret 0x7E frames.
    pub const fn variant(&self) -> Variant {
        self.variant
    }

    /// Bytes currently carried between feeds.
    pub fn carried(&self) -> usize {
        self.carry.len()
    }

    /// Drop all carried bytes.
    pub fn reset(&mut self) {
        self.carry.clear();
    }

    /// Absorb one chunk and extract every complete frame now available.
    ///
    /// Chunks may be of any size: larger ones are absorbed and scanned in
    /// capacity-sized pieces, draining validated frames as they go. Bytes
    /// preceding a frame that validates are discarded and counted. A
    /// candidate marker that fails validation, or that claims more bytes
    /// than have arrived, is scanned past so a complete frame behind it is
    /// never withheld; the unconsumed tail stays carried for the next call
    /// and is only dropped when a later frame validates past it or the
    /// carry buffer overflows.
    pub fn feed(&mut self, chunk: &[u8]) -> FeedOutcome {
        let mut outcome = FeedOutcome::default();
        let mut rest = chunk;
        loop {
            let room = CARRY_CAPACITY - self.carry.len();
            let take = room.min(rest.len());
            // Fits by construction.
            let _ = self.carry.extend_from_slice(&rest[..take]);
            rest = &rest[take..];

            self.scan(&mut outcome);

            if rest.is_empty() {
                break;
            }
            if self.carry.is_full() {
                // No complete frame left in a full carry. Keep the longest
                // suffix that can still hold the start of an in-progress
                // frame; everything older was already scanned while fully
                // present.
                let excess = CARRY_CAPACITY - (MAX_FRAME_SIZE - 1);
                link_log!(warn, "carry overflow, trimming {} oldest bytes", excess);
                outcome.discarded += excess;
                self.drop_front(excess);
            }
        }
        outcome
    }

    /// One scan pass over the carry: emit every frame that validates,
    /// then drop the consumed prefix.
    fn scan(&mut self, outcome: &mut FeedOutcome) {
        // consumed: prefix disposed of (frames plus counted junk).
        // pos: scan cursor, never behind consumed.
        let mut consumed = 0;
        let mut pos = 0;
        while pos < self.carry.len() {
            if outcome.frames.is_full() {
                break;
            }
            let Some(family) = Family::from_marker(self.carry[pos]) else {
                pos += 1;
                continue;
            };
            let layout = layout_for(family, self.variant);
            let avail = &self.carry[pos..];
            let Some(length_value) = layout.read_length(avail) else {
                // Length field itself incomplete; later bytes may resolve it.
                pos += 1;
                continue;
            };
            let total = layout.expected_total(length_value);
            if total < layout.min_total() || total > MAX_FRAME_SIZE {
                link_log!(debug, "implausible length {} at offset {}", length_value, pos);
                pos += 1;
                continue;
            }
            if avail.len() < total {
                // Candidate not complete yet. Keep scanning: a complete
                // frame behind it must not wait on bytes that may never
                // arrive. If this marker is genuine, nothing past it can
                // validate and the bytes stay carried.
                pos += 1;
                continue;
            }
            match RawFrame::parse(&avail[..total], layout) {
                Ok(frame) => {
                    if pos > consumed {
                        link_log!(debug, "discarding {} bytes before frame", pos - consumed);
                        outcome.discarded += pos - consumed;
                    }
                    consumed = pos + total;
                    pos = consumed;
                    // is_full() checked above, push cannot fail.
                    let _ = outcome.frames.push(frame);
                }
                Err(_) => {
                    link_log!(trace, "frame candidate at offset {} rejected", pos);
                    pos += 1;
                }
            }
        }

        if consumed > 0 {
            self.drop_front(consumed);
        }
    }

    fn drop_front(&mut self, n: usize) {
        let len = self.carry.len();
        self.carry.copy_within(n..len, 0);
        self.carry.truncate(len - n);
    }
}
