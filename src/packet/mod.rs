//! Board firmware packet encoding and link-safe segmentation.
//!
//! ## Message envelope
//!
//! Board firmware consumes self-delimited messages:
//!
//! ```text
//! 0x01  len(body)  checksum(body)  0x02  body...  0x03
//! ```
//!
//! where `checksum` is the byte-sum of the body truncated to 8 bits and
//! complemented. The body is one command byte followed by the per-hold bytes
//! of the board family's layout:
//!
//! - [`BoardFamily::Compact`]: command `0x52`, then 2 bytes per lit hold
//!   (low position byte, then position bits 8..11 in the high nibble and the
//!   state code in the low nibble)
//! - [`BoardFamily::Rgb`]: command `0x54`, then 3 bytes per lit hold
//!   (little-endian 16-bit position, then the full state byte)
//!
//! The one-byte length field caps a body at 255 bytes; climbs that overflow
//! it are carried as consecutive envelopes in the same packet. The packet is
//! an opaque byte sequence from here on: [`segment`] splits it into chunks
//! that fit the link's maximum transfer unit, and the session writes those in
//! order.
//!
//! Encoding is pure and deterministic; no device state is touched here.

mod segment;

pub use segment::segment;

use tracing::{debug, trace};

use crate::frame::HoldRecord;
use crate::types::{BoardFamily, LedPlacements};

const MESSAGE_START: u8 = 0x01;
const BODY_START: u8 = 0x02;
const MESSAGE_END: u8 = 0x03;
const MAX_BODY_LEN: usize = u8::MAX as usize;

const COMPACT_COMMAND: u8 = 0x52;
const RGB_COMMAND: u8 = 0x54;

/// Largest hold position representable in the compact two-byte layout.
const COMPACT_MAX_POSITION: u16 = 0x0FFF;
/// Largest state code representable in the compact layout's nibble.
const COMPACT_MAX_STATE: u8 = 0x0F;

/// Encode hold records into one binary packet for a board family.
///
/// Each record's hold is resolved to a physical LED position through
/// `placements`; holds without a placement (or unrepresentable in the
/// family's layout) are skipped rather than failing the send, since climbs
/// may reference holds the installed board does not light.
///
/// Identical inputs always produce byte-identical output.
pub fn encode(records: &[HoldRecord], placements: &LedPlacements, family: BoardFamily) -> Vec<u8> {
    let stride = hold_stride(family);
    let mut hold_bytes = Vec::with_capacity(records.len() * stride);
    let mut skipped = 0usize;

    for record in records {
        match placements.position_of(record.hold_id) {
            Some(position) => {
                if !push_hold(family, position, record.state_code, &mut hold_bytes) {
                    trace!(
                        hold_id = record.hold_id,
                        position,
                        state = record.state_code,
                        "hold not representable in layout; skipping"
                    );
                    skipped += 1;
                }
            }
            None => {
                trace!(hold_id = record.hold_id, "hold has no LED placement; skipping");
                skipped += 1;
            }
        }
    }

    if skipped > 0 {
        debug!(skipped, lit = hold_bytes.len() / stride, "skipped holds without usable placement");
    }

    let command = command_byte(family);
    if hold_bytes.is_empty() {
        // A bare command still clears the board's previous pattern
        return envelope(&[command]);
    }

    let per_envelope = ((MAX_BODY_LEN - 1) / stride) * stride;
    let mut packet = Vec::new();
    for payload in hold_bytes.chunks(per_envelope) {
        let mut body = Vec::with_capacity(payload.len() + 1);
        body.push(command);
        body.extend_from_slice(payload);
        packet.extend_from_slice(&envelope(&body));
    }
    packet
}

fn command_byte(family: BoardFamily) -> u8 {
    match family {
        BoardFamily::Compact => COMPACT_COMMAND,
        BoardFamily::Rgb => RGB_COMMAND,
    }
}

fn hold_stride(family: BoardFamily) -> usize {
    match family {
        BoardFamily::Compact => 2,
        BoardFamily::Rgb => 3,
    }
}

/// Append one hold's bytes in the family layout. Returns `false` when the
/// (position, state) pair does not fit the layout.
fn push_hold(family: BoardFamily, position: u16, state: u8, out: &mut Vec<u8>) -> bool {
    match family {
        BoardFamily::Compact => {
            if position > COMPACT_MAX_POSITION || state > COMPACT_MAX_STATE {
                return false;
            }
            out.push((position & 0xFF) as u8);
            out.push((((position >> 8) as u8) << 4) | (state & 0x0F));
            true
        }
        BoardFamily::Rgb => {
            out.extend_from_slice(&position.to_le_bytes());
            out.push(state);
            true
        }
    }
}

fn envelope(body: &[u8]) -> Vec<u8> {
    debug_assert!(body.len() <= MAX_BODY_LEN);
    let mut out = Vec::with_capacity(body.len() + 5);
    out.push(MESSAGE_START);
    out.push(body.len() as u8);
    out.push(checksum(body));
    out.push(BODY_START);
    out.extend_from_slice(body);
    out.push(MESSAGE_END);
    out
}

fn checksum(body: &[u8]) -> u8 {
    !body.iter().fold(0u8, |acc, b| acc.wrapping_add(*b))
}
