//! Hold encoding codec.
//!
//! ## Encoding grammar
//!
//! A frame string is a concatenation of tokens, each self-delimited by its
//! prefix letters:
//!
//! ```text
//! frame  := token*
//! token  := "p" holdId "r" stateCode
//! ```
//!
//! `holdId` and `stateCode` are unsigned decimal integers with no sign and no
//! separators beyond the literal `p` and `r`. `"p5r1p9r2"` lights hold 5 in
//! state 1 and hold 9 in state 2.
//!
//! [`serialize`] is the syntactic inverse of [`parse`]: any well-formed string
//! round-trips byte-identically through `serialize(parse(s))`. Token order is
//! preserved positionally; the codec imposes no ordering of its own.

use crate::error::{Result, TransmissionError};

/// A single parsed hold token: which hold, and its lighting state.
///
/// State codes are small board-specific integers (off, on, color classes);
/// the codec carries them opaquely.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HoldRecord {
    /// Hold identifier, shared with the board's geometry and placement tables.
    pub hold_id: u32,

    /// Lighting-state code with board-specific meaning.
    pub state_code: u8,
}

/// Parse a frame string into hold records.
///
/// Fails with [`TransmissionError::MalformedFrame`] if any token cannot be
/// split into exactly two decimal fields, naming the offending token.
pub fn parse(encoding: &str) -> Result<Vec<HoldRecord>> {
    encoding.split('p').filter(|token| !token.is_empty()).map(parse_token).collect()
}

/// Serialize hold records back to the frame string format.
pub fn serialize(records: &[HoldRecord]) -> String {
    use std::fmt::Write;

    let mut out = String::new();
    for record in records {
        // Infallible for String targets
        let _ = write!(out, "p{}r{}", record.hold_id, record.state_code);
    }
    out
}

fn parse_token(token: &str) -> Result<HoldRecord> {
    let mut fields = token.split('r');
    let hold_field = fields.next().unwrap_or_default();
    let Some(state_field) = fields.next() else {
        return Err(TransmissionError::malformed_frame(token, "missing 'r' state delimiter"));
    };
    if fields.next().is_some() {
        return Err(TransmissionError::malformed_frame(token, "more than one 'r' delimiter"));
    }

    let hold_id = hold_field.parse::<u32>().map_err(|e| {
        TransmissionError::malformed_frame(token, format!("invalid hold id '{hold_field}': {e}"))
    })?;
    let state_code = state_field.parse::<u8>().map_err(|e| {
        TransmissionError::malformed_frame(token, format!("invalid state code '{state_field}': {e}"))
    })?;

    Ok(HoldRecord { hold_id, state_code })
}
