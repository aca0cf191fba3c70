//! Parsing, serializing, and mirroring of climb hold encodings.
//!
//! A climb's lighting pattern is stored as a compact ASCII string of
//! `p<holdId>r<stateCode>` tokens. [`codec`] turns that string into discrete
//! [`HoldRecord`]s and back; [`mirror`] rewrites the spatial identity of every
//! record for boards with a physically mirrored layout.

mod codec;
mod mirror;

pub use codec::{HoldRecord, parse, serialize};
pub use mirror::{MirrorMap, mirror};
