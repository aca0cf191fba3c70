//! Core types describing climbs and board hardware.
//!
//! These are the inputs the transmission pipeline consumes. They are produced
//! by external collaborators (a climb database, a board metadata service) and
//! arrive serialized, so everything here derives `serde` traits.
//!
//! - [`Climb`] is a stored climb: its hold encoding string plus identity and
//!   the mirrored flag.
//! - [`BoardDetails`] is one physical board: its name (which selects the
//!   firmware packet layout), the LED placement table, and optionally the
//!   hold geometry table that mirror relationships are derived from.
//! - [`BoardFamily`] is the closed set of firmware packet layouts, resolved
//!   once from the board-name string so nothing downstream dispatches on
//!   strings.

mod board;
mod climb;

pub use board::{BoardDetails, BoardFamily, HoldGeometry, LedPlacements};
pub use climb::Climb;
