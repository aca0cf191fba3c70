//! Climb identity and stored hold encoding.

use serde::{Deserialize, Serialize};

/// A stored climb: a named pattern of lit holds at a wall angle.
///
/// The `frames` string is the compact hold encoding described in
/// [`crate::frame`]; it is parsed fresh on every send and never persisted in
/// parsed form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Climb {
    /// Stable identifier, used for telemetry only.
    pub uuid: String,

    /// Display name.
    pub name: String,

    /// Wall angle in degrees.
    pub angle: u32,

    /// Compact hold encoding (`p<holdId>r<stateCode>` tokens, concatenated).
    pub frames: String,

    /// Whether the climb must be mirrored before transmission.
    pub mirrored: bool,
}
