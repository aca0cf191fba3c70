//! Board hardware metadata: name, LED placements, hold geometry.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TransmissionError};

/// One hold on the board, as described by the board's geometry table.
///
/// Only the mirror relationship matters to this crate; rendering data stays
/// with the collaborator that owns the geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HoldGeometry {
    /// Hold identifier, shared with climb encodings.
    pub id: u32,

    /// Counterpart hold when the board layout is physically mirrored.
    #[serde(default)]
    pub mirrored_hold_id: Option<u32>,
}

/// Mapping from hold identifier to physical LED position.
///
/// Supplied per board by the metadata collaborator. Holds without an entry
/// have no LED and are skipped during packet encoding.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LedPlacements(HashMap<u32, u16>);

impl LedPlacements {
    /// Physical LED position for a hold, if one exists.
    pub fn position_of(&self, hold_id: u32) -> Option<u16> {
        self.0.get(&hold_id).copied()
    }

    /// Number of holds with a physical LED.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the board has any LEDs at all.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<HashMap<u32, u16>> for LedPlacements {
    fn from(map: HashMap<u32, u16>) -> Self {
        Self(map)
    }
}

impl FromIterator<(u32, u16)> for LedPlacements {
    fn from_iter<I: IntoIterator<Item = (u32, u16)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Firmware packet layout family.
///
/// The closed set of encoder strategies: every supported board name resolves
/// to exactly one variant, and the packet encoder dispatches on the variant,
/// never on the name string. New board generations are added here and in
/// [`crate::packet`] without touching segmentation or the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BoardFamily {
    /// Two bytes per lit hold: low position byte, then the position's high
    /// bits packed with a 4-bit state nibble.
    Compact,

    /// Three bytes per lit hold: 16-bit little-endian position plus a full
    /// state byte.
    Rgb,
}

impl BoardFamily {
    /// Resolve a board-name string to its packet layout family.
    ///
    /// Matching is ASCII case-insensitive. Unrecognized names fail with
    /// [`TransmissionError::UnknownBoard`] so a send never reaches the radio
    /// with a layout the firmware cannot parse.
    pub fn from_board_name(name: &str) -> Result<Self> {
        match name.to_ascii_lowercase().as_str() {
            "kilter" | "tension" | "decoy" | "touchstone" => Ok(BoardFamily::Compact),
            "grasshopper" | "aurora" | "soill" => Ok(BoardFamily::Rgb),
            _ => Err(TransmissionError::UnknownBoard { name: name.to_string() }),
        }
    }
}

/// Everything the pipeline needs to know about one physical board.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoardDetails {
    /// Board product name; selects the packet layout and the discovery filter.
    pub board_name: String,

    /// Layout name, used for telemetry only.
    #[serde(default)]
    pub layout_name: Option<String>,

    /// Hold-to-LED placement table.
    pub led_placements: LedPlacements,

    /// Hold geometry table with mirror relationships. Boards that do not
    /// publish geometry cannot mirror; sends of mirrored climbs proceed
    /// unmirrored on such boards.
    #[serde(default)]
    pub holds: Option<Vec<HoldGeometry>>,
}

impl BoardDetails {
    /// Device-discovery name filter: the board name with its first ASCII
    /// letter uppercased, matching how boards advertise themselves.
    pub fn device_name_filter(&self) -> String {
        let mut chars = self.board_name.chars();
        match chars.next() {
            Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
            None => String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn family_resolution_is_case_insensitive() {
        assert_eq!(BoardFamily::from_board_name("kilter").unwrap(), BoardFamily::Compact);
        assert_eq!(BoardFamily::from_board_name("Kilter").unwrap(), BoardFamily::Compact);
        assert_eq!(BoardFamily::from_board_name("TENSION").unwrap(), BoardFamily::Compact);
        assert_eq!(BoardFamily::from_board_name("grasshopper").unwrap(), BoardFamily::Rgb);
    }

    #[test]
    fn unknown_board_names_are_rejected() {
        let err = BoardFamily::from_board_name("moonboard").unwrap_err();
        assert!(matches!(err, TransmissionError::UnknownBoard { name } if name == "moonboard"));
    }

    #[test]
    fn device_name_filter_uppercases_first_letter() {
        let board = BoardDetails {
            board_name: "kilter".to_string(),
            layout_name: None,
            led_placements: LedPlacements::default(),
            holds: None,
        };
        assert_eq!(board.device_name_filter(), "Kilter");
    }

    #[test]
    fn placements_lookup_and_miss() {
        let placements: LedPlacements = [(12u32, 0u16), (3, 7)].into_iter().collect();
        assert_eq!(placements.position_of(12), Some(0));
        assert_eq!(placements.position_of(3), Some(7));
        assert_eq!(placements.position_of(99), None);
        assert_eq!(placements.len(), 2);
    }

    #[test]
    fn board_details_deserializes_without_optional_tables() {
        let json = r#"{"board_name":"kilter","led_placements":{"5":11}}"#;
        let board: BoardDetails = serde_json::from_str(json).unwrap();
        assert_eq!(board.board_name, "kilter");
        assert_eq!(board.led_placements.position_of(5), Some(11));
        assert!(board.holds.is_none());
        assert!(board.layout_name.is_none());
    }
}
