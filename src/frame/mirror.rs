//! Mirroring of hold records for physically mirrored board layouts.

use std::collections::HashMap;

use tracing::debug;

use crate::error::{Result, TransmissionError};
use crate::frame::HoldRecord;
use crate::types::HoldGeometry;

/// Mapping from hold identifier to its mirrored counterpart.
///
/// Built once per board from the geometry table; only holds that declare a
/// mirror counterpart are entered. Read-only during a transmission.
#[derive(Debug, Clone, Default)]
pub struct MirrorMap(HashMap<u32, u32>);

impl MirrorMap {
    /// Project a board's geometry table into a mirror map.
    ///
    /// Pure and idempotent; holds without a declared counterpart are simply
    /// absent from the result.
    pub fn from_geometry(holds: &[HoldGeometry]) -> Self {
        let map: HashMap<u32, u32> = holds
            .iter()
            .filter_map(|hold| hold.mirrored_hold_id.map(|mirrored| (hold.id, mirrored)))
            .collect();
        debug!(mapped = map.len(), total = holds.len(), "built mirror map from geometry");
        Self(map)
    }

    /// Mirrored counterpart of a hold, if one is declared.
    pub fn mirrored_id(&self, hold_id: u32) -> Option<u32> {
        self.0.get(&hold_id).copied()
    }

    /// Number of holds with a mirror counterpart.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no hold declares a counterpart.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(u32, u32)> for MirrorMap {
    fn from_iter<I: IntoIterator<Item = (u32, u32)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Rewrite every record's hold identity to its mirrored counterpart.
///
/// State codes are never transformed, only the spatial identity. A hold with
/// no mapping fails the whole operation with
/// [`TransmissionError::UnmappedMirrorHold`]; partial mirrors are never
/// emitted, since a silently dropped hold would corrupt the lighting pattern.
pub fn mirror(records: &[HoldRecord], map: &MirrorMap) -> Result<Vec<HoldRecord>> {
    records
        .iter()
        .map(|record| {
            map.mirrored_id(record.hold_id)
                .map(|hold_id| HoldRecord { hold_id, state_code: record.state_code })
                .ok_or(TransmissionError::UnmappedMirrorHold { hold_id: record.hold_id })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn geometry() -> Vec<HoldGeometry> {
        vec![
            HoldGeometry { id: 5, mirrored_hold_id: Some(12) },
            HoldGeometry { id: 9, mirrored_hold_id: Some(3) },
            HoldGeometry { id: 12, mirrored_hold_id: Some(5) },
            HoldGeometry { id: 40, mirrored_hold_id: None },
        ]
    }

    #[test]
    fn map_only_contains_holds_with_counterparts() {
        let map = MirrorMap::from_geometry(&geometry());
        assert_eq!(map.len(), 3);
        assert_eq!(map.mirrored_id(5), Some(12));
        assert_eq!(map.mirrored_id(40), None);
    }

    #[test]
    fn mirrors_every_record_preserving_states() {
        let map = MirrorMap::from_geometry(&geometry());
        let records = vec![
            HoldRecord { hold_id: 5, state_code: 1 },
            HoldRecord { hold_id: 9, state_code: 2 },
        ];
        let mirrored = mirror(&records, &map).unwrap();
        assert_eq!(
            mirrored,
            vec![
                HoldRecord { hold_id: 12, state_code: 1 },
                HoldRecord { hold_id: 3, state_code: 2 },
            ]
        );
    }

    #[test]
    fn unmapped_hold_is_a_hard_stop() {
        let map = MirrorMap::from_geometry(&geometry());
        let records = vec![
            HoldRecord { hold_id: 5, state_code: 1 },
            HoldRecord { hold_id: 99, state_code: 1 },
        ];
        let err = mirror(&records, &map).unwrap_err();
        assert!(matches!(err, TransmissionError::UnmappedMirrorHold { hold_id: 99 }));
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn total_map_mirrors_without_failure(
                pairs in proptest::collection::hash_map(0u32..500u32, 500u32..1000u32, 1..40),
                states in proptest::collection::vec(0u8..16u8, 1..40),
            ) {
                let map: MirrorMap = pairs.clone().into_iter().collect();
                let records: Vec<HoldRecord> = pairs
                    .keys()
                    .zip(states.iter().cycle())
                    .map(|(&hold_id, &state_code)| HoldRecord { hold_id, state_code })
                    .collect();

                let mirrored = mirror(&records, &map).unwrap();

                // Record count and state codes survive; only identities move.
                prop_assert_eq!(mirrored.len(), records.len());
                for (before, after) in records.iter().zip(mirrored.iter()) {
                    prop_assert_eq!(before.state_code, after.state_code);
                    prop_assert_eq!(after.hold_id, pairs[&before.hold_id]);
                }
            }
        }
    }
}
