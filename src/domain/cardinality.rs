// src/domain/cardinality.rs

use std::collections::HashMap;

use crate::domain::models::MergedMatch;

#[derive(Debug)]
pub struct CardinalityPartition {
    /// Rows whose property has exactly one external match.
    pub accepted: Vec<MergedMatch>,
    /// Rows from properties that fanned out to several external matches.
    pub rejected: Vec<MergedMatch>,
}

/// Fills in both occurrence counts and splits the merged relation on the
/// 1-to-1 rule: a row is accepted iff it is the only match for its
/// property. Fan-in (several properties resolving to one external
/// identity) is accepted; fan-out is always rejected. The asymmetry is
/// intentional and must not be "fixed" here.
pub fn classify(mut rows: Vec<MergedMatch>) -> CardinalityPartition {
    let mut per_property: HashMap<i64, usize> = HashMap::new();
    let mut per_identity: HashMap<i64, usize> = HashMap::new();
    for row in &rows {
        *per_property.entry(row.candidate.property_id).or_default() += 1;
        *per_identity.entry(row.address.unique_id).or_default() += 1;
    }

    for row in &mut rows {
        row.matches_per_property = per_property[&row.candidate.property_id];
        row.matches_per_identity = per_identity[&row.address.unique_id];
    }

    let (accepted, rejected) = rows
        .into_iter()
        .partition(|row| row.matches_per_property == 1);

    CardinalityPartition { accepted, rejected }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::{CandidateRecord, PropertyStatus, ResolvedAddress};

    fn merged(property_id: i64, address_id: i64, unique_id: i64) -> MergedMatch {
        MergedMatch {
            candidate: CandidateRecord {
                property_id,
                property_no: property_id * 10,
                responsible_party: "Private Party".to_string(),
                property_status: PropertyStatus::Current,
                address_id,
                address_text: String::new(),
                suburb_and_postcode: String::new(),
                lot_key: format!("{property_id}/1//DP1"),
            },
            address: ResolvedAddress {
                unique_id,
                prop_id: Some(unique_id),
                ..Default::default()
            },
            matches_per_property: 0,
            matches_per_identity: 0,
        }
    }

    #[test]
    fn single_match_is_accepted() {
        let partition = classify(vec![merged(1, 11, 100)]);
        assert_eq!(partition.accepted.len(), 1);
        assert!(partition.rejected.is_empty());
        assert_eq!(partition.accepted[0].matches_per_property, 1);
        assert_eq!(partition.accepted[0].matches_per_identity, 1);
    }

    #[test]
    fn property_fanning_out_is_rejected_regardless_of_unique_ids() {
        // Two rows for the same property, different external identities.
        let partition = classify(vec![merged(1, 11, 100), merged(1, 11, 200)]);
        assert!(partition.accepted.is_empty());
        assert_eq!(partition.rejected.len(), 2);
        for row in &partition.rejected {
            assert_eq!(row.matches_per_property, 2);
        }
    }

    #[test]
    fn identity_fan_in_is_accepted() {
        // Two different properties resolving to the same external identity:
        // still accepted, only fan-out from a property is blocked.
        let partition = classify(vec![merged(1, 11, 100), merged(2, 22, 100)]);
        assert_eq!(partition.accepted.len(), 2);
        assert!(partition.rejected.is_empty());
        for row in &partition.accepted {
            assert_eq!(row.matches_per_property, 1);
            assert_eq!(row.matches_per_identity, 2);
        }
    }

    #[test]
    fn mixed_relation_partitions_cleanly() {
        let rows = vec![
            merged(1, 11, 100),
            merged(2, 22, 200),
            merged(2, 22, 300),
            merged(3, 33, 100),
        ];
        let partition = classify(rows);
        assert_eq!(partition.accepted.len(), 2);
        assert_eq!(partition.rejected.len(), 2);
        assert!(partition
            .rejected
            .iter()
            .all(|r| r.candidate.property_id == 2));
    }
}
