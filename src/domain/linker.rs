// src/domain/linker.rs

use std::collections::{HashMap, HashSet};

use crate::domain::models::{CandidateRecord, LotIdentifierMatch, MergedMatch, ResolvedAddress};

/// The merged relation plus everything the merge left behind.
#[derive(Debug)]
pub struct LinkedSet {
    pub matched: Vec<MergedMatch>,
    /// Candidate rows whose address id never appears in the merged
    /// relation: no external record was found for them.
    pub unmatched: Vec<CandidateRecord>,
}

/// Joins candidates to lot matches on the composite lot key, then to
/// resolved addresses on the synthetic unique id. Exact duplicate rows are
/// dropped ignoring the lot key, so several lots of one property resolving
/// to the same address collapse into a single merged row.
pub fn link_candidates(
    candidates: &[CandidateRecord],
    lots: &[LotIdentifierMatch],
    addresses: &[ResolvedAddress],
) -> LinkedSet {
    let mut lots_by_key: HashMap<&str, Vec<&LotIdentifierMatch>> = HashMap::new();
    for lot in lots {
        lots_by_key.entry(lot.lot_key.as_str()).or_default().push(lot);
    }

    let mut addresses_by_id: HashMap<i64, Vec<&ResolvedAddress>> = HashMap::new();
    for address in addresses {
        addresses_by_id
            .entry(address.unique_id)
            .or_default()
            .push(address);
    }

    let mut seen: HashSet<(i64, ResolvedAddress)> = HashSet::new();
    let mut matched = Vec::new();

    for candidate in candidates {
        let Some(lot_matches) = lots_by_key.get(candidate.lot_key.as_str()) else {
            continue;
        };
        for lot in lot_matches {
            let Some(resolved) = addresses_by_id.get(&lot.unique_id) else {
                continue;
            };
            for address in resolved {
                if seen.insert((candidate.address_id, (*address).clone())) {
                    matched.push(MergedMatch {
                        candidate: candidate.clone(),
                        address: (*address).clone(),
                        matches_per_property: 0,
                        matches_per_identity: 0,
                    });
                }
            }
        }
    }

    let matched_ids: HashSet<i64> = matched.iter().map(|m| m.candidate.address_id).collect();
    let unmatched = candidates
        .iter()
        .filter(|c| !matched_ids.contains(&c.address_id))
        .cloned()
        .collect();

    LinkedSet { matched, unmatched }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::PropertyStatus;

    fn candidate(property_id: i64, address_id: i64, lot_key: &str) -> CandidateRecord {
        CandidateRecord {
            property_id,
            property_no: property_id * 10,
            responsible_party: "Private Party".to_string(),
            property_status: PropertyStatus::Current,
            address_id,
            address_text: String::new(),
            suburb_and_postcode: String::new(),
            lot_key: lot_key.to_string(),
        }
    }

    fn lot(lot_key: &str, prop_id: i64) -> LotIdentifierMatch {
        LotIdentifierMatch {
            lot_key: lot_key.to_string(),
            prop_id,
            sp_prop_id: None,
            unique_id: prop_id,
        }
    }

    fn address(unique_id: i64, road: &str) -> ResolvedAddress {
        ResolvedAddress {
            unique_id,
            prop_id: Some(unique_id),
            road_1_name: Some(road.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn joins_through_lot_key_and_unique_id() {
        let candidates = vec![candidate(1, 11, "1/1//DP1")];
        let lots = vec![lot("1/1//DP1", 100)];
        let addresses = vec![address(100, "MAIN")];

        let linked = link_candidates(&candidates, &lots, &addresses);
        assert_eq!(linked.matched.len(), 1);
        assert_eq!(linked.matched[0].candidate.address_id, 11);
        assert_eq!(linked.matched[0].address.unique_id, 100);
        assert!(linked.unmatched.is_empty());
    }

    #[test]
    fn two_lots_resolving_to_same_address_collapse() {
        // One property, two lots, both resolving to the same GURAS record.
        let candidates = vec![candidate(1, 11, "1/1//DP1"), candidate(1, 11, "2/1//DP1")];
        let lots = vec![lot("1/1//DP1", 100), lot("2/1//DP1", 100)];
        let addresses = vec![address(100, "MAIN")];

        let linked = link_candidates(&candidates, &lots, &addresses);
        assert_eq!(linked.matched.len(), 1);
        assert!(linked.unmatched.is_empty());
    }

    #[test]
    fn distinct_addresses_for_one_property_both_survive() {
        let candidates = vec![candidate(1, 11, "1/1//DP1"), candidate(1, 11, "2/1//DP1")];
        let lots = vec![lot("1/1//DP1", 100), lot("2/1//DP1", 200)];
        let addresses = vec![address(100, "MAIN"), address(200, "HIGH")];

        let linked = link_candidates(&candidates, &lots, &addresses);
        assert_eq!(linked.matched.len(), 2);
    }

    #[test]
    fn candidates_without_external_record_are_reported_unmatched() {
        let candidates = vec![candidate(1, 11, "1/1//DP1"), candidate(2, 22, "9/9//DP9")];
        let lots = vec![lot("1/1//DP1", 100)];
        let addresses = vec![address(100, "MAIN")];

        let linked = link_candidates(&candidates, &lots, &addresses);
        assert_eq!(linked.matched.len(), 1);
        assert_eq!(linked.unmatched.len(), 1);
        assert_eq!(linked.unmatched[0].address_id, 22);
    }

    #[test]
    fn lot_resolved_but_address_missing_counts_as_unmatched() {
        let candidates = vec![candidate(1, 11, "1/1//DP1")];
        let lots = vec![lot("1/1//DP1", 100)];

        let linked = link_candidates(&candidates, &lots, &[]);
        assert!(linked.matched.is_empty());
        assert_eq!(linked.unmatched.len(), 1);
    }
}
