// src/domain/validate.rs

use std::collections::HashMap;

use crate::domain::models::{
    ResolvedAddress, REASON_INVALID_FIELD, REASON_SUBURB_UNMATCHED,
};
use crate::domain::normalize::{number_or_empty, text_or_empty, title_case};

pub const ADDRESS_TYPE_STREET: i64 = 3;
pub const ADDRESS_TYPE_OTHER: i64 = 6;

const DEFAULT_UNIT_TYPE: &str = "Unit";
const DEFAULT_LEVEL_TYPE: &str = "Level";

/// Run-scoped snapshot of the reference vocabularies. The vocabulary tables
/// are read-only while a run is in flight.
#[derive(Debug, Clone, Default)]
pub struct Vocab {
    pub road_types: Vec<String>,
    pub unit_types: Vec<String>,
    pub level_types: Vec<String>,
    /// (upper-cased suburb name, postcode) -> internal suburb id.
    pub suburbs: HashMap<(String, i64), i64>,
}

impl Vocab {
    /// Case-insensitive name plus exact postcode; zero means no match.
    pub fn suburb_id(&self, name: &str, postcode: i64) -> i64 {
        self.suburbs
            .get(&(name.to_uppercase(), postcode))
            .copied()
            .unwrap_or(0)
    }
}

/// The full normalized field set written back to the address row. All
/// values are strings; absent components are empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizedAddress {
    pub house_no_1_prefix: String,
    pub house_no_1: String,
    pub house_no_1_suffix: String,
    pub house_no_2_prefix: String,
    pub house_no_2: String,
    pub house_no_2_suffix: String,

    pub road_1_name: String,
    pub road_1_type: String,
    pub road_1_suffix: String,
    pub road_2_name: String,
    pub road_2_type: String,
    pub road_2_suffix: String,

    pub unit_type: String,
    pub unit_no_prefix: String,
    pub unit_no: String,
    pub unit_no_suffix: String,

    pub level_type: String,
    pub level_no_prefix: String,
    pub level_no: String,
    pub level_no_suffix: String,

    pub building_name: String,
    pub location_descriptor: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationVerdict {
    pub fields: NormalizedAddress,
    /// Resolved internal suburb id, or zero when unmatched.
    pub suburb_id: i64,
    pub address_type_id: i64,
    pub valid: bool,
    pub reason: Option<&'static str>,
}

/// Normalizes and validates one resolved address against the vocabularies.
/// Each field group gets an independent verdict; the row is writable only
/// when every group passes. A suburb failure takes priority in the reported
/// reason.
pub fn validate(address: &ResolvedAddress, vocab: &Vocab) -> ValidationVerdict {
    let mut fields = NormalizedAddress {
        house_no_1_prefix: text_or_empty(&address.house_no_1_prefix),
        house_no_1: number_or_empty(address.house_no_1),
        house_no_1_suffix: text_or_empty(&address.house_no_1_suffix),
        house_no_2_prefix: text_or_empty(&address.house_no_2_prefix),
        house_no_2: number_or_empty(address.house_no_2),
        house_no_2_suffix: text_or_empty(&address.house_no_2_suffix),

        road_1_name: title_case(&text_or_empty(&address.road_1_name)),
        road_1_type: text_or_empty(&address.road_1_type),
        road_1_suffix: title_case(&text_or_empty(&address.road_1_suffix)),
        road_2_name: title_case(&text_or_empty(&address.road_2_name)),
        road_2_type: text_or_empty(&address.road_2_type),
        road_2_suffix: title_case(&text_or_empty(&address.road_2_suffix)),

        unit_type: text_or_empty(&address.unit_type),
        unit_no_prefix: text_or_empty(&address.unit_no_prefix),
        unit_no: number_or_empty(address.unit_no),
        unit_no_suffix: text_or_empty(&address.unit_no_suffix),

        level_type: text_or_empty(&address.level_type),
        level_no_prefix: text_or_empty(&address.level_no_prefix),
        level_no: text_or_empty(&address.level_no),
        level_no_suffix: text_or_empty(&address.level_no_suffix),

        building_name: title_case(&text_or_empty(&address.building_name)),
        location_descriptor: title_case(&text_or_empty(&address.location_descriptor)),
    };

    let road_1_valid = check_road_type(&mut fields.road_1_type, &vocab.road_types);
    let road_2_valid = check_road_type(&mut fields.road_2_type, &vocab.road_types);
    let unit_valid = check_unit(&mut fields.unit_type, &fields.unit_no, &vocab.unit_types);
    let level_valid = check_level(&mut fields.level_type, &fields.level_no);

    let suburb_id = vocab.suburb_id(
        address.suburb_name.as_deref().unwrap_or(""),
        address.postcode.unwrap_or(0),
    );
    let suburb_valid = suburb_id > 0;

    // Street addresses carry a road name; everything else is "other".
    let address_type_id = if fields.road_1_name.is_empty() {
        ADDRESS_TYPE_OTHER
    } else {
        ADDRESS_TYPE_STREET
    };

    let valid = road_1_valid && road_2_valid && unit_valid && level_valid && suburb_valid;
    let reason = if valid {
        None
    } else if !suburb_valid {
        Some(REASON_SUBURB_UNMATCHED)
    } else {
        Some(REASON_INVALID_FIELD)
    };

    ValidationVerdict {
        fields,
        suburb_id,
        address_type_id,
        valid,
        reason,
    }
}

fn canonical_match<'a>(vocab: &'a [String], value: &str) -> Option<&'a String> {
    vocab.iter().find(|name| name.eq_ignore_ascii_case(value))
}

/// Empty road types are valid; non-empty ones must match the vocabulary and
/// are rewritten to the vocabulary's canonical casing.
fn check_road_type(road_type: &mut String, vocab: &[String]) -> bool {
    if road_type.is_empty() {
        return true;
    }
    match canonical_match(vocab, road_type) {
        Some(canonical) => {
            *road_type = canonical.clone();
            true
        }
        None => false,
    }
}

/// A unit number with no type defaults to "Unit". A unit number with a type
/// must match the vocabulary, except for the legacy "U" abbreviation which
/// maps straight to "Unit". A type with no number is invalid.
fn check_unit(unit_type: &mut String, unit_no: &str, vocab: &[String]) -> bool {
    if !unit_no.is_empty() && !unit_type.is_empty() {
        if let Some(canonical) = canonical_match(vocab, unit_type) {
            *unit_type = canonical.clone();
            return true;
        }
        if unit_type == "U" {
            *unit_type = DEFAULT_UNIT_TYPE.to_string();
            return true;
        }
        false
    } else if !unit_no.is_empty() {
        *unit_type = DEFAULT_UNIT_TYPE.to_string();
        true
    } else {
        // No number: valid only when the type is empty too.
        unit_type.is_empty()
    }
}

/// A level number with no type defaults to "Level". A level number with a
/// type is accepted as-is, with no vocabulary cross-check; this is
/// asymmetric with unit handling and preserved deliberately.
fn check_level(level_type: &mut String, level_no: &str) -> bool {
    if !level_no.is_empty() && !level_type.is_empty() {
        true
    } else if !level_no.is_empty() {
        *level_type = DEFAULT_LEVEL_TYPE.to_string();
        true
    } else {
        level_type.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_vocab() -> Vocab {
        let mut suburbs = HashMap::new();
        suburbs.insert(("PARRAMATTA".to_string(), 2150), 42);
        suburbs.insert(("NEWCASTLE".to_string(), 2300), 7);
        Vocab {
            road_types: vec!["Street".to_string(), "Road".to_string(), "Avenue".to_string()],
            unit_types: vec!["Unit".to_string(), "Shop".to_string()],
            level_types: vec!["Level".to_string(), "Floor".to_string()],
            suburbs,
        }
    }

    fn base_address() -> ResolvedAddress {
        ResolvedAddress {
            unique_id: 1,
            prop_id: Some(1),
            road_1_name: Some("MACQUARIE".to_string()),
            road_1_type: Some("STREET".to_string()),
            house_no_1: Some(12),
            suburb_name: Some("Parramatta".to_string()),
            postcode: Some(2150),
            ..Default::default()
        }
    }

    #[test]
    fn road_type_recased_to_vocabulary_spelling() {
        let verdict = validate(&base_address(), &test_vocab());
        assert!(verdict.valid);
        assert_eq!(verdict.fields.road_1_type, "Street");
        assert_eq!(verdict.fields.road_1_name, "Macquarie");
    }

    #[test]
    fn unknown_road_type_is_invalid() {
        let mut address = base_address();
        address.road_1_type = Some("Boulevardo".to_string());
        let verdict = validate(&address, &test_vocab());
        assert!(!verdict.valid);
        assert_eq!(verdict.reason, Some(REASON_INVALID_FIELD));
    }

    #[test]
    fn empty_road_types_are_valid() {
        let mut address = base_address();
        address.road_1_type = None;
        address.road_2_type = None;
        let verdict = validate(&address, &test_vocab());
        assert!(verdict.valid);
    }

    #[test]
    fn unit_number_without_type_defaults_to_unit() {
        let mut address = base_address();
        address.unit_no = Some(5);
        address.unit_type = None;
        let verdict = validate(&address, &test_vocab());
        assert!(verdict.valid);
        assert_eq!(verdict.fields.unit_type, "Unit");
    }

    #[test]
    fn no_unit_data_is_valid_with_no_defaulting() {
        let verdict = validate(&base_address(), &test_vocab());
        assert!(verdict.valid);
        assert_eq!(verdict.fields.unit_type, "");
    }

    #[test]
    fn unit_type_u_falls_back_to_unit() {
        let mut address = base_address();
        address.unit_no = Some(5);
        address.unit_type = Some("U".to_string());
        let verdict = validate(&address, &test_vocab());
        assert!(verdict.valid);
        assert_eq!(verdict.fields.unit_type, "Unit");
    }

    #[test]
    fn unknown_unit_type_is_invalid() {
        let mut address = base_address();
        address.unit_no = Some(5);
        address.unit_type = Some("Pod".to_string());
        let verdict = validate(&address, &test_vocab());
        assert!(!verdict.valid);
        assert_eq!(verdict.reason, Some(REASON_INVALID_FIELD));
    }

    #[test]
    fn unit_type_without_number_is_invalid() {
        let mut address = base_address();
        address.unit_type = Some("Unit".to_string());
        let verdict = validate(&address, &test_vocab());
        assert!(!verdict.valid);
    }

    #[test]
    fn level_number_without_type_defaults_to_level() {
        let mut address = base_address();
        address.level_no = Some("3".to_string());
        let verdict = validate(&address, &test_vocab());
        assert!(verdict.valid);
        assert_eq!(verdict.fields.level_type, "Level");
    }

    // Level types are not cross-checked against the vocabulary when a
    // number is present, unlike unit types. Known inconsistency in the
    // rule set, kept as-is.
    #[test]
    fn unknown_level_type_accepted_when_number_present() {
        let vocab = test_vocab();
        let mut address = base_address();
        address.level_no = Some("3".to_string());
        address.level_type = Some("Mezzanine-ish".to_string());
        assert!(!vocab
            .level_types
            .iter()
            .any(|t| t.eq_ignore_ascii_case("Mezzanine-ish")));

        let verdict = validate(&address, &vocab);
        assert!(verdict.valid);
        assert_eq!(verdict.fields.level_type, "Mezzanine-ish");
    }

    #[test]
    fn suburb_resolves_case_insensitively_with_exact_postcode() {
        let verdict = validate(&base_address(), &test_vocab());
        assert_eq!(verdict.suburb_id, 42);

        let mut address = base_address();
        address.postcode = Some(2151);
        let verdict = validate(&address, &test_vocab());
        assert_eq!(verdict.suburb_id, 0);
        assert!(!verdict.valid);
        assert_eq!(verdict.reason, Some(REASON_SUBURB_UNMATCHED));
    }

    #[test]
    fn suburb_failure_outranks_field_failure_in_reason() {
        let mut address = base_address();
        address.postcode = Some(9999);
        address.road_1_type = Some("Boulevardo".to_string());
        let verdict = validate(&address, &test_vocab());
        assert!(!verdict.valid);
        assert_eq!(verdict.reason, Some(REASON_SUBURB_UNMATCHED));
    }

    #[test]
    fn address_type_follows_road_name_presence() {
        let verdict = validate(&base_address(), &test_vocab());
        assert_eq!(verdict.address_type_id, ADDRESS_TYPE_STREET);

        // Address type derivation is independent of validity.
        let mut address = base_address();
        address.road_1_name = None;
        address.road_1_type = None;
        address.postcode = Some(9999);
        let verdict = validate(&address, &test_vocab());
        assert_eq!(verdict.address_type_id, ADDRESS_TYPE_OTHER);
        assert!(!verdict.valid);
    }

    #[test]
    fn validation_is_idempotent_on_normalized_values() {
        let vocab = test_vocab();
        let mut address = base_address();
        address.unit_no = Some(5);
        address.unit_type = Some("shop".to_string());
        address.building_name = Some("THE OLD MILL".to_string());

        let first = validate(&address, &vocab);
        assert!(first.valid);

        // Feed the normalized output back through.
        let normalized = ResolvedAddress {
            road_1_name: Some(first.fields.road_1_name.clone()),
            road_1_type: Some(first.fields.road_1_type.clone()),
            unit_type: Some(first.fields.unit_type.clone()),
            building_name: Some(first.fields.building_name.clone()),
            ..address.clone()
        };
        let second = validate(&normalized, &vocab);
        assert_eq!(second.valid, first.valid);
        assert_eq!(second.fields, first.fields);
        assert_eq!(second.suburb_id, first.suburb_id);
        assert_eq!(second.address_type_id, first.address_type_id);
    }
}
