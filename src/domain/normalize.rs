// src/domain/normalize.rs

/// Title-cases free text: each alphabetic run starts upper, the rest lower.
/// Non-alphabetic characters pass through and restart capitalization, so
/// "O'BRIEN CREEK" becomes "O'Brien Creek".
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_alpha = false;
    for ch in s.chars() {
        if ch.is_alphabetic() {
            if prev_alpha {
                out.extend(ch.to_lowercase());
            } else {
                out.extend(ch.to_uppercase());
            }
            prev_alpha = true;
        } else {
            out.push(ch);
            prev_alpha = false;
        }
    }
    out
}

pub fn text_or_empty(value: &Option<String>) -> String {
    value.clone().unwrap_or_default()
}

/// Absent numbers render as the empty string, matching how the registry
/// stores structured number columns.
pub fn number_or_empty(value: Option<i64>) -> String {
    value.map(|n| n.to_string()).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_case_basic() {
        assert_eq!(title_case("MACQUARIE"), "Macquarie");
        assert_eq!(title_case("main street"), "Main Street");
        assert_eq!(title_case(""), "");
    }

    #[test]
    fn title_case_restarts_after_non_alpha() {
        assert_eq!(title_case("O'BRIEN"), "O'Brien");
        assert_eq!(title_case("mount victoria-east"), "Mount Victoria-East");
    }

    #[test]
    fn title_case_is_idempotent() {
        let once = title_case("blue GUM creek");
        assert_eq!(title_case(&once), once);
    }

    #[test]
    fn numbers_render_empty_when_absent() {
        assert_eq!(number_or_empty(Some(12)), "12");
        assert_eq!(number_or_empty(None), "");
    }
}
