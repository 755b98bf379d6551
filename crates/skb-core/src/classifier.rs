//! Keyword classifier: decides whether a message offers something, seeks
//! something, or is noise, and files it under a category.
//!
//! Pure and deterministic: same text in, same verdict out. Unrecognized or
//! ambiguous input always degrades to [`Classification::Ignore`], never to a
//! guess.

use regex::Regex;

use crate::{
    domain::{Classification, ListingIntent, QueryIntent},
    lexicon::Lexicon,
};

/// Classify one incoming message.
///
/// Rules, in priority order:
/// 1. Noise pre-filter (greetings, bare links, < 5 chars) -> `Ignore`.
/// 2. Intent markers: listing markers take priority over query markers when
///    both are present; neither -> `Ignore`.
/// 3. Category: earliest lexicon trigger; none -> `Ignore` regardless of
///    intent (an intent without a category is not actionable).
/// 4. Subject: first subject-pattern hit for the category, falling back to
///    the text at the trigger position.
/// 5. Listings only: contact number extraction (best-effort, may be absent).
pub fn classify(lexicon: &Lexicon, text: &str) -> Classification {
    if lexicon.should_ignore(text) {
        return Classification::Ignore;
    }

    let normalized = normalize(text);

    let is_listing = lexicon.has_listing_marker(&normalized);
    let is_query = lexicon.has_query_marker(&normalized);
    if !is_listing && !is_query {
        return Classification::Ignore;
    }

    let Some((category, pos)) = lexicon.lookup(&normalized) else {
        return Classification::Ignore;
    };

    let subject = lexicon
        .subject_for(category, &normalized)
        .unwrap_or_else(|| token_at(&normalized, pos));

    // Listing markers win over query markers: a user describing what they
    // have while asking is more often an offer.
    if is_listing {
        return Classification::Listing(ListingIntent {
            category,
            subject,
            contact: extract_contact(text),
        });
    }

    Classification::Query(QueryIntent { category, subject })
}

/// Lowercase, punctuation to spaces, whitespace collapsed.
pub fn normalize(text: &str) -> String {
    let lowered = text.to_lowercase();
    let mapped: String = lowered
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '+' {
                c
            } else {
                ' '
            }
        })
        .collect();
    mapped.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Extract an Indian mobile number: 10 digits starting 6-9, optionally
/// prefixed with `+91`/`91`. Normalized to the trailing 10 digits.
pub fn extract_contact(text: &str) -> Option<String> {
    // Compiled per call; classification volume is one group message at a
    // time, so this stays off any hot path.
    let re = Regex::new(r"(?:\+?91[\s-]?)?[6-9]\d{9}").expect("valid contact regex");
    let bytes = text.as_bytes();
    for m in re.find_iter(text) {
        // A phone number is not part of a longer digit run (account numbers,
        // order ids). The regex cannot see past its own match, so check the
        // surrounding characters here.
        let left_ok = m.start() == 0 || !bytes[m.start() - 1].is_ascii_digit();
        let right_ok = m.end() == bytes.len() || !bytes[m.end()].is_ascii_digit();
        if !left_ok || !right_ok {
            continue;
        }
        let digits: String = m.as_str().chars().filter(|c| c.is_ascii_digit()).collect();
        if digits.len() < 10 {
            continue;
        }
        let tail = &digits[digits.len() - 10..];
        if matches!(tail.as_bytes()[0], b'6'..=b'9') {
            return Some(tail.to_string());
        }
    }
    None
}

/// The whitespace-delimited token covering byte position `pos`.
fn token_at(text: &str, pos: usize) -> String {
    let start = text[..pos].rfind(' ').map(|i| i + 1).unwrap_or(0);
    let end = text[pos..]
        .find(' ')
        .map(|i| pos + i)
        .unwrap_or_else(|| text.len());
    text[start..end].to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexicon::Category;

    fn lex() -> Lexicon {
        Lexicon::new()
    }

    #[test]
    fn selling_flat_with_contact_is_a_listing() {
        let got = classify(
            &lex(),
            "Selling my 2BHK flat in Tower B, 75L. Contact: 9876543210",
        );
        let Classification::Listing(intent) = got else {
            panic!("expected a listing, got {got:?}");
        };
        assert_eq!(intent.category, Category::Property);
        assert_eq!(intent.subject, "2bhk");
        assert_eq!(intent.contact.as_deref(), Some("9876543210"));
    }

    #[test]
    fn looking_for_flat_is_a_query() {
        let got = classify(&lex(), "Looking for 2BHK to buy, any leads?");
        let Classification::Query(intent) = got else {
            panic!("expected a query, got {got:?}");
        };
        assert_eq!(intent.category, Category::Property);
        assert_eq!(intent.subject, "2bhk");
    }

    #[test]
    fn greetings_are_ignored() {
        assert_eq!(classify(&lex(), "Good morning everyone!"), Classification::Ignore);
        assert_eq!(classify(&lex(), "ok"), Classification::Ignore);
    }

    #[test]
    fn intent_without_category_is_ignored() {
        assert_eq!(
            classify(&lex(), "looking for something interesting"),
            Classification::Ignore
        );
    }

    #[test]
    fn category_without_intent_is_ignored() {
        assert_eq!(
            classify(&lex(), "the sofa in the lobby is blue"),
            Classification::Ignore
        );
    }

    #[test]
    fn listing_marker_wins_over_query_marker() {
        // Both "selling" and "anyone ... want" present; listing priority.
        let got = classify(&lex(), "Selling old sofa, anyone want it?");
        assert!(matches!(got, Classification::Listing(_)), "got {got:?}");
    }

    #[test]
    fn hinglish_query_is_classified() {
        let got = classify(&lex(), "Maid chahiye for morning work");
        let Classification::Query(intent) = got else {
            panic!("expected a query, got {got:?}");
        };
        assert_eq!(intent.category, Category::MaidCook);
        assert_eq!(intent.subject, "maid");
    }

    #[test]
    fn classify_is_idempotent() {
        let lex = lex();
        let text = "Need electrician urgently, fan not working";
        assert_eq!(classify(&lex, text), classify(&lex, text));
    }

    #[test]
    fn earliest_category_mention_wins() {
        let got = classify(&lex(), "selling sofa and a table, flat not included");
        let Classification::Listing(intent) = got else {
            panic!("expected a listing, got {got:?}");
        };
        assert_eq!(intent.category, Category::Furniture);
    }

    #[test]
    fn contact_accepts_country_code_variants() {
        assert_eq!(extract_contact("+91 9876543210").as_deref(), Some("9876543210"));
        assert_eq!(extract_contact("919876543210").as_deref(), Some("9876543210"));
        assert_eq!(extract_contact("call 9876543210 now").as_deref(), Some("9876543210"));
    }

    #[test]
    fn short_or_malformed_numbers_yield_no_contact() {
        assert!(extract_contact("call 987654321").is_none());
        assert!(extract_contact("5876543210").is_none());
        assert!(extract_contact("no number here").is_none());
    }

    #[test]
    fn digit_runs_longer_than_a_number_yield_no_contact() {
        // 16-digit account number with a valid-looking tail inside it.
        assert!(extract_contact("a/c 1234987654321099").is_none());
        // Valid number glued to trailing digits.
        assert!(extract_contact("98765432101234").is_none());
        // A later standalone number is still found.
        assert_eq!(
            extract_contact("ref 1234987654321099, call 9876543210").as_deref(),
            Some("9876543210")
        );
    }

    #[test]
    fn normalize_strips_punctuation_and_case() {
        assert_eq!(
            normalize("Selling:  my 2BHK, flat!!"),
            "selling my 2bhk flat"
        );
    }
}
