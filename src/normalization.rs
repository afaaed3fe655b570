/// Normalizes user input by stripping surrounding whitespace and
/// composing it into Unicode Normalization Form C.
///
/// ```
/// use intake::normalization::normalize_text;
/// assert_eq!(normalize_text(" Zoe\u{0301} "), "Zoé");
/// ```
pub fn normalize_text(text: impl AsRef<str>) -> String {
    use unicode_normalization::UnicodeNormalization;

    text.as_ref().trim().nfc().collect()
}

/// Normalizes each item of a multiple choice, dropping blanks and
/// repeats while keeping the order in which items were chosen.
pub fn normalize_list(items: &[String]) -> Vec<String> {
    let mut normalized: Vec<String> = Vec::with_capacity(items.len());

    for item in items.iter().map(normalize_text) {
        if !item.is_empty() && !normalized.contains(&item) {
            normalized.push(item);
        }
    }

    normalized
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use unicode_normalization::is_nfc;

    use super::{normalize_list, normalize_text};

    fn count_whitespace(s: impl AsRef<str>) -> usize {
        s.as_ref().chars().filter(|c| c.is_whitespace()).count()
    }

    #[test]
    fn lists_drop_blanks_and_repeats() {
        let items = vec![
            " cold-calling".to_owned(),
            "".to_owned(),
            "lead-generation".to_owned(),
            "cold-calling ".to_owned(),
            "   ".to_owned(),
        ];

        assert_eq!(
            normalize_list(&items),
            vec!["cold-calling".to_owned(), "lead-generation".to_owned()]
        );
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 2000, ..ProptestConfig::default()
        })]

        #[test]
        fn normalization_works(string in "(\\S.*\\S|\\S+)", space_before in "\\s*", space_after in "\\s*") {
            let normalized = normalize_text(format!("{}{}{}", space_before, string, space_after));

            prop_assert!(is_nfc(&normalized), "{:?} (normalized form of {:?}) is in NFC", normalized, string);

            prop_assert!(!normalized.starts_with(char::is_whitespace) && !normalized.ends_with(char::is_whitespace), "{:?} (normalized form of {:?}) has no leading or trailing whitespace", normalized, string);

            prop_assert_eq!(count_whitespace(&normalized), count_whitespace(normalized.trim()), "{:?} (normalized form of {:?}) preserves inner whitespace", normalized, string);
        }

        #[test]
        fn whitespace_only_is_empty(space in "\\s*") {
            prop_assert_eq!(normalize_text(space), "");
        }
    }
}
