//! Cloze rendering of example sentences.

use regex::{NoExpand, RegexBuilder};

/// Placeholder that replaces the hidden term.
pub const PLACEHOLDER: &str = "___";

/// Hide every case-insensitive occurrence of `term` in `sentence`.
///
/// The term is matched as literal text. Empty input is returned unchanged.
pub fn mask(sentence: &str, term: &str) -> String {
    if sentence.is_empty() || term.is_empty() {
        return sentence.to_string();
    }

    match RegexBuilder::new(&regex::escape(term))
        .case_insensitive(true)
        .build()
    {
        Ok(pattern) => pattern.replace_all(sentence, NoExpand(PLACEHOLDER)).into_owned(),
        Err(err) => {
            // Only reachable when the escaped term exceeds the regex size limit.
            tracing::warn!(%err, "cloze pattern rejected, showing sentence unmasked");
            sentence.to_string()
        }
    }
}
