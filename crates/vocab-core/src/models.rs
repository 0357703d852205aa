//! Data models for the vocabulary trainer.

use serde::{Deserialize, Serialize};

/// Column headers written to every deck file, in field order.
pub const DECK_HEADERS: [&str; 9] = [
    "Deutsch",
    "Farsi",
    "English",
    "Beispielsatz",
    "Beispielsatz_Farsi",
    "Status",
    "Präposition",
    "Artikel",
    "Plural",
];

/// Self-reported difficulty of an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "&'static str")]
pub enum Status {
    /// Not yet rated.
    #[default]
    Neutral,
    /// Hard, shown more often.
    Red,
    /// Easy, shown rarely.
    Green,
}

impl Status {
    /// Get display name. Also the stored cell value.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Neutral => "Neutral",
            Self::Red => "Red",
            Self::Green => "Green",
        }
    }

    /// Parse a stored cell value. Only the exact names `Red` and `Green`
    /// are recognized; anything else is `Neutral`.
    pub fn parse(value: &str) -> Self {
        match value {
            "Red" => Self::Red,
            "Green" => Self::Green,
            _ => Self::Neutral,
        }
    }
}

impl From<String> for Status {
    fn from(value: String) -> Self {
        Self::parse(&value)
    }
}

impl From<Status> for &'static str {
    fn from(status: Status) -> Self {
        status.name()
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// One row of a deck.
///
/// Every text field is a plain `String`; empty cells load as `""`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VocabItem {
    /// Word or phrase in the target language.
    #[serde(rename = "Deutsch", alias = "term_native")]
    pub term_native: String,
    /// Translation in the reference language.
    #[serde(rename = "Farsi", alias = "term_translation")]
    pub term_translation: String,
    /// Translation in a third language.
    #[serde(rename = "English", alias = "term_translation_secondary")]
    pub term_translation_secondary: String,
    /// Sentence using `term_native`.
    #[serde(rename = "Beispielsatz", alias = "example_sentence")]
    pub example_sentence: String,
    /// Translation of the example sentence.
    #[serde(rename = "Beispielsatz_Farsi", alias = "example_sentence_translation")]
    pub example_sentence_translation: String,
    /// Difficulty status.
    #[serde(rename = "Status", alias = "status")]
    pub status: Status,
    /// Governing preposition, e.g. `an/auf + Dativ`.
    #[serde(rename = "Präposition", alias = "grammar_tag_primary")]
    pub grammar_tag_primary: String,
    /// Grammatical article.
    #[serde(rename = "Artikel", alias = "grammar_tag_secondary")]
    pub grammar_tag_secondary: String,
    /// Plural form.
    #[serde(rename = "Plural", alias = "plural_form")]
    pub plural_form: String,
}

impl VocabItem {
    /// Create an item with just the native term and its translation.
    pub fn new(term_native: impl Into<String>, term_translation: impl Into<String>) -> Self {
        Self {
            term_native: term_native.into(),
            term_translation: term_translation.into(),
            ..Self::default()
        }
    }

    /// Set the example sentence.
    pub fn with_sentence(mut self, sentence: impl Into<String>) -> Self {
        self.example_sentence = sentence.into();
        self
    }

    /// Set the governing preposition.
    pub fn with_preposition(mut self, tag: impl Into<String>) -> Self {
        self.grammar_tag_primary = tag.into();
        self
    }

    /// Set the article.
    pub fn with_article(mut self, article: impl Into<String>) -> Self {
        self.grammar_tag_secondary = article.into();
        self
    }

    /// Set the status.
    pub fn with_status(mut self, status: Status) -> Self {
        self.status = status;
        self
    }

    /// Whether the row is a blank placeholder.
    pub fn is_blank(&self) -> bool {
        self.term_native.trim().is_empty()
    }

    /// Classify the item. Computed per item, never stored.
    pub fn mode(&self) -> CardMode {
        if self.grammar_tag_primary.trim().is_empty() {
            CardMode::Article
        } else {
            CardMode::Preposition
        }
    }

    /// The answer revealed on a flashcard, if the item has one.
    pub fn answer(&self) -> Option<&str> {
        let answer = match self.mode() {
            CardMode::Preposition => self.grammar_tag_primary.trim(),
            CardMode::Article => self.grammar_tag_secondary.trim(),
        };
        (!answer.is_empty()).then_some(answer)
    }

    /// The term hidden in the cloze rendering of the example sentence.
    ///
    /// `an/auf + Dativ` hides `an`; article-mode items hide the term itself.
    pub fn cloze_term(&self) -> &str {
        match self.mode() {
            CardMode::Preposition => {
                let before_case = self.grammar_tag_primary.split('+').next().unwrap_or_default();
                before_case.split('/').next().unwrap_or_default().trim()
            }
            CardMode::Article => &self.term_native,
        }
    }

    /// Cloze rendering of the example sentence.
    pub fn masked_sentence(&self) -> String {
        crate::masking::mask(&self.example_sentence, self.cloze_term())
    }
}

/// Which grammar feature a card drills.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardMode {
    /// Verb with governing preposition.
    Preposition,
    /// Noun with article (or a word with neither).
    Article,
}

impl CardMode {
    /// Get display name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Preposition => "Preposition",
            Self::Article => "Article",
        }
    }

    /// Question shown before the answer is revealed.
    pub fn prompt(&self) -> &'static str {
        match self {
            Self::Preposition => "Which preposition?",
            Self::Article => "Which article?",
        }
    }
}

/// Check a typed answer against the native term.
///
/// Case-insensitive containment of the trimmed input; blank input is wrong.
pub fn check_written_answer(item: &VocabItem, input: &str) -> bool {
    let input = input.trim().to_lowercase();
    !input.is_empty() && item.term_native.to_lowercase().contains(&input)
}

/// Item counts per status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusCounts {
    pub red: usize,
    pub neutral: usize,
    pub green: usize,
}

impl StatusCounts {
    /// Total items counted.
    pub fn total(&self) -> usize {
        self.red + self.neutral + self.green
    }
}

/// All items of one module, in file order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Deck {
    items: Vec<VocabItem>,
}

impl Deck {
    /// Create an empty deck.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a deck from rows.
    pub fn from_items(items: Vec<VocabItem>) -> Self {
        Self { items }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&VocabItem> {
        self.items.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut VocabItem> {
        self.items.get_mut(index)
    }

    pub fn items(&self) -> &[VocabItem] {
        &self.items
    }

    pub fn iter(&self) -> impl Iterator<Item = &VocabItem> {
        self.items.iter()
    }

    /// Append a row.
    pub fn push(&mut self, item: VocabItem) {
        self.items.push(item);
    }

    /// Remove a row, shifting later rows up.
    pub fn remove(&mut self, index: usize) -> Option<VocabItem> {
        (index < self.items.len()).then(|| self.items.remove(index))
    }

    /// Replace every row.
    pub fn replace_items(&mut self, items: Vec<VocabItem>) {
        self.items = items;
    }

    /// Count items per status.
    pub fn status_counts(&self) -> StatusCounts {
        self.items.iter().fold(StatusCounts::default(), |mut counts, item| {
            match item.status {
                Status::Red => counts.red += 1,
                Status::Neutral => counts.neutral += 1,
                Status::Green => counts.green += 1,
            }
            counts
        })
    }
}

impl FromIterator<VocabItem> for Deck {
    fn from_iter<I: IntoIterator<Item = VocabItem>>(iter: I) -> Self {
        Self::from_items(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_parse() {
        assert_eq!(Status::parse("Red"), Status::Red);
        assert_eq!(Status::parse("Green"), Status::Green);
        assert_eq!(Status::parse("red"), Status::Neutral);
        assert_eq!(Status::parse(" Green "), Status::Neutral);
        assert_eq!(Status::parse("Neutral"), Status::Neutral);
        assert_eq!(Status::parse(""), Status::Neutral);
        assert_eq!(Status::parse("nan"), Status::Neutral);
        assert_eq!(Status::parse("Blue"), Status::Neutral);
    }

    #[test]
    fn test_mode_detection() {
        let verb = VocabItem::new("denken", "فکر کردن").with_preposition("an + Akk");
        assert_eq!(verb.mode(), CardMode::Preposition);

        let noun = VocabItem::new("Hund", "سگ").with_article("der");
        assert_eq!(noun.mode(), CardMode::Article);

        let blank_tag = VocabItem::new("gehen", "رفتن").with_preposition("   ");
        assert_eq!(blank_tag.mode(), CardMode::Article);
    }

    #[test]
    fn test_answer() {
        let verb = VocabItem::new("denken", "").with_preposition("an/auf + Dativ");
        assert_eq!(verb.answer(), Some("an/auf + Dativ"));

        let noun = VocabItem::new("Hund", "").with_article("der");
        assert_eq!(noun.answer(), Some("der"));

        let adjective = VocabItem::new("schnell", "");
        assert_eq!(adjective.answer(), None);
    }

    #[test]
    fn test_cloze_term() {
        let verb = VocabItem::new("denken", "").with_preposition("an/auf + Dativ");
        assert_eq!(verb.cloze_term(), "an");

        let verb = VocabItem::new("warten", "").with_preposition("auf + Akk");
        assert_eq!(verb.cloze_term(), "auf");

        let noun = VocabItem::new("Hund", "").with_article("der");
        assert_eq!(noun.cloze_term(), "Hund");
    }

    #[test]
    fn test_masked_sentence_preposition_mode() {
        let verb = VocabItem::new("denken", "")
            .with_preposition("an/auf + Dativ")
            .with_sentence("Ich denke an dich.");
        assert_eq!(verb.masked_sentence(), "Ich denke ___ dich.");
        assert_eq!(verb.cloze_term(), "an");
    }

    #[test]
    fn test_check_written_answer() {
        let item = VocabItem::new("sich freuen", "خوشحال شدن");
        assert!(check_written_answer(&item, "freuen"));
        assert!(check_written_answer(&item, "  Sich Freuen "));
        assert!(!check_written_answer(&item, "laufen"));
        assert!(!check_written_answer(&item, "   "));
    }

    #[test]
    fn test_deck_status_counts() {
        let deck: Deck = vec![
            VocabItem::new("a", "").with_status(Status::Red),
            VocabItem::new("b", ""),
            VocabItem::new("c", "").with_status(Status::Green),
            VocabItem::new("d", "").with_status(Status::Red),
        ]
        .into_iter()
        .collect();

        let counts = deck.status_counts();
        assert_eq!(counts, StatusCounts { red: 2, neutral: 1, green: 1 });
        assert_eq!(counts.total(), 4);
    }

    #[test]
    fn test_deck_remove_out_of_range() {
        let mut deck = Deck::from_items(vec![VocabItem::new("a", "")]);
        assert!(deck.remove(3).is_none());
        assert_eq!(deck.remove(0).map(|i| i.term_native), Some("a".to_string()));
        assert!(deck.is_empty());
    }
}
