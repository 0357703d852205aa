//! CSV storage for decks.

use crate::error::{CoreError, CoreResult};
use crate::models::{Deck, VocabItem, DECK_HEADERS};
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Reads and writes one deck file.
#[derive(Debug, Clone)]
pub struct DeckStore {
    path: PathBuf,
}

impl DeckStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the deck.
    ///
    /// A missing file is an empty deck. Rows that cannot be parsed are
    /// skipped; columns missing from the header get default values.
    pub fn load(&self) -> CoreResult<Deck> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "deck file absent, starting empty");
            return Ok(Deck::new());
        }

        let file = File::open(&self.path).map_err(|err| self.load_error(err))?;
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(file);

        let headers = reader.headers().map_err(|err| self.load_error(err))?.clone();

        let mut items = Vec::new();
        let mut skipped = 0usize;
        for (row, result) in reader.records().enumerate() {
            let mut record = match result {
                Ok(record) => record,
                Err(err) if err.is_io_error() => return Err(self.load_error(err)),
                Err(err) => {
                    warn!(path = %self.path.display(), row, %err, "skipping unreadable row");
                    skipped += 1;
                    continue;
                }
            };

            if record.len() > headers.len() {
                warn!(
                    path = %self.path.display(),
                    row,
                    fields = record.len(),
                    expected = headers.len(),
                    "skipping row with too many fields"
                );
                skipped += 1;
                continue;
            }

            // Short rows are padded with empty cells.
            while record.len() < headers.len() {
                record.push_field("");
            }

            match record.deserialize::<VocabItem>(Some(&headers)) {
                Ok(item) => items.push(item),
                Err(err) => {
                    warn!(path = %self.path.display(), row, %err, "skipping malformed row");
                    skipped += 1;
                }
            }
        }

        debug!(path = %self.path.display(), rows = items.len(), skipped, "deck loaded");
        Ok(Deck::from_items(items))
    }

    /// Overwrite the file with the full deck.
    pub fn save(&self, deck: &Deck) -> CoreResult<()> {
        self.write(deck).map_err(|err| CoreError::DeckSave {
            path: self.path.clone(),
            reason: err.to_string(),
        })?;
        info!(path = %self.path.display(), rows = deck.len(), "deck saved");
        Ok(())
    }

    /// Write a header-only deck file.
    pub fn create_empty(&self) -> CoreResult<()> {
        self.save(&Deck::new())
    }

    fn write(&self, deck: &Deck) -> CoreResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        // Header is written by hand so empty decks still carry the schema.
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_path(&self.path)?;
        writer.write_record(DECK_HEADERS)?;
        for item in deck.iter() {
            writer.serialize(item)?;
        }
        writer.flush()?;
        Ok(())
    }

    fn load_error(&self, err: impl std::fmt::Display) -> CoreError {
        CoreError::DeckLoad {
            path: self.path.clone(),
            reason: err.to_string(),
        }
    }
}
