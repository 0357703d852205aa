//! Core of the vocabulary trainer.
//!
//! Decks of bilingual word pairs are stored as CSV files, one per module,
//! and looked up through a JSON module registry. Cards are drawn by a
//! weighted random policy that favours items the learner marked as hard.
//!
//! # Components
//!
//! - **Deck store**: tolerant CSV load, full overwrite on save
//! - **Module registry**: module name to deck file, created on first run
//! - **Selection**: status-weighted sampling with replacement
//! - **Session**: current card, back history, reveal flag
//! - **Masking**: cloze rendering of example sentences
//! - **Recorder**: write-through status updates
//!
//! [`Trainer`] bundles these behind the calls a front-end needs.

pub mod deck_store;
pub mod error;
pub mod masking;
pub mod models;
pub mod navigator;
pub mod recorder;
pub mod registry;
pub mod selection;
pub mod trainer;

pub use deck_store::DeckStore;
pub use error::{CoreError, CoreResult};
pub use masking::{mask, PLACEHOLDER};
pub use models::{check_written_answer, CardMode, Deck, Status, StatusCounts, VocabItem, DECK_HEADERS};
pub use navigator::Session;
pub use recorder::record_review;
pub use registry::{location_for, ModuleRegistry, CUSTOM_DECK_SUFFIX, DEFAULT_MODULE};
pub use selection::{SelectionPolicy, SelectionWeights, WeightedRandom};
pub use trainer::Trainer;
