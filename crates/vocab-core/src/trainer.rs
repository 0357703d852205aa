//! Front-end facing entry point tying registry, storage, selection and session together.

use crate::deck_store::DeckStore;
use crate::error::{CoreError, CoreResult};
use crate::models::{Deck, Status, VocabItem};
use crate::navigator::Session;
use crate::recorder;
use crate::registry::{location_for, ModuleRegistry, CUSTOM_DECK_SUFFIX};
use crate::selection::{SelectionPolicy, SelectionWeights, WeightedRandom};
use std::collections::VecDeque;
use std::path::PathBuf;
use tracing::{debug, info, warn};

/// Deck and session of the selected module.
struct ActiveModule {
    store: DeckStore,
    deck: Deck,
    session: Session,
}

/// One learner's trainer state.
///
/// Recoverable failures (unreadable deck, unreadable registry) are queued
/// as notices for the front-end instead of being returned as errors.
pub struct Trainer {
    registry: ModuleRegistry,
    policy: Box<dyn SelectionPolicy>,
    active: Option<ActiveModule>,
    notices: VecDeque<String>,
}

impl Trainer {
    /// Open the registry at `registry_path` with weighted random selection.
    pub fn open(registry_path: impl Into<PathBuf>, weights: SelectionWeights) -> Self {
        let registry_path = registry_path.into();
        let mut notices = VecDeque::new();

        let registry = match ModuleRegistry::load(&registry_path) {
            Ok(registry) => registry,
            Err(err) => {
                warn!(%err, "module registry unavailable, using default module list");
                notices.push_back(format!("Module list could not be read ({err}); using defaults."));
                ModuleRegistry::with_default(registry_path)
            }
        };

        let mut trainer = Self::with_policy(registry, Box::new(WeightedRandom::new(weights)));
        trainer.notices = notices;
        trainer
    }

    /// Create a trainer with an explicit selection policy.
    pub fn with_policy(registry: ModuleRegistry, policy: Box<dyn SelectionPolicy>) -> Self {
        debug!(policy = policy.name(), modules = registry.len(), "trainer ready");
        Self {
            registry,
            policy,
            active: None,
            notices: VecDeque::new(),
        }
    }

    /// Registered module names.
    pub fn list_modules(&self) -> Vec<&str> {
        self.registry.names().collect()
    }

    /// Activate a module, loading its deck and starting a fresh session.
    ///
    /// Selecting the already active module keeps the current session.
    pub fn select_module(&mut self, name: &str) -> CoreResult<()> {
        if self.active_module() == Some(name) {
            return Ok(());
        }

        let path = self
            .registry
            .resolve(name)
            .ok_or_else(|| CoreError::UnknownModule(name.to_string()))?;
        let store = DeckStore::new(path);

        let deck = match store.load() {
            Ok(deck) => deck,
            Err(err) => {
                warn!(module = name, %err, "deck unreadable, continuing with empty deck");
                self.notices.push_back(format!("{err}"));
                Deck::new()
            }
        };

        let session = Session::start(name, &deck, self.policy.as_mut());
        info!(module = name, items = deck.len(), "module selected");
        self.active = Some(ActiveModule { store, deck, session });
        Ok(())
    }

    pub fn active_module(&self) -> Option<&str> {
        self.active.as_ref().map(|a| a.session.active_module.as_str())
    }

    pub fn deck(&self) -> Option<&Deck> {
        self.active.as_ref().map(|a| &a.deck)
    }

    pub fn session(&self) -> Option<&Session> {
        self.active.as_ref().map(|a| &a.session)
    }

    /// The displayed item. `None` without a module or with an empty deck.
    pub fn current_item(&mut self) -> Option<&VocabItem> {
        let active = self.active.as_mut()?;
        active.session.current_item(&active.deck)
    }

    pub fn is_revealed(&self) -> bool {
        self.session().is_some_and(|s| s.solution_revealed)
    }

    pub fn reveal(&mut self) {
        if let Some(active) = self.active.as_mut() {
            active.session.reveal();
        }
    }

    pub fn go_next(&mut self) {
        if let Some(active) = self.active.as_mut() {
            active.session.go_next(&active.deck, self.policy.as_mut());
        }
    }

    pub fn go_back(&mut self) {
        if let Some(active) = self.active.as_mut() {
            active.session.go_back();
        }
    }

    /// Whether going back is possible; the front-end disables the action otherwise.
    pub fn can_go_back(&self) -> bool {
        self.session().is_some_and(Session::can_go_back)
    }

    /// Record a self-assessment for the displayed item and persist the deck.
    pub fn record_review(&mut self, status: Status) -> CoreResult<()> {
        let active = self.active.as_mut().ok_or(CoreError::NoActiveModule)?;
        active.session.repair(&active.deck);
        recorder::record_review(&mut active.deck, active.session.current_index, status, &active.store)
    }

    /// Cloze rendering of the displayed item's example sentence.
    pub fn masked_sentence(&mut self) -> Option<String> {
        self.current_item().map(VocabItem::masked_sentence)
    }

    /// The term hidden by `masked_sentence`.
    pub fn solution(&mut self) -> Option<String> {
        self.current_item().map(|item| item.cloze_term().to_string())
    }

    /// Register a new module backed by an empty deck. Returns the deck location.
    pub fn create_module(&mut self, name: &str) -> CoreResult<String> {
        let location = location_for(name);
        if name.trim().is_empty() || location == CUSTOM_DECK_SUFFIX {
            return Err(CoreError::InvalidModuleName(name.to_string()));
        }

        let mut registry = self.registry.clone();
        registry.register_new(name, location.clone())?;

        let path = registry
            .resolve(name)
            .ok_or_else(|| CoreError::UnknownModule(name.to_string()))?;
        let store = DeckStore::new(path);
        if store.path().exists() {
            warn!(path = %store.path().display(), "deck file already present, registering it as is");
        } else {
            store.create_empty()?;
        }

        registry.save()?;
        self.registry = registry;
        info!(module = name, %location, "module created");
        Ok(location)
    }

    /// Replace the active deck with edited rows and persist it.
    pub fn bulk_save(&mut self, rows: Vec<VocabItem>) -> CoreResult<()> {
        let active = self.active.as_mut().ok_or(CoreError::NoActiveModule)?;
        active.deck.replace_items(rows);
        active.session.repair(&active.deck);
        active.store.save(&active.deck)
    }

    /// Pop the oldest pending notice.
    pub fn take_notice(&mut self) -> Option<String> {
        self.notices.pop_front()
    }
}
