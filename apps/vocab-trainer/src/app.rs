//! Application state and logic.

use crate::config::Config;
use crossterm::event::{KeyCode, KeyEvent};
use vocab_core::{check_written_answer, Status, Trainer, VocabItem, DECK_HEADERS};

/// Column of the status cell in the list view.
pub const STATUS_COLUMN: usize = 5;

pub struct App {
    pub trainer: Trainer,
    pub config: Config,
    pub view: View,
    pub modules: Vec<String>,
    pub selected_module: usize,
    pub show_modules: bool,
    pub list: ListEditor,
    pub written_result: Option<bool>,
    pub editing: bool,
    pub input_buffer: String,
    pub input_field: InputField,
    pub message: Option<String>,
    pub show_help: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Flashcards,
    Writing,
    Cloze,
    List,
}

impl View {
    pub const ALL: [View; 4] = [View::Flashcards, View::Writing, View::Cloze, View::List];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Flashcards => "Flashcards",
            Self::Writing => "Writing",
            Self::Cloze => "Cloze",
            Self::List => "List",
        }
    }

    pub fn index(&self) -> usize {
        Self::ALL.iter().position(|v| v == self).unwrap_or(0)
    }

    fn next(&self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    fn previous(&self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputField {
    None,
    ModuleName,
    Answer,
    Cell,
}

/// Working copy of the deck for the list view. Written back only on save.
#[derive(Debug, Clone, Default)]
pub struct ListEditor {
    pub rows: Vec<VocabItem>,
    /// Deck index each row was loaded from; `None` for rows added here.
    origins: Vec<Option<usize>>,
    pub selected_row: usize,
    pub selected_column: usize,
    pub dirty: bool,
}

impl ListEditor {
    fn reset(&mut self, rows: Vec<VocabItem>) {
        self.origins = (0..rows.len()).map(Some).collect();
        self.rows = rows;
        self.selected_row = self.selected_row.min(self.rows.len().saturating_sub(1));
        self.dirty = false;
    }

    fn push_row(&mut self) {
        self.rows.push(VocabItem::default());
        self.origins.push(None);
    }

    fn remove_row(&mut self, index: usize) {
        if index < self.rows.len() {
            self.rows.remove(index);
            self.origins.remove(index);
        }
    }

    /// Carry a status recorded on the deck over to the row loaded from it.
    fn apply_status(&mut self, deck_index: usize, status: Status) {
        let position = self.origins.iter().position(|origin| *origin == Some(deck_index));
        if let Some(row) = position.and_then(|i| self.rows.get_mut(i)) {
            row.status = status;
        }
    }

    fn selected_cell(&self) -> Option<String> {
        self.rows
            .get(self.selected_row)
            .map(|row| cell_value(row, self.selected_column))
    }
}

/// Text of one list cell, in `DECK_HEADERS` order.
pub fn cell_value(item: &VocabItem, column: usize) -> String {
    match column {
        STATUS_COLUMN => item.status.name().to_string(),
        _ => text_cell(item, column).cloned().unwrap_or_default(),
    }
}

fn text_cell(item: &VocabItem, column: usize) -> Option<&String> {
    match column {
        0 => Some(&item.term_native),
        1 => Some(&item.term_translation),
        2 => Some(&item.term_translation_secondary),
        3 => Some(&item.example_sentence),
        4 => Some(&item.example_sentence_translation),
        6 => Some(&item.grammar_tag_primary),
        7 => Some(&item.grammar_tag_secondary),
        8 => Some(&item.plural_form),
        _ => None,
    }
}

fn text_cell_mut(item: &mut VocabItem, column: usize) -> Option<&mut String> {
    match column {
        0 => Some(&mut item.term_native),
        1 => Some(&mut item.term_translation),
        2 => Some(&mut item.term_translation_secondary),
        3 => Some(&mut item.example_sentence),
        4 => Some(&mut item.example_sentence_translation),
        6 => Some(&mut item.grammar_tag_primary),
        7 => Some(&mut item.grammar_tag_secondary),
        8 => Some(&mut item.plural_form),
        _ => None,
    }
}

impl App {
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let trainer = Trainer::open(config.registry_path(), config.selection);
        Ok(Self::with_trainer(trainer, config))
    }

    pub fn with_trainer(trainer: Trainer, config: Config) -> Self {
        let mut app = Self {
            trainer,
            config,
            view: View::Flashcards,
            modules: Vec::new(),
            selected_module: 0,
            show_modules: false,
            list: ListEditor::default(),
            written_result: None,
            editing: false,
            input_buffer: String::new(),
            input_field: InputField::None,
            message: None,
            show_help: false,
        };

        app.refresh_modules();
        if let Some(first) = app.modules.first().cloned() {
            app.select_module(&first);
        }
        app.collect_notices();
        app
    }

    pub fn refresh_modules(&mut self) {
        self.modules = self.trainer.list_modules().into_iter().map(String::from).collect();
        if self.selected_module >= self.modules.len() {
            self.selected_module = self.modules.len().saturating_sub(1);
        }
    }

    pub fn can_quit(&self) -> bool {
        !self.editing
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        self.message = None;

        if self.show_help {
            self.show_help = false;
            return;
        }

        if self.editing {
            self.handle_edit_key(key);
            return;
        }

        if self.show_modules {
            self.handle_module_key(key);
            return;
        }

        match key.code {
            KeyCode::Tab => return self.switch_view(self.view.next()),
            KeyCode::BackTab => return self.switch_view(self.view.previous()),
            KeyCode::Char('m') => {
                self.show_modules = true;
                return;
            }
            KeyCode::Char('?') => {
                self.show_help = true;
                return;
            }
            _ => {}
        }

        match self.view {
            View::List => self.handle_list_key(key),
            View::Flashcards | View::Writing | View::Cloze => self.handle_study_key(key),
        }
    }

    fn handle_edit_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.stop_editing(),
            KeyCode::Enter => self.finish_editing(),
            KeyCode::Backspace => { self.input_buffer.pop(); }
            KeyCode::Char(c) => self.input_buffer.push(c),
            _ => {}
        }
    }

    fn handle_module_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => {
                if !self.modules.is_empty() {
                    self.selected_module = (self.selected_module + 1).min(self.modules.len() - 1);
                }
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.selected_module = self.selected_module.saturating_sub(1);
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                if let Some(name) = self.modules.get(self.selected_module).cloned() {
                    self.select_module(&name);
                    self.collect_notices();
                }
                self.show_modules = false;
            }
            KeyCode::Char('a') => self.start_editing(InputField::ModuleName, String::new()),
            KeyCode::Esc | KeyCode::Char('m') => self.show_modules = false,
            _ => {}
        }
    }

    fn handle_study_key(&mut self, key: KeyEvent) {
        if self.trainer.current_item().is_none() {
            return;
        }

        match key.code {
            KeyCode::Char('n') | KeyCode::Right => self.next_card(),
            KeyCode::Char('b') | KeyCode::Left => self.previous_card(),
            KeyCode::Char(' ') if self.view != View::Writing => self.trainer.reveal(),
            KeyCode::Enter | KeyCode::Char('i') if self.view == View::Writing => {
                if !self.trainer.is_revealed() {
                    self.start_editing(InputField::Answer, String::new());
                }
            }
            KeyCode::Enter => self.trainer.reveal(),
            KeyCode::Char('h') if self.trainer.is_revealed() => self.record(Status::Red),
            KeyCode::Char('e') if self.trainer.is_revealed() => self.record(Status::Green),
            _ => {}
        }
    }

    fn handle_list_key(&mut self, key: KeyEvent) {
        let row_count = self.list.rows.len();
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => {
                if row_count > 0 {
                    self.list.selected_row = (self.list.selected_row + 1).min(row_count - 1);
                }
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.list.selected_row = self.list.selected_row.saturating_sub(1);
            }
            KeyCode::Char('l') | KeyCode::Right => {
                self.list.selected_column = (self.list.selected_column + 1).min(DECK_HEADERS.len() - 1);
            }
            KeyCode::Char('h') | KeyCode::Left => {
                self.list.selected_column = self.list.selected_column.saturating_sub(1);
            }
            KeyCode::Enter => self.edit_selected_cell(),
            KeyCode::Char('a') => {
                self.list.push_row();
                self.list.selected_row = self.list.rows.len() - 1;
                self.list.selected_column = 0;
                self.list.dirty = true;
            }
            KeyCode::Char('d') => {
                if self.list.selected_row < row_count {
                    self.list.remove_row(self.list.selected_row);
                    self.list.selected_row = self.list.selected_row.min(self.list.rows.len().saturating_sub(1));
                    self.list.dirty = true;
                }
            }
            KeyCode::Char('s') => self.save_list(),
            KeyCode::Char('r') => {
                self.reload_list();
                self.message = Some("Changes discarded".to_string());
            }
            _ => {}
        }
    }

    fn edit_selected_cell(&mut self) {
        if self.list.selected_column == STATUS_COLUMN {
            if let Some(row) = self.list.rows.get_mut(self.list.selected_row) {
                row.status = match row.status {
                    Status::Neutral => Status::Red,
                    Status::Red => Status::Green,
                    Status::Green => Status::Neutral,
                };
                self.list.dirty = true;
            }
            return;
        }

        if let Some(value) = self.list.selected_cell() {
            self.start_editing(InputField::Cell, value);
        }
    }

    fn start_editing(&mut self, field: InputField, initial: String) {
        self.editing = true;
        self.input_field = field;
        self.input_buffer = initial;
    }

    fn stop_editing(&mut self) {
        self.editing = false;
        self.input_buffer.clear();
        self.input_field = InputField::None;
    }

    fn finish_editing(&mut self) {
        let input = std::mem::take(&mut self.input_buffer);
        let field = self.input_field;
        self.stop_editing();

        match field {
            InputField::ModuleName => self.create_module(input.trim()),
            InputField::Answer => {
                if let Some(item) = self.trainer.current_item() {
                    self.written_result = Some(check_written_answer(item, &input));
                    self.trainer.reveal();
                }
            }
            InputField::Cell => {
                let column = self.list.selected_column;
                if let Some(cell) = self
                    .list
                    .rows
                    .get_mut(self.list.selected_row)
                    .and_then(|row| text_cell_mut(row, column))
                {
                    if *cell != input {
                        *cell = input;
                        self.list.dirty = true;
                    }
                }
            }
            InputField::None => {}
        }
    }

    fn create_module(&mut self, name: &str) {
        match self.trainer.create_module(name) {
            Ok(location) => {
                self.refresh_modules();
                if let Some(index) = self.modules.iter().position(|m| m == name) {
                    self.selected_module = index;
                }
                self.message = Some(format!("Module '{name}' created ({location})"));
            }
            Err(err) => self.message = Some(err.to_string()),
        }
    }

    pub fn select_module(&mut self, name: &str) {
        let switching = self.trainer.active_module() != Some(name);
        match self.trainer.select_module(name) {
            Ok(()) => {
                if let Some(index) = self.modules.iter().position(|m| m == name) {
                    self.selected_module = index;
                }
                if switching {
                    if self.list.dirty {
                        self.message = Some("Unsaved list edits discarded".to_string());
                    }
                    self.written_result = None;
                    self.reload_list();
                }
            }
            Err(err) => self.message = Some(err.to_string()),
        }
    }

    fn switch_view(&mut self, view: View) {
        if view == View::List && !self.list.dirty {
            self.reload_list();
        }
        self.view = view;
    }

    fn reload_list(&mut self) {
        let rows = self.trainer.deck().map(|d| d.items().to_vec()).unwrap_or_default();
        self.list.reset(rows);
    }

    fn next_card(&mut self) {
        self.trainer.go_next();
        self.written_result = None;
    }

    fn previous_card(&mut self) {
        if self.trainer.can_go_back() {
            self.trainer.go_back();
            self.written_result = None;
        } else {
            self.message = Some("No previous card".to_string());
        }
    }

    fn record(&mut self, status: Status) {
        match self.trainer.record_review(status) {
            Ok(()) => {
                self.message = Some(format!("Status saved: {status} ({})", timestamp()));
                if !self.list.dirty {
                    self.reload_list();
                } else if let Some(index) = self.trainer.session().map(|s| s.current_index) {
                    self.list.apply_status(index, status);
                }
            }
            Err(err) => self.message = Some(err.to_string()),
        }
    }

    fn save_list(&mut self) {
        match self.trainer.bulk_save(self.list.rows.clone()) {
            Ok(()) => {
                self.reload_list();
                self.message = Some(format!("Saved {} rows ({})", self.list.rows.len(), timestamp()));
            }
            Err(err) => self.message = Some(err.to_string()),
        }
    }

    fn collect_notices(&mut self) {
        let mut notices: Vec<String> = self.message.take().into_iter().collect();
        while let Some(notice) = self.trainer.take_notice() {
            notices.push(notice);
        }
        if !notices.is_empty() {
            self.message = Some(notices.join(" | "));
        }
    }
}

fn timestamp() -> String {
    chrono::Local::now().format("%H:%M:%S").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;
    use std::fs;
    use tempfile::TempDir;
    use vocab_core::{DeckStore, SelectionWeights};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            app.handle_key(key(KeyCode::Char(c)));
        }
    }

    fn app_with_deck(dir: &TempDir, csv: &str) -> App {
        fs::write(dir.path().join("modules.json"), r#"{"Basics": "basics.csv"}"#).unwrap();
        fs::write(dir.path().join("basics.csv"), csv).unwrap();

        let mut config = Config::default();
        config.storage.data_dir = Some(dir.path().to_path_buf());
        let trainer = Trainer::open(config.registry_path(), SelectionWeights::default());
        App::with_trainer(trainer, config)
    }

    fn stored(dir: &TempDir) -> vocab_core::Deck {
        DeckStore::new(dir.path().join("basics.csv")).load().unwrap()
    }

    #[test]
    fn test_first_module_selected() {
        let dir = TempDir::new().unwrap();
        let mut app = app_with_deck(&dir, "Deutsch,Farsi\nHund,سگ\n");
        assert_eq!(app.modules, ["Basics"]);
        assert_eq!(app.trainer.active_module(), Some("Basics"));
        assert_eq!(app.trainer.current_item().unwrap().term_native, "Hund");
    }

    #[test]
    fn test_rating_requires_reveal() {
        let dir = TempDir::new().unwrap();
        let mut app = app_with_deck(&dir, "Deutsch,Farsi\nHund,سگ\n");

        app.handle_key(key(KeyCode::Char('h')));
        assert_eq!(stored(&dir).get(0).unwrap().status, Status::Neutral);

        app.handle_key(key(KeyCode::Char(' ')));
        assert!(app.trainer.is_revealed());
        app.handle_key(key(KeyCode::Char('h')));
        assert_eq!(stored(&dir).get(0).unwrap().status, Status::Red);

        app.handle_key(key(KeyCode::Char('e')));
        assert_eq!(stored(&dir).get(0).unwrap().status, Status::Green);
    }

    #[test]
    fn test_back_without_history_shows_message() {
        let dir = TempDir::new().unwrap();
        let mut app = app_with_deck(&dir, "Deutsch\nHund\n");
        app.handle_key(key(KeyCode::Char('b')));
        assert_eq!(app.message.as_deref(), Some("No previous card"));

        app.handle_key(key(KeyCode::Char('n')));
        app.handle_key(key(KeyCode::Char('b')));
        assert!(app.message.is_none());
        assert!(!app.trainer.can_go_back());
    }

    #[test]
    fn test_writing_answer_checked() {
        let dir = TempDir::new().unwrap();
        let mut app = app_with_deck(&dir, "Deutsch,Farsi\nsich freuen,خوشحال شدن\n");
        app.handle_key(key(KeyCode::Tab));
        assert_eq!(app.view, View::Writing);

        app.handle_key(key(KeyCode::Enter));
        assert!(app.editing);
        type_text(&mut app, "Freuen");
        app.handle_key(key(KeyCode::Enter));

        assert!(!app.editing);
        assert_eq!(app.written_result, Some(true));
        assert!(app.trainer.is_revealed());

        app.handle_key(key(KeyCode::Char('n')));
        assert_eq!(app.written_result, None);
    }

    #[test]
    fn test_create_module_from_picker() {
        let dir = TempDir::new().unwrap();
        let mut app = app_with_deck(&dir, "Deutsch\nHund\n");

        app.handle_key(key(KeyCode::Char('m')));
        assert!(app.show_modules);
        app.handle_key(key(KeyCode::Char('a')));
        type_text(&mut app, "Mein Modul!");
        app.handle_key(key(KeyCode::Enter));

        assert_eq!(app.modules, ["Basics", "Mein Modul!"]);
        assert!(dir.path().join("meinmodul_custom.csv").exists());

        app.handle_key(key(KeyCode::Char('a')));
        type_text(&mut app, "Basics");
        app.handle_key(key(KeyCode::Enter));
        assert_eq!(app.message.as_deref(), Some("Module already exists: Basics"));
    }

    #[test]
    fn test_switch_module_resets_session() {
        let dir = TempDir::new().unwrap();
        let mut app = app_with_deck(&dir, "Deutsch\nHund\n");
        app.create_module("Leer");
        app.handle_key(key(KeyCode::Char('n')));
        assert!(app.trainer.can_go_back());

        app.handle_key(key(KeyCode::Char('m')));
        app.handle_key(key(KeyCode::Char('j')));
        app.handle_key(key(KeyCode::Enter));

        assert_eq!(app.trainer.active_module(), Some("Leer"));
        assert!(!app.trainer.can_go_back());
        assert!(app.trainer.current_item().is_none());
    }

    #[test]
    fn test_list_edit_and_save() {
        let dir = TempDir::new().unwrap();
        let mut app = app_with_deck(&dir, "Deutsch,Farsi\nHund,سگ\nKatze,گربه\n");
        app.handle_key(key(KeyCode::BackTab));
        assert_eq!(app.view, View::List);
        assert_eq!(app.list.rows.len(), 2);

        // Rename the first row's translation.
        app.handle_key(key(KeyCode::Char('l')));
        app.handle_key(key(KeyCode::Enter));
        for _ in 0.."سگ".chars().count() {
            app.handle_key(key(KeyCode::Backspace));
        }
        type_text(&mut app, "dog");
        app.handle_key(key(KeyCode::Enter));
        assert!(app.list.dirty);

        // Drop the second row and append a new one.
        app.handle_key(key(KeyCode::Char('j')));
        app.handle_key(key(KeyCode::Char('d')));
        app.handle_key(key(KeyCode::Char('a')));
        app.handle_key(key(KeyCode::Enter));
        type_text(&mut app, "Maus");
        app.handle_key(key(KeyCode::Enter));

        // Nothing written until save.
        assert_eq!(stored(&dir).len(), 2);
        app.handle_key(key(KeyCode::Char('s')));
        assert!(!app.list.dirty);

        let deck = stored(&dir);
        let terms: Vec<_> = deck.iter().map(|i| i.term_native.as_str()).collect();
        assert_eq!(terms, ["Hund", "Maus"]);
        assert_eq!(deck.get(0).unwrap().term_translation, "dog");
    }

    #[test]
    fn test_review_survives_later_list_save() {
        let dir = TempDir::new().unwrap();
        let mut app = app_with_deck(&dir, "Deutsch,Farsi\nHund,سگ\n");

        // Unsaved edit in the list view.
        app.handle_key(key(KeyCode::BackTab));
        app.handle_key(key(KeyCode::Char('l')));
        app.handle_key(key(KeyCode::Enter));
        type_text(&mut app, "!");
        app.handle_key(key(KeyCode::Enter));
        assert!(app.list.dirty);

        // Rate the card while the edit is pending.
        app.handle_key(key(KeyCode::Tab));
        app.handle_key(key(KeyCode::Char(' ')));
        app.handle_key(key(KeyCode::Char('h')));
        assert_eq!(stored(&dir).get(0).unwrap().status, Status::Red);

        app.handle_key(key(KeyCode::BackTab));
        assert!(app.list.dirty);
        app.handle_key(key(KeyCode::Char('s')));

        let item = stored(&dir).get(0).cloned().unwrap();
        assert_eq!(item.status, Status::Red);
        assert_eq!(item.term_translation, "سگ!");
    }

    #[test]
    fn test_review_lands_on_loaded_row_after_list_reorder() {
        let dir = TempDir::new().unwrap();
        let mut app = app_with_deck(&dir, "Deutsch\nHund\nKatze\n");
        let current = app.trainer.current_item().unwrap().term_native.clone();

        // Delete the other row and append a new one, unsaved.
        app.handle_key(key(KeyCode::BackTab));
        let other = app.list.rows.iter().position(|r| r.term_native != current).unwrap();
        app.list.selected_row = other;
        app.handle_key(key(KeyCode::Char('d')));
        app.handle_key(key(KeyCode::Char('a')));

        app.handle_key(key(KeyCode::Tab));
        app.handle_key(key(KeyCode::Char(' ')));
        app.handle_key(key(KeyCode::Char('e')));

        app.handle_key(key(KeyCode::BackTab));
        app.handle_key(key(KeyCode::Char('s')));

        let deck = stored(&dir);
        assert_eq!(deck.len(), 2);
        assert_eq!(deck.get(0).unwrap().term_native, current);
        assert_eq!(deck.get(0).unwrap().status, Status::Green);
        assert_eq!(deck.get(1).unwrap().status, Status::Neutral);
    }

    #[test]
    fn test_switching_module_reports_discarded_edits() {
        let dir = TempDir::new().unwrap();
        let mut app = app_with_deck(&dir, "Deutsch\nHund\n");
        app.create_module("Leer");

        app.handle_key(key(KeyCode::BackTab));
        app.handle_key(key(KeyCode::Char('a')));
        assert!(app.list.dirty);

        // Reselecting the active module keeps the pending edit.
        app.select_module("Basics");
        assert!(app.list.dirty);
        assert_eq!(app.list.rows.len(), 2);

        app.handle_key(key(KeyCode::Char('m')));
        app.handle_key(key(KeyCode::Char('j')));
        app.handle_key(key(KeyCode::Enter));

        assert_eq!(app.trainer.active_module(), Some("Leer"));
        assert_eq!(app.message.as_deref(), Some("Unsaved list edits discarded"));
        assert!(!app.list.dirty);
        assert!(app.list.rows.is_empty());
        assert_eq!(stored(&dir).len(), 1);
    }

    #[test]
    fn test_status_cell_cycles() {
        let dir = TempDir::new().unwrap();
        let mut app = app_with_deck(&dir, "Deutsch\nHund\n");
        app.handle_key(key(KeyCode::BackTab));
        app.list.selected_column = STATUS_COLUMN;

        app.handle_key(key(KeyCode::Enter));
        assert_eq!(app.list.rows[0].status, Status::Red);
        app.handle_key(key(KeyCode::Enter));
        assert_eq!(app.list.rows[0].status, Status::Green);
        app.handle_key(key(KeyCode::Enter));
        assert_eq!(app.list.rows[0].status, Status::Neutral);
        assert!(!app.editing);
    }

    #[test]
    fn test_cell_value_order_matches_headers() {
        let item = VocabItem {
            term_native: "0".into(),
            term_translation: "1".into(),
            term_translation_secondary: "2".into(),
            example_sentence: "3".into(),
            example_sentence_translation: "4".into(),
            status: Status::Red,
            grammar_tag_primary: "6".into(),
            grammar_tag_secondary: "7".into(),
            plural_form: "8".into(),
        };
        let cells: Vec<_> = (0..DECK_HEADERS.len()).map(|c| cell_value(&item, c)).collect();
        assert_eq!(cells, ["0", "1", "2", "3", "4", "Red", "6", "7", "8"]);
    }
}
