//! UI rendering for vocab trainer.

use crate::app::{cell_value, App, InputField, View};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Clear, List, ListItem, Paragraph, Row, Table, Tabs, Wrap},
    Frame,
};
use vocab_core::{CardMode, VocabItem, DECK_HEADERS};

pub fn draw(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0), Constraint::Length(3)])
        .split(f.area());

    draw_header(f, app, chunks[0]);

    match app.view {
        View::Flashcards => draw_flashcard(f, app, chunks[1]),
        View::Writing => draw_writing(f, app, chunks[1]),
        View::Cloze => draw_cloze(f, app, chunks[1]),
        View::List => draw_list(f, app, chunks[1]),
    }

    draw_footer(f, app, chunks[2]);

    if app.show_modules {
        draw_modules(f, app);
    }

    if app.show_help {
        draw_help(f);
    }

    if app.editing {
        draw_input(f, app);
    }

    if let Some(msg) = &app.message {
        draw_message(f, msg);
    }
}

fn draw_header(f: &mut Frame, app: &App, area: Rect) {
    let module = app.trainer.active_module().unwrap_or("no module");
    let counts = app.trainer.deck().map(|d| d.status_counts()).unwrap_or_default();
    let title = format!(
        " {} | {} red, {} neutral, {} green ",
        module, counts.red, counts.neutral, counts.green
    );

    let titles: Vec<&str> = View::ALL.iter().map(|v| v.name()).collect();
    let tabs = Tabs::new(titles)
        .select(app.view.index())
        .highlight_style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
        .block(Block::default().borders(Borders::ALL).title(title));
    f.render_widget(tabs, area);
}

fn draw_footer(f: &mut Frame, app: &App, area: Rect) {
    let back = if app.trainer.can_go_back() { "b:Back  " } else { "" };
    let hints = match app.view {
        View::Flashcards | View::Cloze if app.trainer.is_revealed() => {
            format!("h:Hard  e:Easy  n:Next  {back}Tab:View  m:Modules  ?:Help  q:Quit")
        }
        View::Flashcards | View::Cloze => {
            format!("Space:Show  n:Next  {back}Tab:View  m:Modules  ?:Help  q:Quit")
        }
        View::Writing if app.trainer.is_revealed() => {
            format!("h:Hard  e:Easy  n:Next  {back}Tab:View  m:Modules  ?:Help  q:Quit")
        }
        View::Writing => format!("Enter:Answer  n:Next  {back}Tab:View  m:Modules  ?:Help  q:Quit"),
        View::List => "j/k/h/l:Move  Enter:Edit  a:Add  d:Delete  s:Save  r:Revert  Tab:View  q:Quit".to_string(),
    };

    let footer = Paragraph::new(hints)
        .style(Style::default().fg(Color::DarkGray))
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(footer, area);
}

fn draw_empty(f: &mut Frame, app: &App, area: Rect) {
    let text = match app.trainer.active_module() {
        Some(module) => format!("No cards in '{module}'.\nAdd rows in the List view or press 'm' to pick another module."),
        None => "No module selected. Press 'm' to pick or create one.".to_string(),
    };
    let msg = Paragraph::new(text)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(msg, area);
}

fn answer_line(item: &VocabItem) -> String {
    match (item.mode(), item.answer()) {
        (mode, Some(answer)) => format!("{}: {answer}", mode.name()),
        _ => "No article (verb/adjective)".to_string(),
    }
}

fn translation_lines(item: &VocabItem, app: &App) -> Vec<Line<'static>> {
    let mut lines = vec![Line::from(Span::styled(
        item.term_translation.clone(),
        Style::default().add_modifier(Modifier::BOLD),
    ))];
    if app.config.display.show_translation_secondary && !item.term_translation_secondary.is_empty() {
        lines.push(Line::from(item.term_translation_secondary.clone()));
    }
    lines
}

fn sentence_lines(item: &VocabItem) -> Vec<Line<'static>> {
    let italic = Style::default().add_modifier(Modifier::ITALIC);
    let mut lines = Vec::new();
    if !item.example_sentence.is_empty() {
        lines.push(Line::from(Span::styled(item.example_sentence.clone(), italic)));
    }
    if !item.example_sentence_translation.is_empty() {
        lines.push(Line::from(Span::styled(item.example_sentence_translation.clone(), italic)));
    }
    lines
}

fn draw_flashcard(f: &mut Frame, app: &mut App, area: Rect) {
    let Some(item) = app.trainer.current_item().cloned() else {
        return draw_empty(f, app, area);
    };

    let halves = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let mut front = if item.is_blank() {
        vec![Line::from(Span::styled(
            "(empty row, fill it in the List view)",
            Style::default().fg(Color::DarkGray),
        ))]
    } else {
        vec![Line::from(Span::styled(
            item.term_native.clone(),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ))]
    };
    if item.mode() == CardMode::Article && app.config.display.show_plural && !item.plural_form.is_empty() {
        front.push(Line::from(Span::styled(
            format!("Plural: {}", item.plural_form),
            Style::default().fg(Color::DarkGray),
        )));
    }
    let front = Paragraph::new(front)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title(" Word "))
        .wrap(Wrap { trim: true });
    f.render_widget(front, halves[0]);

    let back = if app.trainer.is_revealed() {
        let mut lines = vec![
            Line::from(Span::styled(answer_line(&item), Style::default().fg(Color::Green))),
            Line::from(""),
        ];
        lines.extend(translation_lines(&item, app));
        lines.push(Line::from(""));
        lines.extend(sentence_lines(&item));
        Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(" Answer "))
    } else {
        Paragraph::new(vec![Line::from("???"), Line::from(item.mode().prompt())])
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL).title(" Question "))
    };
    f.render_widget(back.wrap(Wrap { trim: true }), halves[1]);
}

fn draw_writing(f: &mut Frame, app: &mut App, area: Rect) {
    let Some(item) = app.trainer.current_item().cloned() else {
        return draw_empty(f, app, area);
    };

    let mut lines = vec![
        Line::from("Translate into German:"),
        Line::from(""),
    ];
    lines.extend(translation_lines(&item, app));

    if app.trainer.is_revealed() {
        lines.push(Line::from(""));
        lines.push(match app.written_result {
            Some(true) => Line::from(Span::styled("Correct!", Style::default().fg(Color::Green))),
            _ => Line::from(Span::styled(
                format!("Not quite. Solution: {}", item.term_native),
                Style::default().fg(Color::Red),
            )),
        });
        lines.extend(sentence_lines(&item).into_iter().take(1));
    }

    let body = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title(" Writing "))
        .wrap(Wrap { trim: true });
    f.render_widget(body, area);
}

fn draw_cloze(f: &mut Frame, app: &mut App, area: Rect) {
    let Some(item) = app.trainer.current_item().cloned() else {
        return draw_empty(f, app, area);
    };

    let mut lines = vec![
        Line::from(Span::styled(item.masked_sentence(), Style::default().add_modifier(Modifier::BOLD))),
        Line::from(Span::styled(
            format!("Hint: {}", item.term_translation),
            Style::default().fg(Color::DarkGray),
        )),
    ];

    if app.trainer.is_revealed() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!("Solution: {}", item.cloze_term()),
            Style::default().fg(Color::Green),
        )));
        lines.extend(sentence_lines(&item).into_iter().take(1));
    }

    let body = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title(" Fill the gap "))
        .wrap(Wrap { trim: true });
    f.render_widget(body, area);
}

fn draw_list(f: &mut Frame, app: &App, area: Rect) {
    let list = &app.list;
    let rows: Vec<Row> = list
        .rows
        .iter()
        .enumerate()
        .map(|(r, item)| {
            let cells: Vec<Cell> = (0..DECK_HEADERS.len())
                .map(|c| {
                    let style = if r == list.selected_row && c == list.selected_column {
                        Style::default().fg(Color::Black).bg(Color::Yellow)
                    } else {
                        Style::default()
                    };
                    Cell::from(cell_value(item, c)).style(style)
                })
                .collect();
            let style = if r == list.selected_row {
                Style::default().bg(Color::DarkGray)
            } else {
                Style::default()
            };
            Row::new(cells).style(style)
        })
        .collect();

    let title = if list.dirty { " List (unsaved) " } else { " List " };
    let widths = [
        Constraint::Percentage(14),
        Constraint::Percentage(12),
        Constraint::Percentage(12),
        Constraint::Percentage(18),
        Constraint::Percentage(14),
        Constraint::Percentage(7),
        Constraint::Percentage(10),
        Constraint::Percentage(6),
        Constraint::Percentage(7),
    ];
    let table = Table::new(rows, widths)
        .header(Row::new(DECK_HEADERS.to_vec()).style(Style::default().add_modifier(Modifier::BOLD)))
        .block(Block::default().borders(Borders::ALL).title(title));
    f.render_widget(table, area);
}

fn draw_modules(f: &mut Frame, app: &App) {
    let area = centered_rect(50, 50, f.area());
    f.render_widget(Clear, area);

    let items: Vec<ListItem> = app
        .modules
        .iter()
        .enumerate()
        .map(|(i, name)| {
            let marker = if app.trainer.active_module() == Some(name.as_str()) { "* " } else { "  " };
            let style = if i == app.selected_module {
                Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            ListItem::new(format!("{marker}{name}")).style(style)
        })
        .collect();

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(" Modules (Enter:Open  a:New  Esc:Close) "));
    f.render_widget(list, area);
}

fn draw_help(f: &mut Frame) {
    let area = centered_rect(60, 80, f.area());
    f.render_widget(Clear, area);

    let help = r#"
Vocab Trainer Keybindings

Study (Flashcards / Writing / Cloze):
  Space           Show answer
  Enter, i        Type answer (Writing)
  n, Right        Next card
  b, Left         Previous card
  h               Mark hard
  e               Mark easy

List:
  j/k/h/l         Move between cells
  Enter           Edit cell (cycles Status)
  a / d           Add / delete row
  s               Save list
  r               Discard unsaved changes

General:
  Tab, Shift-Tab  Switch view
  m               Modules
  ?               Show this help
  q               Quit

Press any key to close
"#;

    let popup = Paragraph::new(help)
        .block(Block::default().borders(Borders::ALL).title(" Help "))
        .wrap(Wrap { trim: false });
    f.render_widget(popup, area);
}

fn draw_input(f: &mut Frame, app: &App) {
    let area = centered_rect(50, 15, f.area());
    f.render_widget(Clear, area);

    let title = match app.input_field {
        InputField::ModuleName => "New module name".to_string(),
        InputField::Answer => "German word".to_string(),
        InputField::Cell => format!("Edit {}", DECK_HEADERS[app.list.selected_column]),
        InputField::None => String::new(),
    };

    let input = Paragraph::new(app.input_buffer.as_str())
        .style(Style::default().fg(Color::Yellow))
        .block(Block::default().borders(Borders::ALL).title(format!(" {} ", title)));
    f.render_widget(input, area);

    let cursor = app.input_buffer.chars().count() as u16;
    f.set_cursor_position((area.x + 1 + cursor, area.y + 1));
}

fn draw_message(f: &mut Frame, msg: &str) {
    let area = Rect::new(
        f.area().x + 2,
        f.area().height.saturating_sub(5),
        f.area().width.saturating_sub(4),
        3,
    );
    f.render_widget(Clear, area);

    let message = Paragraph::new(msg)
        .style(Style::default().fg(Color::Cyan))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(message, area);
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
