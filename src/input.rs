//! Key and mouse dispatch

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;

use crate::app::{App, InputMode};
use crate::core::{Action, FilterChange, Module};
use crate::domain::ReportId;
use crate::ui::layout::{self, rect_contains, UiAreas};

pub fn handle_key(app: &mut App, key: KeyEvent) {
    if key.kind != KeyEventKind::Press {
        return;
    }

    if app.help_open {
        if matches!(key.code, KeyCode::Char('?') | KeyCode::Esc) {
            app.help_open = false;
        }
        return;
    }

    match app.input_mode {
        InputMode::Normal if app.detail_open() => handle_detail_mode(app, key),
        InputMode::Normal => handle_normal_mode(app, key),
        InputMode::Search => handle_search_mode(app, key),
        InputMode::Command => handle_command_mode(app, key),
        InputMode::Note(id) => handle_note_mode(app, key, id),
    }
}

fn handle_normal_mode(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') => app.should_quit = true,
        KeyCode::Char('?') => app.help_open = true,
        KeyCode::Char('/') => app.enter_search(),
        KeyCode::Char(':') => app.enter_command(),
        KeyCode::Char('c') => app.cycle_category(),
        KeyCode::Char('s') => app.cycle_status(),
        KeyCode::Char('x') => app.apply_action(Action::Filter(FilterChange::Clear)),
        KeyCode::Char('e') => app.apply_action(Action::Export(None)),
        KeyCode::Char('y') => {
            if let Some(report) = app.cursor_report() {
                let text = format!("#{} {}", report.id, report.title);
                app.apply_action(Action::Copy(text));
            }
        }
        _ => {
            let action = app.grid.handle_key(key, &mut app.ctx);
            app.apply_action(action);
        }
    }
}

fn handle_detail_mode(app: &mut App, key: KeyEvent) {
    if key.code == KeyCode::Char('?') {
        app.help_open = true;
        return;
    }
    let action = app.detail.handle_key(key, &mut app.ctx);
    app.apply_action(action);
    app.sync_context();
}

fn handle_search_mode(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => {
            app.exit_input();
            app.set_filter(FilterChange::Search(String::new()));
        }
        KeyCode::Enter => app.exit_input(),
        KeyCode::Backspace => app.pop_search(),
        KeyCode::Char(ch) => {
            if key.modifiers.contains(KeyModifiers::CONTROL) {
                return;
            }
            app.push_search(ch);
        }
        _ => {}
    }
}

fn handle_command_mode(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.exit_input(),
        KeyCode::Enter => app.apply_command(),
        KeyCode::Backspace => {
            app.command.input.pop();
        }
        KeyCode::Char(ch) => {
            if key.modifiers.contains(KeyModifiers::CONTROL) {
                return;
            }
            app.command.input.push(ch);
        }
        _ => {}
    }
}

fn handle_note_mode(app: &mut App, key: KeyEvent, id: ReportId) {
    match key.code {
        KeyCode::Esc => app.exit_input(),
        KeyCode::Enter => app.apply_note(id),
        KeyCode::Backspace => {
            app.command.input.pop();
        }
        KeyCode::Char(ch) => {
            if key.modifiers.contains(KeyModifiers::CONTROL) {
                return;
            }
            app.command.input.push(ch);
        }
        _ => {}
    }
}

/// `size` is the full terminal area.
pub fn handle_mouse(app: &mut App, mouse: MouseEvent, size: Rect) {
    if app.help_open || app.input_mode != InputMode::Normal {
        return;
    }
    let areas = layout::areas(size);
    let col = mouse.column;
    let row = mouse.row;

    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => handle_click(app, areas, col, row),
        MouseEventKind::ScrollUp => handle_scroll(app, areas, true),
        MouseEventKind::ScrollDown => handle_scroll(app, areas, false),
        _ => {}
    }
}

fn handle_click(app: &mut App, areas: UiAreas, col: u16, row: u16) {
    if app.detail_open() {
        if rect_contains(areas.detail_close, col, row) || !rect_contains(areas.detail, col, row) {
            app.apply_action(Action::CloseDetail);
        }
        return;
    }

    if let Some(idx) = card_at(app, areas, col, row) {
        if let Some(id) = app.ctx.visible.get(idx).copied() {
            app.apply_action(Action::Open(id));
        }
    }
}

fn handle_scroll(app: &mut App, areas: UiAreas, up: bool) {
    let code = if up { KeyCode::Up } else { KeyCode::Down };
    let key = KeyEvent::new(code, KeyModifiers::NONE);
    if app.detail_open() {
        app.detail.handle_key(key, &mut app.ctx);
        return;
    }
    app.ctx.grid_columns = layout::grid_columns(areas.grid.width);
    let action = app.grid.handle_key(key, &mut app.ctx);
    app.apply_action(action);
}

fn card_at(app: &App, areas: UiAreas, col: u16, row: u16) -> Option<usize> {
    let columns = layout::grid_columns(areas.grid.width);
    layout::card_rects(areas.grid, app.ctx.visible.len(), columns, app.grid.cursor())
        .into_iter()
        .find(|(_, rect)| rect_contains(*rect, col, row))
        .map(|(idx, _)| idx)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::ReportSource;

    fn loaded() -> App {
        let mut app = App::new(std::env::temp_dir());
        app.load(&ReportSource::Builtin);
        app
    }

    fn press(app: &mut App, code: KeyCode) {
        handle_key(app, KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn click(app: &mut App, col: u16, row: u16, size: Rect) {
        let mouse = MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: col,
            row,
            modifiers: KeyModifiers::NONE,
        };
        handle_mouse(app, mouse, size);
    }

    #[test]
    fn test_live_search() {
        let mut app = loaded();
        press(&mut app, KeyCode::Char('/'));
        for ch in "water".chars() {
            press(&mut app, KeyCode::Char(ch));
        }
        assert_eq!(app.ctx.visible, vec![5]);

        // Enter keeps the search; Esc in search mode drops it.
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.input_mode, InputMode::Normal);
        assert_eq!(app.filter.search, "water");

        press(&mut app, KeyCode::Char('/'));
        press(&mut app, KeyCode::Esc);
        assert!(app.filter.search.is_empty());
        assert_eq!(app.ctx.visible.len(), 6);
    }

    #[test]
    fn test_filter_keys_do_not_type_into_grid() {
        let mut app = loaded();
        press(&mut app, KeyCode::Char('s'));
        press(&mut app, KeyCode::Char('s'));
        press(&mut app, KeyCode::Char('s'));
        assert_eq!(app.ctx.visible, vec![3]);
        press(&mut app, KeyCode::Char('x'));
        assert_eq!(app.ctx.visible.len(), 6);
    }

    #[test]
    fn test_detail_keys() {
        let mut app = loaded();
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.selected_report().map(|r| r.id), Some(1));

        press(&mut app, KeyCode::Char('w'));
        assert_eq!(app.ctx.open_report.as_ref().map(|r| r.status.id()), Some("in-progress"));

        // 'q' closes the panel instead of quitting.
        press(&mut app, KeyCode::Char('q'));
        assert!(!app.detail_open());
        assert!(!app.should_quit);
    }

    #[test]
    fn test_note_entry() {
        let mut app = loaded();
        app.open_report(2);
        press(&mut app, KeyCode::Char('n'));
        assert_eq!(app.input_mode, InputMode::Note(2));
        for ch in "ok".chars() {
            press(&mut app, KeyCode::Char(ch));
        }
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.note(2), Some("ok"));
        assert!(app.detail_open());
    }

    #[test]
    fn test_click_card_then_backdrop() {
        let mut app = loaded();
        let size = Rect::new(0, 0, 160, 48);
        let areas = layout::areas(size);

        // Second card in the first row.
        let col = areas.grid.x + areas.grid.width / 2;
        click(&mut app, col, areas.grid.y + 2, size);
        assert_eq!(app.selected_report().map(|r| r.id), Some(2));

        // Inside the panel keeps it open.
        click(&mut app, areas.detail.x + 2, areas.detail.y + 3, size);
        assert!(app.detail_open());

        click(&mut app, 1, 1, size);
        assert!(!app.detail_open());

        app.open_report(3);
        click(&mut app, areas.detail_close.x + 1, areas.detail_close.y, size);
        assert!(!app.detail_open());
    }

    #[test]
    fn test_click_card_in_short_terminal() {
        let mut app = loaded();
        let size = Rect::new(0, 0, 100, 18);
        let grid = layout::areas(size).grid;

        click(&mut app, grid.x + 2, grid.y + 1, size);
        assert_eq!(app.selected_report().map(|r| r.id), Some(1));
    }
}
