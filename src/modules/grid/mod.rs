//! Card grid cursor

use crossterm::event::{KeyCode, KeyEvent};

use crate::core::{Action, Context, Module};
use crate::domain::ReportId;

#[derive(Debug, Clone, Default)]
pub struct ReportGrid {
    cursor: usize,
}

impl ReportGrid {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn set_cursor(&mut self, cursor: usize, len: usize) {
        self.cursor = cursor.min(len.saturating_sub(1));
    }

    /// Keep the cursor inside a list that may have shrunk.
    pub fn clamp(&mut self, len: usize) {
        self.set_cursor(self.cursor, len);
    }

    pub fn current(&self, ctx: &Context) -> Option<ReportId> {
        ctx.visible.get(self.cursor).copied()
    }

    fn step(&mut self, delta: isize, len: usize) {
        if len == 0 {
            self.cursor = 0;
            return;
        }
        let next = self.cursor as isize + delta;
        if (0..len as isize).contains(&next) {
            self.cursor = next as usize;
        }
    }
}

impl Module for ReportGrid {
    fn handle_key(&mut self, key: KeyEvent, ctx: &mut Context) -> Action {
        let len = ctx.visible.len();
        let columns = ctx.grid_columns.max(1) as isize;

        match key.code {
            KeyCode::Left | KeyCode::Char('h') => self.step(-1, len),
            KeyCode::Right | KeyCode::Char('l') => self.step(1, len),
            KeyCode::Up | KeyCode::Char('k') => self.step(-columns, len),
            KeyCode::Down | KeyCode::Char('j') => self.step(columns, len),
            KeyCode::Home | KeyCode::Char('g') => self.cursor = 0,
            KeyCode::End | KeyCode::Char('G') => self.cursor = len.saturating_sub(1),
            KeyCode::Enter => {
                return match self.current(ctx) {
                    Some(id) => Action::Open(id),
                    None => Action::None,
                };
            }
            _ => {}
        }
        Action::None
    }
}
