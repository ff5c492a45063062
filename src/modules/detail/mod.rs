//! Detail panel for the open report
//!
//! Keys:
//! - u: mark / unmark urgent
//! - w: start work (pending only)
//! - r: resolve (in-progress only)
//! - n: edit admin note
//! - y: copy id and title
//! - j/k: scroll, Esc/q: close

use crossterm::event::{KeyCode, KeyEvent};

use crate::core::{Action, Context, Module, NotifyLevel};
use crate::domain::StatusAction;

#[derive(Debug, Clone, Default)]
pub struct DetailPanel {
    scroll: u16,
}

impl DetailPanel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn scroll(&self) -> u16 {
        self.scroll
    }

    pub fn reset(&mut self) {
        self.scroll = 0;
    }

    fn status_action(&self, ctx: &Context, wanted: StatusAction) -> Action {
        let Some(report) = ctx.open_report.as_ref() else {
            return Action::None;
        };
        match report.status.next_action() {
            Some(action) if action == wanted => Action::SetStatus(report.id, action.target()),
            _ => Action::Notify(
                format!(
                    "{} is not available for {} reports",
                    wanted.label(),
                    report.status.title().to_lowercase()
                ),
                NotifyLevel::Warn,
            ),
        }
    }
}

impl Module for DetailPanel {
    fn handle_key(&mut self, key: KeyEvent, ctx: &mut Context) -> Action {
        let Some(report) = ctx.open_report.as_ref() else {
            return Action::CloseDetail;
        };
        let id = report.id;

        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => Action::CloseDetail,
            KeyCode::Char('u') => Action::ToggleUrgent(id),
            KeyCode::Char('w') => self.status_action(ctx, StatusAction::StartWork),
            KeyCode::Char('r') => self.status_action(ctx, StatusAction::Resolve),
            KeyCode::Char('n') => Action::EditNote(id),
            KeyCode::Char('y') => Action::Copy(format!("#{} {}", id, report.title)),
            KeyCode::Down | KeyCode::Char('j') => {
                self.scroll = self.scroll.saturating_add(1);
                Action::None
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.scroll = self.scroll.saturating_sub(1);
                Action::None
            }
            _ => Action::None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Status;
    use crate::store::fixture::builtin_reports;
    use crossterm::event::KeyModifiers;

    fn ctx_with(status: Status) -> Context {
        let mut report = builtin_reports().remove(0);
        report.status = status;
        let mut ctx = Context::new();
        ctx.selected = crate::core::Selected::Report(report.id);
        ctx.open_report = Some(report);
        ctx
    }

    fn press(panel: &mut DetailPanel, ctx: &mut Context, ch: char) -> Action {
        panel.handle_key(KeyEvent::new(KeyCode::Char(ch), KeyModifiers::NONE), ctx)
    }

    #[test]
    fn test_status_buttons_are_gated() {
        let mut panel = DetailPanel::new();

        let mut ctx = ctx_with(Status::Pending);
        assert_eq!(
            press(&mut panel, &mut ctx, 'w'),
            Action::SetStatus(1, Status::InProgress)
        );
        assert!(matches!(
            press(&mut panel, &mut ctx, 'r'),
            Action::Notify(_, NotifyLevel::Warn)
        ));

        let mut ctx = ctx_with(Status::InProgress);
        assert_eq!(
            press(&mut panel, &mut ctx, 'r'),
            Action::SetStatus(1, Status::Resolved)
        );

        let mut ctx = ctx_with(Status::Resolved);
        assert!(matches!(press(&mut panel, &mut ctx, 'w'), Action::Notify(..)));
        assert!(matches!(press(&mut panel, &mut ctx, 'r'), Action::Notify(..)));
    }

    #[test]
    fn test_other_actions() {
        let mut panel = DetailPanel::new();
        let mut ctx = ctx_with(Status::Pending);
        assert_eq!(press(&mut panel, &mut ctx, 'u'), Action::ToggleUrgent(1));
        assert_eq!(press(&mut panel, &mut ctx, 'n'), Action::EditNote(1));
        assert_eq!(
            press(&mut panel, &mut ctx, 'y'),
            Action::Copy("#1 Open drain causing flooding on main road".to_string())
        );
        assert_eq!(press(&mut panel, &mut ctx, 'q'), Action::CloseDetail);

        ctx.open_report = None;
        assert_eq!(press(&mut panel, &mut ctx, 'u'), Action::CloseDetail);
    }
}
