use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use crate::core::{Action, Command, Context, FilterChange, NotifyLevel, Selected};
use crate::domain::{Report, ReportFilter, ReportId, ReportStats, Status};
use crate::modules::detail::DetailPanel;
use crate::modules::grid::ReportGrid;
use crate::store::{self, ReportSource};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    /// Live search; every keystroke re-filters
    Search,
    Command,
    Note(ReportId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Warn,
    Error,
}

#[derive(Debug, Default, Clone)]
pub struct CommandBar {
    pub input: String,
    pub last: Option<String>,
}

#[derive(Debug, Clone)]
pub struct StatusMessage {
    pub text: String,
    pub level: StatusLevel,
    pub since: Instant,
}

#[derive(Debug)]
pub struct App {
    /// Shared context for modules
    pub ctx: Context,
    pub reports: Vec<Report>,
    pub filter: ReportFilter,
    pub grid: ReportGrid,
    pub detail: DetailPanel,
    /// Admin notes by report id; in memory only
    pub notes: BTreeMap<ReportId, String>,
    pub input_mode: InputMode,
    pub command: CommandBar,
    pub export_dir: PathBuf,
    pub status: Option<StatusMessage>,
    pub pending_copy: Option<String>,
    pub loading: bool,
    pub help_open: bool,
    pub should_quit: bool,
    /// Indices into `reports` that pass `filter`
    visible: Vec<usize>,
}

impl App {
    pub fn new(export_dir: PathBuf) -> Self {
        Self {
            ctx: Context::new(),
            reports: Vec::new(),
            filter: ReportFilter::default(),
            grid: ReportGrid::new(),
            detail: DetailPanel::new(),
            notes: BTreeMap::new(),
            input_mode: InputMode::Normal,
            command: CommandBar::default(),
            export_dir,
            status: None,
            pending_copy: None,
            loading: true,
            help_open: false,
            should_quit: false,
            visible: Vec::new(),
        }
    }

    /// Populate the list once. A failed load is logged and leaves the list empty.
    pub fn load(&mut self, source: &ReportSource) {
        match store::load(source) {
            Ok(reports) => {
                tracing::info!(count = reports.len(), source = %source.display(), "loaded reports");
                self.reports = reports;
            }
            Err(err) => {
                tracing::error!(error = %err, source = %source.display(), "error fetching reports");
                self.reports.clear();
            }
        }
        self.loading = false;
        self.apply_filters();
    }

    /// Recompute the visible list. Runs after every list or filter change.
    pub fn apply_filters(&mut self) {
        self.visible = self.filter.apply(&self.reports);
        self.grid.clamp(self.visible.len());
        self.sync_context();
    }

    /// Sync context with app state
    pub fn sync_context(&mut self) {
        self.ctx.visible = self
            .visible
            .iter()
            .filter_map(|idx| self.reports.get(*idx))
            .map(|report| report.id)
            .collect();
        self.ctx.open_report = self
            .ctx
            .selected_id()
            .and_then(|id| self.reports.iter().find(|report| report.id == id))
            .cloned();
    }

    pub fn visible_reports(&self) -> Vec<&Report> {
        self.visible
            .iter()
            .filter_map(|idx| self.reports.get(*idx))
            .collect()
    }

    pub fn stats(&self) -> ReportStats {
        ReportStats::collect(&self.reports)
    }

    pub fn report(&self, id: ReportId) -> Option<&Report> {
        self.reports.iter().find(|report| report.id == id)
    }

    fn report_mut(&mut self, id: ReportId) -> Option<&mut Report> {
        self.reports.iter_mut().find(|report| report.id == id)
    }

    /// The report under the grid cursor.
    pub fn cursor_report(&self) -> Option<&Report> {
        self.grid
            .current(&self.ctx)
            .and_then(|id| self.report(id))
    }

    pub fn selected_report(&self) -> Option<&Report> {
        self.ctx.selected_id().and_then(|id| self.report(id))
    }

    pub fn detail_open(&self) -> bool {
        self.ctx.selected != Selected::None
    }

    pub fn open_report(&mut self, id: ReportId) -> bool {
        if self.report(id).is_none() {
            return false;
        }
        self.ctx.selected = Selected::Report(id);
        self.detail.reset();
        if let Some(pos) = self.ctx.visible.iter().position(|visible| *visible == id) {
            self.grid.set_cursor(pos, self.ctx.visible.len());
        }
        self.sync_context();
        true
    }

    pub fn close_detail(&mut self) {
        self.ctx.selected = Selected::None;
        self.ctx.open_report = None;
        if matches!(self.input_mode, InputMode::Note(_)) {
            self.exit_input();
        }
    }

    pub fn toggle_urgent(&mut self, id: ReportId) -> bool {
        let Some(report) = self.report_mut(id) else {
            return false;
        };
        report.is_urgent = !report.is_urgent;
        tracing::debug!(id, urgent = report.is_urgent, "toggled urgency");
        self.apply_filters();
        true
    }

    /// Write `status` to the report. Any value is accepted.
    pub fn advance_status(&mut self, id: ReportId, status: Status) -> bool {
        let Some(report) = self.report_mut(id) else {
            return false;
        };
        tracing::debug!(id, from = report.status.id(), to = status.id(), "status change");
        report.status = status;
        self.apply_filters();
        true
    }

    pub fn note(&self, id: ReportId) -> Option<&str> {
        self.notes.get(&id).map(String::as_str)
    }

    pub fn set_note(&mut self, id: ReportId, text: &str) {
        let text = text.trim();
        if text.is_empty() {
            self.notes.remove(&id);
        } else {
            self.notes.insert(id, text.to_string());
        }
    }

    pub fn set_filter(&mut self, change: FilterChange) {
        match change {
            FilterChange::Category(category) => self.filter.category = category,
            FilterChange::Status(status) => self.filter.status = status,
            FilterChange::Search(search) => self.filter.search = search,
            FilterChange::Clear => self.filter.clear(),
        }
        tracing::debug!(filter = ?self.filter, "filter changed");
        self.apply_filters();
    }

    pub fn cycle_category(&mut self) {
        self.filter.cycle_category();
        self.apply_filters();
    }

    pub fn cycle_status(&mut self) {
        self.filter.cycle_status();
        self.apply_filters();
    }

    pub fn set_status(&mut self, text: impl Into<String>, level: StatusLevel) {
        self.status = Some(StatusMessage {
            text: text.into(),
            level,
            since: Instant::now(),
        });
    }

    pub fn status_text(&self) -> Option<(&str, StatusLevel)> {
        self.status
            .as_ref()
            .map(|status| (status.text.as_str(), status.level))
    }

    pub fn on_tick(&mut self) {
        if let Some(status) = self.status.as_ref() {
            if status.since.elapsed() > Duration::from_secs(3) {
                self.status = None;
            }
        }
        self.ctx.now = chrono::Utc::now();
    }

    pub fn take_copy_request(&mut self) -> Option<String> {
        self.pending_copy.take()
    }

    // === Input modes ===

    pub fn enter_search(&mut self) {
        self.input_mode = InputMode::Search;
    }

    pub fn push_search(&mut self, ch: char) {
        self.filter.search.push(ch);
        self.apply_filters();
    }

    pub fn pop_search(&mut self) {
        self.filter.search.pop();
        self.apply_filters();
    }

    pub fn enter_command(&mut self) {
        self.input_mode = InputMode::Command;
        self.command.input.clear();
    }

    pub fn enter_note(&mut self, id: ReportId) {
        self.input_mode = InputMode::Note(id);
        self.command.input = self.note(id).unwrap_or_default().to_string();
    }

    pub fn exit_input(&mut self) {
        self.input_mode = InputMode::Normal;
        self.command.input.clear();
    }

    pub fn apply_note(&mut self, id: ReportId) {
        let text = std::mem::take(&mut self.command.input);
        self.set_note(id, &text);
        self.set_status(format!("Saved note for #{id}"), StatusLevel::Info);
        self.exit_input();
    }

    pub fn apply_command(&mut self) {
        let input = self.command.input.trim().to_string();
        if input.is_empty() {
            self.exit_input();
            return;
        }
        let cmd = crate::core::parse_command(&input);
        self.command.last = Some(input);
        self.exit_input();
        let action = self.execute_command(&cmd);
        self.apply_action(action);
    }

    /// Execute a parsed command
    pub fn execute_command(&mut self, cmd: &Command) -> Action {
        match cmd {
            Command::Category(category) => Action::Filter(FilterChange::Category(*category)),
            Command::Status(status) => Action::Filter(FilterChange::Status(*status)),
            Command::Search(text) => Action::Filter(FilterChange::Search(text.clone())),
            Command::Clear => Action::Filter(FilterChange::Clear),
            Command::Open(id) => Action::Open(*id),
            Command::Urgent(id) => Action::ToggleUrgent(*id),
            Command::Start(id) => Action::SetStatus(*id, Status::InProgress),
            Command::Resolve(id) => Action::SetStatus(*id, Status::Resolved),
            Command::Set(id, status) => Action::SetStatus(*id, *status),
            Command::Export(path) => Action::Export(path.clone()),
            Command::Help => Action::Help,
            Command::Quit => Action::Quit,
            Command::Unknown(s) => {
                Action::Notify(format!("Unknown command: {}", s), NotifyLevel::Warn)
            }
        }
    }

    /// Apply an action returned by a command or module
    pub fn apply_action(&mut self, action: Action) {
        match action {
            Action::None => {}
            Action::Open(id) => {
                if !self.open_report(id) {
                    self.set_status(format!("Report #{id} not found"), StatusLevel::Warn);
                }
            }
            Action::CloseDetail => self.close_detail(),
            Action::ToggleUrgent(id) => {
                if self.toggle_urgent(id) {
                    let urgent = self.report(id).is_some_and(|report| report.is_urgent);
                    let verb = if urgent { "Marked" } else { "Unmarked" };
                    self.set_status(format!("{verb} #{id} urgent"), StatusLevel::Info);
                } else {
                    self.set_status(format!("Report #{id} not found"), StatusLevel::Warn);
                }
            }
            Action::SetStatus(id, status) => {
                if self.advance_status(id, status) {
                    self.set_status(format!("#{id} is now {}", status.title()), StatusLevel::Info);
                } else {
                    self.set_status(format!("Report #{id} not found"), StatusLevel::Warn);
                }
            }
            Action::EditNote(id) => self.enter_note(id),
            Action::Filter(change) => self.set_filter(change),
            Action::Export(target) => {
                let action = crate::modules::export::export_current_view(self, target);
                self.apply_action(action);
            }
            Action::Copy(text) => {
                self.ctx.set_clipboard(text.clone());
                self.pending_copy = Some(text);
            }
            Action::Notify(msg, level) => {
                let level = match level {
                    NotifyLevel::Info => StatusLevel::Info,
                    NotifyLevel::Warn => StatusLevel::Warn,
                    NotifyLevel::Error => StatusLevel::Error,
                };
                self.set_status(msg, level);
            }
            Action::Help => self.help_open = !self.help_open,
            Action::Quit => self.should_quit = true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loaded() -> App {
        let mut app = App::new(std::env::temp_dir());
        app.load(&ReportSource::Builtin);
        app
    }

    fn visible_ids(app: &App) -> Vec<ReportId> {
        app.visible_reports().iter().map(|r| r.id).collect()
    }

    #[test]
    fn test_load_clears_loading_state() {
        let mut app = App::new(std::env::temp_dir());
        assert!(app.loading);
        app.load(&ReportSource::Builtin);
        assert!(!app.loading);
        assert_eq!(visible_ids(&app), vec![1, 2, 3, 4, 5, 6]);
        assert_eq!(app.ctx.visible, vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_failed_load_leaves_list_empty() {
        let mut app = App::new(std::env::temp_dir());
        app.load(&ReportSource::File(PathBuf::from("/nonexistent/reports.json")));
        assert!(!app.loading);
        assert!(app.reports.is_empty());
        assert!(app.visible_reports().is_empty());
        assert_eq!(app.stats(), ReportStats::default());
    }

    #[test]
    fn test_mutation_refilters() {
        let mut app = loaded();
        app.set_filter(FilterChange::Status(Some(Status::Pending)));
        assert_eq!(visible_ids(&app), vec![1, 4, 6]);

        assert!(app.advance_status(1, Status::InProgress));
        assert_eq!(visible_ids(&app), vec![4, 6]);
        assert!(!app.advance_status(99, Status::Resolved));
    }

    #[test]
    fn test_open_panel_tracks_mutations() {
        let mut app = loaded();
        assert!(app.open_report(4));
        assert_eq!(app.ctx.open_report.as_ref().map(|r| r.is_urgent), Some(false));

        app.apply_action(Action::ToggleUrgent(4));
        assert_eq!(app.ctx.open_report.as_ref().map(|r| r.is_urgent), Some(true));

        app.apply_action(Action::SetStatus(4, Status::Resolved));
        assert_eq!(
            app.ctx.open_report.as_ref().map(|r| r.status),
            Some(Status::Resolved)
        );

        // Toggling a different report leaves the open one alone.
        app.apply_action(Action::ToggleUrgent(2));
        assert_eq!(app.selected_report().map(|r| r.id), Some(4));
        assert_eq!(app.ctx.open_report.as_ref().map(|r| r.is_urgent), Some(true));
    }

    #[test]
    fn test_open_unknown_report() {
        let mut app = loaded();
        app.apply_action(Action::Open(42));
        assert!(!app.detail_open());
        assert_eq!(app.status_text().map(|(_, level)| level), Some(StatusLevel::Warn));
    }

    #[test]
    fn test_notes() {
        let mut app = loaded();
        app.apply_action(Action::EditNote(2));
        assert_eq!(app.input_mode, InputMode::Note(2));
        app.command.input = "  call the OCS  ".to_string();
        app.apply_note(2);
        assert_eq!(app.note(2), Some("call the OCS"));
        assert_eq!(app.input_mode, InputMode::Normal);

        app.enter_note(2);
        assert_eq!(app.command.input, "call the OCS");
        app.command.input.clear();
        app.apply_note(2);
        assert_eq!(app.note(2), None);
    }

    #[test]
    fn test_commands() {
        let mut app = loaded();
        app.command.input = "status resolved".to_string();
        app.apply_command();
        assert_eq!(visible_ids(&app), vec![3]);

        app.command.input = "set 3 pending".to_string();
        app.apply_command();
        assert!(visible_ids(&app).is_empty());

        app.command.input = "clear".to_string();
        app.apply_command();
        assert_eq!(visible_ids(&app).len(), 6);

        app.command.input = "bogus".to_string();
        app.apply_command();
        assert_eq!(
            app.status_text(),
            Some(("Unknown command: bogus", StatusLevel::Warn))
        );
    }

    #[test]
    fn test_copy_request() {
        let mut app = loaded();
        app.apply_action(Action::Copy("#1 x".to_string()));
        assert_eq!(app.ctx.clipboard.as_deref(), Some("#1 x"));
        assert_eq!(app.take_copy_request().as_deref(), Some("#1 x"));
        assert!(app.take_copy_request().is_none());
    }
}
