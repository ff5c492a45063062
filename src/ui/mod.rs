use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;

pub mod layout;
pub mod widgets;

use crate::app::{App, InputMode, StatusLevel};
use crate::domain::{format_time_ago, Category, Report, Status};
use widgets::StatTile;

pub fn draw(f: &mut Frame, app: &mut App) {
    let size = f.size();
    let areas = layout::areas(size);
    app.ctx.grid_columns = layout::grid_columns(areas.grid.width);

    if app.loading {
        draw_loading(f, size);
        return;
    }

    draw_header(f, areas.header);
    draw_stats(f, areas.stats, app);
    draw_filters(f, areas.filters, app);
    draw_grid(f, areas.grid, app);
    draw_status_line(f, areas.status_line, app);
    draw_command_line(f, areas.command_line, app);

    if app.detail_open() {
        draw_backdrop(f, size);
        draw_detail(f, areas.detail, areas.detail_close, app);
    }
    if app.help_open {
        draw_help_popup(f, size);
    }
}

fn draw_loading(f: &mut Frame, area: Rect) {
    let popup = layout::centered_rect(40, 20, area);
    let paragraph = Paragraph::new("Loading reports…")
        .style(Style::default().fg(Color::Gray))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(paragraph, popup);
}

fn draw_header(f: &mut Frame, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(18)])
        .split(area);

    let title = Line::from(vec![
        Span::styled(
            "Reports Center",
            Style::default()
                .fg(Color::LightCyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled(
            "Monitor, review, and manage all community reports",
            Style::default().fg(Color::DarkGray),
        ),
    ]);
    let left = Paragraph::new(title).block(Block::default().borders(Borders::ALL));

    let export = Paragraph::new(Line::from(vec![
        Span::styled("e ", Style::default().fg(Color::Yellow)),
        Span::raw("Export CSV"),
    ]))
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)),
    );

    f.render_widget(left, chunks[0]);
    f.render_widget(export, chunks[1]);
}

fn draw_stats(f: &mut Frame, area: Rect, app: &App) {
    let stats = app.stats();
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 4); 4])
        .split(area);
    let colors = [Color::Blue, Color::Yellow, Color::Red, Color::Green];

    for (idx, (label, value)) in stats.tiles().into_iter().enumerate() {
        let tile = StatTile::new(label, value)
            .total(stats.total)
            .color(colors[idx]);
        f.render_widget(tile, chunks[idx]);
    }
}

fn draw_filters(f: &mut Frame, area: Rect, app: &App) {
    let searching = app.input_mode == InputMode::Search;
    let search_style = if searching {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::White)
    };
    let search_text = if app.filter.search.is_empty() && !searching {
        Span::styled(
            "Search by report, ward, or reporter...",
            Style::default().fg(Color::DarkGray),
        )
    } else {
        let cursor = if searching { "▏" } else { "" };
        Span::styled(format!("{}{}", app.filter.search, cursor), search_style)
    };

    let line = Line::from(vec![
        Span::styled("c ", Style::default().fg(Color::DarkGray)),
        Span::raw(format!("{} ▼", app.filter.category_label())),
        Span::raw("   "),
        Span::styled("s ", Style::default().fg(Color::DarkGray)),
        Span::raw(format!("{} ▼", app.filter.status_label())),
        Span::raw("   "),
        Span::styled("/ ", Style::default().fg(Color::DarkGray)),
        search_text,
    ]);

    let border = if searching {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let title = format!(
        " Showing {} of {} ",
        app.ctx.visible.len(),
        app.reports.len()
    );
    let paragraph = Paragraph::new(line).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border)
            .title(title),
    );
    f.render_widget(paragraph, area);
}

fn draw_grid(f: &mut Frame, area: Rect, app: &App) {
    let visible = app.visible_reports();
    if visible.is_empty() {
        let empty = Paragraph::new("No reports found")
            .style(Style::default().fg(Color::Gray))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        let height = area.height.min(5);
        f.render_widget(
            empty,
            Rect {
                height,
                ..area
            },
        );
        return;
    }

    let cursor = app.grid.cursor();
    let cards = layout::card_rects(area, visible.len(), app.ctx.grid_columns, cursor);
    for (idx, rect) in cards {
        if let Some(report) = visible.get(idx) {
            draw_card(f, rect, report, idx == cursor, app);
        }
    }
}

fn draw_card(f: &mut Frame, area: Rect, report: &Report, is_cursor: bool, app: &App) {
    let border = if is_cursor {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let inner_width = area.width.saturating_sub(2) as usize;

    let badge = if report.is_urgent {
        Line::from(urgent_badge())
    } else {
        Line::from("")
    };
    let title = Line::from(Span::styled(
        truncate_str(&report.title, inner_width),
        Style::default().add_modifier(Modifier::BOLD),
    ));
    let ward = Line::from(vec![
        Span::styled("@ ", Style::default().fg(Color::DarkGray)),
        Span::raw(report.ward.clone()),
        Span::raw("  "),
        category_badge(report.category),
    ]);
    let reporter = Line::from(Span::styled(
        format!("by {}", report.reporter),
        Style::default().fg(Color::DarkGray),
    ));
    let footer = Line::from(vec![
        status_badge(report.status),
        Span::raw("  "),
        Span::styled("▲ ", Style::default().fg(Color::Gray)),
        Span::raw(report.votes.to_string()),
        Span::raw("  "),
        Span::styled(
            format_time_ago(report.date_reported, app.ctx.now),
            Style::default().fg(Color::DarkGray),
        ),
    ]);

    let paragraph = Paragraph::new(Text::from(vec![badge, title, ward, reporter, footer])).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border)
            .title(format!(" #{} ", report.id)),
    );
    f.render_widget(paragraph, area);
}

fn draw_backdrop(f: &mut Frame, area: Rect) {
    let dim = Block::default().style(
        Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::DIM),
    );
    f.render_widget(dim, area);
}

fn draw_detail(f: &mut Frame, area: Rect, close_area: Rect, app: &App) {
    f.render_widget(Clear, area);
    let Some(report) = app.selected_report() else {
        return;
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(format!(" Report #{} ", report.id));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let close = Paragraph::new(Span::styled("[x]", Style::default().fg(Color::Gray)));
    f.render_widget(close, close_area);

    let paragraph = Paragraph::new(Text::from(detail_lines(report, app)))
        .wrap(Wrap { trim: false })
        .scroll((app.detail.scroll(), 0));
    f.render_widget(paragraph, inner);
}

fn detail_lines(report: &Report, app: &App) -> Vec<Line<'static>> {
    let mut lines = Vec::new();

    let mut badges = Vec::new();
    if report.is_urgent {
        badges.push(urgent_badge());
        badges.push(Span::raw(" "));
    }
    badges.push(status_badge(report.status));
    lines.push(Line::from(badges));
    lines.push(Line::from(Span::styled(
        report.title.clone(),
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD),
    )));
    lines.push(Line::from(""));

    let date = report
        .date_reported
        .with_timezone(&chrono::Local)
        .format("%Y-%m-%d")
        .to_string();
    let rows = [
        ("Category", report.category.title().to_string()),
        ("Ward", report.ward.clone()),
        ("Reporter", report.reporter.clone()),
        ("Date Reported", date),
        ("Community Votes", format!("▲ {}", report.votes)),
    ];
    for (label, value) in rows {
        lines.push(Line::from(vec![
            Span::styled(format!("{label:<16}"), Style::default().fg(Color::DarkGray)),
            Span::styled(value, Style::default().add_modifier(Modifier::BOLD)),
        ]));
    }

    lines.push(Line::from(""));
    lines.push(section_heading("Description"));
    lines.push(Line::from(report.description.clone()));
    lines.push(Line::from(""));

    lines.push(section_heading("Actions"));
    let urgent_style = if report.is_urgent {
        Style::default().fg(Color::LightYellow)
    } else {
        Style::default().fg(Color::LightRed)
    };
    lines.push(Line::from(vec![
        Span::styled("[u] ", Style::default().fg(Color::DarkGray)),
        Span::styled(report.urgency_label(), urgent_style),
    ]));
    if let Some(action) = report.status.next_action() {
        let color = match action.target() {
            Status::Resolved => Color::LightGreen,
            _ => Color::LightBlue,
        };
        lines.push(Line::from(vec![
            Span::styled(format!("[{}] ", action.key()), Style::default().fg(Color::DarkGray)),
            Span::styled(action.label(), Style::default().fg(color)),
        ]));
    }
    lines.push(Line::from(""));

    lines.push(section_heading("Admin Notes"));
    match (app.input_mode, app.note(report.id)) {
        (InputMode::Note(id), _) if id == report.id => {
            lines.push(Line::from(vec![
                Span::styled(app.command.input.clone(), Style::default().fg(Color::Yellow)),
                Span::styled("▏", Style::default().fg(Color::Yellow)),
            ]));
            lines.push(Line::from(Span::styled(
                "Enter=save Esc=cancel",
                Style::default().fg(Color::DarkGray),
            )));
        }
        (_, Some(note)) => lines.push(Line::from(note.to_string())),
        (_, None) => lines.push(Line::from(Span::styled(
            "Add internal notes or comments... (n)",
            Style::default().fg(Color::DarkGray),
        ))),
    }

    lines
}

fn section_heading(title: &'static str) -> Line<'static> {
    Line::from(Span::styled(
        title,
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
    ))
}

fn urgent_badge() -> Span<'static> {
    Span::styled(
        " ! URGENT ",
        Style::default()
            .fg(Color::White)
            .bg(Color::Red)
            .add_modifier(Modifier::BOLD),
    )
}

fn category_badge(category: Category) -> Span<'static> {
    let color = match category {
        Category::Security => Color::LightRed,
        Category::Environment => Color::LightGreen,
        Category::Health => Color::LightYellow,
        Category::Other => Color::Gray,
    };
    Span::styled(format!("[{}]", category.title()), Style::default().fg(color))
}

fn status_badge(status: Status) -> Span<'static> {
    let color = match status {
        Status::Pending => Color::Yellow,
        Status::InProgress => Color::LightBlue,
        Status::Resolved => Color::LightGreen,
    };
    Span::styled(
        format!(" {} ", status.title()),
        Style::default().fg(Color::Black).bg(color),
    )
}

fn draw_status_line(f: &mut Frame, area: Rect, app: &App) {
    let mut spans = vec![
        Span::styled("Reports ", Style::default().fg(Color::DarkGray)),
        Span::raw(format!("{}  ", app.reports.len())),
        Span::styled("Showing ", Style::default().fg(Color::DarkGray)),
        Span::raw(format!("{}  ", app.ctx.visible.len())),
    ];
    if let Some(report) = app.cursor_report() {
        spans.push(Span::styled("Cursor ", Style::default().fg(Color::DarkGray)));
        spans.push(Span::raw(format!("#{}  ", report.id)));
    }
    if app.filter.is_active() {
        spans.push(Span::styled("Filter ", Style::default().fg(Color::DarkGray)));
        spans.push(Span::raw("on  "));
    }
    if !app.notes.is_empty() {
        spans.push(Span::styled("Notes ", Style::default().fg(Color::DarkGray)));
        spans.push(Span::raw(app.notes.len().to_string()));
    }

    let paragraph = Paragraph::new(Line::from(spans))
        .style(Style::default().fg(Color::White))
        .alignment(Alignment::Left);
    f.render_widget(paragraph, area);
}

/// Get command hint for autocompletion
fn command_hint(input: &str) -> Option<&'static str> {
    let input = input.trim().to_lowercase();
    if input.is_empty() {
        return None;
    }

    let commands = [
        ("category", "category <security|environment|health|other|all>"),
        ("status", "status <pending|in-progress|resolved|all>"),
        ("search", "search <text>"),
        ("clear", "Clear all filters"),
        ("open", "open <id>"),
        ("urgent", "urgent <id>: toggle urgency"),
        ("start", "start <id>: mark in progress"),
        ("resolve", "resolve <id>: mark resolved"),
        ("set", "set <id> <status>"),
        ("export", "export [path]"),
        ("help", "Show key bindings"),
        ("quit", "Quit"),
    ];

    for (cmd, desc) in commands {
        if cmd.starts_with(&input) || input.starts_with(cmd) {
            return Some(desc);
        }
    }
    None
}

fn draw_command_line(f: &mut Frame, area: Rect, app: &App) {
    let content = match app.input_mode {
        InputMode::Command => {
            let hint = command_hint(&app.command.input).unwrap_or("filter | report | export");
            Line::from(vec![
                Span::styled(": ", Style::default().fg(Color::Yellow)),
                Span::raw(app.command.input.clone()),
                Span::styled(format!("  {}", hint), Style::default().fg(Color::DarkGray)),
            ])
        }
        InputMode::Search => Line::from(vec![
            Span::styled("/ ", Style::default().fg(Color::Yellow)),
            Span::raw(app.filter.search.clone()),
            Span::styled(
                "  (Enter=keep Esc=clear)",
                Style::default().fg(Color::DarkGray),
            ),
        ]),
        InputMode::Note(id) => Line::from(vec![
            Span::styled(format!("> note #{id} "), Style::default().fg(Color::LightCyan)),
            Span::raw(app.command.input.clone()),
            Span::styled(
                "  (empty=clear, Enter=ok Esc=cancel)",
                Style::default().fg(Color::DarkGray),
            ),
        ]),
        InputMode::Normal => {
            if let Some((text, level)) = app.status_text() {
                let color = match level {
                    StatusLevel::Info => Color::LightGreen,
                    StatusLevel::Warn => Color::LightYellow,
                    StatusLevel::Error => Color::LightRed,
                };
                Line::from(vec![
                    Span::styled("msg: ", Style::default().fg(Color::DarkGray)),
                    Span::styled(text.to_string(), Style::default().fg(color)),
                ])
            } else {
                action_hints(app)
            }
        }
    };

    let paragraph = Paragraph::new(content).style(Style::default().fg(Color::White));
    f.render_widget(paragraph, area);
}

fn action_hints(app: &App) -> Line<'static> {
    let hints: &[(&str, &str)] = if app.detail_open() {
        &[
            ("u", "urgent"),
            ("w", "start"),
            ("r", "resolve"),
            ("n", "note"),
            ("y", "copy"),
            ("Esc", "close"),
        ]
    } else {
        &[
            ("Enter", "open"),
            ("c", "category"),
            ("s", "status"),
            ("/", "search"),
            ("x", "clear"),
            ("e", "export"),
            (":", "command"),
            ("?", "help"),
            ("q", "quit"),
        ]
    };

    let mut spans = Vec::new();
    for (key, label) in hints {
        spans.push(Span::styled(
            key.to_string(),
            Style::default().fg(Color::Yellow),
        ));
        spans.push(Span::styled(
            format!(" {label}  "),
            Style::default().fg(Color::DarkGray),
        ));
    }
    Line::from(spans)
}

fn draw_help_popup(f: &mut Frame, area: Rect) {
    let popup_area = layout::centered_rect(64, 70, area);
    f.render_widget(Clear, popup_area);

    let lines = vec![
        Line::from("Grid"),
        Line::from("  h/j/k/l    Move between cards"),
        Line::from("  g / G      First / last card"),
        Line::from("  Enter      Open detail panel"),
        Line::from("  Mouse      Click card to open, scroll to move"),
        Line::from(""),
        Line::from("Filters"),
        Line::from("  c          Cycle category"),
        Line::from("  s          Cycle status"),
        Line::from("  /          Search title, ward, reporter"),
        Line::from("  x          Clear filters"),
        Line::from(""),
        Line::from("Detail panel"),
        Line::from("  u          Mark / unmark urgent"),
        Line::from("  w          Start work (pending)"),
        Line::from("  r          Resolve (in progress)"),
        Line::from("  n          Edit admin note"),
        Line::from("  y          Copy id and title"),
        Line::from("  Esc        Close (or click outside)"),
        Line::from(""),
        Line::from("  e          Export filtered reports to CSV"),
        Line::from("  :          Command (:status resolved, :open 3, :export out.csv)"),
        Line::from("  ?          Toggle help"),
        Line::from("  q          Quit"),
    ];

    let paragraph = Paragraph::new(Text::from(lines))
        .block(Block::default().title("Help").borders(Borders::ALL))
        .alignment(Alignment::Left)
        .wrap(Wrap { trim: true });

    f.render_widget(paragraph, popup_area);
}

fn truncate_str(value: &str, max: usize) -> String {
    if value.chars().count() <= max {
        return value.to_string();
    }
    let keep = max.saturating_sub(1);
    let mut out: String = value.chars().take(keep).collect();
    out.push('…');
    out
}
