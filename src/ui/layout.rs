use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Content lines of a card plus its border.
pub const CARD_HEIGHT: u16 = 7;

#[derive(Debug, Clone, Copy)]
pub struct UiAreas {
    pub size: Rect,
    pub header: Rect,
    pub stats: Rect,
    pub filters: Rect,
    pub grid: Rect,
    pub status_line: Rect,
    pub command_line: Rect,
    pub detail: Rect,
    pub detail_close: Rect,
}

pub fn areas(size: Rect) -> UiAreas {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(4),
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(size);

    let detail = detail_rect(size);
    let detail_close = Rect {
        x: (detail.x + detail.width).saturating_sub(5),
        y: detail.y,
        width: 3.min(detail.width),
        height: 1.min(detail.height),
    };

    UiAreas {
        size,
        header: vertical[0],
        stats: vertical[1],
        filters: vertical[2],
        grid: vertical[3],
        status_line: vertical[4],
        command_line: vertical[5],
        detail,
        detail_close,
    }
}

/// Slide-in panel on the right edge, full height.
fn detail_rect(size: Rect) -> Rect {
    let width = if size.width < 60 {
        size.width
    } else {
        (size.width / 2).clamp(56, 72).min(size.width)
    };
    Rect {
        x: size.x + size.width - width,
        y: size.y,
        width,
        height: size.height,
    }
}

/// Responsive column count: 1 / 2 / 3 by width.
pub fn grid_columns(width: u16) -> usize {
    match width {
        0..=79 => 1,
        80..=139 => 2,
        _ => 3,
    }
}

/// Rects of the cards that fit in `area`, keyed by index into the visible
/// list. Rows scroll so the cursor row stays on screen. An area shorter than
/// one card still shows a single row of clipped cards.
pub fn card_rects(area: Rect, len: usize, columns: usize, cursor: usize) -> Vec<(usize, Rect)> {
    let card_height = CARD_HEIGHT.min(area.height);
    if card_height == 0 {
        return Vec::new();
    }
    let columns = columns.max(1);
    let rows_fit = (area.height / card_height) as usize;
    let cursor_row = cursor / columns;
    let first_row = cursor_row.saturating_sub(rows_fit - 1);

    let column_areas = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(vec![Constraint::Ratio(1, columns as u32); columns])
        .split(area);

    let mut out = Vec::new();
    for row in 0..rows_fit {
        let y = area.y + row as u16 * card_height;
        if y + card_height > area.y + area.height {
            break;
        }
        for (col, column) in column_areas.iter().enumerate() {
            let idx = (first_row + row) * columns + col;
            if idx >= len {
                return out;
            }
            out.push((
                idx,
                Rect {
                    x: column.x,
                    y,
                    width: column.width,
                    height: card_height,
                },
            ));
        }
    }
    out
}

pub fn rect_contains(rect: Rect, col: u16, row: u16) -> bool {
    col >= rect.x
        && col < rect.x.saturating_add(rect.width)
        && row >= rect.y
        && row < rect.y.saturating_add(rect.height)
}

pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
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

#[cfg(test)]
mod tests {
    use super::*;

    fn rect(width: u16, height: u16) -> Rect {
        Rect {
            x: 0,
            y: 0,
            width,
            height,
        }
    }

    #[test]
    fn test_grid_columns() {
        assert_eq!(grid_columns(60), 1);
        assert_eq!(grid_columns(100), 2);
        assert_eq!(grid_columns(160), 3);
    }

    #[test]
    fn test_card_rects_fill_rows() {
        let cards = card_rects(rect(150, 14), 6, 3, 0);
        let ids: Vec<usize> = cards.iter().map(|(idx, _)| *idx).collect();
        assert_eq!(ids, vec![0, 1, 2, 3, 4, 5]);
        assert_eq!(cards[3].1.y, CARD_HEIGHT);
        assert_eq!(cards[1].1.x, 50);
    }

    #[test]
    fn test_card_rects_scroll_to_cursor() {
        // Room for one row of two cards; cursor on the third row.
        let cards = card_rects(rect(100, 8), 6, 2, 5);
        let ids: Vec<usize> = cards.iter().map(|(idx, _)| *idx).collect();
        assert_eq!(ids, vec![4, 5]);
    }

    #[test]
    fn test_detail_panel_on_right() {
        let wide = areas(rect(120, 40));
        assert_eq!(wide.detail.x + wide.detail.width, 120);
        assert_eq!(wide.detail.width, 60);
        assert!(rect_contains(wide.detail, wide.detail_close.x, wide.detail_close.y));

        let narrow = areas(rect(50, 20));
        assert_eq!(narrow.detail.width, 50);
    }

    #[test]
    fn test_card_rects_in_short_terminal() {
        // 18 rows leave a 6-row grid, shorter than a full card.
        let grid = areas(rect(100, 18)).grid;
        assert_eq!(grid.height, 6);

        let cards = card_rects(grid, 6, 2, 0);
        let ids: Vec<usize> = cards.iter().map(|(idx, _)| *idx).collect();
        assert_eq!(ids, vec![0, 1]);
        assert!(cards.iter().all(|(_, r)| r.height == 6 && r.y == grid.y));

        let ids: Vec<usize> = card_rects(grid, 6, 2, 3).iter().map(|(idx, _)| *idx).collect();
        assert_eq!(ids, vec![2, 3]);

        assert!(card_rects(rect(100, 0), 6, 2, 0).is_empty());
    }
}
