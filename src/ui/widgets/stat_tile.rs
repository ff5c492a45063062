//! Stat tile: label, count, and a share-of-total bar

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Widget},
};

pub struct StatTile<'a> {
    label: &'a str,
    value: usize,
    total: usize,
    color: Color,
}

impl<'a> StatTile<'a> {
    pub fn new(label: &'a str, value: usize) -> Self {
        Self {
            label,
            value,
            total: value,
            color: Color::Cyan,
        }
    }

    pub fn total(mut self, total: usize) -> Self {
        self.total = total;
        self
    }

    pub fn color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }
}

impl<'a> Widget for StatTile<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray));
        let inner = block.inner(area);
        block.render(area, buf);
        if inner.width == 0 || inner.height == 0 {
            return;
        }

        buf.set_stringn(
            inner.x,
            inner.y,
            self.label,
            inner.width as usize,
            Style::default().fg(Color::Gray),
        );

        let value = self.value.to_string();
        let value_x = (inner.x + inner.width).saturating_sub(value.len() as u16);
        buf.set_stringn(
            value_x.max(inner.x),
            inner.y,
            &value,
            inner.width as usize,
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        );

        if inner.height < 2 {
            return;
        }
        let bar = share_bar(self.value, self.total, inner.width as usize);
        buf.set_stringn(
            inner.x,
            inner.y + 1,
            bar,
            inner.width as usize,
            Style::default().fg(self.color),
        );
    }
}

/// `width` cells, filled in proportion to `value / total`.
pub fn share_bar(value: usize, total: usize, width: usize) -> String {
    if width == 0 {
        return String::new();
    }
    let filled = if total == 0 {
        0
    } else {
        ((value.min(total) as f64 / total as f64) * width as f64).round() as usize
    };
    let mut bar = "█".repeat(filled);
    bar.push_str(&"░".repeat(width - filled));
    bar
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_share_bar() {
        assert_eq!(share_bar(3, 6, 4), "██░░");
        assert_eq!(share_bar(6, 6, 3), "███");
        assert_eq!(share_bar(0, 0, 3), "░░░");
        assert_eq!(share_bar(1, 1, 0), "");
    }

    #[test]
    fn test_render_label_and_value() {
        let area = Rect::new(0, 0, 20, 4);
        let mut buf = Buffer::empty(area);
        StatTile::new("Pending", 3).total(6).render(area, &mut buf);

        let row: String = (0..20).map(|x| buf.get(x, 1).symbol().to_string()).collect();
        assert!(row.contains("Pending"));
        assert!(row.trim_end_matches('│').trim_end().ends_with('3'));
    }
}
