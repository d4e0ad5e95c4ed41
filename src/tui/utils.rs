//! Layout helpers.

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// A rectangle of `percent_x` by `percent_y` centred in `r`.
pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let vertical = Layout::default()
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
        .split(vertical[1])[1]
}

/// Terminal column for a text cursor inside a bordered box, kept on the last
/// inner column once the text runs past the right border.
pub fn cursor_x(area: Rect, cursor: usize) -> u16 {
    let inner = area.width.saturating_sub(2);
    if inner == 0 {
        return area.x;
    }
    let offset = u16::try_from(cursor).unwrap_or(u16::MAX).min(inner - 1);
    area.x + 1 + offset
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cursor_stays_inside_box() {
        let area = Rect::new(10, 2, 12, 3);
        assert_eq!(cursor_x(area, 0), 11);
        assert_eq!(cursor_x(area, 4), 15);
        assert_eq!(cursor_x(area, 9), 20);
        assert_eq!(cursor_x(area, 500), 20);
        assert_eq!(cursor_x(Rect::new(3, 0, 1, 3), 7), 3);
    }
}
