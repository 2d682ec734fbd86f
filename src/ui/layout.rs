use ratatui::layout::{Constraint, Direction, Layout, Rect};

pub struct QuizLayout {
    pub header_area: Rect,
    pub progress_area: Rect,
    pub question_area: Rect,
    pub options_area: Rect,
    pub feedback_area: Rect,
    pub help_area: Rect,
}

pub struct HomeLayout {
    pub title_area: Rect,
    pub stats_area: Rect,
    pub modes_area: Rect,
    pub help_area: Rect,
}

pub fn calculate_quiz_chunks(area: Rect) -> QuizLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Min(4),
            Constraint::Min(6),
            Constraint::Percentage(35),
            Constraint::Length(4),
        ])
        .split(area);

    QuizLayout {
        header_area: chunks[0],
        progress_area: chunks[1],
        question_area: chunks[2],
        options_area: chunks[3],
        feedback_area: chunks[4],
        help_area: chunks[5],
    }
}

pub fn calculate_home_chunks(area: Rect) -> HomeLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(5),
            Constraint::Min(5),
            Constraint::Length(3),
        ])
        .split(area);

    HomeLayout {
        title_area: chunks[0],
        stats_area: chunks[1],
        modes_area: chunks[2],
        help_area: chunks[3],
    }
}

/// A rectangle of `percent_x` by `height` centred in `area`, for popups.
pub fn centered_rect(percent_x: u16, height: u16, area: Rect) -> Rect {
    let height = height.min(area.height);
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(area.height.saturating_sub(height) / 2),
            Constraint::Length(height),
            Constraint::Min(0),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quiz_layout() {
        let area = Rect::new(0, 0, 100, 60);
        let layout = calculate_quiz_chunks(area);

        assert_eq!(layout.header_area.height, 3);
        assert_eq!(layout.progress_area.height, 1);
        assert_eq!(layout.help_area.height, 4);
        assert!(layout.question_area.height >= 4);
        assert!(layout.options_area.height >= 6);
        assert!(layout.feedback_area.height > 0);
    }

    #[test]
    fn test_home_layout() {
        let area = Rect::new(0, 0, 80, 30);
        let layout = calculate_home_chunks(area);

        assert_eq!(layout.title_area.height, 3);
        assert_eq!(layout.stats_area.height, 5);
        assert_eq!(layout.help_area.height, 3);
        // 30 - 2 (margin) - 11 fixed rows
        assert_eq!(layout.modes_area.height, 17);
    }

    #[test]
    fn test_centered_rect_stays_inside_area() {
        let area = Rect::new(0, 0, 100, 40);
        let popup = centered_rect(60, 7, area);

        assert_eq!(popup.height, 7);
        assert_eq!(popup.width, 60);
        assert_eq!(popup.y, 16);
        assert!(popup.x + popup.width <= area.width);
    }

    #[test]
    fn test_centered_rect_clamps_height() {
        let area = Rect::new(0, 0, 50, 5);
        let popup = centered_rect(50, 10, area);
        assert_eq!(popup.height, 5);
    }
}
