use crate::models::{Chapter, Notice, NoticeKind};
use crate::ui::key_hint;
use crate::ui::layout::centered_rect;
use crate::utils::truncate_string;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

fn draw_confirmation(f: &mut Frame, title: &str, message: &str, yes: &str, no: &str, accent: Color) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(5)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(5),
            Constraint::Length(3),
        ])
        .split(f.area());

    let title = Paragraph::new(title.to_string())
        .style(Style::default().fg(accent).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(title, chunks[0]);

    let message = Paragraph::new(message.to_string())
        .style(Style::default().fg(Color::White))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(message, chunks[1]);

    let help_text = vec![Line::from(vec![
        Span::styled(
            "y",
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        ),
        Span::from(format!(" {}  ", yes)),
        Span::styled(
            "n",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ),
        Span::from(format!(" {}", no)),
    ])];
    let help = Paragraph::new(help_text)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(help, chunks[2]);
}

pub fn draw_quit_confirmation(f: &mut Frame) {
    draw_confirmation(
        f,
        "Back to Home",
        "Leave this session? Your position in review lists is kept.",
        "Yes (Home)",
        "No (Continue)",
        Color::Yellow,
    );
}

pub fn draw_clear_confirmation(f: &mut Frame) {
    draw_confirmation(
        f,
        "Clear All Progress",
        "This deletes your practice position, wrong answers and starred questions. It cannot be undone.",
        "Yes, clear everything",
        "No",
        Color::Red,
    );
}

pub fn draw_notice(f: &mut Frame, notice: &Notice) {
    let (title, color) = match notice.kind {
        NoticeKind::Info => ("Notice", Color::Cyan),
        NoticeKind::Success => ("Done", Color::Green),
        NoticeKind::Warning => ("Heads up", Color::Yellow),
        NoticeKind::Error => ("Error", Color::Red),
    };
    let area = centered_rect(60, 7, f.area());

    let body = Paragraph::new(vec![
        Line::from(notice.message.as_str()),
        Line::from(""),
        Line::from(Span::styled(
            "Press any key to continue",
            Style::default().fg(Color::DarkGray),
        )),
    ])
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: true })
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(color))
            .title(Span::styled(
                title,
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            )),
    );
    f.render_widget(Clear, area);
    f.render_widget(body, area);
}

pub fn draw_chapter_picker(f: &mut Frame, chapters: &[Chapter], cursor: usize) {
    let height = (chapters.len() as u16 + 1).saturating_add(4).min(20);
    let area = centered_rect(60, height, f.area());
    let width = area.width.saturating_sub(8) as usize;

    let mut items = vec![ListItem::new(Span::styled(
        "Cancel (keep current position)",
        Style::default().fg(Color::DarkGray),
    ))];
    items.extend(chapters.iter().map(|chapter| {
        ListItem::new(truncate_string(
            &format!("{}  {}", chapter.key, chapter.name),
            width,
        ))
    }));

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan))
                .title("Jump to chapter")
                .title_bottom(Line::from(
                    [key_hint("↑/↓", " Move  "), key_hint("Enter", " Go  "), key_hint("Esc", " Back")]
                        .concat(),
                )),
        )
        .highlight_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD | Modifier::REVERSED),
        )
        .highlight_symbol("> ");

    let mut state = ListState::default();
    state.select(Some(cursor.min(chapters.len())));
    f.render_widget(Clear, area);
    f.render_stateful_widget(list, area, &mut state);
}
