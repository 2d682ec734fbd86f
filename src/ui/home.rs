use crate::controller::HomeStats;
use crate::ui::key_hint;
use crate::ui::layout::calculate_home_chunks;
use ratatui::{
    layout::Alignment,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

pub fn draw_home(f: &mut Frame, title: &str, stats: &HomeStats) {
    let layout = calculate_home_chunks(f.area());

    let header = Paragraph::new(title.to_string())
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(header, layout.title_area);

    let stats_text = vec![
        Line::from(format!(
            "Practice progress: {} / {}",
            stats.practice_position, stats.total_questions
        )),
        Line::from(vec![
            Span::styled(
                format!("{} to review", stats.wrong_count),
                Style::default().fg(Color::Red),
            ),
            Span::from("   "),
            Span::styled(
                format!("{} starred", stats.priority_count),
                Style::default().fg(Color::Yellow),
            ),
        ]),
    ];
    let stats_panel = Paragraph::new(stats_text)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Progress"));
    f.render_widget(stats_panel, layout.stats_area);

    let entry = |key: &'static str, label: String| {
        ListItem::new(Line::from(vec![
            Span::styled(
                format!("[{}] ", key),
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::from(label),
        ]))
    };
    let modes = List::new(vec![
        entry("1", "Practice in order".to_string()),
        entry(
            "2",
            format!("Review wrong answers ({})", stats.wrong_count),
        ),
        entry(
            "3",
            format!("Review starred questions ({})", stats.priority_count),
        ),
        ListItem::new(""),
        ListItem::new(Line::from(vec![
            Span::styled(
                "[x] ",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                "Clear all progress",
                Style::default().fg(Color::DarkGray),
            ),
        ])),
    ])
    .block(Block::default().borders(Borders::ALL).title("Choose a mode"));
    f.render_widget(modes, layout.modes_area);

    let help = Paragraph::new(Line::from(
        [key_hint("1/2/3", " Start  "), key_hint("x", " Clear  "), key_hint("q/Esc", " Quit")]
            .concat(),
    ))
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::ALL));
    f.render_widget(help, layout.help_area);
}
