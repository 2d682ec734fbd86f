use crate::controller::AnswerFeedback;
use crate::models::{OptionLabel, Question, QuestionType, QuizMode};
use crate::session::App;
use crate::store::KeyValueStore;
use crate::ui::key_hint;
use crate::ui::layout::calculate_quiz_chunks;
use crate::utils::{calculate_max_scroll, estimate_text_height, progress_percent};
use ratatui::{
    layout::Alignment,
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Gauge, List, ListItem, Paragraph, Wrap},
    Frame,
};

pub fn draw_quiz<S: KeyValueStore>(f: &mut Frame, app: &mut App<S>) {
    let layout = calculate_quiz_chunks(f.area());
    let controller = &app.controller;
    let mode = controller.mode().unwrap_or(QuizMode::Practice);
    let (current, total) = controller.position().unwrap_or((0, 0));
    let question = controller.current_question().ok();

    let mut header_spans = vec![Span::styled(
        format!("{}  |  Question {} / {}", mode.title(), current, total),
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    )];
    if let Some(q) = question {
        header_spans.push(Span::from(format!("  |  Chapter {}", q.chapter)));
    }
    if mode == QuizMode::ReviewWrong
        && let Some(id) = controller.current_id()
    {
        if controller.is_priority(id) {
            header_spans.push(Span::styled(
                "  ★ Starred",
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            ));
        } else {
            header_spans.push(Span::styled("  ☆", Style::default().fg(Color::DarkGray)));
        }
    }
    let header = Paragraph::new(Line::from(header_spans))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(header, layout.header_area);

    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(Color::Cyan).bg(Color::Black))
        .percent(progress_percent(current, total))
        .label(format!("{}%", progress_percent(current, total)));
    f.render_widget(gauge, layout.progress_area);

    let Some(question) = question else {
        let missing = match controller.current_id() {
            Some(id) => format!(
                "Question {} is no longer in the question bank. Press r to remove it, or ←/→ to move on.",
                id
            ),
            None => "There are no questions to show.".to_string(),
        };
        let body = Paragraph::new(missing)
            .style(Style::default().fg(Color::DarkGray))
            .wrap(Wrap { trim: true })
            .block(Block::default().borders(Borders::ALL).title("Question"));
        f.render_widget(body, layout.question_area);
        draw_help(f, layout.help_area, mode, false);
        return;
    };

    let type_style = match question.kind {
        QuestionType::MultiChoice => Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        _ => Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
    };
    let question_text = Text::from(Line::from(vec![
        Span::from(format!("{}. ", current)),
        Span::styled(format!("({}) ", question.kind.label()), type_style),
        Span::from(question.question.as_str()),
    ]));
    let question_block = Paragraph::new(question_text)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title("Question"));
    f.render_widget(question_block, layout.question_area);

    let answered = controller.answered();
    let items: Vec<ListItem> = question
        .options
        .iter()
        .map(|(label, text)| {
            let (marker, style) = option_mark(
                question,
                *label,
                controller.is_selected(*label),
                answered.is_some(),
            );
            ListItem::new(Line::from(vec![
                Span::styled(format!("{} {}. ", marker, label), style),
                Span::styled(text.as_str(), style),
            ]))
        })
        .collect();
    let options_title = if question.is_exclusive() {
        "Options (choose one)"
    } else {
        "Options (choose all that apply)"
    };
    let options = List::new(items).block(Block::default().borders(Borders::ALL).title(options_title));
    f.render_widget(options, layout.options_area);

    let feedback_text = feedback_text(answered, app.status.as_deref());
    let visible_height = layout.feedback_area.height.saturating_sub(2) as usize;
    let text_width = layout.feedback_area.width.saturating_sub(2) as usize;
    let content_height = estimate_text_height(&feedback_text, text_width);
    let max_scroll = calculate_max_scroll(content_height, visible_height);
    let answered_now = answered.is_some();

    app.feedback_scroll_y = app.feedback_scroll_y.min(max_scroll);
    let feedback = Paragraph::new(feedback_text)
        .wrap(Wrap { trim: true })
        .scroll((app.feedback_scroll_y, 0))
        .block(Block::default().borders(Borders::ALL).title("Result"));
    f.render_widget(feedback, layout.feedback_area);

    draw_help(f, layout.help_area, mode, answered_now);
}

/// Marker and style for one option. Before submission only the selection is
/// shown; afterwards correct options are green and wrong picks red.
pub fn option_mark(
    question: &Question,
    label: OptionLabel,
    selected: bool,
    answered: bool,
) -> (&'static str, Style) {
    if !answered {
        return if selected {
            ("[x]", Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
        } else {
            ("[ ]", Style::default())
        };
    }

    if question.is_correct_label(label) {
        ("[✓]", Style::default().fg(Color::Green).add_modifier(Modifier::BOLD))
    } else if selected {
        ("[✗]", Style::default().fg(Color::Red).add_modifier(Modifier::BOLD))
    } else {
        ("[ ]", Style::default().fg(Color::DarkGray))
    }
}

fn feedback_text(answered: Option<&AnswerFeedback>, status: Option<&str>) -> Text<'static> {
    let mut text = Text::default();
    if let Some(status) = status {
        text.push_line(Line::from(Span::styled(
            status.to_string(),
            Style::default().fg(Color::Yellow),
        )));
    }

    let Some(feedback) = answered else {
        if status.is_none() {
            text.push_line(Line::from(Span::styled(
                "Select an option, then press Enter to submit.",
                Style::default().fg(Color::DarkGray),
            )));
        }
        return text;
    };

    if feedback.is_correct {
        text.push_line(Line::from(Span::styled(
            "✓ Correct",
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        )));
    } else {
        text.push_line(Line::from(Span::styled(
            "✗ Incorrect",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )));
        text.push_line(Line::from(format!(
            "Correct answer: {}    Your answer: {}",
            feedback.correct_answer, feedback.user_answer
        )));
    }
    text.push_line(Line::from(""));
    text.push_line(Line::from(Span::styled(
        "Explanation:",
        Style::default().add_modifier(Modifier::BOLD),
    )));
    text.push_line(Line::from(
        feedback
            .explanation
            .clone()
            .unwrap_or_else(|| "No explanation available.".to_string()),
    ));
    text
}

fn draw_help(f: &mut Frame, area: ratatui::layout::Rect, mode: QuizMode, answered: bool) {
    let mut basic = Vec::new();
    if answered {
        basic.extend(key_hint("Enter", " Next  "));
        basic.extend(key_hint("↑/↓", " Scroll  "));
    } else {
        basic.extend(key_hint("A-H/1-8", " Select  "));
        basic.extend(key_hint("Enter", " Submit  "));
    }
    basic.extend(key_hint("←/→", " Prev/Next  "));
    basic.extend(key_hint("Esc", " Home"));

    let mut extra = key_hint("Ctrl+C", " Exit App");
    match mode {
        QuizMode::Practice => extra.extend(key_hint("  j", " Jump to chapter")),
        QuizMode::ReviewWrong => {
            extra.extend(key_hint("  s", " Star/Unstar"));
            extra.extend(key_hint("  r", " Remove from wrong list"));
        }
        QuizMode::ReviewPriority => extra.extend(key_hint("  r", " Remove from priority list")),
    }

    let help = Paragraph::new(vec![Line::from(basic), Line::from(extra)])
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(help, area);
}
