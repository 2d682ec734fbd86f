pub mod layout;
mod dialogs;
mod home;
mod quiz;

pub use dialogs::{draw_chapter_picker, draw_clear_confirmation, draw_notice, draw_quit_confirmation};
pub use home::draw_home;
pub use layout::{calculate_home_chunks, calculate_quiz_chunks, centered_rect};
pub use quiz::{draw_quiz, option_mark};

use crate::models::AppState;
use crate::session::App;
use crate::store::KeyValueStore;
use ratatui::{
    style::{Color, Modifier, Style},
    text::Span,
    Frame,
};

/// A highlighted key followed by its description, as used in help lines.
pub(crate) fn key_hint(key: &str, description: &str) -> Vec<Span<'static>> {
    vec![
        Span::styled(
            key.to_string(),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::from(description.to_string()),
    ]
}

/// Draws the current screen and, on top of it, any pending notice.
pub fn draw<S: KeyValueStore>(f: &mut Frame, app: &mut App<S>) {
    match app.state {
        AppState::Home => {
            let stats = app.controller.home_stats();
            draw_home(f, app.controller.bank().title(), &stats);
        }
        AppState::Quiz => draw_quiz(f, app),
        AppState::ChapterPicker => {
            draw_quiz(f, app);
            draw_chapter_picker(f, app.controller.bank().chapters(), app.chapter_cursor);
        }
        AppState::QuizQuitConfirm => draw_quit_confirmation(f),
        AppState::ClearConfirm => draw_clear_confirmation(f),
    }

    if let Some(notice) = &app.notice {
        draw_notice(f, notice);
    }
}
