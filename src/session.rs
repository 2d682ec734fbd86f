use crate::controller::{Boundary, Navigation, QuizController, Removal};
use crate::error::QuizError;
use crate::logger;
use crate::models::{AppState, Chapter, Direction, Notice, OptionLabel, QuizMode, ReviewList};
use crate::store::KeyValueStore;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Everything the terminal front end needs between key presses.
pub struct App<S> {
    pub controller: QuizController<S>,
    pub state: AppState,
    /// Modal message; the next key press dismisses it.
    pub notice: Option<Notice>,
    /// One-line message under the current question.
    pub status: Option<String>,
    /// 0 is the cancel entry, `n` is `chapters[n - 1]`.
    pub chapter_cursor: usize,
    pub feedback_scroll_y: u16,
    pub should_quit: bool,
}

impl<S: KeyValueStore> App<S> {
    pub fn new(controller: QuizController<S>) -> Self {
        Self {
            controller,
            state: AppState::Home,
            notice: None,
            status: None,
            chapter_cursor: 0,
            feedback_scroll_y: 0,
            should_quit: false,
        }
    }

    /// The chapter under the picker cursor, `None` on the cancel entry.
    pub fn picked_chapter(&self) -> Option<&Chapter> {
        self.chapter_cursor
            .checked_sub(1)
            .and_then(|i| self.controller.bank().chapters().get(i))
    }

    fn go_home(&mut self) {
        self.controller.exit();
        self.state = AppState::Home;
        self.status = None;
        self.feedback_scroll_y = 0;
    }

    fn show_question(&mut self) {
        self.state = AppState::Quiz;
        self.status = None;
        self.feedback_scroll_y = 0;
    }

    fn report(&mut self, err: QuizError) {
        match err {
            QuizError::NoSelection => self.status = Some(err.to_string()),
            QuizError::EmptyList(list) => {
                self.notice = Some(Notice::info(empty_list_message(list)));
            }
            QuizError::ChapterEmpty(_) | QuizError::NotInPractice | QuizError::NotInReview => {
                self.notice = Some(Notice::warning(err.to_string()));
            }
            QuizError::NoQuestion => self.status = Some(err.to_string()),
            other => {
                logger::error(&other.to_string());
                self.notice = Some(Notice::error(other.to_string()));
            }
        }
    }
}

fn empty_list_message(list: ReviewList) -> &'static str {
    match list {
        ReviewList::Wrong => "Great job! There are no wrong answers to review.",
        ReviewList::Priority => {
            "No starred questions yet. Press s while reviewing wrong answers to star one."
        }
    }
}

fn finished_message(mode: Option<QuizMode>) -> &'static str {
    match mode {
        Some(QuizMode::ReviewPriority) => "Priority review finished.",
        _ => "Wrong answer review finished.",
    }
}

/// Routes a key press to the handler for the current screen.
pub fn handle_key<S: KeyValueStore>(app: &mut App<S>, key: KeyEvent) {
    if key.kind != KeyEventKind::Press {
        return;
    }
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.should_quit = true;
        return;
    }
    if app.notice.is_some() {
        app.notice = None;
        return;
    }

    match app.state {
        AppState::Home => handle_home_input(app, key),
        AppState::Quiz => handle_quiz_input(app, key),
        AppState::ChapterPicker => handle_chapter_picker_input(app, key),
        AppState::QuizQuitConfirm => match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') => app.go_home(),
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => app.state = AppState::Quiz,
            _ => {}
        },
        AppState::ClearConfirm => match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') => {
                match app.controller.clear_all() {
                    Ok(()) => app.notice = Some(Notice::success("All progress has been cleared.")),
                    Err(e) => app.report(e),
                }
                app.state = AppState::Home;
            }
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => app.state = AppState::Home,
            _ => {}
        },
    }
}

pub fn handle_home_input<S: KeyValueStore>(app: &mut App<S>, key: KeyEvent) {
    match key.code {
        KeyCode::Char('1') => {
            app.controller.enter_practice();
            app.show_question();
        }
        KeyCode::Char('2') => start_review(app, ReviewList::Wrong),
        KeyCode::Char('3') => start_review(app, ReviewList::Priority),
        KeyCode::Char('x') | KeyCode::Char('X') => app.state = AppState::ClearConfirm,
        KeyCode::Char('q') | KeyCode::Esc => app.should_quit = true,
        _ => {}
    }
}

fn start_review<S: KeyValueStore>(app: &mut App<S>, list: ReviewList) {
    match app.controller.enter_review(list) {
        Ok(()) => app.show_question(),
        Err(e) => app.report(e),
    }
}

pub fn handle_quiz_input<S: KeyValueStore>(app: &mut App<S>, key: KeyEvent) {
    let mode = app.controller.mode();
    match key.code {
        KeyCode::Esc => app.state = AppState::QuizQuitConfirm,
        KeyCode::Enter => {
            if app.controller.answered().is_some() {
                navigate(app, Direction::Next);
            } else {
                match app.controller.submit() {
                    Ok(_) => {
                        app.status = None;
                        app.feedback_scroll_y = 0;
                    }
                    Err(e) => app.report(e),
                }
            }
        }
        KeyCode::Left | KeyCode::Char('p') => navigate(app, Direction::Previous),
        KeyCode::Right | KeyCode::Char('n') => navigate(app, Direction::Next),
        KeyCode::Up | KeyCode::PageUp => {
            app.feedback_scroll_y = app.feedback_scroll_y.saturating_sub(1);
        }
        KeyCode::Down | KeyCode::PageDown => {
            if app.controller.answered().is_some() {
                app.feedback_scroll_y = app.feedback_scroll_y.saturating_add(1);
            }
        }
        KeyCode::Char('j') => {
            if mode == Some(QuizMode::Practice) {
                app.chapter_cursor = 0;
                app.state = AppState::ChapterPicker;
            }
        }
        KeyCode::Char('s') => {
            if mode == Some(QuizMode::ReviewWrong) {
                toggle_star(app);
            }
        }
        KeyCode::Char('r') | KeyCode::Delete => {
            if mode.and_then(QuizMode::review_list).is_some() {
                remove_current(app);
            }
        }
        KeyCode::Char(c) => {
            let label = c
                .to_digit(10)
                .and_then(|d| (d as usize).checked_sub(1))
                .and_then(OptionLabel::from_index)
                .or_else(|| c.is_ascii_lowercase().then(|| OptionLabel::from_char(c)).flatten());
            if let Some(label) = label {
                match app.controller.select_option(label) {
                    Ok(()) => app.status = None,
                    Err(e) => app.report(e),
                }
            }
        }
        _ => {}
    }
}

fn navigate<S: KeyValueStore>(app: &mut App<S>, direction: Direction) {
    let mode = app.controller.mode();
    match app.controller.navigate(direction) {
        Ok(Navigation::Moved) => app.show_question(),
        Ok(Navigation::BoundaryReached(Boundary::Start)) => {
            app.status = Some("This is the first question.".to_string());
        }
        Ok(Navigation::BoundaryReached(Boundary::End)) => {
            app.status = Some("This is the last question.".to_string());
        }
        Ok(Navigation::SessionComplete) => {
            app.go_home();
            app.notice = Some(Notice::success(finished_message(mode)));
        }
        Err(e) => app.report(e),
    }
}

fn toggle_star<S: KeyValueStore>(app: &mut App<S>) {
    let Some(id) = app.controller.current_id().cloned() else {
        return;
    };
    match app.controller.toggle_priority(&id) {
        Ok(true) => app.status = Some("Starred for priority review.".to_string()),
        Ok(false) => app.status = Some("Removed the star.".to_string()),
        Err(e) => app.report(e),
    }
}

fn remove_current<S: KeyValueStore>(app: &mut App<S>) {
    match app.controller.remove_current() {
        Ok(Removal::Removed { remaining }) => {
            app.show_question();
            app.status = Some(format!("Removed. {} left in this list.", remaining));
        }
        Ok(Removal::SessionComplete) => {
            app.go_home();
            app.notice = Some(Notice::success("The list is now empty. Well done!"));
        }
        Err(e) => app.report(e),
    }
}

pub fn handle_chapter_picker_input<S: KeyValueStore>(app: &mut App<S>, key: KeyEvent) {
    let entries = app.controller.bank().chapters().len() + 1;
    match key.code {
        KeyCode::Up => app.chapter_cursor = app.chapter_cursor.saturating_sub(1),
        KeyCode::Down => {
            if app.chapter_cursor + 1 < entries {
                app.chapter_cursor += 1;
            }
        }
        KeyCode::Esc => {
            app.chapter_cursor = 0;
            app.state = AppState::Quiz;
        }
        KeyCode::Enter => {
            let chapter = app.picked_chapter().map(|c| c.key.clone());
            app.chapter_cursor = 0;
            app.state = AppState::Quiz;
            if let Some(chapter) = chapter {
                match app.controller.jump_to_chapter(&chapter) {
                    Ok(_) => app.show_question(),
                    Err(e) => app.report(e),
                }
            }
        }
        _ => {}
    }
}
