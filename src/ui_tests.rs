#[cfg(test)]
mod ui_render_tests {
    use crate::bank::parse_bank;
    use crate::controller::QuizController;
    use crate::progress::{PRACTICE_INDEX_KEY, WRONG_LIST_KEY};
    use crate::session::{handle_key, App};
    use crate::store::{KeyValueStore, MemoryStore};
    use crate::ui::draw;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use ratatui::{backend::TestBackend, Terminal};

    const BANK: &str = r#"{
        "metadata": {"title": "Principles Drill"},
        "chapters": {"1": "Matter and Motion", "2": "Dialectics"},
        "questions": [
            {"id": "q1", "chapter": "1", "type": "single-choice",
             "question": "Which comes first?",
             "options": {"A": "Matter", "B": "Consciousness"},
             "correct_answer": "A", "explanation": "Matter determines consciousness."},
            {"id": "q2", "chapter": "2", "type": "true-false",
             "question": "Contradiction drives development.",
             "options": {"A": "True", "B": "False"},
             "correct_answer": "A"}
        ]
    }"#;

    fn app_with(store: MemoryStore) -> App<MemoryStore> {
        App::new(QuizController::new(parse_bank(BANK).unwrap(), store))
    }

    fn press(app: &mut App<MemoryStore>, code: KeyCode) {
        handle_key(app, KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn render(app: &mut App<MemoryStore>) -> String {
        let backend = TestBackend::new(100, 40);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| draw(f, app)).unwrap();

        let buffer = terminal.backend().buffer();
        let width = buffer.area.width as usize;
        buffer
            .content()
            .chunks(width)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_home_shows_title_and_counters() {
        let mut store = MemoryStore::new();
        store.set(WRONG_LIST_KEY, r#"["q1"]"#).unwrap();
        store.set(PRACTICE_INDEX_KEY, "1").unwrap();
        let mut app = app_with(store);

        let screen = render(&mut app);
        assert!(screen.contains("Principles Drill"));
        assert!(screen.contains("Practice progress: 2 / 2"));
        assert!(screen.contains("1 to review"));
        assert!(screen.contains("0 starred"));
        assert!(screen.contains("Review wrong answers (1)"));
    }

    #[test]
    fn test_practice_screen_shows_question_and_options() {
        let mut app = app_with(MemoryStore::new());
        press(&mut app, KeyCode::Char('1'));

        let screen = render(&mut app);
        assert!(screen.contains("Practice  |  Question 1 / 2"));
        assert!(screen.contains("Chapter 1"));
        assert!(screen.contains("Which comes first?"));
        assert!(screen.contains("[ ] A. Matter"));
        assert!(screen.contains("[ ] B. Consciousness"));
        assert!(screen.contains("Jump to chapter"));
    }

    #[test]
    fn test_wrong_answer_marks_options_and_shows_explanation() {
        let mut app = app_with(MemoryStore::new());
        press(&mut app, KeyCode::Char('1'));
        press(&mut app, KeyCode::Char('b'));
        assert!(render(&mut app).contains("[x] B. Consciousness"));

        press(&mut app, KeyCode::Enter);
        let screen = render(&mut app);
        assert!(screen.contains("✗ Incorrect"));
        assert!(screen.contains("Correct answer: A"));
        assert!(screen.contains("[✓] A. Matter"));
        assert!(screen.contains("[✗] B. Consciousness"));
        assert!(screen.contains("Matter determines consciousness."));
    }

    #[test]
    fn test_missing_explanation_placeholder() {
        let mut app = app_with(MemoryStore::new());
        press(&mut app, KeyCode::Char('1'));
        press(&mut app, KeyCode::Right);
        press(&mut app, KeyCode::Char('a'));
        press(&mut app, KeyCode::Enter);

        let screen = render(&mut app);
        assert!(screen.contains("✓ Correct"));
        assert!(screen.contains("No explanation available."));
    }

    #[test]
    fn test_review_wrong_shows_star_state() {
        let mut store = MemoryStore::new();
        store.set(WRONG_LIST_KEY, r#"["q2"]"#).unwrap();
        let mut app = app_with(store);
        press(&mut app, KeyCode::Char('2'));

        let screen = render(&mut app);
        assert!(screen.contains("Wrong Answer Review  |  Question 1 / 1"));
        assert!(screen.contains("☆"));
        assert!(screen.contains("Remove from wrong list"));

        press(&mut app, KeyCode::Char('s'));
        assert!(render(&mut app).contains("★ Starred"));
    }

    #[test]
    fn test_missing_question_placeholder_in_review() {
        let mut store = MemoryStore::new();
        store.set(WRONG_LIST_KEY, r#"["gone"]"#).unwrap();
        let mut app = app_with(store);
        press(&mut app, KeyCode::Char('2'));

        let screen = render(&mut app);
        assert!(screen.contains("Question gone is no longer in the question bank."));
    }

    #[test]
    fn test_notice_popup_over_home() {
        let mut app = app_with(MemoryStore::new());
        press(&mut app, KeyCode::Char('3'));

        let screen = render(&mut app);
        assert!(screen.contains("No starred questions yet."));
        assert!(screen.contains("Press any key to continue"));
    }

    #[test]
    fn test_chapter_picker_lists_cancel_then_chapters() {
        let mut app = app_with(MemoryStore::new());
        press(&mut app, KeyCode::Char('1'));
        press(&mut app, KeyCode::Char('j'));

        let screen = render(&mut app);
        assert!(screen.contains("> Cancel (keep current position)"));
        assert!(screen.contains("1  Matter and Motion"));
        assert!(screen.contains("2  Dialectics"));
    }

    #[test]
    fn test_clear_confirmation_screen() {
        let mut app = app_with(MemoryStore::new());
        press(&mut app, KeyCode::Char('x'));

        let screen = render(&mut app);
        assert!(screen.contains("Clear All Progress"));
        assert!(screen.contains("Yes, clear everything"));
    }
}
