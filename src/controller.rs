//! The quiz session state machine.
//!
//! `QuizController` owns the question bank, the persisted progress and the
//! state of the session on screen. The terminal UI only translates key presses
//! into the command methods here and renders what they return.

use crate::error::QuizError;
use crate::logger;
use crate::models::{Direction, OptionLabel, Question, QuestionBank, QuestionId, QuizMode, ReviewList};
use crate::progress::{self, Progress};
use crate::store::KeyValueStore;
use std::collections::BTreeSet;

/// Result of a submitted answer, kept until the user leaves the question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerFeedback {
    pub is_correct: bool,
    pub user_answer: String,
    pub correct_answer: String,
    pub explanation: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Boundary {
    Start,
    End,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    Moved,
    /// Practice mode hit either end of the bank. Nothing changed.
    BoundaryReached(Boundary),
    /// A review session ran past either end and has been closed.
    SessionComplete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Removal {
    Removed { remaining: usize },
    SessionComplete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HomeStats {
    pub practice_position: usize,
    pub total_questions: usize,
    pub wrong_count: usize,
    pub priority_count: usize,
}

#[derive(Debug, Clone)]
struct Session {
    mode: QuizMode,
    current_index: usize,
    review_queue: Vec<QuestionId>,
    review_index: usize,
    selected: BTreeSet<OptionLabel>,
    answered: Option<AnswerFeedback>,
}

impl Session {
    fn new(mode: QuizMode) -> Self {
        Self {
            mode,
            current_index: 0,
            review_queue: Vec::new(),
            review_index: 0,
            selected: BTreeSet::new(),
            answered: None,
        }
    }

    fn reset_view(&mut self) {
        self.selected.clear();
        self.answered = None;
    }
}

pub struct QuizController<S> {
    bank: QuestionBank,
    progress: Progress<S>,
    session: Option<Session>,
}

impl<S: KeyValueStore> QuizController<S> {
    pub fn new(bank: QuestionBank, store: S) -> Self {
        let progress = Progress::load(store);
        logger::info(&format!(
            "restored {} wrong and {} priority questions",
            progress.wrong_list().len(),
            progress.priority_list().len()
        ));
        Self {
            bank,
            progress,
            session: None,
        }
    }

    pub fn bank(&self) -> &QuestionBank {
        &self.bank
    }

    pub fn progress(&self) -> &Progress<S> {
        &self.progress
    }

    pub fn mode(&self) -> Option<QuizMode> {
        self.session.as_ref().map(|s| s.mode)
    }

    pub fn in_session(&self) -> bool {
        self.session.is_some()
    }

    pub fn enter_practice(&mut self) {
        let mut session = Session::new(QuizMode::Practice);
        let saved = self.progress.read_index(progress::PRACTICE_INDEX_KEY);
        session.current_index = if saved < self.bank.len() { saved } else { 0 };
        logger::info(&format!("entering practice at {}", session.current_index));
        self.session = Some(session);
    }

    /// Starts reviewing a snapshot of `list`. Fails without touching any state
    /// when the list is empty.
    pub fn enter_review(&mut self, list: ReviewList) -> Result<(), QuizError> {
        let ids = self.progress.list(list);
        if ids.is_empty() {
            return Err(QuizError::EmptyList(list));
        }

        let mode = list.mode();
        let mut session = Session::new(mode);
        session.review_queue = ids.to_vec();
        let saved = self.progress.read_index(progress::index_key(mode));
        session.review_index = if saved < session.review_queue.len() {
            saved
        } else {
            0
        };
        logger::info(&format!(
            "entering {} review with {} questions at {}",
            list,
            session.review_queue.len(),
            session.review_index
        ));
        self.session = Some(session);
        Ok(())
    }

    pub fn exit(&mut self) {
        self.session = None;
    }

    pub fn current_id(&self) -> Option<&QuestionId> {
        let session = self.session.as_ref()?;
        match session.mode {
            QuizMode::Practice => self.bank.get(session.current_index).map(|q| &q.id),
            _ => session.review_queue.get(session.review_index),
        }
    }

    pub fn current_question(&self) -> Result<&Question, QuizError> {
        let session = self.session.as_ref().ok_or(QuizError::NoQuestion)?;
        let question = match session.mode {
            QuizMode::Practice => self.bank.get(session.current_index),
            _ => session
                .review_queue
                .get(session.review_index)
                .and_then(|id| self.bank.find(id)),
        };
        question.ok_or(QuizError::NoQuestion)
    }

    /// 1-based position and length of the sequence being walked.
    pub fn position(&self) -> Option<(usize, usize)> {
        let session = self.session.as_ref()?;
        Some(match session.mode {
            QuizMode::Practice => (session.current_index + 1, self.bank.len()),
            _ => (session.review_index + 1, session.review_queue.len()),
        })
    }

    pub fn review_queue(&self) -> &[QuestionId] {
        self.session
            .as_ref()
            .map(|s| s.review_queue.as_slice())
            .unwrap_or(&[])
    }

    pub fn selected(&self) -> Vec<OptionLabel> {
        self.session
            .as_ref()
            .map(|s| s.selected.iter().copied().collect())
            .unwrap_or_default()
    }

    pub fn is_selected(&self, label: OptionLabel) -> bool {
        self.session
            .as_ref()
            .is_some_and(|s| s.selected.contains(&label))
    }

    pub fn answered(&self) -> Option<&AnswerFeedback> {
        self.session.as_ref().and_then(|s| s.answered.as_ref())
    }

    pub fn is_priority(&self, id: &QuestionId) -> bool {
        self.progress.is_priority(id)
    }

    pub fn home_stats(&self) -> HomeStats {
        let saved = self.progress.read_index(progress::PRACTICE_INDEX_KEY);
        let total = self.bank.len();
        HomeStats {
            practice_position: if saved < total { saved + 1 } else { total.min(1) },
            total_questions: total,
            wrong_count: self.progress.wrong_list().len(),
            priority_count: self.progress.priority_list().len(),
        }
    }

    /// Selects `label` on the current question. Exclusive for single-choice
    /// and true/false, toggling for multi-choice. Locked once answered.
    pub fn select_option(&mut self, label: OptionLabel) -> Result<(), QuizError> {
        let question = self.current_question()?;
        if !question.has_option(label) {
            return Ok(());
        }
        let exclusive = question.is_exclusive();

        let session = self.session.as_mut().ok_or(QuizError::NoQuestion)?;
        if session.answered.is_some() {
            return Ok(());
        }
        if exclusive {
            session.selected.clear();
            session.selected.insert(label);
        } else if !session.selected.remove(&label) {
            session.selected.insert(label);
        }
        Ok(())
    }

    /// Checks the current selection. The first result for a question view is
    /// cached, so repeated calls return it again without side effects. A failed
    /// write leaves the question unanswered so the call can be repeated.
    pub fn submit(&mut self) -> Result<AnswerFeedback, QuizError> {
        let question = self.current_question()?;
        let session = self.session.as_ref().ok_or(QuizError::NoQuestion)?;
        if let Some(feedback) = &session.answered {
            return Ok(feedback.clone());
        }
        if session.selected.is_empty() {
            return Err(QuizError::NoSelection);
        }

        let user_answer: String = session.selected.iter().map(|l| l.as_char()).collect();
        let is_correct = user_answer == question.correct_answer;
        let feedback = AnswerFeedback {
            is_correct,
            user_answer,
            correct_answer: question.correct_answer.clone(),
            explanation: question.explanation().map(str::to_string),
        };
        let id = question.id.clone();
        let mode = session.mode;
        let current_index = session.current_index;

        if mode == QuizMode::Practice {
            if !is_correct && self.progress.add_wrong(&id)? {
                logger::info(&format!("added {} to wrong list", id));
            }
            self.progress
                .write_index(progress::PRACTICE_INDEX_KEY, current_index)?;
        }

        if let Some(session) = self.session.as_mut() {
            session.answered = Some(feedback.clone());
        }
        Ok(feedback)
    }

    pub fn navigate(&mut self, direction: Direction) -> Result<Navigation, QuizError> {
        let session = self.session.as_mut().ok_or(QuizError::NoQuestion)?;

        if session.mode == QuizMode::Practice {
            return Ok(match direction.apply(session.current_index) {
                Some(next) if next < self.bank.len() => {
                    session.current_index = next;
                    session.reset_view();
                    Navigation::Moved
                }
                _ => Navigation::BoundaryReached(match direction {
                    Direction::Previous => Boundary::Start,
                    Direction::Next => Boundary::End,
                }),
            });
        }

        let key = progress::index_key(session.mode);
        match direction.apply(session.review_index) {
            Some(next) if next < session.review_queue.len() => {
                self.progress.write_index(key, next)?;
                session.review_index = next;
                session.reset_view();
                Ok(Navigation::Moved)
            }
            _ => {
                self.progress.write_index(key, 0)?;
                self.session = None;
                logger::info("review session complete");
                Ok(Navigation::SessionComplete)
            }
        }
    }

    /// Moves to the first question whose chapter starts with `chapter`.
    /// Returns the new index.
    pub fn jump_to_chapter(&mut self, chapter: &str) -> Result<usize, QuizError> {
        let session = self.session.as_mut().ok_or(QuizError::NoQuestion)?;
        if session.mode != QuizMode::Practice {
            return Err(QuizError::NotInPractice);
        }
        let chapter = chapter.trim();
        if chapter.is_empty() {
            return Err(QuizError::ChapterEmpty(String::new()));
        }

        let index = self
            .bank
            .first_in_chapter(chapter)
            .ok_or_else(|| QuizError::ChapterEmpty(chapter.to_string()))?;
        session.current_index = index;
        session.reset_view();
        Ok(index)
    }

    /// Stars or unstars `id`. The running review queue is left alone.
    pub fn toggle_priority(&mut self, id: &QuestionId) -> Result<bool, QuizError> {
        let starred = self.progress.toggle_priority(id)?;
        logger::info(&format!(
            "{} {} priority list",
            id,
            if starred { "added to" } else { "removed from" }
        ));
        Ok(starred)
    }

    /// Drops the current question from the list being reviewed, both from the
    /// persisted list and from this session's queue.
    pub fn remove_current(&mut self) -> Result<Removal, QuizError> {
        let session = self.session.as_mut().ok_or(QuizError::NoQuestion)?;
        let list = session.mode.review_list().ok_or(QuizError::NotInReview)?;
        let id = session
            .review_queue
            .get(session.review_index)
            .cloned()
            .ok_or(QuizError::NoQuestion)?;

        let remaining = session.review_queue.len() - 1;
        let next_index = session.review_index.min(remaining.saturating_sub(1));
        let key = progress::index_key(session.mode);

        // Index first; a failed list write puts the old index back.
        let previous_index = self.progress.raw(key)?;
        if remaining == 0 {
            self.progress.remove_index(key)?;
        } else {
            self.progress.write_index(key, next_index)?;
        }
        if let Err(e) = self.progress.remove_from(list, &id) {
            self.progress.restore_raw(key, previous_index.as_deref());
            return Err(e.into());
        }

        session.review_queue.remove(session.review_index);
        session.review_index = next_index;
        session.reset_view();
        logger::info(&format!("removed {} from {} list", id, list));

        if remaining == 0 {
            self.session = None;
            return Ok(Removal::SessionComplete);
        }
        Ok(Removal::Removed { remaining })
    }

    /// Forgets all progress. Callers must obtain confirmation first.
    pub fn clear_all(&mut self) -> Result<(), QuizError> {
        self.progress.clear_all()?;
        self.session = None;
        Ok(())
    }
}
