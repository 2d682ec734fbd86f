use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Accepts either a JSON string or a JSON number and yields its text.
///
/// Question banks in the wild encode ids and chapters both ways.
pub(crate) fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Int(i64),
        Float(f64),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Text(s) => s,
        Raw::Int(n) => n.to_string(),
        Raw::Float(f) => f.to_string(),
    })
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct QuestionId(String);

impl QuestionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl<'de> Deserialize<'de> for QuestionId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        string_or_number(deserializer).map(QuestionId)
    }
}

impl fmt::Display for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Option labels are a closed set; anything outside `A..=H` is rejected at load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum OptionLabel {
    A,
    B,
    C,
    D,
    E,
    F,
    G,
    H,
}

impl OptionLabel {
    pub const ALL: [OptionLabel; 8] = [
        OptionLabel::A,
        OptionLabel::B,
        OptionLabel::C,
        OptionLabel::D,
        OptionLabel::E,
        OptionLabel::F,
        OptionLabel::G,
        OptionLabel::H,
    ];

    pub fn as_char(self) -> char {
        (b'A' + self.index() as u8) as char
    }

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn from_char(c: char) -> Option<Self> {
        let upper = c.to_ascii_uppercase();
        if upper.is_ascii_uppercase() {
            Self::from_index((upper as u8 - b'A') as usize)
        } else {
            None
        }
    }
}

impl TryFrom<String> for OptionLabel {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        let mut chars = value.trim().chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => {
                OptionLabel::from_char(c).ok_or_else(|| format!("unknown option label `{value}`"))
            }
            _ => Err(format!("unknown option label `{value}`")),
        }
    }
}

impl From<OptionLabel> for String {
    fn from(label: OptionLabel) -> Self {
        label.as_char().to_string()
    }
}

impl fmt::Display for OptionLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum QuestionType {
    #[serde(rename = "single-choice", alias = "single", alias = "单选题")]
    SingleChoice,
    #[serde(rename = "multi-choice", alias = "multiple", alias = "多选题")]
    MultiChoice,
    #[serde(rename = "true-false", alias = "judge", alias = "判断题")]
    TrueFalse,
}

impl QuestionType {
    pub fn label(self) -> &'static str {
        match self {
            QuestionType::SingleChoice => "Single choice",
            QuestionType::MultiChoice => "Multiple choice",
            QuestionType::TrueFalse => "True / False",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    pub id: QuestionId,
    #[serde(deserialize_with = "string_or_number")]
    pub chapter: String,
    #[serde(rename = "type")]
    pub kind: QuestionType,
    pub question: String,
    pub options: BTreeMap<OptionLabel, String>,
    pub correct_answer: String,
    #[serde(default)]
    pub explanation: Option<String>,
}

impl Question {
    pub fn has_option(&self, label: OptionLabel) -> bool {
        self.options.contains_key(&label)
    }

    /// Single-choice and true/false questions allow exactly one selection.
    pub fn is_exclusive(&self) -> bool {
        !matches!(self.kind, QuestionType::MultiChoice)
    }

    pub fn is_correct_label(&self, label: OptionLabel) -> bool {
        self.correct_answer.contains(label.as_char())
    }

    /// The explanation text, with blank explanations treated as absent.
    pub fn explanation(&self) -> Option<&str> {
        self.explanation
            .as_deref()
            .map(str::trim)
            .filter(|text| !text.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chapter {
    pub key: String,
    pub name: String,
}

#[derive(Debug, Clone, Default)]
pub struct QuestionBank {
    questions: Vec<Question>,
    chapters: Vec<Chapter>,
    title: Option<String>,
}

impl QuestionBank {
    pub const DEFAULT_TITLE: &'static str = "Question Bank";

    /// Builds a bank. Chapters without a display name are dropped and the rest
    /// are ordered numerically where their keys parse as numbers.
    pub fn new(
        questions: Vec<Question>,
        chapters: impl IntoIterator<Item = (String, Option<String>)>,
        title: Option<String>,
    ) -> Self {
        let mut chapters: Vec<Chapter> = chapters
            .into_iter()
            .filter_map(|(key, name)| {
                let name = name?.trim().to_string();
                (!name.is_empty()).then_some(Chapter { key, name })
            })
            .collect();
        chapters.sort_by(|a, b| chapter_order(&a.key, &b.key));

        Self {
            questions,
            chapters,
            title: title.filter(|t| !t.trim().is_empty()),
        }
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn chapters(&self) -> &[Chapter] {
        &self.chapters
    }

    pub fn title(&self) -> &str {
        self.title.as_deref().unwrap_or(Self::DEFAULT_TITLE)
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Question> {
        self.questions.get(index)
    }

    pub fn find(&self, id: &QuestionId) -> Option<&Question> {
        self.questions.iter().find(|q| &q.id == id)
    }

    /// Index of the first question whose chapter starts with `prefix`.
    pub fn first_in_chapter(&self, prefix: &str) -> Option<usize> {
        self.questions
            .iter()
            .position(|q| q.chapter.starts_with(prefix))
    }
}

fn chapter_order(a: &str, b: &str) -> std::cmp::Ordering {
    match (a.parse::<f64>(), b.parse::<f64>()) {
        (Ok(x), Ok(y)) => x.total_cmp(&y).then_with(|| a.cmp(b)),
        (Ok(_), Err(_)) => std::cmp::Ordering::Less,
        (Err(_), Ok(_)) => std::cmp::Ordering::Greater,
        (Err(_), Err(_)) => a.cmp(b),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReviewList {
    Wrong,
    Priority,
}

impl ReviewList {
    pub fn mode(self) -> QuizMode {
        match self {
            ReviewList::Wrong => QuizMode::ReviewWrong,
            ReviewList::Priority => QuizMode::ReviewPriority,
        }
    }
}

impl fmt::Display for ReviewList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReviewList::Wrong => f.write_str("wrong-answer"),
            ReviewList::Priority => f.write_str("priority"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QuizMode {
    Practice,
    ReviewWrong,
    ReviewPriority,
}

impl QuizMode {
    pub fn review_list(self) -> Option<ReviewList> {
        match self {
            QuizMode::Practice => None,
            QuizMode::ReviewWrong => Some(ReviewList::Wrong),
            QuizMode::ReviewPriority => Some(ReviewList::Priority),
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            QuizMode::Practice => "Practice",
            QuizMode::ReviewWrong => "Wrong Answer Review",
            QuizMode::ReviewPriority => "Priority Review",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Previous,
    Next,
}

impl Direction {
    pub(crate) fn apply(self, index: usize) -> Option<usize> {
        match self {
            Direction::Previous => index.checked_sub(1),
            Direction::Next => index.checked_add(1),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Success,
    Warning,
    Error,
}

/// A dismissible message shown over the current screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Info,
            message: message.into(),
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Warning,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Home,
    Quiz,
    ChapterPicker,
    QuizQuitConfirm,
    ClearConfirm,
}
