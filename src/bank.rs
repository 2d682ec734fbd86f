use crate::error::QuizError;
use crate::logger;
use crate::models::{Question, QuestionBank};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

#[derive(Debug, Deserialize)]
struct BankFile {
    questions: Vec<Question>,
    #[serde(default)]
    chapters: BTreeMap<String, Option<String>>,
    #[serde(default)]
    metadata: Option<BankMetadata>,
}

#[derive(Debug, Deserialize)]
struct BankMetadata {
    #[serde(default)]
    title: Option<String>,
}

/// Reads the question bank from disk. The application cannot run without it.
pub fn load_bank(path: &Path) -> Result<QuestionBank, QuizError> {
    let content = fs::read_to_string(path).map_err(|e| {
        logger::error(&format!("reading {}: {}", path.display(), e));
        QuizError::load_failure(path, e)
    })?;

    let bank = parse_document(&content).map_err(|e| {
        logger::error(&format!("parsing {}: {}", path.display(), e));
        QuizError::load_failure(path, e)
    })?;

    logger::info(&format!(
        "loaded {} questions in {} chapters from {}",
        bank.len(),
        bank.chapters().len(),
        path.display()
    ));
    Ok(bank)
}

pub fn parse_bank(content: &str) -> Result<QuestionBank, QuizError> {
    parse_document(content).map_err(|e| QuizError::load_failure("<memory>", e))
}

fn parse_document(content: &str) -> serde_json::Result<QuestionBank> {
    let file: BankFile = serde_json::from_str(content)?;
    let title = file.metadata.and_then(|m| m.title);
    Ok(QuestionBank::new(file.questions, file.chapters, title))
}
