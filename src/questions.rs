use std::collections::HashSet;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// Options are answered with the digit keys 1-9.
pub const MAX_OPTIONS: usize = 9;

/// A single multiple-choice question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: u32,
    #[serde(rename = "question")]
    pub prompt: String,
    pub options: Vec<String>,
    #[serde(rename = "correct")]
    pub correct_index: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
}

impl Question {
    pub fn is_correct(&self, choice: usize) -> bool {
        choice == self.correct_index
    }

    pub fn correct_option(&self) -> &str {
        &self.options[self.correct_index]
    }
}

fn question(id: u32, prompt: &str, options: [&str; 4], correct: usize, explanation: &str) -> Question {
    Question {
        id,
        prompt: prompt.to_string(),
        options: options.iter().map(|s| s.to_string()).collect(),
        correct_index: correct,
        explanation: Some(explanation.to_string()),
    }
}

static BUILTIN_QUESTIONS: Lazy<Vec<Question>> = Lazy::new(|| {
    vec![
        question(
            1,
            "What is the capital of France?",
            ["London", "Berlin", "Paris", "Madrid"],
            2,
            "Paris is the capital and most populous city of France.",
        ),
        question(
            2,
            "Which planet is known as the Red Planet?",
            ["Venus", "Mars", "Jupiter", "Saturn"],
            1,
            "Mars is called the Red Planet due to its reddish appearance from iron oxide on its surface.",
        ),
        question(
            3,
            "What is 15 × 8?",
            ["110", "120", "130", "140"],
            1,
            "15 × 8 = 120. This is a basic multiplication problem.",
        ),
        question(
            4,
            "Who painted the Mona Lisa?",
            ["Van Gogh", "Picasso", "Leonardo da Vinci", "Michelangelo"],
            2,
            "Leonardo da Vinci painted the Mona Lisa between 1503 and 1519.",
        ),
        question(
            5,
            "What is the largest ocean on Earth?",
            ["Atlantic", "Indian", "Arctic", "Pacific"],
            3,
            "The Pacific Ocean is the largest ocean, covering about 46% of the world's water surface.",
        ),
    ]
});

/// Ordered, immutable set of questions for a quiz.
#[derive(Debug, Clone)]
pub struct QuestionBank {
    questions: Vec<Question>,
}

impl QuestionBank {
    /// Build a bank, rejecting malformed questions.
    pub fn new(questions: Vec<Question>) -> Result<Self> {
        validate(&questions)?;
        Ok(Self { questions })
    }

    /// The five questions shipped with the binary.
    pub fn builtin() -> Self {
        Self {
            questions: BUILTIN_QUESTIONS.clone(),
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let questions: Vec<Question> =
            serde_json::from_str(json).context("failed to parse question bank")?;
        Self::new(questions)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read question bank {}", path.display()))?;
        Self::from_json_str(&text)
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

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn iter(&self) -> impl Iterator<Item = &Question> {
        self.questions.iter()
    }
}

fn validate(questions: &[Question]) -> Result<()> {
    if questions.is_empty() {
        bail!("question bank is empty");
    }

    let mut seen = HashSet::new();
    for q in questions {
        if q.id == 0 {
            bail!("question id must be positive");
        }
        if !seen.insert(q.id) {
            bail!("duplicate question id {}", q.id);
        }
        if q.prompt.trim().is_empty() {
            bail!("question {} has an empty prompt", q.id);
        }
        if q.options.len() < 2 {
            bail!("question {} needs at least two options", q.id);
        }
        if q.options.len() > MAX_OPTIONS {
            bail!(
                "question {} has {} options, at most {} are supported",
                q.id,
                q.options.len(),
                MAX_OPTIONS
            );
        }
        if q.options.iter().any(|o| o.trim().is_empty()) {
            bail!("question {} has an empty option", q.id);
        }
        if q.correct_index >= q.options.len() {
            bail!(
                "question {} marks option {} correct but has only {} options",
                q.id,
                q.correct_index,
                q.options.len()
            );
        }
    }

    Ok(())
}
