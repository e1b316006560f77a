use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::model::ids::{CategoryId, QuestionId, QuizId};
use crate::model::question::Question;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

/// Catalog data that breaks the quiz contract. Reported at load time.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuizError {
    #[error("id cannot be empty")]
    EmptyId,

    #[error("quiz title cannot be empty")]
    EmptyTitle { quiz: QuizId },

    #[error("category name cannot be empty")]
    EmptyCategoryName { category: CategoryId },

    #[error("question {question} has no text")]
    EmptyQuestionText { question: QuestionId },

    #[error("question {question} needs at least 2 options, got {count}")]
    TooFewOptions { question: QuestionId, count: usize },

    #[error("question {question} marks option {index} correct but only has {count} options")]
    CorrectAnswerOutOfRange {
        question: QuestionId,
        index: usize,
        count: usize,
    },

    #[error("quiz {quiz} has no questions")]
    NoQuestions { quiz: QuizId },

    #[error("quiz {quiz} repeats question id {question}")]
    DuplicateQuestion { quiz: QuizId, question: QuestionId },

    #[error("unknown difficulty: {0}")]
    UnknownDifficulty(String),
}

//
// ─── DIFFICULTY ────────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// Capitalised label for badges ("Easy", "Medium", "Hard").
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Difficulty {
    type Err = QuizError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(Self::Easy),
            "medium" => Ok(Self::Medium),
            "hard" => Ok(Self::Hard),
            _ => Err(QuizError::UnknownDifficulty(s.to_owned())),
        }
    }
}

//
// ─── QUIZ ──────────────────────────────────────────────────────────────────────
//

/// An ordered, non-empty list of questions belonging to one category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quiz {
    id: QuizId,
    title: String,
    description: String,
    category_id: CategoryId,
    questions: Vec<Question>,
    difficulty: Difficulty,
    time_limit_minutes: Option<u32>,
}

impl Quiz {
    /// Build a quiz from validated questions.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::NoQuestions` for an empty question list,
    /// `QuizError::DuplicateQuestion` if two questions share an id,
    /// and `QuizError::EmptyId` / `QuizError::EmptyTitle` for blank fields.
    pub fn new(
        id: QuizId,
        title: impl Into<String>,
        description: impl Into<String>,
        category_id: CategoryId,
        questions: Vec<Question>,
        difficulty: Difficulty,
    ) -> Result<Self, QuizError> {
        if id.is_blank() || category_id.is_blank() {
            return Err(QuizError::EmptyId);
        }
        let title = title.into();
        if title.trim().is_empty() {
            return Err(QuizError::EmptyTitle { quiz: id });
        }
        if questions.is_empty() {
            return Err(QuizError::NoQuestions { quiz: id });
        }

        let mut seen = HashSet::with_capacity(questions.len());
        for question in &questions {
            if !seen.insert(question.id()) {
                return Err(QuizError::DuplicateQuestion {
                    quiz: id.clone(),
                    question: question.id().clone(),
                });
            }
        }

        Ok(Self {
            id,
            title,
            description: description.into(),
            category_id,
            questions,
            difficulty,
            time_limit_minutes: None,
        })
    }

    #[must_use]
    pub fn with_time_limit_minutes(mut self, minutes: Option<u32>) -> Self {
        self.time_limit_minutes = minutes.filter(|m| *m > 0);
        self
    }

    #[must_use]
    pub fn id(&self) -> &QuizId {
        &self.id
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    #[must_use]
    pub fn category_id(&self) -> &CategoryId {
        &self.category_id
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    #[must_use]
    pub fn question(&self, index: usize) -> Option<&Question> {
        self.questions.get(index)
    }

    /// Number of questions; always at least one.
    #[must_use]
    pub fn question_count(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    #[must_use]
    pub fn time_limit_minutes(&self) -> Option<u32> {
        self.time_limit_minutes
    }
}
