//! JSON catalog of categories and quizzes.
//!
//! The file shape mirrors the web app's data module: camelCase keys,
//! `correctAnswer` as a zero-based option index, optional `explanation`
//! and `timeLimit` (minutes). Everything is validated when loaded, so a
//! malformed quiz never reaches a session.

use std::collections::HashSet;
use std::path::Path;

use quiz_core::model::{
    Category, CategoryId, Difficulty, Question, QuestionId, Quiz, QuizError, QuizId,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

const BUILTIN_CATALOG: &str = include_str!("../data/catalog.json");

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CatalogLoadError {
    #[error("failed to read catalog: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed catalog: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid entry {entry}: {source}")]
    Invalid {
        entry: String,
        #[source]
        source: QuizError,
    },

    #[error("quiz {quiz} references unknown category {category}")]
    UnknownCategory { quiz: QuizId, category: CategoryId },

    #[error("duplicate category id {0}")]
    DuplicateCategory(CategoryId),

    #[error("duplicate quiz id {0}")]
    DuplicateQuiz(QuizId),
}

//
// ─── RECORDS ───────────────────────────────────────────────────────────────────
//

/// Serialized shape of a whole catalog file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogRecord {
    pub categories: Vec<CategoryRecord>,
    pub quizzes: Vec<QuizRecord>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryRecord {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub color: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizRecord {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub category_id: String,
    pub questions: Vec<QuestionRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_limit: Option<u32>,
    pub difficulty: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionRecord {
    pub id: String,
    pub text: String,
    pub options: Vec<String>,
    pub correct_answer: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
}

impl CategoryRecord {
    /// Convert the record into a domain `Category`.
    ///
    /// # Errors
    ///
    /// Returns `QuizError` if required fields are blank.
    pub fn into_category(self) -> Result<Category, QuizError> {
        Category::new(
            CategoryId::new(self.id),
            self.name,
            self.description,
            self.icon,
            self.color,
        )
    }
}

impl QuizRecord {
    /// Convert the record into a domain `Quiz`.
    ///
    /// # Errors
    ///
    /// Returns `QuizError` for an empty quiz, bad questions or unknown difficulty.
    pub fn into_quiz(self) -> Result<Quiz, QuizError> {
        let difficulty: Difficulty = self.difficulty.parse()?;
        let questions = self
            .questions
            .into_iter()
            .map(|q| {
                Question::new(
                    QuestionId::new(q.id),
                    q.text,
                    q.options,
                    q.correct_answer,
                    q.explanation,
                )
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Quiz::new(
            QuizId::new(self.id),
            self.title,
            self.description,
            CategoryId::new(self.category_id),
            questions,
            difficulty,
        )?
        .with_time_limit_minutes(self.time_limit))
    }
}

//
// ─── CATALOG ───────────────────────────────────────────────────────────────────
//

/// A validated set of categories and quizzes, in file order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    categories: Vec<Category>,
    quizzes: Vec<Quiz>,
}

impl Catalog {
    /// The catalog bundled with the crate.
    ///
    /// # Errors
    ///
    /// Returns `CatalogLoadError` if the bundled file fails validation.
    pub fn builtin() -> Result<Self, CatalogLoadError> {
        Self::from_json_str(BUILTIN_CATALOG)
    }

    /// # Errors
    ///
    /// Returns `CatalogLoadError::Json` for malformed input and the other
    /// variants for data that breaks the quiz contract.
    pub fn from_json_str(raw: &str) -> Result<Self, CatalogLoadError> {
        let record: CatalogRecord = serde_json::from_str(raw)?;
        Self::from_record(record)
    }

    /// # Errors
    ///
    /// Returns `CatalogLoadError::Io` if the file cannot be read, otherwise as
    /// `from_json_str`.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, CatalogLoadError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    /// # Errors
    ///
    /// Returns `CatalogLoadError` for invalid entries, duplicate ids or
    /// quizzes pointing at a category that does not exist.
    pub fn from_record(record: CatalogRecord) -> Result<Self, CatalogLoadError> {
        let mut categories = Vec::with_capacity(record.categories.len());
        let mut category_ids = HashSet::new();
        for raw in record.categories {
            let entry = raw.id.clone();
            let category = raw
                .into_category()
                .map_err(|source| CatalogLoadError::Invalid { entry, source })?;
            if !category_ids.insert(category.id().clone()) {
                return Err(CatalogLoadError::DuplicateCategory(category.id().clone()));
            }
            categories.push(category);
        }

        let mut quizzes = Vec::with_capacity(record.quizzes.len());
        let mut quiz_ids = HashSet::new();
        for raw in record.quizzes {
            let entry = raw.id.clone();
            let quiz = raw
                .into_quiz()
                .map_err(|source| CatalogLoadError::Invalid { entry, source })?;
            if !category_ids.contains(quiz.category_id()) {
                return Err(CatalogLoadError::UnknownCategory {
                    quiz: quiz.id().clone(),
                    category: quiz.category_id().clone(),
                });
            }
            if !quiz_ids.insert(quiz.id().clone()) {
                return Err(CatalogLoadError::DuplicateQuiz(quiz.id().clone()));
            }
            quizzes.push(quiz);
        }

        Ok(Self {
            categories,
            quizzes,
        })
    }

    #[must_use]
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    #[must_use]
    pub fn quizzes(&self) -> &[Quiz] {
        &self.quizzes
    }

    #[must_use]
    pub fn into_parts(self) -> (Vec<Category>, Vec<Quiz>) {
        (self.categories, self.quizzes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ONE_QUIZ: &str = r#"{
        "categories": [{ "id": "math", "name": "Mathematics" }],
        "quizzes": [{
            "id": "sums",
            "title": "Sums",
            "categoryId": "math",
            "difficulty": "easy",
            "timeLimit": 5,
            "questions": [
                { "id": "1", "text": "1 + 1?", "options": ["1", "2"], "correctAnswer": 1 }
            ]
        }]
    }"#;

    #[test]
    fn builtin_catalog_is_valid() {
        let catalog = Catalog::builtin().unwrap();
        assert_eq!(catalog.categories().len(), 4);
        assert_eq!(catalog.quizzes().len(), 8);
        assert!(catalog.quizzes().iter().all(|q| q.question_count() >= 2));
    }

    #[test]
    fn parses_camel_case_fields() {
        let catalog = Catalog::from_json_str(ONE_QUIZ).unwrap();
        let quiz = &catalog.quizzes()[0];
        assert_eq!(quiz.id().as_str(), "sums");
        assert_eq!(quiz.difficulty(), Difficulty::Easy);
        assert_eq!(quiz.time_limit_minutes(), Some(5));
        assert_eq!(quiz.questions()[0].correct_answer(), 1);
    }

    #[test]
    fn empty_quiz_is_rejected_at_load_time() {
        let raw = ONE_QUIZ.replace(
            r#"{ "id": "1", "text": "1 + 1?", "options": ["1", "2"], "correctAnswer": 1 }"#,
            "",
        );
        let err = Catalog::from_json_str(&raw).unwrap_err();
        assert!(matches!(
            err,
            CatalogLoadError::Invalid {
                source: QuizError::NoQuestions { .. },
                ..
            }
        ));
    }

    #[test]
    fn unknown_category_is_rejected() {
        let raw = ONE_QUIZ.replace(r#""categoryId": "math""#, r#""categoryId": "art""#);
        let err = Catalog::from_json_str(&raw).unwrap_err();
        assert!(matches!(err, CatalogLoadError::UnknownCategory { .. }));
    }

    #[test]
    fn correct_answer_out_of_range_is_rejected() {
        let raw = ONE_QUIZ.replace(r#""correctAnswer": 1"#, r#""correctAnswer": 2"#);
        let err = Catalog::from_json_str(&raw).unwrap_err();
        assert!(matches!(
            err,
            CatalogLoadError::Invalid {
                source: QuizError::CorrectAnswerOutOfRange { .. },
                ..
            }
        ));
    }

    #[test]
    fn malformed_json_is_reported() {
        assert!(matches!(
            Catalog::from_json_str("{"),
            Err(CatalogLoadError::Json(_))
        ));
    }
}
