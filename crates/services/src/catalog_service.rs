use std::sync::Arc;

use quiz_core::model::{Category, CategoryId, Difficulty, Quiz, QuizId};
use storage::{CategoryRepository, QuizRepository, Storage, StorageError};

use crate::error::CatalogError;

/// Row of a category's quiz list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizListItem {
    pub id: QuizId,
    pub title: String,
    pub description: String,
    pub question_count: usize,
    pub difficulty: Difficulty,
    pub time_limit_minutes: Option<u32>,
}

impl QuizListItem {
    #[must_use]
    pub fn from_quiz(quiz: &Quiz) -> Self {
        Self {
            id: quiz.id().clone(),
            title: quiz.title().to_owned(),
            description: quiz.description().to_owned(),
            question_count: quiz.question_count(),
            difficulty: quiz.difficulty(),
            time_limit_minutes: quiz.time_limit_minutes(),
        }
    }
}

/// A category together with its quizzes, in catalog order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryQuizzes {
    pub category: Category,
    pub quizzes: Vec<QuizListItem>,
}

/// Read-only facade over the question bank.
#[derive(Clone)]
pub struct CatalogService {
    categories: Arc<dyn CategoryRepository>,
    quizzes: Arc<dyn QuizRepository>,
}

impl CatalogService {
    #[must_use]
    pub fn new(categories: Arc<dyn CategoryRepository>, quizzes: Arc<dyn QuizRepository>) -> Self {
        Self {
            categories,
            quizzes,
        }
    }

    #[must_use]
    pub fn from_storage(storage: &Storage) -> Self {
        Self::new(storage.categories.clone(), storage.quizzes.clone())
    }

    /// # Errors
    ///
    /// Returns `CatalogError::Storage` on repository failures.
    pub async fn list_categories(&self) -> Result<Vec<Category>, CatalogError> {
        Ok(self.categories.list_categories().await?)
    }

    /// # Errors
    ///
    /// Returns `CatalogError::CategoryNotFound` for an unknown id.
    pub async fn get_category(&self, id: &CategoryId) -> Result<Category, CatalogError> {
        self.categories.get_category(id).await.map_err(|err| match err {
            StorageError::NotFound => {
                log::debug!("category {id} not found");
                CatalogError::CategoryNotFound(id.clone())
            }
            other => other.into(),
        })
    }

    /// Quizzes of one category.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::CategoryNotFound` for an unknown category. A known
    /// category without quizzes yields an empty list.
    pub async fn quizzes_by_category(
        &self,
        id: &CategoryId,
    ) -> Result<CategoryQuizzes, CatalogError> {
        let category = self.get_category(id).await?;
        let quizzes = self
            .quizzes
            .list_quizzes_by_category(id)
            .await?
            .iter()
            .map(QuizListItem::from_quiz)
            .collect();
        Ok(CategoryQuizzes { category, quizzes })
    }

    /// # Errors
    ///
    /// Returns `CatalogError::QuizNotFound` for an unknown id.
    pub async fn get_quiz(&self, id: &QuizId) -> Result<Quiz, CatalogError> {
        self.quizzes.get_quiz(id).await.map_err(|err| match err {
            StorageError::NotFound => {
                log::debug!("quiz {id} not found");
                CatalogError::QuizNotFound(id.clone())
            }
            other => other.into(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use storage::{Catalog, InMemoryRepository};

    fn service() -> CatalogService {
        CatalogService::from_storage(&Storage::from_catalog(Catalog::builtin().unwrap()))
    }

    #[tokio::test]
    async fn lists_quizzes_for_a_category() {
        let listing = service()
            .quizzes_by_category(&CategoryId::new("math"))
            .await
            .unwrap();
        assert_eq!(listing.category.name(), "Mathematics");
        assert!(!listing.quizzes.is_empty());
        assert!(listing.quizzes.iter().all(|q| q.question_count > 0));
    }

    #[tokio::test]
    async fn unknown_category_is_not_found() {
        let err = service()
            .quizzes_by_category(&CategoryId::new("astrology"))
            .await
            .unwrap_err();
        assert!(matches!(err, CatalogError::CategoryNotFound(_)));
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn unknown_quiz_is_not_found() {
        let err = service().get_quiz(&QuizId::new("nope")).await.unwrap_err();
        assert!(matches!(err, CatalogError::QuizNotFound(ref id) if id.as_str() == "nope"));
    }

    #[tokio::test]
    async fn empty_category_lists_nothing() {
        let repo = InMemoryRepository::new();
        let category = Category::new(CategoryId::new("art"), "Art", "", "", "").unwrap();
        repo.upsert_category(&category).unwrap();
        let storage = Storage::from_repository(repo);

        let listing = CatalogService::from_storage(&storage)
            .quizzes_by_category(category.id())
            .await
            .unwrap();
        assert!(listing.quizzes.is_empty());
    }
}
