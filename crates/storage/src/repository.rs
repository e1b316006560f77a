use async_trait::async_trait;
use quiz_core::model::{Category, CategoryId, Quiz, QuizId};
use std::sync::{Arc, Mutex};
use thiserror::Error;

use crate::catalog::Catalog;

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("not found")]
    NotFound,

    #[error("connection error: {0}")]
    Connection(String),
}

/// Read side of the question bank for categories.
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    /// Fetch a category by ID.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if missing, or other storage errors.
    async fn get_category(&self, id: &CategoryId) -> Result<Category, StorageError>;

    /// All categories in catalog order.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on backend failures.
    async fn list_categories(&self) -> Result<Vec<Category>, StorageError>;
}

/// Read side of the question bank for quizzes.
#[async_trait]
pub trait QuizRepository: Send + Sync {
    /// Fetch a quiz by ID.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if missing, or other storage errors.
    async fn get_quiz(&self, id: &QuizId) -> Result<Quiz, StorageError>;

    /// Quizzes of one category in catalog order. Empty for unknown categories.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on backend failures.
    async fn list_quizzes_by_category(
        &self,
        category_id: &CategoryId,
    ) -> Result<Vec<Quiz>, StorageError>;
}

/// Simple in-memory repository implementation backed by an ordered catalog.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    categories: Arc<Mutex<Vec<Category>>>,
    quizzes: Arc<Mutex<Vec<Quiz>>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the repository with an already validated catalog.
    #[must_use]
    pub fn from_catalog(catalog: Catalog) -> Self {
        let (categories, quizzes) = catalog.into_parts();
        Self {
            categories: Arc::new(Mutex::new(categories)),
            quizzes: Arc::new(Mutex::new(quizzes)),
        }
    }

    /// Add or replace a category, keeping its catalog position.
    ///
    /// Seeding helper for tests and fixtures; the question bank is read-only
    /// behind the repository traits.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Connection` if the lock is poisoned.
    pub fn upsert_category(&self, category: &Category) -> Result<(), StorageError> {
        let mut guard = self
            .categories
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        match guard.iter_mut().find(|c| c.id() == category.id()) {
            Some(existing) => *existing = category.clone(),
            None => guard.push(category.clone()),
        }
        Ok(())
    }

    /// Add or replace a quiz, keeping its catalog position.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Connection` if the lock is poisoned.
    pub fn upsert_quiz(&self, quiz: &Quiz) -> Result<(), StorageError> {
        let mut guard = self
            .quizzes
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        match guard.iter_mut().find(|q| q.id() == quiz.id()) {
            Some(existing) => *existing = quiz.clone(),
            None => guard.push(quiz.clone()),
        }
        Ok(())
    }
}

#[async_trait]
impl CategoryRepository for InMemoryRepository {
    async fn get_category(&self, id: &CategoryId) -> Result<Category, StorageError> {
        let guard = self
            .categories
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard
            .iter()
            .find(|c| c.id() == id)
            .cloned()
            .ok_or(StorageError::NotFound)
    }

    async fn list_categories(&self) -> Result<Vec<Category>, StorageError> {
        let guard = self
            .categories
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.clone())
    }
}

#[async_trait]
impl QuizRepository for InMemoryRepository {
    async fn get_quiz(&self, id: &QuizId) -> Result<Quiz, StorageError> {
        let guard = self
            .quizzes
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard
            .iter()
            .find(|q| q.id() == id)
            .cloned()
            .ok_or(StorageError::NotFound)
    }

    async fn list_quizzes_by_category(
        &self,
        category_id: &CategoryId,
    ) -> Result<Vec<Quiz>, StorageError> {
        let guard = self
            .quizzes
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard
            .iter()
            .filter(|q| q.category_id() == category_id)
            .cloned()
            .collect())
    }
}

/// Aggregates the question bank repositories behind trait objects for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub categories: Arc<dyn CategoryRepository>,
    pub quizzes: Arc<dyn QuizRepository>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        Self::from_repository(InMemoryRepository::new())
    }

    #[must_use]
    pub fn from_catalog(catalog: Catalog) -> Self {
        Self::from_repository(InMemoryRepository::from_catalog(catalog))
    }

    #[must_use]
    pub fn from_repository(repo: InMemoryRepository) -> Self {
        let categories: Arc<dyn CategoryRepository> = Arc::new(repo.clone());
        let quizzes: Arc<dyn QuizRepository> = Arc::new(repo);
        Self {
            categories,
            quizzes,
        }
    }
}
