use crate::model::ids::CategoryId;
use crate::model::quiz::QuizError;

/// A group of quizzes shown together on the catalog page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    id: CategoryId,
    name: String,
    description: String,
    icon: String,
    color: String,
}

impl Category {
    /// # Errors
    ///
    /// Returns `QuizError::EmptyId` or `QuizError::EmptyCategoryName` for blank fields.
    pub fn new(
        id: CategoryId,
        name: impl Into<String>,
        description: impl Into<String>,
        icon: impl Into<String>,
        color: impl Into<String>,
    ) -> Result<Self, QuizError> {
        if id.is_blank() {
            return Err(QuizError::EmptyId);
        }
        let name = name.into();
        if name.trim().is_empty() {
            return Err(QuizError::EmptyCategoryName { category: id });
        }
        Ok(Self {
            id,
            name,
            description: description.into(),
            icon: icon.into(),
            color: color.into(),
        })
    }

    #[must_use]
    pub fn id(&self) -> &CategoryId {
        &self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    #[must_use]
    pub fn icon(&self) -> &str {
        &self.icon
    }

    #[must_use]
    pub fn color(&self) -> &str {
        &self.color
    }
}
