mod category;
mod ids;
mod question;
mod quiz;

pub use category::Category;
pub use ids::{CategoryId, ParseIdError, QuestionId, QuizId, SessionId};
pub use question::Question;
pub use quiz::{Difficulty, Quiz, QuizError};
