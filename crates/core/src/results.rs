use std::fmt;
use std::time::Duration;

use crate::model::{Question, Quiz, QuizId};
use crate::session::{SessionConfigError, SessionState, TransitionError, ensure_same_quiz};

/// Default lower bound (inclusive) of the "perfect" band.
pub const PERFECT_PERCENT: u8 = 100;
/// Default lower bound (inclusive) of the "good" band.
pub const GOOD_PERCENT: u8 = 70;
/// Default lower bound (inclusive) of the "average" band.
pub const AVERAGE_PERCENT: u8 = 50;

//
// ─── RATING ────────────────────────────────────────────────────────────────────
//

/// Qualitative label derived from the percentage score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Rating {
    NeedsPractice,
    Average,
    Good,
    Perfect,
}

impl Rating {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Rating::Perfect => "perfect",
            Rating::Good => "good",
            Rating::Average => "average",
            Rating::NeedsPractice => "needs practice",
        }
    }

    /// Headline for the results screen.
    #[must_use]
    pub fn headline(self) -> &'static str {
        match self {
            Rating::Perfect => "Perfect Score!",
            Rating::Good => "Great Job!",
            Rating::Average => "Good Effort!",
            Rating::NeedsPractice => "Keep Practicing!",
        }
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Inclusive percentage thresholds for each rating band.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RatingBands {
    perfect: u8,
    good: u8,
    average: u8,
}

impl Default for RatingBands {
    fn default() -> Self {
        Self {
            perfect: PERFECT_PERCENT,
            good: GOOD_PERCENT,
            average: AVERAGE_PERCENT,
        }
    }
}

impl RatingBands {
    /// # Errors
    ///
    /// Returns `SessionConfigError::InvalidRatingBands` unless
    /// `0 < average <= good <= perfect <= 100`.
    pub fn new(perfect: u8, good: u8, average: u8) -> Result<Self, SessionConfigError> {
        if average == 0 || average > good || good > perfect || perfect > 100 {
            return Err(SessionConfigError::InvalidRatingBands {
                perfect,
                good,
                average,
            });
        }
        Ok(Self {
            perfect,
            good,
            average,
        })
    }

    #[must_use]
    pub fn perfect(&self) -> u8 {
        self.perfect
    }

    #[must_use]
    pub fn good(&self) -> u8 {
        self.good
    }

    #[must_use]
    pub fn average(&self) -> u8 {
        self.average
    }

    #[must_use]
    pub fn rate(&self, percentage: u8) -> Rating {
        if percentage >= self.perfect {
            Rating::Perfect
        } else if percentage >= self.good {
            Rating::Good
        } else if percentage >= self.average {
            Rating::Average
        } else {
            Rating::NeedsPractice
        }
    }
}

/// `round(part / total * 100)`, rounding halves up. Zero for an empty total.
#[must_use]
pub fn percentage(part: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    let part = part.min(total) as u64;
    let total = total as u64;
    let rounded = (part * 200 + total) / (total * 2);
    u8::try_from(rounded).unwrap_or(100)
}

/// Five-star display: one star per started 20%.
#[must_use]
pub fn stars(percentage: u8) -> u8 {
    percentage.min(100).div_ceil(20)
}

//
// ─── SUMMARY ───────────────────────────────────────────────────────────────────
//

/// One row of the question review on the results screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionReview {
    pub question: Question,
    pub chosen: Option<usize>,
    pub is_correct: bool,
}

/// Final report for a completed session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultsSummary {
    pub quiz_id: QuizId,
    pub score: usize,
    pub question_count: usize,
    pub percentage: u8,
    pub rating: Rating,
    pub stars: u8,
    pub elapsed: Duration,
    pub per_question: Vec<QuestionReview>,
}

impl ResultsSummary {
    #[must_use]
    pub fn is_perfect(&self) -> bool {
        self.score == self.question_count
    }
}

/// Derives the results report from a completed state and its quiz.
#[derive(Debug, Clone, Default)]
pub struct ResultsSummarizer {
    bands: RatingBands,
}

impl ResultsSummarizer {
    #[must_use]
    pub fn new(bands: RatingBands) -> Self {
        Self { bands }
    }

    /// `Rating::Perfect` is only given when every answer is correct, so it
    /// always agrees with `ResultsSummary::is_perfect`.
    ///
    /// # Errors
    ///
    /// Returns `TransitionError::NotCompleted` if the session is still running,
    /// or `TransitionError::QuizMismatch` if `state` was not built from `quiz`.
    pub fn summarize(
        &self,
        quiz: &Quiz,
        state: &SessionState,
    ) -> Result<ResultsSummary, TransitionError> {
        ensure_same_quiz(quiz, state)?;
        if !state.is_completed() {
            return Err(TransitionError::NotCompleted);
        }

        let per_question: Vec<QuestionReview> = quiz
            .questions()
            .iter()
            .zip(state.answers())
            .map(|(question, chosen)| QuestionReview {
                question: question.clone(),
                chosen: *chosen,
                is_correct: question.is_correct(*chosen),
            })
            .collect();

        let score = per_question.iter().filter(|r| r.is_correct).count();
        let question_count = quiz.question_count();
        let percentage = percentage(score, question_count);
        // A missed question can round up to 100%; that is not a perfect score.
        let rating = match self.bands.rate(percentage) {
            Rating::Perfect if score < question_count => Rating::Good,
            rating => rating,
        };

        Ok(ResultsSummary {
            quiz_id: quiz.id().clone(),
            score,
            question_count,
            percentage,
            rating,
            stars: stars(percentage),
            elapsed: state.elapsed(),
            per_question,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percentage_rounds_to_nearest() {
        assert_eq!(percentage(2, 3), 67);
        assert_eq!(percentage(1, 3), 33);
        assert_eq!(percentage(3, 3), 100);
        assert_eq!(percentage(1, 2), 50);
        assert_eq!(percentage(1, 8), 13);
        assert_eq!(percentage(0, 0), 0);
    }

    #[test]
    fn default_bands_at_boundaries() {
        let bands = RatingBands::default();
        assert_eq!(bands.rate(49), Rating::NeedsPractice);
        assert_eq!(bands.rate(50), Rating::Average);
        assert_eq!(bands.rate(69), Rating::Average);
        assert_eq!(bands.rate(70), Rating::Good);
        assert_eq!(bands.rate(99), Rating::Good);
        assert_eq!(bands.rate(100), Rating::Perfect);
    }

    #[test]
    fn custom_bands_move_boundaries() {
        let bands = RatingBands::new(90, 80, 40).unwrap();
        assert_eq!(bands.rate(39), Rating::NeedsPractice);
        assert_eq!(bands.rate(40), Rating::Average);
        assert_eq!(bands.rate(80), Rating::Good);
        assert_eq!(bands.rate(90), Rating::Perfect);
    }

    #[test]
    fn unordered_bands_are_rejected() {
        assert!(RatingBands::new(100, 40, 50).is_err());
        assert!(RatingBands::new(101, 70, 50).is_err());
        assert!(RatingBands::new(100, 70, 0).is_err());
    }

    #[test]
    fn stars_round_up_per_twenty_percent() {
        assert_eq!(stars(0), 0);
        assert_eq!(stars(1), 1);
        assert_eq!(stars(67), 4);
        assert_eq!(stars(100), 5);
    }

    #[test]
    fn labels_match_bands() {
        assert_eq!(Rating::NeedsPractice.to_string(), "needs practice");
        assert_eq!(Rating::Perfect.headline(), "Perfect Score!");
    }
}
