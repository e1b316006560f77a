/// Aggregated view of session progress, useful for UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionProgress {
    /// 1-based position of the question on screen.
    pub position: usize,
    pub total: usize,
    pub answered: usize,
    /// `round(position / total * 100)`, for a progress bar.
    pub percent: u8,
    pub is_complete: bool,
}

/// Score over committed answers only. The in-flight selection is never counted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunningScore {
    pub correct: usize,
    pub answered: usize,
}

/// What to show once the current question is locked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerFeedback {
    /// The locked choice.
    pub selected: Option<usize>,
    pub correct_answer: usize,
    pub is_correct: bool,
    pub explanation: Option<String>,
}
