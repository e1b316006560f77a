use quiz_core::model::Category;
use quiz_core::time::format_clock;
use quiz_core::{ResultsSummary, TimerMode};
use services::{CategoryQuizzes, QuizSession, SessionReport, Ticker};

pub fn print_categories(categories: &[Category]) {
    if categories.is_empty() {
        println!("No categories.");
        return;
    }
    for category in categories {
        println!("{:<14} {}", category.id().as_str(), category.name());
        if !category.description().is_empty() {
            println!("{:<14} {}", "", category.description());
        }
    }
}

pub fn print_quizzes(listing: &CategoryQuizzes) {
    println!("{}", listing.category.name());
    if listing.quizzes.is_empty() {
        println!("  No quizzes in this category yet.");
        return;
    }
    for quiz in &listing.quizzes {
        let limit = quiz
            .time_limit_minutes
            .map(|m| format!(", {m} min"))
            .unwrap_or_default();
        println!(
            "  {:<24} {} ({} questions, {}{limit})",
            quiz.id.as_str(), quiz.title, quiz.question_count, quiz.difficulty
        );
    }
}

/// Prints a session as it changes, without repeating unchanged screens.
#[derive(Debug, Default)]
pub struct Renderer {
    shown: Option<(usize, bool)>,
    last_secs: Option<u64>,
}

impl Renderer {
    pub fn update<T: Ticker>(&mut self, session: &QuizSession<T>) {
        if session.is_complete() {
            return;
        }
        let state = session.state();
        let view = (state.current_index(), state.is_locked());
        if self.shown != Some(view) {
            self.shown = Some(view);
            self.last_secs = None;
            if view.1 {
                print_feedback(session);
            } else {
                print_question(session);
            }
            return;
        }
        self.print_countdown(session);
    }

    fn print_countdown<T: Ticker>(&mut self, session: &QuizSession<T>) {
        if session.state().is_locked() {
            return;
        }
        let Some(left) = session.time_left() else {
            return;
        };
        let secs = left.as_secs();
        if self.last_secs == Some(secs) {
            return;
        }
        self.last_secs = Some(secs);
        if secs <= 5 || secs % 10 == 0 {
            println!("  {} left", format_clock(left));
        }
    }
}

fn print_question<T: Ticker>(session: &QuizSession<T>) {
    let Some(question) = session.current_question() else {
        return;
    };
    let progress = session.progress();
    let running = session.running_score();
    println!();
    println!(
        "Question {}/{} ({}%)  score {}/{}",
        progress.position, progress.total, progress.percent, running.correct, running.answered
    );
    match session.config().timer() {
        TimerMode::SessionClock => {
            println!("Elapsed {}", format_clock(session.state().elapsed()));
        }
        TimerMode::PerQuestionCountdown { .. } => {
            if let Some(left) = session.time_left() {
                println!("Time left {}", format_clock(left));
            }
        }
        TimerMode::None => {}
    }
    println!("{}", question.text());
    for (i, option) in question.options().iter().enumerate() {
        println!("  {}. {option}", i + 1);
    }
}

fn print_feedback<T: Ticker>(session: &QuizSession<T>) {
    let (Some(feedback), Some(question)) = (session.feedback(), session.current_question()) else {
        return;
    };
    if feedback.is_correct {
        println!("Correct!");
    } else {
        let answer = question.option(feedback.correct_answer).unwrap_or_default();
        println!(
            "Incorrect! The answer is {}. {answer}",
            feedback.correct_answer + 1
        );
    }
    if let Some(explanation) = &feedback.explanation {
        println!("{explanation}");
    }
    if session.config().auto_advance_after().is_none() {
        if session.state().is_last_question() {
            println!("Press enter to see your results.");
        } else {
            println!("Press enter for the next question.");
        }
    }
}

pub fn print_report(title: &str, report: &SessionReport) {
    let summary = &report.summary;
    println!();
    println!("{title}: {}", summary.rating.headline());
    println!(
        "You scored {}/{} ({}%) {}",
        summary.score,
        summary.question_count,
        summary.percentage,
        stars(summary)
    );
    println!("Rating: {}", summary.rating);
    if !summary.elapsed.is_zero() {
        println!("Time: {}", format_clock(summary.elapsed));
    }
    println!();
    for (i, review) in summary.per_question.iter().enumerate() {
        let mark = if review.is_correct { "+" } else { "-" };
        let chosen = review
            .chosen
            .and_then(|c| review.question.option(c))
            .unwrap_or("(no answer)");
        println!("{mark} {}. {}", i + 1, review.question.text());
        println!("    your answer: {chosen}");
        if !review.is_correct {
            let correct = review
                .question
                .option(review.question.correct_answer())
                .unwrap_or_default();
            println!("    correct:     {correct}");
        }
    }
}

fn stars(summary: &ResultsSummary) -> String {
    let filled = usize::from(summary.stars.min(5));
    format!("{}{}", "*".repeat(filled), ".".repeat(5 - filled))
}
