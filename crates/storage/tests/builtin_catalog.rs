use quiz_core::model::{CategoryId, Difficulty, QuizId};
use storage::{Catalog, Storage, StorageError};

fn builtin_storage() -> Storage {
    Storage::from_catalog(Catalog::builtin().expect("bundled catalog is valid"))
}

#[tokio::test]
async fn lists_categories_in_catalog_order() {
    let storage = builtin_storage();
    let names: Vec<String> = storage
        .categories
        .list_categories()
        .await
        .unwrap()
        .iter()
        .map(|c| c.name().to_owned())
        .collect();
    assert_eq!(names, vec!["History", "Science", "Mathematics", "Programming"]);
}

#[tokio::test]
async fn quizzes_by_category_keep_file_order() {
    let storage = builtin_storage();
    let quizzes = storage
        .quizzes
        .list_quizzes_by_category(&CategoryId::new("history"))
        .await
        .unwrap();
    let ids: Vec<&str> = quizzes.iter().map(|q| q.id().as_str()).collect();
    assert_eq!(ids, vec!["ancient-civilizations", "world-wars"]);
    assert_eq!(quizzes[1].difficulty(), Difficulty::Hard);
}

#[tokio::test]
async fn fetches_quiz_with_explanations() {
    let storage = builtin_storage();
    let quiz = storage
        .quizzes
        .get_quiz(&QuizId::new("basic-algebra"))
        .await
        .unwrap();
    assert_eq!(quiz.question_count(), 3);
    let first = &quiz.questions()[0];
    assert_eq!(first.option(first.correct_answer()), Some("4"));
    assert!(first.explanation().is_some());
}

#[tokio::test]
async fn unknown_quiz_is_not_found() {
    let storage = builtin_storage();
    let err = storage
        .quizzes
        .get_quiz(&QuizId::new("does-not-exist"))
        .await
        .unwrap_err();
    assert!(matches!(err, StorageError::NotFound));
}
