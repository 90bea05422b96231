use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    Json,
};
use log::info;

use crate::{
    error::AppError,
    models::{
        communication::Status,
        quiz::{AnswerOutcome, AnswerSubmission, HighScore, QuestionQuery, QuestionSummary},
    },
    state::AppState,
};

pub async fn question_handler(
    State(state): State<Arc<AppState>>,
    query: Result<Query<QuestionQuery>, QueryRejection>,
) -> Result<Json<QuestionSummary>, AppError> {
    let Query(query) = query?;
    let question = state.quiz.next_question();
    info!(
        "Question {} served (previous: {:?})",
        question.id, query.previous_id
    );

    Ok(Json(question))
}

pub async fn answer_handler(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<AnswerSubmission>, JsonRejection>,
) -> Result<Json<AnswerOutcome>, AppError> {
    let Json(submission) = payload?;
    info!("Answer for question {}", submission.id);

    Ok(Json(state.quiz.submit_answer(&submission)))
}

pub async fn highscore_handler(State(state): State<Arc<AppState>>) -> Json<HighScore> {
    Json(HighScore {
        high_score: state.quiz.high_score(),
    })
}

pub async fn reset_handler(State(state): State<Arc<AppState>>) -> Json<Status> {
    state.quiz.reset();
    info!("Quiz reset");

    Json(Status::new("Quiz reset successfully"))
}
