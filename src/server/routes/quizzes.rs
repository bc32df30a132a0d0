use std::collections::HashSet;
use std::sync::Arc;

use axum::{extract::State, routing::post, Json, Router};
use serde::{Deserialize, Serialize};

use crate::{
    db::{Question, TriviaRepository},
    quiz::{select_next_question, RandomSource},
    server::{app::AppState, extractors::JsonBody},
    telemetry::record_quiz_pick,
};

use super::ApiResponse;

const ALL_CATEGORIES: &str = "all";

#[derive(Deserialize)]
struct QuizRequest {
    #[serde(default)]
    previous_questions: Vec<i64>,
    #[serde(default)]
    quiz_category: Option<QuizCategory>,
}

// clients also send an `id`, only the label is used
#[derive(Deserialize)]
struct QuizCategory {
    #[serde(rename = "type", default)]
    kind: Option<String>,
}

#[derive(Serialize)]
struct NextQuestion {
    success: bool,
    question: Option<Question>,
}

async fn next_question(
    State(repo): State<Arc<dyn TriviaRepository>>,
    State(random): State<Arc<dyn RandomSource>>,
    JsonBody(request): JsonBody<QuizRequest>,
) -> ApiResponse<Json<NextQuestion>> {
    let category = match request.quiz_category.and_then(|c| c.kind) {
        Some(kind) => repo.find_category_by_type(&kind).await?,
        None => None,
    };
    let pool = match &category {
        Some(category) => repo.filter_by_category(category.id).await?,
        None => repo.list_questions().await?,
    };
    let previous: HashSet<i64> = request.previous_questions.into_iter().collect();

    let question = select_next_question(&pool, &previous, random.as_ref()).cloned();
    let label = category.as_ref().map_or(ALL_CATEGORIES, |c| c.kind.as_str());
    record_quiz_pick(label, question.as_ref().map(|q| q.id));

    Ok(Json(NextQuestion {
        success: true,
        question,
    }))
}

pub fn quizzes_router(state: AppState) -> Router {
    Router::new()
        .route("/quizzes", post(next_question))
        .with_state(state)
}
