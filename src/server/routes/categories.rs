use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;

use crate::{
    db::{Question, TriviaRepository},
    server::{app::AppState, error::ApiError, extractors::IdPath},
};

use super::ApiResponse;

#[derive(Serialize)]
struct CategoriesList {
    success: bool,
    categories: Vec<String>,
}

#[derive(Serialize)]
struct CategoryQuestions {
    success: bool,
    questions: Vec<Question>,
    total_questions: usize,
    current_category: i64,
}

async fn get_categories(
    State(repo): State<Arc<dyn TriviaRepository>>,
) -> ApiResponse<Json<CategoriesList>> {
    let categories = repo.list_categories().await?;
    if categories.is_empty() {
        return Err(ApiError::NotFound("no categories".to_owned()));
    }
    Ok(Json(CategoriesList {
        success: true,
        categories: categories.into_iter().map(|c| c.kind).collect(),
    }))
}

async fn questions_for_category(
    State(repo): State<Arc<dyn TriviaRepository>>,
    IdPath(id): IdPath<i64>,
) -> ApiResponse<Json<CategoryQuestions>> {
    let category = repo
        .get_category(id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("category {id}")))?;
    let questions = repo.filter_by_category(category.id).await?;
    Ok(Json(CategoryQuestions {
        success: true,
        total_questions: questions.len(),
        questions,
        current_category: category.id,
    }))
}

pub fn category_router(state: AppState) -> Router {
    Router::new()
        .route("/categories", get(get_categories))
        .route("/categories/{id}/questions", get(questions_for_category))
        .with_state(state)
}
