use std::sync::Arc;

use axum::{
    extract::State,
    routing::{delete, get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_aux::field_attributes::deserialize_option_number_from_string;

use crate::{
    db::{NewQuestion, Question, TriviaRepository},
    quiz::paginate,
    server::{
        app::AppState,
        deserializers::{deserialize_page_lenient, first_page},
        error::ApiError,
        extractors::{IdPath, JsonBody, QueryParams},
    },
};

use super::ApiResponse;

#[derive(Deserialize)]
struct PageQuery {
    #[serde(default = "first_page", deserialize_with = "deserialize_page_lenient")]
    page: i64,
}

// every field is optional here so that a missing one is a 422, not a 400
#[derive(Deserialize)]
struct NewQuestionBody {
    question: Option<String>,
    answer: Option<String>,
    #[serde(default, deserialize_with = "deserialize_option_number_from_string")]
    category: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_option_number_from_string")]
    difficulty: Option<i64>,
}

#[derive(Deserialize)]
struct SearchBody {
    #[serde(rename = "searchTerm")]
    search_term: Option<String>,
}

#[derive(Serialize)]
struct QuestionsPage {
    success: bool,
    questions: Vec<Question>,
    total_questions: usize,
    categories: Vec<String>,
    current_category: Option<i64>,
}

#[derive(Serialize)]
struct QuestionDeleted {
    success: bool,
    question_id_deleted: i64,
}

#[derive(Serialize)]
struct QuestionAdded {
    success: bool,
    question_id_add: i64,
}

#[derive(Serialize)]
struct SearchResults {
    success: bool,
    questions: Vec<Question>,
}

impl NewQuestionBody {
    fn validate(self) -> Result<NewQuestion, ApiError> {
        let missing = |field: &str| ApiError::Unprocessable(format!("missing field `{field}`"));
        let text = |value: Option<String>, field: &str| {
            value
                .filter(|value| !value.trim().is_empty())
                .ok_or_else(|| missing(field))
        };
        Ok(NewQuestion {
            question: text(self.question, "question")?,
            answer: text(self.answer, "answer")?,
            category: self.category.ok_or_else(|| missing("category"))?,
            difficulty: self.difficulty.ok_or_else(|| missing("difficulty"))?,
        })
    }
}

async fn list_questions(
    State(repo): State<Arc<dyn TriviaRepository>>,
    QueryParams(PageQuery { page }): QueryParams<PageQuery>,
) -> ApiResponse<Json<QuestionsPage>> {
    let questions = repo.list_questions().await?;
    let categories = repo.list_categories().await?;
    let window = paginate(&questions, page);
    if window.is_empty() && categories.is_empty() {
        return Err(ApiError::NotFound(format!("questions page {page}")));
    }
    Ok(Json(QuestionsPage {
        success: true,
        questions: window.to_vec(),
        total_questions: questions.len(),
        categories: categories.into_iter().map(|c| c.kind).collect(),
        current_category: None,
    }))
}

async fn delete_question(
    State(repo): State<Arc<dyn TriviaRepository>>,
    IdPath(id): IdPath<i64>,
) -> ApiResponse<Json<QuestionDeleted>> {
    if !repo.delete_question(id).await? {
        return Err(ApiError::NotFound(format!("question {id}")));
    }
    tracing::info!(question_id = id, "Question deleted");
    Ok(Json(QuestionDeleted {
        success: true,
        question_id_deleted: id,
    }))
}

async fn create_question(
    State(repo): State<Arc<dyn TriviaRepository>>,
    JsonBody(body): JsonBody<NewQuestionBody>,
) -> ApiResponse<Json<QuestionAdded>> {
    let question = body.validate()?;
    let id = repo.insert_question(question).await?;
    tracing::info!(question_id = id, "Question added");
    Ok(Json(QuestionAdded {
        success: true,
        question_id_add: id,
    }))
}

async fn search_questions(
    State(repo): State<Arc<dyn TriviaRepository>>,
    JsonBody(body): JsonBody<SearchBody>,
) -> ApiResponse<Json<SearchResults>> {
    let term = body
        .search_term
        .ok_or_else(|| ApiError::BadRequest("missing field `searchTerm`".to_owned()))?;
    let questions = repo.search_questions(&term).await?;
    Ok(Json(SearchResults {
        success: true,
        questions,
    }))
}

pub fn questions_router(state: AppState) -> Router {
    Router::new()
        .route("/questions", get(list_questions).post(create_question))
        .route("/questions/search", post(search_questions))
        .route("/questions/{id}", delete(delete_question))
        .with_state(state)
}
