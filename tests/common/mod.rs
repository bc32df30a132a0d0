#![allow(dead_code)]

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use serde_json::Value;
use sqlx::SqlitePool;
use tower::ServiceExt;

use trivia_api::config::DatabaseSettings;
use trivia_api::db::queries::{categories, questions};
use trivia_api::db::{establish_connection, run_migrations, NewQuestion, SqliteRepository};
use trivia_api::quiz::StdRandom;
use trivia_api::server::{build_router, AppState};

pub const SCIENCE: i64 = 1;
pub const ART: i64 = 2;
pub const GEOGRAPHY: i64 = 3;
pub const HISTORY: i64 = 4;

const CATEGORIES: [&str; 4] = ["Science", "Art", "Geography", "History"];

const QUESTIONS: [(&str, &str, i64, i64); 13] = [
    ("What is the heaviest organ in the human body?", "The Liver", SCIENCE, 4),
    ("Who discovered penicillin?", "Alexander Fleming", SCIENCE, 3),
    ("Hematology is a branch of medicine involving the study of what?", "Blood", SCIENCE, 4),
    ("What is the chemical symbol for gold?", "Au", SCIENCE, 2),
    ("How many bones are in the adult human body?", "206", SCIENCE, 3),
    ("Which planet is known as the red planet?", "Mars", SCIENCE, 1),
    ("La Giaconda is better known as what?", "Mona Lisa", ART, 3),
    ("How many paintings did Van Gogh sell in his lifetime?", "One", ART, 4),
    ("Which Dutch graphic artist was a creator of optical illusions?", "Escher", ART, 1),
    ("Name the artist who painted The Starry Night", "Van Gogh", ART, 2),
    ("Whose autobiography is entitled 'I Know Why the Caged Bird Sings'?", "Maya Angelou", HISTORY, 2),
    ("Who invented Peanut Butter?", "George Washington Carver", HISTORY, 2),
    ("Which dung beetle was worshipped by the ancient Egyptians?", "Scarab", HISTORY, 4),
];

pub const SCIENCE_IDS: [i64; 6] = [1, 2, 3, 4, 5, 6];
pub const TOTAL_QUESTIONS: usize = QUESTIONS.len();

pub struct TestApp {
    pub router: Router,
    pub pool: SqlitePool,
}

/// App over an empty, migrated in-memory database.
pub async fn spawn_empty_app() -> TestApp {
    let pool = establish_connection(&DatabaseSettings::in_memory())
        .await
        .expect("Failed to open in-memory database");
    run_migrations(&pool)
        .await
        .expect("Failed to migrate database");

    let state = AppState::new(
        Arc::new(SqliteRepository::new(pool.clone())),
        Arc::new(StdRandom::seeded(42)),
    );
    TestApp {
        router: build_router(state),
        pool,
    }
}

/// App with four categories and thirteen questions; Geography has none.
pub async fn spawn_app() -> TestApp {
    let app = spawn_categories_only_app().await;
    for (question, answer, category, difficulty) in QUESTIONS {
        questions::create_question(
            &app.pool,
            &NewQuestion {
                question: question.to_owned(),
                answer: answer.to_owned(),
                category,
                difficulty,
            },
        )
        .await
        .expect("Failed to insert question");
    }
    app
}

pub async fn spawn_categories_only_app() -> TestApp {
    let app = spawn_empty_app().await;
    for kind in CATEGORIES {
        categories::create_category(&app.pool, kind)
            .await
            .expect("Failed to insert category");
    }
    app
}

impl TestApp {
    pub async fn send(&self, request: Request<Body>) -> Response {
        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to execute request.")
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
        json_of(self.send(request).await).await
    }

    pub async fn delete(&self, uri: &str) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(Method::DELETE)
            .uri(uri)
            .body(Body::empty())
            .unwrap();
        json_of(self.send(request).await).await
    }

    pub async fn post(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.post_raw(uri, &body.to_string()).await
    }

    pub async fn post_raw(&self, uri: &str, body: &str) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_owned()))
            .unwrap();
        json_of(self.send(request).await).await
    }
}

pub async fn json_of(response: Response) -> (StatusCode, Value) {
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");
    let json = serde_json::from_slice(&bytes).expect("Failed to read JSON");
    (status, json)
}

pub fn assert_error(status: StatusCode, body: &Value, expected: StatusCode) {
    assert_eq!(status, expected);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], expected.as_u16());
    assert!(body["message"].is_string());
}
