//! Storage interface used by the HTTP handlers.
//!
//! Handlers only see [`TriviaRepository`], so the quiz and pagination code never
//! touches sqlx directly.

use async_trait::async_trait;
use sqlx::SqlitePool;

use super::queries::{categories, questions};
use super::{Category, NewQuestion, Question};

#[async_trait]
pub trait TriviaRepository: Send + Sync {
    /// All categories ordered by id.
    async fn list_categories(&self) -> anyhow::Result<Vec<Category>>;

    async fn get_category(&self, id: i64) -> anyhow::Result<Option<Category>>;

    /// First category whose label equals `kind` exactly.
    async fn find_category_by_type(&self, kind: &str) -> anyhow::Result<Option<Category>>;

    /// All questions ordered by id.
    async fn list_questions(&self) -> anyhow::Result<Vec<Question>>;

    async fn filter_by_category(&self, category: i64) -> anyhow::Result<Vec<Question>>;

    /// Case-sensitive substring match on the question text.
    async fn search_questions(&self, term: &str) -> anyhow::Result<Vec<Question>>;

    async fn get_question(&self, id: i64) -> anyhow::Result<Option<Question>>;

    /// Stores the question and returns the id assigned to it.
    async fn insert_question(&self, question: NewQuestion) -> anyhow::Result<i64>;

    /// Returns `false` when there was nothing to delete.
    async fn delete_question(&self, id: i64) -> anyhow::Result<bool>;
}

#[derive(Clone)]
pub struct SqliteRepository {
    pool: SqlitePool,
}

impl SqliteRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TriviaRepository for SqliteRepository {
    async fn list_categories(&self) -> anyhow::Result<Vec<Category>> {
        Ok(categories::get_all_categories(&self.pool).await?)
    }

    async fn get_category(&self, id: i64) -> anyhow::Result<Option<Category>> {
        Ok(categories::get_category(&self.pool, id).await?)
    }

    async fn find_category_by_type(&self, kind: &str) -> anyhow::Result<Option<Category>> {
        Ok(categories::get_category_by_type(&self.pool, kind).await?)
    }

    async fn list_questions(&self) -> anyhow::Result<Vec<Question>> {
        Ok(questions::get_all_questions(&self.pool).await?)
    }

    async fn filter_by_category(&self, category: i64) -> anyhow::Result<Vec<Question>> {
        Ok(questions::get_questions_for_category(&self.pool, category).await?)
    }

    async fn search_questions(&self, term: &str) -> anyhow::Result<Vec<Question>> {
        Ok(questions::search_questions(&self.pool, term).await?)
    }

    async fn get_question(&self, id: i64) -> anyhow::Result<Option<Question>> {
        Ok(questions::get_question_by_id(&self.pool, id).await?)
    }

    async fn insert_question(&self, question: NewQuestion) -> anyhow::Result<i64> {
        Ok(questions::create_question(&self.pool, &question).await?)
    }

    async fn delete_question(&self, id: i64) -> anyhow::Result<bool> {
        Ok(questions::delete_question(&self.pool, id).await? > 0)
    }
}
