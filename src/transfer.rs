//! CSV import and export of the question bank.
//!
//! A bank directory holds `categories.csv` (`id,type`) and `questions.csv`
//! (`id,question,answer,category,difficulty`).

use std::path::Path;

use anyhow::Context;
use serde::de::DeserializeOwned;
use serde::Serialize;
use sqlx::SqlitePool;

use crate::db::queries::categories::{get_all_categories, import_categories};
use crate::db::queries::questions::{get_all_questions, import_questions};
use crate::db::{Category, Question};

pub const CATEGORIES_FILE: &str = "categories.csv";
pub const QUESTIONS_FILE: &str = "questions.csv";

#[derive(Debug, PartialEq, Eq)]
pub struct BankSize {
    pub categories: usize,
    pub questions: usize,
}

pub async fn export_bank(pool: &SqlitePool, dir: &Path) -> anyhow::Result<BankSize> {
    let categories = get_all_categories(pool).await?;
    let questions = get_all_questions(pool).await?;
    std::fs::create_dir_all(dir).with_context(|| format!("Cannot create {}", dir.display()))?;
    write_to(&dir.join(CATEGORIES_FILE), &categories)?;
    write_to(&dir.join(QUESTIONS_FILE), &questions)?;
    Ok(BankSize {
        categories: categories.len(),
        questions: questions.len(),
    })
}

/// Upserts every row by id. Rows already in the database but absent from the
/// files are left alone.
pub async fn import_bank(pool: &SqlitePool, dir: &Path) -> anyhow::Result<BankSize> {
    let categories: Vec<Category> = read_from(&dir.join(CATEGORIES_FILE))?;
    let questions: Vec<Question> = read_from(&dir.join(QUESTIONS_FILE))?;
    let size = BankSize {
        categories: categories.len(),
        questions: questions.len(),
    };
    // questions reference categories, so those go first
    import_categories(pool, categories).await?;
    import_questions(pool, questions).await?;
    Ok(size)
}

fn write_to(path: &Path, data: &[impl Serialize]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_path(path)
        .with_context(|| format!("Cannot create {}", path.display()))?;
    for line in data {
        wtr.serialize(line)?;
    }
    wtr.flush()?;
    Ok(())
}

fn read_from<T: DeserializeOwned>(path: &Path) -> anyhow::Result<Vec<T>> {
    let mut rdr =
        csv::Reader::from_path(path).with_context(|| format!("Cannot open {}", path.display()))?;
    let mut out = Vec::new();
    for record in rdr.deserialize() {
        let record: T = record.with_context(|| format!("Malformed row in {}", path.display()))?;
        out.push(record);
    }
    Ok(out)
}
