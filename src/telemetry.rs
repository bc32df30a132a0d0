use prometheus::{register_int_counter_vec, IntCounterVec};
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use lazy_static::lazy_static;

/// Used when `LOG_LEVEL` is unset or not a valid directive. sqlx logs every
/// statement at info, which drowns the request traces.
pub const DEFAULT_LOG_FILTER: &str = "info,sqlx=warn";

lazy_static! {
    pub static ref QUIZ_QUESTIONS_SERVED: IntCounterVec = register_int_counter_vec!(
        "quiz_questions_served_total",
        "Number of questions served to quiz sessions",
        &["category"]
    )
    .unwrap();
    pub static ref QUIZ_POOLS_EXHAUSTED: IntCounterVec = register_int_counter_vec!(
        "quiz_pools_exhausted_total",
        "Number of quiz requests with no question left to serve",
        &["category"]
    )
    .unwrap();
}

/// Counts one `/quizzes` answer under the category label (or "all").
pub fn record_quiz_pick(category: &str, served: Option<i64>) {
    match served {
        Some(question_id) => {
            tracing::debug!(question_id, category, "Serving quiz question");
            QUIZ_QUESTIONS_SERVED.with_label_values(&[category]).inc();
        }
        None => {
            tracing::debug!(category, "Quiz pool exhausted");
            QUIZ_POOLS_EXHAUSTED.with_label_values(&[category]).inc();
        }
    }
}

fn filter_from_env() -> EnvFilter {
    EnvFilter::try_from_env("LOG_LEVEL").unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER))
}

pub fn init_tracing() {
    let span_events = std::env::var("INCLUDE_SPAN_EVENTS")
        .is_ok_and(|value| value.eq_ignore_ascii_case("true"));
    let fmt_layer = fmt::layer().with_target(true).with_span_events(if span_events {
        FmtSpan::ENTER | FmtSpan::EXIT
    } else {
        FmtSpan::NONE
    });

    tracing_subscriber::registry()
        .with(filter_from_env())
        .with(fmt_layer)
        .init();
}
