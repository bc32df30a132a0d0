//! Question paging and quiz question selection.
//!
//! Both operate on plain slices so they can be used without a database.

pub mod pagination;
pub mod random;
pub mod selection;

pub use pagination::{page_window, paginate, QUESTIONS_PER_PAGE};
pub use random::{RandomSource, StdRandom};
pub use selection::select_next_question;
