use std::collections::HashSet;

use crate::db::Question;

use super::random::RandomSource;

/// Picks a question from `pool` whose id is not in `previous`.
///
/// Returns `None` once every candidate has been served.
pub fn select_next_question<'a>(
    pool: &'a [Question],
    previous: &HashSet<i64>,
    random: &dyn RandomSource,
) -> Option<&'a Question> {
    let remaining: Vec<&Question> = pool
        .iter()
        .filter(|question| !previous.contains(&question.id))
        .collect();
    if remaining.is_empty() {
        return None;
    }
    Some(remaining[random.choose_index(remaining.len())])
}
