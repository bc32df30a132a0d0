pub const QUESTIONS_PER_PAGE: usize = 10;

/// Returns the `page`-th window of [`QUESTIONS_PER_PAGE`] items. Pages are 1-based.
pub fn paginate<T>(items: &[T], page: i64) -> &[T] {
    page_window(items, page, QUESTIONS_PER_PAGE)
}

/// Returns `items[(page - 1) * per_page..page * per_page]`, clipped to the slice.
///
/// Pages below 1 or past the end give an empty window instead of an error, the
/// caller decides whether that means "not found".
pub fn page_window<T>(items: &[T], page: i64, per_page: usize) -> &[T] {
    let Some(skipped) = page
        .checked_sub(1)
        .and_then(|p| usize::try_from(p).ok())
        .and_then(|p| p.checked_mul(per_page))
    else {
        return &[];
    };
    if skipped >= items.len() {
        return &[];
    }
    let end = skipped.saturating_add(per_page).min(items.len());
    &items[skipped..end]
}
