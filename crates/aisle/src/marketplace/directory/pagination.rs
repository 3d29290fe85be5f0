/// One page of a filtered result set.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: usize,
    pub per_page: usize,
    pub total_items: usize,
    pub total_pages: usize,
}

/// Slice `items` into the requested page.
///
/// The page number is clamped into `[1, total_pages]`, so out-of-range
/// requests (zero, negative, or past the end) come back as the nearest valid
/// page instead of an error. An empty input still reports one empty page, and
/// a `per_page` of zero is treated as one.
pub fn paginate<T: Clone>(items: &[T], requested_page: i64, per_page: usize) -> Page<T> {
    let per_page = per_page.max(1);
    let total_items = items.len();
    let total_pages = total_items.div_ceil(per_page).max(1);
    let page = requested_page.clamp(1, total_pages as i64) as usize;

    let start = (page - 1) * per_page;
    let end = (start + per_page).min(total_items);

    Page {
        items: items[start..end].to_vec(),
        page,
        per_page,
        total_items,
        total_pages,
    }
}
