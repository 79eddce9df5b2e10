use serde::Serialize;

///
/// ResultPage
///
/// Paginated response envelope.
///
/// Invariants:
/// - `total_pages == ceil(total / page_size)`
/// - `items.len() <= page_size`
/// - a page beyond the last yields empty `items` with the true `total`,
///   never an error
///

#[derive(Clone, Debug, Serialize)]
pub struct ResultPage<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub page: u32,
    pub page_size: u32,
    pub total_pages: u64,
}

impl<T> ResultPage<T> {
    #[must_use]
    pub fn new(items: Vec<T>, total: u64, page: u32, page_size: u32) -> Self {
        debug_assert!(page_size > 0, "page_size is validated before execution");
        let total_pages = total.div_ceil(u64::from(page_size.max(1)));

        Self {
            items,
            total,
            page,
            page_size,
            total_pages,
        }
    }

    /// Reshape items while preserving the page metadata.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> ResultPage<U> {
        ResultPage {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            page: self.page,
            page_size: self.page_size,
            total_pages: self.total_pages,
        }
    }
}

///
/// TESTS
///
