//! Pagination for the service layer.
//!
//! Callers speak 1-indexed pages; the storage boundary is 0-indexed. The
//! translation happens in exactly one place, `Pagination::normalize`.

use serde::Serialize;

/// Caller-facing pagination parameters (1-based page index).
#[derive(Clone, Copy, Debug)]
pub struct Pagination {
    pub page: u64,
    pub page_size: u64,
}

impl Pagination {
    /// Convert to a 0-indexed storage page. Page 0 is treated as page 1;
    /// a zero page size becomes 1.
    pub fn normalize(self) -> (u64, u64) {
        let page = if self.page == 0 { 1 } else { self.page };
        let page_size = self.page_size.max(1);
        (page - 1, page_size)
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self { page: 1, page_size: 20 }
    }
}

/// One bounded slice of a collection plus totals, in the shape the HTTP
/// surface serializes. `page` echoes the 1-indexed page the caller asked
/// for.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub content: Vec<T>,
    pub page: u64,
    pub page_size: u64,
    pub total_elements: u64,
    pub total_pages: u64,
}

impl<T> Page<T> {
    /// Build from a 0-indexed storage page. This is the only place that
    /// maps the storage index back to the caller-facing `page`.
    pub fn from_zero_indexed(
        content: Vec<T>,
        page: u64,
        page_size: u64,
        total_elements: u64,
        total_pages: u64,
    ) -> Self {
        Self { content, page: page + 1, page_size, total_elements, total_pages }
    }
}

#[cfg(test)]
mod tests {
    use super::Pagination;

    #[test]
    fn normalize_translates_one_indexed_to_zero_indexed() {
        let (idx, size) = Pagination { page: 1, page_size: 2 }.normalize();
        assert_eq!(idx, 0);
        assert_eq!(size, 2);
        let (idx, _) = Pagination { page: 5, page_size: 10 }.normalize();
        assert_eq!(idx, 4);
    }

    #[test]
    fn normalize_clamps_zero_inputs() {
        let (idx, size) = Pagination { page: 0, page_size: 0 }.normalize();
        assert_eq!(idx, 0);
        assert_eq!(size, 1);
    }

    #[test]
    fn page_echoes_one_indexed_caller_page() {
        let page = super::Page::from_zero_indexed(vec![1, 2], 0, 2, 3, 2);
        assert_eq!(page.page, 1);
        let page = super::Page::<i32>::from_zero_indexed(vec![], 4, 10, 0, 0);
        assert_eq!(page.page, 5);
    }

    #[test]
    fn default_values_are_sane() {
        let d = Pagination::default();
        assert_eq!(d.page, 1);
        assert_eq!(d.page_size, 20);
    }
}
