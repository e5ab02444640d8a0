//! Page bookkeeping for list screens.

/// Default number of rows per page.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Current page, page size, total count and the rows of the current page.
///
/// Pages are 1-based. The list and total are supplied by the caller after
/// each fetch; this type never talks to the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pagination<T> {
    current_page: u32,
    page_size: u32,
    total: u64,
    list: Vec<T>,
}

impl<T> Pagination<T> {
    /// Creates an empty pagination with the default page size.
    pub fn new() -> Self {
        Self::with_page_size(DEFAULT_PAGE_SIZE)
    }

    /// Creates an empty pagination. A page size of 0 is raised to 1.
    pub fn with_page_size(page_size: u32) -> Self {
        Self {
            current_page: 1,
            page_size: page_size.max(1),
            total: 0,
            list: Vec::new(),
        }
    }

    pub fn current_page(&self) -> u32 {
        self.current_page
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn list(&self) -> &[T] {
        &self.list
    }

    /// Number of pages needed for `total` rows.
    pub fn total_pages(&self) -> u64 {
        self.total.div_ceil(u64::from(self.page_size))
    }

    /// Stores the rows of the current page and the overall row count.
    pub fn set_list(&mut self, list: Vec<T>, total: u64) {
        self.list = list;
        self.total = total;
    }

    /// Back to page 1 with no rows.
    pub fn reset(&mut self) {
        self.current_page = 1;
        self.total = 0;
        self.list.clear();
    }

    pub fn has_next(&self) -> bool {
        u64::from(self.current_page) < self.total_pages()
    }

    pub fn has_prev(&self) -> bool {
        self.current_page > 1
    }

    /// Moves to the next page if there is one.
    pub fn next_page(&mut self) -> bool {
        if !self.has_next() {
            return false;
        }
        self.current_page += 1;
        true
    }

    /// Moves to the previous page if there is one.
    pub fn prev_page(&mut self) -> bool {
        if !self.has_prev() {
            return false;
        }
        self.current_page -= 1;
        true
    }

    /// Jumps to `page`, clamped to `1..=total_pages`.
    pub fn go_to(&mut self, page: u32) {
        let last = u32::try_from(self.total_pages()).unwrap_or(u32::MAX).max(1);
        self.current_page = page.clamp(1, last);
    }

    /// Zero-based index of the first row on the current page.
    pub fn offset(&self) -> u64 {
        u64::from(self.current_page - 1) * u64::from(self.page_size)
    }
}

impl<T> Default for Pagination<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let page: Pagination<i32> = Pagination::default();
        assert_eq!(page.current_page(), 1);
        assert_eq!(page.page_size(), DEFAULT_PAGE_SIZE);
        assert_eq!(page.total(), 0);
        assert_eq!(page.total_pages(), 0);
        assert!(page.list().is_empty());
    }

    #[test]
    fn test_total_pages_rounds_up() {
        let mut page = Pagination::new();
        page.set_list(vec![1, 2, 3], 21);
        assert_eq!(page.total_pages(), 3);

        page.set_list(vec![], 20);
        assert_eq!(page.total_pages(), 2);

        let mut custom = Pagination::<u8>::with_page_size(7);
        custom.set_list(vec![], 1);
        assert_eq!(custom.total_pages(), 1);
    }

    #[test]
    fn test_navigation_stops_at_bounds() {
        let mut page = Pagination::<u8>::new();
        page.set_list(vec![], 25);

        assert!(!page.prev_page());
        assert!(page.next_page());
        assert!(page.next_page());
        assert!(!page.next_page());
        assert_eq!(page.current_page(), 3);
        assert_eq!(page.offset(), 20);

        page.go_to(99);
        assert_eq!(page.current_page(), 3);
        page.go_to(0);
        assert_eq!(page.current_page(), 1);
    }

    #[test]
    fn test_reset() {
        let mut page = Pagination::new();
        page.set_list(vec!["a", "b"], 40);
        page.next_page();

        page.reset();
        assert_eq!(page.current_page(), 1);
        assert_eq!(page.total(), 0);
        assert!(page.list().is_empty());
    }

    #[test]
    fn test_zero_page_size_is_raised() {
        assert_eq!(Pagination::<u8>::with_page_size(0).page_size(), 1);
    }
}
