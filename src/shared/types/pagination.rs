/// Offset-based page request (1-based index)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u64,
    pub page_size: u64,
}

impl PageRequest {
    /// SQL drivers bind `OFFSET`/`LIMIT` as signed 64-bit integers.
    pub const MAX_ROWS: u64 = i64::MAX as u64;

    pub fn new(page: u64, page_size: u64) -> Self {
        Self { page, page_size }
    }

    /// Number of records skipped before this page starts.
    pub fn offset(&self) -> u64 {
        self.page
            .saturating_sub(1)
            .saturating_mul(self.page_size)
            .min(Self::MAX_ROWS)
    }

    /// Page size, capped at [`Self::MAX_ROWS`].
    pub fn limit(&self) -> u64 {
        self.page_size.min(Self::MAX_ROWS)
    }
}

/// Paginated response wrapper
#[derive(Debug)]
pub struct PaginatedResult<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub page: u64,
    pub page_size: u64,
    pub total_pages: u64,
}

impl<T> PaginatedResult<T> {
    pub fn new(items: Vec<T>, total: u64, page: u64, page_size: u64) -> Self {
        let total_pages = if page_size == 0 {
            0
        } else {
            total.div_ceil(page_size)
        };
        Self {
            items,
            total,
            page,
            page_size,
            total_pages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_pages_rounds_up() {
        let page = PaginatedResult::new(vec![1, 2, 3], 21, 1, 10);
        assert_eq!(page.total_pages, 3);

        let exact = PaginatedResult::<u8>::new(vec![], 20, 3, 10);
        assert_eq!(exact.total_pages, 2);

        let empty = PaginatedResult::<u8>::new(vec![], 0, 1, 10);
        assert_eq!(empty.total_pages, 0);
    }

    #[test]
    fn offset_starts_at_zero_for_first_page() {
        assert_eq!(PageRequest::new(1, 25).offset(), 0);
        assert_eq!(PageRequest::new(3, 25).offset(), 50);
    }

    #[test]
    fn huge_requests_stay_within_signed_range() {
        assert_eq!(PageRequest::new(u64::MAX, 10).offset(), PageRequest::MAX_ROWS);
        assert_eq!(PageRequest::new(1, u64::MAX).limit(), PageRequest::MAX_ROWS);
        assert_eq!(PageRequest::new(1, u64::MAX).offset(), 0);
    }
}
