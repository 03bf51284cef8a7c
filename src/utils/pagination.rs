use serde::Serialize;

/// One page of a listing, with the requested page number already clamped
/// into `1..=num_pages`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageInfo {
    pub number: u64,
    pub per_page: u64,
    pub total: u64,
    pub num_pages: u64,
}

impl PageInfo {
    /// Non-numeric or missing pages go to the first page. Any out-of-range
    /// number, below 1 included, goes to the last page. An empty listing
    /// still has one page.
    pub fn resolve(raw_page: Option<&str>, per_page: u64, total: u64) -> Self {
        let per_page = per_page.max(1);
        let num_pages = total.div_ceil(per_page).max(1);
        let number = match raw_page.map(str::trim).map(str::parse::<i64>) {
            Some(Ok(n)) if n < 1 => num_pages,
            Some(Ok(n)) => (n as u64).min(num_pages),
            _ => 1,
        };
        Self {
            number,
            per_page,
            total,
            num_pages,
        }
    }

    pub fn offset(&self) -> u64 {
        (self.number - 1) * self.per_page
    }

    pub fn limit(&self) -> u64 {
        self.per_page
    }

    pub fn has_previous(&self) -> bool {
        self.number > 1
    }

    pub fn has_next(&self) -> bool {
        self.number < self.num_pages
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_in_range() {
        let page = PageInfo::resolve(Some("2"), 5, 12);
        assert_eq!(page.number, 2);
        assert_eq!(page.num_pages, 3);
        assert_eq!(page.offset(), 5);
        assert_eq!(page.limit(), 5);
        assert!(page.has_previous());
        assert!(page.has_next());
    }

    #[test]
    fn test_page_clamping() {
        assert_eq!(PageInfo::resolve(Some("99"), 5, 12).number, 3);
        assert_eq!(PageInfo::resolve(Some("0"), 5, 12).number, 3);
        assert_eq!(PageInfo::resolve(Some("-3"), 5, 12).number, 3);
        assert_eq!(PageInfo::resolve(Some("2.5"), 5, 12).number, 1);
        assert_eq!(PageInfo::resolve(Some("abc"), 5, 12).number, 1);
        assert_eq!(PageInfo::resolve(None, 5, 12).number, 1);
    }

    #[test]
    fn test_empty_listing_has_one_page() {
        let page = PageInfo::resolve(Some("4"), 10, 0);
        assert_eq!(page.number, 1);
        assert_eq!(page.num_pages, 1);
        assert!(!page.has_next());
    }
}
