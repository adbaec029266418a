//! Offset pagination window for list endpoints.
//!
//! The storage collaborator exposes `skip`/`limit` cursors, so pagination is
//! plain offset windows rather than opaque cursors.

/// One-based page request clamped to sane bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    page: u64,
    limit: u64,
}

impl Page {
    /// Default page size when the client does not specify one.
    pub const DEFAULT_LIMIT: u64 = 20;
    /// Largest permitted page size.
    pub const MAX_LIMIT: u64 = 100;

    /// Build a page window; a zero page becomes 1 and the limit is clamped
    /// to `1..=MAX_LIMIT`.
    pub fn new(page: u64, limit: u64) -> Self {
        Self {
            page: page.max(1),
            limit: limit.clamp(1, Self::MAX_LIMIT),
        }
    }

    /// Number of documents to skip.
    pub fn offset(self) -> u64 {
        (self.page - 1) * self.limit
    }

    /// Number of documents to return.
    pub fn limit(self) -> u64 {
        self.limit
    }

    /// One-based page index.
    pub fn number(self) -> u64 {
        self.page
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::new(1, Self::DEFAULT_LIMIT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0, 20, 0)]
    #[case(1, 20, 0)]
    #[case(3, 10, 20)]
    fn offset_is_zero_based(#[case] page: u64, #[case] limit: u64, #[case] expected: u64) {
        assert_eq!(Page::new(page, limit).offset(), expected);
    }

    #[rstest]
    #[case(0, 1)]
    #[case(50, 50)]
    #[case(1000, Page::MAX_LIMIT)]
    fn limit_is_clamped(#[case] requested: u64, #[case] expected: u64) {
        assert_eq!(Page::new(1, requested).limit(), expected);
    }
}
