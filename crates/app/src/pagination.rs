//! Pagination

use std::num::NonZeroU32;

use thiserror::Error;

pub const DEFAULT_LIMIT: u32 = 10;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PaginationError {
    #[error("limit must be a positive number")]
    ZeroLimit,
}

/// Offset/limit window over an ordered listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    limit: NonZeroU32,
    offset: u32,
}

impl Pagination {
    /// Build a window, applying defaults for absent values.
    ///
    /// # Errors
    ///
    /// Returns [`PaginationError::ZeroLimit`] when `limit` is `Some(0)`.
    pub fn new(limit: Option<u32>, offset: Option<u32>) -> Result<Self, PaginationError> {
        let limit =
            NonZeroU32::new(limit.unwrap_or(DEFAULT_LIMIT)).ok_or(PaginationError::ZeroLimit)?;

        Ok(Self {
            limit,
            offset: offset.unwrap_or_default(),
        })
    }

    #[must_use]
    pub fn limit(&self) -> u32 {
        self.limit.get()
    }

    #[must_use]
    pub fn offset(&self) -> u32 {
        self.offset
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            limit: NonZeroU32::MIN.saturating_add(DEFAULT_LIMIT - 1),
            offset: 0,
        }
    }
}
