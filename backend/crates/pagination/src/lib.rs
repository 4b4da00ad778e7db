//! Page request primitives shared by list endpoints.
//!
//! List endpoints accept a one-based `page` number and a `limit` bounded to
//! [`MAX_LIMIT`]. Both are optional on the wire; [`PageRequest::from_query`]
//! applies the defaults and validates raw query-string values so every adapter
//! reports the same errors.
//!
//! # Examples
//! ```
//! use pagination::PageRequest;
//!
//! let page = PageRequest::from_query(Some("3"), None).expect("valid page");
//! assert_eq!(page.page(), 3);
//! assert_eq!(page.limit(), 10);
//! assert_eq!(page.offset(), 20);
//! ```

use serde::{Deserialize, Serialize};

/// Page number used when the caller does not supply one.
pub const DEFAULT_PAGE: u32 = 1;
/// Page size used when the caller does not supply one.
pub const DEFAULT_LIMIT: u32 = 10;
/// Largest page size a caller may request.
pub const MAX_LIMIT: u32 = 100;

/// Errors raised while validating page parameters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PageRequestError {
    /// `page` was zero or not a number.
    #[error("page must be a positive integer, got {value}")]
    InvalidPage {
        /// Raw value supplied by the caller.
        value: String,
    },
    /// `limit` was outside `1..=MAX_LIMIT` or not a number.
    #[error("limit must be between 1 and {max}, got {value}")]
    InvalidLimit {
        /// Raw value supplied by the caller.
        value: String,
        /// Largest accepted limit.
        max: u32,
    },
}

impl PageRequestError {
    /// Name of the offending query parameter.
    #[must_use]
    pub const fn field(&self) -> &'static str {
        match self {
            Self::InvalidPage { .. } => "page",
            Self::InvalidLimit { .. } => "limit",
        }
    }
}

/// Validated, one-based page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawPageRequest", into = "RawPageRequest")]
pub struct PageRequest {
    page: u32,
    limit: u32,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct RawPageRequest {
    page: u32,
    limit: u32,
}

impl PageRequest {
    /// Validate explicit page and limit values.
    ///
    /// # Errors
    /// Returns [`PageRequestError`] when `page` is zero or `limit` falls
    /// outside `1..=MAX_LIMIT`.
    pub fn new(page: u32, limit: u32) -> Result<Self, PageRequestError> {
        if page == 0 {
            return Err(PageRequestError::InvalidPage {
                value: page.to_string(),
            });
        }
        if limit == 0 || limit > MAX_LIMIT {
            return Err(PageRequestError::InvalidLimit {
                value: limit.to_string(),
                max: MAX_LIMIT,
            });
        }
        Ok(Self { page, limit })
    }

    /// Parse optional raw query-string values, applying defaults for absent
    /// parameters.
    ///
    /// # Errors
    /// Returns [`PageRequestError`] when a value is not a number or is out of
    /// range.
    pub fn from_query(page: Option<&str>, limit: Option<&str>) -> Result<Self, PageRequestError> {
        let page_value = match page.map(str::trim) {
            None | Some("") => DEFAULT_PAGE,
            Some(raw) => raw
                .parse::<u32>()
                .map_err(|_| PageRequestError::InvalidPage {
                    value: raw.to_owned(),
                })?,
        };
        let limit_value = match limit.map(str::trim) {
            None | Some("") => DEFAULT_LIMIT,
            Some(raw) => raw
                .parse::<u32>()
                .map_err(|_| PageRequestError::InvalidLimit {
                    value: raw.to_owned(),
                    max: MAX_LIMIT,
                })?,
        };
        Self::new(page_value, limit_value)
    }

    /// One-based page number.
    #[must_use]
    pub const fn page(self) -> u32 {
        self.page
    }

    /// Maximum number of items on the page.
    #[must_use]
    pub const fn limit(self) -> u32 {
        self.limit
    }

    /// Number of items preceding this page.
    #[must_use]
    pub fn offset(self) -> u64 {
        (u64::from(self.page) - 1) * u64::from(self.limit)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl TryFrom<RawPageRequest> for PageRequest {
    type Error = PageRequestError;

    fn try_from(value: RawPageRequest) -> Result<Self, Self::Error> {
        Self::new(value.page, value.limit)
    }
}

impl From<PageRequest> for RawPageRequest {
    fn from(value: PageRequest) -> Self {
        Self {
            page: value.page,
            limit: value.limit,
        }
    }
}
