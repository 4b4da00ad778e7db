//! Shared validation helpers for inbound HTTP adapters.
//!
//! Every helper returns an `InvalidRequest` error whose `details` name the
//! offending field and a machine-readable code, while `message` stays
//! suitable for display.

use std::str::FromStr;

use pagination::{PageRequest, PageRequestError};
use serde_json::json;

use crate::domain::Error;

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    MissingField,
    InvalidUuid,
    InvalidValue,
    InvalidPagination,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            ErrorCode::MissingField => "missing_field",
            ErrorCode::InvalidUuid => "invalid_uuid",
            ErrorCode::InvalidValue => "invalid_value",
            ErrorCode::InvalidPagination => "invalid_pagination",
        }
    }
}

/// Newtype wrapper for HTTP field names to provide type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    const fn as_str(self) -> &'static str {
        self.0
    }
}

fn field_error(field: FieldName, message: impl Into<String>, code: ErrorCode) -> Error {
    Error::invalid_request(message).with_details(json!({
        "field": field.as_str(),
        "code": code.as_str(),
    }))
}

fn value_error(
    field: FieldName,
    message: impl Into<String>,
    code: ErrorCode,
    value: &str,
) -> Error {
    Error::invalid_request(message).with_details(json!({
        "field": field.as_str(),
        "value": value,
        "code": code.as_str(),
    }))
}

pub(crate) fn missing_field_error(field: FieldName, message: &str) -> Error {
    field_error(field, message, ErrorCode::MissingField)
}

/// Parse a path or form identifier, reporting `message` on failure.
pub(crate) fn parse_id<T: FromStr>(value: &str, field: FieldName, message: &str) -> Result<T, Error> {
    value
        .trim()
        .parse()
        .map_err(|_| value_error(field, message, ErrorCode::InvalidUuid, value))
}

/// Parse an enumerated value such as a visibility or reaction type.
pub(crate) fn parse_value<T: FromStr>(
    value: &str,
    field: FieldName,
    message: &str,
) -> Result<T, Error> {
    value
        .parse()
        .map_err(|_| value_error(field, message, ErrorCode::InvalidValue, value))
}

/// Validate `page` and `limit` query parameters.
pub(crate) fn page_request(page: Option<&str>, limit: Option<&str>) -> Result<PageRequest, Error> {
    PageRequest::from_query(page, limit).map_err(|err| page_error(&err))
}

fn page_error(err: &PageRequestError) -> Error {
    let field = FieldName::new(err.field());
    field_error(field, err.to_string(), ErrorCode::InvalidPagination)
}
