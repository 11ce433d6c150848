use std::borrow::Cow;

use diy_core::error::CatalogError;
use rmcp::ErrorData;
use rmcp::model::ErrorCode;

pub(crate) fn mcp_err(code: ErrorCode, message: impl Into<Cow<'static, str>>) -> ErrorData {
    ErrorData {
        code,
        message: message.into(),
        data: None,
    }
}

pub(crate) fn invalid_params(message: impl Into<Cow<'static, str>>) -> ErrorData {
    mcp_err(ErrorCode::INVALID_PARAMS, message)
}

/// Maps supplier failures to MCP errors. Unknown products are answered as
/// text by the tools and only reach here when a caller chose to propagate.
pub(crate) fn map_catalog_err(err: CatalogError) -> ErrorData {
    match err {
        CatalogError::NotFound(id) => mcp_err(
            ErrorCode::RESOURCE_NOT_FOUND,
            format!("product not found: {id}"),
        ),
        err @ CatalogError::SourceFailed { .. } => {
            mcp_err(ErrorCode::INTERNAL_ERROR, err.to_string())
        }
    }
}

/// Accepts finite values of zero or more.
pub(crate) fn non_negative(name: &str, value: f64) -> Result<f64, ErrorData> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(invalid_params(format!(
            "{name} must be a finite number of zero or more, got {value}"
        )))
    }
}

/// Accepts finite values above zero. Used for divisors.
pub(crate) fn positive(name: &str, value: f64) -> Result<f64, ErrorData> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(invalid_params(format!(
            "{name} must be a finite number greater than zero, got {value}"
        )))
    }
}

pub(crate) fn optional_non_negative(name: &str, value: Option<f64>) -> Result<Option<f64>, ErrorData> {
    value.map(|value| non_negative(name, value)).transpose()
}
