//! Result type alias

use crate::error::CamlError;

/// Standard Result type for query construction and rendering
pub type CamlResult<T> = Result<T, CamlError>;
