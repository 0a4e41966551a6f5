//! # Error Handling
//!
//! Translation either produces the whole filter or fails; there is no partial
//! result. Callers decide whether an error is a client-input problem (for an
//! HTTP API usually `400 Bad Request`) or a programming error such as a
//! mistyped tag caught in tests.
//!
//! ```rust,ignore
//! use structquery::{Queryer, QueryError};
//!
//! match queryer.and(&query) {
//!     Ok(condition) => select.filter(condition),
//!     Err(QueryError::BadQueryType(token)) => panic!("unknown operator {token}"),
//!     Err(err) => return Err(ApiError::bad_request(err.to_string())),
//! }
//! ```

use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T, E = QueryError> = std::result::Result<T, E>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    /// The value handed to the queryer does not resolve to a struct: a scalar,
    /// a string, or a `None` where a pointer to a struct was expected.
    #[error("structquery: query must be a struct or a pointer to struct")]
    BadQueryValue,

    /// A field's operator token has no registered function.
    #[error("structquery: query type not registered: {0:?}")]
    BadQueryType(String),

    /// A struct embeds itself through an empty-operator flattened field,
    /// which would make its schema infinite.
    #[error("structquery: `{type_name}` embeds itself through `{path}`")]
    RecursiveEmbedding {
        type_name: &'static str,
        path: String,
    },
}

impl QueryError {
    #[must_use]
    pub const fn is_bad_query_value(&self) -> bool {
        matches!(self, Self::BadQueryValue)
    }

    #[must_use]
    pub const fn is_bad_query_type(&self) -> bool {
        matches!(self, Self::BadQueryType(_))
    }

    /// The offending operator token of a [`QueryError::BadQueryType`].
    #[must_use]
    pub fn operator(&self) -> Option<&str> {
        match self {
            Self::BadQueryType(token) => Some(token),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_problem() {
        let err = QueryError::BadQueryType("not_exist".into());
        assert_eq!(
            err.to_string(),
            "structquery: query type not registered: \"not_exist\""
        );
        assert!(err.is_bad_query_type());
        assert_eq!(err.operator(), Some("not_exist"));

        let err = QueryError::BadQueryValue;
        assert!(err.is_bad_query_value());
        assert_eq!(err.operator(), None);

        let err = QueryError::RecursiveEmbedding {
            type_name: "Node",
            path: "parent".into(),
        };
        assert_eq!(err.to_string(), "structquery: `Node` embeds itself through `parent`");
    }
}
