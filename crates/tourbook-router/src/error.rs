//! Router errors.

use thiserror::Error;

/// Errors raised while building a route table or reversing a route.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteError {
    /// A path pattern could not be parsed.
    #[error("invalid route pattern '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },

    /// Two routes were declared with the same name.
    #[error("duplicate route name '{0}'")]
    DuplicateName(String),

    /// No route has the requested name.
    #[error("no route named '{0}'")]
    UnknownName(String),

    /// A placeholder had no value when building a path.
    #[error("missing value for parameter '{param}' of route '{route}'")]
    MissingParam { route: String, param: String },
}
