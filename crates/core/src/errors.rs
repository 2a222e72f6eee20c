use thiserror::Error;

use crate::catalog::CatalogError;
use crate::config::ConfigError;
use crate::quiz::QuizError;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum DomainError {
    #[error(transparent)]
    Quiz(#[from] QuizError),
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ApplicationError {
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error("invalid request: {0}")]
    InvalidRequest(String),
    #[error("catalog unavailable: {0}")]
    Catalog(String),
    #[error("configuration failure: {0}")]
    Configuration(String),
}

impl From<QuizError> for ApplicationError {
    fn from(value: QuizError) -> Self {
        Self::Domain(DomainError::Quiz(value))
    }
}

impl From<CatalogError> for ApplicationError {
    fn from(value: CatalogError) -> Self {
        match value {
            CatalogError::InvalidPage { .. } => Self::InvalidRequest(value.to_string()),
            CatalogError::ReadFile { .. } | CatalogError::Parse(_) | CatalogError::UnexpectedShape => {
                Self::Catalog(value.to_string())
            }
        }
    }
}

impl From<ConfigError> for ApplicationError {
    fn from(value: ConfigError) -> Self {
        Self::Configuration(value.to_string())
    }
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum InterfaceError {
    #[error("bad request: {message}")]
    BadRequest { message: String, correlation_id: String },
    #[error("service unavailable: {message}")]
    ServiceUnavailable { message: String, correlation_id: String },
    #[error("internal error: {message}")]
    Internal { message: String, correlation_id: String },
}

impl InterfaceError {
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::BadRequest { .. } => {
                "The request could not be processed. Check your answers and try again."
            }
            Self::ServiceUnavailable { .. } => {
                "The product catalog is temporarily unavailable. Please retry shortly."
            }
            Self::Internal { .. } => "An unexpected internal error occurred.",
        }
    }

    /// Validation detail that is safe to echo back. Only bad requests carry
    /// one; the other variants may mention file paths or internals.
    pub fn detail(&self) -> Option<&str> {
        match self {
            Self::BadRequest { message, .. } => Some(message.as_str()),
            Self::ServiceUnavailable { .. } | Self::Internal { .. } => None,
        }
    }

    /// Short machine-readable class used in command envelopes.
    pub fn error_class(&self) -> &'static str {
        match self {
            Self::BadRequest { .. } => "invalid_input",
            Self::ServiceUnavailable { .. } => "catalog_unavailable",
            Self::Internal { .. } => "internal",
        }
    }
}

impl ApplicationError {
    pub fn into_interface(self, correlation_id: impl Into<String>) -> InterfaceError {
        let correlation_id = correlation_id.into();
        let mut mapped = InterfaceError::from(self);
        match &mut mapped {
            InterfaceError::BadRequest { correlation_id: id, .. }
            | InterfaceError::ServiceUnavailable { correlation_id: id, .. }
            | InterfaceError::Internal { correlation_id: id, .. } => *id = correlation_id,
        }
        mapped
    }
}

impl From<ApplicationError> for InterfaceError {
    fn from(value: ApplicationError) -> Self {
        match value {
            ApplicationError::Domain(domain) => Self::BadRequest {
                message: domain.to_string(),
                correlation_id: "unassigned".to_owned(),
            },
            ApplicationError::InvalidRequest(message) => {
                Self::BadRequest { message, correlation_id: "unassigned".to_owned() }
            }
            ApplicationError::Catalog(message) => {
                Self::ServiceUnavailable { message, correlation_id: "unassigned".to_owned() }
            }
            ApplicationError::Configuration(message) => {
                Self::Internal { message, correlation_id: "unassigned".to_owned() }
            }
        }
    }
}
