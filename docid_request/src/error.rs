use thiserror::Error;

use std::error::Error;
use std::fmt::{self, Display, Formatter};

#[derive(Error, Debug)]
pub enum RequestError {
    #[error("invalid `{name}` request")]
    BadRequest {
        name: String,
        violations: Vec<FieldError>,
    },
    #[error(transparent)]
    Field(FieldError),
    #[error("{0}")]
    Domain(DomainErrorBox),
}

pub type RequestResult<T> = Result<T, RequestError>;

#[derive(Debug)]
pub struct FieldError {
    pub field: String,
    pub error: DomainErrorBox,
    pub index: Option<usize>,
}

/// Response status class of a request error.
///
/// Everything except [`ErrorCode::Internal`] maps to a client-facing 4xx
/// response in the surrounding framework.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    InvalidArgument,
    NotFound,
    AlreadyExists,
    PermissionDenied,
    Internal,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommonError {
    #[error("requested entity was not found")]
    ResourceNotFound,
    #[error("unauthorized")]
    Unauthorized,
    #[error("no value provided for required field")]
    RequiredFieldMissing,
    #[error("expected a string in format `{expected}`")]
    InvalidStringFormat { expected: String },
    #[error("invalid ID format")]
    InvalidId,
    #[error("duplicate ID")]
    DuplicateId,
    #[error("failed to convert value")]
    FailedConvertValue,
    #[error("already exists")]
    AlreadyExists,
    #[error("not found")]
    NotFound,
    #[error("type mismatch")]
    TypeMismatch,
}

pub trait DomainError: Error {
    fn as_any(&self) -> &dyn std::any::Any;

    fn code(&self) -> ErrorCode {
        ErrorCode::InvalidArgument
    }
}

pub type DomainErrorBox = Box<dyn DomainError + Send + Sync>;

impl RequestError {
    #[must_use]
    pub fn bad_request<N, V, F, E>(name: N, violations: V) -> Self
    where
        N: Display,
        V: IntoIterator<Item = (F, E)>,
        F: Display,
        E: Into<DomainErrorBox>,
    {
        Self::BadRequest {
            name: name.to_string(),
            violations: violations
                .into_iter()
                .map(|(field, error)| FieldError {
                    field: field.to_string(),
                    error: error.into(),
                    index: None,
                })
                .collect(),
        }
    }

    #[must_use]
    pub fn domain<E: Into<DomainErrorBox>>(error: E) -> Self {
        Self::Domain(error.into())
    }

    #[must_use]
    pub fn field<F, E>(field: F, error: E) -> Self
    where
        F: Display,
        E: Into<DomainErrorBox>,
    {
        FieldError {
            field: field.to_string(),
            error: error.into(),
            index: None,
        }
        .into()
    }

    #[must_use]
    pub fn field_index<F, I, E>(field: F, index: I, error: E) -> Self
    where
        F: Display,
        I: Into<usize>,
        E: Into<DomainErrorBox>,
    {
        FieldError {
            field: field.to_string(),
            error: error.into(),
            index: Some(index.into()),
        }
        .into()
    }

    #[must_use]
    pub fn wrap<F: Display>(self, root_field: F) -> Self {
        match self {
            Self::Field(error) => FieldError {
                field: format!("{}.{}", root_field, error.field),
                ..error
            }
            .into(),
            Self::Domain(error) => Self::field(root_field, error),
            err => err,
        }
    }

    #[must_use]
    pub fn wrap_request<N: Display>(self, name: N) -> Self {
        match self {
            Self::Field(error) => Self::bad_request(name, [(error.field, error.error)]),
            error => error,
        }
    }

    pub fn downcast_domain_ref<T: std::any::Any>(&self) -> Option<&T> {
        if let Self::Domain(error) = self {
            error.as_any().downcast_ref::<T>()
        } else {
            None
        }
    }

    pub fn downcast_domain<T: 'static + Clone>(&self) -> Option<T> {
        if let Self::Domain(error) = self {
            error.as_any().downcast_ref::<T>().cloned()
        } else {
            None
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            Self::BadRequest { .. } => ErrorCode::InvalidArgument,
            Self::Field(error) => error.code(),
            Self::Domain(error) => error.code(),
        }
    }
}

impl FieldError {
    pub fn code(&self) -> ErrorCode {
        self.error.code()
    }
}

impl Error for FieldError {}

impl Display for FieldError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if let Some(index) = self.index {
            write!(
                f,
                "field `{}[{}]` error: `{}`",
                self.field, index, self.error
            )
        } else {
            write!(f, "field `{}` error: `{}`", self.field, self.error)
        }
    }
}

impl From<FieldError> for RequestError {
    fn from(err: FieldError) -> Self {
        RequestError::Field(err)
    }
}

impl DomainError for CommonError {
    fn as_any(&self) -> &dyn std::any::Any {
        self
    }

    fn code(&self) -> ErrorCode {
        match self {
            Self::ResourceNotFound | Self::NotFound => ErrorCode::NotFound,
            Self::AlreadyExists => ErrorCode::AlreadyExists,
            Self::Unauthorized => ErrorCode::PermissionDenied,
            _ => ErrorCode::InvalidArgument,
        }
    }
}

impl<T> From<T> for DomainErrorBox
where
    T: 'static + DomainError + Send + Sync,
{
    fn from(err: T) -> Self {
        Box::new(err)
    }
}

impl<T: 'static + DomainError + Send + Sync> From<T> for RequestError {
    fn from(err: T) -> Self {
        RequestError::Domain(Box::new(err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_works() {
        let err = RequestError::bad_request("Test", [("x", CommonError::InvalidId)]);
        assert_eq!(err.to_string(), "invalid `Test` request");
        assert_eq!(err.code(), ErrorCode::InvalidArgument);

        let err = RequestError::field("id", CommonError::InvalidId);
        assert_eq!(err.to_string(), "field `id` error: `invalid ID format`");

        let err = RequestError::field_index("items", 2usize, CommonError::DuplicateId);
        assert_eq!(err.to_string(), "field `items[2]` error: `duplicate ID`");
    }

    #[test]
    fn wrapping() {
        let err = RequestError::field("id", CommonError::InvalidId).wrap("user");
        assert_eq!(
            err.to_string(),
            "field `user.id` error: `invalid ID format`"
        );

        let err = RequestError::field("id", CommonError::InvalidId).wrap_request("CreateUser");
        assert_eq!(err.to_string(), "invalid `CreateUser` request");
        if let RequestError::BadRequest { violations, .. } = &err {
            assert_eq!(violations.len(), 1);
            assert_eq!(violations[0].field, "id");
        } else {
            panic!("expected bad request, got {err}");
        }
    }

    #[test]
    fn downcasting() {
        let err = RequestError::domain(CommonError::ResourceNotFound);
        assert_eq!(err.code(), ErrorCode::NotFound);
        assert_eq!(
            err.downcast_domain::<CommonError>(),
            Some(CommonError::ResourceNotFound)
        );
        assert!(err.downcast_domain_ref::<ObjectIdErrorStub>().is_none());
    }

    #[derive(Error, Debug, Clone, PartialEq, Eq)]
    #[error("stub")]
    struct ObjectIdErrorStub;

    impl DomainError for ObjectIdErrorStub {
        fn as_any(&self) -> &dyn std::any::Any {
            self
        }
    }
}
