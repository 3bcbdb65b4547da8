//! Field adapter between wire-format tokens and object ID values.

use docid_common::object_id::{ObjectId, ObjectIdError};

use crate::{
    error::{CommonError, RequestError, RequestResult},
    value::Value,
};

/// Adapter converting object ID values to and from their textual form for
/// request handling.
///
/// The adapter holds no state between calls; `parse` and `render` are
/// independent, reentrant conversions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectIdField {
    name: String,
}

impl ObjectIdField {
    /// Creates an adapter reporting violations under the given field name.
    pub fn new<N: Into<String>>(name: N) -> Self {
        Self { name: name.into() }
    }

    /// The field name reported in request violations.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Parses a textual token into an object ID.
    ///
    /// # Errors
    ///
    /// A token that is not a 24-character hexadecimal string fails with a
    /// [`CommonError::InvalidId`] field violation, suitable for a
    /// client-facing bad-request response.
    pub fn parse(&self, token: &str) -> RequestResult<ObjectId> {
        token
            .parse::<ObjectId>()
            .map_err(|_| RequestError::field(&self.name, CommonError::InvalidId))
    }

    /// Renders an object ID value into its canonical textual form.
    ///
    /// `render` expects a genuine object ID value. Any other value fails
    /// with the driver-level [`ObjectIdError::InvalidIdentifier`] rather
    /// than a request violation; the failure is not translated into a
    /// [`RequestError`].
    ///
    /// # Errors
    ///
    /// Fails if the value is not an object ID.
    pub fn render(&self, value: &Value) -> Result<String, ObjectIdError> {
        match value {
            Value::Id(id) => Ok(id.to_string()),
            _ => Err(ObjectIdError::InvalidIdentifier),
        }
    }
}

impl Default for ObjectIdField {
    fn default() -> Self {
        Self::new("id")
    }
}
