//! Error types for Trellis.
//!
//! Widget operations themselves do not fail: invalid states are prevented by
//! invariant (clamping, discarding, replacing). The errors here cover the few
//! lookups where a caller names an object by id and that object may not be
//! there.

use crate::object::ObjectId;

/// The main error type for Trellis core operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// No object with this id is attached to the canvas.
    #[error("object {0} is not attached to this canvas")]
    ObjectNotFound(ObjectId),

    /// The object exists but cannot receive keyboard focus.
    #[error("object {0} cannot receive keyboard focus")]
    NotFocusable(ObjectId),

    /// The object exists but is not of the requested widget type.
    #[error("object {id} is not a {expected}")]
    WrongType {
        /// The object that was looked up.
        id: ObjectId,
        /// The type name the caller asked for.
        expected: &'static str,
    },
}

/// A specialized Result type for Trellis core operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let id = ObjectId::next();
        let err = Error::NotFocusable(id);
        assert_eq!(err.to_string(), format!("object {id} cannot receive keyboard focus"));

        let err = Error::WrongType { id, expected: "Toolbar" };
        assert!(err.to_string().ends_with("is not a Toolbar"));
    }
}
