//! Error types for Casement.

use thiserror::Error;

use crate::id::ElementId;

/// Result type for toolkit operations.
pub type Result<T> = std::result::Result<T, ToolkitError>;

/// The main error type for Casement operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ToolkitError {
    /// The element ID does not refer to a live element.
    #[error("invalid element id: {0:?}")]
    InvalidElementId(ElementId),

    /// The element is executing one of its own methods and cannot be borrowed again.
    #[error("element {0:?} is in use")]
    ElementInUse(ElementId),

    /// The element is not of the requested concrete type.
    #[error("type mismatch: expected {expected}")]
    TypeMismatch {
        /// Name of the type that was requested.
        expected: &'static str,
    },

    /// A caller broke one of the tree's preconditions.
    #[error("precondition violated: {0}")]
    Precondition(#[from] PreconditionViolation),

    /// A style document could not be parsed.
    #[error("style error: {0}")]
    Style(String),
}

/// Programmer errors detected by the element tree and widgets.
///
/// These are never produced by valid input sequences; they indicate a
/// collaborator used the API incorrectly.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreconditionViolation {
    /// The element already belongs to a container.
    #[error("element already has a parent")]
    AlreadyParented,
    /// The element is not a child of the given container.
    #[error("element is not a child of this container")]
    NotAChild,
    /// The target element cannot hold children.
    #[error("element is not a container")]
    NotAContainer,
    /// The sibling named in an insert-before is not a child of the container.
    #[error("reference sibling is not a child of this container")]
    ReferenceNotAChild,
    /// A button's released and pressed images differ in size.
    #[error("button images must have equal dimensions")]
    MismatchedButtonImages,
    /// An element cannot be added to itself or to one of its descendants.
    #[error("element cannot be inserted beneath itself")]
    SelfInsertion,
}
