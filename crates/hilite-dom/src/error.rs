//! DOM operation errors

use crate::NodeId;

/// Result type for DOM operations
pub type DomResult<T> = Result<T, DomError>;

/// DOM operation errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomError {
    /// Node not found
    #[error("Node {0:?} not found")]
    NotFound(NodeId),
    /// Hierarchy error (e.g., inserting an ancestor into its descendant)
    #[error("Hierarchy request error")]
    HierarchyRequest,
    /// Invalid node type for the operation
    #[error("Invalid node type")]
    InvalidNodeType,
    /// Node is not a child of the given parent
    #[error("Node is not a child")]
    NotAChild,
    /// Offset past the end of the node
    #[error("Offset {offset} out of bounds for node of length {length}")]
    IndexSize { offset: u32, length: u32 },
    /// Boundary points live in different trees
    #[error("Wrong document")]
    WrongDocument,
    /// Scope cannot be introspected (cross-origin frame)
    #[error("Blocked a frame from accessing a cross-origin document")]
    Security,
}
