//! Error types for BVH construction.
//!
//! Queries never fail; only configuration and geometry buffer expansion do.

use std::fmt;

/// Errors raised while configuring or feeding the BVH builder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BvhError {
    /// A build knob was out of range.
    InvalidConfig(String),
    /// A deserialized node arena does not describe a usable tree.
    InvalidTree(String),
    /// An index buffer referenced a vertex that does not exist.
    IndexOutOfRange { index: u32, vertex_count: usize },
    /// A position or index buffer length was not a multiple of three.
    IncompleteTriangle { len: usize },
}

impl fmt::Display for BvhError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::InvalidConfig(msg) => write!(f, "Invalid BVH config: {msg}"),
            Self::InvalidTree(msg) => write!(f, "Invalid BVH tree: {msg}"),
            Self::IndexOutOfRange {
                index,
                vertex_count,
            } => write!(
                f,
                "Index {index} out of range for geometry with {vertex_count} vertices"
            ),
            Self::IncompleteTriangle { len } => {
                write!(f, "Buffer length {len} is not a multiple of 3")
            }
        }
    }
}

impl std::error::Error for BvhError {}

/// Convenient result alias for fallible BVH operations.
pub type Result<T> = std::result::Result<T, BvhError>;
