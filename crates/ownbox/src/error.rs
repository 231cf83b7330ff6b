//! Error types for ownership operations

use thiserror::Error;

/// Main error type for ownbox operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OwnershipError {
    /// The value of an empty box was accessed
    #[error("Empty access: no value owned by OwnedBox<{type_name}>")]
    EmptyAccess {
        /// Name of the owned type
        type_name: &'static str,
    },

    /// A copy was requested of a value whose ownership is exclusive
    #[error("Copy not allowed: OwnedBox<{type_name}> owns its value exclusively")]
    CopyNotAllowed {
        /// Name of the owned type
        type_name: &'static str,
    },

    /// Storage for a new value could not be allocated
    #[error("Allocation failure: could not allocate {size} bytes for {type_name}")]
    AllocationFailure {
        /// Name of the type being allocated
        type_name: &'static str,
        /// Requested size in bytes
        size: usize,
    },
}

impl OwnershipError {
    /// Build an `EmptyAccess` error for `T`.
    pub fn empty_access<T: ?Sized>() -> Self {
        OwnershipError::EmptyAccess {
            type_name: std::any::type_name::<T>(),
        }
    }

    /// Build a `CopyNotAllowed` error for `T`.
    pub fn copy_not_allowed<T: ?Sized>() -> Self {
        OwnershipError::CopyNotAllowed {
            type_name: std::any::type_name::<T>(),
        }
    }

    /// Build an `AllocationFailure` error for `T`.
    pub fn allocation_failure<T>() -> Self {
        OwnershipError::AllocationFailure {
            type_name: std::any::type_name::<T>(),
            size: std::mem::size_of::<T>(),
        }
    }

    /// Whether the caller can sensibly continue after this error.
    ///
    /// Allocation failure is fatal and must not be retried.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, OwnershipError::AllocationFailure { .. })
    }
}

/// Result type alias for ownbox operations
pub type Result<T> = std::result::Result<T, OwnershipError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_access_names_type() {
        let err = OwnershipError::empty_access::<i32>();
        assert_eq!(err.to_string(), "Empty access: no value owned by OwnedBox<i32>");
    }

    #[test]
    fn test_copy_not_allowed_message() {
        let err = OwnershipError::copy_not_allowed::<u8>();
        assert_eq!(
            err.to_string(),
            "Copy not allowed: OwnedBox<u8> owns its value exclusively"
        );
    }

    #[test]
    fn test_allocation_failure_carries_size() {
        let err = OwnershipError::allocation_failure::<u64>();
        assert_eq!(
            err,
            OwnershipError::AllocationFailure {
                type_name: "u64",
                size: 8
            }
        );
        assert!(!err.is_recoverable());
    }

    #[test]
    fn test_recoverable_errors() {
        assert!(OwnershipError::empty_access::<i32>().is_recoverable());
        assert!(OwnershipError::copy_not_allowed::<i32>().is_recoverable());
    }
}
