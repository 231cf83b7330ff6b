//! # ownbox
//!
//! Ownership primitives with the copy rules written down in the types.
//!
//! An [`OwnedBox`] holds one heap-allocated value and is its only owner. It
//! cannot be copied, only moved, and it destroys its value exactly once:
//! when reset, or when the box itself goes away while still owning it.
//!
//! ## Architecture
//!
//! - **OwnedBox**: exclusive, move-only ownership of a single value
//! - **CopyCell**: a copyable holder with an explicit deep or shallow policy
//! - **Duplicate**: runtime-checked copying for generic code
//! - **AtomicOwnedBox**: ownership handoff between threads by atomic swap
//!
//! ## Example
//!
//! ```
//! use ownbox::{OwnedBox, OwnershipError};
//!
//! let mut b = OwnedBox::new(42);
//! assert_eq!(b.get(), Ok(&42));
//!
//! b.reset();
//! assert!(b.is_empty());
//! assert!(matches!(b.get(), Err(OwnershipError::EmptyAccess { .. })));
//! ```
//!
//! ## Logging
//!
//! Lifecycle events are reported through the `log` facade. Nothing is
//! printed unless the application installs a logger.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod copy;
pub mod duplicate;
pub mod error;
pub mod handoff;
pub mod owned;

#[cfg(feature = "serde")]
mod serde_impls;

// Re-export main types
pub use copy::{CopyCell, CopyPolicy};
pub use duplicate::{duplicate_all, Duplicate};
pub use error::{OwnershipError, Result};
pub use handoff::AtomicOwnedBox;
pub use owned::OwnedBox;

/// ownbox version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
