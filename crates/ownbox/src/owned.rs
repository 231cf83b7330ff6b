//! Exclusive-ownership box with move-only transfer

mod alloc;

use std::any::type_name;
use std::fmt;

use log::{debug, trace};

use crate::error::{OwnershipError, Result};

/// Exclusive owner of a single heap-allocated `T`, or empty.
///
/// At most one `OwnedBox` owns a given value. There is no `Clone` impl, so a
/// box can only change hands by being moved: either with a plain Rust move,
/// or with [`OwnedBox::move_from`] / [`OwnedBox::take`] when the source must
/// stay usable (and observably empty) afterwards.
///
/// # Example
///
/// ```
/// use ownbox::{OwnedBox, OwnershipError};
///
/// let mut p1 = OwnedBox::new(100);
/// assert_eq!(p1.get(), Ok(&100));
///
/// *p1.get_mut().unwrap() = 200;
/// assert_eq!(p1.get(), Ok(&200));
///
/// let p2 = OwnedBox::move_from(&mut p1);
/// assert!(p1.is_empty());
/// assert_eq!(p2.get(), Ok(&200));
///
/// assert!(matches!(p1.get(), Err(OwnershipError::EmptyAccess { .. })));
/// ```
///
/// Copying a box does not compile:
///
/// ```compile_fail
/// use ownbox::OwnedBox;
///
/// let t1 = OwnedBox::new(100);
/// let t3 = t1.clone();
/// ```
///
/// Neither does using a box after it has been moved away:
///
/// ```compile_fail
/// use ownbox::OwnedBox;
///
/// let t1 = OwnedBox::new(String::from("x"));
/// let t3 = t1;
/// assert!(t1.is_empty());
/// ```
///
/// And a box can never satisfy a `Clone` bound:
///
/// ```compile_fail
/// use ownbox::OwnedBox;
///
/// fn copy_of<T: Clone>(value: &T) -> T {
///     value.clone()
/// }
///
/// let b = OwnedBox::new(1u8);
/// let _ = copy_of(&b);
/// ```
pub struct OwnedBox<T> {
    /// The owned allocation, `None` when empty
    value: Option<Box<T>>,
}

impl<T> OwnedBox<T> {
    // ═══════════════════════════════════════════════════════════════════
    // Construction
    // ═══════════════════════════════════════════════════════════════════

    /// Allocate storage for `value` and take ownership of it.
    ///
    /// Allocation failure aborts the process. Use [`OwnedBox::try_new`] to
    /// observe it as an error instead.
    pub fn new(value: T) -> Self {
        trace!("constructing OwnedBox<{}>", type_name::<T>());
        Self {
            value: Some(Box::new(value)),
        }
    }

    /// Create a box that owns nothing.
    pub const fn empty() -> Self {
        Self { value: None }
    }

    /// Adopt an existing heap allocation.
    pub fn from_box(boxed: Box<T>) -> Self {
        trace!("adopting Box<{}>", type_name::<T>());
        Self { value: Some(boxed) }
    }

    // ═══════════════════════════════════════════════════════════════════
    // Access
    // ═══════════════════════════════════════════════════════════════════

    /// Borrow the owned value.
    ///
    /// Returns `EmptyAccess` if the box is empty.
    pub fn get(&self) -> Result<&T> {
        self.value
            .as_deref()
            .ok_or_else(OwnershipError::empty_access::<T>)
    }

    /// Mutably borrow the owned value.
    ///
    /// Returns `EmptyAccess` if the box is empty.
    pub fn get_mut(&mut self) -> Result<&mut T> {
        self.value
            .as_deref_mut()
            .ok_or_else(OwnershipError::empty_access::<T>)
    }

    /// Check whether the box owns nothing.
    pub fn is_empty(&self) -> bool {
        self.value.is_none()
    }

    /// Address of the owned storage, or `None` if empty.
    ///
    /// Only useful for identity checks: two boxes never report the same
    /// address while both are non-empty.
    pub fn as_ptr(&self) -> Option<*const T> {
        self.value.as_deref().map(|value| value as *const T)
    }

    // ═══════════════════════════════════════════════════════════════════
    // Destruction and Release
    // ═══════════════════════════════════════════════════════════════════

    /// Destroy the owned value, leaving the box empty.
    ///
    /// Does nothing on an empty box.
    pub fn reset(&mut self) {
        if let Some(value) = self.value.take() {
            debug!("reset: destroying owned {}", type_name::<T>());
            drop(value);
        }
    }

    /// Store a new value, returning the previously owned one (if any).
    pub fn replace(&mut self, value: T) -> Option<T> {
        self.value.replace(Box::new(value)).map(|previous| *previous)
    }

    /// Hand the allocation back to the caller without destroying it.
    ///
    /// The box is empty afterwards. Returns `None` if it was already empty.
    pub fn release(&mut self) -> Option<Box<T>> {
        let released = self.value.take();
        if released.is_some() {
            debug!("release: handing out owned {}", type_name::<T>());
        }
        released
    }

    /// Consume the box and return the owned value, if any.
    pub fn into_inner(mut self) -> Option<T> {
        self.value.take().map(|value| *value)
    }

    // ═══════════════════════════════════════════════════════════════════
    // Ownership Transfer
    // ═══════════════════════════════════════════════════════════════════

    /// Build a new box from the contents of `other`, leaving `other` empty.
    pub fn move_from(other: &mut OwnedBox<T>) -> Self {
        trace!("moving OwnedBox<{}>", type_name::<T>());
        Self {
            value: other.value.take(),
        }
    }

    /// Move the contents out into a new box, leaving `self` empty.
    pub fn take(&mut self) -> Self {
        Self::move_from(self)
    }

    /// Move-assign: destroy whatever `self` owns, then take ownership of
    /// `other`'s value. `other` is empty afterwards.
    pub fn assign_from(&mut self, other: &mut OwnedBox<T>) {
        trace!("move-assigning OwnedBox<{}>", type_name::<T>());
        self.value = other.value.take();
    }
}

impl<T> Drop for OwnedBox<T> {
    fn drop(&mut self) {
        if self.value.is_some() {
            trace!("dropping OwnedBox<{}>", type_name::<T>());
        }
    }
}

impl<T> Default for OwnedBox<T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T> From<T> for OwnedBox<T> {
    fn from(value: T) -> Self {
        Self::new(value)
    }
}

impl<T> From<Box<T>> for OwnedBox<T> {
    fn from(boxed: Box<T>) -> Self {
        Self::from_box(boxed)
    }
}

impl<T: PartialEq> PartialEq for OwnedBox<T> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl<T: Eq> Eq for OwnedBox<T> {}

impl<T: fmt::Debug> fmt::Debug for OwnedBox<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.value {
            Some(value) => write!(f, "OwnedBox({:?})", value),
            None => write!(f, "OwnedBox(<empty>)"),
        }
    }
}
