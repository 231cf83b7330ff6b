//! Fallible allocation for `OwnedBox`

use std::any::type_name;

use log::trace;

use super::OwnedBox;
use crate::error::{OwnershipError, Result};

impl<T> OwnedBox<T> {
    /// Like [`OwnedBox::new`], but reports allocation failure as
    /// `AllocationFailure` instead of aborting.
    ///
    /// The error is fatal: callers should propagate it, not retry.
    ///
    /// # Example
    ///
    /// ```
    /// use ownbox::OwnedBox;
    ///
    /// let b = OwnedBox::try_new([0u8; 64]).expect("allocation");
    /// assert_eq!(b.get().map(|bytes| bytes.len()), Ok(64));
    /// ```
    pub fn try_new(value: T) -> Result<Self> {
        trace!("fallible construction of OwnedBox<{}>", type_name::<T>());
        try_box(value).map(Self::from_box)
    }
}

/// Move `value` to the heap, surfacing allocator failure as an error.
fn try_box<T>(value: T) -> Result<Box<T>> {
    let mut slot: Vec<T> = Vec::new();
    slot.try_reserve_exact(1)
        .map_err(|_| OwnershipError::allocation_failure::<T>())?;
    slot.push(value);

    let raw = Box::into_raw(slot.into_boxed_slice()) as *mut T;

    // SAFETY: the slice holds exactly one initialized `T`, and a one-element
    // `[T]` has the same size and alignment as `T`, so the allocation is a
    // valid `Box<T>` allocation from the global allocator.
    Ok(unsafe { Box::from_raw(raw) })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_try_new_holds_value() {
        let b = OwnedBox::try_new(String::from("heap")).unwrap();
        assert_eq!(b.get().map(String::as_str), Ok("heap"));
    }

    #[test]
    fn test_try_new_zero_sized() {
        let b = OwnedBox::try_new(()).unwrap();
        assert!(!b.is_empty());
        assert_eq!(b.into_inner(), Some(()));
    }

    #[test]
    fn test_try_box_large_value() {
        let boxed = try_box([7u64; 512]).unwrap();
        assert!(boxed.iter().all(|&n| n == 7));
    }
}
