//! Runtime-checked duplication
//!
//! `Clone` is a static promise. Generic code that holds "some wrapper" and
//! wants a copy of it can go through [`Duplicate`] instead, which lets a
//! wrapper refuse at runtime. [`OwnedBox`] always refuses while it owns a
//! value, so exclusivity holds even when the static check is bypassed by
//! type erasure.

use log::debug;

use crate::copy::CopyCell;
use crate::error::{OwnershipError, Result};
use crate::owned::OwnedBox;

/// Fallible copy construction.
pub trait Duplicate: Sized {
    /// Produce a copy of `self`, or explain why none can exist.
    fn try_duplicate(&self) -> Result<Self>;
}

impl<T> Duplicate for OwnedBox<T> {
    /// Fails with `CopyNotAllowed` while the box owns a value.
    ///
    /// An empty box owns no storage, so its copy is simply another empty box.
    fn try_duplicate(&self) -> Result<Self> {
        if self.is_empty() {
            return Ok(OwnedBox::empty());
        }
        debug!("refusing to copy non-empty OwnedBox");
        Err(OwnershipError::copy_not_allowed::<T>())
    }
}

impl<T: Clone> Duplicate for CopyCell<T> {
    fn try_duplicate(&self) -> Result<Self> {
        Ok(self.duplicate())
    }
}

/// Duplicate every element of `items`, stopping at the first refusal.
pub fn duplicate_all<D: Duplicate>(items: &[D]) -> Result<Vec<D>> {
    items.iter().map(Duplicate::try_duplicate).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::copy::CopyPolicy;

    #[test]
    fn test_owned_box_refuses_copy() {
        let b = OwnedBox::new(1);
        assert_eq!(
            b.try_duplicate(),
            Err(OwnershipError::CopyNotAllowed { type_name: "i32" })
        );
        assert_eq!(b.get(), Ok(&1));
    }

    #[test]
    fn test_empty_owned_box_copies_to_empty() {
        let b: OwnedBox<i32> = OwnedBox::empty();
        assert!(b.try_duplicate().unwrap().is_empty());
    }

    #[test]
    fn test_copy_cell_duplicates_per_policy() {
        let deep = CopyCell::with_policy(3, CopyPolicy::Deep);
        let shallow = CopyCell::with_policy(3, CopyPolicy::Shallow);

        assert!(!deep.try_duplicate().unwrap().shares_storage_with(&deep));
        assert!(shallow.try_duplicate().unwrap().shares_storage_with(&shallow));
    }

    #[test]
    fn test_duplicate_all_stops_at_owned_value() {
        let boxes = vec![OwnedBox::empty(), OwnedBox::new('a')];
        assert!(matches!(
            duplicate_all(&boxes),
            Err(OwnershipError::CopyNotAllowed { .. })
        ));
    }
}
