//! Value holders with an explicit deep or shallow copy policy
//!
//! Unlike [`OwnedBox`](crate::OwnedBox), a [`CopyCell`] can be copied. How
//! the copy relates to the original is decided by its [`CopyPolicy`]:
//!
//! - **Deep** (the default): the copy gets its own storage and a clone of
//!   the value. Mutating one never affects the other.
//! - **Shallow**: the copy shares the original's storage. Mutation through
//!   either is visible through both. Storage is reference counted, so
//!   dropping one copy never invalidates the other, but the aliasing is
//!   usually a bug and is logged at `warn` level every time it happens.
//!
//! The storage lock is only held for the duration of a clone or a store,
//! never while caller code runs, so working with several aliases of one
//! cell at once cannot block. Concurrent `update`s through aliases are
//! last-writer-wins.

use std::any::type_name;
use std::sync::{Arc, PoisonError, RwLock};

use log::{trace, warn};

/// How a [`CopyCell`] behaves when copied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CopyPolicy {
    /// Copies allocate independent storage holding a clone of the value.
    #[default]
    Deep,

    /// Copies alias the same storage. Must be opted into explicitly.
    Shallow,
}

impl CopyPolicy {
    /// Whether copies made under this policy alias their source.
    pub fn aliases(self) -> bool {
        matches!(self, CopyPolicy::Shallow)
    }
}

/// A shareable value holder whose copies follow a [`CopyPolicy`].
///
/// # Example
///
/// ```
/// use ownbox::CopyCell;
///
/// let deep = CopyCell::new(100);
/// let copy = deep.duplicate();
/// copy.set(1000);
/// assert_eq!(deep.get(), 100);
///
/// let shallow = CopyCell::shallow(100);
/// let alias = shallow.duplicate();
/// alias.set(1000);
/// assert_eq!(shallow.get(), 1000);
/// assert!(shallow.shares_storage_with(&alias));
/// ```
#[derive(Debug)]
pub struct CopyCell<T> {
    /// Storage, shared only between shallow copies
    storage: Arc<RwLock<T>>,

    /// Policy applied when this cell is copied
    policy: CopyPolicy,
}

impl<T> CopyCell<T> {
    /// Create a cell with the default (deep) copy policy.
    pub fn new(value: T) -> Self {
        Self::with_policy(value, CopyPolicy::default())
    }

    /// Create a cell whose copies alias its storage.
    pub fn shallow(value: T) -> Self {
        Self::with_policy(value, CopyPolicy::Shallow)
    }

    /// Create a cell with an explicit copy policy.
    pub fn with_policy(value: T, policy: CopyPolicy) -> Self {
        trace!("constructing CopyCell<{}> ({:?})", type_name::<T>(), policy);
        Self {
            storage: Arc::new(RwLock::new(value)),
            policy,
        }
    }

    /// The copy policy of this cell.
    pub fn policy(&self) -> CopyPolicy {
        self.policy
    }

    /// Replace the stored value.
    ///
    /// The previous value is dropped after the lock is released.
    pub fn set(&self, value: T) {
        let previous = {
            let mut guard = self.storage.write().unwrap_or_else(PoisonError::into_inner);
            std::mem::replace(&mut *guard, value)
        };
        drop(previous);
    }

    /// Whether `self` and `other` read and write the same storage.
    pub fn shares_storage_with(&self, other: &CopyCell<T>) -> bool {
        Arc::ptr_eq(&self.storage, &other.storage)
    }

    /// Number of cells (including this one) sharing this storage.
    pub fn alias_count(&self) -> usize {
        Arc::strong_count(&self.storage)
    }

    /// Whether any other cell shares this storage.
    pub fn is_aliased(&self) -> bool {
        self.alias_count() > 1
    }
}

impl<T: Clone> CopyCell<T> {
    /// Read a copy of the stored value.
    pub fn get(&self) -> T {
        self.storage
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Run `f` with a snapshot of the stored value.
    ///
    /// No lock is held while `f` runs, so `f` may freely read or write
    /// shallow aliases of this cell.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        let snapshot = self.get();
        f(&snapshot)
    }

    /// Apply `f` to a snapshot of the stored value, then store the result.
    ///
    /// No lock is held while `f` runs. If `f` writes through a shallow alias
    /// of this cell, the value stored by `update` replaces that write.
    pub fn update<R>(&self, f: impl FnOnce(&mut T) -> R) -> R {
        let mut snapshot = self.get();
        let result = f(&mut snapshot);
        self.set(snapshot);
        result
    }

    /// Copy this cell according to its policy.
    pub fn duplicate(&self) -> Self {
        match self.policy {
            CopyPolicy::Deep => {
                trace!("deep copy of CopyCell<{}>", type_name::<T>());
                Self {
                    storage: Arc::new(RwLock::new(self.get())),
                    policy: self.policy,
                }
            }
            CopyPolicy::Shallow => {
                warn!(
                    "shallow copy of CopyCell<{}>: storage now shared by {} cells",
                    type_name::<T>(),
                    self.alias_count() + 1
                );
                Self {
                    storage: Arc::clone(&self.storage),
                    policy: self.policy,
                }
            }
        }
    }

    /// Detach into a deep-policy cell with its own storage.
    pub fn into_deep(self) -> Self {
        let value = self.get();
        Self::new(value)
    }
}

impl<T: Clone> Clone for CopyCell<T> {
    fn clone(&self) -> Self {
        self.duplicate()
    }
}

impl<T: Default> Default for CopyCell<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T> From<T> for CopyCell<T> {
    fn from(value: T) -> Self {
        Self::new(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_policy_is_deep() {
        assert_eq!(CopyPolicy::default(), CopyPolicy::Deep);
        assert_eq!(CopyCell::new(1).policy(), CopyPolicy::Deep);
        assert!(!CopyPolicy::Deep.aliases());
        assert!(CopyPolicy::Shallow.aliases());
    }

    #[test]
    fn test_deep_copy_is_independent() {
        let obj1 = CopyCell::new(100);
        let obj2 = obj1.duplicate();

        obj2.set(1000);
        assert_eq!(obj1.get(), 100);
        assert_eq!(obj2.get(), 1000);
        assert!(!obj1.shares_storage_with(&obj2));
        assert!(!obj1.is_aliased());
    }

    #[test]
    fn test_shallow_copy_aliases() {
        let obj1 = CopyCell::shallow(100);
        let obj2 = obj1.duplicate();

        obj2.set(1000);
        assert_eq!(obj1.get(), 1000);
        assert!(obj1.shares_storage_with(&obj2));
        assert_eq!(obj1.alias_count(), 2);
    }

    #[test]
    fn test_shallow_copy_outlives_source() {
        let obj1 = CopyCell::shallow(String::from("data"));
        let obj2 = obj1.duplicate();
        drop(obj1);

        assert_eq!(obj2.get(), "data");
        assert!(!obj2.is_aliased());
    }

    #[test]
    fn test_clone_follows_policy() {
        let deep = CopyCell::new(vec![1, 2]);
        let shallow = CopyCell::shallow(vec![1, 2]);

        assert!(!deep.clone().shares_storage_with(&deep));
        assert!(shallow.clone().shares_storage_with(&shallow));
    }

    #[test]
    fn test_into_deep_detaches() {
        let obj1 = CopyCell::shallow(5);
        let obj2 = obj1.duplicate().into_deep();

        obj2.set(6);
        assert_eq!(obj1.get(), 5);
        assert_eq!(obj2.policy(), CopyPolicy::Deep);
    }

    #[test]
    fn test_update_and_with() {
        let cell = CopyCell::new(vec![1]);
        cell.update(|v| v.push(2));
        assert_eq!(cell.with(|v| v.len()), 2);
    }
}
