//! Atomic ownership handoff between threads
//!
//! [`AtomicOwnedBox`] is a slot holding at most one owned value, shared by
//! reference between threads. Every change of owner is a single atomic
//! pointer swap, so when several threads race to take the value exactly
//! one of them receives it and the rest see an empty box.

use std::any::type_name;
use std::fmt;
use std::marker::PhantomData;
use std::ptr;
use std::sync::atomic::{AtomicPtr, Ordering};

use log::trace;

use crate::owned::OwnedBox;

/// A thread-safe slot for an exclusively owned value.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use std::thread;
/// use ownbox::{AtomicOwnedBox, OwnedBox};
///
/// let slot = Arc::new(AtomicOwnedBox::new(String::from("token")));
///
/// let winners: usize = (0..4)
///     .map(|_| {
///         let slot = Arc::clone(&slot);
///         thread::spawn(move || !slot.take().is_empty())
///     })
///     .collect::<Vec<_>>()
///     .into_iter()
///     .map(|handle| handle.join().unwrap() as usize)
///     .sum();
///
/// assert_eq!(winners, 1);
/// assert!(slot.is_empty());
/// ```
pub struct AtomicOwnedBox<T> {
    /// Heap pointer of the owned value, null when empty
    ptr: AtomicPtr<T>,

    _owns: PhantomData<Box<T>>,
}

// SAFETY: the value is only ever reached by swapping its pointer out, which
// moves ownership to exactly one thread. No `&T` is handed out through
// `&self`, so sharing the slot only requires that `T` can be sent.
unsafe impl<T: Send> Sync for AtomicOwnedBox<T> {}

impl<T> AtomicOwnedBox<T> {
    /// Create a slot owning `value`.
    pub fn new(value: T) -> Self {
        Self::from_owned(OwnedBox::new(value))
    }

    /// Create an empty slot.
    pub const fn empty() -> Self {
        Self {
            ptr: AtomicPtr::new(ptr::null_mut()),
            _owns: PhantomData,
        }
    }

    /// Create a slot taking over whatever `owned` holds.
    pub fn from_owned(owned: OwnedBox<T>) -> Self {
        Self {
            ptr: AtomicPtr::new(into_raw(owned)),
            _owns: PhantomData,
        }
    }

    /// Put `owned` into the slot and return what it held before.
    pub fn store(&self, owned: OwnedBox<T>) -> OwnedBox<T> {
        trace!("atomic handoff of {}", type_name::<T>());
        let previous = self.ptr.swap(into_raw(owned), Ordering::AcqRel);
        // SAFETY: the swap removed `previous` from the slot, so this thread
        // is its only owner.
        unsafe { from_raw(previous) }
    }

    /// Take the value out, leaving the slot empty.
    pub fn take(&self) -> OwnedBox<T> {
        self.store(OwnedBox::empty())
    }

    /// Put `owned` into the slot only if the slot is empty.
    ///
    /// On failure the slot is untouched and `owned` is handed back.
    pub fn store_if_empty(&self, owned: OwnedBox<T>) -> Result<(), OwnedBox<T>> {
        let raw = into_raw(owned);
        match self
            .ptr
            .compare_exchange(ptr::null_mut(), raw, Ordering::AcqRel, Ordering::Acquire)
        {
            Ok(_) => Ok(()),
            // SAFETY: the exchange failed, so `raw` never entered the slot
            // and is still owned by this call.
            Err(_) => Err(unsafe { from_raw(raw) }),
        }
    }

    /// Check whether the slot currently holds nothing.
    ///
    /// The answer may be stale by the time the caller acts on it.
    pub fn is_empty(&self) -> bool {
        self.ptr.load(Ordering::Acquire).is_null()
    }

    /// Consume the slot and return its contents.
    pub fn into_owned(self) -> OwnedBox<T> {
        self.take()
    }
}

impl<T> Drop for AtomicOwnedBox<T> {
    fn drop(&mut self) {
        let raw = *self.ptr.get_mut();
        // SAFETY: `&mut self` means no other thread can reach the slot.
        drop(unsafe { from_raw(raw) });
    }
}

impl<T> Default for AtomicOwnedBox<T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T> fmt::Debug for AtomicOwnedBox<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AtomicOwnedBox")
            .field("empty", &self.is_empty())
            .finish()
    }
}

/// Turn an `OwnedBox` into a raw pointer, null for an empty box.
fn into_raw<T>(mut owned: OwnedBox<T>) -> *mut T {
    owned
        .release()
        .map_or(ptr::null_mut(), Box::into_raw)
}

/// Rebuild an `OwnedBox` from a pointer produced by [`into_raw`].
///
/// # Safety
///
/// `raw` must be null or come from [`into_raw`], and must not be owned by
/// anything else.
unsafe fn from_raw<T>(raw: *mut T) -> OwnedBox<T> {
    if raw.is_null() {
        OwnedBox::empty()
    } else {
        OwnedBox::from_box(Box::from_raw(raw))
    }
}
