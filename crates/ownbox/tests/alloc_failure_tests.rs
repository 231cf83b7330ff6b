//! Allocation failure tests
//!
//! The global allocator here refuses 4096-byte, byte-aligned requests made
//! on a thread that has armed it, and defers everything else to `System`.

use std::alloc::{GlobalAlloc, Layout, System};
use std::cell::Cell;
use std::ptr;

use ownbox::*;
use pretty_assertions::assert_eq;

const REFUSED_SIZE: usize = 4096;

thread_local! {
    static REFUSE: Cell<bool> = const { Cell::new(false) };
}

struct RefusingAllocator;

// SAFETY: every request is either refused with null or forwarded to `System`
// unchanged, and deallocation always goes to `System`.
unsafe impl GlobalAlloc for RefusingAllocator {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        let refuse = layout.size() == REFUSED_SIZE
            && layout.align() == 1
            && REFUSE.with(Cell::get);
        if refuse {
            ptr::null_mut()
        } else {
            System.alloc(layout)
        }
    }

    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        System.dealloc(ptr, layout)
    }
}

#[global_allocator]
static ALLOCATOR: RefusingAllocator = RefusingAllocator;

/// Run `f` with the allocator refusing page-sized byte buffers.
fn refusing<R>(f: impl FnOnce() -> R) -> R {
    REFUSE.with(|refuse| refuse.set(true));
    let result = f();
    REFUSE.with(|refuse| refuse.set(false));
    result
}

#[test]
fn test_try_new_reports_allocation_failure() {
    let result = refusing(|| OwnedBox::try_new([1u8; REFUSED_SIZE]));

    let err = result.unwrap_err();
    assert!(matches!(
        err,
        OwnershipError::AllocationFailure {
            size: REFUSED_SIZE,
            ..
        }
    ));
    assert!(!err.is_recoverable());
}

#[test]
fn test_try_new_succeeds_when_allocator_cooperates() {
    let b = OwnedBox::try_new([1u8; REFUSED_SIZE]).unwrap();
    assert_eq!(b.get().map(|bytes| bytes.len()), Ok(REFUSED_SIZE));
}

#[test]
fn test_other_sizes_unaffected_while_refusing() {
    let b = refusing(|| OwnedBox::try_new([2u8; 64])).unwrap();
    assert_eq!(b.get().map(|bytes| bytes[0]), Ok(2));
}
