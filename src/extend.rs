//! The page extender: the `sbrk`-style collaborator the allocator treats
//! as an external service, specified only by the interface the engine
//! consumes.
//!
//! `SbrkExtender` calls `libc::sbrk` directly and checks for its
//! `(void*)-1` failure sentinel by casting to `usize::MAX`.

use libc::{c_void, intptr_t, sbrk};
use std::ptr;

/// Everything the engine needs from the page extender: grow the heap by
/// `n_bytes` and report the current inclusive bounds.
pub trait PageExtender {
  /// Requests `n_bytes` more heap space. Returns a pointer to the start
  /// of the newly added region, or `None` on failure.
  fn extend(&mut self, n_bytes: usize) -> Option<*mut u8>;

  /// Inclusive lower bound of the current heap region.
  fn heap_lo(&self) -> *mut u8;

  /// Inclusive upper bound (the last valid byte) of the current heap
  /// region.
  fn heap_hi(&self) -> *mut u8;
}

/// Production extender: grows the process's data segment via `sbrk(2)`.
///
/// # Safety
///
/// `sbrk` manipulates process-wide state. Only one `SbrkExtender` (and
/// thus only one `Allocator<SbrkExtender>`) should be active in a
/// process at a time.
#[derive(Debug, Default)]
pub struct SbrkExtender {
  lo: Option<*mut u8>,
}

impl PageExtender for SbrkExtender {
  fn extend(&mut self, n_bytes: usize) -> Option<*mut u8> {
    unsafe {
      let prev = sbrk(n_bytes as intptr_t);
      if prev == usize::MAX as *mut c_void {
        return None;
      }
      if self.lo.is_none() {
        self.lo = Some(prev as *mut u8);
      }
      Some(prev as *mut u8)
    }
  }

  fn heap_lo(&self) -> *mut u8 {
    self.lo.unwrap_or(ptr::null_mut())
  }

  fn heap_hi(&self) -> *mut u8 {
    unsafe { (sbrk(0) as *mut u8).sub(1) }
  }
}
