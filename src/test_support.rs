//! Test-only page extender.
//!
//! Real `sbrk` is one process-wide resource, so tests need a heap each
//! can own outright rather than all fighting over the real program
//! break. `BufferExtender` backs the engine with a fixed-capacity boxed
//! byte slice instead — deterministic, and dropped (memory reclaimed) at
//! the end of each test.

use crate::extend::PageExtender;

pub struct BufferExtender {
  mem: Box<[u8]>,
  brk: usize,
}

impl BufferExtender {
  pub fn with_capacity(cap: usize) -> Self {
    BufferExtender {
      mem: vec![0u8; cap].into_boxed_slice(),
      brk: 0,
    }
  }
}

impl Default for BufferExtender {
  fn default() -> Self {
    // Large enough for every test in this crate's suite without ever
    // hitting the capacity ceiling; none of them need more than a few
    // hundred KiB of heap growth.
    BufferExtender::with_capacity(4 * 1024 * 1024)
  }
}

impl PageExtender for BufferExtender {
  fn extend(&mut self, n_bytes: usize) -> Option<*mut u8> {
    if self.brk + n_bytes > self.mem.len() {
      return None;
    }
    let ptr = unsafe { self.mem.as_mut_ptr().add(self.brk) };
    self.brk += n_bytes;
    Some(ptr)
  }

  fn heap_lo(&self) -> *mut u8 {
    self.mem.as_ptr() as *mut u8
  }

  fn heap_hi(&self) -> *mut u8 {
    unsafe { self.mem.as_ptr().add(self.brk.saturating_sub(1)) as *mut u8 }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn extends_monotonically_within_capacity() {
    let mut ext = BufferExtender::with_capacity(64);
    let p1 = ext.extend(16).unwrap();
    let p2 = ext.extend(16).unwrap();
    assert_eq!(p2 as usize, p1 as usize + 16);
  }

  #[test]
  fn fails_past_capacity() {
    let mut ext = BufferExtender::with_capacity(32);
    assert!(ext.extend(16).is_some());
    assert!(ext.extend(32).is_none());
  }
}
