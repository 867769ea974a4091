//! The heap consistency checker.
//!
//! A debug-only walk of the implicit list checking per-block invariants
//! and pointer bounds, paired with a walk of every free-list bucket
//! checking that bucket membership and footer/header agreement line up.
//! `cfg!(debug_assertions)` keeps both walks out of release builds
//! entirely, the Rust equivalent of a `DEBUG`-gated diagnostic routine.

use log::error;

use crate::block::{ALIGNMENT, Block, MIN_BLOCK_SIZE};
use crate::error::AllocError;
use crate::extend::PageExtender;
use crate::flist::{NUM_CLASSES, size_class};
use crate::heap::Allocator;

impl<E: PageExtender> Allocator<E> {
  /// Walks the implicit list and every free-list bucket, logging each
  /// violation it finds via `log::error!`. Returns whether the heap is
  /// consistent. A no-op (always `true`) outside debug builds.
  pub fn verify_heap(&self, line: i32) -> bool {
    if !cfg!(debug_assertions) {
      return true;
    }

    let mut ok = true;
    let Some(start) = self.heap_start() else {
      return true;
    };

    ok &= self.check_implicit_list(start, line);
    ok &= self.check_free_lists(line);

    if !ok {
      error!("verify_heap({line}): {}", AllocError::Corruption);
    }
    ok
  }

  fn check_implicit_list(&self, start: Block, line: i32) -> bool {
    let mut ok = true;
    let lo = self.extender().heap_lo();
    let hi = self.extender().heap_hi();

    let mut current = start;
    let mut prev_was_free = false;
    let mut free_count_seen = 0usize;

    loop {
      unsafe {
        let addr = current.as_ptr();
        if !(addr as usize >= lo as usize && addr as usize <= hi as usize) {
          error!("verify_heap({line}): block at {addr:p} lies outside heap bounds");
          ok = false;
          break;
        }

        let size = current.size();
        if size == 0 {
          // Epilogue: must be alloc, and that's the end of the list.
          if !current.is_alloc() {
            error!("verify_heap({line}): epilogue at {addr:p} is not marked allocated");
            ok = false;
          }
          break;
        }

        if size % ALIGNMENT != 0 {
          error!("verify_heap({line}): block at {addr:p} has misaligned size {size}");
          ok = false;
        }
        if size < MIN_BLOCK_SIZE {
          error!("verify_heap({line}): block at {addr:p} is smaller than the minimum block size");
          ok = false;
        }

        let is_free = !current.is_alloc();

        if is_free {
          free_count_seen += 1;
          if size > MIN_BLOCK_SIZE {
            let footer = current.footer();
            if footer & !0xF != size as u64 {
              error!("verify_heap({line}): block at {addr:p} header/footer size mismatch");
              ok = false;
            }
          }
          if prev_was_free {
            error!("verify_heap({line}): two consecutive free blocks at {addr:p}");
            ok = false;
          }
        }

        let next = current.next_physical();
        if next.prev_alloc() != current.is_alloc() {
          error!(
            "verify_heap({line}): block at {addr:p} is {}, but its successor's prev_alloc bit says {}",
            if current.is_alloc() { "allocated" } else { "free" },
            if next.prev_alloc() { "allocated" } else { "free" }
          );
          ok = false;
        }
        if next.prev_mini() != (size == MIN_BLOCK_SIZE) {
          error!(
            "verify_heap({line}): block at {addr:p} has size {size}, but its successor's prev_mini bit says {}",
            next.prev_mini()
          );
          ok = false;
        }

        prev_was_free = is_free;
        current = next;
      }
    }

    if free_count_seen != self.free_lists().total_free() {
      error!(
        "verify_heap({line}): implicit list free count {free_count_seen} disagrees with free-list total {}",
        self.free_lists().total_free()
      );
      ok = false;
    }

    ok
  }

  fn check_free_lists(&self, line: i32) -> bool {
    let mut ok = true;
    let lo = self.extender().heap_lo();
    let hi = self.extender().heap_hi();

    for class in 0..NUM_CLASSES {
      let Some(head) = self.free_lists().head(class) else {
        continue;
      };

      let mut current = head;
      let mut seen = 0usize;
      loop {
        unsafe {
          let addr = current.as_ptr();
          if !(addr as usize >= lo as usize && addr as usize <= hi as usize) {
            error!("verify_heap({line}): free-list block at {addr:p} lies outside heap bounds");
            ok = false;
            break;
          }
          if current.is_alloc() {
            error!("verify_heap({line}): block at {addr:p} is in a free list but marked allocated");
            ok = false;
          }
          let actual_class = size_class(current.size());
          if actual_class != class {
            error!(
              "verify_heap({line}): block at {addr:p} of size {} lives in bucket {class}, belongs in {actual_class}",
              current.size()
            );
            ok = false;
          }

          seen += 1;
          if seen > self.free_lists().count(class) + 1 {
            error!("verify_heap({line}): bucket {class} cycle does not close within its own count");
            ok = false;
            break;
          }

          let next = if class == 0 {
            match current.fnext() {
              Some(n) => n,
              None => break,
            }
          } else {
            match current.fnext() {
              Some(n) => n,
              None => {
                error!("verify_heap({line}): block at {addr:p} in bucket {class} is missing fnext");
                ok = false;
                break;
              }
            }
          };

          if class != 0 && next == head {
            break;
          }
          current = next;
        }
      }

      if seen != self.free_lists().count(class) {
        error!(
          "verify_heap({line}): bucket {class} walked {seen} blocks, count says {}",
          self.free_lists().count(class)
        );
        ok = false;
      }
    }

    ok
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::test_support::BufferExtender;

  fn new_allocator() -> Allocator<BufferExtender> {
    Allocator::default()
  }

  #[test]
  fn fresh_heap_is_consistent() {
    let mut alloc = new_allocator();
    assert!(alloc.init());
    assert!(alloc.verify_heap(line!() as i32));
  }

  #[test]
  fn heap_stays_consistent_through_alloc_release_cycles() {
    let mut alloc = new_allocator();
    assert!(alloc.init());

    let a = alloc.allocate(32);
    let b = alloc.allocate(64);
    let c = alloc.allocate(16);
    assert!(alloc.verify_heap(line!() as i32));

    alloc.release(b);
    assert!(alloc.verify_heap(line!() as i32));

    alloc.release(a);
    alloc.release(c);
    assert!(alloc.verify_heap(line!() as i32));
  }

  #[test]
  fn detects_corrupted_successor_prev_alloc_bit() {
    let mut alloc = new_allocator();
    assert!(alloc.init());

    let a = alloc.allocate(32);
    let b = alloc.allocate(32);
    assert!(!a.is_null() && !b.is_null());
    assert!(alloc.verify_heap(line!() as i32));

    unsafe {
      // `b`'s header should say prev_alloc = true (`a` is allocated).
      // Flip it by hand to simulate a place()/coalesce() that forgot to
      // update a successor's prev bits.
      let b_block = Block::from_payload(b);
      b_block.set_prev_flags(false, b_block.prev_mini());
    }

    assert!(!alloc.verify_heap(line!() as i32));
  }

  #[test]
  fn heap_stays_consistent_after_realloc() {
    let mut alloc = new_allocator();
    assert!(alloc.init());

    let p = alloc.allocate(32);
    let grown = alloc.reallocate(p, 256);
    assert!(!grown.is_null());
    assert!(alloc.verify_heap(line!() as i32));
  }
}
