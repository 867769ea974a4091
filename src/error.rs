//! The narrow error taxonomy the engine reasons about internally.
//!
//! None of these are returned from the public API directly — `allocate`,
//! `reallocate` and `zero_allocate` stay C-`malloc`-shaped and hand back
//! a null pointer or unmodified input on failure, per the allocator's
//! drop-in-replacement contract. `AllocError` exists so the logging at
//! each failure site can name *why*, instead of every failure collapsing
//! into the same "returned null" message.

use std::fmt;

/// A reason one of the public operations returned failure.
///
/// `size == 0` (allocate/zero_allocate) and `ptr == null` (release) are
/// documented, non-error outcomes with their own direct handling at the
/// call site, so there is no `InvalidInput` variant here — every member
/// of this enum is actually constructed at a real failure site.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AllocError {
  /// The page extender could not grow the heap.
  OutOfMemory,
  /// `zero_allocate`'s `elements * size` overflowed `usize`.
  Overflow,
  /// `verify_heap` found a broken invariant.
  Corruption,
}

impl fmt::Display for AllocError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      AllocError::OutOfMemory => write!(f, "page extender failed to grow the heap"),
      AllocError::Overflow => write!(f, "element count * element size overflowed"),
      AllocError::Corruption => write!(f, "heap checker found a broken invariant"),
    }
  }
}

impl std::error::Error for AllocError {}
