//! # segalloc - A Segregated Free-List Memory Allocator
//!
//! This crate provides an explicit-free-list allocator in the style of a
//! CS:APP-lab allocator: blocks are tracked both as an *implicit list*
//! (walked by physical address, via each block's size) and, while free,
//! as members of a *segregated* set of explicit free lists bucketed by
//! size class.
//!
//! ## Overview
//!
//! ```text
//!   Implicit list (physical order):
//!
//!   ┌──────────┬──────────┬──────────┬──────────┬─────────────┐
//!   │ prologue │  alloc   │  free    │  alloc   │  epilogue   │
//!   │  (0 B)   │  block   │  block   │  block   │   (0 B)     │
//!   └──────────┴──────────┴──────────┴──────────┴─────────────┘
//!
//!   Segregated free lists (by size class, free blocks only):
//!
//!   class 0 (16 B, mini):    [free] -> [free] -> None
//!   class 1 [32, 64):        [free] <-> [free] <-> (circular)
//!   class 2 [64, 128):       (empty)
//!   ...
//! ```
//!
//! A block's header packs its size with three status bits — whether it
//! is itself allocated, and whether its physical predecessor is
//! allocated and whether that predecessor is a 16-byte mini block — which
//! together let every block find its physical neighbors without storing
//! an explicit backward pointer in most cases. Free blocks reuse their
//! own payload for free-list linkage: a 16-byte mini block has room only
//! for a forward pointer, so its bucket is a singly-linked list removed
//! from by linear scan; anything bigger carries forward and backward
//! pointers plus a footer, giving O(1) removal and a doubly-linked,
//! circular bucket.
//!
//! ## Crate Structure
//!
//! ```text
//!   segalloc
//!   ├── align    - Alignment macro (align_up!)
//!   ├── block    - Block header/footer encoding and physical/free-list navigation
//!   ├── flist    - Segregated free-list buckets
//!   ├── extend   - The PageExtender trait abstracting heap growth (sbrk or a test buffer)
//!   ├── heap     - The Allocator engine: init, allocate, release, reallocate, zero_allocate
//!   ├── checker  - Debug-only heap consistency verification
//!   └── error    - The AllocError type
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use segalloc::Allocator;
//!
//! fn main() {
//!     let mut allocator = Allocator::default();
//!     allocator.init();
//!
//!     unsafe {
//!         let ptr = allocator.allocate(64) as *mut u64;
//!         *ptr = 42;
//!         println!("Value: {}", *ptr);
//!         allocator.release(ptr as *mut u8);
//!     }
//! }
//! ```
//!
//! ## How It Works
//!
//! The allocator grows its backing region through whatever implements
//! `PageExtender` — in production, `SbrkExtender` calls `sbrk(2)` to
//! extend the process's data segment; tests instead use `BufferExtender`,
//! a fixed-capacity in-memory stand-in, so that parallel tests never
//! contend over the one real program break.
//!
//! A first-fit search starts in the bucket `size_class(requested_size)`
//! selects and advances to the next non-empty bucket on a miss. A found
//! block is split if the leftover is large enough to be its own block,
//! and the allocated portion keeps the low address. Freed blocks are
//! coalesced with whichever physical neighbors are also free before
//! being reinserted into the appropriate bucket.
//!
//! ## Features
//!
//! - **Size-class buckets**: O(1) removal for every free block 32 bytes
//!   or larger; linear removal only for 16-byte mini blocks, which are
//!   too small to carry a backward pointer.
//! - **Boundary-tag coalescing**: adjacent free blocks are merged
//!   immediately on release, in any of the four prev/next combinations.
//! - **In-place reallocation**: shrinks split off the excess tail;
//!   growth first tries absorbing a free next-door neighbor before
//!   falling back to allocate + copy + release.
//! - **Debug-only heap checker**: `Allocator::verify_heap` walks both the
//!   implicit list and every free-list bucket, available whenever
//!   `debug_assertions` are enabled.
//! - **Pluggable page source**: `PageExtender` decouples the engine from
//!   `sbrk`, so it can be driven by a deterministic in-memory buffer
//!   under test.
//!
//! ## Limitations
//!
//! - **Single-threaded only**: no synchronization primitives; an
//!   `Allocator` is not `Sync`.
//! - **Never shrinks the heap**: pages taken from the extender are
//!   never returned to the OS.
//! - **Unix-only in production**: `SbrkExtender` requires `libc` and
//!   `sbrk` (POSIX systems). `BufferExtender` has no such requirement.
//!
//! ## Safety
//!
//! This crate is inherently unsafe as it deals with raw memory
//! management. `Block`'s accessors are individually `unsafe`, since they
//! dereference raw pointers with no borrow-checker-tracked lifetime;
//! `Allocator`'s public API (`allocate`, `release`, `reallocate`,
//! `zero_allocate`) is safe to call, but callers must not use a pointer
//! after releasing it, nor write past the size they requested.

pub mod align;
mod block;
mod checker;
mod error;
mod extend;
mod flist;
mod heap;

#[cfg(test)]
mod test_support;

pub use block::{ALIGNMENT, MIN_BLOCK_SIZE};
pub use error::AllocError;
pub use extend::{PageExtender, SbrkExtender};
pub use flist::NUM_CLASSES;
pub use heap::{Allocator, CHUNKSIZE};
