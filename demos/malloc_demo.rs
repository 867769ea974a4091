use std::io::Read;
use std::ptr;

use libc::sbrk;
use segalloc::Allocator;

/// Waits until the user presses ENTER.
/// Useful when you want to inspect memory state with tools like `pmap`, `htop`,
/// `gdb`, or just visually track how allocations change the program break.
fn block_until_enter_pressed() {
  println!("\n>>> Press ENTER to continue...");
  let _ = std::io::stdin().bytes().next();
}

/// Prints the current program break using `sbrk(0)`.
/// The program break is the upper boundary of the heap managed via brk/sbrk.
unsafe fn print_program_break(label: &str) {
  println!(
    "[{}] PID = {}, program break (sbrk(0)) = {:?}",
    label,
    std::process::id(),
    unsafe { sbrk(0) },
  );
}

unsafe fn print_alloc(label: &str, size: usize, addr: *mut u8) {
  println!(
    "[{label}] requested {size} bytes, payload = {:?}, program break = {:?}",
    addr,
    unsafe { sbrk(0) },
  );
}

fn main() {
  // The engine driving this demo: a single-threaded, segregated
  // free-list allocator backed by `sbrk`, meant as a drop-in
  // malloc replacement.
  let mut allocator = Allocator::default();

  unsafe {
    print_program_break("start");
    assert!(allocator.init(), "init must succeed against a fresh heap");
    print_program_break("after init");
    block_until_enter_pressed();

    // --------------------------------------------------------------------
    // 1) Allocate space for a u32 and write through it.
    // --------------------------------------------------------------------
    let first_block = allocator.allocate(4) as *mut u32;
    println!("\n[1] Allocate u32");
    print_alloc("1", 4, first_block as *mut u8);
    first_block.write(0xDEADBEEF);
    println!("[1] Value written to first_block = 0x{:X}", first_block.read());
    block_until_enter_pressed();

    // --------------------------------------------------------------------
    // 2) Allocate 12 bytes and fill with a byte pattern.
    // --------------------------------------------------------------------
    let second_block = allocator.allocate(12);
    println!("\n[2] Allocate [u8; 12]");
    print_alloc("2", 12, second_block);
    ptr::write_bytes(second_block, 0xAB, 12);
    println!("[2] Initialized second block with 0xAB");
    block_until_enter_pressed();

    // --------------------------------------------------------------------
    // 3) Allocate a u64 and check payload alignment (always 16 bytes).
    // --------------------------------------------------------------------
    let third_block = allocator.allocate(8) as *mut u64;
    println!("\n[3] Allocate u64 (observe alignment)");
    print_alloc("3", 8, third_block as *mut u8);
    third_block.write(0x1122334455667788);
    println!("[3] Value written = 0x{:X}", third_block.read());
    println!(
      "[3] Address = {:#X}, addr % 16 = {}",
      third_block as usize,
      third_block as usize % 16,
    );
    block_until_enter_pressed();

    // --------------------------------------------------------------------
    // 4) Allocate an array of u16 to force more pointer movement.
    // --------------------------------------------------------------------
    let fourth_block = allocator.allocate(32) as *mut u16;
    println!("\n[4] Allocate [u16; 16]");
    print_alloc("4", 32, fourth_block as *mut u8);
    for i in 0..16 {
      fourth_block.add(i).write(i as u16);
    }
    println!("[4] Wrote 0..15 into the u16 array");
    block_until_enter_pressed();

    // --------------------------------------------------------------------
    // 5) Release the first block. The segregated free lists may
    //    coalesce it with a physically adjacent neighbor, so the next
    //    allocation is not guaranteed to land at the same address.
    // --------------------------------------------------------------------
    allocator.release(first_block as *mut u8);
    println!("\n[5] Released first_block at {:?}", first_block);
    block_until_enter_pressed();

    // --------------------------------------------------------------------
    // 6) Allocate a small block and see whether the allocator reuses
    //    the freed block's address.
    // --------------------------------------------------------------------
    let fifth_block = allocator.allocate(2);
    println!("\n[6] Allocate [u8; 2] (check reuse of freed block)");
    print_alloc("6", 2, fifth_block);
    println!(
      "[6] fifth_block == first_block? {}",
      if fifth_block as usize == first_block as usize {
        "Yes, it reused the freed block"
      } else {
        "No, it allocated somewhere else (likely coalesced into a differently sized block)"
      }
    );
    block_until_enter_pressed();

    // --------------------------------------------------------------------
    // 7) Allocate a large block to force `extend_heap` and observe the
    //    program break move.
    // --------------------------------------------------------------------
    print_program_break("before large alloc");
    let big_block = allocator.allocate(64 * 1024);
    println!("\n[7] Allocate large 64 KiB block");
    print_alloc("7", 64 * 1024, big_block);
    print_program_break("after large alloc");
    block_until_enter_pressed();

    // --------------------------------------------------------------------
    // 8) Grow the large block in place via `reallocate` and verify the
    //    heap checker still agrees the layout is consistent.
    // --------------------------------------------------------------------
    let grown = allocator.reallocate(big_block, 96 * 1024);
    println!(
      "\n[8] Reallocated big_block to 96 KiB, same address? {}",
      grown as usize == big_block as usize
    );
    debug_assert!(allocator.verify_heap(line!() as i32));

    println!("\n[9] End of demo. Process will exit and the OS will reclaim all memory.");
  }
}
