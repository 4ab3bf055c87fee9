//! Bounded script heap with an explicit collector.
//!
//! The heap does not own memory; it accounts for the bytes script objects
//! would occupy on a device with a fixed heap arena.  Allocations that would
//! exceed the arena fail with `MemoryError`.  [`Heap::collect`] reclaims
//! everything that is not reachable from the roots the caller reports.
//!
//! On Linux with glibc a collection also calls `malloc_trim(0)` so the
//! process hands freed pages back to the OS.  On other targets that step is a
//! no-op; the accounting pass still runs.

use crate::script::error::ScriptError;

/// Default arena size, matching an 8 KiB static heap.
pub const DEFAULT_HEAP_SIZE: usize = 8 * 1024;

/// Counters describing the collector's work so far.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GcStats {
    /// Completed collection passes.
    pub collections: u64,
    /// Bytes reclaimed by the most recent pass.
    pub last_freed: usize,
    /// Bytes reclaimed over the heap's lifetime.
    pub total_freed: usize,
}

/// Fixed-capacity allocation accounting.
#[derive(Debug)]
pub struct Heap {
    capacity: usize,
    used: usize,
    stats: GcStats,
}

impl Default for Heap {
    fn default() -> Self {
        Self::new(DEFAULT_HEAP_SIZE)
    }
}

impl Heap {
    pub fn new(capacity: usize) -> Self {
        Self { capacity, used: 0, stats: GcStats::default() }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Bytes currently charged, live or garbage.
    pub fn used(&self) -> usize {
        self.used
    }

    pub fn free(&self) -> usize {
        self.capacity - self.used
    }

    pub fn stats(&self) -> GcStats {
        self.stats
    }

    /// Charge `bytes` to the heap.  Does not collect on failure; the caller
    /// decides whether a collection is worth retrying.
    pub fn alloc(&mut self, bytes: usize) -> Result<(), ScriptError> {
        if bytes > self.free() {
            return Err(ScriptError::Memory { requested: bytes });
        }
        self.used += bytes;
        Ok(())
    }

    /// Run a collection pass.  `live` is the number of bytes still reachable
    /// from the roots; everything above it is reclaimed.  Blocks until the
    /// pass (including the allocator trim) has finished.
    pub fn collect(&mut self, live: usize) -> GcStats {
        let live = live.min(self.used);
        let freed = self.used - live;
        self.used = live;
        self.stats.collections += 1;
        self.stats.last_freed = freed;
        self.stats.total_freed += freed;
        trim_allocator();
        self.stats
    }
}

#[cfg(all(target_os = "linux", target_env = "gnu"))]
fn trim_allocator() {
    // SAFETY: malloc_trim only walks glibc's own arenas and takes no
    // pointers from us.
    unsafe {
        libc::malloc_trim(0);
    }
}

#[cfg(not(all(target_os = "linux", target_env = "gnu")))]
fn trim_allocator() {}

// ── Tests ─────────────────────────────────────────────────────────────────────
