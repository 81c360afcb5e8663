//! Process memory accounting.
//!
//! Resident set size comes from the operating system via `sysinfo`. Heap
//! figures come from [`TrackingAllocator`], which the binary installs as the
//! global allocator; when it is not installed (e.g. in tests) they read zero.

use std::alloc::{GlobalAlloc, Layout, System};
use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;
use sysinfo::{Pid, ProcessRefreshKind, ProcessesToUpdate, System as SysInfo};

static HEAP_IN_USE: AtomicU64 = AtomicU64::new(0);
static HEAP_HIGH_WATER: AtomicU64 = AtomicU64::new(0);

/// Global allocator wrapper around [`System`] that counts live heap bytes.
pub struct TrackingAllocator;

impl TrackingAllocator {
    fn grow(bytes: usize) {
        let now = HEAP_IN_USE.fetch_add(bytes as u64, Ordering::Relaxed) + bytes as u64;
        HEAP_HIGH_WATER.fetch_max(now, Ordering::Relaxed);
    }

    fn shrink(bytes: usize) {
        HEAP_IN_USE.fetch_sub(bytes as u64, Ordering::Relaxed);
    }
}

unsafe impl GlobalAlloc for TrackingAllocator {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        let ptr = unsafe { System.alloc(layout) };
        if !ptr.is_null() {
            Self::grow(layout.size());
        }
        ptr
    }

    unsafe fn alloc_zeroed(&self, layout: Layout) -> *mut u8 {
        let ptr = unsafe { System.alloc_zeroed(layout) };
        if !ptr.is_null() {
            Self::grow(layout.size());
        }
        ptr
    }

    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        unsafe { System.dealloc(ptr, layout) };
        Self::shrink(layout.size());
    }

    unsafe fn realloc(&self, ptr: *mut u8, layout: Layout, new_size: usize) -> *mut u8 {
        let new_ptr = unsafe { System.realloc(ptr, layout, new_size) };
        if !new_ptr.is_null() {
            let old_size = layout.size();
            if new_size > old_size {
                Self::grow(new_size - old_size);
            } else {
                Self::shrink(old_size - new_size);
            }
        }
        new_ptr
    }
}

/// Point-in-time memory figures, in bytes.
///
/// Serialized with the key names scrapers and dashboards already expect:
/// `rss`, `heapUsed`, `heapTotal`, `external`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MemoryUsage {
    /// Resident set size of the whole process.
    pub rss: u64,
    /// Bytes currently allocated on the heap.
    pub heap_used: u64,
    /// Peak heap allocation since start.
    pub heap_total: u64,
    /// Resident memory not attributed to the heap.
    pub external: u64,
}

impl MemoryUsage {
    /// Takes a fresh snapshot for the current process.
    pub fn snapshot() -> Self {
        Self::from_parts(
            resident_set_size(),
            HEAP_IN_USE.load(Ordering::Relaxed),
            HEAP_HIGH_WATER.load(Ordering::Relaxed),
        )
    }

    fn from_parts(rss: u64, heap_used: u64, heap_total: u64) -> Self {
        let heap_total = heap_total.max(heap_used);
        Self {
            rss,
            heap_used,
            heap_total,
            external: rss.saturating_sub(heap_total),
        }
    }

    /// Label/value pairs in exposition order.
    pub fn series(&self) -> [(&'static str, u64); 4] {
        [
            ("rss", self.rss),
            ("heapUsed", self.heap_used),
            ("heapTotal", self.heap_total),
            ("external", self.external),
        ]
    }
}

fn resident_set_size() -> u64 {
    let pid = Pid::from_u32(std::process::id());
    let mut system = SysInfo::new();
    system.refresh_processes_specifics(
        ProcessesToUpdate::Some(&[pid]),
        true,
        ProcessRefreshKind::nothing().with_memory(),
    );
    system.process(pid).map(|p| p.memory()).unwrap_or(0)
}
