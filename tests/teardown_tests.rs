//! Checks that releasing a dictionary returns every byte it allocated.
//!
//! This file installs its own global allocator, so it holds a single test.

use std::alloc::{GlobalAlloc, Layout, System};
use std::cell::Cell;
use std::sync::atomic::{AtomicIsize, Ordering};

use patricia_lookup::{Dictionary, PatriciaDict, Record, Schema, Teardown};

// ============================================================================
// Tracking allocator
// ============================================================================

struct TrackingAllocator;

/// Net bytes allocated by threads with tracking switched on.
static NET: AtomicIsize = AtomicIsize::new(0);

thread_local! {
    static TRACKING: Cell<bool> = const { Cell::new(false) };
}

#[global_allocator]
static ALLOC: TrackingAllocator = TrackingAllocator;

fn tracking() -> bool {
    TRACKING.try_with(|t| t.get()).unwrap_or(false)
}

unsafe impl GlobalAlloc for TrackingAllocator {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        let ptr = unsafe { System.alloc(layout) };
        if !ptr.is_null() && tracking() {
            NET.fetch_add(layout.size() as isize, Ordering::Relaxed);
        }
        ptr
    }

    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        if tracking() {
            NET.fetch_sub(layout.size() as isize, Ordering::Relaxed);
        }
        unsafe { System.dealloc(ptr, layout) };
    }
}

/// Runs `f` with tracking on and returns the net bytes it left allocated.
fn net_allocated<T>(f: impl FnOnce() -> T) -> (isize, T) {
    NET.store(0, Ordering::Relaxed);
    TRACKING.with(|t| t.set(true));
    let out = f();
    TRACKING.with(|t| t.set(false));
    (NET.load(Ordering::Relaxed), out)
}

// ============================================================================
// Data
// ============================================================================

fn rows() -> Vec<[String; 2]> {
    let mut rows = Vec::new();
    for number in 1..=60 {
        for street in ["MAIN ST", "MAIN RD", "HIGH ST", "STATION ST"] {
            rows.push([rows.len().to_string(), format!("{} {}", number, street)]);
        }
    }
    // Duplicates land in existing leaves.
    rows.push([rows.len().to_string(), "1 MAIN ST".to_string()]);
    rows.push([rows.len().to_string(), "1 MAIN ST".to_string()]);
    rows
}

fn build(rows: &[[String; 2]]) -> PatriciaDict {
    let schema = Schema::new(2, 1).unwrap();
    let mut dict = PatriciaDict::new(schema);
    for row in rows {
        dict.insert(Record::copy_from(row, &schema).unwrap())
            .unwrap();
    }
    dict
}

#[test]
fn test_release_returns_every_byte() {
    let rows = rows();

    // Warm up lazily initialised statics outside the measured windows.
    let dict = build(&rows);
    let _ = dict.lookup("1 MAIN ST");
    let _ = dict.lookup("1 MAIN AVE");
    drop(dict.teardown());

    // Building leaves memory allocated until the dictionary goes away.
    let (held, dict) = net_allocated(|| build(&rows));
    assert!(held > 0);
    drop(dict);

    // Explicit teardown frees every node and record.
    let (net, freed) = net_allocated(|| {
        let dict = build(&rows);
        assert_eq!(dict.len(), 242);
        assert_eq!(dict.key_count(), 240);
        dict.teardown()
    });
    assert_eq!(net, 0);
    assert_eq!(
        freed,
        Teardown {
            branches: 239,
            leaves: 240,
            records: 242,
            stem_bytes: freed.stem_bytes,
        }
    );
    assert!(freed.stem_bytes > 0);

    // Dropping does the same.
    let (net, ()) = net_allocated(|| drop(build(&rows)));
    assert_eq!(net, 0);
}
