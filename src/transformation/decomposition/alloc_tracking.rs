use core::sync::atomic::{AtomicUsize, Ordering};

/// Receives notifications about the buffers allocated and released by a decomposition.
///
/// The decomposition reports the vertex and index buffers of the mesh fragments and the
/// convex hulls it creates, as well as their release. This is a diagnostic facility: the
/// reported sizes are the capacities of the buffers, in bytes.
pub trait AllocationTracker: Sync {
    /// A buffer of `bytes` bytes was allocated.
    fn on_allocate(&self, bytes: usize);
    /// A buffer of `bytes` bytes was released.
    fn on_release(&self, bytes: usize);
}

/// An allocation tracker that does nothing.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct NoAllocationTracking;

impl AllocationTracker for NoAllocationTracking {
    #[inline]
    fn on_allocate(&self, _: usize) {}
    #[inline]
    fn on_release(&self, _: usize) {}
}

/// An allocation tracker counting live bytes, peak bytes, and allocations.
#[derive(Debug, Default)]
pub struct CountingAllocationTracker {
    live_bytes: AtomicUsize,
    peak_bytes: AtomicUsize,
    num_allocations: AtomicUsize,
    num_releases: AtomicUsize,
}

impl CountingAllocationTracker {
    /// A tracker with all its counters set to zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// The number of bytes allocated and not released yet.
    pub fn live_bytes(&self) -> usize {
        self.live_bytes.load(Ordering::Relaxed)
    }

    /// The largest value ever reached by [`Self::live_bytes`].
    pub fn peak_bytes(&self) -> usize {
        self.peak_bytes.load(Ordering::Relaxed)
    }

    /// The number of allocations reported so far.
    pub fn num_allocations(&self) -> usize {
        self.num_allocations.load(Ordering::Relaxed)
    }

    /// The number of releases reported so far.
    pub fn num_releases(&self) -> usize {
        self.num_releases.load(Ordering::Relaxed)
    }
}

impl AllocationTracker for CountingAllocationTracker {
    fn on_allocate(&self, bytes: usize) {
        let live = self.live_bytes.fetch_add(bytes, Ordering::Relaxed) + bytes;
        let _ = self.peak_bytes.fetch_max(live, Ordering::Relaxed);
        let _ = self.num_allocations.fetch_add(1, Ordering::Relaxed);
    }

    fn on_release(&self, bytes: usize) {
        // Saturate so a tracker shared between runs never wraps around.
        let _ = self
            .live_bytes
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |live| {
                Some(live.saturating_sub(bytes))
            });
        let _ = self.num_releases.fetch_add(1, Ordering::Relaxed);
    }
}
