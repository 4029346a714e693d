use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Counting latch held around a wallet protocol execution. Sibling
/// protocols working on the same wallet check [`is_executing`] and back
/// off while a coordination is in flight.
///
/// [`is_executing`]: ProtocolLatch::is_executing
pub struct ProtocolLatch {
    count: AtomicUsize,
}

impl ProtocolLatch {
    pub fn new() -> Self {
        Self { count: AtomicUsize::new(0) }
    }

    pub fn lock(self: &Arc<Self>) -> LatchGuard {
        self.count.fetch_add(1, Ordering::SeqCst);
        LatchGuard { latch: Arc::clone(self) }
    }

    pub fn is_executing(&self) -> bool {
        self.count.load(Ordering::SeqCst) > 0
    }
}

impl Default for ProtocolLatch {
    fn default() -> Self {
        Self::new()
    }
}

pub struct LatchGuard {
    latch: Arc<ProtocolLatch>,
}

impl Drop for LatchGuard {
    fn drop(&mut self) {
        self.latch.count.fetch_sub(1, Ordering::SeqCst);
    }
}
