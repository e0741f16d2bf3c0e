//! Thread-safe pool of reusable byte buffers with RAII guards.
//!
//! The encoder rents a scratch buffer here when a table's worst-case output is
//! too large for the stack. The guard hands the buffer back on drop, so it is
//! returned exactly once on every exit path, including errors and unwinding.

use std::ops::{Deref, DerefMut};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, OnceLock};

/// Default number of idle buffers the pool keeps.
pub const DEFAULT_MAX_BUFFERS: usize = 16;

/// A thread-safe pool of reusable byte buffers.
///
/// Buffers are kept on a stack so the most recently returned one, likely still
/// in cache, is handed out next.
#[derive(Debug)]
pub struct BufferPool {
    buffers: Mutex<Vec<Vec<u8>>>,
    max_buffers: usize,
    outstanding: AtomicUsize,
}

impl BufferPool {
    /// Creates a pool that retains at most `max_buffers` idle buffers.
    #[must_use]
    pub fn new(max_buffers: usize) -> Self {
        Self {
            buffers: Mutex::new(Vec::with_capacity(max_buffers)),
            max_buffers,
            outstanding: AtomicUsize::new(0),
        }
    }

    /// The process-wide pool used when a codec is not given its own.
    pub fn shared() -> Arc<BufferPool> {
        static SHARED: OnceLock<Arc<BufferPool>> = OnceLock::new();
        Arc::clone(SHARED.get_or_init(|| {
            let max_buffers = std::thread::available_parallelism()
                .map(|p| p.get())
                .unwrap_or(4)
                .max(DEFAULT_MAX_BUFFERS);
            Arc::new(BufferPool::new(max_buffers))
        }))
    }

    /// Rents a zero-filled buffer of exactly `len` bytes.
    ///
    /// Reuses an idle buffer when one is available, otherwise allocates.
    #[must_use]
    pub fn rent(&self, len: usize) -> PooledBuffer<'_> {
        let idle = self.lock().pop();
        let mut buffer = idle.unwrap_or_default();
        buffer.clear();
        buffer.resize(len, 0);
        self.outstanding.fetch_add(1, Ordering::Relaxed);
        log::trace!("Rented pooled buffer of {} bytes", len);
        PooledBuffer {
            buffer: Some(buffer),
            pool: self,
        }
    }

    fn give_back(&self, buffer: Vec<u8>) {
        self.outstanding.fetch_sub(1, Ordering::Relaxed);
        let mut buffers = self.lock();
        if buffers.len() < self.max_buffers {
            buffers.push(buffer);
        }
    }

    /// A poisoned lock only means another thread panicked mid-push or mid-pop;
    /// the stack of buffers is still valid.
    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<Vec<u8>>> {
        self.buffers.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Number of idle buffers ready to be rented.
    #[must_use]
    pub fn available(&self) -> usize {
        self.lock().len()
    }

    /// Number of buffers currently rented and not yet returned.
    #[must_use]
    pub fn outstanding(&self) -> usize {
        self.outstanding.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn max_buffers(&self) -> usize {
        self.max_buffers
    }
}

impl Default for BufferPool {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_BUFFERS)
    }
}

/// RAII guard that returns its buffer to the pool on drop.
#[derive(Debug)]
pub struct PooledBuffer<'a> {
    buffer: Option<Vec<u8>>,
    pool: &'a BufferPool,
}

impl Deref for PooledBuffer<'_> {
    type Target = [u8];

    fn deref(&self) -> &Self::Target {
        self.buffer.as_deref().unwrap_or_default()
    }
}

impl DerefMut for PooledBuffer<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.buffer.as_deref_mut().unwrap_or_default()
    }
}

impl Drop for PooledBuffer<'_> {
    fn drop(&mut self) {
        if let Some(buffer) = self.buffer.take() {
            self.pool.give_back(buffer);
        }
    }
}
