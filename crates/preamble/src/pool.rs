//! Reusable storage for parse buffers and header tables.
//!
//! A parse borrows its character buffer and header entry list from an
//! [`ObjectPool`]. The borrowed value is wrapped in a [`Pooled`] guard which puts
//! it back when dropped, so the storage is returned on every exit path: a
//! finished message being released, an error unwinding through `?`, or the
//! parse future being dropped while it waits for more bytes.

use std::fmt;
use std::mem;
use std::ops::{Deref, DerefMut};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use parking_lot::Mutex;
use tracing::trace;

/// Values that can be reset before going back into a pool.
pub trait Recycle: Default {
    /// Clears the contents while keeping the allocation.
    fn recycle(&mut self);
}

impl Recycle for String {
    fn recycle(&mut self) {
        self.clear();
    }
}

impl<T> Recycle for Vec<T> {
    fn recycle(&mut self) {
        self.clear();
    }
}

/// A cloneable handle to a pool of reusable values.
///
/// Clones share the same idle list and counters.
pub struct ObjectPool<T> {
    inner: Arc<PoolInner<T>>,
}

struct PoolInner<T> {
    idle: Mutex<Vec<T>>,
    max_idle: usize,
    outstanding: AtomicUsize,
    create_fn: Box<dyn Fn() -> T + Send + Sync>,
}

impl<T: Recycle> ObjectPool<T> {
    /// Creates a pool keeping at most `max_idle` released values around.
    pub fn new<F>(max_idle: usize, create_fn: F) -> Self
    where
        F: Fn() -> T + Send + Sync + 'static,
    {
        Self {
            inner: Arc::new(PoolInner {
                idle: Mutex::new(Vec::with_capacity(max_idle)),
                max_idle,
                outstanding: AtomicUsize::new(0),
                create_fn: Box::new(create_fn),
            }),
        }
    }

    /// Takes a value from the pool, creating a new one if none is idle.
    pub fn acquire(&self) -> Pooled<T> {
        let reused = self.inner.idle.lock().pop();
        let value = reused.unwrap_or_else(|| (self.inner.create_fn)());
        self.inner.outstanding.fetch_add(1, Ordering::AcqRel);
        Pooled { value, pool: self.clone() }
    }

    /// Number of values handed out and not yet returned.
    pub fn outstanding(&self) -> usize {
        self.inner.outstanding.load(Ordering::Acquire)
    }

    /// Number of values waiting in the pool for reuse.
    pub fn idle(&self) -> usize {
        self.inner.idle.lock().len()
    }

    fn put(&self, mut value: T) {
        value.recycle();
        {
            let mut idle = self.inner.idle.lock();
            if idle.len() < self.inner.max_idle {
                idle.push(value);
            } else {
                trace!(max_idle = self.inner.max_idle, "pool is full, dropping released value");
            }
        }
        self.inner.outstanding.fetch_sub(1, Ordering::AcqRel);
    }
}

impl<T> Clone for ObjectPool<T> {
    fn clone(&self) -> Self {
        Self { inner: Arc::clone(&self.inner) }
    }
}

impl<T> fmt::Debug for ObjectPool<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObjectPool")
            .field("max_idle", &self.inner.max_idle)
            .field("outstanding", &self.inner.outstanding.load(Ordering::Relaxed))
            .finish_non_exhaustive()
    }
}

/// A value borrowed from an [`ObjectPool`], returned to it on drop.
pub struct Pooled<T: Recycle> {
    value: T,
    pool: ObjectPool<T>,
}

impl<T: Recycle> Deref for Pooled<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.value
    }
}

impl<T: Recycle> DerefMut for Pooled<T> {
    fn deref_mut(&mut self) -> &mut T {
        &mut self.value
    }
}

impl<T: Recycle> Drop for Pooled<T> {
    fn drop(&mut self) {
        let value = mem::take(&mut self.value);
        self.pool.put(value);
    }
}

impl<T: Recycle + fmt::Debug> fmt::Debug for Pooled<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.value.fmt(f)
    }
}
