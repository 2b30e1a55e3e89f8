//! Read/write-locked container

use parking_lot::RwLock;
use std::fmt;

/// A read/write-locked container for shared mutable state.
///
/// Any number of concurrent readers may run while no writer holds the lock; a
/// writer has exclusive access and excludes all readers and other writers.
/// Built on `parking_lot`'s task-fair lock, so a stream of short reads cannot
/// starve a waiting writer.
///
/// `read` and `with_lock` block the calling thread until the requested access
/// is grantable; there is no timeout. Waiting writers are eventually granted
/// exclusive access, but no ordering among them is guaranteed. Usage rule:
/// never re-acquire the same `Lock` instance from inside `read` or
/// `with_lock`.
pub struct Lock<T> {
    inner: RwLock<T>,
}

impl<T> Lock<T> {
    /// Create a new lock around a value
    pub fn new(value: T) -> Self {
        Self {
            inner: RwLock::new(value),
        }
    }

    /// Run `f` with shared, read-only access to the contained value.
    ///
    /// May run concurrently with other reads; blocks while a write is in
    /// progress. Returns whatever `f` returns.
    pub fn read<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        let guard = self.inner.read();
        f(&guard)
    }

    /// Run `f` with exclusive, mutable access to the contained value.
    ///
    /// Blocks until no readers or writers are active.
    pub fn with_lock<R>(&self, f: impl FnOnce(&mut T) -> R) -> R {
        let mut guard = self.inner.write();
        f(&mut guard)
    }

    /// Alias for [`Lock::with_lock`]
    pub fn with_write<R>(&self, f: impl FnOnce(&mut T) -> R) -> R {
        self.with_lock(f)
    }

    /// Replace the contained value
    pub fn set(&self, value: T) {
        self.with_lock(|slot| *slot = value);
    }

    /// Replace the contained value, returning the previous one
    pub fn replace(&self, value: T) -> T {
        self.with_lock(|slot| std::mem::replace(slot, value))
    }

    /// Consume the lock, returning the contained value
    pub fn into_inner(self) -> T {
        self.inner.into_inner()
    }
}

impl<T: Clone> Lock<T> {
    /// Copy the contained value out under the read lock
    pub fn get(&self) -> T {
        self.read(|value| value.clone())
    }
}

impl<T: Default> Default for Lock<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: fmt::Debug> fmt::Debug for Lock<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.inner.try_read() {
            Some(guard) => f.debug_tuple("Lock").field(&*guard).finish(),
            None => f.write_str("Lock(<locked>)"),
        }
    }
}

macro_rules! impl_counter {
    ($($ty:ty),*) => {
        $(
            impl Lock<$ty> {
                /// Atomically add one and return the new value
                pub fn increment(&self) -> $ty {
                    self.with_lock(|value| {
                        *value += 1;
                        *value
                    })
                }

                /// Atomically subtract one and return the new value
                pub fn decrement(&self) -> $ty {
                    self.with_lock(|value| {
                        *value -= 1;
                        *value
                    })
                }
            }
        )*
    };
}

impl_counter!(i32, i64, u32, u64, usize, isize);
