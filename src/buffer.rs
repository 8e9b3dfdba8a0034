//! Growable Buffer
//!
//! A length/capacity-tagged contiguous store with amortized growth. The engine
//! uses it to accumulate [`Failure`](crate::summary::Failure) records, but the
//! type itself is generic over any default-constructible element.
//!
//! Growth follows `current + current / 2 + 1`, clamped up to the requested
//! capacity and down to a hard maximum derived from the element size. Asking
//! for more than that maximum fails with [`EngineError::MaxSizeExceeded`] and
//! leaves the buffer untouched. Capacity never shrinks.

use std::mem;

use tracing::trace;

use crate::errors::EngineError;

/// Length/capacity bookkeeping kept in front of the element store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
struct Header {
    len: usize,
    capacity: usize,
}

/// Size of the bookkeeping header, subtracted from the addressable ceiling.
pub const HEADER_SIZE: usize = mem::size_of::<Header>();

/// Largest capacity a buffer of `T` may ever request.
pub fn max_capacity_for<T>() -> usize {
    let ceiling = isize::MAX as usize;
    match mem::size_of::<T>() {
        0 => ceiling,
        size => (ceiling - HEADER_SIZE) / size,
    }
}

/// Computes the capacity to grow to from `current` when `requested` slots are needed.
///
/// Callers guarantee `requested <= max`, so the result always lies in
/// `[requested, max]`.
pub fn grown_capacity(current: usize, requested: usize, max: usize) -> usize {
    let grown = current
        .checked_add(current / 2)
        .and_then(|c| c.checked_add(1));
    match grown {
        None => max,
        Some(capacity) => capacity.max(requested).min(max),
    }
}

/// Amortized-growth array with an explicit capacity ceiling.
#[derive(Debug, Clone)]
pub struct GrowableBuffer<T> {
    header: Header,
    max_capacity: usize,
    store: Vec<T>,
}

impl<T: Default> GrowableBuffer<T> {
    /// Creates a buffer holding `initial_length` default elements.
    ///
    /// The capacity matches the initial length exactly.
    pub fn create(initial_length: usize) -> Result<Self, EngineError> {
        Self::with_max_capacity(initial_length, max_capacity_for::<T>())
    }

    /// Creates a buffer whose ceiling is lowered to `max_capacity`.
    ///
    /// The ceiling can never be raised above [`max_capacity_for`].
    pub fn with_max_capacity(initial_length: usize, max_capacity: usize) -> Result<Self, EngineError> {
        let max_capacity = max_capacity.min(max_capacity_for::<T>());
        if initial_length > max_capacity {
            trace!(requested = initial_length, max = max_capacity, "the requested capacity is too large");
            return Err(EngineError::MaxSizeExceeded {
                requested: initial_length,
                max: max_capacity,
            });
        }

        let mut store = Vec::new();
        store
            .try_reserve_exact(initial_length)
            .map_err(|_| EngineError::Allocation {
                requested: initial_length,
            })?;
        store.resize_with(initial_length, T::default);

        Ok(Self {
            header: Header {
                len: initial_length,
                capacity: initial_length,
            },
            max_capacity,
            store,
        })
    }

    /// Appends `count` default elements and returns the newly appended slots.
    ///
    /// On error nothing is appended and existing elements are left as they were.
    pub fn extend_back(&mut self, count: usize) -> Result<&mut [T], EngineError> {
        let pos = self.header.len;
        let requested = pos.checked_add(count).ok_or(EngineError::MaxSizeExceeded {
            requested: usize::MAX,
            max: self.max_capacity,
        })?;

        if let Err(e) = self.ensure_capacity(requested) {
            trace!(requested, "failed to reserve a large enough capacity for the buffer");
            return Err(e);
        }

        self.store.resize_with(requested, T::default);
        self.header.len = requested;
        debug_assert_eq!(self.store.len(), self.header.len);
        Ok(&mut self.store[pos..])
    }
}

impl<T> GrowableBuffer<T> {
    fn ensure_capacity(&mut self, requested: usize) -> Result<(), EngineError> {
        if requested > self.max_capacity {
            trace!(requested, max = self.max_capacity, "the requested capacity is too large");
            return Err(EngineError::MaxSizeExceeded {
                requested,
                max: self.max_capacity,
            });
        }

        if self.header.capacity >= requested {
            return Ok(());
        }

        let new_capacity = grown_capacity(self.header.capacity, requested, self.max_capacity);
        debug_assert!(new_capacity >= requested);
        debug_assert!(new_capacity <= self.max_capacity);

        self.store
            .try_reserve_exact(new_capacity - self.store.len())
            .map_err(|_| {
                trace!(new_capacity, "failed to reallocate the block");
                EngineError::Allocation {
                    requested: new_capacity,
                }
            })?;
        self.header.capacity = new_capacity;
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.header.len
    }

    pub fn is_empty(&self) -> bool {
        self.header.len == 0
    }

    pub fn capacity(&self) -> usize {
        self.header.capacity
    }

    pub fn max_capacity(&self) -> usize {
        self.max_capacity
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.store.get(index)
    }

    pub fn as_slice(&self) -> &[T] {
        &self.store
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.store.iter()
    }

    /// Releases the buffer and every element it owns.
    pub fn destroy(self) {
        drop(self);
    }
}

impl<'a, T> IntoIterator for &'a GrowableBuffer<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
