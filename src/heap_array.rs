// Scoped ownership of a heap-allocated array.
//
// `HeapArray<T>` owns exactly one allocation of `len` contiguous elements.
// The allocation is released by `Drop`, so every exit path (return, `?`,
// panic) releases it once. `release(self)` makes the release point explicit.

use std::alloc::{alloc, dealloc, Layout};
use std::cell::Cell;
use std::fmt;
use std::marker::PhantomData;
use std::ops::{Deref, DerefMut};
use std::ptr::{self, NonNull};
use std::slice;

use tracing::debug;

use crate::error::AllocError;

/// An owning handle to `len` heap-allocated `T`s.
pub struct HeapArray<T> {
    ptr: NonNull<T>,
    len: usize,
    layout: Layout,
    _owns: PhantomData<T>,
}

impl<T> HeapArray<T> {
    /// Allocates `len` elements, each set to `T::default()`.
    ///
    /// ```
    /// use pointer_basics::heap_array::HeapArray;
    ///
    /// let years = HeapArray::<i32>::new(10)?;
    /// assert_eq!(years.len(), 10);
    /// assert!(years.iter().all(|&y| y == 0));
    /// years.release();
    /// # Ok::<(), pointer_basics::error::AllocError>(())
    /// ```
    pub fn new(len: usize) -> Result<Self, AllocError>
    where
        T: Default,
    {
        Self::from_fn(len, |_| T::default())
    }

    /// Allocates `len` elements, element `i` set to `init(i)`.
    ///
    /// If `init` panics, the elements written so far are dropped and the
    /// block is deallocated before the panic continues.
    pub fn from_fn<F>(len: usize, mut init: F) -> Result<Self, AllocError>
    where
        F: FnMut(usize) -> T,
    {
        let layout = Layout::array::<T>(len).map_err(|_| AllocError::CapacityOverflow)?;

        let ptr = if layout.size() == 0 {
            NonNull::dangling()
        } else {
            // SAFETY: layout has a non-zero size.
            let raw = unsafe { alloc(layout) } as *mut T;
            NonNull::new(raw).ok_or(AllocError::OutOfMemory {
                bytes: layout.size(),
            })?
        };

        let initialized = Cell::new(0usize);
        let guard = ScopeGuard::new(|| {
            // SAFETY: exactly the first `initialized` slots were written, and
            // the block came from `alloc(layout)` when its size is non-zero.
            unsafe { free_block(ptr, initialized.get(), layout) };
        });

        for i in 0..len {
            let value = init(i);
            // SAFETY: `i < len`, so the slot is inside the allocation.
            unsafe { ptr.as_ptr().add(i).write(value) };
            initialized.set(i + 1);
        }
        guard.disarm();

        debug!(len, bytes = layout.size(), "allocated heap array");
        Ok(HeapArray {
            ptr,
            len,
            layout,
            _owns: PhantomData,
        })
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Size of the allocation in bytes.
    pub fn byte_size(&self) -> usize {
        self.layout.size()
    }

    pub fn as_ptr(&self) -> *const T {
        self.ptr.as_ptr()
    }

    pub fn as_mut_ptr(&mut self) -> *mut T {
        self.ptr.as_ptr()
    }

    /// Releases the block now. Equivalent to letting it go out of scope.
    ///
    /// The array is moved in, so it cannot be used afterwards:
    ///
    /// ```compile_fail
    /// use pointer_basics::heap_array::HeapArray;
    ///
    /// let years = HeapArray::<i32>::new(10).unwrap();
    /// years.release();
    /// println!("{}", years[0]);
    /// ```
    pub fn release(self) {
        drop(self);
    }
}

impl<T> Drop for HeapArray<T> {
    fn drop(&mut self) {
        // SAFETY: all `len` elements are initialized and the block is owned.
        unsafe { free_block(self.ptr, self.len, self.layout) };
        debug!(len = self.len, bytes = self.layout.size(), "released heap array");
    }
}

impl<T> Deref for HeapArray<T> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        // SAFETY: `ptr` is aligned, non-null and covers `len` initialized
        // elements (or is dangling with `len * size_of::<T>() == 0`).
        unsafe { slice::from_raw_parts(self.ptr.as_ptr(), self.len) }
    }
}

impl<T> DerefMut for HeapArray<T> {
    fn deref_mut(&mut self) -> &mut [T] {
        // SAFETY: as in `deref`, plus `&mut self` gives exclusive access.
        unsafe { slice::from_raw_parts_mut(self.ptr.as_ptr(), self.len) }
    }
}

impl<T: fmt::Debug> fmt::Debug for HeapArray<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

// Safety: HeapArray<T> owns its elements like Box<[T]> does.
unsafe impl<T: Send> Send for HeapArray<T> {}
unsafe impl<T: Sync> Sync for HeapArray<T> {}

/// Drops the first `initialized` elements and returns the block.
///
/// The block is returned even if an element's `Drop` panics.
///
/// # Safety
///
/// `ptr` must come from `alloc(layout)` (or be dangling when
/// `layout.size() == 0`) and its first `initialized` slots must hold live
/// values. The block must not be used again.
unsafe fn free_block<T>(ptr: NonNull<T>, initialized: usize, layout: Layout) {
    let _dealloc = ScopeGuard::new(|| {
        if layout.size() != 0 {
            dealloc(ptr.as_ptr() as *mut u8, layout);
        }
    });
    ptr::drop_in_place(ptr::slice_from_raw_parts_mut(ptr.as_ptr(), initialized));
}

// Runs `cleanup` on drop unless disarmed.
struct ScopeGuard<F: FnOnce()> {
    cleanup: Option<F>,
}

impl<F: FnOnce()> ScopeGuard<F> {
    fn new(cleanup: F) -> Self {
        ScopeGuard {
            cleanup: Some(cleanup),
        }
    }

    fn disarm(mut self) {
        self.cleanup = None;
    }
}

impl<F: FnOnce()> Drop for ScopeGuard<F> {
    fn drop(&mut self) {
        if let Some(cleanup) = self.cleanup.take() {
            cleanup();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::panic::{self, AssertUnwindSafe};
    use std::rc::Rc;

    #[test]
    fn test_ten_ints_default_to_zero() {
        let years = HeapArray::<i32>::new(10).unwrap();
        assert_eq!(years.len(), 10);
        assert_eq!(years.byte_size(), 40);
        assert!(years.iter().all(|&y| y == 0));
        years.release();
    }

    #[test]
    fn test_from_fn_and_mutation() {
        let mut squares = HeapArray::from_fn(5, |i| (i * i) as u64).unwrap();
        assert_eq!(&squares[..], &[0, 1, 4, 9, 16]);

        squares[2] = 100;
        squares.iter_mut().for_each(|x| *x += 1);
        assert_eq!(&squares[..], &[1, 2, 101, 10, 17]);
    }

    #[test]
    fn test_elements_are_contiguous() {
        let values = HeapArray::<u32>::new(4).unwrap();
        let base = values.as_ptr() as usize;
        for (i, slot) in values.iter().enumerate() {
            assert_eq!(slot as *const u32 as usize, base + i * 4);
        }
    }

    #[test]
    fn test_zero_length_allocates_nothing() {
        let empty = HeapArray::<i32>::new(0).unwrap();
        assert!(empty.is_empty());
        assert_eq!(empty.byte_size(), 0);
        assert_eq!(&empty[..], &[] as &[i32]);
    }

    #[test]
    fn test_zero_sized_elements() {
        let units = HeapArray::<()>::new(1_000).unwrap();
        assert_eq!(units.len(), 1_000);
        assert_eq!(units.byte_size(), 0);
    }

    #[test]
    fn test_capacity_overflow() {
        let err = HeapArray::<u64>::new(usize::MAX / 4).unwrap_err();
        assert_eq!(err, AllocError::CapacityOverflow);
    }

    #[test]
    fn test_out_of_memory_is_reported() {
        let len = isize::MAX as usize / std::mem::size_of::<u64>();
        match HeapArray::<u64>::new(len) {
            Err(AllocError::OutOfMemory { bytes }) => assert_eq!(bytes, len * 8),
            other => panic!("expected OutOfMemory, got {:?}", other.map(|a| a.len())),
        }
    }

    #[test]
    fn test_drop_releases_elements() {
        let token = Rc::new(());
        let shared = HeapArray::from_fn(8, |_| Rc::clone(&token)).unwrap();
        assert_eq!(Rc::strong_count(&token), 9);

        drop(shared);
        assert_eq!(Rc::strong_count(&token), 1);
    }

    #[test]
    fn test_panic_during_init_drops_written_elements() {
        let token = Rc::new(());
        let result = panic::catch_unwind(AssertUnwindSafe(|| {
            HeapArray::from_fn(8, |i| {
                if i == 5 {
                    panic!("init failed at {i}");
                }
                Rc::clone(&token)
            })
        }));

        assert!(result.is_err());
        assert_eq!(Rc::strong_count(&token), 1);
    }

    #[test]
    fn test_panicking_element_drop_still_drops_the_rest() {
        struct Fragile {
            id: usize,
            _token: Rc<()>,
        }

        impl Drop for Fragile {
            fn drop(&mut self) {
                if self.id == 1 {
                    panic!("element {} refused to drop", self.id);
                }
            }
        }

        let token = Rc::new(());
        let block = HeapArray::from_fn(4, |id| Fragile {
            id,
            _token: Rc::clone(&token),
        })
        .unwrap();
        assert_eq!(Rc::strong_count(&token), 5);

        let result = panic::catch_unwind(AssertUnwindSafe(move || drop(block)));
        assert!(result.is_err());
        assert_eq!(Rc::strong_count(&token), 1);
    }

    #[test]
    fn test_early_return_releases() {
        fn hold_then_bail(token: &Rc<()>) -> Result<usize, AllocError> {
            let held = HeapArray::from_fn(3, |_| Rc::clone(token))?;
            if held.len() == 3 {
                return Err(AllocError::CapacityOverflow);
            }
            Ok(held.len())
        }

        let token = Rc::new(());
        assert!(hold_then_bail(&token).is_err());
        assert_eq!(Rc::strong_count(&token), 1);
    }

    #[test]
    fn test_debug_lists_elements() {
        let values = HeapArray::from_fn(3, |i| i as i32 - 1).unwrap();
        assert_eq!(format!("{:?}", values), "[-1, 0, 1]");
    }
}
