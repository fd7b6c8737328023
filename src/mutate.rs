// Mutating a caller's value through a handle.
//
// Three ways for a callee to reach a cell it does not own:
// - an alias (`&mut T`), used exactly like the original value
// - an explicit address (`Addr<'a, T>`) that has to be dereferenced
// - a raw pointer (`*mut T`) with no lifetime tracking at all

use std::fmt;
use std::marker::PhantomData;
use std::ops::{Deref, DerefMut};
use std::ptr::NonNull;

use tracing::trace;

/// Scalars that can be stepped up by one.
///
/// Stepping wraps on overflow, so every value has a successor.
pub trait Increment: Copy {
    fn increment(self) -> Self;
}

macro_rules! impl_increment {
    ($($t:ty),* $(,)?) => {
        $(
            impl Increment for $t {
                #[inline]
                fn increment(self) -> Self {
                    self.wrapping_add(1)
                }
            }
        )*
    };
}

impl_increment!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

// ============================================================================
// Alias form
// ============================================================================

/// Increments the caller's cell through an alias.
pub fn inc_reference<T: Increment>(value: &mut T) {
    *value = value.increment();
}

// ============================================================================
// Address form
// ============================================================================

/// An explicit, non-owning address of a value cell.
///
/// `Addr` holds the location of a cell rather than being the cell, so reads
/// and writes go through `*addr`, [`Addr::read`] or [`Addr::write`]. The
/// lifetime ties it to the borrow it was taken from; it cannot outlive the
/// cell:
///
/// ```compile_fail
/// use pointer_basics::mutate::Addr;
///
/// let dangling = {
///     let mut day = 29;
///     Addr::of(&mut day)
/// };
/// println!("{}", *dangling);
/// ```
pub struct Addr<'a, T> {
    ptr: NonNull<T>,
    _cell: PhantomData<&'a mut T>,
}

impl<'a, T> Addr<'a, T> {
    /// Takes the address of `cell`. The cell stays borrowed while the
    /// address is alive.
    pub fn of(cell: &'a mut T) -> Self {
        Addr {
            ptr: NonNull::from(cell),
            _cell: PhantomData,
        }
    }

    /// The numeric address of the cell.
    pub fn address(&self) -> usize {
        self.ptr.as_ptr() as usize
    }

    pub fn as_ptr(&self) -> *const T {
        self.ptr.as_ptr()
    }

    pub fn as_mut_ptr(&mut self) -> *mut T {
        self.ptr.as_ptr()
    }

    pub fn read(&self) -> T
    where
        T: Copy,
    {
        **self
    }

    /// Overwrites the pointed-to cell.
    pub fn write(&mut self, value: T) {
        **self = value;
    }
}

impl<T> Deref for Addr<'_, T> {
    type Target = T;

    fn deref(&self) -> &T {
        // SAFETY: `ptr` came from a `&'a mut T` that this value still borrows.
        unsafe { self.ptr.as_ref() }
    }
}

impl<T> DerefMut for Addr<'_, T> {
    fn deref_mut(&mut self) -> &mut T {
        // SAFETY: as above; the exclusive borrow is held for `'a`.
        unsafe { self.ptr.as_mut() }
    }
}

impl<T> fmt::Pointer for Addr<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Pointer::fmt(&self.as_ptr(), f)
    }
}

impl<T> fmt::Debug for Addr<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Addr").field(&self.as_ptr()).finish()
    }
}

/// Increments the cell behind an explicit address.
pub fn inc_pointer<T: Increment>(mut value: Addr<'_, T>) {
    trace!(address = value.address(), "increment through address");
    *value = (*value).increment();
}

// ============================================================================
// Raw form
// ============================================================================

/// Increments the cell behind a raw pointer.
///
/// # Safety
///
/// `value` must be non-null, aligned, and point to a live `T` that nothing
/// else is accessing for the duration of the call.
pub unsafe fn inc_raw<T: Increment>(value: *mut T) {
    *value = (*value).increment();
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_reference_then_pointer() {
        let mut day = 20;

        inc_reference(&mut day);
        assert_eq!(day, 21);

        inc_pointer(Addr::of(&mut day));
        assert_eq!(day, 22);
    }

    #[test]
    fn test_raw_pointer_increment() {
        let mut day = 7u8;
        unsafe { inc_raw(&mut day as *mut u8) };
        assert_eq!(day, 8);
    }

    #[test]
    fn test_increment_wraps_at_max() {
        let mut value = i32::MAX;
        inc_reference(&mut value);
        assert_eq!(value, i32::MIN);

        let mut byte = u8::MAX;
        inc_pointer(Addr::of(&mut byte));
        assert_eq!(byte, 0);
    }

    #[test]
    fn test_write_through_address_is_visible() {
        let mut day = 29;
        {
            let mut p_day = Addr::of(&mut day);
            assert_eq!(p_day.read(), 29);
            p_day.write(30);
            assert_eq!(*p_day, 30);
        }
        assert_eq!(day, 30);
    }

    #[test]
    fn test_address_matches_cell_location() {
        let mut day = 1i64;
        let expected = &day as *const i64 as usize;
        let p_day = Addr::of(&mut day);
        assert_eq!(p_day.address(), expected);
        assert_eq!(format!("{:p}", p_day), format!("{:p}", expected as *const i64));
    }

    proptest! {
        #[test]
        fn prop_alias_form_adds_one(v: i32) {
            let mut cell = v;
            inc_reference(&mut cell);
            prop_assert_eq!(cell, v.wrapping_add(1));
        }

        #[test]
        fn prop_address_form_matches_alias_form(v: i64) {
            let mut by_alias = v;
            let mut by_address = v;

            inc_reference(&mut by_alias);
            inc_pointer(Addr::of(&mut by_address));

            prop_assert_eq!(by_address, v.wrapping_add(1));
            prop_assert_eq!(by_alias, by_address);
        }
    }
}
