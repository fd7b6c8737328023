//! Const-qualified address handles.
//!
//! Two independent restrictions can be put on a handle:
//!
//! | handle               | write through it | point it elsewhere |
//! |----------------------|------------------|--------------------|
//! | [`ReadOnly`]         | no               | yes                |
//! | [`Fixed`]            | yes              | no                 |
//! | [`FixedReadOnly`]    | no               | no                 |
//!
//! The language already expresses both with plain references: `&T` is a
//! read-only target, and a binding without `mut` cannot be reassigned.
//!
//! ```compile_fail
//! let mut month = 11;
//! let p_month: &i32 = &month;
//! *p_month = 12; // cannot assign through `&` reference
//! ```
//!
//! ```compile_fail
//! let month = 11;
//! let holiday = 6;
//! let p_month: &i32 = &month;
//! p_month = &holiday; // cannot assign twice to immutable variable
//! ```
//!
//! The wrapper types below name the restriction in the type, so it travels
//! with the handle through function signatures.

use std::fmt;
use std::ops::{Deref, DerefMut};

/// A handle that can read its target but never write it. It may be pointed
/// at another cell with [`ReadOnly::rebind`].
///
/// ```compile_fail
/// use pointer_basics::qualifiers::ReadOnly;
///
/// let month = 11;
/// let mut p_month = ReadOnly::new(&month);
/// *p_month = 12;
/// ```
#[derive(Clone, Copy)]
pub struct ReadOnly<'a, T> {
    target: &'a T,
}

impl<'a, T> ReadOnly<'a, T> {
    pub fn new(target: &'a T) -> Self {
        ReadOnly { target }
    }

    /// Points the handle at a different cell.
    pub fn rebind(&mut self, target: &'a T) {
        self.target = target;
    }

    pub fn as_ptr(&self) -> *const T {
        self.target
    }
}

impl<T> Deref for ReadOnly<'_, T> {
    type Target = T;

    fn deref(&self) -> &T {
        self.target
    }
}

/// A handle permanently bound to one cell. Writes go through; rebinding
/// does not exist.
///
/// ```compile_fail
/// use pointer_basics::qualifiers::Fixed;
///
/// let mut month = 11;
/// let mut holiday = 6;
/// let mut p_month = Fixed::new(&mut month);
/// p_month.rebind(&mut holiday);
/// ```
pub struct Fixed<'a, T> {
    target: &'a mut T,
}

impl<'a, T> Fixed<'a, T> {
    pub fn new(target: &'a mut T) -> Self {
        Fixed { target }
    }

    pub fn as_ptr(&self) -> *const T {
        &*self.target
    }
}

impl<T> Deref for Fixed<'_, T> {
    type Target = T;

    fn deref(&self) -> &T {
        self.target
    }
}

impl<T> DerefMut for Fixed<'_, T> {
    fn deref_mut(&mut self) -> &mut T {
        self.target
    }
}

/// Read-only target and fixed binding at once.
///
/// ```compile_fail
/// use pointer_basics::qualifiers::FixedReadOnly;
///
/// let month = 11;
/// let mut p_month = FixedReadOnly::new(&month);
/// *p_month = 12;
/// ```
///
/// ```compile_fail
/// use pointer_basics::qualifiers::FixedReadOnly;
///
/// let month = 11;
/// let holiday = 6;
/// let mut p_month = FixedReadOnly::new(&month);
/// p_month.rebind(&holiday);
/// ```
#[derive(Clone, Copy)]
pub struct FixedReadOnly<'a, T> {
    target: &'a T,
}

impl<'a, T> FixedReadOnly<'a, T> {
    pub fn new(target: &'a T) -> Self {
        FixedReadOnly { target }
    }

    pub fn as_ptr(&self) -> *const T {
        self.target
    }
}

impl<T> Deref for FixedReadOnly<'_, T> {
    type Target = T;

    fn deref(&self) -> &T {
        self.target
    }
}

impl<'a, T> From<Fixed<'a, T>> for FixedReadOnly<'a, T> {
    /// Gives up write access; the binding stays fixed.
    fn from(handle: Fixed<'a, T>) -> Self {
        FixedReadOnly {
            target: handle.target,
        }
    }
}

macro_rules! impl_debug {
    ($($name:ident),*) => {
        $(
            impl<T: fmt::Debug> fmt::Debug for $name<'_, T> {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.debug_tuple(stringify!($name)).field(&**self).finish()
                }
            }
        )*
    };
}

impl_debug!(ReadOnly, Fixed, FixedReadOnly);
