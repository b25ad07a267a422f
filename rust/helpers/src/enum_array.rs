//! Fixed-size arrays indexed by an enum.

use std::{
    marker::PhantomData,
    ops::{Deref, DerefMut, Index, IndexMut},
};

/// An array with one element per variant of `E`.
///
/// `E` converts to the element's position through `Into<usize>`. Positional
/// access goes through [`EnumArray::set`] or the array this dereferences to.
///
/// # Examples
///
/// ```
/// # use vstutil_helpers::enum_array::EnumArray;
/// #[derive(Clone, Copy)]
/// enum Channel {
///     Left,
///     Right,
/// }
///
/// impl From<Channel> for usize {
///     fn from(channel: Channel) -> usize {
///         channel as usize
///     }
/// }
///
/// let mut peaks = EnumArray::<f32, Channel, 2>::default();
/// peaks[Channel::Right] = 0.5;
/// assert_eq!(peaks[Channel::Left], 0.0);
/// assert_eq!(peaks.into_inner(), [0.0, 0.5]);
/// ```
pub struct EnumArray<T, E, const N: usize> {
    values: [T; N],
    index: PhantomData<fn(E)>,
}

impl<T, E, const N: usize> EnumArray<T, E, N> {
    /// Wrap an existing array.
    #[must_use]
    pub const fn new(values: [T; N]) -> Self {
        Self {
            values,
            index: PhantomData,
        }
    }

    /// Number of elements.
    #[must_use]
    pub const fn count() -> usize {
        N
    }

    /// Set the element at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    pub fn set(&mut self, index: usize, value: T) {
        self.values[index] = value;
    }

    /// Unwrap the underlying array.
    #[must_use]
    pub fn into_inner(self) -> [T; N] {
        self.values
    }
}

impl<T: Default, E, const N: usize> Default for EnumArray<T, E, N> {
    fn default() -> Self {
        Self::new(std::array::from_fn(|_| T::default()))
    }
}

impl<T: Clone, E, const N: usize> Clone for EnumArray<T, E, N> {
    fn clone(&self) -> Self {
        Self::new(self.values.clone())
    }
}

impl<T: std::fmt::Debug, E, const N: usize> std::fmt::Debug for EnumArray<T, E, N> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(&self.values).finish()
    }
}

impl<T: PartialEq, E, const N: usize> PartialEq for EnumArray<T, E, N> {
    fn eq(&self, other: &Self) -> bool {
        self.values == other.values
    }
}

impl<T, E, const N: usize> From<[T; N]> for EnumArray<T, E, N> {
    fn from(values: [T; N]) -> Self {
        Self::new(values)
    }
}

impl<T, E: Into<usize>, const N: usize> Index<E> for EnumArray<T, E, N> {
    type Output = T;

    fn index(&self, index: E) -> &T {
        &self.values[index.into()]
    }
}

impl<T, E: Into<usize>, const N: usize> IndexMut<E> for EnumArray<T, E, N> {
    fn index_mut(&mut self, index: E) -> &mut T {
        &mut self.values[index.into()]
    }
}

impl<T, E, const N: usize> Deref for EnumArray<T, E, N> {
    type Target = [T; N];

    fn deref(&self) -> &[T; N] {
        &self.values
    }
}

impl<T, E, const N: usize> DerefMut for EnumArray<T, E, N> {
    fn deref_mut(&mut self) -> &mut [T; N] {
        &mut self.values
    }
}
