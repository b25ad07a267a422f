//! Owned scratch buffers.

use std::ops::{Deref, DerefMut};

/// A heap buffer whose length only changes when it is explicitly reallocated.
///
/// Elements are accessed through the slice it dereferences to.
///
/// # Examples
///
/// ```
/// # use vstutil_helpers::buffer::Buffer;
/// let mut buffer = Buffer::<f32>::new(4);
/// buffer.fill(0.5);
/// buffer[1] = 1.0;
/// assert_eq!(buffer.iter().sum::<f32>(), 2.5);
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Buffer<T> {
    data: Box<[T]>,
}

impl<T: Clone + Default> Buffer<T> {
    /// Create a buffer of `len` default elements.
    #[must_use]
    pub fn new(len: usize) -> Self {
        let mut buffer = Self {
            data: Box::default(),
        };
        buffer.allocate(len);
        buffer
    }

    /// Replace the contents with `len` default elements.
    pub fn allocate(&mut self, len: usize) {
        self.data = vec![T::default(); len].into_boxed_slice();
    }
}

impl<T: Clone> Buffer<T> {
    /// Set every element to `value`.
    pub fn fill(&mut self, value: T) {
        self.data.fill(value);
    }
}

impl<T> Deref for Buffer<T> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        &self.data
    }
}

impl<T> DerefMut for Buffer<T> {
    fn deref_mut(&mut self) -> &mut [T] {
        &mut self.data
    }
}

impl<'a, T> IntoIterator for &'a Buffer<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut Buffer<T> {
    type Item = &'a mut T;
    type IntoIter = std::slice::IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.iter_mut()
    }
}
