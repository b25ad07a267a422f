//! The byte-order codec.
//!
//! [`ByteOrderStream`] moves [`Element`]s between memory and a [`Stream`],
//! swapping bytes when the configured [`ByteOrder`] differs from the target's.
//! Whether to swap is decided once, at construction.
//!
//! # Error policy
//!
//! The second type parameter selects how failures are reported:
//!
//! - [`Tagged`] (the default) returns an [`IoResult`] from every operation
//!   and leaves it to the caller to check.
//! - [`FailFast`] returns `Result<usize, IoError>`, so failures propagate
//!   with `?`.
//!
//! Either way nothing is retried and partial byte counts are reported as-is.

use std::marker::PhantomData;

use crate::{
    IoResult, SeekMode, Status, Stream,
    byte_order::{ByteOrder, Element, MAX_ELEMENT_SIZE},
};

/// The kind of operation that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// Reading from the stream.
    Read,
    /// Writing to the stream.
    Write,
    /// Moving the stream position.
    Seek,
    /// Querying the stream position.
    Tell,
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Read => "read",
            Self::Write => "write",
            Self::Seek => "seek",
            Self::Tell => "tell",
        })
    }
}

/// Error reported by a [`FailFast`] codec.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("{operation} failure ({status:?}) after {bytes} bytes")]
pub struct IoError {
    /// The operation that failed.
    pub operation: Operation,

    /// The failing status.
    pub status: Status,

    /// Bytes transferred before the failure, or the position reported by a
    /// failed seek or tell.
    pub bytes: usize,
}

mod sealed {
    pub trait Sealed {}
}

/// How a [`ByteOrderStream`] reports the outcome of its operations.
pub trait ErrorPolicy: sealed::Sealed {
    /// What each operation returns.
    type Output;

    /// Turn the outcome of `operation` into the policy's output.
    fn complete(operation: Operation, result: IoResult) -> Self::Output;
}

/// Report every outcome as an [`IoResult`].
#[derive(Debug, Clone, Copy)]
pub enum Tagged {}

/// Report failures as [`IoError`]s.
#[derive(Debug, Clone, Copy)]
pub enum FailFast {}

impl sealed::Sealed for Tagged {}
impl sealed::Sealed for FailFast {}

impl ErrorPolicy for Tagged {
    type Output = IoResult;

    fn complete(_: Operation, result: IoResult) -> IoResult {
        result
    }
}

impl ErrorPolicy for FailFast {
    type Output = Result<usize, IoError>;

    fn complete(operation: Operation, result: IoResult) -> Result<usize, IoError> {
        if result.is_ok() {
            Ok(result.bytes)
        } else {
            Err(IoError {
                operation,
                status: result.status,
                bytes: result.bytes,
            })
        }
    }
}

/// Reads and writes byte-ordered values over a borrowed [`Stream`].
///
/// The byte order and error policy are fixed for the life of the codec.
///
/// Note that the codec does not buffer - every element is a separate call to
/// the underlying stream.
#[derive(Debug)]
pub struct ByteOrderStream<S, P = Tagged> {
    stream: S,
    order: ByteOrder,
    swap: bool,
    policy: PhantomData<P>,
}

impl<S: Stream> ByteOrderStream<S, Tagged> {
    /// Create a codec that reports outcomes as [`IoResult`]s.
    pub fn new(stream: S, order: ByteOrder) -> Self {
        Self::with_policy(stream, order)
    }
}

impl<S: Stream> ByteOrderStream<S, FailFast> {
    /// Create a codec that reports failures as [`IoError`]s.
    pub fn fail_fast(stream: S, order: ByteOrder) -> Self {
        Self::with_policy(stream, order)
    }

    /// Read a single value.
    ///
    /// # Errors
    ///
    /// Returns an [`IoError`] if the stream fails or runs out of data.
    pub fn read_value<T: Element + Default>(&mut self) -> Result<T, IoError> {
        let mut value = T::default();
        self.read(&mut value)?;
        Ok(value)
    }
}

impl<S: Stream, P: ErrorPolicy> ByteOrderStream<S, P> {
    fn with_policy(stream: S, order: ByteOrder) -> Self {
        Self {
            stream,
            order,
            swap: order.needs_swap(),
            policy: PhantomData,
        }
    }

    /// The byte order this codec was created with.
    pub fn byte_order(&self) -> ByteOrder {
        self.order
    }

    /// Borrow the underlying stream.
    pub fn get_ref(&self) -> &S {
        &self.stream
    }

    /// Mutably borrow the underlying stream.
    pub fn get_mut(&mut self) -> &mut S {
        &mut self.stream
    }

    /// Give back the underlying stream.
    pub fn into_inner(self) -> S {
        self.stream
    }

    /// Move the stream position.
    ///
    /// On success the byte count of the outcome is the new position.
    pub fn seek(&mut self, mode: SeekMode, offset: i64) -> P::Output {
        let result = self.stream.seek(offset, mode);
        if !result.is_ok() {
            log::debug!("seek to {offset} ({mode:?}) failed: {:?}", result.status);
        }
        P::complete(Operation::Seek, result)
    }

    /// Report the stream position.
    pub fn tell(&self) -> P::Output {
        P::complete(Operation::Tell, self.stream.tell())
    }

    /// Read one value into `out`.
    ///
    /// `out` is only written if the whole value could be read.
    pub fn read<T: Element>(&mut self, out: &mut T) -> P::Output {
        P::complete(Operation::Read, self.read_element(out))
    }

    /// Write one value.
    pub fn write<T: Element>(&mut self, value: &T) -> P::Output {
        P::complete(Operation::Write, self.write_element(*value))
    }

    /// Fill `out` with consecutive values.
    ///
    /// Stops at the first failure, reporting its status and the bytes read
    /// so far.
    pub fn read_slice<T: Element>(&mut self, out: &mut [T]) -> P::Output {
        self.read_iter(out.iter_mut())
    }

    /// Write consecutive values.
    ///
    /// Stops at the first failure, reporting its status and the bytes
    /// written so far.
    pub fn write_slice<T: Element>(&mut self, values: &[T]) -> P::Output {
        self.write_iter(values.iter().copied())
    }

    /// Read one value into each slot yielded by `slots`.
    ///
    /// Stops at the first failure without touching the remaining slots.
    pub fn read_iter<'a, T, I>(&mut self, slots: I) -> P::Output
    where
        T: Element + 'a,
        I: IntoIterator<Item = &'a mut T>,
    {
        let mut total = 0;
        for slot in slots {
            let result = self.read_element(slot);
            total += result.bytes;
            if !result.is_ok() {
                return P::complete(Operation::Read, IoResult::new(result.status, total));
            }
        }
        P::complete(Operation::Read, IoResult::ok(total))
    }

    /// Write every value yielded by `values`.
    ///
    /// Stops at the first failure without pulling further values.
    pub fn write_iter<T, I>(&mut self, values: I) -> P::Output
    where
        T: Element,
        I: IntoIterator<Item = T>,
    {
        let mut total = 0;
        for value in values {
            let result = self.write_element(value);
            total += result.bytes;
            if !result.is_ok() {
                return P::complete(Operation::Write, IoResult::new(result.status, total));
            }
        }
        P::complete(Operation::Write, IoResult::ok(total))
    }

    /// Read bytes exactly as stored, without any byte-order conversion.
    pub fn read_raw(&mut self, buffer: &mut [u8]) -> P::Output {
        P::complete(Operation::Read, self.transfer_in(buffer))
    }

    /// Write bytes exactly as given, without any byte-order conversion.
    pub fn write_raw(&mut self, buffer: &[u8]) -> P::Output {
        P::complete(Operation::Write, self.transfer_out(buffer))
    }

    fn read_element<T: Element>(&mut self, out: &mut T) -> IoResult {
        let mut scratch = Scratch::new(T::SIZE);
        let bytes = scratch.bytes();
        let result = self.transfer_in(bytes);
        if result.is_ok() {
            if self.swap {
                T::swap_order(bytes);
            }
            *out = T::decode_native(bytes);
        }
        result
    }

    fn write_element<T: Element>(&mut self, value: T) -> IoResult {
        let mut scratch = Scratch::new(T::SIZE);
        let bytes = scratch.bytes();
        value.encode_native(bytes);
        if self.swap {
            T::swap_order(bytes);
        }
        self.transfer_out(bytes)
    }

    fn transfer_in(&mut self, buffer: &mut [u8]) -> IoResult {
        let limit = self.stream.max_transfer();
        if buffer.len() > limit {
            log::debug!(
                "refusing to read {} bytes, stream limit is {limit}",
                buffer.len()
            );
            return IoResult::new(Status::InvalidArgument, 0);
        }
        let result = complete_transfer(self.stream.read(buffer), buffer.len());
        if !result.is_ok() {
            log::debug!(
                "read of {} bytes failed after {}: {:?}",
                buffer.len(),
                result.bytes,
                result.status
            );
        }
        result
    }

    fn transfer_out(&mut self, buffer: &[u8]) -> IoResult {
        let limit = self.stream.max_transfer();
        if buffer.len() > limit {
            log::debug!(
                "refusing to write {} bytes, stream limit is {limit}",
                buffer.len()
            );
            return IoResult::new(Status::InvalidArgument, 0);
        }
        let result = complete_transfer(self.stream.write(buffer), buffer.len());
        if !result.is_ok() {
            log::debug!(
                "write of {} bytes failed after {}: {:?}",
                buffer.len(),
                result.bytes,
                result.status
            );
        }
        result
    }
}

/// Staging bytes for one element; only large composite elements allocate.
enum Scratch {
    Stack([u8; MAX_ELEMENT_SIZE], usize),
    Heap(Vec<u8>),
}

impl Scratch {
    fn new(size: usize) -> Self {
        if size <= MAX_ELEMENT_SIZE {
            Self::Stack([0; MAX_ELEMENT_SIZE], size)
        } else {
            Self::Heap(vec![0; size])
        }
    }

    fn bytes(&mut self) -> &mut [u8] {
        match self {
            Self::Stack(bytes, size) => &mut bytes[..*size],
            Self::Heap(bytes) => bytes,
        }
    }
}

/// A stream that claims success for a short transfer has still failed to
/// move the requested bytes.
fn complete_transfer(result: IoResult, requested: usize) -> IoResult {
    if result.is_ok() && result.bytes < requested {
        IoResult::new(Status::Incomplete, result.bytes)
    } else {
        result
    }
}

#[cfg(test)]
mod tests;
