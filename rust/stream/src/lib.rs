#![doc = include_str!("../README.md")]

use serde::{Deserialize, Serialize};

mod byte_order;
mod codec;
mod io;
mod memory;

#[cfg(feature = "vst3")]
pub mod ibstream;

pub use byte_order::{ByteOrder, Element, swap_bytes};
pub use codec::{ByteOrderStream, ErrorPolicy, FailFast, IoError, Operation, Tagged};
pub use io::StreamIo;
pub use memory::MemoryStream;

/// Status code reported by a [`Stream`] primitive or by the codec itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    /// The operation succeeded.
    Ok,

    /// The underlying stream reported a failure.
    Failed,

    /// An argument was rejected.
    ///
    /// The codec reports this without touching the stream when a transfer is
    /// larger than [`Stream::max_transfer`].
    InvalidArgument,

    /// The stream reported success but moved fewer bytes than requested.
    Incomplete,

    /// The stream does not support the operation.
    NotImplemented,
}

/// The outcome of a single stream operation.
///
/// For reads and writes `bytes` is the number of bytes transferred; for seeks
/// and tells it is the stream position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[must_use]
pub struct IoResult {
    /// Status of the operation.
    pub status: Status,

    /// Bytes transferred, or the resulting position.
    pub bytes: usize,
}

impl IoResult {
    /// Create a result with the given status and byte count.
    pub const fn new(status: Status, bytes: usize) -> Self {
        Self { status, bytes }
    }

    /// Create a successful result.
    pub const fn ok(bytes: usize) -> Self {
        Self::new(Status::Ok, bytes)
    }

    /// Whether the operation succeeded.
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.status == Status::Ok
    }
}

impl From<IoResult> for bool {
    fn from(result: IoResult) -> Self {
        result.is_ok()
    }
}

/// Origin of a seek.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeekMode {
    /// Relative to the beginning of the stream.
    Start,

    /// Relative to the current position.
    Current,

    /// Relative to the end of the stream.
    End,
}

/// A seekable byte stream owned by someone else, usually the host.
///
/// Each primitive reports a [`Status`] alongside its byte count (or position)
/// instead of failing through `Result`, matching the shape of host stream
/// interfaces.
///
/// The trait is object safe, so codecs can work over a `&mut dyn Stream`.
pub trait Stream {
    /// The largest number of bytes a single `read` or `write` call can move.
    ///
    /// Host streams take 32-bit signed byte counts.
    fn max_transfer(&self) -> usize {
        i32::MAX as usize
    }

    /// Read up to `buffer.len()` bytes into `buffer`.
    fn read(&mut self, buffer: &mut [u8]) -> IoResult;

    /// Write the whole of `buffer`.
    fn write(&mut self, buffer: &[u8]) -> IoResult;

    /// Move the stream position, reporting the new position.
    fn seek(&mut self, offset: i64, mode: SeekMode) -> IoResult;

    /// Report the current position.
    fn tell(&self) -> IoResult;
}

impl<S: Stream + ?Sized> Stream for &mut S {
    fn max_transfer(&self) -> usize {
        (**self).max_transfer()
    }

    fn read(&mut self, buffer: &mut [u8]) -> IoResult {
        (**self).read(buffer)
    }

    fn write(&mut self, buffer: &[u8]) -> IoResult {
        (**self).write(buffer)
    }

    fn seek(&mut self, offset: i64, mode: SeekMode) -> IoResult {
        (**self).seek(offset, mode)
    }

    fn tell(&self) -> IoResult {
        (**self).tell()
    }
}
