use crate::{IoError, IoResult, Operation, SeekMode, Status, Stream};

/// Adapts a [`Stream`] to [`std::io::Read`], [`std::io::Write`] and
/// [`std::io::Seek`].
///
/// This lets serializers that speak `std::io` (for example `rmp_serde`) read
/// and write whole documents through a host stream.
///
/// WARNING - do not touch the stream through another handle while a
/// `StreamIo` is active.
#[derive(Debug, Default)]
pub struct StreamIo<S> {
    stream: S,
}

impl<S: Stream> StreamIo<S> {
    /// Wrap `stream`.
    pub fn new(stream: S) -> Self {
        Self { stream }
    }

    /// Give back the underlying stream.
    pub fn into_inner(self) -> S {
        self.stream
    }
}

fn to_io(operation: Operation, result: IoResult) -> std::io::Result<usize> {
    match result.status {
        // `std::io` callers handle short transfers themselves.
        Status::Ok | Status::Incomplete => Ok(result.bytes),
        status => Err(std::io::Error::other(IoError {
            operation,
            status,
            bytes: result.bytes,
        })),
    }
}

impl<S: Stream> std::io::Read for StreamIo<S> {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        let len = buf.len().min(self.stream.max_transfer());
        to_io(Operation::Read, self.stream.read(&mut buf[..len]))
    }
}

impl<S: Stream> std::io::Write for StreamIo<S> {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        let len = buf.len().min(self.stream.max_transfer());
        to_io(Operation::Write, self.stream.write(&buf[..len]))
    }

    /// We treat the stream as a sink, so no flushing is required.
    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl<S: Stream> std::io::Seek for StreamIo<S> {
    fn seek(&mut self, pos: std::io::SeekFrom) -> std::io::Result<u64> {
        let (offset, mode) = match pos {
            std::io::SeekFrom::Start(offset) => (
                i64::try_from(offset).map_err(|_| {
                    std::io::Error::new(std::io::ErrorKind::InvalidInput, "seek offset too large")
                })?,
                SeekMode::Start,
            ),
            std::io::SeekFrom::Current(offset) => (offset, SeekMode::Current),
            std::io::SeekFrom::End(offset) => (offset, SeekMode::End),
        };
        let position = to_io(Operation::Seek, self.stream.seek(offset, mode))?;
        Ok(position as u64)
    }
}
