use crate::{IoResult, SeekMode, Stream};

/// A growable in-memory [`Stream`].
///
/// Seeks are clamped to the stored data, and writes past the end extend it.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct MemoryStream {
    data: Vec<u8>,
    head: usize,
}

impl MemoryStream {
    /// Create a stream holding `data`, positioned at the start.
    pub fn new<I: IntoIterator<Item = u8>>(data: I) -> Self {
        Self {
            data: data.into_iter().collect(),
            head: 0,
        }
    }

    /// The stored bytes.
    #[must_use]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Give back the stored bytes.
    #[must_use]
    pub fn into_inner(self) -> Vec<u8> {
        self.data
    }

    fn offset_from(&self, base: usize, offset: i64) -> usize {
        let distance = usize::try_from(offset.unsigned_abs()).unwrap_or(usize::MAX);
        let target = if offset < 0 {
            base.saturating_sub(distance)
        } else {
            base.saturating_add(distance)
        };
        target.min(self.data.len())
    }
}

impl Stream for MemoryStream {
    fn read(&mut self, buffer: &mut [u8]) -> IoResult {
        let available = &self.data[self.head..];
        let count = buffer.len().min(available.len());
        buffer[..count].copy_from_slice(&available[..count]);
        self.head += count;
        IoResult::ok(count)
    }

    fn write(&mut self, buffer: &[u8]) -> IoResult {
        let end = self.head + buffer.len();
        if end > self.data.len() {
            self.data.resize(end, 0);
        }
        self.data[self.head..end].copy_from_slice(buffer);
        self.head = end;
        IoResult::ok(buffer.len())
    }

    fn seek(&mut self, offset: i64, mode: SeekMode) -> IoResult {
        let base = match mode {
            SeekMode::Start => 0,
            SeekMode::Current => self.head,
            SeekMode::End => self.data.len(),
        };
        self.head = self.offset_from(base, offset);
        IoResult::ok(self.head)
    }

    fn tell(&self) -> IoResult {
        IoResult::ok(self.head)
    }
}
