use proptest::prelude::*;

use super::{ByteOrderStream, FailFast, IoError, Operation};
use crate::{ByteOrder, Element, IoResult, MemoryStream, SeekMode, Status, Stream};

/// Counts calls, fails after a byte budget, and only moves 4 bytes per call.
#[derive(Default)]
struct LimitedStream {
    inner: MemoryStream,
    calls: usize,
    budget: Option<usize>,
}

impl LimitedStream {
    fn with_budget(budget: usize) -> Self {
        Self {
            budget: Some(budget),
            ..Default::default()
        }
    }
}

impl Stream for LimitedStream {
    fn max_transfer(&self) -> usize {
        4
    }

    fn read(&mut self, buffer: &mut [u8]) -> IoResult {
        self.calls += 1;
        self.inner.read(buffer)
    }

    fn write(&mut self, buffer: &[u8]) -> IoResult {
        self.calls += 1;
        match self.budget {
            Some(budget) if budget < buffer.len() => {
                let partial = self.inner.write(&buffer[..budget]);
                self.budget = Some(0);
                IoResult::new(Status::Failed, partial.bytes)
            }
            Some(budget) => {
                self.budget = Some(budget - buffer.len());
                self.inner.write(buffer)
            }
            None => self.inner.write(buffer),
        }
    }

    fn seek(&mut self, offset: i64, mode: SeekMode) -> IoResult {
        self.inner.seek(offset, mode)
    }

    fn tell(&self) -> IoResult {
        self.inner.tell()
    }
}

/// A stream whose every primitive fails.
struct BrokenStream;

impl Stream for BrokenStream {
    fn read(&mut self, _: &mut [u8]) -> IoResult {
        IoResult::new(Status::Failed, 0)
    }

    fn write(&mut self, _: &[u8]) -> IoResult {
        IoResult::new(Status::Failed, 0)
    }

    fn seek(&mut self, _: i64, _: SeekMode) -> IoResult {
        IoResult::new(Status::NotImplemented, 0)
    }

    fn tell(&self) -> IoResult {
        IoResult::new(Status::NotImplemented, 0)
    }
}

#[test]
fn writes_big_endian_bytes() {
    let mut memory = MemoryStream::default();
    let mut stream = ByteOrderStream::new(&mut memory, ByteOrder::Big);
    assert_eq!(stream.write(&0x0102_0304u32), IoResult::ok(4));
    assert_eq!(stream.write(&0x0506u16), IoResult::ok(2));
    assert_eq!(memory.data(), &[1, 2, 3, 4, 5, 6]);
}

#[test]
fn writes_little_endian_bytes() {
    let mut memory = MemoryStream::default();
    let mut stream = ByteOrderStream::new(&mut memory, ByteOrder::Little);
    assert_eq!(stream.write(&0x0102_0304u32), IoResult::ok(4));
    assert_eq!(memory.data(), &[4, 3, 2, 1]);
}

#[test]
fn reads_big_endian_bytes() {
    let data = MemoryStream::new([0x3f, 0xf0, 0, 0, 0, 0, 0, 0]);
    let mut stream = ByteOrderStream::new(data, ByteOrder::Big);
    let mut value = 0.0f64;
    assert_eq!(stream.read(&mut value), IoResult::ok(8));
    assert!((value - 1.0).abs() < f64::EPSILON);
}

#[test]
fn single_bytes_are_never_swapped() {
    let mut memory = MemoryStream::default();
    let mut stream = ByteOrderStream::new(&mut memory, ByteOrder::Big);
    assert!(stream.write(&0xabu8).is_ok());
    assert!(stream.write(&-1i8).is_ok());
    assert_eq!(memory.data(), &[0xab, 0xff]);
}

#[test]
fn short_read_fails_and_leaves_value() {
    let mut stream = ByteOrderStream::new(MemoryStream::new([1, 2]), ByteOrder::Little);
    let mut value = 7u32;
    assert_eq!(stream.read(&mut value), IoResult::new(Status::Incomplete, 2));
    assert_eq!(value, 7);
}

#[test]
fn oversized_transfer_never_reaches_stream() {
    let mut limited = LimitedStream::default();
    let mut stream = ByteOrderStream::new(&mut limited, ByteOrder::Big);
    assert_eq!(stream.write(&1u64), IoResult::new(Status::InvalidArgument, 0));
    let mut value = 0u64;
    assert_eq!(stream.read(&mut value), IoResult::new(Status::InvalidArgument, 0));
    let too_large = IoResult::new(Status::InvalidArgument, 0);
    assert_eq!(stream.read_raw(&mut [0u8; 5]), too_large);
    assert_eq!(stream.write_raw(&[0u8; 5]), too_large);
    assert_eq!(limited.calls, 0);
}

#[test]
fn transfers_at_the_limit_reach_stream() {
    let mut limited = LimitedStream::default();
    let mut stream = ByteOrderStream::new(&mut limited, ByteOrder::Big);
    assert_eq!(stream.write(&1u32), IoResult::ok(4));
    assert_eq!(limited.calls, 1);
}

#[test]
fn slice_roundtrip_swapped() {
    let values = [1.5f32, -2.25, 1e10, 0.0];
    let mut memory = MemoryStream::default();
    {
        let mut stream = ByteOrderStream::new(&mut memory, ByteOrder::Big);
        assert_eq!(stream.write_slice(&values), IoResult::ok(16));
    }
    assert_eq!(&memory.data()[..4], &1.5f32.to_be_bytes());

    let data = MemoryStream::new(memory.into_inner());
    let mut stream = ByteOrderStream::new(data, ByteOrder::Big);
    let mut read = [0f32; 4];
    assert_eq!(stream.read_slice(&mut read), IoResult::ok(16));
    assert_eq!(read, values);
}

#[test]
fn iterator_roundtrip() {
    let mut memory = MemoryStream::default();
    {
        let mut stream = ByteOrderStream::new(&mut memory, ByteOrder::Little);
        assert_eq!(stream.write_iter((0..5).map(|x: i16| x * 100)), IoResult::ok(10));
    }
    let data = MemoryStream::new(memory.into_inner());
    let mut stream = ByteOrderStream::new(data, ByteOrder::Little);
    let mut read = vec![0i16; 5];
    assert_eq!(stream.read_iter(read.iter_mut()), IoResult::ok(10));
    assert_eq!(read, vec![0, 100, 200, 300, 400]);
}

#[test]
fn slice_write_stops_at_first_failure() {
    let mut limited = LimitedStream::with_budget(6);
    let mut stream = ByteOrderStream::new(&mut limited, ByteOrder::Big);
    assert_eq!(
        stream.write_slice(&[1u32, 2, 3, 4]),
        IoResult::new(Status::Failed, 6)
    );
    assert_eq!(limited.calls, 2);
    assert_eq!(limited.inner.data(), &[0, 0, 0, 1, 0, 0]);
}

#[test]
fn slice_read_stops_at_first_failure() {
    let mut stream = ByteOrderStream::new(MemoryStream::new([0, 1, 0, 2, 0]), ByteOrder::Big);
    let mut read = [9u16; 4];
    assert_eq!(stream.read_slice(&mut read), IoResult::new(Status::Incomplete, 5));
    assert_eq!(read, [1, 2, 9, 9]);
}

#[test]
fn raw_transfer_is_not_swapped() {
    let mut memory = MemoryStream::default();
    let mut stream = ByteOrderStream::new(&mut memory, ByteOrder::Big);
    assert_eq!(stream.write_raw(&[1, 2, 3]), IoResult::ok(3));
    assert!(stream.seek(SeekMode::Start, 0).is_ok());
    let mut buffer = [0u8; 3];
    assert_eq!(stream.read_raw(&mut buffer), IoResult::ok(3));
    assert_eq!(buffer, [1, 2, 3]);
}

#[test]
fn seek_and_tell_pass_through() {
    let mut stream = ByteOrderStream::new(MemoryStream::new(0..16), ByteOrder::Native);
    assert_eq!(stream.seek(SeekMode::Start, 4), IoResult::ok(4));
    assert_eq!(stream.seek(SeekMode::Current, 4), IoResult::ok(8));
    assert_eq!(stream.seek(SeekMode::End, -2), IoResult::ok(14));
    assert_eq!(stream.tell(), IoResult::ok(14));
    assert_eq!(stream.byte_order(), ByteOrder::Native);
    assert_eq!(stream.get_ref().tell(), IoResult::ok(14));
}

#[test]
fn failures_are_reported_verbatim() {
    let mut stream = ByteOrderStream::new(BrokenStream, ByteOrder::Little);
    let mut value = 0i32;
    assert_eq!(stream.read(&mut value), IoResult::new(Status::Failed, 0));
    assert_eq!(stream.write(&value), IoResult::new(Status::Failed, 0));
    assert_eq!(
        stream.seek(SeekMode::Start, 0),
        IoResult::new(Status::NotImplemented, 0)
    );
    assert!(!bool::from(stream.tell()));
}

#[test]
fn fail_fast_reads_values() {
    let mut memory = MemoryStream::default();
    {
        let mut stream = ByteOrderStream::fail_fast(&mut memory, ByteOrder::Big);
        assert_eq!(stream.write(&5.88f64), Ok(8));
        assert_eq!(stream.write(&19i32), Ok(4));
    }
    let data = MemoryStream::new(memory.into_inner());
    let mut stream = ByteOrderStream::fail_fast(data, ByteOrder::Big);
    let value: f64 = stream.read_value().unwrap();
    assert!((value - 5.88).abs() < f64::EPSILON);
    assert_eq!(stream.read_value::<i32>(), Ok(19));
    assert_eq!(
        stream.read_value::<i32>(),
        Err(IoError {
            operation: Operation::Read,
            status: Status::Incomplete,
            bytes: 0,
        })
    );
}

#[test]
fn fail_fast_reports_partial_bytes() {
    let mut limited = LimitedStream::with_budget(5);
    let mut stream = ByteOrderStream::fail_fast(&mut limited, ByteOrder::Little);
    let error = stream.write_slice(&[1u16, 2, 3]).unwrap_err();
    assert_eq!(error.operation, Operation::Write);
    assert_eq!(error.status, Status::Failed);
    assert_eq!(error.bytes, 5);
    assert_eq!(error.to_string(), "write failure (Failed) after 5 bytes");
}

#[test]
fn fail_fast_propagates_with_question_mark() {
    fn read_header(
        stream: &mut ByteOrderStream<MemoryStream, FailFast>,
    ) -> Result<(u32, u16), IoError> {
        Ok((stream.read_value()?, stream.read_value()?))
    }

    let data = MemoryStream::new([0, 0, 0, 1, 0, 2]);
    let mut stream = ByteOrderStream::fail_fast(data, ByteOrder::Big);
    assert_eq!(read_header(&mut stream), Ok((1, 2)));
    assert!(read_header(&mut stream).is_err());
}

/// A chunk header with fields of different widths.
#[derive(Clone, Copy, Default, PartialEq, Debug)]
struct ChunkHeader {
    id: [u8; 4],
    size: u32,
    flags: u16,
}

impl Element for ChunkHeader {
    const SIZE: usize = 10;

    fn encode_native(self, out: &mut [u8]) {
        self.id.encode_native(&mut out[..4]);
        self.size.encode_native(&mut out[4..8]);
        self.flags.encode_native(&mut out[8..]);
    }

    fn decode_native(bytes: &[u8]) -> Self {
        Self {
            id: <[u8; 4]>::decode_native(&bytes[..4]),
            size: u32::decode_native(&bytes[4..8]),
            flags: u16::decode_native(&bytes[8..]),
        }
    }

    fn swap_order(bytes: &mut [u8]) {
        u32::swap_order(&mut bytes[4..8]);
        u16::swap_order(&mut bytes[8..]);
    }
}

#[test]
fn user_defined_elements() {
    let header = ChunkHeader {
        id: *b"RIFF",
        size: 0x0102_0304,
        flags: 0x0506,
    };
    let mut memory = MemoryStream::default();
    let mut stream = ByteOrderStream::new(&mut memory, ByteOrder::Big);
    assert_eq!(stream.write(&header), IoResult::ok(10));
    assert_eq!(memory.data(), b"RIFF\x01\x02\x03\x04\x05\x06");

    let mut stream = ByteOrderStream::fail_fast(&mut memory, ByteOrder::Big);
    assert_eq!(stream.seek(SeekMode::Start, 0), Ok(0));
    assert_eq!(stream.read_value::<ChunkHeader>(), Ok(header));
}

#[test]
fn arrays_swap_each_item() {
    let mut memory = MemoryStream::default();
    let mut stream = ByteOrderStream::new(&mut memory, ByteOrder::Big);
    assert_eq!(stream.write(&[0x0102u16, 0x0304]), IoResult::ok(4));
    assert_eq!(memory.data(), &[1, 2, 3, 4]);

    let mut stream = ByteOrderStream::new(&mut memory, ByteOrder::Big);
    assert!(stream.seek(SeekMode::Start, 0).is_ok());
    let mut values = [0u16; 2];
    assert_eq!(stream.read(&mut values), IoResult::ok(4));
    assert_eq!(values, [0x0102, 0x0304]);
}

#[test]
fn elements_larger_than_a_scalar() {
    let samples = [0.0f64, 0.5, 1.0, 1.5, 2.0, 2.5, 3.0, 3.5];
    let mut memory = MemoryStream::default();
    let mut stream = ByteOrderStream::new(&mut memory, ByteOrder::Little);
    assert_eq!(stream.write(&samples), IoResult::ok(64));

    let mut stream = ByteOrderStream::fail_fast(&mut memory, ByteOrder::Little);
    assert_eq!(stream.seek(SeekMode::Start, 0), Ok(0));
    assert_eq!(stream.read_value::<[f64; 8]>(), Ok(samples));
}

#[test]
fn bools() {
    let mut stream = ByteOrderStream::new(MemoryStream::new([0, 1, 7]), ByteOrder::Big);
    let mut flags = [true, false, false];
    assert_eq!(stream.read_slice(&mut flags), IoResult::ok(3));
    assert_eq!(flags, [false, true, true]);

    let mut memory = MemoryStream::default();
    let mut stream = ByteOrderStream::new(&mut memory, ByteOrder::Little);
    assert!(stream.write_slice(&[true, false]).is_ok());
    assert_eq!(memory.data(), &[1, 0]);
}

#[test]
fn works_over_trait_objects() {
    let mut limited = LimitedStream::default();
    let erased: &mut dyn Stream = &mut limited;
    let mut stream = ByteOrderStream::new(erased, ByteOrder::Big);
    assert_eq!(stream.write(&1u32), IoResult::ok(4));
    assert_eq!(stream.write(&1u64), IoResult::new(Status::InvalidArgument, 0));
    assert_eq!(limited.calls, 1);
}

fn orders() -> impl Strategy<Value = ByteOrder> {
    prop_oneof![
        Just(ByteOrder::Little),
        Just(ByteOrder::Big),
        Just(ByteOrder::Native),
    ]
}

proptest! {
    #[test]
    fn u64_roundtrip(order in orders(), value in any::<u64>()) {
        let mut memory = MemoryStream::default();
        let mut stream = ByteOrderStream::new(&mut memory, order);
        prop_assert!(stream.write(&value).is_ok());
        prop_assert!(stream.seek(SeekMode::Start, 0).is_ok());
        let mut read = 0u64;
        prop_assert!(stream.read(&mut read).is_ok());
        prop_assert_eq!(read, value);
    }

    #[test]
    fn i128_roundtrip(order in orders(), value in any::<i128>()) {
        let mut memory = MemoryStream::default();
        let mut stream = ByteOrderStream::new(&mut memory, order);
        prop_assert!(stream.write(&value).is_ok());
        prop_assert!(stream.seek(SeekMode::Start, 0).is_ok());
        let mut read = 0i128;
        prop_assert!(stream.read(&mut read).is_ok());
        prop_assert_eq!(read, value);
    }

    #[test]
    fn f64_roundtrip_is_bit_exact(order in orders(), bits in any::<u64>()) {
        let value = f64::from_bits(bits);
        let mut memory = MemoryStream::default();
        let mut stream = ByteOrderStream::new(&mut memory, order);
        prop_assert!(stream.write(&value).is_ok());
        prop_assert!(stream.seek(SeekMode::Start, 0).is_ok());
        let mut read = 0f64;
        prop_assert!(stream.read(&mut read).is_ok());
        prop_assert_eq!(read.to_bits(), bits);
    }

    #[test]
    fn stored_bytes_follow_order(value in any::<u32>()) {
        let mut memory = MemoryStream::default();
        prop_assert!(ByteOrderStream::new(&mut memory, ByteOrder::Big).write(&value).is_ok());
        prop_assert!(ByteOrderStream::new(&mut memory, ByteOrder::Little).write(&value).is_ok());
        prop_assert!(ByteOrderStream::new(&mut memory, ByteOrder::Native).write(&value).is_ok());
        let data = memory.data();
        prop_assert_eq!(&data[0..4], &value.to_be_bytes());
        prop_assert_eq!(&data[4..8], &value.to_le_bytes());
        prop_assert_eq!(&data[8..12], &value.to_ne_bytes());
    }
}
