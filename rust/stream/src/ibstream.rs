//! [`Stream`] over a host-provided VST3 `IBStream`.

use vst3::{
    ComRef,
    Steinberg::{
        IBStream,
        IBStream_::IStreamSeekMode_::{kIBSeekCur, kIBSeekEnd, kIBSeekSet},
        IBStreamTrait, int32, int64, kInvalidArgument, kNotImplemented, kResultOk, tresult,
    },
};

use crate::{IoResult, SeekMode, Status, Stream};

/// Translate a VST3 result code.
#[must_use]
pub fn status_from_tresult(result: tresult) -> Status {
    match result {
        kResultOk => Status::Ok,
        kInvalidArgument => Status::InvalidArgument,
        kNotImplemented => Status::NotImplemented,
        _ => Status::Failed,
    }
}

/// Combine a host result with the count or position it reported.
///
/// A negative count from the host is reported as a failure.
fn host_result(result: tresult, count: int64) -> IoResult {
    match usize::try_from(count) {
        Ok(count) => IoResult::new(status_from_tresult(result), count),
        Err(_) => {
            log::debug!("host stream reported a negative count ({count})");
            IoResult::new(Status::Failed, 0)
        }
    }
}

fn seek_mode_to_vst3(mode: SeekMode) -> int32 {
    (match mode {
        SeekMode::Start => kIBSeekSet,
        SeekMode::Current => kIBSeekCur,
        SeekMode::End => kIBSeekEnd,
    }) as int32
}

/// A borrowed `IBStream`.
///
/// WARNING - do not read from or modify the stream through another handle
/// while a `ComStream` is in use.
#[derive(Clone)]
pub struct ComStream<'a> {
    stream: ComRef<'a, IBStream>,
}

impl<'a> ComStream<'a> {
    /// Wrap a stream handed to us by the host.
    pub fn new(stream: ComRef<'a, IBStream>) -> Self {
        Self { stream }
    }
}

impl Stream for ComStream<'_> {
    fn read(&mut self, buffer: &mut [u8]) -> IoResult {
        let Ok(num_bytes) = int32::try_from(buffer.len()) else {
            return IoResult::new(Status::InvalidArgument, 0);
        };
        let mut num_read: int32 = 0;
        let result = unsafe {
            self.stream.read(
                buffer.as_mut_ptr().cast::<std::ffi::c_void>(),
                num_bytes,
                &raw mut num_read,
            )
        };
        host_result(result, num_read.into())
    }

    fn write(&mut self, buffer: &[u8]) -> IoResult {
        let Ok(num_bytes) = int32::try_from(buffer.len()) else {
            return IoResult::new(Status::InvalidArgument, 0);
        };
        let mut num_written: int32 = 0;
        // The host only reads through this pointer.
        let result = unsafe {
            self.stream.write(
                buffer.as_ptr().cast_mut().cast::<std::ffi::c_void>(),
                num_bytes,
                &raw mut num_written,
            )
        };
        host_result(result, num_written.into())
    }

    fn seek(&mut self, offset: i64, mode: SeekMode) -> IoResult {
        let mut position: int64 = 0;
        let result = unsafe {
            self.stream
                .seek(offset, seek_mode_to_vst3(mode), &raw mut position)
        };
        host_result(result, position)
    }

    fn tell(&self) -> IoResult {
        let mut position: int64 = 0;
        let result = unsafe { self.stream.tell(&raw mut position) };
        host_result(result, position)
    }
}
