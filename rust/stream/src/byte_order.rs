use serde::{Deserialize, Serialize};

/// Byte order of the values stored in a stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ByteOrder {
    /// Least significant byte first.
    Little,

    /// Most significant byte first.
    Big,

    /// Whatever order the target uses.
    #[default]
    Native,
}

impl ByteOrder {
    /// Resolve [`ByteOrder::Native`] to the target's concrete byte order.
    #[must_use]
    pub const fn resolve(self) -> Self {
        match self {
            Self::Native => {
                if cfg!(target_endian = "little") {
                    Self::Little
                } else {
                    Self::Big
                }
            }
            concrete => concrete,
        }
    }

    /// Whether values in this order must be byte-swapped on this target.
    #[must_use]
    pub fn needs_swap(self) -> bool {
        self.resolve() != Self::Native.resolve()
    }
}

/// Reverse the bytes of `buffer` in place.
///
/// Buffers of zero or one byte are left untouched.
pub fn swap_bytes(buffer: &mut [u8]) {
    let mut low = 0;
    let mut high = buffer.len();
    while high > low + 1 {
        high -= 1;
        buffer.swap(low, high);
        low += 1;
    }
}

/// Elements up to this size are staged on the stack.
pub(crate) const MAX_ELEMENT_SIZE: usize = 16;

/// A fixed-layout value that can be moved through a [`ByteOrderStream`](crate::ByteOrderStream).
///
/// Implemented for the fixed-width integer types, `f32`, `f64`, `bool` and
/// arrays of elements. Implement it for your own plain structs by encoding
/// each field into its slice of the buffer:
///
/// ```
/// use vstutil_stream::{ByteOrder, ByteOrderStream, Element, MemoryStream};
///
/// #[derive(Clone, Copy, Default, PartialEq, Debug)]
/// struct Header {
///     magic: u32,
///     version: u16,
/// }
///
/// impl Element for Header {
///     const SIZE: usize = 6;
///
///     fn encode_native(self, out: &mut [u8]) {
///         self.magic.encode_native(&mut out[..4]);
///         self.version.encode_native(&mut out[4..]);
///     }
///
///     fn decode_native(bytes: &[u8]) -> Self {
///         Self {
///             magic: u32::decode_native(&bytes[..4]),
///             version: u16::decode_native(&bytes[4..]),
///         }
///     }
///
///     fn swap_order(bytes: &mut [u8]) {
///         u32::swap_order(&mut bytes[..4]);
///         u16::swap_order(&mut bytes[4..]);
///     }
/// }
///
/// let mut memory = MemoryStream::default();
/// let header = Header { magic: 0x5653_5433, version: 2 };
/// assert!(ByteOrderStream::new(&mut memory, ByteOrder::Big).write(&header).is_ok());
/// assert_eq!(memory.data(), &[0x56, 0x53, 0x54, 0x33, 0, 2]);
/// ```
pub trait Element: Copy {
    /// Size of the value in bytes.
    const SIZE: usize;

    /// Store the value's native-endian bytes into `out`, which is exactly
    /// [`Self::SIZE`] bytes long.
    fn encode_native(self, out: &mut [u8]);

    /// Rebuild a value from exactly [`Self::SIZE`] native-endian bytes.
    ///
    /// Any byte pattern must produce a value; implementations must not panic
    /// on data read from a stream.
    fn decode_native(bytes: &[u8]) -> Self;

    /// Convert [`Self::SIZE`] encoded bytes between native and foreign order.
    ///
    /// Reverses the whole value by default, which is right for scalars.
    /// Composite values should swap each field on its own.
    fn swap_order(bytes: &mut [u8]) {
        swap_bytes(bytes);
    }
}

macro_rules! impl_element {
    ($($t:ty),* $(,)?) => {
        $(
            impl Element for $t {
                const SIZE: usize = std::mem::size_of::<$t>();

                fn encode_native(self, out: &mut [u8]) {
                    out.copy_from_slice(&self.to_ne_bytes());
                }

                fn decode_native(bytes: &[u8]) -> Self {
                    let mut raw = [0u8; std::mem::size_of::<$t>()];
                    raw.copy_from_slice(bytes);
                    <$t>::from_ne_bytes(raw)
                }
            }
        )*
    };
}

impl_element!(u8, u16, u32, u64, u128, i8, i16, i32, i64, i128, f32, f64);

/// Stored as one byte; any non-zero byte reads back as `true`.
impl Element for bool {
    const SIZE: usize = 1;

    fn encode_native(self, out: &mut [u8]) {
        out[0] = u8::from(self);
    }

    fn decode_native(bytes: &[u8]) -> Self {
        bytes[0] != 0
    }
}

/// Each item keeps its position; only the bytes within an item are swapped.
impl<T: Element, const N: usize> Element for [T; N] {
    const SIZE: usize = T::SIZE * N;

    fn encode_native(self, out: &mut [u8]) {
        if T::SIZE == 0 {
            return;
        }
        for (item, chunk) in self.into_iter().zip(out.chunks_exact_mut(T::SIZE)) {
            item.encode_native(chunk);
        }
    }

    fn decode_native(bytes: &[u8]) -> Self {
        std::array::from_fn(|index| T::decode_native(&bytes[index * T::SIZE..][..T::SIZE]))
    }

    fn swap_order(bytes: &mut [u8]) {
        if T::SIZE == 0 {
            return;
        }
        for chunk in bytes.chunks_exact_mut(T::SIZE) {
            T::swap_order(chunk);
        }
    }
}
