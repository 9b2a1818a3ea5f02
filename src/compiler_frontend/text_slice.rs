use std::fmt;
use std::rc::Rc;

const FNV_OFFSET_BASIS: u32 = 0x811c9dc5;
const FNV_PRIME: u32 = 0x01000193;

/// An immutable run of source bytes. Equality and hashing are by content.
///
/// Cloning shares the same allocation, so a binding table can refer to a name
/// owned by an AST node without copying it. The bytes are released once,
/// when the last holder is dropped.
#[derive(Clone)]
pub struct TextSlice {
    bytes: Rc<[u8]>,
}

impl TextSlice {
    /// Copies the bytes out of a source buffer
    pub fn new(bytes: &[u8]) -> Self {
        Self {
            bytes: Rc::from(bytes),
        }
    }

    /// Wraps an allocation the caller already shares with other holders
    pub fn from_shared(bytes: Rc<[u8]>) -> Self {
        Self { bytes }
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Lossy UTF-8 view, only meant for messages and JSON summaries
    pub fn to_str_lossy(&self) -> std::borrow::Cow<'_, str> {
        String::from_utf8_lossy(&self.bytes)
    }

    /// The shared allocation backing this slice.
    /// Tests use this to watch when the bytes are finally released.
    pub fn shared_bytes(&self) -> &Rc<[u8]> {
        &self.bytes
    }

    /// 32-bit FNV-1a over the slice bytes
    pub fn hash_name(&self) -> u32 {
        self.bytes.iter().fold(FNV_OFFSET_BASIS, |hval, &byte| {
            (hval ^ byte as u32).wrapping_mul(FNV_PRIME)
        })
    }
}

impl PartialEq for TextSlice {
    fn eq(&self, other: &Self) -> bool {
        self.bytes[..] == other.bytes[..]
    }
}

impl Eq for TextSlice {}

impl From<&str> for TextSlice {
    fn from(s: &str) -> Self {
        TextSlice::new(s.as_bytes())
    }
}

impl From<&[u8]> for TextSlice {
    fn from(bytes: &[u8]) -> Self {
        TextSlice::new(bytes)
    }
}

impl fmt::Debug for TextSlice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.to_str_lossy())
    }
}

impl fmt::Display for TextSlice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_str_lossy())
    }
}

/// Two optional slices are equal only when both are present and their bytes match.
/// An absent name never matches anything, not even another absent name.
pub fn slices_are_equal(a: Option<&TextSlice>, b: Option<&TextSlice>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => a == b,
        _ => false,
    }
}
