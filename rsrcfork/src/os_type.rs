use std::fmt;


/// A four-character type code, such as `STR ` or `vers`.
///
/// The code is stored as the big-endian interpretation of its four bytes, which is also how it is
/// stored on disk.
#[derive(Clone, Copy, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(from = "u32", into = "u32"))]
pub struct OsType(u32);
impl OsType {
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    pub const fn from_bytes(bytes: &[u8; 4]) -> Self {
        Self(u32::from_be_bytes(*bytes))
    }

    pub const fn value(&self) -> u32 { self.0 }

    pub const fn to_bytes(&self) -> [u8; 4] { self.0.to_be_bytes() }

    /// Renders the code as a single path component.
    ///
    /// Printable ASCII passes through; path separators, `%` and everything else become `%XX`.
    pub fn to_path_component(&self) -> String {
        let mut ret = String::with_capacity(4);
        for b in self.to_bytes() {
            match b {
                b'/' | b'\\' | b':' | b'%' => ret.push_str(&format!("%{:02X}", b)),
                0x20..=0x7E => ret.push(char::from(b)),
                other => ret.push_str(&format!("%{:02X}", other)),
            }
        }
        // "." and ".." are not usable as directory names
        if ret.bytes().all(|b| b == b'.') {
            ret = ret.replace('.', "%2E");
        }
        ret
    }
}
impl fmt::Display for OsType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for b in self.to_bytes() {
            match b {
                0x5C => write!(f, "\\\\")?,
                0x20..=0x7E => write!(f, "{}", char::from(b))?,
                other => write!(f, "\\x{:02X}", other)?,
            }
        }
        Ok(())
    }
}
impl fmt::Debug for OsType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "OsType(\"{}\")", self)
    }
}
impl From<u32> for OsType {
    fn from(value: u32) -> Self { Self(value) }
}
impl From<OsType> for u32 {
    fn from(value: OsType) -> Self { value.0 }
}
impl From<[u8; 4]> for OsType {
    fn from(value: [u8; 4]) -> Self { Self::from_bytes(&value) }
}
impl From<&[u8; 4]> for OsType {
    fn from(value: &[u8; 4]) -> Self { Self::from_bytes(value) }
}
impl From<OsType> for [u8; 4] {
    fn from(value: OsType) -> Self { value.to_bytes() }
}
