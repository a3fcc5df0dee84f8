//! Pascal strings: one length byte followed by that many bytes of text.
//!
//! Only ASCII is interpreted. Bytes above 0x7F are passed through unchanged as the characters
//! U+0080 to U+00FF; no attempt is made to decode them as Mac OS Roman.


use std::fmt;


pub const MAX_LENGTH: usize = 255;


#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum Error {
    TooShort { expected: usize, obtained: usize },
}
impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooShort { expected, obtained }
                => write!(f, "Pascal string data too short (expected {} bytes, obtained {})", expected, obtained),
        }
    }
}
impl std::error::Error for Error {
}


/// Converts the text bytes of a Pascal string (without the length byte) to a string.
pub fn bytes_to_string(bytes: &[u8]) -> String {
    bytes.iter()
        .map(|&b| char::from(b))
        .collect()
}

/// Decodes the Pascal string at the start of `bytes`, returning the bytes following it.
pub fn take_from_bytes(bytes: &[u8]) -> Result<(&[u8], String), Error> {
    let Some((&length, rest)) = bytes.split_first() else {
        return Err(Error::TooShort { expected: 1, obtained: 0 });
    };
    let length = usize::from(length);
    if rest.len() < length {
        return Err(Error::TooShort { expected: length + 1, obtained: bytes.len() });
    }
    let string = bytes_to_string(&rest[..length]);
    Ok((&rest[length..], string))
}

/// Decodes a Pascal string; trailing bytes beyond its length are ignored.
pub fn decode(bytes: &[u8]) -> Result<String, Error> {
    take_from_bytes(bytes)
        .map(|(_rest, string)| string)
}

/// Encodes a string as a Pascal string.
///
/// Characters outside ASCII become `?` and the text is cut off after 255 bytes.
pub fn encode(string: &str) -> Vec<u8> {
    let mut ret = Vec::with_capacity(string.len().min(MAX_LENGTH) + 1);
    ret.push(0);
    for c in string.chars().take(MAX_LENGTH) {
        if c.is_ascii() {
            ret.push(c as u8);
        } else {
            ret.push(b'?');
        }
    }
    ret[0] = (ret.len() - 1) as u8;
    ret
}
