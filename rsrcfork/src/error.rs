use std::fmt;

use crate::header::ForkHeader;
use crate::os_type::OsType;


#[derive(Debug)]
pub enum Error {
    Io(std::io::Error),
    MalformedFork(MalformedForkReason),
    MalformedTypeTable { os_type: OsType, reason: MalformedTypeTableReason },
    TruncatedPayload { id: i16, expected: u64, available: u64 },
}
impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e)
                => write!(f, "I/O error: {}", e),
            Self::MalformedFork(reason)
                => write!(f, "not a valid resource fork: {}", reason),
            Self::MalformedTypeTable { os_type, reason }
                => write!(f, "malformed reference list for type {:?}: {}", os_type, reason),
            Self::TruncatedPayload { id, expected, available }
                => write!(f, "payload of resource {} is truncated (expected {} bytes, {} available)", id, expected, available),
        }
    }
}
impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::MalformedFork(reason) => Some(reason),
            Self::MalformedTypeTable { reason, .. } => Some(reason),
            Self::TruncatedPayload { .. } => None,
        }
    }
}
impl From<std::io::Error> for Error {
    fn from(value: std::io::Error) -> Self { Self::Io(value) }
}
impl From<MalformedForkReason> for Error {
    fn from(value: MalformedForkReason) -> Self { Self::MalformedFork(value) }
}


/// The reason why a stream was rejected as a resource fork.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum MalformedForkReason {
    TooShort { stream_length: u64 },
    NonPositiveField { field: &'static str, value: i32 },
    DataOutOfBounds { end: u64, stream_length: u64 },
    MapOutOfBounds { end: u64, stream_length: u64 },
    MapTooShort { map_length: i32 },
    HeaderMismatch { header: ForkHeader, map_copy: ForkHeader },
    TypeListOutOfBounds { position: i64, stream_length: u64 },
}
impl fmt::Display for MalformedForkReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooShort { stream_length }
                => write!(f, "stream of {} bytes is too short to contain a header", stream_length),
            Self::NonPositiveField { field, value }
                => write!(f, "header field {} has non-positive value {}", field, value),
            Self::DataOutOfBounds { end, stream_length }
                => write!(f, "data area ends at {} beyond the end of the stream at {}", end, stream_length),
            Self::MapOutOfBounds { end, stream_length }
                => write!(f, "resource map ends at {} beyond the end of the stream at {}", end, stream_length),
            Self::MapTooShort { map_length }
                => write!(f, "resource map of {} bytes is too short for its fixed fields", map_length),
            Self::HeaderMismatch { header, map_copy }
                => write!(f, "header copy in the resource map ({:?}) differs from the header ({:?})", map_copy, header),
            Self::TypeListOutOfBounds { position, stream_length }
                => write!(f, "type list at {} lies outside the stream of {} bytes", position, stream_length),
        }
    }
}
impl std::error::Error for MalformedForkReason {
}


#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum MalformedTypeTableReason {
    ReferenceListOutOfBounds { position: i64, stream_length: u64 },
    NameOutOfBounds { id: i16, position: i64, stream_length: u64 },
}
impl fmt::Display for MalformedTypeTableReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ReferenceListOutOfBounds { position, stream_length }
                => write!(f, "reference list at {} lies outside the stream of {} bytes", position, stream_length),
            Self::NameOutOfBounds { id, position, stream_length }
                => write!(f, "name of resource {} at {} lies outside the stream of {} bytes", id, position, stream_length),
        }
    }
}
impl std::error::Error for MalformedTypeTableReason {
}
