//! The `vers` resource, describing the version of a file or of the package it belongs to.
//!
//! ```text
//! struct Version {
//!     pub major: u8, // BCD
//!     pub minor: u8, // BCD
//!     pub stage: DevelopmentStage, // u8
//!     pub pre_release: u8, // BCD
//!     pub region_code: u16,
//!     pub version_string: PascalString,
//!     pub version_message: PascalString,
//! }
//! ```


use std::fmt;

use from_to_repr::from_to_other;

use crate::os_type::OsType;
use crate::pascal_string;


#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum Error {
    TooShort,
    InvalidBcd { byte: u8 },
    PascalString(pascal_string::Error),
}
impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooShort
                => write!(f, "version data too short"),
            Self::InvalidBcd { byte }
                => write!(f, "byte {:#04X} is not a valid binary-coded decimal number", byte),
            Self::PascalString(e)
                => write!(f, "invalid version string: {}", e),
        }
    }
}
impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::TooShort => None,
            Self::InvalidBcd { .. } => None,
            Self::PascalString(e) => Some(e),
        }
    }
}
impl From<pascal_string::Error> for Error {
    fn from(value: pascal_string::Error) -> Self { Self::PascalString(value) }
}


#[derive(Clone, Copy, Debug)]
#[from_to_other(base_type = u8, derive_compare = "as_int")]
pub enum DevelopmentStage {
    PreAlpha = 0x20,
    Alpha = 0x40,
    Beta = 0x60,
    Final = 0x80,
    Other(u8),
}
impl DevelopmentStage {
    /// The letter conventionally placed between the version and the pre-release number.
    pub fn letter(&self) -> Option<char> {
        match self {
            Self::PreAlpha => Some('d'),
            Self::Alpha => Some('a'),
            Self::Beta => Some('b'),
            Self::Final => None,
            Self::Other(_) => Some('?'),
        }
    }
}
#[cfg(feature = "serde")]
impl serde::Serialize for DevelopmentStage {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serde::Serialize::serialize(&self.to_base_type(), serializer)
    }
}
#[cfg(feature = "serde")]
impl<'d> serde::Deserialize<'d> for DevelopmentStage {
    fn deserialize<D: serde::Deserializer<'d>>(deserializer: D) -> Result<Self, D::Error> {
        let base_value: u8 = serde::Deserialize::deserialize(deserializer)?;
        Ok(Self::from_base_type(base_value))
    }
}


#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct Version {
    pub major: u8,
    pub minor: u8,
    pub stage: DevelopmentStage,
    pub pre_release: u8,
    pub region_code: u16,
    pub version_string: String,
    pub version_message: String,
}
impl Version {
    pub const OS_TYPE: OsType = OsType::from_bytes(b"vers");

    pub fn take_from_bytes(bytes: &[u8]) -> Result<(&[u8], Self), Error> {
        if bytes.len() < 6 {
            return Err(Error::TooShort);
        }

        let major = bcd_to_number(bytes[0])?;
        let minor = bcd_to_number(bytes[1])?;
        let stage = DevelopmentStage::from_base_type(bytes[2]);
        let pre_release = bcd_to_number(bytes[3])?;
        let region_code = u16::from_be_bytes(bytes[4..6].try_into().unwrap());

        let rest = &bytes[6..];
        let (rest, version_string) = pascal_string::take_from_bytes(rest)?;
        let (rest, version_message) = pascal_string::take_from_bytes(rest)?;

        let version = Self {
            major,
            minor,
            stage,
            pre_release,
            region_code,
            version_string,
            version_message,
        };
        Ok((rest, version))
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, Error> {
        Self::take_from_bytes(bytes)
            .map(|(_rest, version)| version)
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let version_string = pascal_string::encode(&self.version_string);
        let version_message = pascal_string::encode(&self.version_message);

        let mut ret = Vec::with_capacity(6 + version_string.len() + version_message.len());
        ret.push(number_to_bcd(self.major));
        ret.push(number_to_bcd(self.minor));
        ret.push(self.stage.to_base_type());
        ret.push(number_to_bcd(self.pre_release));
        ret.extend_from_slice(&self.region_code.to_be_bytes());
        ret.extend_from_slice(&version_string);
        ret.extend_from_slice(&version_message);
        ret
    }
}
impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.major, self.minor)?;
        if let Some(letter) = self.stage.letter() {
            write!(f, "{}{}", letter, self.pre_release)?;
        }
        Ok(())
    }
}


/// Decodes a byte holding two decimal digits, one per nibble.
pub fn bcd_to_number(bcd: u8) -> Result<u8, Error> {
    let tens = bcd >> 4;
    let ones = bcd & 0x0F;
    if tens > 9 || ones > 9 {
        return Err(Error::InvalidBcd { byte: bcd });
    }
    Ok(tens * 10 + ones)
}

/// Encodes a number as two decimal digits, one per nibble; numbers above 99 become 99.
pub fn number_to_bcd(number: u8) -> u8 {
    let number = number.min(99);
    ((number / 10) << 4) | (number % 10)
}


#[cfg(test)]
mod tests {
    use super::{DevelopmentStage, Error, Version, bcd_to_number, number_to_bcd};

    const DISK_COPY_VERS: &[u8] = b"\x06\x40\x80\x00\x00\x00\x09Disk Copy\x1C4.2, data checksum=$A5147F7E";

    #[test]
    fn test_disk_copy_version() {
        assert_eq!(DISK_COPY_VERS.len(), 45);

        let version = Version::from_bytes(DISK_COPY_VERS).unwrap();
        assert_eq!(version.major, 6);
        assert_eq!(version.minor, 40);
        assert_eq!(version.stage, DevelopmentStage::Final);
        assert_eq!(version.pre_release, 0);
        assert_eq!(version.region_code, 0);
        assert_eq!(version.version_string, "Disk Copy");
        assert_eq!(version.version_message, "4.2, data checksum=$A5147F7E");
        assert_eq!(version.to_string(), "6.40");

        assert_eq!(version.to_bytes(), DISK_COPY_VERS);
    }

    #[test]
    fn test_beta_version() {
        let bytes = b"\x01\x10\x60\x06\x00\x00\x051.1b6\x2F1.1b6, Copyright 1997-2001 Apple Computer, Inc.";
        let (rest, version) = Version::take_from_bytes(bytes).unwrap();
        assert!(rest.is_empty());
        assert_eq!(version.major, 1);
        assert_eq!(version.minor, 10);
        assert_eq!(version.stage, DevelopmentStage::Beta);
        assert_eq!(version.pre_release, 6);
        assert_eq!(version.version_string, "1.1b6");
        assert_eq!(version.version_message, "1.1b6, Copyright 1997-2001 Apple Computer, Inc.");
        assert_eq!(version.to_string(), "1.10b6");
    }

    #[test]
    fn test_unknown_stage_is_kept() {
        let bytes = b"\x01\x00\x33\x00\x00\x01\x00\x00";
        let version = Version::from_bytes(bytes).unwrap();
        assert_eq!(version.stage, DevelopmentStage::Other(0x33));
        assert_eq!(version.region_code, 1);
        assert_eq!(version.to_bytes(), bytes);
    }

    #[test]
    fn test_errors() {
        assert_eq!(Version::from_bytes(b"\x01\x00\x80"), Err(Error::TooShort));
        assert_eq!(Version::from_bytes(b"\x1A\x00\x80\x00\x00\x00\x00\x00"), Err(Error::InvalidBcd { byte: 0x1A }));
        assert!(matches!(
            Version::from_bytes(b"\x01\x00\x80\x00\x00\x00\x05ab"),
            Err(Error::PascalString(_)),
        ));
    }

    #[test]
    fn test_bcd() {
        assert_eq!(bcd_to_number(0x42), Ok(42));
        assert_eq!(bcd_to_number(0x09), Ok(9));
        assert_eq!(number_to_bcd(42), 0x42);
        assert_eq!(number_to_bcd(7), 0x07);
        assert_eq!(number_to_bcd(150), 0x99);
    }
}
