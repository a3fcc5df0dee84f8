//! The fixed-layout structures of a resource fork.
//!
//! All integers are big-endian. The fork starts with a [`ForkHeader`] pointing at the data area and
//! at the resource map. The map starts with a copy of the header, followed by the rest of the
//! [`ResourceMap`], the type list (a count followed by [`TypeListEntry`] records), the reference
//! lists (one [`ReferenceListEntry`] per resource) and the name list (Pascal strings).


use std::io::{self, Read, Seek, SeekFrom};

use bitflags::bitflags;
use tracing::debug;

use crate::error::{Error, MalformedForkReason};
use crate::os_type::OsType;
use crate::read_ext::{ReadExt, SeekReadExt};


/// Value of the type count signalling a resource map without any types.
pub const NO_TYPES_SENTINEL: u16 = 0xFFFF;

/// Mask selecting the data offset from the attributes-and-offset field of a reference list entry.
pub const DATA_OFFSET_MASK: u32 = 0x00FF_FFFF;


#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct ForkHeader {
    pub data_offset: i32,
    pub map_offset: i32,
    pub data_length: i32,
    pub map_length: i32,
}
impl ForkHeader {
    pub const LENGTH: u64 = 16;

    pub fn read<R: Read>(reader: &mut R) -> Result<Self, io::Error> {
        let buf: [u8; 16] = reader.read_byte_array()?;

        let data_offset = i32::from_be_bytes(buf[0..4].try_into().unwrap());
        let map_offset = i32::from_be_bytes(buf[4..8].try_into().unwrap());
        let data_length = i32::from_be_bytes(buf[8..12].try_into().unwrap());
        let map_length = i32::from_be_bytes(buf[12..16].try_into().unwrap());

        Ok(Self {
            data_offset,
            map_offset,
            data_length,
            map_length,
        })
    }

    /// Checks that every field is positive and that both areas end within the stream.
    pub fn validate(&self, stream_length: u64) -> Result<(), MalformedForkReason> {
        let fields = [
            ("data_offset", self.data_offset),
            ("map_offset", self.map_offset),
            ("data_length", self.data_length),
            ("map_length", self.map_length),
        ];
        for (field, value) in fields {
            if value <= 0 {
                return Err(MalformedForkReason::NonPositiveField { field, value });
            }
        }

        let data_end = self.data_end();
        if data_end > stream_length {
            return Err(MalformedForkReason::DataOutOfBounds { end: data_end, stream_length });
        }
        let map_end = self.map_end();
        if map_end > stream_length {
            return Err(MalformedForkReason::MapOutOfBounds { end: map_end, stream_length });
        }
        Ok(())
    }

    // the following assume a validated header (no negative fields)

    pub fn data_end(&self) -> u64 {
        u64::from(self.data_offset.unsigned_abs()) + u64::from(self.data_length.unsigned_abs())
    }

    pub fn map_end(&self) -> u64 {
        u64::from(self.map_offset.unsigned_abs()) + u64::from(self.map_length.unsigned_abs())
    }
}


#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct ResourceMap {
    pub header: ForkHeader, // must equal the fork header
    pub handle_to_next_map: u32, // reserved; never followed
    pub file_ref_no: u16, // reserved
    pub attributes: MapAttributes, // u16
    pub type_list_offset: i16, // relative to start of map
    pub name_list_offset: i16, // relative to start of map

    // at start of type list:
    pub number_of_types: u16, // count - 1, or NO_TYPES_SENTINEL
}
impl ResourceMap {
    /// Length of the header copy and the fixed fields following it.
    pub const FIXED_LENGTH: i32 = 28;

    /// Reads the resource map of a fork whose header has already been validated.
    ///
    /// Leaves the reader positioned at the first type list entry.
    pub fn read<R: Read + Seek>(reader: &mut R, header: &ForkHeader, stream_length: u64) -> Result<Self, Error> {
        // the validated header keeps the map inside the stream, so this keeps the fixed fields there too
        if header.map_length < Self::FIXED_LENGTH {
            return Err(MalformedForkReason::MapTooShort { map_length: header.map_length }.into());
        }

        reader.seek(SeekFrom::Start(header.map_offset.unsigned_abs().into()))?;

        let header_copy = ForkHeader::read(reader)?;
        if header_copy != *header {
            return Err(MalformedForkReason::HeaderMismatch {
                header: *header,
                map_copy: header_copy,
            }.into());
        }

        let buf: [u8; 12] = reader.read_byte_array()?;
        let handle_to_next_map = u32::from_be_bytes(buf[0..4].try_into().unwrap());
        let file_ref_no = u16::from_be_bytes(buf[4..6].try_into().unwrap());
        let attributes = MapAttributes::from_bits_retain(u16::from_be_bytes(buf[6..8].try_into().unwrap()));
        let type_list_offset = i16::from_be_bytes(buf[8..10].try_into().unwrap());
        let name_list_offset = i16::from_be_bytes(buf[10..12].try_into().unwrap());

        // the type count is the first field of the type list, not of the map
        let type_list_position = i64::from(header.map_offset) + i64::from(type_list_offset);
        let type_list_start = match u64::try_from(type_list_position) {
            Ok(tlp) if tlp + 2 <= stream_length => tlp,
            _ => return Err(MalformedForkReason::TypeListOutOfBounds {
                position: type_list_position,
                stream_length,
            }.into()),
        };
        let number_of_types = reader.read_u16_be_at(type_list_start)?;
        debug!(
            "resource map: type list at {}, name list offset {}, stored type count {:#06X}",
            type_list_start, name_list_offset, number_of_types,
        );

        Ok(Self {
            header: header_copy,
            handle_to_next_map,
            file_ref_no,
            attributes,
            type_list_offset,
            name_list_offset,
            number_of_types,
        })
    }

    /// The number of types actually stored in the type list.
    pub fn type_count(&self) -> usize {
        if self.number_of_types == NO_TYPES_SENTINEL {
            0
        } else {
            usize::from(self.number_of_types) + 1
        }
    }

    /// Absolute position of the type list (starting with its count field).
    pub fn type_list_position(&self) -> i64 {
        i64::from(self.header.map_offset) + i64::from(self.type_list_offset)
    }

    /// Absolute position of the name list.
    pub fn name_list_position(&self) -> i64 {
        i64::from(self.header.map_offset) + i64::from(self.name_list_offset)
    }
}


#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct TypeListEntry {
    pub os_type: OsType, // u32
    pub count: u16, // count - 1
    pub reference_list_offset: i16, // relative to start of type list
}
impl TypeListEntry {
    pub const LENGTH: usize = 8;

    pub fn read<R: Read>(reader: &mut R) -> Result<Self, io::Error> {
        let buf: [u8; Self::LENGTH] = reader.read_byte_array()?;

        let os_type = OsType::from(u32::from_be_bytes(buf[0..4].try_into().unwrap()));
        let count = u16::from_be_bytes(buf[4..6].try_into().unwrap());
        let reference_list_offset = i16::from_be_bytes(buf[6..8].try_into().unwrap());

        Ok(Self {
            os_type,
            count,
            reference_list_offset,
        })
    }

    pub fn resource_count(&self) -> usize {
        usize::from(self.count) + 1
    }
}


#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct ReferenceListEntry {
    pub id: i16,
    pub name_offset: i16, // relative to start of name list; -1 if unnamed
    pub attributes: ResourceAttributes, // u8
    pub data_offset: u32, // u24; relative to start of data area
    pub handle: u32, // reserved
}
impl ReferenceListEntry {
    pub const LENGTH: usize = 12;

    pub fn read<R: Read>(reader: &mut R) -> Result<Self, io::Error> {
        let buf: [u8; Self::LENGTH] = reader.read_byte_array()?;

        let id = i16::from_be_bytes(buf[0..2].try_into().unwrap());
        let name_offset = i16::from_be_bytes(buf[2..4].try_into().unwrap());

        // the attributes occupy the top byte of the data offset
        let attributes_and_offset = u32::from_be_bytes(buf[4..8].try_into().unwrap());
        let attributes = ResourceAttributes::from_bits_retain(buf[4]);
        let data_offset = attributes_and_offset & DATA_OFFSET_MASK;

        let handle = u32::from_be_bytes(buf[8..12].try_into().unwrap());

        Ok(Self {
            id,
            name_offset,
            attributes,
            data_offset,
            handle,
        })
    }

    pub fn has_name(&self) -> bool {
        self.name_offset != -1
    }
}


bitflags! {
    #[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
    #[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
    pub struct MapAttributes : u16 {
        const READ_ONLY = 0x0080;
        const COMPACT = 0x0040;
        const CHANGED = 0x0020;
    }

    #[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
    #[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
    pub struct ResourceAttributes : u8 {
        const SYS_HEAP = 0x40;
        const PURGEABLE = 0x20;
        const LOCKED = 0x10;
        const PROTECTED = 0x08;
        const PRELOAD = 0x04;
        const CHANGED = 0x02;
    }
}
