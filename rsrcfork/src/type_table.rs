use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::io::{self, Read, Seek, SeekFrom};
use std::ops::Deref;

use tracing::{debug, trace, warn};

use crate::error::{Error, MalformedTypeTableReason};
use crate::header::{ReferenceListEntry, ResourceAttributes, ResourceMap, TypeListEntry};
use crate::os_type::OsType;
use crate::pascal_string;
use crate::read_ext::{ReadExt, SeekReadExt};


/// A single resource as listed in the reference list of its type.
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct ResourceRecord {
    pub id: i16,
    pub name: Option<String>,
    pub name_bytes: Option<Vec<u8>>,
    pub attributes: ResourceAttributes,
    pub data_offset: u32, // relative to start of data area, pointing at the length prefix
    pub payload_offset: u64, // absolute, just past the length prefix
    pub length: u64,

    // the length prefix itself runs past the end of the stream; length is 0 then
    pub length_prefix_truncated: bool,
}


/// The resources of one type.
///
/// The directory of resources is read in full when the table is created; payloads are read on
/// demand and kept.
#[derive(Clone, Debug)]
pub struct ResourceTypeTable {
    os_type: OsType,
    ids: Vec<i16>,
    records: HashMap<i16, ResourceRecord>,
    payloads: HashMap<i16, Vec<u8>>,
}
impl ResourceTypeTable {
    pub(crate) fn read<R: Read + Seek>(
        reader: &mut R,
        type_entry: &TypeListEntry,
        map: &ResourceMap,
        stream_length: u64,
    ) -> Result<Self, Error> {
        let os_type = type_entry.os_type;
        let resource_count = type_entry.resource_count();
        let malformed = |reason| Error::MalformedTypeTable { os_type, reason };

        // each reference list is preceded by a two-byte count
        let reference_list_position =
            map.type_list_position()
            + i64::from(type_entry.reference_list_offset)
            - 2;
        let reference_list_length = 2 + (resource_count * ReferenceListEntry::LENGTH) as u64;
        let reference_list_start = match u64::try_from(reference_list_position) {
            Ok(rlp) if rlp + reference_list_length <= stream_length => rlp,
            _ => return Err(malformed(MalformedTypeTableReason::ReferenceListOutOfBounds {
                position: reference_list_position,
                stream_length,
            })),
        };
        debug!(
            "type {:?}: {} resources, reference list at {}",
            os_type, resource_count, reference_list_start,
        );

        reader.seek(SeekFrom::Start(reference_list_start))?;
        let count_prefix = reader.read_u16_be()?;
        trace!("type {:?}: reference list prefix {:#06X}", os_type, count_prefix);

        let mut entries = Vec::with_capacity(resource_count);
        for _ in 0..resource_count {
            entries.push(ReferenceListEntry::read(reader)?);
        }

        let data_area_start = u64::from(map.header.data_offset.unsigned_abs());
        let mut ids = Vec::with_capacity(resource_count);
        let mut records = HashMap::with_capacity(resource_count);
        for entry in &entries {
            let (name_bytes, name) = if entry.has_name() {
                let name_bytes = read_name(reader, map, os_type, entry, stream_length)?;
                let name = pascal_string::bytes_to_string(&name_bytes);
                (Some(name_bytes), Some(name))
            } else {
                (None, None)
            };

            let prefix_position = data_area_start + u64::from(entry.data_offset);
            let payload_offset = prefix_position + 4;
            let (length, length_prefix_truncated) = if payload_offset <= stream_length {
                (u64::from(reader.read_u32_be_at(prefix_position)?), false)
            } else {
                warn!(
                    "type {:?}: length prefix of resource {} at {} runs past the end of the stream",
                    os_type, entry.id, prefix_position,
                );
                (0, true)
            };

            let record = ResourceRecord {
                id: entry.id,
                name,
                name_bytes,
                attributes: entry.attributes,
                data_offset: entry.data_offset,
                payload_offset,
                length,
                length_prefix_truncated,
            };

            ids.push(entry.id);
            if records.insert(entry.id, record).is_some() {
                warn!("type {:?}: duplicate resource ID {}; the later entry wins", os_type, entry.id);
            }
        }

        Ok(Self {
            os_type,
            ids,
            records,
            payloads: HashMap::new(),
        })
    }

    pub fn os_type(&self) -> OsType { self.os_type }

    /// The resource IDs in the order of the reference list.
    pub fn ids(&self) -> &[i16] { &self.ids }

    pub fn len(&self) -> usize { self.ids.len() }

    pub fn is_empty(&self) -> bool { self.ids.is_empty() }

    pub fn contains_id(&self, id: i16) -> bool {
        self.records.contains_key(&id)
    }

    pub fn record(&self, id: i16) -> Option<&ResourceRecord> {
        self.records.get(&id)
    }

    /// The records in the order of the reference list.
    pub fn records(&self) -> impl Iterator<Item = &ResourceRecord> + '_ {
        self.ids.iter()
            .filter_map(|id| self.records.get(id))
    }

    /// The name of the resource; `None` if there is no such resource or it has no name.
    pub fn name(&self, id: i16) -> Option<&str> {
        self.records.get(&id)
            .and_then(|r| r.name.as_deref())
    }

    pub fn name_bytes(&self, id: i16) -> Option<&[u8]> {
        self.records.get(&id)
            .and_then(|r| r.name_bytes.as_deref())
    }

    /// The length of the resource's payload as stored in its length prefix, or 0 if there is no
    /// such resource.
    pub fn length(&self, id: i16) -> u64 {
        self.records.get(&id)
            .map(|r| r.length)
            .unwrap_or(0)
    }

    /// The payload of the resource if it has already been read.
    pub fn cached_resource(&self, id: i16) -> Option<&[u8]> {
        self.payloads.get(&id)
            .map(|p| p.as_slice())
    }

    pub(crate) fn resource<R: Read + Seek>(&mut self, reader: &mut R, stream_length: u64, id: i16) -> Result<Option<&[u8]>, Error> {
        let payload = match self.payloads.entry(id) {
            Entry::Occupied(occupied) => occupied.into_mut(),
            Entry::Vacant(vacant) => {
                let Some(record) = self.records.get(&id) else { return Ok(None) };
                let payload = read_payload(reader, stream_length, record)?;
                vacant.insert(payload)
            },
        };
        Ok(Some(payload.as_slice()))
    }
}


/// A [`ResourceTypeTable`] together with the stream its payloads are read from.
///
/// Obtained from [`ResourceFork::type_table`](crate::ResourceFork::type_table). Dereferences to the
/// table for everything that does not need to touch the stream.
#[derive(Debug)]
pub struct TypeTable<'a, R> {
    table: &'a mut ResourceTypeTable,
    reader: &'a mut R,
    stream_length: u64,
}
impl<'a, R: Read + Seek> TypeTable<'a, R> {
    pub(crate) fn new(table: &'a mut ResourceTypeTable, reader: &'a mut R, stream_length: u64) -> Self {
        Self {
            table,
            reader,
            stream_length,
        }
    }

    /// Returns a copy of the payload of the resource, reading it from the stream the first time.
    ///
    /// Returns `Ok(None)` if there is no such resource. A failure to read one resource leaves the
    /// rest of the table usable.
    pub fn resource(&mut self, id: i16) -> Result<Option<Vec<u8>>, Error> {
        let payload = self.table.resource(self.reader, self.stream_length, id)?;
        Ok(payload.map(|p| p.to_vec()))
    }
}
impl<'a, R> Deref for TypeTable<'a, R> {
    type Target = ResourceTypeTable;
    fn deref(&self) -> &Self::Target {
        self.table
    }
}


fn read_name<R: Read + Seek>(
    reader: &mut R,
    map: &ResourceMap,
    os_type: OsType,
    entry: &ReferenceListEntry,
    stream_length: u64,
) -> Result<Vec<u8>, Error> {
    let name_position = map.name_list_position() + i64::from(entry.name_offset);
    let out_of_bounds = || Error::MalformedTypeTable {
        os_type,
        reason: MalformedTypeTableReason::NameOutOfBounds {
            id: entry.id,
            position: name_position,
            stream_length,
        },
    };
    let name_start = match u64::try_from(name_position) {
        Ok(np) if np < stream_length => np,
        _ => return Err(out_of_bounds()),
    };

    // 1 byte of length followed by n bytes of string
    let name_length = reader.read_u8_at(name_start)?;
    let mut name = vec![0u8; name_length.into()];
    let bytes_read = reader.read_exact_or_eof(&mut name)?;
    if bytes_read < name.len() {
        return Err(out_of_bounds());
    }
    Ok(name)
}

fn read_payload<R: Read + Seek>(reader: &mut R, stream_length: u64, record: &ResourceRecord) -> Result<Vec<u8>, Error> {
    let available = stream_length.saturating_sub(record.payload_offset);
    if record.length_prefix_truncated {
        return Err(Error::TruncatedPayload {
            id: record.id,
            expected: 4,
            available: stream_length.saturating_sub(record.payload_offset - 4),
        });
    }
    if record.length > available {
        return Err(Error::TruncatedPayload {
            id: record.id,
            expected: record.length,
            available,
        });
    }
    trace!("reading resource {}: {} bytes at {}", record.id, record.length, record.payload_offset);

    let length: usize = record.length.try_into()
        .map_err(|_| io::Error::from(io::ErrorKind::OutOfMemory))?;
    let mut payload = vec![0u8; length];
    reader.seek(SeekFrom::Start(record.payload_offset))?;
    let bytes_read = reader.read_exact_or_eof(&mut payload)?;
    if bytes_read < length {
        return Err(Error::TruncatedPayload {
            id: record.id,
            expected: record.length,
            available: bytes_read as u64,
        });
    }
    Ok(payload)
}


#[cfg(test)]
mod tests {
    use crate::error::{Error, MalformedTypeTableReason};
    use crate::fork::ResourceFork;
    use crate::os_type::OsType;
    use crate::test_fork::ForkBuilder;
    use tracing_test::traced_test;

    const ICON_TYPE: OsType = OsType::from_bytes(b"ICN#");

    fn icon_fork() -> Vec<u8> {
        ForkBuilder::new()
            .resource(b"ICN#", 128, Some("Application"), &[0xAA; 256])
            .resource(b"ICN#", 129, None, &[0x55; 256])
            .build()
    }

    // offset of the first reference list entry, relative to the start of the fork
    fn first_reference_position(bytes: &[u8]) -> usize {
        let map_offset = usize::try_from(u32::from_be_bytes(bytes[4..8].try_into().unwrap())).unwrap();
        let type_list_position = map_offset + 28;
        let reference_list_offset = usize::try_from(u16::from_be_bytes(bytes[map_offset+36..map_offset+38].try_into().unwrap())).unwrap();
        type_list_position + reference_list_offset
    }

    fn type_table_error(bytes: Vec<u8>) -> MalformedTypeTableReason {
        let mut fork = ResourceFork::from_bytes(bytes).unwrap();
        match fork.type_table(ICON_TYPE) {
            Err(Error::MalformedTypeTable { os_type, reason }) => {
                assert_eq!(os_type, ICON_TYPE);
                reason
            },
            Err(other) => panic!("unexpected error {}", other),
            Ok(_) => panic!("malformed type table accepted"),
        }
    }

    #[test]
    fn test_records_in_reference_list_order() {
        let mut fork = ResourceFork::from_bytes(icon_fork()).unwrap();
        let table = fork.type_table(ICON_TYPE).unwrap().unwrap();
        assert_eq!(table.os_type(), ICON_TYPE);
        assert_eq!(table.len(), 2);
        assert!(!table.is_empty());

        let records: Vec<_> = table.records().collect();
        assert_eq!(records[0].id, 128);
        assert_eq!(records[0].name.as_deref(), Some("Application"));
        assert_eq!(records[0].data_offset, 0);
        assert_eq!(records[0].length, 256);
        assert_eq!(records[1].id, 129);
        assert_eq!(records[1].data_offset, 4 + 256);
        assert_eq!(records[1].payload_offset, records[0].payload_offset + 256 + 4);
        assert!(records.iter().all(|r| !r.length_prefix_truncated));
    }

    #[test]
    fn test_name_out_of_bounds() {
        let mut bytes = icon_fork();
        let position = first_reference_position(&bytes);
        bytes[position+2..position+4].copy_from_slice(&0x7FF0i16.to_be_bytes());
        assert!(matches!(
            type_table_error(bytes),
            MalformedTypeTableReason::NameOutOfBounds { id: 128, .. },
        ));
    }

    #[test]
    fn test_reference_list_out_of_bounds() {
        let mut bytes = icon_fork();
        let map_offset = usize::try_from(u32::from_be_bytes(bytes[4..8].try_into().unwrap())).unwrap();
        bytes[map_offset+36..map_offset+38].copy_from_slice(&0x7FF0i16.to_be_bytes());
        assert!(matches!(
            type_table_error(bytes),
            MalformedTypeTableReason::ReferenceListOutOfBounds { .. },
        ));
    }

    #[test]
    #[traced_test]
    fn test_length_prefix_beyond_stream() {
        let mut bytes = icon_fork();
        let position = first_reference_position(&bytes);
        bytes[position+4..position+8].copy_from_slice(&0x00FF_FF00u32.to_be_bytes());
        let mut fork = ResourceFork::from_bytes(bytes).unwrap();
        let mut table = fork.type_table(ICON_TYPE).unwrap().unwrap();
        let record = table.record(128).unwrap();
        assert!(record.length_prefix_truncated);
        assert_eq!(record.length, 0);
        assert!(logs_contain("runs past the end of the stream"));

        match table.resource(128) {
            Err(Error::TruncatedPayload { id, expected, available }) => {
                assert_eq!(id, 128);
                assert_eq!(expected, 4);
                assert_eq!(available, 0);
            },
            other => panic!("unexpected result {:?}", other),
        }
        assert_eq!(table.resource(129).unwrap().unwrap(), vec![0x55; 256]);
    }
}
