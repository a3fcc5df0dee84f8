use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::io::{Cursor, Read, Seek, SeekFrom};

use tracing::debug;

use crate::error::{Error, MalformedForkReason};
use crate::header::{ForkHeader, ResourceMap, TypeListEntry};
use crate::os_type::OsType;
use crate::read_ext::SeekReadExt;
use crate::type_table::{ResourceTypeTable, TypeTable};


/// A read-only view of a resource fork.
///
/// The fork owns its stream; every read seeks first, so the stream may not be shared with anything
/// else while the fork is alive. Use [`ResourceFork::into_inner`] to get it back.
#[derive(Debug)]
pub struct ResourceFork<R> {
    reader: R,
    stream_length: u64,
    header: ForkHeader,
    map: ResourceMap,
    os_types: Vec<OsType>,
    type_entries: HashMap<OsType, TypeListEntry>,
    type_tables: HashMap<OsType, ResourceTypeTable>,
}
impl<R: Read + Seek> ResourceFork<R> {
    /// Decodes the header, the resource map and the type list.
    ///
    /// Fails with [`Error::MalformedFork`] if the header is inconsistent with itself, with the
    /// length of the stream or with its copy in the resource map.
    pub fn new(mut reader: R) -> Result<Self, Error> {
        let stream_length = reader.stream_length()?;
        if stream_length < ForkHeader::LENGTH {
            return Err(MalformedForkReason::TooShort { stream_length }.into());
        }

        reader.seek(SeekFrom::Start(0))?;
        let header = ForkHeader::read(&mut reader)?;
        header.validate(stream_length)?;
        debug!("fork header: {:?} (stream length {})", header, stream_length);

        let map = ResourceMap::read(&mut reader, &header, stream_length)?;
        debug!("resource map: {:?}", map);

        // ResourceMap::read checked that the count fits; the entries have to fit as well
        let type_count = map.type_count();
        let type_list_end = map.type_list_position() + 2 + (type_count * TypeListEntry::LENGTH) as i64;
        if type_list_end > stream_length as i64 {
            return Err(MalformedForkReason::TypeListOutOfBounds {
                position: map.type_list_position(),
                stream_length,
            }.into());
        }

        let mut os_types = Vec::with_capacity(type_count);
        let mut type_entries = HashMap::with_capacity(type_count);
        for _ in 0..type_count {
            let entry = TypeListEntry::read(&mut reader)?;
            os_types.push(entry.os_type);
            type_entries.insert(entry.os_type, entry);
        }
        debug!("types: {:?}", os_types);

        Ok(Self {
            reader,
            stream_length,
            header,
            map,
            os_types,
            type_entries,
            type_tables: HashMap::new(),
        })
    }

    /// The resource table of the given type; `Ok(None)` if the fork has no resources of that type.
    ///
    /// The table is read from the stream on the first call for the type and kept; later calls
    /// return the same table without touching the stream.
    pub fn type_table(&mut self, os_type: OsType) -> Result<Option<TypeTable<'_, R>>, Error> {
        let Some(type_entry) = self.type_entries.get(&os_type) else { return Ok(None) };

        let table = match self.type_tables.entry(os_type) {
            Entry::Occupied(occupied) => occupied.into_mut(),
            Entry::Vacant(vacant) => {
                let table = ResourceTypeTable::read(&mut self.reader, type_entry, &self.map, self.stream_length)?;
                vacant.insert(table)
            },
        };
        Ok(Some(TypeTable::new(table, &mut self.reader, self.stream_length)))
    }
}
impl ResourceFork<Cursor<Vec<u8>>> {
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self, Error> {
        Self::new(Cursor::new(bytes))
    }
}
impl<R> ResourceFork<R> {
    /// The type codes in the order of the type list.
    pub fn types(&self) -> &[OsType] { &self.os_types }

    pub fn has_type(&self, os_type: OsType) -> bool {
        self.type_entries.contains_key(&os_type)
    }

    pub fn type_entry(&self, os_type: OsType) -> Option<&TypeListEntry> {
        self.type_entries.get(&os_type)
    }

    pub fn header(&self) -> &ForkHeader { &self.header }

    pub fn map(&self) -> &ResourceMap { &self.map }

    pub fn stream_length(&self) -> u64 { self.stream_length }

    pub fn get_ref(&self) -> &R { &self.reader }

    /// Gives up the fork, returning the underlying stream.
    pub fn into_inner(self) -> R { self.reader }
}


#[cfg(test)]
mod tests {
    use super::ResourceFork;
    use crate::error::{Error, MalformedForkReason};
    use crate::header::{MapAttributes, ResourceAttributes};
    use crate::os_type::OsType;
    use crate::test_fork::{
        CountingReader, DATA_OFFSET, DISK_COPY_STR, DISK_COPY_VERS, ForkBuilder, disk_copy_fork,
    };
    use std::io::Cursor;
    use tracing_test::traced_test;

    const STR_TYPE: OsType = OsType::from_bytes(b"STR ");
    const VERS_TYPE: OsType = OsType::from_bytes(b"vers");

    fn malformed_reason(bytes: Vec<u8>) -> MalformedForkReason {
        match ResourceFork::from_bytes(bytes) {
            Err(Error::MalformedFork(reason)) => reason,
            Err(other) => panic!("unexpected error {}", other),
            Ok(_) => panic!("malformed fork accepted"),
        }
    }

    #[test]
    fn test_disk_copy_fork() {
        let mut fork = ResourceFork::from_bytes(disk_copy_fork()).unwrap();
        assert_eq!(fork.types(), &[STR_TYPE, VERS_TYPE]);

        let mut str_table = fork.type_table(STR_TYPE).unwrap().unwrap();
        assert_eq!(str_table.ids(), &[-16396]);
        assert_eq!(str_table.length(-16396), 10);
        assert_eq!(str_table.name(-16396), None);
        assert_eq!(
            str_table.resource(-16396).unwrap().unwrap(),
            vec![0x09, b'D', b'i', b's', b'k', b' ', b'C', b'o', b'p', b'y'],
        );

        let mut vers_table = fork.type_table(VERS_TYPE).unwrap().unwrap();
        assert_eq!(vers_table.ids(), &[1]);
        assert_eq!(vers_table.length(1), 45);
        assert_eq!(vers_table.name(1), None);
        assert_eq!(vers_table.resource(1).unwrap().unwrap(), DISK_COPY_VERS);
    }

    #[test]
    fn test_listing_is_consistent() {
        let mut fork = ResourceFork::from_bytes(disk_copy_fork()).unwrap();
        let types = fork.types().to_vec();
        assert_eq!(fork.types(), types.as_slice());

        for os_type in types {
            assert!(fork.has_type(os_type));
            let mut table = fork.type_table(os_type).unwrap()
                .expect("listed type has no table");
            for id in table.ids().to_vec() {
                assert!(table.contains_id(id));
                let payload = table.resource(id).unwrap().unwrap();
                assert_eq!(table.length(id), payload.len() as u64);
            }
        }
    }

    #[test]
    fn test_cached_lookups_skip_stream() {
        let reader = CountingReader::new(Cursor::new(disk_copy_fork()));
        let mut fork = ResourceFork::new(reader).unwrap();
        let after_construction = fork.get_ref().read_calls();

        let first_payload = {
            let mut table = fork.type_table(STR_TYPE).unwrap().unwrap();
            table.resource(-16396).unwrap().unwrap()
        };
        let after_first_fetch = fork.get_ref().read_calls();
        assert!(after_first_fetch > after_construction);

        let second_payload = {
            let mut table = fork.type_table(STR_TYPE).unwrap().unwrap();
            assert_eq!(table.cached_resource(-16396), Some(DISK_COPY_STR));
            table.resource(-16396).unwrap().unwrap()
        };
        assert_eq!(first_payload, second_payload);
        assert_eq!(fork.get_ref().read_calls(), after_first_fetch);
    }

    #[test]
    fn test_construction_does_not_read_reference_lists() {
        let mut bytes = disk_copy_fork();
        // wreck the data area; construction must not notice
        for b in &mut bytes[DATA_OFFSET..DATA_OFFSET + 8] {
            *b = 0xFF;
        }
        let fork = ResourceFork::from_bytes(bytes).unwrap();
        assert_eq!(fork.types().len(), 2);
    }

    #[test]
    fn test_header_mismatch() {
        let mut bytes = disk_copy_fork();
        let map_offset = usize::try_from(u32::from_be_bytes(bytes[4..8].try_into().unwrap())).unwrap();
        // change the data length in the map's copy of the header
        bytes[map_offset + 11] ^= 0x01;
        assert!(matches!(malformed_reason(bytes), MalformedForkReason::HeaderMismatch { .. }));
    }

    #[test]
    fn test_data_area_beyond_stream() {
        let mut bytes = disk_copy_fork();
        bytes[8..12].copy_from_slice(&0x0010_0000i32.to_be_bytes());
        assert!(matches!(malformed_reason(bytes), MalformedForkReason::DataOutOfBounds { .. }));
    }

    #[test]
    fn test_map_beyond_stream() {
        let mut bytes = disk_copy_fork();
        bytes.pop();
        assert!(matches!(malformed_reason(bytes), MalformedForkReason::MapOutOfBounds { .. }));
    }

    #[test]
    fn test_non_positive_header_field() {
        assert_eq!(
            malformed_reason(vec![0u8; 64]),
            MalformedForkReason::NonPositiveField { field: "data_offset", value: 0 },
        );
    }

    #[test]
    fn test_too_short() {
        assert_eq!(malformed_reason(vec![0u8; 8]), MalformedForkReason::TooShort { stream_length: 8 });
    }

    #[test]
    fn test_map_too_short_for_fixed_fields() {
        // data area of 4 bytes at 16, map of 16 bytes at 20 holding only the header copy
        let mut header = Vec::new();
        for value in [16i32, 20, 4, 16] {
            header.extend_from_slice(&value.to_be_bytes());
        }
        let mut bytes = header.clone();
        bytes.extend_from_slice(&[0x00; 4]);
        bytes.extend_from_slice(&header);
        assert_eq!(bytes.len(), 36);

        let reason = malformed_reason(bytes);
        assert_eq!(reason, MalformedForkReason::MapTooShort { map_length: 16 });
        assert_eq!(
            Error::MalformedFork(reason).to_string(),
            "not a valid resource fork: resource map of 16 bytes is too short for its fixed fields",
        );
    }

    #[test]
    fn test_map_attributes() {
        let bytes = ForkBuilder::new()
            .resource(b"STR ", 128, None, b"\x00")
            .map_attributes(0x0080)
            .build();
        let fork = ResourceFork::from_bytes(bytes).unwrap();
        assert_eq!(fork.map().attributes, MapAttributes::READ_ONLY);
        assert_eq!(fork.map().handle_to_next_map, 0);
    }

    #[test]
    fn test_many_types() {
        let mut builder = ForkBuilder::new();
        let mut expected_types = Vec::new();
        for i in 0..29u8 {
            let code = [b'T', b'0' + i / 10, b'0' + i % 10, b' '];
            builder = builder.resource(&code, i16::from(i), None, &[i]);
            expected_types.push(OsType::from(code));
        }
        let mut fork = ResourceFork::from_bytes(builder.build()).unwrap();
        assert_eq!(fork.types().len(), 29);
        assert_eq!(fork.types(), expected_types.as_slice());
        assert!(!fork.has_type(VERS_TYPE));
        assert!(fork.type_table(VERS_TYPE).unwrap().is_none());

        let mut last = fork.type_table(OsType::from(b"T28 ")).unwrap().unwrap();
        assert_eq!(last.resource(28).unwrap().unwrap(), vec![28]);
    }

    #[test]
    fn test_empty_fork_sentinel() {
        let bytes = ForkBuilder::new()
            .data_padding(4)
            .build();
        let mut fork = ResourceFork::from_bytes(bytes).unwrap();
        assert_eq!(fork.map().number_of_types, 0xFFFF);
        assert!(fork.types().is_empty());
        assert!(fork.type_table(STR_TYPE).unwrap().is_none());
    }

    #[test]
    fn test_missing_id() {
        let mut fork = ResourceFork::from_bytes(disk_copy_fork()).unwrap();
        let mut table = fork.type_table(STR_TYPE).unwrap().unwrap();
        assert!(!table.contains_id(128));
        assert_eq!(table.resource(128).unwrap(), None);
        assert_eq!(table.name(128), None);
        assert_eq!(table.length(128), 0);
    }

    #[test]
    fn test_names_and_attributes() {
        let bytes = ForkBuilder::new()
            .resource(b"CODE", 0, None, &[0x00, 0x00])
            .resource(b"CODE", 1, Some("First Segment"), &[0x3F, 0x3C, 0x00, 0x01])
            .resource_with_attributes(b"CODE", 2, Some(&b"Caf\x8E"[..]), 0x60, &[])
            .build();
        let mut fork = ResourceFork::from_bytes(bytes).unwrap();
        let table = fork.type_table(OsType::from(b"CODE")).unwrap().unwrap();
        assert_eq!(table.ids(), &[0, 1, 2]);
        assert_eq!(table.name(0), None);
        assert_eq!(table.name(1), Some("First Segment"));
        assert_eq!(table.name(2), Some("Caf\u{8E}"));
        assert_eq!(table.name_bytes(2), Some(&b"Caf\x8E"[..]));
        assert_eq!(table.length(2), 0);

        let record = table.record(2).unwrap();
        assert_eq!(record.attributes, ResourceAttributes::SYS_HEAP | ResourceAttributes::PURGEABLE);
        let names: Vec<Option<&str>> = table.records()
            .map(|r| r.name.as_deref())
            .collect();
        assert_eq!(names, vec![None, Some("First Segment"), Some("Caf\u{8E}")]);
    }

    #[test]
    fn test_truncated_payload_leaves_others_readable() {
        let mut bytes = disk_copy_fork();
        // length prefix of the STR resource, the first in the data area
        bytes[DATA_OFFSET..DATA_OFFSET + 4].copy_from_slice(&0x0000_FFFFu32.to_be_bytes());
        let stream_length = bytes.len() as u64;
        let mut fork = ResourceFork::from_bytes(bytes).unwrap();

        let mut str_table = fork.type_table(STR_TYPE).unwrap().unwrap();
        assert_eq!(str_table.length(-16396), 0xFFFF);
        match str_table.resource(-16396) {
            Err(Error::TruncatedPayload { id, expected, available }) => {
                assert_eq!(id, -16396);
                assert_eq!(expected, 0xFFFF);
                assert_eq!(available, stream_length - (DATA_OFFSET as u64 + 4));
            },
            other => panic!("unexpected result {:?}", other),
        }
        assert_eq!(str_table.cached_resource(-16396), None);

        let mut vers_table = fork.type_table(VERS_TYPE).unwrap().unwrap();
        assert_eq!(vers_table.resource(1).unwrap().unwrap(), DISK_COPY_VERS);
    }

    #[test]
    #[traced_test]
    fn test_duplicate_ids_last_wins() {
        let bytes = ForkBuilder::new()
            .resource(b"STR#", 5, Some("first"), b"one")
            .resource(b"STR#", 7, None, b"between")
            .resource(b"STR#", 5, Some("second"), b"two")
            .build();
        let mut fork = ResourceFork::from_bytes(bytes).unwrap();
        let mut table = fork.type_table(OsType::from(b"STR#")).unwrap().unwrap();
        assert_eq!(table.ids(), &[5, 7, 5]);
        assert_eq!(table.name(5), Some("second"));
        assert_eq!(table.resource(5).unwrap().unwrap(), b"two");
        assert!(logs_contain("duplicate resource ID 5"));
    }

    #[test]
    fn test_into_inner_returns_stream() {
        let bytes = disk_copy_fork();
        let fork = ResourceFork::from_bytes(bytes.clone()).unwrap();
        assert_eq!(fork.header().data_offset, DATA_OFFSET as i32);
        assert_eq!(fork.stream_length(), bytes.len() as u64);
        assert_eq!(fork.into_inner().into_inner(), bytes);
    }
}
