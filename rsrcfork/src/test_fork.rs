//! Assembles resource forks byte by byte for tests.
//!
//! Available to other crates with the `test-util` feature.


use std::io::{self, Read, Seek, SeekFrom};

use crate::os_type::OsType;


/// Where the data area starts; like real forks, the bytes between the header and the data area are
/// left empty.
pub const DATA_OFFSET: usize = 256;

const MAP_FIXED_LENGTH: usize = 28;


struct TestResource {
    id: i16,
    name: Option<Vec<u8>>,
    attributes: u8,
    data: Vec<u8>,
}

#[derive(Default)]
pub struct ForkBuilder {
    types: Vec<(OsType, Vec<TestResource>)>,
    map_attributes: u16,
    data_padding: usize,
}
impl ForkBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn resource(self, os_type: &[u8; 4], id: i16, name: Option<&str>, data: &[u8]) -> Self {
        self.resource_with_attributes(os_type, id, name.map(|n| n.as_bytes()), 0, data)
    }

    pub fn resource_with_attributes(mut self, os_type: &[u8; 4], id: i16, name: Option<&[u8]>, attributes: u8, data: &[u8]) -> Self {
        let os_type = OsType::from(os_type);
        let resource = TestResource {
            id,
            name: name.map(|n| n.to_vec()),
            attributes,
            data: data.to_vec(),
        };
        match self.types.iter_mut().find(|(t, _)| *t == os_type) {
            Some((_, resources)) => resources.push(resource),
            None => self.types.push((os_type, vec![resource])),
        }
        self
    }

    pub fn map_attributes(mut self, attributes: u16) -> Self {
        self.map_attributes = attributes;
        self
    }

    /// Appends unused bytes to the data area, e.g. to keep its length positive without resources.
    pub fn data_padding(mut self, padding: usize) -> Self {
        self.data_padding = padding;
        self
    }

    pub fn build(&self) -> Vec<u8> {
        // data area
        let mut data_area = Vec::new();
        let mut data_offsets = Vec::new();
        for (_, resources) in &self.types {
            let mut offsets = Vec::with_capacity(resources.len());
            for resource in resources {
                offsets.push(data_area.len());
                data_area.extend_from_slice(&u32::try_from(resource.data.len()).unwrap().to_be_bytes());
                data_area.extend_from_slice(&resource.data);
            }
            data_offsets.push(offsets);
        }
        data_area.resize(data_area.len() + self.data_padding, 0x00);

        // name list
        let mut name_list = Vec::new();
        let mut name_offsets = Vec::new();
        for (_, resources) in &self.types {
            let mut offsets = Vec::with_capacity(resources.len());
            for resource in resources {
                match &resource.name {
                    Some(name) => {
                        offsets.push(i16::try_from(name_list.len()).unwrap());
                        name_list.push(u8::try_from(name.len()).unwrap());
                        name_list.extend_from_slice(name);
                    },
                    None => offsets.push(-1),
                }
            }
            name_offsets.push(offsets);
        }

        // type list and reference lists
        let mut type_list = Vec::new();
        let type_count_minus_one = if self.types.is_empty() {
            0xFFFF
        } else {
            u16::try_from(self.types.len() - 1).unwrap()
        };
        type_list.extend_from_slice(&type_count_minus_one.to_be_bytes());
        let mut reference_lists = Vec::new();
        let reference_lists_start = 2 + 8 * self.types.len();
        for (type_index, (os_type, resources)) in self.types.iter().enumerate() {
            let reference_list_offset = reference_lists_start + reference_lists.len();
            type_list.extend_from_slice(&os_type.to_bytes());
            type_list.extend_from_slice(&u16::try_from(resources.len() - 1).unwrap().to_be_bytes());
            type_list.extend_from_slice(&i16::try_from(reference_list_offset).unwrap().to_be_bytes());

            for (resource_index, resource) in resources.iter().enumerate() {
                let data_offset = u32::try_from(data_offsets[type_index][resource_index]).unwrap();
                let attributes_and_offset = (u32::from(resource.attributes) << 24) | data_offset;
                reference_lists.extend_from_slice(&resource.id.to_be_bytes());
                reference_lists.extend_from_slice(&name_offsets[type_index][resource_index].to_be_bytes());
                reference_lists.extend_from_slice(&attributes_and_offset.to_be_bytes());
                reference_lists.extend_from_slice(&[0x00; 4]);
            }
        }
        type_list.extend_from_slice(&reference_lists);

        let map_offset = DATA_OFFSET + data_area.len();
        let name_list_offset = MAP_FIXED_LENGTH + type_list.len();
        let map_length = name_list_offset + name_list.len();

        let mut header = Vec::with_capacity(16);
        header.extend_from_slice(&i32::try_from(DATA_OFFSET).unwrap().to_be_bytes());
        header.extend_from_slice(&i32::try_from(map_offset).unwrap().to_be_bytes());
        header.extend_from_slice(&i32::try_from(data_area.len()).unwrap().to_be_bytes());
        header.extend_from_slice(&i32::try_from(map_length).unwrap().to_be_bytes());

        let mut fork = header.clone();
        fork.resize(DATA_OFFSET, 0x00);
        fork.extend_from_slice(&data_area);
        fork.extend_from_slice(&header);
        fork.extend_from_slice(&[0x00; 6]); // handle to next map, file ref
        fork.extend_from_slice(&self.map_attributes.to_be_bytes());
        fork.extend_from_slice(&i16::try_from(MAP_FIXED_LENGTH).unwrap().to_be_bytes());
        fork.extend_from_slice(&i16::try_from(name_list_offset).unwrap().to_be_bytes());
        fork.extend_from_slice(&type_list);
        fork.extend_from_slice(&name_list);
        fork
    }
}


/// Wraps a reader, counting the read calls passed through to it.
pub struct CountingReader<R> {
    inner: R,
    read_calls: usize,
}
impl<R> CountingReader<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            read_calls: 0,
        }
    }

    pub fn read_calls(&self) -> usize { self.read_calls }
}
impl<R: Read> Read for CountingReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.read_calls += 1;
        self.inner.read(buf)
    }
}
impl<R: Seek> Seek for CountingReader<R> {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        self.inner.seek(pos)
    }
}


/// The `vers` resource of a Disk Copy 4.2 image.
pub const DISK_COPY_VERS: &[u8] = b"\x06\x40\x80\x00\x00\x00\x09Disk Copy\x1C4.2, data checksum=$A5147F7E";

/// The `STR ` resource -16396 of a Disk Copy 4.2 image.
pub const DISK_COPY_STR: &[u8] = b"\x09Disk Copy";

/// Builds a fork laid out like the resource fork of a Disk Copy 4.2 image.
pub fn disk_copy_fork() -> Vec<u8> {
    ForkBuilder::new()
        .resource(b"STR ", -16396, None, DISK_COPY_STR)
        .resource(b"vers", 1, None, DISK_COPY_VERS)
        .build()
}
