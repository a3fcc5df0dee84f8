//! Decoder for the classic Mac OS resource fork format.
//!
//! A resource fork is a single stream consisting of a header, a data area holding the payloads of
//! the resources (each prefixed by its length) and a resource map listing the resource types, the
//! resources of each type and their names.
//!
//! [`ResourceFork`] decodes the header and the type list eagerly; the resources of a type are only
//! looked at once [`ResourceFork::type_table`] is called for that type, and the payload of a
//! resource is only read once [`TypeTable::resource`] is called for it.


mod error;
mod fork;
pub mod header;
mod os_type;
pub mod pascal_string;
mod read_ext;
mod type_table;
pub mod type_names;
pub mod version;

#[cfg(any(test, feature = "test-util"))]
pub mod test_fork;


pub use crate::error::{Error, MalformedForkReason, MalformedTypeTableReason};
pub use crate::fork::ResourceFork;
pub use crate::os_type::OsType;
pub use crate::type_table::{ResourceRecord, ResourceTypeTable, TypeTable};
