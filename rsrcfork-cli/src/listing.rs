use std::io::{self, Read, Seek, Write};

use rsrcfork::{Error, OsType, ResourceFork};
use rsrcfork::header::ResourceAttributes;
use rsrcfork::type_names::type_name;
use serde::Serialize;


#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct TypeListing {
    pub os_type: String,
    pub code: u32,
    pub description: Option<&'static str>,
    pub resources: Vec<ResourceListing>,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct ResourceListing {
    pub id: i16,
    pub length: u64,
    pub name: Option<String>,
    pub attributes: ResourceAttributes,
}


/// Collects the types of the fork in on-disk order, with their resources in reference list order.
pub fn collect<R: Read + Seek>(fork: &mut ResourceFork<R>) -> Result<Vec<TypeListing>, Error> {
    let os_types: Vec<OsType> = fork.types().to_vec();
    let mut listings = Vec::with_capacity(os_types.len());
    for os_type in os_types {
        let Some(table) = fork.type_table(os_type)? else { continue };
        let resources = table.records()
            .map(|record| ResourceListing {
                id: record.id,
                length: record.length,
                name: record.name.clone(),
                attributes: record.attributes,
            })
            .collect();
        listings.push(TypeListing {
            os_type: os_type.to_string(),
            code: os_type.value(),
            description: type_name(os_type),
            resources,
        });
    }
    Ok(listings)
}

pub fn write_text<W: Write>(listings: &[TypeListing], out: &mut W) -> io::Result<()> {
    for listing in listings {
        write!(out, "\"{}\" (0x{:08X})", listing.os_type, listing.code)?;
        if let Some(description) = listing.description {
            write!(out, " - {}", description)?;
        }
        writeln!(out)?;

        writeln!(out, "  {:>6}  {:>10}  Name", "ID", "Length")?;
        for resource in &listing.resources {
            writeln!(
                out, "  {:>6}  {:>10}  {}",
                resource.id, resource.length, resource.name.as_deref().unwrap_or(""),
            )?;
        }
    }
    Ok(())
}

pub fn write_json<W: Write>(listings: &[TypeListing], out: &mut W) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *out, listings)?;
    writeln!(out)
}
