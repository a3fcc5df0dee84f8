use std::fmt;
use std::fs;
use std::io::{self, Read, Seek};
use std::path::{Path, PathBuf};

use rsrcfork::{OsType, ResourceFork};
use tracing::{debug, warn};


#[derive(Debug)]
pub enum Error {
    OutputExists(PathBuf),
    Io(io::Error),
    Fork(rsrcfork::Error),
}
impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutputExists(path)
                => write!(f, "output directory {} already exists", path.display()),
            Self::Io(e)
                => write!(f, "failed to write output: {}", e),
            Self::Fork(e)
                => write!(f, "{}", e),
        }
    }
}
impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::OutputExists(_) => None,
            Self::Io(e) => Some(e),
            Self::Fork(e) => Some(e),
        }
    }
}
impl From<io::Error> for Error {
    fn from(value: io::Error) -> Self { Self::Io(value) }
}
impl From<rsrcfork::Error> for Error {
    fn from(value: rsrcfork::Error) -> Self { Self::Fork(value) }
}


#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Summary {
    pub written: usize,
    pub skipped: usize,
}


/// Writes every resource to `output_dir/<type>/<id>`.
///
/// `output_dir` must not exist yet. Resources whose payload is truncated are skipped with a
/// warning.
pub fn extract<R: Read + Seek>(fork: &mut ResourceFork<R>, output_dir: &Path) -> Result<Summary, Error> {
    if output_dir.exists() {
        return Err(Error::OutputExists(output_dir.to_owned()));
    }
    fs::create_dir_all(output_dir)?;

    let mut summary = Summary::default();
    let os_types: Vec<OsType> = fork.types().to_vec();
    for os_type in os_types {
        let Some(mut table) = fork.type_table(os_type)? else { continue };

        let type_dir = output_dir.join(os_type.to_path_component());
        fs::create_dir(&type_dir)?;

        let ids = table.ids().to_vec();
        for id in ids {
            let payload = match table.resource(id) {
                Ok(Some(p)) => p,
                Ok(None) => continue,
                Err(e @ rsrcfork::Error::TruncatedPayload { .. }) => {
                    warn!("type {}: skipping resource {}: {}", os_type, id, e);
                    summary.skipped += 1;
                    continue;
                },
                Err(e) => return Err(e.into()),
            };
            let path = type_dir.join(id.to_string());
            debug!("writing {} bytes to {}", payload.len(), path.display());
            fs::write(&path, &payload)?;
            summary.written += 1;
        }
    }
    Ok(summary)
}
