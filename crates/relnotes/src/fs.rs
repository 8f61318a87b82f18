//! File access that reports which path failed, and skips writes during dry runs.

use std::{
    io,
    path::{Path, PathBuf},
};

use miette::Diagnostic;
use thiserror::Error;
use tracing::{info, trace};

use crate::run_type::RunType;

/// Write `contents` to `path`, creating parent directories, unless this is a dry run.
pub(crate) fn write(path: RunType<&Path>, contents: &str) -> Result<(), Error> {
    match path {
        RunType::DryRun(path) => {
            info!("Would write {} bytes to {}", contents.len(), path.display());
            Ok(())
        }
        RunType::Real(path) => {
            if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
                trace!("Creating directory {}", parent.display());
                std::fs::create_dir_all(parent).map_err(|source| Error::Write {
                    path: parent.into(),
                    source,
                })?;
            }
            trace!("Writing to {}", path.display());
            std::fs::write(path, contents).map_err(|source| Error::Write {
                path: path.into(),
                source,
            })
        }
    }
}

pub(crate) fn read_to_string<P: AsRef<Path> + Into<PathBuf>>(path: P) -> Result<String, Error> {
    std::fs::read_to_string(path.as_ref()).map_err(|source| Error::Read {
        path: path.into(),
        source,
    })
}

#[derive(Debug, Diagnostic, Error)]
pub(crate) enum Error {
    #[error("Error writing to {path}: {source}")]
    #[diagnostic(
        code(fs::write),
        help("Make sure you have permission to write to this file.")
    )]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Error reading from {path}: {source}")]
    #[diagnostic(
        code(fs::read),
        help("Make sure the file exists and you have permission to read it.")
    )]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
