use std::path::Path;

use miette::{Diagnostic, NamedSource, SourceSpan};
use relnotes_config::Config;
use thiserror::Error;
use tracing::debug;

use crate::fs;

/// Load `relnotes.toml` from the working directory, or the defaults if there is none.
pub(crate) fn load() -> Result<Config, Error> {
    let path = Path::new(Config::FILE_NAME);
    if !path.exists() {
        debug!("No {} found, using the default config", Config::FILE_NAME);
        return Ok(Config::default());
    }
    let source = fs::read_to_string(path)?;
    Config::from_toml(&source).map_err(|err| {
        Error::Invalid(Box::new(InvalidConfig {
            message: err.message,
            span: err.span.map(SourceSpan::from),
            source_code: NamedSource::new(Config::FILE_NAME, source),
        }))
    })
}

#[derive(Debug, Diagnostic, Error)]
pub(crate) enum Error {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Fs(#[from] fs::Error),
    #[error(transparent)]
    #[diagnostic(transparent)]
    Invalid(Box<InvalidConfig>),
}

#[derive(Debug, Diagnostic, Error)]
#[error("Invalid {}: {message}", Config::FILE_NAME)]
#[diagnostic(
    code(config::invalid),
    help("Check the keys and values of the config file against the documentation in the README")
)]
pub(crate) struct InvalidConfig {
    message: String,
    #[label("here")]
    span: Option<SourceSpan>,
    #[source_code]
    source_code: NamedSource<String>,
}
