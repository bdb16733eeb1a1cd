//! This is the `ConfigFile` struct.
//!
//! This is for finding the right default locations for various configuration files for
//! `skywatch`.  This is a configuration file/struct neutral loading engine, storing only the
//! base directory and with `load()` read the proper file, the default one or the embedded
//! default.
//!
//! This encapsulates the configuration file, available with `.inner()` or `.inner_mut()`.
//!

use std::fmt::Debug;
use std::fs;
use std::path::{Path, PathBuf};

use directories::BaseDirs;
use eyre::Result;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{debug, trace, warn};

use crate::makepath;

/// Main name for the directory base
const TAG: &str = "skywatch";

/// Everything that has a file version.
///
pub trait Versioned {
    fn version(&self) -> usize;
}

/// Describe a configuration struct loadable by `ConfigFile`.
///
pub trait IntoConfig: Debug + DeserializeOwned + Versioned {
    /// Filename searched in the default directory
    const FILENAME: &'static str;
    /// Version the code expects
    const VERSION: usize;

    /// Embedded content used when no file can be found.
    fn embedded() -> Option<&'static str> {
        None
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Bad file version {found}, expected {wanted}")]
    BadFileVersion { found: usize, wanted: usize },
    #[error("Unknown config file {0:?}")]
    MissingFile(PathBuf),
    #[error("No config file in {0:?} and no embedded default")]
    NoDefault(PathBuf),
    #[error("Can not find home directory")]
    NoHome,
}

/// Where the configuration was read from.
///
#[derive(Clone, Debug, PartialEq)]
pub enum ConfigSource {
    File(PathBuf),
    Embedded,
}

/// Configuration file with its origin.
///
#[derive(Debug)]
pub struct ConfigFile<T: IntoConfig> {
    /// This is the base directory for all files.
    basedir: PathBuf,
    /// Origin
    source: ConfigSource,
    inner: T,
}

/// Returns the default configuration directory for `tag`.
///
/// `$HOME/.config/<tag>` on UNIX, `%LOCALAPPDATA%\<tag>` on Windows.
///
#[tracing::instrument]
pub fn config_dir(tag: &str) -> Result<PathBuf> {
    let base = BaseDirs::new().ok_or(ConfigError::NoHome)?;

    #[cfg(unix)]
    let base = base.home_dir().join(".config");

    #[cfg(windows)]
    let base = base.data_local_dir().to_path_buf();

    debug!("base = {base:?}");
    Ok(makepath!(base, tag))
}

impl<T> ConfigFile<T>
where
    T: IntoConfig,
{
    /// Returns the path of the default config directory
    ///
    pub fn config_path(&self) -> PathBuf {
        self.basedir.clone()
    }

    /// Returns the path of the default config file
    ///
    pub fn default_file(&self) -> PathBuf {
        self.config_path().join(T::FILENAME)
    }

    /// Where we got our data from
    ///
    pub fn source(&self) -> &ConfigSource {
        &self.source
    }

    /// Load the file and return a struct T in the right format.
    ///
    /// Use the following search path:
    /// - file specified on CLI
    /// - default basedir (base on $HOME or $LOCALAPPDATA)
    /// - embedded default, if `T` has one
    ///
    #[tracing::instrument]
    pub fn load(fname: Option<&Path>) -> Result<ConfigFile<T>> {
        let basedir = config_dir(TAG).unwrap_or_else(|_| PathBuf::from("."));
        let default = basedir.join(T::FILENAME);

        let (source, data) = match fname {
            Some(fname) => {
                if !fname.exists() {
                    return Err(ConfigError::MissingFile(fname.to_path_buf()).into());
                }
                let fname = fname.canonicalize()?;
                trace!("Loading config file {fname:?}");
                (ConfigSource::File(fname.clone()), fs::read_to_string(fname)?)
            }
            None if default.exists() => {
                trace!("Loading default config file {default:?}");
                (
                    ConfigSource::File(default.clone()),
                    fs::read_to_string(&default)?,
                )
            }
            None => match T::embedded() {
                Some(data) => {
                    warn!("No config file in {default:?}, using embedded defaults");
                    (ConfigSource::Embedded, data.to_owned())
                }
                None => return Err(ConfigError::NoDefault(default).into()),
            },
        };

        let inner = Self::parse(&data)?;
        Ok(ConfigFile {
            basedir,
            source,
            inner,
        })
    }

    /// Parse and check the version.
    ///
    #[tracing::instrument(skip(data))]
    pub fn parse(data: &str) -> Result<T> {
        debug!("string data = {data}");

        let inner: T = hcl::from_str(data)?;
        debug!("struct data = {inner:?}");

        if inner.version() != T::VERSION {
            return Err(ConfigError::BadFileVersion {
                found: inner.version(),
                wanted: T::VERSION,
            }
            .into());
        }
        Ok(inner)
    }

    /// Return the inner configuration file
    ///
    pub fn inner(&self) -> &T {
        &self.inner
    }

    /// Return the inner configuration file as putable
    ///
    pub fn inner_mut(&mut self) -> &mut T {
        &mut self.inner
    }

    /// Consume and return the configuration itself
    ///
    pub fn into_inner(self) -> T {
        self.inner
    }
}
