//! Kernel location and integrity settings.
//!
//! A [`KernelConfig`] names the BSP file to load and, optionally, the byte
//! length and SHA-512 digest it must have. The checks are skipped when unset.
//!
//! ```rust, no_run
//! use bsp_ephem::config::KernelConfig;
//! use bsp_ephem::bsp_file::BspFile;
//!
//! let config = KernelConfig::from_env()?;
//! let kernel = BspFile::open(&config)?;
//! # Ok::<(), bsp_ephem::bsp_errors::BspError>(())
//! ```
//!
//! Environment overrides used by [`KernelConfig::from_env`]:
//!
//! * `BSP_EPHEM_PATH` – kernel path,
//! * `BSP_EPHEM_LENGTH` – expected length in bytes,
//! * `BSP_EPHEM_SHA512` – expected digest, hexadecimal.
use camino::{Utf8Path, Utf8PathBuf};

use crate::bsp_errors::BspError;

/// Overrides [`KernelConfig::path`].
pub const ENV_PATH: &str = "BSP_EPHEM_PATH";
/// Overrides [`KernelConfig::expected_length`], decimal bytes.
pub const ENV_LENGTH: &str = "BSP_EPHEM_LENGTH";
/// Overrides [`KernelConfig::expected_sha512`], 128 hex characters.
pub const ENV_SHA512: &str = "BSP_EPHEM_SHA512";

/// Default kernel location, relative to the working directory.
pub const DEFAULT_KERNEL_PATH: &str = "files/de440s.bsp";

/// Where the kernel lives and what it must look like on disk.
#[derive(Debug, Clone, PartialEq)]
pub struct KernelConfig {
    pub path: Utf8PathBuf,
    pub expected_length: Option<u64>,
    pub expected_sha512: Option<String>,
}

impl Default for KernelConfig {
    fn default() -> Self {
        KernelConfig::new(DEFAULT_KERNEL_PATH)
    }
}

impl KernelConfig {
    /// A config for `path` with both integrity checks disabled.
    pub fn new(path: impl AsRef<Utf8Path>) -> Self {
        KernelConfig {
            path: path.as_ref().to_path_buf(),
            expected_length: None,
            expected_sha512: None,
        }
    }

    /// Require the file to be exactly `length` bytes long.
    pub fn with_length(mut self, length: u64) -> Self {
        self.expected_length = Some(length);
        self
    }

    /// The digest is compared case-insensitively.
    pub fn with_sha512(mut self, digest: impl Into<String>) -> Self {
        self.expected_sha512 = Some(digest.into().trim().to_ascii_lowercase());
        self
    }

    /// Defaults overridden by the `BSP_EPHEM_*` environment variables.
    pub fn from_env() -> Result<Self, BspError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`Self::from_env`] with an arbitrary variable source.
    ///
    /// Arguments
    /// -----------------
    /// * `lookup`: returns the value of a variable, or `None` when unset.
    ///
    /// Return
    /// ----------
    /// * The config, or [`BspError::InvalidConfig`] when the length is not an
    ///   unsigned integer or the digest is not 128 hexadecimal characters.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, BspError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = match lookup(ENV_PATH) {
            Some(path) => KernelConfig::new(path.as_str()),
            None => KernelConfig::default(),
        };

        if let Some(length) = lookup(ENV_LENGTH) {
            let length = length.trim().parse::<u64>().map_err(|err| {
                BspError::InvalidConfig(format!("{ENV_LENGTH} = {length:?}: {err}"))
            })?;
            config = config.with_length(length);
        }

        if let Some(digest) = lookup(ENV_SHA512) {
            let digest = digest.trim();
            if digest.len() != 128 || !digest.chars().all(|c| c.is_ascii_hexdigit()) {
                return Err(BspError::InvalidConfig(format!(
                    "{ENV_SHA512} must be 128 hexadecimal characters"
                )));
            }
            config = config.with_sha512(digest);
        }

        Ok(config)
    }
}

#[cfg(test)]
mod test_config {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_default() {
        let config = KernelConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, KernelConfig::default());
        assert_eq!(config.path, Utf8PathBuf::from("files/de440s.bsp"));
        assert_eq!(config.expected_length, None);
    }

    #[test]
    fn test_overrides() {
        let digest = "AB".repeat(64);
        let config = KernelConfig::from_lookup(lookup(&[
            (ENV_PATH, "/data/de440.bsp"),
            (ENV_LENGTH, "123456"),
            (ENV_SHA512, digest.as_str()),
        ]))
        .unwrap();

        assert_eq!(config.path, Utf8PathBuf::from("/data/de440.bsp"));
        assert_eq!(config.expected_length, Some(123456));
        assert_eq!(config.expected_sha512, Some("ab".repeat(64)));
    }

    #[test]
    fn test_invalid_values() {
        assert!(matches!(
            KernelConfig::from_lookup(lookup(&[(ENV_LENGTH, "lots")])),
            Err(BspError::InvalidConfig(_))
        ));
        assert!(matches!(
            KernelConfig::from_lookup(lookup(&[(ENV_SHA512, "abc")])),
            Err(BspError::InvalidConfig(_))
        ));
    }
}
