// Copyright (c) 2025 Abacus Contributors. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Configuration sources: defaults, TOML files, and environment variables.

use std::collections::BTreeMap;
use std::path::PathBuf;

use tracing::{debug, trace};

use crate::error::ConfigError;
use crate::layer::ServerConfigLayer;
use crate::sections::{
	AccessConfigLayer, AuthConfigLayer, HttpConfigLayer, LoggingConfigLayer, OrgScopeSpec,
	StorageConfigLayer, UserSpec,
};

/// Source precedence levels (higher = overrides lower).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Precedence {
	Defaults = 10,
	ConfigFile = 20,
	Environment = 50,
}

/// Trait for configuration sources.
pub trait ConfigSource: Send + Sync {
	fn name(&self) -> &'static str;
	fn precedence(&self) -> Precedence;
	fn load(&self) -> Result<ServerConfigLayer, ConfigError>;
}

/// Built-in defaults source.
pub struct DefaultsSource;

impl ConfigSource for DefaultsSource {
	fn name(&self) -> &'static str {
		"defaults"
	}

	fn precedence(&self) -> Precedence {
		Precedence::Defaults
	}

	fn load(&self) -> Result<ServerConfigLayer, ConfigError> {
		debug!("loading defaults");
		Ok(ServerConfigLayer::default())
	}
}

/// TOML file configuration source.
pub struct TomlSource {
	path: PathBuf,
}

impl TomlSource {
	pub fn new(path: impl Into<PathBuf>) -> Self {
		Self { path: path.into() }
	}

	pub fn system() -> Self {
		Self::new("/etc/abacus/server.toml")
	}
}

impl ConfigSource for TomlSource {
	fn name(&self) -> &'static str {
		"toml-config"
	}

	fn precedence(&self) -> Precedence {
		Precedence::ConfigFile
	}

	fn load(&self) -> Result<ServerConfigLayer, ConfigError> {
		if !self.path.exists() {
			debug!(path = %self.path.display(), "config file not found, skipping");
			return Ok(ServerConfigLayer::default());
		}

		debug!(path = %self.path.display(), "loading config file");
		let content = std::fs::read_to_string(&self.path).map_err(|e| ConfigError::FileRead {
			path: self.path.clone(),
			source: e,
		})?;

		let layer: ServerConfigLayer =
			toml::from_str(&content).map_err(|e| ConfigError::TomlParse {
				path: self.path.clone(),
				source: e,
			})?;

		trace!("parsed config layer from TOML");
		Ok(layer)
	}
}

/// Environment variable source.
///
/// Convention: ABACUS_SERVER_<SECTION>_<FIELD>. The organization table and
/// user list are JSON-encoded when supplied through the environment.
pub struct EnvSource;

impl ConfigSource for EnvSource {
	fn name(&self) -> &'static str {
		"environment"
	}

	fn precedence(&self) -> Precedence {
		Precedence::Environment
	}

	fn load(&self) -> Result<ServerConfigLayer, ConfigError> {
		debug!("loading environment variables");
		Ok(ServerConfigLayer {
			http: Some(load_http_from_env()?),
			storage: Some(load_storage_from_env()?),
			access: Some(load_access_from_env()?),
			auth: Some(load_auth_from_env()?),
			logging: Some(load_logging_from_env()),
		})
	}
}

fn env_var(name: &str) -> Option<String> {
	std::env::var(name).ok().filter(|s| !s.is_empty())
}

fn env_u16(name: &str) -> Result<Option<u16>, ConfigError> {
	match env_var(name) {
		Some(v) => v.parse().map(Some).map_err(|_| ConfigError::InvalidValue {
			key: name.to_string(),
			message: format!("invalid u16 value '{v}'"),
		}),
		None => Ok(None),
	}
}

fn env_usize(name: &str) -> Result<Option<usize>, ConfigError> {
	match env_var(name) {
		Some(v) => v.parse().map(Some).map_err(|_| ConfigError::InvalidValue {
			key: name.to_string(),
			message: format!("invalid size value '{v}'"),
		}),
		None => Ok(None),
	}
}

fn env_json<T: serde::de::DeserializeOwned>(name: &str) -> Result<Option<T>, ConfigError> {
	match env_var(name) {
		Some(v) => serde_json::from_str(&v)
			.map(Some)
			.map_err(|e| ConfigError::InvalidValue {
				key: name.to_string(),
				message: format!("invalid JSON: {e}"),
			}),
		None => Ok(None),
	}
}

fn load_http_from_env() -> Result<HttpConfigLayer, ConfigError> {
	Ok(HttpConfigLayer {
		host: env_var("ABACUS_SERVER_HOST"),
		port: env_u16("ABACUS_SERVER_PORT")?,
	})
}

fn load_storage_from_env() -> Result<StorageConfigLayer, ConfigError> {
	Ok(StorageConfigLayer {
		base_dir: env_var("ABACUS_SERVER_BASE_DIR").map(PathBuf::from),
		max_upload_bytes: env_usize("ABACUS_SERVER_MAX_UPLOAD_BYTES")?,
	})
}

fn load_access_from_env() -> Result<AccessConfigLayer, ConfigError> {
	let organizations: Option<BTreeMap<String, OrgScopeSpec>> =
		env_json("ABACUS_SERVER_ACCESS_ORGANIZATIONS")?;
	Ok(AccessConfigLayer { organizations })
}

fn load_auth_from_env() -> Result<AuthConfigLayer, ConfigError> {
	let users: Option<Vec<UserSpec>> = env_json("ABACUS_SERVER_AUTH_USERS")?;
	Ok(AuthConfigLayer { users })
}

fn load_logging_from_env() -> LoggingConfigLayer {
	LoggingConfigLayer {
		level: env_var("ABACUS_SERVER_LOG_LEVEL"),
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_precedence_ordering() {
		assert!(Precedence::Defaults < Precedence::ConfigFile);
		assert!(Precedence::ConfigFile < Precedence::Environment);
	}

	#[test]
	fn test_missing_toml_file_yields_empty_layer() {
		let source = TomlSource::new("/nonexistent/abacus-test/server.toml");
		let layer = source.load().unwrap();
		assert!(layer.http.is_none());
		assert!(layer.access.is_none());
	}

	#[test]
	fn test_toml_file_round_trip() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("server.toml");
		std::fs::write(
			&path,
			r#"
			[http]
			port = 9090

			[storage]
			base_dir = "/srv/abacus"
			"#,
		)
		.unwrap();

		let layer = TomlSource::new(&path).load().unwrap();
		assert_eq!(layer.http.unwrap().port, Some(9090));
		assert_eq!(
			layer.storage.unwrap().base_dir,
			Some(PathBuf::from("/srv/abacus"))
		);
	}

	#[test]
	fn test_invalid_toml_is_an_error() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("server.toml");
		std::fs::write(&path, "not [valid toml").unwrap();

		let err = TomlSource::new(&path).load().unwrap_err();
		assert!(matches!(err, ConfigError::TomlParse { .. }));
	}
}
