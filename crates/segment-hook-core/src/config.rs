// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Wrapper configuration.
//!
//! A [`SegmentConfig`] is immutable once built. It can be constructed directly,
//! parsed from TOML, or read from the environment:
//!
//! | Variable | Field |
//! |----------|-------|
//! | `SEGMENT_WRITE_KEY` | `api_key` |
//! | `SEGMENT_DEBUG` | `debug` |
//! | `SEGMENT_TIMEOUT_MS` | `timeout` |
//! | `SEGMENT_ANONYMIZE_IP` | `anonymize_ip` |

use std::path::Path;
use std::time::Duration;

use serde::Deserialize;
use tracing::debug;

use crate::error::ConfigError;

/// Default request timeout applied to the client handle.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(200);

pub const ENV_WRITE_KEY: &str = "SEGMENT_WRITE_KEY";
pub const ENV_DEBUG: &str = "SEGMENT_DEBUG";
pub const ENV_TIMEOUT_MS: &str = "SEGMENT_TIMEOUT_MS";
pub const ENV_ANONYMIZE_IP: &str = "SEGMENT_ANONYMIZE_IP";

/// Configuration for a queueing wrapper.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SegmentConfig {
	api_key: String,
	debug: bool,
	timeout: Duration,
	anonymize_ip: bool,
}

/// The identity a framework binding uses to decide whether a wrapper can be reused.
///
/// Two configs with equal identities always share one wrapper.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ConfigIdentity {
	pub api_key: String,
	pub debug: bool,
	pub timeout: Duration,
	pub anonymize_ip: bool,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawConfig {
	api_key: Option<String>,
	debug: Option<bool>,
	timeout_ms: Option<u64>,
	anonymize_ip: Option<bool>,
}

impl SegmentConfig {
	/// Creates a config with default options for the given API key.
	pub fn new(api_key: impl Into<String>) -> Self {
		Self {
			api_key: api_key.into(),
			debug: false,
			timeout: DEFAULT_TIMEOUT,
			anonymize_ip: false,
		}
	}

	/// Enables diagnostic logging of calls and completions.
	pub fn debug(mut self, enabled: bool) -> Self {
		self.debug = enabled;
		self
	}

	/// Sets the request timeout handed to the client on initialization.
	pub fn timeout(mut self, timeout: Duration) -> Self {
		self.timeout = timeout;
		self
	}

	/// Replaces the IP in every call context with `0.0.0.0`.
	pub fn anonymize_ip(mut self, enabled: bool) -> Self {
		self.anonymize_ip = enabled;
		self
	}

	pub fn api_key(&self) -> &str {
		&self.api_key
	}

	pub fn is_debug(&self) -> bool {
		self.debug
	}

	pub fn request_timeout(&self) -> Duration {
		self.timeout
	}

	pub fn is_anonymize_ip(&self) -> bool {
		self.anonymize_ip
	}

	pub fn identity(&self) -> ConfigIdentity {
		ConfigIdentity {
			api_key: self.api_key.clone(),
			debug: self.debug,
			timeout: self.timeout,
			anonymize_ip: self.anonymize_ip,
		}
	}

	/// Checks that the config can be used to load a client.
	pub fn validate(&self) -> Result<(), ConfigError> {
		if self.api_key.trim().is_empty() {
			return Err(ConfigError::invalid_value("api_key", "must not be empty"));
		}
		Ok(())
	}

	/// Parses a config from TOML.
	///
	/// ```
	/// use segment_hook_core::SegmentConfig;
	///
	/// let config = SegmentConfig::from_toml_str(
	/// 	r#"
	/// 	api_key = "write_key"
	/// 	timeout_ms = 500
	/// 	"#,
	/// )
	/// .unwrap();
	/// assert_eq!(config.api_key(), "write_key");
	/// ```
	pub fn from_toml_str(input: &str) -> Result<Self, ConfigError> {
		let raw: RawConfig = toml::from_str(input).map_err(|source| ConfigError::TomlParse {
			path: "<inline>".into(),
			source,
		})?;
		Self::from_raw(raw)
	}

	/// Reads and parses a TOML config file.
	pub fn load_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
		let path = path.as_ref();
		let content = std::fs::read_to_string(path)?;
		let raw: RawConfig = toml::from_str(&content).map_err(|source| ConfigError::TomlParse {
			path: path.to_path_buf(),
			source,
		})?;
		debug!(path = %path.display(), "Loaded segment config file");
		Self::from_raw(raw)
	}

	/// Builds a config entirely from `SEGMENT_*` environment variables.
	pub fn from_env() -> Result<Self, ConfigError> {
		Self::from_lookup(|key| std::env::var(key).ok())
	}

	/// Builds a config from an arbitrary variable lookup.
	pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
	where
		F: Fn(&str) -> Option<String>,
	{
		let api_key = lookup(ENV_WRITE_KEY).ok_or_else(|| ConfigError::missing_field(ENV_WRITE_KEY))?;
		let config = Self::new(api_key).apply_overrides(lookup)?;
		config.validate()?;
		Ok(config)
	}

	/// Applies `SEGMENT_*` environment variables on top of this config.
	pub fn apply_env_overrides(self) -> Result<Self, ConfigError> {
		self.apply_overrides(|key| std::env::var(key).ok())
	}

	/// Applies `SEGMENT_*` values from an arbitrary variable lookup.
	pub fn apply_overrides<F>(mut self, lookup: F) -> Result<Self, ConfigError>
	where
		F: Fn(&str) -> Option<String>,
	{
		if let Some(key) = lookup(ENV_WRITE_KEY) {
			self.api_key = key;
		}
		if let Some(value) = lookup(ENV_DEBUG) {
			self.debug = parse_bool(ENV_DEBUG, &value)?;
		}
		if let Some(value) = lookup(ENV_TIMEOUT_MS) {
			let ms = value
				.trim()
				.parse::<u64>()
				.map_err(|e| ConfigError::invalid_value(ENV_TIMEOUT_MS, e.to_string()))?;
			self.timeout = Duration::from_millis(ms);
		}
		if let Some(value) = lookup(ENV_ANONYMIZE_IP) {
			self.anonymize_ip = parse_bool(ENV_ANONYMIZE_IP, &value)?;
		}
		Ok(self)
	}

	fn from_raw(raw: RawConfig) -> Result<Self, ConfigError> {
		let api_key = raw.api_key.ok_or_else(|| ConfigError::missing_field("api_key"))?;
		let config = Self {
			api_key,
			debug: raw.debug.unwrap_or(false),
			timeout: raw.timeout_ms.map(Duration::from_millis).unwrap_or(DEFAULT_TIMEOUT),
			anonymize_ip: raw.anonymize_ip.unwrap_or(false),
		};
		config.validate()?;
		Ok(config)
	}
}

fn parse_bool(field: &str, value: &str) -> Result<bool, ConfigError> {
	match value.trim().to_ascii_lowercase().as_str() {
		"1" | "true" | "yes" | "on" => Ok(true),
		"0" | "false" | "no" | "off" | "" => Ok(false),
		other => Err(ConfigError::invalid_value(
			field,
			format!("expected a boolean, got '{other}'"),
		)),
	}
}
