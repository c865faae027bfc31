// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Error types shared by the wrapper and client handle implementations.

use std::path::PathBuf;

use thiserror::Error;

/// Error raised synchronously by a [`ClientHandle`](crate::ClientHandle) method.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HandleError {
	/// The underlying library rejected the call.
	#[error("client call `{method}` failed: {message}")]
	CallFailed { method: String, message: String },

	/// The handle does not support the requested operation.
	#[error("client does not support `{0}`")]
	Unsupported(String),
}

impl HandleError {
	/// Create a call failure for the given method.
	pub fn call_failed(method: impl Into<String>, message: impl Into<String>) -> Self {
		Self::CallFailed {
			method: method.into(),
			message: message.into(),
		}
	}
}

/// Errors that can occur while loading or validating a [`SegmentConfig`](crate::SegmentConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
	/// I/O error reading a config file
	#[error("I/O error: {0}")]
	Io(#[from] std::io::Error),

	/// TOML parsing error
	#[error("TOML parse error in {path}: {source}")]
	TomlParse {
		path: PathBuf,
		#[source]
		source: toml::de::Error,
	},

	/// Missing required field
	#[error("Missing required field: {0}")]
	MissingField(String),

	/// Invalid value
	#[error("Invalid value for {field}: {message}")]
	InvalidValue { field: String, message: String },
}

impl ConfigError {
	/// Create a missing field error
	pub fn missing_field(field: impl Into<String>) -> Self {
		Self::MissingField(field.into())
	}

	/// Create an invalid value error
	pub fn invalid_value(field: impl Into<String>, message: impl Into<String>) -> Self {
		Self::InvalidValue {
			field: field.into(),
			message: message.into(),
		}
	}
}
