// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Builder for event properties, traits and call options.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A JSON object used for event properties, user/group traits and
/// per-call options.
///
/// # Example
///
/// ```
/// use segment_hook_core::Properties;
///
/// let props = Properties::new()
///     .set("plan", "enterprise")
///     .set("seats", 25)
///     .set("trial", false);
/// assert_eq!(props.len(), 3);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Properties {
	inner: Map<String, Value>,
}

impl Properties {
	pub fn new() -> Self {
		Self { inner: Map::new() }
	}

	/// Sets a key, replacing any previous value.
	pub fn set<K, V>(mut self, key: K, value: V) -> Self
	where
		K: Into<String>,
		V: Into<Value>,
	{
		self.inner.insert(key.into(), value.into());
		self
	}

	/// Copies every key of `other` into this object; `other` wins on conflict.
	pub fn extend(mut self, other: Properties) -> Self {
		self.inner.extend(other.inner);
		self
	}

	pub fn get(&self, key: &str) -> Option<&Value> {
		self.inner.get(key)
	}

	pub fn remove(&mut self, key: &str) -> Option<Value> {
		self.inner.remove(key)
	}

	pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
		self.inner.insert(key.into(), value.into());
	}

	pub fn is_empty(&self) -> bool {
		self.inner.is_empty()
	}

	pub fn len(&self) -> usize {
		self.inner.len()
	}

	pub fn as_map(&self) -> &Map<String, Value> {
		&self.inner
	}

	pub fn into_map(self) -> Map<String, Value> {
		self.inner
	}
}

impl From<Properties> for Value {
	fn from(props: Properties) -> Self {
		Value::Object(props.inner)
	}
}

impl From<Map<String, Value>> for Properties {
	fn from(inner: Map<String, Value>) -> Self {
		Self { inner }
	}
}

/// Non-object values have no keys and convert to an empty object.
impl From<Value> for Properties {
	fn from(value: Value) -> Self {
		match value {
			Value::Object(inner) => Self { inner },
			_ => Self::new(),
		}
	}
}
