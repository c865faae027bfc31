// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Derivation of the options passed to the client on every call.

use serde_json::{Map, Value};

use crate::properties::Properties;

/// IP address written into the call context when IP anonymization is enabled.
pub const ANONYMIZED_IP: &str = "0.0.0.0";

/// Builds the options the client receives for a call.
///
/// The result is `options` with a `context` object merged in. When
/// `anonymize_ip` is set, `context.ip` is forced to [`ANONYMIZED_IP`];
/// otherwise `ip` is removed so the library collects it itself.
pub fn inject_context(options: Option<&Properties>, anonymize_ip: bool) -> Properties {
	let mut derived = options.cloned().unwrap_or_default();

	let mut context = match derived.remove("context") {
		Some(Value::Object(map)) => map,
		_ => Map::new(),
	};
	if anonymize_ip {
		context.insert("ip".to_string(), Value::from(ANONYMIZED_IP));
	} else {
		context.remove("ip");
	}

	derived.insert("context", Value::Object(context));
	derived
}
