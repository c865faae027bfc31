// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Payloads for the five tracking calls.
//!
//! Each payload carries its own `options`; the wrapper derives the options the
//! client actually receives (see [`crate::context`]).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::properties::Properties;

/// Payload for `track`: records an action the user performed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackEvent {
	pub event: String,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub properties: Option<Properties>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub options: Option<Properties>,
}

impl TrackEvent {
	pub fn new(event: impl Into<String>) -> Self {
		Self {
			event: event.into(),
			properties: None,
			options: None,
		}
	}

	pub fn properties(mut self, properties: Properties) -> Self {
		self.properties = Some(properties);
		self
	}

	pub fn options(mut self, options: Properties) -> Self {
		self.options = Some(options);
		self
	}
}

/// Payload for `page`: records a page view.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PageEvent {
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub name: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub category: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub properties: Option<Properties>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub options: Option<Properties>,
}

impl PageEvent {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn name(mut self, name: impl Into<String>) -> Self {
		self.name = Some(name.into());
		self
	}

	pub fn category(mut self, category: impl Into<String>) -> Self {
		self.category = Some(category.into());
		self
	}

	pub fn properties(mut self, properties: Properties) -> Self {
		self.properties = Some(properties);
		self
	}

	pub fn options(mut self, options: Properties) -> Self {
		self.options = Some(options);
		self
	}
}

/// Payload for `identify`: ties the current visitor to a known user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IdentifyEvent {
	pub user_id: String,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub traits: Option<Properties>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub options: Option<Properties>,
}

impl IdentifyEvent {
	pub fn new(user_id: impl Into<String>) -> Self {
		Self {
			user_id: user_id.into(),
			traits: None,
			options: None,
		}
	}

	pub fn traits(mut self, traits: Properties) -> Self {
		self.traits = Some(traits);
		self
	}

	pub fn options(mut self, options: Properties) -> Self {
		self.options = Some(options);
		self
	}
}

/// Payload for `alias`: merges a previous identity into `user_id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AliasEvent {
	pub user_id: String,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub previous_id: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub options: Option<Properties>,
}

impl AliasEvent {
	pub fn new(user_id: impl Into<String>) -> Self {
		Self {
			user_id: user_id.into(),
			previous_id: None,
			options: None,
		}
	}

	pub fn previous_id(mut self, previous_id: impl Into<String>) -> Self {
		self.previous_id = Some(previous_id.into());
		self
	}

	pub fn options(mut self, options: Properties) -> Self {
		self.options = Some(options);
		self
	}
}

/// Payload for `group`: associates the user with an organisation or account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupEvent {
	pub group_id: String,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub traits: Option<Properties>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub options: Option<Properties>,
}

impl GroupEvent {
	pub fn new(group_id: impl Into<String>) -> Self {
		Self {
			group_id: group_id.into(),
			traits: None,
			options: None,
		}
	}

	pub fn traits(mut self, traits: Properties) -> Self {
		self.traits = Some(traits);
		self
	}

	pub fn options(mut self, options: Properties) -> Self {
		self.options = Some(options);
		self
	}
}

/// Categories of internal client events that listeners can subscribe to with `on`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventType {
	Track,
	Alias,
	Group,
	Identify,
	Page,
}

impl EventType {
	pub const ALL: [EventType; 5] = [
		EventType::Track,
		EventType::Alias,
		EventType::Group,
		EventType::Identify,
		EventType::Page,
	];

	pub fn as_str(&self) -> &'static str {
		match self {
			EventType::Track => "track",
			EventType::Alias => "alias",
			EventType::Group => "group",
			EventType::Identify => "identify",
			EventType::Page => "page",
		}
	}
}

impl fmt::Display for EventType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown event type '{0}', expected one of track, alias, group, identify, page")]
pub struct UnknownEventType(pub String);

impl FromStr for EventType {
	type Err = UnknownEventType;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		EventType::ALL
			.into_iter()
			.find(|t| t.as_str() == s)
			.ok_or_else(|| UnknownEventType(s.to_string()))
	}
}

/// The wrapper's public call-producing operations, used for logging and
/// queue diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
	Page,
	Identify,
	Alias,
	Track,
	Group,
	Ready,
	On,
	SetAnonymousId,
	Reset,
}

impl Method {
	pub fn as_str(&self) -> &'static str {
		match self {
			Method::Page => "page",
			Method::Identify => "identify",
			Method::Alias => "alias",
			Method::Track => "track",
			Method::Group => "group",
			Method::Ready => "ready",
			Method::On => "on",
			Method::SetAnonymousId => "set_anonymous_id",
			Method::Reset => "reset",
		}
	}
}

impl fmt::Display for Method {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}
