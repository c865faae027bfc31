// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! The capability exposed by a loaded analytics library.
//!
//! A [`ClientHandle`] is owned by whatever loaded the library (a script tag in
//! a browser, a native SDK elsewhere). The wrapper only ever holds a shared
//! reference to it and never clears it once set.
//!
//! # Completion callbacks
//!
//! The five tracking methods receive a [`Callback`] that the library invokes
//! once the call has been handed off for delivery. Returning `Err` means the
//! call failed synchronously; the callback must then not be invoked.

use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::HandleError;
use crate::event::{AliasEvent, EventType, GroupEvent, IdentifyEvent, PageEvent, TrackEvent};
use crate::properties::Properties;

/// One-shot completion callback handed to the client.
pub type Callback = Box<dyn FnOnce() + Send + 'static>;

/// Listener registered with [`ClientHandle::on`].
pub type EventListener = Arc<dyn Fn(&EmittedEvent) + Send + Sync + 'static>;

/// Type alias for a shared client handle.
pub type SharedClientHandle = Arc<dyn ClientHandle>;

/// An internal event emitted by the client after it processed a call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmittedEvent {
	pub event_type: EventType,
	/// Event name for `track`, page name for `page`, the id otherwise.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub name: Option<String>,
	#[serde(default)]
	pub properties: Properties,
	#[serde(default)]
	pub options: Properties,
}

/// Tracking API of a loaded analytics library.
///
/// Every event passed in already carries the derived call options (see
/// [`crate::inject_context`]).
pub trait ClientHandle: Send + Sync + 'static {
	fn page(&self, event: PageEvent, done: Callback) -> Result<(), HandleError>;

	fn identify(&self, event: IdentifyEvent, done: Callback) -> Result<(), HandleError>;

	fn alias(&self, event: AliasEvent, done: Callback) -> Result<(), HandleError>;

	fn track(&self, event: TrackEvent, done: Callback) -> Result<(), HandleError>;

	fn group(&self, event: GroupEvent, done: Callback) -> Result<(), HandleError>;

	/// Registers a callback fired once every destination has loaded.
	fn ready(&self, callback: Callback) -> Result<(), HandleError>;

	/// Registers a listener for a category of internal events.
	fn on(&self, event_type: EventType, listener: EventListener) -> Result<(), HandleError>;

	fn set_anonymous_id(&self, id: &str) -> Result<(), HandleError>;

	/// Clears the stored user identity and traits.
	fn reset(&self) -> Result<(), HandleError>;

	/// Toggles the library's own debug output.
	fn debug(&self, enabled: bool);

	/// Sets the library's internal request timeout.
	fn timeout(&self, timeout: Duration);
}
