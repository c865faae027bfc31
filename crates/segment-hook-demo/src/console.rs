// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! A client handle that prints every call as a JSON line.

use std::io::Write;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use segment_hook::{
	AliasEvent, Callback, ClientHandle, EmittedEvent, EventListener, EventType, GroupEvent,
	HandleError, IdentifyEvent, PageEvent, Properties, TrackEvent,
};
use serde_json::{json, Value};
use tracing::warn;

pub struct ConsoleHandle {
	out: Mutex<Box<dyn Write + Send>>,
	listeners: Mutex<Vec<(EventType, EventListener)>>,
}

impl ConsoleHandle {
	pub fn stdout() -> Self {
		Self::new(Box::new(std::io::stdout()))
	}

	pub fn new(out: Box<dyn Write + Send>) -> Self {
		Self {
			out: Mutex::new(out),
			listeners: Mutex::new(Vec::new()),
		}
	}

	fn print(&self, method: &str, payload: Value) {
		let line = json!({ "call": method, "payload": payload });
		let mut out = self.out.lock();
		if let Err(e) = writeln!(out, "{line}") {
			warn!(error = %e, "Failed to write demo output");
		}
	}

	fn emit(&self, event_type: EventType, name: Option<String>, properties: Option<Properties>) {
		let listeners: Vec<EventListener> = self
			.listeners
			.lock()
			.iter()
			.filter(|(t, _)| *t == event_type)
			.map(|(_, l)| Arc::clone(l))
			.collect();
		if listeners.is_empty() {
			return;
		}
		let emitted = EmittedEvent {
			event_type,
			name,
			properties: properties.unwrap_or_default(),
			options: Properties::new(),
		};
		for listener in listeners {
			listener(&emitted);
		}
	}
}

fn to_json<T: serde::Serialize>(value: &T) -> Value {
	serde_json::to_value(value).unwrap_or(Value::Null)
}

impl ClientHandle for ConsoleHandle {
	fn page(&self, event: PageEvent, done: Callback) -> Result<(), HandleError> {
		self.print("page", to_json(&event));
		self.emit(EventType::Page, event.name, event.properties);
		done();
		Ok(())
	}

	fn identify(&self, event: IdentifyEvent, done: Callback) -> Result<(), HandleError> {
		self.print("identify", to_json(&event));
		self.emit(EventType::Identify, Some(event.user_id), event.traits);
		done();
		Ok(())
	}

	fn alias(&self, event: AliasEvent, done: Callback) -> Result<(), HandleError> {
		self.print("alias", to_json(&event));
		self.emit(EventType::Alias, Some(event.user_id), None);
		done();
		Ok(())
	}

	fn track(&self, event: TrackEvent, done: Callback) -> Result<(), HandleError> {
		self.print("track", to_json(&event));
		self.emit(EventType::Track, Some(event.event), event.properties);
		done();
		Ok(())
	}

	fn group(&self, event: GroupEvent, done: Callback) -> Result<(), HandleError> {
		self.print("group", to_json(&event));
		self.emit(EventType::Group, Some(event.group_id), event.traits);
		done();
		Ok(())
	}

	fn ready(&self, callback: Callback) -> Result<(), HandleError> {
		self.print("ready", Value::Null);
		callback();
		Ok(())
	}

	fn on(&self, event_type: EventType, listener: EventListener) -> Result<(), HandleError> {
		self.print("on", json!({ "event_type": event_type }));
		self.listeners.lock().push((event_type, listener));
		Ok(())
	}

	fn set_anonymous_id(&self, id: &str) -> Result<(), HandleError> {
		self.print("set_anonymous_id", json!({ "id": id }));
		Ok(())
	}

	fn reset(&self) -> Result<(), HandleError> {
		self.print("reset", Value::Null);
		Ok(())
	}

	fn debug(&self, enabled: bool) {
		self.print("debug", json!({ "enabled": enabled }));
	}

	fn timeout(&self, timeout: Duration) {
		self.print("timeout", json!({ "ms": timeout.as_millis() as u64 }));
	}
}
