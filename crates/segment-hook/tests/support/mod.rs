// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Shared fixtures for integration tests.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use segment_hook::{
	AliasEvent, Callback, ClientHandle, EventListener, EventType, GroupEvent, HandleError,
	IdentifyEvent, PageEvent, TrackEvent,
};

/// Client handle that logs one line per call, e.g. `track:Signed Up`.
#[derive(Default)]
pub struct LogHandle {
	log: Mutex<Vec<String>>,
}

impl LogHandle {
	pub fn new() -> Arc<Self> {
		Arc::new(Self::default())
	}

	pub fn log(&self) -> Vec<String> {
		self.log.lock().clone()
	}

	pub fn count(&self, prefix: &str) -> usize {
		self.log.lock().iter().filter(|l| l.starts_with(prefix)).count()
	}

	fn push(&self, line: String) {
		self.log.lock().push(line);
	}
}

impl ClientHandle for LogHandle {
	fn page(&self, event: PageEvent, done: Callback) -> Result<(), HandleError> {
		self.push(format!("page:{}", event.name.unwrap_or_default()));
		done();
		Ok(())
	}

	fn identify(&self, event: IdentifyEvent, done: Callback) -> Result<(), HandleError> {
		self.push(format!("identify:{}", event.user_id));
		done();
		Ok(())
	}

	fn alias(&self, event: AliasEvent, done: Callback) -> Result<(), HandleError> {
		self.push(format!("alias:{}", event.user_id));
		done();
		Ok(())
	}

	fn track(&self, event: TrackEvent, done: Callback) -> Result<(), HandleError> {
		let ip = event
			.options
			.as_ref()
			.and_then(|o| o.get("context"))
			.and_then(|c| c.get("ip"))
			.and_then(|ip| ip.as_str())
			.unwrap_or("-")
			.to_string();
		self.push(format!("track:{}@{}", event.event, ip));
		done();
		Ok(())
	}

	fn group(&self, event: GroupEvent, done: Callback) -> Result<(), HandleError> {
		self.push(format!("group:{}", event.group_id));
		done();
		Ok(())
	}

	fn ready(&self, callback: Callback) -> Result<(), HandleError> {
		self.push("ready".to_string());
		callback();
		Ok(())
	}

	fn on(&self, event_type: EventType, _listener: EventListener) -> Result<(), HandleError> {
		self.push(format!("on:{event_type}"));
		Ok(())
	}

	fn set_anonymous_id(&self, id: &str) -> Result<(), HandleError> {
		self.push(format!("anonymous_id:{id}"));
		Ok(())
	}

	fn reset(&self) -> Result<(), HandleError> {
		self.push("reset".to_string());
		Ok(())
	}

	fn debug(&self, enabled: bool) {
		self.push(format!("debug:{enabled}"));
	}

	fn timeout(&self, timeout: Duration) {
		self.push(format!("timeout:{}", timeout.as_millis()));
	}
}
