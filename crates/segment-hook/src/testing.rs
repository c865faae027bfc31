// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Recording client handle for unit tests.

use std::io::Write;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tracing_subscriber::fmt::MakeWriter;
use segment_hook_core::{
	AliasEvent, Callback, ClientHandle, EmittedEvent, EventListener, EventType, GroupEvent,
	HandleError, IdentifyEvent, Method, PageEvent, Properties, TrackEvent,
};

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Recorded {
	Page(PageEvent),
	Identify(IdentifyEvent),
	Alias(AliasEvent),
	Track(TrackEvent),
	Group(GroupEvent),
	Ready,
	On(EventType),
	SetAnonymousId(String),
	Reset,
	Debug(bool),
	Timeout(Duration),
}

impl Recorded {
	pub(crate) fn method(&self) -> Option<Method> {
		Some(match self {
			Recorded::Page(_) => Method::Page,
			Recorded::Identify(_) => Method::Identify,
			Recorded::Alias(_) => Method::Alias,
			Recorded::Track(_) => Method::Track,
			Recorded::Group(_) => Method::Group,
			Recorded::Ready => Method::Ready,
			Recorded::On(_) => Method::On,
			Recorded::SetAnonymousId(_) => Method::SetAnonymousId,
			Recorded::Reset => Method::Reset,
			Recorded::Debug(_) | Recorded::Timeout(_) => return None,
		})
	}
}

#[derive(Default)]
pub(crate) struct RecordingHandle {
	calls: Mutex<Vec<Recorded>>,
	listeners: Mutex<Vec<(EventType, EventListener)>>,
	failing: Mutex<Option<Method>>,
	hold_callbacks: bool,
	held: Mutex<Vec<Callback>>,
}

impl RecordingHandle {
	pub(crate) fn new() -> Arc<Self> {
		Arc::new(Self::default())
	}

	/// Keeps completion callbacks until [`release`](Self::release) is called.
	pub(crate) fn holding() -> Arc<Self> {
		Arc::new(Self {
			hold_callbacks: true,
			..Self::default()
		})
	}

	pub(crate) fn fail(&self, method: Method) {
		*self.failing.lock() = Some(method);
	}

	pub(crate) fn calls(&self) -> Vec<Recorded> {
		self.calls.lock().clone()
	}

	pub(crate) fn tracked(&self) -> Vec<TrackEvent> {
		self.calls()
			.into_iter()
			.filter_map(|c| match c {
				Recorded::Track(e) => Some(e),
				_ => None,
			})
			.collect()
	}

	pub(crate) fn release(&self) {
		let held = std::mem::take(&mut *self.held.lock());
		for callback in held {
			callback();
		}
	}

	fn record(&self, method: Method, call: Recorded) -> Result<(), HandleError> {
		if *self.failing.lock() == Some(method) {
			return Err(HandleError::call_failed(method.as_str(), "rejected by test"));
		}
		self.calls.lock().push(call);
		Ok(())
	}

	fn complete(&self, done: Callback) {
		if self.hold_callbacks {
			self.held.lock().push(done);
		} else {
			done();
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

impl ClientHandle for RecordingHandle {
	fn page(&self, event: PageEvent, done: Callback) -> Result<(), HandleError> {
		self.record(Method::Page, Recorded::Page(event.clone()))?;
		self.emit(EventType::Page, event.name, event.properties);
		self.complete(done);
		Ok(())
	}

	fn identify(&self, event: IdentifyEvent, done: Callback) -> Result<(), HandleError> {
		self.record(Method::Identify, Recorded::Identify(event.clone()))?;
		self.emit(EventType::Identify, Some(event.user_id), event.traits);
		self.complete(done);
		Ok(())
	}

	fn alias(&self, event: AliasEvent, done: Callback) -> Result<(), HandleError> {
		self.record(Method::Alias, Recorded::Alias(event.clone()))?;
		self.emit(EventType::Alias, Some(event.user_id), None);
		self.complete(done);
		Ok(())
	}

	fn track(&self, event: TrackEvent, done: Callback) -> Result<(), HandleError> {
		self.record(Method::Track, Recorded::Track(event.clone()))?;
		self.emit(EventType::Track, Some(event.event), event.properties);
		self.complete(done);
		Ok(())
	}

	fn group(&self, event: GroupEvent, done: Callback) -> Result<(), HandleError> {
		self.record(Method::Group, Recorded::Group(event.clone()))?;
		self.emit(EventType::Group, Some(event.group_id), event.traits);
		self.complete(done);
		Ok(())
	}

	fn ready(&self, callback: Callback) -> Result<(), HandleError> {
		self.record(Method::Ready, Recorded::Ready)?;
		callback();
		Ok(())
	}

	fn on(&self, event_type: EventType, listener: EventListener) -> Result<(), HandleError> {
		self.record(Method::On, Recorded::On(event_type))?;
		self.listeners.lock().push((event_type, listener));
		Ok(())
	}

	fn set_anonymous_id(&self, id: &str) -> Result<(), HandleError> {
		self.record(Method::SetAnonymousId, Recorded::SetAnonymousId(id.to_string()))
	}

	fn reset(&self) -> Result<(), HandleError> {
		self.record(Method::Reset, Recorded::Reset)
	}

	fn debug(&self, enabled: bool) {
		self.calls.lock().push(Recorded::Debug(enabled));
	}

	fn timeout(&self, timeout: Duration) {
		self.calls.lock().push(Recorded::Timeout(timeout));
	}
}

/// Log sink that collects formatted `tracing` output in memory.
#[derive(Clone, Default)]
struct LogSink(Arc<Mutex<Vec<u8>>>);

impl Write for LogSink {
	fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
		self.0.lock().extend_from_slice(buf);
		Ok(buf.len())
	}

	fn flush(&mut self) -> std::io::Result<()> {
		Ok(())
	}
}

impl<'a> MakeWriter<'a> for LogSink {
	type Writer = LogSink;

	fn make_writer(&'a self) -> Self::Writer {
		self.clone()
	}
}

/// Runs `f` with a thread-local subscriber at DEBUG and returns what it logged.
pub(crate) fn capture_logs(f: impl FnOnce()) -> String {
	let sink = LogSink::default();
	let subscriber = tracing_subscriber::fmt()
		.with_writer(sink.clone())
		.with_max_level(tracing::Level::DEBUG)
		.with_ansi(false)
		.finish();
	tracing::subscriber::with_default(subscriber, f);
	let bytes = sink.0.lock().clone();
	String::from_utf8_lossy(&bytes).into_owned()
}
