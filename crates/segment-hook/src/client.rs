// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! The queueing wrapper around a Segment client handle.

use std::fmt;
use std::sync::Arc;

use segment_hook_core::{
	inject_context, AliasEvent, Callback, ClientHandle, EmittedEvent, EventListener, EventType,
	GroupEvent, HandleError, IdentifyEvent, Method, PageEvent, Properties, SegmentConfig,
	SharedClientHandle, TrackEvent,
};
use tracing::{debug, info};

use crate::completion::{self, Completion, Responder};
use crate::ready::{ReadySignal, Submission};

/// Stable analytics API that works before and after the client has loaded.
///
/// Calls made before [`initialize`](Self::initialize) are queued and replayed
/// in order once the handle arrives; later calls go straight to the handle.
/// Every call returns a [`Completion`] that resolves when the client reports
/// the call done.
///
/// # Example
///
/// ```ignore
/// use segment_hook::{SegmentClient, SegmentConfig, TrackEvent};
///
/// let client = SegmentClient::new(SegmentConfig::new("write_key").anonymize_ip(true));
///
/// // Queued: the script has not loaded yet.
/// let signed_up = client.track(TrackEvent::new("Signed Up"));
///
/// // Later, once the loader produced a handle:
/// client.initialize(handle);
/// signed_up.await?;
/// ```
#[derive(Clone)]
pub struct SegmentClient {
	inner: Arc<SegmentClientInner>,
}

struct SegmentClientInner {
	config: SegmentConfig,
	ready: ReadySignal,
}

impl SegmentClient {
	pub fn new(config: SegmentConfig) -> Self {
		Self {
			inner: Arc::new(SegmentClientInner {
				config,
				ready: ReadySignal::new(),
			}),
		}
	}

	pub fn config(&self) -> &SegmentConfig {
		&self.inner.config
	}

	/// Returns true once a handle has been installed.
	pub fn is_ready(&self) -> bool {
		self.inner.ready.is_ready()
	}

	/// Number of calls waiting for the handle.
	pub fn pending_len(&self) -> usize {
		self.inner.ready.pending_len()
	}

	/// Installs the client handle and replays every queued call.
	///
	/// Only the first call has any effect: it applies the configured timeout
	/// and debug flag to the handle, flips the wrapper to ready and replays
	/// the queue. Returns `false` for every later call.
	pub fn initialize(&self, handle: SharedClientHandle) -> bool {
		let config = &self.inner.config;
		let replayed = self.inner.ready.fire(handle, |handle| {
			handle.timeout(config.request_timeout());
			handle.debug(config.is_debug());
		});

		let Some(methods) = replayed else {
			if config.is_debug() {
				debug!("Segment client already initialized, ignoring handle");
			}
			return false;
		};

		if config.is_debug() {
			info!(replayed = methods.len(), "Segment client ready");
			for (position, method) in methods.iter().enumerate() {
				debug!(position, %method, "Replayed deferred call");
			}
		}
		true
	}

	pub fn page(&self, mut event: PageEvent) -> Completion {
		if self.is_debug() {
			debug!(
				name = ?event.name,
				category = ?event.category,
				properties = ?event.properties,
				"segment page"
			);
		}
		event.options = Some(self.call_options(event.options.as_ref()));
		self.dispatch(Method::Page, move |handle, responder| {
			handle.page(event, responder.callback())
		})
	}

	pub fn identify(&self, mut event: IdentifyEvent) -> Completion {
		if self.is_debug() {
			debug!(user_id = %event.user_id, traits = ?event.traits, "segment identify");
		}
		event.options = Some(self.call_options(event.options.as_ref()));
		self.dispatch(Method::Identify, move |handle, responder| {
			handle.identify(event, responder.callback())
		})
	}

	pub fn alias(&self, mut event: AliasEvent) -> Completion {
		if self.is_debug() {
			debug!(
				user_id = %event.user_id,
				previous_id = ?event.previous_id,
				"segment alias"
			);
		}
		event.options = Some(self.call_options(event.options.as_ref()));
		self.dispatch(Method::Alias, move |handle, responder| {
			handle.alias(event, responder.callback())
		})
	}

	pub fn track(&self, mut event: TrackEvent) -> Completion {
		if self.is_debug() {
			debug!(event = %event.event, properties = ?event.properties, "segment track");
		}
		event.options = Some(self.call_options(event.options.as_ref()));
		self.dispatch(Method::Track, move |handle, responder| {
			handle.track(event, responder.callback())
		})
	}

	pub fn group(&self, mut event: GroupEvent) -> Completion {
		if self.is_debug() {
			debug!(group_id = %event.group_id, traits = ?event.traits, "segment group");
		}
		event.options = Some(self.call_options(event.options.as_ref()));
		self.dispatch(Method::Group, move |handle, responder| {
			handle.group(event, responder.callback())
		})
	}

	/// Registers `callback` with the client's own ready hook, which fires
	/// once every destination has loaded.
	///
	/// The returned completion resolves as soon as the callback is
	/// registered, not when it fires.
	pub fn ready(&self, callback: Option<Callback>) -> Completion {
		let callback: Callback = match callback {
			Some(callback) => callback,
			None => Box::new(|| {}),
		};
		self.dispatch(Method::Ready, move |handle, responder| {
			handle.ready(callback)?;
			responder.resolve();
			Ok(())
		})
	}

	/// Subscribes `listener` to one category of client events.
	pub fn on<F>(&self, event_type: EventType, listener: F) -> Completion
	where
		F: Fn(&EmittedEvent) + Send + Sync + 'static,
	{
		let listener: EventListener = Arc::new(listener);
		self.dispatch(Method::On, move |handle, responder| {
			handle.on(event_type, listener)?;
			responder.resolve();
			Ok(())
		})
	}

	pub fn set_anonymous_id(&self, id: impl Into<String>) -> Completion {
		let id = id.into();
		if self.is_debug() {
			debug!(anonymous_id = %id, "segment set_anonymous_id");
		}
		self.dispatch(Method::SetAnonymousId, move |handle, responder| {
			handle.set_anonymous_id(&id)?;
			responder.resolve();
			Ok(())
		})
	}

	/// Clears the client's stored user identity, typically on logout.
	pub fn reset(&self) -> Completion {
		self.dispatch(Method::Reset, |handle, responder| {
			handle.reset()?;
			responder.resolve();
			Ok(())
		})
	}

	#[cfg(test)]
	pub(crate) fn same_wrapper(&self, other: &SegmentClient) -> bool {
		Arc::ptr_eq(&self.inner, &other.inner)
	}

	fn is_debug(&self) -> bool {
		self.inner.config.is_debug()
	}

	fn call_options(&self, options: Option<&Properties>) -> Properties {
		inject_context(options, self.inner.config.is_anonymize_ip())
	}

	/// Runs `op` against the handle now, or queues it for replay.
	///
	/// A synchronous error from `op` rejects the completion.
	fn dispatch<F>(&self, method: Method, op: F) -> Completion
	where
		F: FnOnce(&dyn ClientHandle, &Responder) -> Result<(), HandleError> + Send + 'static,
	{
		let (responder, completion) = completion::channel(method, self.is_debug());
		let call = Box::new(move |handle: &SharedClientHandle| {
			if let Err(e) = op(&**handle, &responder) {
				responder.reject(e.into());
			}
		});

		if let Submission::Deferred { pending } = self.inner.ready.submit(method, call) {
			if self.is_debug() {
				debug!(%method, pending, "Segment client not loaded, deferring call");
			}
		}
		completion
	}
}

impl fmt::Debug for SegmentClient {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("SegmentClient")
			.field("config", &self.inner.config)
			.field("ready", &self.is_ready())
			.field("pending", &self.pending_len())
			.finish()
	}
}
