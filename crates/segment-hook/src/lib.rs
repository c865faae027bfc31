// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Segment analytics wrapper that queues calls until the client has loaded.
//!
//! The analytics.js client arrives asynchronously. [`SegmentClient`] gives
//! callers a stable API in the meantime: calls made before the client is
//! available are captured in order and replayed exactly once when
//! [`SegmentClient::initialize`] installs the handle.
//!
//! # Features
//!
//! - **Deferred calls**: `page`, `identify`, `alias`, `track`, `group`,
//!   `ready`, `on`, `set_anonymous_id` and `reset` all work before load
//! - **Completion futures**: every call returns a [`Completion`] that resolves
//!   when the client reports the call done
//! - **IP anonymization**: optional `0.0.0.0` override in every call context
//! - **Provider binding**: [`SegmentProvider`] mounts one wrapper per
//!   configuration and runs a single load attempt for it
//!
//! # Example
//!
//! ```ignore
//! use segment_hook::{use_segment, HeadlessLoader, SegmentConfig, SegmentProvider, TrackEvent};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let provider = SegmentProvider::new(HeadlessLoader);
//!     provider.render(SegmentConfig::from_env()?)?;
//!
//!     let analytics = use_segment(Some(&provider))?;
//!     let done = analytics.track(TrackEvent::new("Checkout Started"));
//!
//!     // Resolves once a loaded client has processed the call.
//!     done.await?;
//!     Ok(())
//! }
//! ```

mod client;
mod completion;
mod error;
mod loader;
mod provider;
mod ready;

#[cfg(test)]
mod testing;

pub use client::SegmentClient;
pub use completion::Completion;
pub use error::{Result, SegmentError};
pub use loader::{script_url, FnLoader, HeadlessLoader, ScriptLoader, SharedScriptLoader, CDN_HOST};
pub use provider::{bootstrap, use_segment, SegmentProvider};

// Re-export core types for convenience
pub use segment_hook_core::{
	inject_context, AliasEvent, Callback, ClientHandle, ConfigError, ConfigIdentity, EmittedEvent,
	EventListener, EventType, GroupEvent, HandleError, IdentifyEvent, Method, PageEvent,
	Properties, SegmentConfig, SharedClientHandle, TrackEvent, ANONYMIZED_IP,
};
