// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Core types for the Segment analytics queueing wrapper.
//!
//! This crate holds everything the wrapper and a client implementation need to
//! agree on:
//!
//! - [`SegmentConfig`]: API key and client options, loadable from TOML or the
//!   environment
//! - Event payloads ([`TrackEvent`], [`PageEvent`], [`IdentifyEvent`],
//!   [`AliasEvent`], [`GroupEvent`]) and the [`Properties`] builder
//! - [`inject_context`]: the per-call options derivation, including IP
//!   anonymization
//! - [`ClientHandle`]: the capability a loaded analytics library exposes

pub mod config;
pub mod context;
pub mod error;
pub mod event;
pub mod handle;
pub mod properties;

pub use config::{ConfigIdentity, SegmentConfig, DEFAULT_TIMEOUT};
pub use context::{inject_context, ANONYMIZED_IP};
pub use error::{ConfigError, HandleError};
pub use event::{
	AliasEvent, EventType, GroupEvent, IdentifyEvent, Method, PageEvent, TrackEvent,
	UnknownEventType,
};
pub use handle::{Callback, ClientHandle, EmittedEvent, EventListener, SharedClientHandle};
pub use properties::Properties;
