// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Error types for the queueing wrapper.

use segment_hook_core::{ConfigError, HandleError, Method};
use thiserror::Error;

/// Errors surfaced by the wrapper and its provider.
#[derive(Debug, Error)]
pub enum SegmentError {
	/// The client rejected the call synchronously. Not retried.
	#[error(transparent)]
	Client(#[from] HandleError),

	/// The call was dropped before it completed: either the client discarded
	/// its completion callback, or the wrapper was dropped while the call was
	/// still queued.
	#[error("`{0}` was abandoned before completing")]
	Abandoned(Method),

	/// The wrapper was requested with no provider mounted.
	#[error("use_segment called without a mounted SegmentProvider")]
	NoProvider,

	/// The provider was rendered outside a tokio runtime.
	#[error("SegmentProvider must be rendered inside a tokio runtime")]
	NoRuntime,

	/// The configuration failed validation.
	#[error(transparent)]
	Config(#[from] ConfigError),
}

/// Result type alias for wrapper operations.
pub type Result<T> = std::result::Result<T, SegmentError>;
