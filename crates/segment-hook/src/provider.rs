// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Binding that owns one wrapper per configuration and drives its loading.
//!
//! A [`SegmentProvider`] plays the role a UI framework's context provider
//! would: each [`render`](SegmentProvider::render) with the same
//! [`ConfigIdentity`] returns the same [`SegmentClient`]; a new identity
//! mounts a fresh wrapper and starts exactly one load for it. Consumers get
//! the wrapper with [`use_segment`].

use std::sync::Arc;

use parking_lot::Mutex;
use segment_hook_core::{ConfigIdentity, SegmentConfig};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::client::SegmentClient;
use crate::error::{Result, SegmentError};
use crate::loader::{script_url, ScriptLoader, SharedScriptLoader};

struct Mounted {
	identity: ConfigIdentity,
	client: SegmentClient,
	load: Option<JoinHandle<bool>>,
}

/// Owns the wrapper for the current configuration.
pub struct SegmentProvider {
	loader: SharedScriptLoader,
	mounted: Mutex<Option<Mounted>>,
}

impl SegmentProvider {
	pub fn new(loader: impl ScriptLoader) -> Self {
		Self::with_shared_loader(Arc::new(loader))
	}

	pub fn with_shared_loader(loader: SharedScriptLoader) -> Self {
		Self {
			loader,
			mounted: Mutex::new(None),
		}
	}

	/// Returns the wrapper for `config`, mounting a new one if the identity changed.
	///
	/// Mounting spawns the load on the current tokio runtime; a successful
	/// load initializes the wrapper. An unchanged identity reuses the mounted
	/// wrapper and does not load again.
	pub fn render(&self, config: SegmentConfig) -> Result<SegmentClient> {
		config.validate()?;
		let identity = config.identity();

		let mut mounted = self.mounted.lock();
		if let Some(current) = mounted.as_ref() {
			if current.identity == identity {
				return Ok(current.client.clone());
			}
		}

		let runtime = tokio::runtime::Handle::try_current().map_err(|_| SegmentError::NoRuntime)?;
		let client = SegmentClient::new(config);
		let load = runtime.spawn(bootstrap(Arc::clone(&self.loader), client.clone()));

		debug!(api_key = %identity.api_key, "Mounted segment client");
		*mounted = Some(Mounted {
			identity,
			client: client.clone(),
			load: Some(load),
		});
		Ok(client)
	}

	/// Drops the mounted wrapper; the next render mounts and loads afresh.
	///
	/// A load still in flight is not cancelled; it initializes the detached
	/// wrapper if it succeeds.
	pub fn unmount(&self) {
		if self.mounted.lock().take().is_some() {
			debug!("Unmounted segment client");
		}
	}

	/// The currently mounted wrapper.
	pub fn client(&self) -> Result<SegmentClient> {
		self.mounted
			.lock()
			.as_ref()
			.map(|m| m.client.clone())
			.ok_or(SegmentError::NoProvider)
	}

	/// Waits for the current mount's load attempt.
	///
	/// Returns whether the load initialized the wrapper, or `None` if there
	/// is no mount or its load was already awaited.
	pub async fn loaded(&self) -> Option<bool> {
		let load = self.mounted.lock().as_mut().and_then(|m| m.load.take())?;
		match load.await {
			Ok(initialized) => Some(initialized),
			Err(e) => {
				warn!(error = %e, "Segment load task failed");
				Some(false)
			}
		}
	}
}

/// Returns the wrapper published by `provider`.
///
/// Consuming without a provider, or before anything was rendered, is a usage
/// error.
pub fn use_segment(provider: Option<&SegmentProvider>) -> Result<SegmentClient> {
	provider.ok_or(SegmentError::NoProvider)?.client()
}

/// Runs one load attempt and initializes `client` on success.
///
/// Load failures are swallowed (logged in debug mode) and leave the client
/// queueing.
pub async fn bootstrap(loader: SharedScriptLoader, client: SegmentClient) -> bool {
	let config = client.config();
	match loader.load(config.api_key(), config.is_debug()).await {
		Some(handle) => client.initialize(handle),
		None => {
			if config.is_debug() {
				warn!(
					url = %script_url(config.api_key()),
					pending = client.pending_len(),
					"Segment client failed to load, calls stay queued"
				);
			}
			false
		}
	}
}
