// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Script loading contract.
//!
//! A [`ScriptLoader`] turns an API key into a live [`ClientHandle`]. Loading
//! never fails loudly: a non-browser environment, an unreachable CDN or a
//! broken script all resolve to `None`, and the wrapper keeps queueing.
//!
//! [`ClientHandle`]: segment_hook_core::ClientHandle

use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;
use segment_hook_core::SharedClientHandle;
use tracing::debug;

/// Host serving the analytics.js bundle.
pub const CDN_HOST: &str = "https://cdn.segment.com";

/// URL of the analytics.js bundle for `api_key`.
pub fn script_url(api_key: &str) -> String {
	format!("{CDN_HOST}/analytics.js/v1/{api_key}/analytics.min.js")
}

/// Produces a client handle for an API key.
#[async_trait]
pub trait ScriptLoader: Send + Sync + 'static {
	/// Loads the client. Expected failures resolve to `None`.
	async fn load(&self, api_key: &str, debug: bool) -> Option<SharedClientHandle>;
}

/// Type alias for a shared script loader.
pub type SharedScriptLoader = Arc<dyn ScriptLoader>;

/// Loader for environments with no document to inject a script into.
///
/// Always resolves to `None`.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeadlessLoader;

#[async_trait]
impl ScriptLoader for HeadlessLoader {
	async fn load(&self, api_key: &str, debug: bool) -> Option<SharedClientHandle> {
		if debug {
			debug!(url = %script_url(api_key), "No document available, skipping script load");
		}
		None
	}
}

/// Adapts an async closure into a [`ScriptLoader`].
///
/// ```ignore
/// let loader = FnLoader::new(|api_key, _debug| async move {
///     Some(Arc::new(NativeClient::connect(&api_key)) as SharedClientHandle)
/// });
/// ```
pub struct FnLoader<F> {
	load: F,
}

impl<F> FnLoader<F> {
	pub fn new(load: F) -> Self {
		Self { load }
	}
}

#[async_trait]
impl<F, Fut> ScriptLoader for FnLoader<F>
where
	F: Fn(String, bool) -> Fut + Send + Sync + 'static,
	Fut: Future<Output = Option<SharedClientHandle>> + Send + 'static,
{
	async fn load(&self, api_key: &str, debug: bool) -> Option<SharedClientHandle> {
		(self.load)(api_key.to_string(), debug).await
	}
}
