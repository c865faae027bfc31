// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Completion signals returned by every wrapper call.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use parking_lot::Mutex;
use segment_hook_core::{Callback, Method};
use tokio::sync::oneshot;
use tracing::debug;

use crate::error::{Result, SegmentError};

type Slot = Arc<Mutex<Option<oneshot::Sender<Result<()>>>>>;

/// Resolves once the underlying client reports the call as complete.
///
/// The call itself is issued (or queued) when the wrapper method returns, not
/// when this future is first polled, so dropping a `Completion` never cancels
/// the call.
#[must_use = "a Completion reports whether the call succeeded"]
#[derive(Debug)]
pub struct Completion {
	method: Method,
	rx: oneshot::Receiver<Result<()>>,
}

impl Completion {
	/// The wrapper method that produced this completion.
	pub fn method(&self) -> Method {
		self.method
	}
}

impl Future for Completion {
	type Output = Result<()>;

	fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
		let method = self.method;
		match Pin::new(&mut self.rx).poll(cx) {
			Poll::Ready(Ok(result)) => Poll::Ready(result),
			Poll::Ready(Err(_)) => Poll::Ready(Err(SegmentError::Abandoned(method))),
			Poll::Pending => Poll::Pending,
		}
	}
}

/// Settling side of a [`Completion`].
///
/// Clones share one slot, so whichever path settles first wins and later
/// attempts are ignored.
#[derive(Clone)]
pub(crate) struct Responder {
	method: Method,
	debug: bool,
	slot: Slot,
}

pub(crate) fn channel(method: Method, debug: bool) -> (Responder, Completion) {
	let (tx, rx) = oneshot::channel();
	let responder = Responder {
		method,
		debug,
		slot: Arc::new(Mutex::new(Some(tx))),
	};
	(responder, Completion { method, rx })
}

impl Responder {
	pub(crate) fn resolve(&self) {
		self.settle(Ok(()));
	}

	pub(crate) fn reject(&self, err: SegmentError) {
		self.settle(Err(err));
	}

	/// A callback for the client that resolves this completion when invoked.
	pub(crate) fn callback(&self) -> Callback {
		let responder = self.clone();
		Box::new(move || responder.resolve())
	}

	fn settle(&self, result: Result<()>) {
		let Some(tx) = self.slot.lock().take() else {
			return;
		};
		if self.debug {
			match &result {
				Ok(()) => debug!(method = %self.method, "Segment call completed"),
				Err(e) => debug!(method = %self.method, error = %e, "Segment call failed"),
			}
		}
		// Receiver may already be gone; the caller chose not to wait.
		let _ = tx.send(result);
	}
}
