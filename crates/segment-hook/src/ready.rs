// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! One-shot ready signal with an ordered queue of deferred calls.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;
use segment_hook_core::{Method, SharedClientHandle};

/// A call captured before the client loaded, replayed once against the handle.
pub(crate) type PendingCall = Box<dyn FnOnce(&SharedClientHandle) + Send + 'static>;

struct Deferred {
	method: Method,
	call: PendingCall,
}

enum State {
	Unready(VecDeque<Deferred>),
	Ready(SharedClientHandle),
}

/// Outcome of [`ReadySignal::submit`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Submission {
	/// The call ran against the live handle before `submit` returned.
	Immediate,
	/// The call was queued; `pending` is the queue length including it.
	Deferred { pending: usize },
}

/// Transitions once from Unready to Ready.
///
/// The handle is written exactly once and never cleared. Calls submitted
/// before the transition are queued in submission order and replayed by
/// [`fire`](Self::fire). The flip and the queue drain happen under one lock, so
/// a concurrent submit is either drained or sees the handle.
pub(crate) struct ReadySignal {
	fired: AtomicBool,
	state: Mutex<State>,
}

impl ReadySignal {
	pub(crate) fn new() -> Self {
		Self {
			fired: AtomicBool::new(false),
			state: Mutex::new(State::Unready(VecDeque::new())),
		}
	}

	/// Runs `call` now if the handle is live, otherwise queues it.
	pub(crate) fn submit(&self, method: Method, call: PendingCall) -> Submission {
		let handle = {
			let mut state = self.state.lock();
			match &mut *state {
				State::Ready(handle) => Arc::clone(handle),
				State::Unready(queue) => {
					queue.push_back(Deferred { method, call });
					return Submission::Deferred {
						pending: queue.len(),
					};
				}
			}
		};
		call(&handle);
		Submission::Immediate
	}

	/// Publishes `handle` and replays the queue.
	///
	/// `configure` runs before any queued or new call can reach the handle.
	/// Returns the methods replayed, in order, or `None` if the signal had
	/// already fired.
	pub(crate) fn fire<F>(&self, handle: SharedClientHandle, configure: F) -> Option<Vec<Method>>
	where
		F: FnOnce(&SharedClientHandle),
	{
		if self.fired.swap(true, Ordering::SeqCst) {
			return None;
		}

		configure(&handle);

		let queue = {
			let mut state = self.state.lock();
			match &mut *state {
				State::Unready(queue) => {
					let queue = std::mem::take(queue);
					*state = State::Ready(Arc::clone(&handle));
					queue
				}
				State::Ready(_) => return None,
			}
		};

		let mut replayed = Vec::with_capacity(queue.len());
		for deferred in queue {
			replayed.push(deferred.method);
			(deferred.call)(&handle);
		}
		Some(replayed)
	}

	pub(crate) fn is_ready(&self) -> bool {
		matches!(*self.state.lock(), State::Ready(_))
	}

	pub(crate) fn pending_len(&self) -> usize {
		match &*self.state.lock() {
			State::Unready(queue) => queue.len(),
			State::Ready(_) => 0,
		}
	}
}
