// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! End-to-end flows through the provider, loader and wrapper.

mod support;

use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;
use segment_hook::{
	use_segment, EventType, FnLoader, IdentifyEvent, PageEvent, SegmentConfig, SegmentProvider,
	SharedClientHandle, TrackEvent,
};
use support::LogHandle;

fn delayed_loader(handle: Arc<LogHandle>, delay: Duration) -> SegmentProvider {
	SegmentProvider::new(FnLoader::new(move |_api_key: String, _debug: bool| {
		let handle = Arc::clone(&handle);
		async move {
			tokio::time::sleep(delay).await;
			Some(handle as SharedClientHandle)
		}
	}))
}

#[tokio::test]
async fn calls_before_load_replay_in_order_then_pass_through() {
	let handle = LogHandle::new();
	let provider = delayed_loader(handle.clone(), Duration::from_millis(20));
	provider
		.render(SegmentConfig::new("write_key").timeout(Duration::from_millis(500)))
		.unwrap();
	let analytics = use_segment(Some(&provider)).unwrap();

	let queued = vec![
		analytics.set_anonymous_id("anon-1"),
		analytics.page(PageEvent::new().name("Home")),
		analytics.on(EventType::Track, |_| {}),
		analytics.identify(IdentifyEvent::new("user-1")),
		analytics.track(TrackEvent::new("Signed Up")),
	];
	assert_eq!(analytics.pending_len(), 5);

	assert_eq!(provider.loaded().await, Some(true));
	for result in join_all(queued).await {
		result.unwrap();
	}
	analytics.track(TrackEvent::new("Direct")).await.unwrap();

	assert_eq!(
		handle.log(),
		vec![
			"timeout:500",
			"debug:false",
			"anonymous_id:anon-1",
			"page:Home",
			"on:track",
			"identify:user-1",
			"track:Signed Up@-",
			"track:Direct@-",
		]
	);
}

#[tokio::test]
async fn anonymized_provider_injects_sentinel_ip() {
	let handle = LogHandle::new();
	let provider = delayed_loader(handle.clone(), Duration::from_millis(1));
	let analytics = provider
		.render(SegmentConfig::new("write_key").anonymize_ip(true))
		.unwrap();

	let queued = analytics.track(TrackEvent::new("Before"));
	provider.loaded().await;
	queued.await.unwrap();
	analytics.track(TrackEvent::new("After")).await.unwrap();

	assert_eq!(handle.count("track:Before@0.0.0.0"), 1);
	assert_eq!(handle.count("track:After@0.0.0.0"), 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_callers_each_land_exactly_once() {
	let handle = LogHandle::new();
	let provider = delayed_loader(handle.clone(), Duration::from_millis(5));
	let analytics = provider.render(SegmentConfig::new("write_key")).unwrap();

	let tasks: Vec<_> = (0..16)
		.map(|task| {
			let analytics = analytics.clone();
			tokio::spawn(async move {
				for n in 0..25 {
					analytics
						.track(TrackEvent::new(format!("{task}-{n}")))
						.await
						.unwrap();
					tokio::task::yield_now().await;
				}
			})
		})
		.collect();

	provider.loaded().await;
	for task in join_all(tasks).await {
		task.unwrap();
	}

	assert_eq!(handle.count("track:"), 16 * 25);
	assert_eq!(handle.count("timeout:"), 1);
	assert_eq!(analytics.pending_len(), 0);
}

#[tokio::test]
async fn rerender_with_same_config_keeps_queue() {
	let handle = LogHandle::new();
	let provider = delayed_loader(handle.clone(), Duration::from_millis(10));

	let first = provider.render(SegmentConfig::new("write_key")).unwrap();
	let queued = first.track(TrackEvent::new("Kept"));
	let second = provider.render(SegmentConfig::new("write_key")).unwrap();
	assert_eq!(second.pending_len(), 1);

	provider.loaded().await;
	queued.await.unwrap();
	assert_eq!(handle.count("track:Kept"), 1);
}
