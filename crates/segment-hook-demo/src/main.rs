// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Walkthrough of the queueing wrapper.
//!
//! Mounts a provider whose loader takes `--load-delay-ms` to produce a
//! console-printing client, issues calls before and after it is ready, and
//! prints each call as the client receives it.

mod console;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use futures::future::join_all;
use segment_hook::{
	use_segment, EventType, FnLoader, GroupEvent, HeadlessLoader, IdentifyEvent, PageEvent,
	Properties, SegmentConfig, SegmentProvider, SharedClientHandle, SharedScriptLoader, TrackEvent,
};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use console::ConsoleHandle;

/// Show Segment calls being queued until the client loads, then replayed.
#[derive(Parser, Debug)]
#[command(name = "segment-hook-demo")]
struct Args {
	/// Segment write key (ignored when --config is given)
	#[arg(long, env = "SEGMENT_WRITE_KEY")]
	api_key: Option<String>,

	/// TOML config file (api_key, debug, timeout_ms, anonymize_ip)
	#[arg(long)]
	config: Option<PathBuf>,

	/// Log every call and completion
	#[arg(long)]
	debug: bool,

	/// Request timeout handed to the client
	#[arg(long)]
	timeout_ms: Option<u64>,

	/// Send 0.0.0.0 as the IP of every call
	#[arg(long)]
	anonymize_ip: bool,

	/// How long the simulated script takes to load
	#[arg(long, default_value_t = 500)]
	load_delay_ms: u64,

	/// Simulate a script that never loads
	#[arg(long)]
	fail_load: bool,
}

impl Args {
	fn segment_config(&self) -> anyhow::Result<SegmentConfig> {
		self.segment_config_with(|name| std::env::var(name).ok())
	}

	/// Flags win over `SEGMENT_*` variables, which win over the config file.
	fn segment_config_with<F>(&self, lookup: F) -> anyhow::Result<SegmentConfig>
	where
		F: Fn(&str) -> Option<String>,
	{
		let base = match &self.config {
			Some(path) => SegmentConfig::load_file(path)
				.with_context(|| format!("loading {}", path.display()))?,
			None => {
				let key = self
					.api_key
					.clone()
					.context("--api-key, SEGMENT_WRITE_KEY or --config is required")?;
				SegmentConfig::new(key)
			}
		};
		// Without a file the key already came from the flag or its env fallback.
		let from_file = self.config.is_some();
		let mut config = base.apply_overrides(|name: &str| {
			if !from_file && name == "SEGMENT_WRITE_KEY" {
				return None;
			}
			lookup(name)
		})?;
		if self.debug {
			config = config.debug(true);
		}
		if let Some(ms) = self.timeout_ms {
			config = config.timeout(Duration::from_millis(ms));
		}
		if self.anonymize_ip {
			config = config.anonymize_ip(true);
		}
		config.validate()?;
		Ok(config)
	}

	fn loader(&self) -> SharedScriptLoader {
		if self.fail_load {
			return Arc::new(HeadlessLoader);
		}
		let delay = Duration::from_millis(self.load_delay_ms);
		Arc::new(FnLoader::new(move |_api_key: String, _debug: bool| async move {
			tokio::time::sleep(delay).await;
			Some(Arc::new(ConsoleHandle::stdout()) as SharedClientHandle)
		}))
	}
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
	tracing_subscriber::fmt()
		.with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
		.with_writer(std::io::stderr)
		.init();

	let args = Args::parse();
	let config = args.segment_config()?;

	let provider = SegmentProvider::with_shared_loader(args.loader());
	provider.render(config)?;
	let analytics = use_segment(Some(&provider))?;

	info!("Issuing calls before the client has loaded");
	let queued = vec![
		analytics.on(EventType::Track, |event| {
			info!(event = ?event.name, "Listener saw track");
		}),
		analytics.set_anonymous_id("demo-anonymous-id"),
		analytics.page(
			PageEvent::new()
				.name("Home")
				.category("Marketing")
				.properties(Properties::new().set("path", "/")),
		),
		analytics.identify(
			IdentifyEvent::new("user-42").traits(Properties::new().set("plan", "enterprise")),
		),
		analytics.track(
			TrackEvent::new("Demo Started").properties(Properties::new().set("source", "cli")),
		),
	];
	info!(pending = analytics.pending_len(), "Calls queued");

	if provider.loaded().await != Some(true) {
		warn!(
			pending = analytics.pending_len(),
			"Client did not load; queued calls will never be sent"
		);
		return Ok(());
	}

	for result in join_all(queued).await {
		result?;
	}

	info!("Client ready, calls now go straight through");
	analytics
		.group(GroupEvent::new("acme").traits(Properties::new().set("seats", 25)))
		.await?;
	analytics.track(TrackEvent::new("Demo Finished")).await?;

	Ok(())
}
