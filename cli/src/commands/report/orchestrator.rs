//! # Probe Orchestration
//!
//! File: cli/src/commands/report/orchestrator.rs
//!
//! ## Overview
//!
//! Fans the three probes out concurrently and fans their results back in.
//! Each probe runs on tokio's blocking pool (the `Runner` blocks on the child
//! process) and owns exactly one output slot; `tokio::join!` is the only
//! synchronization. Nothing is read before all three tasks are done.
//!
//! There is no timeout and no cancellation: a tool that never exits keeps
//! the whole run waiting.
//!
use super::probes::{run_probe, ProbeKind, ProbeResult};
use crate::common::network::NetworkContext;
use crate::common::process::Runner;
use crate::core::config::Config;
use std::sync::Arc;
use std::time::Instant;
use tokio::task::JoinHandle;
use tracing::{debug, error};

/// One result per probe, in fixed slots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeResults {
    pub device_discovery: ProbeResult,
    pub wireless_link: ProbeResult,
    pub bandwidth: ProbeResult,
}

impl ProbeResults {
    /// Results in report order.
    pub fn iter(&self) -> impl Iterator<Item = &ProbeResult> {
        [&self.device_discovery, &self.wireless_link, &self.bandwidth].into_iter()
    }
}

/// Runs all probes concurrently and waits for every one of them.
pub async fn run_probes(
    runner: Arc<dyn Runner>,
    context: Arc<NetworkContext>,
    config: Arc<Config>,
) -> ProbeResults {
    let [discovery, wireless, bandwidth] =
        ProbeKind::ALL.map(|kind| spawn_probe(kind, runner.clone(), context.clone(), config.clone()));

    let (device_discovery, wireless_link, bandwidth) = tokio::join!(
        settle(ProbeKind::DeviceDiscovery, discovery),
        settle(ProbeKind::WirelessLink, wireless),
        settle(ProbeKind::Bandwidth, bandwidth),
    );

    ProbeResults {
        device_discovery,
        wireless_link,
        bandwidth,
    }
}

fn spawn_probe(
    kind: ProbeKind,
    runner: Arc<dyn Runner>,
    context: Arc<NetworkContext>,
    config: Arc<Config>,
) -> JoinHandle<ProbeResult> {
    tokio::task::spawn_blocking(move || {
        debug!("Probe '{}' started", kind);
        let started = Instant::now();
        let result = run_probe(kind, &context, runner.as_ref(), &config);
        debug!("Probe '{}' finished in {:.2?}", result.label(), started.elapsed());
        result
    })
}

/// Awaits a probe task. A task that panicked still yields a result.
async fn settle(kind: ProbeKind, handle: JoinHandle<ProbeResult>) -> ProbeResult {
    match handle.await {
        Ok(result) => result,
        Err(e) => {
            error!("Probe '{}' task failed: {}", kind, e);
            ProbeResult::new(kind, format!("{} task failed: {}", kind, e))
        }
    }
}
