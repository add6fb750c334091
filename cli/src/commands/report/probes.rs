//! # Diagnostic Probes
//!
//! File: cli/src/commands/report/probes.rs
//!
//! ## Overview
//!
//! The three probes that make up a report. Each one is a plain function of
//! the resolved `NetworkContext`, a `Runner` and the configuration, and each
//! returns exactly one `ProbeResult`. Nothing here returns an error: a probe
//! whose prerequisite is missing returns a "not found" text without spawning
//! anything, and a failed tool becomes an `"<program> error: ..."` text.
//!
//! | Probe            | Needs            | Command                                  |
//! |------------------|------------------|------------------------------------------|
//! | Device discovery | `cidr`           | `nmap -sn <cidr>`                        |
//! | Wireless link    | `wifi_interface` | `iw dev <wifi> link` (`freq:` line only) |
//! | Bandwidth        | nothing          | `speedtest --server-id <id> --simple`    |
//!
use crate::common::network::NetworkContext;
use crate::common::process::{CommandOutput, Runner};
use crate::core::config::Config;
use std::fmt;
use tracing::debug;

/// Text of the discovery result when no CIDR was resolved.
pub const CIDR_NOT_FOUND: &str = "CIDR not found";
/// Text of the wireless result when no wifi interface was resolved.
pub const WIFI_NOT_FOUND: &str = "wifi interface not found";

const FREQUENCY_MARKER: &str = "freq:";

/// Identity of a probe. Declaration order is report order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProbeKind {
    DeviceDiscovery,
    WirelessLink,
    Bandwidth,
}

impl ProbeKind {
    pub const ALL: [ProbeKind; 3] = [
        ProbeKind::DeviceDiscovery,
        ProbeKind::WirelessLink,
        ProbeKind::Bandwidth,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ProbeKind::DeviceDiscovery => "device discovery",
            ProbeKind::WirelessLink => "wireless link",
            ProbeKind::Bandwidth => "bandwidth",
        }
    }
}

impl fmt::Display for ProbeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Outcome of one probe: either the tool output or a diagnostic text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeResult {
    pub kind: ProbeKind,
    pub text: String,
}

impl ProbeResult {
    pub fn new(kind: ProbeKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }

    pub fn label(&self) -> &'static str {
        self.kind.label()
    }
}

/// Runs the probe identified by `kind`.
pub fn run_probe(
    kind: ProbeKind,
    context: &NetworkContext,
    runner: &dyn Runner,
    config: &Config,
) -> ProbeResult {
    match kind {
        ProbeKind::DeviceDiscovery => device_discovery(context, runner, config),
        ProbeKind::WirelessLink => wireless_link(context, runner, config),
        ProbeKind::Bandwidth => bandwidth(runner, config),
    }
}

pub fn device_discovery(context: &NetworkContext, runner: &dyn Runner, config: &Config) -> ProbeResult {
    let kind = ProbeKind::DeviceDiscovery;
    if context.cidr.is_empty() {
        debug!("Skipping {}: no CIDR", kind);
        return ProbeResult::new(kind, CIDR_NOT_FOUND);
    }
    let program = &config.tools.nmap;
    let output = runner.run(program, &["-sn", context.cidr.as_str()]);
    ProbeResult::new(kind, output_or_error(program, output))
}

pub fn wireless_link(context: &NetworkContext, runner: &dyn Runner, config: &Config) -> ProbeResult {
    let kind = ProbeKind::WirelessLink;
    if context.wifi_interface.is_empty() {
        debug!("Skipping {}: no wifi interface", kind);
        return ProbeResult::new(kind, WIFI_NOT_FOUND);
    }
    let program = &config.tools.iw;
    let output = runner.run(program, &["dev", context.wifi_interface.as_str(), "link"]);
    if !output.is_ok() {
        return ProbeResult::new(kind, output_or_error(program, output));
    }
    let text = match frequency_line(&output.text) {
        Some(line) => line.to_string(),
        None => output.text,
    };
    ProbeResult::new(kind, text)
}

pub fn bandwidth(runner: &dyn Runner, config: &Config) -> ProbeResult {
    let program = &config.tools.speedtest;
    let output = runner.run(
        program,
        &["--server-id", config.bandwidth.server_id.as_str(), "--simple"],
    );
    ProbeResult::new(ProbeKind::Bandwidth, output_or_error(program, output))
}

/// First line whose trimmed form starts with `freq:`, trimmed.
pub fn frequency_line(link_info: &str) -> Option<&str> {
    link_info
        .lines()
        .map(str::trim)
        .find(|line| line.starts_with(FREQUENCY_MARKER))
}

fn output_or_error(program: &str, output: CommandOutput) -> String {
    match output.error {
        None => output.text,
        Some(err) => format!("{} error: {}\n{}", program, err, output.text),
    }
}
