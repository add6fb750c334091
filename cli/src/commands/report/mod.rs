//! # netreport Report Command
//!
//! File: cli/src/commands/report/mod.rs
//!
//! ## Overview
//!
//! This module implements the one thing netreport does: build and print a
//! network diagnostic report.
//!
//! ## Architecture
//!
//! The command runs in four stages:
//!
//! 1. Load configuration (`core::config`).
//! 2. Resolve the network context sequentially (`common::network`).
//!    Failures print a notice and leave a field empty.
//! 3. Run the probes concurrently and join them (`orchestrator`, `probes`).
//! 4. Assemble and print the report (`render`).
//!
//! Only a configuration error stops the command. Every other failure ends
//! up as text inside the report, which is always printed.
//!
//! ## Usage
//!
//! ```bash
//! netreport
//! netreport -v --config ./lab.toml
//! ```
//!
use crate::common::network;
use crate::common::process::{Runner, SystemRunner};
use crate::core::config;
use crate::core::error::Result;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info};

pub mod orchestrator;
pub mod probes;
pub mod render;

use render::Report;

/// Arguments for producing a report.
#[derive(Parser, Debug, Default)]
pub struct ReportArgs {
    /// Read configuration from this file instead of the user/project config files.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

/// Handler that produces the report and writes it to stdout.
pub async fn handle_report(args: ReportArgs) -> Result<()> {
    let started = chrono::Local::now();
    let config = Arc::new(config::load_config(args.config.as_deref())?);

    let runner: Arc<dyn Runner> = Arc::new(SystemRunner);
    info!("Resolving network context...");
    let context = Arc::new(network::resolve_context(runner.as_ref(), &config.tools));

    info!("Running probes...");
    let results = orchestrator::run_probes(runner, context.clone(), config.clone()).await;
    for result in results.iter() {
        debug!("{} result: {} bytes", result.label(), result.text.len());
    }

    let report = Report::new(
        started,
        (*context).clone(),
        results,
        config.labels.clone(),
    );
    print!("{}", report);
    Ok(())
}

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::network::NetworkContext;
    use crate::common::process::fake::FakeRunner;
    use crate::common::process::CommandOutput;
    use crate::core::config::Config;
    use chrono::{TimeZone, Utc};
    use std::time::Duration;

    const ROUTES: &str = "default via 192.168.1.1 dev wlan0 proto dhcp metric 600\n";
    const ADDRS: &str = "3: wlan0    inet 192.168.1.0/24 brd 192.168.1.255 scope global wlan0\n";
    const IW_DEV: &str = "phy#0\n\tInterface wlan0\n";
    const IW_LINK: &str = "Connected to aa:bb:cc:dd:ee:ff (on wlan0)\n\tSSID: home\n   freq: 5180 MHz\n";
    const NMAP: &str = "Nmap scan report for 192.168.1.1\nNmap done: 256 IP addresses (1 host up)\n";
    const SPEEDTEST: &str = "Ping: 8.1 ms\nDownload: 310.2 Mbit/s\nUpload: 95.4 Mbit/s\n";

    /// Runs stages 2-4 against `runner` with a fixed timestamp.
    async fn build_report(runner: Arc<FakeRunner>) -> (NetworkContext, String) {
        let config = Arc::new(Config::default());
        let context = Arc::new(network::resolve_context(runner.as_ref(), &config.tools));
        let results = orchestrator::run_probes(runner, context.clone(), config.clone()).await;
        let started = Utc.with_ymd_and_hms(2025, 1, 2, 3, 4, 5).unwrap();
        let report = Report::new(started, (*context).clone(), results, config.labels.clone());
        ((*context).clone(), report.to_string())
    }

    fn happy_runner(delays: [u64; 3]) -> FakeRunner {
        let [nmap, iw, speed] = delays.map(Duration::from_millis);
        FakeRunner::new()
            .ok("ip route", ROUTES)
            .ok("ip -o -f inet addr show dev wlan0", ADDRS)
            .ok("iw dev", IW_DEV)
            .respond("nmap -sn 192.168.1.0/24", CommandOutput::success(NMAP), nmap)
            .respond("iw dev wlan0 link", CommandOutput::success(IW_LINK), iw)
            .respond("speedtest --server-id 3696 --simple", CommandOutput::success(SPEEDTEST), speed)
    }

    fn assert_in_order(text: &str, parts: &[&str]) {
        let mut from = 0;
        for part in parts {
            let found = text[from..]
                .find(part)
                .unwrap_or_else(|| panic!("'{part}' missing or out of order in:\n{text}"));
            from += found + part.len();
        }
    }

    #[tokio::test]
    async fn test_full_success_scenario() {
        let (context, text) = build_report(Arc::new(happy_runner([0, 0, 0]))).await;
        assert_eq!(context.cidr, "192.168.1.0/24");

        assert_in_order(
            &text,
            &[
                "Relatório de Rede - 02/01/2025 03:04:05",
                "Interface padrão: wlan0",
                "CIDR: 192.168.1.0/24",
                NMAP,
                "Interface WiFi: wlan0",
                "freq: 5180 MHz",
                SPEEDTEST,
            ],
        );
        // Only the frequency line of the link info is kept.
        assert!(!text.contains("SSID: home"));
    }

    #[tokio::test]
    async fn test_report_order_independent_of_completion_order() {
        let forward = Arc::new(happy_runner([0, 150, 300]));
        let reversed = Arc::new(happy_runner([300, 150, 0]));

        let (_, forward_text) = build_report(forward.clone()).await;
        let (_, reversed_text) = build_report(reversed.clone()).await;

        assert_eq!(forward_text, reversed_text);
        // The probes really did complete in opposite orders.
        let probe_calls = |runner: &FakeRunner| -> Vec<String> { runner.calls()[3..].to_vec() };
        let mut forward_calls = probe_calls(&forward);
        forward_calls.reverse();
        assert_eq!(forward_calls, probe_calls(&reversed));
    }

    #[tokio::test]
    async fn test_no_default_route_scenario() {
        let runner = Arc::new(
            FakeRunner::new()
                .ok("ip route", "10.8.0.0/24 dev tun0 proto kernel scope link\n")
                .ok("iw dev", "")
                .fail("speedtest --server-id 3696 --simple", "Cannot retrieve speedtest configuration\n"),
        );
        let (context, text) = build_report(runner.clone()).await;

        assert_eq!(context, NetworkContext::default());
        assert_in_order(
            &text,
            &[
                "Interface padrão: \n",
                "CIDR: \n",
                "CIDR not found\n",
                "Interface WiFi: \n",
                "wifi interface not found\n",
                "speedtest error: exit status: 1\nCannot retrieve speedtest configuration\n",
            ],
        );
        assert!(!runner.was_called("nmap"));
        assert!(runner.was_called("speedtest"));
    }

    #[test]
    fn test_report_args_parsing() {
        let args = ReportArgs::try_parse_from(["report"]).unwrap();
        assert!(args.config.is_none());

        let args = ReportArgs::try_parse_from(["report", "--config", "/tmp/n.toml"]).unwrap();
        assert_eq!(args.config, Some(PathBuf::from("/tmp/n.toml")));
    }
}
