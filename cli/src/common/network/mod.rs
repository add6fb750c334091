//! # netreport Network Context Resolution (`common::network`)
//!
//! File: cli/src/common/network/mod.rs
//!
//! ## Overview
//!
//! Before any probe runs, netreport works out three facts about the host:
//! the interface carrying the default route, that interface's IPv4 CIDR,
//! and the first wireless interface. Together they form the `NetworkContext`
//! the probes are parameterized with.
//!
//! ## Architecture
//!
//! - `resolve_default_route`: `ip route` → default `dev`, then
//!   `ip -o -f inet addr show dev <iface>` → CIDR.
//! - `resolve_wifi_interface`: `iw dev` → first `Interface <name>` line.
//! - `resolve_context`: runs both sequentially and never fails. Each error is
//!   printed as a one-line notice and the affected field stays empty.
//!
//! Output parsing is done here rather than in a shell pipeline, so the
//! interface name read from the routing table is only ever passed as a plain
//! argument.
//!
//! ## Usage
//!
//! ```rust
//! let context = network::resolve_context(&SystemRunner, &config.tools);
//! if context.cidr.is_empty() {
//!     // discovery probe will be skipped
//! }
//! ```
//!
use crate::common::process::Runner;
use crate::core::config::ToolsConfig;
use crate::core::error::ContextError;
use tracing::{debug, info, warn};

/// Network facts discovered before the probes run. Empty string = unresolved.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NetworkContext {
    pub default_interface: String,
    pub cidr: String,
    pub wifi_interface: String,
}

/// Returns `(cidr, interface)` for the default route.
///
/// The CIDR may be empty when the interface has no IPv4 address. A failure
/// of the address lookup still carries the interface name, see
/// `ContextError::partial_interface`.
pub fn resolve_default_route(
    runner: &dyn Runner,
    tools: &ToolsConfig,
) -> Result<(String, String), ContextError> {
    let routes = runner.run(&tools.ip, &["route"]);
    if let Some(source) = routes.error {
        return Err(ContextError::RouteLookup {
            source,
            output: routes.text.trim_end().to_string(),
        });
    }

    let interface = parse_default_interface(&routes.text)
        .ok_or(ContextError::DefaultInterfaceNotFound)?;
    debug!("Default route goes through '{}'", interface);

    let addresses = runner.run(
        &tools.ip,
        &["-o", "-f", "inet", "addr", "show", "dev", interface.as_str()],
    );
    if let Some(source) = addresses.error {
        return Err(ContextError::CidrLookup {
            interface,
            source,
            output: addresses.text.trim_end().to_string(),
        });
    }

    let cidr = parse_inet_cidr(&addresses.text).unwrap_or_default();
    Ok((cidr, interface))
}

/// Returns the first wireless interface reported by `iw dev`.
pub fn resolve_wifi_interface(
    runner: &dyn Runner,
    tools: &ToolsConfig,
) -> Result<String, ContextError> {
    let devices = runner.run(&tools.iw, &["dev"]);
    if let Some(source) = devices.error {
        return Err(ContextError::WifiLookup {
            source,
            output: devices.text.trim_end().to_string(),
        });
    }
    parse_wifi_interface(&devices.text).ok_or(ContextError::NoWifiInterface)
}

/// Resolves the full context. Failures are reported on stdout and logged;
/// they never stop the run.
pub fn resolve_context(runner: &dyn Runner, tools: &ToolsConfig) -> NetworkContext {
    let mut context = NetworkContext::default();

    match resolve_default_route(runner, tools) {
        Ok((cidr, interface)) => {
            context.cidr = cidr;
            context.default_interface = interface;
        }
        Err(e) => {
            warn!("Default route resolution failed: {}", e);
            println!("CIDR error: {}", e);
            if let Some(interface) = e.partial_interface() {
                context.default_interface = interface.to_string();
            }
        }
    }

    match resolve_wifi_interface(runner, tools) {
        Ok(interface) => context.wifi_interface = interface,
        Err(e) => {
            warn!("WiFi interface resolution failed: {}", e);
            println!("WiFi interface error: {}", e);
        }
    }

    info!(
        "Resolved context: interface='{}' cidr='{}' wifi='{}'",
        context.default_interface, context.cidr, context.wifi_interface
    );
    context
}

/// Fifth field of the first routing-table line mentioning `default`
/// (`default via <gw> dev <iface> ...`).
fn parse_default_interface(routes: &str) -> Option<String> {
    routes
        .lines()
        .filter(|line| line.contains("default"))
        .find_map(|line| line.split_whitespace().nth(4))
        .map(str::to_string)
}

/// Fourth field of the first `ip -o addr` line (`2: wlan0    inet 192.168.1.23/24 ...`).
fn parse_inet_cidr(addresses: &str) -> Option<String> {
    addresses
        .lines()
        .find_map(|line| line.split_whitespace().nth(3))
        .map(str::to_string)
}

fn parse_wifi_interface(devices: &str) -> Option<String> {
    devices.lines().find_map(|line| {
        let mut fields = line.split_whitespace();
        match (fields.next(), fields.next()) {
            (Some("Interface"), Some(name)) => Some(name.to_string()),
            _ => None,
        }
    })
}
