//! # Report Assembly
//!
//! File: cli/src/commands/report/render.rs
//!
//! Formats the start timestamp, the resolved context and the probe results
//! into the final text. Section order is fixed: header, default interface
//! and CIDR, device discovery, wifi interface and frequency, bandwidth.
//! Unresolved context fields are printed as empty values; probe failures
//! are already embedded in the probe texts.
//!
use super::orchestrator::ProbeResults;
use crate::common::network::NetworkContext;
use crate::core::config::LabelsConfig;
use chrono::{DateTime, TimeZone};
use std::fmt;

/// A fully assembled report. Rendered through `Display`.
#[derive(Debug, Clone)]
pub struct Report<Tz: TimeZone> {
    started: DateTime<Tz>,
    context: NetworkContext,
    results: ProbeResults,
    labels: LabelsConfig,
}

impl<Tz: TimeZone> Report<Tz> {
    pub fn new(
        started: DateTime<Tz>,
        context: NetworkContext,
        results: ProbeResults,
        labels: LabelsConfig,
    ) -> Self {
        Self {
            started,
            context,
            results,
            labels,
        }
    }
}

impl<Tz: TimeZone> fmt::Display for Report<Tz>
where
    Tz::Offset: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let labels = &self.labels;
        let timestamp = self.started.format(&labels.timestamp_format);

        writeln!(f, "{} - {}", labels.title, timestamp)?;
        writeln!(f)?;
        writeln!(f, "{}: {}", labels.default_interface, self.context.default_interface)?;
        writeln!(f, "{}: {}", labels.cidr, self.context.cidr)?;
        writeln!(f)?;

        writeln!(f, "{}:", labels.devices)?;
        writeln!(f, "{}", self.results.device_discovery.text)?;

        writeln!(f, "{}: {}", labels.wifi_interface, self.context.wifi_interface)?;
        writeln!(f, "{}:", labels.frequency)?;
        writeln!(f, "{}", self.results.wireless_link.text)?;
        writeln!(f)?;

        writeln!(f, "{}:", labels.bandwidth)?;
        writeln!(f, "{}", self.results.bandwidth.text)
    }
}
