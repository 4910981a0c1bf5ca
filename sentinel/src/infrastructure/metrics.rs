// /////////////////////////////////////////////////////////////////////////////
// Sentinel
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! Prometheus counters for a collection run. No HTTP exposition endpoint
//! is wired up; the registry is exported so a caller that wants one can
//! mount it, but `sentinel` itself only logs a summary at shutdown.

use prometheus::{IntCounter, IntGauge, Opts, Registry};
use sentinel_domain::error::HunterError;
use std::sync::Arc;

pub struct CollectionMetrics {
    registry: Arc<Registry>,

    pub files_scanned_total: IntCounter,
    pub files_matched_total: IntCounter,
    pub files_deduped_total: IntCounter,
    pub bytes_fetched_total: IntCounter,
    pub archives_expanded_total: IntCounter,
    pub enumeration_errors_total: IntCounter,
    pub active_workers: IntGauge,
}

impl CollectionMetrics {
    pub fn new() -> Result<Self, HunterError> {
        let registry = Registry::new();
        let namespace = "sentinel";

        let files_scanned_total = counter(namespace, "files_scanned_total", "Total files observed by enumeration drivers")?;
        let files_matched_total = counter(namespace, "files_matched_total", "Total files that matched a rule")?;
        let files_deduped_total = counter(namespace, "files_deduped_total", "Total observations short-circuited by content dedup")?;
        let bytes_fetched_total = counter(namespace, "bytes_fetched_total", "Total bytes transferred for content inspection")?;
        let archives_expanded_total = counter(namespace, "archives_expanded_total", "Total archive containers opened")?;
        let enumeration_errors_total = counter(namespace, "enumeration_errors_total", "Total per-host enumeration failures")?;

        let active_workers = IntGauge::with_opts(Opts::new("active_workers", "Analyzer worker tasks currently running").namespace(namespace))
            .map_err(|e| HunterError::internal_error(format!("failed to create active_workers metric: {e}")))?;

        for metric in [&files_scanned_total, &files_matched_total, &files_deduped_total, &bytes_fetched_total, &archives_expanded_total, &enumeration_errors_total] {
            registry.register(Box::new(metric.clone())).map_err(|e| HunterError::internal_error(format!("failed to register counter: {e}")))?;
        }
        registry.register(Box::new(active_workers.clone())).map_err(|e| HunterError::internal_error(format!("failed to register active_workers: {e}")))?;

        Ok(Self {
            registry: Arc::new(registry),
            files_scanned_total,
            files_matched_total,
            files_deduped_total,
            bytes_fetched_total,
            archives_expanded_total,
            enumeration_errors_total,
            active_workers,
        })
    }

    pub fn registry(&self) -> Arc<Registry> {
        self.registry.clone()
    }
}

fn counter(namespace: &str, name: &str, help: &str) -> Result<IntCounter, HunterError> {
    IntCounter::with_opts(Opts::new(name, help).namespace(namespace)).map_err(|e| HunterError::internal_error(format!("failed to create {name} metric: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counters_start_at_zero() {
        let metrics = CollectionMetrics::new().unwrap();
        assert_eq!(metrics.files_scanned_total.get(), 0);
    }

    #[test]
    fn incrementing_a_counter_is_reflected_in_the_registry() {
        let metrics = CollectionMetrics::new().unwrap();
        metrics.files_matched_total.inc();
        let families = metrics.registry().gather();
        let matched = families.iter().find(|f| f.name() == "sentinel_files_matched_total").unwrap();
        assert_eq!(matched.get_metric()[0].get_counter().value(), 1.0);
    }
}
