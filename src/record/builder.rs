use chrono::{DateTime, Utc};
use log::debug;

use super::naming::{self, NamingConvention};
use super::timefmt;
use super::variables;
use crate::event::BuildEvent;
use crate::models::{BuildRecord, TestSummary};

/// Process-level configuration, fixed before the first record is built and
/// shared read-only across invocations.
#[derive(Debug, Clone)]
pub struct RecordConfig {
    pub convention: NamingConvention,
    /// Ship the sorted list of keys that were redacted (never their values).
    pub include_redacted_keys: bool,
    /// Host/label reported when the build ran on the controller itself or the
    /// assigned node reports blank identity.
    pub controller_fallback: String,
}

impl Default for RecordConfig {
    fn default() -> Self {
        RecordConfig {
            convention: NamingConvention::default(),
            include_redacted_keys: false,
            controller_fallback: "master".to_string(),
        }
    }
}

pub struct BuildRecordBuilder {
    config: RecordConfig,
}

impl BuildRecordBuilder {
    pub fn new(config: RecordConfig) -> Self {
        BuildRecordBuilder { config }
    }

    /// Turns one build-completion event into an enriched, immutable record.
    ///
    /// Total: missing host data defaults, names outside the convention decode
    /// to empty fields, and a timestamp that fails to reparse degrades to
    /// empty message fields. Nothing here aborts record construction.
    ///
    /// `reference_time` is supplied by the caller; the builder never reads a
    /// clock, so durations are deterministic under test.
    pub fn build(&self, event: &dyn BuildEvent, reference_time: DateTime<Utc>) -> BuildRecord {
        let timestamp = timefmt::format_timestamp(event.started_at());
        let build_duration = (reference_time - event.started_at()).num_milliseconds();

        let (build_host, build_label) = self.node_identity(event);

        // Zero counts when the event carries no test data; the field is
        // always present on the record, never omitted.
        let test_results = event
            .test_counts()
            .map(|counts| TestSummary {
                total_count: counts.total_count,
                skip_count: counts.skip_count,
                fail_count: counts.fail_count,
                failed_tests: counts.failed_tests.clone(),
            })
            .unwrap_or_default();

        let (build_variables, redacted) = variables::merge_variables(
            event.build_variables().clone(),
            event.environments(),
            event.sensitive_variables(),
        );

        let fields = naming::decode(event.project_name(), &self.config.convention);
        let message = timefmt::message_timestamps(&timestamp).unwrap_or_default();

        debug!(
            "Built record for {} #{} ({} variables, {} redacted)",
            event.project_name(),
            event.build_num(),
            build_variables.len(),
            redacted.len()
        );

        // A build with no parent chain is its own root
        let root = event.root_build();

        BuildRecord {
            id: event.id().to_string(),
            result: event.outcome(),
            project_name: event.project_name().to_string(),
            display_name: event.display_name().to_string(),
            full_display_name: event.full_display_name().to_string(),
            description: event.description().map(str::to_string),
            url: event.url().to_string(),
            build_host,
            build_label,
            build_num: event.build_num(),
            build_duration,
            timestamp,
            root_project_name: root
                .map(|r| r.project_name.clone())
                .unwrap_or_else(|| event.project_name().to_string()),
            root_project_display_name: root
                .map(|r| r.display_name.clone())
                .unwrap_or_else(|| event.display_name().to_string()),
            root_build_num: root.map(|r| r.build_num).unwrap_or_else(|| event.build_num()),
            build_variables,
            redacted_keys: self.config.include_redacted_keys.then_some(redacted),
            test_results,
            msgappname: fields.appname.clone(),
            location: fields.location,
            department: fields.department,
            appname: fields.appname,
            version: fields.version,
            subsys: fields.subsys,
            jobsuffix: fields.jobsuffix,
            jobtype: fields.jobtype,
            jobenv: fields.jobenv,
            msgdate: message.date,
            msgtime: message.time,
        }
    }

    fn node_identity(&self, event: &dyn BuildEvent) -> (String, String) {
        let fallback = self.config.controller_fallback.as_str();
        match event.node() {
            None => (fallback.to_string(), fallback.to_string()),
            Some(node) => (
                non_blank_or(&node.name, fallback),
                non_blank_or(&node.label, fallback),
            ),
        }
    }
}

fn non_blank_or(value: &str, fallback: &str) -> String {
    if value.trim().is_empty() {
        fallback.to_string()
    } else {
        value.to_string()
    }
}
