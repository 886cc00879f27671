use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::Deserialize;

use crate::models::BuildOutcome;

/// Read-only capability bundle over a finished build, as supplied by the host
/// automation system. The builder consumes any implementation; ownership of
/// the produced record never refers back to the event.
pub trait BuildEvent {
    fn id(&self) -> &str;
    fn outcome(&self) -> Option<BuildOutcome>;
    fn project_name(&self) -> &str;
    fn display_name(&self) -> &str;
    fn full_display_name(&self) -> &str;
    fn description(&self) -> Option<&str>;
    fn url(&self) -> &str;
    fn build_num(&self) -> u32;
    fn started_at(&self) -> DateTime<Utc>;
    fn node(&self) -> Option<&NodeSnapshot>;
    fn root_build(&self) -> Option<&RootBuildRef>;
    fn test_counts(&self) -> Option<&TestCounts>;
    fn build_variables(&self) -> &IndexMap<String, String>;
    fn environments(&self) -> &[Option<IndexMap<String, String>>];
    fn sensitive_variables(&self) -> &BTreeSet<String>;
}

#[derive(Debug, Clone, Deserialize)]
pub struct NodeSnapshot {
    pub name: String,
    pub label: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RootBuildRef {
    pub project_name: String,
    pub display_name: String,
    pub build_num: u32,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestCounts {
    pub total_count: usize,
    pub skip_count: usize,
    pub fail_count: usize,
    #[serde(default)]
    pub failed_tests: Vec<String>,
}

/// Concrete event consumed by the CLI: one JSON document written by the host
/// at notification time. Collection fields default to empty when missing;
/// a `null` entry in `environments` marks a provider that contributed nothing.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventSnapshot {
    pub id: String,
    pub result: Option<BuildOutcome>,
    pub project_name: String,
    pub display_name: String,
    pub full_display_name: String,
    pub description: Option<String>,
    pub url: String,
    pub build_num: u32,
    pub started_at: DateTime<Utc>,
    pub node: Option<NodeSnapshot>,
    pub root_build: Option<RootBuildRef>,
    pub test_result: Option<TestCounts>,
    #[serde(default)]
    pub build_variables: IndexMap<String, String>,
    #[serde(default)]
    pub environments: Vec<Option<IndexMap<String, String>>>,
    #[serde(default)]
    pub sensitive_variables: BTreeSet<String>,
}

impl BuildEvent for EventSnapshot {
    fn id(&self) -> &str {
        &self.id
    }

    fn outcome(&self) -> Option<BuildOutcome> {
        self.result
    }

    fn project_name(&self) -> &str {
        &self.project_name
    }

    fn display_name(&self) -> &str {
        &self.display_name
    }

    fn full_display_name(&self) -> &str {
        &self.full_display_name
    }

    fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    fn url(&self) -> &str {
        &self.url
    }

    fn build_num(&self) -> u32 {
        self.build_num
    }

    fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    fn node(&self) -> Option<&NodeSnapshot> {
        self.node.as_ref()
    }

    fn root_build(&self) -> Option<&RootBuildRef> {
        self.root_build.as_ref()
    }

    fn test_counts(&self) -> Option<&TestCounts> {
        self.test_result.as_ref()
    }

    fn build_variables(&self) -> &IndexMap<String, String> {
        &self.build_variables
    }

    fn environments(&self) -> &[Option<IndexMap<String, String>>] {
        &self.environments
    }

    fn sensitive_variables(&self) -> &BTreeSet<String> {
        &self.sensitive_variables
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_deserializes_with_minimal_fields() {
        let snapshot: EventSnapshot = serde_json::from_str(
            r##"{
                "id": "2024-01-15_10-30-00",
                "result": "SUCCESS",
                "projectName": "HZ_KF1_Portal_202401",
                "displayName": "#42",
                "fullDisplayName": "HZ_KF1_Portal_202401 #42",
                "url": "job/HZ_KF1_Portal_202401/42/",
                "buildNum": 42,
                "startedAt": "2024-01-15T10:30:00Z"
            }"##,
        )
        .expect("should deserialize");

        assert_eq!(snapshot.result, Some(BuildOutcome::Success));
        assert!(snapshot.description.is_none());
        assert!(snapshot.node.is_none());
        assert!(snapshot.root_build.is_none());
        assert!(snapshot.test_result.is_none());
        assert!(snapshot.build_variables.is_empty());
        assert!(snapshot.environments.is_empty());
        assert!(snapshot.sensitive_variables.is_empty());
    }

    #[test]
    fn test_snapshot_null_environment_entries_survive() {
        let snapshot: EventSnapshot = serde_json::from_str(
            r##"{
                "id": "1",
                "result": null,
                "projectName": "standalone-job",
                "displayName": "#1",
                "fullDisplayName": "standalone-job #1",
                "url": "job/standalone-job/1/",
                "buildNum": 1,
                "startedAt": "2024-01-15T10:30:00Z",
                "environments": [null, {"NODE": "agent-7"}]
            }"##,
        )
        .expect("should deserialize");

        assert_eq!(snapshot.environments.len(), 2);
        assert!(snapshot.environments[0].is_none());
        assert!(snapshot.environments[1].is_some());
    }

    #[test]
    fn test_outcome_uses_host_result_spelling() {
        let outcome: BuildOutcome = serde_json::from_str(r#""NOT_BUILT""#).expect("should parse");
        assert_eq!(outcome, BuildOutcome::NotBuilt);
    }
}
