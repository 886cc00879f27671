use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BuildOutcome {
    Success,
    Unstable,
    Failure,
    NotBuilt,
    Aborted,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestSummary {
    pub total_count: usize,
    pub skip_count: usize,
    pub fail_count: usize,
    pub failed_tests: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildRecord {
    pub id: String,
    pub result: Option<BuildOutcome>,
    pub project_name: String,
    pub display_name: String,
    pub full_display_name: String,
    pub description: Option<String>,
    pub url: String,
    pub build_host: String,
    pub build_label: String,
    pub build_num: u32,
    pub build_duration: i64,
    pub timestamp: String,
    pub root_project_name: String,
    pub root_project_display_name: String,
    pub root_build_num: u32,
    pub build_variables: IndexMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub redacted_keys: Option<Vec<String>>,
    pub test_results: TestSummary,
    pub location: String,
    pub department: String,
    pub appname: String,
    pub version: String,
    pub subsys: String,
    pub jobsuffix: String,
    pub jobtype: String,
    pub jobenv: String,
    pub msgappname: String,
    pub msgdate: String,
    pub msgtime: String,
}
