use indexmap::IndexMap;
use serde::Deserialize;

/// Project-name convention: which codes map to which organizational labels.
/// The defaults match the convention the log pipeline was built around; a
/// deployment can override any part of it from a JSON file.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NamingConvention {
    pub locations: IndexMap<String, String>,
    pub departments: IndexMap<String, String>,
    pub app_prefix: String,
    /// Ordered (marker, label) pairs, first match wins. Order matters:
    /// `_analysis_routine` must be listed before its `_analysis` prefix.
    pub job_types: Vec<(String, String)>,
    /// Ordered (suffix, label) pairs matched case-sensitively against the
    /// end of the project name.
    pub job_envs: Vec<(String, String)>,
}

impl Default for NamingConvention {
    fn default() -> Self {
        NamingConvention {
            locations: table(&[
                ("HZ", "杭州"),
                ("SH", "上海"),
                ("GZ", "广州"),
                ("BJ", "北京"),
                ("ZH", "珠海"),
            ]),
            departments: table(&[
                ("KF1", "开发一部"),
                ("KF2", "开发二部"),
                ("KF3", "开发三部"),
                ("KF4", "开发四部"),
                ("KF5", "开发五部"),
                ("CS", "测试部"),
                ("YFZC", "研发支持部"),
            ]),
            app_prefix: "F-".to_string(),
            job_types: pairs(&[
                ("_build", "Build"),
                ("_deploy", "Deploy"),
                ("_analysis_routine", "Analysis_ROUTINE"),
                ("_analysis", "Analysis"),
                ("_plsqlcoverage", "PLSQLCoverage"),
            ]),
            job_envs: pairs(&[
                ("_GN", "功能"),
                ("_LC", "流程"),
                ("_YC", "压测"),
                ("_YX", "移行"),
                ("_FB", "封版"),
            ]),
        }
    }
}

fn table(entries: &[(&str, &str)]) -> IndexMap<String, String> {
    entries
        .iter()
        .map(|(code, label)| (code.to_string(), label.to_string()))
        .collect()
}

fn pairs(entries: &[(&str, &str)]) -> Vec<(String, String)> {
    entries
        .iter()
        .map(|(marker, label)| (marker.to_string(), label.to_string()))
        .collect()
}

/// Organizational metadata decoded from an underscore-delimited project name.
/// Every field is empty when the name does not fit the convention.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NamingFields {
    pub location: String,
    pub department: String,
    pub appname: String,
    pub version: String,
    pub subsys: String,
    pub jobsuffix: String,
    pub jobtype: String,
    pub jobenv: String,
}

/// Decodes `project_name` against the convention. Pure function of the name;
/// never fails, a name outside the convention yields empty fields.
pub fn decode(project_name: &str, convention: &NamingConvention) -> NamingFields {
    let segments: Vec<&str> = project_name.split('_').collect();
    if segments.len() < 4 {
        return NamingFields::default();
    }

    let mut fields = NamingFields {
        location: lookup_or_verbatim(&convention.locations, segments[0]),
        department: lookup_or_verbatim(&convention.departments, segments[1]),
        appname: format!("{}{}", convention.app_prefix, segments[2]),
        version: segments[3].to_string(),
        ..NamingFields::default()
    };

    if segments.len() >= 5 {
        let (subsys, jobsuffix) = split_subsystem(project_name, &segments);
        fields.subsys = subsys;
        fields.jobsuffix = jobsuffix;
        fields.jobtype = classify_job_type(project_name, &convention.job_types);
        fields.jobenv = classify_job_env(project_name, &convention.job_envs);
    }

    fields
}

// Unmapped codes pass through verbatim
fn lookup_or_verbatim(table: &IndexMap<String, String>, code: &str) -> String {
    table.get(code).cloned().unwrap_or_else(|| code.to_string())
}

fn split_subsystem(project_name: &str, segments: &[&str]) -> (String, String) {
    let fifth = segments[4];
    if fifth.starts_with('{') && fifth.ends_with('}') {
        let subsys = fifth[1..fifth.len() - 1].to_string();
        // Suffix is everything past the first closing brace plus one
        // separator. A name that stops at the brace degrades to an empty
        // suffix rather than slicing out of range.
        let jobsuffix = project_name
            .find('}')
            .and_then(|idx| project_name.get(idx + 2..))
            .unwrap_or("")
            .to_string();
        (subsys, jobsuffix)
    } else {
        // Remainder after the first four segments and their separators
        let prefix_len = segments[..4].iter().map(|s| s.len()).sum::<usize>() + 4;
        let jobsuffix = project_name.get(prefix_len..).unwrap_or("").to_string();
        (String::new(), jobsuffix)
    }
}

// A marker that begins the name is not a match; the name must carry at least
// one leading segment before the marker.
fn classify_job_type(project_name: &str, markers: &[(String, String)]) -> String {
    let lowered = project_name.to_lowercase();
    markers
        .iter()
        .find(|(marker, _)| {
            matches!(lowered.find(marker.to_lowercase().as_str()), Some(pos) if pos > 0)
        })
        .map(|(_, label)| label.clone())
        .unwrap_or_default()
}

fn classify_job_env(project_name: &str, codes: &[(String, String)]) -> String {
    codes
        .iter()
        .find(|(code, _)| project_name.ends_with(code.as_str()))
        .map(|(_, label)| label.clone())
        .unwrap_or_default()
}
