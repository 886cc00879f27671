use std::collections::BTreeSet;

use indexmap::IndexMap;

pub type VariableMap = IndexMap<String, String>;

/// Folds the environment contributions into the build's own variables, in
/// declared order with later contributions overriding earlier keys, then
/// strips every sensitive key. Redaction runs after all merges so a sensitive
/// key reintroduced by a later contribution is still removed.
///
/// Returns the final map and the sorted keys that were actually removed.
pub fn merge_variables(
    base: VariableMap,
    environments: &[Option<VariableMap>],
    sensitive_keys: &BTreeSet<String>,
) -> (VariableMap, Vec<String>) {
    let mut merged = base;
    for contribution in environments.iter().flatten() {
        merged.extend(
            contribution
                .iter()
                .map(|(key, value)| (key.clone(), value.clone())),
        );
    }

    let mut redacted: Vec<String> = Vec::new();
    for key in sensitive_keys {
        if merged.shift_remove(key).is_some() {
            redacted.push(key.clone());
        }
    }

    (merged, redacted)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(entries: &[(&str, &str)]) -> VariableMap {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn keys(entries: &[&str]) -> BTreeSet<String> {
        entries.iter().map(|k| k.to_string()).collect()
    }

    #[test]
    fn test_later_contributions_override_earlier_keys() {
        let base = vars(&[("BRANCH", "main"), ("STAGE", "build")]);
        let environments = vec![
            Some(vars(&[("STAGE", "deploy")])),
            Some(vars(&[("STAGE", "verify"), ("NODE", "agent-7")])),
        ];

        let (merged, _) = merge_variables(base, &environments, &BTreeSet::new());

        assert_eq!(merged.get("BRANCH").map(String::as_str), Some("main"));
        assert_eq!(merged.get("STAGE").map(String::as_str), Some("verify"));
        assert_eq!(merged.get("NODE").map(String::as_str), Some("agent-7"));
    }

    #[test]
    fn test_missing_contribution_is_skipped() {
        let base = vars(&[("BRANCH", "main")]);
        let environments = vec![None, Some(vars(&[("NODE", "agent-7")]))];

        let (merged, _) = merge_variables(base, &environments, &BTreeSet::new());

        assert_eq!(merged.len(), 2);
        assert_eq!(merged.get("NODE").map(String::as_str), Some("agent-7"));
    }

    #[test]
    fn test_sensitive_keys_are_removed() {
        let base = vars(&[("BRANCH", "main"), ("API_TOKEN", "hunter2")]);

        let (merged, redacted) = merge_variables(base, &[], &keys(&["API_TOKEN"]));

        assert!(!merged.contains_key("API_TOKEN"));
        assert_eq!(redacted, vec!["API_TOKEN".to_string()]);
    }

    #[test]
    fn test_redaction_runs_after_all_merges() {
        let base = vars(&[("BRANCH", "main")]);
        // A later contribution reintroduces the sensitive key
        let environments = vec![Some(vars(&[("API_TOKEN", "hunter2")]))];

        let (merged, redacted) = merge_variables(base, &environments, &keys(&["API_TOKEN"]));

        assert!(!merged.contains_key("API_TOKEN"));
        assert_eq!(redacted, vec!["API_TOKEN".to_string()]);
    }

    #[test]
    fn test_absent_sensitive_keys_are_not_reported() {
        let base = vars(&[("BRANCH", "main")]);

        let (merged, redacted) = merge_variables(base, &[], &keys(&["NEVER_SET"]));

        assert_eq!(merged.len(), 1);
        assert!(redacted.is_empty());
    }

    #[test]
    fn test_redacted_keys_are_sorted() {
        let base = vars(&[("ZZZ_SECRET", "z"), ("AAA_SECRET", "a")]);

        let (_, redacted) =
            merge_variables(base, &[], &keys(&["ZZZ_SECRET", "AAA_SECRET"]));

        assert_eq!(
            redacted,
            vec!["AAA_SECRET".to_string(), "ZZZ_SECRET".to_string()]
        );
    }
}
