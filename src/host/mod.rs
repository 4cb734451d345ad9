//! Host-facing export of collected model errors.
//!
//! An editor host surfaces the error list as task/problem entries keyed by
//! the originating node and its document. This module flattens the
//! per-artifact error lists into serializable entries; the host decides
//! presentation.

use serde::Serialize;

use crate::model::{ArtifactSet, ModelError, Severity};

/// One problem entry for a host task list.
#[derive(Debug, Clone, Serialize)]
pub struct TaskEntry {
    /// Path of the owning document, if it was loaded from disk.
    pub path: Option<String>,
    /// Display name of the originating node; `None` for document-level
    /// problems.
    pub node: Option<String>,
    pub severity: &'static str,
    pub code: &'static str,
    pub message: String,
}

fn severity_label(severity: Severity) -> &'static str {
    match severity {
        Severity::Error => "error",
        Severity::Warning => "warning",
    }
}

fn entry(set: &ArtifactSet, path: Option<&std::path::PathBuf>, error: &ModelError) -> TaskEntry {
    TaskEntry {
        path: path.map(|p| p.display().to_string()),
        node: error.node.map(|n| set.non_localized_display_name(n)),
        severity: severity_label(error.severity),
        code: error.code,
        message: error.message.clone(),
    }
}

/// Flatten every artifact's error list into task entries, artifact order
/// first, collection order within an artifact.
pub fn task_list(set: &ArtifactSet) -> Vec<TaskEntry> {
    let mut out = Vec::new();
    for artifact in set.artifacts() {
        for error in artifact.errors().all() {
            out.push(entry(set, artifact.path(), error));
        }
    }
    out
}

/// The task list as a JSON string, for hosts consuming errors over a pipe.
pub fn task_list_json(set: &ArtifactSet) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&task_list(set))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_list_carries_codes() {
        let mut set = ArtifactSet::new();
        set.add_artifact_str(
            r#"<Schema Namespace="M"><Bogus/></Schema>"#,
            Some("model.csdl".into()),
        )
        .unwrap();
        set.process_all();

        let tasks = task_list(&set);
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].code, crate::core::error_codes::UNRECOGNIZED_ELEMENT);
        assert_eq!(tasks[0].severity, "error");
        assert_eq!(tasks[0].path.as_deref(), Some("model.csdl"));

        let json = task_list_json(&set).unwrap();
        assert!(json.contains("E0101"));
    }
}
