use serde::{Deserialize, Serialize};

use crate::attachment::Attachment;
use crate::de::null_as_default;
use crate::project::Project;

/// One search hit, as projected by
/// `fields=idReadable,project(name),attachments(id,size,created,updated)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    #[serde(rename = "idReadable")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub project: Project,
    #[serde(default, deserialize_with = "null_as_default")]
    pub attachments: Vec<Attachment>,
}

impl Issue {
    pub fn project_name(&self) -> &str {
        &self.project.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_tracker_payload() {
        let json = r#"[
            {
                "idReadable": "OPS-12",
                "project": {"name": "Operations", "$type": "Project"},
                "attachments": [
                    {"id": "8-100", "size": 2048, "created": 1500000000000, "updated": 1500000001000, "$type": "IssueAttachment"}
                ],
                "$type": "Issue"
            },
            {"idReadable": "OPS-13", "project": {"name": "Operations"}}
        ]"#;

        let issues: Vec<Issue> = serde_json::from_str(json).unwrap();
        assert_eq!(issues.len(), 2);
        assert_eq!(issues[0].id, "OPS-12");
        assert_eq!(issues[0].project_name(), "Operations");
        assert_eq!(issues[0].attachments.len(), 1);
        assert_eq!(issues[0].attachments[0].size, 2048);
        assert!(issues[1].attachments.is_empty());
    }

    #[test]
    fn missing_project_defaults_to_empty_name() {
        let issue: Issue = serde_json::from_str(r#"{"idReadable": "X-1"}"#).unwrap();
        assert_eq!(issue.project_name(), "");
    }

    #[test]
    fn null_project_and_attachments_default() {
        let issue: Issue = serde_json::from_str(
            r#"{"idReadable": "X-1", "project": null, "attachments": null}"#,
        )
        .unwrap();
        assert_eq!(issue.project_name(), "");
        assert!(issue.attachments.is_empty());

        let issue: Issue = serde_json::from_str(
            r#"{"idReadable": "X-2", "project": {"name": null}, "attachments": []}"#,
        )
        .unwrap();
        assert_eq!(issue.project_name(), "");
    }

    #[test]
    fn rejects_missing_id() {
        let result = serde_json::from_str::<Issue>(r#"{"project": {"name": "A"}}"#);
        assert!(result.is_err());
    }
}
