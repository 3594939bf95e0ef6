/// Field projection requested on every search.
pub const ISSUE_FIELDS: &str = "idReadable,project(name),attachments(id,size,created,updated)";

/// Search parameters that stay fixed across pages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssueQuery {
    /// Allow-list of project names. Empty means every project.
    pub projects: Vec<String>,
    pub page_size: usize,
}

impl IssueQuery {
    pub fn new(projects: Vec<String>, page_size: usize) -> Self {
        let projects = projects
            .into_iter()
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty())
            .collect();
        Self {
            projects,
            page_size,
        }
    }

    /// `project:+A,B`, or empty when no filter is set. Names are
    /// form-encoded; multi-word names use the tracker's `{Name With Spaces}`
    /// syntax.
    pub fn project_clause(&self) -> String {
        if self.projects.is_empty() {
            String::new()
        } else {
            let names: Vec<String> = self.projects.iter().map(|p| encode_project(p)).collect();
            format!("project:+{}", names.join(","))
        }
    }

    /// Query string for the page starting at `skip`. The first page omits
    /// `$skip` entirely.
    pub fn query_string(&self, skip: usize) -> String {
        let skip = if skip > 0 {
            format!("&$skip={skip}")
        } else {
            String::new()
        };
        format!(
            "fields={ISSUE_FIELDS}&$top={}{skip}&query={}+has:+attachments",
            self.page_size,
            self.project_clause()
        )
    }

    /// Whether an issue from `project` passes the local filter.
    pub fn includes_project(&self, project: &str) -> bool {
        self.projects.is_empty() || self.projects.iter().any(|p| p == project)
    }

    /// Human-readable scope for the report header.
    pub fn scope_label(&self) -> String {
        if self.projects.is_empty() {
            "all projects".to_string()
        } else {
            self.projects.join(",")
        }
    }
}

fn encode_project(name: &str) -> String {
    let term = if name.contains(|c: char| c.is_whitespace() || c == ',') {
        format!("{{{name}}}")
    } else {
        name.to_string()
    };
    url::form_urlencoded::byte_serialize(term.as_bytes()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_page_has_no_skip() {
        let q = IssueQuery::new(vec![], 16000);
        assert_eq!(
            q.query_string(0),
            "fields=idReadable,project(name),attachments(id,size,created,updated)\
             &$top=16000&query=+has:+attachments"
        );
    }

    #[test]
    fn later_pages_carry_skip() {
        let q = IssueQuery::new(vec![], 50);
        assert!(q.query_string(100).contains("&$top=50&$skip=100&"));
    }

    #[test]
    fn project_filter_becomes_clause() {
        let q = IssueQuery::new(vec!["OPS".into(), " WEB ".into(), String::new()], 10);
        assert_eq!(q.projects, vec!["OPS", "WEB"]);
        assert_eq!(q.project_clause(), "project:+OPS,WEB");
        assert!(q
            .query_string(0)
            .ends_with("&query=project:+OPS,WEB+has:+attachments"));
    }

    #[test]
    fn project_names_are_encoded() {
        let q = IssueQuery::new(vec!["Web Site".into(), "R&D".into(), "C#".into()], 10);
        assert_eq!(
            q.project_clause(),
            "project:+%7BWeb+Site%7D,R%26D,C%23"
        );
        // the local filter still compares raw names
        assert!(q.includes_project("Web Site"));
        assert_eq!(q.scope_label(), "Web Site,R&D,C#");
    }

    #[test]
    fn local_filter_matches_exact_names() {
        let q = IssueQuery::new(vec!["OPS".into()], 10);
        assert!(q.includes_project("OPS"));
        assert!(!q.includes_project("OP"));
        assert!(!q.includes_project("DEVOPS"));
        assert!(IssueQuery::new(vec![], 10).includes_project("anything"));
    }

    #[test]
    fn scope_label() {
        assert_eq!(IssueQuery::new(vec![], 1).scope_label(), "all projects");
        assert_eq!(
            IssueQuery::new(vec!["A".into(), "B".into()], 1).scope_label(),
            "A,B"
        );
    }
}
