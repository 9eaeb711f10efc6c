//! Launch configuration: associations, openers, fallbacks.
//!
//! Everything the launcher consults lives in one value that callers
//! pass in, so tests and embedders can swap programs freely.

/// Maps file extensions to an opener program.
#[derive(Debug, Clone)]
pub struct Association {
    /// Extensions without the leading dot, matched case-insensitively.
    pub extensions: Vec<String>,
    pub program: String,
    /// Arguments inserted before the target.
    pub args: Vec<String>,
    /// Open the file's parent directory instead of the file itself
    /// (project files whose program wants the project root).
    pub open_parent: bool,
}

impl Association {
    pub fn new(extensions: &[&str], program: &str, args: &[&str]) -> Self {
        Self {
            extensions: extensions.iter().map(|s| s.to_string()).collect(),
            program: program.to_string(),
            args: args.iter().map(|s| s.to_string()).collect(),
            open_parent: false,
        }
    }

    pub fn matches(&self, extension: &str) -> bool {
        self.extensions
            .iter()
            .any(|e| e.eq_ignore_ascii_case(extension))
    }
}

#[derive(Debug, Clone)]
pub struct LaunchConfig {
    pub associations: Vec<Association>,
    /// Editor used when no association applies.
    pub default_editor: String,
    /// Candidate commands for opening a directory, tried in order.
    pub dir_openers: Vec<Vec<String>>,
    /// Generic open commands used for URLs and as a last resort.
    pub open_fallbacks: Vec<Vec<String>>,
    /// Program names that identify this tool, for the recursion guard.
    pub self_names: Vec<String>,
}

impl Default for LaunchConfig {
    fn default() -> Self {
        let mut project = Association::new(&["nja"], "ninja-ide", &["-p"]);
        project.open_parent = true;
        Self {
            associations: vec![
                Association::new(&["kdbx"], "keepassxc", &[]),
                Association::new(&["py"], "python3", &[]),
                project,
                Association::new(&["ods", "csv"], "libreoffice", &["--calc"]),
                Association::new(&["pdf"], "evince", &[]),
            ],
            default_editor: "geany".to_string(),
            dir_openers: vec![
                vec!["xdg-open".to_string()],
                vec!["open".to_string()],
                vec!["nautilus".to_string()],
            ],
            open_fallbacks: vec![
                vec!["xdg-open".to_string()],
                vec!["open".to_string()],
                vec!["gio".to_string(), "open".to_string()],
            ],
            self_names: vec!["blnk".to_string()],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_match_is_case_insensitive() {
        let assoc = Association::new(&["pdf"], "evince", &[]);
        assert!(assoc.matches("PDF"));
        assert!(assoc.matches("pdf"));
        assert!(!assoc.matches("ps"));
    }

    #[test]
    fn default_config_has_project_file_special_case() {
        let config = LaunchConfig::default();
        let project = config
            .associations
            .iter()
            .find(|a| a.matches("nja"))
            .unwrap();
        assert!(project.open_parent);
    }
}
