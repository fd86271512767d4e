use std::fmt;

/// Kind of project recognised by its marker file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectType {
    AnsibleCollection,
    Python,
    Helm,
    Docker,
}

impl ProjectType {
    /// Detection priority, highest first.
    pub const ALL: [ProjectType; 4] = [
        ProjectType::AnsibleCollection,
        ProjectType::Python,
        ProjectType::Helm,
        ProjectType::Docker,
    ];

    pub fn marker(&self) -> &'static str {
        match self {
            ProjectType::AnsibleCollection => "galaxy.yml",
            ProjectType::Python => "pyproject.toml",
            ProjectType::Helm => "Chart.yaml",
            ProjectType::Docker => "Dockerfile",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ProjectType::AnsibleCollection => "Ansible Collection",
            ProjectType::Python => "Python",
            ProjectType::Helm => "Helm",
            ProjectType::Docker => "Docker",
        }
    }

    /// Default file carrying the version; always the marker itself.
    pub fn target_file(&self) -> &'static str {
        self.marker()
    }

    /// Default line pattern for the target file.
    pub fn version_pattern(&self) -> &'static str {
        match self {
            ProjectType::AnsibleCollection | ProjectType::Helm => r"^version:.*$",
            ProjectType::Python => r#"^version\s*=\s*".*"$"#,
            ProjectType::Docker => r#"LABEL version=".*"$"#,
        }
    }
}

impl fmt::Display for ProjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Returns the first project type whose marker file exists.
pub fn detect(exists: impl Fn(&str) -> bool) -> Option<ProjectType> {
    ProjectType::ALL
        .into_iter()
        .find(|project| exists(project.marker()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn present(files: &'static [&'static str]) -> impl Fn(&str) -> bool {
        move |name| files.contains(&name)
    }

    #[test]
    fn test_detect_ansible_beats_python() {
        let detected = detect(present(&["pyproject.toml", "galaxy.yml"]));
        assert_eq!(detected, Some(ProjectType::AnsibleCollection));
    }

    #[test]
    fn test_detect_python_beats_helm_and_docker() {
        let detected = detect(present(&["Dockerfile", "Chart.yaml", "pyproject.toml"]));
        assert_eq!(detected, Some(ProjectType::Python));
    }

    #[test]
    fn test_detect_helm_beats_docker() {
        assert_eq!(
            detect(present(&["Dockerfile", "Chart.yaml"])),
            Some(ProjectType::Helm)
        );
    }

    #[test]
    fn test_detect_docker_only() {
        let project = detect(present(&["Dockerfile"])).unwrap();
        assert_eq!(project.target_file(), "Dockerfile");
        assert_eq!(project.version_pattern(), r#"LABEL version=".*"$"#);
        assert_eq!(project.to_string(), "Docker");
    }

    #[test]
    fn test_detect_none() {
        assert_eq!(detect(present(&["README.md", "Cargo.toml"])), None);
    }

    #[test]
    fn test_python_pattern() {
        assert_eq!(
            ProjectType::Python.version_pattern(),
            r#"^version\s*=\s*".*"$"#
        );
    }
}
