//! Version identity for one side of a bump.

/// Level, release letter, and (optionally) the public platform version of a
/// single release. Constructed once from the command line and read-only
/// afterwards; a run carries two of these (current and next).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionIdentity {
    level: String,
    letter: String,
    platform_version: Option<String>,
}

impl VersionIdentity {
    pub fn new(
        level: impl Into<String>,
        letter: impl Into<String>,
        platform_version: Option<String>,
    ) -> Self {
        Self {
            level: level.into(),
            letter: letter.into(),
            platform_version,
        }
    }

    /// The VINTF level, e.g. `202504`.
    pub fn level(&self) -> &str {
        &self.level
    }

    /// Release letter as used for kernel-config directories, e.g. `w`.
    pub fn letter_lower(&self) -> String {
        self.letter.to_lowercase()
    }

    /// Release letter as used for libvintf `Level` enumerators, e.g. `W`.
    pub fn letter_upper(&self) -> String {
        self.letter.to_uppercase()
    }

    /// Public platform version, e.g. `15`. Absent when the release has not
    /// been assigned one yet.
    pub fn platform_version(&self) -> Option<&str> {
        self.platform_version.as_deref()
    }

    /// Soong module name, e.g. `framework_compatibility_matrix.202504.xml`.
    pub fn module_name(&self) -> String {
        format!("framework_compatibility_matrix.{}.xml", self.level)
    }

    /// Matrix source file name, e.g. `compatibility_matrix.202504.xml`.
    pub fn matrix_file_name(&self) -> String {
        format!("compatibility_matrix.{}.xml", self.level)
    }
}

#[cfg(test)]
mod tests {
    use super::VersionIdentity;

    #[test]
    fn derived_names_follow_the_level() {
        let id = VersionIdentity::new("202504", "w", None);
        assert_eq!(id.module_name(), "framework_compatibility_matrix.202504.xml");
        assert_eq!(id.matrix_file_name(), "compatibility_matrix.202504.xml");
    }

    #[test]
    fn letter_case_helpers() {
        let id = VersionIdentity::new("202404", "v", Some("15".to_string()));
        assert_eq!(id.letter_lower(), "v");
        assert_eq!(id.letter_upper(), "V");
        assert_eq!(id.platform_version(), Some("15"));
    }
}
