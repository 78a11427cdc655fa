//! Compilation options.

/// Default ceiling on capture groups in one compiled pattern.
///
/// Datetime fields use up to ten groups each, so a template with about a
/// dozen of them reaches this.
pub const DEFAULT_MAX_GROUPS: usize = 100;

/// Options controlling how a template is compiled.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompileOptions {
    /// Match literal text and character classes with exact letter case.
    /// Defaults to `false`.
    pub case_sensitive: bool,

    /// Maximum number of capture groups the generated pattern may use.
    /// `None` removes the ceiling. Defaults to [`DEFAULT_MAX_GROUPS`].
    pub max_groups: Option<usize>,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            case_sensitive: false,
            max_groups: Some(DEFAULT_MAX_GROUPS),
        }
    }
}

impl CompileOptions {
    /// Create options with the specified case sensitivity.
    pub fn with_case_sensitive(case_sensitive: bool) -> Self {
        Self {
            case_sensitive,
            ..Default::default()
        }
    }

    /// Create options with the specified group ceiling.
    pub fn with_max_groups(max_groups: Option<usize>) -> Self {
        Self {
            max_groups,
            ..Default::default()
        }
    }
}
