//! Fixed labels that steer merge, preprocessing and flattening.

/// Default separator placed between accumulated values during merge.
pub const DEFAULT_SEPARATOR: &str = ",";

/// Default ancestor label that gates content demotion in preprocessing.
pub const DEFAULT_SENTINEL_LABEL: &str = "LabelAgent";

/// Default container name that never appears in flattened paths.
pub const DEFAULT_RESERVED_CONTAINER: &str = "counters";

/// Options for template composition.
///
/// # Examples
///
/// ```
/// use templtree::tree::TemplateOptions;
///
/// let opts = TemplateOptions::default().separator(";");
/// assert_eq!(opts.separator, ";");
/// assert_eq!(opts.sentinel_label, "LabelAgent");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateOptions {
    /// Joins old and new content when merge accumulates (default: `","`).
    pub separator: String,
    /// Ancestor name under which preprocessing demotes inline content
    /// into an anonymous child (default: `"LabelAgent"`).
    pub sentinel_label: String,
    /// Container name skipped when building flattened prefixes
    /// (default: `"counters"`).
    pub reserved_container: String,
}

impl Default for TemplateOptions {
    fn default() -> Self {
        Self {
            separator: DEFAULT_SEPARATOR.to_string(),
            sentinel_label: DEFAULT_SENTINEL_LABEL.to_string(),
            reserved_container: DEFAULT_RESERVED_CONTAINER.to_string(),
        }
    }
}

impl TemplateOptions {
    /// Sets the accumulation separator.
    #[must_use]
    pub fn separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }

    /// Sets the preprocessing sentinel ancestor label.
    #[must_use]
    pub fn sentinel_label(mut self, label: impl Into<String>) -> Self {
        self.sentinel_label = label.into();
        self
    }

    /// Sets the container name skipped by flattening.
    #[must_use]
    pub fn reserved_container(mut self, name: impl Into<String>) -> Self {
        self.reserved_container = name.into();
        self
    }
}
