//! Fixed directory taxonomy of an OLX course tree.

/// Top-level descriptor rendered on every pass, ahead of the taxonomy walk.
pub const COURSE_XML: &str = "course.xml";

/// Shared default policy directory that per-run policy links point at.
pub const POLICY_BASE_DIR: &str = "_base";

/// Directory holding course policies.
pub const POLICIES_DIR: &str = "policies";

/// One content-type directory and the file extension rendered inside it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaxonomyEntry {
    pub directory: &'static str,
    pub extension: &'static str,
}

impl TaxonomyEntry {
    const fn new(directory: &'static str, extension: &'static str) -> Self {
        Self { directory, extension }
    }

    /// Whether `file_name` carries this entry's extension.
    pub fn matches(&self, file_name: &str) -> bool {
        file_name
            .strip_suffix(self.extension)
            .and_then(|stem| stem.strip_suffix('.'))
            .is_some()
    }
}

/// Ordered (directory, extension) pairs. A directory may appear once per extension.
pub const TEMPLATE_TAXONOMY: &[TaxonomyEntry] = &[
    TaxonomyEntry::new("about", "html"),
    TaxonomyEntry::new("chapter", "xml"),
    TaxonomyEntry::new("course", "xml"),
    TaxonomyEntry::new("discussion", "xml"),
    TaxonomyEntry::new("html", "html"),
    TaxonomyEntry::new("html", "xml"),
    TaxonomyEntry::new("info", "html"),
    TaxonomyEntry::new("policies", "json"),
    TaxonomyEntry::new("problem", "xml"),
    TaxonomyEntry::new("sequential", "xml"),
    TaxonomyEntry::new("static", "html"),
    TaxonomyEntry::new("static", "js"),
    TaxonomyEntry::new("static", "md"),
    TaxonomyEntry::new("tabs", "xml"),
    TaxonomyEntry::new("vertical", "xml"),
    TaxonomyEntry::new("video", "xml"),
];

/// Working-directory-relative template lookup directories, first match wins.
/// The bundled templates are consulted after these.
pub const LOOKUP_DIRS: &[&str] =
    &["include", "templates", "mako", "mako_templates", "mako/templates"];

/// Working-directory-relative helper-module directories.
pub const MODULE_DIRS: &[&str] = &["include", "modules", "mako", "mako_modules", "mako/modules"];

/// Directories copied into a course archive. The first seven are required by
/// Studio; the rest are carried when present.
pub const ARCHIVE_DIRECTORIES: &[&str] = &[
    "about",
    "chapter",
    "html",
    "info",
    "policies",
    "sequential",
    "static",
    "assets",
    "conditional",
    "course",
    "drafts",
    "markdown",
    "tabs",
    "vertical",
];

/// Files copied into a course archive.
pub const ARCHIVE_FILES: &[&str] = &[COURSE_XML];
