//! Templates compiled into the binary, consulted after the course's own lookup directories.

use include_dir::{Dir, include_dir};

static BUNDLED_TEMPLATES_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/src/assets/course_templates");

/// Content of a bundled template, if one exists under `name`.
pub fn bundled_template(name: &str) -> Option<&'static str> {
    BUNDLED_TEMPLATES_DIR.get_file(name).and_then(|file| file.contents_utf8())
}
