//! Course template discovery and in-place rendering.
//!
//! Every file matched by the taxonomy (plus `course.xml`) is itself a
//! template. It is rendered with the shared [`RenderContext`] and written back
//! to the same path. A file that was a symlink to a shared default is replaced
//! by a regular file, so each run owns its rendered copy.
//!
//! There is no rollback: when a template fails, files rendered earlier in the
//! pass stay rendered.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};

use minijinja::{AutoEscape, Environment, Error, ErrorKind, UndefinedBehavior, Value};
use walkdir::WalkDir;

use crate::domain::taxonomy::{COURSE_XML, LOOKUP_DIRS, MODULE_DIRS};
use crate::domain::{AppError, RenderContext, TEMPLATE_TAXONOMY, TaxonomyEntry};
use crate::services::bundled_templates::bundled_template;
use crate::services::template_helpers::register_helpers;

/// A discovered template, relative to the course root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateFile {
    path: PathBuf,
    link_target: Option<PathBuf>,
}

impl TemplateFile {
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Where the file pointed before rendering, if it was a symlink.
    pub fn link_target(&self) -> Option<&Path> {
        self.link_target.as_deref()
    }

    /// Template name: the relative path with `/` separators.
    pub fn name(&self) -> String {
        self.path.components().map(|c| c.as_os_str().to_string_lossy()).collect::<Vec<_>>().join("/")
    }

    /// File name without its extension, exposed to the template as `filename`.
    pub fn stem(&self) -> String {
        self.path.file_stem().map(|s| s.to_string_lossy().into_owned()).unwrap_or_default()
    }
}

/// Outcome of a successful render pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderReport {
    /// Rendered files, in render order.
    pub rendered: Vec<PathBuf>,
    /// Files that were symlinks and are now regular files.
    pub materialized: Vec<PathBuf>,
}

/// Resolves `{% include %}` / `{% extends %}` names against the lookup directories,
/// then the bundled templates.
#[derive(Debug, Clone)]
pub struct TemplateLookup {
    dirs: Vec<PathBuf>,
}

impl TemplateLookup {
    pub fn new(root: &Path) -> Self {
        Self { dirs: LOOKUP_DIRS.iter().map(|dir| root.join(dir)).collect() }
    }

    pub fn find(&self, name: &str) -> io::Result<Option<String>> {
        if let Some(source) = read_first(&self.dirs, name)? {
            return Ok(Some(source));
        }
        Ok(bundled_template(name).map(str::to_string))
    }
}

/// Resolves helper modules (macro libraries pulled in with `{% import %}`).
///
/// Built once per render pass and handed to the environment's loader.
#[derive(Debug, Clone)]
pub struct ModuleResolver {
    dirs: Vec<PathBuf>,
}

impl ModuleResolver {
    pub fn new(root: &Path) -> Self {
        Self { dirs: MODULE_DIRS.iter().map(|dir| root.join(dir)).collect() }
    }

    pub fn resolve(&self, name: &str) -> io::Result<Option<String>> {
        read_first(&self.dirs, name)
    }
}

fn read_first(dirs: &[PathBuf], name: &str) -> io::Result<Option<String>> {
    for dir in dirs {
        let candidate = dir.join(name);
        if candidate.is_file() {
            return fs::read_to_string(&candidate).map(Some);
        }
    }
    Ok(None)
}

/// Reject absolute names and names that climb out of a lookup directory.
fn validate_template_name(name: &str) -> Result<(), Error> {
    let path = Path::new(name);
    let safe = !path.is_absolute()
        && path.components().all(|c| matches!(c, Component::Normal(_) | Component::CurDir));
    if safe {
        Ok(())
    } else {
        Err(Error::new(
            ErrorKind::InvalidOperation,
            format!("template name '{}' escapes the lookup directories", name),
        ))
    }
}

/// Renders a course tree in place.
#[derive(Debug, Clone)]
pub struct TemplateEngine {
    root: PathBuf,
    context: RenderContext,
}

impl TemplateEngine {
    pub fn new(root: impl Into<PathBuf>, context: RenderContext) -> Self {
        Self { root: root.into(), context }
    }

    /// Engine rooted at the current working directory.
    pub fn current(context: RenderContext) -> Result<Self, AppError> {
        Ok(Self::new(std::env::current_dir()?, context))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// All template files, `course.xml` first, then grouped by taxonomy entry.
    pub fn discover(&self) -> Result<Vec<TemplateFile>, AppError> {
        let mut files = vec![self.template_file(PathBuf::from(COURSE_XML))?];
        for entry in TEMPLATE_TAXONOMY {
            for path in self.walk(entry)? {
                files.push(self.template_file(path)?);
            }
        }
        Ok(files)
    }

    fn walk(&self, entry: &TaxonomyEntry) -> Result<Vec<PathBuf>, AppError> {
        let dir = self.root.join(entry.directory);
        if !dir.is_dir() {
            return Ok(Vec::new());
        }

        let mut matches = Vec::new();
        for item in WalkDir::new(&dir).sort_by_file_name() {
            let item = item.map_err(io::Error::from)?;
            if item.file_type().is_dir() || !entry.matches(&item.file_name().to_string_lossy()) {
                continue;
            }
            // Symlinks to directories are not descended into and are not templates.
            if item.path_is_symlink() && item.path().is_dir() {
                continue;
            }
            let relative = item.path().strip_prefix(&self.root).unwrap_or(item.path());
            matches.push(relative.to_path_buf());
        }
        Ok(matches)
    }

    fn template_file(&self, path: PathBuf) -> Result<TemplateFile, AppError> {
        let full = self.root.join(&path);
        let link_target = match fs::symlink_metadata(&full) {
            Ok(meta) if meta.file_type().is_symlink() => Some(fs::read_link(&full)?),
            _ => None,
        };
        Ok(TemplateFile { path, link_target })
    }

    /// Discover and render every template, stopping at the first failure.
    pub fn render(&self) -> Result<RenderReport, AppError> {
        let files = self.discover()?;
        let env = self.environment(TemplateLookup::new(&self.root), ModuleResolver::new(&self.root));
        let shared = self.shared_variables();

        let mut report = RenderReport::default();
        for file in &files {
            let rendered = self.render_file(&env, &shared, file)?;
            self.write_back(file, &rendered)?;
            tracing::info!(template = %file.name(), "rendered");

            if file.link_target.is_some() {
                report.materialized.push(file.path.clone());
            }
            report.rendered.push(file.path.clone());
        }
        Ok(report)
    }

    /// Render one file's content without writing it.
    pub fn render_file(
        &self,
        env: &Environment<'_>,
        shared: &BTreeMap<String, Value>,
        file: &TemplateFile,
    ) -> Result<String, AppError> {
        let name = file.name();
        let source = fs::read_to_string(self.root.join(&file.path))
            .map_err(|e| AppError::Render { template: name.clone(), details: e.to_string() })?;

        let mut variables = shared.clone();
        variables.insert("filename".to_string(), Value::from(file.stem()));

        env.render_named_str(&name, &source, &variables)
            .map_err(|e| AppError::Render { template: name, details: diagnostic(&e) })
    }

    fn write_back(&self, file: &TemplateFile, rendered: &str) -> Result<(), AppError> {
        let full = self.root.join(&file.path);
        if file.link_target.is_some() {
            fs::remove_file(&full)?;
        }
        fs::write(&full, rendered)?;
        Ok(())
    }

    /// Values shared by every template of this pass.
    pub fn shared_variables(&self) -> BTreeMap<String, Value> {
        let ctx = &self.context;
        BTreeMap::from([
            ("run_name".to_string(), Value::from(ctx.run_name())),
            ("start_date".to_string(), Value::from_object(ctx.start_date())),
            ("end_date".to_string(), Value::from_object(ctx.end_date())),
            ("run_suffix".to_string(), Value::from(ctx.run_suffix().map(str::to_string))),
            ("is_public".to_string(), Value::from(ctx.is_public())),
        ])
    }

    /// Render environment wired to the given lookup and module resolver.
    pub fn environment(&self, lookup: TemplateLookup, modules: ModuleResolver) -> Environment<'static> {
        let mut env = Environment::new();
        env.set_keep_trailing_newline(true);
        env.set_undefined_behavior(UndefinedBehavior::Strict);
        env.set_auto_escape_callback(|_| AutoEscape::None);
        env.set_debug(true);

        env.set_loader(move |name| {
            validate_template_name(name)?;
            let found = match lookup.find(name) {
                Ok(Some(source)) => Some(source),
                Ok(None) => modules.resolve(name).map_err(|e| load_error(name, e))?,
                Err(e) => return Err(load_error(name, e)),
            };
            Ok(found)
        });

        register_helpers(&mut env, &self.root);
        env
    }
}

fn load_error(name: &str, err: io::Error) -> Error {
    Error::new(ErrorKind::InvalidOperation, format!("could not read template '{}'", name))
        .with_source(err)
}

/// Error text with template source context and every nested cause.
fn diagnostic(err: &Error) -> String {
    let mut out = format!("{:#}", err);
    let mut source = std::error::Error::source(err);
    while let Some(cause) = source {
        out.push_str(&format!("\ncaused by: {:#}", cause));
        source = std::error::Error::source(cause);
    }
    out
}
