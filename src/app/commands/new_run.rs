//! `new-run`: render a course tree for a new run, link its policies, and optionally commit it.

use std::path::{Path, PathBuf};

use crate::domain::{AppError, RenderContext, parse_date};
use crate::ports::BranchManager;
use crate::services::{PolicyLinker, RenderReport, TemplateEngine};

/// Raw command-line input for a new run.
#[derive(Debug, Clone, Default)]
pub struct NewRunOptions {
    pub run_name: String,
    pub start_date: String,
    pub end_date: String,
    pub run_suffix: Option<String>,
    pub is_public: bool,
    pub create_branch: bool,
}

impl NewRunOptions {
    /// Parse and validate into a render context. Nothing is touched on disk.
    pub fn context(&self) -> Result<RenderContext, AppError> {
        let start = parse_date(&self.start_date)?;
        let end = parse_date(&self.end_date)?;
        RenderContext::new(&self.run_name, start, end, self.run_suffix.clone(), self.is_public)
    }
}

/// What a successful `new-run` did.
#[derive(Debug, Clone)]
pub struct NewRunOutcome {
    pub report: RenderReport,
    pub policy_link: PathBuf,
    /// Follow-up instructions after committing to the run branch.
    pub follow_up: Option<String>,
}

/// Render, link and (with a branch manager) commit a new run rooted at `root`.
pub fn execute<B: BranchManager>(
    root: &Path,
    context: RenderContext,
    branches: Option<&B>,
) -> Result<NewRunOutcome, AppError> {
    if let Some(branches) = branches {
        if branches.is_checkout_dirty()? {
            tracing::warn!(
                branch = branches.branch(),
                "working tree has uncommitted changes; they will be committed with the new run"
            );
        }
        branches.create_branch()?;
    }

    let run_name = context.run_name().to_string();
    let report = TemplateEngine::new(root, context).render()?;
    let policy_link = PolicyLinker::new(root).link(&run_name)?;

    let follow_up = match branches {
        Some(branches) => Some(branches.add_to_branch()?),
        None => None,
    };

    Ok(NewRunOutcome { report, policy_link, follow_up })
}
