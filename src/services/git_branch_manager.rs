use std::path::PathBuf;
use std::process::Command;

use git2::{BranchType, Repository, StatusOptions};

use crate::domain::AppError;
use crate::ports::BranchManager;

/// `run/{name}` branch handling through the `git` executable.
///
/// Read-only queries go through libgit2; anything that changes the
/// repository shells out so hooks and user config apply.
#[derive(Debug, Clone)]
pub struct GitBranchManager {
    root: PathBuf,
    run_name: String,
    branch: String,
}

impl GitBranchManager {
    pub fn new(root: impl Into<PathBuf>, run_name: &str) -> Self {
        Self { root: root.into(), run_name: run_name.to_string(), branch: format!("run/{}", run_name) }
    }

    fn repo(&self) -> Result<Repository, AppError> {
        Repository::discover(&self.root).map_err(|e| {
            AppError::Operation(format!("Not a git repository ({}): {}", self.root.display(), e.message()))
        })
    }

    fn run(&self, args: &[&str]) -> Result<String, String> {
        let output = Command::new("git")
            .args(args)
            .current_dir(&self.root)
            .output()
            .map_err(|e| e.to_string())?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            return Err(if stderr.is_empty() { "Unknown error".to_string() } else { stderr });
        }
        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }

    fn run_or(&self, args: &[&str], message: &str) -> Result<(), AppError> {
        self.run(args).map(|_| ()).map_err(|details| {
            tracing::debug!(command = %format!("git {}", args.join(" ")), %details, "git failed");
            AppError::Operation(message.to_string())
        })
    }
}

impl BranchManager for GitBranchManager {
    fn branch(&self) -> &str {
        &self.branch
    }

    fn branch_exists(&self) -> bool {
        self.repo().map(|repo| repo.find_branch(&self.branch, BranchType::Local).is_ok()).unwrap_or(false)
    }

    fn create_branch(&self) -> Result<(), AppError> {
        if self.branch_exists() {
            return Err(AppError::Operation(format!(
                "The target git branch already exists.  Please delete it and try again.\n\
                 You can do so with: \n\
                 \n\
                 git branch -d {}\n",
                self.branch
            )));
        }
        self.run_or(&["checkout", "-b", &self.branch], &format!("Error creating branch {}", self.branch))
    }

    fn is_checkout_dirty(&self) -> Result<bool, AppError> {
        let repo = self.repo()?;
        let mut options = StatusOptions::new();
        options.include_untracked(false).include_ignored(false);
        let statuses = repo
            .statuses(Some(&mut options))
            .map_err(|e| AppError::Operation(format!("Unable to read git status: {}", e.message())))?;
        Ok(!statuses.is_empty())
    }

    fn add_to_branch(&self) -> Result<String, AppError> {
        let message = format!("New run: {}", self.run_name);
        self.run_or(&["add", "."], "Error committing new run.")?;
        self.run_or(&["commit", "-m", &message], "Error committing new run.")?;

        Ok(format!(
            "\n\
             To push this new branch upstream, run:\n\
             \n\
             $ git push -u origin {branch}\n\
             \n\
             To switch back to master, run:\n\
             \n\
             $ git checkout master\n",
            branch = self.branch
        ))
    }
}
