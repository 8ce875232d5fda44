use std::sync::Mutex;

use crate::domain::AppError;
use crate::ports::BranchManager;

/// Records branch operations instead of touching git.
pub struct FakeBranchManager {
    pub branch: String,
    pub exists: bool,
    pub dirty: bool,
    pub fail_commit: bool,
    pub calls: Mutex<Vec<&'static str>>,
}

impl FakeBranchManager {
    pub fn new(run_name: &str) -> Self {
        Self {
            branch: format!("run/{}", run_name),
            exists: false,
            dirty: false,
            fail_commit: false,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: &'static str) {
        self.calls.lock().unwrap().push(call);
    }
}

impl BranchManager for FakeBranchManager {
    fn branch(&self) -> &str {
        &self.branch
    }

    fn branch_exists(&self) -> bool {
        self.record("branch_exists");
        self.exists
    }

    fn create_branch(&self) -> Result<(), AppError> {
        self.record("create_branch");
        if self.exists {
            return Err(AppError::Operation(format!(
                "The target git branch already exists.  Please delete it and try again.\n\
                 You can do so with: \n\ngit branch -d {}\n",
                self.branch
            )));
        }
        Ok(())
    }

    fn is_checkout_dirty(&self) -> Result<bool, AppError> {
        self.record("is_checkout_dirty");
        Ok(self.dirty)
    }

    fn add_to_branch(&self) -> Result<String, AppError> {
        self.record("add_to_branch");
        if self.fail_commit {
            return Err(AppError::Operation("Error committing new run.".into()));
        }
        Ok(format!("\nTo push this new branch upstream, run:\n\n$ git push -u origin {}\n", self.branch))
    }
}
