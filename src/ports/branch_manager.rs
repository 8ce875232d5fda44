use crate::domain::AppError;

/// Git branch handling for a new course run.
pub trait BranchManager {
    /// Name of the branch this run is committed to.
    fn branch(&self) -> &str;

    /// Whether the run branch already exists.
    fn branch_exists(&self) -> bool;

    /// Create and check out the run branch. Fails if it already exists.
    fn create_branch(&self) -> Result<(), AppError>;

    /// Whether the working tree has uncommitted changes.
    fn is_checkout_dirty(&self) -> Result<bool, AppError>;

    /// Stage everything and commit it to the run branch.
    ///
    /// Returns the follow-up instructions to show the user.
    fn add_to_branch(&self) -> Result<String, AppError>;
}
