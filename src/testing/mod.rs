pub mod course_tree;
pub mod fake_branch_manager;

pub use course_tree::CourseTree;
pub use env_guard::EnvVarGuard;
pub use fake_branch_manager::FakeBranchManager;
pub use fake_import_client::FakeImportClient;
