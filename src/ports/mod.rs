mod branch_manager;
mod import_client;

pub use branch_manager::BranchManager;
pub use import_client::ImportClient;
