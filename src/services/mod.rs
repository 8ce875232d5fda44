mod archive_builder;
mod bundled_templates;
mod cms_http;
mod course_identifier;
mod git_branch_manager;
mod import_client_http;
mod policy_linker;
mod template_engine;
pub mod template_helpers;
mod token_client_http;

pub use archive_builder::{ARCHIVE_ROOT, ArchiveBuilder};
pub use bundled_templates::bundled_template;
pub use course_identifier::course_id_from_archive;
pub use git_branch_manager::GitBranchManager;
pub use import_client_http::HttpImportClient;
pub use policy_linker::PolicyLinker;
pub use template_engine::{ModuleResolver, RenderReport, TemplateEngine, TemplateFile, TemplateLookup};
pub use token_client_http::{HttpTokenClient, require_credentials};
