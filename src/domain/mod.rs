pub mod config;
pub mod course;
pub mod error;
pub mod render_context;
pub mod taxonomy;
pub mod upload_task;

pub use config::{CONFIG_FILE, CmsConfig, OlxConfig};
pub use course::{CourseDescriptor, CourseId, DescriptorError};
pub use error::AppError;
pub use render_context::{RESERVED_RUN_NAME, RenderContext, Timestamp, parse_date};
pub use taxonomy::{TEMPLATE_TAXONOMY, TaxonomyEntry};
pub use upload_task::{PollPolicy, TaskState};
