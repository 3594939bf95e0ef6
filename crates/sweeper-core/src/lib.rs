pub mod attachment;
mod de;
pub mod error;
pub mod issue;
pub mod project;
pub mod retention;
pub mod stats;

pub use attachment::Attachment;
pub use error::CoreError;
pub use issue::Issue;
pub use project::Project;
pub use retention::RetentionPolicy;
pub use stats::{Disposition, ProjectTotal, SweepStats};
