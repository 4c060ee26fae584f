pub mod error;
pub mod ids;
pub mod item;
pub mod request;
pub mod template;

pub use error::{ModelError, Result};
pub use ids::{ItemId, Language, TemplateId};
pub use item::{ContentItem, FieldValue, WorkflowInfo};
pub use request::{DateBounds, DateCombine, DateFilter, ExportRequest, LanguageScope};
pub use template::TemplateNode;
