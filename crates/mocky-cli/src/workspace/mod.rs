mod atomic;
mod ids;
mod paths;
mod settings;
mod templates;

pub use atomic::{write_bytes_atomic, write_json_atomic};
pub use paths::WorkspacePaths;
pub use settings::{CliSettings, load_or_create_settings};
pub use templates::{
    SortKey, SortOrder, Template, TemplateDraft, TemplateStore, TemplateUpdate, sort_templates,
};

use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum WorkspaceError {
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("toml decode error: {0}")]
    TomlDecode(#[from] toml::de::Error),
    #[error("toml encode error: {0}")]
    TomlEncode(#[from] toml::ser::Error),
    #[error("template not found: {0}")]
    TemplateNotFound(String),
    #[error("invalid template file: {0}")]
    InvalidTemplateFile(String),
    #[error("invalid workspace state: {0}")]
    Invalid(String),
}

pub type WorkspaceResult<T> = Result<T, WorkspaceError>;
