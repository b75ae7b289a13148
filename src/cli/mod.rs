pub mod app;
pub mod commands;
pub mod config;
pub mod context;
pub mod dispatch;
pub mod documents;
pub mod env;
pub mod output;
pub mod runtime;
pub mod serve;

pub use app::run;
pub use config::{cmd_config, ConfigArgs};
pub use documents::{cmd_documents, DocumentsArgs};
pub use serve::{cmd_serve, ServeArgs};
