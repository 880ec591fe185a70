pub mod batch;
pub mod config;
pub mod error;
pub mod formatter;
pub mod providers;
pub mod server;
pub mod translate;
pub mod translator;

pub use config::AppConfig;
pub use error::{DevTranslateError, Result, TranslationError};
pub use formatter::{format, FormatMode};
pub use server::{build_router, AppState};
pub use translate::schema::{FormattedResult, TranslationPair};
pub use translator::Translator;
