pub mod config;
pub mod error;
pub mod forms;
pub mod models;
pub mod schema;
pub mod utils;
pub mod validation;

pub use config::{ApiConfig, Config};
pub use error::{Error, Result, ValidationErrors, Violation};
pub use forms::{FormController, FormRecord, FormStatus, HttpTransport, SubmitOutcome, SubmitTransport};
pub use schema::Schema;

/// Load configuration from environment variables
pub fn load_config() -> Result<Config> {
    Ok(Config::load()?)
}
