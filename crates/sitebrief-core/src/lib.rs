pub mod answer;
pub mod app_config;
pub mod config;
pub mod error;
pub mod profile;

pub use answer::{AnswerResult, AnswerSource};
pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use error::ConfigError;
pub use profile::{
    CompanyProfile, FetchStatus, PageRecord, PageRole, ProfileParts, SocialPlatform,
};
