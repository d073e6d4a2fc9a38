pub mod loader;
pub mod run_config;

pub use loader::{
    API_KEY_ENV, DEFAULT_CONFIG_FILE, api_key_from_env, load_config, load_user_input,
    parse_config_content,
};
pub use run_config::{ImageApiConfig, OutputConfig, RunConfig, TextApiConfig};
