// Re-export all items from the submodules
mod env_overrides;
mod upload_config;

// Re-export upload config
pub use upload_config::{
    UploadConfig,
    load_or_create_config,
};

// Re-export environment variable handling
pub use env_overrides::apply_env_overrides;
