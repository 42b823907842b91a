use log::{debug, warn};

use crate::config::UploadConfig;

/// Environment variable naming the destination bucket
pub const ENV_BUCKET: &str = "RESTREAM_BUCKET";
/// Environment variable naming the key namespace
pub const ENV_NAMESPACE: &str = "RESTREAM_NAMESPACE";
/// Environment variable naming the AWS region
pub const ENV_REGION: &str = "RESTREAM_REGION";
/// Environment variable naming the AWS profile
pub const ENV_PROFILE: &str = "RESTREAM_PROFILE";
/// Environment variable for the part size in megabytes
pub const ENV_PART_SIZE_MB: &str = "RESTREAM_PART_SIZE_MB";
/// Environment variable for the generated key extension
pub const ENV_EXTENSION: &str = "RESTREAM_EXTENSION";
/// Environment variable for the object content type
pub const ENV_CONTENT_TYPE: &str = "RESTREAM_CONTENT_TYPE";

/// Apply `RESTREAM_*` environment variables on top of a loaded config.
///
/// Environment values win over the config file but lose to explicit
/// command-line flags, which are applied later by the binary.
pub fn apply_env_overrides(config: &mut UploadConfig) {
    if let Ok(bucket) = std::env::var(ENV_BUCKET) {
        debug!("Overriding bucket from {}", ENV_BUCKET);
        config.bucket = bucket;
    }

    if let Ok(namespace) = std::env::var(ENV_NAMESPACE) {
        debug!("Overriding namespace from {}", ENV_NAMESPACE);
        config.namespace = namespace;
    }

    if let Ok(region) = std::env::var(ENV_REGION) {
        config.region = Some(region);
    }

    if let Ok(profile) = std::env::var(ENV_PROFILE) {
        config.profile = Some(profile);
    }

    if let Ok(part_size) = std::env::var(ENV_PART_SIZE_MB) {
        match part_size.parse::<usize>() {
            Ok(mb) => config.part_size_mb = mb,
            Err(_) => warn!(
                "Ignoring invalid {} value '{}', expected a number of megabytes",
                ENV_PART_SIZE_MB, part_size
            ),
        }
    }

    if let Ok(extension) = std::env::var(ENV_EXTENSION) {
        config.extension = extension;
    }

    if let Ok(content_type) = std::env::var(ENV_CONTENT_TYPE) {
        config.content_type = content_type;
    }
}
