pub const APP_NAME: &str = "Hauling Calculator";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");
pub const GIT_TAG: Option<&str> = option_env!("GIT_TAG");

/// Release tag when built from a tagged checkout, the crate version otherwise.
pub fn version_label() -> String {
    match GIT_TAG {
        Some(tag) if !tag.trim().is_empty() => tag.trim().to_string(),
        _ => format!("v{APP_VERSION}"),
    }
}
