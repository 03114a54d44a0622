pub const DEFAULT_PROFILE: &str = "default";

pub fn resolve_profile(requested: &str) -> String {
    let trimmed = requested.trim();
    if trimmed.is_empty() {
        return DEFAULT_PROFILE.to_string();
    }

    trimmed.to_string()
}
