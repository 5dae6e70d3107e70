//! Shared serde helpers for configuration domains

/// Default value helper for boolean true
pub fn default_true() -> bool {
    true
}

/// Default value helper for boolean false
pub fn default_false() -> bool {
    false
}
