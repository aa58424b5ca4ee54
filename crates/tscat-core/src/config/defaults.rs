// --- Default value functions ---

pub(super) fn default_search_paths() -> Vec<String> {
    vec!["locale".to_string()]
}
pub(super) fn default_log_level() -> String {
    "info".to_string()
}
pub(super) fn default_true() -> bool {
    true
}
