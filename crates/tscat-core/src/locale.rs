//! Locale identifiers: detection from the environment and fallback chains.

/// Environment variables consulted by [`detect`], in precedence order.
const LOCALE_VARS: [&str; 4] = ["LANGUAGE", "LC_ALL", "LC_MESSAGES", "LANG"];

/// Detect the UI locale from the process environment.
///
/// Returns the first usable value of `LANGUAGE`, `LC_ALL`, `LC_MESSAGES`,
/// `LANG`. `LANGUAGE` may hold a colon-separated priority list; only its
/// first item is used. The `C` and `POSIX` locales are skipped.
pub fn detect() -> Option<String> {
    detect_with(|var| std::env::var(var).ok())
}

/// Same as [`detect`], reading variables through `get`.
pub fn detect_with<F>(get: F) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    for var in LOCALE_VARS {
        let Some(value) = get(var) else {
            continue;
        };
        let first = value.split(':').next().unwrap_or("").trim();
        if first.is_empty() || first == "C" || first == "POSIX" || first.starts_with("C.") {
            continue;
        }
        return Some(first.to_string());
    }
    None
}

/// Normalize a locale identifier: `uk-UA.UTF-8@euro` becomes `uk_UA`.
pub fn normalize(id: &str) -> String {
    let id = id.trim();
    let id = id.split('@').next().unwrap_or(id);
    let id = id.split('.').next().unwrap_or(id);
    id.replace('-', "_")
}

/// Candidate resource names for a locale, most specific first.
///
/// `uk_UA.UTF-8` yields `["uk_UA", "uk"]`; `sr_Latn_RS` yields
/// `["sr_Latn_RS", "sr_Latn", "sr"]`. Empty input yields nothing.
pub fn candidates(id: &str) -> Vec<String> {
    let normalized = normalize(id);
    let mut out = Vec::new();
    let mut current = normalized.as_str();
    while !current.is_empty() {
        out.push(current.to_string());
        match current.rfind('_') {
            Some(idx) => current = &current[..idx],
            None => break,
        }
    }
    out
}
