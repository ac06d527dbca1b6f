const PASS_THROUGH: [&str; 4] = ["http://", "https://", "blob:", "file://"];

/// Whether `url` already names a location on its own.
pub fn is_absolute_url(url: &str) -> bool {
    PASS_THROUGH.iter().any(|p| url.starts_with(p))
}

/// Resolve an image path from the config service against `base`.
///
/// Empty paths mean "no image". Absolute URLs pass through unchanged;
/// anything else is joined onto the base origin with exactly one `/`.
pub fn resolve_image_url(base: &str, path: &str) -> Option<String> {
    let path = path.trim();
    if path.is_empty() {
        return None;
    }
    if is_absolute_url(path) {
        return Some(path.to_string());
    }
    let base = base.trim_end_matches('/');
    if base.is_empty() {
        return Some(path.to_string());
    }
    Some(format!("{base}/{}", path.trim_start_matches('/')))
}
