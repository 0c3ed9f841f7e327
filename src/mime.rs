/// Maps a lower-cased file extension to a MIME type.
///
/// Returns `None` for anything outside the table; callers fall back to
/// `text/html`.
pub fn from_extension(extension: &str) -> Option<&'static str> {
    match extension {
        "js" => Some("text/javascript"),
        "css" => Some("text/css"),
        "json" => Some("text/json"),
        "txt" => Some("text/txt"),
        "png" => Some("image/png"),
        "jpg" => Some("image/jpeg"),
        "gif" => Some("image/gif"),
        "woff" => Some("font/woff"),
        "woff2" => Some("font/woff2"),
        _ => None,
    }
}
