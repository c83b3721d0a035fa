//! Minimal `Link` header handling for pagination.

/// Extract the `rel="next"` target from an RFC 5988 `Link` header value.
///
/// Handles the `<url>; rel="next", <url2>; rel="prev"` shape produced by the
/// tilesets API; quoted and unquoted `rel` parameters are accepted. Malformed
/// entries are skipped rather than failing the whole header.
pub(crate) fn next_link(header: &str) -> Option<String> {
    for entry in header.split(',') {
        let mut segments = entry.split(';');
        let Some(target) = segments.next() else {
            continue;
        };
        let Some(url) = target
            .trim()
            .strip_prefix('<')
            .and_then(|t| t.strip_suffix('>'))
        else {
            continue;
        };
        let is_next = segments.any(|param| {
            let Some((key, value)) = param.split_once('=') else {
                return false;
            };
            key.trim().eq_ignore_ascii_case("rel")
                && value.trim().trim_matches('"').eq_ignore_ascii_case("next")
        });
        if is_next {
            return Some(url.to_string());
        }
    }
    None
}
