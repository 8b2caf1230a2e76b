//! Path canonicalization for outbound S3 requests.
//!
//! [`remove_dot_segments`] resolves `.` and `..` segments syntactically, the
//! way RFC 3986 section 5.2.4 does, with one compatibility deviation: a run
//! of slashes collapses one slash at a time, so `//foo//` becomes `/foo/`.
//! Signers downstream compare paths byte for byte, so this behavior is
//! fixed.

/// Remove dot segments from a path.
///
/// The input is consumed from the front, one rule at a time, and completed
/// segments are appended to the output buffer:
///
/// 1. Leading `../` and `./` are dropped (there is nothing to resolve them
///    against).
/// 2. `/./` and a trailing `/.` become `/`.
/// 3. `/../` and a trailing `/..` become `/` and drop the last output segment.
/// 4. A bare `.` or `..` becomes empty.
/// 5. A leading `//` loses one slash.
/// 6. Otherwise the first segment (with its leading slash, if any) moves to
///    the output.
///
/// Dot rules only match complete segments, so `/.hidden` is left alone.
/// The function is total and idempotent.
///
/// # Examples
///
/// ```
/// use s3prep_addressing::canonical::remove_dot_segments;
///
/// assert_eq!(remove_dot_segments("/foo/bar/baz/../qux"), "/foo/bar/qux");
/// assert_eq!(remove_dot_segments("../foo"), "foo");
/// assert_eq!(remove_dot_segments(".."), "");
/// assert_eq!(remove_dot_segments("//foo//"), "/foo/");
/// ```
#[must_use]
pub fn remove_dot_segments(path: &str) -> String {
    // Every rewrite below yields a suffix (or the leading "/") of the current
    // input, so both buffers can borrow from `path`.
    let mut output: Vec<&str> = Vec::new();
    let mut input = path;

    while !input.is_empty() {
        if let Some(rest) = input.strip_prefix("../") {
            input = rest;
        } else if let Some(rest) = input.strip_prefix("./") {
            input = rest;
        } else if input.starts_with("/./") {
            input = &input[2..];
        } else if input == "/." {
            input = &input[..1];
        } else if input.starts_with("/../") {
            input = &input[3..];
            output.pop();
        } else if input == "/.." {
            input = &input[..1];
            output.pop();
        } else if input == "." || input == ".." {
            input = "";
        } else if input.starts_with("//") {
            input = &input[1..];
        } else {
            let search_from = usize::from(input.starts_with('/'));
            let end = input[search_from..]
                .find('/')
                .map_or(input.len(), |offset| search_from + offset);
            let (segment, rest) = input.split_at(end);
            output.push(segment);
            input = rest;
        }
    }

    output.concat()
}

/// Normalize a URL path for use on the wire.
///
/// Identical to [`remove_dot_segments`] except that an empty path becomes
/// `/`.
///
/// # Examples
///
/// ```
/// use s3prep_addressing::canonical::normalize_url_path;
///
/// assert_eq!(normalize_url_path(""), "/");
/// assert_eq!(normalize_url_path("/a/./b"), "/a/b");
/// ```
#[must_use]
pub fn normalize_url_path(path: &str) -> String {
    if path.is_empty() {
        return "/".to_owned();
    }
    remove_dot_segments(path)
}
