//! Query string encoding.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

/// Characters that must be percent-encoded in query keys and values.
///
/// Everything except the unreserved characters (A-Z, a-z, 0-9, `-`, `_`,
/// `.`, `~`) is encoded.
const URI_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Percent-encode a sequence of key/value pairs into a query string.
///
/// Keys and values are encoded with the unreserved character set, so spaces
/// become `%20`, `+` becomes `%2B`, and `/` becomes `%2F`. Pairs keep their
/// order; a multi-valued key is expressed by repeating it.
///
/// # Examples
///
/// ```
/// use s3prep_addressing::query::percent_encode_sequence;
///
/// assert_eq!(percent_encode_sequence([("k1", "v1"), ("k2", "v2")]), "k1=v1&k2=v2");
/// assert_eq!(
///     percent_encode_sequence([("k1", "with spaces++/")]),
///     "k1=with%20spaces%2B%2B%2F"
/// );
/// ```
#[must_use]
pub fn percent_encode_sequence<I, K, V>(pairs: I) -> String
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    pairs
        .into_iter()
        .map(|(k, v)| percent_encode_pair(k.as_ref(), v.as_ref()))
        .collect::<Vec<_>>()
        .join("&")
}

/// URI-encode a single query component.
fn uri_encode(input: &str) -> String {
    utf8_percent_encode(input, URI_ENCODE_SET).to_string()
}

/// Percent-encode a single pair as `key=value`.
pub(crate) fn percent_encode_pair(key: &str, value: &str) -> String {
    format!("{}={}", uri_encode(key), uri_encode(value))
}

/// Split a raw query string into `(key, value)` pairs without decoding.
///
/// Empty parameters are skipped. A parameter without `=` gets `None`, so
/// `acl` and `acl=` stay distinguishable.
pub(crate) fn parse_raw_query(query: &str) -> Vec<(String, Option<String>)> {
    query
        .split('&')
        .filter(|s| !s.is_empty())
        .map(|param| match param.split_once('=') {
            Some((k, v)) => (k.to_owned(), Some(v.to_owned())),
            None => (param.to_owned(), None),
        })
        .collect()
}

/// Render raw pairs back into a query string; a `None` value renders as a
/// bare key.
pub(crate) fn render_raw_query(pairs: &[(String, Option<String>)]) -> String {
    pairs
        .iter()
        .map(|(k, v)| match v {
            Some(v) => format!("{k}={v}"),
            None => k.clone(),
        })
        .collect::<Vec<_>>()
        .join("&")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_should_encode_empty_sequence() {
        let empty: [(&str, &str); 0] = [];
        assert_eq!(percent_encode_sequence(empty), "");
    }

    #[test]
    fn test_should_encode_special_chars() {
        assert_eq!(
            percent_encode_sequence([("k1", "with spaces++/")]),
            "k1=with%20spaces%2B%2B%2F"
        );
    }

    #[test]
    fn test_should_encode_pairs_in_order() {
        assert_eq!(
            percent_encode_sequence(vec![("k1".to_owned(), "v1"), ("k2".to_owned(), "v2")]),
            "k1=v1&k2=v2"
        );
        assert_eq!(percent_encode_sequence([("k1", "v1")]), "k1=v1");
    }

    #[test]
    fn test_should_repeat_multi_valued_keys() {
        let values = ["a", "b", "c"];
        assert_eq!(
            percent_encode_sequence(values.iter().map(|v| ("k1", *v))),
            "k1=a&k1=b&k1=c"
        );
        assert_eq!(
            percent_encode_sequence([("k1", "a"), ("k1", "list"), ("k2", "another"), ("k2", "list")]),
            "k1=a&k1=list&k2=another&k2=list"
        );
    }

    #[test]
    fn test_should_parse_and_render_raw_query() {
        let pairs = parse_raw_query("location&prefix=a%2Fb&&max-keys=10");
        assert_eq!(
            pairs,
            vec![
                ("location".to_owned(), None),
                ("prefix".to_owned(), Some("a%2Fb".to_owned())),
                ("max-keys".to_owned(), Some("10".to_owned())),
            ]
        );
        assert_eq!(render_raw_query(&pairs), "location&prefix=a%2Fb&max-keys=10");
    }

    #[test]
    fn test_should_keep_trailing_equals_on_empty_value() {
        let pairs = parse_raw_query("acl=&uploads");
        assert_eq!(
            pairs,
            vec![
                ("acl".to_owned(), Some(String::new())),
                ("uploads".to_owned(), None),
            ]
        );
        assert_eq!(render_raw_query(&pairs), "acl=&uploads");
    }
}
