use crate::data::Index;

/// Parse an update index payload.
///
/// The payload is a sequence of `fingerprint=location` pairs separated by any
/// mixture of newlines and commas. Only the first `=` splits a pair, so
/// locations may contain `=` (query strings). Pairs without `=` or with an
/// empty key are skipped. A later duplicate key replaces an earlier one.
///
/// # Examples
///
/// ```
/// use docfresh_fetch::parse_index;
///
/// let index = parse_index("a=1,b=2\nc=3");
/// assert_eq!(index.get("b"), Some("2"));
/// assert!(parse_index("garbage,noequalshere").is_empty());
/// ```
pub fn parse_index(payload: &str) -> Index {
    payload
        .split(['\n', ','])
        .filter_map(|pair| pair.split_once('='))
        .map(|(key, value)| (key.trim(), value.trim()))
        .filter(|(key, _)| !key.is_empty())
        .collect()
}
