//! Ordered header multimap.
//!
//! Header names are compared case-insensitively but stored as given, so a
//! request keeps the spelling its interceptors chose. A name may hold several
//! values, in the order they were added.

use std::collections::BTreeMap;

/// Ordered collection of HTTP header name/value pairs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Headers {
    entries: Vec<(String, String)>,
}

impl Headers {
    /// Creates an empty header set.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Replaces every value for `name` with `value`.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        self.remove(&name);
        self.entries.push((name, value.into()));
    }

    /// Adds `value` for `name`, keeping the values already present.
    pub fn append(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.entries.push((name.into(), value.into()));
    }

    /// Removes every value for `name`.
    pub fn remove(&mut self, name: &str) {
        self.entries.retain(|(n, _)| !n.eq_ignore_ascii_case(name));
    }

    /// First value for `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Every value for `name`, in insertion order.
    pub fn get_all<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.entries
            .iter()
            .filter(move |(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Returns `true` if at least one value exists for `name`.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Iterates over `(name, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    /// Number of name/value pairs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if there are no headers.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Groups values by lower-cased name, names sorted.
    #[must_use]
    pub fn to_multimap(&self) -> BTreeMap<String, Vec<String>> {
        let mut map: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for (name, value) in &self.entries {
            map.entry(name.to_ascii_lowercase())
                .or_default()
                .push(value.clone());
        }
        map
    }

    /// Renders one `name: v1, v2` line per header name, joined by newlines.
    #[must_use]
    pub fn format_lines(&self) -> String {
        self.to_multimap()
            .into_iter()
            .map(|(name, values)| format!("{name}: {}", values.join(", ")))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl<N, V> FromIterator<(N, V)> for Headers
where
    N: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (N, V)>>(iter: I) -> Self {
        let mut headers = Self::new();
        headers.extend(iter);
        headers
    }
}

impl<N, V> Extend<(N, V)> for Headers
where
    N: Into<String>,
    V: Into<String>,
{
    fn extend<I: IntoIterator<Item = (N, V)>>(&mut self, iter: I) {
        for (name, value) in iter {
            self.append(name, value);
        }
    }
}

impl From<&http::HeaderMap> for Headers {
    fn from(map: &http::HeaderMap) -> Self {
        map.iter()
            .filter_map(|(name, value)| value.to_str().ok().map(|v| (name.as_str(), v)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use assert2::check;

    use super::*;

    #[test]
    fn insert_replaces_case_insensitively() {
        let mut headers = Headers::new();
        headers.append("Accept", "text/plain");
        headers.append("accept", "text/html");
        headers.insert("ACCEPT", "application/json");

        check!(headers.len() == 1);
        check!(headers.get("accept") == Some("application/json"));
    }

    #[test]
    fn append_keeps_previous_values() {
        let mut headers = Headers::new();
        headers.append("X-Trace", "a");
        headers.append("x-trace", "b");

        check!(headers.get("X-Trace") == Some("a"));
        let values: Vec<_> = headers.get_all("X-TRACE").collect();
        check!(values == vec!["a", "b"]);
    }

    #[test]
    fn format_lines_groups_and_sorts() {
        let headers: Headers = [
            ("Client-Header-Name2", "yyyyyy"),
            ("Client-Header-Name1", "xxxxxx"),
            ("Accept", "a"),
            ("accept", "b"),
        ]
        .into_iter()
        .collect();

        check!(
            headers.format_lines()
                == "accept: a, b\nclient-header-name1: xxxxxx\nclient-header-name2: yyyyyy"
        );
    }

    #[test]
    fn format_lines_empty() {
        check!(Headers::new().format_lines().is_empty());
    }

    #[test]
    fn from_header_map() {
        let mut map = http::HeaderMap::new();
        map.append("x-a", http::HeaderValue::from_static("1"));
        map.append("x-a", http::HeaderValue::from_static("2"));

        let headers = Headers::from(&map);
        check!(headers.get_all("X-A").count() == 2);
    }
}
