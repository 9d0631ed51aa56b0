//! Query-string building for tool handlers.
//!
//! Handlers compose backend-relative paths with query strings before the
//! request primitive sees them, so the primitive never has to re-encode.
//! The Currents API expects repeated keys for array filters, with a `[]`
//! suffix on some of them (`tag[]=a&tag[]=b`).

use url::form_urlencoded;

/// An ordered collection of query pairs.
#[derive(Debug, Default)]
pub struct QueryBuilder {
    pairs: Vec<(String, String)>,
}

impl QueryBuilder {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a key/value pair.
    pub fn append(&mut self, key: &str, value: impl ToString) -> &mut Self {
        self.pairs.push((key.to_string(), value.to_string()));
        self
    }

    /// Append a pair only when the value is present.
    pub fn append_opt(&mut self, key: &str, value: Option<impl ToString>) -> &mut Self {
        if let Some(value) = value {
            self.append(key, value);
        }
        self
    }

    /// Append one pair per value under the same key.
    pub fn append_each<I>(&mut self, key: &str, values: I) -> &mut Self
    where
        I: IntoIterator,
        I::Item: ToString,
    {
        for value in values {
            self.append(key, value);
        }
        self
    }

    /// Returns true if no pairs have been appended.
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Encode the pairs as a query string (no leading `?`).
    pub fn encode(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        for (key, value) in &self.pairs {
            serializer.append_pair(key, value);
        }
        serializer.finish()
    }

    /// Join the pairs onto a path, omitting the `?` when there are none.
    pub fn into_path(&self, path: &str) -> String {
        if self.is_empty() {
            path.to_string()
        } else {
            format!("{path}?{}", self.encode())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_builder_leaves_path_untouched() {
        let query = QueryBuilder::new();
        assert_eq!(query.into_path("projects"), "projects");
    }

    #[test]
    fn pairs_are_encoded_in_insertion_order() {
        let mut query = QueryBuilder::new();
        query.append("limit", 10).append("branch", "main");
        assert_eq!(query.into_path("runs"), "runs?limit=10&branch=main");
    }

    #[test]
    fn values_are_percent_encoded() {
        let mut query = QueryBuilder::new();
        query.append("search", "fix: flaky & slow");
        assert_eq!(query.encode(), "search=fix%3A+flaky+%26+slow");
    }

    #[test]
    fn append_opt_skips_none() {
        let mut query = QueryBuilder::new();
        query
            .append_opt("branch", None::<String>)
            .append_opt("limit", Some(5));
        assert_eq!(query.encode(), "limit=5");
    }

    #[test]
    fn append_each_repeats_the_key() {
        let mut query = QueryBuilder::new();
        query.append_each("tag[]", ["smoke", "nightly"]);
        assert_eq!(query.encode(), "tag%5B%5D=smoke&tag%5B%5D=nightly");
    }
}
