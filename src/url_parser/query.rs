use std::collections::HashMap;

/// Key/value lookup over a URL's query parameters
///
/// The lookup is a snapshot of the ordered parameter list taken when the URL
/// was parsed. When a key repeats, the last occurrence wins here while the
/// ordered list on [`Url`](crate::Url) keeps every occurrence. Nothing
/// resyncs the two, which is why `Url` offers no way to change its
/// parameters after construction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParameters {
    parameters: HashMap<String, String>,
}

impl QueryParameters {
    pub fn new(parameters: &[(String, String)]) -> Self {
        let parameters = parameters
            .iter()
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();
        Self { parameters }
    }

    pub fn has(&self, key: &str) -> bool {
        self.parameters.contains_key(key)
    }

    /// Value for `key`, or an empty string when it is absent.
    pub fn get(&self, key: &str) -> &str {
        self.get_or(key, "")
    }

    pub fn get_or<'a>(&'a self, key: &str, default_value: &'a str) -> &'a str {
        self.parameters
            .get(key)
            .map(String::as_str)
            .unwrap_or(default_value)
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.parameters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parameters.is_empty()
    }
}
