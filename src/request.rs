use crate::query::QueryValue;
use indexmap::IndexMap;

/// Name of the pagination parameter stripped from persisted query state.
pub const PAGE_PARAMETER: &str = "page";

/// Prefixed name of the sort query parameter.
pub fn sort_parameter_name(prefix: &str) -> String {
    format!("{prefix}sort")
}

/// Prefixed name of the direction query parameter.
pub fn direction_parameter_name(prefix: &str) -> String {
    format!("{prefix}direction")
}

/// Read access to the request a link is rendered against: its path and its
/// ordered query parameters.
///
/// Implement this once per web framework; [`MemoryRequest`] covers tests and
/// framework-free callers.
pub trait RequestContext {
    /// Request path without the query string, e.g. `/users`.
    fn path(&self) -> &str;

    /// Scalar value bound to `key`. Array-valued parameters yield `None`.
    fn get(&self, key: &str) -> Option<&str>;

    /// Whether `key` appears in the query at all.
    fn has(&self, key: &str) -> bool;

    /// The query parameters in order, with the named keys removed.
    fn except(&self, keys: &[&str]) -> IndexMap<String, QueryValue>;
}

/// Turns a path-and-query string into the final URL per host conventions.
pub trait UrlResolver {
    fn resolve(&self, path_and_query: &str) -> String;
}

/// Resolver that passes the path-and-query through untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityUrlResolver;

impl UrlResolver for IdentityUrlResolver {
    fn resolve(&self, path_and_query: &str) -> String {
        path_and_query.to_string()
    }
}

/// Ambient sort state read from the prefixed `sort`/`direction` parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SortState {
    pub active_sort: Option<String>,
    pub active_direction: Option<String>,
}

impl SortState {
    /// Read the state for one table, identified by its query prefix. The
    /// prefix used here must match the one used when writing the link's
    /// query string.
    pub fn from_request<R: RequestContext + ?Sized>(request: &R, prefix: &str) -> Self {
        Self {
            active_sort: request.get(&sort_parameter_name(prefix)).map(str::to_owned),
            active_direction: request
                .get(&direction_parameter_name(prefix))
                .map(str::to_owned),
        }
    }
}

/// In-memory request for tests and callers outside a web framework.
#[derive(Debug, Clone, Default)]
pub struct MemoryRequest {
    path: String,
    query: IndexMap<String, QueryValue>,
}

impl MemoryRequest {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            query: IndexMap::new(),
        }
    }

    /// Append a query parameter, keeping insertion order.
    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<QueryValue>) -> Self {
        self.query.insert(key.into(), value.into());
        self
    }
}

impl RequestContext for MemoryRequest {
    fn path(&self) -> &str {
        &self.path
    }

    fn get(&self, key: &str) -> Option<&str> {
        match self.query.get(key) {
            Some(QueryValue::Scalar(value)) => Some(value),
            _ => None,
        }
    }

    fn has(&self, key: &str) -> bool {
        self.query.contains_key(key)
    }

    fn except(&self, keys: &[&str]) -> IndexMap<String, QueryValue> {
        self.query
            .iter()
            .filter(|(key, _)| !keys.contains(&key.as_str()))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect()
    }
}
