use crate::direction::SortDirection;
use crate::request::{
    direction_parameter_name, sort_parameter_name, RequestContext, PAGE_PARAMETER,
};
use indexmap::IndexMap;

/// A query-parameter value: a single scalar or an ordered list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryValue {
    Scalar(String),
    List(Vec<String>),
}

impl QueryValue {
    /// Whether the value survives the persisted-parameter filter. Empty
    /// scalars are dropped; lists are kept whatever their contents.
    fn persists(&self) -> bool {
        match self {
            Self::Scalar(value) => !value.is_empty(),
            Self::List(_) => true,
        }
    }
}

impl From<&str> for QueryValue {
    fn from(value: &str) -> Self {
        Self::Scalar(value.to_string())
    }
}

impl From<String> for QueryValue {
    fn from(value: String) -> Self {
        Self::Scalar(value)
    }
}

impl From<Vec<String>> for QueryValue {
    fn from(values: Vec<String>) -> Self {
        Self::List(values)
    }
}

impl From<Vec<&str>> for QueryValue {
    fn from(values: Vec<&str>) -> Self {
        Self::List(values.into_iter().map(str::to_owned).collect())
    }
}

/// Build the query string for one header link.
///
/// Merges, in order: caller extras, then the ambient parameters that persist
/// across sorts, then the fresh sort/direction pair. A later entry wins on
/// key collision while the key keeps its first insertion position, so the
/// just-computed sort state always overrides caller or ambient collisions.
pub fn build_query_string<R: RequestContext + ?Sized>(
    request: &R,
    extra: &IndexMap<String, QueryValue>,
    sort_key: &str,
    direction: SortDirection,
    prefix: &str,
) -> String {
    let sort_name = sort_parameter_name(prefix);
    let direction_name = direction_parameter_name(prefix);

    let persisted = request.except(&[&sort_name, &direction_name, PAGE_PARAMETER]);

    let mut merged: IndexMap<String, QueryValue> = IndexMap::new();

    for (key, value) in extra {
        merged.insert(key.clone(), value.clone());
    }

    for (key, value) in persisted {
        if value.persists() {
            merged.insert(key, value);
        }
    }

    merged.insert(sort_name, QueryValue::Scalar(sort_key.to_string()));
    merged.insert(
        direction_name,
        QueryValue::Scalar(direction.as_str().to_string()),
    );

    serialize(&merged)
}

/// Serialize in insertion order. Lists use bracketed-index keys with the
/// brackets percent-encoded, matching standard URL-encoded form data.
fn serialize(parameters: &IndexMap<String, QueryValue>) -> String {
    let mut pairs = Vec::new();

    for (key, value) in parameters {
        match value {
            QueryValue::Scalar(scalar) => pairs.push(format!(
                "{}={}",
                urlencoding::encode(key),
                urlencoding::encode(scalar)
            )),
            QueryValue::List(items) => {
                for (index, item) in items.iter().enumerate() {
                    let indexed_key = format!("{key}[{index}]");
                    pairs.push(format!(
                        "{}={}",
                        urlencoding::encode(&indexed_key),
                        urlencoding::encode(item)
                    ));
                }
            }
        }
    }

    pairs.join("&")
}
