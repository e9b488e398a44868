use serde_json::Value;

/// A flat stored record: attribute name to JSON value.
pub type Item = serde_json::Map<String, Value>;

/// Partition-key equality condition for an indexed lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyCondition {
    pub attribute: String,
    pub value: String,
}

/// The document-store operations the router depends on. The production
/// implementation lives with the Lambda binary; tests substitute in-memory
/// fakes. `put` is an unconditional upsert keyed by the item's primary key.
pub trait DocumentStore {
    fn scan(&self, table: &str, projection: Option<&str>) -> Result<Vec<Item>, String>;

    fn query(&self, table: &str, condition: &KeyCondition) -> Result<Vec<Item>, String>;

    fn put(&self, table: &str, item: Item) -> Result<(), String>;
}
