use serde_json::{Map, Value};

/// Tolerant view into a report subtree.
///
/// Every accessor returns another `Node` (or `None` for leaves), so chains like
/// `node.get("details").get("longestChain").f64("duration")` never fail: a
/// missing segment anywhere simply yields an absent node.
#[derive(Debug, Clone, Copy)]
pub struct Node<'a> {
    value: Option<&'a Value>,
}

impl<'a> Node<'a> {
    pub fn new(value: &'a Value) -> Self {
        Self { value: Some(value) }
    }

    pub fn absent() -> Self {
        Self { value: None }
    }

    /// Step into an object key
    pub fn get(&self, key: &str) -> Node<'a> {
        Node {
            value: self.value.and_then(|v| v.get(key)),
        }
    }

    /// Step into an array index
    pub fn index(&self, idx: usize) -> Node<'a> {
        Node {
            value: self.value.and_then(|v| v.get(idx)),
        }
    }

    /// Follow a sequence of object keys
    pub fn path(&self, segments: &[&str]) -> Node<'a> {
        segments.iter().fold(*self, |node, key| node.get(key))
    }

    /// Present and not JSON `null`
    pub fn exists(&self) -> bool {
        matches!(self.value, Some(v) if !v.is_null())
    }

    pub fn value(&self) -> Option<&'a Value> {
        self.value.filter(|v| !v.is_null())
    }

    pub fn as_str(&self) -> Option<&'a str> {
        self.value.and_then(Value::as_str)
    }

    pub fn as_f64(&self) -> Option<f64> {
        self.value.and_then(Value::as_f64)
    }

    pub fn as_object(&self) -> Option<&'a Map<String, Value>> {
        self.value.and_then(Value::as_object)
    }

    pub fn as_array(&self) -> Option<&'a Vec<Value>> {
        self.value.and_then(Value::as_array)
    }

    /// Shorthand for `self.get(key).as_str()`
    pub fn str(&self, key: &str) -> Option<&'a str> {
        self.get(key).as_str()
    }

    /// Shorthand for `self.get(key).as_f64()`
    pub fn f64(&self, key: &str) -> Option<f64> {
        self.get(key).as_f64()
    }

    /// Array elements as nodes; empty when the node is not an array
    pub fn items(self) -> impl Iterator<Item = Node<'a>> + 'a {
        self.as_array()
            .into_iter()
            .flat_map(|items| items.iter().map(Node::new))
    }

    /// Object entries in document order; empty when the node is not an object
    pub fn entries(self) -> impl Iterator<Item = (&'a str, Node<'a>)> + 'a {
        self.as_object()
            .into_iter()
            .flat_map(|map| map.iter().map(|(k, v)| (k.as_str(), Node::new(v))))
    }

    /// Non-empty array
    pub fn has_items(&self) -> bool {
        self.as_array().is_some_and(|items| !items.is_empty())
    }

    /// Render a scalar the way it appears in the report (integers without a
    /// fractional part, strings unquoted)
    pub fn display(&self) -> Option<String> {
        match self.value? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }
}
