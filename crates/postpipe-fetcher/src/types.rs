use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One entry of the upstream posts array, kept as raw JSON.
///
/// Nothing about an entry is checked at fetch time. A post with a missing
/// or non-string body, a wrongly typed `id`, or an entry that is not an
/// object at all still decodes and is reported on its own by the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PostItem(Value);

impl PostItem {
    #[must_use]
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    #[must_use]
    pub fn as_value(&self) -> &Value {
        &self.0
    }

    #[must_use]
    pub fn is_object(&self) -> bool {
        self.0.is_object()
    }

    /// Upstream `id`, whatever its JSON type. `None` for non-object entries.
    #[must_use]
    pub fn id(&self) -> Option<&Value> {
        self.field("id")
    }

    /// Upstream `body`. A JSON `null` body is treated as absent.
    #[must_use]
    pub fn body(&self) -> Option<&Value> {
        self.field("body").filter(|v| !v.is_null())
    }

    fn field(&self, key: &str) -> Option<&Value> {
        self.0.as_object().and_then(|map| map.get(key))
    }
}

impl From<Value> for PostItem {
    fn from(value: Value) -> Self {
        Self(value)
    }
}
