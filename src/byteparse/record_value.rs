use serde::Serialize;
use serde::Serializer;
use serde::ser::SerializeMap;

/// One decoded field value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    UInt(u64),
    Int(i64),
    Bytes(Vec<u8>),
    Record(Record),
}

impl Value {
    /// Integer view used by length templates. Unsigned values that do not
    /// fit in `i64`, and non-scalar values, have none.
    #[must_use]
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::UInt(v) => i64::try_from(*v).ok(),
            Value::Int(v) => Some(*v),
            Value::Bytes(_) | Value::Record(_) => None,
        }
    }

    #[must_use]
    pub fn as_uint(&self) -> Option<u64> {
        match self {
            Value::UInt(v) => Some(*v),
            Value::Int(v) => u64::try_from(*v).ok(),
            Value::Bytes(_) | Value::Record(_) => None,
        }
    }

    #[must_use]
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Value::Bytes(bytes) => Some(bytes),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_record(&self) -> Option<&Record> {
        match self {
            Value::Record(record) => Some(record),
            _ => None,
        }
    }
}

/// Decoded output record. Field order follows the schema, so serialized
/// output is stable across runs.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    fields: Vec<(String, Value)>,
}

impl Record {
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, value)| value)
    }

    /// Insert or replace a field value.
    pub fn set(&mut self, name: &str, value: Value) {
        match self.fields.iter_mut().find(|(field, _)| field == name) {
            Some((_, slot)) => *slot = value,
            None => self.fields.push((name.to_string(), value)),
        }
    }

    #[must_use]
    pub fn int(&self, name: &str) -> Option<i64> {
        self.get(name).and_then(Value::as_int)
    }

    #[must_use]
    pub fn uint(&self, name: &str) -> Option<u64> {
        self.get(name).and_then(Value::as_uint)
    }

    #[must_use]
    pub fn bytes(&self, name: &str) -> Option<&[u8]> {
        self.get(name).and_then(Value::as_bytes)
    }

    #[must_use]
    pub fn record(&self, name: &str) -> Option<&Record> {
        self.get(name).and_then(Value::as_record)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields
            .iter()
            .map(|(name, value)| (name.as_str(), value))
    }
}

impl Serialize for Record {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (name, value) in &self.fields {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_replaces_in_place() {
        let mut record = Record::default();
        record.set("N", Value::UInt(1));
        record.set("M", Value::UInt(2));
        record.set("N", Value::UInt(9));
        assert_eq!(record.uint("N"), Some(9));
        assert_eq!(record.len(), 2);
        let order: Vec<&str> = record.iter().map(|(name, _)| name).collect();
        assert_eq!(order, vec!["N", "M"]);
    }

    #[test]
    fn integer_views() {
        let mut record = Record::default();
        record.set("A", Value::UInt(3));
        record.set("B", Value::Int(-3));
        record.set("C", Value::Bytes(vec![1]));
        assert_eq!(record.int("A"), Some(3));
        assert_eq!(record.int("B"), Some(-3));
        assert_eq!(record.int("C"), None);
        assert_eq!(record.uint("B"), None);
    }

    #[test]
    fn serializes_as_ordered_map() {
        let mut inner = Record::default();
        inner.set("Len", Value::UInt(3));
        let mut record = Record::default();
        record.set("Head", Value::UInt(1));
        record.set("Data", Value::Bytes(vec![2]));
        record.set("Nested", Value::Record(inner));
        assert_eq!(
            serde_json::to_string(&record).unwrap(),
            r#"{"Head":1,"Data":[2],"Nested":{"Len":3}}"#
        );
    }
}
