//!
//! Ordered key/value context attached to handles, contexts and records.
//!

use serde_json::Value;

/// Ordered mapping of field keys to JSON values.
///
/// Keys keep their first-seen position; assigning an existing key replaces
/// the value in place. Merging two sets appends the unseen keys of the later
/// set, which makes merges associative and deterministic.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldSet {
    entries: Vec<(String, Value)>,
}

impl FieldSet {
    /// An empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a set from a flat interleaved `[key, value, key, value, ..]`
    /// list.
    ///
    /// A trailing unpaired key is dropped. Non-string keys are rendered with
    /// their compact JSON representation so that a malformed call still
    /// produces a deterministic record.
    pub fn from_flat(kvs: &[Value]) -> Self {
        let mut set = Self::new();
        for pair in kvs.chunks_exact(2) {
            set.insert(Self::flat_key(&pair[0]), pair[1].clone());
        }
        set
    }

    fn flat_key(key: &Value) -> String {
        match key {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        }
    }

    /// Assign `value` to `key`, keeping the key's first-seen position on
    /// collision.
    pub fn insert(&mut self, key: impl Into<String>, value: Value) {
        let key = key.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, slot)) => *slot = value,
            None => self.entries.push((key, value)),
        }
    }

    /// Merge `other` into `self`; `other` wins on key collision.
    pub fn extend_from(&mut self, other: &Self) {
        for (key, value) in other.iter() {
            self.insert(key, value.clone());
        }
    }

    /// Entries in emission order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the set carries no fields.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, const N: usize> From<[(K, Value); N]> for FieldSet {
    fn from(pairs: [(K, Value); N]) -> Self {
        let mut set = Self::new();
        for (key, value) in pairs {
            set.insert(key, value);
        }
        set
    }
}

impl FromIterator<(String, Value)> for FieldSet {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        let mut set = Self::new();
        for (key, value) in iter {
            set.insert(key, value);
        }
        set
    }
}

/// Build a [`FieldSet`] from `key => value` pairs.
///
/// Values go through [`serde_json::json!`], so anything serializable works:
///
/// ```rust
/// let set = log_bridge::fields! { "port" => 8080, "tls" => false };
/// assert_eq!(set.len(), 2);
/// ```
#[macro_export]
macro_rules! fields {
    () => { $crate::logger::fields::FieldSet::new() };
    ($($key:expr => $value:expr),+ $(,)?) => {{
        let mut set = $crate::logger::fields::FieldSet::new();
        $(set.insert($key, $crate::serde_json::json!($value));)+
        set
    }};
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use serde_json::json;

    use super::FieldSet;

    #[test]
    fn insert_keeps_first_seen_position_with_last_value() {
        let mut set = FieldSet::new();
        set.insert("a", json!(1));
        set.insert("b", json!(2));
        set.insert("a", json!(3));

        let entries: Vec<_> = set.iter().collect();
        assert_eq!(entries, vec![("a", &json!(3)), ("b", &json!(2))]);
    }

    #[test]
    fn from_flat_pairs_up_the_list() {
        let set = FieldSet::from_flat(&[json!("k1"), json!("v1"), json!("k2"), json!(2)]);
        let entries: Vec<_> = set.iter().collect();
        assert_eq!(entries, vec![("k1", &json!("v1")), ("k2", &json!(2))]);
    }

    #[test]
    fn from_flat_drops_trailing_unpaired_key() {
        let set = FieldSet::from_flat(&[json!("k1"), json!("v1"), json!("dangling")]);
        assert_eq!(set.len(), 1);
        assert_eq!(set.iter().next(), Some(("k1", &json!("v1"))));
    }

    #[test]
    fn from_flat_coerces_non_string_keys() {
        let set = FieldSet::from_flat(&[json!(42), json!("v")]);
        assert_eq!(set.iter().next(), Some(("42", &json!("v"))));
    }

    #[test]
    fn extend_from_is_associative() {
        let a = FieldSet::from([("a", json!(1))]);
        let b = FieldSet::from([("b", json!(2)), ("a", json!(10))]);
        let c = FieldSet::from([("c", json!(3))]);

        let mut left = a.clone();
        left.extend_from(&b);
        left.extend_from(&c);

        let mut bc = b.clone();
        bc.extend_from(&c);
        let mut right = a;
        right.extend_from(&bc);

        assert_eq!(left, right);
        let entries: Vec<_> = left.iter().collect();
        assert_eq!(
            entries,
            vec![("a", &json!(10)), ("b", &json!(2)), ("c", &json!(3))]
        );
    }

    #[test]
    fn fields_macro_builds_in_order() {
        let set = crate::fields! { "x" => "y", "n" => 7 };
        let entries: Vec<_> = set.iter().collect();
        assert_eq!(entries, vec![("x", &json!("y")), ("n", &json!(7))]);
    }
}
