use serde::Serialize;
use std::fmt;

/// A typed scalar extracted from a header key-value pair.
///
/// Header values arrive as raw text; the reader coerces each one into the
/// narrowest of three kinds. A value is never mutated after creation, and no
/// semantic validation (units, allowed keys) happens at this level.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ScalarValue {
    /// A whole number without a decimal point (e.g., `charge=0`).
    Integer(i64),
    /// A number containing a decimal point (e.g., `energy=-76.4`).
    Float(f64),
    /// Any value that is not numeric under the coercion rule.
    String(String),
}

impl ScalarValue {
    /// Coerces raw header text into a typed scalar.
    ///
    /// The rule is gated on the presence of a literal `.`: text containing a
    /// dot is attempted as a float and otherwise kept as a string; text
    /// without a dot is attempted as an integer and otherwise kept as a
    /// string. A value containing `.` is never re-attempted as an integer,
    /// so `"2.0"` stays `Float(2.0)` rather than collapsing to `Integer(2)`.
    ///
    /// # Arguments
    ///
    /// * `text` - The raw value text, with any enclosing quotes already removed.
    pub fn coerce(text: &str) -> Self {
        if text.contains('.') {
            match text.parse::<f64>() {
                Ok(f) => ScalarValue::Float(f),
                Err(_) => ScalarValue::String(text.to_string()),
            }
        } else {
            match text.parse::<i64>() {
                Ok(i) => ScalarValue::Integer(i),
                Err(_) => ScalarValue::String(text.to_string()),
            }
        }
    }

    /// Returns the string content if this value is a `String` variant.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ScalarValue::String(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for ScalarValue {
    /// Renders the value so that re-coercion preserves its kind.
    ///
    /// Floats always carry a decimal point (or exponent/non-finite marker);
    /// `2.0_f64` renders as `"2.0"`, not `"2"`, so a serialized header parses
    /// back to the same typed mapping.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScalarValue::Integer(i) => write!(f, "{}", i),
            ScalarValue::Float(x) => {
                let rendered = x.to_string();
                if rendered.chars().all(|c| c.is_ascii_digit() || c == '-') {
                    write!(f, "{}.0", rendered)
                } else {
                    write!(f, "{}", rendered)
                }
            }
            ScalarValue::String(s) => write!(f, "{}", s),
        }
    }
}

/// An insertion-ordered mapping from header key to typed scalar.
///
/// Header mappings are small (a handful of keys), so lookups scan an ordered
/// pair vector; preserving insertion order keeps serialization and tests
/// deterministic. Keys are unique: [`Metadata::insert`] rejects duplicates
/// instead of overwriting.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Metadata {
    entries: Vec<(String, ScalarValue)>,
}

impl Metadata {
    /// Creates an empty mapping.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty mapping with room for `capacity` entries.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
        }
    }

    /// Inserts a key-value pair, keeping insertion order.
    ///
    /// # Arguments
    ///
    /// * `key` - The header key.
    /// * `value` - The typed value for the key.
    ///
    /// # Return
    ///
    /// Returns `true` if the key was new. Returns `false` if the key is
    /// already present; the existing entry is left untouched.
    pub fn insert(&mut self, key: impl Into<String>, value: ScalarValue) -> bool {
        let key = key.into();
        if self.contains_key(&key) {
            return false;
        }
        self.entries.push((key, value));
        true
    }

    /// Looks up a value by key.
    pub fn get(&self, key: &str) -> Option<&ScalarValue> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    /// Returns `true` if the key is present.
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.iter().any(|(k, _)| k == key)
    }

    /// Iterates over `(key, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ScalarValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Returns the number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the mapping has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coerce_integer_without_dot() {
        assert_eq!(ScalarValue::coerce("42"), ScalarValue::Integer(42));
        assert_eq!(ScalarValue::coerce("-7"), ScalarValue::Integer(-7));
        assert_eq!(ScalarValue::coerce("0"), ScalarValue::Integer(0));
    }

    #[test]
    fn coerce_float_with_dot() {
        assert_eq!(ScalarValue::coerce("3.14"), ScalarValue::Float(3.14));
        assert_eq!(ScalarValue::coerce("-0.5"), ScalarValue::Float(-0.5));
        assert_eq!(ScalarValue::coerce(".5"), ScalarValue::Float(0.5));
    }

    #[test]
    fn dot_gates_integer_coercion() {
        // Numerically integral text with a dot must stay a float.
        assert_eq!(ScalarValue::coerce("2.0"), ScalarValue::Float(2.0));
    }

    #[test]
    fn coerce_falls_back_to_string() {
        assert_eq!(
            ScalarValue::coerce("water"),
            ScalarValue::String("water".to_string())
        );
        assert_eq!(
            ScalarValue::coerce("1.2.3"),
            ScalarValue::String("1.2.3".to_string())
        );
        // Exponent notation has no dot, fails the integer parse, stays text.
        assert_eq!(
            ScalarValue::coerce("1e5"),
            ScalarValue::String("1e5".to_string())
        );
        assert_eq!(ScalarValue::coerce(""), ScalarValue::String(String::new()));
    }

    #[test]
    fn display_keeps_float_kind_on_round_trip() {
        let rendered = ScalarValue::Float(2.0).to_string();
        assert_eq!(rendered, "2.0");
        assert_eq!(ScalarValue::coerce(&rendered), ScalarValue::Float(2.0));

        let rendered = ScalarValue::Float(-3.0).to_string();
        assert_eq!(rendered, "-3.0");

        let rendered = ScalarValue::Float(0.25).to_string();
        assert_eq!(ScalarValue::coerce(&rendered), ScalarValue::Float(0.25));
    }

    #[test]
    fn display_integer_and_string() {
        assert_eq!(ScalarValue::Integer(-12).to_string(), "-12");
        assert_eq!(
            ScalarValue::String("benzene".to_string()).to_string(),
            "benzene"
        );
    }

    #[test]
    fn metadata_preserves_insertion_order() {
        let mut metadata = Metadata::new();
        assert!(metadata.insert("comment", ScalarValue::String("water".into())));
        assert!(metadata.insert("charge", ScalarValue::Integer(0)));
        assert!(metadata.insert("energy", ScalarValue::Float(-76.4)));

        let keys: Vec<&str> = metadata.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["comment", "charge", "energy"]);
        assert_eq!(metadata.len(), 3);
    }

    #[test]
    fn metadata_rejects_duplicate_key() {
        let mut metadata = Metadata::new();
        assert!(metadata.insert("charge", ScalarValue::Integer(0)));
        assert!(!metadata.insert("charge", ScalarValue::Integer(1)));
        // The original entry wins.
        assert_eq!(metadata.get("charge"), Some(&ScalarValue::Integer(0)));
        assert_eq!(metadata.len(), 1);
    }

    #[test]
    fn metadata_lookup_and_emptiness() {
        let mut metadata = Metadata::with_capacity(2);
        assert!(metadata.is_empty());
        metadata.insert("pbc", ScalarValue::String("F F F".into()));
        assert!(metadata.contains_key("pbc"));
        assert!(!metadata.contains_key("cell"));
        assert_eq!(metadata.get("missing"), None);
        assert!(!metadata.is_empty());
    }
}
