//! Best-effort decoding from a parsed JSON value
//!
//! A field holding the wrong JSON type is left at its default and decoding
//! carries on with the rest of the document; only the first such mismatch is
//! kept. `null` always means "absent". Unknown object keys are ignored, and a
//! key that differs from the field name only in ASCII case still matches.
//! When several keys match one field, the last in document order wins.

use crate::validation::error::FieldPath;
use serde::Deserialize;
use serde_json::{Map, Value};

/// First shape mismatch seen while decoding one document
#[derive(Debug, Default)]
pub struct ShapeIssues {
    first: Option<(String, FieldPath)>,
}

impl ShapeIssues {
    pub fn record(&mut self, error: serde_json::Error, path: &FieldPath) {
        if self.first.is_none() {
            self.first = Some((error.to_string(), path.clone()));
        }
    }

    pub fn is_empty(&self) -> bool {
        self.first.is_none()
    }

    pub fn into_first(self) -> Option<(String, FieldPath)> {
        self.first
    }
}

/// Types that can be filled in from any JSON value without failing
pub trait LenientDecode: Default {
    fn decode_lenient(value: &Value, path: &FieldPath, issues: &mut ShapeIssues) -> Self;
}

macro_rules! lenient_scalar {
    ($($ty:ty),+) => {
        $(
            impl LenientDecode for $ty {
                fn decode_lenient(value: &Value, path: &FieldPath, issues: &mut ShapeIssues) -> Self {
                    if value.is_null() {
                        return Self::default();
                    }
                    match <$ty>::deserialize(value) {
                        Ok(decoded) => decoded,
                        Err(error) => {
                            issues.record(error, path);
                            Self::default()
                        }
                    }
                }
            }
        )+
    };
}

lenient_scalar!(String, i64, bool);

impl<T: LenientDecode> LenientDecode for Vec<T> {
    fn decode_lenient(value: &Value, path: &FieldPath, issues: &mut ShapeIssues) -> Self {
        match value {
            Value::Null => Vec::new(),
            Value::Array(items) => items
                .iter()
                .enumerate()
                .map(|(index, item)| T::decode_lenient(item, &path.index(index), issues))
                .collect(),
            other => {
                if let Err(error) = Vec::<Value>::deserialize(other) {
                    issues.record(error, path);
                }
                Vec::new()
            }
        }
    }
}

/// A present value is always `Some`, even when its contents mismatch
impl<T: LenientDecode> LenientDecode for Option<T> {
    fn decode_lenient(value: &Value, path: &FieldPath, issues: &mut ShapeIssues) -> Self {
        if value.is_null() {
            None
        } else {
            Some(T::decode_lenient(value, path, issues))
        }
    }
}

/// Field-by-field access to a JSON object for record decoders
pub struct ObjectReader<'v, 'i> {
    object: Option<&'v Map<String, Value>>,
    path: FieldPath,
    issues: &'i mut ShapeIssues,
}

impl<'v, 'i> ObjectReader<'v, 'i> {
    /// Non-object values are reported and read as an empty object
    pub fn open(value: &'v Value, path: &FieldPath, issues: &'i mut ShapeIssues) -> Self {
        let object = match value {
            Value::Object(map) => Some(map),
            Value::Null => None,
            other => {
                if let Err(error) = Map::<String, Value>::deserialize(other) {
                    issues.record(error, path);
                }
                None
            }
        };

        Self {
            object,
            path: path.clone(),
            issues,
        }
    }

    pub fn field<T: LenientDecode>(&mut self, name: &'static str) -> T {
        match self.lookup(name) {
            Some(value) => T::decode_lenient(value, &self.path.field(name), self.issues),
            None => T::default(),
        }
    }

    fn lookup(&self, name: &str) -> Option<&'v Value> {
        self.object?
            .iter()
            .rev()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Default, PartialEq)]
    struct Sample {
        name: String,
        count: i64,
        tags: Vec<String>,
        flag: Option<bool>,
    }

    impl LenientDecode for Sample {
        fn decode_lenient(value: &Value, path: &FieldPath, issues: &mut ShapeIssues) -> Self {
            let mut object = ObjectReader::open(value, path, issues);
            Self {
                name: object.field("name"),
                count: object.field("count"),
                tags: object.field("tags"),
                flag: object.field("flag"),
            }
        }
    }

    fn decode(value: Value) -> (Sample, ShapeIssues) {
        let mut issues = ShapeIssues::default();
        let sample = Sample::decode_lenient(&value, &FieldPath::root(), &mut issues);
        (sample, issues)
    }

    #[test]
    fn test_well_typed_object() {
        let (sample, issues) = decode(json!({
            "name": "acme", "count": 3, "tags": ["a", "b"], "flag": true, "extra": 1
        }));

        assert!(issues.is_empty());
        assert_eq!(
            sample,
            Sample {
                name: "acme".into(),
                count: 3,
                tags: vec!["a".into(), "b".into()],
                flag: Some(true),
            }
        );
    }

    #[test]
    fn test_mismatched_field_defaults_and_rest_continues() {
        let (sample, issues) = decode(json!({"name": 5, "count": 2, "tags": ["x", 7]}));

        assert_eq!(sample.name, "");
        assert_eq!(sample.count, 2);
        assert_eq!(sample.tags, vec!["x".to_string(), String::new()]);

        let (message, path) = issues.into_first().unwrap();
        assert!(message.contains("invalid type"));
        assert_eq!(path.to_string(), "name");
    }

    #[test]
    fn test_only_first_mismatch_is_kept() {
        let (_, issues) = decode(json!({"name": [], "count": "many"}));
        let (_, path) = issues.into_first().unwrap();
        assert_eq!(path.to_string(), "name");
    }

    #[test]
    fn test_null_means_absent() {
        let (sample, issues) = decode(json!({"name": null, "tags": null, "flag": null}));
        assert!(issues.is_empty());
        assert_eq!(sample, Sample::default());
    }

    #[test]
    fn test_non_object_record() {
        let (sample, issues) = decode(json!("not an object"));
        assert_eq!(sample, Sample::default());
        assert!(!issues.is_empty());
    }

    #[test]
    fn test_fractional_number_for_integer() {
        let (sample, issues) = decode(json!({"count": 1.5}));
        assert_eq!(sample.count, 0);
        assert!(!issues.is_empty());
    }

    #[test]
    fn test_case_insensitive_key_match() {
        let (sample, issues) = decode(json!({"NAME": "acme", "Count": 4}));
        assert!(issues.is_empty());
        assert_eq!(sample.name, "acme");
        assert_eq!(sample.count, 4);
    }

    #[test]
    fn test_last_matching_key_wins() {
        let parse = |text: &str| serde_json::from_str::<Value>(text).unwrap();

        let (sample, _) = decode(parse(r#"{"NAME": "upper", "name": "exact"}"#));
        assert_eq!(sample.name, "exact");

        let (sample, _) = decode(parse(r#"{"name": "exact", "NAME": "upper"}"#));
        assert_eq!(sample.name, "upper");
    }

    #[test]
    fn test_present_option_with_wrong_type_is_some_default() {
        let mut issues = ShapeIssues::default();
        let value: Option<bool> =
            Option::<bool>::decode_lenient(&json!("yes"), &FieldPath::root(), &mut issues);
        assert_eq!(value, Some(false));
        assert!(!issues.is_empty());
    }
}
