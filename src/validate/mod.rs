//! Declarative request validation.
//!
//! Each endpoint declares the shape of its input as a [`Schema`]; handlers
//! run the incoming JSON through [`validate`] and act on the first error
//! only. Errors carry dotted property paths (`instance.user`) so the error
//! mapping layer can turn them into fixed user-facing messages without
//! matching on strings at the call site — that happens once, in
//! [`ValidationFailure::from_property`].

pub mod schemas;

use chrono::DateTime;
use serde_json::Value;

/// Field types the schema set needs.
#[derive(Debug, Clone, Copy)]
pub enum FieldType {
    /// Non-empty string
    String,
    /// Integer (floats and numeric strings are rejected)
    Integer,
    /// Pair of non-negative integers: (winner's goals, loser's goals)
    ScorePair,
    /// RFC 3339 / ISO-8601 date-time string
    DateTime,
    /// String drawn from a fixed set
    Enum(&'static [&'static str]),
}

/// One field of a schema, checked in declaration order.
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub name: &'static str,
    pub ty: FieldType,
    pub required: bool,
}

/// Declarative shape of an endpoint's input.
#[derive(Debug, Clone, Copy)]
pub struct Schema {
    pub fields: &'static [FieldSpec],
}

/// A single failed check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dotted path of the offending field, e.g. `instance.user`
    pub property: String,
    /// The field name
    pub argument: String,
}

/// Outcome of validating one input object.
#[derive(Debug, Clone)]
pub struct ValidationReport {
    pub valid: bool,
    pub errors: Vec<ValidationError>,
}

impl ValidationReport {
    /// The failure kind derived from the first error, if any.
    pub fn first_failure(&self) -> Option<ValidationFailure> {
        self.errors
            .first()
            .map(|e| ValidationFailure::from_property(&e.property))
    }
}

fn type_check(value: &Value, ty: FieldType) -> bool {
    match ty {
        FieldType::String => value.as_str().is_some_and(|s| !s.is_empty()),
        FieldType::Integer => value.as_i64().is_some(),
        FieldType::ScorePair => value.as_array().is_some_and(|a| {
            a.len() == 2
                && a.iter()
                    .all(|v| v.as_u64().is_some_and(|n| u32::try_from(n).is_ok()))
        }),
        FieldType::DateTime => value
            .as_str()
            .is_some_and(|s| DateTime::parse_from_rfc3339(s).is_ok()),
        FieldType::Enum(allowed) => value.as_str().is_some_and(|s| allowed.contains(&s)),
    }
}

/// Check an input object against a schema.
///
/// Fields are checked in declaration order, so the first error is
/// deterministic. Unknown extra fields are ignored.
pub fn validate(instance: &Value, schema: &Schema) -> ValidationReport {
    let mut errors = Vec::new();

    let Some(object) = instance.as_object() else {
        return ValidationReport {
            valid: false,
            errors: vec![ValidationError {
                property: "instance".to_string(),
                argument: "instance".to_string(),
            }],
        };
    };

    for field in schema.fields {
        match object.get(field.name) {
            None | Some(Value::Null) => {
                if field.required {
                    errors.push(ValidationError {
                        property: format!("instance.{}", field.name),
                        argument: field.name.to_string(),
                    });
                }
            }
            Some(value) => {
                if !type_check(value, field.ty) {
                    errors.push(ValidationError {
                        property: format!("instance.{}", field.name),
                        argument: field.name.to_string(),
                    });
                }
            }
        }
    }

    ValidationReport {
        valid: errors.is_empty(),
        errors,
    }
}

/// The known ways validation can fail, one per schema field.
///
/// Anything not in this list (including a malformed root object) is
/// [`ValidationFailure::Unknown`] and surfaces as a generic server error
/// rather than leaking internal detail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationFailure {
    User,
    Season,
    Winner,
    Loser,
    Score,
    Date,
    Category,
    Unknown,
}

impl ValidationFailure {
    /// Map a dotted property path to its failure kind.
    pub fn from_property(property: &str) -> Self {
        match property {
            "instance.user" => ValidationFailure::User,
            "instance.season" => ValidationFailure::Season,
            "instance.winner" => ValidationFailure::Winner,
            "instance.loser" => ValidationFailure::Loser,
            "instance.score" => ValidationFailure::Score,
            "instance.date" => ValidationFailure::Date,
            "instance.category" => ValidationFailure::Category,
            _ => ValidationFailure::Unknown,
        }
    }

    /// The fixed user-facing message, or `None` for unclassified failures.
    pub fn message(&self) -> Option<&'static str> {
        match self {
            ValidationFailure::User => Some("Invalid value for \"user\""),
            ValidationFailure::Season => Some("Invalid value for \"season\""),
            ValidationFailure::Winner => Some("Invalid value for \"winner\""),
            ValidationFailure::Loser => Some("Invalid value for \"loser\""),
            ValidationFailure::Score => Some("Invalid value for \"score\""),
            ValidationFailure::Date => Some("Invalid value for \"date\""),
            ValidationFailure::Category => Some("Invalid value for \"category\""),
            ValidationFailure::Unknown => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_valid_add_match_body() {
        let report = validate(
            &json!({"winner": "alice", "loser": "bob", "score": [11, 7]}),
            &schemas::ADD_MATCH,
        );
        assert!(report.valid);
        assert!(report.errors.is_empty());
    }

    #[test]
    fn test_missing_required_field_named() {
        let report = validate(
            &json!({"winner": "alice", "loser": "bob"}),
            &schemas::ADD_MATCH,
        );
        assert!(!report.valid);
        assert_eq!(report.errors[0].property, "instance.score");
        assert_eq!(report.errors[0].argument, "score");
    }

    #[test]
    fn test_first_error_follows_declaration_order() {
        let report = validate(&json!({}), &schemas::ADD_MATCH);
        assert!(!report.valid);
        // winner is declared before loser and score
        assert_eq!(report.errors[0].property, "instance.winner");
        assert_eq!(report.first_failure(), Some(ValidationFailure::Winner));
    }

    #[test]
    fn test_score_shape_checks() {
        for bad in [
            json!({"winner": "a", "loser": "b", "score": [11]}),
            json!({"winner": "a", "loser": "b", "score": [11, 7, 3]}),
            json!({"winner": "a", "loser": "b", "score": [11, -2]}),
            json!({"winner": "a", "loser": "b", "score": ["11", "7"]}),
            json!({"winner": "a", "loser": "b", "score": "11-7"}),
        ] {
            let report = validate(&bad, &schemas::ADD_MATCH);
            assert!(!report.valid, "accepted {bad}");
            assert_eq!(report.errors[0].argument, "score");
        }
    }

    #[test]
    fn test_empty_string_rejected() {
        let report = validate(&json!({"user": ""}), &schemas::USER_QUERY);
        assert!(!report.valid);
        assert_eq!(report.first_failure(), Some(ValidationFailure::User));
    }

    #[test]
    fn test_optional_fields_may_be_absent() {
        let report = validate(&json!({"user": "alice"}), &schemas::USER_QUERY);
        assert!(report.valid);
    }

    #[test]
    fn test_season_must_be_integer() {
        let report = validate(
            &json!({"user": "alice", "season": "summer"}),
            &schemas::USER_QUERY,
        );
        assert!(!report.valid);
        assert_eq!(report.first_failure(), Some(ValidationFailure::Season));

        let report = validate(&json!({"user": "alice", "season": 2}), &schemas::USER_QUERY);
        assert!(report.valid);
    }

    #[test]
    fn test_date_must_be_rfc3339() {
        let report = validate(
            &json!({"winner": "a", "loser": "b", "score": [11, 7], "date": "yesterday"}),
            &schemas::ADD_MATCH,
        );
        assert!(!report.valid);
        assert_eq!(report.first_failure(), Some(ValidationFailure::Date));

        let report = validate(
            &json!({"winner": "a", "loser": "b", "score": [11, 7], "date": "2026-03-01T18:30:00Z"}),
            &schemas::ADD_MATCH,
        );
        assert!(report.valid);
    }

    #[test]
    fn test_category_enum() {
        let report = validate(&json!({"category": "goalsScored"}), &schemas::LEADERBOARD_QUERY);
        assert!(report.valid);

        let report = validate(&json!({"category": "bestHair"}), &schemas::LEADERBOARD_QUERY);
        assert!(!report.valid);
        assert_eq!(report.first_failure(), Some(ValidationFailure::Category));
    }

    #[test]
    fn test_non_object_instance_is_unclassified() {
        let report = validate(&json!("just a string"), &schemas::ADD_MATCH);
        assert!(!report.valid);
        assert_eq!(report.first_failure(), Some(ValidationFailure::Unknown));
    }

    #[test]
    fn test_unknown_property_has_no_message() {
        assert_eq!(ValidationFailure::from_property("instance.wat").message(), None);
        assert_eq!(
            ValidationFailure::from_property("instance.score").message(),
            Some("Invalid value for \"score\"")
        );
    }
}
