use serde::{Deserialize, Serialize};

use crate::errors::ModelError;

/// A single product/contact record.
///
/// Field order matters: the collection is persisted as human-readable JSON and
/// keys are written in declaration order, matching the legacy on-disk layout.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Product {
    /// Wall clock in milliseconds at creation time. Unique only as far as
    /// clock resolution goes.
    pub id: i64,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", rename = "type")]
    pub kind: Option<String>,
    pub phone: String,
    pub email: String,
}

/// Create payload: everything optional at the wire level so that missing
/// fields reach the presence check instead of failing deserialization. The
/// server assigns `id`.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct ProductInput {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub time: Option<String>,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
}

/// Normalized form of a record name used for duplicate detection:
/// whitespace-trimmed, lower-cased.
pub fn dedup_key(name: &str) -> String {
    name.trim().to_lowercase()
}

impl Product {
    pub fn dedup_key(&self) -> String {
        dedup_key(&self.name)
    }
}

impl ProductInput {
    /// Presence checks for `name`, `email` and `phone`. The name must be
    /// non-empty after trimming (it is the dedup key); email and phone only
    /// have to be non-empty. Optional fields pass through untouched.
    pub fn validate(&self) -> Result<(), ModelError> {
        let empty = |v: &Option<String>| v.as_deref().map_or(true, str::is_empty);
        if self.name.as_deref().map_or(true, |s| s.trim().is_empty())
            || empty(&self.email)
            || empty(&self.phone)
        {
            return Err(ModelError::Validation("name, email and phone are required".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_input() -> ProductInput {
        ProductInput {
            name: Some("Acme".into()),
            email: Some("a@x.com".into()),
            phone: Some("1".into()),
            ..Default::default()
        }
    }

    #[test]
    fn validate_accepts_complete_input() {
        assert!(full_input().validate().is_ok());
    }

    #[test]
    fn validate_rejects_missing_or_empty_required_fields() {
        let mut input = full_input();
        input.email = None;
        assert!(matches!(input.validate(), Err(ModelError::Validation(_))));

        let mut input = full_input();
        input.phone = Some("".into());
        assert!(matches!(input.validate(), Err(ModelError::Validation(_))));

        assert!(ProductInput::default().validate().is_err());
    }

    #[test]
    fn validate_trims_name_but_not_email_or_phone() {
        // a whitespace-only name trims down to the empty dedup key
        let mut input = full_input();
        input.name = Some("   ".into());
        assert!(matches!(input.validate(), Err(ModelError::Validation(_))));

        // email and phone only need to be non-empty
        let mut input = full_input();
        input.email = Some("  ".into());
        input.phone = Some(" ".into());
        assert!(input.validate().is_ok());
    }

    #[test]
    fn dedup_key_trims_and_lowercases() {
        assert_eq!(dedup_key("  Acme "), "acme");
        assert_eq!(dedup_key("acme"), "acme");
    }

    #[test]
    fn serializes_keys_in_legacy_order_and_drops_absent_optionals() {
        let p = Product {
            id: 1,
            name: "Acme".into(),
            message: None,
            time: None,
            kind: Some("vendor".into()),
            phone: "1".into(),
            email: "a@x.com".into(),
        };
        let json = serde_json::to_string(&p).expect("serialize");
        assert_eq!(
            json,
            r#"{"id":1,"name":"Acme","type":"vendor","phone":"1","email":"a@x.com"}"#
        );
    }

    #[test]
    fn deserializes_record_without_optionals() {
        let p: Product =
            serde_json::from_str(r#"{"id":2,"name":"N","phone":"1","email":"e"}"#).expect("parse");
        assert_eq!(p.message, None);
        assert_eq!(p.kind, None);
    }

    #[test]
    fn input_type_field_round_trips_through_rename() {
        let input: ProductInput =
            serde_json::from_str(r#"{"name":"N","email":"e","phone":"1","type":"contact"}"#)
                .expect("parse");
        assert_eq!(input.kind.as_deref(), Some("contact"));
    }
}
