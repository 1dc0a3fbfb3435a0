//! Restaurant patch validation
//!
//! Field rules live on [`RestaurantPatch`] (`validator` derive); this module
//! adds the caller-scope rules and flattens failures into a
//! `field → messages` map keyed by the wire (camelCase) field name.

use std::collections::BTreeMap;

use convert_case::{Case, Casing};
use shared::models::RestaurantPatch;
use validator::{Validate, ValidationErrors};

/// Field name → human readable messages
pub type FieldErrors = BTreeMap<String, Vec<String>>;

/// Who is writing the record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationScope {
    /// Owner updating their own restaurant
    Owner,
    /// Administrator updating any restaurant
    Admin,
    /// Owner creating a restaurant: full record, `name` required
    Create,
}

/// Check a candidate patch, returning it normalized when accepted
pub fn validate_patch(
    patch: RestaurantPatch,
    scope: ValidationScope,
) -> Result<RestaurantPatch, FieldErrors> {
    let patch = normalize(patch);

    let mut errors = match patch.validate() {
        Ok(()) => FieldErrors::new(),
        Err(e) => flatten(&e),
    };

    if matches!(scope, ValidationScope::Owner | ValidationScope::Create) && patch.status.is_some()
    {
        push(&mut errors, "status", "status can only be changed by an administrator");
    }
    if scope == ValidationScope::Create && patch.name.is_none() {
        push(&mut errors, "name", "name is required");
    }

    if errors.is_empty() {
        Ok(patch)
    } else {
        Err(errors)
    }
}

/// Trim surrounding whitespace from single-line text fields
fn normalize(mut patch: RestaurantPatch) -> RestaurantPatch {
    for field in [
        &mut patch.name,
        &mut patch.email,
        &mut patch.phone,
        &mut patch.website,
    ] {
        if let Some(value) = field.as_mut() {
            let trimmed = value.trim();
            if trimmed.len() != value.len() {
                *value = trimmed.to_string();
            }
        }
    }
    if let Some(cuisine) = patch.cuisine.as_mut() {
        for tag in cuisine.iter_mut() {
            *tag = tag.trim().to_string();
        }
    }
    patch
}

fn flatten(errors: &ValidationErrors) -> FieldErrors {
    let mut out = FieldErrors::new();
    for (field, list) in errors.field_errors() {
        let field = field.to_string().to_case(Case::Camel);
        for err in list.iter() {
            let message = err
                .message
                .as_ref()
                .map(|m| m.to_string())
                .unwrap_or_else(|| format!("{field} is invalid ({})", err.code));
            push(&mut out, &field, message);
        }
    }
    out
}

fn push(errors: &mut FieldErrors, field: &str, message: impl Into<String>) {
    errors
        .entry(field.to_string())
        .or_default()
        .push(message.into());
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::RestaurantStatus;

    #[test]
    fn test_empty_name_is_reported_on_name() {
        let patch = RestaurantPatch {
            name: Some("".into()),
            ..Default::default()
        };
        let errors = validate_patch(patch, ValidationScope::Owner).unwrap_err();
        assert_eq!(errors["name"], vec!["name must not be empty".to_string()]);
    }

    #[test]
    fn test_owner_cannot_set_status() {
        let patch = RestaurantPatch {
            status: Some(RestaurantStatus::Active),
            ..Default::default()
        };
        let errors = validate_patch(patch.clone(), ValidationScope::Owner).unwrap_err();
        assert!(errors.contains_key("status"));

        assert!(validate_patch(patch, ValidationScope::Admin).is_ok());
    }

    #[test]
    fn test_create_requires_name() {
        let errors =
            validate_patch(RestaurantPatch::default(), ValidationScope::Create).unwrap_err();
        assert_eq!(errors["name"], vec!["name is required".to_string()]);
    }

    #[test]
    fn test_field_names_are_camel_case() {
        let patch = RestaurantPatch {
            cover_photo: Some("not a url".into()),
            opening_hours: Some("x".repeat(501)),
            ..Default::default()
        };
        let errors = validate_patch(patch, ValidationScope::Admin).unwrap_err();
        assert!(errors.contains_key("coverPhoto"));
        assert!(errors.contains_key("openingHours"));
    }

    #[test]
    fn test_accepted_patch_is_trimmed() {
        let patch = RestaurantPatch {
            name: Some("  Blue Lotus ".into()),
            email: Some(" hello@bluelotus.test".into()),
            cuisine: Some(vec![" thai ".into()]),
            ..Default::default()
        };
        let accepted = validate_patch(patch, ValidationScope::Owner).unwrap();
        assert_eq!(accepted.name.as_deref(), Some("Blue Lotus"));
        assert_eq!(accepted.email.as_deref(), Some("hello@bluelotus.test"));
        assert_eq!(accepted.cuisine, Some(vec!["thai".to_string()]));
    }

    #[test]
    fn test_invalid_email_and_image() {
        let patch = RestaurantPatch {
            email: Some("nope".into()),
            images: Some(vec!["ftp://files.test/a.jpg".into()]),
            ..Default::default()
        };
        let errors = validate_patch(patch, ValidationScope::Owner).unwrap_err();
        assert!(errors.contains_key("email"));
        assert!(errors.contains_key("images"));
    }

    #[test]
    fn test_media_urls_must_be_http() {
        let patch = RestaurantPatch {
            logo: Some("javascript:alert(1)".into()),
            cover_photo: Some(format!("https://cdn.test/{}", "c".repeat(2100))),
            ..Default::default()
        };
        let errors = validate_patch(patch, ValidationScope::Admin).unwrap_err();
        assert!(errors.contains_key("logo"));
        assert!(errors.contains_key("coverPhoto"));
    }

    #[test]
    fn test_multibyte_cuisine_tag_accepted() {
        let patch = RestaurantPatch {
            cuisine: Some(vec!["อาหารไทยภาคเหนือและอาหารอีสานแบบดั้งเดิม".into()]),
            ..Default::default()
        };
        assert!(validate_patch(patch, ValidationScope::Owner).is_ok());
    }
}
