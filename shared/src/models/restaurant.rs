//! Restaurant Profile Model

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use validator::{Validate, ValidationError};

/// Cuisine tags and other short identifiers
pub const MAX_SHORT_TEXT_LEN: usize = 100;

/// URLs / image paths
pub const MAX_URL_LEN: usize = 2048;

/// Restaurant lifecycle flag (administrator-settable)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RestaurantStatus {
    #[default]
    Pending,
    Active,
    Inactive,
    Blocked,
}

impl RestaurantStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RestaurantStatus::Pending => "pending",
            RestaurantStatus::Active => "active",
            RestaurantStatus::Inactive => "inactive",
            RestaurantStatus::Blocked => "blocked",
        }
    }
}

impl fmt::Display for RestaurantStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for RestaurantStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(RestaurantStatus::Pending),
            "active" => Ok(RestaurantStatus::Active),
            "inactive" => Ok(RestaurantStatus::Inactive),
            "blocked" => Ok(RestaurantStatus::Blocked),
            other => Err(format!("unknown restaurant status '{other}'")),
        }
    }
}

/// Persisted restaurant profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RestaurantProfile {
    pub id: String,
    /// Owning principal, fixed at creation
    pub owner: String,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub description: Option<String>,
    #[serde(default)]
    pub cuisine: Vec<String>,
    pub website: Option<String>,
    pub opening_hours: Option<String>,
    pub logo: Option<String>,
    pub cover_photo: Option<String>,
    /// Gallery, append-only
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub status: RestaurantStatus,
    pub created_at: i64,
    pub updated_at: i64,
}

impl RestaurantProfile {
    /// Build a fresh profile from a validated creation patch.
    ///
    /// Fields missing from the patch take their empty defaults; `status`
    /// falls back to [`RestaurantStatus::Pending`].
    pub fn from_patch(id: String, owner: String, patch: RestaurantPatch, now: i64) -> Self {
        Self {
            id,
            owner,
            name: patch.name.unwrap_or_default(),
            email: patch.email,
            phone: patch.phone,
            address: patch.address,
            description: patch.description,
            cuisine: patch.cuisine.unwrap_or_default(),
            website: patch.website,
            opening_hours: patch.opening_hours,
            logo: patch.logo,
            cover_photo: patch.cover_photo,
            images: patch.images.unwrap_or_default(),
            status: patch.status.unwrap_or_default(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply a partial update: only fields present in `patch` overwrite.
    pub fn apply_patch(&mut self, patch: RestaurantPatch, now: i64) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(email) = patch.email {
            self.email = Some(email);
        }
        if let Some(phone) = patch.phone {
            self.phone = Some(phone);
        }
        if let Some(address) = patch.address {
            self.address = Some(address);
        }
        if let Some(description) = patch.description {
            self.description = Some(description);
        }
        if let Some(cuisine) = patch.cuisine {
            self.cuisine = cuisine;
        }
        if let Some(website) = patch.website {
            self.website = Some(website);
        }
        if let Some(opening_hours) = patch.opening_hours {
            self.opening_hours = Some(opening_hours);
        }
        if let Some(logo) = patch.logo {
            self.logo = Some(logo);
        }
        if let Some(cover_photo) = patch.cover_photo {
            self.cover_photo = Some(cover_photo);
        }
        if let Some(images) = patch.images {
            self.images = images;
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        self.updated_at = now;
    }
}

/// Caller-supplied restaurant fields (wire shape of the `data` part)
///
/// Every field is optional. Unknown keys (including `owner` and `id`) are
/// ignored, which keeps those fields immutable through this payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RestaurantUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cuisine: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opening_hours: Option<String>,
    /// Ignored: the logo is only ever set from an uploaded file
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover_photo: Option<String>,
    /// Ignored: the gallery is only ever extended from uploaded files
    #[serde(skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<RestaurantStatus>,
}

/// Field set handed to the store as a partial update
///
/// Produced by reconciliation, checked by [`Validate`], applied with
/// partial-update semantics (`None` = leave the stored value untouched).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default, rename_all = "camelCase")]
pub struct RestaurantPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(
        custom(function = "not_blank"),
        length(max = 200, message = "name must be at most 200 characters")
    )]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(
        email(message = "email must be a valid email address"),
        length(max = 254, message = "email must be at most 254 characters")
    )]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, max = 100, message = "phone must be between 1 and 100 characters"))]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 500, message = "address must be at most 500 characters"))]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 2000, message = "description must be at most 2000 characters"))]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(
        length(max = 20, message = "cuisine accepts at most 20 entries"),
        custom(function = "validate_cuisine_tags")
    )]
    pub cuisine: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(
        url(message = "website must be a valid URL"),
        length(max = 2048, message = "website must be at most 2048 characters")
    )]
    pub website: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 500, message = "openingHours must be at most 500 characters"))]
    pub opening_hours: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(custom(function = "validate_logo_url"))]
    pub logo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(custom(function = "validate_cover_photo_url"))]
    pub cover_photo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(custom(function = "validate_image_urls"))]
    pub images: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<RestaurantStatus>,
}

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut err = ValidationError::new("blank");
        err.message = Some("name must not be empty".into());
        return Err(err);
    }
    Ok(())
}

fn validate_cuisine_tags(tags: &[String]) -> Result<(), ValidationError> {
    for tag in tags {
        if tag.trim().is_empty() || tag.chars().count() > MAX_SHORT_TEXT_LEN {
            let mut err = ValidationError::new("cuisine_tag");
            err.message = Some(
                format!("cuisine entries must be between 1 and {MAX_SHORT_TEXT_LEN} characters")
                    .into(),
            );
            return Err(err);
        }
    }
    Ok(())
}

/// Media references are absolute http(s) URLs no longer than [`MAX_URL_LEN`]
fn is_media_url(url: &str) -> bool {
    url.len() <= MAX_URL_LEN
        && url::Url::parse(url)
            .map(|u| matches!(u.scheme(), "http" | "https"))
            .unwrap_or(false)
}

fn media_url_error(message: String) -> ValidationError {
    let mut err = ValidationError::new("media_url");
    err.message = Some(message.into());
    err
}

fn validate_logo_url(url: &str) -> Result<(), ValidationError> {
    if !is_media_url(url) {
        return Err(media_url_error(format!(
            "logo must be a valid http(s) URL of at most {MAX_URL_LEN} characters"
        )));
    }
    Ok(())
}

fn validate_cover_photo_url(url: &str) -> Result<(), ValidationError> {
    if !is_media_url(url) {
        return Err(media_url_error(format!(
            "coverPhoto must be a valid http(s) URL of at most {MAX_URL_LEN} characters"
        )));
    }
    Ok(())
}

fn validate_image_urls(urls: &[String]) -> Result<(), ValidationError> {
    for (idx, url) in urls.iter().enumerate() {
        if !is_media_url(url) {
            return Err(media_url_error(format!(
                "images[{idx}] must be a valid http(s) URL"
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_accepts_partial_camel_case_payload() {
        let json = r#"{"name":"Blue Lotus","coverPhoto":"https://cdn.test/x.jpg","owner":"someone-else"}"#;
        let update: RestaurantUpdate = serde_json::from_str(json).unwrap();
        assert_eq!(update.name.as_deref(), Some("Blue Lotus"));
        assert_eq!(update.cover_photo.as_deref(), Some("https://cdn.test/x.jpg"));
        assert!(update.images.is_none());
        assert!(update.status.is_none());
    }

    #[test]
    fn test_update_rejects_unknown_status() {
        let json = r#"{"status":"deleted"}"#;
        assert!(serde_json::from_str::<RestaurantUpdate>(json).is_err());
    }

    #[test]
    fn test_status_round_trips_through_str() {
        for status in [
            RestaurantStatus::Pending,
            RestaurantStatus::Active,
            RestaurantStatus::Inactive,
            RestaurantStatus::Blocked,
        ] {
            assert_eq!(status.as_str().parse::<RestaurantStatus>(), Ok(status));
        }
        assert!("archived".parse::<RestaurantStatus>().is_err());
    }

    #[test]
    fn test_apply_patch_only_touches_present_fields() {
        let mut profile = RestaurantProfile::from_patch(
            "r-1".into(),
            "owner-1".into(),
            RestaurantPatch {
                name: Some("Old".into()),
                logo: Some("https://cdn.test/logo.jpg".into()),
                images: Some(vec!["https://cdn.test/a.jpg".into()]),
                ..Default::default()
            },
            1,
        );

        profile.apply_patch(
            RestaurantPatch {
                name: Some("New".into()),
                ..Default::default()
            },
            2,
        );

        assert_eq!(profile.name, "New");
        assert_eq!(profile.logo.as_deref(), Some("https://cdn.test/logo.jpg"));
        assert_eq!(profile.images, vec!["https://cdn.test/a.jpg".to_string()]);
        assert_eq!(profile.owner, "owner-1");
        assert_eq!(profile.created_at, 1);
        assert_eq!(profile.updated_at, 2);
    }

    #[test]
    fn test_patch_validation_flags_blank_name() {
        let patch = RestaurantPatch {
            name: Some("   ".into()),
            ..Default::default()
        };
        let errors = patch.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("name"));
    }

    #[test]
    fn test_patch_validation_flags_bad_image_url() {
        let patch = RestaurantPatch {
            images: Some(vec![
                "https://cdn.test/a.jpg".into(),
                "not a url".into(),
            ]),
            ..Default::default()
        };
        let errors = patch.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("images"));
    }

    #[test]
    fn test_patch_validation_rejects_non_http_cover_and_logo() {
        let patch = RestaurantPatch {
            logo: Some("ftp://cdn.test/logo.jpg".into()),
            cover_photo: Some("javascript:alert(1)".into()),
            ..Default::default()
        };
        let errors = patch.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("logo"));
        assert!(fields.contains_key("cover_photo"));
    }

    #[test]
    fn test_patch_validation_rejects_overlong_cover_photo() {
        let long = format!("https://cdn.test/{}.jpg", "a".repeat(MAX_URL_LEN));
        let patch = RestaurantPatch {
            cover_photo: Some(long),
            ..Default::default()
        };
        let errors = patch.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("cover_photo"));

        let ok = RestaurantPatch {
            cover_photo: Some("https://cdn.test/cover.jpg".into()),
            logo: Some("http://cdn.test/logo.jpg".into()),
            ..Default::default()
        };
        assert!(ok.validate().is_ok());
    }

    #[test]
    fn test_cuisine_tag_length_counts_characters() {
        // 37 characters, 111 bytes in UTF-8
        let thai = "อาหารไทย".repeat(4) + "ต้มยำ";
        assert!(thai.chars().count() <= MAX_SHORT_TEXT_LEN);
        assert!(thai.len() > MAX_SHORT_TEXT_LEN);
        let patch = RestaurantPatch {
            cuisine: Some(vec![thai]),
            ..Default::default()
        };
        assert!(patch.validate().is_ok());

        let too_long = RestaurantPatch {
            cuisine: Some(vec!["ก".repeat(MAX_SHORT_TEXT_LEN + 1)]),
            ..Default::default()
        };
        assert!(too_long.validate().unwrap_err().field_errors().contains_key("cuisine"));
    }

    #[test]
    fn test_empty_patch_is_valid() {
        let patch = RestaurantPatch::default();
        assert!(patch.validate().is_ok());
    }
}
