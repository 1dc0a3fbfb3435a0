//! Update Reconciler
//!
//! Merges caller-supplied fields, freshly uploaded media URLs and the
//! stored record into one candidate patch.
//!
//! Rules:
//! 1. Caller `images` and `logo` are dropped; media only ever comes from uploads.
//!    A caller `coverPhoto` survives and wins over the default below.
//! 2. Uploaded logo → `logo`; no upload leaves `logo` out of the patch.
//! 3. New images → `images = existing ++ uploaded`, `coverPhoto` defaults to the
//!    first uploaded image.
//! 4. No new images → `images = existing` (empty for a new record).

use shared::models::{RestaurantPatch, RestaurantProfile, RestaurantUpdate};

use super::mutation::{MutationError, UploadTarget};

/// Upload results paired with how many attachments the request carried
#[derive(Debug, Default, Clone)]
pub struct UploadedMedia {
    /// Logo attachments present in the request (0 or 1)
    pub logo_attachments: usize,
    /// Image attachments present in the request
    pub image_attachments: usize,
    pub logo_url: Option<String>,
    pub image_urls: Vec<String>,
}

impl UploadedMedia {
    fn check_complete(&self) -> Result<(), MutationError> {
        let logo_ok = if self.logo_attachments > 0 {
            self.logo_url.is_some()
        } else {
            self.logo_url.is_none()
        };
        if !logo_ok {
            return Err(MutationError::UploadDependencyMissing {
                target: UploadTarget::Logo,
            });
        }
        if self.image_urls.len() != self.image_attachments {
            return Err(MutationError::UploadDependencyMissing {
                target: UploadTarget::Images,
            });
        }
        Ok(())
    }
}

/// Build the candidate patch for one update or creation
pub fn reconcile(
    existing: Option<&RestaurantProfile>,
    incoming: &RestaurantUpdate,
    uploaded: UploadedMedia,
) -> Result<RestaurantPatch, MutationError> {
    uploaded.check_complete()?;

    let RestaurantUpdate {
        name,
        email,
        phone,
        address,
        description,
        cuisine,
        website,
        opening_hours,
        logo: _,
        cover_photo,
        images: _,
        status,
    } = incoming.clone();

    let mut images = existing.map(|e| e.images.clone()).unwrap_or_default();
    let cover_photo = match (cover_photo, uploaded.image_urls.first()) {
        (Some(explicit), _) => Some(explicit),
        (None, Some(first)) => Some(first.clone()),
        (None, None) => None,
    };
    images.extend(uploaded.image_urls);

    Ok(RestaurantPatch {
        name,
        email,
        phone,
        address,
        description,
        cuisine,
        website,
        opening_hours,
        logo: uploaded.logo_url,
        cover_photo,
        images: Some(images),
        status,
    })
}
