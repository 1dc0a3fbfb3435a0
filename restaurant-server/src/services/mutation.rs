//! Profile Mutation Service
//!
//! Runs every restaurant write through one linear pipeline:
//!
//! ```text
//! resolve target → check files → upload logo ∥ upload images → reconcile → validate → persist
//! ```
//!
//! Every stage failure is terminal and nothing reaches the store before the
//! final step.

use std::fmt;
use std::sync::Arc;

use shared::error::{AppError, ErrorCode};
use shared::models::{RestaurantProfile, RestaurantUpdate};
use shared::util::{new_resource_id, now_millis};
use thiserror::Error;

use super::reconciler::{UploadedMedia, reconcile};
use super::uploader::{AttachmentError, MediaAttachment, MediaPurpose, MediaUploader, UploadError};
use crate::auth::{AdminContext, OwnerContext};
use crate::db::{ProfileStore, StoreError};
use crate::utils::validation::{FieldErrors, ValidationScope, validate_patch};

/// Which upload stage failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadTarget {
    Logo,
    Images,
}

impl fmt::Display for UploadTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UploadTarget::Logo => f.write_str("logo"),
            UploadTarget::Images => f.write_str("images"),
        }
    }
}

/// Mutation pipeline errors
#[derive(Debug, Error)]
pub enum MutationError {
    #[error("Upload results for {target} are missing")]
    UploadDependencyMissing { target: UploadTarget },

    #[error("Failed to upload {target}")]
    UploadFailed {
        target: UploadTarget,
        #[source]
        source: UploadError,
    },

    #[error("Invalid attachment: {0}")]
    InvalidAttachment(#[from] AttachmentError),

    #[error("Validation failed")]
    ValidationFailed(FieldErrors),

    #[error("Restaurant {id} not found")]
    NotFound { id: String },

    #[error("Owner {principal_id} has no restaurant")]
    NotBound { principal_id: String },

    #[error("Failed to persist restaurant: {0}")]
    PersistenceFailed(#[from] StoreError),
}

impl From<MutationError> for AppError {
    fn from(err: MutationError) -> Self {
        match err {
            MutationError::UploadDependencyMissing { target } => {
                tracing::error!(upload = %target, "Reconciliation ran without upload results");
                AppError::new(ErrorCode::UploadDependencyMissing)
                    .with_detail("target", target.to_string())
            }
            MutationError::UploadFailed { target, source } => {
                tracing::error!(upload = %target, error = %source, "Media upload failed");
                AppError::with_message(ErrorCode::UploadFailed, format!("Failed to upload {target}"))
                    .with_detail("target", target.to_string())
            }
            MutationError::InvalidAttachment(e) => {
                let code = match &e {
                    AttachmentError::NoFilename => ErrorCode::NoFilename,
                    AttachmentError::Empty { .. } => ErrorCode::EmptyFile,
                    AttachmentError::TooLarge { .. } => ErrorCode::FileTooLarge,
                    AttachmentError::UnsupportedFormat { .. } => ErrorCode::UnsupportedFileFormat,
                };
                let err = AppError::with_message(code, e.to_string());
                match e.file() {
                    Some(file) => err.with_detail("file", file.to_string()),
                    None => err,
                }
            }
            MutationError::ValidationFailed(fields) => {
                let errors = serde_json::to_value(&fields).unwrap_or_default();
                AppError::validation("Validation failed").with_detail("errors", errors)
            }
            MutationError::NotFound { id } => {
                AppError::new(ErrorCode::RestaurantNotFound).with_detail("id", id)
            }
            MutationError::NotBound { .. } => AppError::new(ErrorCode::RestaurantNotBound),
            MutationError::PersistenceFailed(StoreError::NotFound(what)) => {
                tracing::error!(record = %what, "Restaurant vanished before it could be saved");
                AppError::new(ErrorCode::RestaurantUnavailable)
            }
            MutationError::PersistenceFailed(e) => {
                tracing::error!(error = %e, "Restaurant persistence failed");
                AppError::database("Failed to save restaurant")
            }
        }
    }
}

pub type MutationResult<T> = Result<T, MutationError>;

/// Caller payload plus raw media
#[derive(Debug, Clone, Default)]
pub struct UpdateRequest {
    pub data: RestaurantUpdate,
    pub logo: Option<MediaAttachment>,
    pub images: Vec<MediaAttachment>,
}

/// Restaurant write workflows
#[derive(Clone)]
pub struct ProfileMutationService {
    store: Arc<dyn ProfileStore>,
    uploader: Arc<dyn MediaUploader>,
    max_upload_bytes: usize,
}

impl ProfileMutationService {
    pub fn new(
        store: Arc<dyn ProfileStore>,
        uploader: Arc<dyn MediaUploader>,
        max_upload_bytes: usize,
    ) -> Self {
        Self {
            store,
            uploader,
            max_upload_bytes,
        }
    }

    /// Owner edits the restaurant bound to their token
    pub async fn update_own_restaurant(
        &self,
        owner: &OwnerContext,
        request: UpdateRequest,
    ) -> MutationResult<RestaurantProfile> {
        let id = owner
            .restaurant_id
            .as_deref()
            .ok_or_else(|| MutationError::NotBound {
                principal_id: owner.principal_id.clone(),
            })?;

        // Absence is "no prior state"; the store reports it at persist time
        let existing = self.store.get_by_id(id).await?;
        tracing::debug!(
            restaurant_id = %id,
            principal_id = %owner.principal_id,
            has_existing = existing.is_some(),
            "Owner update"
        );

        self.apply_update(id, existing, request, ValidationScope::Owner)
            .await
    }

    /// Administrator edits any restaurant
    pub async fn update_restaurant_as_admin(
        &self,
        admin: &AdminContext,
        id: &str,
        request: UpdateRequest,
    ) -> MutationResult<RestaurantProfile> {
        let existing = self
            .store
            .get_by_id(id)
            .await?
            .ok_or_else(|| MutationError::NotFound { id: id.to_string() })?;
        tracing::debug!(restaurant_id = %id, principal_id = %admin.principal_id, "Admin update");

        self.apply_update(id, Some(existing), request, ValidationScope::Admin)
            .await
    }

    /// Owner registers a new restaurant
    pub async fn create_restaurant(
        &self,
        owner: &OwnerContext,
        request: UpdateRequest,
    ) -> MutationResult<RestaurantProfile> {
        self.check_attachments(&request)?;
        let uploaded = self.upload_attachments(&request).await?;
        let patch = reconcile(None, &request.data, uploaded)?;
        let patch =
            validate_patch(patch, ValidationScope::Create).map_err(MutationError::ValidationFailed)?;

        let profile = RestaurantProfile::from_patch(
            new_resource_id(),
            owner.principal_id.clone(),
            patch,
            now_millis(),
        );
        let saved = self.store.insert(profile).await?;

        tracing::info!(
            restaurant_id = %saved.id,
            principal_id = %owner.principal_id,
            images = saved.images.len(),
            "Restaurant created"
        );
        Ok(saved)
    }

    /// Administrator removes a restaurant
    pub async fn delete_restaurant(
        &self,
        admin: &AdminContext,
        id: &str,
    ) -> MutationResult<RestaurantProfile> {
        let removed = self
            .store
            .delete(id)
            .await?
            .ok_or_else(|| MutationError::NotFound { id: id.to_string() })?;

        tracing::info!(restaurant_id = %id, principal_id = %admin.principal_id, "Restaurant deleted");
        Ok(removed)
    }

    async fn apply_update(
        &self,
        id: &str,
        existing: Option<RestaurantProfile>,
        request: UpdateRequest,
        scope: ValidationScope,
    ) -> MutationResult<RestaurantProfile> {
        self.check_attachments(&request)?;
        let uploaded = self.upload_attachments(&request).await?;
        let new_images = uploaded.image_urls.len();

        let patch = reconcile(existing.as_ref(), &request.data, uploaded)?;
        let patch = validate_patch(patch, scope).map_err(|fields| {
            tracing::info!(
                restaurant_id = %id,
                fields = ?fields.keys().collect::<Vec<_>>(),
                "Update rejected"
            );
            MutationError::ValidationFailed(fields)
        })?;

        let saved = self.store.update_partial(id, patch).await?;

        tracing::info!(
            restaurant_id = %id,
            new_images,
            total_images = saved.images.len(),
            "Restaurant updated"
        );
        Ok(saved)
    }

    fn check_attachments(&self, request: &UpdateRequest) -> MutationResult<()> {
        for file in request.logo.iter().chain(&request.images) {
            file.check(self.max_upload_bytes)?;
        }
        Ok(())
    }

    /// Upload logo and gallery concurrently; both finish or the first failure wins
    async fn upload_attachments(&self, request: &UpdateRequest) -> MutationResult<UploadedMedia> {
        let logo = async {
            match &request.logo {
                Some(file) => self
                    .uploader
                    .upload(MediaPurpose::Logo, file)
                    .await
                    .map(Some)
                    .map_err(|source| MutationError::UploadFailed {
                        target: UploadTarget::Logo,
                        source,
                    }),
                None => Ok(None),
            }
        };
        let images = async {
            if request.images.is_empty() {
                return Ok(Vec::new());
            }
            self.uploader
                .upload_many(MediaPurpose::Images, &request.images)
                .await
                .map_err(|source| MutationError::UploadFailed {
                    target: UploadTarget::Images,
                    source,
                })
        };

        let (logo_url, image_urls) = tokio::try_join!(logo, images)?;

        Ok(UploadedMedia {
            logo_attachments: usize::from(request.logo.is_some()),
            image_attachments: request.images.len(),
            logo_url,
            image_urls,
        })
    }
}
