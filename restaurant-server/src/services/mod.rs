//! Services
//!
//! - [`uploader`]: media normalization and hosting backends
//! - [`reconciler`]: merge rules for incoming data, uploads and stored state
//! - [`mutation`]: the create / update / delete pipelines

pub mod mutation;
pub mod reconciler;
pub mod uploader;

pub use mutation::{MutationError, MutationResult, ProfileMutationService, UpdateRequest, UploadTarget};
pub use reconciler::{UploadedMedia, reconcile};
pub use uploader::{
    AttachmentError, LocalMediaUploader, MediaAttachment, MediaPurpose, MediaUploader,
    S3MediaUploader, UploadError,
};
