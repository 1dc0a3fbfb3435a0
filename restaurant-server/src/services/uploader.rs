//! Media Uploader
//!
//! Normalizes uploaded pictures and stores them content-addressed:
//! decode → JPEG (quality 85) → SHA256 → `restaurants/{purpose}/{hash}.jpg`.
//!
//! Two backends share the pipeline:
//! - [`S3MediaUploader`]: puts the object into a bucket, URL built from the CDN base
//! - [`LocalMediaUploader`]: writes under `{WORK_DIR}/uploads`, served by `/uploads`

use std::fmt;
use std::io::Cursor;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use aws_sdk_s3::Client as S3Client;
use bytes::Bytes;
use image::codecs::jpeg::JpegEncoder;
use sha2::{Digest, Sha256};
use thiserror::Error;

/// JPEG quality used for every stored picture
pub const JPEG_QUALITY: u8 = 85;

/// Accepted source extensions
pub const SUPPORTED_FORMATS: &[&str] = &["png", "jpg", "jpeg", "webp"];

/// What an attachment is for; also the storage sub-directory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MediaPurpose {
    Logo,
    Images,
}

impl MediaPurpose {
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaPurpose::Logo => "logo",
            MediaPurpose::Images => "images",
        }
    }
}

impl fmt::Display for MediaPurpose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raw file received with a request
#[derive(Debug, Clone)]
pub struct MediaAttachment {
    pub file_name: String,
    pub content_type: Option<String>,
    pub data: Bytes,
}

impl MediaAttachment {
    pub fn new(file_name: impl Into<String>, data: impl Into<Bytes>) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: None,
            data: data.into(),
        }
    }

    /// Lower-cased file extension, empty when the name has none
    pub fn extension(&self) -> String {
        Path::new(&self.file_name)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .unwrap_or_default()
    }

    /// Reject empty, oversized, unnamed or non-image files
    pub fn check(&self, max_bytes: usize) -> Result<(), AttachmentError> {
        if self.file_name.is_empty() {
            return Err(AttachmentError::NoFilename);
        }
        if self.data.is_empty() {
            return Err(AttachmentError::Empty {
                file: self.file_name.clone(),
            });
        }
        if self.data.len() > max_bytes {
            return Err(AttachmentError::TooLarge {
                file: self.file_name.clone(),
                size: self.data.len(),
                max: max_bytes,
            });
        }
        let ext = self.extension();
        if !SUPPORTED_FORMATS.contains(&ext.as_str()) {
            return Err(AttachmentError::UnsupportedFormat {
                file: self.file_name.clone(),
                ext,
            });
        }
        Ok(())
    }
}

/// Attachment rejected before any upload starts
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AttachmentError {
    #[error("No filename provided")]
    NoFilename,

    #[error("{file} is empty")]
    Empty { file: String },

    #[error("File too large: {size} bytes (max {max})")]
    TooLarge { file: String, size: usize, max: usize },

    #[error("Unsupported format: {ext}. Supported: png, jpg, jpeg, webp")]
    UnsupportedFormat { file: String, ext: String },
}

impl AttachmentError {
    /// Offending file name, when one was given
    pub fn file(&self) -> Option<&str> {
        match self {
            AttachmentError::NoFilename => None,
            AttachmentError::Empty { file }
            | AttachmentError::TooLarge { file, .. }
            | AttachmentError::UnsupportedFormat { file, .. } => Some(file),
        }
    }
}

/// Upload error types
#[derive(Debug, Error)]
pub enum UploadError {
    #[error("Invalid image: {0}")]
    InvalidImage(String),

    #[error("Image compression failed: {0}")]
    Encode(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Media hosting backend
#[async_trait]
pub trait MediaUploader: Send + Sync {
    /// Store one file and return its public URL
    async fn upload(
        &self,
        purpose: MediaPurpose,
        file: &MediaAttachment,
    ) -> Result<String, UploadError>;

    /// Store several files concurrently; URLs come back in input order
    async fn upload_many(
        &self,
        purpose: MediaPurpose,
        files: &[MediaAttachment],
    ) -> Result<Vec<String>, UploadError> {
        futures::future::try_join_all(files.iter().map(|f| self.upload(purpose, f))).await
    }
}

/// A picture re-encoded as JPEG, keyed by its SHA256
#[derive(Debug)]
pub struct NormalizedImage {
    pub hash: String,
    pub jpeg: Vec<u8>,
}

/// Decode any supported format, flatten to RGB and compress to JPEG
pub fn normalize_image(data: &[u8]) -> Result<NormalizedImage, UploadError> {
    let img = image::load_from_memory(data).map_err(|e| UploadError::InvalidImage(e.to_string()))?;

    let mut jpeg = Vec::new();
    {
        let mut cursor = Cursor::new(&mut jpeg);
        let rgb_img = img.to_rgb8();
        let encoder = JpegEncoder::new_with_quality(&mut cursor, JPEG_QUALITY);
        rgb_img
            .write_with_encoder(encoder)
            .map_err(|e| UploadError::Encode(e.to_string()))?;
    }

    let mut hasher = Sha256::new();
    hasher.update(&jpeg);
    let hash = hex::encode(hasher.finalize());

    Ok(NormalizedImage { hash, jpeg })
}

/// Run [`normalize_image`] off the async workers
async fn normalize_blocking(data: Bytes) -> Result<NormalizedImage, UploadError> {
    tokio::task::spawn_blocking(move || normalize_image(&data))
        .await
        .map_err(|e| UploadError::Encode(format!("normalize task failed: {e}")))?
}

fn object_key(purpose: MediaPurpose, hash: &str) -> String {
    format!("restaurants/{}/{hash}.jpg", purpose.as_str())
}

fn trim_base(url: &str) -> String {
    url.trim_end_matches('/').to_string()
}

// ========== S3 ==========

/// Uploads to an S3 bucket fronted by a public base URL (CloudFront or bucket URL)
#[derive(Clone)]
pub struct S3MediaUploader {
    client: S3Client,
    bucket: String,
    public_base_url: String,
}

impl S3MediaUploader {
    pub fn new(client: S3Client, bucket: impl Into<String>, public_base_url: &str) -> Self {
        Self {
            client,
            bucket: bucket.into(),
            public_base_url: trim_base(public_base_url),
        }
    }
}

#[async_trait]
impl MediaUploader for S3MediaUploader {
    async fn upload(
        &self,
        purpose: MediaPurpose,
        file: &MediaAttachment,
    ) -> Result<String, UploadError> {
        let normalized = normalize_blocking(file.data.clone()).await?;
        let key = object_key(purpose, &normalized.hash);

        // Same hash = same content, so re-uploading is harmless
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(&key)
            .body(normalized.jpeg.into())
            .content_type("image/jpeg")
            .send()
            .await
            .map_err(|e| {
                tracing::error!(hash = %normalized.hash, error = %e, "S3 upload failed");
                UploadError::Storage(e.to_string())
            })?;

        tracing::info!(purpose = %purpose, hash = %normalized.hash, "Media uploaded to S3");
        Ok(format!("{}/{key}", self.public_base_url))
    }
}

// ========== Local disk ==========

/// Writes below a local directory that the HTTP server exposes as `/uploads`
#[derive(Debug, Clone)]
pub struct LocalMediaUploader {
    root: PathBuf,
    public_base_url: String,
}

impl LocalMediaUploader {
    /// `root` is the directory served at `{public_base_url}/uploads`
    pub fn new(root: impl Into<PathBuf>, public_base_url: &str) -> Self {
        Self {
            root: root.into(),
            public_base_url: trim_base(public_base_url),
        }
    }
}

#[async_trait]
impl MediaUploader for LocalMediaUploader {
    async fn upload(
        &self,
        purpose: MediaPurpose,
        file: &MediaAttachment,
    ) -> Result<String, UploadError> {
        let normalized = normalize_blocking(file.data.clone()).await?;
        let key = object_key(purpose, &normalized.hash);
        let path = self.root.join(&key);

        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        if !tokio::fs::try_exists(&path).await? {
            tokio::fs::write(&path, &normalized.jpeg).await?;
        }

        tracing::debug!(purpose = %purpose, path = %path.display(), "Media stored locally");
        Ok(format!("{}/uploads/{key}", self.public_base_url))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, Rgb, RgbImage};

    /// Tiny PNG filled with one colour
    fn png_bytes(color: [u8; 3]) -> Vec<u8> {
        let img = RgbImage::from_pixel(4, 4, Rgb(color));
        let mut out = Vec::new();
        img.write_to(&mut Cursor::new(&mut out), ImageFormat::Png)
            .unwrap();
        out
    }

    #[test]
    fn test_attachment_check() {
        let ok = MediaAttachment::new("front.JPG", vec![1, 2, 3]);
        assert_eq!(ok.check(10), Ok(()));

        let empty = MediaAttachment::new("front.jpg", Vec::new());
        assert!(matches!(empty.check(10), Err(AttachmentError::Empty { .. })));

        let big = MediaAttachment::new("front.jpg", vec![0; 11]);
        assert_eq!(
            big.check(10),
            Err(AttachmentError::TooLarge {
                file: "front.jpg".into(),
                size: 11,
                max: 10,
            })
        );

        let gif = MediaAttachment::new("front.gif", vec![1]);
        let err = gif.check(10).unwrap_err();
        assert!(matches!(err, AttachmentError::UnsupportedFormat { ref ext, .. } if ext == "gif"));
        assert_eq!(err.file(), Some("front.gif"));

        let unnamed = MediaAttachment::new("", vec![1]);
        assert_eq!(unnamed.check(10), Err(AttachmentError::NoFilename));
    }

    #[test]
    fn test_normalize_produces_jpeg_and_stable_hash() {
        let png = png_bytes([200, 10, 10]);
        let a = normalize_image(&png).unwrap();
        let b = normalize_image(&png).unwrap();

        assert_eq!(a.hash, b.hash);
        assert_eq!(a.hash.len(), 64);
        // JPEG SOI marker
        assert_eq!(&a.jpeg[..2], &[0xFF, 0xD8]);
    }

    #[test]
    fn test_normalize_rejects_garbage() {
        let err = normalize_image(b"definitely not an image").unwrap_err();
        assert!(matches!(err, UploadError::InvalidImage(_)));
    }

    #[test]
    fn test_attachment_extension() {
        assert_eq!(MediaAttachment::new("Logo.PNG", vec![1]).extension(), "png");
        assert_eq!(MediaAttachment::new("noext", vec![1]).extension(), "");
    }

    #[tokio::test]
    async fn test_local_upload_writes_content_addressed_file() {
        let dir = tempfile::tempdir().unwrap();
        let uploader = LocalMediaUploader::new(dir.path(), "http://localhost:8080/");
        let file = MediaAttachment::new("logo.png", png_bytes([0, 128, 255]));

        let url = uploader.upload(MediaPurpose::Logo, &file).await.unwrap();
        assert!(url.starts_with("http://localhost:8080/uploads/restaurants/logo/"));
        assert!(url.ends_with(".jpg"));

        let hash = url
            .rsplit('/')
            .next()
            .and_then(|name| name.strip_suffix(".jpg"))
            .unwrap();
        let stored = dir.path().join("restaurants/logo").join(format!("{hash}.jpg"));
        assert!(stored.exists());

        // Same bytes → same URL
        let again = uploader.upload(MediaPurpose::Logo, &file).await.unwrap();
        assert_eq!(url, again);
    }

    #[tokio::test]
    async fn test_upload_many_preserves_order() {
        let dir = tempfile::tempdir().unwrap();
        let uploader = LocalMediaUploader::new(dir.path(), "http://localhost:8080");
        let files = vec![
            MediaAttachment::new("a.png", png_bytes([255, 0, 0])),
            MediaAttachment::new("b.png", png_bytes([0, 255, 0])),
            MediaAttachment::new("c.png", png_bytes([0, 0, 255])),
        ];

        let urls = uploader
            .upload_many(MediaPurpose::Images, &files)
            .await
            .unwrap();
        assert_eq!(urls.len(), 3);

        for (file, url) in files.iter().zip(&urls) {
            let single = uploader.upload(MediaPurpose::Images, file).await.unwrap();
            assert_eq!(&single, url);
        }
    }

    #[tokio::test]
    async fn test_upload_many_fails_on_bad_file() {
        let dir = tempfile::tempdir().unwrap();
        let uploader = LocalMediaUploader::new(dir.path(), "http://localhost:8080");
        let files = vec![
            MediaAttachment::new("a.png", png_bytes([255, 0, 0])),
            MediaAttachment::new("broken.png", b"nope".to_vec()),
        ];

        assert!(uploader.upload_many(MediaPurpose::Images, &files).await.is_err());
    }
}
