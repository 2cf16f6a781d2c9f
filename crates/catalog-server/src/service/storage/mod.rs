//! Local file storage for uploaded product images.
//!
//! Stored names are `<stem>-<32 hex chars><ext>`, derived from the client's
//! file name with every path component and unusual character removed.

mod format;

use std::path::PathBuf;
use std::sync::Arc;

pub use self::format::ImageFormat;
use crate::{Error, Result, TRACING_TARGET_STORAGE};

/// Route under which stored images are downloaded.
pub const DOWNLOAD_ROUTE: &str = "/api/v1/uploads/images";

/// Fallback stem for names without usable characters.
const DEFAULT_STEM: &str = "image";

/// Number of random bytes appended to every stored name.
const SUFFIX_BYTES: usize = 16;

/// Metadata of a stored image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredImage {
    /// Name the file was stored under.
    pub file_name: String,
    /// Size in bytes.
    pub size: usize,
    /// Link the file can be downloaded from.
    pub url: String,
}

#[derive(Debug)]
struct StorageInner {
    root: PathBuf,
    max_upload_size: usize,
    public_url: String,
}

/// Directory backed image store.
#[derive(Debug, Clone)]
pub struct ImageStorage {
    inner: Arc<StorageInner>,
}

impl ImageStorage {
    /// Opens the storage, creating `root` when missing.
    pub async fn open(
        root: impl Into<PathBuf>,
        max_upload_size: usize,
        public_url: Option<String>,
    ) -> Result<Self> {
        let root = root.into();
        tokio::fs::create_dir_all(&root).await.map_err(|e| {
            Error::file_system(format!("cannot create upload directory {}", root.display()))
                .with_source(e)
        })?;

        tracing::info!(
            target: TRACING_TARGET_STORAGE,
            root = %root.display(),
            max_upload_size,
            "Image storage ready"
        );

        let public_url = public_url
            .map(|url| url.trim_end_matches('/').to_owned())
            .unwrap_or_default();

        Ok(Self {
            inner: Arc::new(StorageInner {
                root,
                max_upload_size,
                public_url,
            }),
        })
    }

    /// Returns the maximum accepted upload size in bytes.
    #[inline]
    pub fn max_upload_size(&self) -> usize {
        self.inner.max_upload_size
    }

    /// Returns the download link for a stored file name.
    pub fn download_url(&self, file_name: &str) -> String {
        format!("{}{DOWNLOAD_ROUTE}/{file_name}", self.inner.public_url)
    }

    /// Stores `bytes` under a unique name derived from `original_name`.
    pub async fn save(&self, original_name: &str, bytes: &[u8]) -> Result<StoredImage> {
        if bytes.is_empty() {
            return Err(Error::bad_input("uploaded file is empty"));
        }
        if bytes.len() > self.max_upload_size() {
            return Err(Error::payload_too_large(format!(
                "uploaded file is {} bytes, the limit is {} bytes",
                bytes.len(),
                self.max_upload_size()
            )));
        }

        let file_name = unique_name(original_name);
        let path = self.inner.root.join(&file_name);
        tokio::fs::write(&path, bytes).await.map_err(|e| {
            Error::file_system(format!("cannot write {file_name}")).with_source(e)
        })?;

        tracing::info!(
            target: TRACING_TARGET_STORAGE,
            file_name = %file_name,
            size = bytes.len(),
            "Image stored"
        );

        Ok(StoredImage {
            url: self.download_url(&file_name),
            size: bytes.len(),
            file_name,
        })
    }

    /// Reads a previously stored file.
    pub async fn read(&self, file_name: &str) -> Result<Vec<u8>> {
        if !is_plain_name(file_name) {
            return Err(Error::bad_input("invalid file name"));
        }

        let path = self.inner.root.join(file_name);
        tokio::fs::read(&path).await.map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => {
                Error::not_found(format!("file {file_name} not found")).with_source(e)
            }
            _ => Error::file_system(format!("cannot read {file_name}")).with_source(e),
        })
    }
}

/// Builds `<stem>-<random hex><ext>` from a client supplied file name.
fn unique_name(original_name: &str) -> String {
    let base = original_name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default();

    let (stem, extension) = match base.rsplit_once('.') {
        Some((stem, extension)) if !stem.is_empty() => (stem, Some(extension)),
        _ => (base, None),
    };

    let mut stem = sanitize(stem, true);
    if stem.is_empty() {
        stem = DEFAULT_STEM.to_owned();
    }

    let suffix = hex::encode(rand::random::<[u8; SUFFIX_BYTES]>());
    match extension.map(|e| sanitize(e, false).to_ascii_lowercase()) {
        Some(extension) if !extension.is_empty() => format!("{stem}-{suffix}.{extension}"),
        _ => format!("{stem}-{suffix}"),
    }
}

fn sanitize(value: &str, allow_separators: bool) -> String {
    value
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || (allow_separators && matches!(c, '-' | '_')))
        .collect()
}

/// Rejects names that could escape the storage directory.
fn is_plain_name(file_name: &str) -> bool {
    !file_name.is_empty()
        && !file_name.starts_with('.')
        && !file_name.contains(['/', '\\'])
        && !file_name.contains("..")
        && !file_name.contains('\0')
}
