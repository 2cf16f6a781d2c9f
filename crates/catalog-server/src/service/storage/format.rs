//! Image formats served from the upload directory.

use std::str::FromStr;

use strum::{AsRefStr, Display, EnumIter, EnumString};

/// Image format recognized by its file extension.
///
/// Parsing is case-insensitive and accepts every known extension of a
/// format, so both `jpg` and `JPEG` resolve to [`ImageFormat::Jpeg`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[derive(AsRefStr, Display, EnumString, EnumIter)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ImageFormat {
    Png,
    #[strum(to_string = "jpeg", serialize = "jpg")]
    Jpeg,
    Gif,
    Webp,
    Svg,
    Avif,
}

impl ImageFormat {
    /// Media type used for unrecognized files.
    pub const FALLBACK_MIME_TYPE: &'static str = "application/octet-stream";

    /// Detects the format from the extension of `file_name`.
    pub fn from_file_name(file_name: &str) -> Option<Self> {
        let (_, extension) = file_name.rsplit_once('.')?;
        Self::from_str(extension).ok()
    }

    /// Returns the MIME type for this format.
    #[must_use]
    pub const fn mime_type(self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Jpeg => "image/jpeg",
            Self::Gif => "image/gif",
            Self::Webp => "image/webp",
            Self::Svg => "image/svg+xml",
            Self::Avif => "image/avif",
        }
    }

    /// Returns the media type for `file_name`, falling back to
    /// `application/octet-stream`.
    pub fn mime_type_of(file_name: &str) -> &'static str {
        Self::from_file_name(file_name).map_or(Self::FALLBACK_MIME_TYPE, Self::mime_type)
    }
}
