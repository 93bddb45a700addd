use serde::Deserialize;
use std::fmt;
use std::fmt::Formatter;
use std::path::PathBuf;

/// Raw photo record as returned by `photos.get` with `extended=1`.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct PhotoItem {
    pub(crate) id: i64,
    pub(crate) album_id: i64,
    pub(crate) likes: Likes,
    pub(crate) date: i64,
    pub(crate) sizes: Vec<SizeVariant>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub(crate) struct Likes {
    pub(crate) count: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub(crate) struct SizeVariant {
    pub(crate) width: u32,
    pub(crate) height: u32,
    pub(crate) url: String,
}

impl SizeVariant {
    pub(crate) fn area(&self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }

    /// Size label in the `WxH` form used by the manifest.
    pub(crate) fn label(&self) -> String {
        format!("{}x{}", self.width, self.height)
    }
}

/// A photo with its best rendition chosen but no final file name yet.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ResolvedPhoto {
    pub(crate) name: String,
    pub(crate) id: i64,
    pub(crate) album_id: i64,
    pub(crate) size: String,
    pub(crate) url: String,
    pub(crate) date: i64,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct NamedPhoto {
    pub(crate) photo: ResolvedPhoto,
    pub(crate) file_name: String,
}

#[derive(Debug, Clone)]
pub(crate) struct DownloadedPhoto {
    pub(crate) named: NamedPhoto,
    pub(crate) path: PathBuf,
}

impl fmt::Display for NamedPhoto {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "(name={}, size={})", self.file_name, self.photo.size)
    }
}
