use crate::model::photo::NamedPhoto;
use crate::sync_error::SyncResult;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub(crate) struct ManifestEntry {
    pub(crate) name: String,
    pub(crate) size: String,
}

/// Photos transferred in one run, in download order.
#[derive(Debug, Default)]
pub(crate) struct TransferManifest {
    entries: Vec<ManifestEntry>,
}

impl TransferManifest {
    pub(crate) fn push(&mut self, photo: &NamedPhoto) {
        self.entries.push(ManifestEntry {
            name: photo.file_name.clone(),
            size: photo.photo.size.clone(),
        });
    }

    pub(crate) fn entries(&self) -> &[ManifestEntry] {
        &self.entries
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    pub(crate) fn to_json(&self) -> SyncResult<Vec<u8>> {
        Ok(json::to_vec(&self.entries)?)
    }
}
