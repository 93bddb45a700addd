use crate::cli::CloudProvider;
use crate::config::{Config, PROFILE_ALBUM};
use crate::file::{read_file, write_file};
use crate::http::HttpClient;
use crate::model::manifest::TransferManifest;
use crate::model::photo::{DownloadedPhoto, PhotoItem};
use crate::selector::{select, timestamp_suffix};
use crate::sync_error::{SyncError, SyncResult};
use crate::utils::{progress_message, rewrite_message};
use crate::vk::VkSource;
use crate::yandex_store::StoreClient;
use chrono::Local;
use std::collections::HashSet;
use std::io::stdout;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Stage {
    Init,
    AlbumsEnumerated,
    Downloaded,
    RemoteFolderCreated,
    Uploaded,
    ManifestUploaded,
    Done,
    Failed,
}

/// One copy run: source albums into local files, then into a fresh folder on
/// every requested cloud disk.
pub(crate) struct Transfer<'a, C: HttpClient> {
    config: &'a Config,
    http: &'a C,
    manifest: TransferManifest,
    manifest_path: Option<PathBuf>,
    stage: Stage,
}

/// Profile album first, then the requested ones in order, each once.
pub(crate) fn enumerate_albums(requested: &[String]) -> Vec<String> {
    let mut albums = vec![PROFILE_ALBUM.to_owned()];
    for album in requested {
        if !albums.contains(album) {
            albums.push(album.clone());
        }
    }
    albums
}

/// Drops repeated photos, e.g. the profile album requested by its numeric id.
/// The first occurrence is kept.
pub(crate) fn distinct_items(items: Vec<PhotoItem>) -> Vec<PhotoItem> {
    let mut seen = HashSet::new();
    items.into_iter().filter(|item| seen.insert(item.id)).collect()
}

impl<'a, C: HttpClient> Transfer<'a, C> {
    pub(crate) fn new(config: &'a Config, http: &'a C) -> Self {
        Transfer {
            config,
            http,
            manifest: TransferManifest::default(),
            manifest_path: None,
            stage: Stage::Init,
        }
    }

    #[cfg(test)]
    pub(crate) fn stage(&self) -> Stage {
        self.stage
    }

    pub(crate) fn manifest(&self) -> &TransferManifest {
        &self.manifest
    }

    pub(crate) async fn run(&mut self) -> SyncResult<()> {
        let result = self.run_stages().await;
        if let Err(err) = &result {
            log::error!("run stopped after {:?}: {}", self.stage, err);
            self.stage = Stage::Failed;
        }
        result
    }

    async fn run_stages(&mut self) -> SyncResult<()> {
        let albums = enumerate_albums(&self.config.albums);
        self.stage = Stage::AlbumsEnumerated;

        let photos = self.download(&albums).await?;
        self.stage = Stage::Downloaded;

        let mut clouds: Vec<CloudProvider> = Vec::new();
        for cloud in &self.config.clouds {
            if !clouds.contains(cloud) {
                clouds.push(*cloud);
            }
        }
        for cloud in clouds {
            match cloud {
                CloudProvider::Yandex => {
                    let folder = self.prepare_remote_folder().await?;
                    self.stage = Stage::RemoteFolderCreated;

                    self.upload(&photos, &folder).await?;
                    self.stage = Stage::Uploaded;

                    if self.upload_manifest(&folder).await? {
                        self.stage = Stage::ManifestUploaded;
                    }
                }
                CloudProvider::Google => {
                    log::warn!("upload to {} is not supported yet, skipping", cloud.to_str());
                }
            }
        }

        self.stage = Stage::Done;
        Ok(())
    }

    /// Fetches every album, names the photos and saves them locally. The
    /// manifest is written once, after the last photo.
    pub(crate) async fn download(&mut self, albums: &[String]) -> SyncResult<Vec<DownloadedPhoto>> {
        let source = VkSource::new(self.http, &self.config.source_api, &self.config.source);

        let mut items: Vec<PhotoItem> = Vec::new();
        for album in albums {
            let album_items = source.album_photos(album, self.config.count).await?;
            log::info!("album {} has {} photos to copy", album, album_items.len());
            items.extend(album_items);
        }

        let fetched = items.len();
        let items = distinct_items(items);
        if items.len() < fetched {
            log::info!("skipped {} photos listed in more than one album", fetched - items.len());
        }

        let named = select(&items)?;
        let total = named.len();
        let mut downloaded = Vec::with_capacity(total);
        for (i, photo) in named.into_iter().enumerate() {
            self.pause(i).await;
            let body = source.fetch(&photo.photo.url).await?;
            let path = write_file(&self.config.download_dir, &photo.file_name, &body).await?;
            log::debug!("saved {} from album {} to {:?}", photo, photo.photo.album_id, path);

            self.manifest.push(&photo);
            downloaded.push(DownloadedPhoto { named: photo, path });
            rewrite_message(&mut stdout(), progress_message("Downloaded", i + 1, total))?;
        }
        println!();

        let report = self.manifest.to_json()?;
        let manifest_path = write_file(&self.config.download_dir, &self.config.manifest_name, &report).await?;
        log::info!("wrote {} manifest entries to {:?}", self.manifest.len(), manifest_path);
        self.manifest_path = Some(manifest_path);

        Ok(downloaded)
    }

    /// Creates `<pattern>_<now>` on the cloud disk and returns its name.
    pub(crate) async fn prepare_remote_folder(&self) -> SyncResult<String> {
        let folder = format!(
            "{}_{}",
            self.config.folder_name_pattern,
            timestamp_suffix(Local::now().timestamp())
        );
        self.store()?.create_folder(&folder).await?;
        log::info!("created folder {}", folder);
        Ok(folder)
    }

    pub(crate) async fn upload(&self, photos: &[DownloadedPhoto], folder: &str) -> SyncResult<()> {
        let store = self.store()?;
        for (i, photo) in photos.iter().enumerate() {
            self.pause(i).await;
            let name = &photo.named.file_name;
            let body = read_file(&photo.path).await?;
            store.put(&format!("{}/{}", folder, name), name, body).await?;
            rewrite_message(&mut stdout(), progress_message("Uploaded", i + 1, photos.len()))?;
        }
        println!();
        Ok(())
    }

    /// Uploads the manifest next to the photos when the run is configured to.
    /// Returns whether anything was sent.
    pub(crate) async fn upload_manifest(&self, folder: &str) -> SyncResult<bool> {
        if !self.config.store_manifest_to_cloud {
            return Ok(false);
        }
        let path = self.manifest_path.as_ref().ok_or_else(|| {
            SyncError::InvalidInput("manifest has not been written yet".into())
        })?;

        let name = &self.config.manifest_name;
        let body = read_file(path).await?;
        self.store()?.put(&format!("{}/{}", folder, name), name, body).await?;
        log::info!("uploaded manifest {}", name);
        Ok(true)
    }

    fn store(&self) -> SyncResult<StoreClient<'_, C>> {
        let token = self.config.yandex_token.as_deref().ok_or_else(|| {
            SyncError::Config("YANDEX_TOKEN is not set".into())
        })?;
        Ok(StoreClient::new(self.http, &self.config.cloud_api, token))
    }

    async fn pause(&self, i: usize) {
        if i > 0 && self.config.transfer_delay > Duration::from_millis(0) {
            tokio::time::sleep(self.config.transfer_delay).await;
        }
    }
}
