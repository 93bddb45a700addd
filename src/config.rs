use crate::cli::{CloudProvider, CopyCmd};
use crate::sync_error::{SyncError, SyncResult};
use crate::vk::VK_API;
use crate::yandex_store::YANDEX_API;
use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

const DEFAULT_API_VERSION: &str = "5.131";
const DEFAULT_FOLDER_PATTERN: &str = "photos";
const DEFAULT_MANIFEST_NAME: &str = "photos.json";
const TRANSFER_DELAY: Duration = Duration::from_millis(200);
pub(crate) const PROFILE_ALBUM: &str = "profile";

#[derive(Clone)]
pub(crate) struct SourceCredentials {
    pub(crate) owner_id: String,
    pub(crate) access_token: String,
    pub(crate) api_version: String,
}

/// Everything one run needs, resolved once at startup.
pub(crate) struct Config {
    pub(crate) source: SourceCredentials,
    pub(crate) yandex_token: Option<String>,
    pub(crate) folder_name_pattern: String,
    pub(crate) manifest_name: String,
    pub(crate) albums: Vec<String>,
    pub(crate) clouds: Vec<CloudProvider>,
    pub(crate) download_dir: PathBuf,
    pub(crate) source_api: String,
    pub(crate) cloud_api: String,
    pub(crate) transfer_delay: Duration,
    pub(crate) count: u32,
    pub(crate) store_manifest_to_cloud: bool,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("owner_id", &self.source.owner_id)
            .field("access_token", &"<redacted>")
            .field("yandex_token", &self.yandex_token.as_ref().map(|_| "<redacted>"))
            .field("folder_name_pattern", &self.folder_name_pattern)
            .field("manifest_name", &self.manifest_name)
            .field("albums", &self.albums)
            .field("clouds", &self.clouds)
            .field("count", &self.count)
            .finish_non_exhaustive()
    }
}

impl Config {
    /// Combines the command line with settings looked up by `var`
    /// (normally `std::env::var`).
    pub(crate) fn from_env<F>(cmd: CopyCmd, var: F) -> SyncResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |name: &str| {
            var(name)
                .filter(|v| !v.is_empty())
                .ok_or_else(|| SyncError::Config(format!("{} is not set", name)))
        };

        let source = SourceCredentials {
            owner_id: required("VK_ID")?,
            access_token: required("VK_TOKEN")?,
            api_version: var("VK_API_VERSION").unwrap_or_else(|| DEFAULT_API_VERSION.to_owned()),
        };

        let yandex_token = if cmd.clouds.contains(&CloudProvider::Yandex) {
            Some(required("YANDEX_TOKEN")?)
        } else {
            var("YANDEX_TOKEN")
        };

        Ok(Config {
            source,
            yandex_token,
            folder_name_pattern: var("FOLDER_NAME_PATTERN")
                .unwrap_or_else(|| DEFAULT_FOLDER_PATTERN.to_owned()),
            manifest_name: var("JSON_NAME").unwrap_or_else(|| DEFAULT_MANIFEST_NAME.to_owned()),
            albums: cmd.albums,
            clouds: cmd.clouds,
            download_dir: cmd.download_dir,
            source_api: VK_API.to_owned(),
            cloud_api: YANDEX_API.to_owned(),
            transfer_delay: TRANSFER_DELAY,
            count: cmd.count,
            store_manifest_to_cloud: var("STORE_JSON_TO_CLOUD")
                .map(|v| parse_flag(&v))
                .unwrap_or(false),
        })
    }
}

/// Variables defined in a dotenv file. A missing file defines nothing.
pub(crate) fn read_env_file(path: &Path) -> SyncResult<HashMap<String, String>> {
    let iter = match dotenvy::from_path_iter(path) {
        Ok(iter) => iter,
        Err(err) if err.not_found() => {
            log::debug!("no env file at {:?}", path);
            return Ok(HashMap::new());
        }
        Err(err) => return Err(err.into()),
    };

    let mut vars = HashMap::new();
    for pair in iter {
        let (key, value) = pair?;
        vars.insert(key, value);
    }
    log::debug!("read {} settings from {:?}", vars.len(), path);
    Ok(vars)
}

/// Process environment first, then the env file.
pub(crate) fn env_lookup(file_vars: HashMap<String, String>) -> impl Fn(&str) -> Option<String> {
    move |name: &str| std::env::var(name).ok().or_else(|| file_vars.get(name).cloned())
}

fn parse_flag(value: &str) -> bool {
    matches!(value.trim().to_lowercase().as_str(), "true" | "1" | "t")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cmd(clouds: Vec<CloudProvider>) -> CopyCmd {
        CopyCmd {
            count: 3,
            albums: vec!["wall".into()],
            clouds,
            download_dir: PathBuf::from("out"),
            env_file: PathBuf::from(".env"),
        }
    }

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name: &str| vars.get(name).cloned()
    }

    #[test]
    fn reads_all_settings() {
        let config = Config::from_env(
            cmd(vec![CloudProvider::Yandex]),
            env(&[
                ("VK_ID", "1001"),
                ("VK_TOKEN", "vk"),
                ("VK_API_VERSION", "5.199"),
                ("YANDEX_TOKEN", "ya"),
                ("FOLDER_NAME_PATTERN", "backup"),
                ("JSON_NAME", "report.json"),
                ("STORE_JSON_TO_CLOUD", "True"),
            ]),
        )
        .unwrap();

        assert_eq!(config.source.owner_id, "1001");
        assert_eq!(config.source.api_version, "5.199");
        assert_eq!(config.yandex_token.as_deref(), Some("ya"));
        assert_eq!(config.folder_name_pattern, "backup");
        assert_eq!(config.manifest_name, "report.json");
        assert!(config.store_manifest_to_cloud);
        assert_eq!(config.count, 3);
        assert_eq!(config.albums, vec!["wall".to_string()]);
    }

    #[test]
    fn falls_back_to_defaults() {
        let config = Config::from_env(
            cmd(vec![CloudProvider::Google]),
            env(&[("VK_ID", "1"), ("VK_TOKEN", "vk")]),
        )
        .unwrap();

        assert_eq!(config.source.api_version, DEFAULT_API_VERSION);
        assert_eq!(config.folder_name_pattern, DEFAULT_FOLDER_PATTERN);
        assert_eq!(config.manifest_name, DEFAULT_MANIFEST_NAME);
        assert!(config.yandex_token.is_none());
        assert!(!config.store_manifest_to_cloud);
        assert_eq!(config.transfer_delay, TRANSFER_DELAY);
    }

    #[test]
    fn yandex_requires_its_token() {
        let err = Config::from_env(
            cmd(vec![CloudProvider::Yandex]),
            env(&[("VK_ID", "1"), ("VK_TOKEN", "vk")]),
        )
        .unwrap_err();
        assert!(err.to_string().contains("YANDEX_TOKEN"));
    }

    #[test]
    fn empty_source_token_is_missing() {
        let err = Config::from_env(
            cmd(vec![CloudProvider::Google]),
            env(&[("VK_ID", "1"), ("VK_TOKEN", "")]),
        )
        .unwrap_err();
        assert!(matches!(err, SyncError::Config(_)));
    }

    #[test]
    fn flag_spellings() {
        for yes in &["true", "1", "t", "T", "TRUE"] {
            assert!(parse_flag(yes), "{}", yes);
        }
        for no in &["false", "0", "no", "", "yes"] {
            assert!(!parse_flag(no), "{}", no);
        }
    }

    #[test]
    fn debug_hides_tokens() {
        let config = Config::from_env(
            cmd(vec![CloudProvider::Yandex]),
            env(&[("VK_ID", "1"), ("VK_TOKEN", "secret-vk"), ("YANDEX_TOKEN", "secret-ya")]),
        )
        .unwrap();
        let printed = format!("{:?}", config);
        assert!(!printed.contains("secret"));
    }

    #[test]
    fn settings_come_from_env_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".env");
        std::fs::write(
            &path,
            "PHOTOSYNC_FILE_VK_ID=1001\nPHOTOSYNC_FILE_VK_TOKEN=\"vk token\"\n# comment\n",
        )
        .unwrap();

        let vars = read_env_file(&path).unwrap();
        assert_eq!(vars.get("PHOTOSYNC_FILE_VK_TOKEN").map(String::as_str), Some("vk token"));

        let lookup = env_lookup(vars);
        assert_eq!(lookup("PHOTOSYNC_FILE_VK_ID").as_deref(), Some("1001"));
        assert!(lookup("PHOTOSYNC_FILE_MISSING").is_none());
    }

    #[test]
    fn config_loads_through_env_file_lookup() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.env");
        std::fs::write(&path, "VK_ID=42\nVK_TOKEN=from-file\nJSON_NAME=report.json\n").unwrap();

        let vars = read_env_file(&path).unwrap();
        let config = Config::from_env(cmd(vec![CloudProvider::Google]), env_from(vars)).unwrap();

        assert_eq!(config.source.owner_id, "42");
        assert_eq!(config.source.access_token, "from-file");
        assert_eq!(config.manifest_name, "report.json");
    }

    #[test]
    fn missing_env_file_defines_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let vars = read_env_file(&dir.path().join("absent.env")).unwrap();
        assert!(vars.is_empty());
    }

    fn env_from(vars: HashMap<String, String>) -> impl Fn(&str) -> Option<String> {
        move |name: &str| vars.get(name).cloned()
    }
}
