use std::path::PathBuf;
use std::str::FromStr;
use clap::{App, AppSettings, Arg, ArgMatches};

static VERSION: &str = "0.1.0";
static AUTHOR: &str = "apmaros";
static DESCRIPTION: &str = "Copies profile and album photos into a cloud disk folder";
pub(crate) const COUNT: &str = "count";
const COUNT_SHORT: &str = "n";
pub(crate) const ALBUM: &str = "album";
const ALBUM_SHORT: &str = "a";
pub(crate) const CLOUD: &str = "cloud";
const CLOUD_SHORT: &str = "c";
pub(crate) const DIR: &str = "dir";
const DIR_SHORT: &str = "d";
pub(crate) const ENV_FILE: &str = "env-file";
const ENV_FILE_SHORT: &str = "e";
const DEFAULT_COUNT: &str = "5";
const YANDEX: &str = "yandex";
const GOOGLE: &str = "google";

pub(crate) fn build_cli<'a, 'b>() -> App<'a, 'b> {
    App::new("Copy photos to cloud")
        .version(VERSION)
        .author(AUTHOR)
        .about(DESCRIPTION)
        .setting(AppSettings::AllowNegativeNumbers)
        .arg(Arg::with_name(COUNT)
            .short(COUNT_SHORT)
            .long(COUNT)
            .takes_value(true)
            .default_value(DEFAULT_COUNT)
            .help("Number of photos to fetch from every album"))
        .arg(Arg::with_name(ALBUM)
            .short(ALBUM_SHORT)
            .long(ALBUM)
            .takes_value(true)
            .multiple(true)
            .min_values(0)
            .help("Album ids to copy in addition to the profile album"))
        .arg(Arg::with_name(CLOUD)
            .short(CLOUD_SHORT)
            .long(CLOUD)
            .takes_value(true)
            .multiple(true)
            .possible_values(&[YANDEX, GOOGLE])
            .default_value(YANDEX)
            .help("Cloud disks to upload into"))
        .arg(Arg::with_name(DIR)
            .short(DIR_SHORT)
            .long(DIR)
            .takes_value(true)
            .default_value(".")
            .help("Local folder the photos and the report are written to"))
        .arg(Arg::with_name(ENV_FILE)
            .short(ENV_FILE_SHORT)
            .long(ENV_FILE)
            .takes_value(true)
            .default_value(".env")
            .help("File with credentials and settings; the process environment wins"))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CloudProvider {
    Yandex,
    Google,
}

impl FromStr for CloudProvider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            YANDEX => Ok(Self::Yandex),
            GOOGLE => Ok(Self::Google),
            _ => Err(format!("Cloud {} was not recognised", s))
        }
    }
}

impl CloudProvider {
    pub(crate) fn to_str(&self) -> &str {
        match self {
            CloudProvider::Yandex => YANDEX,
            CloudProvider::Google => GOOGLE
        }
    }
}

#[derive(Debug)]
pub(crate) struct CopyCmd {
    pub(crate) count: u32,
    pub(crate) albums: Vec<String>,
    pub(crate) clouds: Vec<CloudProvider>,
    pub(crate) download_dir: PathBuf,
    pub(crate) env_file: PathBuf,
}

impl CopyCmd {
    pub(crate) fn build(matches: &ArgMatches) -> Result<Self, String> {
        // safe to unwrap, these args have defaults
        let count = matches.value_of(COUNT).unwrap()
            .parse::<u32>()
            .map_err(|e| format!("Invalid --{}: {}", COUNT, e))?;
        let albums = matches.values_of(ALBUM)
            .map(|values| values.map(String::from).collect())
            .unwrap_or_default();
        let clouds = matches.values_of(CLOUD).unwrap()
            .map(CloudProvider::from_str)
            .collect::<Result<Vec<_>, _>>()?;
        let download_dir = PathBuf::from(matches.value_of(DIR).unwrap());
        let env_file = PathBuf::from(matches.value_of(ENV_FILE).unwrap());

        Ok(CopyCmd { count, albums, clouds, download_dir, env_file })
    }
}
