//! # Download-once File Cache
//!
//! Remote files are downloaded into the cache directory under a path derived
//! from their URL, and served from disk afterwards.
//!
//! Downloads land in a `*.partial` sibling and are renamed into place only
//! once every mirror download reports success; an interrupted download is
//! never mistaken for a cache hit.

use std::{
    ffi::OsString,
    fs,
    path::{Path, PathBuf},
};

use anyhow::Context;
use downloader::{Download, Downloader};

use crate::{
    BPE_PROFILES_CACHE_CONFIG,
    path_resolver::DirKind,
    path_utils::{extend_path, url_context},
};

/// Options for [`BpeProfilesDiskCache`].
#[derive(Clone, Default, Debug)]
pub struct BpeProfilesDiskCacheOptions {
    /// Explicit cache directory; overrides the environment.
    pub cache_dir: Option<PathBuf>,

    /// Explicit data directory; overrides the environment.
    pub data_dir: Option<PathBuf>,

    /// Optional [`Downloader`] builder.
    pub downloader: Option<fn() -> Downloader>,
}

impl BpeProfilesDiskCacheOptions {
    /// Set the cache directory.
    pub fn with_cache_dir<P: AsRef<Path>>(
        mut self,
        cache_dir: Option<P>,
    ) -> Self {
        self.cache_dir = cache_dir.map(|p| p.as_ref().to_path_buf());
        self
    }

    /// Set the data directory.
    pub fn with_data_dir<P: AsRef<Path>>(
        mut self,
        data_dir: Option<P>,
    ) -> Self {
        self.data_dir = data_dir.map(|p| p.as_ref().to_path_buf());
        self
    }

    /// Set the downloader builder.
    pub fn with_downloader(
        mut self,
        downloader: Option<fn() -> Downloader>,
    ) -> Self {
        self.downloader = downloader;
        self
    }
}

/// Download-once storage for vocabulary files.
///
/// Directories are resolved through
/// [`BPE_PROFILES_CACHE_CONFIG`](crate::BPE_PROFILES_CACHE_CONFIG).
pub struct BpeProfilesDiskCache {
    cache_dir: PathBuf,
    data_dir: PathBuf,
    downloader: Downloader,
}

impl BpeProfilesDiskCache {
    /// Construct a new [`BpeProfilesDiskCache`].
    ///
    /// Fails if a directory can be resolved neither from `options`, the
    /// environment, nor the platform defaults.
    pub fn new(options: BpeProfilesDiskCacheOptions) -> anyhow::Result<Self> {
        let cache_dir = resolve(DirKind::Cache, options.cache_dir)?;
        let data_dir = resolve(DirKind::Data, options.data_dir)?;

        let downloader = match options.downloader {
            Some(builder) => builder(),
            None => Downloader::builder()
                .build()
                .context("failed to build downloader")?,
        };

        Ok(Self {
            cache_dir,
            data_dir,
            downloader,
        })
    }

    /// Get the directory of the given kind.
    pub fn dir(
        &self,
        kind: DirKind,
    ) -> &Path {
        match kind {
            DirKind::Cache => &self.cache_dir,
            DirKind::Data => &self.data_dir,
        }
    }

    /// Get the cache directory.
    pub fn cache_dir(&self) -> &Path {
        self.dir(DirKind::Cache)
    }

    /// Get the data directory.
    pub fn data_dir(&self) -> &Path {
        self.dir(DirKind::Data)
    }

    /// `<cache_dir>/<context..>/<file>`; not checked, not created.
    pub fn cache_path<C, F>(
        &self,
        context: &[C],
        file: F,
    ) -> PathBuf
    where
        C: AsRef<Path>,
        F: AsRef<Path>,
    {
        extend_path(&self.cache_dir, context, file)
    }

    /// `<data_dir>/<context..>/<file>`; not checked, not created.
    pub fn data_path<C, F>(
        &self,
        context: &[C],
        file: F,
    ) -> PathBuf
    where
        C: AsRef<Path>,
        F: AsRef<Path>,
    {
        extend_path(&self.data_dir, context, file)
    }

    /// Where [`BpeProfilesDiskCache::load_url`] caches `url`.
    pub fn url_path(
        &self,
        url: &str,
    ) -> anyhow::Result<PathBuf> {
        let file = Download::new(url).file_name;
        check_file_name(&file, url)?;
        Ok(self.cache_path(&url_context(url), file))
    }

    /// Load `url` from the cache, downloading it first if permitted.
    ///
    /// The cache location is [`BpeProfilesDiskCache::url_path`].
    pub fn load_url(
        &mut self,
        url: &str,
        download: bool,
    ) -> anyhow::Result<PathBuf> {
        self.load_cached_path(&url_context(url), &[url], download)
    }

    /// Load a file from the cache, downloading it first if permitted.
    ///
    /// # Arguments
    /// * `context` - prefix dirs, inserted between the cache dir and the file.
    /// * `urls` - mirrors of the file; the file name comes from the first.
    /// * `download` - whether a missing file may be downloaded.
    ///
    /// # Errors
    /// * `urls` is empty.
    /// * The first url has no file name, e.g. `https://example.com/`.
    /// * The file is not cached, and `download` is `false`.
    /// * Every mirror fails.
    pub fn load_cached_path<C, S>(
        &mut self,
        context: &[C],
        urls: &[S],
        download: bool,
    ) -> anyhow::Result<PathBuf>
    where
        C: AsRef<Path>,
        S: AsRef<str>,
    {
        let urls: Vec<&str> = urls.iter().map(|s| s.as_ref()).collect();
        let Some(&primary) = urls.first() else {
            anyhow::bail!("no urls to load");
        };

        let mut dl = Download::new_mirrored(&urls);
        check_file_name(&dl.file_name, primary)?;
        let path = self.cache_path(context, &dl.file_name);

        if path.is_file() {
            log::debug!("cache hit: {}", path.display());
            return Ok(path);
        }
        if !download {
            anyhow::bail!("not cached, and downloads are disabled: {}", path.display());
        }

        let partial = partial_path(&path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
        if partial.exists() {
            fs::remove_file(&partial)
                .with_context(|| format!("failed to remove stale {}", partial.display()))?;
        }

        log::info!("downloading {primary} -> {}", path.display());
        dl.file_name = partial.clone();
        for summary in self.downloader.download(&[dl])? {
            summary.with_context(|| format!("failed to download {primary}"))?;
        }

        fs::rename(&partial, &path).with_context(|| {
            format!(
                "failed to move {} into place; download produced no file?",
                partial.display()
            )
        })?;

        Ok(path)
    }
}

fn resolve(
    kind: DirKind,
    explicit: Option<PathBuf>,
) -> anyhow::Result<PathBuf> {
    BPE_PROFILES_CACHE_CONFIG
        .resolve_dir(kind, explicit)
        .with_context(|| {
            format!(
                "failed to resolve {kind:?} directory; set one of {:?}",
                BPE_PROFILES_CACHE_CONFIG.env_vars(kind)
            )
        })
}

fn check_file_name(
    file: &Path,
    url: &str,
) -> anyhow::Result<()> {
    if file.file_name().is_none() {
        anyhow::bail!("no file name in url: {url}");
    }
    Ok(())
}

fn partial_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(OsString::from).unwrap_or_default();
    name.push(".partial");
    path.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use std::env;

    use serial_test::serial;

    use super::*;
    use crate::{BPE_PROFILES_CACHE_DIR, BPE_PROFILES_DATA_DIR};

    fn temp_cache(dir: &tempdir::TempDir) -> BpeProfilesDiskCache {
        BpeProfilesDiskCache::new(
            BpeProfilesDiskCacheOptions::default()
                .with_cache_dir(Some(dir.path().join("cache")))
                .with_data_dir(Some(dir.path().join("data"))),
        )
        .unwrap()
    }

    /// Run `f` with the env overrides set to `values`, then restore them.
    fn with_env_overrides<F: FnOnce()>(
        values: [Option<&str>; 2],
        f: F,
    ) {
        let vars = [BPE_PROFILES_CACHE_DIR, BPE_PROFILES_DATA_DIR];
        let saved = vars.map(env::var_os);

        for (var, value) in vars.iter().zip(values) {
            match value {
                Some(v) => unsafe { env::set_var(var, v) },
                None => unsafe { env::remove_var(var) },
            }
        }
        f();
        for (var, value) in vars.iter().zip(saved) {
            match value {
                Some(v) => unsafe { env::set_var(var, v) },
                None => unsafe { env::remove_var(var) },
            }
        }
    }

    #[test]
    #[serial]
    fn test_dir_resolution() {
        let explicit = BpeProfilesDiskCacheOptions::default()
            .with_cache_dir(Some("/tmp/bpe-profiles/explicit-cache"))
            .with_data_dir(Some("/tmp/bpe-profiles/explicit-data"));

        with_env_overrides([None, None], || {
            let pds = BPE_PROFILES_CACHE_CONFIG.project_dirs().unwrap();
            let cache = BpeProfilesDiskCache::new(Default::default()).unwrap();
            assert_eq!(cache.cache_dir(), pds.cache_dir());
            assert_eq!(cache.data_dir(), pds.data_dir());
        });

        with_env_overrides(
            [Some("/tmp/bpe-profiles/env-cache"), Some("/tmp/bpe-profiles/env-data")],
            || {
                let cache = BpeProfilesDiskCache::new(Default::default()).unwrap();
                assert_eq!(cache.cache_dir(), Path::new("/tmp/bpe-profiles/env-cache"));
                assert_eq!(cache.dir(DirKind::Data), Path::new("/tmp/bpe-profiles/env-data"));

                let cache = BpeProfilesDiskCache::new(explicit.clone()).unwrap();
                assert_eq!(cache.cache_dir(), Path::new("/tmp/bpe-profiles/explicit-cache"));
                assert_eq!(cache.data_dir(), Path::new("/tmp/bpe-profiles/explicit-data"));
            },
        );
    }

    #[test]
    fn test_paths() {
        let dir = tempdir::TempDir::new("disk_cache_test").unwrap();
        let cache = temp_cache(&dir);

        assert_eq!(
            cache.data_path(&["snapshots"], "r50k_base.bprt"),
            dir.path().join("data/snapshots/r50k_base.bprt")
        );
        assert_eq!(
            cache.url_path("https://example.com/encodings/r50k_base.tiktoken").unwrap(),
            dir.path().join("cache/example.com/encodings/r50k_base.tiktoken")
        );
        assert_eq!(
            partial_path(Path::new("/a/b.tiktoken")),
            PathBuf::from("/a/b.tiktoken.partial")
        );
    }

    #[test]
    fn test_load_url_offline() {
        let dir = tempdir::TempDir::new("disk_cache_test").unwrap();
        let mut cache = temp_cache(&dir);
        let url = "https://example.com/encodings/r50k_base.tiktoken";

        let err = cache.load_url(url, false).unwrap_err();
        assert!(err.to_string().contains("downloads are disabled"), "{err:#}");

        // A leftover partial download is not a hit.
        let path = cache.url_path(url).unwrap();
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(partial_path(&path), b"IQ==").unwrap();
        assert!(cache.load_url(url, false).is_err());

        fs::write(&path, b"IQ== 0\n").unwrap();
        assert_eq!(cache.load_url(url, false).unwrap(), path);
        assert_eq!(
            cache
                .load_cached_path(&["example.com", "encodings"], &[url], false)
                .unwrap(),
            path
        );
    }

    #[test]
    fn test_load_requires_urls() {
        let dir = tempdir::TempDir::new("disk_cache_test").unwrap();
        let mut cache = temp_cache(&dir);

        let urls: [&str; 0] = [];
        assert!(cache.load_cached_path(&["x"], &urls, true).is_err());
    }

    #[test]
    fn test_url_without_file_name() {
        let dir = tempdir::TempDir::new("disk_cache_test").unwrap();
        let mut cache = temp_cache(&dir);

        for url in ["https://example.com/", "https://example.com/encodings/"] {
            assert!(cache.url_path(url).is_err(), "{url}");

            let err = cache.load_url(url, true).unwrap_err();
            assert!(err.to_string().contains("no file name"), "{err:#}");
        }
        assert!(!dir.path().join("cache.partial").exists());
        assert!(!dir.path().join("cache").exists());
    }
}
