//! # Cache and Data Directory Resolution

use std::{
    env,
    path::{Path, PathBuf},
};

use directories_next::ProjectDirs;

/// The kinds of directory a [`PathResolver`] resolves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirKind {
    /// Re-downloadable files; downloads land here.
    Cache,

    /// Files the user produced; snapshot directories live here.
    Data,
}

/// Static configuration for application path resolution.
pub struct PathResolver {
    /// The qualifier for [`ProjectDirs`].
    pub qualifier: &'static str,

    /// The organization for [`ProjectDirs`].
    pub organization: &'static str,

    /// The application for [`ProjectDirs`].
    pub application: &'static str,

    /// Cache directory override variables, highest priority first.
    pub cache_env_vars: &'static [&'static str],

    /// Data directory override variables, highest priority first.
    pub data_env_vars: &'static [&'static str],
}

impl PathResolver {
    /// Get the [`ProjectDirs`] for this config.
    pub fn project_dirs(&self) -> Option<ProjectDirs> {
        ProjectDirs::from(self.qualifier, self.organization, self.application)
    }

    /// The override variables for `kind`.
    pub fn env_vars(
        &self,
        kind: DirKind,
    ) -> &'static [&'static str] {
        match kind {
            DirKind::Cache => self.cache_env_vars,
            DirKind::Data => self.data_env_vars,
        }
    }

    /// The platform default for `kind`, ignoring overrides.
    pub fn default_dir(
        &self,
        kind: DirKind,
    ) -> Option<PathBuf> {
        let pds = self.project_dirs()?;
        Some(match kind {
            DirKind::Cache => pds.cache_dir().to_path_buf(),
            DirKind::Data => pds.data_dir().to_path_buf(),
        })
    }

    /// Resolve a directory.
    ///
    /// Resolution Order:
    /// 1. `path`, if present.
    /// 2. the first non-empty ``env[$VAR]`` of [`PathResolver::env_vars`].
    /// 3. [`PathResolver::default_dir`], if present.
    pub fn resolve_dir<P: AsRef<Path>>(
        &self,
        kind: DirKind,
        path: Option<P>,
    ) -> Option<PathBuf> {
        if let Some(path) = path {
            return Some(path.as_ref().to_path_buf());
        }

        let from_env = self.env_vars(kind).iter().find_map(|var| {
            env::var_os(var)
                .filter(|v| !v.is_empty())
                .map(|v| (var, PathBuf::from(v)))
        });
        if let Some((var, dir)) = from_env {
            log::debug!("{kind:?} dir from ${var}: {}", dir.display());
            return Some(dir);
        }

        self.default_dir(kind)
    }

    /// [`PathResolver::resolve_dir`] for [`DirKind::Cache`].
    pub fn resolve_cache_dir<P: AsRef<Path>>(
        &self,
        path: Option<P>,
    ) -> Option<PathBuf> {
        self.resolve_dir(DirKind::Cache, path)
    }

    /// [`PathResolver::resolve_dir`] for [`DirKind::Data`].
    pub fn resolve_data_dir<P: AsRef<Path>>(
        &self,
        path: Option<P>,
    ) -> Option<PathBuf> {
        self.resolve_dir(DirKind::Data, path)
    }
}
