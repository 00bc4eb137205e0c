//! # File I/O Module
//!
//! Project and site-input files on disk:
//! - **Atomic saves**: write to `.tmp`, fsync, rename over the target
//! - **File locking**: `fs2` OS lock plus a `.geo.lock` file naming the holder
//! - **Version validation**: refuse files written by an incompatible schema
//! - **Site input files**: plain JSON, one `SiteInput` or an array of them
//!
//! ## Example
//!
//! ```rust,no_run
//! use geo_core::file_io::{save_project, load_project, FileLock};
//! use geo_core::project::Project;
//! use std::path::Path;
//!
//! let project = Project::new("Engineer", "25-001", "Client");
//! let path = Path::new("site.geo");
//!
//! let lock = FileLock::acquire(path, "engineer@company.com")?;
//! save_project(&project, path)?;
//! drop(lock);
//!
//! let loaded = load_project(path)?;
//! assert_eq!(loaded.meta.job_id, "25-001");
//! # Ok::<(), geo_core::errors::CalcError>(())
//! ```

use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use fs2::FileExt;
use serde::{Deserialize, Serialize};

use crate::analysis::SiteInput;
use crate::errors::{CalcError, CalcResult};
use crate::project::{Project, SCHEMA_VERSION};

/// Project file extension
pub const PROJECT_EXTENSION: &str = "geo";

/// Locks older than this are taken over regardless of owner
const STALE_LOCK_HOURS: i64 = 24;

/// Lock file metadata stored in .geo.lock files
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LockInfo {
    /// User identifier (email or username)
    pub user_id: String,
    /// Machine name where lock was acquired
    pub machine: String,
    /// Process ID that holds the lock
    pub pid: u32,
    /// When the lock was acquired
    pub locked_at: DateTime<Utc>,
}

impl LockInfo {
    /// Create new lock info for the current process
    pub fn new(user_id: impl Into<String>) -> Self {
        LockInfo {
            user_id: user_id.into(),
            machine: hostname().unwrap_or_else(|| "unknown".to_string()),
            pid: std::process::id(),
            locked_at: Utc::now(),
        }
    }

    /// A lock is stale when its process is gone (same machine only) or it
    /// has been held longer than a day.
    pub fn is_stale(&self) -> bool {
        if hostname().as_deref() == Some(self.machine.as_str()) && !process_alive(self.pid) {
            return true;
        }
        (Utc::now() - self.locked_at).num_hours() > STALE_LOCK_HOURS
    }
}

fn hostname() -> Option<String> {
    #[cfg(windows)]
    {
        std::env::var("COMPUTERNAME").ok()
    }
    #[cfg(not(windows))]
    {
        std::env::var("HOSTNAME")
            .ok()
            .or_else(|| std::env::var("HOST").ok())
    }
}

#[cfg(target_os = "linux")]
fn process_alive(pid: u32) -> bool {
    Path::new(&format!("/proc/{}", pid)).exists()
}

// No /proc elsewhere; rely on the age limit.
#[cfg(not(target_os = "linux"))]
fn process_alive(_pid: u32) -> bool {
    true
}

/// File lock guard that releases the lock when dropped.
pub struct FileLock {
    project_path: PathBuf,
    lock_path: PathBuf,
    /// Holds the OS-level lock for the guard's lifetime
    _lock_file: File,
    pub info: LockInfo,
}

impl FileLock {
    /// Acquire an exclusive lock on a project file.
    ///
    /// # Returns
    ///
    /// * `Ok(FileLock)` - Lock acquired
    /// * `Err(CalcError::FileLocked)` - Someone else holds a live lock
    pub fn acquire(path: &Path, user_id: impl Into<String>) -> CalcResult<Self> {
        if let Some(existing) = Self::check(path) {
            return Err(CalcError::file_locked(
                path.display().to_string(),
                format!("{} ({})", existing.user_id, existing.machine),
                existing.locked_at.to_rfc3339(),
            ));
        }

        let lock_path = lock_path_for(path);
        let info = LockInfo::new(user_id);
        let lock_err = |op: &str, e: std::io::Error| {
            CalcError::file_error(op, lock_path.display().to_string(), e.to_string())
        };

        let mut lock_file = OpenOptions::new()
            .write(true)
            .read(true)
            .create(true)
            .truncate(true)
            .open(&lock_path)
            .map_err(|e| lock_err("create lock", e))?;

        lock_file.try_lock_exclusive().map_err(|_| {
            CalcError::file_locked(path.display().to_string(), "another process", "unknown")
        })?;

        let lock_json = serde_json::to_string_pretty(&info).map_err(CalcError::serialization)?;
        lock_file
            .write_all(lock_json.as_bytes())
            .map_err(|e| lock_err("write lock", e))?;
        lock_file.sync_all().map_err(|e| lock_err("sync lock", e))?;

        Ok(FileLock {
            project_path: path.to_path_buf(),
            lock_path,
            _lock_file: lock_file,
            info,
        })
    }

    /// Current live lock holder, if any, without acquiring.
    pub fn check(path: &Path) -> Option<LockInfo> {
        read_json::<LockInfo>(&lock_path_for(path))
            .ok()
            .filter(|info| !info.is_stale())
    }

    /// Path to the locked project file
    pub fn project_path(&self) -> &Path {
        &self.project_path
    }
}

impl Drop for FileLock {
    fn drop(&mut self) {
        let _ = fs::remove_file(&self.lock_path);
    }
}

/// `site.geo` → `site.geo.lock`
fn lock_path_for(project_path: &Path) -> PathBuf {
    let mut name = project_path.as_os_str().to_owned();
    name.push(".lock");
    PathBuf::from(name)
}

fn read_json<T: for<'de> Deserialize<'de>>(path: &Path) -> CalcResult<T> {
    let contents = fs::read_to_string(path)
        .map_err(|e| CalcError::file_error("read", path.display().to_string(), e.to_string()))?;
    serde_json::from_str(&contents)
        .map_err(|e| CalcError::serialization(format!("Invalid JSON in {}: {}", path.display(), e)))
}

/// Write `contents` next to `path`, fsync, then rename over `path`.
fn write_atomic(path: &Path, contents: &[u8]) -> CalcResult<()> {
    let mut tmp_name = path.as_os_str().to_owned();
    tmp_name.push(".tmp");
    let tmp_path = PathBuf::from(tmp_name);
    let tmp_err = |op: &str, e: std::io::Error| {
        CalcError::file_error(op, tmp_path.display().to_string(), e.to_string())
    };

    let mut tmp_file = File::create(&tmp_path).map_err(|e| tmp_err("create temp file", e))?;
    tmp_file
        .write_all(contents)
        .map_err(|e| tmp_err("write temp file", e))?;
    tmp_file.sync_all().map_err(|e| tmp_err("sync temp file", e))?;
    drop(tmp_file);

    fs::rename(&tmp_path, path).map_err(|e| {
        let _ = fs::remove_file(&tmp_path);
        CalcError::file_error("rename to final", path.display().to_string(), e.to_string())
    })
}

/// Save a project with atomic write semantics.
pub fn save_project(project: &Project, path: &Path) -> CalcResult<()> {
    let json = serde_json::to_string_pretty(project).map_err(CalcError::serialization)?;
    write_atomic(path, json.as_bytes())
}

/// Load a project and check its schema version.
///
/// # Returns
///
/// * `Ok(Project)` - Loaded project
/// * `Err(CalcError::VersionMismatch)` - Written by an incompatible version
/// * `Err(CalcError::SerializationError)` - Invalid JSON
/// * `Err(CalcError::FileError)` - I/O error
pub fn load_project(path: &Path) -> CalcResult<Project> {
    let project: Project = read_json(path)?;
    validate_version(&project.meta.version)?;
    Ok(project)
}

/// Load a project along with whoever currently holds its lock.
pub fn load_project_with_lock_check(path: &Path) -> CalcResult<(Project, Option<LockInfo>)> {
    let project = load_project(path)?;
    Ok((project, FileLock::check(path)))
}

/// Read site inputs from a JSON file holding either one object or an array.
pub fn load_site_inputs(path: &Path) -> CalcResult<Vec<SiteInput>> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(SiteInput),
        Many(Vec<SiteInput>),
    }

    match read_json::<OneOrMany>(path)? {
        OneOrMany::One(site) => Ok(vec![site]),
        OneOrMany::Many(sites) => Ok(sites),
    }
}

/// Major must match; for 0.x the file's minor may not be newer than ours.
fn validate_version(file_version: &str) -> CalcResult<()> {
    let parse = |v: &str| -> Option<(u32, u32)> {
        let mut parts = v.split('.').map(|p| p.parse::<u32>().ok());
        Some((parts.next()??, parts.next().flatten().unwrap_or(0)))
    };
    let mismatch = || CalcError::VersionMismatch {
        file_version: file_version.to_string(),
        expected_version: SCHEMA_VERSION.to_string(),
    };

    let (file_major, file_minor) = parse(file_version).ok_or_else(mismatch)?;
    let (major, minor) = parse(SCHEMA_VERSION).ok_or_else(mismatch)?;

    if file_major != major || (major == 0 && file_minor > minor) {
        return Err(mismatch());
    }
    Ok(())
}
