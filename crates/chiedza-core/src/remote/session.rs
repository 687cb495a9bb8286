//! Remote session value and its on-disk cache.
//!
//! The cache lives in `${CHIEDZA_HOME}/session.json` with restricted
//! permissions (0600). Tokens are never logged.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Access tokens are treated as expired this many seconds early.
const EXPIRY_MARGIN_SECS: i64 = 30;

pub(crate) fn now_secs() -> i64 {
    chrono::Utc::now().timestamp()
}

/// Staff role, read from the user's metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Role {
    Director,
    #[default]
    FieldOfficer,
}

impl Role {
    /// Anything other than `Director` is a field officer.
    pub fn from_metadata(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            Some(r) if r.eq_ignore_ascii_case("director") => Role::Director,
            _ => Role::FieldOfficer,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Role::Director => "Director",
            Role::FieldOfficer => "Field Officer",
        }
    }
}

/// Free-form metadata attached to the user by the auth service.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemoteUser {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub user_metadata: UserMetadata,
}

/// Tokens plus user, as issued by the auth service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemoteSession {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: String,
    /// Expiry, seconds since the Unix epoch.
    pub expires_at: i64,
    pub user: RemoteUser,
}

impl RemoteSession {
    pub fn email(&self) -> &str {
        self.user.email.as_deref().unwrap_or("")
    }

    pub fn role(&self) -> Role {
        Role::from_metadata(self.user.user_metadata.role.as_deref())
    }

    pub fn is_expired_at(&self, now: i64) -> bool {
        now + EXPIRY_MARGIN_SECS >= self.expires_at
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired_at(now_secs())
    }

    pub fn can_refresh(&self) -> bool {
        !self.refresh_token.is_empty()
    }
}

/// Token grant response body.
#[derive(Debug, Deserialize)]
pub(crate) struct TokenResponse {
    access_token: String,
    #[serde(default)]
    refresh_token: String,
    #[serde(default)]
    expires_in: Option<i64>,
    #[serde(default)]
    expires_at: Option<i64>,
    user: RemoteUser,
}

impl TokenResponse {
    pub(crate) fn into_session(self, now: i64) -> RemoteSession {
        let expires_at = self
            .expires_at
            .or_else(|| self.expires_in.map(|secs| now + secs))
            .unwrap_or(now);
        RemoteSession {
            access_token: self.access_token,
            refresh_token: self.refresh_token,
            expires_at,
            user: self.user,
        }
    }
}

/// File-backed store for the current session.
#[derive(Debug, Clone)]
pub struct SessionCache {
    path: PathBuf,
}

impl SessionCache {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the cached session, `None` when there is no cache file.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(&self) -> Result<Option<RemoteSession>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let contents = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read session from {}", self.path.display()))?;

        serde_json::from_str(&contents)
            .map(Some)
            .with_context(|| format!("Failed to parse session from {}", self.path.display()))
    }

    /// Writes the session with restricted permissions (0600).
    ///
    /// The contents go to a fresh temp file that then replaces the cache, so
    /// a file left with looser permissions is never reused.
    ///
    /// # Errors
    /// Returns an error if the file cannot be written.
    pub fn save(&self, session: &RemoteSession) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }

        let contents =
            serde_json::to_string_pretty(session).context("Failed to serialize session")?;

        let tmp_path = self.path.with_extension("json.tmp");
        if let Err(e) = fs::remove_file(&tmp_path)
            && e.kind() != std::io::ErrorKind::NotFound
        {
            return Err(e)
                .with_context(|| format!("Failed to remove stale {}", tmp_path.display()));
        }

        #[cfg(unix)]
        {
            use std::fs::OpenOptions;
            use std::io::Write;
            use std::os::unix::fs::OpenOptionsExt;

            let mut file = OpenOptions::new()
                .write(true)
                .create_new(true)
                .mode(0o600)
                .open(&tmp_path)
                .with_context(|| format!("Failed to open {} for writing", tmp_path.display()))?;
            file.write_all(contents.as_bytes())
                .with_context(|| format!("Failed to write to {}", tmp_path.display()))?;
        }

        #[cfg(not(unix))]
        {
            fs::write(&tmp_path, contents)
                .with_context(|| format!("Failed to write to {}", tmp_path.display()))?;
        }

        fs::rename(&tmp_path, &self.path).with_context(|| {
            format!(
                "Failed to rename {} to {}",
                tmp_path.display(),
                self.path.display()
            )
        })?;

        Ok(())
    }

    /// Removes the cache file. Returns whether one existed.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be removed.
    pub fn clear(&self) -> Result<bool> {
        if !self.path.exists() {
            return Ok(false);
        }
        fs::remove_file(&self.path)
            .with_context(|| format!("Failed to remove {}", self.path.display()))?;
        Ok(true)
    }
}

/// Masks a token for display (first 8 chars + ...).
pub fn mask_token(token: &str) -> String {
    match token.get(..8) {
        Some(prefix) if token.len() > 16 => format!("{prefix}..."),
        _ => "***".to_string(),
    }
}

#[cfg(test)]
pub(crate) fn sample_session(email: &str, role: Option<&str>, expires_at: i64) -> RemoteSession {
    RemoteSession {
        access_token: "access-token-0123456789".to_string(),
        refresh_token: "refresh-token-0123456789".to_string(),
        expires_at,
        user: RemoteUser {
            id: "user-1".to_string(),
            email: Some(email.to_string()),
            user_metadata: UserMetadata {
                role: role.map(str::to_string),
            },
        },
    }
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;

    #[test]
    fn test_role_from_metadata() {
        assert_eq!(Role::from_metadata(Some("Director")), Role::Director);
        assert_eq!(Role::from_metadata(Some(" director ")), Role::Director);
        assert_eq!(Role::from_metadata(Some("Field Officer")), Role::FieldOfficer);
        assert_eq!(Role::from_metadata(None), Role::FieldOfficer);
        assert_eq!(Role::FieldOfficer.label(), "Field Officer");
    }

    #[test]
    fn test_expiry_margin() {
        let session = sample_session("a@b.org", None, 1_000);
        assert!(!session.is_expired_at(900));
        assert!(session.is_expired_at(980));
        assert!(session.is_expired_at(2_000));
    }

    #[test]
    fn test_token_response_expiry() {
        let body = serde_json::json!({
            "access_token": "a",
            "refresh_token": "r",
            "expires_in": 3600,
            "user": { "id": "u1", "email": "x@y.org", "user_metadata": { "role": "Director" } }
        });
        let response: TokenResponse = serde_json::from_value(body).unwrap();
        let session = response.into_session(100);
        assert_eq!(session.expires_at, 3_700);
        assert_eq!(session.role(), Role::Director);
        assert_eq!(session.email(), "x@y.org");
    }

    #[test]
    fn test_cache_round_trip_and_clear() {
        let dir = tempdir().unwrap();
        let cache = SessionCache::new(dir.path().join("nested").join("session.json"));
        assert_eq!(cache.load().unwrap(), None);

        let session = sample_session("staff@chiedza.org", Some("Director"), 42);
        cache.save(&session).unwrap();
        assert_eq!(cache.load().unwrap(), Some(session));

        assert!(cache.clear().unwrap());
        assert!(!cache.clear().unwrap());
        assert_eq!(cache.load().unwrap(), None);
    }

    #[cfg(unix)]
    #[test]
    fn test_cache_file_is_private() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempdir().unwrap();
        let cache = SessionCache::new(dir.path().join("session.json"));
        cache.save(&sample_session("a@b.org", None, 1)).unwrap();

        let mode = fs::metadata(cache.path()).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[cfg(unix)]
    #[test]
    fn test_save_tightens_loose_existing_file() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempdir().unwrap();
        let path = dir.path().join("session.json");
        fs::write(&path, "{}").unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o644)).unwrap();

        let cache = SessionCache::new(path.clone());
        let session = sample_session("a@b.org", None, 1);
        cache.save(&session).unwrap();

        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
        assert_eq!(cache.load().unwrap(), Some(session));
        assert!(!dir.path().join("session.json.tmp").exists());
    }

    #[test]
    fn test_mask_token() {
        assert_eq!(mask_token("short"), "***");
        assert_eq!(mask_token("abcdefghijklmnopqrstuvwxyz"), "abcdefgh...");
    }
}
