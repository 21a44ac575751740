use std::path::Path;
use std::sync::Arc;

use serde::Deserialize;
use tracing::info;

use crate::error::{LoadTestError, Result};

/// One login token as stored in the token file.
#[derive(Debug, Clone, Deserialize)]
pub struct Credential {
    pub token: String,
}

impl Credential {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }

    /// First ten characters, for log lines.
    pub fn prefix(&self) -> &str {
        match self.token.char_indices().nth(10) {
            Some((idx, _)) => &self.token[..idx],
            None => &self.token,
        }
    }
}

/// Read-only credential list shared by every worker.
#[derive(Debug, Clone, Default)]
pub struct CredentialPool {
    credentials: Arc<Vec<Credential>>,
}

impl CredentialPool {
    pub fn new(credentials: Vec<Credential>) -> Self {
        Self {
            credentials: Arc::new(credentials),
        }
    }

    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content =
            std::fs::read_to_string(path).map_err(|source| LoadTestError::TokenFileRead {
                path: path.to_path_buf(),
                source,
            })?;

        let credentials: Vec<Credential> =
            sonic_rs::from_str(&content).map_err(|source| LoadTestError::TokenFileParse {
                path: path.to_path_buf(),
                source,
            })?;

        info!("Loaded {} tokens from {:?}", credentials.len(), path);

        Ok(Self::new(credentials))
    }

    pub fn len(&self) -> usize {
        self.credentials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.credentials.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Credential> {
        self.credentials.get(index)
    }
}

impl FromIterator<Credential> for CredentialPool {
    fn from_iter<I: IntoIterator<Item = Credential>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn loads_token_objects() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"token": "abc"}}, {{"token": "def", "user": "ignored"}}]"#
        )
        .unwrap();

        let pool = CredentialPool::load_from_file(file.path()).unwrap();
        assert_eq!(pool.len(), 2);
        assert_eq!(pool.get(0).unwrap().token, "abc");
        assert_eq!(pool.get(1).unwrap().token, "def");
        assert!(pool.get(2).is_none());
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = CredentialPool::load_from_file(&dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, LoadTestError::TokenFileRead { .. }));
    }

    #[test]
    fn malformed_file_is_a_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"["just-a-string"]"#).unwrap();

        let err = CredentialPool::load_from_file(file.path()).unwrap_err();
        assert!(matches!(err, LoadTestError::TokenFileParse { .. }));
    }

    #[test]
    fn prefix_is_char_safe() {
        assert_eq!(Credential::new("short").prefix(), "short");
        assert_eq!(Credential::new("0123456789abcdef").prefix(), "0123456789");
        assert_eq!(Credential::new("令牌令牌令牌令牌令牌令牌").prefix(), "令牌令牌令牌令牌令牌");
    }
}
