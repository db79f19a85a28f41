//! Configuration of the `gradebook` binary, read from a TOML file.
use serde::Deserialize;
use serde_with::{serde_as, DisplayFromStr};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::{Role, Session, UserId};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid config file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct Config {
    pub store: StoreConfig,
    #[serde(default)]
    pub session: Option<SessionConfig>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct StoreConfig {
    /// CSV file the marks are persisted to.
    pub path: PathBuf,
}

#[serde_as]
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct SessionConfig {
    pub user: UserId,
    #[serde_as(as = "DisplayFromStr")]
    pub role: Role,
}

impl Config {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_owned(),
            source,
        })?;
        Self::parse(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_owned(),
            source,
        })
    }

    pub fn parse(contents: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }

    pub fn session(&self) -> Session {
        match &self.session {
            Some(session) => Session::new(session.user.clone(), session.role),
            None => Session::Anonymous,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn full_config() {
        let config = Config::parse(
            r#"
            [store]
            path = "marks.csv"

            [session]
            user = "t-001"
            role = "Teacher"
            "#,
        )
        .unwrap();
        assert_eq!(config.store.path, PathBuf::from("marks.csv"));
        assert_eq!(
            config.session(),
            Session::new(UserId::from("t-001"), Role::Teacher)
        );
    }

    #[test]
    fn session_is_optional() {
        let config = Config::parse("[store]\npath = \"marks.csv\"\n").unwrap();
        assert_eq!(config.session(), Session::Anonymous);
    }

    #[test]
    fn store_path_is_required() {
        assert!(Config::parse("[store]\n").is_err());
        assert!(Config::parse("[session]\nuser = \"a\"\nrole = \"student\"\n").is_err());
    }

    #[test]
    fn unknown_role() {
        let err = Config::parse("[store]\npath = \"m.csv\"\n[session]\nuser = \"a\"\nrole = \"admin\"\n")
            .unwrap_err();
        assert!(err.to_string().contains("unknown role 'admin'"), "{}", err);
    }
}
