//! # Session State
//!
//! The in-progress selections. Each category tab keeps its own selection,
//! so switching tabs does not lose work.

use std::fmt;
use std::str::FromStr;
use std::sync::Mutex;

use pacs_core::{Configuration, PlcConfiguration, Selection};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;

/// The open category tab.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tab {
    #[default]
    Hmi,
    Plc,
}

impl fmt::Display for Tab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Tab::Hmi => "hmi",
            Tab::Plc => "plc",
        })
    }
}

impl FromStr for Tab {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "hmi" => Ok(Tab::Hmi),
            "plc" => Ok(Tab::Plc),
            other => Err(ApiError::not_found("Tab", other)),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub tab: Tab,
    pub hmi: Configuration,
    pub plc: PlcConfiguration,
}

impl Session {
    /// The selection of the open tab.
    pub fn selection(&self) -> Selection {
        match self.tab {
            Tab::Hmi => Selection::Hmi(self.hmi),
            Tab::Plc => Selection::Plc(self.plc),
        }
    }
}

#[derive(Debug, Default)]
pub struct SessionState {
    session: Mutex<Session>,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_session<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&Session) -> R,
    {
        let session = self.session.lock().expect("Session mutex poisoned");
        f(&session)
    }

    pub fn with_session_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut Session) -> R,
    {
        let mut session = self.session.lock().expect("Session mutex poisoned");
        f(&mut session)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pacs_core::{HmiSize, PlcModel};

    #[test]
    fn test_selection_follows_tab() {
        let state = SessionState::new();
        assert!(matches!(state.with_session(Session::selection), Selection::Hmi(_)));

        state.with_session_mut(|s| {
            s.hmi.size = HmiSize::Size7101E;
            s.plc.model = PlcModel::Nic500;
            s.tab = Tab::Plc;
        });
        assert_eq!(
            state.with_session(Session::selection),
            Selection::Plc(PlcConfiguration {
                model: PlcModel::Nic500,
                ..PlcConfiguration::default()
            })
        );

        state.with_session_mut(|s| s.tab = Tab::Hmi);
        match state.with_session(Session::selection) {
            Selection::Hmi(config) => assert_eq!(config.size, HmiSize::Size7101E),
            other => panic!("unexpected selection {other:?}"),
        }
    }

    #[test]
    fn test_tab_parsing() {
        assert_eq!("PLC".parse::<Tab>().unwrap(), Tab::Plc);
        assert!("scada".parse::<Tab>().is_err());
    }
}
