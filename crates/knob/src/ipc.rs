use derive_more::{AsRef, Deref, Display, From, Into};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

pub const SOCKET_PATH: &str = "/tmp/glide.sock";

/// Name a slider or pie menu is bound under.
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display, Deref, From, Into, AsRef,
)]
#[serde(transparent)]
pub struct ActionName(String);

crate::impl_string_newtype!(ActionName);

/// One line of the daemon socket protocol.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    Press(ActionName),
    Release(ActionName),
    Hide,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RequestError {
    #[error("empty request")]
    Empty,
    #[error("unknown request `{0}`")]
    Unknown(String),
    #[error("`{0}` needs an action name")]
    MissingName(String),
    #[error("unexpected argument `{0}`")]
    UnexpectedArgument(String),
}

impl FromStr for Request {
    type Err = RequestError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let verb = words.next().ok_or(RequestError::Empty)?;
        let name = words.next().map(ActionName::new);
        if let Some(extra) = words.next() {
            return Err(RequestError::UnexpectedArgument(extra.to_string()));
        }

        match (verb.to_ascii_lowercase().as_str(), name) {
            ("press", Some(name)) => Ok(Request::Press(name)),
            ("release", Some(name)) => Ok(Request::Release(name)),
            ("press" | "release", None) => Err(RequestError::MissingName(verb.to_string())),
            ("hide", None) => Ok(Request::Hide),
            ("hide", Some(name)) => Err(RequestError::UnexpectedArgument(name.to_string())),
            _ => Err(RequestError::Unknown(verb.to_string())),
        }
    }
}

impl fmt::Display for Request {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Request::Press(name) => write!(f, "press {name}"),
            Request::Release(name) => write!(f, "release {name}"),
            Request::Hide => f.write_str("hide"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_requests() {
        assert_eq!(
            "press volume".parse(),
            Ok(Request::Press(ActionName::new("volume")))
        );
        assert_eq!(
            "  RELEASE  brush-size \n".parse(),
            Ok(Request::Release(ActionName::new("brush-size")))
        );
        assert_eq!("hide".parse(), Ok(Request::Hide));
    }

    #[test]
    fn test_reject_malformed_requests() {
        assert_eq!("".parse::<Request>(), Err(RequestError::Empty));
        assert_eq!(
            "press".parse::<Request>(),
            Err(RequestError::MissingName("press".to_string()))
        );
        assert_eq!(
            "hide now".parse::<Request>(),
            Err(RequestError::UnexpectedArgument("now".to_string()))
        );
        assert_eq!(
            "press a b".parse::<Request>(),
            Err(RequestError::UnexpectedArgument("b".to_string()))
        );
        assert_eq!(
            "show".parse::<Request>(),
            Err(RequestError::Unknown("show".to_string()))
        );
    }

    #[test]
    fn test_display_matches_parse() {
        let request = Request::Press(ActionName::new("workspaces"));
        assert_eq!(request.to_string(), "press workspaces");
        assert_eq!(request.to_string().parse(), Ok(request));
    }
}
