//! Type-safe identifiers for the RPC methods served by the embedded server.
//! Unknown method names are left as plain strings so dispatch can reject them.

use std::fmt::{ self, Display };
use std::str::FromStr;

use schemars::JsonSchema;
use serde::{ Deserialize, Serialize };

use crate::errors::Error;

/// Represents the methods the embedded server dispatches on.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema, PartialEq, Eq, Hash)]
pub enum Method {
    /// Greet a caller by name
    #[serde(rename = "getGreeting")]
    GetGreeting,

    /// Current server-local wall-clock time
    #[serde(rename = "getCurrentTime")]
    GetCurrentTime,

    /// Add two numbers
    #[serde(rename = "calculate")]
    Calculate,

    /// One-line description of the host runtime
    #[serde(rename = "getSystemInfo")]
    GetSystemInfo,
}

impl Method {
    /// Wire name of the method
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::GetGreeting => "getGreeting",
            Method::GetCurrentTime => "getCurrentTime",
            Method::Calculate => "calculate",
            Method::GetSystemInfo => "getSystemInfo",
        }
    }
}

impl Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Method {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "getGreeting" => Ok(Method::GetGreeting),
            "getCurrentTime" => Ok(Method::GetCurrentTime),
            "calculate" => Ok(Method::Calculate),
            "getSystemInfo" => Ok(Method::GetSystemInfo),
            other => Err(Error::Protocol(format!("unknown method: {}", other))),
        }
    }
}
