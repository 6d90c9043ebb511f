//! Core domain types

use std::fmt;

use serde::{Deserialize, Serialize};

/// A user's account as seen by the navigation layer
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Wallet {
    /// Account address, also the credential record id
    pub address: String,
    /// Base58 public key of the account
    pub public_key: String,
    /// Optional user-facing label
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl Wallet {
    pub fn new(address: impl Into<String>, public_key: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            public_key: public_key.into(),
            name: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Identifier used to key credential records
    pub fn id(&self) -> &str {
        &self.address
    }
}

impl fmt::Display for Wallet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => write!(f, "{} ({})", name, self.address),
            None => write!(f, "{}", self.address),
        }
    }
}

/// The mutually exclusive top-level screen state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "display", content = "wallet", rename_all = "snake_case")]
pub enum Display {
    /// First-launch onboarding
    Hello,
    /// Wallet picker / import / create
    Enter,
    /// Passcode prompt for a known wallet
    Passcode(Wallet),
    /// Main wallet UI behind the side menu
    Slide(Wallet),
}

impl Display {
    /// Wallet carried by the variant, if any
    pub fn wallet(&self) -> Option<&Wallet> {
        match self {
            Display::Hello | Display::Enter => None,
            Display::Passcode(wallet) | Display::Slide(wallet) => Some(wallet),
        }
    }

    /// Short machine-readable name
    pub fn name(&self) -> &'static str {
        match self {
            Display::Hello => "hello",
            Display::Enter => "enter",
            Display::Passcode(_) => "passcode",
            Display::Slide(_) => "slide",
        }
    }
}

impl fmt::Display for Display {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.wallet() {
            Some(wallet) => write!(f, "{}({})", self.name(), wallet.address),
            None => write!(f, "{}", self.name()),
        }
    }
}

/// Application lifecycle phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppPhase {
    /// Engine created, launch display not resolved yet
    #[default]
    Initializing,
    /// A display is shown and the app is in the foreground
    Active,
    /// App moved to background
    Background,
    /// Shutting down
    Quitting,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wallet() -> Wallet {
        Wallet::new("3PAddr", "PubKey")
    }

    #[test]
    fn test_wallet_carrying_variants() {
        assert_eq!(Display::Hello.wallet(), None);
        assert_eq!(Display::Enter.wallet(), None);
        assert_eq!(Display::Passcode(wallet()).wallet(), Some(&wallet()));
        assert_eq!(Display::Slide(wallet()).wallet(), Some(&wallet()));
    }

    #[test]
    fn test_display_formatting() {
        assert_eq!(Display::Hello.to_string(), "hello");
        assert_eq!(Display::Slide(wallet()).to_string(), "slide(3PAddr)");
    }

    #[test]
    fn test_wallet_serializes_camel_case() {
        let json = serde_json::to_string(&wallet()).unwrap();
        assert_eq!(json, r#"{"address":"3PAddr","publicKey":"PubKey"}"#);
    }

    #[test]
    fn test_wallet_name_round_trips() {
        let named = wallet().with_name("Savings");
        let json = serde_json::to_string(&named).unwrap();
        let back: Wallet = serde_json::from_str(&json).unwrap();
        assert_eq!(back, named);
        assert_eq!(named.to_string(), "Savings (3PAddr)");
    }

    #[test]
    fn test_display_serialization_shape() {
        let json = serde_json::to_value(Display::Passcode(wallet())).unwrap();
        assert_eq!(json["display"], "passcode");
        assert_eq!(json["wallet"]["address"], "3PAddr");

        let json = serde_json::to_value(Display::Enter).unwrap();
        assert_eq!(json["display"], "enter");
    }
}
