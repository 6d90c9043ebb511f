//! Side-menu link catalog and the platform URL opener

use std::fmt;
use std::process::Command;
use std::str::FromStr;

use url::Url;
use wallet_nav_core::prelude::*;

/// External pages reachable from the side menu
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MenuLink {
    Forum,
    Github,
    Telegram,
    Discord,
    Twitter,
    Reddit,
    Whitepaper,
    TermsAndConditions,
    Support,
}

impl MenuLink {
    pub const ALL: [MenuLink; 9] = [
        MenuLink::Forum,
        MenuLink::Github,
        MenuLink::Telegram,
        MenuLink::Discord,
        MenuLink::Twitter,
        MenuLink::Reddit,
        MenuLink::Whitepaper,
        MenuLink::TermsAndConditions,
        MenuLink::Support,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            MenuLink::Forum => "forum",
            MenuLink::Github => "github",
            MenuLink::Telegram => "telegram",
            MenuLink::Discord => "discord",
            MenuLink::Twitter => "twitter",
            MenuLink::Reddit => "reddit",
            MenuLink::Whitepaper => "whitepaper",
            MenuLink::TermsAndConditions => "terms",
            MenuLink::Support => "support",
        }
    }

    fn address(&self) -> &'static str {
        match self {
            MenuLink::Forum => "https://forum.wavesplatform.com/",
            MenuLink::Github => "https://github.com/wavesplatform/",
            MenuLink::Telegram => "https://telegram.me/wavesnews",
            MenuLink::Discord => "https://discordapp.com/invite/cnFmDyA",
            MenuLink::Twitter => "https://twitter.com/wavesplatform",
            MenuLink::Reddit => "https://www.reddit.com/r/Wavesplatform",
            MenuLink::Whitepaper => "https://wavesplatform.com/files/whitepaper_v0.pdf",
            MenuLink::TermsAndConditions => {
                "https://wavesplatform.com/files/docs/Waves_terms_and_conditions.pdf"
            }
            MenuLink::Support => "https://support.wavesplatform.com/",
        }
    }

    pub fn url(&self) -> std::result::Result<Url, url::ParseError> {
        Url::parse(self.address())
    }
}

impl fmt::Display for MenuLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for MenuLink {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        MenuLink::ALL
            .into_iter()
            .find(|link| link.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| Error::config_invalid(format!("unknown menu link '{}'", s)))
    }
}

/// Open a URL in the system browser (cross-platform, fire-and-forget).
///
/// If `browser` is non-empty, uses it as the browser command.
/// Otherwise uses the platform-default browser opener.
pub fn open_url_in_browser(url: &Url, browser: &str) -> std::io::Result<()> {
    if !browser.is_empty() {
        Command::new(browser).arg(url.as_str()).spawn()?;
        return Ok(());
    }

    #[cfg(target_os = "macos")]
    {
        Command::new("open").arg(url.as_str()).spawn()?;
        return Ok(());
    }

    #[cfg(target_os = "linux")]
    {
        Command::new("xdg-open").arg(url.as_str()).spawn()?;
        return Ok(());
    }

    #[cfg(target_os = "windows")]
    {
        Command::new("cmd")
            .args(["/C", "start", "", url.as_str()])
            .spawn()?;
        return Ok(());
    }

    #[cfg(not(any(target_os = "macos", target_os = "linux", target_os = "windows")))]
    {
        return Err(std::io::Error::new(
            std::io::ErrorKind::Unsupported,
            "no browser opener available for this platform",
        ));
    }

    #[allow(unreachable_code)]
    Ok(())
}
