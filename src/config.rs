//! Static page content: header, social links, tracks and footer.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

const BUNDLED_PORTFOLIO: &str = include_str!("../assets/portfolio.json");

static BUNDLED: Lazy<PortfolioConfig> = Lazy::new(|| {
    match PortfolioConfig::from_json(BUNDLED_PORTFOLIO) {
        Ok(config) => {
            debug!(tracks = config.tracks.len(), "loaded bundled portfolio");
            config
        }
        Err(err) => {
            error!(%err, "bundled portfolio is invalid, using built-in defaults");
            PortfolioConfig::default()
        }
    }
});

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("portfolio file is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("track #{index} has an empty {field}")]
    EmptyTrackField { index: usize, field: &'static str },
    #[error("social link \"{name}\" must be an http(s) URL, got \"{href}\"")]
    InvalidSocialLink { name: String, href: String },
    #[error("contact address \"{0}\" is not an e-mail address")]
    InvalidContact(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackConfig {
    pub label: String,
    pub src: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SocialLink {
    pub name: String,
    pub href: String,
    /// Name understood by the `Icon` component.
    pub icon: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioConfig {
    pub artist: String,
    pub tagline: String,
    #[serde(default)]
    pub background_video: Option<String>,
    pub contact_email: String,
    #[serde(default)]
    pub socials: Vec<SocialLink>,
    pub tracks: Vec<TrackConfig>,
}

impl Default for PortfolioConfig {
    fn default() -> Self {
        let track = |label: &str, file: &str| TrackConfig {
            label: label.to_string(),
            src: format!("/beats/{file}.mp3"),
        };
        let social = |name: &str, href: &str, icon: &str| SocialLink {
            name: name.to_string(),
            href: href.to_string(),
            icon: icon.to_string(),
        };

        Self {
            artist: "AGUILA".to_string(),
            tagline: "Music Producer / Beat Maker".to_string(),
            background_video: Some("/background.mp4".to_string()),
            contact_email: "work@aguila.ar".to_string(),
            socials: vec![
                social("Instagram", "https://instagram.com", "instagram"),
                social("YouTube", "https://youtube.com", "youtube"),
                social("Spotify", "https://spotify.com", "spotify"),
                social("Apple Music", "https://music.apple.com", "apple-music"),
            ],
            tracks: vec![
                track("Midnight Ride", "midnight-ride"),
                track("Shadow Realm", "shadow-realm"),
                track("Neon Dreams", "neon-dreams"),
                track("Echoes", "echoes"),
                track("Nightfall", "nightfall"),
            ],
        }
    }
}

impl PortfolioConfig {
    /// The portfolio compiled into the binary.
    pub fn bundled() -> PortfolioConfig {
        BUNDLED.clone()
    }

    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: PortfolioConfig = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for (index, track) in self.tracks.iter().enumerate() {
            if track.label.trim().is_empty() {
                return Err(ConfigError::EmptyTrackField {
                    index,
                    field: "label",
                });
            }
            if track.src.trim().is_empty() {
                return Err(ConfigError::EmptyTrackField {
                    index,
                    field: "src",
                });
            }
        }

        for link in &self.socials {
            if !(link.href.starts_with("https://") || link.href.starts_with("http://")) {
                return Err(ConfigError::InvalidSocialLink {
                    name: link.name.clone(),
                    href: link.href.clone(),
                });
            }
        }

        let contact = self.contact_email.trim();
        match contact.split_once('@') {
            Some((user, domain)) if !user.is_empty() && !domain.is_empty() => Ok(()),
            _ => Err(ConfigError::InvalidContact(self.contact_email.clone())),
        }
    }

    pub fn mailto(&self) -> String {
        format!("mailto:{}", self.contact_email.trim())
    }
}
