//! User preferences

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::backend::{KeyValueStore, StoreResult};
use crate::error::StoreError;

pub const QUALITY_OPTIONS: &[&str] = &["Auto", "4K", "1080p", "720p", "480p"];
pub const SKIP_INTRO_OPTIONS: &[u32] = &[0, 30, 60, 90];
pub const LANGUAGE_OPTIONS: &[&str] = &["hi", "en", "ta", "te", "ko", "ja", "ur"];
pub const REGION_OPTIONS: &[&str] = &["India", "Pakistan", "Global", "All"];
pub const POSTER_SIZE_OPTIONS: &[&str] = &["Normal", "Compact", "Large"];

/// Persisted preferences. Missing fields take their default on load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Settings {
    pub quality: String,
    /// Zero-based embed server index
    pub default_server: usize,
    pub autoplay_next_episode: bool,
    /// Seconds
    pub skip_intro: u32,
    pub preferred_languages: Vec<String>,
    pub content_region: String,
    pub show_adult_content: bool,
    pub disable_trailer_on_hover: bool,
    pub poster_size: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            quality: "Auto".to_string(),
            default_server: 0,
            autoplay_next_episode: true,
            skip_intro: 0,
            preferred_languages: vec!["hi".to_string(), "en".to_string()],
            content_region: "India".to_string(),
            show_adult_content: false,
            disable_trailer_on_hover: false,
            poster_size: "Normal".to_string(),
        }
    }
}

impl Settings {
    /// Setting names accepted by [`Settings::set`], in display order.
    pub const NAMES: [&'static str; 9] = [
        "quality",
        "default-server",
        "autoplay-next-episode",
        "skip-intro",
        "preferred-languages",
        "content-region",
        "show-adult-content",
        "disable-trailer-on-hover",
        "poster-size",
    ];

    /// Name/value pairs for display.
    pub fn entries(&self) -> Vec<(&'static str, String)> {
        vec![
            ("quality", self.quality.clone()),
            ("default-server", (self.default_server + 1).to_string()),
            (
                "autoplay-next-episode",
                self.autoplay_next_episode.to_string(),
            ),
            ("skip-intro", self.skip_intro.to_string()),
            ("preferred-languages", self.preferred_languages.join(",")),
            ("content-region", self.content_region.clone()),
            ("show-adult-content", self.show_adult_content.to_string()),
            (
                "disable-trailer-on-hover",
                self.disable_trailer_on_hover.to_string(),
            ),
            ("poster-size", self.poster_size.clone()),
        ]
    }

    /// Set one field from its textual form.
    ///
    /// Names are accepted in kebab, snake or camel case. `default-server` is
    /// one-based on input, as shown to users.
    pub fn set(&mut self, name: &str, value: &str) -> StoreResult<()> {
        let normalized: String = name
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .collect::<String>()
            .to_ascii_lowercase();
        let value = value.trim();
        let invalid = || StoreError::InvalidSetting {
            key: name.to_string(),
            value: value.to_string(),
        };

        match normalized.as_str() {
            "quality" => self.quality = pick(QUALITY_OPTIONS, value).ok_or_else(invalid)?,
            "defaultserver" => {
                let n: usize = value.parse().map_err(|_| invalid())?;
                if !(1..=crate::embed::EmbedServer::ALL.len()).contains(&n) {
                    return Err(invalid());
                }
                self.default_server = n - 1;
            }
            "autoplaynextepisode" => self.autoplay_next_episode = parse_bool(value).ok_or_else(invalid)?,
            "skipintro" => {
                let secs: u32 = value.parse().map_err(|_| invalid())?;
                if !SKIP_INTRO_OPTIONS.contains(&secs) {
                    return Err(invalid());
                }
                self.skip_intro = secs;
            }
            "preferredlanguages" => {
                let langs = value
                    .split(',')
                    .map(str::trim)
                    .filter(|l| !l.is_empty())
                    .map(|l| pick(LANGUAGE_OPTIONS, l))
                    .collect::<Option<Vec<_>>>()
                    .ok_or_else(invalid)?;
                self.preferred_languages = langs;
            }
            "contentregion" => {
                self.content_region = pick(REGION_OPTIONS, value).ok_or_else(invalid)?
            }
            "showadultcontent" => self.show_adult_content = parse_bool(value).ok_or_else(invalid)?,
            "disabletraileronhover" => {
                self.disable_trailer_on_hover = parse_bool(value).ok_or_else(invalid)?
            }
            "postersize" => self.poster_size = pick(POSTER_SIZE_OPTIONS, value).ok_or_else(invalid)?,
            _ => return Err(StoreError::UnknownSetting(name.to_string())),
        }
        Ok(())
    }
}

/// Case-insensitive match against a fixed option list, returning the canonical spelling.
fn pick(options: &[&str], value: &str) -> Option<String> {
    options
        .iter()
        .find(|o| o.eq_ignore_ascii_case(value))
        .map(|o| (*o).to_string())
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "on" | "yes" | "1" => Some(true),
        "false" | "off" | "no" | "0" => Some(false),
        _ => None,
    }
}

/// Overlay saved fields on the defaults one at a time. A field whose value does not
/// fit its type keeps the default and the rest still apply.
fn merge_over_defaults(saved: Map<String, Value>) -> Settings {
    let mut merged = match serde_json::to_value(Settings::default()) {
        Ok(Value::Object(map)) => map,
        _ => Map::new(),
    };
    for (field, value) in saved {
        let previous = merged.insert(field.clone(), value);
        if serde_json::from_value::<Settings>(Value::Object(merged.clone())).is_err() {
            log::warn!("Ignoring saved setting '{}': wrong type", field);
            match previous {
                Some(old) => merged.insert(field, old),
                None => merged.remove(&field),
            };
        }
    }
    serde_json::from_value(Value::Object(merged)).unwrap_or_default()
}

/// Durable settings object
pub struct SettingsStore {
    store: Arc<dyn KeyValueStore>,
    key: &'static str,
}

impl SettingsStore {
    pub fn new(store: Arc<dyn KeyValueStore>, key: &'static str) -> Self {
        Self { store, key }
    }

    /// Strict read: absent key gives defaults, a non-object payload is an error.
    fn read(&self) -> StoreResult<Settings> {
        let Some(raw) = self.store.get(self.key)? else {
            return Ok(Settings::default());
        };
        let saved: Map<String, Value> =
            serde_json::from_str(&raw).map_err(|e| StoreError::Parse {
                key: self.key.to_string(),
                reason: e.to_string(),
            })?;
        Ok(merge_over_defaults(saved))
    }

    /// Saved values merged over defaults. Unreadable payloads yield defaults.
    pub fn load(&self) -> Settings {
        self.read().unwrap_or_else(|e| {
            log::warn!("{}; using default settings", e);
            Settings::default()
        })
    }

    pub fn save(&self, settings: &Settings) -> StoreResult<()> {
        let json = serde_json::to_string(settings).map_err(|e| StoreError::Parse {
            key: self.key.to_string(),
            reason: e.to_string(),
        })?;
        self.store.set(self.key, &json)
    }

    /// Update one field by name and persist the whole object.
    pub fn update(&self, name: &str, value: &str) -> StoreResult<Settings> {
        let mut settings = match self.read() {
            Err(e @ StoreError::Parse { .. }) => {
                log::warn!("{}; starting from defaults", e);
                Settings::default()
            }
            other => other?,
        };
        settings.set(name, value)?;
        self.save(&settings)?;
        Ok(settings)
    }

    pub fn reset(&self) -> StoreResult<()> {
        self.store.remove(self.key)
    }
}
