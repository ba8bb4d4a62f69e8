//! Third-party player embed URLs
//!
//! Each provider is an opaque URL builder keyed by TMDB id.

use crate::client::models::MediaType;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmbedServer {
    VidSrc,
    TwoEmbed,
    MultiEmbed,
}

impl EmbedServer {
    pub const ALL: [EmbedServer; 3] = [
        EmbedServer::VidSrc,
        EmbedServer::TwoEmbed,
        EmbedServer::MultiEmbed,
    ];

    /// Server by zero-based index; out-of-range falls back to the first.
    pub fn from_index(index: usize) -> Self {
        Self::ALL.get(index).copied().unwrap_or(EmbedServer::VidSrc)
    }

    pub fn name(self) -> &'static str {
        match self {
            EmbedServer::VidSrc => "Server 1",
            EmbedServer::TwoEmbed => "Server 2",
            EmbedServer::MultiEmbed => "Server 3",
        }
    }

    /// Player URL. Season and episode only apply to series.
    pub fn url(self, id: u64, media: MediaType, season: u32, episode: u32) -> String {
        match (self, media) {
            (EmbedServer::VidSrc, MediaType::Tv) => {
                format!("https://vidsrc.to/embed/tv/{}/{}/{}", id, season, episode)
            }
            (EmbedServer::VidSrc, MediaType::Movie) => {
                format!("https://vidsrc.to/embed/movie/{}", id)
            }
            (EmbedServer::TwoEmbed, MediaType::Tv) => format!(
                "https://2embed.org/embed/tv?id={}&s={}&e={}",
                id, season, episode
            ),
            (EmbedServer::TwoEmbed, MediaType::Movie) => {
                format!("https://2embed.org/embed/movie?id={}", id)
            }
            (EmbedServer::MultiEmbed, MediaType::Tv) => format!(
                "https://multiembed.mov/?tmdb=1&video_id={}&s={}&e={}",
                id, season, episode
            ),
            (EmbedServer::MultiEmbed, MediaType::Movie) => {
                format!("https://multiembed.mov/?tmdb=1&video_id={}", id)
            }
        }
    }
}
