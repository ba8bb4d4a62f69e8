//! Page resolvers for content rows

use std::fmt;
use std::future::Future;
use std::str::FromStr;

use async_trait::async_trait;

use crate::client::catalog::TimeWindow;
use crate::client::models::{MediaType, Movie};
use crate::client::{Catalog, MetadataApi, Mood, Preset};
use crate::error::Result;

/// Maps a one-based page number to that page's items.
#[async_trait]
pub trait PageSource: Send + Sync {
    async fn page(&self, page: u32) -> Result<Vec<Movie>>;
}

/// What a catalog-backed row lists
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowKind {
    /// Weekly trending across movies and series
    Trending,
    /// Movies trending in the last day
    TrendingToday,
    Genre {
        media: MediaType,
        /// Comma-separated genre ids
        genre_ids: String,
    },
    TopRated(MediaType),
    Popular(MediaType),
    NowPlaying,
    Upcoming,
    AiringToday,
    Preset(Preset),
    Mood(Mood),
}

impl RowKind {
    /// Rows shown by `mflix home`, in display order.
    pub fn home_rows() -> Vec<RowKind> {
        vec![
            RowKind::Trending,
            RowKind::Popular(MediaType::Movie),
            RowKind::Popular(MediaType::Tv),
            RowKind::TopRated(MediaType::Movie),
            RowKind::Preset(Preset::Bollywood),
            RowKind::Preset(Preset::NetflixShows),
            RowKind::Preset(Preset::Anime),
            RowKind::Preset(Preset::KoreanDramas),
        ]
    }

    pub fn title(&self) -> String {
        match self {
            RowKind::Trending => "Trending This Week".to_string(),
            RowKind::TrendingToday => "Trending Today".to_string(),
            RowKind::Genre { media, genre_ids } => {
                let kind = match media {
                    MediaType::Movie => "Movies",
                    MediaType::Tv => "Series",
                };
                format!("{} in Genre {}", kind, genre_ids)
            }
            RowKind::TopRated(MediaType::Movie) => "Top Rated Movies".to_string(),
            RowKind::TopRated(MediaType::Tv) => "Top Rated Series".to_string(),
            RowKind::Popular(MediaType::Movie) => "Popular Movies".to_string(),
            RowKind::Popular(MediaType::Tv) => "Popular Series".to_string(),
            RowKind::NowPlaying => "Now Playing".to_string(),
            RowKind::Upcoming => "Upcoming".to_string(),
            RowKind::AiringToday => "Airing Today".to_string(),
            RowKind::Preset(preset) => preset.title().to_string(),
            RowKind::Mood(mood) => mood.label().to_string(),
        }
    }

    /// Media type of the row's entries; `None` when the row mixes both.
    pub fn media(&self) -> Option<MediaType> {
        match self {
            RowKind::Trending => None,
            RowKind::Genre { media, .. } | RowKind::TopRated(media) | RowKind::Popular(media) => {
                Some(*media)
            }
            RowKind::TrendingToday | RowKind::NowPlaying | RowKind::Upcoming => {
                Some(MediaType::Movie)
            }
            RowKind::AiringToday => Some(MediaType::Tv),
            RowKind::Preset(preset) => Some(preset.media()),
            RowKind::Mood(mood) => mood.genres().map(|_| MediaType::Movie),
        }
    }
}

impl fmt::Display for RowKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RowKind::Trending => f.write_str("trending"),
            RowKind::TrendingToday => f.write_str("trending-today"),
            RowKind::Genre { media, genre_ids } => write!(f, "genre:{}:{}", media, genre_ids),
            RowKind::TopRated(media) => write!(f, "top-rated-{}", media),
            RowKind::Popular(media) => write!(f, "popular-{}", media),
            RowKind::NowPlaying => f.write_str("now-playing"),
            RowKind::Upcoming => f.write_str("upcoming"),
            RowKind::AiringToday => f.write_str("airing-today"),
            RowKind::Preset(preset) => f.write_str(preset.slug()),
            RowKind::Mood(mood) => write!(f, "mood:{}", mood.slug()),
        }
    }
}

impl FromStr for RowKind {
    type Err = String;

    /// Accepts `trending`, `trending-today`, `popular-movie`, `top-rated-tv`, `now-playing`, `upcoming`,
    /// `airing-today`, `genre:<movie|tv>:<ids>`, `mood:<slug>` or a preset slug.
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let s = s.trim().to_ascii_lowercase();

        if let Some(rest) = s.strip_prefix("genre:") {
            let (media, ids) = rest
                .split_once(':')
                .ok_or_else(|| format!("expected genre:<movie|tv>:<ids>, got '{}'", s))?;
            let valid = !ids.is_empty()
                && ids
                    .split(',')
                    .all(|id| !id.is_empty() && id.bytes().all(|b| b.is_ascii_digit()));
            if !valid {
                return Err(format!("invalid genre ids '{}'", ids));
            }
            return Ok(RowKind::Genre {
                media: media.parse()?,
                genre_ids: ids.to_string(),
            });
        }
        if let Some(mood) = s.strip_prefix("mood:") {
            return Ok(RowKind::Mood(mood.parse()?));
        }
        if let Some(media) = s.strip_prefix("top-rated-") {
            return Ok(RowKind::TopRated(media.parse()?));
        }
        if let Some(media) = s.strip_prefix("popular-") {
            return Ok(RowKind::Popular(media.parse()?));
        }

        match s.as_str() {
            "trending" => Ok(RowKind::Trending),
            "trending-today" => Ok(RowKind::TrendingToday),
            "now-playing" => Ok(RowKind::NowPlaying),
            "upcoming" => Ok(RowKind::Upcoming),
            "airing-today" => Ok(RowKind::AiringToday),
            other => other
                .parse::<Preset>()
                .map(RowKind::Preset)
                .map_err(|_| format!("unknown row '{}'", other)),
        }
    }
}

/// A [`RowKind`] resolved through the catalog
pub struct CatalogSource<A: MetadataApi> {
    catalog: Catalog<A>,
    kind: RowKind,
}

impl<A: MetadataApi> CatalogSource<A> {
    pub fn new(catalog: Catalog<A>, kind: RowKind) -> Self {
        Self { catalog, kind }
    }
}

#[async_trait]
impl<A: MetadataApi + 'static> PageSource for CatalogSource<A> {
    async fn page(&self, page: u32) -> Result<Vec<Movie>> {
        let catalog = &self.catalog;
        let results = match &self.kind {
            RowKind::Trending => catalog.trending(None, TimeWindow::Week, page).await?,
            RowKind::TrendingToday => {
                catalog
                    .trending(Some(MediaType::Movie), TimeWindow::Day, page)
                    .await?
            }
            RowKind::Genre { media, genre_ids } => {
                catalog.discover_by_genre(*media, genre_ids, page).await?
            }
            RowKind::TopRated(media) => catalog.top_rated(*media, page).await?,
            RowKind::Popular(media) => catalog.popular(*media, page).await?,
            RowKind::NowPlaying => catalog.now_playing(page).await?,
            RowKind::Upcoming => catalog.upcoming(page).await?,
            RowKind::AiringToday => catalog.airing_today(page).await?,
            RowKind::Preset(preset) => catalog.preset(*preset, page).await?,
            RowKind::Mood(mood) => match mood.genres() {
                Some(genres) => {
                    catalog
                        .discover_by_genre(MediaType::Movie, genres, page)
                        .await?
                }
                None => catalog.trending(None, TimeWindow::Week, page).await?,
            },
        };
        Ok(results.results)
    }
}

/// Closure-backed source
pub struct FnSource<F> {
    resolve: F,
}

impl<F> FnSource<F> {
    pub fn new<Fut>(resolve: F) -> Self
    where
        F: Fn(u32) -> Fut,
        Fut: Future<Output = Result<Vec<Movie>>>,
    {
        Self { resolve }
    }
}

#[async_trait]
impl<F, Fut> PageSource for FnSource<F>
where
    F: Fn(u32) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<Vec<Movie>>> + Send + 'static,
{
    async fn page(&self, page: u32) -> Result<Vec<Movie>> {
        (self.resolve)(page).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::mock::movie_page;
    use crate::client::{MockMetadataApi, Query};
    use std::sync::Arc;

    #[test]
    fn test_parse_row_kinds() {
        assert_eq!("trending".parse::<RowKind>().unwrap(), RowKind::Trending);
        assert_eq!(
            "popular-tv".parse::<RowKind>().unwrap(),
            RowKind::Popular(MediaType::Tv)
        );
        assert_eq!(
            "top-rated-movie".parse::<RowKind>().unwrap(),
            RowKind::TopRated(MediaType::Movie)
        );
        assert_eq!(
            "genre:movie:28,12".parse::<RowKind>().unwrap(),
            RowKind::Genre {
                media: MediaType::Movie,
                genre_ids: "28,12".to_string()
            }
        );
        assert_eq!(
            "mood:horror".parse::<RowKind>().unwrap(),
            RowKind::Mood(Mood::LateNightChills)
        );
        assert_eq!(
            "netflix".parse::<RowKind>().unwrap(),
            RowKind::Preset(Preset::NetflixShows)
        );
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!("genre:movie:".parse::<RowKind>().is_err());
        assert!("genre:movie:action".parse::<RowKind>().is_err());
        assert!("popular-person".parse::<RowKind>().is_err());
        assert!("nonsense".parse::<RowKind>().is_err());
    }

    #[test]
    fn test_display_round_trips_through_parse() {
        for kind in RowKind::home_rows() {
            assert_eq!(kind.to_string().parse::<RowKind>().unwrap(), kind);
        }
    }

    /// Query issued for page `page` of a row
    async fn requested(kind: RowKind, page: u32) -> Query {
        let mock = MockMetadataApi::new(|_| Ok(movie_page(1, 1)));
        let captured = mock.captured();
        let source = CatalogSource::new(Catalog::new(Arc::new(mock)), kind);

        source.page(page).await.unwrap();

        let queries = captured.lock().unwrap();
        queries[0].clone()
    }

    #[tokio::test]
    async fn test_row_endpoints() {
        assert_eq!(
            requested(RowKind::Trending, 2).await.endpoint(),
            "/trending/all/week"
        );
        assert_eq!(
            requested(RowKind::TrendingToday, 1).await.endpoint(),
            "/trending/movie/day"
        );
        assert_eq!(
            requested(RowKind::NowPlaying, 1).await.endpoint(),
            "/movie/now_playing"
        );
        assert_eq!(
            requested(RowKind::Upcoming, 1).await.endpoint(),
            "/movie/upcoming"
        );
        assert_eq!(
            requested(RowKind::AiringToday, 1).await.endpoint(),
            "/tv/airing_today"
        );

        let q = requested(RowKind::TopRated(MediaType::Tv), 4).await;
        assert_eq!(q.endpoint(), "/tv/top_rated");
        assert_eq!(q.get("page"), Some("4"));

        let q = requested(RowKind::Preset(Preset::Anime), 1).await;
        assert_eq!(q.endpoint(), "/discover/tv");
    }

    #[tokio::test]
    async fn test_mood_rows() {
        let q = requested(RowKind::Mood(Mood::GoodVibes), 1).await;
        assert_eq!(q.endpoint(), "/discover/movie");
        assert_eq!(q.get("with_genres"), Some("35"));
        assert_eq!(q.get("sort_by"), Some("popularity.desc"));

        assert_eq!(
            requested(RowKind::Mood(Mood::HottestNow), 1).await.endpoint(),
            "/trending/all/week"
        );
    }

    #[tokio::test]
    async fn test_catalog_source_requests_page() {
        let mock = MockMetadataApi::new(|q| {
            let page: u64 = q.get("page").unwrap().parse().unwrap();
            Ok(movie_page(page * 100, 3))
        });
        let captured = mock.captured();
        let source = CatalogSource::new(
            Catalog::new(Arc::new(mock)),
            RowKind::Popular(MediaType::Movie),
        );

        let items = source.page(2).await.unwrap();

        assert_eq!(items.len(), 3);
        assert_eq!(items[0].id, 200);
        let queries = captured.lock().unwrap();
        assert_eq!(queries[0].endpoint(), "/movie/popular");
    }

    #[tokio::test]
    async fn test_fn_source() {
        let source = FnSource::new(|page| async move {
            Ok::<_, crate::error::Error>(vec![
                serde_json::from_value::<Movie>(serde_json::json!({"id": page})).unwrap(),
            ])
        });

        let items = source.page(7).await.unwrap();
        assert_eq!(items[0].id, 7);
    }
}
