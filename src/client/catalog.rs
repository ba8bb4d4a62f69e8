//! Typed catalog operations on top of [`MetadataApi`]
//!
//! Each operation builds its request with a function in [`queries`].

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde_json::Value;

use super::models::{Credits, Details, GenreList, MediaType, Movie, Person, Season, VideoList};
use super::pagination::PagedResults;
use super::presets::Preset;
use super::{MetadataApi, Query};
use crate::error::{ApiError, Result};

/// Genre id TMDB uses for animation
pub const ANIMATION_GENRE: u32 = 16;

/// Trending window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeWindow {
    Day,
    Week,
}

impl TimeWindow {
    fn as_str(self) -> &'static str {
        match self {
            TimeWindow::Day => "day",
            TimeWindow::Week => "week",
        }
    }
}

/// Request builders for every catalog endpoint
pub mod queries {
    use super::*;

    /// `media` of `None` means movies and series together.
    pub fn trending(media: Option<MediaType>, window: TimeWindow, page: u32) -> Query {
        let kind = media.map(|m| m.as_str()).unwrap_or("all");
        Query::new(format!("/trending/{}/{}", kind, window.as_str())).page(page)
    }

    pub fn top_rated(media: MediaType, page: u32) -> Query {
        Query::new(format!("/{}/top_rated", media)).page(page)
    }

    pub fn popular(media: MediaType, page: u32) -> Query {
        Query::new(format!("/{}/popular", media)).page(page)
    }

    pub fn now_playing(page: u32) -> Query {
        Query::new("/movie/now_playing").page(page)
    }

    pub fn upcoming(page: u32) -> Query {
        Query::new("/movie/upcoming").page(page)
    }

    pub fn airing_today(page: u32) -> Query {
        Query::new("/tv/airing_today").page(page)
    }

    pub fn details(media: MediaType, id: u64) -> Query {
        let extra = match media {
            MediaType::Movie => "videos,credits,similar,recommendations,release_dates",
            MediaType::Tv => "videos,credits,similar,recommendations,content_ratings",
        };
        Query::new(format!("/{}/{}", media, id)).param("append_to_response", extra)
    }

    pub fn season(tv_id: u64, season: u32) -> Query {
        Query::new(format!("/tv/{}/season/{}", tv_id, season))
    }

    pub fn person(id: u64) -> Query {
        Query::new(format!("/person/{}", id))
            .param("append_to_response", "movie_credits,tv_credits,images")
    }

    pub fn videos(media: MediaType, id: u64) -> Query {
        Query::new(format!("/{}/{}/videos", media, id))
    }

    pub fn genres(media: MediaType) -> Query {
        Query::new(format!("/genre/{}/list", media))
    }

    pub fn credits(media: MediaType, id: u64) -> Query {
        Query::new(format!("/{}/{}/credits", media, id))
    }

    pub fn search(kind: &str, text: &str, page: u32) -> Query {
        Query::new(format!("/search/{}", kind))
            .param("query", text)
            .page(page)
    }

    pub fn discover_by_genre(media: MediaType, genre_ids: &str, page: u32, sort_by: &str) -> Query {
        Query::new(format!("/discover/{}", media))
            .param("with_genres", genre_ids)
            .param("sort_by", sort_by)
            .page(page)
    }

    pub fn discover_by_language(media: MediaType, lang: &str, page: u32) -> Query {
        Query::new(format!("/discover/{}", media))
            .param("with_original_language", lang)
            .param("sort_by", "popularity.desc")
            .page(page)
    }

    pub fn discover_by_year(media: MediaType, year: i32, page: u32) -> Query {
        Query::new(format!("/discover/{}", media))
            .param("primary_release_year", year)
            .param("sort_by", "popularity.desc")
            .page(page)
    }

    pub fn discover_by_rating(media: MediaType, min: f64, page: u32) -> Query {
        Query::new(format!("/discover/{}", media))
            .param("vote_average.gte", min)
            .param("vote_count.gte", 100)
            .param("sort_by", "vote_average.desc")
            .page(page)
    }
}

/// Search tab
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchKind {
    #[default]
    Multi,
    Movie,
    Tv,
    /// Series search narrowed to animation
    Anime,
    Person,
}

/// Client-side narrowing of search results
#[derive(Debug, Clone, Default)]
pub struct SearchFilter {
    /// ISO 639-1 original language
    pub language: Option<String>,
    pub min_rating: Option<f64>,
    pub year: Option<i32>,
}

impl SearchFilter {
    pub fn matches(&self, movie: &Movie) -> bool {
        if let Some(ref lang) = self.language
            && movie.original_language.as_deref() != Some(lang.as_str())
        {
            return false;
        }
        if let Some(min) = self.min_rating
            && movie.vote_average.unwrap_or(0.0) < min
        {
            return false;
        }
        if let Some(year) = self.year
            && movie.year() != Some(year)
        {
            return false;
        }
        true
    }
}

/// Typed access to the TMDB catalog through any [`MetadataApi`].
pub struct Catalog<A: MetadataApi> {
    api: Arc<A>,
}

impl<A: MetadataApi> Clone for Catalog<A> {
    fn clone(&self) -> Self {
        Self {
            api: Arc::clone(&self.api),
        }
    }
}

fn decode<T: DeserializeOwned>(value: Value) -> Result<T> {
    serde_json::from_value(value)
        .map_err(|e| ApiError::InvalidResponse(format!("Unexpected payload: {}", e)).into())
}

impl<A: MetadataApi> Catalog<A> {
    pub fn new(api: Arc<A>) -> Self {
        Self { api }
    }

    pub fn api(&self) -> &Arc<A> {
        &self.api
    }

    /// Run any list query and decode `{ results, page, total_pages }`.
    pub async fn list(&self, query: &Query) -> Result<PagedResults<Movie>> {
        decode(self.api.fetch(query).await?)
    }

    /// Detail endpoints: a body without an `id` counts as not found.
    async fn entity<T: DeserializeOwned>(&self, query: &Query, what: String) -> Result<T> {
        let value = self.api.fetch(query).await?;
        if value.get("id").is_none_or(Value::is_null) {
            return Err(ApiError::NotFound(what).into());
        }
        decode(value)
    }

    pub async fn trending(
        &self,
        media: Option<MediaType>,
        window: TimeWindow,
        page: u32,
    ) -> Result<PagedResults<Movie>> {
        self.list(&queries::trending(media, window, page)).await
    }

    pub async fn top_rated(&self, media: MediaType, page: u32) -> Result<PagedResults<Movie>> {
        self.list(&queries::top_rated(media, page)).await
    }

    pub async fn popular(&self, media: MediaType, page: u32) -> Result<PagedResults<Movie>> {
        self.list(&queries::popular(media, page)).await
    }

    pub async fn now_playing(&self, page: u32) -> Result<PagedResults<Movie>> {
        self.list(&queries::now_playing(page)).await
    }

    pub async fn upcoming(&self, page: u32) -> Result<PagedResults<Movie>> {
        self.list(&queries::upcoming(page)).await
    }

    pub async fn airing_today(&self, page: u32) -> Result<PagedResults<Movie>> {
        self.list(&queries::airing_today(page)).await
    }

    pub async fn preset(&self, preset: Preset, page: u32) -> Result<PagedResults<Movie>> {
        self.list(&preset.query(page)).await
    }

    pub async fn details(&self, media: MediaType, id: u64) -> Result<Details> {
        self.entity(&queries::details(media, id), format!("{} {}", media, id))
            .await
    }

    /// Details, backfilling cast and videos from their own endpoints when the
    /// appended sub-resources are missing. A failed backfill is logged and skipped.
    pub async fn details_with_extras(&self, media: MediaType, id: u64) -> Result<Details> {
        let mut details = self.details(media, id).await?;
        if details.credits.is_none() {
            match self.credits(media, id).await {
                Ok(credits) => details.credits = Some(credits),
                Err(e) => log::debug!("No credits for {} {}: {}", media, id, e),
            }
        }
        if details.videos.is_none() {
            match self.videos(media, id).await {
                Ok(videos) => details.videos = Some(videos),
                Err(e) => log::debug!("No videos for {} {}: {}", media, id, e),
            }
        }
        Ok(details)
    }

    pub async fn season(&self, tv_id: u64, season: u32) -> Result<Season> {
        let value = self.api.fetch(&queries::season(tv_id, season)).await?;
        decode(value)
    }

    pub async fn person(&self, id: u64) -> Result<Person> {
        self.entity(&queries::person(id), format!("person {}", id))
            .await
    }

    pub async fn videos(&self, media: MediaType, id: u64) -> Result<VideoList> {
        decode(self.api.fetch(&queries::videos(media, id)).await?)
    }

    pub async fn genres(&self, media: MediaType) -> Result<GenreList> {
        decode(self.api.fetch(&queries::genres(media)).await?)
    }

    pub async fn credits(&self, media: MediaType, id: u64) -> Result<Credits> {
        decode(self.api.fetch(&queries::credits(media, id)).await?)
    }

    /// Search by tab. Blank text short-circuits to an empty page.
    pub async fn search(
        &self,
        kind: SearchKind,
        text: &str,
        page: u32,
    ) -> Result<PagedResults<Movie>> {
        let text = text.trim();
        if text.is_empty() {
            return Ok(PagedResults::default());
        }

        let endpoint = match kind {
            SearchKind::Multi => "multi",
            SearchKind::Movie => "movie",
            SearchKind::Tv | SearchKind::Anime => "tv",
            SearchKind::Person => "person",
        };

        let mut results = self.list(&queries::search(endpoint, text, page)).await?;
        if kind == SearchKind::Anime {
            results.retain(|m| m.has_genre(ANIMATION_GENRE));
        }
        Ok(results)
    }

    pub async fn discover_by_genre(
        &self,
        media: MediaType,
        genre_ids: &str,
        page: u32,
    ) -> Result<PagedResults<Movie>> {
        self.list(&queries::discover_by_genre(
            media,
            genre_ids,
            page,
            "popularity.desc",
        ))
        .await
    }

    pub async fn discover_by_language(
        &self,
        media: MediaType,
        lang: &str,
        page: u32,
    ) -> Result<PagedResults<Movie>> {
        self.list(&queries::discover_by_language(media, lang, page))
            .await
    }

    pub async fn discover_by_year(
        &self,
        media: MediaType,
        year: i32,
        page: u32,
    ) -> Result<PagedResults<Movie>> {
        self.list(&queries::discover_by_year(media, year, page))
            .await
    }

    pub async fn discover_by_rating(
        &self,
        media: MediaType,
        min: f64,
        page: u32,
    ) -> Result<PagedResults<Movie>> {
        self.list(&queries::discover_by_rating(media, min, page))
            .await
    }
}
