//! Named discover presets, mood shortcuts and language labels

use std::fmt;
use std::str::FromStr;

use super::Query;
use super::models::MediaType;

/// Curated discover rows (regional cinema, anime, streaming networks).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Preset {
    Bollywood,
    BollywoodTopRated,
    SouthIndian,
    Tamil,
    Telugu,
    Malayalam,
    Punjabi,
    Marathi,
    Bengali,
    Gujarati,
    IndianWebSeries,
    PakistaniMovies,
    PakistaniDramas,
    Anime,
    AnimeTopRated,
    AnimeMovies,
    KoreanDramas,
    KoreanMovies,
    Hollywood,
    HollywoodTopRated,
    NetflixShows,
    AmazonShows,
    DisneyShows,
    HboShows,
    Japanese,
    Spanish,
    French,
    Chinese,
    Turkish,
}

const POPULAR: (&str, &str) = ("sort_by", "popularity.desc");
const BEST_RATED: (&str, &str) = ("sort_by", "vote_average.desc");

impl Preset {
    pub const ALL: [Preset; 29] = [
        Preset::Bollywood,
        Preset::BollywoodTopRated,
        Preset::SouthIndian,
        Preset::Tamil,
        Preset::Telugu,
        Preset::Malayalam,
        Preset::Punjabi,
        Preset::Marathi,
        Preset::Bengali,
        Preset::Gujarati,
        Preset::IndianWebSeries,
        Preset::PakistaniMovies,
        Preset::PakistaniDramas,
        Preset::Anime,
        Preset::AnimeTopRated,
        Preset::AnimeMovies,
        Preset::KoreanDramas,
        Preset::KoreanMovies,
        Preset::Hollywood,
        Preset::HollywoodTopRated,
        Preset::NetflixShows,
        Preset::AmazonShows,
        Preset::DisneyShows,
        Preset::HboShows,
        Preset::Japanese,
        Preset::Spanish,
        Preset::French,
        Preset::Chinese,
        Preset::Turkish,
    ];

    /// Command-line name
    pub fn slug(self) -> &'static str {
        match self {
            Preset::Bollywood => "bollywood",
            Preset::BollywoodTopRated => "bollywood-top-rated",
            Preset::SouthIndian => "south-indian",
            Preset::Tamil => "tamil",
            Preset::Telugu => "telugu",
            Preset::Malayalam => "malayalam",
            Preset::Punjabi => "punjabi",
            Preset::Marathi => "marathi",
            Preset::Bengali => "bengali",
            Preset::Gujarati => "gujarati",
            Preset::IndianWebSeries => "indian-web-series",
            Preset::PakistaniMovies => "pakistani-movies",
            Preset::PakistaniDramas => "pakistani-dramas",
            Preset::Anime => "anime",
            Preset::AnimeTopRated => "anime-top-rated",
            Preset::AnimeMovies => "anime-movies",
            Preset::KoreanDramas => "korean-dramas",
            Preset::KoreanMovies => "korean-movies",
            Preset::Hollywood => "hollywood",
            Preset::HollywoodTopRated => "hollywood-top-rated",
            Preset::NetflixShows => "netflix",
            Preset::AmazonShows => "amazon",
            Preset::DisneyShows => "disney",
            Preset::HboShows => "hbo",
            Preset::Japanese => "japanese",
            Preset::Spanish => "spanish",
            Preset::French => "french",
            Preset::Chinese => "chinese",
            Preset::Turkish => "turkish",
        }
    }

    /// Row heading
    pub fn title(self) -> &'static str {
        match self {
            Preset::Bollywood => "Bollywood Hits",
            Preset::BollywoodTopRated => "Top Rated Bollywood",
            Preset::SouthIndian => "South Indian Blockbusters",
            Preset::Tamil => "Tamil Movies",
            Preset::Telugu => "Telugu Movies",
            Preset::Malayalam => "Malayalam Movies",
            Preset::Punjabi => "Punjabi Movies",
            Preset::Marathi => "Marathi Movies",
            Preset::Bengali => "Bengali Movies",
            Preset::Gujarati => "Gujarati Movies",
            Preset::IndianWebSeries => "Indian Web Series",
            Preset::PakistaniMovies => "Pakistani Movies",
            Preset::PakistaniDramas => "Pakistani Dramas",
            Preset::Anime => "Popular Anime",
            Preset::AnimeTopRated => "Top Rated Anime",
            Preset::AnimeMovies => "Anime Movies",
            Preset::KoreanDramas => "Korean Dramas",
            Preset::KoreanMovies => "Korean Movies",
            Preset::Hollywood => "Hollywood",
            Preset::HollywoodTopRated => "Top Rated Hollywood",
            Preset::NetflixShows => "Netflix Originals",
            Preset::AmazonShows => "Prime Video Shows",
            Preset::DisneyShows => "Disney+ Shows",
            Preset::HboShows => "HBO Shows",
            Preset::Japanese => "Japanese Cinema",
            Preset::Spanish => "Spanish Content",
            Preset::French => "French Cinema",
            Preset::Chinese => "Chinese Cinema",
            Preset::Turkish => "Turkish Series",
        }
    }

    pub fn media(self) -> MediaType {
        match self {
            Preset::IndianWebSeries
            | Preset::PakistaniDramas
            | Preset::Anime
            | Preset::AnimeTopRated
            | Preset::KoreanDramas
            | Preset::NetflixShows
            | Preset::AmazonShows
            | Preset::DisneyShows
            | Preset::HboShows
            | Preset::Turkish => MediaType::Tv,
            _ => MediaType::Movie,
        }
    }

    /// Discover parameters, excluding `page`
    fn params(self) -> Vec<(&'static str, &'static str)> {
        let lang = |code: &'static str| ("with_original_language", code);
        let network = |id: &'static str| ("with_networks", id);
        match self {
            Preset::Bollywood => vec![lang("hi"), POPULAR],
            Preset::BollywoodTopRated => vec![lang("hi"), BEST_RATED, ("vote_count.gte", "100")],
            Preset::SouthIndian => vec![lang("te"), ("with_origin_country", "IN"), POPULAR],
            Preset::Tamil => vec![lang("ta"), POPULAR],
            Preset::Telugu => vec![lang("te"), POPULAR],
            Preset::Malayalam => vec![lang("ml"), POPULAR],
            Preset::Punjabi => vec![lang("pa"), POPULAR],
            Preset::Marathi => vec![lang("mr"), POPULAR],
            Preset::Bengali => vec![lang("bn"), POPULAR],
            Preset::Gujarati => vec![lang("gu"), POPULAR],
            Preset::IndianWebSeries => vec![lang("hi"), POPULAR],
            Preset::PakistaniMovies | Preset::PakistaniDramas => vec![lang("ur"), POPULAR],
            Preset::Anime | Preset::AnimeMovies => {
                vec![("with_genres", "16"), lang("ja"), POPULAR]
            }
            Preset::AnimeTopRated => vec![
                ("with_genres", "16"),
                lang("ja"),
                BEST_RATED,
                ("vote_count.gte", "200"),
            ],
            Preset::KoreanDramas | Preset::KoreanMovies => vec![lang("ko"), POPULAR],
            Preset::Hollywood => vec![lang("en"), POPULAR],
            Preset::HollywoodTopRated => vec![lang("en"), BEST_RATED, ("vote_count.gte", "500")],
            Preset::NetflixShows => vec![network("213"), POPULAR],
            Preset::AmazonShows => vec![network("1024"), POPULAR],
            Preset::DisneyShows => vec![network("2739"), POPULAR],
            Preset::HboShows => vec![network("49"), POPULAR],
            Preset::Japanese => vec![lang("ja"), POPULAR],
            Preset::Spanish => vec![lang("es"), POPULAR],
            Preset::French => vec![lang("fr"), POPULAR],
            Preset::Chinese => vec![lang("zh"), POPULAR],
            Preset::Turkish => vec![lang("tr"), POPULAR],
        }
    }

    pub fn query(self, page: u32) -> Query {
        self.params()
            .into_iter()
            .fold(
                Query::new(format!("/discover/{}", self.media())),
                |q, (k, v)| q.param(k, v),
            )
            .page(page)
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for Preset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Preset::ALL
            .iter()
            .copied()
            .find(|p| p.slug() == s)
            .ok_or_else(|| format!("unknown preset '{}'", s))
    }
}

/// Mood shortcuts: trending, or a movie genre combination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mood {
    HottestNow,
    AdrenalineRush,
    LateNightChills,
    Tearjerkers,
    GoodVibes,
    FutureShock,
}

impl Mood {
    pub const ALL: [Mood; 6] = [
        Mood::HottestNow,
        Mood::AdrenalineRush,
        Mood::LateNightChills,
        Mood::Tearjerkers,
        Mood::GoodVibes,
        Mood::FutureShock,
    ];

    pub fn slug(self) -> &'static str {
        match self {
            Mood::HottestNow => "trending",
            Mood::AdrenalineRush => "action",
            Mood::LateNightChills => "horror",
            Mood::Tearjerkers => "romance",
            Mood::GoodVibes => "comedy",
            Mood::FutureShock => "scifi",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Mood::HottestNow => "Hottest Now",
            Mood::AdrenalineRush => "Adrenaline Rush",
            Mood::LateNightChills => "Late Night Chills",
            Mood::Tearjerkers => "Tearjerkers",
            Mood::GoodVibes => "Good Vibes",
            Mood::FutureShock => "Future Shock",
        }
    }

    /// Comma-separated genre ids; `None` means weekly trending.
    pub fn genres(self) -> Option<&'static str> {
        match self {
            Mood::HottestNow => None,
            Mood::AdrenalineRush => Some("28,12"),
            Mood::LateNightChills => Some("27,53"),
            Mood::Tearjerkers => Some("10749,18"),
            Mood::GoodVibes => Some("35"),
            Mood::FutureShock => Some("878"),
        }
    }
}

impl FromStr for Mood {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Mood::ALL
            .iter()
            .copied()
            .find(|m| m.slug() == s)
            .ok_or_else(|| format!("unknown mood '{}'", s))
    }
}

const LANGUAGE_LABELS: &[(&str, &str)] = &[
    ("hi", "HINDI"),
    ("en", "ENGLISH"),
    ("ta", "TAMIL"),
    ("te", "TELUGU"),
    ("ml", "MALAY"),
    ("pa", "PUNJABI"),
    ("mr", "MARATHI"),
    ("bn", "BENGALI"),
    ("gu", "GUJARATI"),
    ("ur", "URDU"),
    ("ja", "ANIME"),
    ("ko", "KOREAN"),
    ("es", "SPANISH"),
    ("fr", "FRENCH"),
    ("zh", "CHINESE"),
    ("kn", "KANNADA"),
    ("tr", "TURKISH"),
    ("de", "GERMAN"),
    ("it", "ITALIAN"),
    ("ru", "RUSSIAN"),
];

/// Badge label for an ISO 639-1 code; unknown codes are upper-cased.
pub fn language_label(code: &str) -> String {
    LANGUAGE_LABELS
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, label)| (*label).to_string())
        .unwrap_or_else(|| code.to_uppercase())
}
