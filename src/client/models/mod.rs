//! TMDB data models
//!
//! Every field except the identifier is optional or defaulted: the API omits
//! fields freely and downstream code must cope.

mod detail;
mod media;

pub use detail::{
    CastMember, Credits, Details, Episode, Person, PersonCredits, Season, Video, VideoList,
};
pub use media::{Genre, GenreList, MediaType, Movie};
