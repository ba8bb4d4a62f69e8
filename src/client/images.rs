//! TMDB image URLs

const IMAGE_BASE_URL: &str = "https://image.tmdb.org/t/p";

/// Shown when a title has no artwork
pub const PLACEHOLDER_IMAGE: &str = "https://picsum.photos/500/750?grayscale";

/// Rendition widths used for each kind of artwork
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ImageSize {
    #[default]
    Poster,
    Backdrop,
    Profile,
    Still,
    Logo,
}

impl ImageSize {
    fn width(self) -> &'static str {
        match self {
            ImageSize::Poster => "w500",
            ImageSize::Backdrop => "w1280",
            ImageSize::Profile => "w185",
            ImageSize::Still | ImageSize::Logo => "w300",
        }
    }
}

/// Absolute URL for an image path, or the placeholder when there is none.
pub fn image_url(path: Option<&str>, size: ImageSize) -> String {
    match path.filter(|p| !p.is_empty()) {
        Some(p) => format!("{}/{}{}", IMAGE_BASE_URL, size.width(), p),
        None => PLACEHOLDER_IMAGE.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_poster_url() {
        assert_eq!(
            image_url(Some("/abc.jpg"), ImageSize::Poster),
            "https://image.tmdb.org/t/p/w500/abc.jpg"
        );
    }

    #[test]
    fn test_backdrop_url() {
        assert_eq!(
            image_url(Some("/b.jpg"), ImageSize::Backdrop),
            "https://image.tmdb.org/t/p/w1280/b.jpg"
        );
    }

    #[test]
    fn test_missing_path_uses_placeholder() {
        assert_eq!(image_url(None, ImageSize::Profile), PLACEHOLDER_IMAGE);
        assert_eq!(image_url(Some(""), ImageSize::Poster), PLACEHOLDER_IMAGE);
    }
}
