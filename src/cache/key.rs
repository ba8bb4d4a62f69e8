//! Canonical request keys

use url::form_urlencoded;

/// Build a deterministic cache key from an endpoint and its parameters.
///
/// The key reads `endpoint?k1=v1&k2=v2` with parameters sorted by name (then value)
/// and form-encoded, so the same request always maps to the same key regardless of
/// argument order, and a value holding `&` or `=` cannot pose as a second parameter.
pub fn canonical_key(endpoint: &str, params: &[(&str, &str)]) -> String {
    let mut sorted_params: Vec<_> = params.iter().collect();
    sorted_params.sort();

    if sorted_params.is_empty() {
        return endpoint.to_string();
    }

    let query = form_urlencoded::Serializer::new(String::new())
        .extend_pairs(sorted_params)
        .finish();

    format!("{}?{}", endpoint, query)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_key_deterministic() {
        let key1 = canonical_key("/discover/movie", &[("sort_by", "popularity.desc"), ("page", "1")]);
        let key2 = canonical_key("/discover/movie", &[("page", "1"), ("sort_by", "popularity.desc")]);

        assert_eq!(key1, key2);
        assert_eq!(key1, "/discover/movie?page=1&sort_by=popularity.desc");
    }

    #[test]
    fn test_canonical_key_different_endpoints() {
        let key1 = canonical_key("/movie/popular", &[]);
        let key2 = canonical_key("/tv/popular", &[]);

        assert_ne!(key1, key2);
    }

    #[test]
    fn test_canonical_key_no_params() {
        assert_eq!(canonical_key("/genre/movie/list", &[]), "/genre/movie/list");
    }

    #[test]
    fn test_canonical_key_encodes_values() {
        let key = canonical_key("/search/multi", &[("query", "tom & jerry"), ("page", "1")]);

        assert_eq!(key, "/search/multi?page=1&query=tom+%26+jerry");
    }

    #[test]
    fn test_reserved_characters_cannot_forge_a_parameter() {
        let smuggled = canonical_key("/search/movie", &[("query", "a&page=2")]);
        let separate = canonical_key("/search/movie", &[("query", "a"), ("page", "2")]);

        assert_ne!(smuggled, separate);
    }
}
