//! Place registry: human-readable names to provider city codes.
//!
//! Codes come from the provider's city page URLs, e.g.
//! `https://weather.gc.ca/city/pages/on-82_metric_e.html` is `on-82`.

/// A few Southern Ontario places
pub const PLACES: &[(&str, &str)] = &[
    ("Hamilton", "on-77"),
    ("Brantford", "on-86"),
    ("Burlington", "on-95"),
    ("Oakville", "on-79"),
    ("Haldimand", "on-42"),
    ("Lincoln", "on-47"),
    ("St. Catharines", "on-107"),
];

/// Look up a registered place by name (case-insensitive)
pub fn place_code(name: &str) -> Option<&'static str> {
    let name = name.trim();
    PLACES
        .iter()
        .find(|(place, _)| place.eq_ignore_ascii_case(name))
        .map(|(_, code)| *code)
}

/// True for codes shaped like `<province-code>-<numeric-id>`
pub fn is_city_code(value: &str) -> bool {
    match value.split_once('-') {
        Some((province, id)) => {
            province.len() == 2
                && province.chars().all(|c| c.is_ascii_lowercase())
                && !id.is_empty()
                && id.chars().all(|c| c.is_ascii_digit())
        }
        None => false,
    }
}

/// Resolve a configured place: a registered name, or a raw city code
pub fn resolve_place(value: &str) -> Option<String> {
    place_code(value).map(str::to_string).or_else(|| {
        let value = value.trim();
        is_city_code(value).then(|| value.to_string())
    })
}
