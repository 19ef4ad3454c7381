use common::Location;
use scraper::{ElementRef, Selector};

/// LinkedIn's public search only covers US listings.
pub const COUNTRY: &str = "US";

/// Reads the location out of a card's metadata block.
///
/// Anything other than a plain `"City, ST"` falls back to country only.
pub fn parse_location(metadata: Option<ElementRef<'_>>, location_selector: &Selector) -> Location {
    let Some(metadata) = metadata else {
        return Location::country_only(COUNTRY);
    };

    let text = metadata
        .select(location_selector)
        .next()
        .map(|el| el.text().collect::<String>().trim().to_string())
        .unwrap_or_else(|| "N/A".to_string());

    location_from_text(&text)
}

pub fn location_from_text(text: &str) -> Location {
    let parts: Vec<&str> = text.split(", ").collect();
    match parts.as_slice() {
        [city, state] => Location {
            country: COUNTRY.to_string(),
            city: Some(city.to_string()),
            state: Some(state.to_string()),
        },
        _ => Location::country_only(COUNTRY),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::Html;

    fn selectors() -> (Selector, Selector) {
        (
            Selector::parse("div.base-search-card__metadata").unwrap(),
            Selector::parse("span.job-search-card__location").unwrap(),
        )
    }

    #[test]
    fn test_city_and_state() {
        let location = location_from_text("San Francisco, CA");
        assert_eq!(location.country, "US");
        assert_eq!(location.city.as_deref(), Some("San Francisco"));
        assert_eq!(location.state.as_deref(), Some("CA"));
    }

    #[test]
    fn test_single_part_is_country_only() {
        assert_eq!(location_from_text("Remote"), Location::country_only("US"));
    }

    #[test]
    fn test_three_parts_is_country_only() {
        assert_eq!(
            location_from_text("Austin, Texas, United States"),
            Location::country_only("US")
        );
    }

    #[test]
    fn test_missing_metadata_block() {
        let (_, location_selector) = selectors();
        assert_eq!(
            parse_location(None, &location_selector),
            Location::country_only("US")
        );
    }

    #[test]
    fn test_metadata_block_with_location() {
        let html = Html::parse_fragment(
            r#"<div class="base-search-card__metadata">
                 <span class="job-search-card__location">
                   Seattle, WA
                 </span>
               </div>"#,
        );
        let (metadata_selector, location_selector) = selectors();
        let metadata = html.select(&metadata_selector).next();

        let location = parse_location(metadata, &location_selector);
        assert_eq!(location.city.as_deref(), Some("Seattle"));
        assert_eq!(location.state.as_deref(), Some("WA"));
    }

    #[test]
    fn test_metadata_block_without_location_span() {
        let html = Html::parse_fragment(
            r#"<div class="base-search-card__metadata"><time datetime="2023-01-01"></time></div>"#,
        );
        let (metadata_selector, location_selector) = selectors();
        let metadata = html.select(&metadata_selector).next();

        assert_eq!(
            parse_location(metadata, &location_selector),
            Location::country_only("US")
        );
    }
}
