//! Mapping from feed payloads to stored entities.
//!
//! Every input is an explicit parameter; nothing is read from ambient state.

use travel_sync_core::{Advisory, City, Place, Search, Weather};
use travel_sync_feeds::{AdvisoryReport, PlaceResult, WeatherReport};

#[must_use]
pub fn city(search: &Search) -> City {
    City::new(search.city_name.clone(), search.lat, search.lng)
}

#[must_use]
pub fn weather(report: WeatherReport, city_id: &str) -> Weather {
    Weather {
        city_id: city_id.to_owned(),
        city_name: report.city_name,
        visibility: report.visibility,
        description: report.description,
        temp: report.temp,
        feels_like: report.feels_like,
        min_temp: report.min_temp,
        max_temp: report.max_temp,
        pressure: report.pressure,
        humidity: report.humidity,
        wind_speed: report.wind_speed,
        wind_direction: report.wind_direction,
        sunrise: report.sunrise,
        sunset: report.sunset,
    }
}

#[must_use]
pub fn advisory(report: AdvisoryReport, city_id: &str) -> Advisory {
    Advisory {
        city_id: city_id.to_owned(),
        country: report.country,
        country_code: report.country_code,
        continent: report.continent,
        score: report.score,
        last_updated: report.last_updated,
        message: report.message,
        source: report.source,
    }
}

#[must_use]
pub fn place(result: PlaceResult, city_id: &str, city_name: &str, category: &str) -> Place {
    Place {
        external_id: result.place_id,
        category: category.to_owned(),
        city_id: city_id.to_owned(),
        city_name: city_name.to_owned(),
        name: result.name,
        address: result.address,
        lat: result.lat,
        lng: result.lng,
        location_type: result.types,
        avg_rating: result.rating,
        num_ratings: result.user_ratings_total,
        gmaps_url: result.gmaps_url,
        photo_reference_id: result.photo_reference,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_place_carries_city_and_category() {
        let result = PlaceResult {
            place_id: "ChIJ1".to_owned(),
            name: "Harbour Bar".to_owned(),
            types: vec!["bar".to_owned()],
            photo_reference: "first".to_owned(),
            ..PlaceResult::default()
        };
        let place = place(result, "0x2", "sydney", "bar");

        assert_eq!(place.external_id, "ChIJ1");
        assert_eq!(place.city_id, "0x2");
        assert_eq!(place.city_name, "sydney");
        assert_eq!(place.category, "bar");
        assert_eq!(place.photo_reference_id, "first");
    }

    #[test]
    fn test_advisory_keeps_score() {
        let report = AdvisoryReport { country_code: "AU".to_owned(), score: 2.5, ..AdvisoryReport::default() };
        let advisory = advisory(report, "0x2");
        assert_eq!(advisory.city_id, "0x2");
        assert!(!advisory.is_safe());
    }
}
