#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use crate::{
        AdvisoryApi, FeedError, GooglePlacesClient, NearbyRequest, OpenWeatherClient, PlacesApi,
        TravelAdvisoryClient, WeatherApi,
    };

    fn nearby(token: Option<&str>) -> NearbyRequest {
        NearbyRequest {
            lat: -33.865143,
            lng: 151.2099,
            keyword: "restaurant".to_owned(),
            radius: 5000,
            page_token: token.map(str::to_owned),
        }
    }

    #[tokio::test]
    async fn test_places_page_is_marshaled() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/nearbysearch/json"))
            .and(query_param("keyword", "restaurant"))
            .and(query_param("key", "maps-key"))
            .and(query_param("pagetoken", "t1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "status": "OK",
                "next_page_token": "t2",
                "results": [{
                    "place_id": "ChIJ1",
                    "name": "Harbour Bar",
                    "vicinity": "1 George St",
                    "geometry": { "location": { "lat": -33.86, "lng": 151.21 } },
                    "types": ["bar", "point_of_interest"],
                    "rating": 4.5,
                    "user_ratings_total": 120,
                    "photos": [{ "photo_reference": "first" }, { "photo_reference": "second" }]
                }, {
                    "place_id": "ChIJ2",
                    "name": "No Photos",
                    "geometry": { "location": { "lat": -33.87, "lng": 151.22 } }
                }]
            })))
            .mount(&server)
            .await;

        let client = GooglePlacesClient::new("maps-key".to_owned(), &server.uri()).unwrap();
        let page = client.nearby_search(&nearby(Some("t1"))).await.unwrap();

        assert_eq!(page.next_page_token, "t2");
        assert_eq!(page.results.len(), 2);
        let first = &page.results[0];
        assert_eq!(first.photo_reference, "first");
        assert_eq!(first.address, "1 George St");
        assert_eq!(first.types, vec!["bar", "point_of_interest"]);
        assert_eq!(first.user_ratings_total, 120);
        assert!(first.gmaps_url.ends_with("place_id:ChIJ1"));
        assert!(page.results[1].photo_reference.is_empty());
    }

    #[tokio::test]
    async fn test_places_status_is_typed() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/nearbysearch/json"))
            .and(query_param("keyword", "restaurant"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "status": "INVALID_REQUEST", "results": []
            })))
            .up_to_n_times(1)
            .with_priority(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/nearbysearch/json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "status": "OVER_QUERY_LIMIT", "error_message": "quota", "results": []
            })))
            .mount(&server)
            .await;

        let client = GooglePlacesClient::new("maps-key".to_owned(), &server.uri()).unwrap();
        let first = client.nearby_search(&nearby(None)).await.unwrap_err();
        let second = client.nearby_search(&nearby(None)).await.unwrap_err();

        assert!(matches!(first, FeedError::InvalidRequest(_)));
        assert!(matches!(second, FeedError::RateLimited(ref m) if m == "quota"));
        assert!(first.is_rate_limited() && second.is_rate_limited());
    }

    #[tokio::test]
    async fn test_places_request_denied_is_invalid_key() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/nearbysearch/json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "status": "REQUEST_DENIED", "error_message": "This IP is not authorized", "results": []
            })))
            .mount(&server)
            .await;

        let client = GooglePlacesClient::new("k".to_owned(), &server.uri()).unwrap();
        let err = client.nearby_search(&nearby(None)).await.unwrap_err();
        assert!(matches!(err, FeedError::InvalidApiKey));
    }

    #[tokio::test]
    async fn test_places_zero_results_is_empty_page() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/nearbysearch/json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "status": "ZERO_RESULTS", "results": []
            })))
            .mount(&server)
            .await;

        let client = GooglePlacesClient::new("k".to_owned(), &server.uri()).unwrap();
        let page = client.nearby_search(&nearby(None)).await.unwrap();
        assert!(page.results.is_empty());
        assert!(page.next_page_token.is_empty());
    }

    #[tokio::test]
    async fn test_weather_report_is_flattened() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/weather"))
            .and(query_param("appid", "weather-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": 2147714,
                "name": "Sydney",
                "weather": [{ "main": "Clouds", "description": "broken clouds" }],
                "main": { "temp": 293.1, "feels_like": 292.0, "temp_min": 291.0, "temp_max": 295.0, "pressure": 1016, "humidity": 68 },
                "wind": { "speed": 4.1, "deg": 140 },
                "sys": { "sunrise": 1600000000, "sunset": 1600040000 }
            })))
            .mount(&server)
            .await;

        let client = OpenWeatherClient::new("weather-key".to_owned(), &format!("{}/weather", server.uri())).unwrap();
        let report = client.current(-33.865143, 151.2099).await.unwrap();

        assert_eq!(report.city_name, "Sydney");
        assert_eq!(report.visibility, "Clouds");
        assert_eq!(report.description, "broken clouds");
        assert_eq!(report.pressure, 1016);
        assert_eq!(report.wind_direction, 140);
        assert_eq!(report.sunset, 1600040000);
    }

    #[tokio::test]
    async fn test_weather_without_id_is_invalid_key() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "cod": 401 })))
            .mount(&server)
            .await;

        let client = OpenWeatherClient::new("bad".to_owned(), &server.uri()).unwrap();
        assert!(matches!(client.current(0.0, 0.0).await.unwrap_err(), FeedError::InvalidApiKey));
    }

    #[tokio::test]
    async fn test_advisory_country_matched_case_insensitively() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(query_param("countrycode", "au"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "api_status": { "reply": { "code": 200, "status": "ok" } },
                "data": {
                    "AU": {
                        "iso_alpha2": "AU",
                        "name": "Australia",
                        "continent": "OC",
                        "advisory": { "score": 1.3, "sources_active": 7, "message": "low risk", "updated": "2020-08-24 07:22:52", "source": "https://www.travel-advisory.info/australia" }
                    }
                }
            })))
            .mount(&server)
            .await;

        let client = TravelAdvisoryClient::new(&server.uri()).unwrap();
        let report = client.advisory("au").await.unwrap();

        assert_eq!(report.country, "Australia");
        assert_eq!(report.country_code, "AU");
        assert!((report.score - 1.3).abs() < f64::EPSILON);
        assert_eq!(report.last_updated, "2020-08-24 07:22:52");
    }

    #[tokio::test]
    async fn test_advisory_missing_country() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": [] })))
            .mount(&server)
            .await;

        let client = TravelAdvisoryClient::new(&server.uri()).unwrap();
        assert!(matches!(client.advisory("ZZ").await.unwrap_err(), FeedError::CountryNotFound(_)));
    }

    #[tokio::test]
    async fn test_http_error_status_is_surfaced() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway"))
            .mount(&server)
            .await;

        let client = TravelAdvisoryClient::new(&server.uri()).unwrap();
        let err = client.advisory("AU").await.unwrap_err();
        assert!(matches!(err, FeedError::Status { code: 502, .. }));
        assert!(err.is_transient());
    }
}
