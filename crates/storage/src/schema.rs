//! GraphQL schema document and its management against the store's admin endpoint.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::json;

use crate::documents::{GET_SCHEMA, GetSchema, UPDATE_SCHEMA};
use crate::error::{SchemaError, StorageError};
use crate::graphql::{Endpoint, GraphQlClient};

#[expect(clippy::unwrap_used, reason = "static regex pattern is compile-time validated")]
static NON_ALPHANUMERIC: LazyLock<Regex> = LazyLock::new(|| Regex::new("[^a-zA-Z0-9]+").unwrap());

const DOCUMENT_TEMPLATE: &str = r#"type City {
    id: ID!
    name: String! @search(by: [exact])
    lat: Float!
    lng: Float!
    places: [Place] @hasInverse(field: city)
    advisory: Advisory
    weather: Weather
}

type Advisory {
    id: ID!
    city: City
    continent: String
    country: String!
    country_code: String!
    last_updated: String
    message: String
    score: Float!
    source: String
}

type Place {
    id: ID!
    address: String
    avg_user_rating: Float
    category: String @search(by: [exact])
    city: City!
    city_name: String!
    gmaps_url: String
    lat: Float!
    lng: Float!
    location_type: [String]
    name: String! @search(by: [exact])
    no_user_rating: Int
    place_id: String! @search(by: [exact])
    photo_id: String
}

type Weather {
    id: ID!
    city: City
    city_name: String!
    description: String
    feels_like: Float
    humidity: Int
    pressure: Int
    sunrise: Int
    sunset: Int
    temp: Float
    temp_min: Float
    temp_max: Float
    visibility: String
    wind_direction: Int
    wind_speed: Float
}

type UploadFeedResponse @remote {
    country_code: String!
    city_name: String!
    lat: Float!
    lng: Float!
    message: String!
}

input UploadFeedRequest {
    countrycode: String!
    cityname: String!
    lat: Float!
    lng: Float!
}

type Mutation {
    uploadFeed(input: UploadFeedRequest!): UploadFeedResponse @custom(http: {
        url: "{{UPLOAD_FEED_URL}}"
        method: "POST"
        body: "$input"
    })
}
"#;

/// The expected schema, with the upload feed endpoint filled in.
#[must_use]
pub fn document(upload_feed_url: &str) -> String {
    DOCUMENT_TEMPLATE.replace("{{UPLOAD_FEED_URL}}", upload_feed_url)
}

/// Compare two schema documents ignoring whitespace and punctuation.
#[must_use]
pub fn matches(expected: &str, actual: &str) -> bool {
    !actual.trim().is_empty()
        && NON_ALPHANUMERIC.replace_all(expected, "") == NON_ALPHANUMERIC.replace_all(actual, "")
}

/// Manages the schema through the admin endpoint.
#[derive(Debug)]
pub struct Schema {
    client: GraphQlClient,
    document: String,
}

impl Schema {
    #[must_use]
    pub fn new(client: GraphQlClient, upload_feed_url: &str) -> Self {
        Self { client, document: document(upload_feed_url) }
    }

    #[must_use]
    pub fn document(&self) -> &str {
        &self.document
    }

    /// The schema currently installed, empty if none.
    ///
    /// # Errors
    /// Any store failure.
    pub async fn retrieve(&self) -> Result<String, StorageError> {
        let result: GetSchema = self.client.execute(Endpoint::Admin, GET_SCHEMA, json!({})).await?;
        Ok(result.schema.map(|s| s.schema).unwrap_or_default())
    }

    /// Whether the installed schema matches the expected document.
    ///
    /// # Errors
    /// Any store failure.
    pub async fn is_current(&self) -> Result<bool, StorageError> {
        Ok(matches(&self.document, &self.retrieve().await?))
    }

    /// Install the schema unless the store already has it. Returns `true` if
    /// an update was sent.
    ///
    /// # Errors
    /// Store failure, or [`SchemaError::Mismatch`] if the store's schema still
    /// differs after the update.
    pub async fn create(&self) -> Result<bool, SchemaError> {
        if self.is_current().await? {
            tracing::info!("schema already current");
            return Ok(false);
        }

        let _: serde_json::Value = self
            .client
            .execute(Endpoint::Admin, UPDATE_SCHEMA, json!({ "schema": self.document }))
            .await?;

        if !self.is_current().await? {
            return Err(SchemaError::Mismatch);
        }
        tracing::info!("schema updated");
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_embeds_upload_url() {
        let doc = document("http://feed:3000/v1/feed/upload");
        assert!(doc.contains(r#"url: "http://feed:3000/v1/feed/upload""#));
        assert!(!doc.contains("{{"));
    }

    #[test]
    fn test_matches_ignores_formatting() {
        let expected = "type City {\n    id: ID!\n    name: String!\n}";
        let actual = "type City { id: ID! name: String! }";
        assert!(matches(expected, actual));
        assert!(!matches(expected, "type City { id: ID! }"));
    }

    #[test]
    fn test_empty_schema_never_matches() {
        assert!(!matches("", ""));
    }
}
