//! GraphQL documents and response shapes for the graph store.
//!
//! Values are always passed as variables, never spliced into the document.

use serde::Deserialize;
use travel_sync_core::{Advisory, City, Place, Stored, Weather};

pub const CITY_BY_NAME: &str = r"
query($name: String!) {
    queryCity(filter: { name: { eq: $name } }) {
        id
        name
        lat
        lng
    }
}";

pub const CITY_BY_ID: &str = r"
query($id: ID!) {
    getCity(id: $id) {
        id
        name
        lat
        lng
    }
}";

pub const ADD_CITY: &str = r"
mutation($input: [AddCityInput!]!) {
    resp: addCity(input: $input) {
        entities: city {
            id
        }
    }
}";

pub const PLACE_BY_KEY: &str = r"
query($city: ID!, $place_id: String!) {
    getCity(id: $city) {
        places(filter: { place_id: { eq: $place_id } }) {
            id
            place_id
            category
            city { id }
            city_name
            name
            address
            lat
            lng
            location_type
            avg_user_rating
            no_user_rating
            gmaps_url
            photo_id
        }
    }
}";

pub const PLACES_BY_CITY: &str = r"
query($city: ID!) {
    getCity(id: $city) {
        places {
            id
            place_id
            category
            city { id }
            city_name
            name
            address
            lat
            lng
            location_type
            avg_user_rating
            no_user_rating
            gmaps_url
            photo_id
        }
    }
}";

pub const ADD_PLACE: &str = r"
mutation($input: [AddPlaceInput!]!) {
    resp: addPlace(input: $input) {
        entities: place {
            id
        }
    }
}";

pub const LINK_PLACE: &str = r"
mutation($city: ID!, $id: ID!) {
    resp: updateCity(input: {
        filter: { id: [$city] }
        set: { places: [{ id: $id }] }
    }) {
        numUids
    }
}";

pub const WEATHER_FOR_CITY: &str = r"
query($city: ID!) {
    getCity(id: $city) {
        weather {
            id
            city { id }
            city_name
            visibility
            description
            temp
            feels_like
            temp_min
            temp_max
            pressure
            humidity
            wind_speed
            wind_direction
            sunrise
            sunset
        }
    }
}";

pub const WEATHERS_REFERENCING: &str = r#"
query($city: ID!) {
    queryWeather @cascade(fields: ["city"]) {
        id
        city(filter: { id: [$city] }) { id }
        city_name
        visibility
        description
        temp
        feels_like
        temp_min
        temp_max
        pressure
        humidity
        wind_speed
        wind_direction
        sunrise
        sunset
    }
}"#;

pub const ADD_WEATHER: &str = r"
mutation($input: [AddWeatherInput!]!) {
    resp: addWeather(input: $input) {
        entities: weather {
            id
        }
    }
}";

pub const DELETE_WEATHER: &str = r"
mutation($id: ID!) {
    resp: deleteWeather(filter: { id: [$id] }) {
        msg
        numUids
    }
}";

pub const LINK_WEATHER: &str = r"
mutation($city: ID!, $id: ID!) {
    resp: updateCity(input: {
        filter: { id: [$city] }
        set: { weather: { id: $id } }
    }) {
        numUids
    }
}";

pub const ADVISORY_FOR_CITY: &str = r"
query($city: ID!) {
    getCity(id: $city) {
        advisory {
            id
            city { id }
            country
            country_code
            continent
            score
            last_updated
            message
            source
        }
    }
}";

pub const ADVISORIES_REFERENCING: &str = r#"
query($city: ID!) {
    queryAdvisory @cascade(fields: ["city"]) {
        id
        city(filter: { id: [$city] }) { id }
        country
        country_code
        continent
        score
        last_updated
        message
        source
    }
}"#;

pub const ADD_ADVISORY: &str = r"
mutation($input: [AddAdvisoryInput!]!) {
    resp: addAdvisory(input: $input) {
        entities: advisory {
            id
        }
    }
}";

pub const DELETE_ADVISORY: &str = r"
mutation($id: ID!) {
    resp: deleteAdvisory(filter: { id: [$id] }) {
        msg
        numUids
    }
}";

pub const LINK_ADVISORY: &str = r"
mutation($city: ID!, $id: ID!) {
    resp: updateCity(input: {
        filter: { id: [$city] }
        set: { advisory: { id: $id } }
    }) {
        numUids
    }
}";

pub const GET_SCHEMA: &str = r"
query {
    getGQLSchema {
        schema
    }
}";

pub const UPDATE_SCHEMA: &str = r"
mutation($schema: String!) {
    updateGQLSchema(input: { set: { schema: $schema } }) {
        gqlSchema {
            schema
        }
    }
}";

#[derive(Deserialize)]
pub struct QueryCity {
    #[serde(rename = "queryCity", default)]
    pub cities: Vec<Stored<City>>,
}

#[derive(Deserialize)]
pub struct GetCity<T> {
    #[serde(rename = "getCity")]
    pub city: Option<T>,
}

#[derive(Deserialize)]
pub struct CityPlaces {
    #[serde(default)]
    pub places: Option<Vec<Stored<Place>>>,
}

#[derive(Deserialize)]
pub struct CityWeather {
    pub weather: Option<Stored<Weather>>,
}

#[derive(Deserialize)]
pub struct CityAdvisory {
    pub advisory: Option<Stored<Advisory>>,
}

#[derive(Deserialize)]
pub struct QueryWeather {
    #[serde(rename = "queryWeather", default)]
    pub weathers: Option<Vec<Stored<Weather>>>,
}

#[derive(Deserialize)]
pub struct QueryAdvisory {
    #[serde(rename = "queryAdvisory", default)]
    pub advisories: Option<Vec<Stored<Advisory>>>,
}

#[derive(Deserialize)]
pub struct Resp<T> {
    pub resp: Option<T>,
}

#[derive(Deserialize)]
pub struct Added {
    #[serde(default)]
    pub entities: Vec<EntityId>,
}

#[derive(Deserialize)]
pub struct EntityId {
    pub id: String,
}

#[derive(Deserialize)]
pub struct Deleted {
    #[serde(default)]
    pub msg: String,
    #[serde(rename = "numUids", default)]
    pub num_uids: u64,
}

#[derive(Deserialize)]
pub struct Updated {
    #[serde(rename = "numUids", default)]
    pub num_uids: u64,
}

#[derive(Deserialize)]
pub struct GetSchema {
    #[serde(rename = "getGQLSchema")]
    pub schema: Option<SchemaDoc>,
}

#[derive(Deserialize)]
pub struct SchemaDoc {
    #[serde(default)]
    pub schema: String,
}
