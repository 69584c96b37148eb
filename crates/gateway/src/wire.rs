//! Wire types for the shelter catalog REST API

use pawfinder_core::{Bounds, DogId, FilterQuery, Location};
use serde::{Deserialize, Serialize};

/// Body for `POST /auth/login`
#[derive(Debug, Serialize)]
pub struct LoginRequest<'a> {
    pub name: &'a str,
    pub email: &'a str,
}

/// Body for `POST /locations/search`
#[derive(Debug, Serialize)]
pub struct GeoSearchRequest {
    #[serde(rename = "geoBoundingBox")]
    pub geo_bounding_box: GeoBoundingBox,
    pub size: u32,
}

#[derive(Debug, Serialize)]
pub struct GeoBoundingBox {
    pub bottom_left: GeoCoord,
    pub top_right: GeoCoord,
}

#[derive(Debug, Serialize)]
pub struct GeoCoord {
    pub lat: f64,
    pub lon: f64,
}

impl GeoSearchRequest {
    pub fn new(bounds: &Bounds, size: u32) -> Self {
        Self {
            geo_bounding_box: GeoBoundingBox {
                bottom_left: GeoCoord {
                    lat: bounds.south_west.lat,
                    lon: bounds.south_west.lng,
                },
                top_right: GeoCoord {
                    lat: bounds.north_east.lat,
                    lon: bounds.north_east.lng,
                },
            },
            size,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct GeoSearchResponse {
    pub results: Vec<Location>,
}

/// Response of `POST /dogs/match`: exactly one id
#[derive(Debug, Deserialize)]
pub struct MatchResponse {
    #[serde(rename = "match")]
    pub id: DogId,
}

/// Query parameters for `GET /dogs/search`, one pair per repeated value.
/// Unset filters produce no pair at all; `sort` and `size` are always sent.
pub fn search_params(query: &FilterQuery) -> Vec<(String, String)> {
    let mut params = vec![
        ("size".to_string(), query.size.to_string()),
        ("sort".to_string(), query.sort.to_string()),
    ];
    for breed in &query.breeds {
        params.push(("breeds".to_string(), breed.clone()));
    }
    if let Some(min) = query.age_min {
        params.push(("ageMin".to_string(), min.to_string()));
    }
    if let Some(max) = query.age_max {
        params.push(("ageMax".to_string(), max.to_string()));
    }
    for zip in &query.zip_codes {
        params.push(("zipCodes".to_string(), zip.clone()));
    }
    params
}

#[cfg(test)]
mod tests {
    use super::*;
    use pawfinder_core::{GRID_PAGE_SIZE, GeoPoint, QueryState};

    #[test]
    fn test_search_params_minimal() {
        let query = FilterQuery::from_state(&QueryState::default(), GRID_PAGE_SIZE);
        let params = search_params(&query);
        assert_eq!(
            params,
            vec![
                ("size".to_string(), "12".to_string()),
                ("sort".to_string(), "breed:asc".to_string()),
            ]
        );
    }

    #[test]
    fn test_search_params_full() {
        let state = QueryState {
            breed: Some("German Shepherd".to_string()),
            age_min: Some(2),
            age_max: Some(5),
            sort: "name:desc".parse().unwrap(),
        };
        let query = FilterQuery::from_state(&state, GRID_PAGE_SIZE)
            .with_zip_codes(vec!["10001".to_string(), "10002".to_string()]);
        let params = search_params(&query);
        assert!(params.contains(&("breeds".to_string(), "German Shepherd".to_string())));
        assert!(params.contains(&("ageMin".to_string(), "2".to_string())));
        assert!(params.contains(&("ageMax".to_string(), "5".to_string())));
        assert_eq!(
            params
                .iter()
                .filter(|(key, _)| key == "zipCodes")
                .count(),
            2
        );
    }

    #[test]
    fn test_geo_request_body_shape() {
        let bounds = Bounds::new(GeoPoint::new(41.0, -73.0), GeoPoint::new(40.0, -75.0));
        let body = GeoSearchRequest::new(&bounds, 10_000);
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["geoBoundingBox"]["bottom_left"]["lat"], 40.0);
        assert_eq!(json["geoBoundingBox"]["bottom_left"]["lon"], -75.0);
        assert_eq!(json["geoBoundingBox"]["top_right"]["lat"], 41.0);
        assert_eq!(json["size"], 10_000);
    }

    #[test]
    fn test_match_response_field_name() {
        let resp: MatchResponse = serde_json::from_str(r#"{"match":"d-7"}"#).unwrap();
        assert_eq!(resp.id, "d-7");
    }
}
