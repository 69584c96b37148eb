//! Deterministic fixtures for tests and the demo runner

use pawfinder_core::{Dog, Location};

const BREEDS: [&str; 4] = ["Beagle", "Boxer", "Husky", "Poodle"];

const ZIPS: [(&str, f64, f64, &str, &str, &str); 4] = [
    ("10001", 40.7506, -73.9972, "New York", "NY", "New York"),
    ("10002", 40.7157, -73.9863, "New York", "NY", "New York"),
    ("19104", 39.9597, -75.2024, "Philadelphia", "PA", "Philadelphia"),
    ("60614", 41.9227, -87.6533, "Chicago", "IL", "Cook"),
];

/// A herd of `count` dogs cycling through breeds, ages, and zip codes, plus
/// the locations for every zip in use. Names sort in id order, so sort
/// assertions stay readable.
pub fn herd(count: usize) -> (Vec<Dog>, Vec<Location>) {
    let dogs = (0..count)
        .map(|i| Dog {
            id: format!("d-{i:03}"),
            img: format!("https://images.example/d-{i:03}.jpg"),
            name: format!("N{i:03}"),
            age: (i % 12) as u32,
            zip_code: ZIPS[i % ZIPS.len()].0.to_string(),
            breed: BREEDS[i % BREEDS.len()].to_string(),
        })
        .collect();

    let locations = ZIPS
        .iter()
        .map(|(zip, lat, lng, city, state, county)| Location {
            zip_code: zip.to_string(),
            latitude: *lat,
            longitude: *lng,
            city: city.to_string(),
            state: state.to_string(),
            county: county.to_string(),
        })
        .collect();

    (dogs, locations)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_herd_is_joinable() {
        let (dogs, locations) = herd(10);
        assert_eq!(dogs.len(), 10);
        for dog in &dogs {
            assert!(
                locations
                    .iter()
                    .any(|location| location.zip_code == dog.zip_code)
            );
        }
    }
}
