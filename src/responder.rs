//! Request classification and response building.
//!
//! Refusals are not errors here: every request yields a response, and the
//! status code tells the client how to read it.

use rand::Rng;

use crate::generator::WeatherGenerator;
use crate::protocol::{MeasurementType, Status, WeatherRequest, WeatherResponse};

/// Cities the server has data for, lowercase.
pub const SUPPORTED_CITIES: [&str; 10] = [
    "bari", "roma", "milano", "napoli", "torino", "palermo", "genova", "bologna", "firenze",
    "venezia",
];

/// Whether `city` is in the supported set, ignoring ASCII case.
pub fn is_supported_city(city: &[u8]) -> bool {
    SUPPORTED_CITIES
        .iter()
        .any(|supported| supported.as_bytes().eq_ignore_ascii_case(city))
}

/// Classify a request. The first failing check decides the status.
pub fn validate_request(request: &WeatherRequest) -> Status {
    if MeasurementType::from_code(request.type_code()).is_none() {
        return Status::InvalidRequest;
    }
    if request.city_bytes().is_empty() {
        return Status::InvalidRequest;
    }
    if !is_supported_city(request.city_bytes()) {
        return Status::CityNotFound;
    }
    Status::Ok
}

/// Build the response to `request`, drawing a value from `generator` when
/// the request is accepted.
pub fn build_response<R: Rng>(
    request: &WeatherRequest,
    generator: &mut WeatherGenerator<R>,
) -> WeatherResponse {
    match (validate_request(request), MeasurementType::from_code(request.type_code())) {
        (Status::Ok, Some(kind)) => WeatherResponse::ok(kind, generator.generate(kind)),
        (Status::Ok, None) => WeatherResponse::refused(Status::InvalidRequest),
        (status, _) => WeatherResponse::refused(status),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::range;

    fn respond(type_code: u8, city: &str) -> WeatherResponse {
        let mut generator = WeatherGenerator::seeded(3);
        build_response(&WeatherRequest::new(type_code, city), &mut generator)
    }

    #[test]
    fn supported_city_in_any_case_is_ok() {
        for city in SUPPORTED_CITIES {
            for kind in MeasurementType::ALL {
                let upper = city.to_ascii_uppercase();
                for name in [city, upper.as_str()] {
                    let resp = respond(kind.code().to_ascii_uppercase(), name);
                    assert_eq!(resp.status, Status::Ok);
                    assert_eq!(resp.type_code, kind.code());
                    assert!(range(kind).contains(&resp.value));
                }
            }
        }
    }

    #[test]
    fn temperature_for_bari() {
        let resp = respond(b't', "bari");
        assert_eq!(resp.status, Status::Ok);
        assert_eq!(resp.measurement(), Some(MeasurementType::Temperature));
        assert!((-10.0..=40.0).contains(&resp.value));
    }

    #[test]
    fn humidity_for_mixed_case_city() {
        let resp = respond(b'h', "Venezia");
        assert_eq!(resp.status, Status::Ok);
        assert_eq!(resp.type_code, b'h');
        assert!((20.0..=100.0).contains(&resp.value));
    }

    #[test]
    fn unknown_city_is_not_found() {
        let resp = respond(b't', "Atlantis");
        assert_eq!(resp, WeatherResponse::refused(Status::CityNotFound));
        assert_eq!(resp.type_code, 0);
        assert_eq!(resp.value, 0.0);
    }

    #[test]
    fn unknown_type_is_invalid_regardless_of_city() {
        assert_eq!(respond(b'x', "bari").status, Status::InvalidRequest);
        assert_eq!(respond(b'x', "Atlantis").status, Status::InvalidRequest);
        assert_eq!(respond(0, "roma").status, Status::InvalidRequest);
        assert_eq!(respond(b'x', "bari").type_code, 0);
    }

    #[test]
    fn empty_city_is_invalid() {
        assert_eq!(respond(b't', "").status, Status::InvalidRequest);
        assert_eq!(respond(b'x', "").status, Status::InvalidRequest);
    }

    #[test]
    fn city_match_is_exact_apart_from_case() {
        assert!(is_supported_city(b"MiLaNo"));
        assert!(!is_supported_city(b"milan"));
        assert!(!is_supported_city(b"milano "));
        assert!(!is_supported_city(b""));
    }
}
