use super::ApiError;
use crate::domain::{Coordinates, LocationId};

pub fn validate_location_id(id: i32) -> Result<LocationId, ApiError> {
    if id <= 0 {
        return Err(ApiError::validation(format!(
            "Invalid location ID: {id}. ID must be a positive integer"
        )));
    }
    Ok(LocationId::new(id))
}

pub fn validate_coordinates(latitude: f64, longitude: f64) -> Result<Coordinates, ApiError> {
    if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
        return Err(ApiError::validation(format!(
            "Invalid latitude: {latitude}. Must be between -90 and 90"
        )));
    }

    if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
        return Err(ApiError::validation(format!(
            "Invalid longitude: {longitude}. Must be between -180 and 180"
        )));
    }

    Ok(Coordinates::new(latitude, longitude))
}

pub fn validate_search_query(query: &str) -> Result<&str, ApiError> {
    let trimmed = query.trim();
    if trimmed.is_empty() {
        return Err(ApiError::validation("Search query cannot be empty"));
    }

    if trimmed.chars().count() > 200 {
        return Err(ApiError::validation(
            "Search query must be 200 characters or less",
        ));
    }

    Ok(trimmed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_location_id() {
        assert!(validate_location_id(1).is_ok());
        assert_eq!(validate_location_id(42).unwrap(), LocationId::new(42));
        assert!(validate_location_id(0).is_err());
        assert!(validate_location_id(-1).is_err());
    }

    #[test]
    fn test_validate_coordinates() {
        assert!(validate_coordinates(47.6062, -122.3321).is_ok());
        assert!(validate_coordinates(90.0, 180.0).is_ok());
        assert!(validate_coordinates(-90.0, -180.0).is_ok());
        assert!(validate_coordinates(90.1, 0.0).is_err());
        assert!(validate_coordinates(0.0, -180.5).is_err());
        assert!(validate_coordinates(f64::NAN, 0.0).is_err());
    }

    #[test]
    fn test_validate_search_query() {
        assert_eq!(validate_search_query("  Seattle  ").unwrap(), "Seattle");
        assert!(validate_search_query("").is_err());
        assert!(validate_search_query("   ").is_err());
        assert!(validate_search_query(&"a".repeat(201)).is_err());
        // Limit counts characters, not bytes.
        let cjk = "東".repeat(200);
        assert_eq!(validate_search_query(&cjk).unwrap(), cjk);
        assert!(validate_search_query(&"東".repeat(201)).is_err());
    }
}
