// src/services/params.rs
// DOCUMENTATION: Request parameter preparation
// PURPOSE: Validate call arguments and build query parameters before any network I/O

use crate::errors::PlacesError;
use crate::models::{AutocompleteOptions, DetailsOptions, Location, QueryParams, SearchOptions};
use validator::Validate;

/// Largest radius the search endpoints accept, in meters
pub const MAX_RADIUS: u32 = 50_000;

/// Parameters set by the client or a typed option, never through `extra`
pub const RESERVED_PARAMS: [&str; 10] = [
    "key", "location", "radius", "rankby", "keyword", "name", "types", "query", "placeid",
    "input",
];

/// Prepare the params for a nearby search
/// DOCUMENTATION: `radius` is required unless results are ranked by distance,
/// in which case it is dropped and keyword, name or types must be present.
pub fn prepare_nearby_search_params(
    location: &Location,
    radius: Option<u32>,
    options: &SearchOptions,
) -> Result<QueryParams, PlacesError> {
    location.validate()?;
    options.validate()?;
    check_extra(options.extra.keys())?;

    let mut params = vec![("location".to_string(), location.to_string())];

    if options.ranks_by_distance() {
        if !options.has_discriminator() {
            return Err(PlacesError::ValidationError(
                "Nearby Search require one or more of 'keyword', 'name', or 'types' params since 'rankby' = 'distance'."
                    .to_string(),
            ));
        }
    } else {
        match radius {
            Some(radius) => {
                check_radius(radius)?;
                params.push(("radius".to_string(), radius.to_string()));
            }
            None => {
                return Err(PlacesError::ValidationError(
                    "'radius' param is not defined.".to_string(),
                ))
            }
        }
    }

    options.append_to(&mut params);
    Ok(params)
}

/// Prepare the params for a text search
pub fn prepare_text_search_params(
    query: &str,
    options: &SearchOptions,
) -> Result<QueryParams, PlacesError> {
    options.validate()?;
    check_extra(options.extra.keys())?;
    let mut params = vec![("query".to_string(), require("query", query)?)];
    options.append_to(&mut params);
    Ok(params)
}

/// Prepare the params for a radar search
/// DOCUMENTATION: keyword, name or types is mandatory; radius is always sent
pub fn prepare_radar_search_params(
    location: &Location,
    radius: u32,
    options: &SearchOptions,
) -> Result<QueryParams, PlacesError> {
    location.validate()?;
    options.validate()?;
    check_extra(options.extra.keys())?;
    check_radius(radius)?;

    if !options.has_discriminator() {
        return Err(PlacesError::ValidationError(
            "Radar Search require one or more of 'keyword', 'name', or 'types' params."
                .to_string(),
        ));
    }

    let mut params = vec![
        ("location".to_string(), location.to_string()),
        ("radius".to_string(), radius.to_string()),
    ];
    options.append_to(&mut params);
    Ok(params)
}

/// Prepare the params for a place details lookup
pub fn prepare_details_params(
    place_id: &str,
    options: &DetailsOptions,
) -> Result<QueryParams, PlacesError> {
    options.validate()?;
    check_extra(options.extra.keys())?;
    let mut params = vec![("placeid".to_string(), require("placeid", place_id)?)];
    options.append_to(&mut params);
    Ok(params)
}

/// Prepare the params for place or query autocomplete
pub fn prepare_autocomplete_params(
    input: &str,
    options: &AutocompleteOptions,
) -> Result<QueryParams, PlacesError> {
    options.validate()?;
    check_extra(options.extra.keys())?;
    if let Some(location) = &options.location {
        location.validate()?;
    }
    if options.strictbounds && (options.location.is_none() || options.radius.is_none()) {
        return Err(PlacesError::ValidationError(
            "'strictbounds' requires both 'location' and 'radius'.".to_string(),
        ));
    }

    let mut params = vec![("input".to_string(), require("input", input)?)];
    options.append_to(&mut params);
    Ok(params)
}

fn check_extra<'a>(keys: impl IntoIterator<Item = &'a String>) -> Result<(), PlacesError> {
    for key in keys {
        if RESERVED_PARAMS.contains(&key.as_str()) {
            return Err(PlacesError::ValidationError(format!(
                "'{}' cannot be passed as an extra param.",
                key
            )));
        }
    }
    Ok(())
}

fn check_radius(radius: u32) -> Result<(), PlacesError> {
    if radius == 0 || radius > MAX_RADIUS {
        return Err(PlacesError::ValidationError(format!(
            "'radius' must be between 1 and {} meters, got {}.",
            MAX_RADIUS, radius
        )));
    }
    Ok(())
}

fn require(name: &str, value: &str) -> Result<String, PlacesError> {
    if value.trim().is_empty() {
        return Err(PlacesError::ValidationError(format!(
            "'{}' param must not be empty.",
            name
        )));
    }
    Ok(value.to_string())
}
