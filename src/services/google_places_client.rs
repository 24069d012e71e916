// src/services/google_places_client.rs
// DOCUMENTATION: Google Places API client
// PURPOSE: Issue Places requests, memoize them, and map responses into typed models

use crate::config::PlacesConfig;
use crate::errors::PlacesError;
use crate::models::{
    AddressComponent, AutocompleteOptions, DetailsOptions, Geometry, Location, Photo, Place,
    PlacePreview, Prediction, QueryParams, Review, ReviewAspect, SearchOptions,
};
use crate::services::cache::{
    cache_key, start_cleanup_task, PlacesCache, ResponseCache, CLEANUP_INTERVAL_SECS,
};
use crate::services::params::{
    prepare_autocomplete_params, prepare_details_params, prepare_nearby_search_params,
    prepare_radar_search_params, prepare_text_search_params,
};
use crate::services::transport::{ReqwestTransport, Transport};
use chrono::{Datelike, Local, TimeZone, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::future::Future;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

pub const NEARBY_SEARCH_URL: &str = "nearbysearch/json";
pub const TEXT_SEARCH_URL: &str = "textsearch/json";
pub const RADAR_SEARCH_URL: &str = "radarsearch/json";
pub const DETAILS_SEARCH_URL: &str = "details/json";
pub const PLACE_AUTOCOMPLETE_URL: &str = "autocomplete/json";
pub const QUERY_AUTOCOMPLETE_URL: &str = "queryautocomplete/json";
pub const PHOTO_DETAILS_URL: &str = "photo";

/// Google Places API client
/// DOCUMENTATION: Handles authentication, caching and API calls to Google Places.
/// The client is Send + Sync; share it behind an Arc.
pub struct GooglePlacesClient {
    /// HTTP transport for making requests
    transport: Arc<dyn Transport>,
    /// Optional response cache (None = always hit the API)
    cache: Option<Arc<dyn ResponseCache>>,
    /// API key, base URL, cache period and image sizes
    config: PlacesConfig,
    /// Status of the last API response
    status: Mutex<Option<String>>,
    /// Page token of the last successful search
    next_page_token: Mutex<Option<String>>,
}

/// Read a field, treating a value of the wrong shape as absent
/// DOCUMENTATION: One malformed field must not fail the whole response
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    match serde_json::from_value(value) {
        Ok(parsed) => Ok(Some(parsed)),
        Err(e) => {
            log::debug!("Ignoring malformed Google Places field: {}", e);
            Ok(None)
        }
    }
}

/// Response from the search endpoints
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GoogleSearchResponse {
    /// Results array from API
    #[serde(default, deserialize_with = "lenient")]
    pub results: Option<Vec<GooglePlace>>,
    /// Next page token (if more results available)
    #[serde(default, deserialize_with = "lenient")]
    pub next_page_token: Option<String>,
}

/// Response from the details endpoint
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GoogleDetailsResponse {
    #[serde(default, deserialize_with = "lenient")]
    pub result: Option<GooglePlace>,
}

/// Response from the autocomplete endpoints
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GoogleAutocompleteResponse {
    #[serde(default, deserialize_with = "lenient")]
    pub predictions: Option<Vec<GooglePrediction>>,
}

/// Individual place from Google Places API
/// DOCUMENTATION: Place data structure returned by search and details
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct GooglePlace {
    /// Google's unique place identifier
    #[serde(default, deserialize_with = "lenient")]
    pub place_id: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub name: Option<String>,
    /// Formatted address (detailed, from Place Details and Text Search)
    #[serde(default, deserialize_with = "lenient")]
    pub formatted_address: Option<String>,
    /// Vicinity (short address, from Nearby Search)
    #[serde(default, deserialize_with = "lenient")]
    pub vicinity: Option<String>,
    /// Geographic location
    #[serde(default, deserialize_with = "lenient")]
    pub geometry: Option<Geometry>,
    /// Address components (city, district, postal code, etc.)
    #[serde(default, deserialize_with = "lenient")]
    pub address_components: Option<Vec<AddressComponent>>,
    /// Rating (0-5)
    #[serde(default, deserialize_with = "lenient")]
    pub rating: Option<f32>,
    /// Number of user ratings
    #[serde(default, deserialize_with = "lenient")]
    pub user_ratings_total: Option<i32>,
    /// Price level (0-4: free to very expensive)
    #[serde(default, deserialize_with = "lenient")]
    pub price_level: Option<i32>,
    /// Opening hours indicator
    #[serde(default, deserialize_with = "lenient")]
    pub opening_hours: Option<GoogleOpeningHours>,
    /// Phone number (formatted for local use)
    #[serde(default, deserialize_with = "lenient")]
    pub formatted_phone_number: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub website: Option<String>,
    /// Google Maps URL
    #[serde(default, deserialize_with = "lenient")]
    pub url: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub icon: Option<String>,
    /// Premium summary text
    #[serde(default, deserialize_with = "lenient")]
    pub review_summary: Option<String>,
    /// User reviews (from Place Details)
    #[serde(default, deserialize_with = "lenient")]
    pub reviews: Option<Vec<GoogleReview>>,
    /// Photos (from Place Details)
    #[serde(default, deserialize_with = "lenient")]
    pub photos: Option<Vec<GooglePhoto>>,
}

/// Opening hours metadata
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct GoogleOpeningHours {
    /// Whether place is currently open
    #[serde(default, deserialize_with = "lenient")]
    pub open_now: Option<bool>,
    /// Detailed regular opening hours, Monday first
    #[serde(default, deserialize_with = "lenient")]
    pub weekday_text: Option<Vec<String>>,
}

/// Review from Google Places
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct GoogleReview {
    #[serde(default, deserialize_with = "lenient")]
    pub author_name: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub profile_photo_url: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub text: Option<String>,
    /// Time of review (Unix timestamp)
    #[serde(default, deserialize_with = "lenient")]
    pub time: Option<i64>,
    #[serde(default, deserialize_with = "lenient")]
    pub rating: Option<f32>,
    #[serde(default, deserialize_with = "lenient")]
    pub aspects: Option<Vec<ReviewAspect>>,
    #[serde(default, deserialize_with = "lenient")]
    pub language: Option<String>,
}

/// Photo from Google Places
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct GooglePhoto {
    /// Photo reference (used to fetch actual photo)
    #[serde(default, deserialize_with = "lenient")]
    pub photo_reference: Option<String>,
    /// Photo width in pixels
    #[serde(default, deserialize_with = "lenient")]
    pub width: Option<i32>,
    /// Photo height in pixels
    #[serde(default, deserialize_with = "lenient")]
    pub height: Option<i32>,
}

/// Autocomplete prediction from Google Places
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct GooglePrediction {
    #[serde(default, deserialize_with = "lenient")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub place_id: Option<String>,
}

impl GooglePlacesClient {
    /// Create new Google Places API client
    /// DOCUMENTATION: Default configuration with the given key, no cache
    pub fn new(api_key: String) -> Self {
        Self::with_parts(
            PlacesConfig::default().with_api_key(api_key),
            Arc::new(ReqwestTransport::default()),
            None,
        )
    }

    /// Create client sharing an existing cache
    pub fn new_with_cache(api_key: String, cache: Arc<dyn ResponseCache>) -> Self {
        Self::new(api_key).with_cache(cache)
    }

    /// Create client from configuration
    /// DOCUMENTATION: Builds a reqwest transport with the configured timeout and
    /// an in-memory cache unless the cache period is zero
    pub fn from_config(config: PlacesConfig) -> Result<Self, PlacesError> {
        let transport = ReqwestTransport::new(Duration::from_secs(config.timeout))?;
        let cache: Option<Arc<dyn ResponseCache>> = if config.cache_period > 0 {
            let cache = Arc::new(PlacesCache::new(config.cache_ttl().as_secs()));
            // Expired entries are purged in the background when a runtime is around
            if tokio::runtime::Handle::try_current().is_ok() {
                start_cleanup_task(cache.clone(), CLEANUP_INTERVAL_SECS);
            }
            Some(cache)
        } else {
            None
        };

        Ok(Self::with_parts(config, Arc::new(transport), cache))
    }

    /// Assemble a client from explicit collaborators
    pub fn with_parts(
        config: PlacesConfig,
        transport: Arc<dyn Transport>,
        cache: Option<Arc<dyn ResponseCache>>,
    ) -> Self {
        Self {
            transport,
            cache,
            config,
            status: Mutex::new(None),
            next_page_token: Mutex::new(None),
        }
    }

    /// Replace the HTTP transport
    pub fn with_transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = transport;
        self
    }

    /// Attach a response cache
    pub fn with_cache(mut self, cache: Arc<dyn ResponseCache>) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Detach the response cache
    pub fn without_cache(mut self) -> Self {
        self.cache = None;
        self
    }

    /// Get API key
    pub fn get_api_key(&self) -> &str {
        &self.config.api_key
    }

    /// Set API key
    pub fn set_api_key(&mut self, api_key: impl Into<String>) -> &mut Self {
        self.config.api_key = api_key.into();
        self
    }

    pub fn config(&self) -> &PlacesConfig {
        &self.config
    }

    /// Status of the last API response, if any request has completed
    pub fn status(&self) -> Option<String> {
        self.status
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Token for the next page of the last successful search
    /// DOCUMENTATION: Pass it back through `SearchOptions::pagetoken`; None when
    /// Google has no more results
    pub fn next_page_token(&self) -> Option<String> {
        self.next_page_token
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Perform nearby search for places
    /// DOCUMENTATION: Searches for places near a geographic point
    ///
    /// # Arguments
    /// * `location` - Center point
    /// * `radius` - Search radius in meters, required unless ranking by distance
    /// * `options` - Optional filters (keyword, name, types, rankby, ...)
    ///
    /// # Returns
    /// Vector of PlacePreview results in API order
    pub async fn nearby_search(
        &self,
        location: Location,
        radius: Option<u32>,
        options: &SearchOptions,
    ) -> Result<Vec<PlacePreview>, PlacesError> {
        self.check_key()?;
        let params = prepare_nearby_search_params(&location, radius, options)?;
        let key = cache_key("nearby_search", &(&location, radius, options))?;

        log::debug!(
            "Google Places nearby search: location={}, radius={:?}",
            location,
            radius
        );

        self.search(key, NEARBY_SEARCH_URL, params).await
    }

    /// Perform free-text search for places
    pub async fn text_search(
        &self,
        query: &str,
        options: &SearchOptions,
    ) -> Result<Vec<PlacePreview>, PlacesError> {
        self.check_key()?;
        let params = prepare_text_search_params(query, options)?;
        let key = cache_key("text_search", &(query, options))?;

        log::debug!("Google Places text search: query={}", query);

        self.search(key, TEXT_SEARCH_URL, params).await
    }

    /// Perform radar search for places
    /// DOCUMENTATION: Requires at least one of keyword, name or types
    pub async fn radar_search(
        &self,
        location: Location,
        radius: u32,
        options: &SearchOptions,
    ) -> Result<Vec<PlacePreview>, PlacesError> {
        self.check_key()?;
        let params = prepare_radar_search_params(&location, radius, options)?;
        let key = cache_key("radar_search", &(&location, radius, options))?;

        log::debug!(
            "Google Places radar search: location={}, radius={}",
            location,
            radius
        );

        self.search(key, RADAR_SEARCH_URL, params).await
    }

    /// Get detailed information about a specific place
    /// DOCUMENTATION: Retrieves place details by place_id, including photos and reviews
    pub async fn place_details(
        &self,
        place_id: &str,
        options: &DetailsOptions,
    ) -> Result<Place, PlacesError> {
        self.check_key()?;
        let params = prepare_details_params(place_id, options)?;
        let key = cache_key("place_details", &(place_id, options))?;

        log::debug!("Google Places details lookup: place_id={}", place_id);

        self.remember(key, move || async move {
            let response: GoogleDetailsResponse = self.make_request(DETAILS_SEARCH_URL, params).await?;
            let weekday = Local::now().weekday().num_days_from_monday() as usize;
            self.convert_details(response.result.unwrap_or_default(), weekday)
        })
        .await
    }

    /// Place autocomplete
    /// DOCUMENTATION: Predictions for a partially typed place name or address
    pub async fn place_autocomplete(
        &self,
        input: &str,
        options: &AutocompleteOptions,
    ) -> Result<Vec<Prediction>, PlacesError> {
        self.autocomplete("place_autocomplete", PLACE_AUTOCOMPLETE_URL, input, options)
            .await
    }

    /// Query autocomplete
    /// DOCUMENTATION: Predictions for a partially typed free-text query
    pub async fn query_autocomplete(
        &self,
        input: &str,
        options: &AutocompleteOptions,
    ) -> Result<Vec<Prediction>, PlacesError> {
        self.autocomplete("query_autocomplete", QUERY_AUTOCOMPLETE_URL, input, options)
            .await
    }

    /// Shared path of the three searches
    /// DOCUMENTATION: The page token is cached with the results so a cache hit
    /// restores it too
    async fn search(
        &self,
        key: String,
        endpoint: &str,
        params: QueryParams,
    ) -> Result<Vec<PlacePreview>, PlacesError> {
        let (places, token) = self
            .remember(key, move || async move {
                let mut response: GoogleSearchResponse = self.make_request(endpoint, params).await?;
                let token = response.next_page_token.take();
                Ok((convert_places_collection(response), token))
            })
            .await?;

        *self
            .next_page_token
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = token;
        Ok(places)
    }

    async fn autocomplete(
        &self,
        operation: &str,
        endpoint: &str,
        input: &str,
        options: &AutocompleteOptions,
    ) -> Result<Vec<Prediction>, PlacesError> {
        self.check_key()?;
        let params = prepare_autocomplete_params(input, options)?;
        let key = cache_key(operation, &(input, options))?;

        log::debug!("Google Places {}: input={}", operation, input);

        self.remember(key, move || async move {
            let response: GoogleAutocompleteResponse = self.make_request(endpoint, params).await?;
            Ok(convert_predictions(response))
        })
        .await
    }

    /// Get photo URL from photo reference
    /// DOCUMENTATION: Builds (does not fetch) the photo endpoint URL
    ///
    /// # Arguments
    /// * `photo_reference` - Photo reference from Google Places API
    /// * `max_width` / `max_height` - Size bounds in pixels, at least one required
    ///
    /// # Returns
    /// Photo URL that can be used directly in img tags
    pub fn photo_url(
        &self,
        photo_reference: &str,
        max_width: Option<u32>,
        max_height: Option<u32>,
    ) -> Result<String, PlacesError> {
        self.check_key()?;

        if max_width.is_none() && max_height.is_none() {
            return Err(PlacesError::ValidationError(
                "Photo requests require 'maxwidth' or 'maxheight'.".to_string(),
            ));
        }

        let mut params = vec![("photo_reference", photo_reference.to_string())];
        if let Some(width) = max_width {
            params.push(("maxwidth", width.to_string()));
        }
        if let Some(height) = max_height {
            params.push(("maxheight", height.to_string()));
        }
        params.push(("key", self.config.api_key.clone()));

        let url = reqwest::Url::parse_with_params(&self.endpoint_url(PHOTO_DETAILS_URL), &params)
            .map_err(|e| PlacesError::ConfigurationError(format!("Invalid base URL: {}", e)))?;

        Ok(url.to_string())
    }

    fn check_key(&self) -> Result<(), PlacesError> {
        if self.config.api_key.is_empty() {
            return Err(PlacesError::ConfigurationError(
                "API KEY is not specified.".to_string(),
            ));
        }
        Ok(())
    }

    fn set_status(&self, status: &str) {
        *self.status.lock().unwrap_or_else(PoisonError::into_inner) = Some(status.to_string());
    }

    fn endpoint_url(&self, endpoint: &str) -> String {
        format!("{}/{}", self.config.base_url.trim_end_matches('/'), endpoint)
    }

    /// Return the cached result for `key`, or run `producer` and cache what it returns
    async fn remember<T, F, Fut>(&self, key: String, producer: F) -> Result<T, PlacesError>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, PlacesError>>,
    {
        let ttl = self.config.cache_ttl();
        let cache = match &self.cache {
            Some(cache) if !ttl.is_zero() => cache,
            _ => return producer().await,
        };

        if let Some(cached) = cache.get(&key).await {
            match serde_json::from_str(&cached) {
                Ok(value) => return Ok(value),
                Err(e) => log::warn!("Discarding unreadable cache entry {}: {}", key, e),
            }
        }

        let value = producer().await?;
        cache
            .set_with_ttl(key, serde_json::to_string(&value)?, ttl)
            .await;
        Ok(value)
    }

    /// Shared request path
    /// DOCUMENTATION: GET the endpoint with the key prepended, record the status,
    /// and fail unless it is OK
    async fn make_request<R: DeserializeOwned>(
        &self,
        endpoint: &str,
        params: QueryParams,
    ) -> Result<R, PlacesError> {
        let url = self.endpoint_url(endpoint);
        let mut query: QueryParams = Vec::with_capacity(params.len() + 1);
        query.push(("key".to_string(), self.config.api_key.clone()));
        query.extend(params);

        let body = self.transport.get(&url, &query).await?;

        let response: Value = serde_json::from_str(&body).map_err(|e| {
            log::error!("Failed to parse Google Places response: {}", e);
            PlacesError::from(e)
        })?;

        let status = response
            .get("status")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        self.set_status(&status);

        if status != "OK" {
            let message = response
                .get("error_message")
                .and_then(Value::as_str)
                .map(str::to_string);
            log::error!(
                "Google Places API {} returned status {}: {}",
                endpoint,
                status,
                message.as_deref().unwrap_or("no error message")
            );
            return Err(PlacesError::ApiError { status, message });
        }

        Ok(serde_json::from_value(response)?)
    }

    /// Convert a details result into a full Place
    /// DOCUMENTATION: `weekday` counts from Monday = 0 and selects today's
    /// line of weekday_text for open_now_hours
    fn convert_details(&self, result: GooglePlace, weekday: usize) -> Result<Place, PlacesError> {
        let mut place = Place {
            id: result.place_id.unwrap_or_default(),
            name: result.name.unwrap_or_default(),
            address: result.formatted_address.unwrap_or_default(),
            description: result.review_summary.unwrap_or_default(),
            phone: result.formatted_phone_number.unwrap_or_default(),
            website: result.website.unwrap_or_default(),
            google_url: result.url.unwrap_or_default(),
            price_level: result.price_level.unwrap_or_default(),
            rating: result.rating.unwrap_or_default(),
            ratings_count: result.user_ratings_total.unwrap_or_default(),
            address_components: result.address_components.unwrap_or_default(),
            geometry: result.geometry.unwrap_or_default(),
            icon: result.icon.unwrap_or_default(),
            ..Place::default()
        };

        if let Some(hours) = result.opening_hours {
            place.open_now = hours.open_now.unwrap_or(false);
            place.opening_hours = hours.weekday_text.unwrap_or_default();
            place.open_now_hours = hours_for_day(&place.opening_hours, weekday);
        }

        let thumbnail = (
            self.config.image_thumbnail_width,
            self.config.image_thumbnail_height,
        );
        let big = (self.config.image_big_width, self.config.image_big_height);

        for info in result.photos.unwrap_or_default() {
            let reference = info.photo_reference.unwrap_or_default();
            place.photos.push(Photo {
                max_height: info.height.unwrap_or_default(),
                max_width: info.width.unwrap_or_default(),
                thumbnail_url: self.photo_url(&reference, Some(thumbnail.0), Some(thumbnail.1))?,
                big_url: self.photo_url(&reference, Some(big.0), Some(big.1))?,
                id: reference,
            });
        }

        place.reviews = result
            .reviews
            .unwrap_or_default()
            .into_iter()
            .map(convert_review)
            .collect();

        log::info!(
            "Google Places details for {}: {} photos, {} reviews",
            place.id,
            place.photos.len(),
            place.reviews.len()
        );

        Ok(place)
    }
}

/// Map search results to previews, preserving order
fn convert_places_collection(response: GoogleSearchResponse) -> Vec<PlacePreview> {
    let results = response.results.unwrap_or_default();
    log::info!("Google Places search returned {} results", results.len());

    results
        .into_iter()
        .map(|item| {
            let mut place = PlacePreview {
                id: item.place_id.unwrap_or_default(),
                name: item.name.unwrap_or_default(),
                price_level: item.price_level.unwrap_or_default(),
                rating: item.rating.unwrap_or_default(),
                // Prefer formatted_address over vicinity (more detailed)
                address: item.formatted_address.or(item.vicinity).unwrap_or_default(),
                ..PlacePreview::default()
            };

            if let Some(geometry) = item.geometry {
                place.lat = geometry.location.lat;
                place.lng = geometry.location.lng;
            }

            if let Some(hours) = item.opening_hours {
                place.open_now = hours.open_now.unwrap_or(false);
            }

            place
        })
        .collect()
}

fn convert_predictions(response: GoogleAutocompleteResponse) -> Vec<Prediction> {
    response
        .predictions
        .unwrap_or_default()
        .into_iter()
        .map(|item| Prediction {
            id: item.id.unwrap_or_default(),
            description: item.description.unwrap_or_default(),
            place_id: item.place_id.unwrap_or_default(),
        })
        .collect()
}

fn convert_review(info: GoogleReview) -> Review {
    let time = Utc
        .timestamp_opt(info.time.unwrap_or_default(), 0)
        .single()
        .unwrap_or_default();

    Review {
        id: String::new(),
        author_name: info.author_name.unwrap_or_default(),
        profile_photo_url: info.profile_photo_url.unwrap_or_default(),
        text: info.text.unwrap_or_default(),
        time,
        rating: info.rating.unwrap_or_default(),
        aspects: info.aspects.unwrap_or_default(),
        language: info.language.unwrap_or_default(),
    }
}

/// Hours for one day with the "Monday: " label dropped; empty when the
/// line is missing or has no label
fn hours_for_day(weekday_text: &[String], day: usize) -> String {
    weekday_text
        .get(day)
        .and_then(|line| line.split_once(": "))
        .map(|(_, hours)| hours.to_string())
        .unwrap_or_default()
}
