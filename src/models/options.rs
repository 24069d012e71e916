// src/models/options.rs
// DOCUMENTATION: Request option structures for each Places operation
// PURPOSE: Typed replacement for free-form query parameter bags

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use validator::Validate;

/// Query string pairs in the order they are sent
pub type QueryParams = Vec<(String, String)>;

/// Search centre or bias point
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Validate)]
pub struct Location {
    #[validate(range(min = -90.0, max = 90.0))]
    pub lat: f64,
    #[validate(range(min = -180.0, max = 180.0))]
    pub lng: f64,
}

impl Location {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// Rendered the way the API expects: "lat,lng"
impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.lat, self.lng)
    }
}

/// Parses "lat,lng"
impl FromStr for Location {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (lat, lng) = s
            .split_once(',')
            .ok_or_else(|| format!("expected \"lat,lng\", got {:?}", s))?;
        let parse = |v: &str| {
            v.trim()
                .parse::<f64>()
                .map_err(|e| format!("invalid coordinate {:?}: {}", v, e))
        };
        Ok(Location::new(parse(lat)?, parse(lng)?))
    }
}

/// Result ordering for nearby search
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RankBy {
    Prominence,
    Distance,
}

impl RankBy {
    pub fn as_str(&self) -> &'static str {
        match self {
            RankBy::Prominence => "prominence",
            RankBy::Distance => "distance",
        }
    }
}

/// Options shared by nearby, text and radar search
/// DOCUMENTATION: Each set field becomes one query parameter.
/// `extra` carries parameters without a dedicated field and is sent as-is;
/// keys owned by the client or a typed field are rejected.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct SearchOptions {
    /// Term matched against all content Google has indexed for a place
    pub keyword: Option<String>,
    /// Term matched against place names
    pub name: Option<String>,
    /// Place types, sent pipe-separated
    pub types: Vec<String>,
    pub language: Option<String>,
    /// Price bounds (0-4)
    #[validate(range(max = 4))]
    pub minprice: Option<u8>,
    #[validate(range(max = 4))]
    pub maxprice: Option<u8>,
    /// Only return places open right now
    pub opennow: bool,
    pub rankby: Option<RankBy>,
    /// Token from a previous response's next_page_token
    pub pagetoken: Option<String>,
    /// ccTLD region bias
    pub region: Option<String>,
    pub extra: BTreeMap<String, String>,
}

impl SearchOptions {
    pub fn keyword(mut self, keyword: impl Into<String>) -> Self {
        self.keyword = Some(keyword.into());
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn types<I, S>(mut self, types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.types = types.into_iter().map(Into::into).collect();
        self
    }

    pub fn rankby(mut self, rankby: RankBy) -> Self {
        self.rankby = Some(rankby);
        self
    }

    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    pub fn extra(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    /// Whether keyword, name or types narrows the search
    pub fn has_discriminator(&self) -> bool {
        let set = |v: &Option<String>| v.as_deref().map_or(false, |s| !s.is_empty());
        set(&self.keyword) || set(&self.name) || !self.types.is_empty()
    }

    pub fn ranks_by_distance(&self) -> bool {
        self.rankby == Some(RankBy::Distance)
    }

    /// Append every set option to the query
    pub fn append_to(&self, params: &mut QueryParams) {
        push_opt(params, "keyword", &self.keyword);
        push_opt(params, "name", &self.name);
        push_list(params, "types", &self.types, "|");
        push_opt(params, "language", &self.language);
        push_opt(params, "minprice", &self.minprice);
        push_opt(params, "maxprice", &self.maxprice);
        if self.opennow {
            params.push(("opennow".to_string(), "true".to_string()));
        }
        push_opt(params, "rankby", &self.rankby.map(|r| r.as_str()));
        push_opt(params, "pagetoken", &self.pagetoken);
        push_opt(params, "region", &self.region);
        push_extra(params, &self.extra);
    }
}

/// Options for a place details lookup
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct DetailsOptions {
    pub language: Option<String>,
    pub region: Option<String>,
    /// Fields to return, sent comma-separated (empty = all)
    pub fields: Vec<String>,
    /// Autocomplete session this lookup closes
    pub sessiontoken: Option<String>,
    pub extra: BTreeMap<String, String>,
}

impl DetailsOptions {
    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    pub fn fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fields = fields.into_iter().map(Into::into).collect();
        self
    }

    pub fn append_to(&self, params: &mut QueryParams) {
        push_opt(params, "language", &self.language);
        push_opt(params, "region", &self.region);
        push_list(params, "fields", &self.fields, ",");
        push_opt(params, "sessiontoken", &self.sessiontoken);
        push_extra(params, &self.extra);
    }
}

/// Options for place and query autocomplete
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct AutocompleteOptions {
    /// Character position in the input where the service stops matching
    pub offset: Option<u32>,
    pub location: Option<Location>,
    #[validate(range(min = 1, max = 50000))]
    pub radius: Option<u32>,
    pub language: Option<String>,
    /// Type collection filter, e.g. "geocode" or "establishment"
    pub types: Option<String>,
    /// Country restrictions such as "country:fr", sent pipe-separated
    pub components: Vec<String>,
    /// Only return results inside location/radius
    pub strictbounds: bool,
    pub sessiontoken: Option<String>,
    pub extra: BTreeMap<String, String>,
}

impl AutocompleteOptions {
    pub fn location(mut self, location: Location, radius: u32) -> Self {
        self.location = Some(location);
        self.radius = Some(radius);
        self
    }

    pub fn types(mut self, types: impl Into<String>) -> Self {
        self.types = Some(types.into());
        self
    }

    pub fn components<I, S>(mut self, components: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.components = components.into_iter().map(Into::into).collect();
        self
    }

    pub fn sessiontoken(mut self, token: impl Into<String>) -> Self {
        self.sessiontoken = Some(token.into());
        self
    }

    pub fn append_to(&self, params: &mut QueryParams) {
        push_opt(params, "offset", &self.offset);
        push_opt(params, "location", &self.location);
        push_opt(params, "radius", &self.radius);
        push_opt(params, "language", &self.language);
        push_opt(params, "types", &self.types);
        push_list(params, "components", &self.components, "|");
        if self.strictbounds {
            params.push(("strictbounds".to_string(), "true".to_string()));
        }
        push_opt(params, "sessiontoken", &self.sessiontoken);
        push_extra(params, &self.extra);
    }
}

fn push_opt<T: fmt::Display>(params: &mut QueryParams, key: &str, value: &Option<T>) {
    if let Some(v) = value {
        params.push((key.to_string(), v.to_string()));
    }
}

fn push_list(params: &mut QueryParams, key: &str, values: &[String], separator: &str) {
    if !values.is_empty() {
        params.push((key.to_string(), values.join(separator)));
    }
}

fn push_extra(params: &mut QueryParams, extra: &BTreeMap<String, String>) {
    params.extend(extra.iter().map(|(k, v)| (k.clone(), v.clone())));
}
