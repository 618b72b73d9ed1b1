use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use crate::{
    entities::movie,
    error::ValidationError,
    query::{Direction, MovieQuery},
};

pub const DEFAULT_PAGE: u64 = 1;
pub const DEFAULT_PAGE_SIZE: u64 = 10;

/// Body of create and update requests. Update replaces all three fields.
#[derive(Clone, Debug, Deserialize)]
pub struct MovieInput {
    pub name: String,
    pub duration: String,
    pub rating: f64,
}

impl MovieInput {
    pub fn validate(&self) -> Result<(), ValidationError> {
        movie::validate_name(&self.name)?;
        movie::validate_duration(&self.duration)?;
        movie::validate_rating(self.rating)?;
        Ok(())
    }
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MovieDto {
    pub id: i32,
    pub name: String,
    pub duration: String,
    pub rating: f64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<movie::Model> for MovieDto {
    fn from(m: movie::Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
            duration: m.duration,
            rating: m.rating,
            created_at: Timestamp::from_millisecond(m.created_at).unwrap_or_default(),
            updated_at: Timestamp::from_millisecond(m.updated_at).unwrap_or_default(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct Ack {
    pub success: bool,
    pub message: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub movie: Option<MovieDto>,
}

impl Ack {
    pub fn new(message: &'static str) -> Self {
        Self { success: true, message, movie: None }
    }

    pub fn with_movie(mut self, movie: MovieDto) -> Self {
        self.movie = Some(movie);
        self
    }
}

#[derive(Debug, Serialize)]
pub struct MovieResponse {
    pub success: bool,
    pub movie: MovieDto,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListResponse {
    pub movies: Vec<MovieDto>,
    pub total_movies: u64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginatedResponse {
    pub movies: Vec<MovieDto>,
    pub page: u64,
    pub limit: u64,
    pub total_count: u64,
    pub total_pages: u64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginatedEnvelope {
    pub success: bool,
    pub paginated_response: PaginatedResponse,
}

/// A page of rows plus the number of rows matching the filters.
#[derive(Debug)]
pub struct Page {
    pub movies: Vec<movie::Model>,
    pub total: u64,
}

impl Page {
    pub fn into_paginated(self, query: &MovieQuery) -> PaginatedEnvelope {
        PaginatedEnvelope {
            success: true,
            paginated_response: PaginatedResponse {
                movies: self.movies.into_iter().map(MovieDto::from).collect(),
                page: query.page(),
                limit: query.per_page(),
                total_count: self.total,
                total_pages: self.total.div_ceil(query.per_page()),
            },
        }
    }
}

/// Query string of `GET /`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListParams {
    pub page: Option<String>,
    pub per_page: Option<String>,
    pub filter_by_name: Option<String>,
    pub sort_by: Option<String>,
}

/// Query string of `GET /search`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchParams {
    pub page: Option<String>,
    pub limit: Option<String>,
    pub search: Option<String>,
    pub rating_sort: Option<String>,
    pub rating_filter: Option<String>,
}

/// Query string of `GET /all`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AllParams {
    pub page: Option<String>,
    pub limit: Option<String>,
    pub rating_sort: Option<String>,
    pub rating_filter: Option<String>,
}

/// Sort requested through `sortBy` on the default listing.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ListSort {
    Name,
    Rating,
}

impl ListSort {
    pub fn from_param(raw: Option<&str>) -> Self {
        match raw {
            Some("rating") => ListSort::Rating,
            _ => ListSort::Name,
        }
    }
}

/// Positive integer with a fallback: missing, empty, unparsable, zero and
/// negative values all yield `default`.
pub fn parse_count(raw: Option<&str>, default: u64) -> u64 {
    raw.and_then(|s| s.trim().parse::<u64>().ok())
        .filter(|n| *n > 0)
        .unwrap_or(default)
}

/// Empty strings count as absent.
pub fn non_empty(raw: Option<&str>) -> Option<&str> {
    raw.map(str::trim).filter(|s| !s.is_empty())
}

pub fn parse_direction(raw: Option<&str>) -> Result<Option<Direction>, ValidationError> {
    let Some(raw) = non_empty(raw) else {
        return Ok(None);
    };
    Direction::parse(raw).map(Some).ok_or_else(|| ValidationError::InvalidQuery {
        param: "ratingSort",
        value: raw.to_string(),
    })
}

pub fn parse_rating_filter(raw: Option<&str>) -> Result<Option<f64>, ValidationError> {
    let Some(raw) = non_empty(raw) else {
        return Ok(None);
    };
    match raw.parse::<f64>() {
        Ok(r) if r.is_finite() => Ok(Some(r)),
        _ => Err(ValidationError::InvalidQuery { param: "ratingFilter", value: raw.to_string() }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_count_falls_back_to_default() {
        assert_eq!(parse_count(None, 10), 10);
        assert_eq!(parse_count(Some(""), 10), 10);
        assert_eq!(parse_count(Some("abc"), 10), 10);
        assert_eq!(parse_count(Some("0"), 10), 10);
        assert_eq!(parse_count(Some("-3"), 1), 1);
        assert_eq!(parse_count(Some(" 4 "), 1), 4);
        assert_eq!(parse_count(Some("25"), 10), 25);
    }

    #[test]
    fn direction_is_case_insensitive() {
        assert_eq!(parse_direction(Some("ASC")).unwrap(), Some(Direction::Asc));
        assert_eq!(parse_direction(Some("desc")).unwrap(), Some(Direction::Desc));
        assert_eq!(parse_direction(Some("")).unwrap(), None);
        assert_eq!(parse_direction(None).unwrap(), None);
        assert!(matches!(
            parse_direction(Some("sideways")),
            Err(ValidationError::InvalidQuery { param: "ratingSort", .. })
        ));
    }

    #[test]
    fn rating_filter_parses_floats() {
        assert_eq!(parse_rating_filter(Some("8")).unwrap(), Some(8.0));
        assert_eq!(parse_rating_filter(Some("7.5")).unwrap(), Some(7.5));
        assert_eq!(parse_rating_filter(None).unwrap(), None);
        assert!(parse_rating_filter(Some("eight")).is_err());
        assert!(parse_rating_filter(Some("NaN")).is_err());
    }

    #[test]
    fn sort_by_only_recognises_rating() {
        assert_eq!(ListSort::from_param(Some("rating")), ListSort::Rating);
        assert_eq!(ListSort::from_param(Some("name")), ListSort::Name);
        assert_eq!(ListSort::from_param(Some("duration")), ListSort::Name);
        assert_eq!(ListSort::from_param(None), ListSort::Name);
    }

    #[test]
    fn input_validation_checks_every_field() {
        let ok = MovieInput { name: "Alpha".into(), duration: "90m".into(), rating: 7.5 };
        assert!(ok.validate().is_ok());

        let bad_rating = MovieInput { rating: 11.0, ..ok.clone() };
        assert!(matches!(bad_rating.validate(), Err(ValidationError::RatingOutOfRange)));

        let bad_duration = MovieInput { duration: "90".into(), ..ok.clone() };
        assert!(matches!(bad_duration.validate(), Err(ValidationError::InvalidDuration)));

        let bad_name = MovieInput { name: "A".into(), ..ok };
        assert!(matches!(bad_name.validate(), Err(ValidationError::NameLength)));
    }

    #[test]
    fn dto_serializes_camel_case_timestamps() {
        let dto = MovieDto::from(movie::Model {
            id: 1,
            name: "Alpha".into(),
            duration: "90m".into(),
            rating: 7.5,
            created_at: 0,
            updated_at: 1_000,
        });
        let json = serde_json::to_value(&dto).unwrap();
        assert_eq!(json["createdAt"], "1970-01-01T00:00:00Z");
        assert_eq!(json["updatedAt"], "1970-01-01T00:00:01Z");
        assert_eq!(json["rating"], 7.5);
    }
}
