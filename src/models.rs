use jiff::Timestamp;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::entities::movie::{self, MovieType};

/// A catalog record as rendered in API responses.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Movie {
    pub id: u32,
    pub title: String,
    #[serde(rename = "type")]
    pub kind: MovieType,
    pub director: String,
    pub budget: Decimal,
    pub location: String,
    pub duration: String,
    pub year: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl TryFrom<movie::Model> for Movie {
    type Error = jiff::Error;

    fn try_from(model: movie::Model) -> Result<Self, Self::Error> {
        let mut budget = model.budget.round_dp(2);
        budget.rescale(2);

        Ok(Self {
            id: model.id,
            title: model.title,
            kind: model.kind,
            director: model.director,
            budget,
            location: model.location,
            duration: model.duration,
            year: model.year,
            created_at: Timestamp::from_millisecond(model.created_at)?,
            updated_at: Timestamp::from_millisecond(model.updated_at)?,
        })
    }
}

/// Fully validated input for a new record.
#[derive(Clone, Debug, PartialEq)]
pub struct NewMovie {
    pub title: String,
    pub kind: MovieType,
    pub director: String,
    pub budget: Decimal,
    pub location: String,
    pub duration: String,
    pub year: String,
}

/// Validated partial update. `None` leaves the stored value untouched.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MoviePatch {
    pub title: Option<String>,
    pub kind: Option<MovieType>,
    pub director: Option<String>,
    pub budget: Option<Decimal>,
    pub location: Option<String>,
    pub duration: Option<String>,
    pub year: Option<String>,
}

impl MoviePatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.kind.is_none()
            && self.director.is_none()
            && self.budget.is_none()
            && self.location.is_none()
            && self.duration.is_none()
            && self.year.is_none()
    }
}

/// Raw `page`/`limit` query parameters, kept as text so that junk values
/// clamp instead of rejecting the request.
#[derive(Debug, Default)]
pub struct ListQuery {
    pub page: Option<String>,
    pub limit: Option<String>,
}

impl ListQuery {
    /// First occurrence of each parameter wins; anything else is ignored.
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let mut query = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "page" => &mut query.page,
                "limit" => &mut query.limit,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value);
            }
        }
        query
    }
}

pub const DEFAULT_PAGE: u64 = 1;
pub const DEFAULT_LIMIT: u64 = 10;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Pagination {
    pub page: u64,
    pub limit: u64,
}

impl Pagination {
    pub fn from_query(query: &ListQuery, max_limit: u64) -> Self {
        let page = clamp_param(query.page.as_deref(), DEFAULT_PAGE);
        let limit = clamp_param(query.limit.as_deref(), DEFAULT_LIMIT).min(max_limit.max(1));
        Self { page, limit }
    }

    /// Row offset of the window, or `None` when it does not fit a signed
    /// 64-bit SQL offset.
    pub fn offset(self) -> Option<u64> {
        (self.page - 1).checked_mul(self.limit).filter(|offset| *offset <= i64::MAX as u64)
    }

    pub fn total_pages(self, total: u64) -> u64 {
        total.div_ceil(self.limit)
    }
}

fn clamp_param(raw: Option<&str>, default: u64) -> u64 {
    let Some(raw) = raw else {
        return default;
    };
    match raw.trim().parse::<i64>() {
        Ok(n) if n > 0 => n as u64,
        _ => 1,
    }
}

/// Success envelope for single-record and message-only responses.
#[derive(Debug, Serialize)]
pub struct Envelope<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl Envelope<()> {
    pub fn message(message: &'static str) -> Self {
        Self { success: true, message: Some(message), data: None }
    }
}

impl<T> Envelope<T> {
    pub fn with_data(message: &'static str, data: T) -> Self {
        Self { success: true, message: Some(message), data: Some(data) }
    }
}

/// Success envelope for the list endpoint.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub success: bool,
    pub page: u64,
    pub limit: u64,
    pub total: u64,
    pub total_pages: u64,
    pub data: Vec<T>,
}

impl<T> Page<T> {
    pub fn new(pagination: Pagination, total: u64, data: Vec<T>) -> Self {
        Self {
            success: true,
            page: pagination.page,
            limit: pagination.limit,
            total,
            total_pages: pagination.total_pages(total),
            data,
        }
    }
}
