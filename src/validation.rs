//! Schema checks for incoming movie payloads.
//!
//! Both modes walk the recognized fields in a fixed order and stop at the
//! first violation. Keys outside the schema are ignored.

use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};
use serde_json::{Map, Value};
use thiserror::Error;

use crate::{
    entities::movie::MovieType,
    models::{MoviePatch, NewMovie},
};

/// Largest value a DECIMAL(15, 2) column holds.
fn max_budget() -> Decimal {
    Decimal::new(999_999_999_999_999, 2)
}

#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum ValidationError {
    #[error("\"value\" must be of type object")]
    NotAnObject,
    #[error("\"{0}\" is required")]
    Required(&'static str),
    #[error("\"{0}\" must be a string")]
    NotAString(&'static str),
    #[error("\"{0}\" is not allowed to be empty")]
    Empty(&'static str),
    #[error("\"{field}\" length must be less than or equal to {max} characters long")]
    TooLong { field: &'static str, max: usize },
    #[error("\"type\" must be one of [TV Shows, Movies]")]
    InvalidType,
    #[error("\"budget\" does not match any of the allowed types")]
    InvalidBudget,
    #[error("\"value\" must have at least 1 key")]
    NoFields,
    #[error("invalid JSON body: {0}")]
    Malformed(String),
}

/// Budget as accepted by the schema, before numeric coercion.
#[derive(Clone, Debug, PartialEq)]
pub enum BudgetInput {
    Number(serde_json::Number),
    Text(String),
}

struct RawFields {
    title: Option<String>,
    kind: Option<MovieType>,
    director: Option<String>,
    budget: Option<BudgetInput>,
    location: Option<String>,
    duration: Option<String>,
    year: Option<String>,
}

pub fn validate_create(input: &Value) -> Result<NewMovie, ValidationError> {
    let fields = read_fields(as_object(input)?, true)?;

    Ok(NewMovie {
        title: fields.title.ok_or(ValidationError::Required("title"))?,
        kind: fields.kind.ok_or(ValidationError::Required("type"))?,
        director: fields.director.ok_or(ValidationError::Required("director"))?,
        budget: fields
            .budget
            .as_ref()
            .map(coerce_budget)
            .ok_or(ValidationError::Required("budget"))?,
        location: fields.location.ok_or(ValidationError::Required("location"))?,
        duration: fields.duration.ok_or(ValidationError::Required("duration"))?,
        year: fields.year.ok_or(ValidationError::Required("year"))?,
    })
}

pub fn validate_update(input: &Value) -> Result<MoviePatch, ValidationError> {
    let fields = read_fields(as_object(input)?, false)?;

    let patch = MoviePatch {
        title: fields.title,
        kind: fields.kind,
        director: fields.director,
        budget: fields.budget.as_ref().map(coerce_budget),
        location: fields.location,
        duration: fields.duration,
        year: fields.year,
    };

    if patch.is_empty() {
        return Err(ValidationError::NoFields);
    }
    Ok(patch)
}

/// Turns an accepted budget into its stored form. Anything that is not a
/// finite, non-negative amount that fits the column becomes zero.
pub fn coerce_budget(raw: &BudgetInput) -> Decimal {
    let parsed = match raw {
        BudgetInput::Number(n) => parse_amount(&n.to_string()),
        BudgetInput::Text(s) => parse_amount(s),
    };

    match parsed.map(|v| v.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)) {
        Some(mut v) if !v.is_sign_negative() && v <= max_budget() => {
            v.rescale(2);
            v
        }
        _ => Decimal::new(0, 2),
    }
}

fn parse_amount(text: &str) -> Option<Decimal> {
    let text = text.trim();
    if text.is_empty() {
        return Some(Decimal::ZERO);
    }
    // Digit separators are not part of a plain numeric literal.
    if text.contains('_') {
        return None;
    }
    Decimal::from_str(text).or_else(|_| Decimal::from_scientific(text)).ok()
}

fn as_object(input: &Value) -> Result<&Map<String, Value>, ValidationError> {
    input.as_object().ok_or(ValidationError::NotAnObject)
}

fn read_fields(obj: &Map<String, Value>, required: bool) -> Result<RawFields, ValidationError> {
    Ok(RawFields {
        title: text(obj, "title", 255, required)?,
        kind: movie_type(obj, required)?,
        director: text(obj, "director", 255, required)?,
        budget: budget(obj, required)?,
        location: text(obj, "location", 255, required)?,
        duration: text(obj, "duration", 100, required)?,
        year: text(obj, "year", 50, required)?,
    })
}

fn present<'a>(
    obj: &'a Map<String, Value>,
    field: &'static str,
    required: bool,
) -> Result<Option<&'a Value>, ValidationError> {
    match obj.get(field) {
        Some(value) => Ok(Some(value)),
        None if required => Err(ValidationError::Required(field)),
        None => Ok(None),
    }
}

fn text(
    obj: &Map<String, Value>,
    field: &'static str,
    max: usize,
    required: bool,
) -> Result<Option<String>, ValidationError> {
    let Some(value) = present(obj, field, required)? else {
        return Ok(None);
    };
    let s = value.as_str().ok_or(ValidationError::NotAString(field))?;
    if s.is_empty() {
        return Err(ValidationError::Empty(field));
    }
    if s.chars().count() > max {
        return Err(ValidationError::TooLong { field, max });
    }
    Ok(Some(s.to_string()))
}

fn movie_type(
    obj: &Map<String, Value>,
    required: bool,
) -> Result<Option<MovieType>, ValidationError> {
    let Some(value) = present(obj, "type", required)? else {
        return Ok(None);
    };
    value
        .as_str()
        .and_then(MovieType::from_label)
        .map(Some)
        .ok_or(ValidationError::InvalidType)
}

fn budget(obj: &Map<String, Value>, required: bool) -> Result<Option<BudgetInput>, ValidationError> {
    let Some(value) = present(obj, "budget", required)? else {
        return Ok(None);
    };
    match value {
        Value::Number(n) => Ok(Some(BudgetInput::Number(n.clone()))),
        Value::String(s) if !s.is_empty() => Ok(Some(BudgetInput::Text(s.clone()))),
        _ => Err(ValidationError::InvalidBudget),
    }
}
