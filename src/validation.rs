//! Payload validation.
//!
//! Runs before any policy check, so a malformed request is rejected as a
//! [`ValidationError`] even when the caller would also have been forbidden.
//! The actors run the same checks again on create and update.

use crate::model::{LocationCreate, LocationUpdate, PropertyCreate, PropertyUpdate, ReviewCreate, ReviewUpdate};
use std::ops::RangeInclusive;
use thiserror::Error;

pub const MAX_TITLE_CHARS: usize = 100;
pub const MAX_COMMENT_CHARS: usize = 1000;
pub const RATING_RANGE: RangeInclusive<u8> = 1..=5;

/// A field-level validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid {field}: {message}")]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

type Checked = Result<(), ValidationError>;

fn check_title(title: &str) -> Checked {
    if title.trim().is_empty() {
        return Err(ValidationError::new("title", "cannot be empty"));
    }
    if title.chars().count() > MAX_TITLE_CHARS {
        return Err(ValidationError::new(
            "title",
            format!("cannot exceed {MAX_TITLE_CHARS} characters"),
        ));
    }
    Ok(())
}

fn check_price(price: f64) -> Checked {
    // NaN fails the comparison as well
    if !(price.is_finite() && price > 0.0) {
        return Err(ValidationError::new("price", "must be greater than zero"));
    }
    Ok(())
}

fn check_not_blank(field: &'static str, value: &str) -> Checked {
    if value.trim().is_empty() {
        return Err(ValidationError::new(field, "cannot be empty"));
    }
    Ok(())
}

fn check_rating(rating: u8) -> Checked {
    if !RATING_RANGE.contains(&rating) {
        return Err(ValidationError::new("rating", "must be between 1 and 5"));
    }
    Ok(())
}

fn check_comment(comment: Option<&str>) -> Checked {
    match comment {
        Some(text) if text.chars().count() > MAX_COMMENT_CHARS => Err(ValidationError::new(
            "comment",
            format!("cannot exceed {MAX_COMMENT_CHARS} characters"),
        )),
        _ => Ok(()),
    }
}

fn check_coordinate(field: &'static str, value: Option<f64>, bound: f64) -> Checked {
    match value {
        Some(v) if !(v.is_finite() && (-bound..=bound).contains(&v)) => Err(ValidationError::new(
            field,
            format!("must be within [-{bound}, {bound}]"),
        )),
        _ => Ok(()),
    }
}

pub fn validate_property(params: &PropertyCreate) -> Checked {
    check_title(&params.title)?;
    check_price(params.price)?;
    check_not_blank("location", &params.location)
}

/// Only the fields present in the update are checked.
pub fn validate_property_update(update: &PropertyUpdate) -> Checked {
    if let Some(title) = &update.title {
        check_title(title)?;
    }
    if let Some(price) = update.price {
        check_price(price)?;
    }
    if let Some(location) = &update.location {
        check_not_blank("location", location)?;
    }
    Ok(())
}

pub fn validate_review(params: &ReviewCreate) -> Checked {
    if params.property_id.0 == 0 {
        return Err(ValidationError::new("property_id", "must reference a property"));
    }
    check_rating(params.rating)?;
    check_comment(params.comment.as_deref())
}

pub fn validate_review_update(update: &ReviewUpdate) -> Checked {
    if let Some(rating) = update.rating {
        check_rating(rating)?;
    }
    check_comment(update.comment.as_deref())
}

pub fn validate_location(params: &LocationCreate) -> Checked {
    check_not_blank("name", &params.name)?;
    check_coordinate("latitude", params.latitude, 90.0)?;
    check_coordinate("longitude", params.longitude, 180.0)
}

pub fn validate_location_update(update: &LocationUpdate) -> Checked {
    if let Some(name) = &update.name {
        check_not_blank("name", name)?;
    }
    check_coordinate("latitude", update.latitude, 90.0)?;
    check_coordinate("longitude", update.longitude, 180.0)
}
