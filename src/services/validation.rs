//! Form validation for staff entries and profiles.
//!
//! Validation is pure and fail-fast: the first violated rule wins, nothing
//! is mutated on failure, and each error's `Display` is the operator-facing
//! message.

use std::fmt;

use thiserror::Error;

use crate::api::{StaffEntry, StaffStatus, TeaSlot};
use crate::services::timegrid::{parse_time, MAX_END_HOUR, MIN_START_HOUR};

/// The editable input fields of the form, exactly as the operator typed
/// them. Time fields hold raw `HH:MM` text and the tea slot holds the
/// minutes token.
#[derive(Debug, Clone, PartialEq)]
pub struct FormFields {
    pub name: String,
    pub role: crate::api::Role,
    pub status: StaffStatus,
    pub status_detail: String,
    pub start_hour: String,
    pub end_hour: String,
    pub tea_slot: String,
}

impl Default for FormFields {
    fn default() -> Self {
        Self {
            name: String::new(),
            role: crate::api::Role::DutyManager,
            status: StaffStatus::Available,
            status_detail: String::new(),
            start_hour: String::new(),
            end_hour: String::new(),
            tea_slot: String::new(),
        }
    }
}

/// Which time field a validation error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeField {
    Start,
    End,
}

impl fmt::Display for TimeField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimeField::Start => f.write_str("Start"),
            TimeField::End => f.write_str("End"),
        }
    }
}

/// A violated validation rule; `Display` is the message shown as-is.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Name is required.")]
    MissingName,

    #[error("{0} time must be HH:MM using 00/15/30/45 minutes.")]
    InvalidTimeFormat(TimeField),

    #[error("{0} time must be between 11:30 and 16:15.")]
    TimeOutOfRange(TimeField),

    #[error("End hour must be after start hour.")]
    EndNotAfterStart,

    #[error("Tea slot must be 00, 15, 30, or 45 (for 13:00 hour).")]
    InvalidTeaSlot,

    #[error("Status detail is required when status is Other Library.")]
    MissingStatusDetail,
}

/// Validate the form fields into a wire-ready [`StaffEntry`].
///
/// Rule order: name, time format, business window, start-before-end, tea
/// slot, status detail. Optional fields left blank stay absent on the
/// produced entry.
pub fn validate_entry(fields: &FormFields) -> Result<StaffEntry, ValidationError> {
    let name = fields.name.trim();
    if name.is_empty() {
        return Err(ValidationError::MissingName);
    }

    let start = parse_optional_time(&fields.start_hour, TimeField::Start)?;
    let end = parse_optional_time(&fields.end_hour, TimeField::End)?;

    for (field, value) in [(TimeField::Start, start), (TimeField::End, end)] {
        if let Some(value) = value {
            if !(MIN_START_HOUR..=MAX_END_HOUR).contains(&value) {
                return Err(ValidationError::TimeOutOfRange(field));
            }
        }
    }

    if let (Some(start), Some(end)) = (start, end) {
        if start >= end {
            return Err(ValidationError::EndNotAfterStart);
        }
    }

    let tea_token = fields.tea_slot.trim();
    let tea_slot = if tea_token.is_empty() {
        None
    } else {
        Some(TeaSlot::from_minutes(tea_token).ok_or(ValidationError::InvalidTeaSlot)?)
    };

    let status_detail = if fields.status == StaffStatus::OtherLibrary {
        let detail = fields.status_detail.trim();
        if detail.is_empty() {
            return Err(ValidationError::MissingStatusDetail);
        }
        Some(detail.to_string())
    } else {
        None
    };

    Ok(StaffEntry {
        name: name.to_string(),
        role: fields.role,
        status: Some(fields.status),
        status_detail,
        start_hour: start,
        end_hour: end,
        tea_slot,
    })
}

fn parse_optional_time(text: &str, field: TimeField) -> Result<Option<f64>, ValidationError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    parse_time(trimmed)
        .map(Some)
        .ok_or(ValidationError::InvalidTimeFormat(field))
}
