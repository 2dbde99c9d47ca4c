//! Data Transfer Objects shared by the API client and the controller.
//!
//! The field names and enum strings here are the backend's wire vocabulary;
//! optional fields are omitted from JSON when unset because the backend
//! schema distinguishes an absent column from an empty one.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Staff role, as stored by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    #[serde(rename = "Duty Manager")]
    DutyManager,
    #[serde(rename = "Scale 3")]
    Scale3,
    #[serde(rename = "Volunteer")]
    Volunteer,
}

impl Role {
    /// All roles, in the order the form presents them.
    pub const ALL: [Role; 3] = [Role::DutyManager, Role::Scale3, Role::Volunteer];

    /// The wire/display string for this role.
    pub fn label(&self) -> &'static str {
        match self {
            Role::DutyManager => "Duty Manager",
            Role::Scale3 => "Scale 3",
            Role::Volunteer => "Volunteer",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Availability status for a staff entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StaffStatus {
    #[serde(rename = "Available")]
    Available,
    #[serde(rename = "Annual Leave")]
    AnnualLeave,
    #[serde(rename = "Sick")]
    Sick,
    /// Working at another library; requires a `status_detail` naming it.
    #[serde(rename = "Other Library")]
    OtherLibrary,
}

impl StaffStatus {
    /// All statuses, in the order the form presents them.
    pub const ALL: [StaffStatus; 4] = [
        StaffStatus::Available,
        StaffStatus::AnnualLeave,
        StaffStatus::Sick,
        StaffStatus::OtherLibrary,
    ];

    /// The wire/display string for this status.
    pub fn label(&self) -> &'static str {
        match self {
            StaffStatus::Available => "Available",
            StaffStatus::AnnualLeave => "Annual Leave",
            StaffStatus::Sick => "Sick",
            StaffStatus::OtherLibrary => "Other Library",
        }
    }
}

impl fmt::Display for StaffStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Tea break slot inside the 13:00 hour.
///
/// The form collects only the minutes token; the wire format is the full
/// time-of-day string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TeaSlot {
    #[serde(rename = "13:00")]
    OnTheHour,
    #[serde(rename = "13:15")]
    QuarterPast,
    #[serde(rename = "13:30")]
    HalfPast,
    #[serde(rename = "13:45")]
    QuarterTo,
}

impl TeaSlot {
    /// Build a slot from the minutes token the form collects.
    pub fn from_minutes(token: &str) -> Option<TeaSlot> {
        match token {
            "00" => Some(TeaSlot::OnTheHour),
            "15" => Some(TeaSlot::QuarterPast),
            "30" => Some(TeaSlot::HalfPast),
            "45" => Some(TeaSlot::QuarterTo),
            _ => None,
        }
    }

    /// The minutes token for this slot.
    pub fn minutes(&self) -> &'static str {
        match self {
            TeaSlot::OnTheHour => "00",
            TeaSlot::QuarterPast => "15",
            TeaSlot::HalfPast => "30",
            TeaSlot::QuarterTo => "45",
        }
    }

    /// The wire/display string for this slot.
    pub fn label(&self) -> &'static str {
        match self {
            TeaSlot::OnTheHour => "13:00",
            TeaSlot::QuarterPast => "13:15",
            TeaSlot::HalfPast => "13:30",
            TeaSlot::QuarterTo => "13:45",
        }
    }
}

impl fmt::Display for TeaSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A staff entry, keyed by name.
///
/// `start_hour` and `end_hour` are hour fractions (11.5 means 11:30). The
/// staff listing endpoint returns only `name` and `role`, so every other
/// field must tolerate being absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StaffEntry {
    pub name: String,
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<StaffStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_detail: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_hour: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_hour: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tea_slot: Option<TeaSlot>,
}

/// A reusable template for quick re-entry. Structurally identical to a
/// staff entry but stored as a distinct remote resource.
pub type Profile = StaffEntry;

/// Acknowledgment returned by the mutating endpoints.
///
/// The backend replies with a `message` field on success; decode liberally
/// so a created-record response also passes through.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Ack {
    #[serde(default)]
    pub message: Option<String>,
}

/// A generated timesheet spreadsheet as returned by the backend.
#[derive(Debug, Clone)]
pub struct TimesheetFile {
    /// Filename taken from the `content-disposition` header.
    pub filename: String,
    /// Raw spreadsheet bytes.
    pub bytes: Vec<u8>,
}
