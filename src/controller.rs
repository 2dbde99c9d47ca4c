//! Form/state controller.
//!
//! Owns the editable input fields, the staff and profile view caches, the
//! working schedule document, and the single current error slot. Each
//! handler mirrors one user action: validate, call the API client, then on
//! success refresh the affected list and clear the inputs. The remote
//! service owns true persistence; the caches here are replaced wholesale
//! after each successful fetch.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde_json::Value;
use tracing::info;

use crate::api::{Profile, StaffEntry, StaffStatus, TimesheetFile};
use crate::http::client::{ApiClient, DEFAULT_TIMESHEET_FILENAME};
use crate::services::schedule_doc::{append_entry, blank_document, set_document_date};
use crate::services::timegrid::format_time;
use crate::services::validation::{validate_entry, FormFields};

/// Error shown when generation is attempted with nothing scheduled.
pub const EMPTY_SCHEDULE_MESSAGE: &str =
    "Add at least one staff entry to schedule before generating.";

/// Error shown when a profile is saved without a name.
pub const PROFILE_NAME_MESSAGE: &str = "Enter a name before saving a profile.";

/// State and orchestration for the scheduling form.
pub struct FormController {
    client: ApiClient,
    output_dir: PathBuf,
    /// Current staff entries, refreshed after every staff mutation.
    pub staff: Vec<StaffEntry>,
    /// Stored profiles, refreshed after every profile mutation.
    pub profiles: Vec<Profile>,
    /// The editable input fields.
    pub fields: FormFields,
    /// The editable schedule document text.
    pub schedule_json: String,
    /// The single current error message; each action replaces it.
    pub error: Option<String>,
    /// Acknowledgment from the last successful mutation.
    pub notice: Option<String>,
    generating: bool,
}

impl FormController {
    pub fn new(client: ApiClient, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            client,
            output_dir: output_dir.into(),
            staff: Vec::new(),
            profiles: Vec::new(),
            fields: FormFields::default(),
            schedule_json: blank_document(),
            error: None,
            notice: None,
            generating: false,
        }
    }

    /// Initial load of both lists.
    pub async fn load(&mut self) {
        self.refresh_staff().await;
        self.refresh_profiles().await;
    }

    /// Re-fetch the staff list, replacing the cache on success.
    pub async fn refresh_staff(&mut self) -> bool {
        self.error = None;
        match self.client.fetch_staff().await {
            Ok(staff) => {
                self.staff = staff;
                true
            }
            Err(error) => {
                self.error = Some(error.to_string());
                false
            }
        }
    }

    /// Re-fetch the profile list, replacing the cache on success.
    pub async fn refresh_profiles(&mut self) -> bool {
        self.error = None;
        match self.client.fetch_profiles().await {
            Ok(profiles) => {
                self.profiles = profiles;
                true
            }
            Err(error) => {
                self.error = Some(error.to_string());
                false
            }
        }
    }

    /// Validate the fields and add a staff entry.
    ///
    /// On success the entry is appended to the working schedule document,
    /// the staff list is refreshed, and the input fields are cleared.
    pub async fn add_staff(&mut self) -> bool {
        self.error = None;
        self.notice = None;
        let entry = match validate_entry(&self.fields) {
            Ok(entry) => entry,
            Err(error) => {
                self.error = Some(error.to_string());
                return false;
            }
        };
        match self.client.add_staff(&entry).await {
            Ok(ack) => {
                self.schedule_json = append_entry(&self.schedule_json, &entry);
                self.refresh_staff().await;
                self.notice = ack.message;
                self.fields = FormFields::default();
                true
            }
            Err(error) => {
                self.error = Some(error.to_string());
                false
            }
        }
    }

    /// Save the current fields as a reusable profile.
    pub async fn save_profile(&mut self) -> bool {
        self.error = None;
        self.notice = None;
        if self.fields.name.trim().is_empty() {
            self.error = Some(PROFILE_NAME_MESSAGE.to_string());
            return false;
        }
        let profile = match validate_entry(&self.fields) {
            Ok(profile) => profile,
            Err(error) => {
                self.error = Some(error.to_string());
                return false;
            }
        };
        match self.client.add_profile(&profile).await {
            Ok(ack) => {
                self.refresh_profiles().await;
                self.notice = ack.message;
                self.fields = FormFields::default();
                true
            }
            Err(error) => {
                self.error = Some(error.to_string());
                false
            }
        }
    }

    /// Remove a staff entry by name and refresh the list.
    pub async fn delete_staff(&mut self, name: &str) -> bool {
        self.error = None;
        self.notice = None;
        match self.client.delete_staff(name).await {
            Ok(ack) => {
                self.refresh_staff().await;
                self.notice = ack.message;
                true
            }
            Err(error) => {
                self.error = Some(error.to_string());
                false
            }
        }
    }

    /// Remove a stored profile by name and refresh the list.
    pub async fn delete_profile(&mut self, name: &str) -> bool {
        self.error = None;
        self.notice = None;
        match self.client.delete_profile(name).await {
            Ok(ack) => {
                self.refresh_profiles().await;
                self.notice = ack.message;
                true
            }
            Err(error) => {
                self.error = Some(error.to_string());
                false
            }
        }
    }

    /// Copy a stored profile back into the editable fields.
    pub fn apply_profile(&mut self, profile: &Profile) {
        self.fields = FormFields {
            name: profile.name.clone(),
            role: profile.role,
            status: profile.status.unwrap_or(StaffStatus::Available),
            status_detail: profile.status_detail.clone().unwrap_or_default(),
            start_hour: profile.start_hour.map(format_time).unwrap_or_default(),
            end_hour: profile.end_hour.map(format_time).unwrap_or_default(),
            tea_slot: profile
                .tea_slot
                .map(|slot| slot.minutes().to_string())
                .unwrap_or_default(),
        };
    }

    /// Replace the working schedule document text with an operator edit.
    pub fn set_schedule_text(&mut self, text: impl Into<String>) {
        self.schedule_json = text.into();
    }

    /// Reset the working document to an empty schedule.
    pub fn reset_document(&mut self) {
        self.schedule_json = blank_document();
    }

    /// Stamp the working document with the sheet date.
    pub fn set_date(&mut self, date: NaiveDate) {
        self.schedule_json = set_document_date(&self.schedule_json, date);
    }

    /// Whether a generation request is currently in flight.
    pub fn is_generating(&self) -> bool {
        self.generating
    }

    /// Submit the working document and write the returned spreadsheet into
    /// the output directory. Returns the written path.
    ///
    /// An empty or missing schedule list is rejected before any network
    /// call. While a request is in flight further calls are ignored.
    pub async fn generate(&mut self) -> Option<PathBuf> {
        if self.generating {
            return None;
        }
        self.error = None;
        self.notice = None;

        let payload: Value = match serde_json::from_str(&self.schedule_json) {
            Ok(value) => value,
            Err(error) => {
                self.error = Some(error.to_string());
                return None;
            }
        };
        let schedule_len = payload
            .get("schedule")
            .and_then(Value::as_array)
            .map(Vec::len)
            .unwrap_or(0);
        if schedule_len == 0 {
            self.error = Some(EMPTY_SCHEDULE_MESSAGE.to_string());
            return None;
        }

        self.generating = true;
        let result = self.client.generate_timesheet(&payload).await;
        self.generating = false;

        match result {
            Ok(file) => match self.write_timesheet(&file) {
                Ok(path) => {
                    info!(path = %path.display(), "timesheet written");
                    Some(path)
                }
                Err(error) => {
                    self.error = Some(format!("Failed to save {}: {}", file.filename, error));
                    None
                }
            },
            Err(error) => {
                self.error = Some(error.to_string());
                None
            }
        }
    }

    fn write_timesheet(&self, file: &TimesheetFile) -> std::io::Result<PathBuf> {
        // The header value is untrusted; keep only the final path component.
        let safe_name = Path::new(&file.filename)
            .file_name()
            .map(OsString::from)
            .unwrap_or_else(|| OsString::from(DEFAULT_TIMESHEET_FILENAME));
        std::fs::create_dir_all(&self.output_dir)?;
        let path = self.output_dir.join(safe_name);
        std::fs::write(&path, &file.bytes)?;
        Ok(path)
    }
}
