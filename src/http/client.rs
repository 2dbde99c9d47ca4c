//! Fallback-aware HTTP client for the timesheet service.
//!
//! Every operation maps one-to-one onto a backend resource. Requests are
//! tried against the primary base URL first; a not-found response means the
//! route rewrite is missing in this deployment, so the same request is
//! retried once against the secondary base. Any other non-success status is
//! surfaced immediately. This is a routing compatibility shim, not a retry
//! policy: nothing is ever retried on a status other than 404, and each
//! candidate base is attempted at most once per request.

use std::time::Duration;

use reqwest::{Method, StatusCode};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::api::{Ack, Profile, StaffEntry, TimesheetFile};

use super::config::ClientConfig;
use super::error::{ClientError, ClientResult};

/// Filename used when the response carries no usable
/// `content-disposition` header.
pub const DEFAULT_TIMESHEET_FILENAME: &str = "Timesheet.xlsx";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Typed client for the staff, profile, and timesheet endpoints.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    bases: Vec<String>,
}

impl ApiClient {
    /// Build a client from resolved configuration.
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        let mut bases = vec![config.primary_base.clone()];
        if let Some(secondary) = &config.secondary_base {
            if secondary != &config.primary_base {
                bases.push(secondary.clone());
            }
        }
        Ok(Self { http, bases })
    }

    /// GET `/staff`.
    pub async fn fetch_staff(&self) -> ClientResult<Vec<StaffEntry>> {
        let response = self.send::<()>(Method::GET, "/staff", None).await?;
        Ok(response.json().await?)
    }

    /// POST `/staff`.
    pub async fn add_staff(&self, entry: &StaffEntry) -> ClientResult<Ack> {
        let response = self.send(Method::POST, "/staff", Some(entry)).await?;
        Ok(response.json().await?)
    }

    /// DELETE `/staff/{name}`.
    pub async fn delete_staff(&self, name: &str) -> ClientResult<Ack> {
        let path = format!("/staff/{}", urlencoding::encode(name));
        let response = self.send::<()>(Method::DELETE, &path, None).await?;
        Ok(response.json().await?)
    }

    /// GET `/profiles`.
    pub async fn fetch_profiles(&self) -> ClientResult<Vec<Profile>> {
        let response = self.send::<()>(Method::GET, "/profiles", None).await?;
        Ok(response.json().await?)
    }

    /// POST `/profiles`.
    pub async fn add_profile(&self, profile: &Profile) -> ClientResult<Ack> {
        let response = self.send(Method::POST, "/profiles", Some(profile)).await?;
        Ok(response.json().await?)
    }

    /// DELETE `/profiles/{name}`.
    pub async fn delete_profile(&self, name: &str) -> ClientResult<Ack> {
        let path = format!("/profiles/{}", urlencoding::encode(name));
        let response = self.send::<()>(Method::DELETE, &path, None).await?;
        Ok(response.json().await?)
    }

    /// POST `/generate-timesheet` with the full schedule document; returns
    /// the spreadsheet bytes and the filename announced by the backend.
    pub async fn generate_timesheet(&self, document: &Value) -> ClientResult<TimesheetFile> {
        let response = self
            .send(Method::POST, "/generate-timesheet", Some(document))
            .await?;
        let filename = response
            .headers()
            .get(reqwest::header::CONTENT_DISPOSITION)
            .and_then(|value| value.to_str().ok())
            .and_then(extract_filename)
            .unwrap_or_else(|| DEFAULT_TIMESHEET_FILENAME.to_string());
        let bytes = response.bytes().await?.to_vec();
        Ok(TimesheetFile { filename, bytes })
    }

    /// Issue one request, walking the candidate bases on not-found.
    async fn send<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> ClientResult<reqwest::Response> {
        let mut last_not_found: Option<StatusCode> = None;

        for base in &self.bases {
            let url = format!("{base}{path}");
            debug!(method = %method, %url, "issuing API request");

            let mut request = self.http.request(method.clone(), &url);
            if let Some(body) = body {
                request = request.json(body);
            }
            let response = request.send().await?;
            let status = response.status();

            if status == StatusCode::NOT_FOUND {
                warn!(%url, "endpoint answered not-found, trying next candidate base");
                last_not_found = Some(status);
                continue;
            }
            if !status.is_success() {
                let body_text = response.text().await.unwrap_or_default();
                let message = if body_text.trim().is_empty() {
                    format!("API request failed with status {}", status.as_u16())
                } else {
                    body_text
                };
                return Err(ClientError::Status {
                    status: status.as_u16(),
                    message,
                });
            }
            return Ok(response);
        }

        let status = last_not_found.unwrap_or(StatusCode::NOT_FOUND);
        Err(ClientError::Exhausted {
            status: status.as_u16(),
        })
    }
}

/// Pull the filename out of a `content-disposition` header value.
///
/// Accepts `filename="name"` and `filename=name`; anything unparsable is
/// `None` so callers fall back to [`DEFAULT_TIMESHEET_FILENAME`].
fn extract_filename(disposition: &str) -> Option<String> {
    let (_, rest) = disposition.split_once("filename=")?;
    let rest = rest.trim_start();
    let name = match rest.strip_prefix('"') {
        Some(quoted) => quoted.split('"').next()?,
        None => rest.split(';').next()?.trim(),
    };
    if name.is_empty() {
        None
    } else {
        Some(name.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(primary: &str, secondary: Option<&str>) -> ClientConfig {
        ClientConfig {
            primary_base: primary.to_string(),
            secondary_base: secondary.map(str::to_string),
            output_dir: ".".into(),
        }
    }

    #[test]
    fn duplicate_secondary_base_is_dropped() {
        let client =
            ApiClient::new(&config("http://localhost/api", Some("http://localhost/api"))).unwrap();
        assert_eq!(client.bases.len(), 1);
    }

    #[test]
    fn distinct_bases_are_kept_in_order() {
        let client = ApiClient::new(&config(
            "http://localhost/api",
            Some("http://localhost/.netlify/functions/library_excel"),
        ))
        .unwrap();
        assert_eq!(client.bases.len(), 2);
        assert_eq!(client.bases[0], "http://localhost/api");
    }

    #[test]
    fn filename_extracted_from_quoted_header() {
        assert_eq!(
            extract_filename(r#"attachment; filename="Timesheet_Friday, 07 August 2026.xlsx""#),
            Some("Timesheet_Friday, 07 August 2026.xlsx".to_string())
        );
    }

    #[test]
    fn filename_extracted_without_quotes() {
        assert_eq!(
            extract_filename("attachment; filename=Timesheet.xlsx; size=12345"),
            Some("Timesheet.xlsx".to_string())
        );
    }

    #[test]
    fn filename_missing_or_empty_is_none() {
        assert_eq!(extract_filename("attachment"), None);
        assert_eq!(extract_filename(r#"attachment; filename="""#), None);
        assert_eq!(extract_filename("attachment; filename="), None);
    }

    #[test]
    fn delete_path_percent_encodes_names() {
        assert_eq!(
            format!("/staff/{}", urlencoding::encode("Mx. O'Brien & co")),
            "/staff/Mx.%20O%27Brien%20%26%20co"
        );
    }
}
