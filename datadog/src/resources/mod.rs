//! Resource implementations

pub mod organization_settings;

pub use organization_settings::OrganizationSettingsResource;

use crate::api::ApiError;
use tfplug::Diagnostic;

/// Error diagnostic for a failed API call.
///
/// The summary is `"<context>: <error>"`; the raw response body, when the
/// server sent one, becomes the detail.
pub(crate) fn client_error(context: &str, error: &ApiError) -> Diagnostic {
    let detail = error
        .body()
        .map(|body| String::from_utf8_lossy(body).into_owned())
        .unwrap_or_default();
    Diagnostic::error(format!("{}: {}", context, error), detail)
}
