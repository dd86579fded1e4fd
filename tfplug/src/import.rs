//! Import helpers for simplifying resource import implementations

use crate::resource::Resource;
use crate::resource_data::ResourceData;
use crate::types::{Diagnostic, Diagnostics};

/// Uses the import ID as the resource id and refreshes the rest from the API
///
/// Example: ID "abc-123" -> state.id = "abc-123", remaining attributes read
pub async fn import_state_passthrough<R>(
    resource: &R,
    id: &str,
) -> (Option<ResourceData>, Diagnostics)
where
    R: Resource + ?Sized,
{
    if id.is_empty() {
        return (
            None,
            Diagnostic::error("Missing import ID", "An import ID must be provided").into(),
        );
    }

    let mut data = ResourceData::from_id(id);
    let diagnostics = resource.read(&mut data).await;

    if diagnostics.has_error() {
        return (None, diagnostics);
    }
    if data.id().is_empty() {
        let mut diagnostics = diagnostics;
        diagnostics.add_error(
            "Cannot import non-existent remote object",
            format!(
                "While attempting to import an existing object to {}, the provider detected that no object exists with the given id \"{}\".",
                resource.type_name(),
                id
            ),
        );
        return (None, diagnostics);
    }

    (Some(data), diagnostics)
}
