//! Notification titles and message composition.
//!
//! Keeping the wording here (rather than inline in handlers) means the
//! lifecycle engine and its tests agree on exactly what clients see.

/// Notification type for informational messages.
pub const TYPE_INFO: &str = "info";

/// Notification type for messages that require the recipient to act.
pub const TYPE_ACTION_REQUIRED: &str = "action_required";

pub const TITLE_REQUEST_RECEIVED: &str = "Project Request Received";
pub const TITLE_PROPOSAL_READY: &str = "Proposal Ready for Review";
pub const TITLE_NEW_UPDATE: &str = "New Project Update";

/// Maximum number of characters of update content quoted in a
/// notification message before truncation.
const UPDATE_PREVIEW_CHARS: usize = 50;

/// Message sent to a client after they submit a project request.
pub fn request_received(title: &str) -> String {
    format!(
        "We've received your request for \"{title}\". Our team will review it and draft a proposal soon."
    )
}

/// Message sent to a client when their proposal is ready to approve.
pub fn proposal_ready(title: &str) -> String {
    format!(
        "The proposal for \"{title}\" is ready. Please review and approve it to get started."
    )
}

/// Message sent to a client when staff post a project update.
///
/// Quotes the first 50 characters of the update body, appending `...`
/// when truncated. Truncation counts characters, not bytes, so
/// multi-byte content never splits mid-character.
pub fn update_posted(project_title: &str, content: &str) -> String {
    format!(
        "New update on \"{project_title}\": {}",
        preview(content, UPDATE_PREVIEW_CHARS)
    )
}

fn preview(content: &str, max_chars: usize) -> String {
    let mut out: String = content.chars().take(max_chars).collect();
    if content.chars().count() > max_chars {
        out.push_str("...");
    }
    out
}
