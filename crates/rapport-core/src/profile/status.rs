//! Profile status summary.
//!
//! Renders what is known about a participant and what is still missing, so
//! the agent can steer the conversation toward the gaps.

use rapport_types::profile::{ParticipantRecord, ProfileField};

use super::gate::is_complete;

/// Fields without a non-empty value, in display order.
pub fn missing_fields(record: &ParticipantRecord) -> Vec<ProfileField> {
    ProfileField::ALL
        .into_iter()
        .filter(|f| !record.is_known(*f))
        .collect()
}

fn field_label(field: ProfileField) -> &'static str {
    match field {
        ProfileField::Name => "Name",
        ProfileField::Location => "Location",
        ProfileField::Occupation => "Occupation",
    }
}

/// Markdown status block for the agent's context.
pub fn format_status(record: &ParticipantRecord) -> String {
    let mut output = String::from("# User Information Status\n\n");

    let known: Vec<String> = ProfileField::ALL
        .into_iter()
        .filter_map(|f| {
            record
                .field(f)
                .filter(|v| !v.is_empty())
                .map(|v| format!("- {}: {v}\n", field_label(f)))
        })
        .collect();
    if !known.is_empty() {
        output.push_str("Currently Known:\n");
        output.extend(known);
        output.push('\n');
    }

    if is_complete(record) {
        output.push_str("Profile is complete. Continue natural conversation.");
        return output;
    }

    output.push_str("Information Needed:\n");
    let needed = missing_fields(record)
        .into_iter()
        .map(|f| format!("- {}: need to know their {}", f.key(), f.description()))
        .collect::<Vec<_>>()
        .join("\n");
    output.push_str(&needed);
    output.push_str("\n\nInstructions:\n");
    output.push_str("- Work to gather all missing information\n");
    output.push_str("- Ask natural follow-up questions\n");
    output.push_str("- Keep conversation engaging and natural");
    output
}
