//! Request payload validation for create and update operations.
//!
//! Bodies are handled as `serde_json::Map` rather than fixed structs so
//! that an absent key and an explicit `null` stay distinguishable, which
//! matters for the clearable fields on update.

use crate::{
    error::{Result, TodoError},
    models::{NewTodo, UpdateTodo},
};
use chrono::{
    DateTime, Duration, Local, LocalResult, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc,
};
use serde_json::{Map, Value};

/// The fixed set of fields accepted in create/update request bodies
pub const ALLOWED_FIELDS: [&str; 4] = ["title", "description", "completed", "deadline_at"];

/// Reject any body key outside the allowed set.
///
/// In update mode `id` is skipped here so the dedicated immutable-id check
/// can report it with its own message.
fn check_allowed_fields(body: &Map<String, Value>, skip_id: bool) -> Result<()> {
    for field in body.keys() {
        if skip_id && field == "id" {
            continue;
        }
        if !ALLOWED_FIELDS.contains(&field.as_str()) {
            return Err(TodoError::disallowed_field(field));
        }
    }
    Ok(())
}

impl NewTodo {
    /// Validate a create body and build the creation DTO.
    ///
    /// Validation order: field whitelist first, then the required title.
    /// A missing, null, non-string, or empty title is rejected.
    pub fn from_payload(body: &Map<String, Value>) -> Result<Self> {
        check_allowed_fields(body, false)?;

        let title = match body.get("title") {
            Some(Value::String(title)) if !title.is_empty() => title.clone(),
            _ => return Err(TodoError::title_required()),
        };

        let description = match body.get("description") {
            None | Some(Value::Null) => None,
            Some(Value::String(text)) => Some(text.clone()),
            Some(_) => return Err(field_type_error("description", "a string")),
        };

        let completed = match body.get("completed") {
            None | Some(Value::Null) => false,
            Some(Value::Bool(flag)) => *flag,
            Some(_) => return Err(field_type_error("completed", "a boolean")),
        };

        let deadline_at = match body.get("deadline_at") {
            None | Some(Value::Null) => None,
            Some(Value::String(raw)) => Some(parse_timestamp(raw)?),
            Some(_) => return Err(field_type_error("deadline_at", "a timestamp string")),
        };

        Ok(Self {
            title,
            description,
            completed,
            deadline_at,
        })
    }
}

impl UpdateTodo {
    /// Validate an update body and build the patch DTO.
    ///
    /// Validation order: field whitelist, then the immutable-id check.
    /// Present keys replace the stored value, including falsy ones such as
    /// an empty title or `completed: false`; a null `description` or
    /// `deadline_at` clears the field.
    pub fn from_payload(body: &Map<String, Value>) -> Result<Self> {
        check_allowed_fields(body, true)?;

        if body.contains_key("id") {
            return Err(TodoError::immutable_id());
        }

        let title = match body.get("title") {
            None => None,
            Some(Value::String(title)) => Some(title.clone()),
            Some(_) => return Err(field_type_error("title", "a string")),
        };

        let description = match body.get("description") {
            None => None,
            Some(Value::Null) => Some(None),
            Some(Value::String(text)) => Some(Some(text.clone())),
            Some(_) => return Err(field_type_error("description", "a string")),
        };

        let completed = match body.get("completed") {
            None => None,
            Some(Value::Bool(flag)) => Some(*flag),
            Some(_) => return Err(field_type_error("completed", "a boolean")),
        };

        let deadline_at = match body.get("deadline_at") {
            None => None,
            Some(Value::Null) => Some(None),
            Some(Value::String(raw)) => Some(Some(parse_timestamp(raw)?)),
            Some(_) => return Err(field_type_error("deadline_at", "a timestamp string")),
        };

        Ok(Self {
            title,
            description,
            completed,
            deadline_at,
        })
    }
}

fn field_type_error(field: &str, expected: &str) -> TodoError {
    TodoError::Validation(format!("Field {field} must be {expected}"))
}

/// Parse an ISO-8601 timestamp.
///
/// Accepts RFC 3339 with an offset, offset-less date-times (interpreted as
/// UTC), and bare dates (midnight UTC).
pub fn parse_timestamp(value: &str) -> Result<DateTime<Utc>> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Ok(parsed.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f") {
        return Ok(Utc.from_utc_datetime(&naive));
    }
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Ok(Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN)));
    }
    Err(TodoError::invalid_timestamp(value))
}

/// Parse the `completed` query parameter.
///
/// A case-insensitive `"true"` means true; anything else means false.
pub fn parse_completed_param(raw: &str) -> bool {
    raw.eq_ignore_ascii_case("true")
}

/// Compute the deadline cutoff for a `window` query parameter.
///
/// The cutoff is the start of the current day in local time advanced by
/// `window_days` calendar days. Negative and zero windows simply shift the
/// cutoff backward or to today. Returns `None` when the window is too
/// large to represent.
pub fn window_cutoff(now: DateTime<Local>, window_days: i64) -> Option<DateTime<Utc>> {
    let start_of_day = now.date_naive().and_time(NaiveTime::MIN);
    let cutoff = start_of_day.checked_add_signed(Duration::try_days(window_days)?)?;

    // An ambiguous local midnight (DST fold) resolves to the earlier instant;
    // a nonexistent one (DST gap) is treated as unrepresentable.
    let local_cutoff = match Local.from_local_datetime(&cutoff) {
        LocalResult::Single(mapped) => mapped,
        LocalResult::Ambiguous(earliest, _) => earliest,
        LocalResult::None => return None,
    };
    Some(local_cutoff.with_timezone(&Utc))
}
