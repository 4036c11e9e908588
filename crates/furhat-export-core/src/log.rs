use serde_json::Value;

/// File name the Furhat SDK uses for dialog logs
pub const DIALOG_LOG_FILE: &str = "dialog.json";

/// Turn the raw log text into a JSON array literal.
///
/// Furhat appends one object per line followed by a comma and never closes the
/// array, so the text is trimmed, trailing commas are dropped and the rest is
/// wrapped in brackets.
pub fn repair_log_text(text: &str) -> String {
    let body = text.trim().trim_end_matches(',').trim_end();
    format!("[{}]", body)
}

/// Repair and parse a dialog log into its raw records
pub fn parse_log(text: &str) -> Result<Vec<Value>, serde_json::Error> {
    serde_json::from_str(&repair_log_text(text))
}
