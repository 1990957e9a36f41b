use caretrace_types::parse_timestamp;
use chrono_tz::Tz;

pub const NO_TIMESTAMP: &str = "(no timestamp)";

const DISPLAY_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Render a producer timestamp in the display timezone.
///
/// Unparseable values are shown as sent; missing ones as `(no timestamp)`.
pub fn format_timestamp(raw: Option<&str>, tz: Tz) -> String {
    let Some(raw) = raw.map(str::trim).filter(|raw| !raw.is_empty()) else {
        return NO_TIMESTAMP.to_string();
    };

    match parse_timestamp(raw) {
        Some(ts) => ts.with_timezone(&tz).format(DISPLAY_FORMAT).to_string(),
        None => raw.to_string(),
    }
}
