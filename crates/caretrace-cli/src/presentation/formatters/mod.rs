pub mod text;
pub mod time;

pub use text::{compact_json, truncate};
pub use time::{NO_TIMESTAMP, format_timestamp};
