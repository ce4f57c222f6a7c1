use humantime::format_duration;
use std::time::Duration;

/// Human readable duration, truncated to millisecond resolution.
pub fn duration(d: Duration) -> String {
    let millis = Duration::from_millis(d.as_millis() as u64);
    if millis.as_millis() == 0 {
        return "0ms".to_owned();
    }
    format_duration(millis).to_string()
}
