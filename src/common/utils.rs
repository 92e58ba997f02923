use chrono::DateTime;

/// Formats a timestamp from a serde_json::Value (either epoch millis,
/// epoch seconds, or an ISO 8601 string) into a human-readable local
/// date/time string.
///
/// # Arguments
/// * `ts_option` - An Option containing a serde_json::Value representing the timestamp.
///
/// # Returns
/// A formatted string "MM/DD/YYYY HH:MMam/pm" or "N/A" if invalid.
pub fn format_timestamp(ts_option: Option<&serde_json::Value>) -> String {
    if let Some(val) = ts_option {
        if let Some(ts_f64) = val.as_f64() {
            // Anything above 10,000,000,000 is millis (13 digits).
            let (seconds, nanoseconds) = if ts_f64 > 10_000_000_000.0 {
                let s = (ts_f64 / 1000.0) as i64;
                let n = ((ts_f64 % 1000.0) * 1_000_000.0) as u32;
                (s, n)
            } else {
                let s = ts_f64 as i64;
                let n = ((ts_f64 - s as f64) * 1_000_000_000.0) as u32;
                (s, n)
            };

            if let Some(dt) = DateTime::from_timestamp(seconds, nanoseconds) {
                let local_dt = dt.with_timezone(&chrono::Local);
                return local_dt.format("%m/%d/%Y %I:%M%P").to_string();
            }
        } else if let Some(s) = val.as_str() {
            if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
                let local_dt = dt.with_timezone(&chrono::Local);
                return local_dt.format("%m/%d/%Y %I:%M%P").to_string();
            }
            return s.to_string();
        }
    }
    "N/A".to_string()
}

/// Renders a byte count as whole megabytes, "0 MB" when absent.
pub fn format_mb(bytes: Option<i64>) -> String {
    let mb = bytes.unwrap_or(0) as f64 / 1024.0 / 1024.0;
    format!("{} MB", mb.round() as i64)
}

/// "X MB used of Y MB" for a storage_details pair.
pub fn format_storage(used: Option<i64>, drive: Option<i64>) -> String {
    format!("{} used of {}", format_mb(used), format_mb(drive))
}

/// Renders a byte count as whole kilobytes; replication counters are small
/// enough that megabytes would round most of them to zero.
pub fn format_kb(bytes: Option<i64>) -> String {
    let kb = bytes.unwrap_or(0) as f64 / 1024.0;
    format!("{} KB", kb.round() as i64)
}

/// Opens a URL in the default web browser in a cross-platform way.
pub fn open_browser(url: &str) {
    let result = if cfg!(target_os = "windows") {
        std::process::Command::new("cmd")
            .args(["/C", "start", url])
            .spawn()
    } else if cfg!(target_os = "macos") {
        std::process::Command::new("open").arg(url).spawn()
    } else {
        // Assume Linux/Unix
        std::process::Command::new("xdg-open").arg(url).spawn()
    };

    if let Err(e) = result {
        tracing::warn!(url, error = %e, "failed to open browser");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_mb_rounds_and_defaults() {
        assert_eq!(format_mb(None), "0 MB");
        assert_eq!(format_mb(Some(1_048_576)), "1 MB");
        assert_eq!(format_mb(Some(1_572_864)), "2 MB");
    }

    #[test]
    fn format_storage_reads_like_the_card() {
        assert_eq!(
            format_storage(Some(2_097_152), Some(4_194_304)),
            "2 MB used of 4 MB"
        );
    }

    #[test]
    fn format_timestamp_handles_missing_and_plain_strings() {
        assert_eq!(format_timestamp(None), "N/A");

        // Non-RFC3339 strings pass through untouched.
        let raw = serde_json::Value::String("yesterday".to_string());
        assert_eq!(format_timestamp(Some(&raw)), "yesterday");
    }
}
