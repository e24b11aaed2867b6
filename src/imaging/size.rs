/// Human-readable file sizes

const UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];

/// Format a byte count with two decimals, e.g. `1536` -> `"1.50 KB"`
pub fn human_readable_size(bytes: u64) -> String {
    format_size(bytes, 2)
}

/// Format a byte count using powers of 1024.
///
/// TB is the largest unit; anything bigger stays in TB with a value of
/// 1024 or more.
pub fn format_size(bytes: u64, decimal_places: usize) -> String {
    let mut size = bytes as f64;
    let mut unit = 0;

    while size >= 1024.0 && unit < UNITS.len() - 1 {
        size /= 1024.0;
        unit += 1;
    }

    format!("{:.*} {}", decimal_places, size, UNITS[unit])
}
