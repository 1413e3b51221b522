use std::path::PathBuf;

/// Initialize tracing for CLI binaries.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();
}

/// Data directory for durable storage: `FLEXDOC_DATA_DIR`, falling back to
/// `$HOME/.flexdoc`, falling back to `./.flexdoc`.
pub fn data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("FLEXDOC_DATA_DIR") {
        return PathBuf::from(dir);
    }
    match std::env::var("HOME") {
        Ok(home) => PathBuf::from(home).join(".flexdoc"),
        Err(_) => PathBuf::from(".flexdoc"),
    }
}

/// Format a byte count as a human-readable size.
pub fn format_file_size(bytes: i64) -> String {
    if bytes <= 0 {
        return "0 B".to_string();
    }
    const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{} {}", bytes, UNITS[unit])
    } else {
        format!("{:.2} {}", value, UNITS[unit])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_file_size_bytes() {
        assert_eq!(format_file_size(0), "0 B");
        assert_eq!(format_file_size(512), "512 B");
    }

    #[test]
    fn format_file_size_scales() {
        assert_eq!(format_file_size(1024), "1.00 KB");
        assert_eq!(format_file_size(52430), "51.20 KB");
        assert_eq!(format_file_size(5 * 1024 * 1024), "5.00 MB");
        assert_eq!(format_file_size(3 * 1024 * 1024 * 1024), "3.00 GB");
    }

    #[test]
    fn format_file_size_negative_is_zero() {
        assert_eq!(format_file_size(-1), "0 B");
    }
}
