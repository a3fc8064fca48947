use crate::utils::config::REPORT_SCHEMA_VERSION;

/// Version banner shown by `--info`
pub fn version_text() -> String {
    format!(
        "{} v{}\nReport Schema: v{}\n\nConverts mGBA binary execution traces into SQLite control-flow databases.",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION"),
        REPORT_SCHEMA_VERSION
    )
}

/// Display version information
pub fn display_version() {
    println!("{}", version_text());
}
