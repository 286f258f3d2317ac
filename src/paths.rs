use std::path::PathBuf;

/// Returns the application data directory, created on demand by
/// [`ensure_directories`].
pub fn get_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("postalcam")
}

/// Default location of the detections database.
pub fn default_db_path() -> PathBuf {
    get_data_dir().join("detections.db")
}

/// Ensures the data directory exists. Call at startup.
pub fn ensure_directories() -> std::io::Result<()> {
    std::fs::create_dir_all(get_data_dir())
}
