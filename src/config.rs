use std::path::PathBuf;

/// Dataset read at startup when no path is given.
pub const DEFAULT_DATA_FILE: &str = "all_data.csv";

// ---------------------------------------------------------------------------
// Startup configuration
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardConfig {
    pub data_path: PathBuf,
    pub window_size: [f32; 2],
    pub min_window_size: [f32; 2],
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(DEFAULT_DATA_FILE),
            window_size: [1280.0, 860.0],
            min_window_size: [640.0, 420.0],
        }
    }
}

impl DashboardConfig {
    /// Build from process arguments (program name already skipped).
    /// The only input is an optional positional data path.
    pub fn from_args<I>(args: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        let mut config = Self::default();
        if let Some(path) = args.into_iter().next() {
            config.data_path = PathBuf::from(path);
        }
        config
    }
}
