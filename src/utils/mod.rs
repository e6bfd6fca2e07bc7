use std::io;
use std::path::PathBuf;
use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Initializes the global tracing subscriber with sensible defaults.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, EnvFilter};

        let filter =
            EnvFilter::from_default_env().add_directive("station_core=info".parse().unwrap());

        fmt().with_env_filter(filter).init();
    });
}

/// Resolves the base data directory. `STATION_CORE_DATA_DIR` overrides the
/// platform default so tests and scripted runs stay isolated.
pub fn base_dir() -> PathBuf {
    if let Some(dir) = std::env::var_os("STATION_CORE_DATA_DIR") {
        return PathBuf::from(dir);
    }
    dirs::data_dir()
        .map(|dir| dir.join("station_core"))
        .unwrap_or_else(|| PathBuf::from(".station_core"))
}

pub fn ensure_dir(path: &std::path::Path) -> io::Result<()> {
    if !path.exists() {
        std::fs::create_dir_all(path)?;
    }
    Ok(())
}
