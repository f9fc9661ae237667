pub mod csv;
pub mod json;
pub mod scenario;

use std::path::Path;

pub use json::{write_summary, write_summary_file, FlightSummary};
pub use scenario::{load_scenario, parse_scenario};

fn create_parent_dirs(path: &Path) -> std::io::Result<()> {
    match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => std::fs::create_dir_all(dir),
        _ => Ok(()),
    }
}
