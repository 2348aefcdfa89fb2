use std::path::Path;
use tracing::{info, warn};

/// Open a saved image in the platform's default viewer.
///
/// Headless machines have no viewer; that is logged and reported as `false`,
/// never as an error, since the file is already on disk.
pub fn show_image(path: &Path) -> bool {
    match open::that_detached(path) {
        Ok(()) => {
            info!("Opened {} in the default viewer", path.display());
            true
        }
        Err(e) => {
            warn!("Could not open a viewer for {}: {}", path.display(), e);
            false
        }
    }
}
