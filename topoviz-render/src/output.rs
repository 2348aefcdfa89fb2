// Files are written to a temporary sibling first and renamed into place, so a
// failed run never leaves a truncated image behind

use crate::error::Result;
use image::codecs::png::PngEncoder;
use image::{ColorType, ImageEncoder, RgbImage};
use std::io::{BufWriter, Write};
use std::path::Path;
use tempfile::NamedTempFile;
use topoviz_core::GraphSnapshot;
use tracing::info;

pub fn save_png(image: &RgbImage, path: &Path) -> Result<()> {
    write_atomically(path, |writer| {
        PngEncoder::new(writer).write_image(
            image.as_raw(),
            image.width(),
            image.height(),
            ColorType::Rgb8,
        )?;
        Ok(())
    })?;
    info!(
        "Wrote {}x{} image to {}",
        image.width(),
        image.height(),
        path.display()
    );
    Ok(())
}

/// Write the graph's nodes and edges as pretty JSON
pub fn export_snapshot(snapshot: &GraphSnapshot, path: &Path) -> Result<()> {
    write_atomically(path, |writer| {
        serde_json::to_writer_pretty(&mut *writer, snapshot)?;
        writeln!(writer)?;
        Ok(())
    })?;
    info!(
        "Exported {} nodes and {} edges to {}",
        snapshot.nodes.len(),
        snapshot.edges.len(),
        path.display()
    );
    Ok(())
}

fn write_atomically<F>(path: &Path, write: F) -> Result<()>
where
    F: FnOnce(&mut dyn Write) -> Result<()>,
{
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut temp = NamedTempFile::new_in(dir)?;
    {
        let mut writer = BufWriter::new(temp.as_file_mut());
        write(&mut writer as &mut dyn Write)?;
        writer.flush()?;
    }
    temp.as_file().sync_all()?;

    // Temp files are created owner-only
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        temp.as_file()
            .set_permissions(std::fs::Permissions::from_mode(0o644))?;
    }

    temp.persist(path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failed_write_leaves_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("out.bin");

        let result = write_atomically(&target, |writer| {
            writer.write_all(b"partial")?;
            Err(crate::RenderError::InvalidOptions("boom".to_string()))
        });

        assert!(result.is_err());
        assert!(!target.exists());
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_write_replaces_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("out.txt");
        std::fs::write(&target, "old").unwrap();

        write_atomically(&target, |writer| {
            writer.write_all(b"new")?;
            Ok(())
        })
        .unwrap();

        assert_eq!(std::fs::read_to_string(&target).unwrap(), "new");
    }
}
