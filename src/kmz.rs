//! KMZ archive assembly.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use zip::ZipWriter;
use zip::write::SimpleFileOptions;

use crate::error::Result;
use crate::style::StyleDef;

/// Name of the document entry at the archive root.
pub const DOC_NAME: &str = "doc.kml";

/// Write the KMZ archive: the rendered document as `doc.kml` plus one
/// root-level entry per icon-carrying style, named by base file name so
/// the `doc.kml` icon references resolve relatively.
///
/// Failures are surfaced to the caller; a partially written archive is
/// not removed (the caller treats a failed run's output as unreliable).
pub(crate) fn write_kmz(path: &Path, kml_path: &Path, styles: &[StyleDef]) -> Result<()> {
    let file = File::create(path)?;
    let mut zip = ZipWriter::new(file);
    let options =
        SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);

    zip.start_file(DOC_NAME, options)?;
    let mut kml = File::open(kml_path)?;
    io::copy(&mut kml, &mut zip)?;

    for style in styles {
        if let Some((file_name, data)) = style.icon() {
            zip.start_file(file_name, options)?;
            zip.write_all(data)?;
        }
    }

    zip.finish()?;
    Ok(())
}
