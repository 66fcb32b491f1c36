//! Exporting snippets as a gzipped tar archive, one file per snippet,
//! named `<sanitized-name>-<id8>.<ext>` with the extension drawn from the
//! snippet's language.

use crate::error::{Result, StashError};
use crate::model::Snippet;
use chrono::Utc;
use flate2::write::GzEncoder;
use flate2::Compression;
use std::io::Write;

/// Default archive filename, timestamped to avoid clobbering.
pub fn default_filename() -> String {
    format!("snipstash-{}.tar.gz", Utc::now().format("%Y-%m-%d_%H%M%S"))
}

/// Streams the given snippets into a tar.gz archive.
pub fn write_archive<W: Write>(writer: W, snippets: &[Snippet]) -> Result<()> {
    let enc = GzEncoder::new(writer, Compression::default());
    let mut tar = tar::Builder::new(enc);

    for snippet in snippets {
        let entry_name = format!(
            "snipstash/{}-{}.{}",
            sanitize_filename(&snippet.name),
            &snippet.id.to_string()[..8],
            snippet.language.file_extension()
        );

        let mut header = tar::Header::new_gnu();
        header.set_size(snippet.code.len() as u64);
        header.set_mode(0o644);
        header.set_cksum();

        tar.append_data(&mut header, entry_name, snippet.code.as_bytes())
            .map_err(StashError::Io)?;
    }

    let enc = tar.into_inner().map_err(StashError::Io)?;
    enc.finish().map_err(StashError::Io)?;
    Ok(())
}

fn sanitize_filename(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_alphanumeric() || c == ' ' || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect::<String>()
        .trim()
        .to_string()
}
