//! Full-page rendering and publishing.
//!
//! The page is written to a uniquely named temp file next to its destination
//! and then persisted over it, so a browser reloading the file sees the
//! previous grid or the new one. Two panels sharing an output never share a
//! temp file, and a failed persist removes its temp file.
use chrono::{DateTime, Utc};
use log::debug;
use rates_common::Result;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

use crate::model::card::{Grid, stylesheet};

/// Wrap the grid and the stylesheet into an HTML document.
pub fn render_page(grid: &Grid, refreshed_at: Option<DateTime<Utc>>) -> String {
    let status = match refreshed_at {
        Some(at) => format!("Refreshed {}", at.format("%Y-%m-%d %H:%M:%S UTC")),
        None => String::from("Not refreshed yet"),
    };
    format!(
        concat!(
            "<!DOCTYPE html>\n",
            "<html>\n<head>\n<meta charset=\"utf-8\">\n",
            "<title>Crypto rates</title>\n",
            "<style>\n{css}</style>\n",
            "</head>\n<body>\n",
            "<p class=\"status\">{status}</p>\n",
            "{grid}",
            "</body>\n</html>\n"
        ),
        css = stylesheet(),
        status = status,
        grid = grid.markup(),
    )
}

/// Replace the file at `path` with `html`.
pub fn write_page(path: &Path, html: &str) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(html.as_bytes())?;
    tmp.persist(path).map_err(|e| e.error)?;
    debug!("Page written to {} ({} bytes)", path.display(), html.len());
    Ok(())
}
