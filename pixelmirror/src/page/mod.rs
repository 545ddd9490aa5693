//! HTML map page rendering
//!
//! Emits the clickable map: the composite image wrapped in an HTML image
//! map with one `<area>` per tile, built entirely from the cached
//! `{owner, url}` projections. The chain is never consulted here.
//!
//! All 3969 cache entries are fetched with a single batched multi-get;
//! a tile that was never rendered reads as empty fields and still gets
//! its area, so one cold cache key can never block page generation.

use crate::grid::Location;
use crate::store::{CacheEntry, StoreError, TileStore};
use std::fmt;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;

/// Errors that can occur rendering the map page.
#[derive(Debug)]
pub enum PageError {
    /// Cache read failed; the page cannot be built without it
    Store(StoreError),
    /// Could not write the HTML document
    Io {
        /// Path being written
        path: String,
        /// Underlying error
        error: std::io::Error,
    },
}

impl fmt::Display for PageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageError::Store(e) => write!(f, "Cache read failed: {}", e),
            PageError::Io { path, error } => write!(f, "Failed to write '{}': {}", path, error),
        }
    }
}

impl std::error::Error for PageError {}

impl From<StoreError> for PageError {
    fn from(err: StoreError) -> Self {
        PageError::Store(err)
    }
}

/// Renders the HTML map page from cached tile projections.
pub struct MapPageRenderer {
    store: Arc<dyn TileStore>,
    output_path: PathBuf,
    /// `src` of the composite image referenced by the page
    composite_src: String,
}

impl MapPageRenderer {
    /// Create a renderer writing the page to `output_path`, referencing
    /// the composite image at `composite_src` (a URL or relative path).
    pub fn new(store: Arc<dyn TileStore>, output_path: PathBuf, composite_src: String) -> Self {
        Self {
            store,
            output_path,
            composite_src,
        }
    }

    /// Build and write the HTML document.
    pub fn render_page(&self) -> Result<(), PageError> {
        let keys: Vec<String> = Location::all().map(|l| l.to_string()).collect();
        let maps = self.store.multi_get(&keys)?;

        let mut html = String::with_capacity(64 * 1024);
        html.push_str(HTML_HEADER_PRE);
        let _ = writeln!(
            html,
            "            <img src=\"{}\" class=\"map\" usemap=\"#tilemap\" id=\"background\" alt=\"tile map\" />",
            self.composite_src
        );
        html.push_str(HTML_HEADER_POST);

        for (location, fields) in Location::all().zip(&maps) {
            let entry = CacheEntry::from_fields(fields);
            let href = with_scheme(&entry.url);
            let rect = location.pixel_rect();
            let _ = writeln!(
                html,
                "            <area href=\"{}\" shape=\"rect\" coords=\"{},{},{},{}\" alt=\"{}\"/>",
                href, rect.left, rect.top, rect.right, rect.bottom, entry.url
            );
        }

        html.push_str(HTML_FOOTER);

        if let Some(parent) = self.output_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| PageError::Io {
                path: parent.display().to_string(),
                error: e,
            })?;
        }
        std::fs::write(&self.output_path, html).map_err(|e| PageError::Io {
            path: self.output_path.display().to_string(),
            error: e,
        })?;

        info!(path = %self.output_path.display(), "wrote map page");
        Ok(())
    }

    /// Path the page is written to.
    pub fn output_path(&self) -> &Path {
        &self.output_path
    }
}

/// Prefix a URL with `http://` unless it already carries a scheme.
fn with_scheme(url: &str) -> String {
    if url.contains("://") {
        url.to_string()
    } else {
        format!("http://{}", url)
    }
}

const HTML_HEADER_PRE: &str = "\
<!DOCTYPE HTML>
<html>
    <head>
        <meta charset=\"utf-8\" />
        <title>PixelMirror</title>
        <link rel=\"stylesheet\" type=\"text/css\" href=\"css/style.css\">
    </head>
    <body>
        <div id=\"canvas\">
";

const HTML_HEADER_POST: &str = "\
        </div>
        <map name=\"tilemap\">
";

const HTML_FOOTER: &str = "\
        </map>
    </body>
</html>
";
