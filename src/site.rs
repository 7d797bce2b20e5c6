//! # Static Site Files
//!
//! Layout of the generated site:
//! ```text
//! <out>/
//!   index.md               link to the modulation plans page
//!   gantt.md               one <iframe> per chart
//!   _config.yml            Jekyll theme selection
//!   assets/css/style.scss  width override for the theme
//!   gantt/<piece>.html     one chart per piece
//! ```

use crate::error::ChartError;
use std::fs;
use std::path::{Path, PathBuf};

pub const GANTT_DIR: &str = "gantt";
pub const INDEX_FNAME: &str = "index.md";
pub const GANTT_FNAME: &str = "gantt.md";
pub const JEKYLL_CFG_FNAME: &str = "_config.yml";
pub const STYLE_FNAME: &str = "assets/css/style.scss";

const INDEX_FILE: &str = "
* [Modulation plans](gantt.md)
";

const JEKYLL_CFG_FILE: &str = "theme: jekyll-theme-tactile ";

const STYLE_FILE: &str = r#"---
---

@import "{{ site.theme }}";

.inner {
  max-width: 95%;
  width: 1024px;
}
"#;

fn output_error(path: &Path, source: std::io::Error) -> ChartError {
    ChartError::OutputPath {
        path: path.to_path_buf(),
        source,
    }
}

/// Create `<out>/gantt` if needed and return it.
pub fn prepare_output(out_dir: &Path) -> Result<PathBuf, ChartError> {
    let gantt_dir = out_dir.join(GANTT_DIR);
    fs::create_dir_all(&gantt_dir).map_err(|e| output_error(&gantt_dir, e))?;
    Ok(gantt_dir)
}

/// File name of a piece's chart. Path separators in the piece name are
/// replaced so every chart lands directly in the gantt directory.
pub fn chart_file_name(piece: &str) -> String {
    let safe: String = piece
        .chars()
        .map(|c| if matches!(c, '/' | '\\') { '_' } else { c })
        .collect();
    format!("{}.html", safe)
}

/// Write `content` to `<out>/<relative>`, creating parent directories.
pub fn write_file(out_dir: &Path, relative: &str, content: &str) -> Result<PathBuf, ChartError> {
    let path = out_dir.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| output_error(parent, e))?;
    }
    fs::write(&path, content).map_err(|e| output_error(&path, e))?;
    Ok(path)
}

/// The listing page: one frame per chart file, sorted by file name.
pub fn gantt_listing(gantt_dir: &Path) -> Result<String, ChartError> {
    let entries = fs::read_dir(gantt_dir).map_err(|e| output_error(gantt_dir, e))?;
    let mut names: Vec<String> = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| output_error(gantt_dir, e))?;
        if entry.path().is_file() {
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
    }
    names.sort();

    Ok(names
        .iter()
        .map(|name| {
            format!(
                r#"<iframe id="igraph" scrolling="no" style="border:none;" seamless="seamless" src="{}/{}" height="600" width="100%"></iframe>"#,
                GANTT_DIR, name
            )
        })
        .collect::<Vec<_>>()
        .join("\n"))
}

/// Write the index, theme config, stylesheet and listing page.
pub fn write_site(out_dir: &Path) -> Result<Vec<PathBuf>, ChartError> {
    let listing = gantt_listing(&out_dir.join(GANTT_DIR))?;
    Ok(vec![
        write_file(out_dir, INDEX_FNAME, INDEX_FILE)?,
        write_file(out_dir, JEKYLL_CFG_FNAME, JEKYLL_CFG_FILE)?,
        write_file(out_dir, STYLE_FNAME, STYLE_FILE)?,
        write_file(out_dir, GANTT_FNAME, &listing)?,
    ])
}
