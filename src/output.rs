use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

pub const DEFAULT_OUTPUT: &str = "keywords_combinaciones.txt";

const PLANNER_URL: &str = "https://ads.google.com/aw/keywordplanner/ideas/new";

/// Errors returned while writing the keyword artifact.
#[derive(Debug, thiserror::Error)]
pub enum OutputError {
    #[error("Cannot create directory {}: {source}", path.display())]
    CreateDir { path: PathBuf, source: io::Error },

    #[error("Cannot write {}: {source}", path.display())]
    Write { path: PathBuf, source: io::Error },
}

/// Write `keywords` as UTF-8, one per line, each line ending in `\n`.
///
/// Content lands in a sibling temp file that is renamed over `path`, so a
/// failed run never leaves a truncated artifact behind.
pub fn write_keywords(path: &Path, keywords: &[String]) -> Result<(), OutputError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| OutputError::CreateDir {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    let tmp = temp_path(path);
    let result = write_lines(&tmp, keywords).and_then(|()| fs::rename(&tmp, path));
    if let Err(source) = result {
        match fs::remove_file(&tmp) {
            Err(e) if e.kind() != io::ErrorKind::NotFound => {
                warn!(path = %tmp.display(), error = %e, "failed to remove temp file");
            }
            _ => {}
        }
        return Err(OutputError::Write {
            path: path.to_path_buf(),
            source,
        });
    }

    debug!(path = %path.display(), count = keywords.len(), "wrote keywords");
    Ok(())
}

/// Stream keywords to any writer in artifact format.
pub fn write_to(mut out: impl Write, keywords: &[String]) -> io::Result<()> {
    for keyword in keywords {
        out.write_all(keyword.as_bytes())?;
        out.write_all(b"\n")?;
    }
    out.flush()
}

fn write_lines(path: &Path, keywords: &[String]) -> io::Result<()> {
    let file = fs::File::create(path)?;
    let mut writer = BufWriter::new(file);
    write_to(&mut writer, keywords)?;
    writer.into_inner().map_err(io::IntoInnerError::into_error)?.sync_all()
}

/// Hidden sibling `.<name>.<pid>.tmp`, so the rename stays on one filesystem.
fn temp_path(path: &Path) -> PathBuf {
    let mut name = std::ffi::OsString::from(".");
    name.push(path.file_name().unwrap_or_default());
    name.push(format!(".{}.tmp", std::process::id()));
    path.with_file_name(name)
}

/// Console report printed after a successful write.
pub fn summary(count: usize, path: &Path) -> String {
    format!(
        "Generated {count} unique keywords\n\
         Saved to: {}\n\
         \n\
         Paste the file contents into Google Keyword Planner:\n  \
         {PLANNER_URL}\n  \
         -> 'Get search volume and forecasts'",
        path.display()
    )
}
