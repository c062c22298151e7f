//! SVGのファイル出力とクリップボードへのコピー

use crate::error::{Result, SvgGeniusError};
use std::path::{Path, PathBuf};
use svg_genius_common::{actions_available, download_file_name};

/// `<dir>/illustration-<timestamp>.svg` に書き出す
///
/// マークアップが空の場合は何もせず None を返す。
pub fn write_svg(markup: &str, dir: &Path, timestamp_ms: i64) -> Result<Option<PathBuf>> {
    if !actions_available(markup) {
        return Ok(None);
    }
    std::fs::create_dir_all(dir)?;
    let path = dir.join(download_file_name(timestamp_ms));
    std::fs::write(&path, markup)?;
    tracing::info!(path = %path.display(), "svg written");
    Ok(Some(path))
}

/// システムクリップボードにそのままコピー
pub fn copy_to_clipboard(markup: &str) -> Result<()> {
    if !actions_available(markup) {
        return Err(SvgGeniusError::EmptyMarkup);
    }
    let mut clipboard =
        arboard::Clipboard::new().map_err(|e| SvgGeniusError::Clipboard(e.to_string()))?;
    clipboard
        .set_text(markup)
        .map_err(|e| SvgGeniusError::Clipboard(e.to_string()))?;
    Ok(())
}
