use crate::error::{AppResult, FileError};
use crate::models::draft::DraftFile;
use std::path::{Path, PathBuf};
use tokio::fs;

/// 从 TOML 文件加载作业草稿
pub async fn load_draft(toml_file_path: &Path) -> AppResult<DraftFile> {
    let path_display = toml_file_path.display().to_string();

    let content = fs::read_to_string(toml_file_path)
        .await
        .map_err(|e| FileError::ReadFailed {
            path: path_display.clone(),
            source: Box::new(e),
        })?;

    let draft: DraftFile = toml::from_str(&content).map_err(|e| FileError::TomlParseFailed {
        path: path_display,
        source: Box::new(e),
    })?;

    Ok(draft.with_file_path(toml_file_path.to_string_lossy().to_string()))
}

/// 从文件夹中加载所有草稿，按文件名排序
///
/// 单个文件解析失败只记录警告，不影响其他草稿
pub async fn load_all_drafts(folder_path: &str) -> AppResult<Vec<DraftFile>> {
    let folder = PathBuf::from(folder_path);

    if !folder.exists() {
        return Err(FileError::DirectoryNotFound {
            path: folder_path.to_string(),
        }
        .into());
    }

    let mut toml_files = Vec::new();
    let mut entries = fs::read_dir(&folder)
        .await
        .map_err(|e| FileError::ReadFailed {
            path: folder_path.to_string(),
            source: Box::new(e),
        })?;

    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        if path.extension().and_then(|s| s.to_str()) == Some("toml") {
            toml_files.push(path);
        }
    }
    toml_files.sort();

    let mut drafts = Vec::new();
    for path in toml_files {
        tracing::info!(
            "正在加载: {}",
            path.file_name().unwrap_or_default().to_string_lossy()
        );

        match load_draft(&path).await {
            Ok(draft) => {
                tracing::info!("成功加载草稿《{}》，{} 个单词动作", draft.title, draft.actions.len());
                drafts.push(draft);
            }
            Err(e) => {
                tracing::warn!("加载文件失败 {}: {}", path.display(), e);
            }
        }
    }

    Ok(drafts)
}
