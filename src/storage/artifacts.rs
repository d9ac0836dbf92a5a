use std::fs;
use std::path::{Component, Path, PathBuf};

use chrono::{DateTime, Local, NaiveDate};
use serde::Serialize;

use crate::config::StoreConfig;
use crate::models::AppError;
use crate::utils::text::kitchen_slug;

pub const ARTIFACT_EXTENSION: &str = "xlsx";

/// 生成されるファイルの種類
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactKind {
    MasterInventory,
    Draft,
    OrderList,
}

impl ArtifactKind {
    pub fn suffix(self) -> &'static str {
        match self {
            ArtifactKind::MasterInventory => "master_inventory",
            ArtifactKind::Draft => "draft",
            ArtifactKind::OrderList => "order_list",
        }
    }
}

/// 一覧表示用のファイル情報
#[derive(Debug, Clone, Serialize)]
pub struct ArtifactEntry {
    pub name: String,
    pub path: String,
    pub modified: DateTime<Local>,
}

/// `{キッチン名}_{日付}_{種類}.xlsx`
pub fn artifact_file_name(kitchen: &str, date: NaiveDate, kind: ArtifactKind) -> String {
    format!(
        "{}_{}_{}.{}",
        kitchen_slug(kitchen),
        date.format("%Y-%m-%d"),
        kind.suffix(),
        ARTIFACT_EXTENSION
    )
}

/// 成果物ディレクトリ（同名ファイルは上書き、ロックなし）
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    dir: PathBuf,
}

impl ArtifactStore {
    /// ディレクトリが無ければ作成して開く
    pub fn open(config: &StoreConfig) -> Result<Self, AppError> {
        fs::create_dir_all(&config.artifact_dir)?;
        log::info!("artifact directory: {}", config.artifact_dir.display());
        Ok(Self {
            dir: config.artifact_dir.clone(),
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, kitchen: &str, date: NaiveDate, kind: ArtifactKind) -> PathBuf {
        self.dir.join(artifact_file_name(kitchen, date, kind))
    }

    /// 指定種類のファイルを更新日時の新しい順に列挙する
    pub fn list(&self, kind: ArtifactKind) -> Result<Vec<ArtifactEntry>, AppError> {
        let suffix = format!("_{}.{}", kind.suffix(), ARTIFACT_EXTENSION);
        let mut entries = Vec::new();

        for entry in fs::read_dir(&self.dir)? {
            let entry = entry?;
            let name = entry.file_name().to_string_lossy().into_owned();
            if !name.ends_with(&suffix) {
                continue;
            }
            let metadata = entry.metadata()?;
            if !metadata.is_file() {
                continue;
            }
            entries.push(ArtifactEntry {
                name,
                path: entry.path().to_string_lossy().into_owned(),
                modified: DateTime::<Local>::from(metadata.modified()?),
            });
        }

        entries.sort_by(|a, b| b.modified.cmp(&a.modified).then_with(|| b.name.cmp(&a.name)));
        Ok(entries)
    }

    /// ダウンロード対象のパスを解決する（ディレクトリ直下のファイル名のみ許可）
    pub fn resolve_download(&self, file_name: &str) -> Result<PathBuf, AppError> {
        if !is_bare_file_name(file_name) {
            log::warn!("rejected download request: {:?}", file_name);
            return Err(AppError::InvalidFileName(file_name.to_string()));
        }

        let path = self.dir.join(file_name);
        if !path.is_file() {
            return Err(AppError::NotFound(file_name.to_string()));
        }
        Ok(path)
    }

    pub fn read(&self, file_name: &str) -> Result<Vec<u8>, AppError> {
        let path = self.resolve_download(file_name)?;
        Ok(fs::read(path)?)
    }
}

fn is_bare_file_name(file_name: &str) -> bool {
    if file_name.is_empty() || file_name.contains(['/', '\\']) {
        return false;
    }
    let mut components = Path::new(file_name).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    )
}
