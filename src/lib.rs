pub mod config;
pub mod models;
pub mod utils;

pub mod exporters;
pub mod parsers;
pub mod processors;
pub mod storage;

use std::path::Path;

use chrono::{Local, NaiveDate};

use config::DEFAULT_KITCHEN_NAME;
use models::{AppError, GenerateForm, GenerateResponse, UploadView};
use processors::order::{OrderOutcome, OrderPipeline};
use processors::roles::KeywordRoleResolver;
use storage::artifacts::{ArtifactEntry, ArtifactKind, ArtifactStore};

pub const DRAFT_SAVED_MESSAGE: &str = "Draft saved successfully";

/// 在庫表をアップロードし、編集画面用のデータと過去の在庫マスタ一覧を返す
pub fn upload_inventory(store: &ArtifactStore, path: &Path) -> Result<UploadView, AppError> {
    let parse = parsers::parse_inventory_file(path)?;
    let master_inventories = store.list(ArtifactKind::MasterInventory)?;
    Ok(UploadView::new(parse, master_inventories))
}

/// 編集済みの表から在庫マスタを保存し、下書きまたは発注リストを生成する
///
/// # 引数
/// * `store` - 成果物ディレクトリ
/// * `form` - 編集画面から送信されたフォーム
/// * `date` - ファイル名に使う日付（通常は当日）
pub fn generate_order(
    store: &ArtifactStore,
    form: &GenerateForm,
    date: NaiveDate,
) -> Result<GenerateResponse, AppError> {
    let kitchen = form
        .kitchen_name
        .as_deref()
        .unwrap_or(DEFAULT_KITCHEN_NAME);
    let table = parsers::form::table_from_form(form);

    let pipeline = OrderPipeline::new(store, KeywordRoleResolver::default());
    match pipeline.run(table, kitchen, date, form.action)? {
        OrderOutcome::Draft { .. } => Ok(GenerateResponse::Draft {
            message: DRAFT_SAVED_MESSAGE.to_string(),
        }),
        OrderOutcome::OrderList { order_list, .. } => Ok(GenerateResponse::OrderList {
            file_name: order_list
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default(),
            path: order_list.to_string_lossy().into_owned(),
        }),
    }
}

/// 生成済みの在庫マスタ一覧（新しい順）
pub fn master_inventories(store: &ArtifactStore) -> Result<Vec<ArtifactEntry>, AppError> {
    store.list(ArtifactKind::MasterInventory)
}

/// 成果物ディレクトリ内のファイルを読み込む
pub fn download_artifact(store: &ArtifactStore, file_name: &str) -> Result<Vec<u8>, AppError> {
    store.read(file_name)
}

/// ローカル時刻での当日
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}
