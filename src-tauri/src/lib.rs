use std::path::PathBuf;

use kitchen_order::config::StoreConfig;
use kitchen_order::models::{AppError, GenerateForm, GenerateResponse, UploadView};
use kitchen_order::storage::artifacts::{ArtifactEntry, ArtifactStore};
use tauri::ipc::Response;
use tauri::{Manager, State};

struct AppState {
    store: ArtifactStore,
}

/// 在庫表ファイルを読み込み、編集用の表と過去の在庫マスタ一覧を返す
#[tauri::command]
fn upload_inventory(state: State<'_, AppState>, path: String) -> Result<UploadView, AppError> {
    kitchen_order::upload_inventory(&state.store, &PathBuf::from(path))
}

/// 編集済みの表から在庫マスタを保存し、下書きまたは発注リストを生成する
///
/// # 戻り値
/// 下書きの場合は完了メッセージ、それ以外は発注リストのファイル名とパス
#[tauri::command]
fn generate_order(
    state: State<'_, AppState>,
    form: GenerateForm,
) -> Result<GenerateResponse, AppError> {
    kitchen_order::generate_order(&state.store, &form, kitchen_order::today())
}

#[tauri::command]
fn list_master_inventories(state: State<'_, AppState>) -> Result<Vec<ArtifactEntry>, AppError> {
    kitchen_order::master_inventories(&state.store)
}

/// 成果物ディレクトリ内のファイルをバイト列で返す
#[tauri::command]
fn download_artifact(state: State<'_, AppState>, file_name: String) -> Result<Response, AppError> {
    let bytes = kitchen_order::download_artifact(&state.store, &file_name)?;
    Ok(Response::new(bytes))
}

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    tauri::Builder::default()
        .plugin(tauri_plugin_opener::init())
        .plugin(tauri_plugin_dialog::init())
        .plugin(tauri_plugin_fs::init())
        .setup(|app| {
            let default_dir = app.path().app_data_dir()?.join("uploads");
            let config = StoreConfig::from_env_or(&default_dir);
            let store = ArtifactStore::open(&config)?;
            app.manage(AppState { store });
            Ok(())
        })
        .invoke_handler(tauri::generate_handler![
            upload_inventory,
            generate_order,
            list_master_inventories,
            download_artifact
        ])
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
