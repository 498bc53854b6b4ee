//! Application configuration and constants

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

static CUSTOM_MODELS_DIR: OnceLock<PathBuf> = OnceLock::new();

// === Model Files ===
pub const MODELS_DIR: &str = "models";
pub const MODEL_EXTENSIONS: &[&str] = &["onnx", "ort"];
pub const MODELS_DIR_ENV: &str = "PNEUMOSCAN_MODELS_DIR";

// === Model Parameters ===
pub const INPUT_SIZE: u32 = 224;
pub const DEFAULT_THRESHOLD: f32 = 0.5;
pub const INTRA_THREADS: usize = 4;

// === Uploads ===
pub const UPLOAD_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png"];
pub const UPLOAD_FIELD: &str = "file";
pub const MAX_UPLOAD_BYTES: u64 = 10 * 1024 * 1024;

// === Server ===
pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 8501;

pub fn set_models_dir(path: PathBuf) {
    let _ = CUSTOM_MODELS_DIR.set(path);
}

/// True when `path` ends in one of [`MODEL_EXTENSIONS`] (case-insensitive)
pub fn is_model_file(path: &Path) -> bool {
    has_extension(path, MODEL_EXTENSIONS)
}

pub fn has_extension(path: &Path, allowed: &[&str]) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|ext| allowed.iter().any(|a| a.eq_ignore_ascii_case(ext)))
        .unwrap_or(false)
}

/// Get models directory (flag, PNEUMOSCAN_MODELS_DIR, ./models, or next to the executable)
pub fn models_dir() -> PathBuf {
    if let Some(custom) = CUSTOM_MODELS_DIR.get() {
        crate::ui::debug(&format!("Using custom models dir: {}", custom.display()));
        return custom.clone();
    }

    if let Ok(env_path) = std::env::var(MODELS_DIR_ENV) {
        let path = PathBuf::from(&env_path);
        if path.is_dir() {
            crate::ui::debug(&format!("Using {}: {}", MODELS_DIR_ENV, env_path));
            return path;
        }
        crate::ui::debug(&format!("{} is not a directory: {}", MODELS_DIR_ENV, env_path));
    }

    let local = PathBuf::from(MODELS_DIR);
    if local.is_dir() {
        return local;
    }

    if let Ok(exe) = std::env::current_exe() {
        if let Some(dir) = exe.parent() {
            let models = dir.join(MODELS_DIR);
            if models.is_dir() {
                crate::ui::debug(&format!("Found models at: {}", models.display()));
                return models;
            }
        }
    }

    local
}
