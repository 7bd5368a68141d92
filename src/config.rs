// ============================================
// src/config.rs
// 設定の構造と読み込みロジック
// ============================================

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use std::fs::{self, File};
use std::io::BufReader;
use std::path::{Path, PathBuf};

use crate::error::QuizError;

const CONFIG_FILE: &str = "config.json";
const DATABASE_FILE: &str = "kanadrill.db";

/// 各コンポーネントに渡す設定
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// 1問あたりの誤答の数
    pub distractor_count: usize,
    /// 誤答生成の最大試行回数
    pub max_attempts: usize,
    /// 置換候補を何件まで取るか
    pub substitute_limit: usize,
    /// 対話モードの既定の問題数
    pub question_count: u32,
    pub debug: bool,
    /// None ならデータディレクトリの kanadrill.db
    pub database: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            distractor_count: 3,
            max_attempts: 20,
            substitute_limit: 10,
            question_count: 15,
            debug: false,
            database: None,
        }
    }
}

impl Settings {
    // MARK:プラットフォームごとのディレクトリ
    fn project_dirs() -> Option<ProjectDirs> {
        ProjectDirs::from("jp", "Fukumoto0141", "KANA_DRILL")
    }

    /// 設定ファイルのパス
    pub fn config_file_path() -> Option<PathBuf> {
        Self::project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILE))
    }

    /// MARK:設定ファイルを読み込む (失敗時はデフォルト)
    pub fn load() -> Self {
        match Self::config_file_path() {
            Some(path) if path.exists() => Self::load_from(&path).unwrap_or_else(|e| {
                log::warn!("could not read {}: {e}; using defaults", path.display());
                Self::default()
            }),
            _ => Self::default(),
        }
    }

    pub fn load_from(path: &Path) -> Result<Self, QuizError> {
        let reader = BufReader::new(File::open(path)?);
        Ok(serde_json::from_reader(reader)?)
    }

    /// 使用するデータベースファイルのパスを決める
    ///
    /// データディレクトリがまだなければ作成する。
    pub fn database_path(&self) -> Result<PathBuf, QuizError> {
        if let Some(path) = &self.database {
            return Ok(path.clone());
        }
        let dirs = Self::project_dirs().ok_or(QuizError::NoDataDirectory)?;
        let data_dir = dirs.data_dir();
        if !data_dir.exists() {
            fs::create_dir_all(data_dir)?;
        }
        Ok(data_dir.join(DATABASE_FILE))
    }

    /// ロガーの既定フィルタ
    pub fn log_filter(&self) -> &'static str {
        if self.debug { "debug" } else { "warn" }
    }
}
