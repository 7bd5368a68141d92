// ============================================
// src/error.rs
// エラー型の定義
// ============================================

use thiserror::Error;

/// このクレート全体で使うエラー
///
/// 「誤答の選択肢が足りない」はエラーではなく、`distractor::GenerationFailure` で表す。
#[derive(Error, Debug)]
pub enum QuizError {
    #[error("storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("prompt error: {0}")]
    Prompt(#[from] dialoguer::Error),

    #[error("invalid lesson selection: {0}")]
    InvalidLessonSelection(String),

    #[error("question count must be between 1 and 50 (got {0})")]
    InvalidQuestionCount(u32),

    #[error("word must not be empty")]
    EmptyWord,

    #[error("corrupt timestamp in storage: {0}")]
    CorruptTimestamp(String),

    #[error("could not resolve a data directory")]
    NoDataDirectory,
}

impl QuizError {
    /// ストレージ由来の失敗か（表示で「問題不足」と区別するため）
    pub fn is_storage(&self) -> bool {
        matches!(self, QuizError::Storage(_) | QuizError::CorruptTimestamp(_))
    }
}
