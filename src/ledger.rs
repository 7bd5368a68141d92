// ============================================
// src/ledger.rs
// 誤答ノートと学習記録
// ============================================

use chrono::{DateTime, Local, NaiveDate, Utc};
use serde::Serialize;

use crate::error::QuizError;
use crate::question::VocabularyEntry;

/// 間違えた単語の記録（単語ごとに1件）
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MistakeRecord {
    pub word: String,
    pub reading: Option<String>,
    pub meaning: Option<String>,
    pub lesson: Option<String>,
    pub wrong_count: u32,
    pub last_wrong_at: DateTime<Utc>,
}

/// 誤答ノートに書き込む内容
///
/// 単語帳にない単語でも記録できるよう、読み・意味・課は省略できる。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MistakeNote<'a> {
    pub word: &'a str,
    pub reading: Option<&'a str>,
    pub meaning: Option<&'a str>,
    pub lesson: Option<&'a str>,
}

impl<'a> MistakeNote<'a> {
    pub fn bare(word: &'a str) -> Self {
        Self {
            word,
            reading: None,
            meaning: None,
            lesson: None,
        }
    }
}

impl<'a> From<&'a VocabularyEntry> for MistakeNote<'a> {
    fn from(entry: &'a VocabularyEntry) -> Self {
        Self {
            word: &entry.word,
            reading: Some(&entry.reading),
            meaning: entry.meaning(),
            lesson: Some(&entry.lesson),
        }
    }
}

/// 今日の学習量
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyStats {
    pub total_answered: u32,
    /// 0.0〜100.0、小数第1位まで
    pub accuracy_percent: f64,
}

impl DailyStats {
    pub fn from_counts(total: u32, correct: u32) -> Self {
        let accuracy_percent = if total > 0 {
            (1000.0 * f64::from(correct) / f64::from(total)).round() / 10.0
        } else {
            0.0
        };
        Self {
            total_answered: total,
            accuracy_percent,
        }
    }
}

/// 誤答ノート
pub trait MistakeLedger {
    /// 単語をキーに追加または更新する（`wrong_count` は増えるだけ）
    ///
    /// 既存の行は読み・意味・課を最新の値で上書きする。
    fn record_wrong_at(&self, note: MistakeNote<'_>, at: DateTime<Utc>) -> Result<(), QuizError>;

    fn record_wrong(&self, note: MistakeNote<'_>) -> Result<(), QuizError> {
        self.record_wrong_at(note, Utc::now())
    }

    /// 最近間違えた順
    fn list(&self) -> Result<Vec<MistakeRecord>, QuizError>;

    /// 消したら true
    fn delete(&self, word: &str) -> Result<bool, QuizError>;
}

/// 解答ごとの記録（追記のみ）
pub trait StudyRecordLedger {
    fn append_at(&self, word: &str, is_correct: bool, at: DateTime<Utc>)
    -> Result<(), QuizError>;

    fn append(&self, word: &str, is_correct: bool) -> Result<(), QuizError> {
        self.append_at(word, is_correct, Utc::now())
    }

    /// まとめて1トランザクションで追記する
    fn append_many(&self, records: &[(String, bool)]) -> Result<(), QuizError>;

    /// ローカル日付 `day` の集計
    fn stats_on(&self, day: NaiveDate) -> Result<DailyStats, QuizError>;

    fn daily_stats(&self) -> Result<DailyStats, QuizError> {
        self.stats_on(Local::now().date_naive())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accuracy_rounds_to_one_decimal() {
        assert_eq!(DailyStats::from_counts(3, 2).accuracy_percent, 66.7);
        assert_eq!(DailyStats::from_counts(3, 1).accuracy_percent, 33.3);
        assert_eq!(DailyStats::from_counts(4, 4).accuracy_percent, 100.0);
    }

    #[test]
    fn note_from_entry_drops_blank_meaning() {
        let entry = VocabularyEntry {
            word: "山".to_string(),
            reading: "やま".to_string(),
            meaning: Some("  ".to_string()),
            lesson: "Lesson 2".to_string(),
        };
        let note = MistakeNote::from(&entry);
        assert_eq!(note.reading, Some("やま"));
        assert_eq!(note.meaning, None);
        assert_eq!(note.lesson, Some("Lesson 2"));
    }

    #[test]
    fn no_answers_means_zero_accuracy() {
        let stats = DailyStats::from_counts(0, 0);
        assert_eq!(stats.total_answered, 0);
        assert_eq!(stats.accuracy_percent, 0.0);
    }
}
