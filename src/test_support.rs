// テスト用の混同表

use std::collections::HashMap;

use chrono::{DateTime, NaiveDate, Utc};

use crate::error::QuizError;
use crate::kana::{ConfusionCatalog, GroupId};
use crate::ledger::{DailyStats, MistakeLedger, MistakeNote, MistakeRecord, StudyRecordLedger};

pub struct ConfusionTable {
    rows: Vec<(String, GroupId)>,
}

impl ConfusionTable {
    pub fn new(rows: &[(&str, GroupId)]) -> Self {
        Self {
            rows: rows.iter().map(|(c, g)| (c.to_string(), *g)).collect(),
        }
    }
}

impl ConfusionCatalog for ConfusionTable {
    fn lookup_groups(
        &self,
        characters: &[String],
    ) -> Result<HashMap<String, Option<GroupId>>, QuizError> {
        Ok(characters
            .iter()
            .map(|c| {
                let group = self.rows.iter().find(|(k, _)| k == c).map(|(_, g)| *g);
                (c.clone(), group)
            })
            .collect())
    }

    fn find_substitutes(
        &self,
        group: GroupId,
        exclude: &str,
        limit: usize,
    ) -> Result<Vec<String>, QuizError> {
        Ok(self
            .rows
            .iter()
            .filter(|(k, g)| *g == group && k != exclude)
            .take(limit)
            .map(|(k, _)| k.clone())
            .collect())
    }
}

/// 常に失敗する参照先
pub struct BrokenCatalog;

impl ConfusionCatalog for BrokenCatalog {
    fn lookup_groups(
        &self,
        _characters: &[String],
    ) -> Result<HashMap<String, Option<GroupId>>, QuizError> {
        Err(QuizError::Storage(rusqlite::Error::InvalidQuery))
    }

    fn find_substitutes(
        &self,
        _group: GroupId,
        _exclude: &str,
        _limit: usize,
    ) -> Result<Vec<String>, QuizError> {
        Err(QuizError::Storage(rusqlite::Error::InvalidQuery))
    }
}

/// 書き込みが常に失敗する誤答ノート兼学習記録
pub struct FailingLedger;

fn write_failed() -> QuizError {
    QuizError::Storage(rusqlite::Error::ExecuteReturnedResults)
}

impl MistakeLedger for FailingLedger {
    fn record_wrong_at(&self, _note: MistakeNote<'_>, _at: DateTime<Utc>) -> Result<(), QuizError> {
        Err(write_failed())
    }

    fn list(&self) -> Result<Vec<MistakeRecord>, QuizError> {
        Ok(Vec::new())
    }

    fn delete(&self, _word: &str) -> Result<bool, QuizError> {
        Err(write_failed())
    }
}

impl StudyRecordLedger for FailingLedger {
    fn append_at(&self, _word: &str, _is_correct: bool, _at: DateTime<Utc>) -> Result<(), QuizError> {
        Err(write_failed())
    }

    fn append_many(&self, _records: &[(String, bool)]) -> Result<(), QuizError> {
        Err(write_failed())
    }

    fn stats_on(&self, _day: NaiveDate) -> Result<DailyStats, QuizError> {
        Ok(DailyStats::from_counts(0, 0))
    }
}
