// ============================================
// src/store.rs
// SQLite への保存と読み込み
// ============================================

use std::collections::{BTreeSet, HashMap};
use std::path::Path;

use chrono::{DateTime, Days, Local, NaiveDate, SecondsFormat, TimeZone, Utc};
use rusqlite::{Connection, OptionalExtension, params, params_from_iter};
use serde::{Deserialize, Serialize};

use crate::error::QuizError;
use crate::kana::{ConfusionCatalog, GroupId};
use crate::ledger::{DailyStats, MistakeLedger, MistakeNote, MistakeRecord, StudyRecordLedger};
use crate::lesson::{Lesson, LessonFilter};
use crate::question::VocabularyEntry;

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS vocabulary (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    word TEXT NOT NULL,
    reading TEXT,
    meaning TEXT,
    lesson TEXT,
    UNIQUE (word, lesson)
);
CREATE TABLE IF NOT EXISTS kana_confusion (
    character TEXT PRIMARY KEY,
    confusion_group_id INTEGER
);
CREATE TABLE IF NOT EXISTS mistake_ledger (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    word TEXT NOT NULL UNIQUE,
    reading TEXT,
    meaning TEXT,
    lesson TEXT,
    wrong_count INTEGER NOT NULL DEFAULT 1,
    last_wrong_at TEXT NOT NULL
);
CREATE TABLE IF NOT EXISTS study_records (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    word TEXT NOT NULL,
    is_correct INTEGER NOT NULL DEFAULT 0,
    created_at TEXT NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_study_records_created_at ON study_records(created_at);
CREATE INDEX IF NOT EXISTS idx_study_records_word ON study_records(word);
";

const VALID_READING: &str = "reading IS NOT NULL AND TRIM(reading) != ''";

/// 混同表の1行
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KanaRow {
    pub character: String,
    #[serde(default)]
    pub group: Option<GroupId>,
}

/// 取り込み用データ
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Dataset {
    #[serde(default)]
    pub vocabulary: Vec<VocabularyEntry>,
    #[serde(default)]
    pub kana: Vec<KanaRow>,
}

/// 取り込んだ件数
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImportSummary {
    pub vocabulary: usize,
    pub kana: usize,
}

/// 単語帳・混同表・誤答ノート・学習記録をまとめた SQLite ストア
///
/// 接続はこの値が持ち、drop で閉じる。書き込みは1文または1トランザクション単位。
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    pub fn open(path: &Path) -> Result<Self, QuizError> {
        log::debug!("opening database {}", path.display());
        Self::with_connection(Connection::open(path)?)
    }

    #[cfg(test)]
    pub fn open_in_memory() -> Result<Self, QuizError> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> Result<Self, QuizError> {
        conn.execute_batch(SCHEMA)?;
        Ok(Self { conn })
    }

    // --------------------------------------------------
    // 単語帳
    // --------------------------------------------------

    /// 読みが空でない単語を範囲で絞って返す
    pub fn entries(&self, filter: &LessonFilter) -> Result<Vec<VocabularyEntry>, QuizError> {
        let labels = filter.labels().unwrap_or_default();
        let condition = if filter.labels().is_some() {
            format!("lesson IN ({}) AND {VALID_READING}", placeholders(labels.len()))
        } else {
            VALID_READING.to_string()
        };
        let sql = format!(
            "SELECT word, reading, meaning, lesson FROM vocabulary WHERE {condition} ORDER BY id"
        );

        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map(params_from_iter(labels.iter()), entry_from_row)?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    /// 一覧表示用：読みが空の単語も含め、課の番号順・登録順に返す
    pub fn lesson_words(&self, filter: &LessonFilter) -> Result<Vec<VocabularyEntry>, QuizError> {
        let labels = filter.labels();
        let condition = match &labels {
            Some(labels) => format!("WHERE lesson IN ({})", placeholders(labels.len())),
            None => String::new(),
        };
        let sql = format!(
            "SELECT word, reading, meaning, lesson FROM vocabulary {condition} ORDER BY lesson, id"
        );

        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map(
            params_from_iter(labels.iter().flatten()),
            entry_from_row,
        )?;
        let mut words = rows.collect::<Result<Vec<_>, _>>()?;
        // "Lesson 10" が "Lesson 2" より前に来ないよう番号で並べ直す (安定ソート)
        words.sort_by_key(|entry| {
            Lesson::from_label(&entry.lesson).map_or(u8::MAX, Lesson::number)
        });
        Ok(words)
    }

    pub fn entry_by_word(&self, word: &str) -> Result<Option<VocabularyEntry>, QuizError> {
        Ok(self
            .conn
            .query_row(
                "SELECT word, reading, meaning, lesson FROM vocabulary WHERE word = ?1 ORDER BY id LIMIT 1",
                params![word],
                entry_from_row,
            )
            .optional()?)
    }

    /// 単語がある課のラベルを番号順に返す（"Lesson N" 以外は無視）
    pub fn lessons(&self) -> Result<Vec<String>, QuizError> {
        let mut stmt = self.conn.prepare(
            "SELECT DISTINCT lesson FROM vocabulary WHERE lesson IS NOT NULL AND TRIM(lesson) != ''",
        )?;
        let labels = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .collect::<Result<Vec<_>, _>>()?;

        let lessons: BTreeSet<Lesson> = labels
            .iter()
            .filter_map(|label| Lesson::from_label(label))
            .collect();
        Ok(lessons.into_iter().map(Lesson::label).collect())
    }

    /// MARK:単語と混同表を取り込む
    pub fn import(&self, dataset: &Dataset) -> Result<ImportSummary, QuizError> {
        let tx = self.conn.unchecked_transaction()?;
        {
            let mut insert_word = tx.prepare(
                "INSERT INTO vocabulary (word, reading, meaning, lesson) VALUES (?1, ?2, ?3, ?4)
                 ON CONFLICT(word, lesson) DO UPDATE SET
                     reading = excluded.reading,
                     meaning = excluded.meaning",
            )?;
            for entry in &dataset.vocabulary {
                insert_word.execute(params![
                    entry.word,
                    entry.reading,
                    entry.meaning,
                    entry.lesson
                ])?;
            }

            let mut insert_kana = tx.prepare(
                "INSERT INTO kana_confusion (character, confusion_group_id) VALUES (?1, ?2)
                 ON CONFLICT(character) DO UPDATE SET confusion_group_id = excluded.confusion_group_id",
            )?;
            for row in &dataset.kana {
                insert_kana.execute(params![row.character, row.group])?;
            }
        }
        tx.commit()?;

        log::info!(
            "imported {} words and {} kana",
            dataset.vocabulary.len(),
            dataset.kana.len()
        );
        Ok(ImportSummary {
            vocabulary: dataset.vocabulary.len(),
            kana: dataset.kana.len(),
        })
    }

    pub fn is_empty(&self) -> Result<bool, QuizError> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM vocabulary", [], |row| row.get(0))?;
        Ok(count == 0)
    }

    /// 単語名だけで誤答を記録する（単語帳の最新の内容を使う）
    ///
    /// 単語帳にない単語も、読み・意味・課なしで記録する。
    pub fn report_wrong(&self, word: &str) -> Result<(), QuizError> {
        let word = word.trim();
        if word.is_empty() {
            return Err(QuizError::EmptyWord);
        }
        match self.entry_by_word(word)? {
            Some(entry) => self.record_wrong(MistakeNote::from(&entry)),
            None => {
                log::warn!("{word} is not in the vocabulary; recording it bare");
                self.record_wrong(MistakeNote::bare(word))
            }
        }
    }
}

// --------------------------------------------------
// 混同表
// --------------------------------------------------

impl ConfusionCatalog for SqliteStore {
    fn lookup_groups(
        &self,
        characters: &[String],
    ) -> Result<HashMap<String, Option<GroupId>>, QuizError> {
        let unique: BTreeSet<&String> = characters.iter().collect();
        let mut groups: HashMap<String, Option<GroupId>> =
            unique.iter().map(|c| ((*c).clone(), None)).collect();
        if unique.is_empty() {
            return Ok(groups);
        }

        let sql = format!(
            "SELECT character, confusion_group_id FROM kana_confusion WHERE character IN ({})",
            placeholders(unique.len())
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map(params_from_iter(unique.iter()), |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, Option<GroupId>>(1)?))
        })?;
        for row in rows {
            let (character, group) = row?;
            groups.insert(character, group);
        }
        Ok(groups)
    }

    fn find_substitutes(
        &self,
        group: GroupId,
        exclude: &str,
        limit: usize,
    ) -> Result<Vec<String>, QuizError> {
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        let mut stmt = self.conn.prepare(
            "SELECT character FROM kana_confusion
             WHERE confusion_group_id = ?1 AND character != ?2
             ORDER BY rowid LIMIT ?3",
        )?;
        let rows = stmt.query_map(params![group, exclude, limit], |row| row.get(0))?;
        Ok(rows.collect::<Result<Vec<String>, _>>()?)
    }
}

// --------------------------------------------------
// 誤答ノート
// --------------------------------------------------

impl MistakeLedger for SqliteStore {
    fn record_wrong_at(&self, note: MistakeNote<'_>, at: DateTime<Utc>) -> Result<(), QuizError> {
        self.conn.execute(
            "INSERT INTO mistake_ledger (word, reading, meaning, lesson, wrong_count, last_wrong_at)
             VALUES (?1, ?2, ?3, ?4, 1, ?5)
             ON CONFLICT(word) DO UPDATE SET
                 reading = excluded.reading,
                 meaning = excluded.meaning,
                 lesson = excluded.lesson,
                 wrong_count = mistake_ledger.wrong_count + 1,
                 last_wrong_at = excluded.last_wrong_at",
            params![
                note.word,
                note.reading,
                note.meaning,
                note.lesson,
                stamp(at)
            ],
        )?;
        Ok(())
    }

    fn list(&self) -> Result<Vec<MistakeRecord>, QuizError> {
        let mut stmt = self.conn.prepare(
            "SELECT word, reading, meaning, lesson, wrong_count, last_wrong_at
             FROM mistake_ledger ORDER BY last_wrong_at DESC, id DESC",
        )?;
        let rows = stmt
            .query_map([], |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, Option<String>>(1)?,
                    row.get::<_, Option<String>>(2)?,
                    row.get::<_, Option<String>>(3)?,
                    row.get::<_, u32>(4)?,
                    row.get::<_, String>(5)?,
                ))
            })?
            .collect::<Result<Vec<_>, _>>()?;

        rows.into_iter()
            .map(|(word, reading, meaning, lesson, wrong_count, at)| {
                Ok(MistakeRecord {
                    word,
                    reading,
                    meaning,
                    lesson,
                    wrong_count,
                    last_wrong_at: parse_stamp(&at)?,
                })
            })
            .collect()
    }

    fn delete(&self, word: &str) -> Result<bool, QuizError> {
        let removed = self
            .conn
            .execute("DELETE FROM mistake_ledger WHERE word = ?1", params![word])?;
        Ok(removed > 0)
    }
}

// --------------------------------------------------
// 学習記録
// --------------------------------------------------

impl StudyRecordLedger for SqliteStore {
    fn append_at(&self, word: &str, is_correct: bool, at: DateTime<Utc>) -> Result<(), QuizError> {
        self.conn.execute(
            "INSERT INTO study_records (word, is_correct, created_at) VALUES (?1, ?2, ?3)",
            params![word, is_correct, stamp(at)],
        )?;
        Ok(())
    }

    fn append_many(&self, records: &[(String, bool)]) -> Result<(), QuizError> {
        if records.is_empty() {
            return Ok(());
        }
        let at = stamp(Utc::now());
        let tx = self.conn.unchecked_transaction()?;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO study_records (word, is_correct, created_at) VALUES (?1, ?2, ?3)",
            )?;
            for (word, is_correct) in records {
                stmt.execute(params![word, is_correct, at])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    fn stats_on(&self, day: NaiveDate) -> Result<DailyStats, QuizError> {
        let start = local_midnight(day);
        let end = day
            .checked_add_days(Days::new(1))
            .map(local_midnight)
            .unwrap_or(DateTime::<Utc>::MAX_UTC);

        let (total, correct): (i64, i64) = self.conn.query_row(
            "SELECT COUNT(*), COALESCE(SUM(is_correct), 0) FROM study_records
             WHERE created_at >= ?1 AND created_at < ?2",
            params![stamp(start), stamp(end)],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )?;

        Ok(DailyStats::from_counts(
            u32::try_from(total).unwrap_or(u32::MAX),
            u32::try_from(correct).unwrap_or(u32::MAX),
        ))
    }
}

fn entry_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<VocabularyEntry> {
    Ok(VocabularyEntry {
        word: row.get(0)?,
        reading: row.get::<_, Option<String>>(1)?.unwrap_or_default(),
        meaning: row.get(2)?,
        lesson: row.get::<_, Option<String>>(3)?.unwrap_or_default(),
    })
}

fn placeholders(count: usize) -> String {
    vec!["?"; count].join(",")
}

/// 文字列として並べても時刻順になる形式
fn stamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn parse_stamp(text: &str) -> Result<DateTime<Utc>, QuizError> {
    DateTime::parse_from_rfc3339(text)
        .map(|at| at.with_timezone(&Utc))
        .map_err(|_| QuizError::CorruptTimestamp(text.to_string()))
}

/// ローカル日付の 0 時を UTC で
fn local_midnight(day: NaiveDate) -> DateTime<Utc> {
    let naive = day.and_time(chrono::NaiveTime::MIN);
    Local
        .from_local_datetime(&naive)
        .earliest()
        .map(|at| at.with_timezone(&Utc))
        .unwrap_or_else(|| naive.and_utc())
}
