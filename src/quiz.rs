// ============================================
// src/quiz.rs
// 出題の進行（対話モードとまとめて出題）
// ============================================

use std::collections::VecDeque;
use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::QuizError;
use crate::ledger::{MistakeLedger, MistakeNote, StudyRecordLedger};
use crate::question::{DisplayMode, Question, QuestionAssembler, VocabularyEntry};

/// 中断を表す入力
pub const EXIT_COMMAND: &str = "exit";
/// まとめて出題できる最大数
pub const MAX_BATCH: u32 = 50;

// --------------------------------------------------
// 候補の取り出し
// --------------------------------------------------

/// シャッフル済みの候補から、問題にできるものを順に取り出す
struct CandidatePool {
    remaining: VecDeque<VocabularyEntry>,
    skipped: usize,
    storage_errors: usize,
}

impl CandidatePool {
    fn new(candidates: Vec<VocabularyEntry>) -> Self {
        Self {
            remaining: candidates.into(),
            skipped: 0,
            storage_errors: 0,
        }
    }

    /// 次の問題（候補が尽きたら None）
    fn next_question<R: Rng + ?Sized>(
        &mut self,
        assembler: &QuestionAssembler<'_>,
        rng: &mut R,
    ) -> Option<(VocabularyEntry, Question)> {
        while let Some(entry) = self.remaining.pop_front() {
            match assembler.assemble(&entry, rng) {
                Ok(Some(question)) => return Some((entry, question)),
                Ok(None) => self.skipped += 1,
                Err(e) => {
                    log::error!("could not build a question for {}: {e}", entry.word);
                    self.storage_errors += 1;
                }
            }
        }
        None
    }
}

// --------------------------------------------------
// 対話モード
// --------------------------------------------------

/// 入力を受け付けなかった理由
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputRejection {
    NotANumber(String),
    OutOfRange { choice: usize, max: usize },
}

impl fmt::Display for InputRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotANumber(input) => write!(f, "{input:?} is not an option number"),
            Self::OutOfRange { choice, max } => {
                write!(f, "{choice} is out of range (1-{max})")
            }
        }
    }
}

/// 解答の入力
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Answer {
    /// 0 始まりの選択肢番号
    Choice(usize),
    Exit,
}

/// 入力文字列を解釈する（表示は 1 始まり）
pub fn parse_answer(input: &str, option_count: usize) -> Result<Answer, InputRejection> {
    let input = input.trim();
    if input.eq_ignore_ascii_case(EXIT_COMMAND) {
        return Ok(Answer::Exit);
    }
    let choice: usize = input
        .parse()
        .map_err(|_| InputRejection::NotANumber(input.to_string()))?;
    if (1..=option_count).contains(&choice) {
        Ok(Answer::Choice(choice - 1))
    } else {
        Err(InputRejection::OutOfRange {
            choice,
            max: option_count,
        })
    }
}

/// 画面と入力（コンソールやテスト用の台本）
pub trait QuizFrontend {
    /// 問題を表示する（`number` は 1 始まり）
    fn present(&mut self, number: usize, planned: usize, question: &Question);
    /// 1行読む。入力が閉じたら `exit` 扱いにしてよい
    fn read_input(&mut self) -> Result<String, QuizError>;
    fn reject(&mut self, rejection: &InputRejection);
    fn reveal(&mut self, question: &Question, chosen: &str, correct: bool);
}

/// 進行状態
#[derive(Debug)]
pub enum QuizState {
    Idle,
    Presenting(Box<(VocabularyEntry, Question)>),
    AwaitingAnswer(Box<(VocabularyEntry, Question)>),
    Scored,
    Terminated,
}

/// 終了時の集計
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizReport {
    pub questions_completed: usize,
    pub correct_count: usize,
    pub planned_total: usize,
    /// 問題にできず飛ばした候補
    pub skipped_entries: usize,
    /// 読み書きに失敗した回数
    pub storage_errors: usize,
    pub cancelled: bool,
}

impl QuizReport {
    /// 候補不足で予定数に届かなかった
    pub fn is_shortfall(&self) -> bool {
        !self.cancelled && self.questions_completed < self.planned_total
    }

    pub fn accuracy_percent(&self) -> f64 {
        if self.questions_completed == 0 {
            return 0.0;
        }
        (1000.0 * self.correct_count as f64 / self.questions_completed as f64).round() / 10.0
    }
}

impl fmt::Display for QuizReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "completed {} of {} questions, {} correct ({:.1}%)",
            self.questions_completed,
            self.planned_total,
            self.correct_count,
            self.accuracy_percent()
        )?;
        if self.cancelled {
            write!(f, ", stopped early")?;
        } else if self.is_shortfall() {
            write!(f, ", not enough usable words")?;
        }
        if self.storage_errors > 0 {
            write!(f, ", {} storage errors", self.storage_errors)?;
        }
        Ok(())
    }
}

/// 1回分の出題を進める
pub struct QuizRunner<'a, R> {
    assembler: QuestionAssembler<'a>,
    mistakes: &'a dyn MistakeLedger,
    studies: &'a dyn StudyRecordLedger,
    rng: R,
    pool: CandidatePool,
    planned: usize,
    completed: usize,
    correct: usize,
    ledger_errors: usize,
    cancelled: bool,
    state: QuizState,
}

impl<'a, R: Rng> QuizRunner<'a, R> {
    /// `candidates` は呼び出し側でシャッフル済みのもの
    pub fn new(
        assembler: QuestionAssembler<'a>,
        mistakes: &'a dyn MistakeLedger,
        studies: &'a dyn StudyRecordLedger,
        rng: R,
        candidates: Vec<VocabularyEntry>,
        planned: usize,
    ) -> Self {
        Self {
            assembler,
            mistakes,
            studies,
            rng,
            pool: CandidatePool::new(candidates),
            planned,
            completed: 0,
            correct: 0,
            ledger_errors: 0,
            cancelled: false,
            state: QuizState::Idle,
        }
    }

    #[cfg(test)]
    pub fn state(&self) -> &QuizState {
        &self.state
    }

    /// Terminated になるまで進めて集計を返す
    pub fn run(&mut self, frontend: &mut dyn QuizFrontend) -> Result<QuizReport, QuizError> {
        while !matches!(self.state, QuizState::Terminated) {
            self.step(frontend)?;
        }
        Ok(self.report())
    }

    /// 状態を1つ進める
    pub fn step(&mut self, frontend: &mut dyn QuizFrontend) -> Result<(), QuizError> {
        let state = std::mem::replace(&mut self.state, QuizState::Terminated);
        self.state = match state {
            QuizState::Idle | QuizState::Scored => self.advance(),
            QuizState::Presenting(item) => {
                frontend.present(self.completed + 1, self.planned, &item.1);
                QuizState::AwaitingAnswer(item)
            }
            QuizState::AwaitingAnswer(item) => {
                let input = frontend.read_input()?;
                match parse_answer(&input, item.1.options.len()) {
                    Ok(Answer::Exit) => {
                        log::info!("quiz cancelled after {} questions", self.completed);
                        self.cancelled = true;
                        QuizState::Terminated
                    }
                    Ok(Answer::Choice(index)) => {
                        self.score(&item.0, &item.1, index, frontend);
                        QuizState::Scored
                    }
                    Err(rejection) => {
                        frontend.reject(&rejection);
                        QuizState::AwaitingAnswer(item)
                    }
                }
            }
            QuizState::Terminated => QuizState::Terminated,
        };
        Ok(())
    }

    /// 次の問題を用意する（予定数に達したか候補切れなら終了）
    fn advance(&mut self) -> QuizState {
        if self.completed >= self.planned {
            return QuizState::Terminated;
        }
        match self.pool.next_question(&self.assembler, &mut self.rng) {
            Some(item) => QuizState::Presenting(Box::new(item)),
            None => {
                log::info!(
                    "candidate pool exhausted after {} of {} questions",
                    self.completed,
                    self.planned
                );
                QuizState::Terminated
            }
        }
    }

    /// 採点と記録（記録の失敗では止めない）
    fn score(
        &mut self,
        entry: &VocabularyEntry,
        question: &Question,
        index: usize,
        frontend: &mut dyn QuizFrontend,
    ) {
        let chosen = &question.options[index];
        let correct = question.is_correct(chosen);
        self.completed += 1;
        if correct {
            self.correct += 1;
        }
        frontend.reveal(question, chosen, correct);

        if let Err(e) = self.studies.append(&entry.word, correct) {
            log::error!("could not save study record for {}: {e}", entry.word);
            self.ledger_errors += 1;
        }
        if !correct {
            if let Err(e) = self.mistakes.record_wrong(MistakeNote::from(entry)) {
                log::error!("could not save mistake for {}: {e}", entry.word);
                self.ledger_errors += 1;
            }
        }
    }

    pub fn report(&self) -> QuizReport {
        QuizReport {
            questions_completed: self.completed,
            correct_count: self.correct,
            planned_total: self.planned,
            skipped_entries: self.pool.skipped,
            storage_errors: self.pool.storage_errors + self.ledger_errors,
            cancelled: self.cancelled,
        }
    }
}

// --------------------------------------------------
// まとめて出題（Web などの一括リクエスト向け）
// --------------------------------------------------

/// 一括出題の1問（正解は番号だけで渡す）
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchQuestion {
    /// 誤答を報告するときのキー（意味で出題しても元の単語）
    pub word: String,
    pub prompt: String,
    pub options: Vec<String>,
    pub correct_index: usize,
    pub display_mode: DisplayMode,
}

impl From<Question> for BatchQuestion {
    fn from(question: Question) -> Self {
        Self {
            correct_index: question.correct_index(),
            word: question.word,
            prompt: question.prompt,
            options: question.options,
            display_mode: question.display_mode,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchResponse {
    pub questions: Vec<BatchQuestion>,
    pub requested: u32,
    pub skipped_entries: usize,
    pub storage_errors: usize,
}

/// 一括クライアントからの解答結果
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AnswerResult {
    pub word: String,
    pub correct: bool,
}

/// 要求数を 1..=50 に収める
pub fn clamp_batch_count(count: u32) -> u32 {
    count.clamp(1, MAX_BATCH)
}

/// 対話モードで指定された問題数を確かめる（範囲外は拒否）
pub fn validate_question_count(count: u32) -> Result<u32, QuizError> {
    if (1..=MAX_BATCH).contains(&count) {
        Ok(count)
    } else {
        Err(QuizError::InvalidQuestionCount(count))
    }
}

/// 入力を待たずに `count` 問まとめて作る
pub fn assemble_batch<R: Rng + ?Sized>(
    assembler: &QuestionAssembler<'_>,
    candidates: Vec<VocabularyEntry>,
    count: u32,
    rng: &mut R,
) -> BatchResponse {
    let count = clamp_batch_count(count);
    let mut pool = CandidatePool::new(candidates);
    let mut questions = Vec::new();
    while questions.len() < count as usize {
        match pool.next_question(assembler, rng) {
            Some((_, question)) => questions.push(BatchQuestion::from(question)),
            None => break,
        }
    }
    BatchResponse {
        questions,
        requested: count,
        skipped_entries: pool.skipped,
        storage_errors: pool.storage_errors,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;
    use crate::kana::DELETABLE_GROUP;
    use crate::store::SqliteStore;
    use crate::starter::starter_dataset;
    use crate::test_support::{BrokenCatalog, ConfusionTable, FailingLedger};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    /// 台本どおりに答える画面
    struct Script {
        inputs: VecDeque<String>,
        presented: Vec<(usize, Question)>,
        rejections: Vec<InputRejection>,
    }

    impl Script {
        fn new(inputs: &[&str]) -> Self {
            Self {
                inputs: inputs.iter().map(|s| s.to_string()).collect(),
                presented: Vec::new(),
                rejections: Vec::new(),
            }
        }

        /// 最後に出た問題の正解番号 (1 始まり)
        fn last_correct(&self) -> usize {
            let (_, question) = self.presented.last().unwrap();
            question.correct_index() + 1
        }
    }

    impl QuizFrontend for Script {
        fn present(&mut self, number: usize, _planned: usize, question: &Question) {
            self.presented.push((number, question.clone()));
        }

        fn read_input(&mut self) -> Result<String, QuizError> {
            Ok(self
                .inputs
                .pop_front()
                .unwrap_or_else(|| EXIT_COMMAND.to_string()))
        }

        fn reject(&mut self, rejection: &InputRejection) {
            self.rejections.push(rejection.clone());
        }

        fn reveal(&mut self, _question: &Question, _chosen: &str, _correct: bool) {}
    }

    /// 正解を選び続ける画面
    struct AlwaysRight {
        answer: usize,
    }

    impl QuizFrontend for AlwaysRight {
        fn present(&mut self, _number: usize, _planned: usize, question: &Question) {
            self.answer = question.correct_index() + 1;
        }

        fn read_input(&mut self) -> Result<String, QuizError> {
            Ok(self.answer.to_string())
        }

        fn reject(&mut self, _rejection: &InputRejection) {}

        fn reveal(&mut self, _question: &Question, _chosen: &str, correct: bool) {
            assert!(correct);
        }
    }

    fn table() -> ConfusionTable {
        ConfusionTable::new(&[
            ("g", 1),
            ("k", 1),
            ("q", 1),
            ("-", DELETABLE_GROUP),
            ("o", 2),
            ("a", 2),
            ("u", 2),
        ])
    }

    fn entry(word: &str, reading: &str) -> VocabularyEntry {
        VocabularyEntry {
            word: word.to_string(),
            reading: reading.to_string(),
            meaning: Some(format!("meaning of {word}")),
            lesson: "Lesson 1".to_string(),
        }
    }

    /// どれも問題にできる候補
    fn usable(n: usize) -> Vec<VocabularyEntry> {
        (0..n)
            .map(|i| entry(&format!("word{i}"), "gak-ko"))
            .collect()
    }

    #[test]
    fn answering_correctly_counts_and_records_study() {
        let table = table();
        let store = SqliteStore::open_in_memory().unwrap();
        let settings = Settings::default();
        let school = VocabularyEntry {
            word: "school".to_string(),
            reading: "gak-ko".to_string(),
            meaning: Some("place of learning".to_string()),
            lesson: "Lesson 3".to_string(),
        };

        let mut runner = QuizRunner::new(
            QuestionAssembler::new(&table, &settings),
            &store,
            &store,
            StdRng::seed_from_u64(1),
            vec![school],
            1,
        );
        let report = runner.run(&mut AlwaysRight { answer: 0 }).unwrap();

        assert_eq!(report.questions_completed, 1);
        assert_eq!(report.correct_count, 1);
        assert!(store.list().unwrap().is_empty());
        assert_eq!(store.daily_stats().unwrap().total_answered, 1);
        assert!(matches!(runner.state(), QuizState::Terminated));
    }

    #[test]
    fn wrong_answer_goes_to_the_mistake_ledger() {
        let table = table();
        let store = SqliteStore::open_in_memory().unwrap();
        let settings = Settings::default();

        let mut runner = QuizRunner::new(
            QuestionAssembler::new(&table, &settings),
            &store,
            &store,
            StdRng::seed_from_u64(2),
            usable(1),
            1,
        );

        // 1 問目を表示させてから、正解以外を選ぶ
        let mut script = Script::new(&[]);
        runner.step(&mut script).unwrap();
        runner.step(&mut script).unwrap();
        let wrong = if script.last_correct() == 1 { "2" } else { "1" };
        script.inputs.push_back(wrong.to_string());
        let report = runner.run(&mut script).unwrap();

        assert_eq!(report.questions_completed, 1);
        assert_eq!(report.correct_count, 0);
        let mistakes = store.list().unwrap();
        assert_eq!(mistakes.len(), 1);
        assert_eq!(mistakes[0].word, "word0");
        assert_eq!(mistakes[0].reading.as_deref(), Some("gak-ko"));
        assert_eq!(store.daily_stats().unwrap().accuracy_percent, 0.0);
    }

    #[test]
    fn exit_on_fourth_question_keeps_three_completed() {
        let table = table();
        let store = SqliteStore::open_in_memory().unwrap();
        let settings = Settings::default();

        let mut runner = QuizRunner::new(
            QuestionAssembler::new(&table, &settings),
            &store,
            &store,
            StdRng::seed_from_u64(3),
            usable(10),
            10,
        );
        let report = runner
            .run(&mut Script::new(&["1", "2", "3", "exit"]))
            .unwrap();

        assert_eq!(report.questions_completed, 3);
        assert_eq!(report.planned_total, 10);
        assert!(report.cancelled);
        assert!(!report.is_shortfall());
        assert_eq!(store.daily_stats().unwrap().total_answered, 3);
    }

    #[test]
    fn invalid_input_is_rejected_without_advancing() {
        let table = table();
        let store = SqliteStore::open_in_memory().unwrap();
        let settings = Settings::default();

        let mut runner = QuizRunner::new(
            QuestionAssembler::new(&table, &settings),
            &store,
            &store,
            StdRng::seed_from_u64(4),
            usable(2),
            2,
        );
        let mut script = Script::new(&["abc", "0", "5", "2", "EXIT"]);
        let report = runner.run(&mut script).unwrap();

        assert_eq!(
            script.rejections,
            vec![
                InputRejection::NotANumber("abc".to_string()),
                InputRejection::OutOfRange { choice: 0, max: 4 },
                InputRejection::OutOfRange { choice: 5, max: 4 },
            ]
        );
        let numbers: Vec<usize> = script.presented.iter().map(|(n, _)| *n).collect();
        assert_eq!(numbers, vec![1, 2]);
        assert_eq!(report.questions_completed, 1);
    }

    #[test]
    fn unusable_entries_are_skipped_and_shortfall_reported() {
        let table = table();
        let store = SqliteStore::open_in_memory().unwrap();
        let settings = Settings::default();
        let mut candidates = vec![entry("山", "やま"), entry("川", "かわ")];
        candidates.extend(usable(2));

        let mut runner = QuizRunner::new(
            QuestionAssembler::new(&table, &settings),
            &store,
            &store,
            StdRng::seed_from_u64(5),
            candidates,
            5,
        );
        let report = runner.run(&mut AlwaysRight { answer: 0 }).unwrap();

        assert_eq!(report.questions_completed, 2);
        assert_eq!(report.correct_count, 2);
        assert_eq!(report.skipped_entries, 2);
        assert!(report.is_shortfall());
        assert_eq!(report.storage_errors, 0);
        assert!(report.to_string().starts_with("completed 2 of 5 questions"));
    }

    #[test]
    fn catalog_failures_are_counted_not_fatal() {
        let store = SqliteStore::open_in_memory().unwrap();
        let settings = Settings::default();

        let mut runner = QuizRunner::new(
            QuestionAssembler::new(&BrokenCatalog, &settings),
            &store,
            &store,
            StdRng::seed_from_u64(6),
            usable(3),
            3,
        );
        let report = runner.run(&mut Script::new(&[])).unwrap();

        assert_eq!(report.questions_completed, 0);
        assert_eq!(report.storage_errors, 3);
        assert!(report.to_string().contains("3 storage errors"));
    }

    #[test]
    fn stops_at_planned_total() {
        let table = table();
        let store = SqliteStore::open_in_memory().unwrap();
        let settings = Settings::default();

        let mut runner = QuizRunner::new(
            QuestionAssembler::new(&table, &settings),
            &store,
            &store,
            StdRng::seed_from_u64(7),
            usable(8),
            3,
        );
        let report = runner.run(&mut AlwaysRight { answer: 0 }).unwrap();
        assert_eq!(report.questions_completed, 3);
        assert!(!report.is_shortfall());
        assert_eq!(report.accuracy_percent(), 100.0);
    }

    #[test]
    fn parse_answer_accepts_one_based_numbers_and_exit() {
        assert_eq!(parse_answer(" 1 ", 4), Ok(Answer::Choice(0)));
        assert_eq!(parse_answer("4", 4), Ok(Answer::Choice(3)));
        assert_eq!(parse_answer("Exit", 4), Ok(Answer::Exit));
        assert!(parse_answer("-1", 4).is_err());
        assert!(parse_answer("", 4).is_err());
    }

    #[test]
    fn batch_conveys_the_answer_only_as_an_index() {
        let table = table();
        let settings = Settings::default();
        let assembler = QuestionAssembler::new(&table, &settings);
        let mut candidates = vec![entry("山", "やま")];
        candidates.extend(usable(5));

        let response =
            assemble_batch(&assembler, candidates, 3, &mut StdRng::seed_from_u64(8));

        assert_eq!(response.questions.len(), 3);
        assert_eq!(response.skipped_entries, 1);
        for question in &response.questions {
            assert_eq!(question.options[question.correct_index], "gak-ko");
        }

        let json = serde_json::to_value(&response).unwrap();
        let first = &json["questions"][0];
        assert!(first.get("correctIndex").is_some());
        assert!(first.get("correctAnswer").is_none());
        assert_eq!(first["word"], "word0");
    }

    #[test]
    fn batch_word_reaches_the_mistake_ledger_for_meaning_prompts() {
        let store = SqliteStore::open_in_memory().unwrap();
        store.import(&starter_dataset()).unwrap();
        let settings = Settings::default();
        let assembler = QuestionAssembler::new(&store, &settings);
        let hello = store.entry_by_word("こんにちは").unwrap().unwrap();

        let response =
            assemble_batch(&assembler, vec![hello], 1, &mut StdRng::seed_from_u64(10));
        let question = &response.questions[0];
        assert_eq!(question.display_mode, DisplayMode::Meaning);
        assert_eq!(question.prompt, "hello");
        assert_eq!(question.word, "こんにちは");

        // クライアントは word をそのまま返してくる
        store.report_wrong(&question.word).unwrap();
        let records = store.list().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].word, "こんにちは");
        assert_eq!(records[0].meaning.as_deref(), Some("hello"));
        assert_eq!(records[0].lesson.as_deref(), Some("Lesson 3"));
    }

    #[test]
    fn ledger_failures_are_counted_and_the_quiz_goes_on() {
        let table = table();
        let ledger = FailingLedger;
        let settings = Settings::default();

        let mut runner = QuizRunner::new(
            QuestionAssembler::new(&table, &settings),
            &ledger,
            &ledger,
            StdRng::seed_from_u64(11),
            usable(3),
            2,
        );

        // 1 問目は外して (学習記録 + 誤答ノートの2件が失敗)、2 問目は当てる (学習記録の1件が失敗)
        let mut script = Script::new(&[]);
        runner.step(&mut script).unwrap();
        runner.step(&mut script).unwrap();
        let wrong = if script.last_correct() == 1 { "2" } else { "1" };
        script.inputs.push_back(wrong.to_string());
        runner.step(&mut script).unwrap();
        runner.step(&mut script).unwrap();
        runner.step(&mut script).unwrap();
        let right = script.last_correct().to_string();
        script.inputs.push_back(right);
        let report = runner.run(&mut script).unwrap();

        let numbers: Vec<usize> = script.presented.iter().map(|(n, _)| *n).collect();
        assert_eq!(numbers, vec![1, 2]);
        assert_eq!(report.questions_completed, 2);
        assert_eq!(report.correct_count, 1);
        assert!(!report.cancelled);
        assert_eq!(report.storage_errors, 3);
    }

    #[test]
    fn batch_count_is_clamped() {
        assert_eq!(clamp_batch_count(0), 1);
        assert_eq!(clamp_batch_count(20), 20);
        assert_eq!(clamp_batch_count(500), 50);
        assert_eq!(validate_question_count(50).unwrap(), 50);
        assert!(matches!(
            validate_question_count(500),
            Err(QuizError::InvalidQuestionCount(500))
        ));
        assert!(validate_question_count(0).is_err());

        let table = table();
        let settings = Settings::default();
        let assembler = QuestionAssembler::new(&table, &settings);
        let response =
            assemble_batch(&assembler, usable(2), 0, &mut StdRng::seed_from_u64(9));
        assert_eq!(response.requested, 1);
        assert_eq!(response.questions.len(), 1);
    }
}
