// ============================================
// src/main.rs (メインファイル)
// ============================================

use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use console::style;
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Input, Select};
use rand::seq::SliceRandom;

mod config;
mod distractor;
mod error;
mod kana;
mod ledger;
mod lesson;
mod question;
mod quiz;
mod starter;
mod store;
#[cfg(test)]
mod test_support;

use config::Settings;
use error::QuizError;
use ledger::{MistakeLedger, StudyRecordLedger};
use lesson::LessonFilter;
use question::{DisplayMode, Question, QuestionAssembler};
use quiz::{AnswerResult, EXIT_COMMAND, InputRejection, QuizFrontend, QuizRunner};
use store::{Dataset, SqliteStore};

/// 対話モードで選べる問題数
const QUESTION_COUNT_OPTIONS: [u32; 5] = [10, 20, 30, 40, 50];

// --------------------------------------------------
// コマンドライン
// --------------------------------------------------

#[derive(Parser)]
#[command(name = "kanadrill", version, about = "Drill kana readings with multiple-choice quizzes")]
struct Cli {
    /// デバッグログを出す
    #[arg(long, global = true)]
    debug: bool,

    /// データベースファイル
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    /// 1問あたりの誤答の数
    #[arg(long, global = true)]
    distractors: Option<usize>,

    /// 誤答生成の最大試行回数
    #[arg(long, global = true)]
    attempts: Option<usize>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Interactive quiz (default)
    Quiz {
        /// all, 3, "Lesson 3" or 1-7
        #[arg(long)]
        lessons: Option<String>,
        #[arg(long)]
        count: Option<u32>,
    },
    /// Build a batch of questions and print it as JSON
    Batch {
        #[arg(long, default_value = "all")]
        lessons: String,
        #[arg(long, default_value_t = 10)]
        count: u32,
    },
    /// Record a wrong answer for a word
    ReportWrong { word: String },
    /// Record answers from a JSON list of {"word", "correct"}
    RecordAnswers { file: PathBuf },
    /// List or delete entries of the mistake ledger
    Notes {
        #[arg(long)]
        delete: Option<String>,
        #[arg(long)]
        json: bool,
    },
    /// Today's answers and accuracy
    Stats,
    /// Lessons that have words
    Lessons,
    /// List the words of one or more lessons
    Words {
        /// all, 3, "Lesson 3" or 1-7
        #[arg(long, default_value = "all")]
        lessons: String,
        #[arg(long)]
        json: bool,
    },
    /// Import vocabulary and kana groups (built-in starter set without a file)
    Import { file: Option<PathBuf> },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let mut settings = Settings::load();
    settings.debug |= cli.debug;
    if let Some(db) = cli.db {
        settings.database = Some(db);
    }
    if let Some(count) = cli.distractors {
        settings.distractor_count = count;
    }
    if let Some(attempts) = cli.attempts {
        settings.max_attempts = attempts;
    }

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(settings.log_filter()),
    )
    .init();

    let command = cli.command.unwrap_or(Command::Quiz {
        lessons: None,
        count: None,
    });
    match run(command, &settings) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) if e.is_storage() => {
            eprintln!("{} {e}", style("storage error, aborting:").red().bold());
            ExitCode::FAILURE
        }
        Err(e) => {
            eprintln!("{} {e}", style("error:").red().bold());
            ExitCode::FAILURE
        }
    }
}

fn run(command: Command, settings: &Settings) -> Result<(), QuizError> {
    let store = open_store(settings)?;

    match command {
        Command::Quiz { lessons, count } => run_quiz(&store, settings, lessons, count),
        Command::Batch { lessons, count } => {
            let filter = LessonFilter::parse(&lessons)?;
            let mut candidates = store.entries(&filter)?;
            let mut rng = rand::rng();
            candidates.shuffle(&mut rng);

            let assembler = QuestionAssembler::new(&store, settings);
            let response = quiz::assemble_batch(&assembler, candidates, count, &mut rng);
            println!("{}", serde_json::to_string_pretty(&response)?);
            Ok(())
        }
        Command::ReportWrong { word } => {
            store.report_wrong(&word)?;
            println!("{} {}", style("recorded:").green(), word.trim());
            Ok(())
        }
        Command::RecordAnswers { file } => {
            let results: Vec<AnswerResult> =
                serde_json::from_reader(BufReader::new(File::open(file)?))?;
            let records: Vec<(String, bool)> = results
                .iter()
                .map(|r| (r.word.clone(), r.correct))
                .collect();
            store.append_many(&records)?;

            let mut wrong = 0;
            for result in results.iter().filter(|r| !r.correct) {
                match store.report_wrong(&result.word) {
                    Ok(()) => wrong += 1,
                    Err(e) => log::error!("could not record mistake for {}: {e}", result.word),
                }
            }
            println!(
                "recorded {} answers ({} wrong)",
                records.len(),
                style(wrong).red()
            );
            Ok(())
        }
        Command::Notes { delete: Some(word), .. } => {
            if store.delete(word.trim())? {
                println!("{} {}", style("deleted:").green(), word.trim());
            } else {
                println!("{} {}", style("no record for").yellow(), word.trim());
            }
            Ok(())
        }
        Command::Notes { delete: None, json } => {
            let records = store.list()?;
            if json {
                println!("{}", serde_json::to_string_pretty(&records)?);
                return Ok(());
            }
            if records.is_empty() {
                println!("No mistakes recorded yet.");
            }
            for record in records {
                println!(
                    "{:>3}x  {}  {}  {}  {}  (last {})",
                    style(record.wrong_count).red().bold(),
                    style(&record.word).bold(),
                    record.reading.as_deref().unwrap_or("-"),
                    record.meaning.as_deref().unwrap_or("-"),
                    record.lesson.as_deref().unwrap_or("-"),
                    record
                        .last_wrong_at
                        .with_timezone(&chrono::Local)
                        .format("%Y-%m-%d %H:%M"),
                );
            }
            Ok(())
        }
        Command::Stats => {
            print_daily_stats(&store)?;
            Ok(())
        }
        Command::Lessons => {
            for label in store.lessons()? {
                println!("{label}");
            }
            Ok(())
        }
        Command::Words { lessons, json } => {
            let filter = LessonFilter::parse(&lessons)?;
            let words = store.lesson_words(&filter)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&words)?);
                return Ok(());
            }
            if words.is_empty() {
                println!("No words in {filter}.");
            }
            for entry in words {
                println!(
                    "{}  {}  {}  {}",
                    style(&entry.lesson).dim(),
                    style(&entry.word).bold(),
                    if entry.reading.trim().is_empty() { "-" } else { entry.reading.as_str() },
                    entry.meaning().unwrap_or("-"),
                );
            }
            Ok(())
        }
        Command::Import { file } => {
            let dataset: Dataset = match file {
                Some(path) => serde_json::from_reader(BufReader::new(File::open(path)?))?,
                None => starter::starter_dataset(),
            };
            let summary = store.import(&dataset)?;
            println!(
                "imported {} words and {} kana",
                summary.vocabulary, summary.kana
            );
            Ok(())
        }
    }
}

/// MARK:データベースを開く (空なら組み込みデータを入れる)
fn open_store(settings: &Settings) -> Result<SqliteStore, QuizError> {
    let store = SqliteStore::open(&settings.database_path()?)?;
    if store.is_empty()? {
        log::info!("empty vocabulary; importing the starter set");
        store.import(&starter::starter_dataset())?;
    }
    Ok(store)
}

// --------------------------------------------------
// 対話モード
// --------------------------------------------------

fn run_quiz(
    store: &SqliteStore,
    settings: &Settings,
    lessons: Option<String>,
    count: Option<u32>,
) -> Result<(), QuizError> {
    let theme = ColorfulTheme::default();

    // 1. 出題範囲
    let filter = match lessons.as_deref().map(LessonFilter::parse) {
        Some(Ok(filter)) => filter,
        Some(Err(e)) => {
            eprintln!("{} {e}", style("!").yellow());
            prompt_lessons(&theme)?
        }
        None => prompt_lessons(&theme)?,
    };

    // 2. 問題数
    let planned = match count {
        Some(count) => quiz::validate_question_count(count)?,
        None => prompt_question_count(&theme, settings.question_count)?,
    };

    // 3. 候補を集めて混ぜる
    let mut candidates = store.entries(&filter)?;
    if candidates.is_empty() {
        println!("{}", style(format!("No words with readings in {filter}.")).yellow());
        return Ok(());
    }
    let mut rng = rand::rng();
    candidates.shuffle(&mut rng);

    println!();
    println!(
        "{}",
        style(format!(
            "Kana quiz: {planned} questions from {filter}. Type '{EXIT_COMMAND}' to stop."
        ))
        .bold()
    );

    let assembler = QuestionAssembler::new(store, settings);
    let mut runner = QuizRunner::new(assembler, store, store, rng, candidates, planned as usize);
    let mut frontend = ConsoleFrontend::new(theme);
    let report = runner.run(&mut frontend)?;

    // 4. 結果
    println!();
    let summary = style(report.to_string());
    if report.storage_errors > 0 {
        println!("{}", summary.red());
    } else if report.is_shortfall() || report.cancelled {
        println!("{}", summary.yellow());
    } else {
        println!("{}", summary.green());
    }
    print_daily_stats(store)?;
    Ok(())
}

fn prompt_lessons(theme: &ColorfulTheme) -> Result<LessonFilter, QuizError> {
    let input: String = Input::with_theme(theme)
        .with_prompt("Lessons (all, 3, 1-7)")
        .default("all".to_string())
        .validate_with(|input: &String| -> Result<(), String> {
            LessonFilter::parse(input).map(|_| ()).map_err(|e| e.to_string())
        })
        .interact_text()?;
    LessonFilter::parse(&input)
}

fn prompt_question_count(theme: &ColorfulTheme, preferred: u32) -> Result<u32, QuizError> {
    let labels: Vec<String> = QUESTION_COUNT_OPTIONS
        .iter()
        .map(|c| format!("{c} questions"))
        .collect();

    let selected = Select::with_theme(theme)
        .with_prompt("How many questions?")
        .items(&labels)
        .default(preselected_count(preferred))
        .interact()?;
    Ok(QUESTION_COUNT_OPTIONS[selected])
}

/// 設定の問題数以上で最も小さい選択肢（なければ最後）
fn preselected_count(preferred: u32) -> usize {
    QUESTION_COUNT_OPTIONS
        .iter()
        .position(|c| *c >= preferred)
        .unwrap_or(QUESTION_COUNT_OPTIONS.len() - 1)
}

fn print_daily_stats(store: &SqliteStore) -> Result<(), QuizError> {
    let stats = store.daily_stats()?;
    println!(
        "Today: {} answered, {:.1}% correct",
        style(stats.total_answered).cyan(),
        stats.accuracy_percent
    );
    Ok(())
}

/// 標準入出力での表示と入力
struct ConsoleFrontend {
    theme: ColorfulTheme,
    option_count: usize,
}

impl ConsoleFrontend {
    fn new(theme: ColorfulTheme) -> Self {
        Self {
            theme,
            option_count: 0,
        }
    }
}

impl QuizFrontend for ConsoleFrontend {
    fn present(&mut self, number: usize, planned: usize, question: &Question) {
        self.option_count = question.options.len();
        let label = match question.display_mode {
            DisplayMode::Word => "Reading of",
            DisplayMode::Meaning => "Reading of the word meaning",
        };
        println!();
        println!("{}", style(format!("[{number}/{planned}]")).cyan().bold());
        println!("{label} 「{}」?", style(&question.prompt).white().bold());
        for (idx, option) in question.options.iter().enumerate() {
            println!("  {}. {option}", idx + 1);
        }
    }

    fn read_input(&mut self) -> Result<String, QuizError> {
        let result = Input::<String>::with_theme(&self.theme)
            .with_prompt(format!("Your choice (1-{}/{EXIT_COMMAND})", self.option_count))
            .allow_empty(true)
            .interact_text();
        match result {
            Ok(line) => Ok(line),
            // 入力が閉じたら中断扱い
            Err(dialoguer::Error::IO(e)) if e.kind() == io::ErrorKind::UnexpectedEof => {
                Ok(EXIT_COMMAND.to_string())
            }
            Err(e) => Err(e.into()),
        }
    }

    fn reject(&mut self, rejection: &InputRejection) {
        println!("{} {rejection}", style("✗").red());
    }

    fn reveal(&mut self, question: &Question, _chosen: &str, correct: bool) {
        if correct {
            println!("{}", style("Correct!").green().bold());
        } else {
            println!(
                "{} The answer is {}",
                style("Wrong!").red().bold(),
                style(&question.correct_answer).green()
            );
        }
    }
}
