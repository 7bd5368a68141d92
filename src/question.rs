// ============================================
// src/question.rs
// 出題データと問題の組み立て
// ============================================

use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use crate::config::Settings;
use crate::distractor::DistractorGenerator;
use crate::error::QuizError;
use crate::kana::ConfusionCatalog;

/// 単語帳の1行
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VocabularyEntry {
    pub word: String,    // 表示用 (漢字混じり)
    pub reading: String, // 正解の読み (ひらがな)
    #[serde(default)]
    pub meaning: Option<String>,
    pub lesson: String, // "Lesson N"
}

impl VocabularyEntry {
    /// 空白だけの意味は「なし」とみなす
    pub fn meaning(&self) -> Option<&str> {
        self.meaning
            .as_deref()
            .map(str::trim)
            .filter(|m| !m.is_empty())
    }
}

/// 問題文に何を出すか
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum DisplayMode {
    Word,
    Meaning,
}

/// 1問分
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    /// 誤答記録に使う元の単語
    pub word: String,
    pub prompt: String,
    pub correct_answer: String,
    pub options: Vec<String>,
    pub display_mode: DisplayMode,
}

impl Question {
    pub fn correct_index(&self) -> usize {
        self.options
            .iter()
            .position(|o| *o == self.correct_answer)
            .unwrap_or_default()
    }

    pub fn is_correct(&self, choice: &str) -> bool {
        choice == self.correct_answer
    }
}

/// 単語から問題を組み立てる
pub struct QuestionAssembler<'a> {
    generator: DistractorGenerator<'a>,
}

impl<'a> QuestionAssembler<'a> {
    pub fn new(catalog: &'a dyn ConfusionCatalog, settings: &Settings) -> Self {
        Self {
            generator: DistractorGenerator::new(catalog, settings),
        }
    }

    /// 問題にできない単語なら `Ok(None)`
    pub fn assemble<R: Rng + ?Sized>(
        &self,
        entry: &VocabularyEntry,
        rng: &mut R,
    ) -> Result<Option<Question>, QuizError> {
        let distractors = self.generator.generate(&entry.reading, rng)?;
        if !distractors.is_complete() {
            log::debug!(
                "skip {} after {} attempts: {:?}",
                entry.word,
                distractors.attempts,
                distractors.failure
            );
            return Ok(None);
        }

        // 誤答 + 正解をまとめて混ぜる
        let mut options: Vec<String> = distractors
            .variants
            .into_iter()
            .take(self.generator.required())
            .collect();
        options.push(entry.reading.clone());
        options.shuffle(rng);

        // 単語そのものが選択肢に含まれると答えが丸見えになるので、意味を出す
        let (prompt, display_mode) = if options.contains(&entry.word) {
            match entry.meaning() {
                Some(meaning) if !options.iter().any(|o| o == meaning) => {
                    (meaning.to_string(), DisplayMode::Meaning)
                }
                _ => {
                    log::debug!("skip {}: word collides with an option", entry.word);
                    return Ok(None);
                }
            }
        } else {
            (entry.word.clone(), DisplayMode::Word)
        };

        Ok(Some(Question {
            word: entry.word.clone(),
            prompt,
            correct_answer: entry.reading.clone(),
            options,
            display_mode,
        }))
    }
}
