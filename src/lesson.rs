// ============================================
// src/lesson.rs
// 課 ("Lesson N") と出題範囲の指定
// ============================================

use std::fmt;
use std::str::FromStr;

use crate::error::QuizError;

pub const FIRST_LESSON: u8 = 1;
pub const LAST_LESSON: u8 = 48;

const LABEL_PREFIX: &str = "Lesson ";

/// 1..=48 の課番号
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Lesson(u8);

impl Lesson {
    pub fn new(number: u32) -> Option<Self> {
        let number = u8::try_from(number).ok()?;
        (FIRST_LESSON..=LAST_LESSON)
            .contains(&number)
            .then_some(Self(number))
    }

    pub fn number(self) -> u8 {
        self.0
    }

    /// "Lesson N" 形式のラベルを読む（それ以外は None）
    pub fn from_label(label: &str) -> Option<Self> {
        let digits = label.trim().strip_prefix(LABEL_PREFIX)?;
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        digits.parse().ok().and_then(Self::new)
    }

    pub fn label(self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Lesson {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{LABEL_PREFIX}{}", self.0)
    }
}

/// 出題範囲
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LessonFilter {
    All,
    One(Lesson),
    Many(Vec<Lesson>),
}

impl LessonFilter {
    /// `all` / `3` / `Lesson 3` / `1-7` を受け付ける
    pub fn parse(input: &str) -> Result<Self, QuizError> {
        let trimmed = input.trim();
        let invalid = || QuizError::InvalidLessonSelection(trimmed.to_string());

        if trimmed.is_empty() {
            return Err(invalid());
        }
        if trimmed.eq_ignore_ascii_case("all") {
            return Ok(Self::All);
        }
        if let Some(lesson) = Lesson::from_label(trimmed) {
            return Ok(Self::One(lesson));
        }
        if let Some((start, end)) = trimmed.split_once('-') {
            let start = parse_number(start).ok_or_else(invalid)?;
            let end = parse_number(end).ok_or_else(invalid)?;
            if start > end {
                return Err(invalid());
            }
            let lessons = (start.number()..=end.number())
                .map(Lesson)
                .collect();
            return Ok(Self::Many(lessons));
        }
        parse_number(trimmed).map(Self::One).ok_or_else(invalid)
    }

    /// SQL の条件に使うラベル一覧（All なら None）
    pub fn labels(&self) -> Option<Vec<String>> {
        match self {
            Self::All => None,
            Self::One(lesson) => Some(vec![lesson.label()]),
            Self::Many(lessons) => Some(lessons.iter().map(|l| l.label()).collect()),
        }
    }
}

impl FromStr for LessonFilter {
    type Err = QuizError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for LessonFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => write!(f, "all lessons"),
            Self::One(lesson) => write!(f, "{lesson}"),
            Self::Many(lessons) => match (lessons.first(), lessons.last()) {
                (Some(first), Some(last)) => {
                    write!(f, "Lessons {}-{}", first.number(), last.number())
                }
                _ => write!(f, "no lessons"),
            },
        }
    }
}

fn parse_number(text: &str) -> Option<Lesson> {
    let text = text.trim();
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    text.parse().ok().and_then(Lesson::new)
}
