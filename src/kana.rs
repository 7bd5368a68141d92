// ============================================
// src/kana.rs
// 仮名の混同グループ
// ============================================

use std::collections::HashMap;

use crate::error::QuizError;

/// 混同グループの ID
pub type GroupId = i64;

/// 「削除してよい文字」を表す予約 ID
pub const DELETABLE_GROUP: GroupId = 100;
/// 「グループなし」を表す番兵
pub const NO_GROUP: GroupId = 0;

/// 読みの1文字がどう扱われるか
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    /// 触らない
    Fixed,
    /// 取り除いてよい（っ・ー など）
    Deletable,
    /// 同じグループの別の文字と入れ替えてよい
    Substitutable(GroupId),
}

impl Slot {
    pub fn classify(group: Option<GroupId>) -> Self {
        match group {
            None | Some(NO_GROUP) => Slot::Fixed,
            Some(DELETABLE_GROUP) => Slot::Deletable,
            Some(id) => Slot::Substitutable(id),
        }
    }
}

/// 混同グループの参照先
///
/// 読み取り専用。SQLite ストアやテスト用の表が実装する。
pub trait ConfusionCatalog {
    /// 各文字のグループ ID を返す（未登録の文字は None）
    fn lookup_groups(&self, characters: &[String])
    -> Result<HashMap<String, Option<GroupId>>, QuizError>;

    /// `group` に属する `exclude` 以外の文字を最大 `limit` 件返す
    fn find_substitutes(
        &self,
        group: GroupId,
        exclude: &str,
        limit: usize,
    ) -> Result<Vec<String>, QuizError>;
}

/// 読みを「文字」単位に分解する
pub fn split_reading(reading: &str) -> Vec<String> {
    reading.chars().map(String::from).collect()
}
