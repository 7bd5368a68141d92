/*
 * src/starter.rs
 * 最初から入っている単語と混同グループ
 */

use crate::kana::{DELETABLE_GROUP, GroupId};
use crate::lesson::Lesson;
use crate::question::VocabularyEntry;
use crate::store::{Dataset, KanaRow};

#[derive(Copy, Clone)]
pub struct StarterWord {
    pub word: &'static str,    // 表示用 (漢字混じり)
    pub reading: &'static str, // 正解の読み (ひらがな)
    pub meaning: &'static str,
    pub lesson: u8,
}

/// 単語リスト (課の昇順)
pub const STARTER_WORDS: &[StarterWord] = &[
    // Lesson 1
    StarterWord { word: "猫", reading: "ねこ", meaning: "cat", lesson: 1 },
    StarterWord { word: "犬", reading: "いぬ", meaning: "dog", lesson: 1 },
    StarterWord { word: "空", reading: "そら", meaning: "sky", lesson: 1 },
    StarterWord { word: "海", reading: "うみ", meaning: "sea", lesson: 1 },

    // Lesson 2
    StarterWord { word: "山", reading: "やま", meaning: "mountain", lesson: 2 },
    StarterWord { word: "川", reading: "かわ", meaning: "river", lesson: 2 },
    StarterWord { word: "車", reading: "くるま", meaning: "car", lesson: 2 },
    StarterWord { word: "電話", reading: "でんわ", meaning: "telephone", lesson: 2 },
    StarterWord { word: "時計", reading: "とけい", meaning: "clock", lesson: 2 },

    // Lesson 3 (かなだけの単語は意味で出題される)
    StarterWord { word: "こんにちは", reading: "こんにちは", meaning: "hello", lesson: 3 },
    StarterWord { word: "ありがとう", reading: "ありがとう", meaning: "thank you", lesson: 3 },
    StarterWord { word: "さようなら", reading: "さようなら", meaning: "goodbye", lesson: 3 },
    StarterWord { word: "学校", reading: "がっこう", meaning: "school", lesson: 3 },

    // Lesson 4
    StarterWord { word: "飛行機", reading: "ひこうき", meaning: "airplane", lesson: 4 },
    StarterWord { word: "図書館", reading: "としょかん", meaning: "library", lesson: 4 },
    StarterWord { word: "新幹線", reading: "しんかんせん", meaning: "bullet train", lesson: 4 },
    StarterWord { word: "動物園", reading: "どうぶつえん", meaning: "zoo", lesson: 4 },

    // Lesson 5
    StarterWord { word: "水族館", reading: "すいぞくかん", meaning: "aquarium", lesson: 5 },
    StarterWord { word: "遊園地", reading: "ゆうえんち", meaning: "amusement park", lesson: 5 },
    StarterWord { word: "駐車場", reading: "ちゅうしゃじょう", meaning: "parking lot", lesson: 5 },
    StarterWord { word: "高速道路", reading: "こうそくどうろ", meaning: "expressway", lesson: 5 },
];

/// 混同グループ (清音と濁音・半濁音、形の似た文字)
pub const STARTER_KANA: &[(&str, GroupId)] = &[
    ("か", 1), ("が", 1),
    ("き", 2), ("ぎ", 2),
    ("く", 3), ("ぐ", 3),
    ("け", 4), ("げ", 4),
    ("こ", 5), ("ご", 5),
    ("さ", 6), ("ざ", 6),
    ("し", 7), ("じ", 7),
    ("す", 8), ("ず", 8),
    ("せ", 9), ("ぜ", 9),
    ("そ", 10), ("ぞ", 10),
    ("た", 11), ("だ", 11),
    ("ち", 12), ("ぢ", 12),
    ("つ", 13), ("づ", 13),
    ("て", 14), ("で", 14),
    ("と", 15), ("ど", 15),
    ("は", 16), ("ば", 16), ("ぱ", 16),
    ("ひ", 17), ("び", 17), ("ぴ", 17),
    ("ふ", 18), ("ぶ", 18), ("ぷ", 18),
    ("へ", 19), ("べ", 19), ("ぺ", 19),
    ("ほ", 20), ("ぼ", 20), ("ぽ", 20),
    ("ぬ", 21), ("め", 21),
    ("ね", 22), ("れ", 22), ("わ", 22),
    ("る", 23), ("ろ", 23),
    ("あ", 24), ("お", 24),
    ("い", 25), ("り", 25),
    ("ま", 26), ("も", 26),
    ("ゃ", 27), ("ゅ", 27), ("ょ", 27),
    // 取り除いてもそれらしく見える文字
    ("っ", DELETABLE_GROUP),
    ("う", DELETABLE_GROUP),
    ("ー", DELETABLE_GROUP),
    // 入れ替えない
    ("ん", 0),
];

/// 組み込みデータを取り込み用の形にする
pub fn starter_dataset() -> Dataset {
    let vocabulary = STARTER_WORDS
        .iter()
        .map(|w| VocabularyEntry {
            word: w.word.to_string(),
            reading: w.reading.to_string(),
            meaning: Some(w.meaning.to_string()),
            lesson: Lesson::new(u32::from(w.lesson))
                .map(Lesson::label)
                .unwrap_or_default(),
        })
        .collect();
    let kana = STARTER_KANA
        .iter()
        .map(|(character, group)| KanaRow {
            character: character.to_string(),
            group: Some(*group),
        })
        .collect();
    Dataset { vocabulary, kana }
}
