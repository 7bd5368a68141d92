// ============================================
// src/distractor.rs
// 誤答（まぎらわしい読み）の生成
// ============================================

use indexmap::IndexSet;
use rand::Rng;
use rand::seq::{IndexedRandom, index};

use crate::config::Settings;
use crate::error::QuizError;
use crate::kana::{ConfusionCatalog, Slot, split_reading};

/// 削除と置換の両方ができるとき、削除を選ぶ確率
const DELETE_BIAS: f64 = 0.6;
/// 削除した上でさらに置換もする確率
const ALSO_SUBSTITUTE: f64 = 0.5;

/// 読みの1文字と、その扱い
#[derive(Debug, Clone)]
struct Unit {
    text: String,
    slot: Slot,
}

/// 必要数に届かなかった理由
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationFailure {
    EmptyReading,
    /// 削除も置換もできる位置がない
    NoModifiablePositions,
    /// 試行回数を使い切った
    Exhausted { produced: usize, required: usize },
}

/// 生成結果
#[derive(Debug, Clone)]
pub struct Distractors {
    /// 挿入順を保った重複なしの誤答
    pub variants: IndexSet<String>,
    pub attempts: usize,
    pub failure: Option<GenerationFailure>,
}

impl Distractors {
    fn failed(failure: GenerationFailure) -> Self {
        Self {
            variants: IndexSet::new(),
            attempts: 0,
            failure: Some(failure),
        }
    }

    pub fn is_complete(&self) -> bool {
        self.failure.is_none()
    }
}

/// 正しい読みを少しだけ崩して誤答を作る
pub struct DistractorGenerator<'a> {
    catalog: &'a dyn ConfusionCatalog,
    required: usize,
    max_attempts: usize,
    substitute_limit: usize,
}

impl<'a> DistractorGenerator<'a> {
    pub fn new(catalog: &'a dyn ConfusionCatalog, settings: &Settings) -> Self {
        Self {
            catalog,
            required: settings.distractor_count,
            max_attempts: settings.max_attempts,
            substitute_limit: settings.substitute_limit,
        }
    }

    pub fn required(&self) -> usize {
        self.required
    }

    /// 誤答を `required` 個まで作る
    ///
    /// 足りなかった場合も `Ok` で返し、`failure` に理由を入れる。
    /// `Err` になるのは参照先の読み込みに失敗したときだけ。
    pub fn generate<R: Rng + ?Sized>(
        &self,
        reading: &str,
        rng: &mut R,
    ) -> Result<Distractors, QuizError> {
        let characters = split_reading(reading);
        if characters.is_empty() {
            return Ok(Distractors::failed(GenerationFailure::EmptyReading));
        }

        // 1. 各文字のグループを引いて分類する
        let groups = self.catalog.lookup_groups(&characters)?;
        let units: Vec<Unit> = characters
            .into_iter()
            .map(|text| {
                let slot = Slot::classify(groups.get(&text).copied().flatten());
                Unit { text, slot }
            })
            .collect();

        let deletable = positions(&units, |slot| slot == Slot::Deletable);
        let substitutable = !positions(&units, is_substitutable).is_empty();

        if deletable.is_empty() && !substitutable {
            log::debug!("{reading}: no modifiable positions");
            return Ok(Distractors::failed(
                GenerationFailure::NoModifiablePositions,
            ));
        }

        // 2. 必要数が揃うか試行回数が尽きるまで崩す
        let mut variants = IndexSet::new();
        let mut attempts = 0;
        while variants.len() < self.required && attempts < self.max_attempts {
            attempts += 1;
            let mut working = units.clone();

            let (do_delete, do_substitute) = match (!deletable.is_empty(), substitutable) {
                (true, false) => (true, false),
                (false, true) => (false, true),
                _ => {
                    let delete = rng.random_bool(DELETE_BIAS);
                    (delete, !delete || rng.random_bool(ALSO_SUBSTITUTE))
                }
            };

            let mut modified = false;
            if do_delete {
                modified |= delete_some(&mut working, &deletable, rng);
            }
            if do_substitute {
                modified |= self.substitute_some(&mut working, reading, rng)?;
            }
            if !modified {
                continue;
            }

            let candidate: String = working.iter().map(|u| u.text.as_str()).collect();
            if !candidate.is_empty() && candidate != reading && variants.insert(candidate.clone())
            {
                log::debug!("{reading} -> {candidate}");
            }
        }

        let failure = (variants.len() < self.required).then(|| {
            log::debug!(
                "{reading}: only {} of {} distractors after {attempts} attempts",
                variants.len(),
                self.required
            );
            GenerationFailure::Exhausted {
                produced: variants.len(),
                required: self.required,
            }
        });

        Ok(Distractors {
            variants,
            attempts,
            failure,
        })
    }

    /// 1〜2 か所を同じグループの別の文字に入れ替える
    ///
    /// 削除後の並びで位置を数え直す。候補がない位置に当たったらそこで打ち切り、
    /// それまでの変更は残す。
    fn substitute_some<R: Rng + ?Sized>(
        &self,
        working: &mut [Unit],
        reading: &str,
        rng: &mut R,
    ) -> Result<bool, QuizError> {
        let candidates = positions(working, is_substitutable);
        if candidates.is_empty() {
            return Ok(false);
        }

        let mut changed = false;
        for pos in pick_positions(&candidates, rng) {
            let Slot::Substitutable(group) = working[pos].slot else {
                continue;
            };
            let substitutes =
                self.catalog
                    .find_substitutes(group, &working[pos].text, self.substitute_limit)?;
            match substitutes.choose(rng) {
                Some(substitute) => {
                    working[pos].text = substitute.clone();
                    changed = true;
                }
                None => {
                    log::debug!("{reading}: no substitute for {}", working[pos].text);
                    break;
                }
            }
        }
        Ok(changed)
    }
}

/// 1〜2 か所を取り除く（後ろから消して添字のずれを防ぐ）
fn delete_some<R: Rng + ?Sized>(working: &mut Vec<Unit>, deletable: &[usize], rng: &mut R) -> bool {
    let mut picked = pick_positions(deletable, rng);
    picked.sort_unstable_by(|a, b| b.cmp(a));
    for &pos in &picked {
        working.remove(pos);
    }
    !picked.is_empty()
}

/// 候補から重複なしで 1 つ（2 つ以上あれば 1〜2 つ）選ぶ
fn pick_positions<R: Rng + ?Sized>(candidates: &[usize], rng: &mut R) -> Vec<usize> {
    if candidates.is_empty() {
        return Vec::new();
    }
    let count = if candidates.len() >= 2 {
        rng.random_range(1..=2)
    } else {
        1
    };
    index::sample(rng, candidates.len(), count)
        .into_iter()
        .map(|i| candidates[i])
        .collect()
}

fn positions(units: &[Unit], keep: impl Fn(Slot) -> bool) -> Vec<usize> {
    units
        .iter()
        .enumerate()
        .filter(|(_, unit)| keep(unit.slot))
        .map(|(idx, _)| idx)
        .collect()
}

fn is_substitutable(slot: Slot) -> bool {
    matches!(slot, Slot::Substitutable(_))
}
