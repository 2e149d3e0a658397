//! 選択内容の集計（ChoiceAggregator）
//!
//! 副作用のない純粋関数。参加者の並び順に依存しない（可換）。

use std::collections::HashMap;

use super::{
    entity::{Choice, ScoredItem},
    value_object::ItemId,
};

/// 全参加者の選択を合算し、スコア降順・公開年降順に並べる
///
/// 同じ ID のアイテムはスコアを加算し、タイトル・ポスター・公開年は最初に
/// 出現したものを採用する。スコアも公開年も同じアイテムは出現順を保つ。
/// 公開年が不明なアイテムは、同スコア内で公開年のあるアイテムの後ろに並ぶ。
pub fn combine_and_rank(choices: &[Choice]) -> Vec<ScoredItem> {
    let mut combined: Vec<ScoredItem> = Vec::new();
    let mut index: HashMap<ItemId, usize> = HashMap::new();

    for (category, item) in choices.iter().flat_map(Choice::categorized) {
        match index.get(&item.id) {
            Some(&position) => combined[position].score += category.score(),
            None => {
                index.insert(item.id.clone(), combined.len());
                combined.push(ScoredItem {
                    id: item.id.clone(),
                    title: item.title.clone(),
                    poster_image: item.poster_image.clone(),
                    score: category.score(),
                    year: item.year,
                });
            }
        }
    }

    // sort_by is stable
    combined.sort_by(|a, b| b.score.cmp(&a.score).then_with(|| b.year.cmp(&a.year)));
    combined
}
