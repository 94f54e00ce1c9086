//! フォールバックラダーの状態機械
//!
//! 検索条件を段階的に緩めながら「未表示の店舗が1件以上得られる」まで
//! 問い合わせを繰り返す。各段は一度だけ試行し、6段すべて外れたら
//! 無条件ランダム取得（全置換）に落ちる

use crate::dedup::{dedup_key, ShownKeys};
use crate::types::Restaurant;
use std::collections::HashSet;

/// 距離を2倍する際の上限（メートル）
pub const MAX_DISTANCE_M: u32 = 20_000;

/// 読み込みモード
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadMode {
    /// 新規検索。表示中リストを置き換える
    Replace,
    /// 続きを読む。表示中リストに追記する
    Append,
}

/// 距離条件の上書き
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TierDistance {
    /// 選択中の距離のまま
    Current,
    /// 2倍（MAX_DISTANCE_Mで頭打ち）
    Doubled,
    /// 距離条件なし
    Unlimited,
}

/// ラダーの1段。距離の上書きと除外キー送信の有無で定義される
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tier {
    pub distance: TierDistance,
    pub exclude: bool,
}

/// 固定のラダー。前半3段は表示済みキーを除外して問い合わせ、
/// 後半3段は除外なしで同じ距離系列をなぞる
pub const LADDER: [Tier; 6] = [
    Tier { distance: TierDistance::Current, exclude: true },
    Tier { distance: TierDistance::Doubled, exclude: true },
    Tier { distance: TierDistance::Unlimited, exclude: true },
    Tier { distance: TierDistance::Current, exclude: false },
    Tier { distance: TierDistance::Doubled, exclude: false },
    Tier { distance: TierDistance::Unlimited, exclude: false },
];

impl Tier {
    /// この段で送る距離パラメータ。Noneなら距離条件を付けない
    pub fn effective_distance(&self, base_m: u32) -> Option<u32> {
        match self.distance {
            TierDistance::Current => Some(base_m),
            TierDistance::Doubled => Some(base_m.saturating_mul(2).min(MAX_DISTANCE_M)),
            TierDistance::Unlimited => None,
        }
    }
}

/// 次に実行すべきステップ
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WalkStep {
    /// この段のクエリを投げる
    Tier(Tier),
    /// 6段すべて外れた。無条件ランダム取得（常に全置換、空でも描画）
    RandomFallback,
}

/// レスポンスを渡した結果
#[derive(Debug, Clone, PartialEq)]
pub enum Offer {
    /// 未表示の店舗が得られた。これを描画して走査終了
    Accepted(Vec<Restaurant>),
    /// 新規なし。次の段へ
    Next,
}

/// ラダー走査の状態
///
/// Replaceは呼び出し時点のスナップショットと比較し、
/// Appendは現在の表示済み集合と比較する。遅延したレスポンスが
/// 別の呼び出しの描画結果を二重表示しないための区別
#[derive(Debug)]
pub struct LadderWalk {
    mode: LoadMode,
    snapshot: HashSet<String>,
    tier_idx: usize,
}

impl LadderWalk {
    pub fn new(mode: LoadMode, shown: &ShownKeys) -> Self {
        Self {
            mode,
            snapshot: shown.snapshot(),
            tier_idx: 0,
        }
    }

    pub fn mode(&self) -> LoadMode {
        self.mode
    }

    pub fn next_step(&self) -> WalkStep {
        match LADDER.get(self.tier_idx) {
            Some(tier) => WalkStep::Tier(*tier),
            None => WalkStep::RandomFallback,
        }
    }

    /// 現在の段のレスポンスを判定する
    ///
    /// 未表示の店舗（レスポンス内の重複も除く）が1件以上あれば
    /// Acceptedでその部分集合を返す。なければ段を進めてNext
    pub fn offer(&mut self, items: &[Restaurant], live: &ShownKeys) -> Offer {
        let mut batch_seen = HashSet::new();
        let mut fresh = Vec::new();
        for item in items {
            let key = dedup_key(item);
            let already = match self.mode {
                LoadMode::Replace => self.snapshot.contains(&key),
                LoadMode::Append => live.contains(&key),
            };
            if already || !batch_seen.insert(key) {
                continue;
            }
            fresh.push(item.clone());
        }

        if fresh.is_empty() {
            self.tier_idx += 1;
            Offer::Next
        } else {
            Offer::Accepted(fresh)
        }
    }
}
