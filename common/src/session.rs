//! ブラウジングセッションの状態
//!
//! 表示済みキー・noMoreフラグ・読み込み中フラグ・現在地を
//! 1つの所有オブジェクトにまとめ、ローダーへ明示的に渡す。
//! DOMにもネットワークにも依存しない

use crate::dedup::{dedup_key, ShownKeys};
use crate::ladder::LoadMode;
use crate::query::PAGE_LIMIT;
use crate::types::{GeoPoint, Restaurant};

/// 進行中操作のトークン
///
/// beginのたびに世代が進み、古いトークンでの描画・状態更新は拒否される。
/// 「最新の呼び出しだけが勝つ」を世代比較で表す
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WalkToken {
    generation: u64,
}

/// セッション状態。ページ読み込みで生成され、リロードで消える
#[derive(Debug)]
pub struct Session {
    pub shown: ShownKeys,
    pub no_more: bool,
    pub geo: GeoPoint,
    loading: bool,
    generation: u64,
}

impl Session {
    pub fn new(geo: GeoPoint) -> Self {
        Self {
            shown: ShownKeys::new(),
            no_more: false,
            geo,
            loading: false,
            generation: 0,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// 読み込み操作を開始する
    ///
    /// 既に進行中ならNone（呼び出し側はログだけ残して戻る）。
    /// 成功時は世代を進め、以前のトークンをすべて無効化する
    pub fn try_begin(&mut self) -> Option<WalkToken> {
        if self.loading {
            return None;
        }
        self.loading = true;
        self.generation += 1;
        Some(WalkToken { generation: self.generation })
    }

    /// トークンが現行世代か
    pub fn is_current(&self, token: WalkToken) -> bool {
        token.generation == self.generation
    }

    /// 操作の終了。現行世代のトークンのみ読み込み中を解除できる
    pub fn finish(&mut self, token: WalkToken) {
        if self.is_current(token) {
            self.loading = false;
        }
    }

    /// 受理されたバッチをセッションに反映する
    ///
    /// 古いトークンならNone（何も変更しない）。
    /// Replaceは表示済み集合とnoMoreを先にリセットする。
    /// 入力は重複排除済みのはずだが、二重の防御として既出キーは飛ばす
    ///
    /// # Returns
    /// 実際に表示リストへ追加すべき店舗列。Replaceで空バッチなら空Vec
    pub fn apply(
        &mut self,
        token: WalkToken,
        mode: LoadMode,
        items: &[Restaurant],
    ) -> Option<Vec<Restaurant>> {
        if !self.is_current(token) {
            return None;
        }
        if mode == LoadMode::Replace {
            self.shown.clear();
            self.no_more = false;
        }
        let mut accepted = Vec::new();
        for item in items {
            if self.shown.insert(dedup_key(item)) {
                accepted.push(item.clone());
            }
        }
        Some(accepted)
    }

    /// ページサイズ未満のレスポンスだったら「これ以上なし」を立てる
    pub fn note_page(&mut self, token: WalkToken, returned: usize) {
        if self.is_current(token) && returned < PAGE_LIMIT as usize {
            self.no_more = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::DEFAULT_POSITION;

    fn item(id: &str) -> Restaurant {
        Restaurant {
            id: Some(id.to_string()),
            name: format!("店{}", id),
            addr: format!("住所{}", id),
            ..Default::default()
        }
    }

    fn session() -> Session {
        Session::new(DEFAULT_POSITION)
    }

    // =============================================
    // 進行中ガードと世代
    // =============================================

    #[test]
    fn test_try_begin_coalesces_concurrent_loads() {
        let mut s = session();
        let token = s.try_begin();
        assert!(token.is_some());
        // 進行中の二度目は拒否される
        assert!(s.try_begin().is_none());
        s.finish(token.unwrap());
        assert!(s.try_begin().is_some());
    }

    #[test]
    fn test_stale_token_cannot_render() {
        let mut s = session();
        let first = s.try_begin().unwrap();
        s.finish(first);
        let second = s.try_begin().unwrap();

        // 古い呼び出しの遅延レスポンスは描画もnoMore更新もできない
        assert_eq!(s.apply(first, LoadMode::Append, &[item("a")]), None);
        s.note_page(first, 0);
        assert!(!s.no_more);
        assert!(s.shown.is_empty());

        // 最新の呼び出しだけが反映される
        let accepted = s.apply(second, LoadMode::Append, &[item("a")]).unwrap();
        assert_eq!(accepted.len(), 1);
    }

    #[test]
    fn test_stale_token_cannot_finish() {
        let mut s = session();
        let first = s.try_begin().unwrap();
        s.finish(first);
        let _second = s.try_begin().unwrap();
        // 前の操作のfinishが新しい操作の読み込み中を解除してはいけない
        s.finish(first);
        assert!(s.is_loading());
    }

    // =============================================
    // Replace / Append の反映
    // =============================================

    #[test]
    fn test_apply_replace_resets_session() {
        let mut s = session();
        let t1 = s.try_begin().unwrap();
        s.apply(t1, LoadMode::Replace, &[item("a"), item("b")]);
        s.note_page(t1, 2);
        assert!(s.no_more);
        s.finish(t1);

        // 新規検索は表示済み集合とnoMoreを必ずクリアする
        let t2 = s.try_begin().unwrap();
        let accepted = s.apply(t2, LoadMode::Replace, &[item("a"), item("c")]).unwrap();
        assert_eq!(accepted.len(), 2);
        assert_eq!(s.shown.len(), 2);
        assert!(!s.no_more);
    }

    #[test]
    fn test_apply_append_keeps_existing_keys() {
        let mut s = session();
        let t1 = s.try_begin().unwrap();
        s.apply(t1, LoadMode::Replace, &[item("a")]);
        s.finish(t1);

        let t2 = s.try_begin().unwrap();
        let accepted = s.apply(t2, LoadMode::Append, &[item("b")]).unwrap();
        assert_eq!(accepted.len(), 1);
        // 追記では以前のキーが残る
        assert!(s.shown.contains("a"));
        assert!(s.shown.contains("b"));
    }

    #[test]
    fn test_apply_defensive_duplicate_skip() {
        let mut s = session();
        let t = s.try_begin().unwrap();
        s.apply(t, LoadMode::Replace, &[item("a")]);

        // ローダー側で除去済みのはずだが、既出キーが紛れても描画しない
        let accepted = s.apply(t, LoadMode::Append, &[item("a"), item("b")]).unwrap();
        assert_eq!(accepted.len(), 1);
        assert_eq!(accepted[0].id.as_deref(), Some("b"));
        assert_eq!(s.shown.len(), 2);
    }

    #[test]
    fn test_apply_replace_with_empty_batch() {
        let mut s = session();
        let t1 = s.try_begin().unwrap();
        s.apply(t1, LoadMode::Replace, &[item("a")]);
        s.finish(t1);

        // ランダムフォールバックが空でも全置換は成立する
        let t2 = s.try_begin().unwrap();
        let accepted = s.apply(t2, LoadMode::Replace, &[]).unwrap();
        assert!(accepted.is_empty());
        assert!(s.shown.is_empty());
    }

    // =============================================
    // noMoreフラグ
    // =============================================

    #[test]
    fn test_note_page_sets_no_more_on_short_page() {
        let mut s = session();
        let t = s.try_begin().unwrap();
        s.note_page(t, PAGE_LIMIT as usize);
        assert!(!s.no_more);
        s.note_page(t, PAGE_LIMIT as usize - 1);
        assert!(s.no_more);
    }
}
