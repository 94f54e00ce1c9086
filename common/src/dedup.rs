//! 重複排除キーと表示済みキー集合

use crate::types::Restaurant;
use std::collections::HashSet;

/// 店舗の重複排除キーを導出する
///
/// idがあればそれを使い、無ければ "名前|住所" で代用する。
/// 同一セッション内で同じキーの店舗を二度描画しないための同一性
///
/// # Examples
/// ```
/// use machimeshi_common::types::Restaurant;
/// use machimeshi_common::dedup_key;
///
/// let item = Restaurant {
///     name: "店".into(),
///     addr: "住所".into(),
///     ..Default::default()
/// };
/// assert_eq!(dedup_key(&item), "店|住所");
/// ```
pub fn dedup_key(item: &Restaurant) -> String {
    match &item.id {
        Some(id) if !id.is_empty() => id.clone(),
        _ => format!("{}|{}", item.name, item.addr),
    }
}

/// 表示済みキーの集合
///
/// 「既に表示した」の唯一の真実。除外パラメータに使うため
/// 挿入順も保持する
#[derive(Debug, Clone, Default)]
pub struct ShownKeys {
    order: Vec<String>,
    set: HashSet<String>,
}

impl ShownKeys {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.set.contains(key)
    }

    /// キーを登録する。新規ならtrue、既出ならfalse
    pub fn insert(&mut self, key: String) -> bool {
        if !self.set.insert(key.clone()) {
            return false;
        }
        self.order.push(key);
        true
    }

    pub fn clear(&mut self) {
        self.order.clear();
        self.set.clear();
    }

    /// 挿入順のキー一覧
    pub fn keys(&self) -> &[String] {
        &self.order
    }

    /// スナップショット（ラダー開始時点の除外集合）
    pub fn snapshot(&self) -> HashSet<String> {
        self.set.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: Option<&str>, name: &str, addr: &str) -> Restaurant {
        Restaurant {
            id: id.map(String::from),
            name: name.to_string(),
            addr: addr.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_dedup_key_from_id() {
        let r = item(Some("r-7"), "店A", "住所A");
        assert_eq!(dedup_key(&r), "r-7");
    }

    #[test]
    fn test_dedup_key_empty_id_falls_back() {
        // 空文字のidはid無し扱い
        let r = item(Some(""), "店A", "住所A");
        assert_eq!(dedup_key(&r), "店A|住所A");
    }

    #[test]
    fn test_dedup_key_without_id() {
        let r = item(None, "店B", "住所B");
        assert_eq!(dedup_key(&r), "店B|住所B");
    }

    #[test]
    fn test_shown_keys_insert_and_contains() {
        let mut shown = ShownKeys::new();
        assert!(shown.insert("a".to_string()));
        assert!(shown.insert("b".to_string()));
        assert!(!shown.insert("a".to_string()));
        assert_eq!(shown.len(), 2);
        assert!(shown.contains("a"));
        assert!(!shown.contains("c"));
    }

    #[test]
    fn test_shown_keys_preserves_insertion_order() {
        let mut shown = ShownKeys::new();
        for key in ["c", "a", "b"] {
            shown.insert(key.to_string());
        }
        assert_eq!(shown.keys(), &["c", "a", "b"]);
    }

    #[test]
    fn test_shown_keys_clear() {
        let mut shown = ShownKeys::new();
        shown.insert("a".to_string());
        shown.clear();
        assert!(shown.is_empty());
        assert!(!shown.contains("a"));
        // クリア後は再登録できる
        assert!(shown.insert("a".to_string()));
    }
}
