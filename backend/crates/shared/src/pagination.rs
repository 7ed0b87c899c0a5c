//! Pagination - Offset pagination parameters shared by list endpoints

use serde::Deserialize;

/// 既定のページサイズ
pub const DEFAULT_PAGE_SIZE: u32 = 10;
/// ページサイズの上限
pub const MAX_PAGE_SIZE: u32 = 100;

/// 一覧取得パラメータ
///
/// クエリ文字列 `?search=rust&page=2&limit=20` から構築されます。
/// `size` は `limit` の別名として受け付けます。
///
/// ## Examples
/// ```rust
/// use kernel::pagination::SearchParam;
///
/// let param = SearchParam::new(None, 3, 20);
/// assert_eq!(param.offset(), 40);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "RawSearchParam")]
pub struct SearchParam {
    /// 検索文字列（タイトル・本文に対する部分一致）
    pub search: Option<String>,
    /// 1 始まりのページ番号
    pub page: u32,
    /// 1 ページあたりの件数
    pub limit: u32,
}

#[derive(Deserialize)]
struct RawSearchParam {
    search: Option<String>,
    page: Option<u32>,
    #[serde(alias = "size")]
    limit: Option<u32>,
}

impl From<RawSearchParam> for SearchParam {
    fn from(raw: RawSearchParam) -> Self {
        Self::new(
            raw.search,
            raw.page.unwrap_or(1),
            raw.limit.unwrap_or(DEFAULT_PAGE_SIZE),
        )
    }
}

impl Default for SearchParam {
    fn default() -> Self {
        Self::new(None, 1, DEFAULT_PAGE_SIZE)
    }
}

impl SearchParam {
    /// 正規化してパラメータを作成
    ///
    /// - `page` が 0 の場合は 1 として扱う
    /// - `limit` は 1..=[`MAX_PAGE_SIZE`] に丸める
    /// - 空白のみの `search` は指定なしとして扱う
    pub fn new(search: Option<String>, page: u32, limit: u32) -> Self {
        let search = search
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());
        Self {
            search,
            page: page.max(1),
            limit: limit.clamp(1, MAX_PAGE_SIZE),
        }
    }

    /// 上限を指定して `limit` を丸め直す
    pub fn with_max_limit(mut self, max: u32) -> Self {
        self.limit = self.limit.min(max.max(1));
        self
    }

    /// 読み飛ばす件数
    #[inline]
    pub fn offset(&self) -> u64 {
        u64::from(self.page - 1) * u64::from(self.limit)
    }

    /// SQL `LIKE` 用のパターン（`%` `_` `\` をエスケープ済み）
    pub fn like_pattern(&self) -> Option<String> {
        self.search.as_deref().map(|s| {
            let mut pattern = String::with_capacity(s.len() + 2);
            pattern.push('%');
            for c in s.chars() {
                if matches!(c, '%' | '_' | '\\') {
                    pattern.push('\\');
                }
                pattern.push(c);
            }
            pattern.push('%');
            pattern
        })
    }

    /// 大文字小文字を区別しない部分一致
    ///
    /// `like_pattern` と同じ意味論をメモリ上で提供します。
    pub fn matches(&self, haystacks: &[&str]) -> bool {
        match &self.search {
            None => true,
            Some(needle) => {
                let needle = needle.to_lowercase();
                haystacks
                    .iter()
                    .any(|h| h.to_lowercase().contains(&needle))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let param: SearchParam = serde_json::from_str("{}").unwrap();
        assert_eq!(param, SearchParam::default());
        assert_eq!(param.page, 1);
        assert_eq!(param.limit, DEFAULT_PAGE_SIZE);
        assert_eq!(param.offset(), 0);
    }

    #[test]
    fn test_size_alias_and_clamping() {
        let param: SearchParam = serde_json::from_str(r#"{"page":0,"size":500}"#).unwrap();
        assert_eq!(param.page, 1);
        assert_eq!(param.limit, MAX_PAGE_SIZE);

        let param: SearchParam = serde_json::from_str(r#"{"limit":0}"#).unwrap();
        assert_eq!(param.limit, 1);
    }

    #[test]
    fn test_like_pattern_escapes_wildcards() {
        let param = SearchParam::new(Some("100%_off\\".into()), 1, 10);
        assert_eq!(param.like_pattern().as_deref(), Some("%100\\%\\_off\\\\%"));
    }

    #[test]
    fn test_blank_search_is_ignored() {
        let param = SearchParam::new(Some("   ".into()), 1, 10);
        assert!(param.search.is_none());
        assert!(param.like_pattern().is_none());
    }

    #[test]
    fn test_matches_is_case_insensitive() {
        let param = SearchParam::new(Some("RuSt".into()), 1, 10);
        assert!(param.matches(&["Learning rust", ""]));
        assert!(!param.matches(&["go", "python"]));
    }

    #[test]
    fn test_with_max_limit() {
        let param = SearchParam::new(None, 2, 80).with_max_limit(50);
        assert_eq!(param.limit, 50);
        assert_eq!(param.offset(), 50);
    }
}
