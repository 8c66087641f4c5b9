use std::fmt;

use indexmap::IndexMap;

/// 거래소로 보낼 요청 파라미터. 삽입 순서를 유지하고, 같은 키는 덮어쓴다
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestParams {
    entries: IndexMap<String, String>,
}

impl RequestParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// 키가 이미 있으면 원래 위치에서 값을 교체하고 이전 값을 돌려준다
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.entries.insert(key.into(), value.into())
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// 남은 키의 순서는 그대로 둔다
    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.entries.shift_remove(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

impl<K: Into<String>, V: Into<String>> Extend<(K, V)> for RequestParams {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        self.entries
            .extend(iter.into_iter().map(|(k, v)| (k.into(), v.into())));
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for RequestParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}

impl fmt::Display for RequestParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, (k, v)) in self.entries.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{k}={v}")?;
        }
        f.write_str("}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_overwrites_in_place() {
        let mut params = RequestParams::new();
        params.insert("symbol", "BTCUSDT");
        params.insert("side", "BUY");
        let prev = params.insert("symbol", "ETHUSDT");

        assert_eq!(prev.as_deref(), Some("BTCUSDT"));
        assert_eq!(params.len(), 2);
        assert_eq!(params.keys().collect::<Vec<_>>(), vec!["symbol", "side"]);
        assert_eq!(params.get("symbol"), Some("ETHUSDT"));
    }

    #[test]
    fn test_remove_and_display() {
        let mut params: RequestParams =
            [("a", "1"), ("signature", "deadbeef"), ("b", "2")].into_iter().collect();
        assert_eq!(params.remove("signature").as_deref(), Some("deadbeef"));
        assert_eq!(params.remove("signature"), None);
        assert_eq!(params.to_string(), "{a=1, b=2}");
    }

    #[test]
    fn test_remove_keeps_order_of_remaining_keys() {
        let mut params: RequestParams = [("a", "1"), ("b", "2"), ("c", "3"), ("d", "4")]
            .into_iter()
            .collect();
        params.remove("b");
        assert_eq!(params.keys().collect::<Vec<_>>(), vec!["a", "c", "d"]);
    }
}
