use serde::{Deserialize, Serialize};

/// 预算读取窗口
///
/// 限定一次预算读取最多回看多少条消息（`max_recent`），
/// 以及累计 token 数的上限（`token_limit`）。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryWindow {
    max_recent: usize,
    token_limit: u32,
}

impl HistoryWindow {
    /// 创建指定大小的读取窗口
    pub fn new(max_recent: usize, token_limit: u32) -> Self {
        Self {
            max_recent,
            token_limit,
        }
    }

    pub fn max_recent(&self) -> usize {
        self.max_recent
    }

    pub fn token_limit(&self) -> u32 {
        self.token_limit
    }

    // Builder Methods

    pub fn with_max_recent(mut self, max_recent: usize) -> Self {
        self.max_recent = max_recent;
        self
    }

    pub fn with_token_limit(mut self, token_limit: u32) -> Self {
        self.token_limit = token_limit;
        self
    }
}

impl Default for HistoryWindow {
    /// 默认窗口：最近 5 条消息，500 token 预算
    fn default() -> Self {
        Self {
            max_recent: 5,
            token_limit: 500,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_window() {
        let window = HistoryWindow::default();
        assert_eq!(window.max_recent(), 5);
        assert_eq!(window.token_limit(), 500);
    }

    #[test]
    fn test_builder() {
        let window = HistoryWindow::default()
            .with_max_recent(10)
            .with_token_limit(2000);
        assert_eq!(window.max_recent(), 10);
        assert_eq!(window.token_limit(), 2000);
    }

    #[test]
    fn test_serde_roundtrip() {
        let window = HistoryWindow::new(3, 128);
        let json = serde_json::to_string(&window).unwrap();
        let deserialized: HistoryWindow = serde_json::from_str(&json).unwrap();
        assert_eq!(window, deserialized);
    }
}
