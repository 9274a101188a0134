//! Error Kind - Classification of errors
//!
//! Defines the [`ErrorKind`] enum that classifies client engine failures.

use serde::Serialize;

/// エラー種別の列挙体
///
/// クライアントエンジンで発生する失敗の分類を定義します。
/// 各バリアントは再試行可能かどうかの判定にマッピングされます。
///
/// ## Notes
/// * `non_exhaustive` - 将来的に列挙子が追加される可能性があることを示す
///
/// ## Examples
/// ```rust
/// use kernel::error::kind::ErrorKind;
///
/// let kind = ErrorKind::Transport;
/// assert!(kind.is_retryable());
/// assert_eq!(kind.as_str(), "Transport");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[non_exhaustive]
pub enum ErrorKind {
    /// ネットワーク障害・接続失敗・タイムアウト
    Transport,
    /// バックエンド応答が期待した構造ではない
    Protocol,
    /// ローカル永続ストアの読み書き失敗
    Storage,
    /// リアルタイム購読の確立・継続失敗
    Subscription,
    /// クールダウン中のため拒否された
    Throttled,
    /// 対象リソースが存在しない
    NotFound,
    /// エンジン内部の不整合
    Internal,
}

impl ErrorKind {
    /// ユーザー向けの文字列表現を取得
    ///
    /// ## Examples
    /// ```rust
    /// use kernel::error::kind::ErrorKind;
    /// assert_eq!(ErrorKind::Throttled.as_str(), "Throttled");
    /// ```
    #[inline]
    pub const fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Transport => "Transport",
            ErrorKind::Protocol => "Protocol",
            ErrorKind::Storage => "Storage",
            ErrorKind::Subscription => "Subscription",
            ErrorKind::Throttled => "Throttled",
            ErrorKind::NotFound => "Not Found",
            ErrorKind::Internal => "Internal",
        }
    }

    /// 再試行で回復し得るエラーかどうかを判定
    ///
    /// 一時的な障害（ネットワーク、購読切断）とクールダウン拒否は
    /// `true` を返します。
    #[inline]
    pub const fn is_retryable(&self) -> bool {
        matches!(
            self,
            ErrorKind::Transport | ErrorKind::Subscription | ErrorKind::Throttled
        )
    }

    /// エンジンまたはバックエンドの欠陥を示すエラーかどうかを判定
    ///
    /// これらのエラーはログに記録すべきです。
    #[inline]
    pub const fn is_fault(&self) -> bool {
        matches!(
            self,
            ErrorKind::Protocol | ErrorKind::Storage | ErrorKind::Internal
        )
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_retryable() {
        assert!(ErrorKind::Transport.is_retryable());
        assert!(ErrorKind::Subscription.is_retryable());
        assert!(ErrorKind::Throttled.is_retryable());
        assert!(!ErrorKind::Protocol.is_retryable());
        assert!(!ErrorKind::Storage.is_retryable());
        assert!(!ErrorKind::NotFound.is_retryable());
        assert!(!ErrorKind::Internal.is_retryable());
    }

    #[test]
    fn test_is_fault() {
        assert!(ErrorKind::Protocol.is_fault());
        assert!(ErrorKind::Storage.is_fault());
        assert!(ErrorKind::Internal.is_fault());
        assert!(!ErrorKind::Transport.is_fault());
        assert!(!ErrorKind::Throttled.is_fault());
    }

    #[test]
    fn test_as_str() {
        assert_eq!(ErrorKind::Transport.as_str(), "Transport");
        assert_eq!(ErrorKind::NotFound.as_str(), "Not Found");
        assert_eq!(ErrorKind::Throttled.to_string(), "Throttled");
    }

    #[test]
    fn test_serialize() {
        let json = serde_json::to_string(&ErrorKind::NotFound).unwrap();
        assert_eq!(json, r#""NOT_FOUND""#);
    }
}
