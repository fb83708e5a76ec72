//! Value objects.

use std::fmt;

/// Server-assigned identifier scoping a realtime channel to one chat thread
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConversationId(i64);

impl ConversationId {
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl From<i64> for ConversationId {
    fn from(value: i64) -> Self {
        Self::new(value)
    }
}

impl fmt::Display for ConversationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conversation_id_display_is_bare_number() {
        // テスト項目: ConversationId が数値のみで表示される（URL のパスに使われる）
        // given (前提条件):
        let id = ConversationId::new(42);

        // when (操作):
        let rendered = id.to_string();

        // then (期待する結果):
        assert_eq!(rendered, "42");
        assert_eq!(id.value(), 42);
    }
}
