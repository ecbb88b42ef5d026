//! In-memory conversation logs, one per domain.

use std::sync::{Mutex, MutexGuard};

use crate::models::{ConversationTurn, Domain, Role};

/// Append-only turn log. Grows without bound until `clear`.
#[derive(Debug, Default)]
pub struct ConversationLog {
    turns: Vec<ConversationTurn>,
}

impl ConversationLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, role: Role, text: impl Into<String>) {
        self.turns.push(ConversationTurn::new(role, text));
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// Up to `n` most recent turns, oldest first
    pub fn recent_turns(&self, n: usize) -> &[ConversationTurn] {
        let start = self.turns.len().saturating_sub(n);
        &self.turns[start..]
    }

    /// Last `n` turns rendered as `"<Role>: <text>"` lines
    pub fn read_recent(&self, n: usize) -> String {
        self.recent_turns(n)
            .iter()
            .map(ConversationTurn::render)
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// `k`-th turn counting back from the end, `k = 1` being the last one
    pub fn nth_from_end(&self, k: usize) -> Option<&ConversationTurn> {
        if k == 0 || k > self.turns.len() {
            return None;
        }
        self.turns.get(self.turns.len() - k)
    }

    pub fn clear(&mut self) {
        self.turns.clear();
    }
}

/// Both domain logs, shared across requests through the application state.
///
/// Each log sits behind its own mutex and every operation takes the lock
/// for a single short section, so concurrent requests into one domain may
/// interleave their appends.
#[derive(Debug, Default)]
pub struct ConversationMemory {
    thirukkural: Mutex<ConversationLog>,
    bhagavad_gita: Mutex<ConversationLog>,
}

impl ConversationMemory {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self, domain: Domain) -> MutexGuard<'_, ConversationLog> {
        let log = match domain {
            Domain::Thirukkural => &self.thirukkural,
            Domain::BhagavadGita => &self.bhagavad_gita,
        };
        // Poisoning is ignored
        log.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Run `f` against one domain's log while holding its lock
    pub fn with_log<R>(&self, domain: Domain, f: impl FnOnce(&mut ConversationLog) -> R) -> R {
        f(&mut self.lock(domain))
    }

    pub fn append(&self, domain: Domain, role: Role, text: impl Into<String>) {
        self.lock(domain).append(role, text);
    }

    pub fn read_recent(&self, domain: Domain, n: usize) -> String {
        self.lock(domain).read_recent(n)
    }

    pub fn len(&self, domain: Domain) -> usize {
        self.lock(domain).len()
    }

    /// Record a completed exchange: the user query, then the assistant summary
    pub fn record_exchange(&self, domain: Domain, query: &str, summary: String) {
        let mut log = self.lock(domain);
        log.append(Role::User, query);
        log.append(Role::Assistant, summary);
    }

    pub fn clear_all(&self) {
        self.lock(Domain::Thirukkural).clear();
        self.lock(Domain::BhagavadGita).clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn log_with(n: usize) -> ConversationLog {
        let mut log = ConversationLog::new();
        for i in 0..n {
            let role = if i % 2 == 0 { Role::User } else { Role::Assistant };
            log.append(role, format!("message {}", i));
        }
        log
    }

    #[test]
    fn test_read_recent_empty_log() {
        let log = ConversationLog::new();
        assert_eq!(log.read_recent(10), "");
        assert!(log.recent_turns(10).is_empty());
    }

    #[test]
    fn test_read_recent_formats_roles_in_order() {
        let log = log_with(2);
        assert_eq!(log.read_recent(10), "User: message 0\nAssistant: message 1");
    }

    #[test]
    fn test_read_recent_caps_at_n() {
        let log = log_with(14);
        let recent = log.recent_turns(10);
        assert_eq!(recent.len(), 10);
        assert_eq!(recent.first().unwrap().text(), "message 4");
        assert_eq!(recent.last().unwrap().text(), "message 13");

        let rendered = log.read_recent(3);
        assert_eq!(rendered.lines().count(), 3);
        assert_eq!(rendered, "Assistant: message 11\nUser: message 12\nAssistant: message 13");
    }

    #[test]
    fn test_read_recent_zero() {
        let log = log_with(4);
        assert_eq!(log.read_recent(0), "");
    }

    #[test]
    fn test_nth_from_end() {
        let log = log_with(3);
        assert_eq!(log.nth_from_end(1).unwrap().text(), "message 2");
        assert_eq!(log.nth_from_end(2).unwrap().text(), "message 1");
        assert_eq!(log.nth_from_end(3).unwrap().text(), "message 0");
        assert!(log.nth_from_end(4).is_none());
        assert!(log.nth_from_end(0).is_none());
    }

    #[test]
    fn test_logs_are_independent() {
        let memory = ConversationMemory::new();
        memory.append(Domain::Thirukkural, Role::User, "kural question");

        assert_eq!(memory.len(Domain::Thirukkural), 1);
        assert_eq!(memory.len(Domain::BhagavadGita), 0);
        assert_eq!(memory.read_recent(Domain::BhagavadGita, 10), "");
    }

    #[test]
    fn test_record_exchange_appends_user_then_assistant() {
        let memory = ConversationMemory::new();
        memory.record_exchange(Domain::BhagavadGita, "duty", "Bhagavad Gita 2.47".to_string());

        let turns: Vec<(Role, String)> = memory.with_log(Domain::BhagavadGita, |log| {
            log.recent_turns(10).iter().map(|t| (t.role(), t.text().to_string())).collect()
        });
        assert_eq!(
            turns,
            vec![
                (Role::User, "duty".to_string()),
                (Role::Assistant, "Bhagavad Gita 2.47".to_string())
            ]
        );
    }

    #[test]
    fn test_clear_all_empties_both_logs() {
        let memory = ConversationMemory::new();
        memory.record_exchange(Domain::Thirukkural, "q1", "a1".to_string());
        memory.record_exchange(Domain::BhagavadGita, "q2", "a2".to_string());

        memory.clear_all();

        assert_eq!(memory.read_recent(Domain::Thirukkural, 10), "");
        assert_eq!(memory.read_recent(Domain::BhagavadGita, 10), "");
        assert_eq!(memory.len(Domain::Thirukkural), 0);
    }
}
