use std::collections::HashSet;

use crate::error::AppError;
use crate::models::Topic;

/// Default UPSC General Studies topics, in study order.
const DEFAULT_TOPICS: [(&str, &str); 10] = [
    ("polity", "Indian Polity & Governance"),
    ("history-modern", "Modern Indian History"),
    ("history-ancient", "Ancient & Medieval History"),
    ("geography", "Indian & World Geography"),
    ("economy", "Indian Economy"),
    ("environment", "Environment & Ecology"),
    ("science-tech", "Science & Technology"),
    ("art-culture", "Art & Culture"),
    ("ethics", "Ethics, Integrity & Aptitude"),
    ("current-affairs", "Current Affairs"),
];

/// An ordered, non-empty list of topics with unique ids.
///
/// The order is the cycling order used by the plan generator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopicCatalog {
    topics: Vec<Topic>,
}

impl TopicCatalog {
    /// Builds a catalog, rejecting empty lists and duplicate ids.
    pub fn new(topics: Vec<Topic>) -> Result<Self, AppError> {
        if topics.is_empty() {
            return Err(AppError::EmptyCatalog);
        }
        let mut seen = HashSet::new();
        for t in &topics {
            if !seen.insert(t.id.as_str()) {
                return Err(AppError::DuplicateTopic(t.id.clone()));
            }
        }
        Ok(TopicCatalog { topics })
    }

    pub fn topics(&self) -> &[Topic] {
        &self.topics
    }

    pub fn len(&self) -> usize {
        self.topics.len()
    }

    /// Never true for a catalog built through `new` or `default`.
    pub fn is_empty(&self) -> bool {
        self.topics.is_empty()
    }

    /// Topic for a 1-based plan day, wrapping around the catalog.
    pub fn topic_for_day(&self, day: u32) -> &Topic {
        let idx = (day.saturating_sub(1) as usize) % self.topics.len();
        &self.topics[idx]
    }

    pub fn find(&self, id: &str) -> Option<&Topic> {
        self.topics.iter().find(|t| t.id == id)
    }

    /// Display name for a topic id, falling back to the id itself.
    pub fn name_of<'a>(&'a self, id: &'a str) -> &'a str {
        self.find(id).map(|t| t.name.as_str()).unwrap_or(id)
    }
}

impl Default for TopicCatalog {
    fn default() -> Self {
        TopicCatalog {
            topics: DEFAULT_TOPICS
                .iter()
                .map(|(id, name)| Topic { id: id.to_string(), name: name.to_string() })
                .collect(),
        }
    }
}
