/// BeatEngine v1: Challenge Cache
///
/// Full metadata keyed by challenge id.
/// Lives beside the state tree, not inside it. Written only when search
/// results are committed; entries are overwritten by later results with the
/// same id and never pruned.

use std::collections::BTreeMap;

use crate::domain::ChallengeRecord;

#[derive(Debug, Clone, Default)]
pub struct ChallengeCache {
    entries: BTreeMap<String, ChallengeRecord>,
}

impl ChallengeCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: &str) -> Option<&ChallengeRecord> {
        self.entries.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    pub fn insert(&mut self, record: ChallengeRecord) {
        self.entries.insert(record.id.clone(), record);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Extend<ChallengeRecord> for ChallengeCache {
    fn extend<I: IntoIterator<Item = ChallengeRecord>>(&mut self, iter: I) {
        for record in iter {
            self.insert(record);
        }
    }
}
