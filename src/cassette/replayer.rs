//! Serves recorded interactions back in order, one queue per port method.

use std::collections::{HashMap, VecDeque};

use super::format::{Cassette, Interaction};

/// Replays a cassette. Interactions for each `(port, method)` pair are served
/// in recorded order, independent of how calls to other pairs interleave.
#[derive(Debug)]
pub struct CassetteReplayer {
    queues: HashMap<(String, String), VecDeque<Interaction>>,
}

impl CassetteReplayer {
    /// Build a replayer from a loaded cassette.
    #[must_use]
    pub fn new(cassette: Cassette) -> Self {
        let mut queues: HashMap<(String, String), VecDeque<Interaction>> = HashMap::new();
        let mut interactions = cassette.interactions;
        interactions.sort_by_key(|i| i.seq);
        for interaction in interactions {
            queues
                .entry((interaction.port.clone(), interaction.method.clone()))
                .or_default()
                .push_back(interaction);
        }
        Self { queues }
    }

    /// Take the next interaction recorded for `port`/`method`.
    ///
    /// # Errors
    ///
    /// Returns a message naming the pair if nothing (more) was recorded for it.
    pub fn next_interaction(&mut self, port: &str, method: &str) -> Result<Interaction, String> {
        let key = (port.to_string(), method.to_string());
        match self.queues.get_mut(&key) {
            Some(queue) => queue.pop_front().ok_or_else(|| {
                format!("Cassette exhausted: all interactions for {port}::{method} were consumed")
            }),
            None => {
                let mut available: Vec<String> =
                    self.queues.keys().map(|(p, m)| format!("{p}::{m}")).collect();
                available.sort();
                Err(format!(
                    "Cassette has no interactions for {port}::{method}. Recorded: [{}]",
                    available.join(", ")
                ))
            }
        }
    }

    /// Interactions that have not been served yet.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.queues.values().map(VecDeque::len).sum()
    }
}
