use std::ops::ControlFlow;

use super::{NodeId, PrefixTrie, ROOT};
use crate::utils::letters::{letter_index, ALPHABET_SIZE};

/// Template character matching any single letter.
pub const WILDCARD: u8 = b'?';

impl PrefixTrie {
    /// Depth-first walk over every stored word that fits `template`, in
    /// `A`-to-`Z` order. Any character other than [`WILDCARD`] must match
    /// literally, and only words of exactly the template's length fit.
    fn walk_template<F>(&self, template: &str, mut visit: F)
    where
        F: FnMut(&[u8]) -> ControlFlow<()>,
    {
        let pattern = template.as_bytes();
        let mut word: Vec<u8> = Vec::with_capacity(pattern.len());
        // (node, depth of node, letter leading into it)
        let mut stack: Vec<(NodeId, usize, u8)> = vec![(ROOT, 0, 0)];

        while let Some((id, depth, letter)) = stack.pop() {
            if depth > 0 {
                word.truncate(depth - 1);
                word.push(letter);
            }

            let node = &self.nodes[id];
            let Some(&wanted) = pattern.get(depth) else {
                if node.is_word_end && visit(&word).is_break() {
                    return;
                }
                continue;
            };

            if wanted == WILDCARD {
                // reversed so the stack pops children in letter order
                for index in (0..ALPHABET_SIZE).rev() {
                    if let Some(child) = node.child(index) {
                        stack.push((child, depth + 1, b'A' + index as u8));
                    }
                }
            } else if let Some(child) = letter_index(wanted).and_then(|index| node.child(index)) {
                stack.push((child, depth + 1, wanted));
            }
        }
    }

    /// Every stored word that fits the template, e.g. `?AT` -> `BAT`, `CAT`.
    pub fn words_for_template(&self, template: &str) -> Vec<String> {
        let mut words = Vec::new();
        self.walk_template(template, |word| {
            words.push(String::from_utf8_lossy(word).into_owned());
            ControlFlow::Continue(())
        });
        words
    }

    pub fn count_words_for_template(&self, template: &str) -> usize {
        let mut count = 0;
        self.walk_template(template, |_| {
            count += 1;
            ControlFlow::Continue(())
        });
        count
    }

    /// First fitting word in walk order, stopping as soon as one is found.
    pub fn first_word_for_template(&self, template: &str) -> Option<String> {
        let mut found = None;
        self.walk_template(template, |word| {
            found = Some(String::from_utf8_lossy(word).into_owned());
            ControlFlow::Break(())
        });
        found
    }
}
