use std::collections::VecDeque;

use rand::seq::SliceRandom;
use rand::Rng;

/// A "tetris bag": items are drawn without replacement, and only once every
/// item has been drawn does the discard pile get shuffled back in.
#[derive(Debug, Clone)]
pub struct DrawBag<T> {
    draw_pile: VecDeque<T>,
    discard: Vec<T>,
}

impl<T: Clone> DrawBag<T> {
    pub fn new<R: Rng + ?Sized>(items: Vec<T>, rng: &mut R) -> Self {
        let mut bag = Self {
            draw_pile: items.into(),
            discard: Vec::new(),
        };
        bag.reshuffle(rng);
        tracing::debug!("Bag created with {} items", bag.len());
        bag
    }

    /// Total items, drawn or not.
    pub fn len(&self) -> usize {
        self.draw_pile.len() + self.discard.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Items left before the bag refills.
    pub fn remaining(&self) -> usize {
        self.draw_pile.len()
    }

    /// Draw the next item; it moves to the discard pile. An exhausted draw
    /// pile is refilled from the shuffled discard pile first.
    pub fn draw<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<T> {
        if self.draw_pile.is_empty() {
            if self.discard.is_empty() {
                return None;
            }
            tracing::debug!("Bag empty, reshuffling {} items", self.discard.len());
            self.draw_pile.extend(self.discard.drain(..));
            self.reshuffle(rng);
        }

        let item = self.draw_pile.pop_front()?;
        self.discard.push(item.clone());
        Some(item)
    }

    /// Look at an upcoming item without drawing it.
    pub fn peek(&self, index: usize) -> Option<&T> {
        let item = self.draw_pile.get(index);
        if item.is_none() {
            tracing::warn!("Index {} is out of range of the draw pile", index);
        }
        item
    }

    /// Look at an already drawn item.
    pub fn peek_discard(&self, index: usize) -> Option<&T> {
        let item = self.discard.get(index);
        if item.is_none() {
            tracing::warn!("Index {} is out of range of the discard pile", index);
        }
        item
    }

    /// Shuffle the draw pile, leaving the discard pile alone.
    pub fn reshuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.draw_pile.make_contiguous().shuffle(rng);
    }

    /// Return every discarded item to the draw pile. With `shuffle_all` the
    /// whole pile is shuffled together; otherwise the discards are shuffled
    /// and placed behind the items still waiting.
    pub fn reload<R: Rng + ?Sized>(&mut self, shuffle_all: bool, rng: &mut R) {
        if !shuffle_all {
            self.discard.shuffle(rng);
        }
        self.draw_pile.extend(self.discard.drain(..));
        if shuffle_all {
            self.reshuffle(rng);
        }
        tracing::debug!("Reloaded bag, {} items waiting", self.draw_pile.len());
    }

    /// Add an item to the back of the draw pile, or to the discard pile when
    /// `start_in_pool` is false.
    pub fn add(&mut self, item: T, start_in_pool: bool) {
        if start_in_pool {
            self.draw_pile.push_back(item);
        } else {
            self.discard.push(item);
        }
    }
}

impl<T: Clone + PartialEq> DrawBag<T> {
    /// Remove the first occurrence of `item` from each pile.
    pub fn remove(&mut self, item: &T) {
        if let Some(index) = self.draw_pile.iter().position(|i| i == item) {
            self.draw_pile.remove(index);
        }
        if let Some(index) = self.discard.iter().position(|i| i == item) {
            self.discard.remove(index);
        }
    }
}
