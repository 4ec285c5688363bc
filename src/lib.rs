pub mod config;
pub mod dictionary;
pub mod models;
pub mod puzzle;
pub mod routes;
pub mod trie;
pub mod utils;

use std::sync::{Mutex, PoisonError};

use rand::{rngs::StdRng, Rng, SeedableRng};

use config::Config;
use dictionary::WordDictionary;
use puzzle::PuzzleGenerator;

/// Application state shared across all handlers
pub struct AppState {
    pub config: Config,
    pub dictionary: WordDictionary,
    /// Source of per-request seeds; seeded from `PUZZLE_RNG_SEED` when set
    rng: Mutex<StdRng>,
    pub puzzles: Mutex<PuzzleGenerator>,
}

impl AppState {
    pub fn new(config: Config, dictionary: WordDictionary) -> Self {
        let rng = match config.puzzle.rng_seed {
            Some(seed) => {
                tracing::info!("Using fixed puzzle seed {}", seed);
                StdRng::seed_from_u64(seed)
            }
            None => StdRng::from_os_rng(),
        };
        let puzzles = PuzzleGenerator::new(config.puzzle.bag_size);

        Self {
            config,
            dictionary,
            rng: Mutex::new(rng),
            puzzles: Mutex::new(puzzles),
        }
    }

    /// A fresh generator for one request, seeded from the shared one so a
    /// fixed seed replays the same sequence of requests.
    pub fn request_rng(&self) -> StdRng {
        let seed = self
            .rng
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .random();
        StdRng::seed_from_u64(seed)
    }
}
