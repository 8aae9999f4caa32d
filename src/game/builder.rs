//! Builder for `ConcentrationGame`.

use rustc_hash::FxHashSet;

use super::engine::ConcentrationGame;
use crate::core::{Difficulty, GameConfig, GameError, GameRng, Result};

/// Builder for creating a game session.
///
/// ```
/// use concentration::{Difficulty, GameBuilder};
///
/// let mut game = GameBuilder::new()
///     .symbols(["🎃", "👻", "🦇"])
///     .difficulty(Difficulty::Hard)
///     .seed(7)
///     .build()
///     .unwrap();
///
/// assert_eq!(game.create_deck().len(), 6);
/// ```
#[derive(Clone, Debug, Default)]
pub struct GameBuilder {
    symbols: Vec<String>,
    difficulty: Difficulty,
    config: GameConfig,
    seed: Option<u64>,
}

impl GameBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Distinct card symbols, in priority order. Symbols past
    /// `GameConfig::max_symbols` are not dealt.
    pub fn symbols<I, S>(mut self, symbols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.symbols = symbols.into_iter().map(Into::into).collect();
        self
    }

    pub fn difficulty(mut self, difficulty: Difficulty) -> Self {
        self.difficulty = difficulty;
        self
    }

    pub fn config(mut self, config: GameConfig) -> Self {
        self.config = config;
        self
    }

    /// Fix the RNG seed. Without one the seed comes from entropy.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validate the input and create the game.
    pub fn build(self) -> Result<ConcentrationGame> {
        self.config.validate()?;
        validate_symbols(&self.symbols)?;

        let rng = match self.seed {
            Some(seed) => GameRng::new(seed),
            None => GameRng::from_entropy(),
        };
        log::debug!(
            "new {} game, {} symbols, seed {}",
            self.difficulty,
            self.symbols.len(),
            rng.seed()
        );

        Ok(ConcentrationGame::from_validated(
            self.symbols,
            self.difficulty,
            self.config,
            rng,
        ))
    }
}

fn validate_symbols(symbols: &[String]) -> Result<()> {
    if symbols.is_empty() {
        return Err(GameError::NoSymbols);
    }

    let mut seen = FxHashSet::default();
    for (position, symbol) in symbols.iter().enumerate() {
        if symbol.is_empty() {
            return Err(GameError::EmptySymbol(position));
        }
        if !seen.insert(symbol.as_str()) {
            return Err(GameError::DuplicateSymbol(symbol.clone()));
        }
    }
    Ok(())
}
