//! How to register a bot strategy
//!
//! 1) Implement `BotStrategy` for your type in its module.
//! 2) Add a variant to `Bot` and delegate to it.
//! 3) Add a `BotFactory` entry with a stable `name` and `version`.
//! 4) Determinism: same seed ⇒ same decisions.

use serde_json::Value as JsonValue;

use super::config::BotConfig;
use super::heuristic::HeuristicBot;
use super::random::RandomBot;
use super::trait_def::{BotError, BotStrategy};
use crate::config::GameConfig;
use crate::domain::{Card, Color, PendingDraw};

/// A constructed bot. Enum dispatch keeps strategies `Clone` and avoids
/// boxing.
#[derive(Debug, Clone)]
pub enum Bot {
    Heuristic(HeuristicBot),
    Random(RandomBot),
}

impl BotStrategy for Bot {
    fn choose_move(
        &mut self,
        hand: &[Card],
        top: &Card,
        pending: &PendingDraw,
        rules: &GameConfig,
    ) -> Option<Card> {
        match self {
            Bot::Heuristic(b) => b.choose_move(hand, top, pending, rules),
            Bot::Random(b) => b.choose_move(hand, top, pending, rules),
        }
    }

    fn choose_color(&mut self, hand: &[Card]) -> Color {
        match self {
            Bot::Heuristic(b) => b.choose_color(hand),
            Bot::Random(b) => b.choose_color(hand),
        }
    }

    fn should_declare(&mut self, hand: &[Card]) -> bool {
        match self {
            Bot::Heuristic(b) => b.should_declare(hand),
            Bot::Random(b) => b.should_declare(hand),
        }
    }
}

/// Factory definition for constructing bots.
pub struct BotFactory {
    pub name: &'static str,
    pub version: &'static str,
    pub make: fn(BotConfig) -> Bot,
}

static BOT_FACTORIES: &[BotFactory] = &[
    BotFactory {
        name: HeuristicBot::NAME,
        version: HeuristicBot::VERSION,
        make: make_heuristic,
    },
    BotFactory {
        name: RandomBot::NAME,
        version: RandomBot::VERSION,
        make: make_random,
    },
];

/// Returns the statically registered bot factories.
pub fn registered_bots() -> &'static [BotFactory] {
    BOT_FACTORIES
}

/// Finds a registered factory by its name.
pub fn by_name(name: &str) -> Option<&'static BotFactory> {
    registered_bots().iter().find(|factory| factory.name == name)
}

/// Build a bot by strategy name from an optional JSON config.
pub fn create_bot(name: &str, config: Option<&JsonValue>) -> Result<Bot, BotError> {
    let factory = by_name(name).ok_or_else(|| BotError::UnknownStrategy(name.to_owned()))?;
    let config = BotConfig::from_json(config)?;
    Ok((factory.make)(config))
}

/// Build a bot with an explicit seed, overriding any configured one.
pub fn create_seeded_bot(name: &str, seed: u64) -> Result<Bot, BotError> {
    let factory = by_name(name).ok_or_else(|| BotError::UnknownStrategy(name.to_owned()))?;
    Ok((factory.make)(BotConfig::with_seed(seed)))
}

fn make_heuristic(config: BotConfig) -> Bot {
    Bot::Heuristic(HeuristicBot::new(config))
}

fn make_random(config: BotConfig) -> Bot {
    Bot::Random(RandomBot::new(config))
}

#[cfg(test)]
mod bot_registry_smoke {
    use serde_json::json;

    use super::*;

    #[test]
    fn enumerates_registered_bots() {
        let names: Vec<&str> = registered_bots().iter().map(|f| f.name).collect();
        assert!(names.contains(&"heuristic"));
        assert!(names.contains(&"random"));
    }

    #[test]
    fn lookup_helper_behaves() {
        assert!(by_name(HeuristicBot::NAME).is_some());
        assert!(by_name(RandomBot::NAME).is_some());
        assert!(by_name("NotARealBot").is_none());
    }

    #[test]
    fn create_bot_by_name() {
        let bot = create_bot("random", Some(&json!({"seed": 5}))).unwrap();
        assert!(matches!(bot, Bot::Random(_)));
        assert_eq!(
            create_bot("grandmaster", None).unwrap_err(),
            BotError::UnknownStrategy("grandmaster".into())
        );
        assert!(matches!(
            create_bot("heuristic", Some(&json!({"declareProbability": -1.0}))),
            Err(BotError::InvalidConfig(_))
        ));
    }
}
