//! Deterministic corridor environment.
//!
//! The agent starts at cell 0 of a corridor of `length` cells. Jumping moves it
//! one cell ahead with reward 1, the episode ending when it leaves the last
//! cell. Doing nothing ends the episode with reward 0. The best score of an
//! episode is `length`.
#![allow(dead_code)]
use anyhow::Result;
use tabula_agent::{Action, DiscretizerConfig, GameInfo, Observation};
use tabula_core::{record::Record, Env, Step};

pub const LENGTH: usize = 4;

#[derive(Clone, Debug)]
pub struct CorridorConfig {
    pub length: usize,
}

impl Default for CorridorConfig {
    fn default() -> Self {
        Self { length: LENGTH }
    }
}

pub struct Corridor {
    length: usize,
    pos: usize,
}

impl Corridor {
    fn obs(&self) -> Observation {
        Observation([self.pos as f64 + 0.5, 0.5, 0.5])
    }
}

impl Env for Corridor {
    type Config = CorridorConfig;
    type Obs = Observation;
    type Act = Action;
    type Info = GameInfo;

    fn build(config: &CorridorConfig, _seed: i64) -> Result<Self> {
        Ok(Self {
            length: config.length,
            pos: 0,
        })
    }

    fn step(&mut self, a: &Action) -> (Step<Self>, Record) {
        let (reward, is_terminated) = match a {
            Action::Jump => {
                self.pos += 1;
                (1.0, self.pos >= self.length)
            }
            Action::Noop => (0.0, true),
        };
        let info = GameInfo {
            score: self.pos as i64,
        };
        let step = Step::new(self.obs(), *a, reward, is_terminated, false, info);
        (step, Record::empty())
    }

    fn reset(&mut self) -> Result<Observation> {
        self.pos = 0;
        Ok(self.obs())
    }
}

/// One cell per corridor position, including the one past the end.
pub fn discretizer_config() -> DiscretizerConfig {
    DiscretizerConfig::default()
        .bins([LENGTH + 1, 1, 1])
        .low([0.0, 0.0, 0.0])
        .high([(LENGTH + 1) as f64, 1.0, 1.0])
}

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}
