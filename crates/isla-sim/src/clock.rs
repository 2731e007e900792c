//! Day/night clock and weather.
//!
//! Time advances at 0.25 simulated hours per real second (one game
//! day lasts 96 seconds). The day rollover drives the daily quest
//! reset; weather changes are rare random transitions. The clock
//! steps on whole-second boundaries, accumulating fractional tick
//! time in between.

use serde::{Deserialize, Serialize};

use isla_common::SimRng;

/// Simulated hours added per real second.
const HOURS_PER_SECOND: f32 = 0.25;

/// Per-second probability of a weather change.
const WEATHER_CHANGE_CHANCE: f32 = 0.01;

/// Current weather.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Weather {
    /// Clear skies.
    #[default]
    Clear,
    /// Rain.
    Rain,
    /// Storm.
    Storm,
}

impl Weather {
    const ALL: [Self; 3] = [Self::Clear, Self::Rain, Self::Storm];
}

/// Events produced by clock ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockEvent {
    /// A new day began.
    DayAdvanced {
        /// New day number
        day: u32,
    },
    /// Weather changed.
    WeatherChanged {
        /// New weather
        weather: Weather,
    },
}

/// The game clock.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameClock {
    /// Time of day in hours, `[0, 24)`.
    time: f32,
    /// Day counter, starting at 1.
    day: u32,
    weather: Weather,
    /// Fractional-second accumulator. Kept in f64: summing 1/60 f32
    /// frames in f32 rounds below 1.0 and skips whole seconds.
    second_accum: f64,
    rng: SimRng,
}

impl GameClock {
    /// Creates a clock at noon on day 1.
    #[must_use]
    pub const fn new(rng: SimRng) -> Self {
        Self {
            time: 12.0,
            day: 1,
            weather: Weather::Clear,
            second_accum: 0.0,
            rng,
        }
    }

    /// Time of day in hours, `[0, 24)`.
    #[must_use]
    pub const fn time(&self) -> f32 {
        self.time
    }

    /// Current day (starts at 1).
    #[must_use]
    pub const fn day(&self) -> u32 {
        self.day
    }

    /// Current weather.
    #[must_use]
    pub const fn weather(&self) -> Weather {
        self.weather
    }

    /// Whether it is daytime (6:00 to 18:00).
    #[must_use]
    pub fn is_day(&self) -> bool {
        (6.0..=18.0).contains(&self.time)
    }

    /// Advances the clock, stepping once per accumulated second.
    pub fn tick(&mut self, dt: f32) -> Vec<ClockEvent> {
        let mut events = Vec::new();
        self.second_accum += f64::from(dt);
        while self.second_accum >= 1.0 {
            self.second_accum -= 1.0;
            self.step_second(&mut events);
        }
        events
    }

    fn step_second(&mut self, events: &mut Vec<ClockEvent>) {
        self.time += HOURS_PER_SECOND;
        if self.time >= 24.0 {
            self.time -= 24.0;
            self.day += 1;
            events.push(ClockEvent::DayAdvanced { day: self.day });
            tracing::debug!(day = self.day, "new day");
        }

        if self.rng.chance(WEATHER_CHANGE_CHANCE) {
            let next = Weather::ALL[self.rng.next_u32_below(3) as usize];
            if next != self.weather {
                self.weather = next;
                events.push(ClockEvent::WeatherChanged { weather: next });
                tracing::debug!(weather = ?next, "weather changed");
            }
        }
    }
}

impl Default for GameClock {
    fn default() -> Self {
        Self::new(SimRng::default())
    }
}
