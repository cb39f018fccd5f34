//! Draw engine shared by the name, number and bingo raffles.
//!
//! A draw validates its pool, commits to a value up front, optionally counts
//! down one tick per second and only then reveals the committed value. While a
//! countdown is running every further draw request is ignored.

use crate::defaults;
use log::{debug, info, warn};
use rand::Rng;
use rand_distr::{Distribution, Uniform};
use std::collections::HashSet;
use std::fmt;

/// Why a numeric range was refused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeError {
    /// A bound is missing, not a number or smaller than 1
    NotPositive,
    MinNotBelowMax,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DrawError {
    EmptyPool,
    InvalidRange(RangeError),
    /// Every value of `1..=n` has already been drawn
    PoolExhausted(u32),
}

impl fmt::Display for DrawError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DrawError::EmptyPool => write!(f, "Adicione pelo menos um nome para sortear"),
            DrawError::InvalidRange(RangeError::NotPositive) => {
                write!(f, "Digite números válidos (mínimo 1)")
            }
            DrawError::InvalidRange(RangeError::MinNotBelowMax) => {
                write!(f, "O número mínimo deve ser menor que o máximo")
            }
            DrawError::PoolExhausted(total) => {
                write!(f, "Todos os {} números já foram sorteados!", total)
            }
        }
    }
}

impl std::error::Error for DrawError {}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DrawValue {
    Name(String),
    Number(u32),
}

impl fmt::Display for DrawValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DrawValue::Name(name) => write!(f, "{}", name),
            DrawValue::Number(n) => write!(f, "{}", n),
        }
    }
}

/// Candidate set for a single draw, rebuilt from the current input every time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DrawPool {
    Names(Vec<String>),
    Range { min: u32, max: u32 },
    /// `1..=upper` minus whatever the engine history already holds
    Exclusion { upper: u32 },
}

impl DrawPool {
    /// One candidate per non-blank line, surrounding whitespace removed.
    pub fn names(text: &str) -> Result<Self, DrawError> {
        let names: Vec<String> = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(String::from)
            .collect();

        if names.is_empty() {
            return Err(DrawError::EmptyPool);
        }
        Ok(DrawPool::Names(names))
    }

    /// Inclusive range typed by the user. Both bounds must be at least 1 and
    /// `min` strictly below `max`.
    pub fn range(min: &str, max: &str) -> Result<Self, DrawError> {
        let min = parse_bound(min)?;
        let max = parse_bound(max)?;
        if min >= max {
            return Err(DrawError::InvalidRange(RangeError::MinNotBelowMax));
        }
        Ok(DrawPool::Range { min, max })
    }

    pub fn bingo() -> Self {
        DrawPool::Exclusion {
            upper: defaults::BINGO_MAX,
        }
    }

    /// Number of values a draw could currently produce.
    pub fn available(&self, history: &DrawHistory) -> usize {
        match self {
            DrawPool::Names(names) => names.len(),
            DrawPool::Range { min, max } => (max - min) as usize + 1,
            DrawPool::Exclusion { upper } => (*upper as usize).saturating_sub(history.len()),
        }
    }

    fn select<R: Rng + ?Sized>(
        &self,
        history: &DrawHistory,
        rng: &mut R,
    ) -> Result<DrawValue, DrawError> {
        match self {
            DrawPool::Names(names) => {
                if names.is_empty() {
                    return Err(DrawError::EmptyPool);
                }
                let idx = rng.random_range(0..names.len());
                Ok(DrawValue::Name(names[idx].clone()))
            }
            DrawPool::Range { min, max } => {
                if min >= max {
                    return Err(DrawError::InvalidRange(RangeError::MinNotBelowMax));
                }
                let dist = Uniform::new_inclusive(*min, *max)
                    .map_err(|_| DrawError::InvalidRange(RangeError::MinNotBelowMax))?;
                Ok(DrawValue::Number(dist.sample(rng)))
            }
            DrawPool::Exclusion { upper } => {
                if history.len() >= *upper as usize {
                    return Err(DrawError::PoolExhausted(*upper));
                }
                let dist = Uniform::new_inclusive(1, *upper)
                    .map_err(|_| DrawError::PoolExhausted(*upper))?;

                // Rejection sampling; the rejection rate climbs as history fills up.
                let mut rejected = 0u32;
                loop {
                    let candidate = dist.sample(rng);
                    if !history.contains(candidate) {
                        debug!(
                            "Accepted {} after {} rejected samples ({} already drawn)",
                            candidate,
                            rejected,
                            history.len()
                        );
                        return Ok(DrawValue::Number(candidate));
                    }
                    rejected += 1;
                }
            }
        }
    }
}

fn parse_bound(text: &str) -> Result<u32, DrawError> {
    match text.trim().parse::<u32>() {
        Ok(value) if value >= 1 => Ok(value),
        _ => Err(DrawError::InvalidRange(RangeError::NotPositive)),
    }
}

/// Values already drawn, in draw order, never repeated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DrawHistory {
    order: Vec<u32>,
    seen: HashSet<u32>,
}

impl DrawHistory {
    pub fn contains(&self, value: u32) -> bool {
        self.seen.contains(&value)
    }

    /// Returns `false` (and changes nothing) if the value is already present.
    pub fn record(&mut self, value: u32) -> bool {
        if !self.seen.insert(value) {
            return false;
        }
        self.order.push(value);
        true
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn as_slice(&self) -> &[u32] {
        &self.order
    }

    pub fn last(&self) -> Option<u32> {
        self.order.last().copied()
    }

    pub fn clear(&mut self) {
        self.order.clear();
        self.seen.clear();
    }
}

/// Countdown settings applied to the next draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Countdown {
    enabled: bool,
    seconds: u32,
}

impl Default for Countdown {
    fn default() -> Self {
        Self {
            enabled: true,
            seconds: defaults::COUNTDOWN_SECONDS,
        }
    }
}

impl Countdown {
    pub fn new(enabled: bool, seconds: u32) -> Self {
        let seconds = if seconds == 0 {
            defaults::COUNTDOWN_SECONDS
        } else {
            seconds.min(defaults::MAX_COUNTDOWN_SECONDS)
        };
        Self { enabled, seconds }
    }

    pub fn disabled() -> Self {
        Self::new(false, defaults::COUNTDOWN_SECONDS)
    }

    /// Seconds typed by the user. Anything unparsable or not positive falls
    /// back to the default, anything above the maximum is clamped.
    pub fn parse_seconds(text: &str) -> u32 {
        let text = text.trim();
        match text.parse::<u32>() {
            Ok(0) => defaults::COUNTDOWN_SECONDS,
            Ok(n) => n.min(defaults::MAX_COUNTDOWN_SECONDS),
            // all digits but too large for u32
            Err(_) if !text.is_empty() && text.bytes().all(|b| b.is_ascii_digit()) => {
                defaults::MAX_COUNTDOWN_SECONDS
            }
            Err(_) => defaults::COUNTDOWN_SECONDS,
        }
    }

    pub fn enabled(&self) -> bool {
        self.enabled
    }

    pub fn seconds(&self) -> u32 {
        self.seconds
    }
}

/// Outcome of a draw request or of a countdown tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DrawStep {
    /// Countdown running with this many seconds left on display
    Counting(u32),
    Revealed(DrawValue),
    /// A draw was already in progress (or no countdown was running); nothing changed
    Ignored,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Pending {
    value: DrawValue,
    remaining: u32,
    record: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DrawEngine {
    countdown: Countdown,
    pending: Option<Pending>,
    result: Option<DrawValue>,
    history: DrawHistory,
    exhausted: bool,
}

impl DrawEngine {
    pub fn new(countdown: Countdown) -> Self {
        Self {
            countdown,
            ..Self::default()
        }
    }

    pub fn countdown(&self) -> Countdown {
        self.countdown
    }

    /// Takes effect on the next draw; a running countdown keeps its length.
    pub fn set_countdown(&mut self, countdown: Countdown) {
        self.countdown = countdown;
    }

    pub fn is_counting(&self) -> bool {
        self.pending.is_some()
    }

    pub fn remaining(&self) -> Option<u32> {
        self.pending.as_ref().map(|p| p.remaining)
    }

    pub fn can_draw(&self) -> bool {
        !self.is_counting() && !self.exhausted
    }

    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    pub fn result(&self) -> Option<&DrawValue> {
        self.result.as_ref()
    }

    pub fn history(&self) -> &DrawHistory {
        &self.history
    }

    /// Starts a draw from `pool`. The value is chosen here, before any
    /// countdown, and revealed unchanged once the countdown ends.
    pub fn draw<R: Rng + ?Sized>(
        &mut self,
        pool: &DrawPool,
        rng: &mut R,
    ) -> Result<DrawStep, DrawError> {
        if self.pending.is_some() {
            debug!("Draw ignored, countdown still running");
            return Ok(DrawStep::Ignored);
        }

        let value = match pool.select(&self.history, rng) {
            Ok(value) => value,
            Err(err) => {
                if let DrawError::PoolExhausted(_) = err {
                    self.exhausted = true;
                }
                warn!("Draw rejected: {}", err);
                return Err(err);
            }
        };
        let record = matches!(pool, DrawPool::Exclusion { .. });

        if !self.countdown.enabled {
            return Ok(DrawStep::Revealed(self.finalize(value, record)));
        }

        let seconds = self.countdown.seconds;
        debug!("Countdown of {}s started", seconds);
        self.pending = Some(Pending {
            value,
            remaining: seconds,
            record,
        });
        Ok(DrawStep::Counting(seconds))
    }

    /// Advances a running countdown by one second.
    pub fn tick(&mut self) -> DrawStep {
        let Some(pending) = self.pending.as_mut() else {
            return DrawStep::Ignored;
        };
        pending.remaining = pending.remaining.saturating_sub(1);
        if pending.remaining > 0 {
            return DrawStep::Counting(pending.remaining);
        }

        match self.pending.take() {
            Some(Pending { value, record, .. }) => DrawStep::Revealed(self.finalize(value, record)),
            None => DrawStep::Ignored,
        }
    }

    /// Clears history, result and any running countdown.
    pub fn reset(&mut self) {
        info!("Draw reset, {} values cleared", self.history.len());
        self.pending = None;
        self.result = None;
        self.history.clear();
        self.exhausted = false;
    }

    fn finalize(&mut self, value: DrawValue, record: bool) -> DrawValue {
        if record {
            if let DrawValue::Number(n) = value {
                self.history.record(n);
            }
        }
        info!("Drawn: {}", value);
        self.result = Some(value.clone());
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::BTreeSet;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(0x5eed)
    }

    fn instant() -> DrawEngine {
        DrawEngine::new(Countdown::disabled())
    }

    #[test]
    fn names_skip_blank_lines_and_trim() {
        let pool = DrawPool::names("Ana\nBruno\n\nCarla").unwrap();
        assert_eq!(
            pool,
            DrawPool::Names(vec!["Ana".into(), "Bruno".into(), "Carla".into()])
        );

        let pool = DrawPool::names("  Ana  \r\n\t\n Bruno ").unwrap();
        assert_eq!(pool, DrawPool::Names(vec!["Ana".into(), "Bruno".into()]));
    }

    #[test]
    fn blank_text_is_an_empty_pool() {
        assert_eq!(DrawPool::names(""), Err(DrawError::EmptyPool));
        assert_eq!(DrawPool::names(" \n\n  \t"), Err(DrawError::EmptyPool));
    }

    #[test]
    fn name_draw_returns_a_member() {
        let pool = DrawPool::names("Ana\nBruno\n\nCarla").unwrap();
        let members = ["Ana", "Bruno", "Carla"];
        let mut engine = instant();
        let mut rng = rng();
        for _ in 0..200 {
            match engine.draw(&pool, &mut rng).unwrap() {
                DrawStep::Revealed(DrawValue::Name(name)) => {
                    assert!(members.contains(&name.as_str()))
                }
                other => panic!("unexpected step {:?}", other),
            }
        }
        assert!(engine.history().is_empty());
    }

    #[test]
    fn range_rejects_bad_bounds() {
        let not_positive = Err(DrawError::InvalidRange(RangeError::NotPositive));
        assert_eq!(DrawPool::range("abc", "10"), not_positive);
        assert_eq!(DrawPool::range("1", ""), not_positive);
        assert_eq!(DrawPool::range("0", "10"), not_positive);
        assert_eq!(DrawPool::range("-2", "10"), not_positive);

        let err = DrawPool::range("5", "5").unwrap_err();
        assert_eq!(err, DrawError::InvalidRange(RangeError::MinNotBelowMax));
        assert_eq!(err.to_string(), "O número mínimo deve ser menor que o máximo");
        assert!(DrawPool::range("9", "3").is_err());
    }

    #[test]
    fn rejected_range_leaves_engine_untouched() {
        let mut engine = instant();
        let mut rng = rng();
        let first = DrawPool::range("1", "10").unwrap();
        engine.draw(&first, &mut rng).unwrap();
        let before = engine.clone();

        for (min, max) in [("x", "3"), ("5", "5"), ("0", "4")] {
            let step = DrawPool::range(min, max).and_then(|pool| engine.draw(&pool, &mut rng));
            assert!(step.is_err(), "{}..{} was accepted", min, max);
            assert_eq!(engine, before);
        }

        // a hand-built pool with equal bounds is rejected by the engine itself
        let flat = DrawPool::Range { min: 5, max: 5 };
        assert_eq!(
            engine.draw(&flat, &mut rng),
            Err(DrawError::InvalidRange(RangeError::MinNotBelowMax))
        );
        assert_eq!(engine, before);
        assert!(engine.can_draw());
    }

    #[test]
    fn range_draw_covers_both_bounds() {
        let pool = DrawPool::range(" 3 ", "8").unwrap();
        assert_eq!(pool, DrawPool::Range { min: 3, max: 8 });

        let mut engine = instant();
        let mut rng = rng();
        let mut seen = BTreeSet::new();
        for _ in 0..2_000 {
            if let DrawStep::Revealed(DrawValue::Number(n)) = engine.draw(&pool, &mut rng).unwrap() {
                assert!((3..=8).contains(&n));
                seen.insert(n);
            }
        }
        assert_eq!(seen, (3..=8).collect::<BTreeSet<u32>>());
    }

    #[test]
    fn bingo_draws_every_number_once_then_stops() {
        let pool = DrawPool::bingo();
        let mut engine = instant();
        let mut rng = rng();

        for _ in 0..75 {
            assert!(engine.can_draw());
            engine.draw(&pool, &mut rng).unwrap();
        }
        let drawn: BTreeSet<u32> = engine.history().as_slice().iter().copied().collect();
        assert_eq!(engine.history().len(), 75);
        assert_eq!(drawn, (1..=75).collect::<BTreeSet<u32>>());
        assert_eq!(pool.available(engine.history()), 0);

        let last = engine.result().cloned();
        let err = engine.draw(&pool, &mut rng).unwrap_err();
        assert_eq!(err, DrawError::PoolExhausted(75));
        assert!(engine.is_exhausted());
        assert!(!engine.can_draw());
        assert_eq!(engine.result().cloned(), last);
        assert_eq!(engine.history().len(), 75);
    }

    #[test]
    fn reset_makes_every_number_available_again() {
        let pool = DrawPool::bingo();
        let mut engine = instant();
        let mut rng = rng();
        for _ in 0..76 {
            let _ = engine.draw(&pool, &mut rng);
        }
        assert!(engine.is_exhausted());

        engine.reset();
        assert!(engine.can_draw());
        assert!(engine.history().is_empty());
        assert!(engine.result().is_none());
        assert_eq!(pool.available(engine.history()), 75);

        let step = engine.draw(&pool, &mut rng).unwrap();
        assert!(matches!(step, DrawStep::Revealed(DrawValue::Number(1..=75))));
        assert_eq!(engine.history().len(), 1);
    }

    #[test]
    fn history_keeps_draw_order() {
        let mut history = DrawHistory::default();
        assert!(history.record(12));
        assert!(history.record(3));
        assert!(!history.record(12));
        assert_eq!(history.as_slice(), &[12, 3]);
        assert_eq!(history.last(), Some(3));
    }

    #[test]
    fn countdown_locks_draws_until_reveal() {
        let pool = DrawPool::names("Ana\nBruno").unwrap();
        let mut engine = DrawEngine::new(Countdown::new(true, 3));
        let mut rng = rng();

        assert_eq!(engine.draw(&pool, &mut rng).unwrap(), DrawStep::Counting(3));
        assert!(!engine.can_draw());
        assert!(engine.result().is_none());

        // Re-entrant request is a no-op
        assert_eq!(engine.draw(&pool, &mut rng).unwrap(), DrawStep::Ignored);
        assert_eq!(engine.remaining(), Some(3));

        assert_eq!(engine.tick(), DrawStep::Counting(2));
        assert_eq!(engine.tick(), DrawStep::Counting(1));
        assert!(engine.result().is_none());
        assert!(!engine.can_draw());

        let revealed = engine.tick();
        assert!(matches!(revealed, DrawStep::Revealed(DrawValue::Name(_))));
        assert!(engine.can_draw());
        assert!(engine.result().is_some());
        assert_eq!(engine.tick(), DrawStep::Ignored);
    }

    #[test]
    fn disabled_countdown_reveals_immediately() {
        let pool = DrawPool::range("1", "10").unwrap();
        let mut engine = instant();
        let step = engine.draw(&pool, &mut rng()).unwrap();
        assert!(matches!(step, DrawStep::Revealed(_)));
        assert!(!engine.is_counting());
        assert!(engine.can_draw());
    }

    #[test]
    fn countdown_reveals_the_value_chosen_at_start() {
        let pool = DrawPool::range("1", "1000").unwrap();

        let mut direct = instant();
        let expected = match direct.draw(&pool, &mut rng()).unwrap() {
            DrawStep::Revealed(value) => value,
            other => panic!("unexpected step {:?}", other),
        };

        let mut counted = DrawEngine::new(Countdown::new(true, 2));
        counted.draw(&pool, &mut rng()).unwrap();
        counted.tick();
        assert_eq!(counted.tick(), DrawStep::Revealed(expected));
    }

    #[test]
    fn bingo_records_history_on_reveal() {
        let pool = DrawPool::bingo();
        let mut engine = DrawEngine::new(Countdown::new(true, 1));
        assert_eq!(engine.draw(&pool, &mut rng()).unwrap(), DrawStep::Counting(1));
        assert!(engine.history().is_empty());
        engine.tick();
        assert_eq!(engine.history().len(), 1);
    }

    #[test]
    fn reset_cancels_running_countdown() {
        let pool = DrawPool::bingo();
        let mut engine = DrawEngine::new(Countdown::default());
        engine.draw(&pool, &mut rng()).unwrap();
        assert!(engine.is_counting());
        engine.reset();
        assert!(!engine.is_counting());
        assert_eq!(engine.tick(), DrawStep::Ignored);
        assert!(engine.history().is_empty());
    }

    #[test]
    fn countdown_seconds_fall_back_and_clamp() {
        assert_eq!(Countdown::parse_seconds(""), 3);
        assert_eq!(Countdown::parse_seconds("abc"), 3);
        assert_eq!(Countdown::parse_seconds("0"), 3);
        assert_eq!(Countdown::parse_seconds("-4"), 3);
        assert_eq!(Countdown::parse_seconds(" 10 "), 10);
        assert_eq!(Countdown::parse_seconds("90"), 60);
        assert_eq!(Countdown::parse_seconds("4294967296"), 60);
        assert_eq!(Countdown::parse_seconds("99999999999999999999999"), 60);
        assert_eq!(Countdown::parse_seconds("+5"), 5);
        assert_eq!(Countdown::parse_seconds("1e3"), 3);

        assert_eq!(Countdown::new(true, 0).seconds(), 3);
        assert_eq!(Countdown::new(true, 500).seconds(), 60);
        assert!(!Countdown::disabled().enabled());
    }

    #[test]
    fn errors_read_as_user_messages() {
        assert_eq!(
            DrawError::EmptyPool.to_string(),
            "Adicione pelo menos um nome para sortear"
        );
        assert_eq!(
            DrawError::PoolExhausted(75).to_string(),
            "Todos os 75 números já foram sorteados!"
        );
    }
}
