// Scenario Definitions - player behaviour profiles over simulated days
// Each scenario drives the engine only through its public operations

use reton_engine::{Strategy, TapSimulation};

// ─── Scenario Configuration ─────────────────────────────────────────────────

/// When the simulated player moves funds around.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StakePolicy {
    /// Never stakes; taps and keeps the balance available.
    Never,
    /// Stakes whenever the session ends.
    EndOfSession,
    /// Stakes every hour during the session.
    Hourly,
    /// Stakes at session end, unstakes and withdraws at the start of the next.
    DailyCashOut,
}

pub struct Scenario {
    pub name: &'static str,
    pub label: &'static str,
    pub category: &'static str,
    /// Expected taps per minute while in session.
    pub taps_per_minute: f64,
    /// Daily play session length in minutes.
    pub session_minutes: u64,
    pub strategy: Strategy,
    pub stake_policy: StakePolicy,
    /// Strategy override by day index.
    pub strategy_curve: Option<fn(u64) -> Strategy>,
    pub criteria: PassCriteria,
    /// Mid-run events, called once per simulated minute.
    pub mid_event: Option<Box<dyn Fn(&mut TapSimulation, u64) + Send + Sync>>,
}

pub struct PassCriteria {
    pub max_conservation_violations: u32,
    /// Staked balance must have grown from yield by the end.
    pub require_yield: bool,
    /// Final level must equal 1 + taps / 20.
    pub require_level_curve: bool,
    pub min_final_total: Option<f64>,
}

impl Default for PassCriteria {
    fn default() -> Self {
        Self {
            max_conservation_violations: 0,
            require_yield: false,
            require_level_curve: true,
            min_final_total: None,
        }
    }
}

// ─── Curve Functions ────────────────────────────────────────────────────────

fn rotate_daily(day: u64) -> Strategy {
    Strategy::ALL[(day % 3) as usize]
}

fn aggressive_weekends(day: u64) -> Strategy {
    if day % 7 >= 5 { Strategy::Aggressive } else { Strategy::Conservative }
}

// ─── Scenario List ──────────────────────────────────────────────────────────

pub fn scenarios() -> Vec<Scenario> {
    vec![
        Scenario {
            name: "TAP_ONLY",
            label: "Tap only, never stake",
            category: "baseline",
            taps_per_minute: 40.0,
            session_minutes: 30,
            strategy: Strategy::Balanced,
            stake_policy: StakePolicy::Never,
            strategy_curve: None,
            criteria: PassCriteria { min_final_total: Some(1.0), ..PassCriteria::default() },
            mid_event: None,
        },
        Scenario {
            name: "HODL_AGGRESSIVE",
            label: "Stake each session (aggressive)",
            category: "strategy",
            taps_per_minute: 40.0,
            session_minutes: 30,
            strategy: Strategy::Aggressive,
            stake_policy: StakePolicy::EndOfSession,
            strategy_curve: None,
            criteria: PassCriteria { require_yield: true, ..PassCriteria::default() },
            mid_event: None,
        },
        Scenario {
            name: "HODL_BALANCED",
            label: "Stake each session (balanced)",
            category: "strategy",
            taps_per_minute: 40.0,
            session_minutes: 30,
            strategy: Strategy::Balanced,
            stake_policy: StakePolicy::EndOfSession,
            strategy_curve: None,
            criteria: PassCriteria { require_yield: true, ..PassCriteria::default() },
            mid_event: None,
        },
        Scenario {
            name: "HODL_CONSERVATIVE",
            label: "Stake each session (conservative)",
            category: "strategy",
            taps_per_minute: 40.0,
            session_minutes: 30,
            strategy: Strategy::Conservative,
            stake_policy: StakePolicy::EndOfSession,
            strategy_curve: None,
            criteria: PassCriteria { require_yield: true, ..PassCriteria::default() },
            mid_event: None,
        },
        Scenario {
            name: "HOURLY_STAKER",
            label: "Long sessions, hourly staking",
            category: "behaviour",
            taps_per_minute: 25.0,
            session_minutes: 240,
            strategy: Strategy::Balanced,
            stake_policy: StakePolicy::Hourly,
            strategy_curve: None,
            criteria: PassCriteria { require_yield: true, ..PassCriteria::default() },
            mid_event: None,
        },
        Scenario {
            name: "DAILY_CASH_OUT",
            label: "Stake overnight, withdraw daily",
            category: "behaviour",
            taps_per_minute: 40.0,
            session_minutes: 30,
            strategy: Strategy::Balanced,
            stake_policy: StakePolicy::DailyCashOut,
            strategy_curve: None,
            criteria: PassCriteria::default(),
            mid_event: None,
        },
        Scenario {
            name: "STRATEGY_ROTATION",
            label: "Rotate strategy every day",
            category: "strategy",
            taps_per_minute: 40.0,
            session_minutes: 30,
            strategy: Strategy::Balanced,
            stake_policy: StakePolicy::EndOfSession,
            strategy_curve: Some(rotate_daily),
            criteria: PassCriteria { require_yield: true, ..PassCriteria::default() },
            mid_event: None,
        },
        Scenario {
            name: "WEEKEND_GAMBLER",
            label: "Aggressive on weekends only",
            category: "strategy",
            taps_per_minute: 40.0,
            session_minutes: 30,
            strategy: Strategy::Conservative,
            stake_policy: StakePolicy::EndOfSession,
            strategy_curve: Some(aggressive_weekends),
            criteria: PassCriteria { require_yield: true, ..PassCriteria::default() },
            mid_event: None,
        },
        Scenario {
            name: "PANIC_UNSTAKE",
            label: "Unstake everything mid-week",
            category: "behaviour",
            taps_per_minute: 40.0,
            session_minutes: 30,
            strategy: Strategy::Aggressive,
            stake_policy: StakePolicy::EndOfSession,
            strategy_curve: None,
            criteria: PassCriteria::default(),
            mid_event: Some(Box::new(|sim: &mut TapSimulation, minute: u64| {
                if minute == 3 * 1_440 + 600 {
                    sim.unstake();
                }
            })),
        },
    ]
}
