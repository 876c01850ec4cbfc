#[cfg(test)]
mod tests {
    use reton_engine::clock::MS_PER_DAY;
    use reton_engine::{ManualClock, SimConfig, Strategy, TapSimulation, Ton};
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    const START_MS: i64 = 1_700_000_000_000;

    fn fresh() -> (TapSimulation, ManualClock) {
        let clock = ManualClock::new(START_MS);
        (TapSimulation::with_clock(clock.clone()), clock)
    }

    // ========== Reference Scenario ==========

    #[test]
    fn test_twenty_taps_stake_then_empty_withdraw() {
        let (mut sim, clock) = fresh();
        for _ in 0..20 {
            sim.tap();
        }
        let s = sim.snapshot();
        assert_eq!(s.available.to_fixed(), "20.00");
        assert_eq!(s.progress, 0);
        assert_eq!(s.level, 2);
        assert_eq!(s.multiplier, dec!(1.10));

        clock.advance(5);
        let receipt = sim.stake();
        assert!(sim.available().is_zero());
        assert_eq!(sim.staked().to_fixed(), "20.00");
        assert_eq!(receipt.moved, Ton::from_units(20));
        assert!(receipt.settled_yield.is_zero());

        let withdrawal = sim.withdraw();
        assert_eq!(withdrawal.message(), "Withdrawing 0.00 TON");
        assert!(sim.available().is_zero());
        assert_eq!(sim.total_balance().to_fixed(), "20.00");
    }

    // ========== Conservation ==========

    #[test]
    fn test_stake_unstake_round_trip() {
        let (mut sim, _) = fresh();
        for _ in 0..7 {
            sim.tap();
        }
        let before = sim.available();
        sim.stake();
        sim.unstake();
        assert_eq!(sim.available(), before);
        assert!(sim.staked().is_zero());
        assert_eq!(sim.stats().conservation_violations, 0);
    }

    #[test]
    fn test_total_preserved_across_transfers_with_yield() {
        let (mut sim, clock) = fresh();
        for _ in 0..40 {
            sim.tap();
        }
        sim.stake();
        for _ in 0..10 {
            clock.advance(MS_PER_DAY / 3);
            let before = sim.total_balance();
            let receipt = sim.unstake();
            assert_eq!(sim.total_balance(), before + receipt.settled_yield);
            let before = sim.total_balance();
            let receipt = sim.stake();
            assert_eq!(sim.total_balance(), before + receipt.settled_yield);
        }
        assert_eq!(sim.stats().conservation_violations, 0);
    }

    // ========== Yield ==========

    #[test]
    fn test_yield_uses_elapsed_days() {
        let (mut sim, clock) = fresh();
        for _ in 0..20 {
            sim.tap();
        }
        sim.stake();
        clock.advance_days(2);
        // 20 * 0.01 * 2
        assert_eq!(sim.accrue_yield(), Ton(dec!(0.4)));
        assert_eq!(sim.staked(), Ton(dec!(20.4)));
    }

    #[test]
    fn test_yield_compounds_between_settlements() {
        let (mut sim, clock) = fresh();
        sim.set_strategy(Strategy::Aggressive);
        for _ in 0..100 {
            sim.tap();
        }
        sim.unstake();
        sim.stake();
        let principal = sim.staked();
        clock.advance_days(1);
        sim.accrue_yield();
        clock.advance_days(1);
        sim.accrue_yield();
        let expected = principal * dec!(1.02) * dec!(1.02);
        assert_eq!(sim.staked(), expected);
    }

    #[test]
    fn test_strategy_change_applies_new_rate_retroactively() {
        let (mut sim, clock) = fresh();
        for _ in 0..20 {
            sim.tap();
        }
        sim.stake();
        clock.advance_days(1);
        sim.set_strategy(Strategy::Conservative);
        // Full day at 0.5%, not 1%.
        assert_eq!(sim.accrue_yield(), Ton(dec!(0.1)));
    }

    #[test]
    fn test_available_balance_earns_nothing() {
        let (mut sim, clock) = fresh();
        for _ in 0..20 {
            sim.tap();
        }
        clock.advance_days(30);
        assert!(sim.accrue_yield().is_zero());
        assert_eq!(sim.available(), Ton::from_units(20));
    }

    // ========== Timer ==========

    #[test]
    fn test_timer_settles_every_minute() {
        let (mut sim, clock) = fresh();
        for _ in 0..20 {
            sim.tap();
        }
        sim.stake();
        let mut fired = 0;
        // One simulated hour in one-second frames.
        for _ in 0..3_600 {
            clock.advance(1_000);
            if sim.pump().is_some() {
                fired += 1;
            }
        }
        assert_eq!(fired, 60);
        // One hour of 1% daily yield on 20, compounding per minute.
        let gained = sim.staked() - Ton::from_units(20);
        assert!(gained.0 > dec!(0.0083) && gained.0 < dec!(0.0084), "gained {gained}");
    }

    #[test]
    fn test_timer_stops_after_shutdown() {
        let (mut sim, clock) = fresh();
        sim.tap();
        sim.stake();
        sim.shutdown();
        clock.advance_days(1);
        assert_eq!(sim.pump(), None);
        assert_eq!(sim.staked(), Ton::from_units(1));
        assert_eq!(sim.stats().ticks_fired, 0);
    }

    #[test]
    fn test_custom_interval_from_config() {
        let clock = ManualClock::new(START_MS);
        let config = SimConfig { tick_interval_ms: 1_000, ..SimConfig::default() };
        let mut sim = TapSimulation::with_config(config, clock.clone()).unwrap();
        assert_eq!(sim.next_tick_ms(), START_MS + 1_000);
        clock.advance(1_000);
        assert!(sim.pump().is_some());
    }

    // ========== Leveling ==========

    #[test]
    fn test_level_curve_over_many_taps() {
        let (mut sim, _) = fresh();
        let mut expected_multiplier = Decimal::ONE;
        for level in 1..=10u32 {
            assert_eq!(sim.level(), level);
            for _ in 0..20 {
                sim.tap();
            }
            expected_multiplier = reton_engine::money::round_cents(expected_multiplier * dec!(1.1));
            assert_eq!(sim.multiplier(), expected_multiplier);
        }
        assert_eq!(sim.stats().level_ups, 10);
        assert_eq!(sim.stats().taps, 200);
    }

    #[test]
    fn test_config_rejects_invalid() {
        let clock = ManualClock::new(START_MS);
        let config = SimConfig { progress_step: 0, ..SimConfig::default() };
        assert!(TapSimulation::with_config(config, clock).is_err());
    }

    #[test]
    fn test_snapshot_display_matches_widget_text() {
        let (mut sim, _) = fresh();
        for _ in 0..23 {
            sim.tap();
        }
        let d = sim.snapshot().display();
        // 20 * 1.00 + 3 * 1.10
        assert_eq!(d.available, "23.30");
        assert_eq!(d.total, "23.30");
        assert_eq!(d.multiplier, "x1.10");
        assert_eq!(d.progress_pct, 15);
        assert_eq!(d.strategy_label, "Balanced (1% daily, moderate risk)");
    }

    // ========== Long Sessions ==========

    #[test]
    fn test_twenty_thousand_taps_saturate_without_panicking() {
        let (mut sim, clock) = fresh();
        for _ in 0..20_000 {
            sim.tap();
        }
        let s = sim.snapshot();
        assert_eq!(s.level, 1 + 20_000 / 20);
        assert_eq!(s.progress, 0);
        assert_eq!(s.multiplier, Decimal::MAX);
        assert_eq!(s.available, Ton::MAX);

        let receipt = sim.stake();
        assert_eq!(receipt.moved, Ton::MAX);
        assert_eq!(sim.staked(), Ton::MAX);

        clock.advance(MS_PER_DAY);
        assert!(sim.pump().is_some());
        sim.tap();
        sim.stake();
        sim.unstake();
        assert_eq!(sim.total_balance(), Ton::MAX);
        assert_eq!(sim.stats().conservation_violations, 0);
    }
}
