// In crates/strategies/src/crossover.rs

use crate::filters;
use crate::Strategy;
use core_types::{Candle, MaKind, Side, Signal, SignalAction, StrategyConfig};
use indicators::{IndicatorKind, IndicatorSet, IndicatorValue};

/// Ceiling for the confidence score. Kept below 100 so future confirmation
/// signals have headroom on top of a raw crossover.
const CONFIDENCE_CAP: f64 = 95.0;

/// The relation between the fast and slow lanes at one sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MaRelation {
    FastBelowSlow,
    FastAboveSlow,
    Undefined,
}

impl MaRelation {
    fn of(fast: IndicatorValue, slow: IndicatorValue) -> Self {
        match (fast.get(), slow.get()) {
            (Some(f), Some(s)) if f > s => MaRelation::FastAboveSlow,
            // A tie sits on the below side, so a rise out of it still crosses.
            (Some(_), Some(_)) => MaRelation::FastBelowSlow,
            _ => MaRelation::Undefined,
        }
    }
}

/// Moving-average crossover signal generator.
///
/// Watches the fast and slow lanes over the last two candles. A bullish
/// crossover (fast rises through slow) asks for a long, the mirror transition
/// asks for a short, and everything else holds. The raw crossover must clear
/// the configured strength threshold and every enabled filter before it
/// becomes a signal.
pub struct MaCrossover {
    name: &'static str,
    config: StrategyConfig,
}

impl MaCrossover {
    pub fn new(config: StrategyConfig) -> Self {
        let name = match config.ma_kind {
            MaKind::Sma => "sma_crossover",
            MaKind::Ema => "ema_crossover",
        };
        Self { name, config }
    }
}

impl Strategy for MaCrossover {
    fn name(&self) -> &'static str {
        self.name
    }

    fn assess(&self, candles: &[Candle]) -> Signal {
        let set = IndicatorSet::compute(candles, &self.config);
        if set.is_empty() || candles.len() < 2 {
            return Signal::hold("insufficient data");
        }
        let last = candles.len() - 1;

        let fast = set.value(IndicatorKind::FastMa, last);
        let slow = set.value(IndicatorKind::SlowMa, last);
        let current = MaRelation::of(fast, slow);
        if current == MaRelation::Undefined {
            return Signal::hold("insufficient data");
        }

        let previous = match MaRelation::of(
            set.value(IndicatorKind::FastMa, last - 1),
            set.value(IndicatorKind::SlowMa, last - 1),
        ) {
            // Before the lanes have history they behave like the flat state
            // they start from, so the first defined sample can cross upward.
            MaRelation::Undefined => MaRelation::FastBelowSlow,
            relation => relation,
        };

        let side = match (previous, current) {
            (MaRelation::FastBelowSlow, MaRelation::FastAboveSlow) => Side::Long,
            (MaRelation::FastAboveSlow, MaRelation::FastBelowSlow) => Side::Short,
            _ => return Signal::hold("no crossover"),
        };

        // Strength guard: the slow lane anchors the denominator and must be
        // a usable, non-zero value.
        let (Some(fast_value), Some(slow_value)) = (fast.get(), slow.get()) else {
            return Signal::hold("insufficient data");
        };
        if slow_value == 0.0 {
            return Signal::hold("slow average is zero");
        }
        let strength = ((fast_value - slow_value) / slow_value).abs();
        if !(strength > self.config.signal_threshold) {
            return Signal::hold(format!(
                "crossover strength {strength:.5} does not clear threshold {:.5}",
                self.config.signal_threshold
            ));
        }

        if let Err(reason) = filters::evaluate(&self.config, &set, last) {
            return Signal::hold(reason);
        }

        let direction = match side {
            Side::Long => "bullish",
            Side::Short => "bearish",
        };
        Signal {
            action: SignalAction::from(side),
            confidence: (strength * 100.0).min(CONFIDENCE_CAP),
            reason: format!("{direction} crossover with strength {strength:.5}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{candles_from_closes, config};
    use core_types::SignalAction;
    use proptest::prelude::*;

    fn crossover(fast: usize, slow: usize) -> MaCrossover {
        MaCrossover::new(config(fast, slow))
    }

    #[test]
    fn bullish_crossover_emits_long() {
        // Fast(2) crosses above slow(4) on the final candle.
        let candles = candles_from_closes(&[100.0, 90.0, 80.0, 70.0, 60.0, 100.0]);
        let signal = crossover(2, 4).assess(&candles);
        assert_eq!(signal.action, SignalAction::Long);
        assert!(signal.confidence > 0.0);
        assert!(signal.reason.contains("bullish"));
    }

    #[test]
    fn bearish_crossover_emits_short() {
        let candles = candles_from_closes(&[100.0, 110.0, 120.0, 130.0, 140.0, 100.0]);
        let signal = crossover(2, 4).assess(&candles);
        assert_eq!(signal.action, SignalAction::Short);
        assert!(signal.reason.contains("bearish"));
    }

    #[test]
    fn no_crossover_holds() {
        let candles = candles_from_closes(&[100.0, 101.0, 102.0, 103.0, 104.0, 105.0, 106.0]);
        let signal = crossover(2, 4).assess(&candles);
        assert!(signal.is_hold());
        assert_eq!(signal.reason, "no crossover");
    }

    #[test]
    fn short_history_holds_with_insufficient_data() {
        let candles = candles_from_closes(&[100.0, 101.0, 102.0]);
        let signal = crossover(2, 4).assess(&candles);
        assert!(signal.is_hold());
        assert_eq!(signal.reason, "insufficient data");
    }

    #[test]
    fn first_defined_sample_can_cross_out_of_warmup() {
        // Exactly slow_period candles: the previous slow sample is still
        // undefined, and a rising series crosses upward out of the flat state.
        let candles = candles_from_closes(&[100.0, 101.0, 102.0, 103.0]);
        let signal = crossover(2, 4).assess(&candles);
        assert_eq!(signal.action, SignalAction::Long);
    }

    #[test]
    fn threshold_gates_weak_crossovers() {
        let candles = candles_from_closes(&[100.0, 90.0, 80.0, 70.0, 60.0, 100.0]);
        let mut cfg = config(2, 4);
        cfg.signal_threshold = 0.5;
        let signal = MaCrossover::new(cfg).assess(&candles);
        assert!(signal.is_hold());
        assert!(signal.reason.contains("threshold"));
    }

    #[test]
    fn confidence_is_capped_below_100() {
        let candles = candles_from_closes(&[100.0, 90.0, 80.0, 70.0, 60.0, 10000.0]);
        let signal = crossover(2, 4).assess(&candles);
        assert_eq!(signal.action, SignalAction::Long);
        assert_eq!(signal.confidence, 95.0);
    }

    #[test]
    fn all_filters_off_and_zero_threshold_passes_any_genuine_crossover() {
        let candles = candles_from_closes(&[100.0, 90.0, 80.0, 70.0, 60.0, 95.0]);
        let mut cfg = config(2, 4);
        cfg.signal_threshold = 0.0;
        let signal = MaCrossover::new(cfg).assess(&candles);
        assert!(!signal.is_hold());
        assert!(signal.confidence > 0.0);
    }

    #[test]
    fn ema_variant_reports_its_name() {
        let mut cfg = config(2, 4);
        cfg.ma_kind = MaKind::Ema;
        assert_eq!(MaCrossover::new(cfg).name(), "ema_crossover");
        assert_eq!(crossover(2, 4).name(), "sma_crossover");
    }

    proptest! {
        /// The bullish and bearish detectors can never both fire at the same
        /// index: the current-sample comparisons are mutually exclusive.
        #[test]
        fn crossover_detection_is_antisymmetric(
            closes in prop::collection::vec(50.0f64..150.0, 6..60)
        ) {
            let candles = candles_from_closes(&closes);
            let cfg = config(2, 4);
            let set = IndicatorSet::compute(&candles, &cfg);
            prop_assume!(!set.is_empty());

            for i in 1..candles.len() {
                let prev = MaRelation::of(
                    set.value(IndicatorKind::FastMa, i - 1),
                    set.value(IndicatorKind::SlowMa, i - 1),
                );
                let cur = MaRelation::of(
                    set.value(IndicatorKind::FastMa, i),
                    set.value(IndicatorKind::SlowMa, i),
                );
                let bullish = prev == MaRelation::FastBelowSlow
                    && cur == MaRelation::FastAboveSlow;
                let bearish = prev == MaRelation::FastAboveSlow
                    && cur == MaRelation::FastBelowSlow;
                prop_assert!(!(bullish && bearish));
            }
        }
    }
}
