use crate::crossover::MaCrossover;
use crate::Strategy;
use core_types::StrategyConfig;

/// Builds the strategy instance a validated config describes.
///
/// The crossover family covers both moving-average kinds; the config's
/// `ma_kind` selects which lanes the instance watches.
pub fn create_strategy(config: &StrategyConfig) -> Box<dyn Strategy + Send + Sync> {
    Box::new(MaCrossover::new(config.clone()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::config;
    use core_types::MaKind;

    #[test]
    fn factory_honors_ma_kind() {
        let sma = create_strategy(&config(5, 20));
        assert_eq!(sma.name(), "sma_crossover");

        let mut ema_config = config(5, 20);
        ema_config.ma_kind = MaKind::Ema;
        let ema = create_strategy(&ema_config);
        assert_eq!(ema.name(), "ema_crossover");
    }
}
