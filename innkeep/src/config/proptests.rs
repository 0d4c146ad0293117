//! Property-based tests for configuration system.

use super::merger::ConfigMerger;
use super::schema::{Config, OutputFormat};
use super::validator::ConfigValidator;
use proptest::prelude::*;

fn format_strategy() -> impl Strategy<Value = OutputFormat> {
    prop_oneof![Just(OutputFormat::Table), Just(OutputFormat::Json)]
}

fn config_strategy() -> impl Strategy<Value = Config> {
    (
        prop::option::of(0u64..10_000),
        prop::option::of(0u64..100_000),
        prop::option::of(any::<bool>()),
        prop::option::of(format_strategy()),
    )
        .prop_map(|(lock, ttl, autoinit, format)| Config {
            maximum_lock_wait_seconds: lock,
            session_ttl_seconds: ttl,
            disable_autoinit: autoinit,
            output_format: format,
        })
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 1000,
        .. ProptestConfig::default()
    })]

    // Each field takes the higher-precedence value when it is set
    #[test]
    fn merge_higher_precedence_wins(low in config_strategy(), high in config_strategy()) {
        let mut merged = low.clone();
        ConfigMerger::merge_into(&mut merged, &high);

        prop_assert_eq!(
            merged.maximum_lock_wait_seconds,
            high.maximum_lock_wait_seconds.or(low.maximum_lock_wait_seconds)
        );
        prop_assert_eq!(merged.session_ttl_seconds, high.session_ttl_seconds.or(low.session_ttl_seconds));
        prop_assert_eq!(merged.disable_autoinit, high.disable_autoinit.or(low.disable_autoinit));
        prop_assert_eq!(merged.output_format, high.output_format.or(low.output_format));
    }

    // Merging a config into itself changes nothing
    #[test]
    fn merge_is_idempotent(config in config_strategy()) {
        let mut merged = config.clone();
        ConfigMerger::merge_into(&mut merged, &config);
        prop_assert_eq!(merged, config);
    }

    // Serialized configs parse back identically
    #[test]
    fn yaml_round_trip(config in config_strategy()) {
        let yaml = serde_yaml::to_string(&config).unwrap();
        let parsed: Config = serde_yaml::from_str(&yaml).unwrap();
        prop_assert_eq!(parsed, config);
    }

    // Only zero durations are rejected below the lock wait ceiling
    #[test]
    fn validator_rejects_only_zero(ttl in 0u64..100_000, lock in 0u64..3600) {
        let config = Config {
            maximum_lock_wait_seconds: Some(lock),
            session_ttl_seconds: Some(ttl),
            ..Default::default()
        };
        prop_assert_eq!(ConfigValidator::validate(&config).is_ok(), ttl > 0 && lock > 0);
    }
}
