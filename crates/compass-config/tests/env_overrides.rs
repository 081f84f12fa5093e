use compass_config::{CompassConfig, ConfigError, EnrichmentProvider};
use figment::Jail;
use rstest::rstest;

#[test]
fn env_selects_provider_and_key() {
    Jail::expect_with(|jail| {
        jail.set_env("COMPASS_ENRICHMENT__PROVIDER", "openai");
        jail.set_env("COMPASS_ENRICHMENT__API_KEY", "sk-from-env");

        let config = CompassConfig::load().expect("config loads");
        assert_eq!(config.enrichment.provider, EnrichmentProvider::OpenAi);
        assert_eq!(config.enrichment.api_key, "sk-from-env");
        assert!(config.enrichment.is_configured());
        Ok(())
    });
}

#[test]
fn env_float_override() {
    Jail::expect_with(|jail| {
        jail.set_env("COMPASS_MATCHING__THRESHOLD", "0.45");

        let config = CompassConfig::load().expect("config loads");
        assert!((config.matching.threshold - 0.45).abs() < 1e-9);
        Ok(())
    });
}

#[rstest]
#[case("COMPASS_MATCHING__THRESHOLD", "1.5", "matching.threshold")]
#[case("COMPASS_SCORING__BASE_WEIGHT", "0.5", "scoring")]
#[case("COMPASS_MATCHING__ACADEMIC_WEIGHT", "0.1", "matching")]
#[case("COMPASS_ENRICHMENT__BONUS_POINTS", "4.0", "enrichment.bonus_points")]
#[case("COMPASS_SCORING__SCORE_FLOOR", "0.95", "scoring.score_floor")]
fn invalid_env_values_fail_validation(
    #[case] key: &str,
    #[case] value: &str,
    #[case] expected_field: &str,
) {
    Jail::expect_with(|jail| {
        jail.set_env(key, value);

        let config = CompassConfig::load().expect("config loads");
        match config.validate() {
            Err(ConfigError::InvalidValue { field, .. }) => assert_eq!(field, expected_field),
            other => panic!("expected InvalidValue for {key}, got {other:?}"),
        }
        Ok(())
    });
}
