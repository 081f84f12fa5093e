//! Integration tests for TOML configuration loading.
//!
//! Uses figment::Jail for sandboxed file and env var manipulation.

use compass_config::{CompassConfig, EnrichmentProvider};
use figment::{
    Figment, Jail,
    providers::{Env, Format, Serialized, Toml},
};

#[test]
fn loads_matching_section_from_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[matching]
threshold = 0.5
limit = 8
trait_weight = 0.6
academic_weight = 0.4
"#,
        )?;

        let config: CompassConfig = Figment::from(Serialized::defaults(CompassConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert!((config.matching.threshold - 0.5).abs() < f64::EPSILON);
        assert_eq!(config.matching.limit, 8);
        assert!((config.matching.trait_weight - 0.6).abs() < f64::EPSILON);
        assert!((config.matching.trait_shortfall_penalty - 0.7).abs() < f64::EPSILON);
        assert!(config.validate().is_ok());
        Ok(())
    });
}

#[test]
fn loads_enrichment_section_from_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[enrichment]
provider = "gemini"
api_key = "toml-key"
timeout_secs = 4
top_k = 2
"#,
        )?;

        let config: CompassConfig = Figment::from(Serialized::defaults(CompassConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert_eq!(config.enrichment.provider, EnrichmentProvider::Gemini);
        assert_eq!(config.enrichment.api_key, "toml-key");
        assert_eq!(config.enrichment.timeout_secs, 4);
        assert_eq!(config.enrichment.top_k, 2);
        assert_eq!(config.enrichment.effective_model(), "gemini-1.5-flash");
        assert!(config.enrichment.is_configured());
        Ok(())
    });
}

#[test]
fn partial_section_keeps_remaining_defaults() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[scoring]
fallback_trait = "creativity"
"#,
        )?;

        let config: CompassConfig = Figment::from(Serialized::defaults(CompassConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert_eq!(config.scoring.fallback_trait, "creativity");
        assert!((config.scoring.base_weight - 0.8).abs() < f64::EPSILON);
        assert!((config.scoring.score_ceiling - 0.9).abs() < f64::EPSILON);
        assert_eq!(config.selector, compass_config::SelectorConfig::default());
        Ok(())
    });
}

#[test]
fn env_overrides_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r"
[matching]
limit = 3
",
        )?;
        jail.set_env("COMPASS_MATCHING__LIMIT", "7");

        let config: CompassConfig = Figment::from(Serialized::defaults(CompassConfig::default()))
            .merge(Toml::file("config.toml"))
            .merge(Env::prefixed("COMPASS_").split("__"))
            .extract()?;

        assert_eq!(config.matching.limit, 7);
        Ok(())
    });
}

#[test]
fn project_local_config_is_picked_up() {
    Jail::expect_with(|jail| {
        jail.create_dir(".compass")?;
        jail.create_file(
            ".compass/config.toml",
            r"
[selector]
default_count = 9
",
        )?;

        let config = CompassConfig::load().expect("config loads");
        assert_eq!(config.selector.default_count, 9);
        Ok(())
    });
}

#[test]
fn malformed_toml_is_a_figment_error() {
    Jail::expect_with(|jail| {
        jail.create_dir(".compass")?;
        jail.create_file(".compass/config.toml", "[matching\nthreshold = ")?;

        let result = CompassConfig::load();
        assert!(matches!(
            result,
            Err(compass_config::ConfigError::Figment(_))
        ));
        Ok(())
    });
}
