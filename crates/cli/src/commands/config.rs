use prewarm_config::{ConfigSource, LoadedConfig, PrewarmConfig};
use prewarm_core::Result;
use serde::Serialize;

#[derive(Serialize)]
struct EffectiveConfig<'a> {
    source: &'a ConfigSource,
    config: &'a PrewarmConfig,
}

pub fn render(loaded: &LoadedConfig) -> Result<String> {
    let view = EffectiveConfig {
        source: &loaded.source,
        config: &loaded.config,
    };
    Ok(serde_json::to_string_pretty(&view)?)
}

pub fn execute(loaded: &LoadedConfig) -> Result<()> {
    println!("{}", render(loaded)?);
    Ok(())
}
