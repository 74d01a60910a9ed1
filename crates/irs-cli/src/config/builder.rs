use super::defaults::DefaultsConfig;
use super::file::{FileConfig, FileOracleConfig};
use super::models::{AppConfig, DesignConfig, EngineKind, EngineSelection};
use crate::cli::{DesignArgs, ScreenArgs};
use crate::error::{CliError, Result};
use irsscreen::core::thermo::model::{Material, ModelError};
use irsscreen::engine::config as core_config;
use std::time::Duration;

pub fn build_config(args: &ScreenArgs) -> Result<AppConfig> {
    let defaults = DefaultsConfig::default();
    let mut file_config = load_file_config(&args.design)?;

    let design = build_design(
        &args.design,
        &mut file_config,
        &defaults,
        args.temperature,
        args.call_timeout,
    )?;

    let target = args
        .target
        .clone()
        .or(file_config.target.take())
        .ok_or_else(|| {
            CliError::Argument(
                "A target RNA is required, either via --target or `target` in the config file."
                    .to_string(),
            )
        })?;

    let screening_file = file_config.screening.take().unwrap_or_default();
    let top_n = args.top_n.or(screening_file.top_n);
    if top_n == Some(0) {
        return Err(CliError::Config("`top-n` must be at least 1.".to_string()));
    }

    let output_path = if args.no_export {
        None
    } else {
        Some(
            args.output
                .clone()
                .or(screening_file.output)
                .unwrap_or(defaults.output.clone()),
        )
    };

    let oracle_file = file_config.oracle.take().unwrap_or_default();
    let engine = resolve_engine(args, oracle_file, &defaults);

    Ok(AppConfig {
        target,
        output_path,
        top_n,
        engine,
        design,
    })
}

pub fn build_design_config(args: &DesignArgs) -> Result<DesignConfig> {
    let defaults = DefaultsConfig::default();
    let mut file_config = load_file_config(args)?;
    build_design(args, &mut file_config, &defaults, None, None)
}

fn load_file_config(args: &DesignArgs) -> Result<FileConfig> {
    let file_config = if let Some(config_path) = &args.config {
        FileConfig::from_file(config_path)?
    } else {
        FileConfig::default()
    };
    apply_set_values(file_config, &args.set_values)
}

fn build_design(
    args: &DesignArgs,
    file_config: &mut FileConfig,
    defaults: &DefaultsConfig,
    cli_temperature: Option<f64>,
    cli_call_timeout: Option<f64>,
) -> Result<DesignConfig> {
    let model_file = file_config.model.take().unwrap_or_default();
    let design_file = file_config.design.take().unwrap_or_default();
    let seed = args
        .seed
        .or(file_config.screening.as_ref().and_then(|s| s.seed));
    let call_timeout_secs = cli_call_timeout.or(file_config
        .oracle
        .as_ref()
        .and_then(|o| o.call_timeout_secs));

    let material: Material = model_file
        .material
        .as_deref()
        .unwrap_or(defaults.material.as_str())
        .parse()
        .map_err(|e: ModelError| CliError::Config(e.to_string()))?;
    let temperature = cli_temperature
        .or(model_file.temperature_celsius)
        .unwrap_or(defaults.temperature_celsius);

    let core_config = core_config::ScreeningConfigBuilder::new()
        .material(material)
        .temperature_celsius(temperature)
        .prefix(design_file.prefix.unwrap_or(defaults.prefix.clone()))
        .suffix(design_file.suffix.unwrap_or(defaults.suffix.clone()))
        .reference(design_file.reference.unwrap_or(defaults.reference.clone()))
        .middle_length(design_file.middle_length.unwrap_or(defaults.middle_length))
        .reporter_switch(
            design_file
                .reporter_switch
                .unwrap_or(defaults.reporter_switch.clone()),
        )
        .call_timeout(parse_timeout(call_timeout_secs)?)
        .build()
        .map_err(|e| CliError::Config(e.to_string()))?;

    Ok(DesignConfig { seed, core_config })
}

fn parse_timeout(seconds: Option<f64>) -> Result<Option<Duration>> {
    match seconds {
        None => Ok(None),
        Some(s) if s.is_finite() && s > 0.0 => Ok(Some(Duration::from_secs_f64(s))),
        Some(s) => Err(CliError::Config(format!(
            "Call timeout must be a positive number of seconds, got {}",
            s
        ))),
    }
}

fn resolve_engine(
    args: &ScreenArgs,
    oracle_file: FileOracleConfig,
    defaults: &DefaultsConfig,
) -> EngineSelection {
    match args
        .engine
        .or(oracle_file.engine)
        .unwrap_or(defaults.engine)
    {
        EngineKind::NearestNeighbor => EngineSelection::NearestNeighbor,
        EngineKind::Rnacofold => EngineSelection::Cofold {
            executable: args
                .rnacofold_bin
                .clone()
                .or(oracle_file.rnacofold_bin)
                .unwrap_or(defaults.rnacofold_bin.clone()),
        },
    }
}

fn parse_value<T: std::str::FromStr>(key: &str, value: &str, kind: &str) -> Result<T> {
    value
        .parse()
        .map_err(|_| CliError::Config(format!("Invalid {} value for {}: {}", kind, key, value)))
}

fn apply_set_values(mut config: FileConfig, set_values: &[String]) -> Result<FileConfig> {
    if set_values.is_empty() {
        return Ok(config);
    }
    for kv_pair in set_values {
        let Some((key, value_str)) = kv_pair.split_once('=') else {
            return Err(CliError::Config(format!(
                "Invalid --set format: '{}'. Expected KEY=VALUE.",
                kv_pair
            )));
        };

        match key {
            "target" => config.target = Some(value_str.to_string()),
            "model.material" => {
                config.model.get_or_insert_with(Default::default).material =
                    Some(value_str.to_string());
            }
            "model.temperature-celsius" => {
                config
                    .model
                    .get_or_insert_with(Default::default)
                    .temperature_celsius = Some(parse_value(key, value_str, "float")?);
            }
            "design.prefix" => {
                config.design.get_or_insert_with(Default::default).prefix =
                    Some(value_str.to_string());
            }
            "design.suffix" => {
                config.design.get_or_insert_with(Default::default).suffix =
                    Some(value_str.to_string());
            }
            "design.reference" => {
                config.design.get_or_insert_with(Default::default).reference =
                    Some(value_str.to_string());
            }
            "design.middle-length" => {
                config
                    .design
                    .get_or_insert_with(Default::default)
                    .middle_length = Some(parse_value(key, value_str, "integer")?);
            }
            "design.reporter-switch" => {
                config
                    .design
                    .get_or_insert_with(Default::default)
                    .reporter_switch = Some(value_str.to_string());
            }
            "oracle.engine" => {
                let engine: EngineKind = value_str.parse().map_err(CliError::Config)?;
                config.oracle.get_or_insert_with(Default::default).engine = Some(engine);
            }
            "oracle.rnacofold-bin" => {
                config
                    .oracle
                    .get_or_insert_with(Default::default)
                    .rnacofold_bin = Some(value_str.into());
            }
            "oracle.call-timeout-secs" => {
                config
                    .oracle
                    .get_or_insert_with(Default::default)
                    .call_timeout_secs = Some(parse_value(key, value_str, "float")?);
            }
            "screening.seed" => {
                config.screening.get_or_insert_with(Default::default).seed =
                    Some(parse_value(key, value_str, "integer")?);
            }
            "screening.top-n" => {
                config.screening.get_or_insert_with(Default::default).top_n =
                    Some(parse_value(key, value_str, "integer")?);
            }
            "screening.output" => {
                config.screening.get_or_insert_with(Default::default).output =
                    Some(value_str.into());
            }
            _ => {
                return Err(CliError::Config(format!(
                    "Unsupported configuration key for --set: '{}'",
                    key
                )));
            }
        }
    }
    Ok(config)
}
