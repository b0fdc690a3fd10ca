use crate::app::status::render_status;
use crate::cli::commands::{Cli, Commands, NormalizeCommands, ReportCommands};
use anyhow::{Context, Result};
use cartolink::config::{ConfigHandle, DeviceProfile};
use cartolink::locator::Normalizer;
use cartolink::telemetry::Telemetry;
use tracing::{info, warn};

pub async fn dispatch(cli: Cli, config: ConfigHandle) -> Result<()> {
    match cli.command {
        Commands::Normalize { command } => {
            println!("{}", normalize(&command, &config)?);
            Ok(())
        }
        Commands::Report { command } => {
            report(command, config).await;
            Ok(())
        }
        Commands::Config => {
            println!("{}", render_status(&config.load()));
            Ok(())
        }
    }
}

fn normalize(command: &NormalizeCommands, config: &ConfigHandle) -> Result<String> {
    let device = match command {
        NormalizeCommands::Tile {
            pixel_ratio, webp, ..
        } => DeviceProfile {
            pixel_ratio: *pixel_ratio,
            supports_webp: *webp,
        },
        _ => DeviceProfile::default(),
    };
    let normalizer = Normalizer::new(config.clone(), device);

    let normalized = match command {
        NormalizeCommands::Style { locator, token } => {
            normalizer.normalize_style_locator(locator, token.as_deref())
        }
        NormalizeCommands::Glyphs { locator, token } => {
            normalizer.normalize_glyphs_locator(locator, token.as_deref())
        }
        NormalizeCommands::Source { locator, token } => {
            normalizer.normalize_source_locator(locator, token.as_deref())
        }
        NormalizeCommands::Sprite {
            locator,
            format,
            extension,
            token,
        } => normalizer.normalize_sprite_locator(locator, format, extension, token.as_deref()),
        NormalizeCommands::Tile {
            tile,
            source,
            tile_size,
            ..
        } => normalizer.normalize_tile_locator(tile, source.as_deref(), *tile_size),
        NormalizeCommands::Canonical { tile } => Ok(normalizer.canonicalize_tile_locator(tile)),
    };

    normalized.context("Failed to normalize locator")
}

async fn report(command: ReportCommands, config: ConfigHandle) {
    if config.load().access_token().is_none() {
        warn!("no access token configured; telemetry will not be sent");
    }
    let telemetry = Telemetry::from_config(config);

    match command {
        ReportCommands::Load {
            resources,
            subject_id,
        } => {
            telemetry.report_resource_load(&resources, subject_id);
        }
        ReportCommands::Usage { resources } => telemetry.report_usage_tick(&resources),
    }

    telemetry.wait_idle().await;
    info!(
        load_queued = telemetry.resource_load().queued(),
        usage_queued = telemetry.daily_usage().queued(),
        "telemetry flushed"
    );
}
