use anyhow::Result;
use renderer::{run_windowed, RendererConfig};
use tracing_subscriber::EnvFilter;

use crate::cli::Cli;

pub fn run(cli: Cli) -> Result<()> {
    let mut config = RendererConfig::default();
    if let Some(spec) = cli.size.as_deref() {
        config.surface_size = parse_surface_size(spec)?;
    }
    if let Some(title) = cli.title {
        config.window_title = title;
    }
    config.vsync = !cli.no_vsync;

    tracing::info!(
        width = config.surface_size.0,
        height = config.surface_size.1,
        vsync = config.vsync,
        "starting triview"
    );
    run_windowed(&config)
}

pub fn initialise_tracing() {
    let default_filter =
        "warn,triview=info,renderer=info,naga=error,wgpu=error,wgpu_core=error,wgpu_hal=error,winit=error";
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn parse_surface_size(spec: &str) -> Result<(u32, u32)> {
    let trimmed = spec.trim();
    let (width, height) = trimmed
        .split_once(['x', 'X', '×'])
        .ok_or_else(|| anyhow::anyhow!("expected WxH format, e.g. 800x600"))?;

    let width: u32 = width
        .trim()
        .parse()
        .map_err(|_| anyhow::anyhow!("invalid width in size specification"))?;
    let height: u32 = height
        .trim()
        .parse()
        .map_err(|_| anyhow::anyhow!("invalid height in size specification"))?;

    if width == 0 || height == 0 {
        anyhow::bail!("window dimensions must be greater than zero");
    }

    Ok((width, height))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_lower_and_uppercase_separators() {
        assert_eq!(parse_surface_size("800x600").unwrap(), (800, 600));
        assert_eq!(parse_surface_size("1920X1080").unwrap(), (1920, 1080));
        assert_eq!(parse_surface_size(" 400 x 300 ").unwrap(), (400, 300));
    }

    #[test]
    fn rejects_malformed_specifications() {
        assert!(parse_surface_size("800").is_err());
        assert!(parse_surface_size("800x").is_err());
        assert!(parse_surface_size("axb").is_err());
        assert!(parse_surface_size("0x600").is_err());
    }
}
