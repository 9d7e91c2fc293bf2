//! # Tide Card Debug Renderer
//!
//! Renders a single tide card to a PNG file. Without `--request` it draws the
//! built-in sample card; with `--request FILE.json` it renders a JSON-encoded
//! `RenderRequest` produced by the chat bot glue.
//!
//! ```text
//! tide-card [--compact] [--request FILE.json] [--out FILE.png] [--config FILE.toml]
//! ```

use anyhow::{bail, Context};
use chrono::NaiveTime;
use std::env;
use std::fs;
use std::path::PathBuf;
use tide_card_lib::config::{Config, CONFIG_FILE};
use tide_card_lib::theme::{self, ConditionCode};
use tide_card_lib::{RenderRequest, TideCardRenderer, TideMark};
use tracing_subscriber::EnvFilter;

struct Args {
    compact: bool,
    request: Option<PathBuf>,
    out: PathBuf,
    config: PathBuf,
}

fn parse_args() -> anyhow::Result<Args> {
    let mut args = Args {
        compact: false,
        request: None,
        out: PathBuf::from("tide_report.png"),
        config: PathBuf::from(CONFIG_FILE),
    };

    let mut iter = env::args().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--compact" => args.compact = true,
            "--request" => args.request = Some(iter.next().context("--request needs a path")?.into()),
            "--out" => args.out = iter.next().context("--out needs a path")?.into(),
            "--config" => args.config = iter.next().context("--config needs a path")?.into(),
            other => bail!("unknown argument {other}"),
        }
    }
    Ok(args)
}

fn hm(hour: u32, minute: u32) -> anyhow::Result<NaiveTime> {
    NaiveTime::from_hms_opt(hour, minute, 0).context("invalid sample time")
}

fn sample_request(compact: bool) -> anyhow::Result<RenderRequest> {
    Ok(RenderRequest {
        header_label: "TODAY | 8 July".to_string(),
        spot_name: "São Pedro de Moel".to_string(),
        high_tide: TideMark {
            time: hm(17, 35)?,
            height: "3.5".to_string(),
        },
        low_tide: TideMark {
            time: hm(11, 8)?,
            height: "0.9".to_string(),
        },
        temperature: Some(22),
        condition: Some(ConditionCode(113)),
        is_today: true,
        compact,
    })
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = parse_args()?;
    let config = Config::load_from_path(&args.config);

    // Fail fast: no assets, no renders
    let renderer = TideCardRenderer::from_config(&config)
        .with_context(|| format!("loading assets from {}", config.assets.dir.display()))?;

    let mut request = match &args.request {
        Some(path) => {
            let json = fs::read_to_string(path)
                .with_context(|| format!("reading request {}", path.display()))?;
            serde_json::from_str::<RenderRequest>(&json)
                .with_context(|| format!("parsing request {}", path.display()))?
        }
        None => sample_request(args.compact)?,
    };
    request.compact |= args.compact;

    if let Some(code) = request.condition {
        match theme::theme(code) {
            Ok(t) => tracing::info!(
                condition = t.display_name,
                accent = %t.accent_hex(),
                "{} {}",
                t.symbol,
                request.spot_name
            ),
            Err(e) => tracing::warn!(error = %e, "Card will be rendered without a weather icon"),
        }
    }

    let png = renderer.render(&request)?;
    fs::write(&args.out, &png).with_context(|| format!("writing {}", args.out.display()))?;

    tracing::info!(
        out = %args.out.display(),
        bytes = png.len(),
        compact = request.compact,
        "Tide card written"
    );

    Ok(())
}
