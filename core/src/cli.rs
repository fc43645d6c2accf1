use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use crate::config::{parse_threshold, Settings};
use crate::error::ConfigError;
use crate::geodesy::DistanceModel;
use crate::gpx::read_gpx_file;
use crate::metrics::summarize;
use crate::report::{render_table, write_report_file, ReportFormat};
use crate::segmenter::{PeakHeartRate, Segmenter};
use crate::storage::{load_settings, save_settings};

pub const WARMUP_PROMPT: &str = "Enter warm-up distance in Meters: ";
pub const TRAINING_PROMPT: &str = "Enter training distance in Meters: ";

#[derive(Parser, Debug, Default)]
#[command(name = "intervalsplit")]
#[command(about = "Deler en GPX-økt i oppvarming, drag og pauser etter distanse", long_about = None)]
pub struct Args {
    /// GPX-fil (default: input.gpx)
    pub input: Option<PathBuf>,

    /// Rapportfil (default: interval_data.csv)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Oppvarmingsdistanse i meter (0 = ingen oppvarming)
    #[arg(short = 'w', long = "warmup")]
    pub warmup: Option<String>,

    /// Distanse per drag/pause i meter
    #[arg(short = 't', long = "training")]
    pub training: Option<String>,

    /// Innstillinger (JSON)
    #[arg(short = 'c', long = "config")]
    pub config: Option<PathBuf>,

    #[arg(long, value_enum)]
    pub distance_model: Option<DistanceModel>,

    #[arg(long = "peak-hr", value_enum)]
    pub peak_hr: Option<PeakHeartRate>,

    /// Terskel 0 gir et (nesten) tomt oppvarmingsintervall i stedet for ingen
    #[arg(long)]
    pub emit_zero_warmup: bool,

    #[arg(long, value_enum)]
    pub format: Option<ReportFormat>,

    /// Ikke spør etter manglende terskler, feil i stedet
    #[arg(long)]
    pub no_prompt: bool,

    /// Lagre de endelige innstillingene hit
    #[arg(long)]
    pub save_config: Option<PathBuf>,

    #[arg(short, long)]
    pub verbose: bool,
}

pub fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default))
        .format(|buf, record| writeln!(buf, "[{:5}] {}", record.level(), record.args()))
        .try_init();
}

/// Flagg > fil > spørsmål i terminalen (bare tersklene).
pub fn resolve_settings<R: BufRead, W: Write>(
    args: &Args,
    mut settings: Settings,
    input: &mut R,
    out: &mut W,
) -> Result<Settings, ConfigError> {
    if let Some(p) = &args.input {
        settings.input = p.clone();
    }
    if let Some(p) = &args.output {
        settings.output = p.clone();
    }
    if let Some(raw) = &args.warmup {
        settings.warmup_threshold_m = Some(parse_threshold("warm-up", raw)?);
    }
    if let Some(raw) = &args.training {
        settings.training_threshold_m = Some(parse_threshold("training", raw)?);
    }
    if let Some(m) = args.distance_model {
        settings.distance_model = m;
    }
    if let Some(p) = args.peak_hr {
        settings.peak_heart_rate = p;
    }
    if args.emit_zero_warmup {
        settings.emit_zero_warmup = true;
    }
    if let Some(f) = args.format {
        settings.format = f;
    }

    if settings.warmup_threshold_m.is_none() {
        if args.no_prompt {
            return Err(ConfigError::MissingThreshold("warm-up"));
        }
        settings.warmup_threshold_m = Some(prompt_threshold("warm-up", WARMUP_PROMPT, input, out)?);
    }
    if settings.training_threshold_m.is_none() {
        if args.no_prompt {
            return Err(ConfigError::MissingThreshold("training"));
        }
        settings.training_threshold_m = Some(prompt_threshold("training", TRAINING_PROMPT, input, out)?);
    }
    Ok(settings)
}

fn prompt_threshold<R: BufRead, W: Write>(
    name: &'static str,
    prompt: &str,
    input: &mut R,
    out: &mut W,
) -> Result<u32, ConfigError> {
    let stdin_err = |source| ConfigError::Io { path: PathBuf::from("<stdin>"), source };
    out.write_all(prompt.as_bytes()).map_err(stdin_err)?;
    out.flush().map_err(stdin_err)?;
    let mut line = String::new();
    if input.read_line(&mut line).map_err(stdin_err)? == 0 {
        return Err(ConfigError::MissingThreshold(name));
    }
    parse_threshold(name, &line)
}

pub fn run(args: Args) -> Result<()> {
    let base = match &args.config {
        Some(path) => load_settings(path).with_context(|| format!("innstillinger {}", path.display()))?,
        None => Settings::default(),
    };
    let stdin = io::stdin();
    let settings = resolve_settings(&args, base, &mut stdin.lock(), &mut io::stdout())?;
    if let Some(path) = &args.save_config {
        save_settings(&settings, path)?;
    }

    let segmenter = Segmenter::new(settings.segmenter_config()?)?;
    let points = read_gpx_file(&settings.input)
        .with_context(|| format!("kunne ikke lese {}", settings.input.display()))?;
    let intervals = segmenter
        .run(&points)
        .with_context(|| format!("segmentering av {} feilet", settings.input.display()))?;

    write_report_file(&settings.output, &intervals, settings.format)?;

    let summary = summarize(&intervals);
    info!(
        "{} intervaller: {} drag, {} pauser, oppvarming={}, snittpace drag {}",
        summary.intervals, summary.training_reps, summary.breaks, summary.warmup, summary.avg_training_pace
    );

    println!("--- Intervallrapport ---");
    print!("{}", render_table(&intervals));
    println!("Interval data extracted and saved to {}", settings.output.display());
    Ok(())
}
