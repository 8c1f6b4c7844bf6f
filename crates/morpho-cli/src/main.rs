use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use morpho_core::{LandmarkPoint, Report, MARKETS};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "morpho", about = "Facial anthropometrics and market-fit scoring")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a landmark file and print the report
    Analyze {
        /// JSON file holding an ordered array of {x, y, z?} landmark points
        file: PathBuf,
        /// Emit the full report as JSON instead of the summary view
        #[arg(long)]
        json: bool,
        /// Write the JSON report to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// List the built-in market profiles
    Markets,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    // Fail fast on a broken reference table before touching any input.
    morpho_core::validate_tables().context("reference tables failed validation")?;

    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze { file, json, output } => run_analyze(&file, json, output.as_deref()),
        Commands::Markets => {
            print!("{}", render_markets());
            Ok(())
        }
    }
}

fn run_analyze(file: &Path, json: bool, output: Option<&Path>) -> Result<()> {
    let data = std::fs::read_to_string(file)
        .with_context(|| format!("reading {}", file.display()))?;
    let landmarks: Vec<LandmarkPoint> = serde_json::from_str(&data)
        .context("landmark file must be a JSON array of {x, y, z?} points")?;
    tracing::info!(count = landmarks.len(), file = %file.display(), "landmarks loaded");

    let report = morpho_core::analyze(&landmarks)?;

    if let Some(path) = output {
        let body = serde_json::to_string_pretty(&report)?;
        std::fs::write(path, body).with_context(|| format!("writing {}", path.display()))?;
        println!("Report written to {}", path.display());
    } else if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", render_summary(&report));
    }
    Ok(())
}

fn render_summary(report: &Report) -> String {
    use std::fmt::Write;

    let mut out = String::new();
    let m = &report.metrics;

    let _ = writeln!(out, "Morphology");
    let fmt_opt = |v: Option<f64>| v.map(|v| format!("{v:.2}")).unwrap_or_else(|| "-".into());
    let _ = writeln!(out, "  fWHR:              {}", fmt_opt(m.fwhr));
    let _ = writeln!(
        out,
        "  Canthal tilt:      {}°",
        m.canthal_tilt.map(|v| format!("{v:.1}")).unwrap_or_else(|| "-".into())
    );
    let _ = writeln!(out, "  Jaw/cheek ratio:   {}", fmt_opt(m.jaw_to_cheek_ratio));
    let _ = writeln!(out, "  Mid/lower ratio:   {}", fmt_opt(m.mid_to_lower_ratio));
    let _ = writeln!(out, "  Phi ratio:         {}", fmt_opt(m.phi_ratio));
    let _ = writeln!(out, "  Eye spacing:       {}", fmt_opt(m.eye_spacing_ratio));
    let _ = writeln!(out, "  Mouth/nose ratio:  {}", fmt_opt(m.mouth_nose_ratio));
    let _ = writeln!(out, "  Symmetry:          {}", fmt_opt(m.symmetry));
    let _ = writeln!(
        out,
        "  Thirds:            {:.1}% / {:.1}% / {:.1}%",
        m.thirds.upper, m.thirds.mid, m.thirds.lower
    );

    let a = &report.analysis;
    let _ = writeln!(out, "Analysis");
    let _ = writeln!(out, "  Face shape:        {}", a.face_shape.as_str());
    let _ = writeln!(out, "  Eye tilt:          {}", a.eye_tilt.as_str());
    let _ = writeln!(out, "  Proportions:       {}", a.proportions.as_str());
    let _ = writeln!(out, "  Jawline:           {}", a.jawline.as_str());

    match &report.rarity {
        Some(r) => {
            let _ = writeln!(out, "Rarity: {:.1}/10 — {}", r.score, r.label.as_str());
            for d in &r.details {
                let _ = writeln!(
                    out,
                    "  {:<18} z = {:+.2}  {:.1}/10  {}",
                    d.trait_id,
                    d.z_score,
                    d.rarity,
                    d.label.as_str()
                );
            }
        }
        None => {
            let _ = writeln!(out, "Rarity: insufficient data");
        }
    }

    let _ = writeln!(out, "Market fit");
    for s in &report.market_fit {
        let _ = writeln!(out, "  {:<14} {:>3}%  ({})", s.market, s.score, s.description);
    }

    let _ = writeln!(out, "Potential (reduced puffiness)");
    for p in &report.potential {
        let _ = writeln!(
            out,
            "  {:<14} {:>3}% -> {:>3}%  ({:+})",
            p.market, p.current, p.potential, p.gain
        );
    }

    let _ = writeln!(
        out,
        "Overall: {}/100 — {}",
        report.overall.score,
        report.overall.label.as_str()
    );

    out
}

fn render_markets() -> String {
    use std::fmt::Write;

    let mut out = String::new();
    for market in &MARKETS {
        let _ = writeln!(out, "{} — {}", market.name, market.description);
        for (t, g) in market.traits {
            let _ = writeln!(out, "  {:<18} mean {:>6.3}  std {:>6.3}", t.name(), g.mean, g.std);
        }
    }
    out
}
