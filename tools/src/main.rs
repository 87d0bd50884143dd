//! sentinel-runner: headless driver for the DEI Sentinel metrics provider.
//!
//! Usage:
//!   sentinel-runner --archetype diabetes --segment race --data-dir ./data
//!   sentinel-runner --seed 7 --ipc-mode

use anyhow::Result;
use sentinel_core::{
    archetype::ArchetypeId,
    command::DashboardCommand,
    config::DashboardConfig,
    equity::AnalysisSegment,
    session::Session,
    snapshot::DashboardSnapshot,
};
use std::env;
use std::io::{self, BufRead, Write};

#[derive(serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum IpcRequest {
    GetState,
    Command { command: DashboardCommand },
    Quit,
}

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let ipc_mode = args.iter().any(|a| a == "--ipc-mode");
    let data_dir = flag_value(&args, "--data-dir").unwrap_or("./data");

    let mut config = DashboardConfig::load(data_dir)?;
    if let Some(seed) = flag_value(&args, "--seed") {
        config.scatter.seed = seed
            .parse()
            .map_err(|e| anyhow::anyhow!("Invalid --seed '{seed}': {e}"))?;
    }

    let mut session = Session::new(config);

    if let Some(key) = flag_value(&args, "--archetype") {
        let archetype: ArchetypeId = key.parse()?;
        session.apply(&DashboardCommand::SelectArchetype { archetype })?;
    }
    if let Some(key) = flag_value(&args, "--segment") {
        let segment: AnalysisSegment = key.parse()?;
        session.apply(&DashboardCommand::SelectSegment { segment })?;
    }

    if ipc_mode {
        let stdin = io::stdin();
        let stdout = io::stdout();
        run_ipc_loop(&mut session, stdin.lock(), stdout.lock())?;
    } else {
        println!("DEI Sentinel - sentinel-runner");
        println!("  data_dir:  {data_dir}");
        println!("  session:   {}", session.id);
        println!();
        print_summary(&session.snapshot()?);
    }

    Ok(())
}

/// One JSON request per line in, one JSON response per line out.
/// Malformed requests and rejected input answer with {"error": ...}
/// and the loop carries on.
fn run_ipc_loop<R: BufRead, W: Write>(session: &mut Session, mut input: R, mut output: W) -> Result<()> {
    let mut buffer = String::new();

    loop {
        buffer.clear();
        let bytes_read = input.read_line(&mut buffer)?;
        if bytes_read == 0 {
            break; // EOF
        }
        if buffer.trim().is_empty() {
            continue;
        }

        let request: IpcRequest = match serde_json::from_str(&buffer) {
            Ok(r) => r,
            Err(e) => {
                write_error(&mut output, &e.to_string())?;
                continue;
            }
        };

        match request {
            IpcRequest::Quit => break,
            IpcRequest::GetState => write_snapshot(session, &mut output)?,
            IpcRequest::Command { command } => match session.apply(&command) {
                Ok(()) => write_snapshot(session, &mut output)?,
                Err(e) if e.is_invalid_input() => write_error(&mut output, &e.to_string())?,
                Err(e) => return Err(e.into()),
            },
        }
        output.flush()?;
    }
    Ok(())
}

fn write_snapshot<W: Write>(session: &mut Session, output: &mut W) -> Result<()> {
    match session.snapshot() {
        Ok(snapshot) => writeln!(output, "{}", snapshot.to_json()?)?,
        Err(e) if e.is_invalid_input() => write_error(output, &e.to_string())?,
        Err(e) => return Err(e.into()),
    }
    Ok(())
}

fn write_error<W: Write>(output: &mut W, message: &str) -> Result<()> {
    let err_json = serde_json::json!({ "error": message });
    writeln!(output, "{err_json}")?;
    output.flush()?;
    Ok(())
}

fn print_summary(s: &DashboardSnapshot) {
    println!("=== STRATEGIC VIEW ===");
    println!("  archetype:          {}", s.archetype.name);
    println!("  waste / latency / fragmentation: {:.1} / {:.1} / {:.1}",
        s.archetype.waste_score, s.archetype.latency_score, s.archetype.fragmentation_score);
    println!("  projected waste:    ${:.0} / patient", s.archetype.projected_waste_per_patient_usd);
    println!("  efficiency gap:     ${:.0} / patient", s.archetype.per_patient_efficiency_gap_usd);

    println!();
    println!("=== PATIENT JOURNEY #{} ===", s.patient_id);
    for e in &s.timeline {
        let marker = if e.is_shadow { "shadow" } else { "DIAGNOSIS" };
        println!("  {} | {:<45} | ${:>8.2} | {marker}", e.date, e.description, e.cost_usd);
    }
    println!("  total shadow cost:  ${:.2}", s.shadow_cost_usd);
    println!("  diagnostic latency: {} days ({} → {})", s.latency.days, s.latency.start, s.latency.end);

    println!();
    println!("=== EQUITY GAPS ({}) ===", s.segment);
    for g in &s.equity_gaps {
        println!(
            "  {:<10} vs {:<8} {:>+4} days ({:+.1}%)",
            g.group, g.baseline, g.gap_days, g.percent_gap
        );
    }

    println!();
    println!("=== EFFICIENCY SCATTER ===");
    println!("  samples:   {}", s.scatter_count);
    println!("  slope:     {:.2}", s.regression.slope);
    println!("  intercept: {:.2}", s.regression.intercept);
    println!("  R²:        {:.4}", s.regression.r_squared);
    let [lo, hi] = s.trend_line;
    println!("  trend:     ${:.0} at {:.1} → ${:.0} at {:.1}",
        lo.total_cost_usd, lo.dei_score, hi.total_cost_usd, hi.dei_score);

    println!();
    println!("=== ROI SIMULATOR (cohort {} / archetype) ===", s.cohort_size_per_archetype);
    for l in &s.levers {
        println!("  {:<28} {:>5.1}%  ({})", l.label, l.percent, l.archetype);
    }
    println!("  projected savings:  ${:.0}", s.projected_savings_usd);
    println!("  addressable waste:  ${:.0}", s.addressable_waste_usd);
}

fn flag_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == flag)
        .map(|w| w[1].as_str())
}
