//! Attune CLI
//!
//! Usage:
//!   attune --text "your text here"             # Single evaluation
//!   attune --interactive                       # Interactive session
//!   attune --serve                             # HTTP API server
//!   attune --text "text" --reading hr.json     # With a wearable reading
//!   attune --text "text" --json                # JSON output

use clap::Parser;
use colored::Colorize;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use attune::core::{run_server, BiometricProvider, Engine, NoBiometrics, StaticProvider};
use attune::types::{CommunicationStyle, Evaluation, HistoryTurn, NervousState};
use attune::{AttuneError, EngineConfig, VERSION};

/// User id used for CLI sessions
const CLI_USER: &str = "cli";

#[derive(Parser, Debug)]
#[command(
    name = "attune",
    version = VERSION,
    about = "Attune - classify nervous-system state, catch crisis language, compose model instructions",
    long_about = "Attune turns a message (and optionally a wearable reading) into a\n\
                  fused nervous-system state, a crisis flag, a response mode and the\n\
                  instruction block for a downstream text-generation call.\n\n\
                  Modes:\n  \
                  --text         Single evaluation\n  \
                  --interactive  Line-by-line session with history\n  \
                  --serve        HTTP API server mode\n\n\
                  States:\n  \
                  calm       - Settled\n  \
                  activated  - Mobilized, on alert\n  \
                  shutdown   - Low energy, withdrawn"
)]
struct Args {
    /// Text to evaluate (single mode)
    #[arg(short, long)]
    text: Option<String>,

    /// Interactive mode - read lines from stdin
    #[arg(short, long)]
    interactive: bool,

    /// Run as HTTP API server
    #[arg(short, long)]
    serve: bool,

    /// Server address
    #[arg(long, default_value = "127.0.0.1:3000")]
    addr: String,

    /// Wearable reading as JSON: a reading, or { "reading": ..., "history": [...] }
    #[arg(long)]
    reading: Option<PathBuf>,

    /// Preferred register: gentle, balanced or direct
    #[arg(long)]
    style: Option<CommunicationStyle>,

    /// TOML file with calibration thresholds
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output as JSON
    #[arg(long)]
    json: bool,

    /// Disable colors in output
    #[arg(long)]
    no_color: bool,

    /// Show signal and biometric breakdown plus the composed instruction
    #[arg(long)]
    verbose: bool,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    if args.no_color {
        colored::control::set_override(false);
    }

    let engine = match build_engine(&args) {
        Ok(engine) => engine,
        Err(e) => {
            eprintln!("{} {}", "error:".red().bold(), e);
            std::process::exit(1);
        }
    };

    if args.serve {
        run_serve(&args, engine).await;
    } else if args.interactive {
        run_interactive(&args, &engine);
    } else if let Some(ref text) = args.text {
        run_single(text, &args, &engine);
    } else {
        // Default to interactive if no mode specified
        run_interactive(&args, &engine);
    }
}

/// Load config and the optional reading file into an engine
fn build_engine(args: &Args) -> Result<Engine, AttuneError> {
    let config = EngineConfig::load(args.config.as_deref())?;
    let provider: Arc<dyn BiometricProvider> = match &args.reading {
        Some(path) => Arc::new(StaticProvider::from_json_file(path)?),
        None => Arc::new(NoBiometrics),
    };
    Ok(Engine::with_provider(config, provider))
}

/// Run single text evaluation
fn run_single(text: &str, args: &Args, engine: &Engine) {
    let evaluation = engine.evaluate_for_user(CLI_USER, text, &[], args.style);
    print_evaluation(&evaluation, args);
}

/// Run interactive mode; history lives only for the session
fn run_interactive(args: &Args, engine: &Engine) {
    print_header(args.no_color);
    println!("Type a message and press Enter. Type 'quit' to exit.");
    println!();

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut history: Vec<HistoryTurn> = Vec::new();

    loop {
        print!("{} ", ">".bold());
        if stdout.flush().is_err() {
            break;
        }

        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) => break,
            Ok(_) => {}
            Err(_) => break,
        }

        let line = line.trim();
        if line.eq_ignore_ascii_case("quit") || line.eq_ignore_ascii_case("exit") {
            println!("\nSession ended. Messages: {}", history.len());
            break;
        }
        if line.is_empty() {
            continue;
        }

        let evaluation = engine.evaluate_for_user(CLI_USER, line, &history, args.style);
        print_evaluation(&evaluation, args);
        history.push(HistoryTurn::user(line));
    }
}

fn print_evaluation(evaluation: &Evaluation, args: &Args) {
    if args.json {
        match serde_json::to_string_pretty(evaluation) {
            Ok(json) => println!("{}", json),
            Err(e) => eprintln!("{} {}", "error:".red().bold(), e),
        }
    } else if args.verbose {
        print_verbose(evaluation, args.no_color);
    } else if args.no_color {
        println!("{}", evaluation.to_parseable_string());
    } else {
        println!("{}", evaluation.to_terminal_string());
    }

    if evaluation.crisis.is_crisis && !args.json {
        println!("{}", "  ⚠ Crisis language detected - crisis resources instruction issued".red());
    }
}

/// Print header
fn print_header(no_color: bool) {
    let title = format!("Attune v{} - Interactive", VERSION);
    if no_color {
        println!("========================================");
        println!("  {}", title);
        println!("========================================");
    } else {
        println!("{}", "╔══════════════════════════════════════════╗".bold());
        println!("{}", format!("║  {:<40}║", title).bold());
        println!("{}", "╚══════════════════════════════════════════╝".bold());
    }
    println!();
}

/// Print verbose output
fn print_verbose(evaluation: &Evaluation, no_color: bool) {
    let color = if no_color { "" } else { evaluation.fused.state.color_code() };
    let reset = if no_color { "" } else { NervousState::color_reset() };

    println!("{}┌──────────────────────────────────────┐{}", color, reset);
    println!(
        "{}│ crisis = {} ({}%){}",
        color, evaluation.crisis.is_crisis, evaluation.crisis.confidence, reset
    );
    for phrase in &evaluation.crisis.trigger_phrases {
        println!("{}│   trigger: {}{}", color, phrase, reset);
    }
    println!("{}├──────────────────────────────────────┤{}", color, reset);
    println!("{}│ Signals:{}", color, reset);
    if evaluation.signals.is_empty() {
        println!("{}│   (none){}", color, reset);
    }
    for signal in &evaluation.signals {
        println!("{}│   {:<22} {:>3}{}", color, signal.category, signal.intensity, reset);
        if !signal.body_signals.is_empty() {
            println!("{}│     body: {}{}", color, signal.body_signals.join(", "), reset);
        }
    }
    println!("{}├──────────────────────────────────────┤{}", color, reset);
    println!(
        "{}│ Biometric: {} ({}%) trend={:?}{}",
        color, evaluation.biometric.state, evaluation.biometric.confidence, evaluation.biometric.trend, reset
    );
    for indicator in &evaluation.biometric.indicators {
        println!("{}│   {}{}", color, indicator, reset);
    }
    println!("{}├──────────────────────────────────────┤{}", color, reset);
    println!(
        "{}│ Fused: {} ({:.1}%) via {}{}",
        color, evaluation.fused.state, evaluation.fused.confidence, evaluation.fused.method, reset
    );
    for blended in &evaluation.fused.blended_states {
        println!("{}│   also {} ({}){}", color, blended.state, blended.intensity, reset);
    }
    println!("{}│ Mode: {}{}", color, evaluation.mode, reset);
    println!("{}└──────────────────────────────────────┘{}", color, reset);
    println!();
    println!("{}", evaluation.instruction);
}

/// Run HTTP API server
async fn run_serve(args: &Args, engine: Engine) {
    println!();
    println!("🌿 Attune API Server v{}", VERSION);
    println!();

    if let Err(e) = run_server(&args.addr, engine).await {
        eprintln!("Server error: {}", e);
        std::process::exit(1);
    }
}

