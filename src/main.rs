use punchline::cli::{
    build_input, parse_args, resolve_config, CliCommand, ExplainArgs, USAGE, VERSION,
};
use punchline::reveal::RevealState;
use punchline::{ExplainerConfig, ExplanationClient, LifecyclePhase, RequestLifecycle, RevealScheduler};

use color_eyre::eyre::WrapErr;
use color_eyre::Result;
use tokio::io::{AsyncWriteExt, Stdout};
use tokio::sync::watch;
use tracing_subscriber::EnvFilter;

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Write each newly revealed slice of the current reveal to stdout.
async fn follow_reveal(
    mut rx: watch::Receiver<RevealState>,
    generation: u64,
    out: &mut Stdout,
) -> std::io::Result<()> {
    let mut printed = 0;
    loop {
        let state = rx.borrow_and_update().clone();
        if state.generation() == generation {
            let visible = state.visible();
            if visible.len() > printed {
                out.write_all(visible[printed..].as_bytes()).await?;
                out.flush().await?;
                printed = visible.len();
            }
            if !state.is_active() {
                return Ok(());
            }
        }
        if rx.changed().await.is_err() {
            return Ok(());
        }
    }
}

async fn run(args: ExplainArgs) -> Result<bool> {
    let config = resolve_config(ExplainerConfig::from_env(), &args);
    tracing::debug!(base_url = %config.base_url, "Using explanation service");

    let input = build_input(&config, &args)
        .await
        .wrap_err("Failed to read image")?;

    let mut scheduler = RevealScheduler::from_config(&config);
    let mut lifecycle = RequestLifecycle::new(ExplanationClient::new(config));

    if lifecycle.submit(&input).is_some() {
        eprintln!("Explaining...");
    }

    let phase = lifecycle.settle().await.clone();
    match phase {
        LifecyclePhase::Success(explanation) => {
            let mut out = tokio::io::stdout();
            let rx = scheduler.subscribe();
            let handle = scheduler.start(explanation.explanation);

            tokio::select! {
                result = follow_reveal(rx, handle.generation(), &mut out) => result?,
                _ = tokio::signal::ctrl_c() => {
                    scheduler.stop();
                    let state = scheduler.state();
                    tracing::debug!(emitted = state.emitted_len(), "Reveal interrupted");
                }
            }

            let model = explanation.model.as_deref().unwrap_or("unknown model");
            out.write_all(format!("\n[{} · {}]\n", model, explanation.language).as_bytes())
                .await?;
            out.flush().await?;
            Ok(true)
        }
        LifecyclePhase::Error { message } => {
            eprintln!("{}", message);
            Ok(false)
        }
        LifecyclePhase::Idle | LifecyclePhase::Loading => Ok(false),
    }
}

fn main() -> Result<()> {
    let command = match parse_args(std::env::args()) {
        Ok(command) => command,
        Err(e) => {
            eprintln!("{}\n\n{}", e, USAGE);
            std::process::exit(2);
        }
    };

    let args = match command {
        CliCommand::Version => {
            println!("punchline {}", VERSION);
            return Ok(());
        }
        CliCommand::Help => {
            println!("{}", USAGE);
            return Ok(());
        }
        CliCommand::Explain(args) => args,
    };

    color_eyre::install()?;
    init_tracing(args.verbose);

    let runtime = tokio::runtime::Runtime::new()?;
    let succeeded = runtime.block_on(run(args))?;

    if !succeeded {
        std::process::exit(1);
    }
    Ok(())
}
