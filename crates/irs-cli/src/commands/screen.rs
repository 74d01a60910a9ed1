use crate::cli::ScreenArgs;
use crate::config::builder::build_config;
use crate::config::models::EngineSelection;
use crate::error::Result;
use crate::report;
use crate::ui::{CliProgressHandler, UiEvent};
use irsscreen::{
    core::io::results_csv::write_results_to_path,
    core::thermo::{
        cofold::CofoldOracle, nearest_neighbor::NearestNeighborOracle, oracle::BindingOracle,
    },
    engine::{cancel::CancellationToken, progress::ProgressReporter},
    workflows,
};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// 128 + SIGINT.
const INTERRUPT_EXIT_CODE: i32 = 130;

#[derive(Debug, PartialEq, Eq)]
enum InterruptAction {
    Cancel,
    Abort,
}

pub async fn run(args: ScreenArgs, ui_sender: mpsc::Sender<UiEvent>) -> Result<()> {
    info!("Building screening configuration...");
    let app_config = build_config(&args)?;
    debug!("Resolved configuration: {:?}", &app_config);

    let oracle = build_oracle(&app_config.engine, app_config.design.core_config.call_timeout);
    let mut rng = seeded_rng(app_config.design.seed);

    let cancel = CancellationToken::new();
    let signal_task = tokio::spawn(watch_interrupts(cancel.clone()));

    let progress_handler = CliProgressHandler::new(ui_sender);
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());

    println!("Screening IRS candidates for target {}...", app_config.target);
    info!("Invoking the screening workflow with engine '{}'.", oracle.name());

    let outcome = tokio::task::block_in_place(|| {
        workflows::screen::run(
            &app_config.target,
            &app_config.design.core_config,
            Arc::clone(&oracle),
            &mut rng,
            &reporter,
            &cancel,
        )
    });
    signal_task.abort();
    let ranked = outcome?;

    info!("Workflow finished with {} ranked result(s).", ranked.len());
    report::write_ranking_table(&mut std::io::stdout().lock(), &ranked, app_config.top_n)?;

    if let Some(path) = &app_config.output_path {
        write_results_to_path(&ranked, path)?;
        info!("Exported {} result(s) to {:?}", ranked.len(), path);
        println!("\nAll results saved to {}", path.display());
    }

    Ok(())
}

/// The first interrupt requests a cooperative stop; a second one aborts the process, since a
/// running oracle call cannot observe the cancellation flag.
fn on_interrupt(cancel: &CancellationToken) -> InterruptAction {
    if cancel.is_cancelled() {
        InterruptAction::Abort
    } else {
        cancel.cancel();
        InterruptAction::Cancel
    }
}

async fn watch_interrupts(cancel: CancellationToken) {
    while tokio::signal::ctrl_c().await.is_ok() {
        match on_interrupt(&cancel) {
            InterruptAction::Cancel => warn!(
                "Interrupt received; stopping after the current candidate. Press Ctrl-C again to abort."
            ),
            InterruptAction::Abort => {
                eprintln!("\nAborted by second interrupt.");
                std::process::exit(INTERRUPT_EXIT_CODE);
            }
        }
    }
}

pub(crate) fn seeded_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => {
            debug!("Using fixed RNG seed {}.", seed);
            StdRng::seed_from_u64(seed)
        }
        None => StdRng::from_entropy(),
    }
}

fn build_oracle(
    engine: &EngineSelection,
    call_timeout: Option<Duration>,
) -> Arc<dyn BindingOracle> {
    match engine {
        EngineSelection::NearestNeighbor => Arc::new(NearestNeighborOracle::new()),
        EngineSelection::Cofold { executable } => {
            Arc::new(CofoldOracle::new(executable.clone()).with_timeout(call_timeout))
        }
    }
}
