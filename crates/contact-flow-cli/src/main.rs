use std::io::{self, BufRead, Write};
use std::time::Duration;

use anyhow::{Context, Result, bail};
use clap::Parser;
use contact_flow::{
    AUTO_ADVANCE_DELAY, Field, Phase, Reason, SubmissionGateway, WizardController, WizardView,
    build_view, render_text,
};
use contact_flow_gateway::{GatewayConfig, HttpGateway};
use tracing::debug;
use tracing_subscriber::EnvFilter;
use url::Url;

#[derive(Parser, Debug)]
#[command(
    name = "contact-flow",
    about = "Guided contact form for the site",
    version
)]
struct Cli {
    /// Messaging endpoint receiving the submission.
    #[arg(
        long,
        value_name = "URL",
        default_value = "https://example.dev/api/contact"
    )]
    endpoint: Url,

    /// Request timeout in seconds.
    #[arg(long, value_name = "SECONDS", default_value_t = 30)]
    timeout: u64,

    /// Sender name (non-interactive mode).
    #[arg(long)]
    name: Option<String>,

    /// Sender email (non-interactive mode).
    #[arg(long)]
    email: Option<String>,

    /// Reason identifier (non-interactive mode).
    #[arg(long)]
    reason: Option<String>,

    /// Message body (non-interactive mode).
    #[arg(long)]
    message: Option<String>,

    /// Log wizard transitions to stderr.
    #[arg(long, short)]
    verbose: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(io::stderr)
        .init();
    let config = GatewayConfig::new(cli.endpoint.clone())
        .with_timeout(Duration::from_secs(cli.timeout));
    let gateway = HttpGateway::new(config).context("building submission client")?;
    let mut wizard = WizardController::new();

    if let (Some(name), Some(email), Some(reason), Some(message)) =
        (&cli.name, &cli.email, &cli.reason, &cli.message)
    {
        return run_scripted(&mut wizard, &gateway, name, email, reason, message).await;
    }

    run_interactive(&mut wizard, &gateway).await
}

/// Submits a single record assembled from flags; no prompts.
async fn run_scripted(
    wizard: &mut WizardController,
    gateway: &dyn SubmissionGateway,
    name: &str,
    email: &str,
    reason: &str,
    message: &str,
) -> Result<()> {
    let reason = Reason::from_id(reason)
        .with_context(|| format!("unknown reason '{reason}'"))?;

    wizard.edit_field(Field::Name, name);
    step_forward(wizard)?;
    wizard.edit_field(Field::Email, email);
    step_forward(wizard)?;
    let ticket = wizard
        .select_reason(reason)
        .context("reason step not active")?;
    wizard.fire_auto_advance(ticket);
    wizard.edit_field(Field::Message, message);

    if let Err(rejected) = wizard.submit(gateway).await {
        for error in &rejected.report.errors {
            eprintln!("{}: {}", error.field.id(), error.message);
        }
        bail!("record failed validation");
    }

    println!("{}", render_text(&build_view(wizard)));
    match wizard.phase() {
        Phase::Error { reason } => bail!("submission failed: {reason}"),
        _ => Ok(()),
    }
}

fn step_forward(wizard: &mut WizardController) -> Result<()> {
    if let Err(error) = wizard.advance() {
        bail!("{}: {}", error.field.id(), error.message);
    }
    Ok(())
}

/// Drives the wizard over stdin until the user quits from a terminal screen.
async fn run_interactive(
    wizard: &mut WizardController,
    gateway: &dyn SubmissionGateway,
) -> Result<()> {
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        println!("{}", render_text(&build_view(wizard)));

        match build_view(wizard) {
            WizardView::Step(step) => {
                let Some(input) = prompt(&mut lines)? else {
                    return Ok(());
                };
                match input.as_str() {
                    "/back" => wizard.retreat(),
                    "/quit" => return Ok(()),
                    _ => handle_step_input(wizard, gateway, step.step, &input).await,
                }
            }
            WizardView::Pending => {
                // Submission is awaited inline; this screen never prompts.
            }
            WizardView::Success(_) => {
                let Some(input) = prompt(&mut lines)? else {
                    return Ok(());
                };
                match input.as_str() {
                    "send_another" | "s" => wizard.close(),
                    _ => return Ok(()),
                }
            }
            WizardView::Error(_) => {
                let Some(input) = prompt(&mut lines)? else {
                    return Ok(());
                };
                match input.as_str() {
                    "retry" | "r" => wizard.retry(),
                    "close" | "c" => wizard.close(),
                    _ => return Ok(()),
                }
            }
        }
    }
}

async fn handle_step_input(
    wizard: &mut WizardController,
    gateway: &dyn SubmissionGateway,
    step: Field,
    input: &str,
) {
    match step {
        Field::Reason => {
            let selected = input
                .parse::<usize>()
                .ok()
                .and_then(|number| Reason::ALL.get(number.saturating_sub(1)).copied())
                .or_else(|| Reason::from_id(input.trim()));
            match selected {
                Some(reason) => {
                    if let Some(ticket) = wizard.select_reason(reason) {
                        // Merged selection/confirmation: fire after the delay.
                        tokio::time::sleep(AUTO_ADVANCE_DELAY).await;
                        wizard.fire_auto_advance(ticket);
                    }
                }
                None => {
                    wizard.edit_field(Field::Reason, input);
                    let _ = wizard.advance();
                }
            }
        }
        Field::Message => {
            wizard.edit_field(Field::Message, input);
            if let Err(rejected) = wizard.submit(gateway).await {
                debug!(failures = rejected.report.errors.len(), "submit rejected");
            }
        }
        _ => {
            wizard.edit_field(step, input);
            let _ = wizard.advance();
        }
    }
}

fn prompt<B: BufRead>(lines: &mut io::Lines<B>) -> Result<Option<String>> {
    print!("> ");
    io::stdout().flush().context("flushing prompt")?;
    match lines.next() {
        Some(line) => Ok(Some(line.context("reading input")?.trim().to_string())),
        None => Ok(None),
    }
}
