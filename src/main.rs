use anyhow::{anyhow, bail, Context, Result};
use clap::{Parser, Subcommand};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use council_copy::adapters::{
    HttpCopyGenerator, HttpCopyGeneratorConfig, InMemoryUsageTracker, MockCopyGenerator,
};
use council_copy::application::{GenerationEngine, WorkflowController};
use council_copy::config::{AppConfig, GenerationConfig, TelemetryConfig};
use council_copy::domain::copy::{quality_gate, ExportArtifact, SectionMap};
use council_copy::domain::council::{CouncilCatalog, CouncilMemberId, SelectionChange};
use council_copy::domain::foundation::UserId;
use council_copy::domain::guidance::CheckOutcome;
use council_copy::domain::membership::SubscriptionTier;
use council_copy::domain::workflow::{BriefField, CampaignBrief, HardExport, WorkflowStep};
use council_copy::ports::CopyGenerator;

#[derive(Parser, Debug)]
#[command(name = "council-copy", version, about = "Staged sales-copy generation with an advisory council")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run one session from a JSON brief through to export
    Run(RunArgs),
    /// List the council personas
    Council,
    /// Run the quality gate over a JSON copy file
    Check {
        /// Path to a JSON object with hook, problem, story, proof, offer and cta
        path: PathBuf,
    },
}

#[derive(Parser, Debug)]
struct RunArgs {
    /// Brief file: campaign fields, optional `businessModel` and
    /// `competitorAnalysis` notes, and a `council` array of persona ids
    #[arg(long, value_name = "PATH")]
    brief: PathBuf,

    /// Directory for exported files (stdout when omitted)
    #[arg(long, value_name = "DIR")]
    out: Option<PathBuf>,

    /// Tier for the local usage tracker (overrides configuration)
    #[arg(long)]
    tier: Option<SubscriptionTier>,

    /// User the session runs as
    #[arg(long, default_value = "local")]
    user: String,

    /// Use canned copy instead of the generation service
    #[arg(long)]
    offline: bool,

    /// Skip the guidance checks instead of confirming them
    #[arg(long)]
    skip_guidance: bool,

    /// Also export the hook as CSV
    #[arg(long)]
    hooks_csv: bool,
}

#[derive(Debug, Deserialize)]
struct BriefFile {
    #[serde(flatten)]
    brief: CampaignBrief,
    #[serde(default)]
    council: Vec<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = AppConfig::load().context("failed to load configuration")?;
    config.validate().context("invalid configuration")?;
    init_tracing(&config.telemetry);

    match cli.command {
        Commands::Run(args) => run_session(&config, args).await,
        Commands::Council => {
            list_council();
            Ok(())
        }
        Commands::Check { path } => check_copy(&path),
    }
}

fn init_tracing(telemetry: &TelemetryConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&telemetry.log_filter));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);

    if telemetry.json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn build_generator(config: &GenerationConfig, offline: bool) -> Result<Arc<dyn CopyGenerator>> {
    if offline || config.offline {
        tracing::info!("using offline copy generator");
        return Ok(Arc::new(MockCopyGenerator::new()));
    }

    let mut http = HttpCopyGeneratorConfig::new(&config.base_url).with_endpoint(&config.endpoint);
    if let Some(key) = &config.api_key {
        http = http.with_api_key(key.clone());
    }
    if let Some(timeout) = config.timeout() {
        http = http.with_timeout(timeout);
    }
    Ok(Arc::new(HttpCopyGenerator::new(http)?))
}

async fn run_session(config: &AppConfig, args: RunArgs) -> Result<()> {
    let raw = std::fs::read_to_string(&args.brief)
        .with_context(|| format!("failed to read brief {}", args.brief.display()))?;
    let brief_file: BriefFile = serde_json::from_str(&raw)
        .with_context(|| format!("failed to parse brief {}", args.brief.display()))?;

    let mut engine = GenerationEngine::new(build_generator(&config.generation, args.offline)?);
    if let Some(timeout) = config.generation.timeout() {
        engine = engine.with_timeout(timeout);
    }
    let usage = Arc::new(InMemoryUsageTracker::new(
        args.tier.unwrap_or(config.usage.default_tier),
        config.usage.reset_window_days,
    ));
    let user_id = UserId::new(args.user)?;
    let mut controller = WorkflowController::new(
        user_id,
        Arc::new(engine),
        usage,
        config.workflow.max_council_selections,
    )?;

    controller.next();
    for id in &brief_file.council {
        let id = CouncilMemberId::new(id.as_str())?;
        if let SelectionChange::Ignored(reason) = controller.toggle_council_member(&id) {
            tracing::warn!(member = %id, ?reason, "council member not seated");
        }
    }
    advance(&mut controller)?;

    for field in BriefField::ALL {
        controller.set_field(field, brief_file.brief.get(field));
    }
    controller.set_brief_notes(
        brief_file.brief.business_model.clone(),
        brief_file.brief.competitor_analysis.clone(),
    );
    advance(&mut controller)?;

    controller.generate().await?;
    advance(&mut controller)?;

    for event in controller.take_events() {
        tracing::debug!(?event, "session event");
    }

    if args.skip_guidance {
        controller.skip_guidance()?;
    } else {
        while !controller.session().guidance().all_checks_complete() {
            controller.record_guidance(CheckOutcome::Valid)?;
        }
    }

    let preview = controller.soft_export()?;
    match controller.hard_export()? {
        HardExport::Ready(artifact) => emit(&artifact, args.out.as_deref())?,
        HardExport::Blocked { warnings } => {
            println!("{}", preview.content);
            for warning in &warnings {
                eprintln!("quality: {}", warning);
            }
            bail!("download blocked by {} quality warning(s)", warnings.len());
        }
    }

    if args.hooks_csv {
        let artifact = controller.export_hooks_csv().await?;
        emit(&artifact, args.out.as_deref())?;
    }

    let quota = controller.quota_status().await?;
    eprintln!(
        "{} tier: {} used, {} remaining ({:.0}%)",
        quota.tier, quota.used, quota.remaining, quota.percent
    );
    Ok(())
}

fn advance(controller: &mut WorkflowController) -> Result<WorkflowStep> {
    let transition = controller.next();
    match transition.blocked_reason() {
        None => Ok(controller.step()),
        Some(reason) => Err(anyhow!(
            "cannot leave {}: {:?}",
            controller.step(),
            reason
        )),
    }
}

fn emit(artifact: &ExportArtifact, out: Option<&Path>) -> Result<()> {
    match out {
        Some(dir) => {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("failed to create {}", dir.display()))?;
            let path = dir.join(&artifact.file_name);
            std::fs::write(&path, &artifact.content)
                .with_context(|| format!("failed to write {}", path.display()))?;
            eprintln!("wrote {}", path.display());
        }
        None => println!("{}", artifact.content),
    }
    Ok(())
}

fn list_council() {
    for member in CouncilCatalog::standard().members() {
        println!(
            "{:<20} {} ({}) [{}]",
            member.id().as_str(),
            member.name(),
            member.title(),
            member.expertise_tags().join(", ")
        );
    }
}

fn check_copy(path: &Path) -> Result<()> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let content: SectionMap = serde_json::from_str(&raw)
        .with_context(|| format!("failed to parse {}", path.display()))?;

    let warnings = quality_gate::validate(&content);
    if warnings.is_empty() {
        println!("quality gate passed");
        return Ok(());
    }
    for warning in &warnings {
        println!("{}", warning);
    }
    bail!("{} quality warning(s)", warnings.len())
}
