use clap::Parser;
use port_bootstrap::config::cli::exit_with;
use port_bootstrap::config::resolve_scorecard_blueprint;
use port_bootstrap::core::catalog::open_prs_scorecard;
use port_bootstrap::utils::validation::Validate;
use port_bootstrap::{CliConfig, PortClient, ScorecardRegistrar};

#[derive(Parser)]
#[command(name = "create_scorecard")]
#[command(about = "Register the open PRs scorecard on a blueprint")]
struct Args {
    #[command(flatten)]
    connection: CliConfig,

    /// Blueprint the scorecard is attached to [default: service]
    #[arg(long)]
    blueprint: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let connection = args.connection;
    connection.init_logging();

    // the target blueprint comes from the same sources in both modes
    let file = match connection.load_file() {
        Ok(file) => file,
        Err(e) => exit_with("Scorecard setup", &e),
    };
    let blueprint = resolve_scorecard_blueprint(args.blueprint, file.as_ref());

    let scorecard = open_prs_scorecard();
    if let Err(e) = scorecard.validate() {
        exit_with("Scorecard setup", &e);
    }

    if connection.dry_run {
        tracing::info!("🔍 DRY RUN MODE - no request will be sent");
        println!(
            "POST /blueprints/{}/scorecards\n{}",
            blueprint,
            serde_json::to_string_pretty(&scorecard)?
        );
        return Ok(());
    }

    let settings = connection.settings(file.as_ref());
    if let Err(e) = settings.validate() {
        exit_with("Scorecard setup", &e);
    }

    let client = match PortClient::from_config(&settings) {
        Ok(client) => client,
        Err(e) => exit_with("Scorecard setup", &e),
    };

    let registrar = ScorecardRegistrar::new(client);
    match registrar.register(&blueprint, &scorecard).await {
        Ok(response) => println!("{}", serde_json::to_string(&response)?),
        Err(e) => exit_with("Scorecard creation", &e),
    }

    Ok(())
}
