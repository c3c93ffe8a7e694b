use clap::Parser;
use port_bootstrap::config::cli::exit_with;
use port_bootstrap::utils::validation::Validate;
use port_bootstrap::{CliConfig, PortClient, SetupEngine, SetupPlan};

#[derive(Parser)]
#[command(name = "port-bootstrap")]
#[command(about = "Create the framework/service demo catalog and compute EOL package counts")]
struct Args {
    #[command(flatten)]
    connection: CliConfig,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let connection = args.connection;

    connection.init_logging();
    tracing::info!("🚀 Starting port-bootstrap");

    if connection.dry_run {
        tracing::info!("🔍 DRY RUN MODE - no request will be sent");
        let plan = SetupPlan::demo();
        if let Err(e) = plan.validate() {
            exit_with("Setup", &e);
        }
        print_plan(&plan)?;
        return Ok(());
    }

    // flags and env beat the config file
    let file = match connection.load_file() {
        Ok(file) => file,
        Err(e) => exit_with("Setup", &e),
    };
    let settings = connection.settings(file.as_ref());
    if let Err(e) = settings.validate() {
        exit_with("Setup", &e);
    }
    tracing::debug!("Settings: {:?}", settings);

    let client = match PortClient::from_config(&settings) {
        Ok(client) => client,
        Err(e) => exit_with("Setup", &e),
    };
    tracing::info!("🌐 Using {}", client.base_url());

    // create blueprints and entities, then patch the EOL counts
    let engine = SetupEngine::new(client);
    match engine.run().await {
        Ok(report) => {
            report.log_summary();
            for count in &report.eol_counts {
                println!("{}: {} EOL packages", count.service, count.eol_count);
            }
            println!("✅ Process completed");
        }
        Err(e) => exit_with("Setup", &e),
    }

    Ok(())
}

fn print_plan(plan: &SetupPlan) -> Result<(), serde_json::Error> {
    for blueprint in &plan.blueprints {
        println!("POST /blueprints\n{}", serde_json::to_string_pretty(blueprint)?);
    }
    for framework in &plan.frameworks {
        println!(
            "POST /blueprints/framework/entities\n{}",
            serde_json::to_string_pretty(framework)?
        );
    }
    for service in &plan.services {
        println!(
            "POST /blueprints/service/entities\n{}",
            serde_json::to_string_pretty(service)?
        );
    }
    Ok(())
}
