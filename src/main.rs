use clap::Parser;
use consult::utils::{logger, validation::Validate};
use consult::{AppConfig, CliConfig, DatacenterClientSet, Dispatcher, FileConfig, Result};

#[tokio::main]
async fn main() {
    let cli = CliConfig::parse();

    if cli.log_json {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }
    tracing::debug!("CLI config: {:?}", cli);

    if let Err(e) = run(cli).await {
        tracing::error!("❌ {}", e);
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(e.exit_code());
    }
}

async fn run(cli: CliConfig) -> Result<()> {
    let file = cli.config.as_deref().map(FileConfig::from_file).transpose()?;
    let config = AppConfig::resolve(
        cli.server.clone(),
        cli.datacenters.clone(),
        cli.json,
        file.as_ref(),
    );
    config.validate()?;

    let clients = DatacenterClientSet::connect(&config.server, &config.datacenters)?;
    let dispatcher = Dispatcher::new(&clients, config.format);
    let mut out = std::io::stdout();

    match cli.command.plan(file.as_ref().and_then(FileConfig::ssh_user)) {
        Some((spec, action)) => dispatcher.run(&action, &spec, &mut out).await,
        None => dispatcher.services(&mut out).await,
    }
}
