mod commands;
mod terminal;

use commands::add::Addition;
use commands::{CommandLine, Commands, add, check, list, menu, watch};
use pulsr_common::config::Config;
use terminal::{logging, print};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let commands = CommandLine::parse_args();

    logging::init(commands.verbose, commands.quiet)?;

    let cfg: Config = commands.config();
    print::banner(cfg.no_banner, cfg.quiet);

    match commands.command.unwrap_or(Commands::Menu) {
        Commands::AddWebsite { url } => add::add(Addition::Website(url), &cfg),
        Commands::AddHost { address } => add::add(Addition::Host(address), &cfg),
        Commands::AddService { host, service } => add::add(
            Addition::Service {
                host,
                name: service,
            },
            &cfg,
        ),
        Commands::List => list::list(&cfg),
        Commands::Check => {
            print::header("checking targets", cfg.quiet);
            check::check(&cfg).await
        }
        Commands::Watch => {
            print::header("starting monitor", cfg.quiet);
            watch::watch(&cfg).await
        }
        Commands::Menu => menu::menu(&cfg).await,
    }
}
