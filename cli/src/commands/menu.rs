use std::io::Write;

use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader, Lines};

use pulsr_common::config::Config;
use pulsr_common::store::RegistryStore;
use pulsr_common::target::TargetRegistry;
use pulsr_core::cycle::CycleRunner;
use pulsr_core::probe::ProbeSet;
use pulsr_core::registry::JsonFileStore;

use super::add::{Addition, apply};
use super::check::run_check;
use crate::pprint;
use crate::terminal::print;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Choice {
    AddWebsite,
    AddHost,
    AddService,
    Check,
    Exit,
}

impl Choice {
    fn parse(input: &str) -> Option<Self> {
        match input.trim() {
            "1" => Some(Choice::AddWebsite),
            "2" => Some(Choice::AddHost),
            "3" => Some(Choice::AddService),
            "4" => Some(Choice::Check),
            "5" => Some(Choice::Exit),
            _ => None,
        }
    }
}

/// The numbered menu on stdin. The list is saved after every edit and on exit.
pub async fn menu(cfg: &Config) -> anyhow::Result<()> {
    let store = JsonFileStore::new(&cfg.registry_path);
    let runner = CycleRunner::from_config(ProbeSet::from_config(cfg)?, cfg);
    let mut input = BufReader::new(tokio::io::stdin()).lines();

    let mut session = Session {
        store: &store,
        registry: store.load(),
    };

    loop {
        print_menu();
        let Some(line) = prompt(&mut input, "Select an option: ").await? else {
            break;
        };

        match Choice::parse(&line) {
            Some(Choice::AddWebsite) => {
                let url: String = prompt_or_blank(&mut input, "Enter website URL: ").await?;
                session.add(Addition::Website(url))?;
            }
            Some(Choice::AddHost) => {
                let address: String =
                    prompt_or_blank(&mut input, "Enter server name or IP: ").await?;
                session.add(Addition::Host(address))?;
            }
            Some(Choice::AddService) => {
                let host: String = prompt_or_blank(&mut input, "Enter server name or IP: ").await?;
                let name: String = prompt_or_blank(&mut input, "Enter service name: ").await?;
                session.add(Addition::Service { host, name })?;
            }
            Some(Choice::Check) => run_check(&runner, &session.registry, cfg).await,
            Some(Choice::Exit) => break,
            None => print::print("Invalid option."),
        }
    }

    session.save()
}

struct Session<'a> {
    store: &'a dyn RegistryStore,
    registry: TargetRegistry,
}

impl Session<'_> {
    fn add(&mut self, addition: Addition) -> anyhow::Result<()> {
        if apply(&mut self.registry, &addition) {
            self.save()?;
        }
        Ok(())
    }

    fn save(&self) -> anyhow::Result<()> {
        self.store.save(&self.registry)
    }
}

fn print_menu() {
    pprint!();
    print::print("Site/Service Monitor");
    print::print("1. Add website URL");
    print::print("2. Add server name or IP");
    print::print("3. Add service on server");
    print::print("4. Check status");
    print::print("5. Exit");
}

/// Shows `label` and reads one line. `None` once stdin is closed.
async fn prompt<R>(input: &mut Lines<R>, label: &str) -> anyhow::Result<Option<String>>
where
    R: AsyncBufRead + Unpin,
{
    let mut stdout = std::io::stdout();
    write!(stdout, "{label}")?;
    stdout.flush()?;
    Ok(input.next_line().await?)
}

async fn prompt_or_blank<R>(input: &mut Lines<R>, label: &str) -> anyhow::Result<String>
where
    R: AsyncBufRead + Unpin,
{
    Ok(prompt(input, label).await?.unwrap_or_default())
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
