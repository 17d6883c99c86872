use color_eyre::Result;
use clap::Parser;
use taskai::{Profile, cli::{Cli, Commands}, logging};

fn main() -> Result<()> {
    // Set up error reporting with color-eyre
    color_eyre::install()?;

    let mut cli = Cli::parse();

    // --dev keeps config and logs apart from the real ones
    let profile = if cli.dev {
        Profile::Dev
    } else {
        Profile::Prod
    };
    let command = cli.command.take().unwrap_or(Commands::Tui);
    logging::init_logging(profile, matches!(command, Commands::Tui));

    match command {
        Commands::Tui => {
            let config = taskai::cli::load_tui_config(&cli, profile)?;
            let app = taskai::tui::App::new(config);
            taskai::tui::run_event_loop(app)?;
        }
        Commands::List { status, category, search, json } => {
            taskai::cli::handle_list(status, category, search, json)?;
        }
    }

    Ok(())
}
