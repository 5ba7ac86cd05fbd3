//! CLI entry point for nexus-tool.

mod cli;

use clap::Parser;
use nexus_tool::app::{Console, StartupChoice};
use nexus_tool::build_info;
use nexus_tool::config::{invoking_user_home, load_settings};
use nexus_tool::logging;
use nexus_tool::preflight::ensure_elevated;
use nexus_tool::process::SystemRunner;
use nexus_tool::ui::{RenderSink, Renderer, StdinPrompter};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let args = cli::Args::parse();
    if args.version {
        println!("{}", build_info::cli_version_text());
        return;
    }

    let user_home = invoking_user_home();
    let loaded = load_settings(args.settings.as_deref(), &user_home);
    let color = !args.no_color && loaded.settings.display.color;
    logging::init(color);

    let renderer = Renderer::new(color);
    if let Err(msg) = ensure_elevated() {
        renderer.error(&msg);
        std::process::exit(1);
    }
    for warning in &loaded.warnings {
        renderer.warn(warning);
    }
    tracing::debug!(
        home = %user_home.display(),
        settings = ?loaded.source,
        "starting console"
    );

    let mut console = Console::new(
        user_home,
        loaded.settings,
        Box::new(renderer),
        Box::new(StdinPrompter::new(color)),
        Box::new(SystemRunner::new()),
    );

    let choice = match args.command {
        Some(cli::Command::Setup) => StartupChoice::Setup,
        Some(cli::Command::Menu) => StartupChoice::Menu,
        None => console.ask_startup_choice(),
    };

    if choice == StartupChoice::Setup {
        if let Err(err) = console.initial_setup().await {
            renderer.error(&format!("Initial setup failed: {err}"));
            std::process::exit(1);
        }
        return;
    }

    console.load_state();
    console.run_menu().await;
}
