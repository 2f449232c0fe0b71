use std::io;

use clap::Parser;
use tracing::info;

use crop_dashboard::logging::init_tracing;
use crop_dashboard::{Cli, Dashboard, DashboardConfig, Result, Session};

fn run(config: &DashboardConfig) -> Result<()> {
    let dashboard = Dashboard::load(config)?;
    info!("dashboard ready");

    if config.interactive {
        let stdin = io::stdin();
        let mut reader = stdin.lock();
        let mut writer = io::stdout().lock();
        Session::new(&dashboard, config.initial).run(&mut reader, &mut writer)
    } else {
        let report = dashboard.render(&config.initial)?;
        print!("{report}");
        Ok(())
    }
}

fn main() {
    init_tracing();
    let config = DashboardConfig::from(Cli::parse());

    if let Err(e) = run(&config) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
