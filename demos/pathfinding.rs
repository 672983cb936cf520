//! Terminal pathfinding demo using crossterm.
//!
//! Run: cargo run --bin pathfinding
//!      cargo run --bin pathfinding -- --print --compact

use std::error::Error;
use std::fs::File;
use std::path::Path;

use clap::Parser;
use log::{LevelFilter, info};
use pathgrid_core::app::{App, AppConfig};
use pathgrid_crossterm::CrosstermDriver;
use pathgrid_demo::{Args, Level, PathfindingDemo};

/// Logs go to `log_file` when given. Headless runs log to stderr; the
/// terminal UI otherwise stays silent so log lines cannot tear the screen.
fn init_logging(log_file: Option<&Path>, headless: bool) -> Result<(), Box<dyn Error>> {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    match log_file {
        Some(path) => {
            let file = File::create(path)?;
            builder.target(env_logger::Target::Pipe(Box::new(file)));
        }
        None if !headless => {
            builder.filter_level(LevelFilter::Off);
        }
        None => {}
    }
    builder.init();
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    init_logging(args.log_file.as_deref(), args.headless())?;

    let level = match &args.level {
        Some(path) => Level::load(path)?,
        None => Level::demo(),
    };
    let demo = PathfindingDemo::new(level, args.demo_config());

    if args.json {
        let result = demo.result().ok_or_else(|| demo.message().to_string())?;
        println!("{}", serde_json::to_string_pretty(result)?);
        return Ok(());
    }
    if args.print {
        print!("{}", demo.render_text());
        return Ok(());
    }

    let size = demo.screen_size();
    info!("starting terminal UI at {}x{}", size.x, size.y);
    let mut app = App::new(AppConfig {
        model: demo,
        driver: CrosstermDriver::new(),
        width: size.x,
        height: size.y,
    });
    app.run()
}
