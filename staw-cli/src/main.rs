mod cmd;
mod config;

use tracing_subscriber::EnvFilter;

fn main() {
    let matches = cmd::build::make_command().get_matches();

    // RUST_LOG wins; otherwise -v raises the default level from warn
    let level = match matches.get_count("verbose") {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = cmd::build::execute(&matches) {
        eprintln!("Error: {err:#}");
        std::process::exit(1);
    }
}
