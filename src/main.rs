use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use form_snapshot::cli::commands::{cmd_collect, cmd_offline, cmd_script};
use form_snapshot::cli::config::{
    Cli, Commands, build_pass_settings, build_session_config, build_tracer, load_config,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = load_config(cli.config.as_deref());

    match cli.command {
        Commands::Collect {
            url,
            format,
            output,
            no_isolation,
            timeout_ms,
            headed,
        } => {
            let session_config = build_session_config(&config.browser, cli.node_path.as_deref(), headed);
            let settings = build_pass_settings(&config.browser, no_isolation, timeout_ms);
            let format = format.unwrap_or_else(|| config.output.format.clone());
            let output = output.or_else(|| config.output.output.clone());
            let tracer = build_tracer(&config.trace);

            cmd_collect(&url, &format, output.as_deref(), &session_config, &settings, &tracer).await?;
        }
        Commands::Offline {
            snapshot,
            format,
            output,
        } => {
            let format = format.unwrap_or_else(|| config.output.format.clone());
            let output = output.or_else(|| config.output.output.clone());
            let tracer = build_tracer(&config.trace);

            cmd_offline(&snapshot, &format, output.as_deref(), &tracer)?;
        }
        Commands::Script { raw } => {
            println!("{}", cmd_script(raw)?);
        }
    }

    Ok(())
}

/// Log to stderr. `RUST_LOG` wins; otherwise `-v` raises the level from warn.
fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
        .init();
}
