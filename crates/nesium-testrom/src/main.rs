use anyhow::Context;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use nesium_testrom::{DEFAULT_OUTPUT, write_rom};

fn main() -> anyhow::Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let written =
        write_rom(DEFAULT_OUTPUT).with_context(|| format!("generating {DEFAULT_OUTPUT}"))?;

    println!("wrote {DEFAULT_OUTPUT} ({written} bytes)");
    Ok(())
}
