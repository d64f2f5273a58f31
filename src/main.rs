use anyhow::Context;
use clap::Parser;
use tokio::fs::File;
use tokio::io::{BufReader, BufWriter};
use tracing_subscriber::EnvFilter;

use concurrent_resolver::config::Cli;
use concurrent_resolver::{Deadline, Pipeline, SystemLookup};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Los logs van a stderr; stdout lleva el eco de los resultados.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    // Un formato inválido ya lo rechaza clap antes de tocar ningún archivo.
    let cli = Cli::parse();

    let input = File::open(&cli.input)
        .await
        .with_context(|| format!("error abriendo el archivo de entrada {}", cli.input.display()))?;
    let output = File::create(&cli.output)
        .await
        .with_context(|| format!("error creando el archivo de salida {}", cli.output.display()))?;

    let system = SystemLookup::from_system_conf()
        .context("error cargando la configuración del resolvedor del sistema")?;
    let lookup = Deadline::new(system, cli.lookup_timeout());

    tracing::info!(
        workers = cli.concurrency.get(),
        format = %cli.format,
        input = %cli.input.display(),
        "iniciando resolución"
    );

    let mut sink = BufWriter::new(output);
    let mut echo = tokio::io::stdout();

    let summary = Pipeline::new(lookup, cli.concurrency, cli.format)
        .run(BufReader::new(input), &mut sink, &mut echo)
        .await?;

    tracing::info!(
        outcomes = summary.outcomes,
        resolved = summary.resolved,
        unresolved = summary.unresolved,
        emitted = summary.emitted,
        output = %cli.output.display(),
        "resolución terminada"
    );

    Ok(())
}
