use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use crate::collector::OutputFormat;

const AFTER_HELP: &str = "\
Formatos de salida:
  ip         solo IPv4 únicas resueltas correctamente (por defecto)
  domain-ip  'dominio,ip' por cada línea, 'dominio,Could not resolve' si falla

Ejemplos:
  resolver
  resolver --input my_domains.txt --output results.txt --concurrency 200 --format domain-ip";

#[derive(Parser, Debug)]
#[command(name = "resolver", version)]
#[command(about = "Resuelve en paralelo URLs o dominios a direcciones IPv4")]
#[command(after_help = AFTER_HELP)]
pub struct Cli {
    /// Archivo de entrada con URLs o dominios (uno por línea)
    #[arg(short, long, default_value = "urls.txt")]
    pub input: PathBuf,

    /// Archivo donde se escriben los resultados
    #[arg(short, long, default_value = "resolved_ips.txt")]
    pub output: PathBuf,

    /// Número de workers concurrentes
    #[arg(short, long, default_value = "100")]
    pub concurrency: NonZeroUsize,

    /// Formato de salida: 'ip' o 'domain-ip'
    #[arg(short, long, default_value = "ip")]
    pub format: OutputFormat,

    /// Plazo por consulta en segundos (sin plazo por defecto)
    #[arg(short, long, value_name = "SECS")]
    pub timeout: Option<u64>,
}

impl Cli {
    pub fn lookup_timeout(&self) -> Option<Duration> {
        self.timeout.map(Duration::from_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cli = Cli::try_parse_from(["resolver"]).unwrap();
        assert_eq!(cli.input, PathBuf::from("urls.txt"));
        assert_eq!(cli.output, PathBuf::from("resolved_ips.txt"));
        assert_eq!(cli.concurrency.get(), 100);
        assert_eq!(cli.format, OutputFormat::Ip);
        assert_eq!(cli.lookup_timeout(), None);
    }

    #[test]
    fn explicit_values() {
        let cli = Cli::try_parse_from([
            "resolver",
            "--input",
            "in.txt",
            "--output",
            "out.txt",
            "--concurrency",
            "8",
            "--format",
            "domain-ip",
            "--timeout",
            "3",
        ])
        .unwrap();

        assert_eq!(cli.input, PathBuf::from("in.txt"));
        assert_eq!(cli.output, PathBuf::from("out.txt"));
        assert_eq!(cli.concurrency.get(), 8);
        assert_eq!(cli.format, OutputFormat::DomainIp);
        assert_eq!(cli.lookup_timeout(), Some(Duration::from_secs(3)));
    }

    #[test]
    fn invalid_format_is_rejected() {
        let err = Cli::try_parse_from(["resolver", "--format", "json"]).unwrap_err();
        assert!(err.to_string().contains("use 'ip' o 'domain-ip'"));
    }

    #[test]
    fn zero_workers_is_rejected() {
        assert!(Cli::try_parse_from(["resolver", "--concurrency", "0"]).is_err());
    }

    #[test]
    fn command_is_well_formed() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
