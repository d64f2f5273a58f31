use std::collections::HashSet;
use std::fmt;
use std::net::Ipv4Addr;
use std::str::FromStr;

use tokio::io::{AsyncWrite, AsyncWriteExt};
use tokio::sync::mpsc;

use crate::error::{ConfigError, PipelineError};
use crate::pipeline::Outcome;

const UNRESOLVED: &str = "Could not resolve";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Solo IPs resueltas, sin repetir.
    #[default]
    Ip,
    /// `dominio,ip` por cada entrada, o `dominio,Could not resolve`.
    DomainIp,
}

impl FromStr for OutputFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ip" => Ok(OutputFormat::Ip),
            "domain-ip" => Ok(OutputFormat::DomainIp),
            other => Err(ConfigError::InvalidFormat(other.to_string())),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Ip => f.write_str("ip"),
            OutputFormat::DomainIp => f.write_str("domain-ip"),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    pub outcomes: usize,
    pub resolved: usize,
    pub unresolved: usize,
    pub emitted: usize,
}

/// Consumidor único de resultados. El conjunto de IPs vistas vive solo aquí,
/// así que no necesita bloqueo.
pub struct Collector {
    format: OutputFormat,
    seen: HashSet<Ipv4Addr>,
    summary: Summary,
}

impl Collector {
    pub fn new(format: OutputFormat) -> Self {
        Collector {
            format,
            seen: HashSet::new(),
            summary: Summary::default(),
        }
    }

    /// Devuelve la línea a emitir (con salto de línea) o `None` si el
    /// resultado se descarta.
    pub fn accept(&mut self, outcome: &Outcome) -> Option<String> {
        self.summary.outcomes += 1;
        match outcome.ip {
            Some(_) => self.summary.resolved += 1,
            None => self.summary.unresolved += 1,
        }

        let line = match self.format {
            OutputFormat::Ip => {
                let ip = outcome.ip?;
                if !self.seen.insert(ip) {
                    return None;
                }
                format!("{ip}\n")
            }
            OutputFormat::DomainIp => match outcome.ip {
                Some(ip) => format!("{},{ip}\n", outcome.domain),
                None => format!("{},{UNRESOLVED}\n", outcome.domain),
            },
        };

        self.summary.emitted += 1;
        Some(line)
    }

    /// Consume resultados en orden de llegada hasta que la cola se cierra.
    /// Cada línea aceptada va al destino y al eco, en el mismo orden.
    pub async fn run<S, E>(
        mut self,
        mut results: mpsc::Receiver<Outcome>,
        sink: &mut S,
        echo: &mut E,
    ) -> Result<Summary, PipelineError>
    where
        S: AsyncWrite + Unpin,
        E: AsyncWrite + Unpin,
    {
        while let Some(outcome) = results.recv().await {
            if let Some(line) = self.accept(&outcome) {
                sink.write_all(line.as_bytes())
                    .await
                    .map_err(PipelineError::Output)?;
                echo.write_all(line.as_bytes())
                    .await
                    .map_err(PipelineError::Output)?;
            }
        }

        sink.flush().await.map_err(PipelineError::Output)?;
        echo.flush().await.map_err(PipelineError::Output)?;

        Ok(self.summary)
    }
}
