use std::io;
use std::time::Duration;

use thiserror::Error;
use trust_dns_resolver::error::ResolveError;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("formato de salida inválido `{0}`: use 'ip' o 'domain-ip'")]
    InvalidFormat(String),
}

/// Fallo de una consulta individual. Nunca sale de un worker: se convierte
/// en un resultado sin IP.
#[derive(Error, Debug)]
pub enum LookupError {
    #[error("falló la resolución: {0}")]
    Resolve(#[from] ResolveError),

    /// Respuesta sin direcciones. Otras implementaciones de `Lookup` pueden
    /// usarlo también para un nombre desconocido.
    #[error("sin registros para {0}")]
    NotFound(String),

    #[error("la consulta superó el plazo de {0:?}")]
    Timeout(Duration),
}

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("error leyendo la entrada: {0}")]
    Input(#[source] io::Error),

    #[error("error escribiendo la salida: {0}")]
    Output(#[source] io::Error),

    #[error("falló una tarea: {0}")]
    Join(#[from] tokio::task::JoinError),
}
