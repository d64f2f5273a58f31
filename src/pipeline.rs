use std::io;
use std::net::Ipv4Addr;
use std::num::NonZeroUsize;
use std::sync::Arc;

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite};
use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinSet;

use crate::collector::{Collector, OutputFormat, Summary};
use crate::domain::extract_domain;
use crate::error::PipelineError;
use crate::resolver::{resolve_ipv4, Lookup};

/// Resultado de una línea de entrada. Se crea una vez, en un worker, y no se
/// modifica después.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub input: String,
    pub domain: String,
    pub ip: Option<Ipv4Addr>,
}

impl Outcome {
    pub async fn resolve<L>(input: String, lookup: &L) -> Outcome
    where
        L: Lookup + ?Sized,
    {
        let domain = extract_domain(&input);
        let ip = resolve_ipv4(lookup, &domain).await;
        Outcome { input, domain, ip }
    }
}

pub struct Pipeline<L> {
    lookup: Arc<L>,
    workers: NonZeroUsize,
    format: OutputFormat,
}

impl<L> Pipeline<L>
where
    L: Lookup + 'static,
{
    pub fn new(lookup: L, workers: NonZeroUsize, format: OutputFormat) -> Self {
        Pipeline {
            lookup: Arc::new(lookup),
            workers,
            format,
        }
    }

    /// productor -> cola de trabajo -> N workers -> cola de resultados -> colector
    ///
    /// La salida sigue el orden en que terminan las consultas, no el de la
    /// entrada.
    pub async fn run<R, S, E>(
        self,
        input: R,
        sink: &mut S,
        echo: &mut E,
    ) -> Result<Summary, PipelineError>
    where
        R: AsyncBufRead + Unpin + Send + 'static,
        S: AsyncWrite + Unpin,
        E: AsyncWrite + Unpin,
    {
        let capacity = self.workers.get();
        let (jobs_tx, jobs_rx) = mpsc::channel::<String>(capacity);
        let (results_tx, results_rx) = mpsc::channel::<Outcome>(capacity);

        let producer = tokio::spawn(produce(input, jobs_tx));

        let jobs_rx = Arc::new(Mutex::new(jobs_rx));
        let mut workers = JoinSet::new();
        for id in 0..capacity {
            workers.spawn(work(
                id,
                Arc::clone(&jobs_rx),
                results_tx.clone(),
                Arc::clone(&self.lookup),
            ));
        }

        let supervisor = tokio::spawn(async move {
            while let Some(joined) = workers.join_next().await {
                if let Err(err) = joined {
                    tracing::error!(%err, "worker terminó con error");
                }
            }
            // Todos los workers terminaron: se cierra la cola de resultados.
            drop(results_tx);
        });

        let summary = Collector::new(self.format)
            .run(results_rx, sink, echo)
            .await?;

        supervisor.await?;
        let lines = producer.await?.map_err(PipelineError::Input)?;
        tracing::debug!(lines, outcomes = summary.outcomes, "pipeline terminado");

        Ok(summary)
    }
}

async fn produce<R>(mut input: R, jobs: mpsc::Sender<String>) -> io::Result<usize>
where
    R: AsyncBufRead + Unpin,
{
    let mut buf = Vec::new();
    let mut count = 0;

    loop {
        buf.clear();
        match input.read_until(b'\n', &mut buf).await {
            Ok(0) => break,
            Ok(_) => {}
            Err(err) => {
                tracing::error!(%err, "error leyendo la entrada");
                return Err(err);
            }
        }

        // Bytes no UTF-8 se reemplazan; la línea se procesa igual.
        let line = String::from_utf8_lossy(&buf);

        // Las líneas vacías también se encolan; el resolvedor las tolera.
        if jobs.send(line.trim().to_string()).await.is_err() {
            // no quedan workers
            break;
        }
        count += 1;
    }

    Ok(count)
}

async fn work<L>(
    id: usize,
    jobs: Arc<Mutex<mpsc::Receiver<String>>>,
    results: mpsc::Sender<Outcome>,
    lookup: Arc<L>,
) where
    L: Lookup + ?Sized,
{
    loop {
        let next = jobs.lock().await.recv().await;
        let Some(input) = next else {
            break;
        };

        let outcome = Outcome::resolve(input, lookup.as_ref()).await;
        if results.send(outcome).await.is_err() {
            tracing::debug!(worker = id, "colector cerrado");
            break;
        }
    }
}
