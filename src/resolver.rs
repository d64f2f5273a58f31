use std::net::{IpAddr, Ipv4Addr};
use std::time::Duration;

use async_trait::async_trait;
use trust_dns_resolver::TokioAsyncResolver;

use crate::error::LookupError;

/// Consulta directa: devuelve todas las direcciones de un nombre.
#[async_trait]
pub trait Lookup: Send + Sync {
    async fn lookup_ip(&self, domain: &str) -> Result<Vec<IpAddr>, LookupError>;
}

/// Resolución con la configuración del sistema (`/etc/resolv.conf`).
pub struct SystemLookup {
    resolver: TokioAsyncResolver,
}

impl SystemLookup {
    pub fn from_system_conf() -> Result<Self, LookupError> {
        let resolver = TokioAsyncResolver::tokio_from_system_conf()?;
        Ok(SystemLookup { resolver })
    }
}

#[async_trait]
impl Lookup for SystemLookup {
    async fn lookup_ip(&self, domain: &str) -> Result<Vec<IpAddr>, LookupError> {
        let addrs: Vec<IpAddr> = self.resolver.lookup_ip(domain).await?.iter().collect();
        if addrs.is_empty() {
            return Err(LookupError::NotFound(domain.to_string()));
        }
        Ok(addrs)
    }
}

/// Plazo opcional por consulta sobre cualquier `Lookup`. Sin plazo la
/// consulta dura lo que tarde el resolvedor.
pub struct Deadline<L> {
    inner: L,
    timeout: Option<Duration>,
}

impl<L> Deadline<L> {
    pub fn new(inner: L, timeout: Option<Duration>) -> Self {
        Deadline { inner, timeout }
    }
}

#[async_trait]
impl<L> Lookup for Deadline<L>
where
    L: Lookup,
{
    async fn lookup_ip(&self, domain: &str) -> Result<Vec<IpAddr>, LookupError> {
        match self.timeout {
            Some(deadline) => tokio::time::timeout(deadline, self.inner.lookup_ip(domain))
                .await
                .map_err(|_| LookupError::Timeout(deadline))?,
            None => self.inner.lookup_ip(domain).await,
        }
    }
}

/// Primera dirección con representación IPv4, o `None`.
///
/// Un único intento, sin reintentos. Los errores de consulta no se propagan.
pub async fn resolve_ipv4<L>(lookup: &L, domain: &str) -> Option<Ipv4Addr>
where
    L: Lookup + ?Sized,
{
    if domain.is_empty() {
        return None;
    }

    let addrs = match lookup.lookup_ip(domain).await {
        Ok(addrs) => addrs,
        Err(err) => {
            tracing::debug!(domain, %err, "no se pudo resolver");
            return None;
        }
    };

    addrs.into_iter().find_map(|addr| match addr {
        IpAddr::V4(v4) => Some(v4),
        IpAddr::V6(v6) => v6.to_ipv4_mapped(),
    })
}
