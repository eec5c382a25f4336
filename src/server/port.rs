//! Port Resolver
//!
//! Finds the first free TCP port at or above a preferred value by probing with
//! short-lived listeners.

use std::io;
use std::net::{IpAddr, SocketAddr};

use thiserror::Error;
use tokio::net::TcpListener;
use tracing::debug;

// == Port Error ==
/// Errors raised while looking for a free port.
#[derive(Error, Debug)]
pub enum PortError {
    /// Every probed port was already in use
    #[error("no free port found starting at {start} after {attempts} attempts")]
    Exhausted { start: u16, attempts: u32 },

    /// Binding failed for a reason other than the port being taken
    #[error("cannot bind port {port}: {source}")]
    Bind {
        port: u16,
        #[source]
        source: io::Error,
    },
}

/// Returns the first port `>= start` on `host` that nothing is bound to.
///
/// Each candidate is probed by binding a listener and dropping it immediately,
/// so the returned port is free but not held. Another process may still take
/// it before the real server binds.
///
/// # Arguments
/// * `host` - Interface to probe
/// * `start` - First candidate; `0` lets the OS pick an ephemeral port
/// * `max_attempts` - Number of candidates probed before giving up
///
/// # Errors
/// - [`PortError::Exhausted`] if `max_attempts` candidates (or the top of the
///   port range) are reached without finding a free port
/// - [`PortError::Bind`] on any bind failure other than "address in use"
pub async fn find_available_port(
    host: IpAddr,
    start: u16,
    max_attempts: u32,
) -> Result<u16, PortError> {
    let mut candidate = start;

    for attempt in 0..max_attempts {
        match TcpListener::bind(SocketAddr::new(host, candidate)).await {
            Ok(listener) => {
                let port = listener
                    .local_addr()
                    .map_err(|source| PortError::Bind {
                        port: candidate,
                        source,
                    })?
                    .port();
                drop(listener);
                return Ok(port);
            }
            Err(err) if err.kind() == io::ErrorKind::AddrInUse => {
                debug!("Port {} is in use, trying the next one", candidate);
                candidate = match candidate.checked_add(1) {
                    Some(next) => next,
                    None => {
                        return Err(PortError::Exhausted {
                            start,
                            attempts: attempt + 1,
                        })
                    }
                };
            }
            Err(source) => {
                return Err(PortError::Bind {
                    port: candidate,
                    source,
                })
            }
        }
    }

    Err(PortError::Exhausted {
        start,
        attempts: max_attempts,
    })
}
