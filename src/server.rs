use std::io;
use std::net::{SocketAddr, UdpSocket};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use tracing::{debug, error, info, warn};

use crate::dns_message::{encode, DnsMessage};
use crate::error::{DnsError, ServerError};
use crate::resolver::resolve_all;
use crate::zone::RecordStore;

/// Receive buffer size
const BUFFER_SIZE: usize = 1024;

/// How long a receive may block before the running flag is checked again
pub const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// DNS Server that handles incoming DNS requests
pub struct DnsServer {
    socket: UdpSocket,
    store: Arc<RecordStore>,
    dump_packets: bool,
}

/// A started server; stopping it joins the worker thread
pub struct ServerHandle {
    running: Arc<AtomicBool>,
    worker: Option<JoinHandle<()>>,
    local_addr: SocketAddr,
}

impl DnsServer {
    /// Create a new DNS server bound to the given address
    pub fn bind(bind_addr: &str, store: Arc<RecordStore>) -> Result<Self, ServerError> {
        let socket = UdpSocket::bind(bind_addr).map_err(|source| ServerError::Bind {
            addr: bind_addr.to_string(),
            source,
        })?;
        socket
            .set_read_timeout(Some(POLL_INTERVAL))
            .map_err(ServerError::SocketOption)?;

        Ok(Self {
            socket,
            store,
            dump_packets: false,
        })
    }

    /// Log every decoded packet as a table at info level instead of debug
    pub fn with_packet_dump(mut self, enabled: bool) -> Self {
        self.dump_packets = enabled;
        self
    }

    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.socket.local_addr()
    }

    /// Start serving on a dedicated worker thread
    pub fn start(self) -> Result<ServerHandle, ServerError> {
        let local_addr = self.local_addr().map_err(ServerError::SocketOption)?;
        let running = Arc::new(AtomicBool::new(true));

        let flag = Arc::clone(&running);
        let worker = thread::Builder::new()
            .name("dns-worker".to_string())
            .spawn(move || self.run(&flag))
            .map_err(ServerError::Spawn)?;

        info!("UDP server is running on {}", local_addr);

        Ok(ServerHandle {
            running,
            worker: Some(worker),
            local_addr,
        })
    }

    /// Receive-process-send loop, one datagram at a time, until `running`
    /// is cleared or the socket fails
    fn run(&self, running: &AtomicBool) {
        let mut buf = [0u8; BUFFER_SIZE];

        while running.load(Ordering::SeqCst) {
            let (size, source) = match self.socket.recv_from(&mut buf) {
                Ok(received) => received,
                Err(e) if is_timeout(&e) => continue,
                Err(e) => {
                    error!("Receive failed: {}", e);
                    break;
                }
            };

            if !running.load(Ordering::SeqCst) {
                break;
            }

            debug!("Received {} bytes from {}", size, source);

            match self.handle_request(&buf[..size]) {
                Ok(response) => {
                    if let Err(e) = self.socket.send_to(&response, source) {
                        error!("Failed to send response to {}: {}", source, e);
                    }
                }
                Err(e) => {
                    warn!("Dropping datagram from {}: {}", source, e);
                }
            }
        }

        info!("UDP server is shutting down");
    }

    /// Handle a DNS request: parse, resolve, and build response
    pub fn handle_request(&self, buf: &[u8]) -> Result<Vec<u8>, DnsError> {
        let request = DnsMessage::decode(buf)?;

        if self.dump_packets {
            info!("\n{}", request);
        } else {
            debug!("\n{}", request);
        }

        let answers = resolve_all(&request.questions, &self.store);

        encode(&request.header, &request.questions, &answers)
    }
}

fn is_timeout(e: &io::Error) -> bool {
    matches!(e.kind(), io::ErrorKind::WouldBlock | io::ErrorKind::TimedOut)
}

impl ServerHandle {
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// Clear the running flag and wait for the worker to notice.
    /// Returns within about one poll interval.
    pub fn stop(&mut self) {
        self.running.store(false, Ordering::SeqCst);
        if let Some(worker) = self.worker.take() {
            if worker.join().is_err() {
                error!("DNS worker thread panicked");
            }
        }
    }
}

impl Drop for ServerHandle {
    fn drop(&mut self) {
        self.stop();
    }
}
