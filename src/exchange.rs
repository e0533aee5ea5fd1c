//! Single request/reply exchanges with a bulb over UDP.

use std::net::{Ipv4Addr, Ipv6Addr, SocketAddr};
use std::time::Duration;

use log::{debug, trace};

use crate::command::Command;
use crate::errors::Error;
use crate::reply::Reply;
use crate::runtime::{self, AsyncUdpSocket, TimedOut, UdpSocket};

type Result<T> = std::result::Result<T, Error>;

/// UDP port Wiz bulbs listen on.
pub const DEFAULT_PORT: u16 = 38899;

/// How long an exchange waits for the bulb to answer.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(3);

const RECV_BUFFER_SIZE: usize = 4096;

/// Send `command` to `target` and wait up to `timeout` for one reply.
///
/// Every call opens its own ephemeral socket and closes it before returning,
/// whatever the outcome. Nothing is retried.
///
/// # Examples
///
/// ```ignore
/// use std::time::Duration;
/// use wiz_bridge::{Command, exchange};
///
/// let reply = exchange(
///     &Command::power(true),
///     "192.168.1.100:38899".parse()?,
///     Duration::from_secs(3),
/// )
/// .await?;
/// println!("{:?}", reply.result());
/// ```
pub async fn exchange(command: &Command, target: SocketAddr, timeout: Duration) -> Result<Reply> {
    Exchange::<UdpSocket>::open(target)
        .await?
        .run(command, timeout)
        .await
}

/// One outstanding request to a bulb.
///
/// An exchange owns its socket and is consumed by [`Exchange::run`], so it
/// concludes at most once and the socket is closed on every exit path,
/// including when the `run` future is dropped before completing.
#[derive(Debug)]
pub struct Exchange<S: AsyncUdpSocket = UdpSocket> {
    target: SocketAddr,
    endpoint: Endpoint<S>,
}

impl<S: AsyncUdpSocket> Exchange<S> {
    /// Bind an ephemeral socket on the wildcard address of the target's family.
    pub async fn open(target: SocketAddr) -> Result<Self> {
        let local = match target {
            SocketAddr::V4(_) => SocketAddr::from((Ipv4Addr::UNSPECIFIED, 0)),
            SocketAddr::V6(_) => SocketAddr::from((Ipv6Addr::UNSPECIFIED, 0)),
        };
        let socket = S::bind(local)
            .await
            .map_err(|e| Error::transport("bind", e))?;
        Ok(Self::with_socket(target, socket))
    }

    /// Use an already bound socket for the exchange.
    pub fn with_socket(target: SocketAddr, socket: S) -> Self {
        Exchange {
            target,
            endpoint: Endpoint { target, socket },
        }
    }

    pub fn target(&self) -> SocketAddr {
        self.target
    }

    /// Send the command and resolve with the first reply, a transport or
    /// decode failure, or a timeout, whichever happens first.
    pub async fn run(self, command: &Command, timeout: Duration) -> Result<Reply> {
        let Exchange { target, endpoint } = self;

        let payload = command.to_bytes().map_err(Error::Encode)?;
        debug!(
            "sending {} to {}: {}",
            command.method(),
            target,
            String::from_utf8_lossy(&payload)
        );

        let outcome = runtime::timeout(timeout, endpoint.round_trip(&payload)).await;
        drop(endpoint);

        match outcome {
            Ok(result) => result,
            Err(TimedOut) => Err(Error::timeout(target)),
        }
    }
}

/// The socket of an exchange. Dropping it closes the socket.
#[derive(Debug)]
struct Endpoint<S> {
    target: SocketAddr,
    socket: S,
}

impl<S: AsyncUdpSocket> Endpoint<S> {
    async fn round_trip(&self, payload: &[u8]) -> Result<Reply> {
        self.socket
            .send_to(payload, self.target)
            .await
            .map_err(|e| Error::transport("send", e))?;

        let mut buffer = [0u8; RECV_BUFFER_SIZE];
        let (bytes, from) = self
            .socket
            .recv_from(&mut buffer)
            .await
            .map_err(|e| Error::transport("receive", e))?;

        debug!(
            "UDP response from {}: {}",
            from,
            String::from_utf8_lossy(&buffer[..bytes])
        );
        Reply::from_slice(&buffer[..bytes]).map_err(Error::Decode)
    }
}

impl<S> Drop for Endpoint<S> {
    fn drop(&mut self) {
        trace!("released endpoint for {}", self.target);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorKind;
    use serde_json::json;
    use std::io;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};
    use tokio::time::Instant;

    /// A socket that plays back a fixed script and counts how often it is closed.
    struct ScriptedSocket {
        send_error: Option<io::ErrorKind>,
        recv_error: Option<io::ErrorKind>,
        reply: Option<(Duration, Vec<u8>)>,
        sent: Arc<Mutex<Vec<Vec<u8>>>>,
        released: Arc<AtomicUsize>,
    }

    struct Probe {
        sent: Arc<Mutex<Vec<Vec<u8>>>>,
        released: Arc<AtomicUsize>,
    }

    impl ScriptedSocket {
        fn new(send_error: Option<io::ErrorKind>, reply: Option<(u64, &str)>) -> (Self, Probe) {
            let sent = Arc::new(Mutex::new(Vec::new()));
            let released = Arc::new(AtomicUsize::new(0));
            let socket = ScriptedSocket {
                send_error,
                recv_error: None,
                reply: reply.map(|(delay_ms, body)| {
                    (Duration::from_millis(delay_ms), body.as_bytes().to_vec())
                }),
                sent: sent.clone(),
                released: released.clone(),
            };
            (socket, Probe { sent, released })
        }
    }

    impl Drop for ScriptedSocket {
        fn drop(&mut self) {
            self.released.fetch_add(1, Ordering::SeqCst);
        }
    }

    impl AsyncUdpSocket for ScriptedSocket {
        async fn bind(_addr: SocketAddr) -> io::Result<Self> {
            Err(io::Error::other("scripted sockets are never bound"))
        }

        async fn send_to(&self, buf: &[u8], _addr: SocketAddr) -> io::Result<usize> {
            if let Some(kind) = self.send_error {
                return Err(io::Error::from(kind));
            }
            self.sent.lock().unwrap().push(buf.to_vec());
            Ok(buf.len())
        }

        async fn recv_from(&self, buf: &mut [u8]) -> io::Result<(usize, SocketAddr)> {
            if let Some(kind) = self.recv_error {
                return Err(io::Error::from(kind));
            }
            match &self.reply {
                Some((delay, bytes)) => {
                    tokio::time::sleep(*delay).await;
                    buf[..bytes.len()].copy_from_slice(bytes);
                    Ok((bytes.len(), target()))
                }
                None => std::future::pending().await,
            }
        }
    }

    fn target() -> SocketAddr {
        "192.168.0.100:38899".parse().unwrap()
    }

    #[tokio::test(start_paused = true)]
    async fn test_reply_within_timeout() {
        let (socket, probe) = ScriptedSocket::new(
            None,
            Some((1000, r#"{"method":"setPilot","result":{"success":true}}"#)),
        );
        let command = Command::power(true);

        let reply = Exchange::with_socket(target(), socket)
            .run(&command, DEFAULT_TIMEOUT)
            .await
            .unwrap();

        assert_eq!(
            reply.as_value(),
            &json!({"method": "setPilot", "result": {"success": true}})
        );
        let sent = probe.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0], br#"{"method":"setPilot","params":{"state":true}}"#);
        assert_eq!(probe.released.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeout_after_exact_duration() {
        let (socket, probe) = ScriptedSocket::new(None, None);
        let start = Instant::now();

        let err = Exchange::with_socket(target(), socket)
            .run(&Command::get_pilot(), DEFAULT_TIMEOUT)
            .await
            .unwrap_err();

        let elapsed = start.elapsed();
        assert!(elapsed >= DEFAULT_TIMEOUT);
        assert!(elapsed < DEFAULT_TIMEOUT + Duration::from_millis(5));
        assert_eq!(err.kind(), ErrorKind::Timeout);
        assert!(err.to_string().contains("check the IP address"));
        assert_eq!(probe.released.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_late_reply_is_discarded() {
        let (socket, probe) = ScriptedSocket::new(
            None,
            Some((4000, r#"{"method":"getPilot"}"#)),
        );

        let err = Exchange::with_socket(target(), socket)
            .run(&Command::get_pilot(), DEFAULT_TIMEOUT)
            .await
            .unwrap_err();
        assert_eq!(err, Error::timeout(target()));

        tokio::time::sleep(Duration::from_secs(2)).await;
        assert_eq!(probe.released.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_malformed_reply() {
        let (socket, probe) =
            ScriptedSocket::new(None, Some((10, r#"{"method":"#)));

        let err = Exchange::with_socket(target(), socket)
            .run(&Command::get_pilot(), DEFAULT_TIMEOUT)
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Decode);
        assert_eq!(probe.released.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_send_failure_does_not_wait() {
        let (socket, probe) = ScriptedSocket::new(Some(io::ErrorKind::NetworkUnreachable), None);
        let start = Instant::now();

        let err = Exchange::with_socket(target(), socket)
            .run(&Command::power(false), DEFAULT_TIMEOUT)
            .await
            .unwrap_err();

        assert!(start.elapsed() < DEFAULT_TIMEOUT);
        assert_eq!(err.kind(), ErrorKind::Transport);
        assert!(err.to_string().starts_with("socket send error"));
        assert!(probe.sent.lock().unwrap().is_empty());
        assert_eq!(probe.released.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_receive_failure() {
        let (mut socket, probe) = ScriptedSocket::new(None, None);
        socket.recv_error = Some(io::ErrorKind::ConnectionReset);
        let start = Instant::now();

        let err = Exchange::with_socket(target(), socket)
            .run(&Command::get_pilot(), DEFAULT_TIMEOUT)
            .await
            .unwrap_err();

        assert!(start.elapsed() < DEFAULT_TIMEOUT);
        assert_eq!(err.kind(), ErrorKind::Transport);
        assert!(err.to_string().starts_with("socket receive error"));
        assert_eq!(probe.sent.lock().unwrap().len(), 1);
        assert_eq!(probe.released.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropped_exchange_releases_socket() {
        let (socket, probe) = ScriptedSocket::new(None, None);
        let command = Command::get_pilot();

        let cut_short = tokio::time::timeout(
            Duration::from_millis(500),
            Exchange::with_socket(target(), socket).run(&command, DEFAULT_TIMEOUT),
        )
        .await;

        assert!(cut_short.is_err());
        assert_eq!(probe.released.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_open_binds_matching_family() {
        let v4 = Exchange::<UdpSocket>::open("127.0.0.1:38899".parse().unwrap())
            .await
            .unwrap();
        assert_eq!(v4.target().port(), DEFAULT_PORT);
    }
}
