//! TCP link between the two peers.
//!
//! One connection per game. Frames are single lines of JSON; see
//! `session::protocol`.

use std::net::SocketAddr;

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, Lines};
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::net::{TcpListener, TcpStream, ToSocketAddrs};
use tracing::{debug, info};

use crate::errors::SessionResult;
use crate::session::protocol::PeerMessage;

#[derive(Debug)]
pub struct PeerConnection {
    lines: Lines<BufReader<OwnedReadHalf>>,
    writer: OwnedWriteHalf,
    peer: SocketAddr,
}

impl PeerConnection {
    /// Binds `addr` and waits for exactly one peer.
    pub async fn listen(addr: impl ToSocketAddrs) -> SessionResult<Self> {
        let listener = TcpListener::bind(addr).await?;
        info!(addr = %listener.local_addr()?, "waiting for opponent");
        Self::accept(&listener).await
    }

    pub async fn accept(listener: &TcpListener) -> SessionResult<Self> {
        let (stream, peer) = listener.accept().await?;
        info!(%peer, "opponent connected");
        Ok(Self::from_stream(stream, peer))
    }

    pub async fn connect(addr: impl ToSocketAddrs) -> SessionResult<Self> {
        let stream = TcpStream::connect(addr).await?;
        let peer = stream.peer_addr()?;
        info!(%peer, "connected to server");
        Ok(Self::from_stream(stream, peer))
    }

    fn from_stream(stream: TcpStream, peer: SocketAddr) -> Self {
        // Moves are tiny and latency matters more than throughput.
        stream.set_nodelay(true).ok();
        let (reader, writer) = stream.into_split();
        Self {
            lines: BufReader::new(reader).lines(),
            writer,
            peer,
        }
    }

    pub fn peer_addr(&self) -> SocketAddr {
        self.peer
    }

    pub async fn send(&mut self, message: &PeerMessage) -> SessionResult<()> {
        let frame = message.encode()?;
        debug!(peer = %self.peer, frame = frame.trim_end(), "send");
        self.writer.write_all(frame.as_bytes()).await?;
        self.writer.flush().await?;
        Ok(())
    }

    /// Next frame from the peer; `None` once the peer has closed the socket.
    pub async fn recv(&mut self) -> SessionResult<Option<PeerMessage>> {
        loop {
            let Some(line) = self.lines.next_line().await? else {
                info!(peer = %self.peer, "connection closed");
                return Ok(None);
            };
            if line.trim().is_empty() {
                continue;
            }
            debug!(peer = %self.peer, frame = %line, "recv");
            return PeerMessage::decode(&line).map(Some);
        }
    }

    pub async fn shutdown(mut self) -> SessionResult<()> {
        self.writer.shutdown().await?;
        Ok(())
    }
}
