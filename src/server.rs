//! Sequential weather server.
//!
//! Connections are served strictly one at a time: accept, receive one
//! request, send one response, close. Others wait in the listen backlog.

use std::net::{SocketAddr, TcpListener, TcpStream};

use log::{debug, error, info};
use rand::Rng;
use socket2::{Domain, Protocol, Socket, Type};

use crate::error::{Result, WeatherError};
use crate::generator::WeatherGenerator;
use crate::protocol::LISTEN_BACKLOG;
use crate::responder::build_response;
use crate::transport::{recv_request, send_response};

/// Weather server
pub struct WeatherServer<R = rand::rngs::StdRng> {
    listener: TcpListener,
    generator: WeatherGenerator<R>,
}

impl WeatherServer {
    /// Bind to `addr` with a time-seeded generator.
    pub fn bind(addr: SocketAddr) -> Result<Self> {
        Self::with_generator(addr, WeatherGenerator::from_time())
    }
}

impl<R: Rng> WeatherServer<R> {
    /// Bind to `addr` and listen with a backlog of [`LISTEN_BACKLOG`].
    pub fn with_generator(addr: SocketAddr, generator: WeatherGenerator<R>) -> Result<Self> {
        let socket = Socket::new(Domain::for_address(addr), Type::STREAM, Some(Protocol::TCP))
            .map_err(|e| WeatherError::connection("failed to create socket", e))?;
        socket
            .set_reuse_address(true)
            .map_err(|e| WeatherError::connection("failed to configure socket", e))?;
        socket
            .bind(&addr.into())
            .map_err(|e| WeatherError::connection(format!("failed to bind {addr}"), e))?;
        socket
            .listen(LISTEN_BACKLOG)
            .map_err(|e| WeatherError::connection(format!("failed to listen on {addr}"), e))?;

        Ok(Self {
            listener: socket.into(),
            generator,
        })
    }

    /// Address the listener is bound to.
    pub fn local_addr(&self) -> Result<SocketAddr> {
        self.listener
            .local_addr()
            .map_err(|e| WeatherError::connection("failed to read local address", e))
    }

    /// Serve connections until accepting fails.
    pub fn run(&mut self) -> Result<()> {
        info!("Server listening on {}", self.local_addr()?);
        loop {
            self.serve_next()?;
        }
    }

    /// Accept one connection and handle it.
    ///
    /// A failed exchange is logged and swallowed; only a faulty listener
    /// is reported.
    pub fn serve_next(&mut self) -> Result<()> {
        let (stream, peer) = self
            .listener
            .accept()
            .map_err(|e| WeatherError::connection("failed to accept connection", e))?;
        if let Err(e) = handle_client(stream, peer, &mut self.generator) {
            error!("Error handling client {peer}: {e}");
        }
        Ok(())
    }
}

/// One request/response exchange. The stream is closed when this returns.
pub fn handle_client<R: Rng>(
    mut stream: TcpStream,
    peer: SocketAddr,
    generator: &mut WeatherGenerator<R>,
) -> Result<()> {
    let request = recv_request(&mut stream)?;
    info!(
        "Request '{} {}' from client ip {}",
        char::from(request.type_code()),
        request.city(),
        peer.ip()
    );

    let response = build_response(&request, generator);
    send_response(&mut stream, &response)?;
    debug!("Sent response {response:?} to {peer}");
    Ok(())
}
