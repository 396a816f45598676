//! Single-shot weather client.

use std::net::{IpAddr, TcpStream, ToSocketAddrs};

use log::debug;

use crate::error::{Result, WeatherError};
use crate::protocol::{Status, WeatherRequest, WeatherResponse};
use crate::transport::{recv_response, send_request};

/// Client holding one connection to the server.
pub struct WeatherClient {
    stream: TcpStream,
}

impl WeatherClient {
    /// Resolve `host` (literal address or name) and connect to the first
    /// address that accepts.
    pub fn connect(host: &str, port: u16) -> Result<Self> {
        let addrs = (host, port)
            .to_socket_addrs()
            .map_err(|e| WeatherError::connection(format!("failed to resolve {host}"), e))?;

        let mut last_err = None;
        for addr in addrs {
            debug!("Connecting to {addr}");
            match TcpStream::connect(addr) {
                Ok(stream) => return Ok(Self { stream }),
                Err(e) => last_err = Some(e),
            }
        }
        let source = last_err.unwrap_or_else(|| {
            std::io::Error::new(std::io::ErrorKind::NotFound, "no addresses found")
        });
        Err(WeatherError::connection(
            format!("failed to connect to {host}:{port}"),
            source,
        ))
    }

    /// IP of the connected server.
    pub fn server_ip(&self) -> Result<IpAddr> {
        self.stream
            .peer_addr()
            .map(|addr| addr.ip())
            .map_err(|e| WeatherError::connection("failed to read peer address", e))
    }

    /// Send one request and wait for its response.
    pub fn request(&mut self, request: &WeatherRequest) -> Result<WeatherResponse> {
        send_request(&mut self.stream, request)?;
        recv_response(&mut self.stream)
    }
}

/// Parse a `"<type> <city>"` argument into a request.
///
/// The type is the first character, sent as-is so the server decides
/// whether it is valid. Spaces between type and city are skipped.
pub fn parse_request_arg(arg: &str) -> Result<WeatherRequest> {
    let first = arg
        .chars()
        .next()
        .ok_or_else(|| WeatherError::Argument("empty request".to_string()))?;
    let city = arg[first.len_utf8()..].trim_start_matches(' ');
    if city.is_empty() {
        return Err(WeatherError::Argument("missing city in request".to_string()));
    }
    Ok(WeatherRequest::new(arg.as_bytes()[0], city))
}

/// First letter upper case, the rest lower case.
pub fn capitalize_city(city: &str) -> String {
    let mut chars = city.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

/// Human readable line for a response.
pub fn render_response(server_ip: IpAddr, city: &str, response: &WeatherResponse) -> String {
    let outcome = match response.status {
        Status::Ok => match response.measurement() {
            Some(kind) => format!(
                "{}: {} = {:.1}{}",
                capitalize_city(city),
                kind.label(),
                response.value,
                kind.unit()
            ),
            None => "Invalid response".to_string(),
        },
        Status::CityNotFound => "City not available".to_string(),
        Status::InvalidRequest => "Invalid request".to_string(),
        Status::Unknown(_) => "Invalid response".to_string(),
    };
    format!("Result received from server ip {server_ip}. {outcome}")
}
