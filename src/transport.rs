//! Full-message transfer over a byte stream.
//!
//! A single `read`/`write` on a socket may move fewer bytes than asked for.
//! Everything here loops until the whole fixed-size message has crossed, or
//! fails with [`WeatherError::Transport`] when the peer goes away first.
//! No timeout is applied: a stalled peer blocks the caller.

use std::io::{self, Read, Write};

use crate::error::{Result, WeatherError};
use crate::protocol::{REQUEST_LEN, RESPONSE_LEN, WeatherRequest, WeatherResponse};

/// Write every byte of `buf`, retrying short writes.
pub fn send_all(conn: &mut impl Write, buf: &[u8]) -> Result<()> {
    let mut sent = 0;
    while sent < buf.len() {
        match conn.write(&buf[sent..]) {
            Ok(0) => {
                return Err(WeatherError::Transport(io::Error::new(
                    io::ErrorKind::WriteZero,
                    format!("connection closed after {sent} of {} bytes", buf.len()),
                )));
            }
            Ok(n) => sent += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        }
    }
    conn.flush()?;
    Ok(())
}

/// Read exactly `size` bytes, retrying short reads.
pub fn recv_all(conn: &mut impl Read, size: usize) -> Result<Vec<u8>> {
    let mut buf = vec![0u8; size];
    recv_into(conn, &mut buf)?;
    Ok(buf)
}

/// Fill `buf` completely. EOF before the end is an error.
pub fn recv_into(conn: &mut impl Read, buf: &mut [u8]) -> Result<()> {
    let mut received = 0;
    while received < buf.len() {
        match conn.read(&mut buf[received..]) {
            Ok(0) => {
                return Err(WeatherError::Transport(io::Error::new(
                    io::ErrorKind::UnexpectedEof,
                    format!("connection closed after {received} of {} bytes", buf.len()),
                )));
            }
            Ok(n) => received += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        }
    }
    Ok(())
}

/// Send one request.
pub fn send_request(conn: &mut impl Write, request: &WeatherRequest) -> Result<()> {
    send_all(conn, &request.to_bytes())
}

/// Receive one request.
pub fn recv_request(conn: &mut impl Read) -> Result<WeatherRequest> {
    let mut buf = [0u8; REQUEST_LEN];
    recv_into(conn, &mut buf)?;
    Ok(WeatherRequest::from_bytes(&buf))
}

/// Send one response, converting to network byte order.
pub fn send_response(conn: &mut impl Write, response: &WeatherResponse) -> Result<()> {
    send_all(conn, &response.to_bytes())
}

/// Receive one response, converting back to host byte order.
pub fn recv_response(conn: &mut impl Read) -> Result<WeatherResponse> {
    let mut buf = [0u8; RESPONSE_LEN];
    recv_into(conn, &mut buf)?;
    Ok(WeatherResponse::from_bytes(&buf))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::{MeasurementType, Status};

    /// Moves at most one byte per call, and fails every other call with
    /// `Interrupted`.
    struct Trickle {
        input: Vec<u8>,
        pos: usize,
        output: Vec<u8>,
        interrupt: bool,
    }

    impl Trickle {
        fn new(input: Vec<u8>) -> Self {
            Self {
                input,
                pos: 0,
                output: Vec::new(),
                interrupt: false,
            }
        }
    }

    impl Read for Trickle {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            self.interrupt = !self.interrupt;
            if self.interrupt {
                return Err(io::ErrorKind::Interrupted.into());
            }
            if self.pos == self.input.len() || buf.is_empty() {
                return Ok(0);
            }
            buf[0] = self.input[self.pos];
            self.pos += 1;
            Ok(1)
        }
    }

    impl Write for Trickle {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            match buf.first() {
                Some(&b) => {
                    self.output.push(b);
                    Ok(1)
                }
                None => Ok(0),
            }
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    struct Closed;

    impl Write for Closed {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Ok(0)
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn request_crosses_one_byte_at_a_time() {
        let request = WeatherRequest::new(b't', "bari");
        let mut conn = Trickle::new(Vec::new());
        send_request(&mut conn, &request).unwrap();
        assert_eq!(conn.output, request.to_bytes());

        let mut conn = Trickle::new(conn.output);
        assert_eq!(recv_request(&mut conn).unwrap(), request);
    }

    #[test]
    fn response_crosses_one_byte_at_a_time() {
        let response = WeatherResponse::ok(MeasurementType::Humidity, 57.25);
        let mut conn = Trickle::new(Vec::new());
        send_response(&mut conn, &response).unwrap();
        assert_eq!(conn.output.len(), RESPONSE_LEN);

        let mut conn = Trickle::new(conn.output);
        let received = recv_response(&mut conn).unwrap();
        assert_eq!(received.status, Status::Ok);
        assert_eq!(received.type_code, b'h');
        assert_eq!(received.value.to_bits(), 57.25f32.to_bits());
    }

    #[test]
    fn recv_all_returns_requested_size() {
        let mut conn = Trickle::new(vec![1, 2, 3, 4, 5]);
        assert_eq!(recv_all(&mut conn, 3).unwrap(), vec![1, 2, 3]);
    }

    #[test]
    fn eof_mid_message_is_a_transport_error() {
        let mut partial = WeatherRequest::new(b't', "roma").to_bytes().to_vec();
        partial.truncate(10);
        let mut conn = Trickle::new(partial);
        let err = recv_request(&mut conn).unwrap_err();
        match err {
            WeatherError::Transport(e) => assert_eq!(e.kind(), io::ErrorKind::UnexpectedEof),
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn zero_length_write_is_a_transport_error() {
        let err = send_all(&mut Closed, b"abc").unwrap_err();
        assert!(matches!(err, WeatherError::Transport(ref e) if e.kind() == io::ErrorKind::WriteZero));
    }
}
