//! Client-server wire protocol definitions.
//!
//! Both messages have a fixed size known to each end, so there is no
//! length prefix, version field or magic number on the wire.
//!
//! Request layout:
//! ```ignore
//! |  u8  |        [u8; 64]            |
//! | type | city, NUL padded to 64     |
//! ```
//!
//! Response layout (multi-byte fields in network byte order):
//! ```ignore
//! |   u32    |  u8  | [u8; 3] |   f32   |
//! |  status  | type |  zero   |  value  |
//! ```
//! The three zero bytes keep the response at the size of the native
//! `{ u32, char, float }` struct that existing peers exchange.

use std::borrow::Cow;
use std::io::{self, Read, Write};

use byteorder::{ByteOrder, NetworkEndian, ReadBytesExt, WriteBytesExt};

/// Default TCP port for client and server.
pub const DEFAULT_PORT: u16 = 56700;

/// Default server the client talks to.
pub const DEFAULT_SERVER: &str = "127.0.0.1";

/// Pending-connection queue length of the server's listening socket.
pub const LISTEN_BACKLOG: i32 = 5;

/// Size of the city field, terminator included.
pub const CITY_LEN: usize = 64;

/// Encoded size of a [`WeatherRequest`].
pub const REQUEST_LEN: usize = 1 + CITY_LEN;

/// Encoded size of a [`WeatherResponse`].
pub const RESPONSE_LEN: usize = 12;

const RESPONSE_PADDING: usize = 3;

/// Kind of weather quantity a request asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeasurementType {
    /// `t`, degrees Celsius
    Temperature,
    /// `h`, relative humidity percentage
    Humidity,
    /// `w`, wind speed in km/h
    Wind,
    /// `p`, atmospheric pressure in hPa
    Pressure,
}

impl MeasurementType {
    /// All measurement types, in wire-code order `t h w p`.
    pub const ALL: [MeasurementType; 4] = [
        MeasurementType::Temperature,
        MeasurementType::Humidity,
        MeasurementType::Wind,
        MeasurementType::Pressure,
    ];

    /// Decode a type code, ignoring ASCII case.
    pub fn from_code(code: u8) -> Option<Self> {
        match code.to_ascii_lowercase() {
            b't' => Some(MeasurementType::Temperature),
            b'h' => Some(MeasurementType::Humidity),
            b'w' => Some(MeasurementType::Wind),
            b'p' => Some(MeasurementType::Pressure),
            _ => None,
        }
    }

    /// The normalized (lowercase) wire code.
    pub fn code(self) -> u8 {
        match self {
            MeasurementType::Temperature => b't',
            MeasurementType::Humidity => b'h',
            MeasurementType::Wind => b'w',
            MeasurementType::Pressure => b'p',
        }
    }

    /// Human readable name.
    pub fn label(self) -> &'static str {
        match self {
            MeasurementType::Temperature => "Temperature",
            MeasurementType::Humidity => "Humidity",
            MeasurementType::Wind => "Wind",
            MeasurementType::Pressure => "Pressure",
        }
    }

    /// Unit suffix, including the separating space where one is customary.
    pub fn unit(self) -> &'static str {
        match self {
            MeasurementType::Temperature => "°C",
            MeasurementType::Humidity => "%",
            MeasurementType::Wind => " km/h",
            MeasurementType::Pressure => " hPa",
        }
    }
}

/// Outcome of a request, as carried in [`WeatherResponse::status`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// The value field holds a measurement.
    Ok,
    /// The city is not in the supported set.
    CityNotFound,
    /// Unknown type code or empty city.
    InvalidRequest,
    /// A status code this side does not know about.
    Unknown(u32),
}

impl From<u32> for Status {
    fn from(code: u32) -> Self {
        match code {
            0 => Status::Ok,
            1 => Status::CityNotFound,
            2 => Status::InvalidRequest,
            other => Status::Unknown(other),
        }
    }
}

impl From<Status> for u32 {
    fn from(status: Status) -> Self {
        match status {
            Status::Ok => 0,
            Status::CityNotFound => 1,
            Status::InvalidRequest => 2,
            Status::Unknown(code) => code,
        }
    }
}

/// Client request message.
///
/// The city is stored as a zero-filled fixed block so nothing beyond the
/// terminator ever reaches the wire except zeros.
#[derive(Clone, PartialEq, Eq)]
pub struct WeatherRequest {
    type_code: u8,
    city: [u8; CITY_LEN],
}

impl WeatherRequest {
    /// Build a request. The city is cut to `CITY_LEN - 1` bytes on a char
    /// boundary; the type code is kept as given.
    pub fn new(type_code: u8, city: &str) -> Self {
        let mut end = city.len().min(CITY_LEN - 1);
        while !city.is_char_boundary(end) {
            end -= 1;
        }
        let mut field = [0u8; CITY_LEN];
        field[..end].copy_from_slice(&city.as_bytes()[..end]);
        Self {
            type_code,
            city: field,
        }
    }

    /// Raw type code as sent by the client.
    pub fn type_code(&self) -> u8 {
        self.type_code
    }

    /// City bytes up to the first NUL.
    pub fn city_bytes(&self) -> &[u8] {
        let end = self
            .city
            .iter()
            .position(|&b| b == 0)
            .unwrap_or(CITY_LEN);
        &self.city[..end]
    }

    /// City as text, with invalid UTF-8 replaced.
    pub fn city(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(self.city_bytes())
    }

    /// Serialize Request to bytes (to send to server)
    pub fn serialize(&self, buf: &mut impl Write) -> io::Result<usize> {
        buf.write_u8(self.type_code)?;
        buf.write_all(&self.city)?;
        Ok(REQUEST_LEN)
    }

    /// Deserialize Request from bytes. The last city byte is forced to NUL.
    pub fn deserialize(buf: &mut impl Read) -> io::Result<WeatherRequest> {
        let type_code = buf.read_u8()?;
        let mut city = [0u8; CITY_LEN];
        buf.read_exact(&mut city)?;
        city[CITY_LEN - 1] = 0;
        Ok(WeatherRequest { type_code, city })
    }

    /// Encode into the fixed-size wire block.
    pub fn to_bytes(&self) -> [u8; REQUEST_LEN] {
        let mut bytes = [0u8; REQUEST_LEN];
        bytes[0] = self.type_code;
        bytes[1..].copy_from_slice(&self.city);
        bytes
    }

    /// Decode from the fixed-size wire block.
    pub fn from_bytes(bytes: &[u8; REQUEST_LEN]) -> Self {
        let mut city = [0u8; CITY_LEN];
        city.copy_from_slice(&bytes[1..]);
        city[CITY_LEN - 1] = 0;
        Self {
            type_code: bytes[0],
            city,
        }
    }
}

impl std::fmt::Debug for WeatherRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WeatherRequest")
            .field("type_code", &char::from(self.type_code))
            .field("city", &self.city())
            .finish()
    }
}

/// Server response message.
///
/// `type_code` and `value` are meaningful only when `status` is
/// [`Status::Ok`]; otherwise the server sends them as zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeatherResponse {
    /// Outcome of the request.
    pub status: Status,
    /// Echoed lowercase type code, 0 when not OK.
    pub type_code: u8,
    /// Generated measurement, 0.0 when not OK.
    pub value: f32,
}

impl WeatherResponse {
    /// A successful response carrying a measurement.
    pub fn ok(kind: MeasurementType, value: f32) -> Self {
        Self {
            status: Status::Ok,
            type_code: kind.code(),
            value,
        }
    }

    /// A refusal; type and value are cleared.
    pub fn refused(status: Status) -> Self {
        Self {
            status,
            type_code: 0,
            value: 0.0,
        }
    }

    /// The measurement type, if the echoed code is a known one.
    pub fn measurement(&self) -> Option<MeasurementType> {
        MeasurementType::from_code(self.type_code)
    }

    /// Serialize Response to bytes (to send to client)
    ///
    /// Returns the number of bytes written
    pub fn serialize(&self, buf: &mut impl Write) -> io::Result<usize> {
        buf.write_u32::<NetworkEndian>(self.status.into())?;
        buf.write_u8(self.type_code)?;
        buf.write_all(&[0u8; RESPONSE_PADDING])?;
        buf.write_f32::<NetworkEndian>(self.value)?;
        Ok(RESPONSE_LEN)
    }

    /// Deserialize Response from bytes (to receive from server)
    pub fn deserialize(buf: &mut impl Read) -> io::Result<WeatherResponse> {
        let status = Status::from(buf.read_u32::<NetworkEndian>()?);
        let type_code = buf.read_u8()?;
        let mut padding = [0u8; RESPONSE_PADDING];
        buf.read_exact(&mut padding)?;
        let value = buf.read_f32::<NetworkEndian>()?;
        Ok(WeatherResponse {
            status,
            type_code,
            value,
        })
    }

    /// Encode into the fixed-size wire block.
    pub fn to_bytes(&self) -> [u8; RESPONSE_LEN] {
        let mut bytes = [0u8; RESPONSE_LEN];
        NetworkEndian::write_u32(&mut bytes[0..4], self.status.into());
        bytes[4] = self.type_code;
        NetworkEndian::write_f32(&mut bytes[8..12], self.value);
        bytes
    }

    /// Decode from the fixed-size wire block.
    pub fn from_bytes(bytes: &[u8; RESPONSE_LEN]) -> Self {
        let status = Status::from(NetworkEndian::read_u32(&bytes[0..4]));
        let value = NetworkEndian::read_f32(&bytes[8..12]);
        Self {
            status,
            type_code: bytes[4],
            value,
        }
    }
}
