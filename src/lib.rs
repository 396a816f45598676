pub mod protocol;

pub mod transport;

pub mod generator;

pub mod responder;

pub mod server;

pub mod client;

pub mod cli;

pub mod error;

pub use crate::client::WeatherClient;
pub use crate::error::{Result, WeatherError};
pub use crate::generator::WeatherGenerator;
pub use crate::protocol::{MeasurementType, Status, WeatherRequest, WeatherResponse};
pub use crate::server::WeatherServer;
