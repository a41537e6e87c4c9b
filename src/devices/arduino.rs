use std::io::{ErrorKind, Read};
use std::time::Duration;

use serialport::SerialPort;
use thiserror::Error;
use tracing::{error, info};

/// Idle read timeout; `read_line` gives up and reports "no line" after this.
const READ_TIMEOUT: Duration = Duration::from_secs(1);

/// The board resets when the port opens; give it time to come back up
/// before expecting data.
const SETTLE_DELAY: Duration = Duration::from_secs(2);

#[derive(Error, Debug)]
pub enum ArduinoError {
    #[error("serial port error: {0}")]
    Serial(#[from] serialport::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("device not connected")]
    NotConnected,
}

pub type Result<T> = std::result::Result<T, ArduinoError>;

/// Line-oriented link to the Arduino pushing stall telemetry.
pub struct Arduino {
    port: Option<Box<dyn SerialPort>>,
    port_name: String,
    baud_rate: u32,
    pending: Vec<u8>,
}

impl Arduino {
    pub fn new(port_name: &str, baud_rate: u32) -> Self {
        info!(
            "Initializing Arduino link on {} at {} baud",
            port_name, baud_rate
        );
        Arduino {
            port: None,
            port_name: port_name.to_string(),
            baud_rate,
            pending: Vec::new(),
        }
    }

    pub fn connect(&mut self) -> Result<()> {
        info!("Attempting to open serial port {}", self.port_name);
        let port = serialport::new(&self.port_name, self.baud_rate)
            .timeout(READ_TIMEOUT)
            .open()?;
        self.port = Some(port);

        std::thread::sleep(SETTLE_DELAY);
        info!("Serial port {} open, waiting for data", self.port_name);
        Ok(())
    }

    pub fn is_connected(&self) -> bool {
        self.port.is_some()
    }

    /// Read the next complete line, trimmed of surrounding whitespace.
    ///
    /// Returns `Ok(None)` when the read timeout expires before a full line
    /// arrives; bytes received ahead of the newline stay buffered for the
    /// next call.
    pub fn read_line(&mut self) -> Result<Option<String>> {
        let port = match &mut self.port {
            Some(port) => port,
            None => {
                error!("Attempted to read but serial port is not open");
                return Err(ArduinoError::NotConnected);
            }
        };

        loop {
            if let Some(line) = take_line(&mut self.pending) {
                return Ok(Some(line));
            }

            let mut chunk = [0u8; 256];
            match port.read(&mut chunk) {
                Ok(0) => return Ok(None),
                Ok(n) => self.pending.extend_from_slice(&chunk[..n]),
                Err(e) if e.kind() == ErrorKind::TimedOut => return Ok(None),
                Err(e) => return Err(e.into()),
            }
        }
    }

    pub fn close(&mut self) {
        if self.port.take().is_some() {
            info!("Serial port {} closed", self.port_name);
        }
    }
}

/// Split the first newline-terminated line off the pending buffer.
fn take_line(pending: &mut Vec<u8>) -> Option<String> {
    let pos = pending.iter().position(|&b| b == b'\n')?;
    let raw: Vec<u8> = pending.drain(..=pos).collect();
    Some(String::from_utf8_lossy(&raw).trim().to_string())
}
