//! WiFi bring-up for ESP-AT style co-processors.
//!
//! Many boards reach the network through a second chip (ESP8285, ESP32)
//! driven with AT commands over a UART. [`WifiModule`] owns that UART and
//! walks the module through station mode and joining an access point. After
//! that, sockets are opened through whatever [`Connect`](super::Connect)
//! implementation the platform provides on top of the same link.
//!
//! The module state lives in the struct, not in globals, so several modules
//! (or a fake UART in tests) can exist side by side.

use core::fmt;
use heapless::{String, Vec};

use super::{Read, Write, write_all};
use crate::logging::{debug, trace};
use crate::provisioning::Credentials;

/// Maximum length of one AT command, terminator excluded.
pub const MAX_COMMAND_LEN: usize = 256;
/// Longest response line kept. Longer lines are truncated.
pub const MAX_RESPONSE_LINE_LEN: usize = 128;

/// Errors from the WiFi co-processor.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum WifiError {
    /// [`WifiModule::join`] was called before [`WifiModule::init`].
    NotInitialized,
    /// The UART failed to read or write.
    Uart,
    /// The module answered `ERROR` or `FAIL`.
    Rejected,
    /// The UART reached end of stream before a final status.
    NoResponse,
    /// The command does not fit in [`MAX_COMMAND_LEN`].
    Overflow,
}

impl fmt::Display for WifiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WifiError::NotInitialized => f.write_str("module not initialized"),
            WifiError::Uart => f.write_str("uart failure"),
            WifiError::Rejected => f.write_str("command rejected"),
            WifiError::NoResponse => f.write_str("no response from module"),
            WifiError::Overflow => f.write_str("command too long"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for WifiError {}

#[cfg(feature = "defmt")]
impl defmt::Format for WifiError {
    fn format(&self, f: defmt::Formatter) {
        match self {
            WifiError::NotInitialized => defmt::write!(f, "NotInitialized"),
            WifiError::Uart => defmt::write!(f, "Uart"),
            WifiError::Rejected => defmt::write!(f, "Rejected"),
            WifiError::NoResponse => defmt::write!(f, "NoResponse"),
            WifiError::Overflow => defmt::write!(f, "Overflow"),
        }
    }
}

/// An AT-command WiFi module on a UART.
#[derive(Debug)]
pub struct WifiModule<U: Read + Write> {
    uart: U,
    initialized: bool,
}

impl<U: Read + Write> WifiModule<U> {
    /// Take ownership of the UART. Nothing is sent yet.
    pub fn new(uart: U) -> Self {
        Self {
            uart,
            initialized: false,
        }
    }

    /// Whether [`init`](WifiModule::init) has completed.
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Check the module responds and put it in station mode.
    ///
    /// Does nothing if the module is already initialized.
    pub fn init(&mut self) -> Result<(), WifiError> {
        if self.initialized {
            return Ok(());
        }
        self.command("AT")?;
        self.command("AT+CWMODE=1")?;
        self.initialized = true;
        debug!("wifi module ready");
        Ok(())
    }

    /// Join the access point named in `credentials`.
    pub fn join(&mut self, credentials: &Credentials) -> Result<(), WifiError> {
        if !self.initialized {
            return Err(WifiError::NotInitialized);
        }
        let mut command: String<MAX_COMMAND_LEN> = String::new();
        command
            .push_str("AT+CWJAP=\"")
            .map_err(|_| WifiError::Overflow)?;
        push_escaped(&mut command, &credentials.ssid)?;
        command.push_str("\",\"").map_err(|_| WifiError::Overflow)?;
        push_escaped(&mut command, &credentials.password)?;
        command.push('"').map_err(|_| WifiError::Overflow)?;

        debug!("joining {}", credentials.ssid.as_str());
        self.command(&command)
    }

    /// Give the UART back.
    pub fn release(self) -> U {
        self.uart
    }

    fn command(&mut self, command: &str) -> Result<(), WifiError> {
        write_all(&mut self.uart, command.as_bytes()).map_err(|_| WifiError::Uart)?;
        write_all(&mut self.uart, b"\r\n").map_err(|_| WifiError::Uart)?;
        self.uart.flush().map_err(|_| WifiError::Uart)?;

        loop {
            let line = self.read_line()?;
            match line.trim() {
                "OK" => return Ok(()),
                "ERROR" | "FAIL" => return Err(WifiError::Rejected),
                other => trace!("at: {}", other),
            }
        }
    }

    /// One response line without its terminator. Non-UTF-8 lines come back
    /// empty.
    fn read_line(&mut self) -> Result<String<MAX_RESPONSE_LINE_LEN>, WifiError> {
        let mut line: Vec<u8, MAX_RESPONSE_LINE_LEN> = Vec::new();
        let mut byte = [0u8; 1];
        loop {
            match self.uart.read(&mut byte) {
                Ok(0) if line.is_empty() => return Err(WifiError::NoResponse),
                Ok(0) => break,
                Ok(_) if byte[0] == b'\n' => break,
                // Overlong lines are truncated.
                Ok(_) => {
                    let _ = line.push(byte[0]);
                }
                Err(_) => return Err(WifiError::Uart),
            }
        }
        Ok(String::from_utf8(line).unwrap_or_default())
    }
}

/// Append `value` with the characters ESP-AT treats specially escaped.
fn push_escaped<const N: usize>(out: &mut String<N>, value: &str) -> Result<(), WifiError> {
    for c in value.chars() {
        if matches!(c, '"' | ',' | '\\') {
            out.push('\\').map_err(|_| WifiError::Overflow)?;
        }
        out.push(c).map_err(|_| WifiError::Overflow)?;
    }
    Ok(())
}
