#![deny(unsafe_code)]

//! # WiFi credential provisioning
//!
//! Devices without a keyboard receive their WiFi credentials as a QR code
//! held up to the camera. The code carries `ssid,password` as plain text.
//! Decoding the image is left to the platform (it implements
//! [`CodeSource`]); this module turns decoded payloads into [`Credentials`].
//!
//! ```rust
//! use iotreq::provisioning::Credentials;
//!
//! let credentials = Credentials::from_qr_payload("greenhouse,s3cret,with,commas").unwrap();
//! assert_eq!(credentials.ssid.as_str(), "greenhouse");
//! assert_eq!(credentials.password.as_str(), "s3cret,with,commas");
//! ```

use core::fmt;
use heapless::String;

use crate::logging::debug;

/// Longest SSID allowed by 802.11.
pub const MAX_SSID_LEN: usize = 32;
/// Longest WPA passphrase, or a 64-digit hex PSK.
pub const MAX_PASSWORD_LEN: usize = 64;
/// Longest QR payload a [`CodeSource`] may return.
pub const MAX_PAYLOAD_LEN: usize = 128;

/// Errors from parsing a provisioning payload.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum ProvisioningError {
    /// The payload has no `,` separating SSID and password.
    Malformed,
    /// The SSID or password is longer than WiFi allows.
    TooLong,
}

impl fmt::Display for ProvisioningError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProvisioningError::Malformed => f.write_str("payload is not `ssid,password`"),
            ProvisioningError::TooLong => f.write_str("ssid or password too long"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ProvisioningError {}

#[cfg(feature = "defmt")]
impl defmt::Format for ProvisioningError {
    fn format(&self, f: defmt::Formatter) {
        match self {
            ProvisioningError::Malformed => defmt::write!(f, "Malformed"),
            ProvisioningError::TooLong => defmt::write!(f, "TooLong"),
        }
    }
}

/// WiFi network credentials.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    /// Network name.
    pub ssid: String<MAX_SSID_LEN>,
    /// Passphrase. May be empty for open networks.
    pub password: String<MAX_PASSWORD_LEN>,
}

impl Credentials {
    /// Parse an `ssid,password` payload.
    ///
    /// Only the first `,` separates the fields, so passwords may contain
    /// commas. SSIDs cannot.
    pub fn from_qr_payload(payload: &str) -> Result<Self, ProvisioningError> {
        let (ssid, password) = payload
            .split_once(',')
            .ok_or(ProvisioningError::Malformed)?;
        Ok(Self {
            ssid: String::try_from(ssid).map_err(|_| ProvisioningError::TooLong)?,
            password: String::try_from(password).map_err(|_| ProvisioningError::TooLong)?,
        })
    }
}

// Keeps the passphrase out of logs.
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("ssid", &self.ssid)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// A source of decoded QR payloads, usually a camera plus a decoder.
pub trait CodeSource {
    /// Associated error type
    type Error: fmt::Debug;
    /// Capture one frame and decode it.
    ///
    /// Returns `None` when the frame holds no readable code.
    fn next_payload(&mut self) -> Result<Option<String<MAX_PAYLOAD_LEN>>, Self::Error>;
}

/// Poll `source` until a frame carries valid credentials.
///
/// Frames without a code and codes that do not parse are skipped. Only an
/// error from the source itself ends the loop early.
pub fn wait_for_credentials<S: CodeSource>(source: &mut S) -> Result<Credentials, S::Error> {
    loop {
        let Some(payload) = source.next_payload()? else {
            continue;
        };
        match Credentials::from_qr_payload(&payload) {
            Ok(credentials) => {
                debug!("provisioned for ssid {}", credentials.ssid.as_str());
                return Ok(credentials);
            }
            Err(err) => debug!("ignoring code: {}", err),
        }
    }
}
