//! Rendering of the final key.

use serde::Serialize;

use crate::crypto::Keypair;

/// How the result is written to stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Three labelled lines
    #[default]
    Plain,
    /// One JSON object
    Json,
}

/// The printable form of a found key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeyReport {
    /// Seed and public key, hex encoded
    pub private_key: String,
    /// Hex encoded public key
    pub public_key: String,
    /// Node address in IPv6 notation
    pub address: String,
}

impl KeyReport {
    pub fn new(keypair: &Keypair) -> Self {
        Self {
            private_key: keypair.private_key_hex(),
            public_key: keypair.public_key().to_hex(),
            address: keypair.address().to_string(),
        }
    }

    /// Renders the report, without a trailing newline.
    pub fn render(&self, format: OutputFormat) -> Result<String, serde_json::Error> {
        match format {
            OutputFormat::Plain => Ok(format!(
                "Private: {}\nPublic: {}\nIP: {}",
                self.private_key, self.public_key, self.address
            )),
            OutputFormat::Json => serde_json::to_string(self),
        }
    }
}
