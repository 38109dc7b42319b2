//! Physical encoding of one pulse train
//!
//! A [`TransmitInfo`] always carries exactly one [`PatternEncoding`]. The
//! two encodings are variants of one enum, so "both" and "neither" cannot
//! be constructed.

use std::fmt;

use crate::error::ProtocolError;

/// The physical encoding a transmitter consumes
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PatternEncoding {
    /// Alternating pulse/gap values (microseconds or carrier cycles)
    Durations(Vec<u32>),
    /// Comma-joined `frequency,v1,v2,...` token for the legacy Samsung service
    ObsoleteString(String),
}

impl PatternEncoding {
    /// Short name used in diagnostics
    pub fn kind(&self) -> &'static str {
        match self {
            PatternEncoding::Durations(_) => "durations",
            PatternEncoding::ObsoleteString(_) => "obsolete string",
        }
    }
}

/// Carrier frequency plus one physical pulse encoding
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TransmitInfo {
    frequency: u32,
    encoding: PatternEncoding,
}

impl TransmitInfo {
    /// Create transmit info carrying a duration sequence
    pub fn with_durations(frequency: u32, durations: Vec<u32>) -> Result<Self, ProtocolError> {
        if frequency == 0 {
            return Err(ProtocolError::InvalidFrequency(frequency));
        }
        if durations.is_empty() {
            return Err(ProtocolError::EmptyPattern);
        }
        Ok(Self {
            frequency,
            encoding: PatternEncoding::Durations(durations),
        })
    }

    /// Create transmit info carrying an obsolete vendor token
    ///
    /// The token must start with the frequency and contain at least one value.
    pub fn with_obsolete_string(
        frequency: u32,
        token: impl Into<String>,
    ) -> Result<Self, ProtocolError> {
        if frequency == 0 {
            return Err(ProtocolError::InvalidFrequency(frequency));
        }
        let token = token.into();
        let mut fields = token.split(',');
        let leading = fields.next().and_then(|f| f.trim().parse::<u32>().ok());
        if leading != Some(frequency) {
            return Err(ProtocolError::InvalidToken(token));
        }
        if fields.next().is_none() {
            return Err(ProtocolError::EmptyPattern);
        }
        Ok(Self {
            frequency,
            encoding: PatternEncoding::ObsoleteString(token),
        })
    }

    /// Carrier frequency in Hz
    pub fn frequency(&self) -> u32 {
        self.frequency
    }

    /// The encoding this info carries
    pub fn encoding(&self) -> &PatternEncoding {
        &self.encoding
    }

    /// Duration sequence, if this info carries one
    pub fn durations(&self) -> Option<&[u32]> {
        match &self.encoding {
            PatternEncoding::Durations(d) => Some(d),
            PatternEncoding::ObsoleteString(_) => None,
        }
    }

    /// Obsolete vendor token, if this info carries one
    pub fn obsolete_string(&self) -> Option<&str> {
        match &self.encoding {
            PatternEncoding::ObsoleteString(s) => Some(s),
            PatternEncoding::Durations(_) => None,
        }
    }

    /// Duration sequence, or an error naming the encoding actually carried
    pub fn require_durations(&self) -> Result<&[u32], ProtocolError> {
        self.durations().ok_or(ProtocolError::EncodingMismatch {
            expected: "durations",
            found: self.encoding.kind(),
        })
    }

    /// Obsolete token, or an error naming the encoding actually carried
    pub fn require_obsolete_string(&self) -> Result<&str, ProtocolError> {
        self.obsolete_string()
            .ok_or(ProtocolError::EncodingMismatch {
                expected: "obsolete string",
                found: self.encoding.kind(),
            })
    }
}

impl fmt::Display for TransmitInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TransmitInfo [{}]: ", self.frequency)?;
        match &self.encoding {
            PatternEncoding::Durations(durations) => {
                write!(f, " Count:{}: ", durations.len())?;
                for d in durations {
                    write!(f, ", {}", d)?;
                }
                Ok(())
            }
            PatternEncoding::ObsoleteString(token) => f.write_str(token),
        }
    }
}
