//! Pattern adapter selection
//!
//! Maps a [`TransmitterVariant`] to the encoding its transmitter consumes
//! and shapes a [`PulsePattern`] into that encoding.

use tracing::trace;

use crate::error::ProtocolError;
use crate::pattern::PulsePattern;
use crate::transmit_info::TransmitInfo;
use crate::TransmitterVariant;

/// Encoding required by a transmitter variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PatternAdapterKind {
    /// Carrier-cycle counts; not selected by any variant today
    ToCycles,
    /// Microsecond durations
    ToIntervals,
    /// `frequency,c1,c2,...` token with carrier-cycle values
    ToObsoleteString,
    /// Carrier-cycle frame for the HTC SDK
    ToHtcPattern,
}

impl PatternAdapterKind {
    /// Pure, total mapping from variant to adapter kind
    pub fn for_variant(variant: TransmitterVariant) -> Self {
        match variant {
            TransmitterVariant::ObsoleteSamsung => PatternAdapterKind::ToObsoleteString,
            TransmitterVariant::Htc => PatternAdapterKind::ToHtcPattern,
            // native, Le and LG all take microsecond intervals
            _ => PatternAdapterKind::ToIntervals,
        }
    }
}

/// Shapes logical patterns into the [`TransmitInfo`] a transmitter expects
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PatternAdapter {
    kind: PatternAdapterKind,
}

impl PatternAdapter {
    /// Create the adapter for a detected variant
    pub fn new(variant: TransmitterVariant) -> Self {
        Self::with_kind(PatternAdapterKind::for_variant(variant))
    }

    /// Create an adapter for an explicit kind
    pub fn with_kind(kind: PatternAdapterKind) -> Self {
        Self { kind }
    }

    pub fn kind(&self) -> PatternAdapterKind {
        self.kind
    }

    /// Encode a pattern for the selected transmitter
    pub fn create_transmit_info(&self, pattern: &PulsePattern) -> Result<TransmitInfo, ProtocolError> {
        let frequency = pattern.frequency();
        trace!(
            "Adapting {:?} pattern ({} values) with {:?}",
            pattern.pattern_type(),
            pattern.values().len(),
            self.kind
        );

        match self.kind {
            PatternAdapterKind::ToIntervals => {
                TransmitInfo::with_durations(frequency, pattern.to_intervals())
            }
            PatternAdapterKind::ToCycles | PatternAdapterKind::ToHtcPattern => {
                TransmitInfo::with_durations(frequency, pattern.to_cycles())
            }
            PatternAdapterKind::ToObsoleteString => {
                TransmitInfo::with_obsolete_string(frequency, obsolete_token(frequency, &pattern.to_cycles()))
            }
        }
    }
}

/// Build the legacy `frequency,v1,v2,...` token
pub fn obsolete_token(frequency: u32, values: &[u32]) -> String {
    let mut token = frequency.to_string();
    for v in values {
        token.push(',');
        token.push_str(&v.to_string());
    }
    token
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PatternType;

    #[test]
    fn test_selector_mapping() {
        assert_eq!(
            PatternAdapterKind::for_variant(TransmitterVariant::ObsoleteSamsung),
            PatternAdapterKind::ToObsoleteString
        );
        assert_eq!(
            PatternAdapterKind::for_variant(TransmitterVariant::Htc),
            PatternAdapterKind::ToHtcPattern
        );
        for variant in [
            TransmitterVariant::NativeHardware,
            TransmitterVariant::LeCoolpad,
            TransmitterVariant::LgWithDevice,
            TransmitterVariant::LgWithoutDevice,
        ] {
            assert_eq!(
                PatternAdapterKind::for_variant(variant),
                PatternAdapterKind::ToIntervals
            );
        }
    }

    #[test]
    fn test_to_cycles_unreachable_from_variants() {
        assert!(TransmitterVariant::ALL
            .iter()
            .all(|v| PatternAdapterKind::for_variant(*v) != PatternAdapterKind::ToCycles));
    }

    #[test]
    fn test_intervals_preserved_end_to_end() {
        let pattern = PulsePattern::intervals(38_000, vec![100, 100, 100, 100]).unwrap();
        let info = PatternAdapter::new(TransmitterVariant::NativeHardware)
            .create_transmit_info(&pattern)
            .unwrap();
        assert_eq!(info.frequency(), 38_000);
        assert_eq!(info.durations(), Some(&[100, 100, 100, 100][..]));
    }

    #[test]
    fn test_htc_gets_cycles() {
        let pattern = PulsePattern::intervals(40_000, vec![1000, 500]).unwrap();
        let info = PatternAdapter::new(TransmitterVariant::Htc)
            .create_transmit_info(&pattern)
            .unwrap();
        assert_eq!(info.durations(), Some(&[40, 20][..]));
    }

    #[test]
    fn test_obsolete_token() {
        let pattern = PulsePattern::new(PatternType::Cycles, 38_000, vec![100, 100, 100, 100]).unwrap();
        let info = PatternAdapter::new(TransmitterVariant::ObsoleteSamsung)
            .create_transmit_info(&pattern)
            .unwrap();
        assert_eq!(info.obsolete_string(), Some("38000,100,100,100,100"));
        assert!(info.durations().is_none());
    }
}
