//! Logical pulse patterns
//!
//! A [`PulsePattern`] is a carrier frequency plus alternating pulse/gap
//! values, stored either as microseconds or as carrier cycles. Conversion
//! between the two rounds to the nearest whole unit.

use crate::error::ProtocolError;

const MICROS_PER_SECOND: u64 = 1_000_000;

/// Unit of the values in a [`PulsePattern`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PatternType {
    /// Values are counts of carrier cycles
    Cycles,
    /// Values are durations in microseconds
    Intervals,
}

/// A vendor-neutral pulse train
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PulsePattern {
    pattern_type: PatternType,
    frequency: u32,
    values: Vec<u32>,
}

impl PulsePattern {
    /// Create a pattern, validating frequency and length
    pub fn new(
        pattern_type: PatternType,
        frequency: u32,
        values: Vec<u32>,
    ) -> Result<Self, ProtocolError> {
        if frequency == 0 {
            return Err(ProtocolError::InvalidFrequency(frequency));
        }
        if values.is_empty() {
            return Err(ProtocolError::EmptyPattern);
        }
        Ok(Self {
            pattern_type,
            frequency,
            values,
        })
    }

    /// Shorthand for a microsecond pattern
    pub fn intervals(frequency: u32, micros: Vec<u32>) -> Result<Self, ProtocolError> {
        Self::new(PatternType::Intervals, frequency, micros)
    }

    /// Shorthand for a carrier-cycle pattern
    pub fn cycles(frequency: u32, cycles: Vec<u32>) -> Result<Self, ProtocolError> {
        Self::new(PatternType::Cycles, frequency, cycles)
    }

    pub fn pattern_type(&self) -> PatternType {
        self.pattern_type
    }

    /// Carrier frequency in Hz
    pub fn frequency(&self) -> u32 {
        self.frequency
    }

    /// Raw values in this pattern's own unit
    pub fn values(&self) -> &[u32] {
        &self.values
    }

    /// Values expressed as microsecond durations
    pub fn to_intervals(&self) -> Vec<u32> {
        match self.pattern_type {
            PatternType::Intervals => self.values.clone(),
            PatternType::Cycles => self
                .values
                .iter()
                .map(|&c| cycles_to_micros(c, self.frequency))
                .collect(),
        }
    }

    /// Values expressed as carrier-cycle counts
    ///
    /// A non-zero duration never collapses to zero cycles.
    pub fn to_cycles(&self) -> Vec<u32> {
        match self.pattern_type {
            PatternType::Cycles => self.values.clone(),
            PatternType::Intervals => self
                .values
                .iter()
                .map(|&us| micros_to_cycles(us, self.frequency))
                .collect(),
        }
    }

    /// Total duration of the train in microseconds
    pub fn total_micros(&self) -> u64 {
        self.to_intervals().iter().map(|&us| us as u64).sum()
    }
}

fn micros_to_cycles(micros: u32, frequency: u32) -> u32 {
    let cycles = (micros as u64 * frequency as u64 + MICROS_PER_SECOND / 2) / MICROS_PER_SECOND;
    let cycles = if micros > 0 { cycles.max(1) } else { cycles };
    u32::try_from(cycles).unwrap_or(u32::MAX)
}

fn cycles_to_micros(cycles: u32, frequency: u32) -> u32 {
    let frequency = frequency as u64;
    let micros = (cycles as u64 * MICROS_PER_SECOND + frequency / 2) / frequency;
    u32::try_from(micros).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_intervals_to_cycles_at_38khz() {
        // 38 kHz carrier: one cycle is ~26.3us
        let p = PulsePattern::intervals(38_000, vec![9000, 4500, 560, 560]).unwrap();
        assert_eq!(p.to_cycles(), vec![342, 171, 21, 21]);
    }

    #[test]
    fn test_cycles_to_intervals_at_40khz() {
        let p = PulsePattern::cycles(40_000, vec![40, 20]).unwrap();
        assert_eq!(p.to_intervals(), vec![1000, 500]);
    }

    #[test]
    fn test_identity_in_own_unit() {
        let p = PulsePattern::intervals(38_000, vec![100, 200]).unwrap();
        assert_eq!(p.to_intervals(), vec![100, 200]);
        let p = PulsePattern::cycles(38_000, vec![3, 4]).unwrap();
        assert_eq!(p.to_cycles(), vec![3, 4]);
    }

    #[test]
    fn test_short_pulse_keeps_one_cycle() {
        let p = PulsePattern::intervals(38_000, vec![1, 0]).unwrap();
        assert_eq!(p.to_cycles(), vec![1, 0]);
    }

    #[test]
    fn test_rejects_invalid() {
        assert_eq!(
            PulsePattern::intervals(0, vec![1]),
            Err(ProtocolError::InvalidFrequency(0))
        );
        assert_eq!(
            PulsePattern::cycles(38_000, vec![]),
            Err(ProtocolError::EmptyPattern)
        );
    }

    #[test]
    fn test_total_micros() {
        let p = PulsePattern::intervals(38_000, vec![100, 100, 100, 100]).unwrap();
        assert_eq!(p.total_micros(), 400);
    }

    proptest! {
        #[test]
        fn cycle_conversion_within_one_period(
            freq in 30_000u32..60_000u32,
            micros in prop::collection::vec(1u32..100_000u32, 1..64)
        ) {
            let p = PulsePattern::intervals(freq, micros.clone()).unwrap();
            let back = PulsePattern::cycles(freq, p.to_cycles()).unwrap().to_intervals();
            let period = 1_000_000 / freq + 1;
            for (orig, round_tripped) in micros.iter().zip(back.iter()) {
                let diff = (*orig as i64 - *round_tripped as i64).unsigned_abs();
                prop_assert!(diff <= period as u64, "{} vs {}", orig, round_tripped);
            }
        }
    }
}
