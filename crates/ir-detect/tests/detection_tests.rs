//! Integration tests for the detection chain
//!
//! These tests verify:
//! - Priority order (first success wins, later probes never run)
//! - Failure isolation (errors and panics count as "absent")
//! - Each concrete probe's detection technique against a fake device

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use ir_detect::{
    CapabilityProbe, CarrierFrequencyRange, ConsumerIrService, DetectionChain, DetectionConfig,
    DeviceContext, DeviceError, HtcCirControl, HtcReplyListener, LgIrBlaster, LgIrSdk,
    LinkListener, ServiceBinding, StringPrimitive, SystemService,
};
use ir_protocol::TransmitterVariant;
use parking_lot::Mutex;

// ============================================================================
// Fake device
// ============================================================================

mod fakes {
    use super::*;

    #[derive(Default)]
    pub struct FakeConsumerIr {
        pub has_emitter: bool,
        pub emitter_error: bool,
        pub transmit_error: bool,
        pub sent: Mutex<Vec<(u32, Vec<u32>)>>,
    }

    impl ConsumerIrService for FakeConsumerIr {
        fn has_ir_emitter(&self) -> Result<bool, DeviceError> {
            if self.emitter_error {
                return Err(DeviceError::Invocation("hasIrEmitter".into()));
            }
            Ok(self.has_emitter)
        }

        fn carrier_frequencies(&self) -> Result<Vec<CarrierFrequencyRange>, DeviceError> {
            Ok(vec![CarrierFrequencyRange::new(30_000, 60_000)])
        }

        fn transmit(&self, frequency: u32, pattern: &[u32]) -> Result<(), DeviceError> {
            if self.transmit_error {
                return Err(DeviceError::Invocation("missing TRANSMIT_IR".into()));
            }
            self.sent.lock().push((frequency, pattern.to_vec()));
            Ok(())
        }
    }

    pub struct FakePrimitive {
        pub fail: bool,
        pub received: Mutex<Vec<String>>,
    }

    impl StringPrimitive for FakePrimitive {
        fn invoke(&self, arg: &str) -> Result<(), DeviceError> {
            if self.fail {
                return Err(DeviceError::Invocation("write_irsend".into()));
            }
            self.received.lock().push(arg.to_string());
            Ok(())
        }
    }

    pub struct FakeIrda {
        pub primitive: Option<Arc<FakePrimitive>>,
    }

    impl SystemService for FakeIrda {
        fn bind_primitive(&self, name: &str) -> Option<Arc<dyn StringPrimitive>> {
            if name != "write_irsend" {
                return None;
            }
            self.primitive
                .clone()
                .map(|p| p as Arc<dyn StringPrimitive>)
        }
    }

    pub struct FakeLgSdk {
        pub supported: Result<bool, DeviceError>,
    }

    impl LgIrSdk for FakeLgSdk {
        fn is_sdk_supported(&self) -> Result<bool, DeviceError> {
            self.supported.clone()
        }

        fn open(&self, _listener: Arc<dyn LinkListener>) -> Result<Arc<dyn LgIrBlaster>, DeviceError> {
            Err(DeviceError::ServiceUnavailable("not used".into()))
        }
    }

    #[derive(Default)]
    pub struct FakeDevice {
        pub consumer_ir: Option<Arc<FakeConsumerIr>>,
        pub packages: Vec<String>,
        pub packages_error: bool,
        pub irda: Option<Arc<FakeIrda>>,
        pub lg: Option<Arc<FakeLgSdk>>,
    }

    impl DeviceContext for FakeDevice {
        fn consumer_ir(&self) -> Option<Arc<dyn ConsumerIrService>> {
            self.consumer_ir
                .clone()
                .map(|c| c as Arc<dyn ConsumerIrService>)
        }

        fn installed_packages(&self) -> Result<Vec<String>, DeviceError> {
            if self.packages_error {
                return Err(DeviceError::EnumerationFailed("package manager died".into()));
            }
            Ok(self.packages.clone())
        }

        fn system_service(&self, key: &str) -> Option<Arc<dyn SystemService>> {
            if key != "irda" {
                return None;
            }
            self.irda.clone().map(|s| s as Arc<dyn SystemService>)
        }

        fn brand(&self) -> String {
            "generic".into()
        }

        fn bind_service(
            &self,
            _binding: &ServiceBinding,
            _listener: Arc<dyn LinkListener>,
        ) -> Result<(), DeviceError> {
            Err(DeviceError::Binding("not used".into()))
        }

        fn unbind_service(&self, _binding: &ServiceBinding) -> Result<(), DeviceError> {
            Ok(())
        }

        fn htc_control(
            &self,
            _replies: Arc<dyn HtcReplyListener>,
        ) -> Result<Arc<dyn HtcCirControl>, DeviceError> {
            Err(DeviceError::ServiceUnavailable("not used".into()))
        }

        fn lg_sdk(&self) -> Option<Arc<dyn LgIrSdk>> {
            self.lg.clone().map(|s| s as Arc<dyn LgIrSdk>)
        }
    }

    #[derive(Clone, Copy, Debug)]
    pub enum Outcome {
        Found,
        Absent,
        Error,
        Panic,
    }

    /// Probe with a fixed answer that counts its invocations
    pub struct ScriptedProbe {
        pub variant: TransmitterVariant,
        pub outcome: Outcome,
        pub calls: Arc<AtomicUsize>,
    }

    impl ScriptedProbe {
        pub fn boxed(
            variant: TransmitterVariant,
            outcome: Outcome,
        ) -> (Box<dyn CapabilityProbe>, Arc<AtomicUsize>) {
            let calls = Arc::new(AtomicUsize::new(0));
            let probe = Self {
                variant,
                outcome,
                calls: calls.clone(),
            };
            (Box::new(probe), calls)
        }
    }

    impl CapabilityProbe for ScriptedProbe {
        fn name(&self) -> &'static str {
            "scripted"
        }

        fn variant(&self) -> TransmitterVariant {
            self.variant
        }

        fn has_transmitter(&self, _ctx: &dyn DeviceContext) -> Result<bool, DeviceError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match self.outcome {
                Outcome::Found => Ok(true),
                Outcome::Absent => Ok(false),
                Outcome::Error => Err(DeviceError::Invocation("scripted".into())),
                Outcome::Panic => panic!("scripted probe panic"),
            }
        }
    }
}

use fakes::*;

fn detect_default(device: &FakeDevice) -> Option<TransmitterVariant> {
    DetectionChain::new(&DetectionConfig::default()).detect(device)
}

// ============================================================================
// Chain semantics
// ============================================================================

#[test]
fn test_nothing_detected_returns_none() {
    let device = FakeDevice::default();
    assert_eq!(detect_default(&device), None);
}

#[test]
fn test_first_match_wins_later_probes_skipped() {
    let (p1, c1) = ScriptedProbe::boxed(TransmitterVariant::NativeHardware, Outcome::Absent);
    let (p2, c2) = ScriptedProbe::boxed(TransmitterVariant::Htc, Outcome::Absent);
    let (p3, c3) = ScriptedProbe::boxed(TransmitterVariant::LeCoolpad, Outcome::Found);
    let (p4, c4) = ScriptedProbe::boxed(TransmitterVariant::ObsoleteSamsung, Outcome::Found);

    let chain = DetectionChain::with_probes(vec![p1, p2, p3, p4]);
    assert_eq!(
        chain.detect(&FakeDevice::default()),
        Some(TransmitterVariant::LeCoolpad)
    );

    assert_eq!(c1.load(Ordering::SeqCst), 1);
    assert_eq!(c2.load(Ordering::SeqCst), 1);
    assert_eq!(c3.load(Ordering::SeqCst), 1);
    assert_eq!(c4.load(Ordering::SeqCst), 0);
}

#[test]
fn test_erroring_probe_does_not_stop_chain() {
    let (p1, _) = ScriptedProbe::boxed(TransmitterVariant::NativeHardware, Outcome::Error);
    let (p2, c2) = ScriptedProbe::boxed(TransmitterVariant::Htc, Outcome::Found);

    let chain = DetectionChain::with_probes(vec![p1, p2]);
    assert_eq!(chain.detect(&FakeDevice::default()), Some(TransmitterVariant::Htc));
    assert_eq!(c2.load(Ordering::SeqCst), 1);
}

#[test]
fn test_panicking_probe_does_not_stop_chain() {
    let (p1, _) = ScriptedProbe::boxed(TransmitterVariant::NativeHardware, Outcome::Panic);
    let (p2, _) = ScriptedProbe::boxed(TransmitterVariant::ObsoleteSamsung, Outcome::Found);

    let chain = DetectionChain::with_probes(vec![p1, p2]);
    assert_eq!(
        chain.detect(&FakeDevice::default()),
        Some(TransmitterVariant::ObsoleteSamsung)
    );
}

#[test]
fn test_all_failing_probes_yield_none() {
    let (p1, _) = ScriptedProbe::boxed(TransmitterVariant::NativeHardware, Outcome::Error);
    let (p2, _) = ScriptedProbe::boxed(TransmitterVariant::Htc, Outcome::Panic);
    let (p3, _) = ScriptedProbe::boxed(TransmitterVariant::LeCoolpad, Outcome::Absent);

    let chain = DetectionChain::with_probes(vec![p1, p2, p3]);
    assert_eq!(chain.detect(&FakeDevice::default()), None);
}

// ============================================================================
// Native probe
// ============================================================================

#[test]
fn test_native_detected_with_liveness_trial() {
    let ir = Arc::new(FakeConsumerIr {
        has_emitter: true,
        ..Default::default()
    });
    let device = FakeDevice {
        consumer_ir: Some(ir.clone()),
        ..Default::default()
    };

    assert_eq!(
        detect_default(&device),
        Some(TransmitterVariant::NativeHardware)
    );
    assert_eq!(*ir.sent.lock(), vec![(38_000, vec![100, 100, 100, 100])]);
}

#[test]
fn test_native_without_liveness_trial_sends_nothing() {
    let ir = Arc::new(FakeConsumerIr {
        has_emitter: true,
        ..Default::default()
    });
    let device = FakeDevice {
        consumer_ir: Some(ir.clone()),
        ..Default::default()
    };
    let config = DetectionConfig {
        liveness_trial: false,
        ..Default::default()
    };

    assert_eq!(
        DetectionChain::new(&config).detect(&device),
        Some(TransmitterVariant::NativeHardware)
    );
    assert!(ir.sent.lock().is_empty());
}

#[test]
fn test_native_without_emitter_falls_through() {
    let device = FakeDevice {
        consumer_ir: Some(Arc::new(FakeConsumerIr::default())),
        packages: vec!["com.htc.cirmodule".into()],
        ..Default::default()
    };
    assert_eq!(detect_default(&device), Some(TransmitterVariant::Htc));
}

#[test]
fn test_native_trial_failure_falls_through() {
    let device = FakeDevice {
        consumer_ir: Some(Arc::new(FakeConsumerIr {
            has_emitter: true,
            transmit_error: true,
            ..Default::default()
        })),
        packages: vec!["com.uei.quicksetsdk.letv".into()],
        ..Default::default()
    };
    assert_eq!(detect_default(&device), Some(TransmitterVariant::LeCoolpad));
}

#[test]
fn test_native_emitter_query_error_is_absent() {
    let device = FakeDevice {
        consumer_ir: Some(Arc::new(FakeConsumerIr {
            emitter_error: true,
            ..Default::default()
        })),
        ..Default::default()
    };
    assert_eq!(detect_default(&device), None);
}

// ============================================================================
// Package probes
// ============================================================================

#[test]
fn test_htc_package_substring_match() {
    let device = FakeDevice {
        packages: vec!["com.android.settings".into(), "com.htc.cirmodule.service".into()],
        ..Default::default()
    };
    assert_eq!(detect_default(&device), Some(TransmitterVariant::Htc));
}

#[test]
fn test_htc_outranks_le() {
    let device = FakeDevice {
        packages: vec![
            "com.uei.quicksetsdk.coolpad".into(),
            "com.htc.cirmodule".into(),
        ],
        ..Default::default()
    };
    assert_eq!(detect_default(&device), Some(TransmitterVariant::Htc));
}

#[test]
fn test_le_matches_either_package() {
    for pkg in ["com.uei.quicksetsdk.coolpad", "com.uei.quicksetsdk.letv"] {
        let device = FakeDevice {
            packages: vec![pkg.into()],
            ..Default::default()
        };
        assert_eq!(detect_default(&device), Some(TransmitterVariant::LeCoolpad));
    }
}

#[test]
fn test_package_enumeration_error_is_absent() {
    let device = FakeDevice {
        packages_error: true,
        irda: Some(Arc::new(FakeIrda {
            primitive: Some(Arc::new(FakePrimitive {
                fail: false,
                received: Mutex::new(Vec::new()),
            })),
        })),
        ..Default::default()
    };
    assert_eq!(
        detect_default(&device),
        Some(TransmitterVariant::ObsoleteSamsung)
    );
}

// ============================================================================
// Obsolete Samsung probe
// ============================================================================

#[test]
fn test_obsolete_sends_trial_token() {
    let primitive = Arc::new(FakePrimitive {
        fail: false,
        received: Mutex::new(Vec::new()),
    });
    let device = FakeDevice {
        irda: Some(Arc::new(FakeIrda {
            primitive: Some(primitive.clone()),
        })),
        ..Default::default()
    };

    assert_eq!(
        detect_default(&device),
        Some(TransmitterVariant::ObsoleteSamsung)
    );
    assert_eq!(*primitive.received.lock(), vec!["38000,100,100,100,100"]);
}

#[test]
fn test_obsolete_without_primitive_is_absent() {
    let device = FakeDevice {
        irda: Some(Arc::new(FakeIrda { primitive: None })),
        ..Default::default()
    };
    assert_eq!(detect_default(&device), None);
}

#[test]
fn test_obsolete_invoke_failure_is_absent() {
    let device = FakeDevice {
        irda: Some(Arc::new(FakeIrda {
            primitive: Some(Arc::new(FakePrimitive {
                fail: true,
                received: Mutex::new(Vec::new()),
            })),
        })),
        ..Default::default()
    };
    assert_eq!(detect_default(&device), None);
}

// ============================================================================
// LG probe
// ============================================================================

#[test]
fn test_lg_not_in_default_chain() {
    let device = FakeDevice {
        lg: Some(Arc::new(FakeLgSdk { supported: Ok(true) })),
        ..Default::default()
    };
    assert_eq!(detect_default(&device), None);
}

#[test]
fn test_lg_detected_when_enabled() {
    let device = FakeDevice {
        lg: Some(Arc::new(FakeLgSdk { supported: Ok(true) })),
        ..Default::default()
    };
    let config = DetectionConfig {
        include_lg: true,
        ..Default::default()
    };
    assert_eq!(
        DetectionChain::new(&config).detect(&device),
        Some(TransmitterVariant::LgWithDevice)
    );
}

#[test]
fn test_lg_unsupported_or_failing_is_absent() {
    let config = DetectionConfig {
        include_lg: true,
        ..Default::default()
    };
    for supported in [
        Ok(false),
        Err(DeviceError::Sdk {
            code: -1,
            message: "boom".into(),
        }),
    ] {
        let device = FakeDevice {
            lg: Some(Arc::new(FakeLgSdk { supported })),
            ..Default::default()
        };
        assert_eq!(DetectionChain::new(&config).detect(&device), None);
    }
    assert_eq!(
        DetectionChain::new(&config).detect(&FakeDevice::default()),
        None
    );
}

// ============================================================================
// Property-Based Tests
// ============================================================================

mod proptest_tests {
    use super::*;
    use proptest::prelude::*;

    fn outcome() -> impl Strategy<Value = Outcome> {
        prop_oneof![
            Just(Outcome::Found),
            Just(Outcome::Absent),
            Just(Outcome::Error),
            Just(Outcome::Panic),
        ]
    }

    proptest! {
        #[test]
        fn first_found_probe_decides(outcomes in prop::collection::vec(outcome(), 0..6)) {
            let probes: Vec<_> = outcomes
                .iter()
                .enumerate()
                .map(|(i, o)| ScriptedProbe::boxed(TransmitterVariant::ALL[i], *o).0)
                .collect();

            let expected = outcomes
                .iter()
                .position(|o| matches!(o, Outcome::Found))
                .map(|i| TransmitterVariant::ALL[i]);

            let chain = DetectionChain::with_probes(probes);
            prop_assert_eq!(chain.detect(&FakeDevice::default()), expected);
        }
    }
}
