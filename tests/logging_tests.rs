// tests/logging_tests.rs

//! Logging-callback lifecycle and diagnostic emission.

use std::sync::{Arc, Mutex};

use sidh_kex::{
    mock::MockEngine, Error, LogCallback, LogLevel, SidhEngine, SidhKex, SidhVariant,
};

struct Collector {
    lines: Mutex<Vec<(LogLevel, String)>>,
}

impl Collector {
    fn new() -> Arc<Self> {
        Arc::new(Self {
            lines: Mutex::new(Vec::new()),
        })
    }

    fn lines(&self) -> Vec<(LogLevel, String)> {
        self.lines.lock().unwrap().clone()
    }
}

impl LogCallback for Collector {
    fn log(&self, level: LogLevel, message: &str) {
        self.lines.lock().unwrap().push((level, message.to_owned()));
    }
}

fn mock_kex() -> SidhKex {
    SidhKex::with_engines(SidhVariant::LIVE.iter().filter_map(|&variant| {
        MockEngine::for_variant(variant).map(|e| (variant, Arc::new(e) as Arc<dyn SidhEngine>))
    }))
}

#[test]
fn double_enable_is_rejected_without_replacing() {
    let kex = mock_kex();
    let first = Collector::new();
    let second = Collector::new();

    kex.logging().enable(first.clone()).unwrap();
    assert_eq!(
        kex.logging().enable(second.clone()),
        Err(Error::CallbackAlreadyRegistered)
    );

    kex.logging().emit(LogLevel::Info, "hello");
    assert_eq!(first.lines().len(), 1);
    assert!(second.lines().is_empty());
}

#[test]
fn disable_is_idempotent_and_allows_reenable() {
    let kex = mock_kex();
    kex.logging().disable();

    let collector = Collector::new();
    kex.logging().enable(collector.clone()).unwrap();
    kex.logging().disable();
    kex.logging().disable();

    let replacement = Collector::new();
    kex.logging().enable(replacement.clone()).unwrap();
    kex.logging().emit(LogLevel::Debug, "after re-enable");

    assert!(collector.lines().is_empty());
    assert_eq!(replacement.lines().len(), 1);
}

#[test]
fn length_mismatch_diagnostics_name_the_field() {
    let variant = SidhVariant::P434;
    let kex = mock_kex();
    let collector = Collector::new();
    kex.logging().enable(collector.clone()).unwrap();

    let lengths = kex.field_lengths(variant).unwrap();
    let mut wrong = vec![0u8; lengths.private_key_a + 1];
    assert!(kex.random_mod_order_a(variant, &mut wrong).is_err());

    let lines = collector.lines();
    assert_eq!(lines.len(), 1);
    let (level, message) = &lines[0];
    assert_eq!(*level, LogLevel::Error);
    assert!(message.contains("privateKeyA"), "got: {message}");
    assert!(
        message.contains(&lengths.private_key_a.to_string()),
        "got: {message}"
    );
    assert!(
        message.contains(&(lengths.private_key_a + 1).to_string()),
        "got: {message}"
    );
}

#[test]
fn successful_operations_emit_nothing() {
    let variant = SidhVariant::P434;
    let kex = mock_kex();
    let collector = Collector::new();
    kex.logging().enable(collector.clone()).unwrap();

    let lengths = kex.field_lengths(variant).unwrap();
    let mut private_a = vec![0u8; lengths.private_key_a];
    kex.random_mod_order_a(variant, &mut private_a).unwrap();

    assert!(collector.lines().is_empty());
}

#[test]
fn callback_may_reenter_the_dispatcher() {
    struct Reentrant {
        kex: Arc<SidhKex>,
        seen: Mutex<usize>,
    }

    impl LogCallback for Reentrant {
        fn log(&self, _level: LogLevel, _message: &str) {
            // A callback that queries the crate again must not deadlock
            // against the registration slot.
            assert!(self.kex.field_lengths(SidhVariant::P434).is_some());
            *self.seen.lock().unwrap() += 1;
        }
    }

    let kex = Arc::new(mock_kex());
    let callback = Arc::new(Reentrant {
        kex: kex.clone(),
        seen: Mutex::new(0),
    });
    kex.logging().enable(callback.clone()).unwrap();

    let mut wrong = vec![0u8; 1];
    assert!(kex.random_mod_order_a(SidhVariant::P434, &mut wrong).is_err());
    assert_eq!(*callback.seen.lock().unwrap(), 1);
}

#[test]
fn registries_of_independent_dispatchers_do_not_collide() {
    let first = mock_kex();
    let second = mock_kex();
    let collector = Collector::new();

    first.logging().enable(collector.clone()).unwrap();
    // The other dispatcher's slot is still free.
    second.logging().enable(Collector::new()).unwrap();

    second.logging().emit(LogLevel::Warning, "other instance");
    assert!(collector.lines().is_empty());
}

#[test]
fn log_levels_map_to_their_raw_values() {
    for (raw, level) in [
        (0, LogLevel::None),
        (1, LogLevel::Error),
        (2, LogLevel::Warning),
        (3, LogLevel::Info),
        (4, LogLevel::Debug),
        (5, LogLevel::Verbose),
        (6, LogLevel::Epic),
    ] {
        assert_eq!(LogLevel::from_raw(raw), Some(level));
        assert_eq!(level.raw(), raw);
    }
    assert_eq!(LogLevel::from_raw(7), None);
    assert_eq!(LogLevel::from_raw(-1), None);
}
