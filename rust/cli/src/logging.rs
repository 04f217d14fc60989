//! Tracing setup for the binary and a capturing subscriber for tests.

use std::marker::PhantomData;
use std::sync::{Arc, Mutex};
use tracing::Level;
use tracing_subscriber::Layer;
use tracing_subscriber::layer::Context;
use tracing_subscriber::registry::LookupSpan;

/// Default filter when `RUST_LOG` is unset.
pub const DEFAULT_FILTER: &str = "warn";

/// Installs the global fmt subscriber writing to stderr.
///
/// Honors `RUST_LOG`, e.g. `RUST_LOG=stablerace_engine=debug` to see every
/// engine action. Returns `false` if a global subscriber was already set.
pub fn init_logging() -> bool {
    use tracing_subscriber::EnvFilter;
    use tracing_subscriber::fmt;

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .try_init()
        .is_ok()
}

/// Structured log entry for testing and analysis
#[derive(Debug, Clone)]
pub struct LogEntry {
    pub level: Level,
    pub target: String,
    pub message: String,
    pub fields: Vec<(String, String)>,
}

/// Test subscriber that captures log entries for verification
#[derive(Debug, Clone, Default)]
pub struct TestLogSubscriber {
    entries: Arc<Mutex<Vec<LogEntry>>>,
}

impl TestLogSubscriber {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> Vec<LogEntry> {
        self.entries.lock().map(|e| e.clone()).unwrap_or_default()
    }

    pub fn into_layer<S>(self) -> TestLayer<S>
    where
        S: tracing::Subscriber + for<'a> LookupSpan<'a>,
    {
        TestLayer {
            subscriber: self,
            _phantom: PhantomData,
        }
    }
}

pub struct TestLayer<S> {
    subscriber: TestLogSubscriber,
    _phantom: PhantomData<S>,
}

impl<S> Layer<S> for TestLayer<S>
where
    S: tracing::Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        let mut visitor = FieldVisitor::default();
        event.record(&mut visitor);

        let entry = LogEntry {
            level: *metadata.level(),
            target: metadata.target().to_string(),
            message: visitor.message.unwrap_or_default(),
            fields: visitor.fields,
        };

        if let Ok(mut entries) = self.subscriber.entries.lock() {
            entries.push(entry);
        }
    }
}

#[derive(Default)]
struct FieldVisitor {
    message: Option<String>,
    fields: Vec<(String, String)>,
}

impl tracing::field::Visit for FieldVisitor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        let value_str = format!("{:?}", value);
        if field.name() == "message" {
            self.message = Some(value_str);
        } else {
            self.fields.push((field.name().to_string(), value_str));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stablerace_engine::engine::{Engine, GameConfig};
    use tracing_subscriber::Registry;
    use tracing_subscriber::layer::SubscriberExt;

    #[test]
    fn engine_reports_round_start_and_finish() {
        let subscriber = TestLogSubscriber::new();
        let registry = Registry::default().with(subscriber.clone().into_layer::<Registry>());

        tracing::subscriber::with_default(registry, || {
            let mut engine = Engine::new(GameConfig {
                players: 2,
                rounds: 1,
                seed: Some(1),
                ..GameConfig::default()
            })
            .unwrap();
            engine.run_until_done(10_000);
        });

        let entries = subscriber.entries();
        assert!(entries.iter().all(|e| e.target.starts_with("stablerace_engine")));
        assert!(
            entries
                .iter()
                .any(|e| e.level == Level::INFO && e.message.contains("round started"))
        );
        assert!(
            entries
                .iter()
                .any(|e| e.level == Level::INFO && e.message.contains("simulation finished"))
        );
        assert!(
            entries
                .iter()
                .any(|e| e.level == Level::DEBUG && e.message.contains("Round cap reached."))
        );
    }

    #[test]
    fn roll_events_carry_roller_horse_and_pot() {
        let subscriber = TestLogSubscriber::new();
        let registry = Registry::default().with(subscriber.clone().into_layer::<Registry>());

        tracing::subscriber::with_default(registry, || {
            let mut engine = Engine::new(GameConfig {
                players: 2,
                rounds: 1,
                seed: Some(1),
                ..GameConfig::default()
            })
            .unwrap();
            engine.run_until_done(10_000);
        });

        let rolls: Vec<LogEntry> = subscriber
            .entries()
            .into_iter()
            .filter(|e| e.level == Level::DEBUG && e.message.contains(" rolled "))
            .collect();
        assert!(!rolls.is_empty());
        for entry in &rolls {
            let names: Vec<&str> = entry.fields.iter().map(|(k, _)| k.as_str()).collect();
            for field in ["round", "stage", "roller", "horse", "pot"] {
                assert!(names.contains(&field), "{field} missing from {entry:?}");
            }
        }

        let started = subscriber
            .entries()
            .into_iter()
            .find(|e| e.level == Level::DEBUG && e.message.contains("Round 1 started."))
            .unwrap();
        assert!(!started.fields.iter().any(|(k, _)| k == "roller"));
    }
}
