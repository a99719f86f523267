//! Builder wiring configuration, sinks and a completion timer into a dispatcher.

use std::sync::Arc;

use crate::config::{DispatchConfig, QueueBackendConfig};
use crate::core::{
    CompletionTimer, DispatchError, Dispatcher, EventSink, InMemoryEventSink, IntakeQueue,
    ResourcePool, TracingEventSink,
};
use crate::infra::queue::{LinearIntakeQueue, OrderedIntakeQueue};

/// Intake queue selected at runtime.
pub type DynIntakeQueue = Box<dyn IntakeQueue>;

/// Build the intake queue backend named by the configuration.
#[must_use]
pub fn build_intake_queue(backend: QueueBackendConfig) -> DynIntakeQueue {
    match backend {
        QueueBackendConfig::Linear => Box::new(LinearIntakeQueue::new()),
        QueueBackendConfig::Ordered => Box::new(OrderedIntakeQueue::new()),
    }
}

/// Builds a [`Dispatcher`] from a [`DispatchConfig`].
pub struct DispatcherBuilder {
    config: DispatchConfig,
    sinks: Vec<Box<dyn EventSink>>,
    timer: Option<Arc<dyn CompletionTimer>>,
}

impl DispatcherBuilder {
    /// Start from a configuration.
    #[must_use]
    pub fn new(config: DispatchConfig) -> Self {
        Self {
            config,
            sinks: Vec::new(),
            timer: None,
        }
    }

    /// Configuration the builder will use.
    #[must_use]
    pub const fn config(&self) -> &DispatchConfig {
        &self.config
    }

    /// Attach an event sink.
    #[must_use]
    pub fn with_sink(mut self, sink: Box<dyn EventSink>) -> Self {
        self.sinks.push(sink);
        self
    }

    /// Log every event through `tracing`.
    ///
    /// The log line is written while the dispatcher lock is held, so a slow
    /// subscriber stalls every operation. Attach a
    /// [`ChannelEventSink`](crate::core::ChannelEventSink) instead and log from
    /// the receiving task to keep that work off the lock.
    #[must_use]
    pub fn with_tracing(self) -> Self {
        self.with_sink(Box::new(TracingEventSink))
    }

    /// Keep events in memory, sized by `event_buffer`. Returns the handle for
    /// reading them back.
    #[must_use]
    pub fn with_event_log(self) -> (Self, InMemoryEventSink) {
        let log = InMemoryEventSink::new(self.config.event_buffer);
        (self.with_sink(Box::new(log.clone())), log)
    }

    /// Use a specific completion timer instead of the tokio default.
    #[must_use]
    pub fn with_timer(mut self, timer: Arc<dyn CompletionTimer>) -> Self {
        self.timer = Some(timer);
        self
    }

    /// Validate the configuration and build the dispatcher.
    ///
    /// Without an explicit timer, completions are scheduled on the current
    /// tokio runtime.
    ///
    /// # Errors
    ///
    /// `InvalidConfig` if validation fails or no timer can be created.
    pub fn build(self) -> Result<Dispatcher<DynIntakeQueue>, DispatchError> {
        self.config
            .validate()
            .map_err(|e| DispatchError::InvalidConfig(format!("config invalid: {e}")))?;

        let pool = ResourcePool::new(self.config.vehicles.iter().cloned())?;
        let timer = match self.timer {
            Some(timer) => timer,
            None => default_timer()?,
        };
        let dispatcher = Dispatcher::new(
            build_intake_queue(self.config.queue),
            pool,
            timer,
            self.config.service_duration(),
        )?;
        for sink in self.sinks {
            dispatcher.add_sink(sink);
        }
        tracing::info!(
            vehicles = self.config.vehicles.len(),
            service_ms = self.config.service_duration_ms,
            queue = ?self.config.queue,
            "dispatcher ready"
        );
        Ok(dispatcher)
    }
}

#[cfg(feature = "tokio-runtime")]
fn default_timer() -> Result<Arc<dyn CompletionTimer>, DispatchError> {
    use crate::runtime::{SpawnTimer, TokioSpawner};
    Ok(Arc::new(SpawnTimer::new(TokioSpawner::current()?)))
}

#[cfg(not(feature = "tokio-runtime"))]
fn default_timer() -> Result<Arc<dyn CompletionTimer>, DispatchError> {
    Err(DispatchError::InvalidConfig(
        "no completion timer configured and the tokio runtime is disabled".into(),
    ))
}
