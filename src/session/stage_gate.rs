use std::sync::Arc;

use crate::{
    depacketizer::access_unit::AccessUnit, log::log_sink::LogSink, sink_debug, sink_info,
};

use super::{
    access_unit_sink::AccessUnitSink, session_stage::SessionStage, stage_error::StageError,
    stage_event::StageEvent,
};

/// Holds the negotiation stage and decides whether a reconstructed unit
/// reaches the sink or is discarded.
pub struct StageGate<S: AccessUnitSink> {
    stage: SessionStage,
    disposed: bool,
    sink: S,
    forwarded: u64,
    discarded: u64,
    logger: Arc<dyn LogSink>,
}

impl<S: AccessUnitSink> StageGate<S> {
    pub fn new(sink: S, logger: Arc<dyn LogSink>) -> Self {
        Self {
            stage: SessionStage::default(),
            disposed: false,
            sink,
            forwarded: 0,
            discarded: 0,
            logger,
        }
    }

    #[inline]
    pub fn stage(&self) -> SessionStage {
        self.stage
    }

    #[inline]
    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// True only while playing and not disposed.
    #[inline]
    pub fn is_ready(&self) -> bool {
        !self.disposed && self.stage.is_playing()
    }

    pub fn advance(&mut self, event: StageEvent) -> Result<SessionStage, StageError> {
        if self.disposed {
            return Err(StageError::Disposed);
        }
        let next = self.stage.on_event(event)?;
        if next != self.stage {
            sink_info!(self.logger, "[Session] stage {} -> {}", self.stage, next);
        }
        self.stage = next;
        Ok(next)
    }

    pub fn forward(&mut self, unit: AccessUnit) {
        if self.disposed {
            return;
        }
        if !self.stage.is_playing() {
            self.discarded += 1;
            sink_debug!(
                self.logger,
                "[Session] discarding unit while {}: {}",
                self.stage,
                unit
            );
            return;
        }
        self.forwarded += 1;
        self.sink.on_access_unit(unit);
    }

    /// Terminal; the sink is never called again.
    pub fn dispose(&mut self) {
        self.disposed = true;
    }

    #[inline]
    pub fn forwarded(&self) -> u64 {
        self.forwarded
    }

    #[inline]
    pub fn discarded(&self) -> u64 {
        self.discarded
    }
}
