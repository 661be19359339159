//! One inbound media leg: raw datagrams in, access units out, gated on the
//! negotiation stage.

use std::sync::Arc;

use crate::{
    log::log_sink::LogSink,
    rtp::rtp_packet::RtpPacket,
    sink_debug, sink_info,
    unpacker::{
        rtp_unpack_container::RtpUnpackContainer, unpack_stats::UnpackStats,
        unpacker_config::UnpackerConfig, unpacker_error::UnpackerError,
    },
};

use super::{
    access_unit_sink::AccessUnitSink, rtp_recv_config::RtpRecvConfig,
    session_stage::SessionStage, stage_error::StageError, stage_event::StageEvent,
    stage_gate::StageGate, submit_error::SubmitError,
};

pub struct ReceiveLeg<S: AccessUnitSink> {
    config: RtpRecvConfig,
    unpacker: RtpUnpackContainer,
    gate: StageGate<S>,
    logger: Arc<dyn LogSink>,
}

impl<S: AccessUnitSink> ReceiveLeg<S> {
    pub fn new(
        config: RtpRecvConfig,
        unpacker_config: UnpackerConfig,
        logger: Arc<dyn LogSink>,
        sink: S,
    ) -> Result<Self, UnpackerError> {
        let unpacker = RtpUnpackContainer::new(
            config.codec,
            config.clock_rate,
            unpacker_config,
            logger.clone(),
        )?;
        Ok(Self {
            config,
            unpacker,
            gate: StageGate::new(sink, logger.clone()),
            logger,
        })
    }

    /// Parses and feeds one datagram. Units completed by it reach the sink
    /// before this returns, provided the leg is playing. A malformed or
    /// foreign packet is rejected without touching buffered state.
    pub fn submit(&mut self, raw: &[u8]) -> Result<(), SubmitError> {
        if self.gate.is_disposed() {
            return Err(SubmitError::Disposed);
        }
        let packet = RtpPacket::decode(raw)?;

        if let Some(pt) = self.config.payload_type {
            if pt != packet.payload_type() {
                return Err(SubmitError::UnexpectedPayloadType(packet.payload_type()));
            }
        }

        let ssrc = packet.ssrc();
        match self.config.remote_ssrc {
            Some(expected) if expected != ssrc => {
                return Err(SubmitError::UnexpectedSsrc(ssrc));
            }
            Some(_) => {}
            None => {
                sink_debug!(
                    self.logger,
                    "[{}] learned remote SSRC {:#010x}",
                    self.config.codec,
                    ssrc
                );
                self.config.remote_ssrc = Some(ssrc);
            }
        }

        let gate = &mut self.gate;
        self.unpacker.feed(packet, &mut |unit| gate.forward(unit));
        Ok(())
    }

    pub fn advance_stage(&mut self, event: StageEvent) -> Result<SessionStage, StageError> {
        self.gate.advance(event)
    }

    /// Drops everything buffered; the sink is never called again.
    pub fn dispose(&mut self) {
        if self.gate.is_disposed() {
            return;
        }
        let stats = self.unpacker.stats();
        self.unpacker.clear();
        self.gate.dispose();
        sink_info!(
            self.logger,
            "[{}] receive leg disposed. packets={}, units={}, forwarded={}, lost={}",
            self.config.codec,
            stats.packets,
            stats.access_units,
            self.gate.forwarded(),
            stats.lost
        );
    }

    #[inline]
    pub fn is_ready(&self) -> bool {
        self.gate.is_ready()
    }

    #[inline]
    pub fn stage(&self) -> SessionStage {
        self.gate.stage()
    }

    #[inline]
    pub fn stats(&self) -> UnpackStats {
        self.unpacker.stats()
    }

    #[inline]
    pub fn forwarded(&self) -> u64 {
        self.gate.forwarded()
    }

    pub fn remote_ssrc(&self) -> Option<u32> {
        self.config.remote_ssrc
    }
}
