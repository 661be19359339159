//! Offline replay of a capture: the session description record sets up one
//! receive leg per reassemblable payload type, then every RTP record is
//! routed by payload type. Output is fingerprinted so two runs over the same
//! capture can be compared.

use std::{
    collections::{HashMap, HashSet},
    fmt,
    io::Read,
    sync::{
        Arc,
        mpsc::{self, Receiver, Sender},
    },
};

use sha2::{Digest, Sha256};

use crate::{
    depacketizer::access_unit::AccessUnit,
    log::log_sink::LogSink,
    rtp::rtp_header::RtpHeader,
    sdp::session_description::SessionDescription,
    session::{
        access_unit_sink::AccessUnitSink, receive_leg::ReceiveLeg, rtp_recv_config::RtpRecvConfig,
        stage_event::StageEvent,
    },
    sink_debug, sink_info, sink_warn,
    unpacker::{unpack_stats::UnpackStats, unpacker_config::UnpackerConfig},
};

use super::{dump_file::DumpReader, dump_message::DumpKind, replay_error::ReplayError};

/// Hands units to the replay loop, which drains them after every submit.
struct ChannelSink(Sender<AccessUnit>);

impl AccessUnitSink for ChannelSink {
    fn on_access_unit(&mut self, unit: AccessUnit) {
        let _ = self.0.send(unit);
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReplaySummary {
    pub records: u64,
    pub rtp_records: u64,
    pub access_units: u64,
    /// RTP records whose header could not be parsed or that a leg refused.
    pub parse_errors: u64,
    /// RTP records with a payload type no leg handles.
    pub ignored: u64,
    /// Counters summed over every leg.
    pub unpack: UnpackStats,
    /// Hex SHA-256 over (codec, timestamp, length, payload) of every unit.
    pub sha256: String,
}

impl fmt::Display for ReplaySummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "records:       {}", self.records)?;
        writeln!(f, "rtp packets:   {}", self.rtp_records)?;
        writeln!(f, "access units:  {}", self.access_units)?;
        writeln!(f, "parse errors:  {}", self.parse_errors)?;
        writeln!(f, "ignored:       {}", self.ignored)?;
        writeln!(
            f,
            "unpack:        stale={} dup={} dropped={} abandoned={} evicted={} lost={}",
            self.unpack.stale,
            self.unpack.duplicates,
            self.unpack.dropped,
            self.unpack.abandoned_runs,
            self.unpack.evicted,
            self.unpack.lost
        )?;
        write!(f, "sha256:        {}", self.sha256)
    }
}

struct Replay {
    legs: HashMap<u8, ReceiveLeg<ChannelSink>>,
    unsupported: HashSet<u8>,
    tx: Sender<AccessUnit>,
    rx: Receiver<AccessUnit>,
    hasher: Sha256,
    summary: ReplaySummary,
    unpacker_config: UnpackerConfig,
    logger: Arc<dyn LogSink>,
}

/// Replays every record of `reader`. `on_unit` sees each reconstructed unit
/// in emission order.
pub fn replay<R, F>(
    reader: DumpReader<R>,
    unpacker_config: UnpackerConfig,
    logger: Arc<dyn LogSink>,
    mut on_unit: F,
) -> Result<ReplaySummary, ReplayError>
where
    R: Read,
    F: FnMut(&AccessUnit),
{
    let (tx, rx) = mpsc::channel();
    let mut state = Replay {
        legs: HashMap::new(),
        unsupported: HashSet::new(),
        tx,
        rx,
        hasher: Sha256::new(),
        summary: ReplaySummary::default(),
        unpacker_config,
        logger,
    };

    for message in reader {
        let message = message?;
        state.summary.records += 1;
        match message.kind {
            DumpKind::FileHeader => {}
            DumpKind::Sdp => state.on_sdp(&message.body)?,
            DumpKind::Rtp => state.on_rtp(&message.body),
        }
        state.drain(&mut on_unit);
    }

    Ok(state.finish())
}

impl Replay {
    fn on_sdp(&mut self, body: &[u8]) -> Result<(), ReplayError> {
        let text = String::from_utf8_lossy(body);
        let sd = SessionDescription::parse(&text)?;

        // A new description replaces whatever was negotiated before.
        self.close_legs();

        for stream in sd.video_streams() {
            let cfg = RtpRecvConfig::new(stream.codec, stream.clock_rate)
                .with_payload_type(stream.payload_type);
            let mut leg = ReceiveLeg::new(
                cfg,
                self.unpacker_config.clone(),
                self.logger.clone(),
                ChannelSink(self.tx.clone()),
            )?;
            leg.advance_stage(StageEvent::SdpReceived)?;
            leg.advance_stage(StageEvent::PlayReceived)?;
            sink_info!(
                self.logger,
                "[Replay] leg ready. pt={}, codec={}, clock={}, control={}",
                stream.payload_type,
                stream.codec,
                stream.clock_rate,
                stream.control.as_deref().unwrap_or("-")
            );
            self.legs.insert(stream.payload_type, leg);
        }

        for other in sd.unsupported_streams() {
            sink_info!(
                self.logger,
                "[Replay] not reassembled. kind={}, pt={}, encoding={}",
                other.kind,
                other.payload_type,
                other.encoding_name
            );
            self.unsupported.insert(other.payload_type);
        }
        Ok(())
    }

    fn on_rtp(&mut self, body: &[u8]) {
        self.summary.rtp_records += 1;

        let pt = match RtpHeader::decode(body) {
            Ok((header, _)) => header.payload_type,
            Err(e) => {
                self.summary.parse_errors += 1;
                sink_warn!(self.logger, "[Replay] bad RTP record: {}", e);
                return;
            }
        };

        let Some(leg) = self.legs.get_mut(&pt) else {
            self.summary.ignored += 1;
            if self.unsupported.contains(&pt) {
                sink_debug!(self.logger, "[Replay] skipping pt={}", pt);
            } else {
                sink_warn!(self.logger, "[Replay] unknown payload type. pt={}", pt);
            }
            return;
        };

        if let Err(e) = leg.submit(body) {
            self.summary.parse_errors += 1;
            sink_warn!(self.logger, "[Replay] packet rejected. pt={}: {}", pt, e);
        }
    }

    fn drain<F: FnMut(&AccessUnit)>(&mut self, on_unit: &mut F) {
        while let Ok(unit) = self.rx.try_recv() {
            self.summary.access_units += 1;
            self.hasher.update(unit.payload_type.name().as_bytes());
            self.hasher.update(unit.timestamp.to_be_bytes());
            self.hasher.update((unit.payload.len() as u32).to_be_bytes());
            self.hasher.update(&unit.payload);
            on_unit(&unit);
        }
    }

    fn close_legs(&mut self) {
        for (_, mut leg) in self.legs.drain() {
            self.summary.unpack += leg.stats();
            leg.dispose();
        }
        self.unsupported.clear();
    }

    fn finish(mut self) -> ReplaySummary {
        self.close_legs();
        let digest = self.hasher.finalize();
        self.summary.sha256 = digest.iter().map(|b| format!("{b:02x}")).collect();
        self.summary
    }
}
