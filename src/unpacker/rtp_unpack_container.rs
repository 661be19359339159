//! Glue between the ordering buffer and the depacketizer for one stream leg.
//!
//! Per packet: drop it if it is at or behind what was already consumed,
//! classify, insert in order, then unpack at the head until no more progress
//! is possible. Holes are waited on until `reorder_tolerance` packets pile up
//! behind them; the buffer depth is capped by evicting the oldest packets.
//!
//! The stream starts at the first packet that arrives. A Single or
//! aggregation at the head is unpacked at once while nothing has been
//! consumed yet, so a lower sequence number arriving afterwards is stale.
//! Only orphan fragments are held back at start, since their Start may still
//! be in flight.

use std::sync::Arc;

use crate::{
    depacketizer::{
        access_unit::AccessUnit, avc_hevc_depacketizer::AvcHevcDepacketizer,
        classifier::classify, ordered_packet::OrderedPacket, packet_list::PacketList,
        position_type::PositionType, unpack_outcome::UnpackOutcome, video_codec::VideoCodec,
    },
    log::log_sink::LogSink,
    rtp::{
        rtp_packet::RtpPacket,
        seq::{seq_cmp, seq_diff, seq_is_next},
    },
    sink_debug, sink_warn,
};

use super::{
    unpack_stats::UnpackStats, unpacker_config::UnpackerConfig, unpacker_error::UnpackerError,
};

pub struct RtpUnpackContainer {
    depacketizer: AvcHevcDepacketizer,
    list: PacketList,
    config: UnpackerConfig,
    /// Sequence number of the last packet consumed (emitted, dropped,
    /// abandoned or evicted). Anything at or before it is stale.
    consumed_seq: Option<u16>,
    stats: UnpackStats,
    logger: Arc<dyn LogSink>,
}

impl RtpUnpackContainer {
    pub fn new(
        codec: VideoCodec,
        clock_rate: u32,
        config: UnpackerConfig,
        logger: Arc<dyn LogSink>,
    ) -> Result<Self, UnpackerError> {
        if clock_rate < 1000 {
            return Err(UnpackerError::InvalidClockRate(clock_rate));
        }
        Ok(Self {
            depacketizer: AvcHevcDepacketizer::new(codec, clock_rate, logger.clone()),
            list: PacketList::new(),
            config,
            consumed_seq: None,
            stats: UnpackStats::default(),
            logger,
        })
    }

    #[inline]
    pub fn codec(&self) -> VideoCodec {
        self.depacketizer.codec()
    }

    #[inline]
    pub fn stats(&self) -> UnpackStats {
        self.stats
    }

    /// Packets currently buffered.
    #[inline]
    pub fn buffered(&self) -> usize {
        self.list.len()
    }

    /// Sequence number at the head of the buffer, if any.
    pub fn head_seq(&self) -> Option<u16> {
        self.list.peek_head().map(OrderedPacket::seq)
    }

    /// Feeds one packet; `on_unit` is called synchronously once per
    /// reconstructed access unit, in sequence order.
    pub fn feed<F: FnMut(AccessUnit)>(&mut self, packet: RtpPacket, on_unit: &mut F) {
        self.stats.packets += 1;
        let seq = packet.seq();

        if let Some(consumed) = self.consumed_seq {
            if seq_cmp(seq, consumed).is_le() {
                self.stats.stale += 1;
                sink_debug!(
                    self.logger,
                    "[{}] stale packet dropped. seq={}, consumed={}",
                    self.codec(),
                    seq,
                    consumed
                );
                return;
            }
        }

        let position = classify(self.codec(), &packet, self.logger.as_ref());
        if !self.list.insert(OrderedPacket::new(packet, position)) {
            self.stats.duplicates += 1;
            sink_debug!(self.logger, "[{}] duplicate packet dropped. seq={}", self.codec(), seq);
            return;
        }

        self.drain(on_unit);

        while self.list.len() > self.config.max_buffered_packets {
            self.evict_oldest();
            self.drain(on_unit);
        }
    }

    /// Discards every buffered packet and forgets the consumed position.
    pub fn clear(&mut self) {
        self.list.clear();
        self.consumed_seq = None;
    }

    #[inline]
    fn hole_is_lost(&self, packets_past_hole: usize) -> bool {
        packets_past_hole > self.config.reorder_tolerance
    }

    fn drain<F: FnMut(AccessUnit)>(&mut self, on_unit: &mut F) {
        while let Some((head_seq, head_position)) = self
            .list
            .peek_head()
            .map(|head| (head.seq(), head.position))
        {
            if let Some(consumed) = self.consumed_seq {
                if !seq_is_next(consumed, head_seq) {
                    if !self.hole_is_lost(self.list.len()) {
                        break;
                    }
                    let missing = (seq_diff(head_seq, consumed) - 1).max(0) as u64;
                    self.stats.lost += missing;
                    sink_warn!(
                        self.logger,
                        "[{}] giving up on {} missing packet(s) before seq={}",
                        self.codec(),
                        missing,
                        head_seq
                    );
                    self.consumed_seq = Some(head_seq.wrapping_sub(1));
                }
            }

            // A Middle/End at the head whose predecessor is gone can never
            // complete. With nothing consumed yet, its Start may still be in
            // flight, so it gets the same grace as a hole.
            if head_position.is_continuation() && self.config.discard_orphan_fragments {
                let orphaned =
                    self.consumed_seq.is_some() || self.hole_is_lost(self.list.len());
                if orphaned {
                    self.discard_orphans();
                    continue;
                }
            }

            match self.depacketizer.try_unpack_one(&mut self.list) {
                UnpackOutcome::Emitted { unit, last_seq } => {
                    self.consumed_seq = Some(last_seq);
                    self.stats.access_units += 1;
                    on_unit(unit);
                }
                UnpackOutcome::Dropped { last_seq } => {
                    self.consumed_seq = Some(last_seq);
                    self.stats.dropped += 1;
                }
                UnpackOutcome::Incomplete => break,
                UnpackOutcome::Gap { run_len } => {
                    if !self.hole_is_lost(self.list.len() - run_len) {
                        break;
                    }
                    self.abandon_run(run_len, "sequence gap");
                }
                UnpackOutcome::Broken { run_len } => {
                    self.abandon_run(run_len, "unterminated run");
                }
            }
        }
    }

    /// Drops the first `run_len` nodes (an unfinished fragment run). If a
    /// hole follows them, the hole counts as consumed too.
    fn abandon_run(&mut self, run_len: usize, reason: &str) {
        let first = self.head_seq();
        let last = self.list.get(run_len - 1).map(OrderedPacket::seq);
        let next = self.list.get(run_len).map(OrderedPacket::seq);
        self.list.remove_consumed_prefix(run_len);
        self.stats.abandoned_runs += 1;

        let (Some(first), Some(last)) = (first, last) else {
            return;
        };
        self.consumed_seq = Some(last);
        if let Some(next) = next {
            if !seq_is_next(last, next) {
                self.stats.lost += (seq_diff(next, last) - 1).max(0) as u64;
                self.consumed_seq = Some(next.wrapping_sub(1));
            }
        }
        sink_warn!(
            self.logger,
            "[{}] fragment run abandoned ({}). seq={}..={}, next={:?}",
            self.codec(),
            reason,
            first,
            last,
            next
        );
    }

    /// Pops the orphan at the head plus the contiguous Middle/End packets
    /// after it, stopping after an End.
    fn discard_orphans(&mut self) {
        let Some(node) = self.list.pop_head() else {
            return;
        };
        let first = node.seq();
        let mut last = first;
        let mut count = 1u64;
        let mut ended = node.position == PositionType::FragmentEnd;

        while !ended {
            let Some(head) = self.list.peek_head() else {
                break;
            };
            if !head.position.is_continuation() || !seq_is_next(last, head.seq()) {
                break;
            }
            ended = head.position == PositionType::FragmentEnd;
            last = head.seq();
            self.list.pop_head();
            count += 1;
        }

        self.consumed_seq = Some(last);
        self.stats.dropped += count;
        sink_warn!(
            self.logger,
            "[{}] discarded {} orphan fragment(s). seq={}..={}",
            self.codec(),
            count,
            first,
            last
        );
    }

    /// Removes the head packet. Whatever it leaves orphaned is dealt with by
    /// the next drain.
    fn evict_oldest(&mut self) {
        let Some(node) = self.list.pop_head() else {
            return;
        };
        let seq = node.seq();
        self.consumed_seq = Some(seq);
        self.stats.evicted += 1;
        sink_warn!(
            self.logger,
            "[{}] buffer over {} packets, evicted oldest. seq={}, pos={:?}",
            self.codec(),
            self.config.max_buffered_packets,
            seq,
            node.position
        );
    }
}
