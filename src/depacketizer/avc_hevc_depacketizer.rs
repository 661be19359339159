//! H.264 / H.265 RTP depacketizer (RFC 6184, RFC 7798).
//!
//! Input : a sequence-ordered [`PacketList`] whose nodes are already classified.
//! Output: at most one [`AccessUnit`] per call, built from the head of the list.
//!
//! Every unit is written in AVCC layout (4-byte big-endian length + NAL unit).
//! Sizes are computed first so each payload is allocated exactly once.

use std::sync::Arc;

use bytes::{BufMut, BytesMut};

use crate::{log::log_sink::LogSink, rtp::seq::seq_is_next, sink_error, sink_trace};

use super::{
    access_unit::AccessUnit, packet_list::PacketList, position_type::PositionType,
    unpack_outcome::UnpackOutcome, video_codec::VideoCodec,
};

pub struct AvcHevcDepacketizer {
    codec: VideoCodec,
    /// Codec clock ticks per millisecond.
    ticks_per_ms: u32,
    logger: Arc<dyn LogSink>,
}

impl AvcHevcDepacketizer {
    /// `clock_rate` must be at least 1000 Hz; callers validate it.
    pub fn new(codec: VideoCodec, clock_rate: u32, logger: Arc<dyn LogSink>) -> Self {
        Self {
            codec,
            ticks_per_ms: (clock_rate / 1000).max(1),
            logger,
        }
    }

    #[inline]
    pub fn codec(&self) -> VideoCodec {
        self.codec
    }

    #[inline]
    fn to_ms(&self, rtp_ts: u32) -> u64 {
        u64::from(rtp_ts / self.ticks_per_ms)
    }

    /// Tries to assemble exactly one access unit starting at the head.
    ///
    /// On `Emitted` and `Dropped` the consumed packets have been removed; on
    /// every other outcome the list is untouched.
    pub fn try_unpack_one(&self, list: &mut PacketList) -> UnpackOutcome {
        let Some(first) = list.peek_head() else {
            return UnpackOutcome::Incomplete;
        };

        let position = first.position;
        match position {
            PositionType::Single => {
                let body = first.body();
                let mut payload = BytesMut::with_capacity(4 + body.len());
                payload.put_u32(body.len() as u32);
                payload.extend_from_slice(body);

                let unit = AccessUnit {
                    payload_type: self.codec,
                    timestamp: self.to_ms(first.packet.timestamp()),
                    payload: payload.freeze(),
                };
                let last_seq = first.seq();
                list.remove_consumed_prefix(1);
                UnpackOutcome::Emitted { unit, last_seq }
            }
            PositionType::AggregationStart | PositionType::AggregationMember => {
                self.unpack_aggregation(list)
            }
            PositionType::FragmentStart => self.unpack_fragment_run(list),
            PositionType::FragmentMiddle | PositionType::FragmentEnd => {
                sink_trace!(
                    self.logger,
                    "[{}] orphan fragment at head. seq={}, pos={:?}",
                    self.codec,
                    first.seq(),
                    position
                );
                UnpackOutcome::Incomplete
            }
            PositionType::Unknown => {
                // Already reported by the classifier.
                let last_seq = first.seq();
                list.remove_consumed_prefix(1);
                UnpackOutcome::Dropped { last_seq }
            }
        }
    }

    /// STAP-A / AP: rewrite every 2-byte length prefix to 4 bytes.
    fn unpack_aggregation(&self, list: &mut PacketList) -> UnpackOutcome {
        let Some(first) = list.peek_head() else {
            return UnpackOutcome::Incomplete;
        };
        let last_seq = first.seq();
        let skip = self.codec.aggregation_skip();
        let buf = first.body().get(skip..).unwrap_or(&[]);

        let Some(total) = aggregation_size(buf) else {
            sink_error!(
                self.logger,
                "[{}] invalid aggregation packet, dropping. seq={}, len={}",
                self.codec,
                last_seq,
                buf.len()
            );
            list.remove_consumed_prefix(1);
            return UnpackOutcome::Dropped { last_seq };
        };

        let mut payload = BytesMut::with_capacity(total);
        let mut i = 0;
        while i < buf.len() {
            let size = usize::from(u16::from_be_bytes([buf[i], buf[i + 1]]));
            payload.put_u32(size as u32);
            payload.extend_from_slice(&buf[i + 2..i + 2 + size]);
            i += 2 + size;
        }

        let unit = AccessUnit {
            payload_type: self.codec,
            timestamp: self.to_ms(first.packet.timestamp()),
            payload: payload.freeze(),
        };
        list.remove_consumed_prefix(1);
        UnpackOutcome::Emitted { unit, last_seq }
    }

    /// FU-A / FU: Start, zero or more Middle, End, with +1 sequence steps.
    fn unpack_fragment_run(&self, list: &mut PacketList) -> UnpackOutcome {
        let Some(first) = list.peek_head() else {
            return UnpackOutcome::Incomplete;
        };

        let mut prev_seq = first.seq();
        let mut end_idx = 1;
        loop {
            let Some(node) = list.get(end_idx) else {
                return UnpackOutcome::Incomplete;
            };
            if !seq_is_next(prev_seq, node.seq()) {
                return UnpackOutcome::Gap { run_len: end_idx };
            }
            match node.position {
                PositionType::FragmentMiddle => {
                    prev_seq = node.seq();
                    end_idx += 1;
                }
                PositionType::FragmentEnd => break,
                _ => return UnpackOutcome::Broken { run_len: end_idx },
            }
        }

        let header_len = self.codec.nalu_header_len();
        let prefix_len = self.codec.fu_prefix_len();
        let nalu_header = self.codec.fragment_nalu_header(first.body());

        let data_len: usize = list
            .iter()
            .take(end_idx + 1)
            .map(|n| n.body().len() - prefix_len)
            .sum();

        let mut payload = BytesMut::with_capacity(4 + header_len + data_len);
        payload.put_u32((header_len + data_len) as u32);
        payload.extend_from_slice(&nalu_header[..header_len]);
        for node in list.iter().take(end_idx + 1) {
            payload.extend_from_slice(&node.body()[prefix_len..]);
        }

        let (last_seq, end_ts) = match list.get(end_idx) {
            Some(end) => (end.seq(), end.packet.timestamp()),
            None => return UnpackOutcome::Incomplete,
        };
        let unit = AccessUnit {
            payload_type: self.codec,
            timestamp: self.to_ms(end_ts),
            payload: payload.freeze(),
        };
        list.remove_consumed_prefix(end_idx + 1);
        UnpackOutcome::Emitted { unit, last_seq }
    }
}

/// Total output size of an aggregation body after skipping its header, or
/// `None` if a length field is truncated, a unit overruns the buffer, or the
/// body carries no unit at all.
fn aggregation_size(buf: &[u8]) -> Option<usize> {
    let mut total = 0usize;
    let mut i = 0usize;
    while i < buf.len() {
        if buf.len() - i < 2 {
            return None;
        }
        let size = usize::from(u16::from_be_bytes([buf[i], buf[i + 1]]));
        if buf.len() - i - 2 < size {
            return None;
        }
        total += 4 + size;
        i += 2 + size;
    }
    (total > 0).then_some(total)
}
