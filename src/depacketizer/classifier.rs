use crate::{
    log::log_sink::LogSink, rtp::rtp_packet::RtpPacket, sink_trace, sink_warn,
    utils::hex_preview,
};

use super::{avc, hevc, position_type::PositionType, video_codec::VideoCodec};

/// Classifies `packet` by its payload header and logs unsupported types with
/// a bounded hex preview of the raw packet.
pub fn classify(codec: VideoCodec, packet: &RtpPacket, logger: &dyn LogSink) -> PositionType {
    let body = packet.body();
    let position = match codec {
        VideoCodec::H264 => avc::classify(body),
        VideoCodec::H265 => hevc::classify(body),
    };

    if position == PositionType::Unknown {
        let outer = match (codec, body.first()) {
            (VideoCodec::H264, Some(&b)) => i32::from(avc::nalu_type(b)),
            (VideoCodec::H265, Some(&b)) => i32::from(hevc::nalu_type(b)),
            (_, None) => -1,
        };
        sink_warn!(
            logger,
            "[{}] unknown nalu type. outer_type={}, seq={}, ts={}, len={}, raw=\n{}",
            codec,
            outer,
            packet.seq(),
            packet.timestamp(),
            packet.raw().len(),
            hex_preview(packet.raw())
        );
    } else {
        sink_trace!(logger, "[{}] seq={} classified as {:?}", codec, packet.seq(), position);
    }
    position
}
