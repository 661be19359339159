use byteorder::{BigEndian, WriteBytesExt};
use rtp_unpacker::{
    depacketizer::{access_unit::AccessUnit, video_codec::VideoCodec},
    log::{MemoryLogSink, log_level::LogLevel},
    session::{
        access_unit_sink::AccessUnitSink, receive_leg::ReceiveLeg, rtp_recv_config::RtpRecvConfig,
        session_stage::SessionStage, stage_error::StageError, stage_event::StageEvent,
        submit_error::SubmitError,
    },
    unpacker::unpacker_config::UnpackerConfig,
};
use std::{cell::RefCell, rc::Rc, sync::Arc};

fn rtp(seq: u16, ts: u32, payload: &[u8]) -> Vec<u8> {
    let mut p = Vec::new();
    p.write_u8(0x80).unwrap();
    p.write_u8(96).unwrap();
    p.write_u16::<BigEndian>(seq).unwrap();
    p.write_u32::<BigEndian>(ts).unwrap();
    p.write_u32::<BigEndian>(0xCAFE_F00D).unwrap();
    p.extend_from_slice(payload);
    p
}

type Collected = Rc<RefCell<Vec<AccessUnit>>>;

fn new_leg(
    codec: VideoCodec,
    unpacker: UnpackerConfig,
) -> (ReceiveLeg<impl AccessUnitSink>, Collected, Arc<MemoryLogSink>) {
    let seen: Collected = Rc::default();
    let sink_seen = seen.clone();
    let logger = Arc::new(MemoryLogSink::new());
    let leg = ReceiveLeg::new(
        RtpRecvConfig::new(codec, 90_000).with_payload_type(96),
        unpacker,
        logger.clone(),
        move |au: AccessUnit| sink_seen.borrow_mut().push(au),
    )
    .unwrap();
    (leg, seen, logger)
}

fn playing(codec: VideoCodec) -> (ReceiveLeg<impl AccessUnitSink>, Collected) {
    let (mut leg, seen, _) = new_leg(codec, UnpackerConfig::default());
    leg.advance_stage(StageEvent::SdpReceived).unwrap();
    leg.advance_stage(StageEvent::PlayReceived).unwrap();
    (leg, seen)
}

#[test]
fn single_unit_is_length_prefixed_body() {
    let (mut leg, seen) = playing(VideoCodec::H264);
    let body = [0x41, 0x9A, 0x01, 0x02, 0x03];
    leg.submit(&rtp(1, 180_000, &body)).unwrap();

    let seen = seen.borrow();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].timestamp, 2000);
    assert_eq!(seen[0].payload.as_ref(), &[0, 0, 0, 5, 0x41, 0x9A, 0x01, 0x02, 0x03]);
}

#[test]
fn aggregation_of_10_20_30_keeps_order() {
    let (mut leg, seen) = playing(VideoCodec::H264);
    let mut payload = vec![0x18];
    for (len, fill) in [(10u16, 0xA1u8), (20, 0xB2), (30, 0xC3)] {
        payload.write_u16::<BigEndian>(len).unwrap();
        payload.push(0x61); // NAL header
        payload.extend(std::iter::repeat_n(fill, usize::from(len) - 1));
    }
    leg.submit(&rtp(7, 0, &payload)).unwrap();

    let seen = seen.borrow();
    let units: Vec<&[u8]> = seen[0].nal_units().collect();
    assert_eq!(seen[0].payload.len(), 10 + 20 + 30 + 4 * 3);
    assert_eq!(units.iter().map(|u| u.len()).collect::<Vec<_>>(), vec![10, 20, 30]);
    assert_eq!(units[1][1], 0xB2);
}

#[test]
fn fragment_run_100_to_102() {
    let (mut leg, seen) = playing(VideoCodec::H264);
    leg.submit(&rtp(100, 9000, &[0x7C, 0x85, 0x11, 0x12])).unwrap();
    leg.submit(&rtp(101, 9000, &[0x7C, 0x05, 0x21])).unwrap();
    assert!(seen.borrow().is_empty());
    leg.submit(&rtp(102, 9000, &[0x7C, 0x45, 0x31, 0x32])).unwrap();

    let seen = seen.borrow();
    assert_eq!(seen.len(), 1);
    assert_eq!(
        seen[0].payload.as_ref(),
        &[0, 0, 0, 6, 0x65, 0x11, 0x12, 0x21, 0x31, 0x32]
    );
}

#[test]
fn end_before_middle_with_no_tolerance_never_emits() {
    let (mut leg, seen, logger) =
        new_leg(VideoCodec::H264, UnpackerConfig::default().with_reorder_tolerance(0));
    leg.advance_stage(StageEvent::SdpReceived).unwrap();
    leg.advance_stage(StageEvent::PlayReceived).unwrap();

    leg.submit(&rtp(100, 0, &[0x7C, 0x85, 0x11])).unwrap();
    leg.submit(&rtp(102, 0, &[0x7C, 0x45, 0x31])).unwrap();
    leg.submit(&rtp(101, 0, &[0x7C, 0x05, 0x21])).unwrap();
    assert!(seen.borrow().is_empty());
    assert!(logger.contains(LogLevel::Warn, "fragment run abandoned"));

    // The leg is clean afterwards.
    leg.submit(&rtp(103, 0, &[0x41, 0x01])).unwrap();
    assert_eq!(seen.borrow().len(), 1);
}

#[test]
fn gap_10_to_12_aborts_and_resumes_at_12() {
    let (mut leg, seen, _) =
        new_leg(VideoCodec::H265, UnpackerConfig::default().with_reorder_tolerance(0));
    leg.advance_stage(StageEvent::SdpReceived).unwrap();
    leg.advance_stage(StageEvent::PlayReceived).unwrap();

    leg.submit(&rtp(10, 0, &[0x62, 0x01, 0x93, 0xAA])).unwrap();
    leg.submit(&rtp(12, 0, &[0x02, 0x01, 0xBB])).unwrap();

    let seen = seen.borrow();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].payload.as_ref(), &[0, 0, 0, 3, 0x02, 0x01, 0xBB]);
    assert_eq!(leg.stats().abandoned_runs, 1);
}

#[test]
fn nothing_reaches_the_sink_before_playing() {
    let (mut leg, seen, _) = new_leg(VideoCodec::H264, UnpackerConfig::default());
    assert_eq!(leg.stage(), SessionStage::AwaitDescribe);
    leg.submit(&rtp(1, 0, &[0x41, 0x01])).unwrap();

    assert_eq!(
        leg.advance_stage(StageEvent::PlayReceived),
        Err(StageError::InvalidTransition {
            from: SessionStage::AwaitDescribe,
            event: StageEvent::PlayReceived
        })
    );
    leg.advance_stage(StageEvent::SdpReceived).unwrap();
    leg.submit(&rtp(2, 0, &[0x41, 0x02])).unwrap();
    assert!(!leg.is_ready());
    assert!(seen.borrow().is_empty());
    assert_eq!(leg.stats().access_units, 2);

    leg.advance_stage(StageEvent::PlayReceived).unwrap();
    leg.submit(&rtp(3, 0, &[0x41, 0x03])).unwrap();
    assert_eq!(seen.borrow().len(), 1);
    assert_eq!(leg.forwarded(), 1);
}

#[test]
fn dispose_stops_everything() {
    let (mut leg, seen, logger) = new_leg(VideoCodec::H264, UnpackerConfig::default());
    leg.advance_stage(StageEvent::SdpReceived).unwrap();
    leg.advance_stage(StageEvent::PlayReceived).unwrap();
    leg.submit(&rtp(1, 0, &[0x7C, 0x85, 0x11])).unwrap();

    leg.dispose();
    assert_eq!(leg.submit(&rtp(2, 0, &[0x7C, 0x45, 0x31])), Err(SubmitError::Disposed));
    assert_eq!(leg.advance_stage(StageEvent::PlayReceived), Err(StageError::Disposed));
    assert!(seen.borrow().is_empty());
    assert!(logger.contains(LogLevel::Info, "receive leg disposed"));
}
