//! rtp_unpacker turns received RTP packets of an H.264 or H.265 video stream
//! back into length-prefixed access units.
//!
//! Packets may arrive out of order, duplicated, or not at all; the unpacker
//! buffers them by sequence number and reassembles single, aggregated and
//! fragmented NAL units once each is complete. It also provides one binary:
//! - `rtp_replay`: replays a capture file and fingerprints the output.

/// Handles configuration loading and management.
pub mod config;
/// Classification and reassembly of H.264 / H.265 RTP payloads.
pub mod depacketizer;
/// Capture file reader/writer and offline replay.
pub mod dump;
/// Logging utilities for the application.
pub mod log;
/// RTP packet parsing and sequence number arithmetic.
pub mod rtp;
/// Minimal SDP reading: payload type to codec mapping.
pub mod sdp;
/// Receive legs gated on the negotiation stage.
pub mod session;
/// Ordering buffer, loss policy and eviction around the depacketizer.
pub mod unpacker;
pub mod utils;
