pub mod access_unit;
pub mod avc;
pub mod avc_hevc_depacketizer;
pub mod classifier;
pub mod hevc;
pub mod ordered_packet;
pub mod packet_list;
pub mod position_type;
pub mod unpack_outcome;
pub mod video_codec;
