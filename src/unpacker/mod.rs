pub mod rtp_unpack_container;
pub mod unpack_stats;
pub mod unpacker_config;
pub mod unpacker_error;
