pub mod media_kind;
pub mod media_section;
pub mod rtp_map;
pub mod sdp_error;
pub mod session_description;
