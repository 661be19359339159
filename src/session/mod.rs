pub mod access_unit_sink;
pub mod receive_leg;
pub mod rtp_recv_config;
pub mod session_stage;
pub mod stage_error;
pub mod stage_event;
pub mod stage_gate;
pub mod submit_error;
