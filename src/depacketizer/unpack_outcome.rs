use super::access_unit::AccessUnit;

/// Result of one reconstruction attempt at the head of the buffer.
#[derive(Debug)]
pub enum UnpackOutcome {
    /// A complete access unit; its packets were removed from the buffer.
    Emitted { unit: AccessUnit, last_seq: u16 },
    /// The head packet was malformed or unsupported and has been removed.
    Dropped { last_seq: u16 },
    /// Not enough data yet (empty buffer, run still open, orphan fragment).
    /// Nothing was removed.
    Incomplete,
    /// The fragment run at the head has a sequence hole after its first
    /// `run_len` nodes. Nothing was removed; the caller decides whether the
    /// hole is a genuine loss.
    Gap { run_len: usize },
    /// The fragment run at the head is followed, without a hole, by a packet
    /// that cannot continue it. The run can never complete. Nothing was
    /// removed.
    Broken { run_len: usize },
}
