/// Counters kept by a container; cheap to copy out for reporting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UnpackStats {
    /// Packets handed to `feed`.
    pub packets: u64,
    pub access_units: u64,
    /// At or behind the last consumed sequence number.
    pub stale: u64,
    pub duplicates: u64,
    /// Unknown, malformed or orphaned packets removed without output.
    pub dropped: u64,
    /// Fragment runs given up on (hole declared lost, or broken run).
    pub abandoned_runs: u64,
    /// Packets removed by capacity eviction.
    pub evicted: u64,
    /// Sequence numbers declared lost.
    pub lost: u64,
}

impl std::ops::AddAssign for UnpackStats {
    fn add_assign(&mut self, o: Self) {
        self.packets += o.packets;
        self.access_units += o.access_units;
        self.stale += o.stale;
        self.duplicates += o.duplicates;
        self.dropped += o.dropped;
        self.abandoned_runs += o.abandoned_runs;
        self.evicted += o.evicted;
        self.lost += o.lost;
    }
}
