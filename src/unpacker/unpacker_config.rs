use crate::config::Config;

pub const DEFAULT_MAX_BUFFERED_PACKETS: usize = 1024;
pub const DEFAULT_REORDER_TOLERANCE: usize = 16;

/// Buffering policy of one unpack container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnpackerConfig {
    /// Depth at which the oldest packets are evicted.
    pub max_buffered_packets: usize,
    /// How many packets may be buffered past a sequence hole before the hole
    /// is treated as a loss. `0` gives up on a hole as soon as anything
    /// arrives after it. Holes only exist once something was consumed: the
    /// first packet of a stream is unpacked on arrival and anything older
    /// that shows up later is stale.
    pub reorder_tolerance: usize,
    /// Discard a Middle/End fragment at the head once its run can no longer
    /// complete (the packet before it was consumed, lost or evicted). When
    /// off, such fragments block the head until capacity eviction.
    pub discard_orphan_fragments: bool,
}

impl Default for UnpackerConfig {
    fn default() -> Self {
        Self {
            max_buffered_packets: DEFAULT_MAX_BUFFERED_PACKETS,
            reorder_tolerance: DEFAULT_REORDER_TOLERANCE,
            discard_orphan_fragments: true,
        }
    }
}

impl UnpackerConfig {
    /// Reads the `[Unpacker]` section; missing or invalid keys keep their
    /// defaults.
    pub fn from_config(config: &Config) -> Self {
        let d = Self::default();
        Self {
            max_buffered_packets: config
                .get_parsed_or("Unpacker", "max_buffered_packets", d.max_buffered_packets)
                .max(1),
            reorder_tolerance: config.get_parsed_or(
                "Unpacker",
                "reorder_tolerance",
                d.reorder_tolerance,
            ),
            discard_orphan_fragments: config.get_parsed_or(
                "Unpacker",
                "discard_orphan_fragments",
                d.discard_orphan_fragments,
            ),
        }
    }

    pub fn with_max_buffered_packets(mut self, n: usize) -> Self {
        self.max_buffered_packets = n.max(1);
        self
    }

    pub fn with_reorder_tolerance(mut self, n: usize) -> Self {
        self.reorder_tolerance = n;
        self
    }

    pub fn with_discard_orphan_fragments(mut self, on: bool) -> Self {
        self.discard_orphan_fragments = on;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_section_and_keeps_defaults() {
        let cfg = Config::parse(
            "[Unpacker]\nmax_buffered_packets = 0\nreorder_tolerance = 4\ndiscard_orphan_fragments = nope\n",
        );
        let u = UnpackerConfig::from_config(&cfg);
        assert_eq!(u.max_buffered_packets, 1);
        assert_eq!(u.reorder_tolerance, 4);
        assert!(u.discard_orphan_fragments);
    }

    #[test]
    fn empty_config_is_default() {
        assert_eq!(
            UnpackerConfig::from_config(&Config::empty()),
            UnpackerConfig::default()
        );
    }
}
