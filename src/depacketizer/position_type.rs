/// Where a packet sits relative to the access unit(s) it carries.
///
/// Derived from the payload header, never transmitted. Computed once when the
/// packet enters the container and cached on its node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PositionType {
    /// One whole NAL unit.
    Single,
    /// An aggregation packet (STAP-A / AP) carrying several length-prefixed
    /// units.
    AggregationStart,
    /// Continuation of an aggregation. Aggregation packets are
    /// self-contained, so the classifier never produces this.
    AggregationMember,
    FragmentStart,
    FragmentMiddle,
    FragmentEnd,
    /// Unsupported unit type or a body too short for its header.
    Unknown,
}

impl PositionType {
    /// True for fragments that can only follow an earlier fragment.
    #[inline]
    pub fn is_continuation(self) -> bool {
        matches!(self, Self::FragmentMiddle | Self::FragmentEnd)
    }
}
