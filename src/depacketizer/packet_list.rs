//! Sequence-ordered packet buffer.
//!
//! Nodes live in a `VecDeque` and are addressed by index from the head, so
//! the depacketizer can walk a fragment run and then drop the consumed prefix
//! in one step.

use std::{cmp::Ordering, collections::VecDeque};

use crate::rtp::seq::seq_cmp;

use super::ordered_packet::OrderedPacket;

#[derive(Debug, Default)]
pub struct PacketList {
    nodes: VecDeque<OrderedPacket>,
}

impl PacketList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `node` at its place in circular sequence order.
    ///
    /// Returns `false` (and drops the node) if a packet with the same sequence
    /// number is already buffered. The scan starts at the tail because
    /// in-order arrival is the common case.
    pub fn insert(&mut self, node: OrderedPacket) -> bool {
        let seq = node.seq();
        let mut at = self.nodes.len();
        while at > 0 {
            match seq_cmp(seq, self.nodes[at - 1].seq()) {
                Ordering::Equal => return false,
                Ordering::Greater => break,
                Ordering::Less => at -= 1,
            }
        }
        self.nodes.insert(at, node);
        true
    }

    #[inline]
    pub fn peek_head(&self) -> Option<&OrderedPacket> {
        self.nodes.front()
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&OrderedPacket> {
        self.nodes.get(index)
    }

    /// Removes the first `n` nodes (fewer if the list is shorter). Returns how
    /// many were removed.
    pub fn remove_consumed_prefix(&mut self, n: usize) -> usize {
        let n = n.min(self.nodes.len());
        self.nodes.drain(..n);
        n
    }

    pub fn pop_head(&mut self) -> Option<OrderedPacket> {
        self.nodes.pop_front()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &OrderedPacket> {
        self.nodes.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{depacketizer::position_type::PositionType, rtp::rtp_packet::RtpPacket};

    fn node(seq: u16) -> OrderedPacket {
        OrderedPacket::new(
            RtpPacket::simple(96, false, seq, 0, 1, &[0x41]),
            PositionType::Single,
        )
    }

    fn seqs(list: &PacketList) -> Vec<u16> {
        list.iter().map(OrderedPacket::seq).collect()
    }

    #[test]
    fn keeps_sequence_order_under_reordering() {
        let mut list = PacketList::new();
        for s in [5, 3, 4, 8, 6, 7] {
            assert!(list.insert(node(s)));
        }
        assert_eq!(seqs(&list), vec![3, 4, 5, 6, 7, 8]);
    }

    #[test]
    fn rejects_duplicates() {
        let mut list = PacketList::new();
        assert!(list.insert(node(10)));
        assert!(list.insert(node(11)));
        assert!(!list.insert(node(10)));
        assert!(!list.insert(node(11)));
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn orders_across_wrap() {
        let mut list = PacketList::new();
        for s in [1, 65534, 0, 65535] {
            list.insert(node(s));
        }
        assert_eq!(seqs(&list), vec![65534, 65535, 0, 1]);
    }

    #[test]
    fn prefix_removal_and_head() {
        let mut list = PacketList::new();
        for s in 20..25 {
            list.insert(node(s));
        }
        assert_eq!(list.peek_head().map(OrderedPacket::seq), Some(20));
        assert_eq!(list.remove_consumed_prefix(3), 3);
        assert_eq!(list.peek_head().map(OrderedPacket::seq), Some(23));
        assert_eq!(list.remove_consumed_prefix(10), 2);
        assert!(list.is_empty());
        assert!(list.peek_head().is_none());
    }
}
