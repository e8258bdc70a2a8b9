//! Leaf-node counting over legal moves, for validating generation and move
//! application against published counts.

use tracing::trace;

use crate::chess::{Move, Position, legal_moves};

#[derive(Clone, Copy, Default)]
struct PerftEntry {
    zobrist: u64,
    nodes: u64,
    depth: u8,
}

/// Transposition table for perft, keyed by Zobrist hash and depth.
pub struct PerftTable {
    table: Box<[PerftEntry]>,
    mask: usize,
}

impl PerftTable {
    pub fn new(megabytes: usize) -> Self {
        const MIB: usize = 1 << 20;
        let entry_size = std::mem::size_of::<PerftEntry>();
        let requested_bytes = megabytes.max(1) * MIB;

        let entries = (requested_bytes / entry_size).next_power_of_two();
        let table = vec![PerftEntry::default(); entries].into_boxed_slice();

        Self {
            table,
            mask: entries - 1,
        }
    }

    #[inline]
    fn index(&self, zobrist: u64) -> usize {
        (zobrist as usize) & self.mask
    }

    #[inline]
    pub fn probe(&self, zobrist: u64, depth: u8) -> Option<u64> {
        let e = &self.table[self.index(zobrist)];
        (e.depth == depth && e.zobrist == zobrist).then_some(e.nodes)
    }

    #[inline]
    pub fn store(&mut self, zobrist: u64, depth: u8, nodes: u64) {
        let idx = self.index(zobrist);
        let e = &mut self.table[idx];

        // Minimal replacement policy
        if depth >= e.depth {
            *e = PerftEntry {
                zobrist,
                nodes,
                depth,
            };
        }
    }
}

/// Number of leaf nodes `depth` plies below `position`.
pub fn perft(position: &Position, depth: u8) -> u64 {
    if depth == 0 {
        return 1;
    }

    let moves = legal_moves(position);
    if depth == 1 {
        return moves.len() as u64;
    }

    moves
        .into_iter()
        .map(|mov| {
            let mut child = *position;
            child.apply_move(mov);
            perft(&child, depth - 1)
        })
        .sum()
}

/// [`perft`] with memoisation of interior nodes.
pub fn perft_with_table(position: &Position, depth: u8, table: &mut PerftTable) -> u64 {
    if depth <= 1 {
        return perft(position, depth);
    }

    let zobrist = position.zobrist();
    if let Some(nodes) = table.probe(zobrist, depth) {
        return nodes;
    }

    let mut nodes = 0;
    for mov in legal_moves(position) {
        let mut child = *position;
        child.apply_move(mov);
        nodes += perft_with_table(&child, depth - 1, table);
    }

    table.store(zobrist, depth, nodes);
    nodes
}

/// Leaf counts below each legal root move, in generation order.
pub fn divide(position: &Position, depth: u8) -> Vec<(Move, u64)> {
    if depth == 0 {
        return Vec::new();
    }

    legal_moves(position)
        .into_iter()
        .map(|mov| {
            let mut child = *position;
            child.apply_move(mov);
            let nodes = perft(&child, depth - 1);
            trace!(%mov, nodes, "divide");
            (mov, nodes)
        })
        .collect()
}
