use crate::{board::Position, movegen::legal_moves_into, types::Move};

/// Pure perft node count.
/// Counts all legal positions from the current one down to `depth`.
pub fn perft(pos: &Position, depth: u8) -> u64 {
    if depth == 0 {
        return 1;
    }

    fn inner(pos: &Position, depth: u8, layers: &mut [Vec<Move>]) -> u64 {
        let (buf, rest) = layers
            .split_first_mut()
            .expect("perft requires one buffer per remaining ply");

        legal_moves_into(pos, pos.side_to_move, buf);
        if depth == 1 {
            return buf.len() as u64;
        }

        let mut nodes = 0u64;
        for &mv in buf.iter() {
            let mut next = pos.clone();
            next.make_move(mv);
            nodes += inner(&next, depth - 1, rest);
        }
        nodes
    }

    let mut layers = vec![Vec::with_capacity(128); depth as usize];
    inner(pos, depth, &mut layers[..])
}

/// Node counts split by root move, for pinning down generator differences.
pub fn divide(pos: &Position, depth: u8) -> Vec<(Move, u64)> {
    let mut roots = Vec::new();
    legal_moves_into(pos, pos.side_to_move, &mut roots);
    roots
        .into_iter()
        .map(|mv| {
            let mut next = pos.clone();
            next.make_move(mv);
            (mv, perft(&next, depth.saturating_sub(1)))
        })
        .collect()
}
