//! Per-limb chains derived from a move list.
//!
//! A chain is every move of one body part, in ascending order. Chains are
//! never stored; renderers derive them to draw the connective lines between
//! a limb's consecutive moves.

use crate::types::{BodyPart, Move, MoveId};
use std::collections::{BTreeMap, HashSet};

/// A connection between two consecutive moves of the same limb.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ChainLink<'a> {
    pub body_part: BodyPart,
    pub from: &'a Move,
    pub to: &'a Move,
}

/// Group moves into one chain per body part. Body parts with no moves are
/// absent from the map.
pub fn chains(moves: &[Move]) -> BTreeMap<BodyPart, Vec<&Move>> {
    let mut chains: BTreeMap<BodyPart, Vec<&Move>> = BTreeMap::new();
    for mv in moves {
        chains.entry(mv.body_part).or_default().push(mv);
    }
    for chain in chains.values_mut() {
        chain.sort_by_key(|mv| mv.order);
    }
    chains
}

/// The chain for a single body part.
pub fn chain(moves: &[Move], body_part: BodyPart) -> Vec<&Move> {
    let mut chain: Vec<&Move> = moves.iter().filter(|mv| mv.body_part == body_part).collect();
    chain.sort_by_key(|mv| mv.order);
    chain
}

/// Every link between consecutive moves within each chain.
pub fn chain_links(moves: &[Move]) -> Vec<ChainLink<'_>> {
    chains(moves)
        .into_iter()
        .flat_map(|(body_part, chain)| {
            chain
                .windows(2)
                .map(|pair| ChainLink {
                    body_part,
                    from: pair[0],
                    to: pair[1],
                })
                .collect::<Vec<_>>()
        })
        .collect()
}

/// Ids of the final move in each chain.
pub fn last_in_chain_ids(moves: &[Move]) -> HashSet<&MoveId> {
    chains(moves)
        .values()
        .filter_map(|chain| chain.last().map(|mv| &mv.id))
        .collect()
}
