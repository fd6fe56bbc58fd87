//! Fixed-size transposition slot store keyed by Zobrist hash.
//!
//! Slots are addressed by the low bits of the hash. A collision on the direct
//! slot is resolved with a single displacement hop: the direct slot remembers
//! how far forward its overflow entry lives. Only one hop is ever followed, so
//! a cluster of more than two hashes on the same direct slot overwrites the
//! direct entry and the loss is counted in [`TTStats::dropped`].
//!
//! The store also keeps two killer moves per ply for move ordering.

use crate::moves::chess_move::Move;

/// Furthest forward slot probed when the direct slot is taken.
const MAX_DISPLACEMENT: u8 = 15;
/// Plies with killer slots.
const MAX_KILLER_PLY: usize = 128;
const KILLERS_PER_PLY: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotEntry {
    pub hash: u64,
    pub depth: u8,
    pub pv: bool,
    pub bound: bool,
    /// Forward offset of the overflow entry recorded on this slot; 0 for none.
    pub displacement: u8,
}

impl SlotEntry {
    /// `depth << 6 | pv << 5 | bound << 4 | displacement`.
    pub fn packed(&self) -> u32 {
        (u32::from(self.depth) << 6)
            | (u32::from(self.pv) << 5)
            | (u32::from(self.bound) << 4)
            | u32::from(self.displacement & 0x0F)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TTStats {
    pub probes: u64,
    pub hits: u64,
    pub stores: u64,
    pub dropped: u64,
}

#[derive(Debug, Clone)]
pub struct TranspositionTable {
    entries: Vec<Option<SlotEntry>>,
    displacements: Vec<u8>,
    mask: usize,
    killers: Vec<[Option<Move>; KILLERS_PER_PLY]>,
    stats: TTStats,
}

impl TranspositionTable {
    /// A table of `2^index_bits` slots.
    pub fn new(index_bits: u32) -> Self {
        let count = 1usize << index_bits.clamp(1, usize::BITS - 1);
        Self {
            entries: vec![None; count],
            displacements: vec![0; count],
            mask: count - 1,
            killers: vec![[None; KILLERS_PER_PLY]; MAX_KILLER_PLY],
            stats: TTStats::default(),
        }
    }

    /// The largest power-of-two table that fits in `size_mb` megabytes.
    pub fn new_with_mb(size_mb: usize) -> Self {
        let bytes = size_mb.max(1) * 1024 * 1024;
        let slot_size = std::mem::size_of::<Option<SlotEntry>>() + std::mem::size_of::<u8>();
        let count = (bytes / slot_size).max(2);
        Self::new(usize::BITS - 1 - count.leading_zeros())
    }

    #[inline]
    pub fn clear(&mut self) {
        self.entries.fill(None);
        self.displacements.fill(0);
        self.killers.fill([None; KILLERS_PER_PLY]);
        self.stats = TTStats::default();
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Occupied slots.
    pub fn occupied(&self) -> usize {
        self.entries.iter().filter(|e| e.is_some()).count()
    }

    #[inline]
    pub fn stats(&self) -> TTStats {
        self.stats
    }

    #[inline]
    fn idx(&self, hash: u64) -> usize {
        (hash as usize) & self.mask
    }

    #[inline]
    fn offset(&self, index: usize, displacement: u8) -> usize {
        (index + usize::from(displacement)) & self.mask
    }

    fn is_free_for(&self, index: usize, hash: u64) -> bool {
        self.entries[index].map_or(true, |e| e.hash == hash)
    }

    pub fn set(&mut self, hash: u64, depth: u8, pv: bool, bound: bool) {
        self.stats.stores += 1;
        let direct = self.idx(hash);
        let slot = self.find_slot(direct, hash);
        self.entries[slot] = Some(SlotEntry {
            hash,
            depth,
            pv,
            bound,
            displacement: self.displacements[slot],
        });
    }

    fn find_slot(&mut self, direct: usize, hash: u64) -> usize {
        if self.is_free_for(direct, hash) {
            return direct;
        }

        let displacement = self.displacements[direct];
        if displacement != 0 {
            let secondary = self.offset(direct, displacement);
            if self.is_free_for(secondary, hash) {
                return secondary;
            }
        }

        for step in 1..=MAX_DISPLACEMENT {
            let candidate = self.offset(direct, step);
            if candidate == direct {
                break;
            }
            if self.is_free_for(candidate, hash) {
                self.displacements[direct] = step;
                if let Some(entry) = self.entries[direct].as_mut() {
                    entry.displacement = step;
                }
                return candidate;
            }
        }

        self.stats.dropped += 1;
        log::trace!("transposition slot {direct:#x} overwritten by {hash:#018x}");
        direct
    }

    pub fn get(&mut self, hash: u64) -> Option<SlotEntry> {
        self.stats.probes += 1;
        let direct = self.idx(hash);
        let hit = match self.entries[direct] {
            Some(entry) if entry.hash == hash => Some(entry),
            _ => {
                let displacement = self.displacements[direct];
                if displacement == 0 {
                    None
                } else {
                    self.entries[self.offset(direct, displacement)].filter(|e| e.hash == hash)
                }
            }
        };
        if hit.is_some() {
            self.stats.hits += 1;
        }
        hit
    }

    /// Remember `mv` as the newest killer at `ply`, evicting the oldest.
    pub fn store_killer(&mut self, ply: usize, mv: Move) {
        let Some(slots) = self.killers.get_mut(ply) else {
            return;
        };
        if slots[0] == Some(mv) {
            return;
        }
        slots[1] = slots[0];
        slots[0] = Some(mv);
    }

    /// Killers at `ply`, newest first.
    pub fn killers(&self, ply: usize) -> Vec<Move> {
        self.killers
            .get(ply)
            .map(|slots| slots.iter().flatten().copied().collect())
            .unwrap_or_default()
    }
}
