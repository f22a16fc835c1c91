// Copyright (C) 2020-2024 Andy Kurnia.

use super::alphabet;
use rand::prelude::*;

// remaining quantity per tile, indexed like the alphabet.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Bag {
    tally: Box<[u8]>,
    len: u16,
}

impl Bag {
    pub fn new(alphabet: &alphabet::Alphabet) -> Bag {
        let tally = (0..alphabet.len())
            .map(|tile| alphabet.freq(tile))
            .collect::<Box<_>>();
        let len = tally.iter().map(|&n| n as u16).sum();
        Bag { tally, len }
    }

    #[cfg(test)]
    pub fn empty(alphabet: &alphabet::Alphabet) -> Bag {
        Bag {
            tally: vec![0u8; alphabet.len() as usize].into_boxed_slice(),
            len: 0,
        }
    }

    #[inline(always)]
    pub fn len(&self) -> u16 {
        self.len
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline(always)]
    pub fn tally(&self) -> &[u8] {
        &self.tally
    }

    // each remaining tile is equally likely.
    pub fn draw(&mut self, rng: &mut dyn RngCore) -> Option<u8> {
        if self.len == 0 {
            return None;
        }
        let mut pick = rng.random_range(0..self.len);
        for (tile, n) in self.tally.iter_mut().enumerate() {
            if pick < *n as u16 {
                *n -= 1;
                self.len -= 1;
                return Some(tile as u8);
            }
            pick -= *n as u16;
        }
        None
    }

    pub fn draw_many(&mut self, rng: &mut dyn RngCore, amount: usize) -> Vec<u8> {
        (0..amount).map_while(|_| self.draw(rng)).collect()
    }

    pub fn replenish(&mut self, rng: &mut dyn RngCore, rack: &mut Vec<u8>, rack_size: usize) {
        while rack.len() < rack_size {
            match self.draw(rng) {
                Some(tile) => rack.push(tile),
                None => break,
            }
        }
    }

    pub fn put_back(&mut self, tiles: &[u8]) {
        for &tile in tiles {
            self.tally[tile as usize] += 1;
            self.len += 1;
        }
    }

    // draw first, then return, so the same tiles never come straight back.
    // leaves everything untouched and returns false when the bag holds fewer
    // than min_len tiles or the rack lacks the named tiles.
    pub fn exchange(
        &mut self,
        rng: &mut dyn RngCore,
        rack: &mut Vec<u8>,
        tiles: &[u8],
        min_len: u16,
    ) -> bool {
        if self.len < min_len || tiles.is_empty() || !rack_contains(rack, tiles) {
            return false;
        }
        for &tile in tiles {
            if let Some(pos) = rack.iter().rposition(|&t| t == tile) {
                rack.swap_remove(pos);
            }
        }
        let replacements = self.draw_many(rng, tiles.len());
        rack.extend_from_slice(&replacements);
        self.put_back(tiles);
        true
    }
}

// true if every tile can be taken from the rack, counting duplicates.
pub fn rack_contains(rack: &[u8], tiles: &[u8]) -> bool {
    let mut tally = [0u8; 256];
    for &t in rack {
        tally[t as usize] += 1;
    }
    tiles.iter().all(|&t| {
        let n = &mut tally[t as usize];
        if *n == 0 {
            false
        } else {
            *n -= 1;
            true
        }
    })
}
