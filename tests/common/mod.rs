#![allow(dead_code)]

use quantum_battleship::{Board, Coord, GameConfig};
use rand::RngCore;

/// RNG that always returns the same word.
///
/// All zeros makes every Bernoulli draw succeed, every categorical draw land
/// on the first bucket and every uniform pick take the first element. All ones
/// flips that to the last bucket and element, failing any draw with `p < 1`.
pub struct ConstRng(pub u64);

impl ConstRng {
    pub fn zero() -> Self {
        ConstRng(0)
    }

    pub fn ones() -> Self {
        ConstRng(u64::MAX)
    }
}

impl RngCore for ConstRng {
    fn next_u32(&mut self) -> u32 {
        self.0 as u32
    }

    fn next_u64(&mut self) -> u64 {
        self.0
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        let byte = self.0 as u8;
        dest.iter_mut().for_each(|b| *b = byte);
    }
}

pub fn c(row: usize, col: usize) -> Coord {
    Coord::new(row, col)
}

/// 8×8 board with ships at exactly `ships`.
pub fn board_with(ships: &[(usize, usize)]) -> Board {
    let mut board = Board::new(&GameConfig::with_grid(8, ships.len())).unwrap();
    for &(r, col) in ships {
        board.place_ship(c(r, col)).unwrap();
    }
    board
}
