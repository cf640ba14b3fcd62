//! Minesweeper board rules and per-pixel drawing.

use rand::Rng;

pub const BOARD_WIDTH: usize = 16;
pub const BOARD_HEIGHT: usize = 16;
pub const MINE_COUNT: usize = 40;

const CELLS: usize = BOARD_WIDTH * BOARD_HEIGHT;

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum GameResult {
    Undecided,
    Win,
    Lose,
}

/// Mine field with per-cell revealed and flagged state.
#[derive(Debug, Clone)]
pub struct Board {
    mines: [bool; CELLS],
    revealed: [bool; CELLS],
    flagged: [bool; CELLS],
}

#[inline]
fn index(x: usize, y: usize) -> usize {
    y * BOARD_WIDTH + x
}

/// In-bounds cells around `(x, y)`, excluding the cell itself.
fn neighbors(x: usize, y: usize) -> impl Iterator<Item = (usize, usize)> {
    (-1i32..=1)
        .flat_map(|dy| (-1i32..=1).map(move |dx| (dx, dy)))
        .filter(|&d| d != (0, 0))
        .filter_map(move |(dx, dy)| {
            let nx = x.checked_add_signed(dx as isize)?;
            let ny = y.checked_add_signed(dy as isize)?;
            (nx < BOARD_WIDTH && ny < BOARD_HEIGHT).then_some((nx, ny))
        })
}

impl Board {
    /// A fresh board with `MINE_COUNT` mines at distinct random cells.
    pub fn new<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut mines = [false; CELLS];
        let mut placed = 0;
        while placed < MINE_COUNT {
            let x = rng.random_range(0..BOARD_WIDTH);
            let y = rng.random_range(0..BOARD_HEIGHT);
            let cell = &mut mines[index(x, y)];
            if !*cell {
                *cell = true;
                placed += 1;
            }
        }
        Self::with_mines_mask(mines)
    }

    /// A board with mines exactly at `positions`.
    pub fn with_mines(positions: &[(usize, usize)]) -> Self {
        let mut mines = [false; CELLS];
        for &(x, y) in positions {
            if x < BOARD_WIDTH && y < BOARD_HEIGHT {
                mines[index(x, y)] = true;
            }
        }
        Self::with_mines_mask(mines)
    }

    fn with_mines_mask(mines: [bool; CELLS]) -> Self {
        Self {
            mines,
            revealed: [false; CELLS],
            flagged: [false; CELLS],
        }
    }

    pub fn mine(&self, x: usize, y: usize) -> bool {
        self.mines[index(x, y)]
    }

    pub fn revealed(&self, x: usize, y: usize) -> bool {
        self.revealed[index(x, y)]
    }

    pub fn flagged(&self, x: usize, y: usize) -> bool {
        self.flagged[index(x, y)]
    }

    pub fn mine_count(&self) -> usize {
        self.mines.iter().filter(|&&m| m).count()
    }

    /// Mines in the eight surrounding cells.
    pub fn neighbor_mines(&self, x: usize, y: usize) -> usize {
        neighbors(x, y).filter(|&(nx, ny)| self.mine(nx, ny)).count()
    }

    /// Lost once any mine is revealed; won once every safe cell is.
    pub fn result(&self) -> GameResult {
        let any_mine_revealed = self
            .mines
            .iter()
            .zip(&self.revealed)
            .any(|(&m, &r)| m && r);
        if any_mine_revealed {
            return GameResult::Lose;
        }

        let safe_hidden = self
            .mines
            .iter()
            .zip(&self.revealed)
            .any(|(&m, &r)| !m && !r);
        if safe_hidden {
            GameResult::Undecided
        } else {
            GameResult::Win
        }
    }

    /// Reveals a cell; zero-neighbour cells flood outwards.
    pub fn reveal(&mut self, x: usize, y: usize) {
        self.revealed[index(x, y)] = true;
        if self.mine(x, y) {
            return;
        }

        let mut stack = vec![(x, y)];
        while let Some((cx, cy)) = stack.pop() {
            if self.neighbor_mines(cx, cy) != 0 {
                continue;
            }
            for (nx, ny) in neighbors(cx, cy) {
                let i = index(nx, ny);
                if !self.revealed[i] {
                    self.revealed[i] = true;
                    stack.push((nx, ny));
                }
            }
        }
    }

    pub fn toggle_flag(&mut self, x: usize, y: usize) {
        let i = index(x, y);
        self.flagged[i] = !self.flagged[i];
    }

    /// Board cell under a frame-buffer position, if any.
    pub fn cell_at(pos: (i32, i32), width: u32, height: u32) -> Option<(usize, usize)> {
        let (sx, sy) = pos;
        if sx < 0 || sy < 0 || sx as u32 >= width || sy as u32 >= height {
            return None;
        }
        let px = (sx as f32 + 0.5) / width as f32;
        let py = (sy as f32 + 0.5) / height as f32;
        let x = ((px * BOARD_WIDTH as f32) as usize).min(BOARD_WIDTH - 1);
        let y = ((py * BOARD_HEIGHT as f32) as usize).min(BOARD_HEIGHT - 1);
        Some((x, y))
    }

    /// Draws the whole board into an RGBA8 buffer.
    pub fn draw(&self, pixels: &mut [u8], width: u32, height: u32) {
        let result = self.result();
        let texels: &mut [[u8; 4]] = bytemuck::cast_slice_mut(pixels);
        if width == 0 {
            return;
        }
        for (y, row) in texels.chunks_mut(width as usize).enumerate() {
            for (x, px) in row.iter_mut().enumerate() {
                *px = self.pixel(x as u32, y as u32, width, height, result);
            }
        }
    }

    /// Color of one frame-buffer pixel.
    pub fn pixel(&self, x: u32, y: u32, width: u32, height: u32, result: GameResult) -> [u8; 4] {
        let Some((cx, cy)) = Self::cell_at((x as i32, y as i32), width, height) else {
            return [0, 0, 0, 255];
        };

        let cell = Cell {
            w: (width as usize / BOARD_WIDTH).max(1),
            h: (height as usize / BOARD_HEIGHT).max(1),
        };
        let rel = (x as usize % cell.w, y as usize % cell.h);

        let mut rgb = if !self.revealed(cx, cy) {
            let mut rgb = cell.raised(rel);
            if self.flagged(cx, cy) && cell.disc(rel, (1, 2), (1, 2), cell.w / 4) {
                rgb = [0, 255, 0];
            }
            rgb
        } else if self.mine(cx, cy) {
            if cell.disc(rel, (1, 2), (1, 2), cell.w / 3) {
                [255, 0, 0]
            } else {
                [255, 128, 128]
            }
        } else {
            let mut rgb = cell.sunken(rel);
            let pips = PIPS[self.neighbor_mines(cx, cy)];
            if pips.iter().any(|&(fx, fy)| cell.disc(rel, fx, fy, cell.w / 8)) {
                rgb = [64, 64, 64];
            }
            rgb
        };

        match result {
            GameResult::Win => rgb[1] = 255,
            GameResult::Lose => {
                rgb[1] /= 2;
                rgb[2] /= 2;
            }
            GameResult::Undecided => {}
        }

        [rgb[0], rgb[1], rgb[2], 255]
    }
}

type Frac = (usize, usize);

/// Dice-style pip positions for 0..=8 neighbouring mines, as fractions of the cell.
const PIPS: [&[(Frac, Frac)]; 9] = {
    const C: (Frac, Frac) = ((1, 2), (1, 2));
    const UL: (Frac, Frac) = ((1, 4), (1, 4));
    const LR: (Frac, Frac) = ((3, 4), (3, 4));
    const LL: (Frac, Frac) = ((1, 4), (3, 4));
    const UR: (Frac, Frac) = ((3, 4), (1, 4));
    const ML: (Frac, Frac) = ((1, 4), (1, 2));
    const MR: (Frac, Frac) = ((3, 4), (1, 2));
    const TC: (Frac, Frac) = ((1, 2), (1, 4));
    const BC: (Frac, Frac) = ((1, 2), (3, 4));
    [
        &[],
        &[C],
        &[UL, LR],
        &[C, UL, LR],
        &[UL, LR, LL, UR],
        &[C, UL, LR, LL, UR],
        &[UL, LR, LL, UR, ML, MR],
        &[C, UL, LR, LL, UR, ML, MR],
        &[UL, LR, LL, UR, ML, MR, TC, BC],
    ]
};

/// Cell geometry in pixels.
struct Cell {
    w: usize,
    h: usize,
}

impl Cell {
    /// Hidden cell: light top/left bevel, dark bottom/right bevel.
    fn raised(&self, (rx, ry): (usize, usize)) -> [u8; 3] {
        if rx < 2 || ry < 2 {
            [255, 255, 255]
        } else if rx + 2 >= self.w || ry + 2 >= self.h {
            [128, 128, 128]
        } else {
            [192, 192, 192]
        }
    }

    /// Revealed cell: one-pixel dark border.
    fn sunken(&self, (rx, ry): (usize, usize)) -> [u8; 3] {
        if rx < 1 || ry < 1 || rx + 1 >= self.w || ry + 1 >= self.h {
            [100, 100, 100]
        } else {
            [164, 164, 164]
        }
    }

    /// `rel` lies inside the disc centred at the given cell fractions.
    fn disc(&self, (rx, ry): (usize, usize), fx: Frac, fy: Frac, radius: usize) -> bool {
        let cx = (self.w * fx.0 / fx.1) as f32;
        let cy = (self.h * fy.0 / fy.1) as f32;
        let dx = rx as f32 - cx;
        let dy = ry as f32 - cy;
        (dx * dx + dy * dy).sqrt() < radius as f32
    }
}
