// (c) 2023 John A. Breaux
// This code is licensed under MIT license (see LICENSE for details)

//! Stores and displays the Chip-8's screen memory

use std::fmt::{Display, Formatter};

/// Screen width, in pixels
pub const WIDTH: usize = 64;
/// Screen height, in pixels
pub const HEIGHT: usize = 32;

/// The 64x32 monochrome display buffer. Each cell is `0` or `1`.
///
/// Only [Screen::clear] and [Screen::draw] change it.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Screen {
    pixels: Box<[u8; WIDTH * HEIGHT]>,
}

impl Screen {
    /// Creates a blank screen
    pub fn new() -> Self {
        Self {
            pixels: Box::new([0; WIDTH * HEIGHT]),
        }
    }

    /// Sets every pixel to 0
    pub fn clear(&mut self) {
        self.pixels.fill(0);
    }

    /// XORs an 8-pixel-wide sprite onto the screen at (`x`, `y`), one byte per
    /// row, most significant bit leftmost. Pixels that fall off an edge wrap
    /// around to the opposite edge.
    ///
    /// Returns whether any lit pixel was turned off (a collision).
    /// # Examples
    /// ```rust
    /// # use chip8vm::*;
    /// let mut screen = Screen::new();
    /// assert!(!screen.draw(62, 0, &[0b1100_0001]));
    /// // the last bit wrapped around to column 3
    /// assert_eq!(screen.get(3, 0), 1);
    /// // drawing it again erases it, and collides
    /// assert!(screen.draw(62, 0, &[0b1100_0001]));
    /// assert_eq!(screen, Screen::new());
    /// ```
    pub fn draw(&mut self, x: usize, y: usize, sprite: &[u8]) -> bool {
        let mut collision = false;
        for (row, &bits) in sprite.iter().enumerate() {
            let py = (y + row) % HEIGHT;
            for col in 0..8 {
                if bits & (0x80 >> col) == 0 {
                    continue;
                }
                let px = (x + col) % WIDTH;
                let cell = &mut self.pixels[py * WIDTH + px];
                collision |= *cell == 1;
                *cell ^= 1;
            }
        }
        collision
    }

    /// Gets the pixel at (`x`, `y`), wrapping out-of-range coordinates
    pub fn get(&self, x: usize, y: usize) -> u8 {
        self.pixels[(y % HEIGHT) * WIDTH + x % WIDTH]
    }

    /// The whole screen, row-major
    pub fn pixels(&self) -> &[u8] {
        self.pixels.as_slice()
    }

    /// Iterates over the screen one row at a time
    pub fn rows(&self) -> impl Iterator<Item = &[u8]> + '_ {
        self.pixels.chunks_exact(WIDTH)
    }

    /// Number of lit pixels
    pub fn lit(&self) -> usize {
        self.pixels.iter().filter(|&&p| p != 0).count()
    }

    /// Prints the screen to stdout.
    ///
    /// Uses braille characters with the `drawille` feature, or falls back to
    /// the block characters of the [Display] impl.
    pub fn print_screen(&self) {
        #[cfg(feature = "drawille")]
        {
            use drawille::Canvas;
            let mut canvas = Canvas::new(WIDTH as u32, HEIGHT as u32);
            self.rows().enumerate().for_each(|(y, row)| {
                row.iter()
                    .enumerate()
                    .filter(|&(_, &p)| p != 0)
                    .for_each(|(x, _)| canvas.set(x as u32, y as u32))
            });
            println!("{}", canvas.frame());
        }
        #[cfg(not(feature = "drawille"))]
        println!("{self}");
    }
}

impl Default for Screen {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Screen {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Screen").field("lit", &self.lit()).finish()
    }
}

impl Display for Screen {
    /// Two rows per line, using half-block characters
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for y in (0..HEIGHT).step_by(2) {
            for x in 0..WIDTH {
                let c = match (self.get(x, y), self.get(x, y + 1)) {
                    (0, 0) => ' ',
                    (_, 0) => '▀',
                    (0, _) => '▄',
                    _ => '█',
                };
                write!(f, "{c}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn draw_wraps_both_axes() {
        let mut screen = Screen::new();
        screen.draw(63, 31, &[0b1100_0000, 0b1000_0000]);
        assert_eq!(screen.get(63, 31), 1);
        assert_eq!(screen.get(0, 31), 1);
        assert_eq!(screen.get(63, 0), 1);
        assert_eq!(screen.lit(), 3);
    }

    #[test]
    fn collision_only_on_overlap() {
        let mut screen = Screen::new();
        assert!(!screen.draw(0, 0, &[0b1010_1010]));
        assert!(!screen.draw(0, 0, &[0b0101_0101]));
        assert_eq!(screen.rows().next().unwrap()[..8], [1; 8]);
        assert!(screen.draw(7, 0, &[0b1000_0000]));
        assert_eq!(screen.get(7, 0), 0);
    }

    #[test]
    fn clear_blanks_everything() {
        let mut screen = Screen::new();
        screen.draw(10, 10, &[0xff; 15]);
        assert_eq!(screen.lit(), 8 * 15);
        screen.clear();
        assert_eq!(screen, Screen::default());
    }

    #[test]
    fn display_uses_half_blocks() {
        let mut screen = Screen::new();
        screen.draw(0, 0, &[0b1100_0000, 0b0100_0000]);
        let first = format!("{screen}").lines().next().unwrap().to_owned();
        assert!(first.starts_with("▀█ "));
        assert_eq!(first.chars().count(), WIDTH);
    }
}
