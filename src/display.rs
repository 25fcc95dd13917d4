pub mod display {
    use minifb::{Key, Window, WindowOptions};
    use std::io::{Error, ErrorKind};

    use pager_core::manager::manager::Pid;

    const SIDE: usize = 512;
    const FREE: u32 = 0x000000;
    const GRID: u32 = 0x202020;

    // one colour per slot, recycled when there are more slots than colours.
    const PALETTE: [u32; 8] = [
        0xE6194B, 0x3CB44B, 0xFFE119, 0x4363D8, 0xF58231, 0x911EB4, 0x46F0F0, 0xF032E6,
    ];

    pub fn owner_colour(owner: Option<Pid>) -> u32 {
        match owner {
            Some(pid) => PALETTE[pid % PALETTE.len()],
            None => FREE,
        }
    }

    /// A square grid with one cell per physical frame, coloured by the pid
    /// that owns it. Without a window the grid is still rendered into
    /// `buf` so it can be inspected.
    pub struct FrameMapWindow {
        window: Option<Window>,
        pub buf: Vec<u32>,
        columns: usize,
        cell: usize,
        side: usize,
    }

    impl FrameMapWindow {
        /// Open a window sized for `frames` cells, unless `PAGER_HEADLESS`
        /// is set, in which case this is the same as `headless`.
        pub fn open(frames: usize) -> Result<FrameMapWindow, Error> {
            let mut map = FrameMapWindow::headless(frames);
            if std::env::var_os("PAGER_HEADLESS").is_some() {
                return Ok(map);
            }

            let mut window = Window::new("Frame pool", map.side, map.side, WindowOptions::default())
                .map_err(|err| Error::new(ErrorKind::Other, err.to_string()))?;
            window.set_target_fps(30);
            map.window = Some(window);
            Ok(map)
        }

        pub fn headless(frames: usize) -> FrameMapWindow {
            let columns = (frames.max(1) as f64).sqrt().ceil() as usize;
            let cell = (SIDE / columns).max(1);
            let side = columns * cell;
            FrameMapWindow {
                window: None,
                buf: vec![FREE; side * side],
                columns,
                cell,
                side,
            }
        }

        pub fn side(&self) -> usize {
            self.side
        }

        pub fn cell_origin(&self, frame: usize) -> (usize, usize) {
            ((frame % self.columns) * self.cell, (frame / self.columns) * self.cell)
        }

        pub fn draw(&mut self, owners: &[Option<Pid>]) -> Result<(), Error> {
            self.buf.iter_mut().for_each(|p| *p = FREE);

            for (frame, owner) in owners.iter().enumerate() {
                let (x0, y0) = self.cell_origin(frame);
                let colour = owner_colour(*owner);
                for y in y0..y0 + self.cell {
                    for x in x0..x0 + self.cell {
                        // keep a one pixel seam between cells when they are big enough to show it
                        let seam = self.cell > 2 && (x == x0 || y == y0);
                        self.buf[y * self.side + x] = if seam { GRID } else { colour };
                    }
                }
            }

            if let Some(window) = self.window.as_mut() {
                window
                    .update_with_buffer(&self.buf, self.side, self.side)
                    .map_err(|err| Error::new(ErrorKind::Other, err.to_string()))?;
            }
            Ok(())
        }

        pub fn is_open(&self) -> bool {
            self.window
                .as_ref()
                .is_some_and(|window| window.is_open() && !window.is_key_down(Key::Escape))
        }

        /// Keep presenting the last frame until the window is closed.
        pub fn hold(&mut self) -> Result<(), Error> {
            while self.is_open() {
                if let Some(window) = self.window.as_mut() {
                    window
                        .update_with_buffer(&self.buf, self.side, self.side)
                        .map_err(|err| Error::new(ErrorKind::Other, err.to_string()))?;
                }
            }
            Ok(())
        }
    }
}
