pub mod frame_pool {
    use std::io::{Error, ErrorKind};

    use log::debug;

    use crate::config::config::MemoryConfig;
    use crate::fault::fault::out_of_frames;

    /// The physical side of the manager: one contiguous byte arena cut
    /// into `page_size` frames, plus an occupancy bit per frame.
    ///
    /// Frame `f` covers bytes `[f * page_size, (f + 1) * page_size)` of
    /// the backing store. Allocation is first-fit, lowest index wins.
    /// Releasing a frame only clears its bit; the bytes stay as they were.
    pub struct FramePool {
        backing_store: Vec<u8>,
        occupied: Vec<bool>,
        page_size: usize,
    }

    impl FramePool {
        pub fn new(config: &MemoryConfig) -> FramePool {
            FramePool {
                backing_store: vec![0; config.physical_capacity()],
                occupied: vec![false; config.frame_count()],
                page_size: config.page_size(),
            }
        }

        pub fn total_frames(&self) -> usize {
            self.occupied.len()
        }

        pub fn free_count(&self) -> usize {
            self.occupied.iter().filter(|used| !**used).count()
        }

        pub fn is_occupied(&self, frame: usize) -> bool {
            self.occupied.get(frame).copied().unwrap_or(false)
        }

        /// Claim the lowest-indexed free frame.
        pub fn claim_first_fit(&mut self) -> Result<usize, Error> {
            let frame = self
                .occupied
                .iter()
                .position(|used| !*used)
                .ok_or_else(out_of_frames)?;
            self.occupied[frame] = true;
            debug!("claimed frame {frame}");
            Ok(frame)
        }

        /// Claim `count` frames first-fit, or none at all.
        ///
        /// Frames are taken one `claim_first_fit` at a time; on shortage the
        /// ones already taken by this call are handed back before returning.
        pub fn claim_many(&mut self, count: usize) -> Result<Vec<usize>, Error> {
            let mut claimed: Vec<usize> = Vec::with_capacity(count);
            for _ in 0..count {
                match self.claim_first_fit() {
                    Ok(frame) => claimed.push(frame),
                    Err(err) => {
                        for &frame in &claimed {
                            self.occupied[frame] = false;
                        }
                        debug!("short of frames, handed back {claimed:?}");
                        return Err(err);
                    }
                }
            }
            Ok(claimed)
        }

        pub fn release(&mut self, frame: usize) -> Result<(), Error> {
            match self.occupied.get_mut(frame) {
                Some(used) if *used => {
                    *used = false;
                    debug!("released frame {frame}");
                    Ok(())
                }
                Some(_) => Err(Error::new(
                    ErrorKind::InvalidInput,
                    format!("frame {frame} is not occupied"),
                )),
                None => Err(Error::new(
                    ErrorKind::InvalidInput,
                    format!("frame {frame} out of range"),
                )),
            }
        }

        pub fn physical_address(&self, frame: usize, offset: usize) -> usize {
            frame * self.page_size + offset
        }

        // raw physical read, bounds-checked against the arena.
        pub fn read(&self, addr: usize, len: usize) -> Result<Vec<u8>, Error> {
            let end = addr
                .checked_add(len)
                .ok_or_else(|| Error::new(ErrorKind::InvalidInput, "overflow computing read range"))?;
            if end > self.backing_store.len() {
                return Err(Error::new(ErrorKind::InvalidInput, "read range out of bounds"));
            }

            Ok(self.backing_store[addr..end].to_vec())
        }

        pub fn write(&mut self, addr: usize, data: &[u8]) -> Result<(), Error> {
            let end = addr
                .checked_add(data.len())
                .ok_or_else(|| Error::new(ErrorKind::InvalidInput, "overflow computing write range"))?;
            if end > self.backing_store.len() {
                return Err(Error::new(ErrorKind::InvalidInput, "write range out of bounds"));
            }

            self.backing_store[addr..end].copy_from_slice(data);
            Ok(())
        }
    }

}
