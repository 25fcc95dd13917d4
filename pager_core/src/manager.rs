pub mod manager {
    use std::io::{Error, ErrorKind};

    use log::{debug, info, warn};

    use crate::address_space::address_space::{AddressSpace, PageChunk};
    use crate::config::config::MemoryConfig;
    use crate::fault::fault::{budget_exceeded, invalid_argument, no_free_slot, not_running};
    use crate::frame_pool::frame_pool::FramePool;

    pub type Pid = usize;

    /// One row of a page-table dump.
    #[derive(Copy, Clone, Debug, PartialEq, Eq)]
    pub struct Mapping {
        pub page: usize,
        pub frame: Option<usize>,
    }

    impl Mapping {
        pub fn present(&self) -> bool {
            self.frame.is_some()
        }
    }

    /// The memory manager owns the frame pool and every address space.
    ///
    /// Address spaces live in a fixed array of `max_processes` slots; a pid
    /// is the slot index. Creation takes the lowest free slot and only
    /// reserves page budget. Frames are bound lazily, first-fit, the first
    /// time a read or write touches a page, and stay bound until the
    /// address space is destroyed.
    pub struct MemoryManager {
        config: MemoryConfig,
        frames: FramePool,
        slots: Vec<Option<AddressSpace>>,
        allocated_pages: usize,
    }

    impl MemoryManager {
        pub fn new(config: MemoryConfig) -> MemoryManager {
            info!(
                "memory manager up: {} frames of {} bytes, {} slots, max vm {}",
                config.frame_count(),
                config.page_size(),
                config.max_processes(),
                config.max_virtual_size()
            );
            MemoryManager {
                frames: FramePool::new(&config),
                slots: vec![None; config.max_processes()],
                allocated_pages: 0,
                config,
            }
        }

        pub fn config(&self) -> &MemoryConfig {
            &self.config
        }

        /// Create an address space of `size` bytes with every page unmapped.
        pub fn create(&mut self, size: usize) -> Result<Pid, Error> {
            if size == 0 || size > self.config.max_virtual_size() {
                return Err(invalid_argument(&format!(
                    "size {size} outside 1..={}",
                    self.config.max_virtual_size()
                )));
            }

            let pages = self.config.pages_for(size);
            let budget = self.config.frame_count() - self.allocated_pages;
            if pages > budget {
                warn!("refusing {pages}-page address space, {budget} pages left in budget");
                return Err(budget_exceeded(pages, budget));
            }

            let pid = self
                .slots
                .iter()
                .position(Option::is_none)
                .ok_or_else(no_free_slot)?;

            self.slots[pid] = Some(AddressSpace::new(size, pages));
            self.allocated_pages += pages;
            info!("created pid {pid}: {size} bytes over {pages} pages");
            Ok(pid)
        }

        /// Copy `buf.len()` bytes starting at virtual `addr` into `buf`,
        /// mapping any untouched page on the way.
        pub fn read(&mut self, pid: Pid, addr: usize, buf: &mut [u8]) -> Result<(), Error> {
            let chunks = self.fault_in(pid, addr, buf.len())?;
            for (chunk, frame) in chunks {
                let src_addr = self.frames.physical_address(frame, chunk.offset);
                let src = self.frames.read(src_addr, chunk.len)?;
                buf[chunk.buf_offset..chunk.buf_offset + chunk.len].copy_from_slice(&src);
            }
            Ok(())
        }

        pub fn read_vec(&mut self, pid: Pid, addr: usize, len: usize) -> Result<Vec<u8>, Error> {
            let mut data = vec![0; len];
            self.read(pid, addr, &mut data)?;
            Ok(data)
        }

        /// Copy `data` to virtual `addr`, mapping any untouched page on the way.
        pub fn write(&mut self, pid: Pid, addr: usize, data: &[u8]) -> Result<(), Error> {
            let chunks = self.fault_in(pid, addr, data.len())?;
            for (chunk, frame) in chunks {
                let dst = self.frames.physical_address(frame, chunk.offset);
                self.frames.write(dst, &data[chunk.buf_offset..chunk.buf_offset + chunk.len])?;
            }
            Ok(())
        }

               /// Tear down `pid`: release its frames, return its page budget and
        /// free the slot for reuse.
        ///
        /// The slot is only cleared once every frame is back in the pool. If
        /// the pool disagrees about a frame the process owns, nothing changes.
        pub fn destroy(&mut self, pid: Pid) -> Result<(), Error> {
            let space = self
                .slots
                .get_mut(pid)
                .and_then(Option::as_mut)
                .ok_or_else(|| not_running(pid))?;

            let frames = space.page_table.mapped_frames();
            if let Some(&stray) = frames.iter().find(|&&frame| !self.frames.is_occupied(frame)) {
                warn!("pid {pid}: frame {stray} is mapped but free in the pool, not destroying");
                return Err(Error::new(
                    ErrorKind::Other,
                    format!("pid {pid} maps frame {stray}, which the pool has as free"),
                ));
            }

            let pages = space.page_table.len();
            for page in 0..pages {
                if let Some(frame) = space.page_table.unbind(page) {
                    self.frames.release(frame)?;
                }
            }

            self.slots[pid] = None;
            self.allocated_pages -= pages;
            info!("destroyed pid {pid}: released {} frames, {pages} pages of budget", frames.len());
            Ok(())
        }

 pub fn total_frames(&self) -> usize {
            self.frames.total_frames()
        }

        pub fn free_frames(&self) -> usize {
            self.frames.free_count()
        }

        pub fn allocated_pages(&self) -> usize {
            self.allocated_pages
        }

        pub fn is_running(&self, pid: Pid) -> bool {
            matches!(self.slots.get(pid), Some(Some(_)))
        }

        pub fn running_pids(&self) -> Vec<Pid> {
            self.slots
                .iter()
                .enumerate()
                .filter_map(|(pid, slot)| slot.as_ref().map(|_| pid))
                .collect()
        }

        pub fn size_of(&self, pid: Pid) -> Result<usize, Error> {
            Ok(self.space(pid)?.size)
        }

        /// How many pages of `pid` currently have a frame.
        pub fn mapped_pages(&self, pid: Pid) -> Result<usize, Error> {
            Ok(self.space(pid)?.page_table.mapped_count())
        }

        pub fn mappings(&self, pid: Pid) -> Result<Vec<Mapping>, Error> {
            Ok(self
                .space(pid)?
                .page_table
                .entries()
                .iter()
                .enumerate()
                .map(|(page, pte)| Mapping { page, frame: pte.frame })
                .collect())
        }

        /// Physical address backing virtual `addr`, or `None` while its page
        /// is still unmapped. Never maps anything.
        pub fn translate(&self, pid: Pid, addr: usize) -> Result<Option<usize>, Error> {
            let space = self.space(pid)?;
            if addr >= space.size {
                return Err(invalid_argument("address beyond end of address space"));
            }

            let page_size = self.config.page_size();
            Ok(space
                .page_table
                .get(addr / page_size)
                .and_then(|pte| pte.frame)
                .map(|frame| self.frames.physical_address(frame, addr % page_size)))
        }

        /// Owning pid of every physical frame, indexed by frame.
        pub fn frame_owners(&self) -> Vec<Option<Pid>> {
            let mut owners = vec![None; self.frames.total_frames()];
            for (pid, slot) in self.slots.iter().enumerate() {
                if let Some(space) = slot {
                    for frame in space.page_table.mapped_frames() {
                        owners[frame] = Some(pid);
                    }
                }
            }
            owners
        }

        fn space(&self, pid: Pid) -> Result<&AddressSpace, Error> {
            self.slots
                .get(pid)
                .and_then(Option::as_ref)
                .ok_or_else(|| not_running(pid))
        }

        /// Validate the range, bind a frame to every unmapped page it touches
        /// and return each chunk with its frame.
        ///
        /// Frames for all missing pages are claimed together, so running out
        /// part way leaves the page table and the pool exactly as they were.
        fn fault_in(&mut self, pid: Pid, addr: usize, len: usize) -> Result<Vec<(PageChunk, usize)>, Error> {
            let page_size = self.config.page_size();
            let space = self
                .slots
                .get_mut(pid)
                .and_then(Option::as_mut)
                .ok_or_else(|| not_running(pid))?;
            let chunks = space.span(addr, len, page_size)?;

            let missing: Vec<usize> = chunks
                .iter()
                .map(|chunk| chunk.page)
                .filter(|&page| !space.page_table.get(page).is_some_and(|pte| pte.present()))
                .collect();

            if !missing.is_empty() {
                let frames = self.frames.claim_many(missing.len()).inspect_err(|_| {
                    warn!(
                        "pid {pid}: {} pages need frames, only {} free",
                        missing.len(),
                        self.frames.free_count()
                    )
                })?;
                for (&page, frame) in missing.iter().zip(frames) {
                    space.page_table.bind(page, frame)?;
                    debug!("pid {pid}: page {page} -> frame {frame}");
                }
            }

            let mut bound = Vec::with_capacity(chunks.len());
            for chunk in chunks {
                let frame = space
                    .page_table
                    .get(chunk.page)
                    .and_then(|pte| pte.frame)
                    .ok_or_else(|| invalid_argument("page left unmapped after fault-in"))?;
                bound.push((chunk, frame));
            }
            Ok(bound)
        }
    }

}
