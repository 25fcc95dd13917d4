pub mod address_space {
    use std::io::Error;

    use crate::fault::fault::invalid_argument;
    use crate::page_table::page_table::PageTable;

    /// One contiguous piece of a byte range that falls inside a single
    /// virtual page: `len` bytes at `offset` within `page`, corresponding
    /// to `buf[buf_offset..buf_offset + len]` of the caller's buffer.
    #[derive(Copy, Clone, Debug, PartialEq, Eq)]
    pub struct PageChunk {
        pub page: usize,
        pub offset: usize,
        pub len: usize,
        pub buf_offset: usize,
    }

    /// A process' virtual address space: its declared size and the page
    /// table covering `ceil(size / page_size)` pages.
    #[derive(Clone, Debug)]
    pub struct AddressSpace {
        pub size: usize,
        pub page_table: PageTable,
    }

    impl AddressSpace {
        pub fn new(size: usize, pages: usize) -> AddressSpace {
            AddressSpace {
                size,
                page_table: PageTable::unmapped(pages),
            }
        }

        /// Validate `[addr, addr + len)` against the declared size and split
        /// it into per-page chunks in ascending page order.
        ///
        /// The whole range must lie inside the space; there are no partial
        /// transfers.
        pub fn span(&self, addr: usize, len: usize, page_size: usize) -> Result<Vec<PageChunk>, Error> {
            if len == 0 {
                return Err(invalid_argument("length must be > 0"));
            }
            if addr >= self.size {
                return Err(invalid_argument("address beyond end of address space"));
            }
            let end = addr
                .checked_add(len)
                .ok_or_else(|| invalid_argument("overflow computing range end"))?;
            if end > self.size {
                return Err(invalid_argument("range exceeds address space"));
            }

            let start_page = addr / page_size;
            let end_page = (end - 1) / page_size;

            let mut chunks = Vec::with_capacity(end_page - start_page + 1);
            let mut buf_offset = 0;
            for page in start_page..=end_page {
                let offset = if page == start_page { addr % page_size } else { 0 };
                let stop = if page == end_page { (end - 1) % page_size + 1 } else { page_size };
                let len = stop - offset;
                chunks.push(PageChunk { page, offset, len, buf_offset });
                buf_offset += len;
            }

            Ok(chunks)
        }
    }

}
