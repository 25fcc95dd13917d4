pub mod page_table {
    use std::io::{Error, ErrorKind};

    /// A page table entry. `present` is derived from `frame` so an entry
    /// can never be half mapped.
    #[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
    pub struct Pte {
        pub frame: Option<usize>,
    }

    impl Pte {
        pub fn present(&self) -> bool {
            self.frame.is_some()
        }
    }

    #[derive(Clone, Debug, PartialEq, Eq)]
    pub struct PageTable {
        entries: Vec<Pte>,
    }

    impl PageTable {
        pub fn unmapped(pages: usize) -> PageTable {
            PageTable {
                entries: vec![Pte::default(); pages],
            }
        }

        pub fn len(&self) -> usize {
            self.entries.len()
        }

        pub fn is_empty(&self) -> bool {
            self.entries.is_empty()
        }

        pub fn get(&self, page: usize) -> Option<&Pte> {
            self.entries.get(page)
        }

        pub fn entries(&self) -> &[Pte] {
            &self.entries
        }

        pub fn mapped_count(&self) -> usize {
            self.entries.iter().filter(|pte| pte.present()).count()
        }

        /// Frames of every present entry, in page order.
        pub fn mapped_frames(&self) -> Vec<usize> {
            self.entries.iter().filter_map(|pte| pte.frame).collect()
        }

        // a page is bound once; rebinding a present page is refused.
        pub fn bind(&mut self, page: usize, frame: usize) -> Result<(), Error> {
            let pte = self
                .entries
                .get_mut(page)
                .ok_or_else(|| Error::new(ErrorKind::InvalidInput, "page table index out of range"))?;
            if pte.present() {
                return Err(Error::new(
                    ErrorKind::AlreadyExists,
                    format!("page {page} is already mapped"),
                ));
            }
            pte.frame = Some(frame);
            Ok(())
        }

        pub fn unbind(&mut self, page: usize) -> Option<usize> {
            self.entries.get_mut(page).and_then(|pte| pte.frame.take())
        }
    }

}
