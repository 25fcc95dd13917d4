pub mod driver {
    use std::io::{Error, ErrorKind, Write};

    use log::info;
    use pager_core::config::config::MemoryConfig;
    use pager_core::manager::manager::{MemoryManager, Pid};
    use rand::Rng;

    use crate::report::report::{render_free_space, render_geometry, render_mappings};

    /// How many bytes of the second process the demo reads in one go.
    pub const DEMO_READ_LEN: usize = 234;

    #[derive(Clone, Debug, PartialEq, Eq)]
    pub struct Checkpoint {
        pub label: String,
        pub free_frames: usize,
        pub allocated_pages: usize,
    }

    /// A creation the manager turned down; the steps for that process are skipped.
    #[derive(Clone, Debug, PartialEq, Eq)]
    pub struct Refusal {
        pub size: usize,
        pub kind: ErrorKind,
    }

    #[derive(Clone, Debug, Default)]
    pub struct DemoSummary {
        pub oversize_rejected: bool,
        pub pids: Vec<Pid>,
        pub refused: Vec<Refusal>,
        // None when the process for the round trip was never admitted.
        pub round_trip: Option<bool>,
        pub checkpoints: Vec<Checkpoint>,
    }

    impl DemoSummary {
        pub fn free_at(&self, label: &str) -> Option<usize> {
            self.checkpoints
                .iter()
                .find(|c| c.label == label)
                .map(|c| c.free_frames)
        }
    }

    struct Demo<'a, W: Write, F: FnMut(&MemoryManager) -> Result<(), Error>> {
        mm: MemoryManager,
        out: &'a mut W,
        on_step: F,
        summary: DemoSummary,
    }

    impl<W: Write, F: FnMut(&MemoryManager) -> Result<(), Error>> Demo<'_, W, F> {
        fn checkpoint(&mut self, label: &str, pid: Option<Pid>) -> Result<(), Error> {
            writeln!(self.out, "{label}")?;
            write!(self.out, "{}", render_free_space(&self.mm))?;
            if let Some(pid) = pid {
                write!(self.out, "{}", render_mappings(&self.mm, pid)?)?;
            }
            writeln!(self.out)?;

            self.summary.checkpoints.push(Checkpoint {
                label: label.to_string(),
                free_frames: self.mm.free_frames(),
                allocated_pages: self.mm.allocated_pages(),
            });
            (self.on_step)(&self.mm)
        }

        fn create(&mut self, size: usize) -> Result<Option<Pid>, Error> {
            match self.mm.create(size) {
                Ok(pid) => {
                    self.summary.pids.push(pid);
                    Ok(Some(pid))
                }
                Err(err) => {
                    writeln!(self.out, "Creating a process of {size} bytes refused: {err}")?;
                    writeln!(self.out)?;
                    self.summary.refused.push(Refusal { size, kind: err.kind() });
                    Ok(None)
                }
            }
        }

        fn exit(&mut self, pid: Pid) -> Result<(), Error> {
            self.mm.destroy(pid)?;
            self.checkpoint(&format!("After process {pid} exits"), None)
        }
    }

    /// Walk the four-process scenario: an oversize request, lazy mapping by
    /// a large read, a write/read round trip on a single page, a full write,
    /// then every process exiting. `on_step` sees the manager after each
    /// printed checkpoint.
    pub fn run_demo<W, R, F>(
        config: MemoryConfig,
        out: &mut W,
        rng: &mut R,
        on_step: F,
    ) -> Result<DemoSummary, Error>
    where
        W: Write,
        R: Rng,
        F: FnMut(&MemoryManager) -> Result<(), Error>,
    {
        let page_size = config.page_size();
        let max_vm = config.max_virtual_size();

        let mut demo = Demo {
            mm: MemoryManager::new(config),
            out,
            on_step,
            summary: DemoSummary::default(),
        };

        writeln!(demo.out, "{}", render_geometry(demo.mm.config()))?;

        demo.summary.oversize_rejected = demo.mm.create(max_vm + 1).is_err();

        let pid0 = demo.create(max_vm)?;
        let pid1 = demo.create((max_vm / 2).max(1))?;

        if let Some(pid1) = pid1 {
            demo.checkpoint(&format!("Before reading pages of process {pid1}"), Some(pid1))?;
            let read_len = DEMO_READ_LEN.min(demo.mm.size_of(pid1)?);
            demo.mm.read_vec(pid1, 0, read_len)?;
            demo.checkpoint(&format!("After reading pages of process {pid1}"), Some(pid1))?;
        }

        let pid2 = demo.create((max_vm / 4).max(1))?;
        if let Some(pid2) = pid2 {
            demo.checkpoint(&format!("Before writing/reading page 1 of process {pid2}"), Some(pid2))?;
            // page 1 when the space has one, otherwise whatever fits at 0.
            let size2 = demo.mm.size_of(pid2)?;
            let addr = if size2 > page_size { page_size } else { 0 };
            let mut payload = vec![0u8; page_size.min(size2 - addr)];
            rng.fill(&mut payload[..]);
            demo.mm.write(pid2, addr, &payload)?;
            let echoed = demo.mm.read_vec(pid2, addr, payload.len())?;
            demo.summary.round_trip = Some(echoed == payload);
            if echoed != payload {
                return Err(Error::new(ErrorKind::InvalidData, "page read back differs from what was written"));
            }
            demo.checkpoint(&format!("After writing/reading page 1 of process {pid2}"), Some(pid2))?;
        }

        let pid3 = demo.create((max_vm / 4).max(1))?;
        if let Some(pid3) = pid3 {
            demo.checkpoint(&format!("Before writing all pages of process {pid3}"), Some(pid3))?;
            let mut fill = vec![0u8; demo.mm.size_of(pid3)?];
            rng.fill(&mut fill[..]);
            demo.mm.write(pid3, 0, &fill)?;
            demo.checkpoint(&format!("After writing all pages of process {pid3}"), Some(pid3))?;
        }

        for pid in [pid2, pid3, pid1, pid0].into_iter().flatten() {
            demo.exit(pid)?;
        }

        info!(
            "demo finished with {} free frames, still running: {:?}",
            demo.mm.free_frames(),
            demo.mm.running_pids()
        );
        Ok(demo.summary)
    }
}
