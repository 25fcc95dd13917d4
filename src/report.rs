pub mod report {
    use std::io::Error;

    use pager_core::config::config::MemoryConfig;
    use pager_core::manager::manager::{MemoryManager, Pid};

    const MAP_WIDTH: usize = 64;

    /// The banner printed ahead of the demo, one `NAME=value` line per setting.
    pub fn render_geometry(config: &MemoryConfig) -> String {
        let mut out = String::from("---------------- Demo Program ----------------\n");
        out.push_str(&format!("PHYSICAL_CAPACITY={}\n", config.physical_capacity()));
        out.push_str(&format!("MAX_VIRTUAL_SIZE={}\n", config.max_virtual_size()));
        out.push_str(&format!("PAGE_SIZE={}\n", config.page_size()));
        out.push_str(&format!("MAX_PROCESSES={}\n", config.max_processes()));
        out.push_str("----------------------------------------------\n");
        out
    }

    /// One-line summary of the pool, e.g.
    /// `pages allocated: 8, free frames: 248/256`.
    pub fn free_space_info(mm: &MemoryManager) -> String {
        format!(
            "pages allocated: {}, free frames: {}/{}",
            mm.allocated_pages(),
            mm.free_frames(),
            mm.total_frames()
        )
    }

    /// Frame occupancy, one character per frame (`#` used, `.` free),
    /// 64 frames per row, each row prefixed with its first frame index.
    pub fn render_free_space(mm: &MemoryManager) -> String {
        let owners = mm.frame_owners();
        let mut out = format!("{}\n", free_space_info(mm));
        for (row, frames) in owners.chunks(MAP_WIDTH).enumerate() {
            let cells: String = frames
                .iter()
                .map(|owner| if owner.is_some() { '#' } else { '.' })
                .collect();
            out.push_str(&format!("{:>5} {cells}\n", row * MAP_WIDTH));
        }
        out
    }

    /// Page table of `pid`, one row per virtual page.
    pub fn render_mappings(mm: &MemoryManager, pid: Pid) -> Result<String, Error> {
        let mappings = mm.mappings(pid)?;
        let mut out = format!(
            "pid {pid}: {} bytes, {} pages, {} mapped\n",
            mm.size_of(pid)?,
            mappings.len(),
            mm.mapped_pages(pid)?
        );
        for mapping in mappings {
            let row = match mapping.frame {
                Some(frame) => format!("  page {:>3} -> frame {frame}\n", mapping.page),
                None => format!("  page {:>3} -> unmapped\n", mapping.page),
            };
            out.push_str(&row);
        }
        Ok(out)
    }
}
