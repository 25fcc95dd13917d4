pub mod config {
    use std::env;
    use std::io::Error;

    use crate::fault::fault::invalid_argument;

    pub const DEFAULT_PAGE_SIZE: usize = 32;
    pub const DEFAULT_PHYSICAL_CAPACITY: usize = 8192;
    pub const DEFAULT_MAX_VIRTUAL_SIZE: usize = 512;
    pub const DEFAULT_MAX_PROCESSES: usize = 8;

    /// Fixed geometry of one manager instance. Once handed to
    /// `MemoryManager::new` it cannot change.
    #[derive(Copy, Clone, Debug, PartialEq, Eq)]
    pub struct MemoryConfig {
        page_size: usize,
        physical_capacity: usize,
        max_virtual_size: usize,
        max_processes: usize,
    }

    impl Default for MemoryConfig {
        fn default() -> MemoryConfig {
            MemoryConfig {
                page_size: DEFAULT_PAGE_SIZE,
                physical_capacity: DEFAULT_PHYSICAL_CAPACITY,
                max_virtual_size: DEFAULT_MAX_VIRTUAL_SIZE,
                max_processes: DEFAULT_MAX_PROCESSES,
            }
        }
    }

    impl MemoryConfig {
        pub fn new(
            page_size: usize,
            physical_capacity: usize,
            max_virtual_size: usize,
            max_processes: usize,
        ) -> Result<MemoryConfig, Error> {
            if page_size == 0 {
                return Err(invalid_argument("page size must be > 0"));
            }
            if physical_capacity == 0 || physical_capacity % page_size != 0 {
                return Err(invalid_argument(
                    "physical capacity must be a non-zero multiple of the page size",
                ));
            }
            if max_virtual_size == 0 {
                return Err(invalid_argument("max virtual size must be > 0"));
            }
            if max_processes == 0 {
                return Err(invalid_argument("max processes must be > 0"));
            }

            Ok(MemoryConfig {
                page_size,
                physical_capacity,
                max_virtual_size,
                max_processes,
            })
        }

        /// Defaults overridden by `PAGER_PAGE_SIZE`, `PAGER_PHYSICAL_CAPACITY`,
        /// `PAGER_MAX_VIRTUAL_SIZE` and `PAGER_MAX_PROCESSES` when present.
        pub fn from_env() -> Result<MemoryConfig, Error> {
            let defaults = MemoryConfig::default();
            MemoryConfig::new(
                env_or("PAGER_PAGE_SIZE", defaults.page_size)?,
                env_or("PAGER_PHYSICAL_CAPACITY", defaults.physical_capacity)?,
                env_or("PAGER_MAX_VIRTUAL_SIZE", defaults.max_virtual_size)?,
                env_or("PAGER_MAX_PROCESSES", defaults.max_processes)?,
            )
        }

        pub fn page_size(&self) -> usize {
            self.page_size
        }

        pub fn physical_capacity(&self) -> usize {
            self.physical_capacity
        }

        pub fn max_virtual_size(&self) -> usize {
            self.max_virtual_size
        }

        pub fn max_processes(&self) -> usize {
            self.max_processes
        }

        pub fn frame_count(&self) -> usize {
            self.physical_capacity / self.page_size
        }

        // ceil(size / page_size); callers reject size == 0 before asking.
        pub fn pages_for(&self, size: usize) -> usize {
            size.div_ceil(self.page_size)
        }
    }

    fn env_or(key: &str, default: usize) -> Result<usize, Error> {
        match env::var(key) {
            Ok(raw) => raw
                .trim()
                .parse::<usize>()
                .map_err(|_| invalid_argument(&format!("{key}={raw} is not an unsigned integer"))),
            Err(_) => Ok(default),
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use std::io::ErrorKind;

        #[test]
        fn defaults_match_demo_geometry() {
            let config = MemoryConfig::default();
            assert_eq!(config.page_size(), 32);
            assert_eq!(config.physical_capacity(), 8192);
            assert_eq!(config.max_virtual_size(), 512);
            assert_eq!(config.max_processes(), 8);
            assert_eq!(config.frame_count(), 256);
        }

        #[test]
        fn rejects_bad_geometry() {
            let cases = [(0, 8192, 512, 8), (32, 8000, 512, 8), (32, 0, 512, 8), (32, 8192, 0, 8), (32, 8192, 512, 0)];
            for (page, phys, vm, procs) in cases {
                let err = MemoryConfig::new(page, phys, vm, procs).unwrap_err();
                assert_eq!(err.kind(), ErrorKind::InvalidInput);
            }
        }

        #[test]
        fn pages_for_rounds_up() {
            let config = MemoryConfig::default();
            assert_eq!(config.pages_for(1), 1);
            assert_eq!(config.pages_for(32), 1);
            assert_eq!(config.pages_for(33), 2);
            assert_eq!(config.pages_for(256), 8);
        }
    }
}
