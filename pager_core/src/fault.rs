pub mod fault {
    use std::io::{Error, ErrorKind};

    /// Every manager operation reports failure through `std::io::Error`.
    /// The kind carries the failure class so callers can decide whether
    /// retrying with other parameters makes sense:
    ///
    /// - `InvalidInput` for bad sizes, addresses and ranges
    /// - `OutOfMemory` when no frame is free or the page budget is spent
    /// - `ResourceBusy` when every address-space slot is taken
    /// - `NotFound` when the pid does not name a running address space
    #[derive(Copy, Clone, Debug, PartialEq, Eq)]
    pub enum Fault {
        InvalidArgument,
        Exhausted,
        InvalidReference,
    }

    impl Fault {
        pub fn of(err: &Error) -> Option<Fault> {
            match err.kind() {
                ErrorKind::InvalidInput => Some(Fault::InvalidArgument),
                ErrorKind::OutOfMemory | ErrorKind::ResourceBusy => Some(Fault::Exhausted),
                ErrorKind::NotFound => Some(Fault::InvalidReference),
                _ => None,
            }
        }
    }

    pub fn invalid_argument(msg: &str) -> Error {
        Error::new(ErrorKind::InvalidInput, msg.to_string())
    }

    pub fn out_of_frames() -> Error {
        Error::new(ErrorKind::OutOfMemory, "no free physical frame")
    }

    pub fn budget_exceeded(requested: usize, available: usize) -> Error {
        Error::new(
            ErrorKind::OutOfMemory,
            format!("admitting {requested} pages exceeds the remaining budget of {available}"),
        )
    }

    pub fn no_free_slot() -> Error {
        Error::new(ErrorKind::ResourceBusy, "no free address-space slot")
    }

    pub fn not_running(pid: usize) -> Error {
        Error::new(ErrorKind::NotFound, format!("pid {pid} is not running"))
    }

}
