use std::env;
use std::io;

use pager_core::config::config::MemoryConfig;
use pager_runtime::display::display::FrameMapWindow;
use pager_runtime::driver::driver::run_demo;
use pager_runtime::logger::logger;
use rand::SeedableRng;
use rand::rngs::StdRng;

const USAGE: &str = "usage: pager_runtime [--page-size N] [--capacity N] [--max-vm N] [--max-procs N] [--seed N] [--visual]";

struct Options {
    page_size: Option<usize>,
    capacity: Option<usize>,
    max_vm: Option<usize>,
    max_procs: Option<usize>,
    seed: Option<u64>,
    visual: bool,
}

fn main() {
    if let Err(err) = run() {
        eprintln!("pager_runtime: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let Some(opts) = parse_args()? else {
        println!("{USAGE}");
        return Ok(());
    };

    logger::init_from_env().map_err(|err| format!("failed to install logger: {err}"))?;

    let base = MemoryConfig::from_env().map_err(|err| err.to_string())?;
    let config = MemoryConfig::new(
        opts.page_size.unwrap_or(base.page_size()),
        opts.capacity.unwrap_or(base.physical_capacity()),
        opts.max_vm.unwrap_or(base.max_virtual_size()),
        opts.max_procs.unwrap_or(base.max_processes()),
    )
    .map_err(|err| err.to_string())?;

    let mut rng = match opts.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    let mut window = if opts.visual {
        Some(FrameMapWindow::open(config.frame_count()).map_err(|err| err.to_string())?)
    } else {
        None
    };

    let mut stdout = io::stdout().lock();
    let summary = run_demo(config, &mut stdout, &mut rng, |mm| match window.as_mut() {
        Some(window) => window.draw(&mm.frame_owners()),
        None => Ok(()),
    })
    .map_err(|err| format!("demo failed: {err}"))?;

    if !summary.oversize_rejected {
        return Err("oversize address space was admitted".into());
    }
    if !summary.refused.is_empty() {
        eprintln!(
            "{} of {} demo processes were refused by this geometry",
            summary.refused.len(),
            summary.refused.len() + summary.pids.len()
        );
    }

    if let Some(window) = window.as_mut() {
        window.hold().map_err(|err| err.to_string())?;
    }
    Ok(())
}

fn parse_args() -> Result<Option<Options>, String> {
    let mut args = env::args().skip(1);
    let mut opts = Options {
        page_size: None,
        capacity: None,
        max_vm: None,
        max_procs: None,
        seed: None,
        visual: false,
    };

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => return Ok(None),
            "--visual" => opts.visual = true,
            "--page-size" => opts.page_size = Some(number(&arg, args.next())?),
            "--capacity" => opts.capacity = Some(number(&arg, args.next())?),
            "--max-vm" => opts.max_vm = Some(number(&arg, args.next())?),
            "--max-procs" => opts.max_procs = Some(number(&arg, args.next())?),
            "--seed" => opts.seed = Some(number(&arg, args.next())?),
            _ => return Err(format!("unexpected argument '{arg}'\n{USAGE}")),
        }
    }

    Ok(Some(opts))
}

fn number<T: std::str::FromStr>(flag: &str, value: Option<String>) -> Result<T, String> {
    let Some(value) = value else {
        return Err(format!("{flag} requires a value"));
    };
    value
        .parse()
        .map_err(|_| format!("{flag}: '{value}' is not a valid number"))
}
