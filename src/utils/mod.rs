use std::any::Any;
use std::str::FromStr;

pub mod size;

pub fn report_panic(e: &dyn Any) {
    if let Some(e) = e.downcast_ref::<String>() {
        eprintln!("{}: panicked: {}", crate::NAME, e)
    } else if let Some(e) = e.downcast_ref::<&'static str>() {
        eprintln!("{}: panicked: {}", crate::NAME, e)
    } else {
        eprintln!("{}: panicked", crate::NAME)
    }
}

/// Prints a fatal error and its causes to stderr, regardless of the log filter.
pub fn report_failure(err: &anyhow::Error) {
    eprintln!("{}: {}", crate::NAME, err);

    for cause in err.chain().skip(1) {
        eprintln!("caused by: {}", cause);
    }

    let backtrace = err.backtrace().to_string();
    if is_backtrace_runtime_enabled() && !backtrace.is_empty() {
        log::debug!("{}", backtrace);
    }
}

fn is_backtrace_runtime_enabled() -> bool {
    std::env::var("RUST_BACKTRACE")
        .ok()
        .and_then(|s| i32::from_str(&s).ok())
        .is_some_and(|val| val != 0)
}
