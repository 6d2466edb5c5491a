use tracing_subscriber::{EnvFilter, fmt};

/// Installs the global subscriber.
///
/// `RUST_LOG` overrides the default filter, which shows idfkit messages at
/// `info`, or at `debug` with `--verbose`.
pub fn init(verbose: bool) {
    let default = if verbose {
        "warn,idfkit=debug,idfkit_parser=debug,idfkit_loader=debug,idfkit_model=debug,idfkit_writer=debug"
    } else {
        "warn,idfkit=info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
