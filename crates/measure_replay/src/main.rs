fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(error) = measure_replay::run(std::env::args_os()) {
        tracing::error!("{error:#}");
        std::process::exit(1);
    }
}
