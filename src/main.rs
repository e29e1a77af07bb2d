use clap::Parser;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::filter::filter_fn;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, Layer};
use treeable::cli::{execute_command, output, Cli};

fn main() {
    let cli = Cli::parse();

    setup_logging(cli.debug);

    if let Err(e) = execute_command(&cli) {
        output::error(&e);
        std::process::exit(e.exit_code());
    }
}

fn setup_logging(verbosity: u8) {
    let filter = match verbosity {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        3 => LevelFilter::TRACE,
        _ => {
            eprintln!("max verbosity is -ddd, using trace");
            LevelFilter::TRACE
        }
    };

    // Only our own spans and events; dependencies stay quiet
    let module_filter = filter_fn(|metadata| metadata.target().starts_with("treeable"));

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_names(false)
        .with_span_events(FmtSpan::CLOSE);

    let filtered_layer = fmt_layer.with_filter(filter).with_filter(module_filter);

    tracing_subscriber::registry().with(filtered_layer).init();

    match filter {
        LevelFilter::INFO => tracing::info!("Debug mode: info"),
        LevelFilter::DEBUG => tracing::debug!("Debug mode: debug"),
        LevelFilter::TRACE => tracing::debug!("Debug mode: trace"),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // https://docs.rs/clap/latest/clap/_derive/_tutorial/index.html#testing
    #[test]
    fn verify_cli() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn given_render_args_when_parsing_then_fills_build_args() {
        let cli = Cli::try_parse_from([
            "treeable", "-dd", "render", "menu.json", "--id", "name", "--max-depth", "2",
        ])
        .unwrap();
        assert_eq!(cli.debug, 2);
        match cli.command {
            Some(treeable::cli::Commands::Render(args)) => {
                assert_eq!(args.id.as_deref(), Some("name"));
                assert_eq!(args.max_depth, Some(2));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
