use clap::Parser;
use std::path::PathBuf;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[derive(Parser)]
#[command(name = "feed-scraper")]
#[command(about = "Read titles and first comments for a range of posts in a listing")]
#[command(version)]
struct Cli {
    /// Config file to run
    config: PathBuf,

    /// Run in headless mode (overrides config)
    #[arg(long)]
    headless: bool,

    /// First position to extract, 1-based (overrides config)
    #[arg(long)]
    start: Option<usize>,

    /// Last position to extract, inclusive (overrides config)
    #[arg(long)]
    end: Option<usize>,

    /// Verbose output (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Validate config without running
    #[arg(long)]
    check: bool,

    /// Quiet mode (only errors)
    #[arg(short, long)]
    quiet: bool,
}

#[tokio::main]
async fn main() -> feed_scraper::Result<()> {
    let cli = Cli::parse();

    let level = if cli.quiet {
        LevelFilter::ERROR
    } else {
        match cli.verbose {
            0 => LevelFilter::WARN,
            1 => LevelFilter::INFO,
            _ => LevelFilter::DEBUG,
        }
    };

    // RUST_LOG directives refine the flag-chosen default
    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .init();

    let mut config = feed_scraper::Config::load(&cli.config)?.with_range(cli.start, cli.end)?;
    let url = config.target.resolve_url()?;

    if cli.check {
        println!("Config valid: {}", config.name);
        println!("  Target: {}", url);
        println!("  Range: {} ({} posts)", config.range, config.range.width());
        println!("  Timeout: {}ms", config.timeout_ms);
        if let Some(ref on_failure) = config.on_failure {
            if let Some(ref retry) = on_failure.retry {
                println!("  Retry attempts: {}", retry.attempts);
            }
        }
        return Ok(());
    }

    if cli.headless {
        config.browser.headless = true;
    }

    println!("Running: {} ({} posts {})", config.name, url, config.range);

    let runner = feed_scraper::Runner::new(&config.browser).await?;
    let result = runner.run(&config).await?;

    println!();
    for post in &result.results {
        println!("{}", post);
    }
    if result.success {
        println!("✓ Success");
    } else {
        println!("✗ Failed");
        if let Some(ref error) = result.error {
            println!("  Error: {}", error);
        }
    }
    println!("  Posts: {}", result.results.len());
    if !result.results.is_empty() {
        let with_comment = result.results.iter().filter(|r| r.has_comment()).count();
        println!("  With comments: {}", with_comment);
    }
    println!("  Duration: {}ms", result.duration_ms);
    if result.retries > 0 {
        println!("  Retries: {}", result.retries);
    }

    runner.close().await?;

    if !result.success {
        std::process::exit(1);
    }

    Ok(())
}
