mod api;
mod server;

use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use viral_analyzer::ingest::Ingestor;
use viral_analyzer::llm::{self, LlmClient};
use viral_analyzer::scraper::ScraperClient;
use viral_analyzer::store::ContentStore;
use viral_analyzer::{
    format_float, scheduler, Analyzer, AnalyzerConfig, EngagementMetrics, EngagementScorer,
    Platform, ScrapingRequest, ViralContent,
};

#[derive(Parser)]
#[command(name = "viral-analyzer", about = "Viral content analyzer and brief generator")]
struct Cli {
    /// Path to a TOML config file (defaults to $ANALYZER_CONFIG_PATH or config/analyzer.toml).
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    Serve(ServeArgs),
    Scrape(ScrapeArgs),
    Score(ScoreArgs),
    Analyze(AnalyzeArgs),
    Brief(AnalyzeArgs),
    List(ListArgs),
}

#[derive(Args, Debug, Clone, Default)]
struct ServeArgs {
    #[arg(long)]
    host: Option<String>,
    #[arg(long)]
    port: Option<u16>,
    #[arg(long)]
    no_scheduler: bool,
}

#[derive(Args, Debug, Clone)]
struct ScrapeArgs {
    #[arg(long = "platform", required_unless_present = "post")]
    platforms: Vec<String>,
    #[arg(long = "keyword")]
    keywords: Vec<String>,
    #[arg(long, default_value_t = 20)]
    limit: usize,
    #[arg(long)]
    subreddit: Option<String>,
    /// Scrape a single Reddit post URL instead of trending content.
    #[arg(long, conflicts_with_all = ["platforms", "keywords", "subreddit"])]
    post: Option<String>,
}

#[derive(Args, Debug, Clone)]
struct ScoreArgs {
    #[arg(long, default_value_t = 0)]
    views: u64,
    #[arg(long, default_value_t = 0)]
    likes: u64,
    #[arg(long, default_value_t = 0)]
    comments: u64,
    #[arg(long, default_value_t = 0)]
    shares: u64,
    #[arg(long, default_value_t = 0)]
    upvotes: u64,
}

#[derive(Args, Debug, Clone)]
struct AnalyzeArgs {
    /// Stored content id.
    id: String,
    #[arg(long)]
    ai: bool,
    #[arg(long)]
    ai_model: Option<String>,
}

#[derive(Args, Debug, Clone)]
struct ListArgs {
    #[arg(long)]
    platform: Option<String>,
    #[arg(long)]
    search: Option<String>,
    #[arg(long, default_value_t = 10)]
    top: usize,
}

#[tokio::main]
async fn main() {
    load_dotenv();
    if let Err(err) = run().await {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), String> {
    let cli = Cli::parse();
    let (config, config_path) = AnalyzerConfig::load(cli.config).map_err(|err| err.to_string())?;
    init_tracing(config.log_level());
    if let Some(path) = config_path.filter(|path| path.exists()) {
        tracing::debug!(path = %path.display(), "loaded config");
    }

    let command = cli.command.unwrap_or(Command::Serve(ServeArgs::default()));
    match command {
        Command::Serve(args) => run_serve(config, args).await,
        Command::Scrape(args) => run_scrape(config, args).await,
        Command::Score(args) => run_score(&config, args),
        Command::Analyze(args) => run_analyze(config, args).await,
        Command::Brief(args) => run_brief(config, args).await,
        Command::List(args) => run_list(config, args).await,
    }
}

fn init_tracing(default_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

async fn open_store(config: &AnalyzerConfig) -> Result<Arc<ContentStore>, String> {
    let store = ContentStore::load(config.store.path.clone())
        .await
        .map_err(|err| err.to_string())?;
    Ok(Arc::new(store))
}

fn build_ingestor(config: &AnalyzerConfig, store: Arc<ContentStore>) -> Result<Ingestor, String> {
    let scraper = ScraperClient::from_config(&config.scraper).map_err(|err| err.to_string())?;
    Ok(Ingestor::new(
        scraper,
        store,
        EngagementScorer::new(config.weights.clone()),
        config.scraper.default_subreddit.clone(),
    ))
}

async fn run_serve(config: AnalyzerConfig, args: ServeArgs) -> Result<(), String> {
    let store = open_store(&config).await?;
    let ingestor = build_ingestor(&config, Arc::clone(&store))?;

    let llm_client = LlmClient::from_env(None);
    match llm_client.as_ref() {
        Some(client) => tracing::info!(model = client.model(), "AI enhancement available"),
        None => tracing::info!("AI enhancement not configured"),
    }

    let scheduler_handle = if args.no_scheduler {
        None
    } else {
        scheduler::spawn(ingestor.clone(), &config.scheduler)
    };

    tracing::info!(
        variation = config.analysis.variation.label(),
        store = %config.store.path.display(),
        "starting server"
    );

    let state = server::AppState {
        store,
        ingestor,
        analyzer: Analyzer::new(config.analysis.clone()),
        llm_client,
    };

    let host = args.host.unwrap_or_else(|| config.server.host.clone());
    let port = args.port.unwrap_or(config.server.port);
    let result = server::serve(state, &host, port, &config.server.allowed_origins).await;

    if let Some(handle) = scheduler_handle {
        handle.abort();
    }
    result
}

async fn run_scrape(config: AnalyzerConfig, args: ScrapeArgs) -> Result<(), String> {
    if let Some(url) = args.post.as_deref() {
        let store = open_store(&config).await?;
        let contents = build_ingestor(&config, store)?
            .scrape_post(url)
            .await
            .map_err(|err| format!("scraping failed: {}", err))?;
        println!("Scraped {} contents", contents.len());
        print_contents(&contents);
        return Ok(());
    }

    let platforms = args
        .platforms
        .iter()
        .map(|name| name.parse::<Platform>().map_err(|err| err.to_string()))
        .collect::<Result<Vec<_>, _>>()?;

    let store = open_store(&config).await?;
    let ingestor = build_ingestor(&config, store)?;
    let request = ScrapingRequest {
        platforms,
        keywords: args.keywords,
        limit: args.limit,
        reddit_subreddit: args.subreddit,
        ..ScrapingRequest::default()
    };

    let contents = ingestor
        .scrape_trending(&request)
        .await
        .map_err(|err| format!("scraping failed: {}", err))?;

    println!("Scraped {} contents", contents.len());
    print_contents(&contents);
    Ok(())
}

fn run_score(config: &AnalyzerConfig, args: ScoreArgs) -> Result<(), String> {
    let metrics = EngagementMetrics {
        views: args.views,
        likes: args.likes,
        comments: args.comments,
        shares: args.shares,
        upvotes: args.upvotes,
        ..EngagementMetrics::default()
    };
    let scorer = EngagementScorer::new(config.weights.clone());
    println!("Raw engagement: {}", format_float(scorer.raw_total(&metrics), 2));
    println!("Viral score: {}", format_float(scorer.score(&metrics), 1));
    Ok(())
}

async fn load_content(config: &AnalyzerConfig, id: &str) -> Result<ViralContent, String> {
    let store = open_store(config).await?;
    store
        .get(id)
        .await
        .ok_or_else(|| format!("content not found: {}", id))
}

fn ai_client(args: &AnalyzeArgs) -> Result<Option<LlmClient>, String> {
    if !args.ai {
        return Ok(None);
    }
    LlmClient::from_env(args.ai_model.clone())
        .map(Some)
        .ok_or_else(|| "LLM_API_KEY is not set".to_string())
}

async fn run_analyze(config: AnalyzerConfig, args: AnalyzeArgs) -> Result<(), String> {
    let content = load_content(&config, &args.id).await?;
    let client = ai_client(&args)?;
    let analyzer = Analyzer::new(config.analysis.clone());

    let mut analysis = analyzer.analyze(&content);
    if let Some(client) = client.as_ref() {
        let (enhanced, warnings) = llm::enhance_analysis(Some(client), &content, analysis).await;
        analysis = enhanced;
        print_warnings(&warnings);
    }

    println!("{}", to_pretty(&analysis)?);
    Ok(())
}

async fn run_brief(config: AnalyzerConfig, args: AnalyzeArgs) -> Result<(), String> {
    let content = load_content(&config, &args.id).await?;
    let client = ai_client(&args)?;
    let analyzer = Analyzer::new(config.analysis.clone());

    let mut analysis = analyzer.analyze(&content);
    if let Some(client) = client.as_ref() {
        let (enhanced, warnings) = llm::enhance_analysis(Some(client), &content, analysis).await;
        analysis = enhanced;
        print_warnings(&warnings);
    }

    let mut brief = analyzer.brief(&content, &analysis);
    if let Some(client) = client.as_ref() {
        let (enhanced, warnings) = llm::enhance_brief(Some(client), &content, &analysis, brief).await;
        brief = enhanced;
        print_warnings(&warnings);
    }

    println!("{}", to_pretty(&brief)?);
    Ok(())
}

async fn run_list(config: AnalyzerConfig, args: ListArgs) -> Result<(), String> {
    let store = open_store(&config).await?;

    let mut contents = match (args.search.as_deref(), args.platform.as_deref()) {
        (Some(query), _) if !query.trim().is_empty() => store.search(query).await,
        (_, Some(name)) => {
            let platform = name.parse::<Platform>().map_err(|err| err.to_string())?;
            store.by_platform(platform).await
        }
        _ => store.all().await,
    };
    contents.truncate(args.top);

    if let Some(updated) = store.last_updated().await {
        println!("Store updated {}", updated.to_rfc3339());
    }
    print_contents(&contents);
    Ok(())
}

fn print_contents(contents: &[ViralContent]) {
    for content in contents {
        println!(
            "{:>5}  {:<8} {}  [{}]",
            format_float(content.viral_score, 1),
            content.platform,
            content.title,
            content.id
        );
    }
}

fn print_warnings(warnings: &[String]) {
    for warning in warnings {
        eprintln!("Warning: {}", warning);
    }
}

fn to_pretty<T: serde::Serialize>(value: &T) -> Result<String, String> {
    serde_json::to_string_pretty(value).map_err(|err| format!("failed to encode output: {}", err))
}

fn load_dotenv() {
    let _ = dotenvy::dotenv();
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    let manifest_path = Path::new(manifest_dir).join(".env");
    let _ = dotenvy::from_path(manifest_path);
}
