use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use metadata::{AssemblerConfig, MovieDetail, PersonDetail, DEFAULT_API_URL};
use recommender::{RecommendationResult, SessionSeenSet};
use server::{AppConfig, BrowsePage, FacetRecommendations, RecommenderService};
use similarity::Facet;
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::info;

/// User of the interactive session
const SESSION_USER: &str = "local";

/// Movie Recs - similar-movie recommendations by tags, genres, studio, keywords and cast
#[derive(Parser)]
#[command(name = "movie-recs")]
#[command(about = "Content-based movie recommendations", long_about = None)]
struct Cli {
    #[command(flatten)]
    config: ConfigArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct ConfigArgs {
    /// Directory holding movies.dat and browse.dat
    #[arg(long, env = "MOVIE_RECS_DATA_DIR", default_value = "data", global = true)]
    data_dir: PathBuf,

    /// Directory holding the similarity_<facet>.bin files
    #[arg(long, env = "MOVIE_RECS_FACET_DIR", default_value = "data/facets", global = true)]
    facet_dir: PathBuf,

    /// Metadata API root
    #[arg(long, env = "TMDB_API_URL", default_value = DEFAULT_API_URL, global = true)]
    api_url: String,

    /// Metadata API key; placeholders are shown without one
    #[arg(long, env = "TMDB_API_KEY", hide_env_values = true, global = true)]
    api_key: Option<String>,

    /// Prefix for poster and profile image paths
    #[arg(long, env = "MOVIE_RECS_IMAGE_BASE_URL", global = true)]
    image_base_url: Option<String>,

    /// Metadata request timeout in seconds
    #[arg(long, env = "MOVIE_RECS_TIMEOUT_SECS", default_value = "10", global = true)]
    timeout_secs: u64,
}

impl ConfigArgs {
    fn into_config(self) -> AppConfig {
        let defaults = AssemblerConfig::default();
        AppConfig {
            data_dir: self.data_dir,
            facet_dir: self.facet_dir,
            api_url: self.api_url,
            api_key: self.api_key,
            image_base_url: self.image_base_url.unwrap_or(defaults.image_base_url),
            request_timeout: Duration::from_secs(self.timeout_secs),
            ..AppConfig::default()
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Recommend movies similar to a title
    Recommend {
        /// Exact catalog title
        #[arg(long)]
        title: String,

        /// Number of recommendations per facet
        #[arg(long, default_value = "5")]
        count: usize,

        /// Rank by a single facet instead of a full round
        #[arg(long)]
        facet: Option<Facet>,
    },

    /// Show details and top cast of a movie
    Describe {
        /// Exact catalog title
        #[arg(long)]
        title: String,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Page through all movies
    Browse {
        /// Page number, starting at 0
        #[arg(long, default_value = "0")]
        page: usize,
    },

    /// Search for movies by title
    Search {
        /// Movie title to search for (case-insensitive substring match)
        #[arg(long)]
        title: String,
    },

    /// Interactive session with paging, favorites and recommendations
    Session,

    /// Run benchmark to test ranking performance
    Benchmark {
        /// Number of requests to make
        #[arg(long, default_value = "100")]
        requests: usize,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let config = cli.config.into_config();

    println!("Loading catalog from {}...", config.data_dir.display());
    let start = Instant::now();
    let service = RecommenderService::from_config(&config).context("Failed to start")?;
    println!(
        "{} Loaded {} movies in {:?}",
        "✓".green(),
        service.catalog().len(),
        start.elapsed()
    );

    match cli.command {
        Commands::Recommend {
            title,
            count,
            facet,
        } => handle_recommend(&service, &title, count, facet).await?,
        Commands::Describe { title, json } => handle_describe(&service, &title, json).await?,
        Commands::Browse { page } => print_page(&service.browse_page(page).await),
        Commands::Search { title } => handle_search(&service, &title),
        Commands::Session => handle_session(&service, config.recommendation_count).await?,
        Commands::Benchmark { requests } => handle_benchmark(&service, requests)?,
    }

    Ok(())
}

/// Handle the 'recommend' command
async fn handle_recommend(
    service: &RecommenderService,
    title: &str,
    count: usize,
    facet: Option<Facet>,
) -> Result<()> {
    match facet {
        Some(facet) => {
            let result = service.recommend(title, facet, count).await?;
            print_header(title, facet.caption());
            print_recommendations(&result);
        }
        None => {
            let round = service.recommend_round(title, count).await?;
            print_round(title, &round);
        }
    }
    Ok(())
}

/// Handle the 'describe' command
async fn handle_describe(service: &RecommenderService, title: &str, json: bool) -> Result<()> {
    let detail = service.describe(title).await?;
    let cast = service.cast(&detail).await;

    if json {
        let value = serde_json::json!({ "movie": detail, "cast": cast });
        println!("{}", serde_json::to_string_pretty(&value)?);
    } else {
        print_detail(&detail, &cast);
    }
    Ok(())
}

/// Handle the 'search' command
fn handle_search(service: &RecommenderService, title: &str) {
    let matches = service.search(title);
    println!("{}", format!("Search results for '{}':", title).bold().blue());
    if matches.is_empty() {
        println!("  (no matches)");
    }
    for movie in matches.iter().take(20) {
        println!("{}: {}", movie.id, movie.title);
    }
}

/// Handle the 'session' command.
///
/// Reads one command per line until `quit` or end of input.
async fn handle_session(service: &RecommenderService, count: usize) -> Result<()> {
    let mut page = 0usize;
    let mut selected: Option<String> = None;
    let mut seen = SessionSeenSet::new();

    info!("Interactive session started for user '{}'", SESSION_USER);
    print_session_help();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();

    loop {
        stdout.write_all(b"> ").await?;
        stdout.flush().await?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let line = line.trim();
        let (command, arg) = match line.split_once(' ') {
            Some((command, arg)) => (command, arg.trim()),
            None => (line, ""),
        };

        let outcome = match command {
            "" => Ok(()),
            "quit" | "exit" => break,
            "help" => {
                print_session_help();
                Ok(())
            }
            "recommend" => {
                let title = if arg.is_empty() { selected.clone() } else { Some(arg.to_string()) };
                match title {
                    Some(title) => {
                        // Each recommendation round starts with a clean slate
                        seen.clear();
                        let result = service.recommend_round_with(&title, count, &mut seen).await;
                        result.map(|round| {
                            print_round(&title, &round);
                            selected = Some(title);
                        })
                    }
                    None => Err(anyhow::anyhow!("usage: recommend <title>")),
                }
            }
            "describe" => {
                let title = if arg.is_empty() { selected.clone() } else { Some(arg.to_string()) };
                match title {
                    Some(title) => match service.describe(&title).await {
                        Ok(detail) => {
                            let cast = service.cast(&detail).await;
                            print_detail(&detail, &cast);
                            selected = Some(title);
                            Ok(())
                        }
                        Err(e) => Err(e),
                    },
                    None => Err(anyhow::anyhow!("usage: describe <title>")),
                }
            }
            "fav" => service
                .add_favorite(SESSION_USER, arg)
                .map(|added| {
                    if added {
                        println!("{} Added '{}' to favorites", "✓".green(), arg);
                    } else {
                        println!("'{}' is already a favorite", arg);
                    }
                }),
            "favs" => {
                let favorites = service.favorites(SESSION_USER);
                println!("{}", "Favorites:".bold().blue());
                for title in &favorites {
                    println!("  - {}", title);
                }
                Ok(())
            }
            "page" => match arg.parse::<usize>() {
                Ok(n) => {
                    page = show_page(service, n).await;
                    Ok(())
                }
                Err(_) => Err(anyhow::anyhow!("usage: page <number>")),
            },
            "next" => {
                page = show_page(service, page + 1).await;
                Ok(())
            }
            "prev" => {
                page = show_page(service, page.saturating_sub(1)).await;
                Ok(())
            }
            other => Err(anyhow::anyhow!("unknown command '{}', try 'help'", other)),
        };

        if let Err(e) = outcome {
            println!("{} {:#}", "✗".red(), e);
        }
    }

    Ok(())
}

async fn show_page(service: &RecommenderService, page: usize) -> usize {
    let browse = service.browse_page(page).await;
    print_page(&browse);
    browse.page
}

/// Handle the 'benchmark' command
fn handle_benchmark(service: &RecommenderService, requests: usize) -> Result<()> {
    if requests == 0 {
        bail!("--requests must be at least 1");
    }

    let catalog = service.catalog();
    let facets: Vec<Facet> = Facet::ALL
        .into_iter()
        .filter(|&facet| service.index().load_facet(facet).is_ok())
        .collect();
    if facets.is_empty() {
        bail!("No facet could be loaded from the facet directory");
    }

    // Random titles from the catalog
    let titles: Vec<&str> = (0..requests)
        .map(|_| {
            let position = rand::random::<u64>() as usize % catalog.len();
            catalog.movies()[position].title.as_str()
        })
        .collect();

    let bench_start = Instant::now();
    let mut timings = Vec::with_capacity(requests);
    for title in titles {
        let start = Instant::now();
        for &facet in &facets {
            service.rank(title, facet, 5)?;
        }
        timings.push(start.elapsed());
    }
    let wall_time = bench_start.elapsed();

    let total_time: Duration = timings.iter().sum();
    let avg_latency = total_time / (timings.len() as u32);
    timings.sort();
    let percentile = |p: f32| timings[((timings.len() as f32 * p) as usize).min(timings.len() - 1)];
    let throughput = requests as f32 / wall_time.as_secs_f32();

    println!("Benchmark results ({} facets per request):", facets.len());
    println!("Total time: {:?}", wall_time);
    println!("Average latency: {:?}", avg_latency);
    println!("P50 latency: {:?}", percentile(0.50));
    println!("P95 latency: {:?}", percentile(0.95));
    println!("P99 latency: {:?}", percentile(0.99));
    println!("Throughput: {:.2} requests/second", throughput);

    Ok(())
}

fn print_header(title: &str, caption: &str) {
    println!(
        "{}",
        format!("Best recommendations for '{}' {}...", title, caption)
            .bold()
            .blue()
    );
}

fn print_recommendations(recommendations: &RecommendationResult) {
    if recommendations.is_empty() {
        println!("  (nothing new to show)");
    }
    for (i, rec) in recommendations.iter().enumerate() {
        println!(
            "{}. {} - Score: {:.3}",
            (i + 1).to_string().green(),
            rec.movie.title,
            rec.movie.score
        );
        println!("   {}", rec.poster_url.dimmed());
    }
}

fn print_round(title: &str, round: &[FacetRecommendations]) {
    for facet in round {
        print_header(title, facet.caption);
        match &facet.skipped {
            Some(reason) => println!("  {} {}", "skipped:".yellow(), reason),
            None => print_recommendations(&facet.entries),
        }
        println!();
    }
}

fn print_detail(detail: &MovieDetail, cast: &[PersonDetail]) {
    let list = |items: &[String]| {
        if items.is_empty() {
            "N/A".to_string()
        } else {
            items.join(", ")
        }
    };

    println!("{}", detail.title.bold().blue());
    println!("{}", detail.poster_url.dimmed());
    println!("{}Tagline: {}", "• ".green(), detail.tagline);
    println!("{}Overview: {}", "• ".green(), detail.overview);
    println!("{}Release date: {}", "• ".green(), detail.release_date);
    println!("{}Runtime: {} min", "• ".green(), detail.runtime);
    println!("{}Genres: {}", "• ".green(), list(&detail.genres));
    println!("{}Directed by: {}", "• ".green(), list(&detail.directors));
    println!("{}Languages: {}", "• ".green(), list(&detail.languages));
    println!("{}Budget: ${}", "• ".cyan(), detail.budget);
    println!("{}Revenue: ${}", "• ".cyan(), detail.revenue);
    println!(
        "{}Rating: {:.1} ({} votes)",
        "• ".cyan(),
        detail.vote_average,
        detail.vote_count
    );

    if !cast.is_empty() {
        println!("{}", "Top cast:".bold());
        for person in cast {
            println!("  - {} {}", person.name, person.image_url.dimmed());
            println!("    {}", person.biography);
        }
    }
}

fn print_page(page: &BrowsePage) {
    println!(
        "{}",
        format!("Page {} of {}", page.page, page.max_page).bold().blue()
    );
    // Two rows of five, like the poster grid
    for (i, tile) in page.tiles.iter().enumerate() {
        if i > 0 && i % 5 == 0 {
            println!();
        }
        println!("{:>6}  {}  {}", tile.entry.id, tile.entry.title, tile.poster_url.dimmed());
    }
}

fn print_session_help() {
    println!("{}", "Commands:".bold());
    println!("  recommend <title>   similar movies across every facet");
    println!("  describe <title>    details and top cast");
    println!("  fav <title>         add to favorites");
    println!("  favs                list favorites");
    println!("  page <n> | next | prev");
    println!("  quit");
}
