use anyhow::Context;
use clap::{Parser, Subcommand};
use log::info;
use std::{path::PathBuf, time::Instant};

use crate::{
    actions::{self, DashboardAction},
    catalog::Catalog,
    config::{self, Config},
    domain::{artist::Artist, options},
    filter::FilterCriteria,
    onboard::{
        ArtistForm,
        submission::{Submission, SubmissionState},
    },
    selection::Selection,
};

#[derive(Parser)]
#[command(name = "artistly")]
#[command(version = "0.1")]
#[command(about = "Browse and book performing artists")]
pub struct Cli {
    /// Path to the config TOML file
    #[arg(short, long, default_value = "artistly.toml")]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Browse artists, optionally filtered
    Browse {
        /// Category tag, matched as a case-insensitive substring
        #[arg(long, default_value = "")]
        category: String,
        /// City, matched as a case-insensitive substring
        #[arg(long, default_value = "")]
        location: String,
        /// Price tier, matched exactly
        #[arg(long, default_value = "")]
        price_range: String,
        /// Free text searched in name, bio and categories
        #[arg(short, long, default_value = "")]
        search: String,
    },
    /// Show the management dashboard
    Dashboard {
        #[arg(short, long, default_value = "")]
        search: String,
    },
    /// Show one artist profile
    Show { id: String },
    /// Ask an artist for a quote
    Quote { id: String },
    /// Perform a dashboard action on an artist
    Action {
        #[arg(value_enum)]
        action: DashboardAction,
        id: String,
    },
    /// Register as a new artist
    Onboard {
        #[arg(long)]
        name: String,
        #[arg(long)]
        bio: String,
        /// May be repeated
        #[arg(long = "category")]
        categories: Vec<String>,
        /// May be repeated
        #[arg(long = "language")]
        languages: Vec<String>,
        #[arg(long)]
        fee_range: String,
        #[arg(long)]
        location: String,
        #[arg(long)]
        profile_image: Option<String>,
    },
    /// List the available categories, locations, price ranges and languages
    Options,
    /// Run http server hosting the catalog
    Serve,
}

fn load_catalog(cfg: &Config) -> anyhow::Result<Catalog> {
    let catalog = match &cfg.catalog.path {
        Some(path) => Catalog::from_file(path),
        None => Catalog::bundled(),
    };
    catalog.with_context(|| "Failed to load artist catalog")
}

fn print_artist_row(artist: &Artist) {
    println!(
        "  [{}] {} ({}) - {}, {}, {} ★{}",
        artist.id,
        artist.name,
        artist.category.join(", "),
        artist.location,
        artist.price_range,
        artist.availability,
        artist.rating
    );
}

fn print_artist_profile(artist: &Artist) {
    println!("{} [{}]", artist.name, artist.id);
    println!("  Categories:   {}", artist.category.join(", "));
    println!("  Location:     {}", artist.location);
    println!("  Languages:    {}", artist.languages.join(", "));
    println!("  Price range:  {}", artist.price_range);
    println!("  Experience:   {}", artist.experience);
    println!("  Rating:       {}", artist.rating);
    println!("  Availability: {}", artist.availability);
    println!("  {}", artist.bio);
}

fn print_options(title: &str, values: &[&str]) {
    println!("{title}:");
    for value in values {
        println!("    - {value}");
    }
}

/// Entrypoint for CLI
pub fn run() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let cfg = config::Config::load_or_default(&cli.config)?;

    match cli.command {
        Commands::Browse {
            category,
            location,
            price_range,
            search,
        } => {
            let catalog = load_catalog(&cfg)?;
            let criteria = FilterCriteria::default()
                .with_category(category)
                .with_location(location)
                .with_price_range(price_range)
                .with_search_term(search);
            let artists = catalog.filter(&criteria);

            println!("{} artists found", artists.len());
            if artists.is_empty() {
                println!("No artists found. Try adjusting your filters or search terms.");
            }
            for artist in artists {
                print_artist_row(artist);
            }
        }

        Commands::Dashboard { search } => {
            let catalog = load_catalog(&cfg)?;
            let stats = catalog.stats();

            println!("Total artists: {}", stats.total);
            println!("Available:     {}", stats.available);
            println!("Busy:          {}", stats.busy);
            println!("Avg rating:    {}", stats.average_rating_display());

            let artists = catalog.search(&search);
            if artists.is_empty() {
                println!("No artists found matching your search.");
            }
            for artist in artists {
                print_artist_row(artist);
            }
        }

        Commands::Show { id } => {
            let catalog = load_catalog(&cfg)?;
            print_artist_profile(catalog.get(&id)?);
        }

        Commands::Quote { id } => {
            let catalog = load_catalog(&cfg)?;
            println!("{}", actions::request_quote(catalog.get(&id)?)?);
        }

        Commands::Action { action, id } => {
            let catalog = load_catalog(&cfg)?;
            println!("{}", actions::action_message(action, catalog.get(&id)?));
        }

        Commands::Onboard {
            name,
            bio,
            categories,
            languages,
            fee_range,
            location,
            profile_image,
        } => {
            let form = ArtistForm {
                name,
                bio,
                category: Selection::from(categories),
                languages: Selection::from(languages),
                fee_range,
                location,
                profile_image,
            };

            let summary = format!(
                "Submitting {} ({} categories, {} languages)...",
                form.name,
                form.category.len(),
                form.languages.len()
            );

            let submission =
                match Submission::start(form, cfg.onboarding.submit_delay(), Instant::now()) {
                    Ok(s) => s,
                    Err(errors) => {
                        for error in &errors.0 {
                            println!("  {}", error.message);
                        }
                        anyhow::bail!("registration rejected");
                    }
                };

            println!("{summary}");
            match submission.wait() {
                SubmissionState::Submitted(receipt) => {
                    println!("Registration Successful!");
                    println!(
                        "Thank you for joining Artistly, {}. Your profile is now under review and will be live soon.",
                        receipt.name
                    );
                    println!(
                        "Reference {} at {}",
                        receipt.submission_id,
                        receipt.submitted_at.format("%Y-%m-%d %H:%M:%S")
                    );
                }
                state => anyhow::bail!("registration did not settle: {state:?}"),
            }
        }

        Commands::Options => {
            let catalog = load_catalog(&cfg)?;
            println!("Categories:");
            for (category, count) in catalog.category_counts() {
                println!("    - {category} ({count} artists)");
            }

            print_options("Locations", options::LOCATIONS);
            print_options("Price ranges", options::PRICE_RANGES);
            print_options("Languages", options::LANGUAGES);
        }

        Commands::Serve => {
            info!("Starting HTTP server...");

            let catalog = load_catalog(&cfg)?;
            let http_server = crate::http::server::HttpServer::new(
                catalog,
                cfg.http.clone(),
                &cfg.onboarding,
            );

            println!(
                "HTTP server running at http://{}:{}",
                http_server.config.bind_addr, http_server.config.port
            );
            http_server.run();
        }
    }

    Ok(())
}
