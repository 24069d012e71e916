// src/bin/places.rs
// DOCUMENTATION: Command-line front end for the Places client
// PURPOSE: Run any Places operation from a shell and print the result as JSON

use anyhow::Context;
use clap::{Args, Parser, Subcommand, ValueEnum};
use dotenv::dotenv;
use google_places::{
    AutocompleteOptions, DetailsOptions, GooglePlacesClient, Location, PlacesConfig, RankBy,
    SearchOptions,
};
use serde::Serialize;

#[derive(Parser)]
#[command(name = "places", version, about = "Query the Google Places API")]
struct Cli {
    /// API key (defaults to GOOGLE_PLACES_API_KEY)
    #[arg(long, env = "GOOGLE_PLACES_API_KEY", hide_env_values = true)]
    key: Option<String>,

    /// Skip the response cache
    #[arg(long)]
    no_cache: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Places near a point
    Nearby {
        /// Search centre as "lat,lng"
        #[arg(long, allow_hyphen_values = true)]
        location: Location,
        /// Radius in meters (not used with --rankby distance)
        #[arg(long)]
        radius: Option<u32>,
        #[command(flatten)]
        search: SearchArgs,
    },
    /// Places matching a free-text query
    Text {
        query: String,
        #[command(flatten)]
        search: SearchArgs,
    },
    /// Radar scan around a point
    Radar {
        #[arg(long, allow_hyphen_values = true)]
        location: Location,
        #[arg(long)]
        radius: u32,
        #[command(flatten)]
        search: SearchArgs,
    },
    /// Full details of one place
    Details {
        place_id: String,
        #[arg(long)]
        language: Option<String>,
        /// Fields to return, comma-separated
        #[arg(long, value_delimiter = ',')]
        fields: Vec<String>,
    },
    /// Place name predictions
    Autocomplete {
        input: String,
        #[command(flatten)]
        autocomplete: AutocompleteArgs,
    },
    /// Free-text query predictions
    QueryAutocomplete {
        input: String,
        #[command(flatten)]
        autocomplete: AutocompleteArgs,
    },
    /// Print the URL of a photo
    PhotoUrl {
        reference: String,
        #[arg(long)]
        max_width: Option<u32>,
        #[arg(long)]
        max_height: Option<u32>,
    },
}

#[derive(Args)]
struct SearchArgs {
    #[arg(long)]
    keyword: Option<String>,
    #[arg(long)]
    name: Option<String>,
    /// Place types, comma-separated
    #[arg(long, value_delimiter = ',')]
    types: Vec<String>,
    #[arg(long)]
    language: Option<String>,
    #[arg(long, value_enum)]
    rankby: Option<RankByArg>,
    #[arg(long)]
    opennow: bool,
    #[arg(long)]
    pagetoken: Option<String>,
}

#[derive(Args)]
struct AutocompleteArgs {
    /// Bias point as "lat,lng"
    #[arg(long, allow_hyphen_values = true, requires = "radius")]
    location: Option<Location>,
    #[arg(long)]
    radius: Option<u32>,
    #[arg(long)]
    language: Option<String>,
    #[arg(long)]
    types: Option<String>,
    /// Restrictions such as "country:es", comma-separated
    #[arg(long, value_delimiter = ',')]
    components: Vec<String>,
}

#[derive(Clone, Copy, ValueEnum)]
enum RankByArg {
    Prominence,
    Distance,
}

impl From<SearchArgs> for SearchOptions {
    fn from(args: SearchArgs) -> Self {
        SearchOptions {
            keyword: args.keyword,
            name: args.name,
            types: args.types,
            language: args.language,
            rankby: args.rankby.map(|r| match r {
                RankByArg::Prominence => RankBy::Prominence,
                RankByArg::Distance => RankBy::Distance,
            }),
            opennow: args.opennow,
            pagetoken: args.pagetoken,
            ..SearchOptions::default()
        }
    }
}

impl From<AutocompleteArgs> for AutocompleteOptions {
    fn from(args: AutocompleteArgs) -> Self {
        AutocompleteOptions {
            location: args.location,
            radius: args.radius,
            language: args.language,
            types: args.types,
            components: args.components,
            ..AutocompleteOptions::default()
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Load environment variables
    dotenv().ok();

    // 2. Load configuration
    let cli = Cli::parse();
    let mut config = PlacesConfig::from_env();
    if let Some(key) = cli.key {
        config.api_key = key;
    }
    if cli.no_cache {
        config.cache_period = 0;
    }

    // 3. Initialize logging
    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", &config.log_level);
    }
    env_logger::init();

    if let Err(e) = config.validate() {
        anyhow::bail!("Configuration error: {}", e);
    }

    let client = GooglePlacesClient::from_config(config)?;

    match cli.command {
        Command::Nearby {
            location,
            radius,
            search,
        } => print(&client.nearby_search(location, radius, &search.into()).await?),
        Command::Text { query, search } => print(&client.text_search(&query, &search.into()).await?),
        Command::Radar {
            location,
            radius,
            search,
        } => print(&client.radar_search(location, radius, &search.into()).await?),
        Command::Details {
            place_id,
            language,
            fields,
        } => {
            let options = DetailsOptions {
                language,
                fields,
                ..DetailsOptions::default()
            };
            print(&client.place_details(&place_id, &options).await?)
        }
        Command::Autocomplete {
            input,
            autocomplete,
        } => print(&client.place_autocomplete(&input, &autocomplete.into()).await?),
        Command::QueryAutocomplete {
            input,
            autocomplete,
        } => print(&client.query_autocomplete(&input, &autocomplete.into()).await?),
        Command::PhotoUrl {
            reference,
            max_width,
            max_height,
        } => {
            println!("{}", client.photo_url(&reference, max_width, max_height)?);
            Ok(())
        }
    }
}

fn print<T: Serialize>(value: &T) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize result")?;
    println!("{}", json);
    Ok(())
}
