mod client;

use std::env;

use catalog::RegionCatalog;
use clap::{Args as ClapArgs, Parser, Subcommand};
use layers::symbology::Theme;
use layers::{GeoPin, InputModality, PinGroup, PinKind, group_pins};
use scene::{MapConfig, MapScene, RecordingSurface};
use serde::Serialize;
use streaming::{MapFilters, PinQuery};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::client::ApiClient;

#[derive(Parser, Debug)]
#[command(author, version, about = "Map pin grouping and region framing client")]
struct Args {
    /// API base URL (env: MAPVIEW_API_BASE_URL, default: http://localhost:8080)
    #[arg(long)]
    api_base_url: Option<String>,

    /// CDN base URL for avatars (env: MAPVIEW_CDN_URL)
    #[arg(long)]
    cdn_url: Option<String>,

    /// MapTiler key for the basemap style (env: MAPVIEW_MAPTILER_API_KEY)
    #[arg(long)]
    maptiler_api_key: Option<String>,

    /// light or dark (env: MAPVIEW_THEME)
    #[arg(long)]
    theme: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(ClapArgs, Debug, Default)]
struct FilterArgs {
    /// Region key, e.g. LVIV
    #[arg(long)]
    region: Option<String>,

    /// Pin kind to include (repeatable): ARTIST, EVENT
    #[arg(long = "type")]
    types: Vec<String>,

    #[arg(long)]
    style: Option<String>,

    /// Tag to include (repeatable)
    #[arg(long = "tag")]
    tags: Vec<String>,
}

impl FilterArgs {
    fn into_filters(self) -> MapFilters {
        let mut f = MapFilters::new();
        f.set_region(self.region.as_deref());
        f.set_style(self.style.as_deref());
        f.set_tags(self.tags);
        f.set_types(
            self.types
                .iter()
                .map(|t| PinKind::from(t.trim().to_ascii_uppercase())),
        );
        f
    }
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List regions with their labels and bounds
    Regions {
        /// Use built-in labels without calling the API
        #[arg(long)]
        offline: bool,
    },

    /// Fetch pins and print them grouped by location
    Pins {
        #[command(flatten)]
        filters: FilterArgs,
    },

    /// Run one map frame and print the commands sent to the map
    Frame {
        #[command(flatten)]
        filters: FilterArgs,

        /// Present stacks as a bottom sheet instead of a popover
        #[arg(long)]
        touch: bool,

        /// Activate the marker at this index after the pins arrive
        #[arg(long)]
        open: Option<usize>,
    },
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GroupSummary<'a> {
    latitude: f64,
    longitude: f64,
    count: usize,
    members: &'a [GeoPin],
}

impl<'a> From<&'a PinGroup> for GroupSummary<'a> {
    fn from(g: &'a PinGroup) -> Self {
        Self {
            latitude: g.latitude(),
            longitude: g.longitude(),
            count: g.len(),
            members: g.members(),
        }
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    if let Err(err) = run(Args::parse()).await {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn flag_or_env(flag: Option<String>, var: &str) -> Option<String> {
    flag.or_else(|| env::var(var).ok())
}

async fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    let theme = match flag_or_env(args.theme, "MAPVIEW_THEME") {
        Some(t) => t.parse::<Theme>()?,
        None => Theme::default(),
    };
    let config = MapConfig::new(
        flag_or_env(args.api_base_url, "MAPVIEW_API_BASE_URL"),
        flag_or_env(args.cdn_url, "MAPVIEW_CDN_URL"),
        flag_or_env(args.maptiler_api_key, "MAPVIEW_MAPTILER_API_KEY"),
        theme,
    );
    let client = ApiClient::new(config.api_base_url.clone());

    match args.command {
        Command::Regions { offline } => list_regions(&client, offline).await?,
        Command::Pins { filters } => print_pins(&client, filters.into_filters()).await?,
        Command::Frame {
            filters,
            touch,
            open,
        } => run_frame(&client, config, filters.into_filters(), touch, open).await?,
    }

    Ok(())
}

async fn list_regions(
    client: &ApiClient,
    offline: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let catalog = if offline {
        RegionCatalog::builtin()
    } else {
        match client.fetch_region_labels().await {
            Ok(labels) => {
                let (catalog, skipped) = RegionCatalog::with_labels(labels);
                for l in skipped {
                    warn!(key = %l.key, "region label without geometry, skipped");
                }
                catalog
            }
            Err(err) => {
                warn!(%err, "region lookup failed, using built-in labels");
                RegionCatalog::builtin()
            }
        }
    };

    for (label, region) in catalog.entries() {
        println!(
            "{}\t{}\t{}",
            region.key,
            label,
            serde_json::to_string(&region.bounds)?
        );
    }
    Ok(())
}

async fn print_pins(
    client: &ApiClient,
    filters: MapFilters,
) -> Result<(), Box<dyn std::error::Error>> {
    let query = PinQuery::from(&filters);
    let pins = client.fetch_pins(&query).await?;
    let groups = group_pins(&pins);
    info!(pins = pins.len(), groups = groups.len(), "grouped pins");

    let summary: Vec<GroupSummary<'_>> = groups.iter().map(GroupSummary::from).collect();
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}

async fn run_frame(
    client: &ApiClient,
    config: MapConfig,
    filters: MapFilters,
    touch: bool,
    open: Option<usize>,
) -> Result<(), Box<dyn std::error::Error>> {
    let modality = if touch {
        InputModality::Touch
    } else {
        InputModality::Pointer
    };
    println!("style\t{}", config.style_url());

    let mut scene = MapScene::new(config, modality);
    let mut surface = RecordingSurface::new();
    scene.on_load(&mut surface);

    let query = PinQuery::from(&filters);
    let request = scene.set_filters(&mut surface, filters);
    match client.fetch_pins(&query).await {
        Ok(pins) => {
            scene.apply_pins(&mut surface, request, pins);
        }
        Err(err) => {
            warn!(%err, "pin fetch failed");
            scene.fetch_failed(request);
        }
    }
    if let Some(index) = open {
        scene.activate_marker(index);
    }

    for cmd in surface.commands() {
        println!("{}", serde_json::to_string(cmd)?);
    }
    for ev in scene.drain_events() {
        info!(frame = ev.frame_index, event = ?ev.payload);
    }
    if let Some(rows) = scene
        .layer()
        .raised()
        .and_then(|i| scene.layer().marker(i))
        .and_then(|m| m.list())
        .map(|l| l.rows())
    {
        for row in rows {
            println!("row\t{}\t{}", row.title, row.subtitle.unwrap_or_default());
        }
    }
    Ok(())
}
