use super::args::{Cli, CollectionCommands, Commands, ListArgs, RangeArg};
use super::print::{
    print_bounds, print_collections, print_config, print_full_items, print_item_list,
    print_messages,
};
use clap::Parser;
use directories::ProjectDirs;
use platedex::api::{CatalogApi, ItemDraft};
use platedex::bounds::{DataBounds, Span};
use platedex::commands::archive::ArchiveDraft;
use platedex::commands::config::ConfigAction;
use platedex::commands::list::ListOptions;
use platedex::commands::CmdResult;
use platedex::config::PlatedexConfig;
use platedex::error::{PlatedexError, Result};
use platedex::fields::parse_date;
use platedex::filter::FilterSpec;
use platedex::model::ItemKind;
use platedex::store::fs::FileStore;
use std::collections::BTreeSet;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Overrides the OS data directory.
const HOME_ENV: &str = "PLATEDEX_HOME";

struct AppContext {
    api: CatalogApi<FileStore>,
    kind: ItemKind,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let mut ctx = init_context(&cli)?;

    match cli.command {
        Some(Commands::Add {
            registration,
            fields,
        }) => handle_add(&mut ctx, registration, fields),
        Some(Commands::Update { selectors, set }) => handle_update(&mut ctx, selectors, set),
        Some(Commands::Delete { selectors }) => handle_delete(&mut ctx, selectors),
        Some(Commands::List(args)) => handle_list(&mut ctx, args),
        Some(Commands::Show { selectors }) => handle_show(&mut ctx, selectors),
        Some(Commands::Acquire {
            selectors,
            date,
            set,
        }) => handle_acquire(&mut ctx, selectors, date, set),
        Some(Commands::Archive {
            selectors,
            date,
            reason,
            set,
        }) => handle_archive(&mut ctx, selectors, date, reason, set),
        Some(Commands::Collections { action }) => handle_collections(&mut ctx, action),
        Some(Commands::Bounds { collection }) => handle_bounds(&mut ctx, collection),
        Some(Commands::Export { output }) => handle_export(&mut ctx, output),
        Some(Commands::Import { path }) => handle_import(&mut ctx, path),
        Some(Commands::Template { output }) => handle_template(&mut ctx, output),
        Some(Commands::Config { key, value }) => handle_config(&mut ctx, key, value),
        None => handle_list(&mut ctx, ListArgs::default()),
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn data_dir() -> Result<PathBuf> {
    if let Some(home) = std::env::var_os(HOME_ENV).filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(home));
    }
    ProjectDirs::from("com", "platedex", "platedex")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| {
            PlatedexError::Store(format!(
                "Could not determine data directory; set {}",
                HOME_ENV
            ))
        })
}

fn init_context(cli: &Cli) -> Result<AppContext> {
    let data_dir = data_dir()?;
    let config = PlatedexConfig::load(&data_dir)?;
    let kind = cli.kind.unwrap_or(config.default_kind);
    tracing::debug!(data_dir = %data_dir.display(), %kind, "starting");

    let store = FileStore::new(data_dir.clone());
    Ok(AppContext {
        api: CatalogApi::new(store, data_dir, config),
        kind,
    })
}

fn finish(result: &CmdResult) {
    print_messages(&result.messages);
}

fn handle_add(ctx: &mut AppContext, registration: String, fields: Vec<String>) -> Result<()> {
    let mut draft = ItemDraft::new(registration);
    draft.fields = platedex::api::parse_assignments(&fields)?;
    let result = ctx.api.add_item(ctx.kind, draft)?;
    finish(&result);
    Ok(())
}

fn handle_update(ctx: &mut AppContext, selectors: Vec<String>, set: Vec<String>) -> Result<()> {
    let result = ctx.api.update_items(ctx.kind, &selectors, &set)?;
    finish(&result);
    Ok(())
}

fn handle_delete(ctx: &mut AppContext, selectors: Vec<String>) -> Result<()> {
    let result = ctx.api.delete_items(ctx.kind, &selectors)?;
    finish(&result);
    Ok(())
}

fn handle_list(ctx: &mut AppContext, args: ListArgs) -> Result<()> {
    let bounds = if args.has_ranges() {
        ctx.api.bounds(ctx.kind, args.collection.as_deref())?.bounds
    } else {
        None
    };
    let filter = build_filter(&args, bounds.as_ref())?;

    let options = ListOptions {
        filter,
        sort: args.sort.unwrap_or(ctx.api.config().default_sort),
        query: args.search.unwrap_or_default(),
        collection: args.collection,
    };
    let result = ctx.api.list_items(ctx.kind, options)?;
    print_item_list(&result.listed_items, ctx.kind);
    finish(&result);
    Ok(())
}

fn handle_show(ctx: &mut AppContext, selectors: Vec<String>) -> Result<()> {
    let result = ctx.api.show_items(ctx.kind, &selectors)?;
    print_full_items(&result.listed_items, ctx.api.config());
    finish(&result);
    Ok(())
}

fn handle_acquire(
    ctx: &mut AppContext,
    selectors: Vec<String>,
    date: Option<String>,
    set: Vec<String>,
) -> Result<()> {
    let result = ctx.api.acquire_items(&selectors, date.as_deref(), &set)?;
    finish(&result);
    Ok(())
}

fn handle_archive(
    ctx: &mut AppContext,
    selectors: Vec<String>,
    date: Option<String>,
    reason: Option<String>,
    set: Vec<String>,
) -> Result<()> {
    let draft = ArchiveDraft {
        date,
        reason,
        fields: platedex::api::parse_assignments(&set)?,
    };
    let result = ctx.api.archive_items(&selectors, draft)?;
    finish(&result);
    Ok(())
}

fn handle_collections(ctx: &mut AppContext, action: Option<CollectionCommands>) -> Result<()> {
    let result = match action.unwrap_or(CollectionCommands::List) {
        CollectionCommands::List => {
            let result = ctx.api.list_collections()?;
            print_collections(&result.collections);
            result
        }
        CollectionCommands::Create { name } => ctx.api.create_collection(&name)?,
        CollectionCommands::Rename { name, new_name } => {
            ctx.api.rename_collection(&name, &new_name)?
        }
        CollectionCommands::Delete { name, cascade } => ctx.api.delete_collection(&name, cascade)?,
        CollectionCommands::Add { name, selectors } => {
            ctx.api.add_to_collection(&name, &selectors)?
        }
        CollectionCommands::Remove { name, selectors } => {
            ctx.api.remove_from_collection(&name, &selectors)?
        }
    };
    finish(&result);
    Ok(())
}

fn handle_bounds(ctx: &mut AppContext, collection: Option<String>) -> Result<()> {
    let result = ctx.api.bounds(ctx.kind, collection.as_deref())?;
    if let Some(bounds) = &result.bounds {
        print_bounds(bounds, ctx.kind);
    }
    finish(&result);
    Ok(())
}

fn handle_export(ctx: &mut AppContext, output: Option<PathBuf>) -> Result<()> {
    let result = ctx.api.export(ctx.kind, output.as_deref())?;
    if let Some(text) = &result.output {
        print!("{}", text);
    }
    finish(&result);
    Ok(())
}

fn handle_import(ctx: &mut AppContext, path: PathBuf) -> Result<()> {
    let result = ctx.api.import(ctx.kind, &path)?;
    finish(&result);
    Ok(())
}

fn handle_template(ctx: &mut AppContext, output: Option<PathBuf>) -> Result<()> {
    let result = ctx.api.template(output.as_deref())?;
    if let Some(text) = &result.output {
        print!("{}", text);
    }
    finish(&result);
    Ok(())
}

fn handle_config(ctx: &mut AppContext, key: Option<String>, value: Option<String>) -> Result<()> {
    let action = match (key, value) {
        (None, _) => ConfigAction::ShowAll,
        (Some(k), None) => ConfigAction::ShowKey(k),
        (Some(k), Some(v)) => ConfigAction::Set(k, v),
    };
    let result = ctx.api.config_action(action.clone())?;
    if let (ConfigAction::ShowAll, Some(config)) = (&action, &result.config) {
        print_config(config);
    }
    finish(&result);
    Ok(())
}

// --- Filter construction ---

fn build_filter(args: &ListArgs, bounds: Option<&DataBounds>) -> Result<FilterSpec> {
    let set = |values: &[String]| -> BTreeSet<String> {
        values.iter().map(|v| v.trim().to_string()).collect()
    };

    let mut filter = FilterSpec {
        countries: set(&args.countries),
        types: set(&args.types),
        locations: set(&args.locations),
        colors: set(&args.colors),
        source_types: set(&args.source_types),
        source_countries: set(&args.source_countries),
        archival_reasons: set(&args.archival_reasons),
        recipient_countries: set(&args.recipient_countries),
        has_vehicle: args.has_vehicle,
        ..Default::default()
    };

    if let Some(bounds) = bounds {
        filter.period = int_range(args.period.as_ref(), &bounds.period, "period")?;
        filter.year = int_range(args.year.as_ref(), &bounds.year, "year")?;
        filter.cost = int_range(args.cost.as_ref(), &bounds.cost, "cost")?;
        filter.value = int_range(args.value.as_ref(), &bounds.value, "value")?;
        filter.date = date_range(args.date.as_ref(), &bounds.date, "date")?;
        filter.archival_date =
            date_range(args.archival_date.as_ref(), &bounds.archival_date, "archival date")?;
    }
    Ok(filter)
}

/// Fills open ends from `bounds`.
fn int_range<T>(range: Option<&RangeArg>, bounds: &Span<T>, name: &str) -> Result<Option<Span<T>>>
where
    T: std::str::FromStr + Copy,
{
    let Some(range) = range else {
        return Ok(None);
    };
    let end = |raw: &Option<String>, fallback: T| -> Result<T> {
        match raw {
            None => Ok(fallback),
            Some(v) => v.parse().map_err(|_| {
                PlatedexError::Validation(format!("Invalid {} bound: {}", name, v))
            }),
        }
    };
    Ok(Some(Span::new(
        end(&range.min, bounds.min)?,
        end(&range.max, bounds.max)?,
    )))
}

fn date_range(
    range: Option<&RangeArg>,
    bounds: &Span<String>,
    name: &str,
) -> Result<Option<Span<String>>> {
    let Some(range) = range else {
        return Ok(None);
    };
    let end = |raw: &Option<String>, fallback: &String| -> Result<String> {
        match raw {
            None => Ok(fallback.clone()),
            Some(v) => parse_date(v)
                .ok_or_else(|| PlatedexError::Validation(format!("Invalid {} bound: {}", name, v))),
        }
    };
    Ok(Some(Span::new(
        end(&range.min, &bounds.min)?,
        end(&range.max, &bounds.max)?,
    )))
}
