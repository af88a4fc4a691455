use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::process;

use log::{error, info, warn};

use theme_lens::config::Settings;
use theme_lens::convert::{describe_value, ValueKind};
use theme_lens::error::IoContext;
use theme_lens::export::{default_mapping, ExportPlan, SavedMappings, VariableMapping};
use theme_lens::logging;
use theme_lens::search::SearchRow;
use theme_lens::theme::import_text;
use theme_lens::{ResolutionEngine, ThemeCollection, ThemeError, ThemeResult};

const SAMPLE_THEMES: &str = "-sample";
const DEFAULT_MAPPING: &str = "-default";

fn print_usage(program: &str) {
    eprintln!("Usage: {} <command> [arguments]", program);
    eprintln!("  search <themes.json> <term> [--partial]   Find a variable in every theme");
    eprintln!("  resolve <themes.json> <theme> <value>     Show the resolution chain of a value");
    eprintln!("  convert <value>                           Show color or size equivalents");
    eprintln!("  import <file>                             Turn theme JSON or CSS text into theme JSON");
    eprintln!("  export <themes.json> <mapping> [--themes a,b] [--root name] [--save]");
    eprintln!("  mappings list | show <name> | save <name> <mapping.json> | remove <name>");
    eprintln!("Use {} as themes to try the built-in sample themes.", SAMPLE_THEMES);
    eprintln!(
        "A mapping is a JSON file, {} for the built-in one, or @name for a saved one.",
        DEFAULT_MAPPING
    );
}

fn main() {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        // Use eprintln for usage info since logger isn't initialized yet
        print_usage(&args[0]);
        process::exit(1);
    }

    let settings = match Settings::load_default() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Failed to load settings: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = logging::init_logger(settings.level_filter()) {
        eprintln!("Failed to initialize logger: {}", e);
        process::exit(1);
    }

    info!("Theme Lens starting");
    info!("Command line arguments: {:?}", args);

    if let Err(e) = run(&args, &settings) {
        error!("Command failed: {}", e);
        eprintln!("Error: {}", e);
        if matches!(e, ThemeError::MappingRequired) {
            print_usage(&args[0]);
        }
        process::exit(1);
    }

    info!("Theme Lens done");
}

fn run(args: &[String], settings: &Settings) -> ThemeResult<()> {
    let command = args[1].as_str();
    let rest = &args[2..];
    match command {
        "search" => {
            let [themes_path, term, ..] = rest else {
                return usage_error(args);
            };
            let partial = has_flag(rest, "--partial");
            let themes = load_themes(themes_path)?;
            let mut engine = ResolutionEngine::new();
            let results = engine.search(&themes, term, partial);
            println!("{} {}", if partial { "Partial search" } else { "Search" }, results.term);
            for row in &results.rows {
                print_row(&mut engine, row);
            }
            Ok(())
        }
        "resolve" => {
            let [themes_path, theme, value, ..] = rest else {
                return usage_error(args);
            };
            let themes = load_themes(themes_path)?;
            let mut engine = ResolutionEngine::new();
            let chain = engine.resolve(&themes, theme, value);
            for (index, step) in chain.steps().iter().enumerate() {
                println!("{:>3}. {}", index + 1, step);
            }
            print_conversions(&engine.describe_terminal(&chain));
            Ok(())
        }
        "convert" => {
            let Some(value) = rest.first() else {
                return usage_error(args);
            };
            match describe_value(value) {
                ValueKind::Plain => println!("{} is neither a color nor a size", value),
                kind => print_conversions(&kind),
            }
            Ok(())
        }
        "import" => {
            let Some(path) = rest.first() else {
                return usage_error(args);
            };
            let text = fs::read_to_string(path).with_io_context("Failed to read import file")?;
            let mut draft = import_text(&text)?;
            if draft.name.trim().is_empty() {
                draft.name = Path::new(path)
                    .file_stem()
                    .map(|stem| stem.to_string_lossy().to_string())
                    .unwrap_or_else(|| "Imported".to_string());
            }
            for key in draft.find_duplicates() {
                warn!("Variable {} declared more than once, keeping all values", key);
            }
            let theme = draft.build(&[])?;
            println!("{}", serde_json::to_string_pretty(&theme)?);
            Ok(())
        }
        "export" => {
            let [themes_path, mapping_arg, ..] = rest else {
                return usage_error(args);
            };
            let themes = load_themes(themes_path)?;
            let mapping = load_mapping(mapping_arg, settings)?;

            let selected: Vec<String> = match flag_value(rest, "--themes") {
                Some(list) => list.split(',').map(|s| s.trim().to_string()).collect(),
                None => themes.names().iter().map(|s| s.to_string()).collect(),
            };
            let selected: Vec<&str> = selected.iter().map(String::as_str).collect();
            let root = flag_value(rest, "--root")
                .or_else(|| selected.first().copied())
                .unwrap_or_default();

            let plan = ExportPlan::new(&mapping, &themes, &selected, root)?;
            let mut engine = ResolutionEngine::new();
            let output = engine.export(&themes, &plan);

            if has_flag(rest, "--save") {
                let path = PathBuf::from(format!("{}.css", settings.export_file_name));
                fs::write(&path, &output).with_io_context("Failed to write export file")?;
                info!("Export written to {:?}", path);
                println!("Wrote {}", path.display());
            } else {
                print!("{}", output);
            }
            Ok(())
        }
        "mappings" => run_mappings(args, rest, settings),
        _ => usage_error(args),
    }
}

fn run_mappings(args: &[String], rest: &[String], settings: &Settings) -> ThemeResult<()> {
    let Some(path) = settings.mappings_path() else {
        return Err(ThemeError::Io {
            message: "Could not determine where saved mappings live".to_string(),
            source: std::io::Error::from(std::io::ErrorKind::NotFound),
        });
    };
    let mut saved = SavedMappings::load(&path)?;

    match rest {
        [action] if action == "list" => {
            for entry in saved.mappings() {
                println!("{} ({} variables)", entry.name, entry.mapping.len());
            }
            Ok(())
        }
        [action, name] if action == "show" => {
            let mapping = saved.require(name)?;
            println!("{}", mapping.to_json_pretty()?);
            Ok(())
        }
        [action, name, file] if action == "save" => {
            let mapping = load_mapping(file, settings)?;
            saved.upsert(name, mapping)?;
            saved.save(&path)?;
            println!("Saved mapping {}", name.trim());
            Ok(())
        }
        [action, name] if action == "remove" => {
            if saved.remove(name).is_some() {
                saved.save(&path)?;
                println!("Removed mapping {}", name);
            } else {
                println!("No mapping named {}", name);
            }
            Ok(())
        }
        _ => usage_error(args),
    }
}

fn usage_error(args: &[String]) -> ThemeResult<()> {
    print_usage(&args[0]);
    process::exit(1);
}

fn has_flag(args: &[String], flag: &str) -> bool {
    args.iter().any(|arg| arg == flag)
}

fn flag_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.iter()
        .position(|arg| arg == flag)
        .and_then(|index| args.get(index + 1))
        .map(String::as_str)
}

fn load_themes(path: &str) -> ThemeResult<ThemeCollection> {
    if path == SAMPLE_THEMES {
        return Ok(ThemeCollection::sample());
    }
    let themes = ThemeCollection::load(Path::new(path))?;
    info!("Loaded {} themes from {}", themes.len(), path);
    Ok(themes)
}

fn load_mapping(arg: &str, settings: &Settings) -> ThemeResult<VariableMapping> {
    if arg == DEFAULT_MAPPING {
        return Ok(default_mapping());
    }
    if let Some(name) = arg.strip_prefix('@') {
        let path = settings.mappings_path().ok_or_else(|| ThemeError::MappingNotFound {
            name: name.to_string(),
        })?;
        let saved = SavedMappings::load(&path)?;
        return saved.require(name).cloned();
    }
    let text = fs::read_to_string(arg).with_io_context("Failed to read mapping file")?;
    VariableMapping::parse(&text)
}

fn print_row(engine: &mut ResolutionEngine, row: &SearchRow) {
    let marker = if row.is_duplicate { "*" } else { " " };
    match &row.chain {
        Some(chain) => {
            println!("{} {:<24} {}", marker, row.label, chain);
            if let ValueKind::Color(colors) = engine.describe_terminal(chain) {
                let list: Vec<&str> = colors.iter().map(|c| c.value.as_str()).collect();
                println!("  {:<24} {}", "", list.join("  "));
            }
        }
        None => println!("{} {:<24} {}", marker, row.label, row.value),
    }
}

fn print_conversions(kind: &ValueKind) {
    match kind {
        ValueKind::Color(colors) => {
            for color in colors {
                println!("  {:<5} {}", color.format, color.value);
            }
        }
        ValueKind::Size(sizes) => {
            for size in sizes {
                println!("  {:<5} {}", size.unit, size.value);
            }
        }
        ValueKind::Plain => {}
    }
}
