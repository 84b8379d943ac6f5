mod logging;
mod workspace;

use std::path::PathBuf;

use chrono::Utc;
use clap::{Args, Parser, Subcommand};
use mocky_core::{
    BusinessRule, EntityType, ExportTarget, GenerationConfig, RelationMode, SqlDialect, has_rules,
    relationship_for, validate_dataset,
};
use mocky_generate::{ExportOptions, GenerationEngine, GenerationError, export};
use thiserror::Error;
use tracing::{info, warn};

use workspace::{
    CliSettings, SortKey, SortOrder, Template, TemplateDraft, TemplateStore, TemplateUpdate,
    WorkspaceError, WorkspacePaths, load_or_create_settings, sort_templates, write_bytes_atomic,
    write_json_atomic,
};

#[derive(Debug, Error)]
pub enum CliError {
    #[error("workspace error: {0}")]
    Workspace(#[from] WorkspaceError),
    #[error("generation error: {0}")]
    Generation(#[from] GenerationError),
    #[error("core error: {0}")]
    Core(#[from] mocky_core::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("logging error: {0}")]
    Logging(String),
    #[error("validation failed: {0}")]
    ValidationFailed(String),
}

#[derive(Parser, Debug)]
#[command(name = "mocky", version, about = "Mocky mock data generator")]
struct Cli {
    /// Workspace directory holding settings, templates and logs.
    #[arg(long, global = true, default_value = ".mocky")]
    workspace: PathBuf,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate a dataset and print or save it.
    Generate(GenerateArgs),
    /// List export formats.
    Formats,
    /// List dataset types with their id prefixes and dependencies.
    Types,
    /// Manage saved generation templates.
    #[command(subcommand)]
    Templates(TemplatesCommand),
    /// Inspect CLI settings.
    #[command(subcommand)]
    Settings(SettingsCommand),
}

#[derive(Args, Debug, Clone)]
struct ConfigArgs {
    /// Dataset type.
    #[arg(long = "type", value_name = "TYPE", default_value = "users")]
    entity: EntityType,
    /// Number of primary records (1-500); defaults to the workspace setting.
    #[arg(long)]
    count: Option<u32>,
    /// Generate related datasets and wire foreign keys.
    #[arg(long, default_value_t = false)]
    relational: bool,
    /// Relational output shape: single, nested or multi.
    #[arg(long, value_name = "MODE", default_value = "single")]
    mode: RelationMode,
    /// JSON file used by the `custom` type.
    #[arg(long, value_name = "FILE", conflicts_with = "template_json")]
    template_file: Option<PathBuf>,
    /// Inline JSON used by the `custom` type.
    #[arg(long, value_name = "JSON")]
    template_json: Option<String>,
}

impl ConfigArgs {
    fn into_config(self, settings: &CliSettings) -> Result<GenerationConfig, CliError> {
        let mut config =
            GenerationConfig::new(self.entity, self.count.unwrap_or(settings.default_count));
        config.relational = self.relational;
        config.relation_mode = self.mode;

        if let Some(path) = self.template_file {
            config = config.with_custom_template(std::fs::read_to_string(path)?);
        } else if let Some(json) = self.template_json {
            config = config.with_custom_template(json);
        }
        Ok(config)
    }
}

#[derive(Args, Debug, Clone)]
struct OutputArgs {
    /// Export format.
    #[arg(long, default_value = "json")]
    format: ExportTarget,
    /// SQL dialect; defaults to the workspace setting.
    #[arg(long)]
    dialect: Option<SqlDialect>,
    /// SQL table name; defaults to the workspace setting or the type name.
    #[arg(long)]
    table: Option<String>,
    /// Interface name for `typescript-interface`.
    #[arg(long)]
    interface: Option<String>,
    /// Seed for reproducible output.
    #[arg(long)]
    seed: Option<u64>,
    /// Write to this file instead of stdout.
    #[arg(long)]
    out: Option<PathBuf>,
    /// Check the primary dataset against its type's validation rules.
    #[arg(long, default_value_t = false)]
    validate: bool,
}

#[derive(Args, Debug)]
struct GenerateArgs {
    #[command(flatten)]
    config: ConfigArgs,
    #[command(flatten)]
    output: OutputArgs,
}

#[derive(Subcommand, Debug)]
enum TemplatesCommand {
    /// List templates.
    List {
        /// Only templates for this dataset type.
        #[arg(long = "type", value_name = "TYPE")]
        entity: Option<EntityType>,
        #[arg(long, value_enum, default_value_t = SortKey::Name)]
        sort: SortKey,
        #[arg(long, value_enum, default_value_t = SortOrder::Asc)]
        order: SortOrder,
    },
    /// Print one template as JSON.
    Show { id: String },
    /// Save a generation config as a template.
    Save(SaveArgs),
    /// Change a template's name, description or tags.
    Update(UpdateArgs),
    /// Delete a template.
    Delete { id: String },
    /// Generate from a template and record its usage.
    Use(UseArgs),
    /// Write all templates to an export document.
    Export {
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Append templates from an export document.
    Import { file: PathBuf },
    /// Template counts and usage.
    Stats,
    /// Search names, descriptions and tags.
    Search { query: String },
}

#[derive(Args, Debug)]
struct SaveArgs {
    #[arg(long)]
    name: String,
    #[arg(long, default_value = "")]
    description: String,
    /// Comma-separated tags.
    #[arg(long, value_delimiter = ',')]
    tags: Vec<String>,
    #[command(flatten)]
    config: ConfigArgs,
}

#[derive(Args, Debug)]
struct UpdateArgs {
    id: String,
    #[arg(long)]
    name: Option<String>,
    #[arg(long)]
    description: Option<String>,
    /// Comma-separated tags; replaces the current tags.
    #[arg(long, value_delimiter = ',')]
    tags: Option<Vec<String>>,
}

#[derive(Args, Debug)]
struct UseArgs {
    id: String,
    /// Override the template's record count.
    #[arg(long)]
    count: Option<u32>,
    #[command(flatten)]
    output: OutputArgs,
}

#[derive(Subcommand, Debug)]
enum SettingsCommand {
    /// Print the effective settings.
    Show,
}

fn main() -> Result<(), CliError> {
    let cli = Cli::parse();

    let paths = WorkspacePaths::new(cli.workspace);
    paths.ensure_dirs()?;
    let settings = load_or_create_settings(&paths)?;
    logging::init_logging(&paths, &settings)?;

    match cli.command {
        Command::Generate(args) => {
            let config = args.config.into_config(&settings)?;
            produce(config, &args.output, &settings)
        }
        Command::Formats => {
            for target in ExportTarget::ALL {
                println!("{:<22} .{}", target.as_str(), target.extension());
            }
            Ok(())
        }
        Command::Types => {
            for entity in EntityType::ALL {
                let requires: Vec<&str> = relationship_for(entity)
                    .requires
                    .iter()
                    .map(EntityType::as_str)
                    .collect();
                println!(
                    "{:<14} {:<6} {:<20} {}",
                    entity.as_str(),
                    entity.id_prefix(),
                    entity.endpoint(),
                    if requires.is_empty() {
                        "-".to_string()
                    } else {
                        requires.join(",")
                    }
                );
            }
            Ok(())
        }
        Command::Templates(command) => run_templates(command, &paths, &settings),
        Command::Settings(SettingsCommand::Show) => {
            println!("# {}", paths.settings_path().display());
            print!(
                "{}",
                toml::to_string_pretty(&settings).map_err(WorkspaceError::from)?
            );
            Ok(())
        }
    }
}

fn run_templates(
    command: TemplatesCommand,
    paths: &WorkspacePaths,
    settings: &CliSettings,
) -> Result<(), CliError> {
    let now = Utc::now();
    let mut store = TemplateStore::open_seeded(paths.templates_path(), now)?;

    match command {
        TemplatesCommand::List {
            entity,
            sort,
            order,
        } => {
            let mut templates = store.filter_by_type(entity);
            sort_templates(&mut templates, sort, order);
            print_templates(&templates);
        }
        TemplatesCommand::Show { id } => {
            let template = store
                .get(&id)
                .ok_or_else(|| WorkspaceError::TemplateNotFound(id.clone()))?;
            println!("{}", serde_json::to_string_pretty(template)?);
        }
        TemplatesCommand::Save(args) => {
            let mut draft = TemplateDraft::new(args.name, args.config.into_config(settings)?);
            draft.description = args.description;
            draft.tags = args.tags;
            let template = store.save(draft, now)?;
            println!("saved template {}", template.id);
        }
        TemplatesCommand::Update(args) => {
            let update = TemplateUpdate {
                name: args.name,
                description: args.description,
                config: None,
                tags: args.tags,
            };
            let template = store.update(&args.id, update, now)?;
            println!("updated template {}", template.id);
        }
        TemplatesCommand::Delete { id } => {
            store.delete(&id)?;
            println!("deleted template {id}");
        }
        TemplatesCommand::Use(args) => {
            let template = store.record_usage(&args.id, now)?;
            info!(id = %template.id, name = %template.name, "template used");
            let mut config = template.config;
            if let Some(count) = args.count {
                config.count = count;
            }
            produce(config, &args.output, settings)?;
        }
        TemplatesCommand::Export { out } => {
            let document = store.export(now);
            match out {
                Some(path) => {
                    write_json_atomic(&path, &document)?;
                    println!(
                        "exported {} templates to {}",
                        document.templates.len(),
                        path.display()
                    );
                }
                None => println!("{}", serde_json::to_string_pretty(&document)?),
            }
        }
        TemplatesCommand::Import { file } => {
            let content = std::fs::read_to_string(&file)?;
            let imported = store.import(&content, now)?;
            println!("imported {} templates", imported.len());
        }
        TemplatesCommand::Stats => {
            println!("{}", serde_json::to_string_pretty(&store.stats())?);
        }
        TemplatesCommand::Search { query } => {
            print_templates(&store.search(&query));
        }
    }
    Ok(())
}

/// Generate `config`, optionally validate it, and export it.
fn produce(
    mut config: GenerationConfig,
    output: &OutputArgs,
    settings: &CliSettings,
) -> Result<(), CliError> {
    if let Some(seed) = output.seed {
        config = config.with_seed(seed);
    }

    let engine = GenerationEngine::default();
    let result = engine.generate_checked(&config)?;

    if output.validate {
        check_dataset(config.entity, result.output.primary())?;
    }

    let options = ExportOptions {
        table_name: Some(
            output
                .table
                .clone()
                .or_else(|| settings.default_table_name.clone())
                .unwrap_or_else(|| config.entity.as_str().to_string()),
        ),
        dialect: output.dialect.unwrap_or(settings.default_dialect),
        interface_name: Some(
            output
                .interface
                .clone()
                .unwrap_or_else(|| settings.interface_name.clone()),
        ),
        ..ExportOptions::default()
    };
    let text = export(&result.output, output.format, &options)?;

    match &output.out {
        Some(path) => {
            write_bytes_atomic(path, text.as_bytes())?;
            info!(path = %path.display(), format = %output.format, "output written");
        }
        None => println!("{text}"),
    }

    eprintln!(
        "GET {} -> {} records as {}",
        config.entity.endpoint(),
        result.report.total_records(),
        output.format
    );
    Ok(())
}

fn check_dataset(entity: EntityType, records: &[mocky_core::Record]) -> Result<(), CliError> {
    if !has_rules(entity) {
        warn!(entity = %entity, "no validation rules for dataset type");
        return Ok(());
    }

    let summary = validate_dataset(records, entity).summary();
    eprintln!(
        "validation: {}/{} valid ({}%)",
        summary.valid_items, summary.total_items, summary.success_rate
    );
    for rule in BusinessRule::ALL {
        if !rule.check(records) {
            warn!(rule = rule.name(), "business rule not satisfied");
        }
    }

    if summary.is_valid {
        return Ok(());
    }
    let mut message = summary.errors.join("; ");
    if summary.has_more_errors {
        message.push_str("; ...");
    }
    Err(CliError::ValidationFailed(message))
}

fn print_templates(templates: &[&Template]) {
    if templates.is_empty() {
        println!("no templates");
        return;
    }
    for template in templates {
        println!(
            "{:<26} {:<12} {:>5}  {}",
            template.id,
            template.data_type.as_str(),
            template.usage_count,
            template.name
        );
    }
}
