use std::collections::HashMap;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use colored::Colorize;
use log::{debug, info};
use similar::{ChangeTag, TextDiff};

use fmg_core::differ::create_plan;
use fmg_core::effect::Effect;
use fmg_core::interpreter::{EffectOutcome, Interpreter};
use fmg_core::plan::Plan;
use fmg_core::provider::Provider;
use fmg_core::resource::{Resource, ResourceId, State, Value};
use fmg_core::schema::{AttributeType, ResourceSchema};
use fmg_provider::{FmgProvider, ProviderConfig, schemas};
use fmg_state::{LockInfo, StateBackend, StateFile, create_backend};

mod manifest;

use manifest::Manifest;

const PROVIDER_NAME: &str = "fortimanager";

#[derive(Parser)]
#[command(name = "fmg")]
#[command(about = "Declarative FortiManager configuration management", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate the manifest
    Validate {
        /// Path to the manifest
        #[arg(default_value = "fmg.toml")]
        file: PathBuf,
    },
    /// Show execution plan without applying changes
    Plan {
        /// Path to the manifest
        #[arg(default_value = "fmg.toml")]
        file: PathBuf,

        /// Show the API payload diff of every update
        #[arg(long)]
        diff: bool,
    },
    /// Apply changes to reach the desired state
    Apply {
        /// Path to the manifest
        #[arg(default_value = "fmg.toml")]
        file: PathBuf,

        /// Skip confirmation prompt (auto-approve)
        #[arg(long)]
        auto_approve: bool,
    },
    /// Destroy all resources recorded in the state
    Destroy {
        /// Path to the manifest
        #[arg(default_value = "fmg.toml")]
        file: PathBuf,

        /// Skip confirmation prompt (auto-approve)
        #[arg(long)]
        auto_approve: bool,
    },
    /// Bring an existing object under management
    Import {
        /// Resource type (e.g., firewall_dnstranslation)
        resource_type: String,
        /// Resource name to record in the state
        name: String,
        /// Remote identifier (the object key, or the singleton name)
        identifier: String,

        /// Path to the manifest
        #[arg(long, default_value = "fmg.toml")]
        file: PathBuf,
    },
    /// Inspect the recorded state
    State {
        #[command(subcommand)]
        command: StateCommands,

        /// Path to the manifest
        #[arg(long, default_value = "fmg.toml", global = true)]
        file: PathBuf,
    },
    /// Show the attributes of a resource type
    Schema {
        /// Resource type; lists all types when omitted
        resource_type: Option<String>,
    },
}

#[derive(Subcommand)]
enum StateCommands {
    /// List recorded resources
    List,
    /// Show one recorded resource
    Show {
        /// Resource address (type.name)
        address: String,
    },
    /// Remove a state lock left behind by an interrupted run
    Unlock {
        /// Lock ID printed in the lock error
        lock_id: String,
    },
}

#[tokio::main]
async fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Validate { file } => run_validate(&file),
        Commands::Plan { file, diff } => run_plan(&file, diff).await,
        Commands::Apply { file, auto_approve } => run_apply(&file, auto_approve).await,
        Commands::Destroy { file, auto_approve } => run_destroy(&file, auto_approve).await,
        Commands::Import {
            resource_type,
            name,
            identifier,
            file,
        } => run_import(&file, &resource_type, &name, &identifier).await,
        Commands::State { command, file } => run_state_command(&file, command).await,
        Commands::Schema { resource_type } => run_schema(resource_type.as_deref()),
    };

    if let Err(e) = result {
        eprintln!("{} {}", "Error:".red().bold(), e);
        std::process::exit(1);
    }
}

fn get_schemas() -> HashMap<String, ResourceSchema> {
    let mut all_schemas = HashMap::new();
    for schema in schemas::all_schemas() {
        all_schemas.insert(schema.resource_type.clone(), schema);
    }
    all_schemas
}

fn validate_resources(resources: &[Resource]) -> Result<(), String> {
    let schemas = get_schemas();
    let mut all_errors = Vec::new();

    for resource in resources {
        let Some(schema) = schemas.get(&resource.id.resource_type) else {
            all_errors.push(format!(
                "{}: unknown resource type '{}'",
                resource.id, resource.id.resource_type
            ));
            continue;
        };
        if let Err(errors) = schema.validate(&resource.attributes) {
            let mut messages: Vec<String> = errors
                .iter()
                .map(|error| format!("{}: {}", resource.id, error))
                .collect();
            messages.sort();
            all_errors.extend(messages);
        }
    }

    if all_errors.is_empty() {
        Ok(())
    } else {
        Err(all_errors.join("\n"))
    }
}

/// Load the manifest and check its resources
fn load_manifest(file: &Path) -> Result<(Manifest, Vec<Resource>), String> {
    let manifest = Manifest::load(file)?;
    let resources = manifest.resources()?;
    validate_resources(&resources)?;
    Ok((manifest, resources))
}

async fn connect(manifest: &Manifest) -> Result<FmgProvider, String> {
    let config = ProviderConfig::from_settings(&manifest.provider).map_err(|e| e.to_string())?;
    info!("connecting to {}", config.hostname);
    let provider = FmgProvider::new(config).map_err(|e| e.to_string())?;
    provider.connect().await.map_err(|e| e.to_string())?;
    Ok(provider)
}

async fn open_backend(manifest: &Manifest) -> Result<Box<dyn StateBackend>, String> {
    let config = manifest.backend_config()?;
    create_backend(&config).await.map_err(|e| e.to_string())
}

async fn read_state_file(backend: &dyn StateBackend) -> Result<StateFile, String> {
    Ok(backend
        .read_state()
        .await
        .map_err(|e| e.to_string())?
        .unwrap_or_default())
}

async fn write_state_file(
    backend: &dyn StateBackend,
    state_file: &mut StateFile,
) -> Result<(), String> {
    state_file.increment_serial();
    backend
        .write_state(state_file)
        .await
        .map_err(|e| format!("Failed to write state: {}", e))
}

async fn release(backend: &dyn StateBackend, lock: &LockInfo) {
    if let Err(e) = backend.release_lock(lock).await {
        eprintln!("{} failed to release state lock: {}", "Warning:".yellow(), e);
    }
}

fn run_validate(file: &Path) -> Result<(), String> {
    let manifest = Manifest::load(file)?;

    println!("{}", "Validating...".cyan());

    ProviderConfig::resolve(&manifest.provider, |key| std::env::var(key).ok())
        .map_err(|e| e.to_string())?;
    let resources = manifest.resources()?;
    validate_resources(&resources)?;

    println!(
        "{}",
        format!("✓ {} resources validated successfully.", resources.len())
            .green()
            .bold()
    );

    for resource in &resources {
        println!("  • {}", resource.id);
    }

    Ok(())
}

/// Read the current state of every desired and recorded resource.
///
/// Recorded resources are read at their recorded identifier and scope;
/// new ones are looked up by the identity the manifest gives them.
async fn refresh(
    provider: &FmgProvider,
    desired: &[Resource],
    state_file: &StateFile,
) -> Result<HashMap<ResourceId, State>, String> {
    let recorded = state_file.states();
    let mut current = HashMap::new();

    for resource in desired {
        let state = match recorded.get(&resource.id) {
            Some(previous) => {
                provider
                    .read(
                        &resource.id,
                        previous.identifier.as_deref(),
                        &previous.attributes,
                    )
                    .await
            }
            None => provider.read(&resource.id, None, &resource.attributes).await,
        }
        .map_err(|e| format!("Failed to read state: {}", e))?;
        debug!("{}: exists = {}", resource.id, state.exists);
        current.insert(resource.id.clone(), state);
    }

    for (id, previous) in &recorded {
        if current.contains_key(id) {
            continue;
        }
        let state = provider
            .read(id, previous.identifier.as_deref(), &previous.attributes)
            .await
            .map_err(|e| format!("Failed to read state: {}", e))?;
        current.insert(id.clone(), state);
    }

    Ok(current)
}

async fn run_plan(file: &Path, show_diff: bool) -> Result<(), String> {
    let (manifest, resources) = load_manifest(file)?;
    let backend = open_backend(&manifest).await?;
    let state_file = read_state_file(backend.as_ref()).await?;

    let provider = connect(&manifest).await?;
    let current = refresh(&provider, &resources, &state_file).await;
    provider.close().await.map_err(|e| e.to_string())?;
    let current = current?;

    let schemas = get_schemas();
    let plan = create_plan(&resources, &current, &schemas);
    print_plan(&plan, &schemas);
    if show_diff {
        print_payload_diffs(&plan, &schemas);
    }
    Ok(())
}

async fn run_apply(file: &Path, auto_approve: bool) -> Result<(), String> {
    let (manifest, resources) = load_manifest(file)?;
    let backend = open_backend(&manifest).await?;
    let lock = backend
        .acquire_lock("apply")
        .await
        .map_err(|e| e.to_string())?;

    let result = apply_locked(&manifest, &resources, backend.as_ref(), auto_approve).await;
    release(backend.as_ref(), &lock).await;
    result
}

async fn apply_locked(
    manifest: &Manifest,
    resources: &[Resource],
    backend: &dyn StateBackend,
    auto_approve: bool,
) -> Result<(), String> {
    let mut state_file = read_state_file(backend).await?;
    let provider = connect(manifest).await?;

    let current = match refresh(&provider, resources, &state_file).await {
        Ok(current) => current,
        Err(e) => {
            let _ = provider.close().await;
            return Err(e);
        }
    };
    for state in current.values() {
        state_file.apply_state(state, PROVIDER_NAME);
    }

    let schemas = get_schemas();
    let plan = create_plan(resources, &current, &schemas);

    if plan.is_empty() {
        provider.close().await.map_err(|e| e.to_string())?;
        write_state_file(backend, &mut state_file).await?;
        println!("{}", "No changes needed.".green());
        return Ok(());
    }

    print_plan(&plan, &schemas);
    println!();

    if !auto_approve && !confirm("Do you want to perform these actions?")? {
        provider.close().await.map_err(|e| e.to_string())?;
        println!("{}", "Apply cancelled.".yellow());
        return Ok(());
    }

    println!("{}", "Applying changes...".cyan().bold());
    println!();

    let interpreter = Interpreter::new(provider);
    let result = interpreter.apply(&plan).await;

    for (effect, outcome) in plan.effects().iter().zip(&result.outcomes) {
        match outcome {
            Ok(outcome) => {
                println!("  {} {}", "✓".green(), effect);
                record_outcome(&mut state_file, effect, outcome);
            }
            Err(e) => println!("  {} {} - {}", "✗".red(), effect, e),
        }
    }
    let skipped = result.not_attempted(&plan);

    interpreter
        .provider()
        .close()
        .await
        .map_err(|e| e.to_string())?;
    write_state_file(backend, &mut state_file).await?;

    println!();
    if result.is_success() {
        println!(
            "{}",
            format!("Apply complete! {} changes applied.", result.success_count)
                .green()
                .bold()
        );
        Ok(())
    } else {
        println!(
            "{}",
            format!(
                "Apply failed. {} succeeded, {} failed, {} not attempted.",
                result.success_count, result.failure_count, skipped
            )
            .red()
            .bold()
        );
        Err("apply did not complete".to_string())
    }
}

fn record_outcome(state_file: &mut StateFile, effect: &Effect, outcome: &EffectOutcome) {
    match outcome {
        EffectOutcome::Created { state } | EffectOutcome::Updated { state } => {
            state_file.apply_state(state, PROVIDER_NAME);
        }
        EffectOutcome::Deleted => {
            let id = effect.resource_id();
            state_file.remove_resource(&id.resource_type, &id.name);
        }
        EffectOutcome::Read { .. } => {}
    }
}

async fn run_destroy(file: &Path, auto_approve: bool) -> Result<(), String> {
    let manifest = Manifest::load(file)?;
    let backend = open_backend(&manifest).await?;
    let lock = backend
        .acquire_lock("destroy")
        .await
        .map_err(|e| e.to_string())?;

    let result = destroy_locked(&manifest, backend.as_ref(), auto_approve).await;
    release(backend.as_ref(), &lock).await;
    result
}

async fn destroy_locked(
    manifest: &Manifest,
    backend: &dyn StateBackend,
    auto_approve: bool,
) -> Result<(), String> {
    let mut state_file = read_state_file(backend).await?;

    // Reverse of creation order
    let recorded: Vec<State> = state_file
        .resources
        .iter()
        .rev()
        .map(|r| r.to_state())
        .collect();

    if recorded.is_empty() {
        println!("{}", "No resources to destroy.".green());
        return Ok(());
    }

    println!("{}", "Destroy Plan:".red().bold());
    println!();
    for state in &recorded {
        println!(
            "  {} {}",
            "-".red().bold(),
            state.id.to_string().cyan().bold()
        );
    }
    println!();
    println!("Plan: {} to destroy.", recorded.len().to_string().red());
    println!();

    if !auto_approve && !confirm("Do you really want to destroy all resources?")? {
        println!("{}", "Destroy cancelled.".yellow());
        return Ok(());
    }

    let provider = connect(manifest).await?;

    println!("{}", "Destroying resources...".red().bold());
    println!();

    let mut success_count = 0;
    let mut failure_count = 0;

    for state in recorded {
        let identifier = state.identifier.clone().unwrap_or_default();
        match provider
            .delete(&state.id, &identifier, &state.attributes)
            .await
        {
            Ok(()) => {
                println!("  {} Delete {}", "✓".green(), state.id);
                state_file.remove_resource(&state.id.resource_type, &state.id.name);
                success_count += 1;
            }
            Err(e) => {
                println!("  {} Delete {} - {}", "✗".red(), state.id, e);
                failure_count += 1;
            }
        }
    }

    provider.close().await.map_err(|e| e.to_string())?;
    write_state_file(backend, &mut state_file).await?;

    println!();
    if failure_count == 0 {
        println!(
            "{}",
            format!("Destroy complete! {} resources destroyed.", success_count)
                .green()
                .bold()
        );
        Ok(())
    } else {
        println!(
            "{}",
            format!(
                "Destroy failed. {} succeeded, {} failed.",
                success_count, failure_count
            )
            .red()
            .bold()
        );
        Err("destroy did not complete".to_string())
    }
}

async fn run_import(
    file: &Path,
    resource_type: &str,
    name: &str,
    identifier: &str,
) -> Result<(), String> {
    let manifest = Manifest::load(file)?;
    if schemas::find_config(resource_type).is_none() {
        return Err(format!("unknown resource type '{}'", resource_type));
    }
    let id = ResourceId::new(resource_type, name);

    // Scope comes from the manifest entry, overridden by import options
    let mut attributes = manifest
        .resources()?
        .into_iter()
        .find(|r| r.id == id)
        .map(|r| r.attributes)
        .unwrap_or_default();

    let backend = open_backend(&manifest).await?;
    let lock = backend
        .acquire_lock("import")
        .await
        .map_err(|e| e.to_string())?;

    let result: Result<(), String> = async {
        let mut state_file = read_state_file(backend.as_ref()).await?;
        if state_file.find_resource(resource_type, name).is_some() {
            return Err(format!("{} is already managed", id));
        }

        let provider = connect(&manifest).await?;
        attributes.extend(provider.import_attributes());
        let state = provider.read(&id, Some(identifier), &attributes).await;
        provider.close().await.map_err(|e| e.to_string())?;
        let state = state.map_err(|e| e.to_string())?;

        if !state.exists {
            return Err(format!(
                "Cannot import non-existent remote object {} ({})",
                identifier, id
            ));
        }
        state_file.apply_state(&state, PROVIDER_NAME);
        write_state_file(backend.as_ref(), &mut state_file).await?;
        Ok(())
    }
    .await;

    release(backend.as_ref(), &lock).await;
    result?;

    println!("{}", format!("Import successful: {}", id).green().bold());
    Ok(())
}

async fn run_state_command(file: &Path, command: StateCommands) -> Result<(), String> {
    let manifest = Manifest::load(file)?;
    let backend = open_backend(&manifest).await?;

    match command {
        StateCommands::Unlock { lock_id } => {
            backend
                .force_unlock(&lock_id)
                .await
                .map_err(|e| e.to_string())?;
            println!("{}", format!("Released state lock {}", lock_id).green().bold());
            Ok(())
        }
        StateCommands::List => {
            let state_file = read_state_file(backend.as_ref()).await?;
            for resource in &state_file.resources {
                println!("{}.{}", resource.resource_type, resource.name);
            }
            Ok(())
        }
        StateCommands::Show { address } => {
            let (resource_type, name) = address
                .split_once('.')
                .ok_or_else(|| format!("Invalid address '{}': expected type.name", address))?;
            let state_file = read_state_file(backend.as_ref()).await?;
            let resource = state_file
                .find_resource(resource_type, name)
                .ok_or_else(|| format!("{} is not in the state", address))?;

            let state = resource.to_state();
            let schema = get_schemas().remove(resource_type);
            println!("{}", address.cyan().bold());
            if let Some(identifier) = &state.identifier {
                println!("  {}: {}", "identifier".bold(), identifier);
            }
            let mut keys: Vec<&String> = state.attributes.keys().collect();
            keys.sort();
            for key in keys {
                println!(
                    "  {}: {}",
                    key,
                    display_value(schema.as_ref(), key, &state.attributes[key])
                );
            }
            Ok(())
        }
    }
}

fn run_schema(resource_type: Option<&str>) -> Result<(), String> {
    let Some(resource_type) = resource_type else {
        let mut names: Vec<String> = get_schemas().into_keys().collect();
        names.sort();
        for name in names {
            println!("{}", name);
        }
        return Ok(());
    };

    let config = schemas::find_config(resource_type)
        .ok_or_else(|| format!("unknown resource type '{}'", resource_type))?;

    println!("{} ({})", resource_type.cyan().bold(), config.api_path);
    if let Some(desc) = &config.schema.description {
        println!("  {}", desc);
    }
    println!();

    for name in config.schema.attribute_names() {
        if let Some(attr) = config.schema.get(name) {
            print_attribute(attr, 1);
        }
    }
    Ok(())
}

fn print_attribute(attr: &fmg_core::schema::AttributeSchema, depth: usize) {
    let indent = "  ".repeat(depth);
    let mut flags = Vec::new();
    if attr.required {
        flags.push("required");
    }
    if attr.is_read_only() {
        flags.push("read-only");
    } else if attr.computed {
        flags.push("computed");
    }
    if attr.force_new {
        flags.push("forces replacement");
    }
    if attr.sensitive {
        flags.push("sensitive");
    }

    let flags = if flags.is_empty() {
        String::new()
    } else {
        format!(" [{}]", flags.join(", "))
    };
    println!(
        "{}{}: {}{}",
        indent,
        attr.name.bold(),
        attr.attr_type,
        flags.dimmed()
    );
    if let Some(desc) = &attr.description {
        println!("{}  {}", indent, desc.dimmed());
    }

    if let AttributeType::Block(block) = &attr.attr_type {
        let mut names: Vec<&String> = block.attributes.keys().collect();
        names.sort();
        for name in names {
            print_attribute(&block.attributes[name], depth + 1);
        }
    }
}

/// Ask for a literal "yes"
fn confirm(question: &str) -> Result<bool, String> {
    println!("{}", question.yellow().bold());
    println!("  {}", "Only 'yes' will be accepted to confirm.".yellow());
    print!("\n  Enter a value: ");
    std::io::Write::flush(&mut std::io::stdout()).map_err(|e| e.to_string())?;

    let mut input = String::new();
    std::io::stdin()
        .read_line(&mut input)
        .map_err(|e| e.to_string())?;
    println!();
    Ok(input.trim() == "yes")
}

fn print_plan(plan: &Plan, schemas: &HashMap<String, ResourceSchema>) {
    if plan.is_empty() {
        println!("{}", "No changes. Configuration is up-to-date.".green());
        return;
    }

    println!("{}", "Execution Plan:".cyan().bold());
    println!();

    let attr_prefix = "      ";
    for effect in plan.effects() {
        let schema = schemas.get(&effect.resource_id().resource_type);
        match effect {
            Effect::Create(r) => {
                println!("  {} {}", "+".green().bold(), r.id.to_string().cyan().bold());
                let mut keys: Vec<&String> = r.attributes.keys().collect();
                keys.sort();
                for key in keys {
                    println!(
                        "{}{}: {}",
                        attr_prefix,
                        key,
                        display_value(schema, key, &r.attributes[key]).green()
                    );
                }
            }
            Effect::Update {
                id,
                from,
                to,
                changed_attributes,
            } => {
                println!("  {} {}", "~".yellow().bold(), id.to_string().cyan().bold());
                for key in changed_attributes {
                    let old_str = from
                        .attributes
                        .get(key)
                        .map(|v| display_value(schema, key, v))
                        .unwrap_or_else(|| "(none)".to_string());
                    let new_str = to
                        .attributes
                        .get(key)
                        .map(|v| display_value(schema, key, v))
                        .unwrap_or_else(|| "(none)".to_string());
                    println!(
                        "{}{}: {} → {}",
                        attr_prefix,
                        key,
                        old_str.red(),
                        new_str.green()
                    );
                }
            }
            Effect::Delete { id, identifier, .. } => {
                println!("  {} {}", "-".red().bold(), id.to_string().cyan().bold());
                println!("{}{}: {}", attr_prefix, "identifier".bold(), identifier.red());
            }
            Effect::Read(_) => {}
        }
    }

    println!();
    let summary = plan.summary();
    println!(
        "Plan: {} to add, {} to change, {} to replace, {} to destroy.",
        summary.create.to_string().green(),
        summary.update.to_string().yellow(),
        summary.replace.to_string().magenta(),
        summary.delete.to_string().red()
    );
}

/// Print the JSON each update changes, as a line diff
fn print_payload_diffs(plan: &Plan, schemas: &HashMap<String, ResourceSchema>) {
    for effect in plan.effects() {
        let Effect::Update {
            id,
            from,
            to,
            changed_attributes,
        } = effect
        else {
            continue;
        };
        let schema = schemas.get(&id.resource_type);
        let current = changed_json(schema, changed_attributes, &from.attributes);
        let desired = changed_json(schema, changed_attributes, &to.attributes);
        print_diff(id, &current, &desired);
    }
}

fn changed_json(
    schema: Option<&ResourceSchema>,
    keys: &[String],
    attributes: &HashMap<String, Value>,
) -> String {
    let object: serde_json::Map<String, serde_json::Value> = keys
        .iter()
        .filter_map(|k| {
            let value = attributes.get(k)?;
            let json = if is_sensitive(schema, k) {
                serde_json::Value::String("(sensitive)".to_string())
            } else {
                value.to_json()
            };
            Some((k.clone(), json))
        })
        .collect();
    let mut text = serde_json::to_string_pretty(&object).unwrap_or_default();
    text.push('\n');
    text
}

fn print_diff(id: &ResourceId, original: &str, desired: &str) {
    println!("\n{} {}:", "Diff for".cyan().bold(), id);

    let diff = TextDiff::from_lines(original, desired);
    for change in diff.iter_all_changes() {
        let sign = match change.tag() {
            ChangeTag::Delete => "-".red(),
            ChangeTag::Insert => "+".green(),
            ChangeTag::Equal => " ".normal(),
        };
        print!("{}{}", sign, change);
    }
}

fn is_sensitive(schema: Option<&ResourceSchema>, key: &str) -> bool {
    schema
        .and_then(|s| s.get(key))
        .is_some_and(|attr| attr.sensitive)
}

fn display_value(schema: Option<&ResourceSchema>, key: &str, value: &Value) -> String {
    if is_sensitive(schema, key) {
        return "(sensitive)".to_string();
    }
    format_value(value)
}

fn format_value(value: &Value) -> String {
    match value {
        Value::String(s) => format!("\"{}\"", s),
        Value::Int(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::List(items) => {
            let strs: Vec<_> = items.iter().map(format_value).collect();
            format!("[{}]", strs.join(", "))
        }
        Value::Map(map) => {
            let mut entries: Vec<_> = map.iter().collect();
            entries.sort_by(|a, b| a.0.cmp(b.0));
            let strs: Vec<_> = entries
                .into_iter()
                .map(|(k, v)| format!("{}: {}", k, format_value(v)))
                .collect();
            format!("{{{}}}", strs.join(", "))
        }
    }
}
