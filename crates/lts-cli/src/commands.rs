use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::{info, info_span, trace};

use lts_cli::input::{load_config, load_record, load_registry, read_document};
use lts_cli::logging::redact_value;
use lts_engine::{
    DataRecord, EngineConfig, FieldMapper, MappingRegistry, MergeMode, SuggestionEngine,
    TemplateFamily, ValidationResult, apply_bindings, classify, classify_all, tag, validate,
    validate_variables,
};

use crate::cli::{AnalyzeArgs, Cli, DocumentArgs, FillArgs, TemplatizeArgs, ValidateArgs};
use crate::summary::{
    binding_table, classification_table, family_table, placeholder_table, suggestion_table,
    validation_table,
};

/// Configuration and field tables shared by every command.
pub struct Session {
    pub config: EngineConfig,
    pub registry: MappingRegistry,
}

impl Session {
    pub fn load(cli: &Cli) -> Result<Self> {
        Ok(Self {
            config: load_config(cli.config.as_deref())?,
            registry: load_registry(cli.mappings.as_deref())?,
        })
    }

    fn mapper(&self) -> FieldMapper<'_> {
        FieldMapper::from_config(&self.registry, &self.config)
    }

    fn suggestion_engine(&self) -> SuggestionEngine {
        SuggestionEngine::with_registry(self.config.clone(), &self.registry)
    }
}

pub fn run_analyze(session: &Session, args: &AnalyzeArgs) -> Result<()> {
    let path = &args.document.file;
    let _span = info_span!("analyze", path = %path.display()).entered();
    let text = read_document(path)?;
    let engine = session.suggestion_engine();
    let analysis = engine
        .analyze(&text)
        .with_context(|| format!("analyze {}", path.display()))?;
    info!(
        placeholders = analysis.placeholders.len(),
        suggestions = analysis.suggestions.len(),
        "analysis complete"
    );

    if args.json {
        println!("{}", serde_json::to_string_pretty(&analysis)?);
        return Ok(());
    }
    match analysis.family {
        Some(family) => println!("Family: {} ({})", family.label(), family.key()),
        None => println!("Family: not recognized"),
    }
    println!("Blanks: {}", analysis.placeholders.len());
    if !analysis.placeholders.is_empty() {
        println!("{}", placeholder_table(&analysis.placeholders));
    }
    println!("Suggestions: {}", analysis.suggestions.len());
    if !analysis.suggestions.is_empty() {
        println!("{}", suggestion_table(&analysis, &engine));
    }
    Ok(())
}

pub fn run_classify(args: &DocumentArgs) -> Result<()> {
    let text = read_document(&args.file)?;
    match classify(&text) {
        Some(family) => println!("{}", family.key()),
        None => println!("none"),
    }
    let matches = classify_all(&text);
    if matches.len() > 1 {
        println!("{}", classification_table(&matches));
    }
    Ok(())
}

/// Fills every blank from case data; the result reports what stayed unfilled.
pub fn run_fill(session: &Session, args: &FillArgs) -> Result<ValidationResult> {
    let path = &args.document.file;
    let _span = info_span!("fill", path = %path.display()).entered();
    let text = read_document(path)?;
    let record = load_record(&args.data)?;
    let family = resolve_family(args.family.as_deref(), &text)?;

    let doc = tag(&text);
    let mut placeholders = doc.placeholders.clone();
    let bindings = session
        .mapper()
        .fill_placeholders(&mut placeholders, family, &record);
    for binding in &bindings {
        trace!(
            order = binding.order,
            description = %binding.description,
            value = redact_value(&binding.value),
            missing = binding.missing,
            "bound placeholder"
        );
    }
    let merged = apply_bindings(&doc.annotated_text, &bindings, MergeMode::Fill)?;
    write_output(args.out.as_deref(), &merged.plain_text())?;

    let result = validate(&placeholders);
    info!(
        family = ?family,
        blanks = placeholders.len(),
        missing = result.missing_fields.len(),
        "fill complete"
    );
    if !bindings.is_empty() {
        eprintln!("{}", binding_table(&bindings));
    }
    eprintln!("{}", result.summary());
    if let Some(table) = validation_table(&result) {
        eprintln!("{table}");
    }
    Ok(result)
}

pub fn run_templatize(session: &Session, args: &TemplatizeArgs) -> Result<()> {
    let path = &args.document.file;
    let _span = info_span!("templatize", path = %path.display()).entered();
    let text = read_document(path)?;
    let family = resolve_family(args.family.as_deref(), &text)?;

    let doc = tag(&text);
    let bindings = session
        .mapper()
        .bind(&doc.placeholders, family, &DataRecord::new());
    let merged = apply_bindings(&doc.annotated_text, &bindings, MergeMode::Templatize)?;
    write_output(args.out.as_deref(), &merged.plain_text())?;

    info!(
        family = ?family,
        variables = merged.variable_names.len(),
        "templatize complete"
    );
    eprintln!("Variables: {}", merged.variable_names.join(", "));
    Ok(())
}

pub fn run_validate(args: &ValidateArgs) -> Result<ValidationResult> {
    let text = read_document(&args.document.file)?;
    let record = load_record(&args.data)?;
    let result = validate_variables(&text, &record);
    println!(
        "{} variable(s) found: {}",
        result.found_variables.len(),
        result.summary()
    );
    if let Some(table) = validation_table(&result) {
        println!("{table}");
    }
    Ok(result)
}

pub fn run_families(session: &Session) -> Result<()> {
    println!("{}", family_table(&session.registry));
    Ok(())
}

/// An explicit `--family` key wins over detection from the text.
fn resolve_family(explicit: Option<&str>, text: &str) -> Result<Option<TemplateFamily>> {
    match explicit {
        Some(key) => {
            let family = key
                .parse::<TemplateFamily>()
                .with_context(|| format!("unknown template family `{key}`"))?;
            Ok(Some(family))
        }
        None => {
            let family = classify(text);
            if family.is_none() {
                info!("no template family recognized; blanks get generic labels");
            }
            Ok(family)
        }
    }
}

fn write_output(out: Option<&Path>, text: &str) -> Result<()> {
    match out {
        Some(path) => {
            fs::write(path, text).with_context(|| format!("write {}", path.display()))?;
            info!(path = %path.display(), "wrote output");
        }
        None => {
            print!("{text}");
            if !text.ends_with('\n') {
                println!();
            }
        }
    }
    Ok(())
}
