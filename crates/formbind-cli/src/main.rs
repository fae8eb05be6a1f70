//! formbind - command-line host for form templates
//!
//! Reads a form definition (or a bare HTML template), then lists its
//! defaults, renders it with stored values, or turns submitted values into
//! the record a host would persist.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use formbind::{FieldValues, FormConfig, FormDefinition};
use indexmap::IndexMap;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "formbind")]
#[command(about = "Bind HTML form templates to named field values")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// `lang` attribute of the document wrapped around the template
    #[arg(long, global = true, default_value = "en")]
    lang: String,

    /// Load templates with markup errors instead of rejecting them
    #[arg(long, global = true)]
    lenient: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the default value of every field as JSON
    Fields {
        /// Form definition (.json) or HTML template
        source: PathBuf,
    },

    /// Render the template with values applied
    Render {
        /// Form definition (.json) or HTML template
        source: PathBuf,

        /// JSON object of field values
        #[arg(long)]
        values: Option<PathBuf>,
    },

    /// Apply submitted values and print the record to persist
    Collect {
        /// Form definition (.json) or HTML template
        source: PathBuf,

        /// JSON object of submitted values
        #[arg(short, long)]
        input: PathBuf,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "formbind=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let cli = Cli::parse();
    let config = FormConfig {
        lang: cli.lang,
        strict: !cli.lenient,
    };

    match cli.command {
        Commands::Fields { source } => {
            let definition = read_source(&source)?;
            let form = definition
                .build(config)
                .with_context(|| format!("Failed to load {}", source.display()))?;
            println!("{}", serde_json::to_string_pretty(&form.values())?);
        }
        Commands::Render { source, values } => {
            let definition = read_source(&source)?;
            let values = match values {
                Some(path) => read_values(&path)?,
                None => FieldValues::new(),
            };
            let html = definition
                .render(config, &values)
                .with_context(|| format!("Failed to render {}", source.display()))?;
            print!("{html}");
        }
        Commands::Collect { source, input } => {
            let definition = read_source(&source)?;
            let submitted = read_values(&input)?;
            let values = definition
                .collect(config, &submitted)
                .with_context(|| format!("Failed to collect values for {}", source.display()))?;
            let record = IndexMap::from([(definition.storage_key(), values)]);
            println!("{}", serde_json::to_string_pretty(&record)?);
        }
    }

    Ok(())
}

fn read_source(path: &Path) -> Result<FormDefinition> {
    let contents =
        fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    parse_source(path, contents)
}

/// `.json` files hold a full definition; anything else is a bare template
fn parse_source(path: &Path, contents: String) -> Result<FormDefinition> {
    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    if !is_json {
        return Ok(FormDefinition::from_template(contents));
    }
    let definition = FormDefinition::from_json(&contents)
        .with_context(|| format!("Invalid form definition in {}", path.display()))?;
    tracing::debug!(title = %definition.title, slug = %definition.slug, "loaded definition");
    Ok(definition)
}

fn read_values(path: &Path) -> Result<FieldValues> {
    let contents =
        fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&contents)
        .with_context(|| format!("Invalid values in {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use formbind::{FieldValue, DEFAULT_SLUG};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_cli_parses() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_collect_args() {
        let cli = Cli::try_parse_from([
            "formbind", "collect", "form.json", "--input", "post.json", "--lenient",
        ])
        .unwrap();
        assert!(cli.lenient);
        assert_eq!(cli.lang, "en");
        assert!(matches!(cli.command, Commands::Collect { .. }));
    }

    #[test]
    fn test_html_source_is_bare_template() {
        let def = parse_source(Path::new("form.html"), "<input name=\"a\">".into()).unwrap();
        assert_eq!(def.template, "<input name=\"a\">");
        assert_eq!(def.storage_key(), DEFAULT_SLUG);
    }

    #[test]
    fn test_json_source_is_definition() {
        let json = r#"{"template": "<input name=\"a\">", "title": "T", "slug": "extra"}"#;
        let def = parse_source(Path::new("FORM.JSON"), json.into()).unwrap();
        assert_eq!(def.slug, "extra");

        assert!(parse_source(Path::new("broken.json"), "{".into()).is_err());
    }

    #[test]
    fn test_collect_record_shape() {
        let def = parse_source(Path::new("form.html"), "<input name=\"a\" value=\"1\">".into()).unwrap();
        let values = def.collect(FormConfig::default(), &FieldValues::new()).unwrap();
        let record = IndexMap::from([(def.storage_key(), values)]);
        assert_eq!(serde_json::to_string(&record).unwrap(), r#"{"values":{"a":"1"}}"#);
        assert_eq!(record["values"]["a"], FieldValue::from("1"));
    }
}
