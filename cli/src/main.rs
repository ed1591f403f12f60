//! The `optline` binary: parse an argument vector against a JSON schema
//! file and print the typed result.
//!
//! The tool's own arguments are parsed with the engine it ships — there is
//! no separate argument-parsing dependency. Tokens destined for the target
//! schema go after `--`:
//!
//! ```text
//! optline --schema tool.json -- --verbose -o out.txt input.txt
//! ```

mod help;
mod report;

use std::process::ExitCode;

use serde::Deserialize;
use serde_json::json;

use optline_core::{OptionSpec, ScalarKind, Schema, SchemaError};
use optline_engine::{Matches, parse};

/// On-disk schema definition: the declarative option set plus binding
/// order, deserialized straight into core types.
#[derive(Debug, Deserialize)]
struct SchemaFile {
    name: String,
    #[serde(default)]
    about: Option<String>,
    #[serde(default)]
    options: Vec<OptionSpec>,
    #[serde(default)]
    positional: Vec<String>,
    #[serde(default)]
    allow_unrecognized: bool,
}

#[derive(Debug)]
struct Failure {
    code: u8,
    message: String,
}

impl Failure {
    fn new(code: u8, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

fn main() -> ExitCode {
    let argv: Vec<String> = std::env::args().skip(1).collect();
    match run(&argv) {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(failure) => {
            eprintln!("{}", failure.message);
            ExitCode::from(failure.code)
        }
    }
}

fn run(argv: &[String]) -> Result<String, Failure> {
    let tool = tool_schema()
        .map_err(|e| Failure::new(report::EXIT_CONFIG, report::schema_failure("optline", &e)))?;
    let matches = parse(&tool, argv)
        .map_err(|e| Failure::new(report::parse_exit_code(&e), report::parse_failure("optline", &e)))?;

    if matches.count("help") > 0 {
        return Ok(help::render(&tool));
    }

    let path: String = matches.get("schema").map_err(|_| {
        Failure::new(
            report::EXIT_USAGE,
            report::parse_failure(
                "optline",
                &optline_engine::ParseError::MissingRequired("schema".to_string()),
            ),
        )
    })?;
    let text = std::fs::read_to_string(&path)
        .map_err(|e| Failure::new(report::EXIT_NOINPUT, format!("optline: {path}: {e}")))?;
    let file: SchemaFile = serde_json::from_str(&text)
        .map_err(|e| Failure::new(report::EXIT_CONFIG, format!("optline: {path}: {e}")))?;
    let schema = build_schema(&file)
        .map_err(|e| Failure::new(report::EXIT_CONFIG, report::schema_failure(&file.name, &e)))?;

    let target_argv: Vec<String> = matches.get("args").unwrap_or_default();
    let result = parse(&schema, &target_argv).map_err(|e| {
        Failure::new(
            report::parse_exit_code(&e),
            report::parse_failure(schema.name(), &e),
        )
    })?;

    render_result(&schema, &result, matches.count("pretty") > 0)
}

/// The tool's own option set.
fn tool_schema() -> Result<Schema, SchemaError> {
    let mut schema = Schema::new("optline")
        .with_about("Parse an argument vector against a JSON option schema");
    schema.define(
        OptionSpec::flag("help")
            .with_alias('h')
            .with_description("Show this help"),
    )?;
    // Not marked required: `--help` alone must still parse. Absence is
    // reported in run() after the help check.
    schema.define(
        OptionSpec::scalar("schema", ScalarKind::Str)
            .with_alias('s')
            .with_description("Path to the schema JSON file"),
    )?;
    schema.define(OptionSpec::flag("pretty").with_description("Pretty-print the JSON result"))?;
    schema.define(
        OptionSpec::list("args", ScalarKind::Str)
            .with_description("Tokens to parse, given after --"),
    )?;
    schema.set_positional_order(&["args"])?;
    Ok(schema)
}

fn build_schema(file: &SchemaFile) -> Result<Schema, SchemaError> {
    let mut schema = Schema::new(file.name.clone());
    if let Some(about) = &file.about {
        schema = schema.with_about(about);
    }
    if file.allow_unrecognized {
        schema = schema.allow_unrecognized();
    }
    for spec in &file.options {
        schema.define(spec.clone())?;
    }
    schema.set_positional_order(&file.positional)?;
    Ok(schema)
}

/// JSON summary of one parse: occurrence counts, coerced values (last value
/// for scalars, full sequence for lists), and leftover tokens.
fn render_result(schema: &Schema, matches: &Matches<'_>, pretty: bool) -> Result<String, Failure> {
    let mut counts = serde_json::Map::new();
    let mut values = serde_json::Map::new();
    for spec in schema.iter() {
        let count = matches.count(&spec.name);
        if count > 0 {
            counts.insert(spec.name.clone(), json!(count));
        }
        let matched = matches.values(&spec.name);
        if matched.is_empty() {
            continue;
        }
        let entry = if spec.kind.is_list() {
            serde_json::to_value(matched)
        } else {
            serde_json::to_value(&matched[matched.len() - 1])
        };
        let entry = entry
            .map_err(|e| Failure::new(report::EXIT_CONFIG, format!("optline: {e}")))?;
        values.insert(spec.name.clone(), entry);
    }

    let doc = json!({
        "command": schema.name(),
        "counts": counts,
        "values": values,
        "leftovers": matches.leftovers(),
    });
    let rendered = if pretty {
        serde_json::to_string_pretty(&doc)
    } else {
        serde_json::to_string(&doc)
    };
    rendered.map_err(|e| Failure::new(report::EXIT_CONFIG, format!("optline: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(tokens: &[&str]) -> Vec<String> {
        tokens.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn test_tool_schema_builds() {
        let schema = tool_schema().unwrap();
        assert!(schema.resolve("schema").is_some());
        assert!(schema.resolve("h").is_some());
        assert_eq!(schema.positional_order(), &["args".to_string()]);
    }

    #[test]
    fn test_tool_parses_its_own_argv() {
        let schema = tool_schema().unwrap();
        let args = argv(&["--schema", "tool.json", "--", "--verbose", "in.txt"]);
        let matches = parse(&schema, &args).unwrap();
        assert_eq!(matches.get::<String>("schema").unwrap(), "tool.json");
        assert_eq!(
            matches.get::<Vec<String>>("args").unwrap(),
            vec!["--verbose".to_string(), "in.txt".to_string()]
        );
    }

    #[test]
    fn test_build_schema_from_json() {
        let file: SchemaFile = serde_json::from_str(
            r#"{
                "name": "copytool",
                "about": "copy things",
                "options": [
                    {"name": "verbose", "alias": "v"},
                    {"name": "output", "alias": "o", "kind": {"Scalar": "Str"}},
                    {"name": "files", "kind": {"List": "Str"}}
                ],
                "positional": ["files"]
            }"#,
        )
        .unwrap();

        let schema = build_schema(&file).unwrap();
        assert_eq!(schema.name(), "copytool");
        assert_eq!(schema.len(), 3);
        assert!(schema.resolve("o").is_some());

        let matches = parse(&schema, &argv(&["-v", "-o", "out", "a", "b"])).unwrap();
        assert_eq!(matches.count("verbose"), 1);
        assert_eq!(matches.get::<String>("output").unwrap(), "out");
        assert_eq!(
            matches.get::<Vec<String>>("files").unwrap(),
            vec!["a".to_string(), "b".to_string()]
        );
    }

    #[test]
    fn test_render_result_shape() {
        let file: SchemaFile = serde_json::from_str(
            r#"{
                "name": "t",
                "options": [
                    {"name": "jobs", "kind": {"Scalar": "Int"}},
                    {"name": "include", "kind": {"List": "Str"}}
                ]
            }"#,
        )
        .unwrap();
        let schema = build_schema(&file).unwrap();
        let matches = parse(
            &schema,
            &argv(&["--jobs", "4", "--include", "a", "--include", "b", "rest"]),
        )
        .unwrap();

        let rendered = render_result(&schema, &matches, false).unwrap();
        let doc: serde_json::Value = serde_json::from_str(&rendered).unwrap();
        assert_eq!(doc["counts"]["jobs"], 1);
        assert_eq!(doc["counts"]["include"], 2);
        assert_eq!(doc["values"]["jobs"], 4);
        assert_eq!(doc["values"]["include"], json!(["a", "b"]));
        assert_eq!(doc["leftovers"], json!(["rest"]));
    }

    #[test]
    fn test_run_reports_missing_schema_file() {
        let failure = run(&argv(&["--schema", "/nonexistent/schema.json"])).unwrap_err();
        assert_eq!(failure.code, report::EXIT_NOINPUT);
    }

    #[test]
    fn test_run_help_short_circuits() {
        let output = run(&argv(&["--help"])).unwrap();
        assert!(output.contains("Usage: optline"));
        assert!(output.contains("--schema"));
    }
}
