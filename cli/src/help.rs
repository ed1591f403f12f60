//! Help text rendering from a schema.
//!
//! Pure presentation: reads the schema's declaration order and annotations,
//! produces the two-section layout, and contains no parsing logic.

use optline_core::{OptionSpec, Schema};

/// Renders the full help text for a schema.
pub fn render(schema: &Schema) -> String {
    let mut out = String::new();
    match schema.about() {
        Some(about) => out.push_str(&format!("{} - {}\n", schema.name(), about)),
        None => {
            out.push_str(schema.name());
            out.push('\n');
        }
    }

    out.push_str(&format!("\nUsage: {} [OPTIONS]", schema.name()));
    for name in schema.positional_order() {
        out.push_str(&format!(" [{}]", name.to_ascii_uppercase()));
    }
    out.push('\n');

    let (positionals, options): (Vec<&OptionSpec>, Vec<&OptionSpec>) =
        schema.iter().partition(|spec| schema.is_positional(&spec.name));

    push_section(&mut out, "Arguments", &positionals, positional_left);
    push_section(&mut out, "Options", &options, option_left);

    out
}

fn push_section(
    out: &mut String,
    title: &str,
    specs: &[&OptionSpec],
    left: fn(&OptionSpec) -> String,
) {
    if specs.is_empty() {
        return;
    }
    out.push_str(&format!("\n{title}:\n"));
    let rows: Vec<(String, String)> = specs
        .iter()
        .map(|spec| (left(spec), annotations(spec)))
        .collect();
    let width = rows.iter().map(|(l, _)| l.len()).max().unwrap_or(0);
    for (left, help) in rows {
        if help.is_empty() {
            out.push_str(&format!("  {left}\n"));
        } else {
            out.push_str(&format!("  {left:width$}  {help}\n"));
        }
    }
}

fn positional_left(spec: &OptionSpec) -> String {
    let name = spec.name.to_ascii_uppercase();
    if spec.required {
        format!("<{name}>")
    } else {
        format!("[{name}]")
    }
}

fn option_left(spec: &OptionSpec) -> String {
    let mut left = match spec.alias {
        Some(alias) => format!("-{alias}, --{}", spec.name),
        None => format!("    --{}", spec.name),
    };
    if spec.kind.takes_value() {
        left.push_str(&format!(" <{}>", spec.name.to_ascii_uppercase()));
    }
    left
}

fn annotations(spec: &OptionSpec) -> String {
    let mut out = spec.description.clone().unwrap_or_default();
    if spec.required {
        if out.is_empty() {
            out.push_str("required");
        } else {
            out.push_str(" (required)");
        }
    }
    if let Some(default) = &spec.default {
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(&format!("[default: {default}]"));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use optline_core::ScalarKind;

    fn sample_schema() -> Schema {
        let mut schema = Schema::new("packer").with_about("Bundle files into an archive");
        schema
            .define(
                OptionSpec::flag("verbose")
                    .with_alias('v')
                    .with_description("Enable verbose output"),
            )
            .unwrap();
        schema
            .define(
                OptionSpec::scalar("level", ScalarKind::Int)
                    .with_alias('l')
                    .with_description("Compression level")
                    .with_default(6i64),
            )
            .unwrap();
        schema
            .define(
                OptionSpec::list("files", ScalarKind::Str)
                    .with_description("Files to bundle")
                    .require(),
            )
            .unwrap();
        schema.set_positional_order(&["files"]).unwrap();
        schema
    }

    #[test]
    fn test_render_sections_and_annotations() {
        let text = render(&sample_schema());
        assert!(text.starts_with("packer - Bundle files into an archive"));
        assert!(text.contains("Usage: packer [OPTIONS] [FILES]"));
        assert!(text.contains("Arguments:"));
        assert!(text.contains("<FILES>"));
        assert!(text.contains("Options:"));
        assert!(text.contains("-v, --verbose"));
        assert!(text.contains("-l, --level <LEVEL>"));
        assert!(text.contains("[default: 6]"));
        assert!(text.contains("(required)"));
    }

    #[test]
    fn test_render_without_about_or_positionals() {
        let mut schema = Schema::new("bare");
        schema.define(OptionSpec::flag("quiet")).unwrap();

        let text = render(&schema);
        assert!(text.starts_with("bare\n"));
        assert!(text.contains("Usage: bare [OPTIONS]\n"));
        assert!(!text.contains("Arguments:"));
        assert!(text.contains("    --quiet"));
    }
}
