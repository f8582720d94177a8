use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};

use fieldmode_codec::Codec;
use fieldmode_config::{RuntimeInputSpec, SyntaxConfig};
use fieldmode_session::EditSession;

/// Fieldmode - classify configuration field values and edit runtime inputs
#[derive(Parser)]
#[command(name = "fieldmode")]
#[command(version, about, long_about = None)]
struct Cli {
  /// Path to a syntax config JSON file (default: ~/.fieldmode/syntax.json if present)
  #[arg(long, global = true, conflicts_with = "preset")]
  syntax: Option<PathBuf>,

  /// Use a built-in syntax instead of a config file
  #[arg(long, global = true, value_enum)]
  preset: Option<Preset>,

  #[command(subcommand)]
  command: Option<Commands>,
}

#[derive(Clone, Copy, ValueEnum)]
enum Preset {
  /// `{input}` marker with `${...}` expressions
  Default,
  /// `<+input>` marker with `<+...>` expressions
  AnglePlus,
}

impl Preset {
  fn config(self) -> SyntaxConfig {
    match self {
      Preset::Default => SyntaxConfig::default(),
      Preset::AnglePlus => SyntaxConfig::angle_plus(),
    }
  }
}

#[derive(Subcommand)]
enum Commands {
  /// Print the mode of a raw field value (fixed, expression or runtime)
  Classify { raw: String },

  /// Check a runtime input expression against the grammar
  Validate { raw: String },

  /// Decode a runtime input expression to JSON
  Decode { raw: String },

  /// Encode a runtime input spec (JSON) to an expression
  Encode {
    /// Spec JSON; read from stdin when omitted
    #[arg(long)]
    spec: Option<String>,
  },

  /// Classify a raw field value and print it as JSON
  Field { raw: String },

  /// Open an edit session on an expression, apply changes and submit
  Edit {
    raw: String,

    /// Restrict the input to these values (comma separated)
    #[arg(long, value_delimiter = ',', conflicts_with_all = ["regex", "clear_validation"])]
    allowed_values: Option<Vec<String>>,

    /// Restrict the input to values matching this pattern
    #[arg(long, conflicts_with = "clear_validation")]
    regex: Option<String>,

    /// Remove any validation
    #[arg(long)]
    clear_validation: bool,

    /// Whether the input must be supplied before execution
    #[arg(long)]
    required: Option<bool>,

    /// Default value; an empty string removes it
    #[arg(long)]
    default: Option<String>,

    /// Discard the changes instead of submitting
    #[arg(long)]
    cancel: bool,
  },
}

fn main() -> Result<ExitCode> {
  tracing_subscriber::fmt()
    .with_writer(io::stderr)
    .with_env_filter(
      tracing_subscriber::EnvFilter::from_default_env().add_directive(tracing::Level::WARN.into()),
    )
    .init();

  let cli = Cli::parse();

  let Some(command) = cli.command else {
    println!("fieldmode - use --help to see available commands");
    return Ok(ExitCode::SUCCESS);
  };

  let syntax = load_syntax(cli.syntax.as_deref(), cli.preset)?;
  let codec = Codec::new(&syntax).context("invalid syntax config")?;

  match command {
    Commands::Classify { raw } => {
      println!("{}", codec.classify(&raw));
    }
    Commands::Validate { raw } => {
      if codec.validate(&raw) {
        println!("valid");
      } else {
        println!("invalid");
        return Ok(ExitCode::FAILURE);
      }
    }
    Commands::Decode { raw } => {
      let spec = codec
        .decode(&raw)
        .with_context(|| format!("failed to decode '{}'", raw))?;
      let output = serde_json::json!({
        "spec": spec,
        "is_advanced": codec.is_advanced(&raw),
      });
      println!("{}", serde_json::to_string_pretty(&output)?);
    }
    Commands::Encode { spec } => {
      let content = match spec {
        Some(spec) => spec,
        None => read_stdin()?,
      };
      let spec: RuntimeInputSpec =
        serde_json::from_str(&content).context("failed to parse spec JSON")?;
      println!("{}", codec.encode(&spec));
    }
    Commands::Field { raw } => {
      let value = codec
        .parse_field(&raw)
        .with_context(|| format!("failed to decode '{}'", raw))?;
      println!("{}", serde_json::to_string_pretty(&value)?);
    }
    Commands::Edit {
      raw,
      allowed_values,
      regex,
      clear_validation,
      required,
      default,
      cancel,
    } => {
      let mut session = EditSession::new(&codec);
      session
        .open(raw)
        .context("cannot configure this field")?;

      if let Some(values) = allowed_values {
        session.set_allowed_values(values)?;
      }
      if let Some(pattern) = regex {
        session.set_regex(pattern)?;
      }
      if clear_validation {
        session.clear_validation()?;
      }
      if let Some(required) = required {
        session.set_required(required)?;
      }
      if let Some(default) = default {
        session.set_default(Some(default))?;
      }

      let result = if cancel {
        session.cancel().context("no edit session open")?
      } else {
        session.submit()?
      };
      println!("{}", result);
    }
  }

  Ok(ExitCode::SUCCESS)
}

/// Resolve the syntax config: explicit file, then preset, then the default
/// file in the home directory, then built-in defaults.
fn load_syntax(path: Option<&Path>, preset: Option<Preset>) -> Result<SyntaxConfig> {
  if let Some(path) = path {
    return read_syntax_file(path);
  }
  if let Some(preset) = preset {
    return Ok(preset.config());
  }

  match dirs::home_dir().map(|home| home.join(".fieldmode").join("syntax.json")) {
    Some(path) if path.exists() => read_syntax_file(&path),
    _ => Ok(SyntaxConfig::default()),
  }
}

fn read_syntax_file(path: &Path) -> Result<SyntaxConfig> {
  let content = std::fs::read_to_string(path)
    .with_context(|| format!("failed to read syntax file: {}", path.display()))?;
  serde_json::from_str(&content)
    .with_context(|| format!("failed to parse syntax file: {}", path.display()))
}

fn read_stdin() -> Result<String> {
  use std::io::IsTerminal;

  if io::stdin().is_terminal() {
    anyhow::bail!("no spec given: pass --spec or pipe JSON on stdin");
  }

  let mut input = String::new();
  io::stdin()
    .read_to_string(&mut input)
    .context("failed to read spec from stdin")?;
  Ok(input)
}
