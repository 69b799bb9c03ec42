use clap::Args;
use serde_json::{json, Value};
use std::io::Read;
use std::path::PathBuf;

use crate::cli::{utils, OutputFormat};
use crate::scope::{CenterScope, ScopeKind, ScopeUser};

#[derive(Args, Debug)]
pub struct ResolveArgs {
    #[arg(long, short, help = "JSON file with the user record (reads stdin when omitted)")]
    pub file: Option<PathBuf>,

    #[arg(long, help = "Decision to use when the input holds no user")]
    pub fallback: bool,
}

pub fn handle(args: ResolveArgs, output_format: OutputFormat) -> anyhow::Result<()> {
    let input = match &args.file {
        Some(path) => std::fs::read_to_string(path)?,
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };

    let result = resolve_input(&input, args.fallback)?;
    utils::output_value(output_format, &result)
}

/// Resolve a raw JSON document; blank input counts as no user.
pub fn resolve_input(input: &str, fallback: bool) -> anyhow::Result<Value> {
    let value: Value = if input.trim().is_empty() {
        Value::Null
    } else {
        serde_json::from_str(input).map_err(|e| anyhow::anyhow!("input is not valid JSON: {}", e))?
    };

    let user = ScopeUser::from_json(&value);
    let is_system_scope = crate::scope::resolve_scope(user.as_ref(), fallback);

    Ok(json!({
        "is_system_scope": is_system_scope,
        "scope": ScopeKind::from(is_system_scope),
        "center": CenterScope::for_user(user.as_ref(), fallback),
    }))
}
