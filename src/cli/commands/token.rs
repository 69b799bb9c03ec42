use clap::Args;
use serde_json::json;

use crate::auth::{generate_jwt, Claims};
use crate::cli::{utils, OutputFormat};
use crate::scope::ScopeUser;

#[derive(Args, Debug)]
pub struct TokenArgs {
    #[arg(long, help = "Subject (admin user id)")]
    pub subject: String,

    #[arg(long, help = "Display name")]
    pub name: String,

    #[arg(long)]
    pub email: Option<String>,

    #[arg(long = "role", help = "Role name (repeatable)")]
    pub roles: Vec<String>,

    #[arg(long)]
    pub scope_type: Option<String>,

    #[arg(long)]
    pub scope_center_id: Option<String>,

    #[arg(long)]
    pub center_id: Option<String>,

    #[arg(long, help = "Mark the user as system super admin")]
    pub super_admin: bool,
}

impl TokenArgs {
    pub fn scope_user(&self) -> ScopeUser {
        ScopeUser {
            scope_type: self.scope_type.clone().map(Into::into),
            scope_center_id: self.scope_center_id.clone().map(Into::into),
            center_id: self.center_id.clone().map(Into::into),
            is_system_super_admin: self.super_admin.then_some(true),
        }
    }
}

pub fn handle(args: TokenArgs, output_format: OutputFormat) -> anyhow::Result<()> {
    let mut claims = Claims::new(&args.subject, &args.name, args.scope_user()).with_roles(args.roles.clone());
    if let Some(email) = &args.email {
        claims = claims.with_email(email);
    }

    let token = generate_jwt(&claims)?;
    tracing::debug!(sub = %claims.sub, "minted development token");

    match output_format {
        OutputFormat::Json => utils::output_success(
            output_format,
            "Token issued",
            Some(json!({ "token": token, "expires_at": claims.exp })),
        ),
        OutputFormat::Text => {
            println!("{}", token);
            Ok(())
        }
    }
}
