use anyhow::{bail, Context, Result};
use clap::{Args, Subcommand};
use rosterguard_authz::prelude::{evaluate, Action};
use rosterguard_types::prelude::{Role, TeamId};
use serde_json::json;

use crate::config::AppConfig;

#[derive(Subcommand, Clone)]
pub enum Commands {
    /// Run the demo server with the admission layer in front of echo handlers
    Serve(ServeArgs),

    /// Validate the configuration and exit
    Check,

    /// Print the effective rate-limit policies and route table
    Policies(PoliciesArgs),

    /// Evaluate one permission-table decision
    Decide(DecideArgs),
}

#[derive(Args, Clone)]
pub struct ServeArgs {
    /// Listen address, overriding `server.bind`
    #[arg(long)]
    pub bind: Option<String>,
}

#[derive(Args, Clone)]
pub struct PoliciesArgs {
    /// Print JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Clone)]
pub struct DecideArgs {
    #[arg(long)]
    pub role: String,

    #[arg(long)]
    pub action: String,

    /// Team of the acting user
    #[arg(long)]
    pub actor_team: Option<String>,

    /// Owning team of the resource
    #[arg(long)]
    pub resource_team: Option<String>,
}

pub async fn dispatch(command: &Commands, mut config: AppConfig) -> Result<()> {
    match command {
        Commands::Serve(args) => {
            if let Some(bind) = &args.bind {
                config.server.bind = bind.clone();
            }
            crate::server::serve(&config).await
        }
        Commands::Check => cmd_check(&config),
        Commands::Policies(args) => cmd_policies(&config, args),
        Commands::Decide(args) => cmd_decide(args),
    }
}

fn cmd_check(config: &AppConfig) -> Result<()> {
    match config.validate() {
        Ok(validated) => {
            println!(
                "configuration ok: {} policies, {} routes, {} demo actors",
                validated.policies.iter().count(),
                validated.routes.rules().len(),
                validated.actors.len()
            );
            Ok(())
        }
        Err(err) => {
            let message = err.to_string();
            let audit = err.into_error_obj().to_audit();
            println!("{}", serde_json::to_string_pretty(&audit)?);
            bail!("invalid configuration: {message}")
        }
    }
}

fn cmd_policies(config: &AppConfig, args: &PoliciesArgs) -> Result<()> {
    let validated = config.validate().context("invalid configuration")?;

    if args.json {
        let policies: Vec<_> = validated
            .policies
            .iter()
            .map(|policy| json!({ "name": policy.name(), "spec": policy.to_spec() }))
            .collect();
        let out = json!({
            "default": validated.policies.default_name(),
            "policies": policies,
            "routes": validated.routes.rules(),
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    println!("rate-limit policies (default: {})", validated.policies.default_name());
    for policy in validated.policies.iter() {
        println!(
            "  {:<12} window={}ms max={} key={:?}",
            policy.name(),
            policy.window_ms(),
            policy.max_requests(),
            policy.key_strategy()
        );
    }
    println!("routes");
    for rule in validated.routes.rules() {
        let method = match &rule.when {
            rosterguard_interceptors::prelude::MatchCond::Http { method, .. } => method,
        };
        println!(
            "  {:<7} {:<40} {} {} policy={}",
            method,
            rule.path_glob(),
            rule.bind.resource.as_str(),
            rule.bind.action.as_str(),
            rule.bind
                .rate_limit
                .as_deref()
                .unwrap_or(validated.policies.default_name())
        );
    }
    Ok(())
}

fn cmd_decide(args: &DecideArgs) -> Result<()> {
    let role: Role = args.role.parse().context("unknown role")?;
    let action: Action = args.action.parse().context("unknown action")?;
    let actor_team = args.actor_team.as_deref().map(TeamId::from);
    let resource_team = args.resource_team.as_deref().map(TeamId::from);

    let decision = evaluate(role, actor_team.as_ref(), resource_team.as_ref(), action);
    println!(
        "{} {} -> {} ({})",
        role,
        action,
        if decision.allow { "allow" } else { "deny" },
        decision.reason.as_str()
    );
    Ok(())
}
