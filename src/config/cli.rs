use crate::adapters::probe::ProbeOptions;
use crate::core::dispatch::Action;
use crate::domain::model::{QuerySpec, TagMatchMode};
use crate::domain::ports::QueryCommand;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "consult", version)]
#[command(about = "Query the service catalog and act on the nodes it returns")]
pub struct CliConfig {
    /// Registry URL
    #[arg(long, env = "CONSUL_URL", global = true)]
    pub server: Option<String>,

    /// Datacenter to query; repeat to fan out over several
    #[arg(long = "dc", value_name = "DATACENTER", global = true)]
    pub datacenters: Vec<String>,

    /// JSON query output
    #[arg(short, long, global = true)]
    pub json: bool,

    /// TOML file with defaults for server, datacenters and ssh user
    #[arg(long, env = "CONSULT_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Print the nodes running a service
    Query(QueryArgs),
    /// Print every service in the catalog with its tags
    Services,
    /// Send an HTTP GET to a random node running a service
    Http(HttpArgs),
    /// ssh into a random node running a service
    Ssh(SshArgs),
}

#[derive(Debug, Clone, Args)]
pub struct QueryArgs {
    /// Service name
    #[arg(short, long)]
    pub service: String,

    /// Tag to filter on; repeat for several
    #[arg(short, long = "tag")]
    pub tags: Vec<String>,

    /// Find nodes with all or any of the tags
    #[arg(short = 'm', long = "tags-mode", value_enum, default_value_t = TagMatchMode::All)]
    pub mode: TagMatchMode,
}

#[derive(Debug, Clone, Args)]
pub struct HttpArgs {
    #[command(flatten)]
    pub query: QueryArgs,

    /// Request path
    #[arg(long, default_value = "/")]
    pub path: String,

    /// URL scheme used for the request
    #[arg(long, default_value = "http", value_parser = ["http", "https"])]
    pub scheme: String,
}

#[derive(Debug, Clone, Args)]
pub struct SshArgs {
    #[command(flatten)]
    pub query: QueryArgs,

    /// ssh user name
    #[arg(short = 'u', long = "username")]
    pub user: Option<String>,
}

impl QueryCommand for QueryArgs {
    fn query_spec(&self) -> QuerySpec {
        QuerySpec::new(self.service.clone(), self.tags.clone(), self.mode)
    }
}

impl QueryCommand for HttpArgs {
    fn query_spec(&self) -> QuerySpec {
        self.query.query_spec()
    }
}

impl QueryCommand for SshArgs {
    fn query_spec(&self) -> QuerySpec {
        self.query.query_spec()
    }
}

impl Command {
    /// The query and action a command stands for; `None` for commands that
    /// are not about a single service. `default_user` is used by `ssh` when no
    /// `--username` was given.
    pub fn plan(&self, default_user: Option<&str>) -> Option<(QuerySpec, Action)> {
        match self {
            Command::Query(args) => Some((args.query_spec(), Action::List)),
            Command::Services => None,
            Command::Http(args) => Some((
                args.query_spec(),
                Action::Probe(ProbeOptions {
                    scheme: args.scheme.clone(),
                    path: args.path.clone(),
                }),
            )),
            Command::Ssh(args) => Some((
                args.query_spec(),
                Action::Session {
                    user: args.user.clone().or_else(|| default_user.map(str::to_string)),
                },
            )),
        }
    }
}
