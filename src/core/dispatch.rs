use crate::adapters::launcher::SshLauncher;
use crate::adapters::probe::{probe, ProbeOptions};
use crate::adapters::render::{render_probe, render_records, render_services};
use crate::core::client_factory::DatacenterClientSet;
use crate::core::resolver::{resolve, resolve_services};
use crate::core::selector::{select_target, ThreadRngIndex};
use crate::domain::model::{CatalogRecord, OutputFormat, QuerySpec};
use crate::domain::ports::{CatalogClient, RandomIndex, SessionLauncher};
use crate::utils::error::{ConsultError, Result};
use crate::utils::validation::Validate;
use std::io::Write;

/// What to do with the records a query resolves to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Print every matching record.
    List,
    /// GET a path on one randomly chosen instance.
    Probe(ProbeOptions),
    /// Open an ssh session on one randomly chosen node.
    Session { user: Option<String> },
}

pub struct Dispatcher<'a, C, R = ThreadRngIndex, L = SshLauncher> {
    clients: &'a DatacenterClientSet<C>,
    format: OutputFormat,
    rng: R,
    launcher: L,
    http: reqwest::Client,
}

impl<'a, C: CatalogClient> Dispatcher<'a, C> {
    pub fn new(clients: &'a DatacenterClientSet<C>, format: OutputFormat) -> Self {
        Self {
            clients,
            format,
            rng: ThreadRngIndex,
            launcher: SshLauncher::default(),
            http: reqwest::Client::new(),
        }
    }
}

impl<'a, C, R, L> Dispatcher<'a, C, R, L>
where
    C: CatalogClient,
    R: RandomIndex,
    L: SessionLauncher,
{
    pub fn with_rng<R2: RandomIndex>(self, rng: R2) -> Dispatcher<'a, C, R2, L> {
        Dispatcher {
            clients: self.clients,
            format: self.format,
            rng,
            launcher: self.launcher,
            http: self.http,
        }
    }

    pub fn with_launcher<L2: SessionLauncher>(self, launcher: L2) -> Dispatcher<'a, C, R, L2> {
        Dispatcher {
            clients: self.clients,
            format: self.format,
            rng: self.rng,
            launcher,
            http: self.http,
        }
    }

    pub async fn run<W: Write>(&self, action: &Action, spec: &QuerySpec, out: &mut W) -> Result<()> {
        spec.validate()?;
        let records = resolve(spec, self.clients).await?;

        match action {
            Action::List => {
                writeln!(out, "{}", render_records(&records, self.format)?)?;
            }
            Action::Probe(options) => {
                let target = self.pick(spec, &records)?;
                let response = probe(&self.http, target, options).await?;
                writeln!(out, "{}", render_probe(&response, self.format)?)?;
            }
            Action::Session { user } => {
                let target = self.pick(spec, &records)?;
                out.flush()?;
                self.launcher.launch(&target.address, user.as_deref())?;
            }
        }
        Ok(())
    }

    pub async fn services<W: Write>(&self, out: &mut W) -> Result<()> {
        let services = resolve_services(self.clients).await?;
        writeln!(out, "{}", render_services(&services, self.format)?)?;
        Ok(())
    }

    fn pick<'r>(&self, spec: &QuerySpec, records: &'r [CatalogRecord]) -> Result<&'r CatalogRecord> {
        let no_match = || ConsultError::NoMatch {
            service: spec.service.clone(),
        };
        if records.is_empty() {
            return Err(no_match());
        }
        let target = select_target(records, &self.rng).ok_or_else(no_match)?;
        tracing::info!(
            "Selected node {} ({}) out of {} candidate(s)",
            target.node,
            target.address,
            records.len()
        );
        Ok(target)
    }
}
