use clap::Args;
use serde::Serialize;

use crate::client::Session;
use crate::client::modules::CREDENTIALS;
use crate::shell::payload::{BaseListOptions, Params, ToParams};
use crate::shell::resource_cmd::{ResourceCmd, ResourceIdOptions, ResourceIdsOptions};
use crate::shell::{CliResult, Registry, RegistryError};

const ACCESS_KEY_TYPE: &str = "aksk";

#[derive(Debug, Args, Serialize)]
pub struct CredentialListOptions {
    /// Filter by credential type, e.g. aksk or totp
    #[arg(long = "type")]
    #[serde(rename = "type")]
    pub credential_type: Option<String>,

    /// Filter by owning user
    #[arg(long)]
    pub user: Option<String>,

    #[command(flatten)]
    #[serde(flatten)]
    pub base: BaseListOptions,
}

#[derive(Debug, Args, Serialize)]
pub struct CredentialCreateAkskOptions {
    /// Issue the key for this user instead of the caller
    #[arg(long)]
    pub user: Option<String>,

    /// Project the key is scoped to
    #[arg(long)]
    pub project: Option<String>,
}

impl ToParams for CredentialCreateAkskOptions {
    fn params(&self) -> CliResult<Params> {
        let mut params = Params::from_struct(self)?;
        params.set("type", ACCESS_KEY_TYPE);
        Ok(params)
    }
}

crate::plain_list!(CredentialListOptions);

pub fn register(registry: &mut Registry) -> Result<(), RegistryError> {
    let credentials = ResourceCmd::new(&CREDENTIALS);
    credentials.list::<CredentialListOptions>(registry, "List credentials")?;
    credentials.show::<ResourceIdOptions>(registry, "Show details of a credential")?;
    registry.register(
        credentials.name("create-aksk"),
        "Issue an access key and secret",
        create_aksk,
    )?;
    credentials.delete::<ResourceIdsOptions>(registry, "Delete credentials")?;
    credentials.perform::<ResourceIdOptions>(registry, "enable", "Enable a credential")?;
    credentials.perform::<ResourceIdOptions>(registry, "disable", "Disable a credential")
}

async fn create_aksk(session: Session, options: CredentialCreateAkskOptions) -> CliResult<()> {
    let record = CREDENTIALS.create(&session, options.params()?).await?;
    session.printer().print_object(&record)?;
    Ok(())
}
