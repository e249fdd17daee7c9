//! Commands against the notify service.

use clap::Args;
use serde::Serialize;
use serde_json::Value;

use crate::client::modules::NOTIFY_TEMPLATES;
use crate::shell::payload::{BaseListOptions, Params, ToParams};
use crate::shell::resource_cmd::{ResourceCmd, ResourceIdOptions, ResourceIdsOptions};
use crate::shell::{CliResult, Registry, RegistryError};

const TEMPLATE_TYPES: [&str; 3] = ["title", "content", "remote"];

#[derive(Debug, Args, Serialize)]
pub struct NotifyTemplateListOptions {
    /// Filter by contact type, e.g. email or mobile
    #[arg(long)]
    pub contact_type: Option<String>,

    /// Filter by topic
    #[arg(long)]
    pub topic: Option<String>,

    /// Filter by language
    #[arg(long)]
    pub lang: Option<String>,

    #[command(flatten)]
    #[serde(flatten)]
    pub base: BaseListOptions,
}

/// Templates are saved per contact type; a create sends a batch of one.
#[derive(Debug, Args, Serialize)]
pub struct NotifyTemplateCreateOptions {
    /// Contact type the template renders for
    pub contact_type: String,

    /// Notification topic
    pub topic: String,

    /// Part of the message the template renders
    #[arg(value_parser = TEMPLATE_TYPES)]
    pub template_type: String,

    /// Template body
    pub content: String,

    /// Language of the template, e.g. en or zh
    #[arg(long)]
    pub lang: Option<String>,
}

impl ToParams for NotifyTemplateCreateOptions {
    fn params(&self) -> CliResult<Params> {
        let template = Params::from_struct(self)?;
        let mut params = Params::new();
        params
            .set("contact_type", self.contact_type.as_str())
            .set("templates", Value::Array(vec![template.into_value()]));
        Ok(params)
    }
}

#[derive(Debug, Args, Serialize)]
pub struct NotifyTemplateUpdateOptions {
    /// ID of the template
    #[serde(skip)]
    pub id: String,

    /// New topic
    #[arg(long)]
    pub topic: Option<String>,

    /// New template type
    #[arg(long, value_parser = TEMPLATE_TYPES)]
    pub template_type: Option<String>,

    /// New template body
    #[arg(long)]
    pub content: Option<String>,

    /// New language
    #[arg(long)]
    pub lang: Option<String>,
}

crate::plain_list!(NotifyTemplateListOptions);
crate::whole_struct!(NotifyTemplateUpdateOptions);
crate::resource_id!(NotifyTemplateUpdateOptions);

pub fn register(registry: &mut Registry) -> Result<(), RegistryError> {
    let templates = ResourceCmd::new(&NOTIFY_TEMPLATES).keyword("notify-template");
    templates.list::<NotifyTemplateListOptions>(registry, "List notification templates")?;
    templates.show::<ResourceIdOptions>(registry, "Show details of a notification template")?;
    templates.class_perform::<NotifyTemplateCreateOptions>(
        registry,
        "create",
        "save",
        "Save a notification template",
    )?;
    templates.update::<NotifyTemplateUpdateOptions>(registry, "Update a notification template")?;
    templates.delete::<ResourceIdsOptions>(registry, "Delete notification templates")
}
