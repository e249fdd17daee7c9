//! `module-list`: the local catalogue of resource managers.

use serde_json::{Value, json};

use crate::client::{Session, modules};
use crate::shell::resource_cmd::EmptyOptions;
use crate::shell::{CliResult, Registry, RegistryError};
use cloudadm_api_types::ListResult;

const COLUMNS: &[&str] = &["service", "keyword", "plural"];

pub fn register(registry: &mut Registry) -> Result<(), RegistryError> {
    registry.register(
        "module-list",
        "List every resource module this client knows about",
        module_list,
    )
}

async fn module_list(session: Session, _options: EmptyOptions) -> CliResult<()> {
    let list = catalogue();
    session.printer().print_list(&list, COLUMNS)?;
    Ok(())
}

fn catalogue() -> ListResult {
    let data: Vec<Value> = modules::all()
        .into_iter()
        .map(|info| {
            json!({
                "service": info.service,
                "keyword": info.keyword,
                "plural": info.keyword_plural,
            })
        })
        .collect();
    ListResult {
        total: u64::try_from(data.len()).ok(),
        data,
        ..ListResult::default()
    }
}
