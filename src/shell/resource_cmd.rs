//! Templated registrations for the common handler shapes.
//!
//! A family file builds a [`ResourceCmd`] (or [`JointCmd`]) for its manager
//! and registers the verbs it supports; the handler bodies live here once.

use clap::{Args, FromArgMatches};
use serde::Serialize;

use super::payload::{ListOptions, ToParams};
use super::registry::{Registry, RegistryError};
use crate::client::{JointManager, ResourceManager, Session};
use crate::render::Transform;

/// Bounds every options type handed to a templated handler satisfies.
pub trait Options: Args + FromArgMatches + Send + Sync + 'static {}

impl<T: Args + FromArgMatches + Send + Sync + 'static> Options for T {}

/// Options that address one resource.
pub trait ResourceId {
    fn id(&self) -> &str;
}

/// Options that address one or more resources.
pub trait ResourceIds {
    fn ids(&self) -> &[String];
}

/// Options that address one joint row.
pub trait JointPair {
    fn master_id(&self) -> &str;
    fn slave_id(&self) -> &str;
}

/// Joint list options: filter by master, by slave, or neither.
pub trait JointListOptions: ToParams {
    fn master_id(&self) -> Option<&str>;
    fn slave_id(&self) -> Option<&str>;
}

/// Implement [`ResourceId`] for options types with an `id: String` field.
#[macro_export]
macro_rules! resource_id {
    ($($ty:ty),+ $(,)?) => {$(
        impl $crate::shell::resource_cmd::ResourceId for $ty {
            fn id(&self) -> &str {
                &self.id
            }
        }
    )+};
}

/// Implement [`ResourceIds`] for options types with an `ids: Vec<String>`
/// field.
#[macro_export]
macro_rules! resource_ids {
    ($($ty:ty),+ $(,)?) => {$(
        impl $crate::shell::resource_cmd::ResourceIds for $ty {
            fn ids(&self) -> &[String] {
                &self.ids
            }
        }
    )+};
}

/// Whole-struct [`ToParams`] for each listed type.
#[macro_export]
macro_rules! whole_struct {
    ($($ty:ty),+ $(,)?) => {$(
        impl $crate::shell::payload::ToParams for $ty {}
    )+};
}

/// Whole-struct [`ListOptions`] with no parent context.
#[macro_export]
macro_rules! plain_list {
    ($($ty:ty),+ $(,)?) => {$(
        impl $crate::shell::payload::ToParams for $ty {}
        impl $crate::shell::payload::ListOptions for $ty {}
    )+};
}

#[derive(Debug, Clone, Args, Serialize)]
pub struct ResourceIdOptions {
    /// ID or name of the resource
    #[arg(value_name = "ID")]
    #[serde(skip)]
    pub id: String,
}

impl ToParams for ResourceIdOptions {}

impl ResourceId for ResourceIdOptions {
    fn id(&self) -> &str {
        &self.id
    }
}

#[derive(Debug, Clone, Args, Serialize)]
pub struct ResourceIdsOptions {
    /// IDs or names of the resources
    #[arg(value_name = "ID", required = true)]
    #[serde(skip)]
    pub ids: Vec<String>,
}

impl ToParams for ResourceIdsOptions {}

impl ResourceIds for ResourceIdsOptions {
    fn ids(&self) -> &[String] {
        &self.ids
    }
}

/// Options with no flags at all.
#[derive(Debug, Clone, Default, Args, Serialize)]
pub struct EmptyOptions {}

impl ToParams for EmptyOptions {}

/// Registration helper for one resource manager.
#[derive(Debug, Clone)]
pub struct ResourceCmd {
    manager: &'static ResourceManager,
    keyword: String,
    prefix: Option<&'static str>,
    context: Option<&'static ResourceManager>,
    transform: Option<Transform>,
}

impl ResourceCmd {
    pub fn new(manager: &'static ResourceManager) -> Self {
        Self {
            manager,
            keyword: manager.keyword.replace('_', "-"),
            prefix: None,
            context: None,
            transform: None,
        }
    }

    #[must_use]
    pub fn keyword(mut self, keyword: &str) -> Self {
        self.keyword = keyword.to_string();
        self
    }

    #[must_use]
    pub fn prefix(mut self, prefix: &'static str) -> Self {
        self.prefix = Some(prefix);
        self
    }

    /// Parent manager used when list options carry a context id.
    #[must_use]
    pub fn context(mut self, context: &'static ResourceManager) -> Self {
        self.context = Some(context);
        self
    }

    #[must_use]
    pub fn transform(mut self, transform: Transform) -> Self {
        self.transform = Some(transform);
        self
    }

    pub fn manager(&self) -> &'static ResourceManager {
        self.manager
    }

    /// `[<prefix>-]<keyword>-<verb>`
    pub fn name(&self, verb: &str) -> String {
        match self.prefix {
            Some(prefix) => format!("{prefix}-{}-{verb}", self.keyword),
            None => format!("{}-{verb}", self.keyword),
        }
    }

    pub fn list<O>(&self, registry: &mut Registry, description: &str) -> Result<(), RegistryError>
    where
        O: ListOptions + Options,
    {
        let (manager, context, transform) = (self.manager, self.context, self.transform);
        registry.register(
            self.name("list"),
            description,
            move |session: Session, options: O| async move {
                let params = options.params()?;
                let list = match (context, options.context_id()) {
                    (Some(parent), Some(parent_id)) => {
                        manager
                            .list_in_context(&session, &params, parent, parent_id)
                            .await?
                    }
                    _ => manager.list(&session, &params).await?,
                };
                session
                    .printer()
                    .print_list_with(&list, manager.columns, transform)?;
                Ok(())
            },
        )
    }

    pub fn show<O>(&self, registry: &mut Registry, description: &str) -> Result<(), RegistryError>
    where
        O: ResourceId + ToParams + Options,
    {
        let (manager, transform) = (self.manager, self.transform);
        registry.register(
            self.name("show"),
            description,
            move |session: Session, options: O| async move {
                let query = options.params()?;
                let record = manager.get(&session, options.id(), Some(&query)).await?;
                session.printer().print_object_with(&record, transform)?;
                Ok(())
            },
        )
    }

    pub fn create<O>(&self, registry: &mut Registry, description: &str) -> Result<(), RegistryError>
    where
        O: ToParams + Options,
    {
        let (manager, transform) = (self.manager, self.transform);
        registry.register(
            self.name("create"),
            description,
            move |session: Session, options: O| async move {
                let record = manager.create(&session, options.params()?).await?;
                session.printer().print_object_with(&record, transform)?;
                Ok(())
            },
        )
    }

    /// Update with the nothing-to-update guard: an empty payload never
    /// reaches the server.
    pub fn update<O>(&self, registry: &mut Registry, description: &str) -> Result<(), RegistryError>
    where
        O: ResourceId + ToParams + Options,
    {
        let (manager, transform) = (self.manager, self.transform);
        registry.register(
            self.name("update"),
            description,
            move |session: Session, options: O| async move {
                let id = options.id();
                let params = options
                    .params()?
                    .ensure_update(&format!("{} {id}", manager.keyword))?;
                let record = manager.update(&session, id, params).await?;
                session.printer().print_object_with(&record, transform)?;
                Ok(())
            },
        )
    }

    /// Batch delete; flags travel as query parameters on every call.
    pub fn delete<O>(&self, registry: &mut Registry, description: &str) -> Result<(), RegistryError>
    where
        O: ResourceIds + ToParams + Options,
    {
        self.batch_delete_as::<O>(registry, "delete", description)
    }

    pub fn batch_delete_as<O>(
        &self,
        registry: &mut Registry,
        verb: &str,
        description: &str,
    ) -> Result<(), RegistryError>
    where
        O: ResourceIds + ToParams + Options,
    {
        let manager = self.manager;
        registry.register(
            self.name(verb),
            description,
            move |session: Session, options: O| async move {
                let query = options.params()?;
                let results = manager
                    .batch_delete_with_param(&session, options.ids(), &query, None)
                    .await;
                session.printer().print_batch(&results, manager.columns)?;
                Ok(())
            },
        )
    }

    /// `<name>-<verb> ID`: perform `verb` on one resource.
    pub fn perform<O>(
        &self,
        registry: &mut Registry,
        verb: &'static str,
        description: &str,
    ) -> Result<(), RegistryError>
    where
        O: ResourceId + ToParams + Options,
    {
        self.perform_as::<O>(registry, verb, verb, description)
    }

    /// Like [`ResourceCmd::perform`] but with a command verb that differs from
    /// the action sent on the wire.
    pub fn perform_as<O>(
        &self,
        registry: &mut Registry,
        verb: &str,
        action: &'static str,
        description: &str,
    ) -> Result<(), RegistryError>
    where
        O: ResourceId + ToParams + Options,
    {
        let (manager, transform) = (self.manager, self.transform);
        registry.register(
            self.name(verb),
            description,
            move |session: Session, options: O| async move {
                let params = options.params()?;
                let record = manager
                    .perform_action(&session, options.id(), action, params)
                    .await?;
                session.printer().print_object_with(&record, transform)?;
                Ok(())
            },
        )
    }

    /// `<name>-<verb> ID...`: perform `verb` on each resource in turn.
    pub fn batch_perform<O>(
        &self,
        registry: &mut Registry,
        verb: &'static str,
        description: &str,
    ) -> Result<(), RegistryError>
    where
        O: ResourceIds + ToParams + Options,
    {
        let manager = self.manager;
        registry.register(
            self.name(verb),
            description,
            move |session: Session, options: O| async move {
                let params = options.params()?;
                let results = manager
                    .batch_perform_action(&session, options.ids(), verb, &params)
                    .await;
                session.printer().print_batch(&results, manager.columns)?;
                Ok(())
            },
        )
    }

    /// `<name>-<verb>`: an action on the resource class rather than an item.
    pub fn class_perform<O>(
        &self,
        registry: &mut Registry,
        verb: &str,
        action: &'static str,
        description: &str,
    ) -> Result<(), RegistryError>
    where
        O: ToParams + Options,
    {
        let manager = self.manager;
        registry.register(
            self.name(verb),
            description,
            move |session: Session, options: O| async move {
                let record = manager
                    .perform_class_action(&session, action, options.params()?)
                    .await?;
                session.printer().print_object(&record)?;
                Ok(())
            },
        )
    }

    /// `<name>-<verb> ID`: fetch the `spec` sub-resource and print it as a
    /// record.
    pub fn get_specific<O>(
        &self,
        registry: &mut Registry,
        verb: &str,
        spec: &'static str,
        description: &str,
    ) -> Result<(), RegistryError>
    where
        O: ResourceId + ToParams + Options,
    {
        let manager = self.manager;
        registry.register(
            self.name(verb),
            description,
            move |session: Session, options: O| async move {
                let query = options.params()?;
                let value = manager
                    .get_specific(&session, options.id(), spec, Some(&query))
                    .await?;
                session.printer().print_object(&value)?;
                Ok(())
            },
        )
    }

    /// Like [`ResourceCmd::get_specific`] but prints one field of the
    /// response verbatim.
    pub fn get_specific_field<O>(
        &self,
        registry: &mut Registry,
        verb: &str,
        spec: &'static str,
        field: &'static str,
        description: &str,
    ) -> Result<(), RegistryError>
    where
        O: ResourceId + ToParams + Options,
    {
        let manager = self.manager;
        registry.register(
            self.name(verb),
            description,
            move |session: Session, options: O| async move {
                let query = options.params()?;
                let value = manager
                    .get_specific(&session, options.id(), spec, Some(&query))
                    .await?;
                match value.get(field) {
                    Some(inner) => session.printer().print_text(inner)?,
                    None => session.printer().print_object(&value)?,
                }
                Ok(())
            },
        )
    }
}

/// Registration helper for one joint manager.
#[derive(Debug, Clone)]
pub struct JointCmd {
    joint: &'static JointManager,
    keyword: String,
}

impl JointCmd {
    /// Commands are named `<master keyword>-<slave plural>-<verb>`.
    pub fn new(joint: &'static JointManager) -> Self {
        Self {
            joint,
            keyword: format!(
                "{}-{}",
                joint.master.keyword.replace('_', "-"),
                joint.slave.keyword_plural.replace('_', "-")
            ),
        }
    }

    #[must_use]
    pub fn keyword(mut self, keyword: &str) -> Self {
        self.keyword = keyword.to_string();
        self
    }

    pub fn name(&self, verb: &str) -> String {
        format!("{}-{verb}", self.keyword)
    }

    /// Descendents of the master when given, else of the slave, else all rows.
    pub fn list<O>(&self, registry: &mut Registry, description: &str) -> Result<(), RegistryError>
    where
        O: JointListOptions + Options,
    {
        let joint = self.joint;
        registry.register(
            self.name("list"),
            description,
            move |session: Session, options: O| async move {
                let params = options.params()?;
                let list = match (options.master_id(), options.slave_id()) {
                    (Some(master), _) => joint.list_descendent(&session, master, &params).await?,
                    (None, Some(slave)) => joint.list_descendent2(&session, slave, &params).await?,
                    (None, None) => joint.list(&session, &params).await?,
                };
                session.printer().print_list(&list, joint.columns)?;
                Ok(())
            },
        )
    }

    pub fn show<O>(&self, registry: &mut Registry, description: &str) -> Result<(), RegistryError>
    where
        O: JointPair + ToParams + Options,
    {
        let joint = self.joint;
        registry.register(
            self.name("show"),
            description,
            move |session: Session, options: O| async move {
                let query = options.params()?;
                let record = joint
                    .get(&session, options.master_id(), options.slave_id(), Some(&query))
                    .await?;
                session.printer().print_object(&record)?;
                Ok(())
            },
        )
    }

    pub fn attach<O>(&self, registry: &mut Registry, description: &str) -> Result<(), RegistryError>
    where
        O: JointPair + ToParams + Options,
    {
        let joint = self.joint;
        registry.register(
            self.name("add"),
            description,
            move |session: Session, options: O| async move {
                let params = options.params()?;
                let record = joint
                    .attach(&session, options.master_id(), options.slave_id(), params)
                    .await?;
                session.printer().print_object(&record)?;
                Ok(())
            },
        )
    }

    pub fn detach<O>(&self, registry: &mut Registry, description: &str) -> Result<(), RegistryError>
    where
        O: JointPair + ToParams + Options,
    {
        let joint = self.joint;
        registry.register(
            self.name("remove"),
            description,
            move |session: Session, options: O| async move {
                let params = options.params()?;
                let record = joint
                    .detach(&session, options.master_id(), options.slave_id(), &params)
                    .await?;
                session.printer().print_object(&record)?;
                Ok(())
            },
        )
    }
}
