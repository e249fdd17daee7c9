//! Logical resource operations translated into wire calls.

use cloudadm_api_types::{ListResult, SubmitResult};
use reqwest::Method;
use serde_json::Value;

use super::session::Session;
use crate::shell::error::{CliError, CliResult};
use crate::shell::payload::Params;

/// Operations over one resource kind, rooted at `/{keyword_plural}` on its
/// service.
#[derive(Debug)]
pub struct ResourceManager {
    pub service: &'static str,
    pub keyword: &'static str,
    pub keyword_plural: &'static str,
    pub columns: &'static [&'static str],
}

impl ResourceManager {
    pub const fn new(
        service: &'static str,
        keyword: &'static str,
        keyword_plural: &'static str,
        columns: &'static [&'static str],
    ) -> Self {
        Self {
            service,
            keyword,
            keyword_plural,
            columns,
        }
    }

    fn describe(&self, id: &str) -> String {
        format!("{} {id}", self.keyword)
    }

    async fn call(
        &self,
        session: &Session,
        method: Method,
        segments: &[&str],
        query: Option<&Params>,
        body: Option<Value>,
        context: &str,
    ) -> CliResult<Value> {
        session
            .request(method, self.service, segments, query, body, context)
            .await
    }

    fn list_result(&self, envelope: &Value) -> CliResult<ListResult> {
        ListResult::from_envelope(envelope, self.keyword_plural).ok_or_else(|| {
            CliError::Decode(format!(
                "{}: response is not a list envelope",
                self.keyword_plural
            ))
        })
    }

    pub async fn list(&self, session: &Session, params: &Params) -> CliResult<ListResult> {
        let envelope = self
            .call(
                session,
                Method::GET,
                &[self.keyword_plural],
                Some(params),
                None,
                self.keyword_plural,
            )
            .await?;
        self.list_result(&envelope)
    }

    pub async fn list_in_context(
        &self,
        session: &Session,
        params: &Params,
        context: &ResourceManager,
        context_id: &str,
    ) -> CliResult<ListResult> {
        let envelope = self
            .call(
                session,
                Method::GET,
                &[context.keyword_plural, context_id, self.keyword_plural],
                Some(params),
                None,
                &context.describe(context_id),
            )
            .await?;
        self.list_result(&envelope)
    }

    pub async fn get(
        &self,
        session: &Session,
        id: &str,
        query: Option<&Params>,
    ) -> CliResult<Value> {
        let body = self
            .call(
                session,
                Method::GET,
                &[self.keyword_plural, id],
                query,
                None,
                &self.describe(id),
            )
            .await?;
        Ok(unwrap_record(self.keyword, body))
    }

    pub async fn get_specific(
        &self,
        session: &Session,
        id: &str,
        spec: &str,
        query: Option<&Params>,
    ) -> CliResult<Value> {
        self.call(
            session,
            Method::GET,
            &[self.keyword_plural, id, spec],
            query,
            None,
            &self.describe(id),
        )
        .await
    }

    pub async fn create(&self, session: &Session, params: Params) -> CliResult<Value> {
        let body = self
            .call(
                session,
                Method::POST,
                &[self.keyword_plural],
                None,
                Some(params.into_value()),
                self.keyword,
            )
            .await?;
        Ok(unwrap_record(self.keyword, body))
    }

    pub async fn create_in_context(
        &self,
        session: &Session,
        params: Params,
        context: &ResourceManager,
        context_id: &str,
    ) -> CliResult<Value> {
        let body = self
            .call(
                session,
                Method::POST,
                &[context.keyword_plural, context_id, self.keyword_plural],
                None,
                Some(params.into_value()),
                &context.describe(context_id),
            )
            .await?;
        Ok(unwrap_record(self.keyword, body))
    }

    pub async fn update(&self, session: &Session, id: &str, params: Params) -> CliResult<Value> {
        let body = self
            .call(
                session,
                Method::PUT,
                &[self.keyword_plural, id],
                None,
                Some(params.into_value()),
                &self.describe(id),
            )
            .await?;
        Ok(unwrap_record(self.keyword, body))
    }

    /// Class-level update: `PUT /{plural}` with the body as given.
    pub async fn batch_update(&self, session: &Session, body: Value) -> CliResult<Value> {
        self.call(
            session,
            Method::PUT,
            &[self.keyword_plural],
            None,
            Some(body),
            self.keyword_plural,
        )
        .await
    }

    pub async fn delete(
        &self,
        session: &Session,
        id: &str,
        body: Option<Value>,
    ) -> CliResult<Value> {
        self.delete_with_param(session, id, &Params::new(), body)
            .await
    }

    pub async fn delete_with_param(
        &self,
        session: &Session,
        id: &str,
        query: &Params,
        body: Option<Value>,
    ) -> CliResult<Value> {
        let body = self
            .call(
                session,
                Method::DELETE,
                &[self.keyword_plural, id],
                Some(query),
                body,
                &self.describe(id),
            )
            .await?;
        Ok(unwrap_record(self.keyword, body))
    }

    pub async fn perform_action(
        &self,
        session: &Session,
        id: &str,
        action: &str,
        params: Params,
    ) -> CliResult<Value> {
        let body = self
            .call(
                session,
                Method::POST,
                &[self.keyword_plural, id, action],
                None,
                Some(params.into_value()),
                &self.describe(id),
            )
            .await?;
        Ok(unwrap_record(self.keyword, body))
    }

    pub async fn perform_class_action(
        &self,
        session: &Session,
        action: &str,
        params: Params,
    ) -> CliResult<Value> {
        self.call(
            session,
            Method::POST,
            &[self.keyword_plural, action],
            None,
            Some(params.into_value()),
            self.keyword_plural,
        )
        .await
    }

    pub async fn batch_delete(
        &self,
        session: &Session,
        ids: &[String],
        body: Option<Value>,
    ) -> Vec<SubmitResult> {
        self.batch_delete_with_param(session, ids, &Params::new(), body)
            .await
    }

    /// One `DELETE` per id, in order. A failure never stops the batch.
    pub async fn batch_delete_with_param(
        &self,
        session: &Session,
        ids: &[String],
        query: &Params,
        body: Option<Value>,
    ) -> Vec<SubmitResult> {
        let mut results = Vec::with_capacity(ids.len());
        for id in ids {
            let outcome = self
                .delete_with_param(session, id, query, body.clone())
                .await;
            results.push(submit_result(id, outcome));
        }
        results
    }

    pub async fn batch_perform_action(
        &self,
        session: &Session,
        ids: &[String],
        action: &str,
        params: &Params,
    ) -> Vec<SubmitResult> {
        let mut results = Vec::with_capacity(ids.len());
        for id in ids {
            let outcome = self
                .perform_action(session, id, action, params.clone())
                .await;
            results.push(submit_result(id, outcome));
        }
        results
    }
}

/// Operations over a many-to-many relation between two resource kinds.
#[derive(Debug)]
pub struct JointManager {
    pub service: &'static str,
    pub keyword: &'static str,
    pub keyword_plural: &'static str,
    pub master: &'static ResourceManager,
    pub slave: &'static ResourceManager,
    pub columns: &'static [&'static str],
}

impl JointManager {
    pub const fn new(
        keyword: &'static str,
        keyword_plural: &'static str,
        master: &'static ResourceManager,
        slave: &'static ResourceManager,
        columns: &'static [&'static str],
    ) -> Self {
        Self {
            service: master.service,
            keyword,
            keyword_plural,
            master,
            slave,
            columns,
        }
    }

    fn describe(&self, master_id: &str, slave_id: &str) -> String {
        format!(
            "{} {master_id}/{} {slave_id}",
            self.master.keyword, self.slave.keyword
        )
    }

    async fn call(
        &self,
        session: &Session,
        method: Method,
        segments: &[&str],
        query: Option<&Params>,
        body: Option<Value>,
        context: &str,
    ) -> CliResult<Value> {
        session
            .request(method, self.service, segments, query, body, context)
            .await
    }

    fn list_result(&self, envelope: &Value) -> CliResult<ListResult> {
        ListResult::from_envelope(envelope, self.keyword_plural)
            .or_else(|| ListResult::from_envelope(envelope, self.slave.keyword_plural))
            .or_else(|| ListResult::from_envelope(envelope, self.master.keyword_plural))
            .ok_or_else(|| {
                CliError::Decode(format!(
                    "{}: response is not a list envelope",
                    self.keyword_plural
                ))
            })
    }

    pub async fn list(&self, session: &Session, params: &Params) -> CliResult<ListResult> {
        let envelope = self
            .call(
                session,
                Method::GET,
                &[self.keyword_plural],
                Some(params),
                None,
                self.keyword_plural,
            )
            .await?;
        self.list_result(&envelope)
    }

    /// Slaves attached to one master.
    pub async fn list_descendent(
        &self,
        session: &Session,
        master_id: &str,
        params: &Params,
    ) -> CliResult<ListResult> {
        let envelope = self
            .call(
                session,
                Method::GET,
                &[
                    self.master.keyword_plural,
                    master_id,
                    self.slave.keyword_plural,
                ],
                Some(params),
                None,
                &self.master.describe(master_id),
            )
            .await?;
        self.list_result(&envelope)
    }

    /// Masters attached to one slave.
    pub async fn list_descendent2(
        &self,
        session: &Session,
        slave_id: &str,
        params: &Params,
    ) -> CliResult<ListResult> {
        let envelope = self
            .call(
                session,
                Method::GET,
                &[
                    self.slave.keyword_plural,
                    slave_id,
                    self.master.keyword_plural,
                ],
                Some(params),
                None,
                &self.slave.describe(slave_id),
            )
            .await?;
        self.list_result(&envelope)
    }

    async fn pair_call(
        &self,
        session: &Session,
        method: Method,
        master_id: &str,
        slave_id: &str,
        query: Option<&Params>,
        body: Option<Value>,
    ) -> CliResult<Value> {
        let body = self
            .call(
                session,
                method,
                &[
                    self.master.keyword_plural,
                    master_id,
                    self.slave.keyword_plural,
                    slave_id,
                ],
                query,
                body,
                &self.describe(master_id, slave_id),
            )
            .await?;
        Ok(unwrap_record(self.keyword, body))
    }

    pub async fn get(
        &self,
        session: &Session,
        master_id: &str,
        slave_id: &str,
        query: Option<&Params>,
    ) -> CliResult<Value> {
        self.pair_call(session, Method::GET, master_id, slave_id, query, None)
            .await
    }

    pub async fn attach(
        &self,
        session: &Session,
        master_id: &str,
        slave_id: &str,
        params: Params,
    ) -> CliResult<Value> {
        self.pair_call(
            session,
            Method::POST,
            master_id,
            slave_id,
            None,
            Some(params.into_value()),
        )
        .await
    }

    pub async fn detach(
        &self,
        session: &Session,
        master_id: &str,
        slave_id: &str,
        params: &Params,
    ) -> CliResult<Value> {
        self.pair_call(
            session,
            Method::DELETE,
            master_id,
            slave_id,
            Some(params),
            None,
        )
        .await
    }

    pub async fn update(
        &self,
        session: &Session,
        master_id: &str,
        slave_id: &str,
        params: Params,
    ) -> CliResult<Value> {
        self.pair_call(
            session,
            Method::PUT,
            master_id,
            slave_id,
            None,
            Some(params.into_value()),
        )
        .await
    }
}

/// Strip a `{ "<keyword>": {...} }` wrapper; anything else is returned as is.
pub fn unwrap_record(keyword: &str, body: Value) -> Value {
    match body {
        Value::Object(mut object)
            if object.len() == 1 && object.get(keyword).is_some_and(Value::is_object) =>
        {
            object.remove(keyword).unwrap_or_default()
        }
        other => other,
    }
}

fn submit_result(id: &str, outcome: CliResult<Value>) -> SubmitResult {
    match outcome {
        Ok(data) => SubmitResult::ok(id, data),
        Err(err) => {
            let status = err.status();
            let message = match err {
                CliError::Remote { message, .. } => message,
                other => other.to_string(),
            };
            SubmitResult::failed(id, status, message)
        }
    }
}

#[cfg(test)]
mod tests {
    use httpmock::MockServer;
    use serde_json::json;

    use super::*;

    static STORAGES: ResourceManager = ResourceManager::new("compute", "storage", "storages", &[]);
    static DISKS: ResourceManager =
        ResourceManager::new("compute", "disk", "disks", &["id", "name", "status"]);
    static SCHEDTAGS: ResourceManager =
        ResourceManager::new("compute", "schedtag", "schedtags", &[]);
    static HOSTS: ResourceManager = ResourceManager::new("compute", "host", "hosts", &[]);
    static SCHEDTAG_HOSTS: JointManager =
        JointManager::new("schedtaghost", "schedtaghosts", &SCHEDTAGS, &HOSTS, &[]);

    fn session(server: &MockServer) -> Session {
        Session::new(&server.base_url(), None).expect("session")
    }

    #[tokio::test]
    async fn list_in_context_reads_plural_envelope() -> CliResult<()> {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method("GET")
                .path("/compute/storages/s1/disks")
                .query_param("limit", "2");
            then.status(200)
                .header("content-type", "application/json")
                .body(r#"{"disks":[{"id":"a"},{"id":"b"}],"total":9}"#);
        });

        let mut params = Params::new();
        params.put("limit", &Some(2_u64));
        let list = DISKS
            .list_in_context(&session(&server), &params, &STORAGES, "s1")
            .await?;
        mock.assert();
        assert_eq!(list.data.len(), 2);
        assert_eq!(list.total, Some(9));
        Ok(())
    }

    #[tokio::test]
    async fn get_unwraps_keyword_envelope() -> CliResult<()> {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method("GET").path("/compute/disks/d1");
            then.status(200)
                .header("content-type", "application/json")
                .body(r#"{"disk":{"id":"d1","name":"root"}}"#);
        });

        let record = DISKS.get(&session(&server), "d1", None).await?;
        assert_eq!(record, json!({"id": "d1", "name": "root"}));
        Ok(())
    }

    #[tokio::test]
    async fn batch_delete_continues_past_failures() {
        let server = MockServer::start();
        let first = server.mock(|when, then| {
            when.method("DELETE")
                .path("/compute/disks/d1")
                .query_param("override_pending_delete", "true");
            then.status(200)
                .header("content-type", "application/json")
                .body(r#"{"id":"d1","status":"deleting"}"#);
        });
        let second = server.mock(|when, then| {
            when.method("DELETE").path("/compute/disks/d2");
            then.status(404).body("disk d2 not found");
        });

        let mut query = Params::new();
        query.put("override_pending_delete", &true);
        let results = DISKS
            .batch_delete_with_param(
                &session(&server),
                &["d1".to_string(), "d2".to_string()],
                &query,
                None,
            )
            .await;
        first.assert();
        second.assert();
        assert!(results[0].is_success());
        assert_eq!(results[1].status, 404);
        assert_eq!(results[1].error_message(), Some("disk d2 not found"));
    }

    #[tokio::test]
    async fn joint_attach_posts_to_pair_path() -> CliResult<()> {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method("POST").path("/compute/schedtags/mytag/hosts/host7");
            then.status(200)
                .header("content-type", "application/json")
                .body(r#"{"schedtaghost":{"schedtag_id":"mytag","host_id":"host7"}}"#);
        });

        let record = SCHEDTAG_HOSTS
            .attach(&session(&server), "mytag", "host7", Params::new())
            .await?;
        mock.assert();
        assert_eq!(record, json!({"schedtag_id": "mytag", "host_id": "host7"}));
        Ok(())
    }

    #[test]
    fn unwrap_record_only_strips_matching_wrapper() {
        assert_eq!(
            unwrap_record("disk", json!({"disk": {"id": "x"}})),
            json!({"id": "x"})
        );
        let plain = json!({"disk": "x", "id": "y"});
        assert_eq!(unwrap_record("disk", plain.clone()), plain);
        let config = json!({"config": {"ldap": {}}});
        assert_eq!(unwrap_record("identity_provider", config.clone()), config);
    }
}
