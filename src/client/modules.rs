//! Catalogue of every resource manager the client knows about, by service.

use super::manager::{JointManager, ResourceManager};

const BASIC_COLUMNS: &[&str] = &["id", "name", "status"];

// compute

pub static ZONES: ResourceManager =
    ResourceManager::new("compute", "zone", "zones", &["id", "name", "status", "cloudregion"]);
pub static CLOUDREGIONS: ResourceManager = ResourceManager::new(
    "compute",
    "cloudregion",
    "cloudregions",
    &["id", "name", "provider", "status"],
);
pub static STORAGES: ResourceManager = ResourceManager::new(
    "compute",
    "storage",
    "storages",
    &["id", "name", "storage_type", "capacity", "status", "zone"],
);
pub static DISKS: ResourceManager = ResourceManager::new(
    "compute",
    "disk",
    "disks",
    &["id", "name", "disk_size", "status", "disk_type", "storage", "guest"],
);
pub static WIRES: ResourceManager = ResourceManager::new(
    "compute",
    "wire",
    "wires",
    &["id", "name", "bandwidth", "mtu", "zone", "vpc"],
);
pub static HOSTS: ResourceManager = ResourceManager::new(
    "compute",
    "host",
    "hosts",
    &["id", "name", "access_ip", "ipmi_ip", "host_type", "status", "host_status"],
);
pub static NETWORKS: ResourceManager = ResourceManager::new(
    "compute",
    "network",
    "networks",
    &["id", "name", "guest_ip_start", "guest_ip_end", "wire", "status"],
);
pub static CLOUDPROVIDERS: ResourceManager = ResourceManager::new(
    "compute",
    "cloudprovider",
    "cloudproviders",
    &["id", "name", "provider", "account", "enabled", "status", "sync_status"],
);
pub static LOADBALANCER_ACLS: ResourceManager = ResourceManager::new(
    "compute",
    "loadbalanceracl",
    "loadbalanceracls",
    &["id", "name", "acl_entries", "tenant"],
);
pub static CACHED_LOADBALANCER_ACLS: ResourceManager = ResourceManager::new(
    "compute",
    "cachedloadbalanceracl",
    "cachedloadbalanceracls",
    &["id", "name", "acl_id", "cloudregion", "acl_entries", "status"],
);
pub static LOADBALANCER_LISTENER_RULES: ResourceManager = ResourceManager::new(
    "compute",
    "loadbalancerlistenerrule",
    "loadbalancerlistenerrules",
    &["id", "name", "listener", "domain", "path", "backend_group", "status"],
);
pub static ELASTIC_CACHES: ResourceManager = ResourceManager::new(
    "compute",
    "elasticcache",
    "elasticcaches",
    &["id", "name", "engine", "engine_version", "instance_type", "status", "cloudregion"],
);
pub static ELASTIC_CACHE_BACKUPS: ResourceManager = ResourceManager::new(
    "compute",
    "elasticcachebackup",
    "elasticcachebackups",
    &["id", "name", "elasticcache", "backup_size_mb", "status"],
);
pub static DBINSTANCES: ResourceManager = ResourceManager::new(
    "compute",
    "dbinstance",
    "dbinstances",
    &["id", "name", "engine", "engine_version", "category", "status", "cloudregion"],
);
pub static SCHEDTAGS: ResourceManager = ResourceManager::new(
    "compute",
    "schedtag",
    "schedtags",
    &["id", "name", "default_strategy", "resource_type", "description"],
);
pub static SCALING_GROUPS: ResourceManager = ResourceManager::new(
    "compute",
    "scalinggroup",
    "scalinggroups",
    &["id", "name", "min_instance_number", "max_instance_number", "desire_instance_number", "enabled", "status"],
);
pub static SERVICE_CATALOGS: ResourceManager = ResourceManager::new(
    "compute",
    "servicecatalog",
    "servicecatalogs",
    &["id", "name", "guest_template", "icon_url"],
);
pub static SERVER_SKUS: ResourceManager = ResourceManager::new(
    "compute",
    "serversku",
    "serverskus",
    &["id", "name", "cpu_core_count", "memory_size_mb", "provider", "cloudregion", "zone", "postpaid_status", "prepaid_status"],
);
pub static BAREMETAL_EVENTS: ResourceManager = ResourceManager::new(
    "compute",
    "baremetalevent",
    "baremetalevents",
    &["id", "host_name", "event_id", "type", "severity", "message", "created"],
);
pub static SNAPSHOTS: ResourceManager = ResourceManager::new(
    "compute",
    "snapshot",
    "snapshots",
    &["id", "name", "disk_id", "size", "status", "created_at"],
);
pub static INSTANCE_SNAPSHOTS: ResourceManager = ResourceManager::new(
    "compute",
    "instance_snapshot",
    "instance_snapshots",
    &["id", "name", "guest", "status", "created_at"],
);
pub static SERVERS: ResourceManager = ResourceManager::new(
    "compute",
    "server",
    "servers",
    &["id", "name", "vcpu_count", "vmem_size", "status", "host"],
);
pub static STORAGE_CACHES: ResourceManager = ResourceManager::new(
    "compute",
    "storagecache",
    "storagecaches",
    &["id", "name", "path", "size", "storages"],
);
pub static CACHED_IMAGES: ResourceManager = ResourceManager::new(
    "compute",
    "cachedimage",
    "cachedimages",
    &["id", "name", "size", "status"],
);
pub static POLICY_DEFINITIONS: ResourceManager = ResourceManager::new(
    "compute",
    "policy_definition",
    "policy_definitions",
    &["id", "name", "category", "status"],
);
pub static NAT_GATEWAYS: ResourceManager = ResourceManager::new(
    "compute",
    "natgateway",
    "natgateways",
    &["id", "name", "nat_spec", "vpc", "network", "status", "billing_type"],
);
pub static VPCS: ResourceManager = ResourceManager::new("compute", "vpc", "vpcs", BASIC_COLUMNS);

pub static SCHEDTAG_HOSTS: JointManager = JointManager::new(
    "schedtaghost",
    "schedtaghosts",
    &SCHEDTAGS,
    &HOSTS,
    &["schedtag_id", "schedtag", "host_id", "host"],
);
pub static SCHEDTAG_STORAGES: JointManager = JointManager::new(
    "schedtagstorage",
    "schedtagstorages",
    &SCHEDTAGS,
    &STORAGES,
    &["schedtag_id", "schedtag", "storage_id", "storage"],
);
pub static SCHEDTAG_NETWORKS: JointManager = JointManager::new(
    "schedtagnetwork",
    "schedtagnetworks",
    &SCHEDTAGS,
    &NETWORKS,
    &["schedtag_id", "schedtag", "network_id", "network"],
);
pub static SCHEDTAG_CLOUDPROVIDERS: JointManager = JointManager::new(
    "schedtagcloudprovider",
    "schedtagcloudproviders",
    &SCHEDTAGS,
    &CLOUDPROVIDERS,
    &["schedtag_id", "schedtag", "cloudprovider_id", "cloudprovider"],
);
pub static SCHEDTAG_ZONES: JointManager = JointManager::new(
    "schedtagzone",
    "schedtagzones",
    &SCHEDTAGS,
    &ZONES,
    &["schedtag_id", "schedtag", "zone_id", "zone"],
);
pub static SCHEDTAG_CLOUDREGIONS: JointManager = JointManager::new(
    "schedtagcloudregion",
    "schedtagcloudregions",
    &SCHEDTAGS,
    &CLOUDREGIONS,
    &["schedtag_id", "schedtag", "cloudregion_id", "cloudregion"],
);
pub static HOST_NETWORKS: JointManager = JointManager::new(
    "hostnetwork",
    "hostnetworks",
    &HOSTS,
    &NETWORKS,
    &["host_id", "host", "network_id", "network", "ip_addr", "mac_addr"],
);
pub static STORAGE_CACHED_IMAGES: JointManager = JointManager::new(
    "storagecachedimage",
    "storagecachedimages",
    &STORAGE_CACHES,
    &CACHED_IMAGES,
    &["storagecache_id", "cachedimage_id", "cachedimage", "status", "path", "size"],
);

/// Every schedtag joint, in registration order.
pub static SCHEDTAG_JOINTS: [&JointManager; 6] = [
    &SCHEDTAG_HOSTS,
    &SCHEDTAG_STORAGES,
    &SCHEDTAG_NETWORKS,
    &SCHEDTAG_CLOUDPROVIDERS,
    &SCHEDTAG_ZONES,
    &SCHEDTAG_CLOUDREGIONS,
];

// identity

pub static IDENTITY_PROVIDERS: ResourceManager = ResourceManager::new(
    "identity",
    "identity_provider",
    "identity_providers",
    &["id", "name", "driver", "template", "enabled", "status", "sync_status", "target_domain"],
);
pub static CREDENTIALS: ResourceManager = ResourceManager::new(
    "identity",
    "credential",
    "credentials",
    &["id", "type", "user", "project", "enabled", "created_at"],
);
pub static POLICIES: ResourceManager = ResourceManager::new(
    "identity",
    "policy",
    "policies",
    &["id", "name", "type", "scope", "enabled", "is_system", "domain"],
);
pub static TENANTS: ResourceManager = ResourceManager::new(
    "identity",
    "tenant",
    "tenants",
    &["id", "name", "domain", "description"],
);
pub static PROJECTS: ResourceManager = ResourceManager::new(
    "identity",
    "project",
    "projects",
    &["id", "name", "domain"],
);
pub static PROJECT_ADMIN_CANDIDATES: ResourceManager = ResourceManager::new(
    "identity",
    "projectadmincandidate",
    "projectadmincandidates",
    &["id", "name", "displayname", "domain"],
);

// monitor

pub static NODE_ALERTS: ResourceManager = ResourceManager::new(
    "monitor",
    "nodealert",
    "nodealerts",
    &["id", "metric", "node_name", "type", "threshold", "comparator", "level", "enabled"],
);
pub static ALARM_EVENTS: ResourceManager = ResourceManager::new(
    "monitor",
    "alarmevent",
    "alarmevents",
    &["id", "alarm_id", "level", "ack_status", "created_at"],
);
pub static TREE_NODES: ResourceManager = ResourceManager::new(
    "monitor",
    "tree_node",
    "tree_nodes",
    &["id", "name", "pid", "level"],
);
pub static MONITOR_TYPES: ResourceManager = ResourceManager::new(
    "monitor",
    "monitortype",
    "monitortypes",
    &["id", "name", "display_name", "description"],
);

// log

pub static ALARM_LOGS: ResourceManager = ResourceManager::new(
    "log",
    "alarmlog",
    "alarmlogs",
    &["id", "node_labels", "metric", "level", "message", "created_at"],
);

// meter

pub static METER_ALERTS: ResourceManager = ResourceManager::new(
    "meter",
    "meteralert",
    "meteralerts",
    &["id", "type", "threshold", "provider", "account", "project", "recipients", "status"],
);
pub static ASSOCIATED_BILLS: ResourceManager = ResourceManager::new(
    "meter",
    "associated_bill",
    "associated_bills",
    &["id", "name", "bill_type", "description"],
);
pub static BILL_CONDITIONS: ResourceManager = ResourceManager::new(
    "meter",
    "billcondition",
    "billconditions",
    &["item_id", "item_name"],
);
pub static RESOURCE_FEES: ResourceManager = ResourceManager::new(
    "meter",
    "resourcefee",
    "resourcefees",
    &["res_id", "res_name", "res_type", "project_name", "amount", "currency"],
);
pub static RES_RESULTS: ResourceManager = ResourceManager::new(
    "meter",
    "resresult",
    "resresults",
    &["res_id", "res_name", "res_type", "cloudaccount", "amount", "stat_date"],
);

// notify

pub static NOTIFY_TEMPLATES: ResourceManager = ResourceManager::new(
    "notify",
    "notifytemplate",
    "notifytemplates",
    &["id", "contact_type", "topic", "template_type", "lang"],
);

// k8s

pub static KUBE_CLUSTERS: ResourceManager = ResourceManager::new(
    "k8s",
    "kubecluster",
    "kubeclusters",
    &["id", "name", "mode", "provider", "resource_type", "version", "status"],
);
pub static K8S_NODES: ResourceManager = ResourceManager::new(
    "k8s",
    "k8s_node",
    "k8s_nodes",
    &["name", "cluster", "status", "unschedulable", "address"],
);

// ansible

pub static ANSIBLE_PLAYBOOKS: ResourceManager = ResourceManager::new(
    "ansible",
    "ansibleplaybook",
    "ansibleplaybooks",
    &["id", "name", "status", "start_time", "end_time"],
);
pub static ANSIBLE_PLAYBOOKS_V2: ResourceManager = ResourceManager::new(
    "devtool",
    "ansibleplaybook",
    "ansibleplaybooks",
    &["id", "name", "status", "created_at"],
);

// update

pub static UPDATES: ResourceManager = ResourceManager::new(
    "update",
    "update",
    "updates",
    &["id", "hostname", "current_version", "update_version", "status"],
);

/// Identity of one catalogue entry, as printed by `module-list`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct ModuleInfo {
    pub service: &'static str,
    pub keyword: &'static str,
    pub keyword_plural: &'static str,
}

impl From<&ResourceManager> for ModuleInfo {
    fn from(manager: &ResourceManager) -> Self {
        Self {
            service: manager.service,
            keyword: manager.keyword,
            keyword_plural: manager.keyword_plural,
        }
    }
}

impl From<&JointManager> for ModuleInfo {
    fn from(manager: &JointManager) -> Self {
        Self {
            service: manager.service,
            keyword: manager.keyword,
            keyword_plural: manager.keyword_plural,
        }
    }
}

/// Every known manager, sorted by service and then keyword.
pub fn all() -> Vec<ModuleInfo> {
    let resources: &[&ResourceManager] = &[
        &ZONES,
        &CLOUDREGIONS,
        &STORAGES,
        &DISKS,
        &WIRES,
        &HOSTS,
        &NETWORKS,
        &CLOUDPROVIDERS,
        &LOADBALANCER_ACLS,
        &CACHED_LOADBALANCER_ACLS,
        &LOADBALANCER_LISTENER_RULES,
        &ELASTIC_CACHES,
        &ELASTIC_CACHE_BACKUPS,
        &DBINSTANCES,
        &SCHEDTAGS,
        &SCALING_GROUPS,
        &SERVICE_CATALOGS,
        &SERVER_SKUS,
        &BAREMETAL_EVENTS,
        &SNAPSHOTS,
        &INSTANCE_SNAPSHOTS,
        &SERVERS,
        &STORAGE_CACHES,
        &CACHED_IMAGES,
        &POLICY_DEFINITIONS,
        &NAT_GATEWAYS,
        &VPCS,
        &IDENTITY_PROVIDERS,
        &CREDENTIALS,
        &POLICIES,
        &TENANTS,
        &PROJECTS,
        &PROJECT_ADMIN_CANDIDATES,
        &NODE_ALERTS,
        &ALARM_EVENTS,
        &TREE_NODES,
        &MONITOR_TYPES,
        &ALARM_LOGS,
        &METER_ALERTS,
        &ASSOCIATED_BILLS,
        &BILL_CONDITIONS,
        &RESOURCE_FEES,
        &RES_RESULTS,
        &NOTIFY_TEMPLATES,
        &KUBE_CLUSTERS,
        &K8S_NODES,
        &ANSIBLE_PLAYBOOKS,
        &ANSIBLE_PLAYBOOKS_V2,
        &UPDATES,
    ];
    let joints: &[&JointManager] = &[
        &SCHEDTAG_HOSTS,
        &SCHEDTAG_STORAGES,
        &SCHEDTAG_NETWORKS,
        &SCHEDTAG_CLOUDPROVIDERS,
        &SCHEDTAG_ZONES,
        &SCHEDTAG_CLOUDREGIONS,
        &HOST_NETWORKS,
        &STORAGE_CACHED_IMAGES,
    ];

    let mut modules: Vec<ModuleInfo> = resources
        .iter()
        .map(|manager| ModuleInfo::from(*manager))
        .chain(joints.iter().map(|manager| ModuleInfo::from(*manager)))
        .collect();
    modules.sort();
    modules
}
