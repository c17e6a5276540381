//! Service descriptors and their Murano wire representation.
//!
//! Murano's service bodies are deeply nested maps keyed by things like `"?"`
//! and `_{hex}`. Scenario code builds one of the typed variants below and the
//! wire shape is produced only by [`ServiceDescriptor::to_wire`].

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use uuid::Uuid;

/// Murano class name of a Linux instance.
const LINUX_INSTANCE_TYPE: &str = "io.murano.resources.LinuxMuranoInstance";

/// Murano class name of the Apache application.
const APACHE_TYPE: &str = "io.murano.apps.apache.ApacheHttpServer";

/// Murano class name of the MySQL application.
const MYSQL_TYPE: &str = "io.murano.databases.MySql";

/// Murano class name of the WordPress application.
const WORDPRESS_TYPE: &str = "io.murano.apps.WordPress";

/// Sizing and image reference for the VM backing a service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstanceSpec {
    /// Flavor name (the throwaway flavor created by the precondition gate).
    pub flavor: String,

    /// Glance image name.
    pub image: String,

    /// Instance name, randomly generated per scenario.
    pub name: String,

    /// Whether the platform should attach a floating IP.
    pub assign_floating_ip: bool,
}

impl InstanceSpec {
    fn to_wire(&self) -> Value {
        json!({
            "flavor": self.flavor,
            "image": self.image,
            "assignFloatingIp": self.assign_floating_ip,
            "?": {
                "type": LINUX_INSTANCE_TYPE,
                "id": Uuid::new_v4().to_string(),
            },
            "name": self.name,
        })
    }
}

/// The raw service body a create-service call returned.
///
/// Composite applications embed these verbatim when referencing the services
/// they depend on, so the handle stays opaque JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceRef(pub Value);

/// One deployable application unit, per application kind.
#[derive(Debug, Clone)]
pub enum ServiceDescriptor {
    /// Apache HTTP server on a Linux instance.
    WebServer {
        name: String,
        instance: InstanceSpec,
        enable_php: bool,
    },

    /// MySQL database on a Linux instance.
    Database {
        name: String,
        instance: InstanceSpec,
        database: String,
        username: String,
        password: String,
    },

    /// WordPress referencing a previously created web server and database.
    CmsApp {
        name: String,
        server: ServiceRef,
        database: ServiceRef,
        db_name: String,
        db_user: String,
        db_password: String,
    },
}

impl ServiceDescriptor {
    /// Human-readable application name shown in the Murano dashboard.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::WebServer { .. } => "Apache",
            Self::Database { .. } => "MySQL",
            Self::CmsApp { .. } => "WordPress",
        }
    }

    fn type_name(&self) -> &'static str {
        match self {
            Self::WebServer { .. } => APACHE_TYPE,
            Self::Database { .. } => MYSQL_TYPE,
            Self::CmsApp { .. } => WORDPRESS_TYPE,
        }
    }

    /// Build the Murano service body, generating a fresh correlation id.
    pub fn to_wire(&self) -> Value {
        let mut body = match self {
            Self::WebServer {
                name,
                instance,
                enable_php,
            } => {
                let mut body = json!({
                    "instance": instance.to_wire(),
                    "name": name,
                });
                if *enable_php {
                    body["enablePHP"] = json!(true);
                }
                body
            }
            Self::Database {
                name,
                instance,
                database,
                username,
                password,
            } => json!({
                "instance": instance.to_wire(),
                "name": name,
                "database": database,
                "username": username,
                "password": password,
            }),
            Self::CmsApp {
                name,
                server,
                database,
                db_name,
                db_user,
                db_password,
            } => json!({
                "name": name,
                "server": server.0,
                "database": database.0,
                "dbName": db_name,
                "dbUser": db_user,
                "dbPassword": db_password,
            }),
        };

        // The dashboard reads the display name from an `_{hex}` key inside
        // the "?" header block.
        let display_key = format!("_{}", Uuid::new_v4().simple());
        body["?"] = json!({
            display_key: { "name": self.display_name() },
            "type": self.type_name(),
            "id": Uuid::new_v4().to_string(),
        });

        body
    }
}
